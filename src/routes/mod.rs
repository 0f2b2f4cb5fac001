//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버/저장소 상태 확인 (헬스체크)
//! - `search`: 검색 컨트롤러 (HTML, JSON)

pub mod health;
pub mod search;

pub use health::*;
pub use search::*;

use axum::{routing::get, Router};

/// 모든 라우트를 하나의 라우터로 묶습니다.
///
/// axum 0.8부터 경로 파라미터는 `{lang}` 문법을 씁니다.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/search", get(search_json))
        .route("/{lang}/search", get(localized_search_json))
        .route("/health", get(health_check));

    Router::new()
        .route(SEARCH_PAGE_PATH, get(search_page))
        .route("/{lang}/search", get(localized_search_page))
        .nest("/api/v1", api_routes)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SearchConfig,
        db::{
            nodes::tests::{node, test_pool},
            upsert_node,
        },
        models::TranslationStrategy,
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app(settings: SearchConfig) -> Router {
        let pool = test_pool().await;
        let nodes = [
            node("/cms", None, json!({})),
            node("/cms/content", None, json!({})),
            node(
                "/cms/content/cats",
                Some("uuid-cats"),
                json!({"phpcr:class": "Page", "title": "Cat care", "body": "<p>How to feed a <b>cat</b></p>"}),
            ),
            node(
                "/cms/content/dogs",
                Some("uuid-dogs"),
                json!({"phpcr:class": "Page", "title": "Dogs", "body": "Dogs ignore the cat"}),
            ),
            node(
                "/cms/content/dogs/phpcr_locale:de",
                None,
                json!({"title": "Hunde", "body": "Hunde und die Katze"}),
            ),
        ];
        for n in &nodes {
            upsert_node(&pool, n).await.unwrap();
        }
        router(AppState::new(pool, settings))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn json_search_returns_template_params() {
        let (status, body) = get_json(app(SearchConfig::default()).await, "/api/v1/search?query=cat").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["searchTerm"], "cat");
        assert_eq!(body["estimated"], 2);
        assert_eq!(body["showPaging"], false);
        assert_eq!(body["start"], 1);
        assert_eq!(body["perPage"], 10);
        assert_eq!(body["searchRoute"], "search");
        assert_eq!(body["searchResults"]["uuid-cats"]["url"], "/content/uuid-cats");
        assert_eq!(body["searchResults"]["uuid-cats"]["summary"], "How to feed a cat");
    }

    #[tokio::test]
    async fn empty_query_yields_empty_results() {
        let (status, body) = get_json(app(SearchConfig::default()).await, "/api/v1/search?page=4").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["estimated"], 0);
        assert_eq!(body["searchResults"], json!({}));
        assert_eq!(body["start"], 4);
    }

    #[tokio::test]
    async fn localized_child_strategy_maps_to_parent_document() {
        let settings = SearchConfig {
            restrict_by_language: true,
            translation_strategy: Some(TranslationStrategy::Child),
            ..SearchConfig::default()
        };
        let (_, body) = get_json(app(settings).await, "/api/v1/de/search?query=katze").await;

        assert_eq!(body["estimated"], 1);
        assert_eq!(body["searchResults"]["uuid-dogs"]["title"], "Hunde");
    }

    #[tokio::test]
    async fn pages_past_the_end_are_empty() {
        let (_, body) = get_json(app(SearchConfig::default()).await, "/api/v1/search?query=cat&page=2").await;
        assert_eq!(body["estimated"], 0);
        assert_eq!(body["start"], 2);
    }

    #[tokio::test]
    async fn html_page_renders_results() {
        let response = app(SearchConfig::default())
            .await
            .oneshot(
                Request::builder()
                    .uri("/search?query=cat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains(r#"href="/content/uuid-dogs""#));
        assert!(html.contains("Cat care"));
    }

    #[tokio::test]
    async fn health_reports_repository() {
        let (status, body) = get_json(app(SearchConfig::default()).await, "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["repository"], "ok");
    }
}
