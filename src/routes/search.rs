//! # 검색 라우트 핸들러 (컨트롤러)
//!
//! HTTP 요청에서 검색 입력값을 꺼내 `QueryAssembler`에 넘기고,
//! 결과를 HTML 페이지 또는 JSON으로 돌려줍니다.
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | GET | /search?query=키워드&page=2 | 검색 결과 HTML 페이지 |
//! | GET | /{lang}/search?query=키워드 | 언어를 지정한 검색 결과 HTML 페이지 |
//! | GET | /api/v1/search?query=키워드 | 템플릿 파라미터를 JSON으로 |
//! | GET | /api/v1/{lang}/search?query=키워드 | 언어 지정 + JSON |
//!
//! 파라미터 이름(`query`, `page`)은 설정으로 바꿀 수 있습니다.
//!
//! ## 요청 컨텍스트
//! - 페이지: 없거나 숫자가 아니면 1, 1보다 작으면 1로 맞춤
//! - 검색어: 없으면 빈 문자열 (앞뒤 공백 제거)
//! - 요청 로케일: `Accept-Language` 첫 항목의 기본 언어 태그, 없으면 `DEFAULT_LOCALE`

use crate::{
    config::SearchConfig,
    db::SqliteStore,
    error::AppError,
    models::{SearchPage, SearchRequest},
    services::{
        router::RouteTable,
        template::{HtmlRenderer, TemplateRenderer, SEARCH_TEMPLATE},
        QueryAssembler,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::{header::ACCEPT_LANGUAGE, HeaderMap},
    response::Html,
    Json,
};
use sqlx::SqlitePool;
use std::{collections::HashMap, sync::Arc};

/// 검색 폼이 제출되는 HTML 경로
pub const SEARCH_PAGE_PATH: &str = "/search";

/// 애플리케이션 공유 상태
///
/// 모든 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 무거운 구성요소는 Arc로 감싸 clone 비용을 없앱니다.
#[derive(Clone)]
pub struct AppState {
    pub store: SqliteStore,
    pub assembler: Arc<QueryAssembler>,
    pub urls: Arc<RouteTable>,
    pub renderer: Arc<HtmlRenderer>,
    pub settings: Arc<SearchConfig>,
}

impl AppState {
    /// 검색 설정으로 저장소, 조립기, 라우트 테이블, 렌더러를 구성합니다.
    pub fn new(pool: SqlitePool, settings: SearchConfig) -> Self {
        let urls = RouteTable::new(settings.content_route.clone())
            .with_route(settings.search_route.clone(), SEARCH_PAGE_PATH);
        let assembler = QueryAssembler {
            search_path: settings.search_path.clone(),
            fields: settings.fields.clone(),
            translation_strategy: settings.translation_strategy,
            restrict_by_language: settings.restrict_by_language,
        };
        let renderer = HtmlRenderer::new(urls.clone(), settings.query_parameter_key.clone());

        Self {
            store: SqliteStore::new(pool),
            assembler: Arc::new(assembler),
            urls: Arc::new(urls),
            renderer: Arc::new(renderer),
            settings: Arc::new(settings),
        }
    }
}

/// `GET /search` — 검색 결과 HTML 페이지
pub async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    render_page(&state, &params, &headers, None).await
}

/// `GET /{lang}/search` — 언어를 경로로 지정한 검색 결과 HTML 페이지
pub async fn localized_search_page(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    render_page(&state, &params, &headers, Some(lang)).await
}

/// `GET /api/v1/search` — 템플릿 파라미터를 JSON으로 반환
pub async fn search_json(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<SearchPage>, AppError> {
    Ok(Json(run_search(&state, &params, &headers, None).await?))
}

/// `GET /api/v1/{lang}/search`
pub async fn localized_search_json(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<SearchPage>, AppError> {
    Ok(Json(run_search(&state, &params, &headers, Some(lang)).await?))
}

async fn render_page(
    state: &AppState,
    params: &HashMap<String, String>,
    headers: &HeaderMap,
    lang: Option<String>,
) -> Result<Html<String>, AppError> {
    let page = run_search(state, params, headers, lang).await?;
    Ok(Html(state.renderer.render(SEARCH_TEMPLATE, &page)?))
}

/// 요청 컨텍스트를 평범한 값으로 풀어 검색을 실행하고 템플릿 파라미터를 만듭니다.
async fn run_search(
    state: &AppState,
    params: &HashMap<String, String>,
    headers: &HeaderMap,
    lang: Option<String>,
) -> Result<SearchPage, AppError> {
    let settings = &state.settings;
    let page = requested_page(params, &settings.page_parameter_key);
    let query = requested_query(params, &settings.query_parameter_key);
    let locale = request_locale(headers, &settings.default_locale);
    let language = state.assembler.resolve_language(lang.as_deref(), &locale);

    let request = SearchRequest {
        query,
        page,
        language,
        per_page: settings.per_page,
    };
    let results = state
        .assembler
        .search(&state.store, state.urls.as_ref(), &request)
        .await?;

    Ok(SearchPage {
        search_term: request.query,
        estimated: results.len(),
        search_results: results,
        translation_domain: settings.translation_domain.clone(),
        show_paging: false,
        start: page,
        per_page: settings.per_page,
        search_route: settings.search_route.clone(),
    })
}

/// 요청한 페이지 번호. 없거나 잘못되면 1, 1 미만은 1로 맞춥니다.
fn requested_page(params: &HashMap<String, String>, key: &str) -> u32 {
    let Some(raw) = params.get(key) else {
        return 1;
    };
    match raw.trim().parse::<i64>() {
        Ok(page) if page >= 1 => u32::try_from(page).unwrap_or(u32::MAX),
        Ok(page) => {
            tracing::debug!(page, "clamping page below 1");
            1
        }
        Err(_) => 1,
    }
}

fn requested_query(params: &HashMap<String, String>, key: &str) -> String {
    params
        .get(key)
        .map(|q| q.trim().to_string())
        .unwrap_or_default()
}

/// `Accept-Language: de-CH,de;q=0.9` → `de`
fn request_locale(headers: &HeaderMap, default_locale: &str) -> String {
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|first| first.split(';').next())
        .and_then(|tag| tag.trim().split(['-', '_']).next())
        .map(|primary| primary.trim().to_ascii_lowercase())
        .filter(|primary| !primary.is_empty() && primary != "*")
        .unwrap_or_else(|| default_locale.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn page_defaults_and_clamps() {
        assert_eq!(requested_page(&params(&[]), "page"), 1);
        assert_eq!(requested_page(&params(&[("page", "3")]), "page"), 3);
        assert_eq!(requested_page(&params(&[("page", "0")]), "page"), 1);
        assert_eq!(requested_page(&params(&[("page", "-4")]), "page"), 1);
        assert_eq!(requested_page(&params(&[("page", "two")]), "page"), 1);
        assert_eq!(requested_page(&params(&[("p", "5")]), "p"), 5);
    }

    #[test]
    fn query_is_trimmed_and_defaults_to_empty() {
        assert_eq!(requested_query(&params(&[]), "query"), "");
        assert_eq!(requested_query(&params(&[("query", "  cat ")]), "query"), "cat");
    }

    #[test]
    fn locale_comes_from_accept_language() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_locale(&headers, "en"), "en");

        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("de-CH,de;q=0.9,en;q=0.8"));
        assert_eq!(request_locale(&headers, "en"), "de");

        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("*"));
        assert_eq!(request_locale(&headers, "en"), "en");
    }
}
