//! # URL 생성기
//!
//! 검색 결과마다 콘텐츠 페이지 링크를 만들어야 합니다.
//! 검색 로직은 `content_id` 파라미터만 넘기고, 실제 URL 모양은
//! 라우트 테이블(`RouteTable`)이 결정합니다.
//!
//! 라우트 패턴은 `{파라미터}` 자리표시자를 사용합니다.
//! 예: `/content/{content_id}` + `content_id=abc` → `/content/abc`

use crate::error::AppError;
use std::collections::HashMap;

/// 라우트 이름과 파라미터로 URL을 만드는 능력
pub trait UrlGenerator {
    /// `route`가 `None`이면 기본 라우트를 사용합니다.
    fn generate(&self, route: Option<&str>, params: &[(&str, &str)]) -> Result<String, AppError>;
}

/// 이름 있는 라우트 패턴 모음 + 기본 라우트
#[derive(Debug, Clone)]
pub struct RouteTable {
    default_pattern: String,
    routes: HashMap<String, String>,
}

impl RouteTable {
    pub fn new(default_pattern: impl Into<String>) -> Self {
        Self {
            default_pattern: default_pattern.into(),
            routes: HashMap::new(),
        }
    }

    pub fn with_route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.routes.insert(name.into(), pattern.into());
        self
    }
}

impl UrlGenerator for RouteTable {
    fn generate(&self, route: Option<&str>, params: &[(&str, &str)]) -> Result<String, AppError> {
        let pattern = match route {
            None => self.default_pattern.as_str(),
            Some(name) => self
                .routes
                .get(name)
                .map(String::as_str)
                .ok_or_else(|| AppError::UnknownRoute(name.to_string()))?,
        };

        let mut url = pattern.to_string();
        let mut query = Vec::new();
        for (name, value) in params {
            let placeholder = format!("{{{}}}", name);
            if url.contains(&placeholder) {
                url = url.replace(&placeholder, &urlencoding::encode(value));
            } else {
                // 패턴에 자리가 없는 파라미터는 쿼리 문자열로 붙입니다
                query.push(format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(value)
                ));
            }
        }

        if !query.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query.join("&"));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_route_fills_content_id() {
        let routes = RouteTable::new("/content/{content_id}");
        let url = routes.generate(None, &[("content_id", "abc-123")]).unwrap();
        assert_eq!(url, "/content/abc-123");
    }

    #[test]
    fn path_like_ids_are_encoded() {
        let routes = RouteTable::new("/content/{content_id}");
        let url = routes
            .generate(None, &[("content_id", "/cms/content/a b")])
            .unwrap();
        assert_eq!(url, "/content/%2Fcms%2Fcontent%2Fa%20b");
    }

    #[test]
    fn extra_params_become_query_string() {
        let routes = RouteTable::new("/content").with_route("search", "/search");
        assert_eq!(
            routes.generate(None, &[("content_id", "x")]).unwrap(),
            "/content?content_id=x"
        );
        assert_eq!(
            routes.generate(Some("search"), &[("query", "a&b")]).unwrap(),
            "/search?query=a%26b"
        );
    }

    #[test]
    fn unknown_route_is_an_error() {
        let routes = RouteTable::new("/content/{content_id}");
        assert!(matches!(
            routes.generate(Some("missing"), &[]),
            Err(AppError::UnknownRoute(name)) if name == "missing"
        ));
    }
}
