//! # 검색 페이지 렌더러
//!
//! 템플릿 엔진 없이 `format!` 매크로로 검색 결과 HTML을 만듭니다.
//! 사용자 입력과 저장소 값은 모두 `html_escape`를 거쳐 출력합니다.
//!
//! 렌더러는 `TemplateRenderer` 트레이트 뒤에 있으므로 다른 엔진으로 바꿔도
//! 컨트롤러 코드는 그대로입니다.

use crate::{
    error::AppError,
    models::SearchPage,
    services::router::{RouteTable, UrlGenerator},
};

/// 검색 결과 템플릿 이름
pub const SEARCH_TEMPLATE: &str = "search.html";

/// 템플릿 이름과 파라미터로 문서를 렌더링하는 능력
pub trait TemplateRenderer {
    fn render(&self, template: &str, page: &SearchPage) -> Result<String, AppError>;
}

/// 기본 HTML 렌더러
///
/// 검색 폼의 action URL은 `SearchPage::search_route` 이름을 라우트 테이블에서 찾아 만듭니다.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    routes: RouteTable,
    query_parameter_key: String,
}

impl HtmlRenderer {
    pub fn new(routes: RouteTable, query_parameter_key: impl Into<String>) -> Self {
        Self {
            routes,
            query_parameter_key: query_parameter_key.into(),
        }
    }

    fn render_search(&self, page: &SearchPage) -> Result<String, AppError> {
        let action = self.routes.generate(Some(&page.search_route), &[])?;

        let mut items = String::new();
        for item in page.search_results.iter() {
            items.push_str(&format!(
                r#"      <li class="search-result" data-content-id="{id}">
        <h3><a href="{url}">{title}</a></h3>
        <p>{summary}</p>
      </li>
"#,
                id = html_escape(&item.content_id),
                url = html_escape(&item.url),
                title = html_escape(&item.title),
                summary = html_escape(&item.summary),
            ));
        }

        let listing = if page.search_term.is_empty() {
            String::new()
        } else if page.search_results.is_empty() {
            r#"    <p class="search-empty">No results</p>
"#
            .to_string()
        } else {
            format!(
                r#"    <p class="search-estimated">{estimated} results</p>
    <ol class="search-results" start="{first}">
{items}    </ol>
"#,
                estimated = page.estimated,
                first = u64::from(page.start.saturating_sub(1)) * u64::from(page.per_page) + 1,
                items = items,
            )
        };

        // showPaging은 항상 false이므로 페이지 이동 링크는 출력하지 않습니다
        Ok(format!(
            r#"<!DOCTYPE html>
<html>
  <head><meta charset="utf-8"><title>Search</title></head>
  <body data-translation-domain="{domain}">
    <form class="search-form" method="get" action="{action}">
      <input type="search" name="{key}" value="{term}">
      <button type="submit">Search</button>
    </form>
{listing}  </body>
</html>
"#,
            domain = html_escape(&page.translation_domain),
            action = html_escape(&action),
            key = html_escape(&self.query_parameter_key),
            term = html_escape(&page.search_term),
            listing = listing,
        ))
    }
}

impl TemplateRenderer for HtmlRenderer {
    fn render(&self, template: &str, page: &SearchPage) -> Result<String, AppError> {
        match template {
            SEARCH_TEMPLATE => self.render_search(page),
            other => Err(AppError::Template(format!("unknown template '{}'", other))),
        }
    }
}

/// HTML 특수문자를 엔티티로 바꿉니다.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
