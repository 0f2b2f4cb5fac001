//! # 검색 요청/결과 모델
//!
//! - `SearchRequest`: 컨트롤러가 HTTP 요청에서 뽑아낸 검색 입력값
//! - `SearchResultItem`: 화면에 표시할 검색 결과 한 건
//! - `SearchResults`: contentId를 키로 하는 순서 있는 결과 모음
//! - `SearchPage`: 템플릿에 넘기는 파라미터 묶음

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// 검색 요청 입력값
///
/// 페이지는 1부터 시작합니다. 0은 1로 취급합니다(오프셋이 음수가 되지 않도록).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// 검색어. 비어 있으면 저장소를 조회하지 않습니다.
    pub query: String,
    pub page: u32,
    /// 언어 제한 (None = 제한 없음)
    pub language: Option<String>,
    pub per_page: u32,
}

impl SearchRequest {
    /// 페이지 번호로 계산한 결과 시작 위치: `(page - 1) * per_page`
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }
}

/// 검색 결과 한 건
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub content_id: String,
    pub url: String,
    pub title: String,
    /// 태그를 제거하고 100자로 자른 요약
    pub summary: String,
}

/// contentId를 키로 하는 순서 있는 결과 모음
///
/// 같은 contentId가 다시 들어오면 나중 값이 이깁니다(last write wins).
/// 덮어쓴 항목은 처음 들어온 자리를 유지합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    items: Vec<SearchResultItem>,
    positions: HashMap<String, usize>,
}

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: SearchResultItem) {
        match self.positions.get(&item.content_id) {
            Some(&idx) => self.items[idx] = item,
            None => {
                self.positions.insert(item.content_id.clone(), self.items.len());
                self.items.push(item);
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, content_id: &str) -> Option<&SearchResultItem> {
        self.positions.get(content_id).map(|&idx| &self.items[idx])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchResultItem> {
        self.items.iter()
    }
}

// JSON에서는 { "<contentId>": { "url": ..., "title": ..., "summary": ... } }
// 형태의 객체로, 삽입 순서를 지켜 직렬화합니다.
impl Serialize for SearchResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for item in &self.items {
            map.serialize_entry(&item.content_id, item)?;
        }
        map.end()
    }
}

/// 검색 템플릿에 넘기는 파라미터
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub search_term: String,
    pub search_results: SearchResults,
    /// 결과 건수 (= search_results 크기)
    pub estimated: usize,
    pub translation_domain: String,
    /// 페이지 이동 UI는 아직 연결되지 않아 항상 false
    pub show_paging: bool,
    pub start: u32,
    pub per_page: u32,
    pub search_route: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str) -> SearchResultItem {
        SearchResultItem {
            content_id: id.to_string(),
            url: format!("/content/{}", id),
            title: title.to_string(),
            summary: String::new(),
        }
    }

    #[test]
    fn offset_follows_page_arithmetic() {
        let request = SearchRequest {
            query: "cat".to_string(),
            page: 3,
            language: None,
            per_page: 10,
        };
        assert_eq!(request.offset(), 20);
        assert_eq!(SearchRequest { page: 1, ..request.clone() }.offset(), 0);
        assert_eq!(SearchRequest { page: 0, ..request }.offset(), 0);
    }

    #[test]
    fn duplicate_ids_keep_last_value_in_first_position() {
        let mut results = SearchResults::new();
        results.insert(item("a", "first"));
        results.insert(item("b", "other"));
        results.insert(item("a", "second"));

        assert_eq!(results.len(), 2);
        assert_eq!(results.get("a").unwrap().title, "second");
        let ids: Vec<_> = results.iter().map(|i| i.content_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn results_serialize_as_ordered_object() {
        let mut results = SearchResults::new();
        results.insert(item("z", "last letter"));
        results.insert(item("a", "first letter"));

        let json = serde_json::to_string(&results).unwrap();
        let z = json.find("\"z\"").unwrap();
        let a = json.find("\"a\"").unwrap();
        assert!(z < a, "insertion order must survive: {}", json);
        assert!(json.contains("\"contentId\":\"z\""));
    }
}
