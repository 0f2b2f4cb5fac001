//! 저장소 노드와 검색 결과 행

use serde::Deserialize;
use std::collections::HashMap;

/// 노드의 고유 식별자를 담는 가상 속성 이름
pub const IDENTIFIER_PROPERTY: &str = "jcr:uuid";

/// 문서(document)로 매핑된 노드가 갖는 클래스 구분 속성
///
/// 이 값이 없는 노드는 번역 자식 노드처럼 부모 문서에 딸린 노드로 봅니다.
pub const CLASS_PROPERTY: &str = "phpcr:class";

/// 저장소 기본 노드 타입
pub const DEFAULT_NODE_TYPE: &str = "nt:unstructured";

/// 저장소가 돌려준 검색 결과 한 행
///
/// 노드 경로와, 쿼리에서 선택한 속성 값들을 담습니다.
/// 값이 없는(null) 속성은 맵에 들어가지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRow {
    pub path: String,
    values: HashMap<String, String>,
}

impl ResultRow {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            values: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_value(name, value);
        self
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// 행 자신의 식별자. 빈 문자열은 없는 것으로 취급합니다.
    pub fn identifier(&self) -> Option<&str> {
        self.value(IDENTIFIER_PROPERTY).filter(|id| !id.is_empty())
    }

    /// 클래스 구분 속성이 비어 있지 않으면 true
    pub fn has_class(&self) -> bool {
        self.value(CLASS_PROPERTY).is_some_and(|class| !class.is_empty())
    }
}

/// 경로로 찾은 노드의 식별 정보
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct NodeIdentity {
    pub path: String,
    pub identifier: Option<String>,
}

impl NodeIdentity {
    /// 식별자가 없는(참조 불가) 노드는 경로를 식별자로 씁니다.
    pub fn into_identifier(self) -> String {
        match self.identifier {
            Some(id) if !id.is_empty() => id,
            _ => self.path,
        }
    }
}

/// 시드 파일(JSON 배열)의 노드 한 개
///
/// ```json
/// { "path": "/cms/content/about", "identifier": "c0ffee",
///   "properties": { "phpcr:class": "Page", "title": "About", "body": "<p>Hi</p>" } }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub path: String,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl NodeRecord {
    /// 경로의 마지막 구간 (`/cms/content/about` → `about`)
    pub fn name(&self) -> &str {
        node_name(&self.path)
    }
}

/// JSON 속성 값을 문자열로 바꿉니다.
///
/// 숫자/불리언은 문자열로, 다중 값(배열)은 공백으로 이어 붙입니다.
/// null과 객체는 값이 없는 것으로 봅니다.
pub fn property_text(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(property_text).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        Value::Null | Value::Object(_) => None,
    }
}

/// 경로의 마지막 구간을 노드 이름으로 돌려줍니다. 루트(`/`)의 이름은 빈 문자열입니다.
pub fn node_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

/// 부모 노드 경로 (`/cms/content/x/y` → `/cms/content/x`, `/x` → `/`)
pub fn parent_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &trimmed[..idx],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_path_walks_one_level_up() {
        assert_eq!(parent_path("/cms/content/x/y"), "/cms/content/x");
        assert_eq!(parent_path("/cms"), "/");
        assert_eq!(parent_path("/cms/content/"), "/cms");
        assert_eq!(parent_path("/"), "/");
    }

    #[test]
    fn node_name_is_last_segment() {
        assert_eq!(node_name("/cms/content/phpcr_locale:de"), "phpcr_locale:de");
        assert_eq!(node_name("/"), "");
    }

    #[test]
    fn property_text_flattens_json_values() {
        use serde_json::json;

        assert_eq!(property_text(&json!("x")), Some("x".to_string()));
        assert_eq!(property_text(&json!(3)), Some("3".to_string()));
        assert_eq!(property_text(&json!(["a", "b"])), Some("a b".to_string()));
        assert_eq!(property_text(&json!(null)), None);
        assert_eq!(property_text(&json!({"k": "v"})), None);
    }

    #[test]
    fn node_identity_falls_back_to_path() {
        let node = NodeIdentity {
            path: "/cms/content/x".to_string(),
            identifier: None,
        };
        assert_eq!(node.into_identifier(), "/cms/content/x");
    }

    #[test]
    fn empty_values_are_falsy() {
        let row = ResultRow::new("/a")
            .with_value(IDENTIFIER_PROPERTY, "")
            .with_value(CLASS_PROPERTY, "");
        assert_eq!(row.identifier(), None);
        assert!(!row.has_class());

        let row = ResultRow::new("/a").with_value(CLASS_PROPERTY, "Page");
        assert!(row.has_class());
    }
}
