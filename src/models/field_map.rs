//! # 검색 필드 매핑과 번역 전략
//!
//! `FieldMap`은 화면에 보여줄 논리 필드(`title`, `summary`)를
//! 저장소의 실제 속성 이름에 연결합니다.
//! 예: `title=title,summary=body` → 요약은 `body` 속성에서 가져옵니다.
//!
//! 매핑에 등록된 모든 속성이 전문검색 대상이 되며,
//! 선언 순서대로 OR 조건이 만들어집니다.

use crate::error::AppError;
use std::str::FromStr;

/// 논리 필드 이름 → 저장소 속성 이름의 순서 있는 매핑
///
/// `title`과 `summary` 키는 반드시 있어야 합니다.
/// 그 외 키를 추가하면 검색 대상 속성만 늘어납니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    pub const TITLE: &'static str = "title";
    pub const SUMMARY: &'static str = "summary";

    /// (논리 키, 속성 이름) 쌍들로 매핑을 만듭니다.
    ///
    /// # 에러
    /// - `title` 또는 `summary` 키가 없는 경우
    /// - 같은 논리 키가 두 번 나오는 경우
    /// - 속성 이름이 비어 있는 경우
    pub fn new<I, K, V>(entries: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self { entries: Vec::new() };
        for (key, property) in entries {
            let key = key.into();
            let property = property.into();
            if property.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "search field '{}' has an empty property name",
                    key
                )));
            }
            if map.get(&key).is_some() {
                return Err(AppError::Config(format!(
                    "search field '{}' is mapped twice",
                    key
                )));
            }
            map.entries.push((key, property));
        }

        for required in [Self::TITLE, Self::SUMMARY] {
            if map.get(required).is_none() {
                return Err(AppError::Config(format!(
                    "search fields must map '{}'",
                    required
                )));
            }
        }

        Ok(map)
    }

    /// `title=title,summary=body` 형식의 문자열을 파싱합니다.
    pub fn parse(spec: &str) -> Result<Self, AppError> {
        let mut entries = Vec::new();
        for pair in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, property) = pair.split_once('=').ok_or_else(|| {
                AppError::Config(format!("search field '{}' must look like key=property", pair))
            })?;
            entries.push((key.trim().to_string(), property.trim().to_string()));
        }
        Self::new(entries)
    }

    /// 논리 키에 연결된 속성 이름
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, property)| property.as_str())
    }

    pub fn title(&self) -> &str {
        self.get(Self::TITLE).unwrap_or(Self::TITLE)
    }

    pub fn summary(&self) -> &str {
        self.get(Self::SUMMARY).unwrap_or(Self::SUMMARY)
    }

    /// 검색 대상 속성 이름들 (선언 순서)
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, property)| property.as_str())
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            entries: vec![
                (Self::TITLE.to_string(), "title".to_string()),
                (Self::SUMMARY.to_string(), "body".to_string()),
            ],
        }
    }
}

/// 다국어 콘텐츠가 저장소에 저장되는 방식
///
/// - `Child`: 언어별 변형이 `phpcr_locale:<lang>` 이름의 자식 노드로 저장됨
/// - `Attribute`: 언어가 속성으로 저장됨
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationStrategy {
    Child,
    Attribute,
}

impl FromStr for TranslationStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "child" => Ok(Self::Child),
            "attribute" => Ok(Self::Attribute),
            other => Err(AppError::Config(format!(
                "unknown translation strategy '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_maps_summary_to_body() {
        let fields = FieldMap::default();
        assert_eq!(fields.title(), "title");
        assert_eq!(fields.summary(), "body");
        assert_eq!(fields.properties().collect::<Vec<_>>(), vec!["title", "body"]);
    }

    #[test]
    fn parse_keeps_declared_order() {
        let fields = FieldMap::parse("summary=body, title=headline, extra=tags").unwrap();
        assert_eq!(
            fields.properties().collect::<Vec<_>>(),
            vec!["body", "headline", "tags"]
        );
        assert_eq!(fields.title(), "headline");
    }

    #[test]
    fn parse_rejects_incomplete_maps() {
        assert!(FieldMap::parse("").is_err());
        assert!(FieldMap::parse("title=title").is_err());
        assert!(FieldMap::parse("title=title,summary").is_err());
        assert!(FieldMap::parse("title=title,summary=body,title=other").is_err());
        assert!(FieldMap::parse("title=,summary=body").is_err());
    }

    #[test]
    fn translation_strategy_from_str() {
        assert_eq!("child".parse::<TranslationStrategy>().unwrap(), TranslationStrategy::Child);
        assert_eq!(
            "Attribute".parse::<TranslationStrategy>().unwrap(),
            TranslationStrategy::Attribute
        );
        assert!("sibling".parse::<TranslationStrategy>().is_err());
    }
}
