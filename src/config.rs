//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버와 검색 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `HOST` / `PORT`: 서버 바인딩 주소
//! - `SEARCH_PER_PAGE`: 페이지당 결과 수
//! - `SEARCH_RESTRICT_BY_LANGUAGE`: 언어로 결과를 제한할지 여부
//! - `SEARCH_TRANSLATION_DOMAIN`: 템플릿 번역 도메인
//! - `SEARCH_PAGE_PARAMETER_KEY` / `SEARCH_QUERY_PARAMETER_KEY`: 쿼리 파라미터 이름
//! - `SEARCH_ROUTE`: 검색 폼이 제출되는 라우트 이름
//! - `SEARCH_PATH`: 검색 범위가 되는 저장소 경로
//! - `SEARCH_FIELDS`: `title=title,summary=body` 형식의 필드 매핑
//! - `SEARCH_TRANSLATION_STRATEGY`: `child`, `attribute` 또는 미설정
//! - `DEFAULT_LOCALE`: 요청에 언어 정보가 없을 때 쓰는 로케일
//! - `CONTENT_ROUTE`: 검색 결과 링크의 URL 패턴
//! - `SEED_FILE`: 시작 시 적재할 노드 시드 파일 (선택)

use crate::{
    error::AppError,
    models::{FieldMap, TranslationStrategy},
};
use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/content.db")
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub search: SearchConfig,
    /// 시작 시 적재할 시드 파일 경로
    pub seed_file: Option<String>,
}

/// 검색 컨트롤러 설정
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub per_page: u32,
    pub restrict_by_language: bool,
    pub translation_domain: String,
    pub page_parameter_key: String,
    pub query_parameter_key: String,
    pub search_route: String,
    pub search_path: String,
    pub fields: FieldMap,
    pub translation_strategy: Option<TranslationStrategy>,
    pub default_locale: String,
    pub content_route: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            per_page: 10,
            restrict_by_language: false,
            translation_domain: "search".to_string(),
            page_parameter_key: "page".to_string(),
            query_parameter_key: "query".to_string(),
            search_route: "search".to_string(),
            search_path: "/cms/content".to_string(),
            fields: FieldMap::default(),
            translation_strategy: None,
            default_locale: "en".to_string(),
            content_route: "/content/{content_id}".to_string(),
        }
    }
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// - `DATABASE_URL`이 없으면 에러
    /// - 검색 설정값이 잘못되었으면 에러 (잘못된 값을 조용히 무시하지 않음)
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::Config("DATABASE_URL must be set".to_string()))?;

        Ok(Self {
            database_url,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            search: SearchConfig::from_lookup(|key| env::var(key).ok())?,
            seed_file: env::var("SEED_FILE").ok().filter(|s| !s.trim().is_empty()),
        })
    }
}

impl SearchConfig {
    /// 키 → 값 조회 함수로 검색 설정을 만듭니다.
    ///
    /// 환경변수 대신 임의의 조회 함수를 받으므로 테스트에서 전역 환경을 건드리지 않아도 됩니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);

        let per_page = match lookup("SEARCH_PER_PAGE") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(AppError::Config(format!(
                        "SEARCH_PER_PAGE must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => defaults.per_page,
        };

        let restrict_by_language = match lookup("SEARCH_RESTRICT_BY_LANGUAGE") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                AppError::Config(format!(
                    "SEARCH_RESTRICT_BY_LANGUAGE must be a boolean, got '{}'",
                    raw
                ))
            })?,
            None => defaults.restrict_by_language,
        };

        let fields = match lookup("SEARCH_FIELDS") {
            Some(raw) => FieldMap::parse(&raw)?,
            None => defaults.fields,
        };

        let translation_strategy = match lookup("SEARCH_TRANSLATION_STRATEGY") {
            Some(raw) if raw.trim().is_empty() || raw.trim().eq_ignore_ascii_case("none") => None,
            Some(raw) => Some(raw.parse::<TranslationStrategy>()?),
            None => defaults.translation_strategy,
        };

        let search_path = text("SEARCH_PATH", defaults.search_path);
        if !search_path.starts_with('/') {
            return Err(AppError::Config(format!(
                "SEARCH_PATH must be absolute, got '{}'",
                search_path
            )));
        }

        Ok(Self {
            per_page,
            restrict_by_language,
            translation_domain: text("SEARCH_TRANSLATION_DOMAIN", defaults.translation_domain),
            page_parameter_key: text("SEARCH_PAGE_PARAMETER_KEY", defaults.page_parameter_key),
            query_parameter_key: text("SEARCH_QUERY_PARAMETER_KEY", defaults.query_parameter_key),
            search_route: text("SEARCH_ROUTE", defaults.search_route),
            search_path,
            fields,
            translation_strategy,
            default_locale: text("DEFAULT_LOCALE", defaults.default_locale),
            content_route: text("CONTENT_ROUTE", defaults.content_route),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<SearchConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SearchConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_bundle_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.per_page, 10);
        assert!(!cfg.restrict_by_language);
        assert_eq!(cfg.search_path, "/cms/content");
        assert_eq!(cfg.fields, FieldMap::default());
        assert_eq!(cfg.translation_strategy, None);
        assert_eq!(cfg.page_parameter_key, "page");
        assert_eq!(cfg.query_parameter_key, "query");
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("SEARCH_PER_PAGE", "25"),
            ("SEARCH_RESTRICT_BY_LANGUAGE", "yes"),
            ("SEARCH_TRANSLATION_STRATEGY", "child"),
            ("SEARCH_FIELDS", "title=headline,summary=teaser"),
            ("SEARCH_PATH", "/sites/main"),
        ])
        .unwrap();
        assert_eq!(cfg.per_page, 25);
        assert!(cfg.restrict_by_language);
        assert_eq!(cfg.translation_strategy, Some(TranslationStrategy::Child));
        assert_eq!(cfg.fields.summary(), "teaser");
        assert_eq!(cfg.search_path, "/sites/main");
    }

    #[test]
    fn none_strategy_means_unset() {
        let cfg = config(&[("SEARCH_TRANSLATION_STRATEGY", "none")]).unwrap();
        assert_eq!(cfg.translation_strategy, None);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(config(&[("SEARCH_PER_PAGE", "0")]).is_err());
        assert!(config(&[("SEARCH_PER_PAGE", "ten")]).is_err());
        assert!(config(&[("SEARCH_RESTRICT_BY_LANGUAGE", "maybe")]).is_err());
        assert!(config(&[("SEARCH_TRANSLATION_STRATEGY", "sibling")]).is_err());
        assert!(config(&[("SEARCH_FIELDS", "title=title")]).is_err());
        assert!(config(&[("SEARCH_PATH", "cms/content")]).is_err());
    }
}
