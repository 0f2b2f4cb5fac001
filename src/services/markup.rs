//! # 요약문 정리 유틸리티
//!
//! 검색 결과 요약은 HTML 태그를 제거한 뒤 앞부분만 잘라서 보여줍니다.
//! 자르기는 태그 제거 이후에 하므로 태그 중간에서 잘리는 일이 없습니다.

use once_cell::sync::Lazy;
use regex::Regex;

/// 요약 최대 길이 (유니코드 문자 수)
pub const SUMMARY_LENGTH: usize = 100;

// 주석(<!-- -->)과 태그(<...>)를 한 번에 찾습니다.
// `<` 바로 뒤가 영문자, `/`, `!`, `?`일 때만 태그로 봅니다. (`3 < 4`는 본문)
// 따옴표 안의 `>`는 태그 끝이 아닙니다.
// 닫히지 않은 태그나 주석은 문자열 끝까지 제거됩니다.
static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<!--.*?(?:-->|\z)|<[A-Za-z/!?](?:[^>"']|"[^"]*(?:"|\z)|'[^']*(?:'|\z))*>?"#,
    )
    .expect("tag pattern is valid")
});

/// 문자열에서 HTML 태그와 주석을 제거합니다.
pub fn strip_tags(html: &str) -> String {
    TAG_PATTERN.replace_all(html, "").into_owned()
}

/// 앞에서부터 `max_chars`개의 문자만 남깁니다.
///
/// `.len()`이 아닌 `.chars()` 기준이라 한글 등 멀티바이트 문자가 깨지지 않습니다.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// 태그 제거 후 `SUMMARY_LENGTH`자로 자른 요약
pub fn summarize(html: &str) -> String {
    truncate_chars(&strip_tags(html), SUMMARY_LENGTH).to_string()
}
