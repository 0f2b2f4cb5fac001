//! # 검색 서비스 계층
//!
//! HTTP와 저장소 사이에서 검색 로직을 담당하는 모듈들입니다.
//! - `assembler`: 검색 쿼리 조립과 결과 변환 (QueryAssembler)
//! - `markup`: 요약문 태그 제거/자르기
//! - `query`: 저장소 중립적인 쿼리 빌더 추상화
//! - `router`: 콘텐츠 URL 생성
//! - `template`: 검색 결과 페이지 렌더링

pub mod assembler;
pub mod markup;
pub mod query;
pub mod router;
pub mod template;

pub use assembler::QueryAssembler;
