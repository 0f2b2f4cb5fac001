//! # 데이터 모델 모듈
//!
//! 검색 요청부터 렌더링까지 흐르는 데이터 구조체들을 정의합니다.
//! - `field_map`: 논리 필드(title/summary) → 저장소 속성 이름 매핑, 번역 전략
//! - `node`: 저장소 노드와 검색 결과 행(ResultRow)
//! - `search`: 검색 요청, 결과 항목, 템플릿 파라미터
//!
//! 모든 값은 요청 단위로 만들어지고 렌더링 후 버려집니다 (캐시/영속화 없음).

pub mod field_map;
pub mod node;
pub mod search;

pub use field_map::*;
pub use node::*;
pub use search::*;
