//! # 콘텐츠 저장소 접근 계층
//!
//! 검색 로직이 의존하는 저장소 능력을 `ContentStore` 트레이트로 정의하고,
//! SQLite 구현을 제공합니다.
//!
//! 각 하위 모듈:
//! - `nodes`: 노드 저장, 경로 조회, 시드 파일 적재
//! - `search`: `SqliteStore` (쿼리 기술자 → SQL 번역 및 실행)

pub mod nodes;
pub mod search;

pub use nodes::*;
pub use search::*;

use crate::{error::AppError, models::ResultRow, services::query::QueryBuilder};
use async_trait::async_trait;

/// 검색에 필요한 저장소 클라이언트 능력
///
/// - 쿼리 빌더 생성 → 실행 → 결과 행 목록
/// - 경로에서 부모 노드의 식별자 찾기
///
/// 실행 중 발생한 에러는 가공하지 않고 그대로 호출자에게 전파합니다.
#[async_trait]
pub trait ContentStore: Send + Sync {
    type Query: QueryBuilder + Send;

    fn create_query_builder(&self) -> Self::Query;

    async fn execute(&self, query: Self::Query) -> Result<Vec<ResultRow>, AppError>;

    /// `path`의 부모 노드 식별자. 부모가 식별자를 갖지 않으면 부모 경로를 돌려줍니다.
    async fn parent_identifier(&self, path: &str) -> Result<String, AppError>;
}
