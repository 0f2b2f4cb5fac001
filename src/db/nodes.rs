//! # 노드 저장/조회
//!
//! 노드는 `nodes` 테이블에, 문자열로 바꿀 수 있는 속성 값은
//! `node_properties_fts` FTS5 테이블에 속성 단위로 저장됩니다.
//!
//! 검색 서버 자체는 콘텐츠를 편집하지 않으므로, 쓰기 경로는
//! 시작 시 시드 파일을 적재할 때만 사용됩니다.

use crate::{
    error::AppError,
    models::{property_text, NodeIdentity, NodeRecord, DEFAULT_NODE_TYPE},
};
use sqlx::SqlitePool;
use std::path::Path;

/// 노드를 저장하거나(없으면) 덮어씁니다(있으면).
///
/// 속성 인덱스는 해당 노드의 기존 행을 지우고 다시 넣습니다.
/// 노드 행과 인덱스가 어긋나지 않도록 하나의 트랜잭션으로 처리합니다.
pub async fn upsert_node(pool: &SqlitePool, node: &NodeRecord) -> Result<(), AppError> {
    if !node.path.starts_with('/') {
        return Err(AppError::BadRequest(format!(
            "node path must be absolute: {}",
            node.path
        )));
    }

    let node_type = node.node_type.as_deref().unwrap_or(DEFAULT_NODE_TYPE);
    let properties = serde_json::to_string(&node.properties)?;

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO nodes (path, name, node_type, identifier, properties)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(path) DO UPDATE SET
            name = excluded.name,
            node_type = excluded.node_type,
            identifier = excluded.identifier,
            properties = excluded.properties
        "#,
    )
    .bind(&node.path)
    .bind(node.name())
    .bind(node_type)
    .bind(&node.identifier)
    .bind(&properties)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM node_properties_fts WHERE node_path = ?")
        .bind(&node.path)
        .execute(&mut *tx)
        .await?;

    for (name, value) in &node.properties {
        let Some(text) = property_text(value) else {
            continue;
        };
        sqlx::query("INSERT INTO node_properties_fts (value, node_path, name) VALUES (?, ?, ?)")
            .bind(text)
            .bind(&node.path)
            .bind(name)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// 경로로 노드의 식별 정보를 찾습니다.
pub async fn find_node_identity(
    pool: &SqlitePool,
    path: &str,
) -> Result<Option<NodeIdentity>, AppError> {
    let node = sqlx::query_as::<_, NodeIdentity>("SELECT path, identifier FROM nodes WHERE path = ?")
        .bind(path)
        .fetch_optional(pool)
        .await?;
    Ok(node)
}

/// JSON 배열 형식의 시드 파일을 읽어 모든 노드를 저장하고, 저장한 개수를 돌려줍니다.
pub async fn load_seed_file(pool: &SqlitePool, path: &Path) -> Result<usize, AppError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let nodes: Vec<NodeRecord> = serde_json::from_str(&raw)?;

    for node in &nodes {
        upsert_node(pool, node).await?;
    }

    tracing::info!("Seeded {} nodes from {}", nodes.len(), path.display());
    Ok(nodes.len())
}
