//! # SQLite 콘텐츠 저장소
//!
//! `QueryDescriptor`(쿼리 기술자)를 SQL로 번역해 실행합니다.
//!
//! ## 조건 번역 규칙
//! | 조건 | SQL |
//! |------|-----|
//! | 노드 타입(from) | `node_type = ?` |
//! | 하위 노드 | `substr(path, 1, L) = '<root>/' AND length(path) > L` |
//! | 전문검색 | `path IN (SELECT node_path FROM node_properties_fts WHERE name = ? AND node_properties_fts MATCH ?)` |
//! | 노드 이름 비교 | `name = ?` |
//! | AND / OR | 괄호로 감싼 `AND` / `OR` |
//!
//! SQLite의 `LIKE`는 ASCII 대소문자를 구분하지 않으므로,
//! 경로 비교는 `substr`로 정확히 맞춥니다.
//!
//! ## 전문검색 표현식
//! 사용자 검색어는 FTS5 문법으로 해석되지 않도록 공백 단위 토큰마다
//! 큰따옴표로 감쌉니다. (`rust "async"` → `"rust" """async"""`)
//! 토큰이 모두 같은 속성 값 안에 있어야 매칭됩니다(암묵적 AND).

use crate::{
    db::{nodes, ContentStore},
    error::AppError,
    models::{parent_path, property_text, ResultRow, IDENTIFIER_PROPERTY},
    services::query::{Constraint, QueryDescriptor},
};
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// SQLite 기반 `ContentStore` 구현
///
/// `SqlitePool`은 내부적으로 Arc를 쓰므로 clone해도 같은 풀을 가리킵니다.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 저장소 연결이 살아 있는지 확인합니다. (헬스체크용)
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for SqliteStore {
    type Query = QueryDescriptor;

    fn create_query_builder(&self) -> QueryDescriptor {
        QueryDescriptor::new()
    }

    async fn execute(&self, query: QueryDescriptor) -> Result<Vec<ResultRow>, AppError> {
        let mut sql = compile(&query);
        let rows = sql
            .build_query_as::<(String, Option<String>, String)>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|(path, identifier, properties)| -> Result<ResultRow, AppError> {
                let properties: serde_json::Map<String, serde_json::Value> =
                    serde_json::from_str(&properties)?;
                let mut row = ResultRow::new(path);

                if query.selects.is_empty() {
                    for (name, value) in &properties {
                        if let Some(text) = property_text(value) {
                            row.set_value(name.as_str(), text);
                        }
                    }
                    if let Some(id) = &identifier {
                        row.set_value(IDENTIFIER_PROPERTY, id.as_str());
                    }
                    return Ok(row);
                }

                for name in &query.selects {
                    let value = if name == IDENTIFIER_PROPERTY {
                        identifier.clone()
                    } else {
                        properties.get(name).and_then(property_text)
                    };
                    if let Some(value) = value {
                        row.set_value(name.as_str(), value);
                    }
                }
                Ok(row)
            })
            .collect()
    }

    async fn parent_identifier(&self, path: &str) -> Result<String, AppError> {
        let parent = parent_path(path);
        nodes::find_node_identity(&self.pool, parent)
            .await?
            .map(|node| node.into_identifier())
            .ok_or_else(|| AppError::PathNotFound(parent.to_string()))
    }
}

/// 쿼리 기술자를 실행 가능한 SQL로 번역합니다.
fn compile(query: &QueryDescriptor) -> QueryBuilder<'static, Sqlite> {
    let mut sql = QueryBuilder::new("SELECT path, identifier, properties FROM nodes WHERE 1 = 1");

    if let Some(node_type) = &query.node_type {
        sql.push(" AND node_type = ").push_bind(node_type.clone());
    }

    if let Some(constraint) = &query.constraint {
        sql.push(" AND ");
        push_constraint(&mut sql, constraint);
    }

    sql.push(" ORDER BY path");

    // SQLite는 OFFSET만 단독으로 쓸 수 없어서, 제한이 없으면 LIMIT -1을 씁니다
    let limit = query
        .max_results
        .map(|n| i64::try_from(n).unwrap_or(i64::MAX))
        .unwrap_or(-1);
    let offset = i64::try_from(query.first_result).unwrap_or(i64::MAX);
    sql.push(" LIMIT ").push_bind(limit);
    sql.push(" OFFSET ").push_bind(offset);

    sql
}

fn push_constraint(sql: &mut QueryBuilder<'static, Sqlite>, constraint: &Constraint) {
    match constraint {
        Constraint::DescendantNode { path } => {
            let prefix = format!("{}/", path.trim_end_matches('/'));
            let len = i64::try_from(prefix.chars().count()).unwrap_or(i64::MAX);
            sql.push("(substr(path, 1, ")
                .push_bind(len)
                .push(") = ")
                .push_bind(prefix)
                .push(" AND length(path) > ")
                .push_bind(len)
                .push(")");
        }
        Constraint::FullTextSearch { property, term } => match fts_expression(term) {
            Some(expr) => {
                sql.push("path IN (SELECT node_path FROM node_properties_fts WHERE name = ")
                    .push_bind(property.clone())
                    .push(" AND node_properties_fts MATCH ")
                    .push_bind(expr)
                    .push(")");
            }
            // 빈 MATCH는 FTS5 문법 에러이므로 아무것도 매칭하지 않는 조건으로 대신합니다
            None => {
                sql.push("0");
            }
        },
        Constraint::NodeNameEquals { literal } => {
            sql.push("name = ").push_bind(literal.clone());
        }
        Constraint::And(left, right) => {
            sql.push("(");
            push_constraint(sql, left);
            sql.push(" AND ");
            push_constraint(sql, right);
            sql.push(")");
        }
        Constraint::Or(left, right) => {
            sql.push("(");
            push_constraint(sql, left);
            sql.push(" OR ");
            push_constraint(sql, right);
            sql.push(")");
        }
    }
}

/// 검색어를 FTS5 문자열 토큰들로 바꿉니다. 토큰이 없으면 None.
fn fts_expression(term: &str) -> Option<String> {
    let tokens: Vec<String> = term
        .split_whitespace()
        .map(|token| format!("\"{}\"", token.replace('"', "\"\"")))
        .collect();
    (!tokens.is_empty()).then(|| tokens.join(" "))
}
