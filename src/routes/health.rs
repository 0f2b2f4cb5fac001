//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/health` → `{ "status": "ok", "repository": "ok" }`
//!
//! 서버뿐 아니라 콘텐츠 저장소(SQLite) 연결까지 확인합니다.
//! 저장소가 응답하지 않으면 503과 함께 `"repository": "unavailable"`을 돌려줍니다.

use crate::routes::search::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

/// `GET /health` — 서버와 저장소 상태를 확인합니다.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "repository": "ok" })),
        ),
        Err(e) => {
            tracing::warn!("Repository health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "repository": "unavailable" })),
            )
        }
    }
}
