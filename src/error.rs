//! # 에러 처리 모듈
//!
//! 검색 서비스에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 저장소 에러는 여기서 잡지 않고 `?`로 그대로 전파합니다.
//! 재시도나 부분 실패 처리는 없습니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 검색 서비스에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 저장소에 해당 경로의 노드가 없음
    ///
    /// 검색 결과 행의 부모 노드를 찾지 못한 경우처럼, 저장소 내부
    /// 불일치를 뜻하므로 클라이언트에는 500으로 응답합니다.
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// 등록되지 않은 라우트 이름으로 URL 생성을 요청함
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// 템플릿 렌더링 실패
    #[error("Template error: {0}")]
    Template(String),

    /// 설정값 오류 (서버 시작 시점에만 발생)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx 함수에서 `?`를 쓰면 자동으로 AppError::Database로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 파일 입출력 오류 (시드 파일 읽기 등)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 파싱/직렬화 오류 (노드 속성 컬럼, 시드 파일)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 잘못된 요청만 실제 메시지를 돌려주고, 나머지는 로그에만
    /// 기록한 뒤 클라이언트에는 일반적인 메시지를 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::PathNotFound(ref path) => {
                tracing::error!("Repository node missing: {}", path);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "repository_error",
                    "A repository error occurred".to_string(),
                )
            }
            AppError::UnknownRoute(ref name) => {
                tracing::error!("Unknown route: {}", name);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "routing_error",
                    "A routing error occurred".to_string(),
                )
            }
            AppError::Template(ref msg) => {
                tracing::error!("Template error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "template_error",
                    "A rendering error occurred".to_string(),
                )
            }
            AppError::Config(ref msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    "An IO error occurred".to_string(),
                )
            }
            AppError::Json(ref e) => {
                tracing::error!("JSON error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "json_error",
                    "A serialization error occurred".to_string(),
                )
            }
        };

        // 결과: { "error": { "code": "bad_request", "message": "..." } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_keeps_message_and_status() {
        let response = AppError::BadRequest("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn repository_errors_are_internal() {
        let response = AppError::PathNotFound("/cms/missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
