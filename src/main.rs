//! # 콘텐츠 검색 서버 진입점
//!
//! 콘텐츠 저장소를 전문검색하고 결과를 페이지 단위로 보여주는 웹 서버입니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 로딩 및 검증
//! 4. SQLite 연결 풀 생성과 마이그레이션
//! 5. (선택) 시드 파일 적재
//! 6. 라우터 구성 후 HTTP 서버 시작

mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;

use anyhow::Result;
use config::Config;
use routes::AppState;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{path::Path, str::FromStr};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 이 크레이트와 tower_http를 debug 레벨로 출력합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "content_search=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    // 검색 설정이 잘못되었으면 서버를 띄우지 않고 바로 종료합니다.
    let config = Config::from_env()?;
    tracing::info!("Starting content search server on {}:{}", config.host, config.port);
    tracing::info!(
        search_path = %config.search.search_path,
        per_page = config.search.per_page,
        restrict_by_language = config.search.restrict_by_language,
        translation_strategy = ?config.search.translation_strategy,
        "Search configuration loaded"
    );

    // ── 4단계: SQLite 연결 풀 생성 ──
    // create_if_missing: 데이터베이스 파일이 없으면 새로 만듭니다.
    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 5단계: 시드 파일 적재 ──
    if let Some(seed_file) = &config.seed_file {
        db::load_seed_file(&pool, Path::new(seed_file)).await?;
    }

    // ── 6단계: 라우터 구성 ──
    let state = AppState::new(pool, config.search.clone());

    // 검색 페이지는 다른 출처의 폼/스크립트에서도 호출할 수 있도록 CORS를 엽니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // ── 7단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
