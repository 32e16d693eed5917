//! Jobly API
//!
//! 회사, 채용 공고, 사용자 REST 엔드포인트를 제공합니다.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 환경변수 로드
    dotenvy::dotenv().ok();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobly_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 설정 로드
    let config = Config::from_env()?;
    tracing::info!("Starting Jobly API with config: {:?}", config);

    // 앱 상태 초기화
    let state = AppState::new(&config).await?;
    let state = Arc::new(state);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Jobly API listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// 라우터 생성
fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Auth
        .route("/auth/token", post(handlers::auth::token))
        .route("/auth/register", post(handlers::auth::register))
        // Companies
        .route(
            "/companies",
            post(handlers::companies::create).get(handlers::companies::list),
        )
        .route(
            "/companies/:handle",
            get(handlers::companies::get)
                .patch(handlers::companies::update)
                .delete(handlers::companies::remove),
        )
        // Jobs
        .route("/jobs", post(handlers::jobs::create).get(handlers::jobs::list))
        .route(
            "/jobs/:id",
            get(handlers::jobs::get)
                .patch(handlers::jobs::update)
                .delete(handlers::jobs::remove),
        )
        // Users
        .route("/users", post(handlers::users::create).get(handlers::users::list))
        .route(
            "/users/:username",
            get(handlers::users::get)
                .patch(handlers::users::update)
                .delete(handlers::users::remove),
        )
        .route("/users/:username/jobs/:id", post(handlers::users::apply))
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Middleware
        .layer(from_fn_with_state(state.clone(), middleware::authenticate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(from_fn(middleware::request_id))
        // State
        .with_state(state)
}
