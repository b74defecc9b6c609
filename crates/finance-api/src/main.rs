//! 가계부 API 서버 진입점.
//!
//! 설정을 로드하고 저장소를 연결한 뒤 HTTP 서버를 시작합니다.
//! `database.url`이 없으면 인메모리 저장소로 동작합니다.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use finance_api::auth::JwtKeys;
use finance_api::metrics::setup_metrics_recorder;
use finance_api::middleware::metrics_layer;
use finance_api::openapi::swagger_ui_router;
use finance_api::routes::create_api_router;
use finance_api::state::AppState;
use finance_core::{init_logging, AppConfig, DatabaseConfig, LogConfig};

/// CORS 레이어 생성.
fn cors_layer(origins: Vec<String>) -> CorsLayer {
    let parsed: Vec<axum::http::HeaderValue> =
        origins.iter().filter_map(|s| s.parse().ok()).collect();

    let allow_origin = if parsed.is_empty() {
        if !origins.is_empty() {
            warn!("server.cors_origins contains no valid origins, allowing any");
        } else {
            warn!("server.cors_origins not set, allowing any origin (development mode)");
        }
        AllowOrigin::any()
    } else {
        info!("CORS configured with {} allowed origins", parsed.len());
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// Prometheus 메트릭 엔드포인트 핸들러.
async fn metrics_handler(
    axum::extract::State(handle): axum::extract::State<PrometheusHandle>,
) -> String {
    handle.render()
}

/// 전체 라우터 구성.
fn create_router(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    cors: CorsLayer,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .merge(metrics_router)
        .merge(create_api_router(state))
        .merge(swagger_ui_router())
        .layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초) - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors)
}

/// 설정에 따라 PostgreSQL 또는 인메모리 상태를 생성합니다.
async fn create_app_state(
    database: &DatabaseConfig,
    jwt: JwtKeys,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let Some(database_url) = database.url.as_deref() else {
        warn!("database.url not set, using in-memory storage (data is lost on restart)");
        return Ok(AppState::in_memory(jwt));
    };

    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(Duration::from_secs(database.acquire_timeout_secs))
        .connect(database_url)
        .await?;
    info!("Connected to PostgreSQL");

    if database.run_migrations {
        sqlx::migrate!("../../migrations").run(&pool).await?;
        info!("Database migrations applied");
    }

    Ok(AppState::postgres(pool, jwt))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_default()?;
    init_logging(LogConfig::from(&config.logging))?;

    info!("Starting Finance API server...");

    let metrics_handle = setup_metrics_recorder()?;
    info!("Prometheus metrics recorder initialized");

    let jwt = JwtKeys::from_config(&config.auth)?;
    let state = Arc::new(create_app_state(&config.database, jwt).await?);

    let app = create_router(
        state,
        metrics_handle,
        cors_layer(config.server.cors_origin_list()),
    );

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM을 받으면 반환합니다. 시그널 핸들러 설치에 실패하면
/// 해당 시그널은 무시하고 다른 시그널을 계속 기다립니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
