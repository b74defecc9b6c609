//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/signup`, `/login` - 가입/로그인 (공개)
//! - `/transactions`, `/transactions/{id}` - 거래 CRUD (인증 필요)
//! - `/summary` - 수입/지출 합계 (인증 필요)

pub mod auth;
pub mod health;
pub mod transactions;

use std::sync::Arc;

use axum::{middleware, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::require_auth;
use crate::state::AppState;

pub use auth::auth_router;
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use transactions::transactions_router;

/// 메시지만 담는 응답.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 전체 API 라우터 생성.
///
/// 거래 라우트에만 인증 미들웨어를 `route_layer`로 적용하므로,
/// 매칭되지 않은 경로는 인증 없이 404가 됩니다.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    let protected = transactions_router().route_layer(middleware::from_fn_with_state(
        Arc::clone(&state),
        require_auth,
    ));

    Router::new()
        .nest("/health", health_router())
        .merge(auth_router())
        .merge(protected)
        .with_state(state)
}
