//! Axum용 JWT 인증 미들웨어.
//!
//! [`require_auth`]가 `Authorization: Bearer <token>` 헤더를 검증하고
//! 인증된 사용자를 request extensions에 넣습니다. 핸들러는 [`AuthUser`]
//! 추출기로 꺼내 씁니다.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use super::{JwtError, JwtKeys};
use crate::error::ApiError;
use crate::metrics::record_auth_failure;
use crate::state::AppState;

/// 인증된 요청의 사용자 정보.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

/// `Bearer ` 접두사 뒤의 토큰을 꺼냅니다.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// 헤더에서 인증된 사용자를 해석합니다.
pub fn authenticate(headers: &HeaderMap, keys: &JwtKeys) -> Result<AuthUser, JwtError> {
    let token = bearer_token(headers).ok_or(JwtError::Invalid)?;
    let claims = keys.verify(token)?;

    Ok(AuthUser {
        user_id: claims.user_id()?,
        email: claims.email,
    })
}

/// 보호된 라우트 앞에 붙는 인증 미들웨어.
///
/// ```rust,ignore
/// Router::new()
///     .route("/transactions", get(list))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
/// ```
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(request.headers(), &state.jwt).map_err(|e| {
        tracing::debug!(error = %e, path = %request.uri().path(), "Rejected unauthenticated request");
        record_auth_failure("token");
        e
    })?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthenticated(JwtError::Invalid.to_string()))
    }
}
