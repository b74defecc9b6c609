//! 가입/로그인 endpoint.
//!
//! 인증 없이 접근 가능한 공개 라우트입니다.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use super::MessageResponse;
use crate::error::{ApiErrorResponse, ApiResult};
use crate::services::{LoginRequest, LoginResponse, SignupRequest};
use crate::state::AppState;

/// 회원 가입.
///
/// POST /signup
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "가입 성공", body = MessageResponse),
        (status = 400, description = "필수 필드 누락 또는 중복 이메일", body = ApiErrorResponse),
        (status = 500, description = "서버 오류", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(request) = payload?;
    state.auth.register(request).await?;

    Ok(Json(MessageResponse::new("User registered successfully!")))
}

/// 로그인.
///
/// POST /login
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = LoginResponse),
        (status = 400, description = "필수 필드 누락", body = ApiErrorResponse),
        (status = 401, description = "비밀번호 불일치", body = ApiErrorResponse),
        (status = 404, description = "등록되지 않은 이메일", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    let jwt_token = state.auth.login(request).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        jwt_token,
    }))
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}
