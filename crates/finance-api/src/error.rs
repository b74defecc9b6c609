//! 통합 API 에러 타입.
//!
//! 모든 엔드포인트는 실패 시 동일한 형식으로 응답합니다:
//!
//! ```json
//! { "message": "Email already registered", "code": "CONFLICT" }
//! ```
//!
//! `message`는 사람이 읽는 문자열이고, `code`는 에러 종류를 구분하기 위한
//! 안정적인 식별자입니다.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finance_core::FinanceError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{JwtError, PasswordError};
use crate::repository::StoreError;

/// API 에러 응답 본문.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 코드 (예: "VALIDATION_ERROR", "NOT_FOUND")
    pub code: String,
}

/// API 에러.
///
/// | 변형 | HTTP |
/// |---|---|
/// | `Validation` | 400 |
/// | `Conflict` | 400 |
/// | `NotFound` | 404 |
/// | `Authentication` / `Unauthenticated` | 401 |
/// | `Internal` | 500 |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 필수 필드 누락 또는 잘못된 입력
    #[error("{0}")]
    Validation(String),
    /// 중복 (예: 이미 등록된 이메일)
    #[error("{0}")]
    Conflict(String),
    /// 대상 없음 또는 소유자가 아님
    #[error("{0}")]
    NotFound(String),
    /// 자격 증명 불일치
    #[error("{0}")]
    Authentication(String),
    /// 토큰 없음/무효/만료
    #[error("{0}")]
    Unauthenticated(String),
    /// 저장소/암호화 등 내부 실패
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Authentication(_) | ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 안정적인 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Authentication(_) => "AUTHENTICATION_FAILED",
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 응답 본문으로 변환합니다.
    pub fn to_response_body(&self) -> ApiErrorResponse {
        ApiErrorResponse {
            message: self.to_string(),
            code: self.code().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(message) = &self {
            tracing::error!(error = %message, "Request failed with internal error");
        }
        (self.status(), Json(self.to_response_body())).into_response()
    }
}

impl From<FinanceError> for ApiError {
    fn from(err: FinanceError) -> Self {
        if err.is_client_error() {
            ApiError::Validation(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(message) => ApiError::Conflict(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Encoding(_) => ApiError::Internal(err.to_string()),
            JwtError::Expired | JwtError::Invalid => ApiError::Unauthenticated(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;
