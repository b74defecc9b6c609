//! 가입 및 로그인 서비스.

use std::sync::Arc;

use finance_core::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::{hash_password_blocking, verify_password_blocking, JwtKeys};
use crate::error::{ApiError, ApiResult};
use crate::metrics::{record_login, record_user_registered};
use crate::repository::{UserStore, DUPLICATE_EMAIL};

use super::validation::validate_in_order;

/// 가입 요청.
///
/// 누락된 필드를 직접 보고하기 위해 모든 필드는 선택으로 받습니다.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name is required")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "email is required"),
        length(min = 1, message = "email is required")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "password is required"),
        length(min = 1, message = "password is required")
    )]
    pub password: Option<String>,
}

/// 로그인 요청.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(
        required(message = "email is required"),
        length(min = 1, message = "email is required")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "password is required"),
        length(min = 1, message = "password is required")
    )]
    pub password: Option<String>,
}

/// 로그인 응답.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub jwt_token: String,
}

/// 가입/로그인 서비스.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt: Arc<JwtKeys>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt: Arc<JwtKeys>) -> Self {
        Self { users, jwt }
    }

    /// 새 사용자를 등록합니다.
    ///
    /// 필드는 name, email, password 순서로 검사합니다.
    pub async fn register(&self, request: SignupRequest) -> ApiResult<User> {
        validate_in_order(&request, &["name", "email", "password"])?;

        let name = request.name.unwrap_or_default();
        let email = request.email.unwrap_or_default();
        let password = request.password.unwrap_or_default();

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ApiError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let password_hash = hash_password_blocking(password).await?;
        let user = User::new(name, email, password_hash);

        // 사전 확인 이후의 경합은 저장소가 Duplicate로 보고
        self.users.insert(&user).await?;

        record_user_registered();
        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    /// 자격 증명을 확인하고 Access Token을 발급합니다.
    pub async fn login(&self, request: LoginRequest) -> ApiResult<String> {
        validate_in_order(&request, &["email", "password"])?;

        let email = request.email.unwrap_or_default();
        let password = request.password.unwrap_or_default();

        let Some(user) = self.users.find_by_email(&email).await? else {
            record_login("unknown_email");
            return Err(ApiError::NotFound("Invalid email".to_string()));
        };

        if !verify_password_blocking(password, user.password_hash.clone()).await? {
            record_login("wrong_password");
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(ApiError::Authentication("Invalid password".to_string()));
        }

        let token = self.jwt.issue(user.id, &user.email)?;

        record_login("success");
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryUserStore;

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(JwtKeys::new("auth-service-test-secret", 60)),
        )
    }

    fn signup(name: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let svc = service();
        let user = svc.register(signup("Park", "park@example.com", "pw1234")).await.unwrap();
        assert_ne!(user.password_hash, "pw1234");

        let token = svc.login(login("park@example.com", "pw1234")).await.unwrap();
        let claims = svc.jwt.verify(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.id);
    }

    #[tokio::test]
    async fn test_register_reports_first_missing_field() {
        let svc = service();

        let err = svc.register(SignupRequest::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "name is required");

        let mut request = signup("Park", "", "pw");
        let err = svc.register(request.clone()).await.unwrap_err();
        assert_eq!(err.to_string(), "email is required");

        request.email = Some("park@example.com".to_string());
        request.password = None;
        let err = svc.register(request).await.unwrap_err();
        assert_eq!(err.to_string(), "password is required");
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let svc = service();
        svc.register(signup("A", "dup@example.com", "pw")).await.unwrap();

        let err = svc.register(signup("B", "dup@example.com", "other")).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(ref m) if m == "Email already registered"));
    }

    #[tokio::test]
    async fn test_login_failures() {
        let svc = service();
        svc.register(signup("A", "a@example.com", "right")).await.unwrap();

        let err = svc.login(login("nobody@example.com", "right")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Invalid email"));

        let err = svc.login(login("a@example.com", "wrong")).await.unwrap_err();
        assert!(matches!(err, ApiError::Authentication(ref m) if m == "Invalid password"));

        let err = svc.login(LoginRequest::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "email is required");
    }
}
