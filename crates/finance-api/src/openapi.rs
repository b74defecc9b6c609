//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use finance_core::{Transaction, TransactionSummary, TransactionType};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiErrorResponse;
use crate::routes::{ComponentHealth, ComponentStatus, HealthResponse, MessageResponse};
use crate::services::{
    CreateTransactionRequest, CreateTransactionResponse, LoginRequest, LoginResponse,
    SignupRequest, UpdateTransactionRequest,
};

/// `bearer_auth` 보안 스킴 등록.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Finance Tracker API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Finance Tracker API",
        description = r#"
# 개인 가계부 REST API

수입/지출 거래를 기록하고 합계를 조회합니다.

## 인증

`/signup`, `/login`, `/health`를 제외한 모든 엔드포인트는 JWT Bearer 토큰이 필요합니다.
`POST /login`으로 받은 `jwtToken`을 `Authorization: Bearer <token>` 헤더에 넣으세요.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "auth", description = "인증 - 가입 및 로그인"),
        (name = "transactions", description = "거래 - 수입/지출 CRUD 및 합계")
    ),
    modifiers(&BearerAuth),
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Common =====
            ApiErrorResponse,
            MessageResponse,

            // ===== Auth =====
            SignupRequest,
            LoginRequest,
            LoginResponse,

            // ===== Transactions =====
            Transaction,
            TransactionType,
            TransactionSummary,
            CreateTransactionRequest,
            UpdateTransactionRequest,
            CreateTransactionResponse,
        )
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        crate::routes::auth::signup,
        crate::routes::auth::login,

        crate::routes::transactions::create_transaction,
        crate::routes::transactions::list_transactions,
        crate::routes::transactions::get_transaction,
        crate::routes::transactions::update_transaction,
        crate::routes::transactions::delete_transaction,
        crate::routes::transactions::get_summary,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        assert!(json.contains("Finance Tracker API"));
        assert!(json.contains("/signup"));
        assert!(json.contains("/transactions/{id}"));
        assert!(json.contains("/summary"));
        assert!(json.contains("bearer_auth"));
        assert!(json.contains("Total_Income"));
    }
}
