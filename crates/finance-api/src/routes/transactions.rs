//! 거래 CRUD 및 합계 endpoint.
//!
//! 모든 핸들러는 인증 미들웨어 뒤에서 동작하며 [`AuthUser`]로 소유자를 받습니다.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use finance_core::{Transaction, TransactionSummary};
use uuid::Uuid;

use super::MessageResponse;
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiErrorResponse, ApiResult};
use crate::services::{CreateTransactionRequest, CreateTransactionResponse, UpdateTransactionRequest};
use crate::state::AppState;

/// 경로의 거래 ID를 해석합니다.
fn parse_transaction_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Validation("Invalid transaction ID".to_string()))
}

/// 거래 생성.
///
/// POST /transactions
#[utoipa::path(
    post,
    path = "/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "거래 생성됨", body = CreateTransactionResponse),
        (status = 400, description = "필수 필드 누락 또는 잘못된 type", body = ApiErrorResponse),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "transactions"
)]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateTransactionResponse>)> {
    let Json(request) = payload?;
    let transaction = state.transactions.create(user.user_id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTransactionResponse {
            message: "Transaction Created!!".to_string(),
            transaction,
        }),
    ))
}

/// 내 거래 목록.
///
/// GET /transactions
#[utoipa::path(
    get,
    path = "/transactions",
    responses(
        (status = 200, description = "거래 목록", body = Vec<Transaction>),
        (status = 401, description = "인증 실패", body = ApiErrorResponse),
        (status = 404, description = "거래 없음", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "transactions"
)]
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state.transactions.list_all(user.user_id).await?;
    tracing::debug!(user_id = %user.user_id, count = transactions.len(), "Listed transactions");

    Ok(Json(transactions))
}

/// 거래 단건 조회.
///
/// GET /transactions/{id}
#[utoipa::path(
    get,
    path = "/transactions/{id}",
    params(("id" = String, Path, description = "거래 ID (UUID)")),
    responses(
        (status = 200, description = "거래", body = Transaction),
        (status = 400, description = "잘못된 ID 형식", body = ApiErrorResponse),
        (status = 401, description = "인증 실패", body = ApiErrorResponse),
        (status = 404, description = "없거나 소유자가 아님", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "transactions"
)]
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Transaction>> {
    let id = parse_transaction_id(&id)?;
    let transaction = state.transactions.get_by_id(user.user_id, id).await?;

    Ok(Json(transaction))
}

/// 거래 수정.
///
/// PUT /transactions/{id}
#[utoipa::path(
    put,
    path = "/transactions/{id}",
    params(("id" = String, Path, description = "거래 ID (UUID)")),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "수정됨", body = MessageResponse),
        (status = 400, description = "잘못된 ID 또는 type", body = ApiErrorResponse),
        (status = 401, description = "인증 실패", body = ApiErrorResponse),
        (status = 404, description = "없거나 소유자가 아님", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "transactions"
)]
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTransactionRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_transaction_id(&id)?;
    let Json(request) = payload?;
    state.transactions.update(user.user_id, id, request).await?;

    Ok(Json(MessageResponse::new("Transaction Updated Successfully")))
}

/// 거래 삭제.
///
/// DELETE /transactions/{id}
#[utoipa::path(
    delete,
    path = "/transactions/{id}",
    params(("id" = String, Path, description = "거래 ID (UUID)")),
    responses(
        (status = 200, description = "삭제됨", body = MessageResponse),
        (status = 400, description = "잘못된 ID 형식", body = ApiErrorResponse),
        (status = 401, description = "인증 실패", body = ApiErrorResponse),
        (status = 404, description = "없거나 소유자가 아님", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "transactions"
)]
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_transaction_id(&id)?;
    state.transactions.delete(user.user_id, id).await?;

    Ok(Json(MessageResponse::new("Transaction Deleted Successfully")))
}

/// 수입/지출 합계.
///
/// GET /summary
#[utoipa::path(
    get,
    path = "/summary",
    responses(
        (status = 200, description = "합계 (정수 절삭)", body = TransactionSummary),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "transactions"
)]
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<TransactionSummary>> {
    Ok(Json(state.transactions.summarize(user.user_id).await?))
}

/// 거래 라우터 생성 (인증 레이어는 상위에서 적용).
pub fn transactions_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .route("/summary", get(get_summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transaction_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_transaction_id(&id.to_string()).unwrap(), id);

        let err = parse_transaction_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "Invalid transaction ID"));
    }
}
