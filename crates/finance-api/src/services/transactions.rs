//! 거래 CRUD 및 합계 서비스.
//!
//! 모든 연산은 인증된 사용자 ID를 범위로 받으며, 다른 사용자의 거래는
//! 읽거나 변경할 수 없습니다.

use std::sync::Arc;

use finance_core::{
    NewTransaction, Transaction, TransactionPatch, TransactionSummary, TransactionType,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::metrics::record_transaction_created;
use crate::repository::TransactionStore;

use super::validation::{validate_in_order, validate_non_zero_amount};

/// 거래가 하나도 없을 때 빈 목록 대신 404를 반환할지 여부.
pub const EMPTY_LIST_IS_NOT_FOUND: bool = true;

const NOT_FOUND: &str = "Transaction not found";
const NOT_FOUND_OR_UNAUTHORIZED: &str = "Transaction not found or unauthorized";

/// 생성 요청의 필드 검사 순서.
const CREATE_FIELD_ORDER: &[&str] = &["type", "category", "amount", "date", "description"];

/// 거래 생성 요청.
///
/// 빈 문자열과 금액 0은 누락으로 취급합니다.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionRequest {
    /// `income` 또는 `expense`
    #[serde(rename = "type")]
    #[validate(
        required(message = "type is required"),
        length(min = 1, message = "type is required")
    )]
    pub kind: Option<String>,
    #[validate(
        required(message = "category is required"),
        length(min = 1, message = "category is required")
    )]
    pub category: Option<String>,
    #[schema(value_type = Option<f64>)]
    #[validate(
        required(message = "amount is required"),
        custom(function = "validate_non_zero_amount")
    )]
    pub amount: Option<Decimal>,
    #[validate(
        required(message = "date is required"),
        length(min = 1, message = "date is required")
    )]
    pub date: Option<String>,
    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description is required")
    )]
    pub description: Option<String>,
}

/// 거래 수정 요청. 전달된 필드만 변경됩니다.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTransactionRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    pub date: Option<String>,
    pub description: Option<String>,
}

/// 거래 생성 응답.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateTransactionResponse {
    pub message: String,
    pub transaction: Transaction,
}

/// 거래 서비스.
#[derive(Clone)]
pub struct TransactionService {
    store: Arc<dyn TransactionStore>,
}

impl TransactionService {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    /// 새 거래를 생성합니다.
    ///
    /// type, category, amount, date, description 순서로 필수 여부를 검사한 뒤
    /// `type` 값을 확인합니다.
    pub async fn create(&self, owner: Uuid, request: CreateTransactionRequest) -> ApiResult<Transaction> {
        validate_in_order(&request, CREATE_FIELD_ORDER)?;

        let kind: TransactionType = request.kind.unwrap_or_default().parse()?;

        let transaction = Transaction::new(
            owner,
            NewTransaction {
                kind,
                category: request.category.unwrap_or_default(),
                amount: request.amount.unwrap_or_default(),
                date: request.date.unwrap_or_default(),
                description: request.description,
            },
        );
        self.store.insert(&transaction).await?;

        record_transaction_created(kind.as_str());
        tracing::info!(user_id = %owner, transaction_id = %transaction.id, kind = %kind, "Transaction created");

        Ok(transaction)
    }

    /// 사용자의 모든 거래를 조회합니다.
    pub async fn list_all(&self, owner: Uuid) -> ApiResult<Vec<Transaction>> {
        let transactions = self.store.list_by_owner(owner).await?;

        if transactions.is_empty() && EMPTY_LIST_IS_NOT_FOUND {
            return Err(ApiError::NotFound("No Transactions found".to_string()));
        }
        Ok(transactions)
    }

    pub async fn get_by_id(&self, owner: Uuid, id: Uuid) -> ApiResult<Transaction> {
        self.store
            .find_owned(id, owner)
            .await?
            .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))
    }

    /// 거래를 부분 수정합니다.
    ///
    /// 생성과 달리 필수 필드 검사는 하지 않습니다. 빈 문자열도 그대로 저장되며,
    /// 유효하지 않은 `type` 값만 거부합니다.
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        request: UpdateTransactionRequest,
    ) -> ApiResult<Transaction> {
        let patch = TransactionPatch {
            kind: request
                .kind
                .map(|k| k.parse::<TransactionType>())
                .transpose()?,
            category: request.category,
            amount: request.amount,
            date: request.date,
            description: request.description,
        };

        let updated = self
            .store
            .update_owned(id, owner, patch)
            .await?
            .ok_or_else(|| ApiError::NotFound(NOT_FOUND_OR_UNAUTHORIZED.to_string()))?;

        tracing::info!(user_id = %owner, transaction_id = %id, "Transaction updated");
        Ok(updated)
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> ApiResult<()> {
        if !self.store.delete_owned(id, owner).await? {
            return Err(ApiError::NotFound(NOT_FOUND_OR_UNAUTHORIZED.to_string()));
        }

        tracing::info!(user_id = %owner, transaction_id = %id, "Transaction deleted");
        Ok(())
    }

    /// 수입/지출 합계. 각 금액은 0 방향으로 정수 절삭한 뒤 더합니다.
    pub async fn summarize(&self, owner: Uuid) -> ApiResult<TransactionSummary> {
        let transactions = self.store.list_by_owner(owner).await?;
        Ok(TransactionSummary::from_transactions(&transactions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryTransactionStore;
    use rust_decimal_macros::dec;

    fn service() -> TransactionService {
        TransactionService::new(Arc::new(MemoryTransactionStore::new()))
    }

    fn create_request(kind: &str, amount: Decimal) -> CreateTransactionRequest {
        CreateTransactionRequest {
            kind: Some(kind.to_string()),
            category: Some("General".to_string()),
            amount: Some(amount),
            date: Some("2024-05-01".to_string()),
            description: Some("note".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_validation_order() {
        let svc = service();
        let owner = Uuid::new_v4();

        let err = svc.create(owner, CreateTransactionRequest::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "type is required");

        let mut request = create_request("income", dec!(0));
        let err = svc.create(owner, request.clone()).await.unwrap_err();
        assert_eq!(err.to_string(), "amount is required");

        request.amount = Some(dec!(10));
        request.description = Some(String::new());
        let err = svc.create(owner, request).await.unwrap_err();
        assert_eq!(err.to_string(), "description is required");
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_type() {
        let svc = service();
        let err = svc
            .create(Uuid::new_v4(), create_request("transfer", dec!(5)))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "type must be either 'income' or 'expense'");
    }

    #[tokio::test]
    async fn test_empty_list_is_not_found() {
        let svc = service();
        let err = svc.list_all(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "No Transactions found"));
    }

    #[tokio::test]
    async fn test_update_keeps_absent_fields() {
        let svc = service();
        let owner = Uuid::new_v4();
        let created = svc.create(owner, create_request("expense", dec!(42.5))).await.unwrap();

        let request = UpdateTransactionRequest {
            category: Some(String::new()),
            ..Default::default()
        };
        let updated = svc.update(owner, created.id, request).await.unwrap();

        assert_eq!(updated.category, "");
        assert_eq!(updated.amount, dec!(42.5));
        assert_eq!(updated.kind, TransactionType::Expense);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_type_and_keeps_record() {
        let svc = service();
        let owner = Uuid::new_v4();
        let created = svc.create(owner, create_request("income", dec!(7))).await.unwrap();

        let request = UpdateTransactionRequest {
            kind: Some("transfer".to_string()),
            amount: Some(dec!(99)),
            ..Default::default()
        };
        let err = svc.update(owner, created.id, request).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "type must be either 'income' or 'expense'");

        let stored = svc.get_by_id(owner, created.id).await.unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn test_other_owner_is_not_found() {
        let svc = service();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let created = svc.create(owner, create_request("income", dec!(1))).await.unwrap();

        let err = svc.get_by_id(intruder, created.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Transaction not found");

        let err = svc
            .update(intruder, created.id, UpdateTransactionRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Transaction not found or unauthorized");

        let err = svc.delete(intruder, created.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Transaction not found or unauthorized");
    }

    #[tokio::test]
    async fn test_summarize_truncates() {
        let svc = service();
        let owner = Uuid::new_v4();
        svc.create(owner, create_request("income", dec!(100.75))).await.unwrap();
        svc.create(owner, create_request("expense", dec!(50.25))).await.unwrap();

        let summary = svc.summarize(owner).await.unwrap();
        assert_eq!(summary.total_income, 100);
        assert_eq!(summary.total_expenses, 50);

        let empty = svc.summarize(Uuid::new_v4()).await.unwrap();
        assert_eq!((empty.total_income, empty.total_expenses), (0, 0));
    }
}
