//! 수입/지출 거래 기록.
//!
//! 이 모듈은 거래 관련 타입을 정의합니다:
//! - `TransactionType` - 수입/지출 구분
//! - `Transaction` - 저장된 거래 기록
//! - `NewTransaction` - 생성 입력
//! - `TransactionPatch` - 부분 수정 입력

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::FinanceError;

/// 거래 유형.
///
/// 금액의 부호가 아니라 이 값이 수입/지출을 결정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// 수입
    Income,
    /// 지출
    Expense,
}

impl TransactionType {
    /// 저장소/와이어 표현 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(FinanceError::InvalidTransactionType(other.to_string())),
        }
    }
}

/// 저장된 거래 기록.
///
/// 모든 거래는 정확히 한 명의 소유자(`user_id`)를 가지며,
/// 소유자만 조회/수정/삭제할 수 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// 거래 ID
    pub id: Uuid,
    /// 거래 유형
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// 카테고리
    pub category: String,
    /// 금액 (부호는 검증하지 않음)
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa-support", schema(value_type = f64))]
    pub amount: Decimal,
    /// 거래 일자 (형식 검증 없음)
    pub date: String,
    /// 설명
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 소유자 ID
    pub user_id: Uuid,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
    /// 마지막 수정 시각
    pub updated_at: DateTime<Utc>,
}

/// 새 거래 입력.
///
/// 필수 필드 검증은 이 타입을 만들기 전에 끝나 있어야 합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub category: String,
    pub amount: Decimal,
    pub date: String,
    pub description: Option<String>,
}

impl Transaction {
    /// 소유자와 입력값으로 새 거래 기록을 생성합니다.
    pub fn new(user_id: Uuid, input: NewTransaction) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            kind: input.kind,
            category: input.category,
            amount: input.amount,
            date: input.date,
            description: input.description,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// 주어진 사용자가 이 거래의 소유자인지 확인합니다.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// 거래 수정 입력.
///
/// `Some`인 필드만 덮어쓰고 `None`인 필드는 유지합니다.
/// 생성과 달리 빈 문자열도 그대로 저장됩니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl TransactionPatch {
    /// 거래 기록에 변경 사항을 적용하고 수정 시각을 갱신합니다.
    pub fn apply(self, transaction: &mut Transaction) {
        if let Some(kind) = self.kind {
            transaction.kind = kind;
        }
        if let Some(category) = self.category {
            transaction.category = category;
        }
        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        if let Some(date) = self.date {
            transaction.date = date;
        }
        if let Some(description) = self.description {
            transaction.description = Some(description);
        }
        transaction.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> NewTransaction {
        NewTransaction {
            kind: TransactionType::Expense,
            category: "groceries".to_string(),
            amount: dec!(42.50),
            date: "2024-05-01".to_string(),
            description: Some("weekly shop".to_string()),
        }
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!("income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!("expense".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert!("Income".parse::<TransactionType>().is_err());
        assert!("transfer".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_new_transaction_sets_owner_and_timestamps() {
        let owner = Uuid::new_v4();
        let tx = Transaction::new(owner, sample_input());

        assert!(tx.is_owned_by(owner));
        assert!(!tx.is_owned_by(Uuid::new_v4()));
        assert_eq!(tx.created_at, tx.updated_at);
        assert_eq!(tx.amount, dec!(42.50));
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut tx = Transaction::new(Uuid::new_v4(), sample_input());
        let before = tx.clone();

        let patch = TransactionPatch {
            category: Some(String::new()),
            amount: Some(dec!(10)),
            ..Default::default()
        };
        patch.apply(&mut tx);

        assert_eq!(tx.category, "");
        assert_eq!(tx.amount, dec!(10));
        assert_eq!(tx.kind, before.kind);
        assert_eq!(tx.date, before.date);
        assert_eq!(tx.description, before.description);
        assert!(tx.updated_at >= before.updated_at);
    }

    #[test]
    fn test_json_shape() {
        let tx = Transaction::new(Uuid::new_v4(), sample_input());
        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["type"], "expense");
        assert_eq!(json["amount"], 42.5);
        assert!(json.get("userId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("kind").is_none());
    }
}
