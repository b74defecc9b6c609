//! Transaction Repository
//!
//! `transactions` 테이블에 대한 데이터베이스 연산을 담당합니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use finance_core::{Transaction, TransactionPatch, TransactionType};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{StoreError, StoreResult, TransactionStore};

const SELECT_COLUMNS: &str =
    "id, user_id, kind, category, amount, date, description, created_at, updated_at";

/// 거래 레코드
#[derive(Debug, Clone, FromRow)]
struct TransactionRecord {
    id: Uuid,
    user_id: Uuid,
    kind: String,
    category: String,
    amount: Decimal,
    date: String,
    #[sqlx(default)]
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = StoreError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let kind: TransactionType = record
            .kind
            .parse()
            .map_err(|_| StoreError::Corrupt(format!("transaction {} kind '{}'", record.id, record.kind)))?;

        Ok(Transaction {
            id: record.id,
            kind,
            category: record.category,
            amount: record.amount,
            date: record.date,
            description: record.description,
            user_id: record.user_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// PostgreSQL 거래 저장소
#[derive(Debug, Clone)]
pub struct PgTransactionStore {
    pool: PgPool,
}

impl PgTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn insert(&self, transaction: &Transaction) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions
                (id, user_id, kind, category, amount, date, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(transaction.id)
        .bind(transaction.user_id)
        .bind(transaction.kind.as_str())
        .bind(&transaction.category)
        .bind(transaction.amount)
        .bind(&transaction.date)
        .bind(&transaction.description)
        .bind(transaction.created_at)
        .bind(transaction.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Transaction>> {
        let records = sqlx::query_as::<_, TransactionRecord>(&format!(
            "SELECT {SELECT_COLUMNS} FROM transactions WHERE user_id = $1 ORDER BY created_at, id"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(Transaction::try_from).collect()
    }

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> StoreResult<Option<Transaction>> {
        let record = sqlx::query_as::<_, TransactionRecord>(&format!(
            "SELECT {SELECT_COLUMNS} FROM transactions WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        record.map(Transaction::try_from).transpose()
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: TransactionPatch,
    ) -> StoreResult<Option<Transaction>> {
        // NULL 파라미터는 기존 값 유지
        let record = sqlx::query_as::<_, TransactionRecord>(&format!(
            r#"
            UPDATE transactions SET
                kind = COALESCE($3, kind),
                category = COALESCE($4, category),
                amount = COALESCE($5, amount),
                date = COALESCE($6, date),
                description = COALESCE($7, description),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner)
        .bind(patch.kind.map(|k| k.as_str()))
        .bind(patch.category)
        .bind(patch.amount)
        .bind(patch.date)
        .bind(patch.description)
        .fetch_optional(&self.pool)
        .await?;

        record.map(Transaction::try_from).transpose()
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
