//! 인메모리 저장소.
//!
//! `database.url`이 없을 때와 테스트에서 사용합니다. 프로세스 종료 시 데이터는 사라집니다.

use std::collections::HashMap;

use async_trait::async_trait;
use finance_core::{Transaction, TransactionPatch, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, StoreResult, TransactionStore, UserStore, DUPLICATE_EMAIL};

/// 이메일을 키로 하는 사용자 저장소.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert(&self, user: &User) -> StoreResult<()> {
        // 확인과 삽입을 같은 쓰기 락 안에서 수행
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(StoreError::Duplicate(DUPLICATE_EMAIL.to_string()));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }
}

/// 삽입 순서를 유지하는 거래 저장소.
#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn insert(&self, transaction: &Transaction) -> StoreResult<()> {
        self.transactions.write().await.push(transaction.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Transaction>> {
        Ok(self
            .transactions
            .read()
            .await
            .iter()
            .filter(|t| t.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> StoreResult<Option<Transaction>> {
        Ok(self
            .transactions
            .read()
            .await
            .iter()
            .find(|t| t.id == id && t.is_owned_by(owner))
            .cloned())
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: TransactionPatch,
    ) -> StoreResult<Option<Transaction>> {
        let mut transactions = self.transactions.write().await;
        let Some(existing) = transactions
            .iter_mut()
            .find(|t| t.id == id && t.is_owned_by(owner))
        else {
            return Ok(None);
        };

        patch.apply(existing);
        Ok(Some(existing.clone()))
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> StoreResult<bool> {
        let mut transactions = self.transactions.write().await;
        let before = transactions.len();
        transactions.retain(|t| !(t.id == id && t.is_owned_by(owner)));
        Ok(transactions.len() != before)
    }
}
