//! Repository pattern for persistence.
//!
//! 저장소 접근 로직을 서비스 계층에서 분리하여 관리합니다.
//! 서비스는 [`UserStore`] / [`TransactionStore`] 트레이트에만 의존하며,
//! 구현체는 PostgreSQL(`Pg*`)과 인메모리(`Memory*`) 두 가지입니다.

mod memory;
mod transactions;
mod users;

use async_trait::async_trait;
use finance_core::{Transaction, TransactionPatch, User};
use uuid::Uuid;

pub use memory::{MemoryTransactionStore, MemoryUserStore};
pub use transactions::PgTransactionStore;
pub use users::PgUserStore;

/// 저장소 에러.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 유일성 제약 위반
    #[error("{0}")]
    Duplicate(String),
    /// 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Database(#[from] sqlx::Error),
    /// 저장된 값을 도메인 타입으로 해석할 수 없음
    #[error("손상된 레코드: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 중복 이메일 메시지.
pub const DUPLICATE_EMAIL: &str = "Email already registered";

/// 사용자 저장소.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 이메일로 사용자 조회 (대소문자 구분, 정확히 일치).
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// 사용자 저장. 이메일이 이미 있으면 [`StoreError::Duplicate`].
    async fn insert(&self, user: &User) -> StoreResult<()>;
}

/// 거래 저장소.
///
/// 조회/수정/삭제는 모두 `(id, owner)` 쌍으로 범위가 제한됩니다.
/// 다른 사용자의 레코드는 존재하지 않는 것과 구분되지 않습니다.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn insert(&self, transaction: &Transaction) -> StoreResult<()>;

    /// 소유자의 모든 거래 (생성 순).
    async fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Transaction>>;

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> StoreResult<Option<Transaction>>;

    /// 패치를 적용하고 갱신된 레코드를 반환합니다. 대상이 없으면 `None`.
    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: TransactionPatch,
    ) -> StoreResult<Option<Transaction>>;

    /// 삭제되었으면 `true`.
    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> StoreResult<bool>;
}
