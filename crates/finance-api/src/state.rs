//! 애플리케이션 상태 관리.
//!
//! 모든 핸들러에서 공유하는 상태를 정의합니다.

use std::sync::Arc;

use crate::auth::JwtKeys;
use crate::repository::{
    MemoryTransactionStore, MemoryUserStore, PgTransactionStore, PgUserStore, TransactionStore,
    UserStore,
};
use crate::services::{AuthService, TransactionService};

/// API 서버 공유 상태.
///
/// `Arc<AppState>` 형태로 라우터에 전달됩니다.
pub struct AppState {
    /// 가입/로그인 서비스
    pub auth: AuthService,
    /// 거래 서비스
    pub transactions: TransactionService,
    /// 토큰 검증 키 (인증 미들웨어용)
    pub jwt: Arc<JwtKeys>,
    /// 데이터베이스 연결 풀 (인메모리 모드면 None)
    pub db_pool: Option<sqlx::PgPool>,
    /// 서버 시작 시간
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// API 버전
    pub version: String,
}

impl AppState {
    /// 주어진 저장소로 상태를 생성합니다.
    pub fn new(
        users: Arc<dyn UserStore>,
        transactions: Arc<dyn TransactionStore>,
        jwt: JwtKeys,
    ) -> Self {
        let jwt = Arc::new(jwt);
        Self {
            auth: AuthService::new(users, Arc::clone(&jwt)),
            transactions: TransactionService::new(transactions),
            jwt,
            db_pool: None,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// PostgreSQL 저장소를 사용하는 상태.
    pub fn postgres(pool: sqlx::PgPool, jwt: JwtKeys) -> Self {
        let mut state = Self::new(
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgTransactionStore::new(pool.clone())),
            jwt,
        );
        state.db_pool = Some(pool);
        state
    }

    /// 인메모리 저장소를 사용하는 상태.
    pub fn in_memory(jwt: JwtKeys) -> Self {
        Self::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryTransactionStore::new()),
            jwt,
        )
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        if let Some(pool) = &self.db_pool {
            sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
        } else {
            false
        }
    }
}

/// 테스트용 비밀 키.
#[cfg(any(test, feature = "test-utils"))]
pub const TEST_JWT_SECRET: &str = "finance-api-test-secret";

/// 테스트용 AppState 생성.
///
/// 인메모리 저장소와 고정된 테스트 비밀 키를 사용합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    AppState::in_memory(JwtKeys::new(TEST_JWT_SECRET, 60))
}
