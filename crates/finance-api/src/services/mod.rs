//! 비즈니스 로직 서비스.
//!
//! 라우트 핸들러는 요청 파싱만 담당하고, 검증과 저장소 호출은 여기서 수행합니다.

pub mod auth;
pub mod transactions;
mod validation;

pub use auth::{AuthService, LoginRequest, LoginResponse, SignupRequest};
pub use transactions::{
    CreateTransactionRequest, CreateTransactionResponse, TransactionService,
    UpdateTransactionRequest, EMPTY_LIST_IS_NOT_FOUND,
};
