//! 가계부 시스템의 에러 타입.
//!
//! 이 모듈은 도메인 계층 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error)]
pub enum FinanceError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필수 필드 누락 (메시지는 API 응답에 그대로 노출됨)
    #[error("{0} is required")]
    MissingField(&'static str),

    /// 허용되지 않은 거래 유형
    #[error("type must be either 'income' or 'expense'")]
    InvalidTransactionType(String),
}

/// 도메인 작업을 위한 Result 타입.
pub type FinanceResult<T> = Result<T, FinanceError>;

impl FinanceError {
    /// 클라이언트 입력 문제로 발생한 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, FinanceError::Config(_))
    }
}

impl From<config::ConfigError> for FinanceError {
    fn from(err: config::ConfigError) -> Self {
        FinanceError::Config(err.to_string())
    }
}
