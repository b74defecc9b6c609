//! # Finance Core
//!
//! 개인 가계부 백엔드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! - 사용자 및 거래 기록
//! - 수입/지출 합계 계산
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
