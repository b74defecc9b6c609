//! 가계부 운영을 위한 도메인 모델.

mod summary;
mod transaction;
mod user;

pub use summary::*;
pub use transaction::*;
pub use user::*;
