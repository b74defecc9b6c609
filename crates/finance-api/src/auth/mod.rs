//! 인증.
//!
//! JWT 기반 인증을 제공합니다.
//!
//! # 구성 요소
//!
//! - [`Claims`]: JWT 페이로드 구조체
//! - [`JwtKeys`]: 토큰 발급/검증 키
//! - [`require_auth`]: 보호된 라우트용 미들웨어
//! - [`AuthUser`]: 인증된 사용자 추출기
//! - 비밀번호 해싱 함수
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn protected_handler(user: AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}!", user.email)
//! }
//! ```

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtError, JwtKeys};
pub use middleware::{authenticate, require_auth, AuthUser};
pub use password::{
    hash_password, hash_password_blocking, verify_password, verify_password_blocking,
    PasswordError,
};
