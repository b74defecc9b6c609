//! 사용자 계정.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// 등록된 사용자.
///
/// 비밀번호는 해시로만 보관하며 직렬화 대상에서 제외됩니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// 사용자 ID
    pub id: Uuid,
    /// 이름
    pub name: String,
    /// 이메일 (로그인 키, 유일)
    pub email: String,
    /// PHC 형식 비밀번호 해시
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// 가입 시각
    pub created_at: DateTime<Utc>,
}

impl User {
    /// 새 사용자를 생성합니다.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}
