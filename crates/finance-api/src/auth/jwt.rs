//! JWT 토큰 처리.
//!
//! HS256으로 서명된 Access Token 발급/검증 로직.

use chrono::{Duration, Utc};
use finance_core::{AuthConfig, FinanceResult};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT Access Token 페이로드.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: String,
    /// 사용자 이메일
    pub email: String,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// JWT ID - 토큰 고유 식별자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `user_id` - 사용자 ID
    /// * `email` - 사용자 이메일
    /// * `expires_in_minutes` - 만료 시간 (분)
    pub fn new(user_id: Uuid, email: impl Into<String>, expires_in_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            email: email.into(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(expires_in_minutes)).timestamp(),
            jti: Some(Uuid::new_v4().to_string()),
        }
    }

    /// `sub`를 사용자 ID로 해석합니다.
    pub fn user_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|_| JwtError::Invalid)
    }
}

/// JWT 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("토큰 생성 실패: {0}")]
    Encoding(String),
    #[error("Token expired")]
    Expired,
    #[error("Invalid JWT Token")]
    Invalid,
}

/// 토큰 서명/검증 키.
///
/// 비밀 키는 생성 시점에만 읽고, 이후에는 jsonwebtoken 키 형태로만 보관합니다.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_minutes: i64,
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish_non_exhaustive()
    }
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    /// 인증 설정에서 키를 생성합니다. 비밀 키가 없으면 실패합니다.
    pub fn from_config(config: &AuthConfig) -> FinanceResult<Self> {
        Ok(Self::new(config.jwt_secret()?, config.token_ttl_minutes))
    }

    /// 사용자에게 Access Token을 발급합니다.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, JwtError> {
        let claims = Claims::new(user_id, email, self.ttl_minutes);
        self.sign(&claims)
    }

    /// 임의의 Claims에 서명합니다.
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| JwtError::Encoding(e.to_string()))
    }

    /// 토큰을 검증하고 Claims를 반환합니다.
    ///
    /// 서명 불일치, 형식 오류, 알고리즘 불일치는 모두 [`JwtError::Invalid`]입니다.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid,
            })
    }
}
