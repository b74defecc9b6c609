//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 로드 순서: 기본값 → 설정 파일(선택) → `FINANCE__` 접두사 환경 변수.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;

use crate::error::{FinanceError, FinanceResult};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseConfig,
    /// 인증 설정
    #[serde(default)]
    pub auth: AuthConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 허용할 CORS origin 목록 (쉼표 구분, 없으면 모두 허용)
    #[serde(default)]
    pub cors_origins: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 설정된 CORS origin 목록. 비어 있으면 모두 허용으로 해석합니다.
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL 연결 URL (없으면 인메모리 저장소 사용)
    #[serde(default)]
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub acquire_timeout_secs: u64,
    /// 시작 시 마이그레이션 실행 여부
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 10,
            run_migrations: true,
        }
    }
}

/// 인증 설정.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// JWT 서명 비밀 키 (필수, 기본값 없음)
    #[serde(default)]
    pub jwt_secret: Option<SecretString>,
    /// 액세스 토큰 만료 시간 (분)
    pub token_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_minutes: 60,
        }
    }
}

impl AuthConfig {
    /// 설정된 비밀 키를 반환합니다.
    ///
    /// 비어 있거나 설정되지 않았으면 에러를 반환합니다.
    pub fn jwt_secret(&self) -> FinanceResult<&str> {
        match &self.jwt_secret {
            Some(secret) if !secret.expose_secret().trim().is_empty() => {
                Ok(secret.expose_secret())
            }
            _ => Err(FinanceError::Config(
                "auth.jwt_secret is not set (FINANCE__AUTH__JWT_SECRET)".to_string(),
            )),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 건너뜁니다. 로드 후 [`AppConfig::validate`]를 수행합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> FinanceResult<Self> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_secs", 10)?
            .set_default("database.run_migrations", true)?
            .set_default("auth.token_ttl_minutes", 60)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("FINANCE")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: AppConfig = builder.build()?.try_deserialize()?;

        if config.database.url.is_none() {
            config.database.url = std::env::var("DATABASE_URL").ok();
        }

        config.validate()?;
        Ok(config)
    }

    /// `.env`를 읽은 뒤 기본 경로(또는 `FINANCE_CONFIG`)에서 설정을 로드합니다.
    pub fn load_default() -> FinanceResult<Self> {
        let _ = dotenvy::dotenv();
        let path =
            std::env::var("FINANCE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// 설정 값의 유효성을 검사합니다.
    pub fn validate(&self) -> FinanceResult<()> {
        self.auth.jwt_secret()?;

        if self.auth.token_ttl_minutes <= 0 {
            return Err(FinanceError::Config(
                "auth.token_ttl_minutes must be positive".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(FinanceError::Config(
                "database.max_connections must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: Option<&str>) -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig {
                jwt_secret: secret.map(|s| SecretString::from(s.to_string())),
                token_ttl_minutes: 60,
            },
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let err = config_with_secret(None).validate().unwrap_err();
        assert!(matches!(err, FinanceError::Config(_)));
        assert!(err.to_string().contains("jwt_secret"));
    }

    #[test]
    fn test_blank_secret_is_rejected() {
        assert!(config_with_secret(Some("   ")).validate().is_err());
    }

    #[test]
    fn test_valid_config() {
        let config = config_with_secret(Some("a-long-enough-test-secret"));
        assert!(config.validate().is_ok());
        assert_eq!(config.auth.jwt_secret().unwrap(), "a-long-enough-test-secret");
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let mut config = config_with_secret(Some("secret"));
        config.auth.token_ttl_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cors_origin_list() {
        let server = ServerConfig {
            cors_origins: Some("http://a.test, ,http://b.test".to_string()),
            ..ServerConfig::default()
        };
        assert_eq!(server.cors_origin_list(), vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.bind_address(), "127.0.0.1:3000");
        assert!(server.cors_origin_list().is_empty());

        let db = DatabaseConfig::default();
        assert!(db.url.is_none());
        assert!(db.run_migrations);
        assert_eq!(AuthConfig::default().token_ttl_minutes, 60);
    }
}
