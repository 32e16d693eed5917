//! API 설정

use std::env;

/// 개발용 토큰 키 (32바이트). 운영에서는 `JOBLY_SECRET_KEY`를 지정해야 합니다.
const DEV_SECRET_KEY: &str = "jobly-development-secret-key-32b";

/// API 설정
#[derive(Clone)]
pub struct Config {
    /// 서버 포트
    pub port: u16,

    /// Postgres 접속 URL
    pub database_url: String,

    /// 최대 DB 커넥션 수
    pub db_max_connections: u32,

    /// 토큰 키 재료 (hex / base64 / 32바이트 원문)
    pub secret_key: String,

    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("db_max_connections", &self.db_max_connections)
            .field("secret_key", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl Config {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let secret_key = match lookup("JOBLY_SECRET_KEY") {
            Some(key) => key,
            None => {
                tracing::warn!("JOBLY_SECRET_KEY not set, using development key");
                DEV_SECRET_KEY.to_string()
            }
        };

        Ok(Self {
            port: lookup("JOBLY_PORT")
                .unwrap_or_else(|| "3001".to_string())
                .parse()?,

            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "postgresql:///jobly".to_string()),

            db_max_connections: lookup("JOBLY_DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),

            secret_key,

            bcrypt_cost: lookup("JOBLY_BCRYPT_COST")
                .unwrap_or_else(|| bcrypt::DEFAULT_COST.to_string())
                .parse()?,
        })
    }
}
