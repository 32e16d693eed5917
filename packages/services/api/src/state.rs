//! API 앱 상태

use jobly_core::auth::TokenSigner;
use jobly_core::schemas::RequestSchemas;
use jobly_core::validation::{precoerce, Validator};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

/// 앱 상태
///
/// 모든 핸들러에서 공유하는 상태입니다.
pub struct AppState {
    /// 설정
    pub config: Config,

    /// DB Connection Pool
    pub db: PgPool,

    /// 요청 스키마
    pub schemas: RequestSchemas,

    /// JSON 바디 검증기
    pub validator: Validator,

    /// 쿼리스트링 검증기 (문자열 값을 스키마 타입으로 선변환)
    pub query_validator: Validator,

    /// 토큰 발급/검증
    pub tokens: TokenSigner,
}

impl AppState {
    /// 새 상태 생성
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await?;
        crate::db::ensure_schema(&db).await?;

        Self::with_pool(config, db)
    }

    /// 이미 만든 풀로 상태 생성
    pub fn with_pool(config: &Config, db: PgPool) -> anyhow::Result<Self> {
        Ok(Self {
            config: config.clone(),
            db,
            schemas: RequestSchemas::load()?,
            validator: Validator::new(),
            query_validator: Validator::new().with_pre_validate(precoerce),
            tokens: TokenSigner::from_material(&config.secret_key)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobly_core::auth::TokenClaims;
    use serde_json::json;

    fn test_config() -> Config {
        Config {
            port: 0,
            database_url: "postgresql:///jobly_test".to_string(),
            db_max_connections: 1,
            secret_key: "jobly-development-secret-key-32b".to_string(),
            bcrypt_cost: 4,
        }
    }

    #[tokio::test]
    async fn test_state_with_lazy_pool() {
        let config = test_config();
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        let state = AppState::with_pool(&config, pool).unwrap();

        assert!(state.query_validator.options().pre_validate_property.is_some());
        assert!(state.validator.options().pre_validate_property.is_none());

        let user = json!({ "username": "u1", "isAdmin": true });
        let token = crate::handlers::auth::sign_for(&state, &user).unwrap();
        assert_eq!(state.tokens.verify(&token).unwrap(), TokenClaims::new("u1", true));
    }

    #[tokio::test]
    async fn test_state_rejects_short_key() {
        let mut config = test_config();
        config.secret_key = "short".to_string();
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        assert!(AppState::with_pool(&config, pool).is_err());
    }
}
