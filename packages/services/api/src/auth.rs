//! 인증 주체와 비밀번호 해시

use jobly_core::auth::TokenClaims;
use jobly_core::Error;

use crate::error::{ApiError, Result};

/// 인증된 주체
#[derive(Debug, Clone)]
pub enum Principal {
    Anonymous,
    User(TokenClaims),
}

impl Principal {
    /// 로그인 필요
    pub fn require_user(&self) -> Result<&TokenClaims> {
        match self {
            Principal::User(claims) => Ok(claims),
            Principal::Anonymous => Err(Error::unauthorized("login required").into()),
        }
    }

    /// 관리자 필요
    pub fn require_admin(&self) -> Result<&TokenClaims> {
        let claims = self.require_user()?;
        if claims.is_admin {
            Ok(claims)
        } else {
            Err(Error::unauthorized("admin required").into())
        }
    }

    /// 관리자 또는 해당 사용자 본인 필요
    pub fn require_admin_or_user(&self, username: &str) -> Result<&TokenClaims> {
        let claims = self.require_user()?;
        if claims.may_act_for(username) {
            Ok(claims)
        } else {
            Err(Error::unauthorized("admin or same user required").into())
        }
    }
}

/// 비밀번호 해시 (블로킹 작업이므로 별도 스레드에서 실행)
pub async fn hash_password(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ApiError::internal(format!("hash task failed: {}", e)))?
        .map_err(|e| ApiError::internal(format!("hash failed: {}", e)))
}

/// 비밀번호 검증
///
/// 저장된 해시가 손상되어 검증할 수 없으면 불일치로 취급합니다.
pub async fn verify_password(password: String, hash: String) -> Result<bool> {
    let matched = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ApiError::internal(format!("verify task failed: {}", e)))?;

    Ok(match matched {
        Ok(matched) => matched,
        Err(e) => {
            tracing::warn!("stored password hash unreadable: {}", e);
            false
        }
    })
}
