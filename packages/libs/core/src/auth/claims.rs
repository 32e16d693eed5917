//! 토큰 Claims
//!
//! Access Token의 페이로드 구조입니다.

use serde::{Deserialize, Serialize};

/// Access Token Claims (PASETO v4.local 페이로드)
///
/// PASETO 표준 클레임(`exp`, `iat` 등)은 파서가 검사하며 여기서는 무시합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    /// 사용자 이름
    pub username: String,

    /// 관리자 여부
    #[serde(default)]
    pub is_admin: bool,
}

impl TokenClaims {
    /// 새 claims 생성
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            is_admin,
        }
    }

    /// 관리자이거나 해당 사용자 본인인지
    pub fn may_act_for(&self, username: &str) -> bool {
        self.is_admin || self.username == username
    }
}
