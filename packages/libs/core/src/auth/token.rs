//! 토큰 발급/검증 및 유틸리티

use base64::{engine::general_purpose, Engine as _};
use rusty_paseto::prelude::*;

use super::claims::TokenClaims;
use crate::error::{Error, Result};

/// `Authorization` 헤더에서 Bearer 토큰 추출
pub fn bearer_token(auth_header: Option<&str>) -> Option<&str> {
    auth_header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// 토큰 발급기/검증기
///
/// PASETO v4.local 대칭키 하나로 발급과 검증을 모두 처리합니다.
#[derive(Clone)]
pub struct TokenSigner {
    key: [u8; 32],
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner").finish_non_exhaustive()
    }
}

impl TokenSigner {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// 키 재료 문자열(hex/base64/raw 32바이트)에서 생성
    pub fn from_material(raw: &str) -> Result<Self> {
        parse_key_material(raw)
            .map(Self::new)
            .ok_or_else(|| Error::InvalidToken {
                reason: "key material must decode to 32 bytes".to_string(),
            })
    }

    /// Access Token 발급
    ///
    /// 만료 시각은 PASETO 빌더 기본값(발급 후 1시간)을 따릅니다.
    pub fn sign(&self, claims: &TokenClaims) -> Result<String> {
        let key = PasetoSymmetricKey::<V4, Local>::from(Key::from(self.key));

        let username = CustomClaim::try_from(("username", claims.username.clone()))
            .map_err(|e| Error::InvalidToken {
                reason: e.to_string(),
            })?;
        let is_admin =
            CustomClaim::try_from(("isAdmin", claims.is_admin)).map_err(|e| Error::InvalidToken {
                reason: e.to_string(),
            })?;

        PasetoBuilder::<V4, Local>::default()
            .set_claim(username)
            .set_claim(is_admin)
            .build(&key)
            .map_err(|e| Error::InvalidToken {
                reason: e.to_string(),
            })
    }

    /// Access Token 검증 및 Claims 추출
    pub fn verify(&self, token: &str) -> Result<TokenClaims> {
        let key = PasetoSymmetricKey::<V4, Local>::from(Key::from(self.key));

        let value = PasetoParser::<V4, Local>::default()
            .parse(token.trim(), &key)
            .map_err(|e| Error::InvalidToken {
                reason: e.to_string(),
            })?;

        Ok(serde_json::from_value(value)?)
    }
}

/// 키 재료 파싱
///
/// 64자 hex, base64url(no pad), base64, 또는 정확히 32바이트 원문을 허용합니다.
pub fn parse_key_material(raw: &str) -> Option<[u8; 32]> {
    let trimmed = raw.trim();

    if trimmed.len() == 64 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        let bytes = decode_hex(trimmed)?;
        return bytes.as_slice().try_into().ok();
    }

    if let Ok(bytes) = general_purpose::URL_SAFE_NO_PAD.decode(trimmed) {
        if bytes.len() == 32 {
            return bytes.as_slice().try_into().ok();
        }
    }

    if let Ok(bytes) = general_purpose::STANDARD.decode(trimmed) {
        if bytes.len() == 32 {
            return bytes.as_slice().try_into().ok();
        }
    }

    let raw_bytes = trimmed.as_bytes();
    if raw_bytes.len() == 32 {
        return raw_bytes.try_into().ok();
    }

    None
}

fn decode_hex(input: &str) -> Option<Vec<u8>> {
    if input.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(input.len() / 2);
    let mut chars = input.chars();
    while let (Some(h), Some(l)) = (chars.next(), chars.next()) {
        let hi = h.to_digit(16)?;
        let lo = l.to_digit(16)?;
        bytes.push(((hi << 4) | lo) as u8);
    }
    Some(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "707172737475767778797a7b7c7d7e7f808182838485868788898a8b8c8d8e8f";

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(Some("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(Some("Basic abc")), None);
        assert_eq!(bearer_token(Some("Bearer   ")), None);
        assert_eq!(bearer_token(None), None);
    }

    #[test]
    fn test_parse_key_material() {
        let key = parse_key_material(KEY_HEX).unwrap();
        assert_eq!(key[0], 0x70);
        assert_eq!(key[31], 0x8f);

        assert!(parse_key_material("0123456789abcdef0123456789abcdef").is_some());
        assert!(parse_key_material("too-short").is_none());
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = TokenSigner::from_material(KEY_HEX).unwrap();
        let token = signer.sign(&TokenClaims::new("u1", true)).unwrap();
        assert!(token.starts_with("v4.local."));

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims, TokenClaims::new("u1", true));
    }

    #[test]
    fn test_verify_rejects_other_key_and_garbage() {
        let signer = TokenSigner::from_material(KEY_HEX).unwrap();
        let token = signer.sign(&TokenClaims::new("u1", false)).unwrap();

        let other = TokenSigner::new([7u8; 32]);
        assert!(matches!(other.verify(&token), Err(Error::InvalidToken { .. })));
        assert!(matches!(signer.verify("not-a-token"), Err(Error::InvalidToken { .. })));
    }

    #[test]
    fn test_from_material_rejects_short_key() {
        assert!(matches!(
            TokenSigner::from_material("abc"),
            Err(Error::InvalidToken { .. })
        ));
    }
}
