//! 인증 관련 타입 및 로직
//!
//! # 개요
//!
//! Jobly 사용자는 `/auth/token` 또는 `/auth/register`로 Access Token을 받고,
//! 이후 요청에서 `Authorization: Bearer <token>` 헤더로 전달합니다.
//!
//! # 토큰
//!
//! - **Access Token**: PASETO v4.local (암호화), `username`/`isAdmin` 클레임 포함

mod claims;
mod token;

pub use claims::TokenClaims;
pub use token::{bearer_token, parse_key_material, TokenSigner};
