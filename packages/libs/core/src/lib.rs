//! jobly-core: Jobly 공통 핵심 라이브러리
//!
//! 이 크레이트는 SQL 빌더와 API 서비스가 공유하는 핵심 타입과 로직을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `validation`: JSON Schema 부분집합 검증기 및 쿼리 문자열 타입 변환 훅
//! - `schemas`: 라우트별 요청 스키마 (포함된 JSON 파일)
//! - `auth`: Access Token 구조 및 발급/검증
//! - `error`: 공통 에러 타입

pub mod auth;
pub mod error;
pub mod schemas;
pub mod validation;

pub use error::{Error, Result};
