//! 요청 검증
//!
//! JSON Schema 부분집합으로 요청 본문/쿼리를 검증합니다.
//!
//! # 모듈 구조
//!
//! - `schema`: 스키마 타입 (serde로 JSON 파일에서 로드)
//! - `validator`: 명시적으로 생성하는 검증기와 pre-validate 훅 확장점
//! - `coerce`: 쿼리 문자열 값을 선언 타입으로 변환하는 pre-validate 훅

mod coerce;
mod schema;
mod validator;

pub use coerce::{coerce_query, precoerce};
pub use schema::{Format, ObjectSchema, PropertySchema, SchemaType};
pub use validator::{
    PreValidateHook, ValidateOptions, ValidationContext, ValidationError, Validator,
};
