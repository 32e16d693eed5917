//! HTTP 핸들러

pub mod auth;
pub mod companies;
pub mod health;
pub mod jobs;
pub mod users;

use jobly_core::validation::{ObjectSchema, Validator};
use jobly_core::Error;
use serde_json::{Map, Value};

use crate::error::Result;

/// 스키마 검증 후 JSON 객체로 반환
pub(crate) fn validated(
    validator: &Validator,
    mut instance: Value,
    schema: &ObjectSchema,
) -> Result<Map<String, Value>> {
    validator.validate(&mut instance, schema)?;
    match instance {
        Value::Object(object) => Ok(object),
        _ => Err(Error::bad_request("request body must be a JSON object").into()),
    }
}

/// 쿼리스트링 쌍 → JSON 객체 (등장 순서 유지, 중복 키는 마지막 값)
pub(crate) fn query_object(pairs: Vec<(String, String)>) -> Value {
    let object: Map<String, Value> = pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    Value::Object(object)
}
