//! 쿼리 문자열 타입 변환 (pre-validate 훅)
//!
//! 쿼리 문자열 값은 모두 문자열로 들어오므로, 스키마가 `number`/`boolean`을
//! 선언한 프로퍼티는 타입 검사 전에 변환합니다.
//!
//! 숫자는 항상 `f64`로 파싱합니다 (`equity` 같은 소수 필터 값 보존).
//! JSON 값은 NaN을 담을 수 없으므로, 파싱할 수 없는 문자열은 그대로 두고
//! 이어지는 타입 검사에서 실패하게 합니다.

use serde_json::{Map, Number, Value};

use super::schema::{ObjectSchema, PropertySchema, SchemaType};
use super::validator::{ValidateOptions, ValidationContext};

/// pre-validate 훅
///
/// `Validator::with_pre_validate(precoerce)`로 등록합니다.
pub fn precoerce(
    object: &mut Map<String, Value>,
    key: &str,
    schema: &PropertySchema,
    _options: &ValidateOptions,
    ctx: &ValidationContext,
) {
    let Some(kind) = schema.kind else {
        return;
    };
    let Some(value) = object.get_mut(key) else {
        return;
    };
    if kind.matches(value) {
        return;
    }

    match kind {
        SchemaType::Number => match parse_number(value) {
            Some(number) => *value = Value::Number(number),
            None => {
                tracing::trace!(path = %ctx.make_child(key).path(), "value is not numeric, left for type check");
            }
        },
        SchemaType::Boolean => {
            let flag = string_form(value).trim().eq_ignore_ascii_case("true");
            *value = Value::Bool(flag);
        }
        _ => {}
    }
}

/// 스키마에 선언된 모든 프로퍼티에 훅을 적용 (검증 없이 변환만)
pub fn coerce_query(object: &mut Map<String, Value>, schema: &ObjectSchema) {
    let options = ValidateOptions::default();
    let ctx = ValidationContext::root();
    for (key, property) in &schema.properties {
        precoerce(object, key, property, &options, &ctx);
    }
}

fn parse_number(value: &Value) -> Option<Number> {
    let parsed: f64 = string_form(value).trim().parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    Number::from_f64(parsed)
}

fn string_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validator;
    use serde_json::json;

    fn run(object: &mut Map<String, Value>, key: &str, kind: SchemaType) {
        precoerce(
            object,
            key,
            &PropertySchema::of_type(kind),
            &ValidateOptions::default(),
            &ValidationContext::root(),
        );
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_numeric_string_becomes_number() {
        let mut query = object(json!({ "minSalary": "50000" }));
        run(&mut query, "minSalary", SchemaType::Number);
        assert_eq!(query["minSalary"].as_f64(), Some(50000.0));

        let mut query = object(json!({ "minEquity": "0.25" }));
        run(&mut query, "minEquity", SchemaType::Number);
        assert_eq!(query["minEquity"].as_f64(), Some(0.25));
    }

    #[test]
    fn test_number_is_untouched() {
        let mut query = object(json!({ "minSalary": 3 }));
        run(&mut query, "minSalary", SchemaType::Number);
        assert_eq!(query["minSalary"], json!(3));
        assert!(query["minSalary"].is_i64());
    }

    #[test]
    fn test_absent_key_is_noop() {
        let mut query = object(json!({ "title": "dev" }));
        run(&mut query, "minSalary", SchemaType::Number);
        assert_eq!(Value::Object(query), json!({ "title": "dev" }));
    }

    #[test]
    fn test_malformed_number_left_for_type_check() {
        let mut query = object(json!({ "minSalary": "lots" }));
        run(&mut query, "minSalary", SchemaType::Number);
        assert_eq!(query["minSalary"], json!("lots"));

        let mut query = object(json!({ "minSalary": "NaN" }));
        run(&mut query, "minSalary", SchemaType::Number);
        assert_eq!(query["minSalary"], json!("NaN"));
    }

    #[test]
    fn test_boolean_strings() {
        for (raw, expected) in [
            ("true", true),
            ("TRUE", true),
            ("True", true),
            (" true ", true),
            ("\ttrue\n", true),
            ("false", false),
            (" false ", false),
            ("yes", false),
            ("1", false),
        ] {
            let mut query = object(json!({ "hasEquity": raw }));
            run(&mut query, "hasEquity", SchemaType::Boolean);
            assert_eq!(query["hasEquity"], json!(expected), "input {raw}");
        }
    }

    #[test]
    fn test_other_types_untouched() {
        let mut query = object(json!({ "title": 12 }));
        run(&mut query, "title", SchemaType::String);
        assert_eq!(query["title"], json!(12));
    }

    #[test]
    fn test_coercion_keeps_key_order() {
        let mut query = object(json!({ "title": "dev", "minSalary": "10", "hasEquity": "true" }));
        run(&mut query, "minSalary", SchemaType::Number);
        let keys: Vec<&String> = query.keys().collect();
        assert_eq!(keys, vec!["title", "minSalary", "hasEquity"]);
    }

    #[test]
    fn test_validator_with_hook() {
        let schema = ObjectSchema::from_json(
            r#"{
                "properties": {
                    "minSalary": { "type": "number", "minimum": 0 },
                    "hasEquity": { "type": "boolean" }
                },
                "additionalProperties": false
            }"#,
        )
        .unwrap();
        let validator = Validator::new().with_pre_validate(precoerce);

        let mut query = json!({ "minSalary": "100", "hasEquity": "true" });
        assert!(validator.validate(&mut query, &schema).is_ok());
        assert_eq!(query["minSalary"].as_f64(), Some(100.0));
        assert_eq!(query["hasEquity"], json!(true));

        let mut query = json!({ "minSalary": "abc" });
        let err = validator.validate(&mut query, &schema).unwrap_err();
        assert_eq!(err.validation_errors()[0].path, "instance.minSalary");
    }

    #[test]
    fn test_coerce_query_applies_all_properties() {
        let schema = ObjectSchema::from_json(
            r#"{ "properties": { "minEmployees": { "type": "number" }, "name": { "type": "string" } } }"#,
        )
        .unwrap();
        let mut query = object(json!({ "name": "net", "minEmployees": "2" }));
        coerce_query(&mut query, &schema);
        assert_eq!(query["minEmployees"].as_f64(), Some(2.0));
        assert_eq!(query["name"], json!("net"));
    }
}
