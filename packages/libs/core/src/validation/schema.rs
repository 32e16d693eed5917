//! 검증 스키마 타입
//!
//! JSON Schema 중 Jobly 요청 스키마가 사용하는 키워드만 지원합니다.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 선언 타입 (`type` 키워드)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl SchemaType {
    /// 값이 이 타입의 네이티브 검사를 통과하는지
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            SchemaType::String => value.is_string(),
            SchemaType::Number => value.is_number(),
            SchemaType::Integer => match value {
                Value::Number(n) => {
                    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
                }
                _ => false,
            },
            SchemaType::Boolean => value.is_boolean(),
            SchemaType::Object => value.is_object(),
            SchemaType::Array => value.is_array(),
            SchemaType::Null => value.is_null(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::Null => "null",
        }
    }
}

/// 문자열 포맷 (`format` 키워드)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Uri,
    Email,
}

impl Format {
    /// 느슨한 형태 검사 (스킴/`@` 구분자 수준)
    pub fn matches(&self, s: &str) -> bool {
        match self {
            Format::Uri => match s.split_once(':') {
                Some((scheme, rest)) => {
                    !rest.is_empty()
                        && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                        && scheme
                            .chars()
                            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
                }
                None => false,
            },
            Format::Email => match s.split_once('@') {
                Some((local, domain)) => {
                    !local.is_empty()
                        && domain.contains('.')
                        && !domain.starts_with('.')
                        && !domain.ends_with('.')
                        && !s.chars().any(char::is_whitespace)
                }
                None => false,
            },
        }
    }
}

/// 프로퍼티 스키마
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SchemaType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

impl PropertySchema {
    pub fn of_type(kind: SchemaType) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }
}

/// 객체 스키마 (요청 본문/쿼리 최상위)
///
/// `properties`는 JSON 파일의 선언 순서를 유지합니다.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawObjectSchema")]
pub struct ObjectSchema {
    pub id: Option<String>,
    pub properties: Vec<(String, PropertySchema)>,
    pub required: Vec<String>,
    pub additional_properties: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawObjectSchema {
    #[serde(default, rename = "$id")]
    id: Option<String>,

    #[serde(default)]
    properties: Map<String, Value>,

    #[serde(default)]
    required: Vec<String>,

    #[serde(default = "default_additional_properties")]
    additional_properties: bool,
}

fn default_additional_properties() -> bool {
    true
}

impl TryFrom<RawObjectSchema> for ObjectSchema {
    type Error = serde_json::Error;

    fn try_from(raw: RawObjectSchema) -> Result<Self, Self::Error> {
        let properties = raw
            .properties
            .into_iter()
            .map(|(key, value)| Ok((key, serde_json::from_value(value)?)))
            .collect::<Result<Vec<_>, serde_json::Error>>()?;

        Ok(Self {
            id: raw.id,
            properties,
            required: raw.required,
            additional_properties: raw.additional_properties,
        })
    }
}

impl ObjectSchema {
    /// JSON 문자열에서 로드
    pub fn from_json(raw: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn property(&self, key: &str) -> Option<&PropertySchema> {
        self.properties
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, property)| property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_object_schema() {
        let raw = r#"{
            "$id": "jobSearch",
            "type": "object",
            "properties": {
                "title": { "type": "string", "minLength": 1 },
                "minSalary": { "type": "number", "minimum": 0 },
                "hasEquity": { "type": "boolean" }
            },
            "additionalProperties": false
        }"#;

        let schema = ObjectSchema::from_json(raw).unwrap();
        assert_eq!(schema.id.as_deref(), Some("jobSearch"));
        assert!(!schema.additional_properties);
        assert!(schema.required.is_empty());

        let keys: Vec<&str> = schema.properties.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["title", "minSalary", "hasEquity"]);

        let min_salary = schema.property("minSalary").unwrap();
        assert_eq!(min_salary.kind, Some(SchemaType::Number));
        assert_eq!(min_salary.minimum, Some(0.0));
    }

    #[test]
    fn test_invalid_property_schema_rejected() {
        let raw = r#"{ "properties": { "x": { "type": "decimal" } } }"#;
        assert!(ObjectSchema::from_json(raw).is_err());
    }

    #[test]
    fn test_type_matches() {
        assert!(SchemaType::Number.matches(&json!(3)));
        assert!(SchemaType::Number.matches(&json!(0.5)));
        assert!(!SchemaType::Number.matches(&json!("3")));
        assert!(SchemaType::Integer.matches(&json!(3)));
        assert!(SchemaType::Integer.matches(&json!(3.0)));
        assert!(!SchemaType::Integer.matches(&json!(3.5)));
        assert!(SchemaType::Boolean.matches(&json!(false)));
        assert!(!SchemaType::Boolean.matches(&json!("false")));
    }

    #[test]
    fn test_formats() {
        assert!(Format::Uri.matches("http://c1.img"));
        assert!(!Format::Uri.matches("not-a-url"));
        assert!(Format::Email.matches("user1@user.com"));
        assert!(!Format::Email.matches("not-an-email"));
        assert!(!Format::Email.matches("a@b"));
    }
}
