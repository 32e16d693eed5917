//! 스키마 검증기
//!
//! 검증기는 호출자가 명시적으로 생성해 공유합니다. 전역 인스턴스는 없습니다.
//! 생성 후에는 읽기 전용이므로 여러 요청 핸들러가 동시에 사용해도 됩니다.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::schema::{Format, ObjectSchema, PropertySchema};
use crate::error::{Error, Result};

/// 프로퍼티 타입 검사 직전에 호출되는 훅
///
/// 인자: (대상 객체, 프로퍼티 키, 프로퍼티 스키마, 검증 옵션, 부모 컨텍스트).
/// 대상 객체를 제자리에서 수정할 수 있으며, 에러를 반환하지 않습니다.
pub type PreValidateHook =
    fn(&mut Map<String, Value>, &str, &PropertySchema, &ValidateOptions, &ValidationContext);

/// 검증 옵션
#[derive(Clone, Copy, Default)]
pub struct ValidateOptions {
    pub pre_validate_property: Option<PreValidateHook>,
}

impl fmt::Debug for ValidateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidateOptions")
            .field("pre_validate_property", &self.pre_validate_property.is_some())
            .finish()
    }
}

/// 검증 위치 (`instance`, `instance.title`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    path: String,
}

impl ValidationContext {
    pub fn root() -> Self {
        Self {
            path: "instance".to_string(),
        }
    }

    pub fn make_child(&self, key: &str) -> Self {
        Self {
            path: format!("{}.{}", self.path, key),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// 단일 검증 실패 (필드 경로 + 메시지)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.message)
    }
}

/// 스키마 검증기
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    options: ValidateOptions,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// pre-validate 훅 등록
    pub fn with_pre_validate(mut self, hook: PreValidateHook) -> Self {
        self.options.pre_validate_property = Some(hook);
        self
    }

    pub fn options(&self) -> &ValidateOptions {
        &self.options
    }

    /// 인스턴스 검증
    ///
    /// 훅이 인스턴스를 수정할 수 있으므로 `&mut`로 받습니다.
    /// 실패는 모두 모아서 `Error::Validation`으로 반환합니다.
    pub fn validate(&self, instance: &mut Value, schema: &ObjectSchema) -> Result<()> {
        let errors = self.collect_errors(instance, schema);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation { errors })
        }
    }

    /// 검증 실패 목록 수집
    pub fn collect_errors(&self, instance: &mut Value, schema: &ObjectSchema) -> Vec<ValidationError> {
        let ctx = ValidationContext::root();
        let mut errors = Vec::new();

        let Some(object) = instance.as_object_mut() else {
            errors.push(ValidationError::new(
                ctx.path(),
                "is not of a type(s) object",
            ));
            return errors;
        };

        for key in &schema.required {
            if !object.contains_key(key) {
                errors.push(ValidationError::new(
                    ctx.path(),
                    format!("requires property \"{}\"", key),
                ));
            }
        }

        if !schema.additional_properties {
            for key in object.keys() {
                if schema.property(key).is_none() {
                    errors.push(ValidationError::new(
                        ctx.path(),
                        format!("is not allowed to have the additional property \"{}\"", key),
                    ));
                }
            }
        }

        for (key, property) in &schema.properties {
            if let Some(hook) = self.options.pre_validate_property {
                hook(object, key, property, &self.options, &ctx);
            }

            if let Some(value) = object.get(key) {
                check_property(value, property, &ctx.make_child(key), &mut errors);
            }
        }

        errors
    }
}

fn check_property(
    value: &Value,
    property: &PropertySchema,
    ctx: &ValidationContext,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(kind) = property.kind {
        if !kind.matches(value) {
            errors.push(ValidationError::new(
                ctx.path(),
                format!("is not of a type(s) {}", kind.as_str()),
            ));
            return;
        }
    }

    if let Value::String(s) = value {
        let len = s.chars().count();
        if let Some(min) = property.min_length {
            if len < min {
                errors.push(ValidationError::new(
                    ctx.path(),
                    format!("does not meet minimum length of {}", min),
                ));
            }
        }
        if let Some(max) = property.max_length {
            if len > max {
                errors.push(ValidationError::new(
                    ctx.path(),
                    format!("does not meet maximum length of {}", max),
                ));
            }
        }
        if let Some(format) = property.format {
            if !format.matches(s) {
                errors.push(ValidationError::new(
                    ctx.path(),
                    format!("does not conform to the \"{}\" format", format_name(format)),
                ));
            }
        }
    }

    if let Some(n) = value.as_f64() {
        if let Some(min) = property.minimum {
            if n < min {
                errors.push(ValidationError::new(
                    ctx.path(),
                    format!("must be greater than or equal to {}", min),
                ));
            }
        }
        if let Some(max) = property.maximum {
            if n > max {
                errors.push(ValidationError::new(
                    ctx.path(),
                    format!("must be less than or equal to {}", max),
                ));
            }
        }
    }
}

fn format_name(format: Format) -> &'static str {
    match format {
        Format::Uri => "uri",
        Format::Email => "email",
    }
}
