//! 부분 업데이트 SET 절 빌더
//!
//! 요청에 포함된 필드만 변경하는 `UPDATE ... SET` 절을 생성합니다.

use serde_json::{Map, Value};

use jobly_core::{Error, Result};

use crate::fragment::{placeholder, SqlFragment};
use crate::tables::physical_name;

/// 부분 업데이트용 SET 절 생성
///
/// 필드마다 `"<컬럼>"=$<위치>`를 삽입 순서대로 생성하고 `, `로 연결합니다.
/// 컬럼 이름은 `column_map`에 매핑이 있으면 그 값을, 없으면 필드 이름을 그대로 씁니다.
/// 참여 여부는 키 존재만으로 결정되며, `null`/`false`/`0` 값도 포함됩니다.
///
/// # Errors
///
/// 필드가 하나도 없으면 `Error::EmptyUpdate`.
///
/// # 예시
///
/// ```
/// use jobly_sql::sql_for_partial_update;
/// use serde_json::json;
///
/// let fields = json!({ "firstName": "Aliya", "age": 32 });
/// let fragment = sql_for_partial_update(
///     fields.as_object().unwrap(),
///     &[("firstName", "first_name")],
/// )
/// .unwrap();
/// assert_eq!(fragment.clause, r#""first_name"=$1, "age"=$2"#);
/// assert_eq!(fragment.params, vec![json!("Aliya"), json!(32)]);
/// ```
pub fn sql_for_partial_update(
    fields: &Map<String, Value>,
    column_map: &[(&str, &str)],
) -> Result<SqlFragment> {
    if fields.is_empty() {
        return Err(Error::EmptyUpdate);
    }

    let clause = fields
        .keys()
        .enumerate()
        .map(|(idx, field)| {
            format!(
                "\"{}\"={}",
                physical_name(field, column_map),
                placeholder(idx + 1)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    Ok(SqlFragment {
        clause,
        params: fields.values().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn company_data() -> Map<String, Value> {
        fields(json!({ "name": "ABC", "description": "description", "numEmployees": 3 }))
    }

    #[test]
    fn test_update_without_column_map() {
        let fragment = sql_for_partial_update(&company_data(), &[]).unwrap();
        assert_eq!(
            fragment.clause,
            r#""name"=$1, "description"=$2, "numEmployees"=$3"#
        );
        assert_eq!(fragment.params, vec![json!("ABC"), json!("description"), json!(3)]);
    }

    #[test]
    fn test_update_with_column_map() {
        let fragment =
            sql_for_partial_update(&company_data(), &[("numEmployees", "num_employees")]).unwrap();
        assert_eq!(
            fragment.clause,
            r#""name"=$1, "description"=$2, "num_employees"=$3"#
        );
        assert_eq!(fragment.params, vec![json!("ABC"), json!("description"), json!(3)]);
    }

    #[test]
    fn test_partial_column_map() {
        let fragment =
            sql_for_partial_update(&fields(json!({ "a": 1, "b": 2 })), &[("a", "col_a")]).unwrap();
        assert_eq!(fragment.clause, r#""col_a"=$1, "b"=$2"#);
        assert_eq!(fragment.params, vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_empty_update_fails() {
        assert!(matches!(
            sql_for_partial_update(&Map::new(), &[]),
            Err(Error::EmptyUpdate)
        ));
        assert!(matches!(
            sql_for_partial_update(&Map::new(), &[("firstName", "first_name")]),
            Err(Error::EmptyUpdate)
        ));
    }

    #[test]
    fn test_falsy_values_participate() {
        let data = fields(json!({ "logoUrl": null, "numEmployees": 0, "isAdmin": false, "name": "" }));
        let fragment = sql_for_partial_update(
            &data,
            &[("logoUrl", "logo_url"), ("numEmployees", "num_employees"), ("isAdmin", "is_admin")],
        )
        .unwrap();
        assert_eq!(
            fragment.clause,
            r#""logo_url"=$1, "num_employees"=$2, "is_admin"=$3, "name"=$4"#
        );
        assert_eq!(
            fragment.params,
            vec![Value::Null, json!(0), json!(false), json!("")]
        );
        assert_eq!(fragment.next_placeholder(), 5);
    }

    #[test]
    fn test_placeholders_follow_insertion_order() {
        let mut data = Map::new();
        data.insert("zeta".to_string(), json!("z"));
        data.insert("alpha".to_string(), json!("a"));
        data.insert("mid".to_string(), json!("m"));

        let fragment = sql_for_partial_update(&data, &[]).unwrap();
        assert_eq!(fragment.clause, r#""zeta"=$1, "alpha"=$2, "mid"=$3"#);
        assert_eq!(fragment.params, vec![json!("z"), json!("a"), json!("m")]);
    }
}
