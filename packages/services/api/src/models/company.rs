//! 회사 모델

use jobly_core::Error;
use jobly_sql::tables::{company_filters, COMPANIES, JOBS};
use jobly_sql::{sql_for_partial_update, StatementBuilder};
use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::db::{fetch_all, fetch_optional};
use crate::error::Result;

use super::insert_statement;

/// 회사 생성
///
/// 같은 handle이 이미 있으면 `BadRequest`.
pub async fn create(db: &PgPool, data: &Map<String, Value>) -> Result<Value> {
    let handle = data.get("handle").cloned().unwrap_or(Value::Null);

    let sql = StatementBuilder::new(&COMPANIES).select_where(&["handle"], &["handle"], None);
    if fetch_optional(db, &COMPANIES, &sql, vec![handle.clone()]).await?.is_some() {
        return Err(Error::bad_request(format!("Duplicate company: {}", display(&handle))).into());
    }

    let (sql, params) = insert_statement(&COMPANIES, data);
    let company = fetch_optional(db, &COMPANIES, &sql, params)
        .await?
        .ok_or_else(|| crate::error::ApiError::internal("insert returned no row"))?;

    tracing::info!(handle = %display(&handle), "company created");
    Ok(company)
}

/// 회사 목록 (검색 필터 적용, 이름 순)
pub async fn find_all(db: &PgPool, filters: &Map<String, Value>) -> Result<Vec<Value>> {
    check_employee_range(filters)?;

    let filter = company_filters().build(filters)?;
    let sql = StatementBuilder::new(&COMPANIES).select(&filter);
    fetch_all(db, &COMPANIES, &sql, filter.params).await
}

/// 회사 단건 조회 (소속 채용 공고 포함)
pub async fn get(db: &PgPool, handle: &str) -> Result<Value> {
    let mut company = find(db, handle).await?;

    let sql = StatementBuilder::new(&JOBS).select_where(
        &["id", "title", "salary", "equity"],
        &["company_handle"],
        Some("id"),
    );
    let jobs = fetch_all(db, &JOBS, &sql, vec![Value::String(handle.to_string())]).await?;

    if let Value::Object(fields) = &mut company {
        fields.insert("jobs".to_string(), Value::Array(jobs));
    }
    Ok(company)
}

/// 회사 존재 확인 겸 조회
pub async fn find(db: &PgPool, handle: &str) -> Result<Value> {
    let sql = StatementBuilder::new(&COMPANIES).select_by_key();
    fetch_optional(db, &COMPANIES, &sql, vec![Value::String(handle.to_string())])
        .await?
        .ok_or_else(|| not_found(handle))
}

/// 회사 부분 업데이트
pub async fn update(db: &PgPool, handle: &str, data: &Map<String, Value>) -> Result<Value> {
    let set = sql_for_partial_update(data, COMPANIES.column_map)?;
    let sql = StatementBuilder::new(&COMPANIES).update(&set);

    let mut params = set.params;
    params.push(Value::String(handle.to_string()));

    fetch_optional(db, &COMPANIES, &sql, params)
        .await?
        .ok_or_else(|| not_found(handle))
}

/// 회사 삭제
pub async fn remove(db: &PgPool, handle: &str) -> Result<()> {
    let sql = StatementBuilder::new(&COMPANIES).delete();
    fetch_optional(db, &COMPANIES, &sql, vec![Value::String(handle.to_string())])
        .await?
        .ok_or_else(|| not_found(handle))?;

    tracing::info!(handle = %handle, "company removed");
    Ok(())
}

/// `minEmployees`가 `maxEmployees`보다 크면 `BadRequest`
fn check_employee_range(filters: &Map<String, Value>) -> Result<()> {
    let min = filters.get("minEmployees").and_then(Value::as_f64);
    let max = filters.get("maxEmployees").and_then(Value::as_f64);

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(Error::bad_request("minEmployees cannot be greater than maxEmployees").into());
        }
    }
    Ok(())
}

fn not_found(handle: &str) -> crate::error::ApiError {
    Error::not_found(format!("No company: {}", handle)).into()
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_employee_range() {
        let ok = json!({ "minEmployees": 1.0, "maxEmployees": 3.0 });
        assert!(check_employee_range(ok.as_object().unwrap()).is_ok());

        let equal = json!({ "minEmployees": 2.0, "maxEmployees": 2.0 });
        assert!(check_employee_range(equal.as_object().unwrap()).is_ok());

        let only_min = json!({ "minEmployees": 10.0 });
        assert!(check_employee_range(only_min.as_object().unwrap()).is_ok());

        let inverted = json!({ "minEmployees": 10.0, "maxEmployees": 1.0 });
        let err = check_employee_range(inverted.as_object().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::ApiError::Core(Error::BadRequest { .. })
        ));
    }

    #[test]
    fn test_not_found_message() {
        match not_found("nope") {
            crate::error::ApiError::Core(e) => {
                assert_eq!(e.status_code(), 404);
                assert_eq!(e.to_string(), "No company: nope");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
