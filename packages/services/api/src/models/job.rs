//! 채용 공고 모델

use jobly_core::Error;
use jobly_sql::tables::{job_filters, JOBS};
use jobly_sql::{sql_for_partial_update, StatementBuilder};
use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::db::{fetch_all, fetch_optional};
use crate::error::{ApiError, Result};

use super::{company, insert_statement};

/// 채용 공고 생성
///
/// `companyHandle`이 가리키는 회사가 없으면 `NotFound`.
pub async fn create(db: &PgPool, data: &Map<String, Value>) -> Result<Value> {
    if let Some(handle) = data.get("companyHandle").and_then(Value::as_str) {
        company::find(db, handle).await?;
    }

    let (sql, params) = insert_statement(&JOBS, data);
    let job = fetch_optional(db, &JOBS, &sql, params)
        .await?
        .ok_or_else(|| ApiError::internal("insert returned no row"))?;

    tracing::info!(id = %job["id"], "job created");
    Ok(job)
}

/// 채용 공고 목록 (검색 필터 적용, 제목 순)
pub async fn find_all(db: &PgPool, filters: &Map<String, Value>) -> Result<Vec<Value>> {
    let filter = job_filters().build(filters)?;
    let sql = StatementBuilder::new(&JOBS).select(&filter);
    fetch_all(db, &JOBS, &sql, filter.params).await
}

/// 채용 공고 단건 조회
pub async fn get(db: &PgPool, id: i64) -> Result<Value> {
    let sql = StatementBuilder::new(&JOBS).select_by_key();
    fetch_optional(db, &JOBS, &sql, vec![Value::from(id)])
        .await?
        .ok_or_else(|| not_found(id))
}

/// 채용 공고 부분 업데이트
pub async fn update(db: &PgPool, id: i64, data: &Map<String, Value>) -> Result<Value> {
    let set = sql_for_partial_update(data, JOBS.column_map)?;
    let sql = StatementBuilder::new(&JOBS).update(&set);

    let mut params = set.params;
    params.push(Value::from(id));

    fetch_optional(db, &JOBS, &sql, params)
        .await?
        .ok_or_else(|| not_found(id))
}

/// 채용 공고 삭제
pub async fn remove(db: &PgPool, id: i64) -> Result<()> {
    let sql = StatementBuilder::new(&JOBS).delete();
    fetch_optional(db, &JOBS, &sql, vec![Value::from(id)])
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(id = id, "job removed");
    Ok(())
}

pub(crate) fn not_found(id: i64) -> ApiError {
    Error::not_found(format!("No job: {}", id)).into()
}
