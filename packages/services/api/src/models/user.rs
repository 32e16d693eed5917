//! 사용자 모델
//!
//! 비밀번호 컬럼은 인증 조회에서만 읽고, 응답에는 포함하지 않습니다.

use std::collections::HashMap;

use jobly_core::Error;
use jobly_sql::tables::{APPLICATIONS, USERS};
use jobly_sql::{sql_for_partial_update, SqlFragment, StatementBuilder};
use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::auth::{hash_password, verify_password};
use crate::db::{fetch_all, fetch_optional};
use crate::error::{ApiError, Result};

use super::{insert_statement, job};

/// 사용자 이름/비밀번호 인증
///
/// 사용자가 없거나 비밀번호가 틀리면 같은 `Unauthorized`를 반환합니다.
pub async fn authenticate(db: &PgPool, username: &str, password: &str) -> Result<Value> {
    let mut columns = vec!["password"];
    columns.extend_from_slice(USERS.columns);
    let sql = StatementBuilder::new(&USERS).select_where(&columns, &["username"], None);

    let found = fetch_optional(db, &USERS, &sql, vec![Value::String(username.to_string())]).await?;

    if let Some(Value::Object(mut user)) = found {
        let hash = match user.remove("password") {
            Some(Value::String(hash)) => hash,
            _ => String::new(),
        };
        if verify_password(password.to_string(), hash).await? {
            return Ok(Value::Object(user));
        }
    }

    Err(Error::unauthorized("Invalid username/password").into())
}

/// 사용자 등록
///
/// 같은 username이 있으면 `BadRequest`. `isAdmin`이 없으면 `false`로 저장합니다.
pub async fn register(db: &PgPool, data: &Map<String, Value>, bcrypt_cost: u32) -> Result<Value> {
    let username = data
        .get("username")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let sql = StatementBuilder::new(&USERS).select_where(&["username"], &["username"], None);
    if fetch_optional(db, &USERS, &sql, vec![Value::String(username.clone())])
        .await?
        .is_some()
    {
        return Err(Error::bad_request(format!("Duplicate username: {}", username)).into());
    }

    let mut row = data.clone();
    hash_password_field(&mut row, bcrypt_cost).await?;
    row.entry("isAdmin").or_insert(Value::Bool(false));

    let (sql, params) = insert_statement(&USERS, &row);
    let user = fetch_optional(db, &USERS, &sql, params)
        .await?
        .ok_or_else(|| ApiError::internal("insert returned no row"))?;

    tracing::info!(username = %username, "user registered");
    Ok(user)
}

/// 사용자 목록 (username 순, 각 사용자가 지원한 채용 공고 id 포함)
pub async fn find_all(db: &PgPool) -> Result<Vec<Value>> {
    let sql = StatementBuilder::new(&USERS).select(&SqlFragment::empty());
    let users = fetch_all(db, &USERS, &sql, Vec::new()).await?;

    let sql = StatementBuilder::new(&APPLICATIONS).select_where(&["username", "job_id"], &[], Some("job_id"));
    let applications = fetch_all(db, &APPLICATIONS, &sql, Vec::new()).await?;
    let mut jobs_by_user = group_job_ids(applications);

    Ok(users
        .into_iter()
        .map(|mut user| {
            let jobs = user
                .get("username")
                .and_then(Value::as_str)
                .and_then(|username| jobs_by_user.remove(username))
                .unwrap_or_default();
            if let Value::Object(fields) = &mut user {
                fields.insert("jobs".to_string(), Value::Array(jobs));
            }
            user
        })
        .collect())
}

/// 사용자 단건 조회 (지원한 채용 공고 id 포함)
pub async fn get(db: &PgPool, username: &str) -> Result<Value> {
    let mut user = find(db, username).await?;

    let sql = StatementBuilder::new(&APPLICATIONS).select_where(&["job_id"], &["username"], Some("job_id"));
    let applications =
        fetch_all(db, &APPLICATIONS, &sql, vec![Value::String(username.to_string())]).await?;
    let jobs: Vec<Value> = applications
        .into_iter()
        .filter_map(|mut row| row.get_mut("jobId").map(Value::take))
        .collect();

    if let Value::Object(fields) = &mut user {
        fields.insert("jobs".to_string(), Value::Array(jobs));
    }
    Ok(user)
}

/// 사용자 부분 업데이트
///
/// `password`가 있으면 해시한 뒤 저장합니다.
pub async fn update(
    db: &PgPool,
    username: &str,
    data: &Map<String, Value>,
    bcrypt_cost: u32,
) -> Result<Value> {
    let mut data = data.clone();
    hash_password_field(&mut data, bcrypt_cost).await?;

    let set = sql_for_partial_update(&data, USERS.column_map)?;
    let sql = StatementBuilder::new(&USERS).update(&set);

    let mut params = set.params;
    params.push(Value::String(username.to_string()));

    fetch_optional(db, &USERS, &sql, params)
        .await?
        .ok_or_else(|| not_found(username))
}

/// 사용자 삭제
pub async fn remove(db: &PgPool, username: &str) -> Result<()> {
    let sql = StatementBuilder::new(&USERS).delete();
    fetch_optional(db, &USERS, &sql, vec![Value::String(username.to_string())])
        .await?
        .ok_or_else(|| not_found(username))?;

    tracing::info!(username = %username, "user removed");
    Ok(())
}

/// 채용 공고 지원
///
/// 사용자나 공고가 없으면 `NotFound`, 이미 지원했으면 `BadRequest`.
pub async fn apply(db: &PgPool, username: &str, job_id: i64) -> Result<i64> {
    find(db, username).await?;
    job::get(db, job_id).await?;

    let params = vec![Value::String(username.to_string()), Value::from(job_id)];

    let sql = StatementBuilder::new(&APPLICATIONS).select_where(
        &["username", "job_id"],
        &["username", "job_id"],
        None,
    );
    if fetch_optional(db, &APPLICATIONS, &sql, params.clone()).await?.is_some() {
        return Err(Error::bad_request(format!(
            "User '{}' has already applied to job {}",
            username, job_id
        ))
        .into());
    }

    let sql = StatementBuilder::new(&APPLICATIONS).insert(&["username", "job_id"]);
    fetch_optional(db, &APPLICATIONS, &sql, params)
        .await?
        .ok_or_else(|| ApiError::internal("insert returned no row"))?;

    tracing::info!(username = %username, job_id = job_id, "application created");
    Ok(job_id)
}

async fn find(db: &PgPool, username: &str) -> Result<Value> {
    let sql = StatementBuilder::new(&USERS).select_by_key();
    fetch_optional(db, &USERS, &sql, vec![Value::String(username.to_string())])
        .await?
        .ok_or_else(|| not_found(username))
}

async fn hash_password_field(data: &mut Map<String, Value>, bcrypt_cost: u32) -> Result<()> {
    if let Some(Value::String(password)) = data.get("password") {
        let hash = hash_password(password.clone(), bcrypt_cost).await?;
        data.insert("password".to_string(), Value::String(hash));
    }
    Ok(())
}

/// 지원 행(`{username, jobId}`)을 사용자별 job id 목록으로 묶음
fn group_job_ids(applications: Vec<Value>) -> HashMap<String, Vec<Value>> {
    let mut grouped: HashMap<String, Vec<Value>> = HashMap::new();
    for row in applications {
        if let (Some(username), Some(job_id)) = (row.get("username").and_then(Value::as_str), row.get("jobId")) {
            grouped
                .entry(username.to_string())
                .or_default()
                .push(job_id.clone());
        }
    }
    grouped
}

fn not_found(username: &str) -> ApiError {
    Error::not_found(format!("No user: {}", username)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_job_ids() {
        let rows = vec![
            json!({ "username": "u1", "jobId": 1 }),
            json!({ "username": "u2", "jobId": 2 }),
            json!({ "username": "u1", "jobId": 3 }),
        ];
        let grouped = group_job_ids(rows);
        assert_eq!(grouped["u1"], vec![json!(1), json!(3)]);
        assert_eq!(grouped["u2"], vec![json!(2)]);
        assert!(!grouped.contains_key("u3"));
    }

    #[tokio::test]
    async fn test_hash_password_field() {
        let mut data = json!({ "firstName": "New", "password": "new-password" })
            .as_object()
            .cloned()
            .unwrap();
        hash_password_field(&mut data, 4).await.unwrap();

        let hash = data["password"].as_str().unwrap();
        assert!(hash.starts_with("$2"));
        assert_eq!(data["firstName"], json!("New"));
        // 필드 순서 유지
        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["firstName", "password"]);
    }

    #[tokio::test]
    async fn test_hash_password_field_without_password() {
        let mut data = json!({ "email": "a@b.com" }).as_object().cloned().unwrap();
        hash_password_field(&mut data, 4).await.unwrap();
        assert_eq!(data, json!({ "email": "a@b.com" }).as_object().cloned().unwrap());
    }
}
