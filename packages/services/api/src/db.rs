//! SQL 실행 헬퍼
//!
//! 빌더가 만든 SQL에 JSON 파라미터를 위치 순서대로 바인딩하고, 결과 행을 JSON으로 변환합니다.

use jobly_sql::TableDef;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use sqlx::postgres::{PgArguments, PgPool, PgRow};
use sqlx::query::Query;
use sqlx::{Column, Postgres, Row, TypeInfo};

use crate::error::Result;

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// 테이블이 없으면 생성
pub async fn ensure_schema(db: &PgPool) -> anyhow::Result<()> {
    let queries = [
        r#"CREATE TABLE IF NOT EXISTS companies (
            handle VARCHAR(25) PRIMARY KEY CHECK (handle = lower(handle)),
            name TEXT UNIQUE NOT NULL,
            num_employees INTEGER CHECK (num_employees >= 0),
            description TEXT NOT NULL,
            logo_url TEXT
        )"#,
        r#"CREATE TABLE IF NOT EXISTS jobs (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            salary INTEGER CHECK (salary >= 0),
            equity NUMERIC CHECK (equity <= 1.0),
            company_handle VARCHAR(25) NOT NULL REFERENCES companies ON DELETE CASCADE
        )"#,
        r#"CREATE TABLE IF NOT EXISTS users (
            username VARCHAR(30) PRIMARY KEY,
            password TEXT NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL CHECK (position('@' IN email) > 1),
            is_admin BOOLEAN NOT NULL DEFAULT FALSE
        )"#,
        r#"CREATE TABLE IF NOT EXISTS applications (
            username VARCHAR(30) REFERENCES users ON DELETE CASCADE,
            job_id INTEGER REFERENCES jobs ON DELETE CASCADE,
            PRIMARY KEY (username, job_id)
        )"#,
    ];
    for q in queries {
        sqlx::query(q).execute(db).await?;
    }
    Ok(())
}

/// 여러 행 조회
pub async fn fetch_all(
    db: &PgPool,
    table: &TableDef,
    sql: &str,
    params: Vec<Value>,
) -> Result<Vec<Value>> {
    tracing::debug!(sql = %sql, params = params.len(), "fetch_all");
    let rows = bind_values(sqlx::query(sql), params).fetch_all(db).await?;
    Ok(rows.iter().map(|row| row_to_json(row, table)).collect())
}

/// 단건 조회 (없으면 `None`)
pub async fn fetch_optional(
    db: &PgPool,
    table: &TableDef,
    sql: &str,
    params: Vec<Value>,
) -> Result<Option<Value>> {
    tracing::debug!(sql = %sql, params = params.len(), "fetch_optional");
    let row = bind_values(sqlx::query(sql), params)
        .fetch_optional(db)
        .await?;
    Ok(row.map(|row| row_to_json(&row, table)))
}

fn bind_values(mut query: PgQuery<'_>, values: Vec<Value>) -> PgQuery<'_> {
    for value in values {
        match value {
            Value::Null => {
                let v: Option<String> = None;
                query = query.bind(v);
            }
            Value::Bool(b) => query = query.bind(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    query = query.bind(i);
                } else if let Some(f) = n.as_f64() {
                    query = query.bind(f);
                } else {
                    query = query.bind(n.to_string());
                }
            }
            Value::String(s) => query = query.bind(s),
            Value::Array(_) | Value::Object(_) => {
                query = query.bind(sqlx::types::Json(value));
            }
        }
    }
    query
}

/// 행 → JSON 객체
///
/// 컬럼 이름은 테이블의 논리 필드 이름(camelCase)으로 바꿉니다.
/// NUMERIC은 정밀도 손실 없이 문자열로 내보냅니다.
fn row_to_json(row: &PgRow, table: &TableDef) -> Value {
    let mut obj = Map::new();
    for column in row.columns() {
        let name = column.name();
        let type_name = column.type_info().name().to_ascii_uppercase();
        let value = match type_name.as_str() {
            "INT2" | "SMALLINT" => row
                .try_get::<Option<i16>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::Number(v.into())),
            "INT4" | "INTEGER" => row
                .try_get::<Option<i32>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::Number(v.into())),
            "INT8" | "BIGINT" => row
                .try_get::<Option<i64>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::Number(v.into())),
            "FLOAT4" | "FLOAT8" | "DOUBLE PRECISION" => row
                .try_get::<Option<f64>, _>(name)
                .ok()
                .flatten()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            "NUMERIC" => row
                .try_get::<Option<Decimal>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.to_string())),
            "BOOL" | "BOOLEAN" => row
                .try_get::<Option<bool>, _>(name)
                .ok()
                .flatten()
                .map(Value::Bool),
            "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(name).ok().flatten(),
            _ => row
                .try_get::<Option<String>, _>(name)
                .ok()
                .flatten()
                .map(Value::String),
        }
        .unwrap_or(Value::Null);

        obj.insert(table.field_for(name).to_string(), value);
    }
    Value::Object(obj)
}
