//! 채용 공고 핸들러

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use super::{query_object, validated};
use crate::auth::Principal;
use crate::error::Result;
use crate::models::job;
use crate::state::AppState;

/// `POST /jobs` (관리자)
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>)> {
    principal.require_admin()?;
    let data = validated(&state.validator, body, &state.schemas.job_new)?;

    let job = job::create(&state.db, &data).await?;
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

/// `GET /jobs?title=&minSalary=&hasEquity=`
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Value>> {
    let filters = validated(
        &state.query_validator,
        query_object(pairs),
        &state.schemas.job_search,
    )?;

    let jobs = job::find_all(&state.db, &filters).await?;
    Ok(Json(json!({ "jobs": jobs })))
}

/// `GET /jobs/:id`
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    let job = job::get(&state.db, id).await?;
    Ok(Json(json!({ "job": job })))
}

/// `PATCH /jobs/:id` (관리자)
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    principal.require_admin()?;
    let data = validated(&state.validator, body, &state.schemas.job_update)?;

    let job = job::update(&state.db, id, &data).await?;
    Ok(Json(json!({ "job": job })))
}

/// `DELETE /jobs/:id` (관리자)
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    principal.require_admin()?;

    job::remove(&state.db, id).await?;
    Ok(Json(json!({ "deleted": id })))
}
