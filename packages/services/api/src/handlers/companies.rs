//! 회사 핸들러

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
use crate::models::company;
use crate::state::AppState;

/// `POST /companies` (관리자)
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>)> {
    principal.require_admin()?;
    let data = validated(&state.validator, body, &state.schemas.company_new)?;

    let company = company::create(&state.db, &data).await?;
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// `GET /companies?name=&minEmployees=&maxEmployees=`
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Value>> {
    let filters = validated(
        &state.query_validator,
        query_object(pairs),
        &state.schemas.company_search,
    )?;

    let companies = company::find_all(&state.db, &filters).await?;
    Ok(Json(json!({ "companies": companies })))
}

/// `GET /companies/:handle`
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(handle): Path<String>,
) -> Result<Json<Value>> {
    let company = company::get(&state.db, &handle).await?;
    Ok(Json(json!({ "company": company })))
}

/// `PATCH /companies/:handle` (관리자)
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(handle): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    principal.require_admin()?;
    let data = validated(&state.validator, body, &state.schemas.company_update)?;

    let company = company::update(&state.db, &handle, &data).await?;
    Ok(Json(json!({ "company": company })))
}

/// `DELETE /companies/:handle` (관리자)
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(handle): Path<String>,
) -> Result<Json<Value>> {
    principal.require_admin()?;

    company::remove(&state.db, &handle).await?;
    Ok(Json(json!({ "deleted": handle })))
}
