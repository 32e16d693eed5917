//! 사용자 핸들러
//!
//! 목록/생성은 관리자만, 단건 조회/수정/삭제/지원은 관리자 또는 본인만 허용합니다.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use super::auth::sign_for;
use super::validated;
use crate::auth::Principal;
use crate::error::Result;
use crate::models::user;
use crate::state::AppState;

/// `POST /users` (관리자): 관리자 계정도 만들 수 있으며 새 사용자의 토큰을 함께 반환
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>)> {
    principal.require_admin()?;
    let data = validated(&state.validator, body, &state.schemas.user_new)?;

    let created = user::register(&state.db, &data, state.config.bcrypt_cost).await?;
    let token = sign_for(&state, &created)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "user": created, "token": token })),
    ))
}

/// `GET /users` (관리자)
pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>> {
    principal.require_admin()?;

    let users = user::find_all(&state.db).await?;
    Ok(Json(json!({ "users": users })))
}

/// `GET /users/:username`
pub async fn get(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(username): Path<String>,
) -> Result<Json<Value>> {
    principal.require_admin_or_user(&username)?;

    let user = user::get(&state.db, &username).await?;
    Ok(Json(json!({ "user": user })))
}

/// `PATCH /users/:username`
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(username): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    principal.require_admin_or_user(&username)?;
    let data = validated(&state.validator, body, &state.schemas.user_update)?;

    let user = user::update(&state.db, &username, &data, state.config.bcrypt_cost).await?;
    Ok(Json(json!({ "user": user })))
}

/// `DELETE /users/:username`
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(username): Path<String>,
) -> Result<Json<Value>> {
    principal.require_admin_or_user(&username)?;

    user::remove(&state.db, &username).await?;
    Ok(Json(json!({ "deleted": username })))
}

/// `POST /users/:username/jobs/:id`
pub async fn apply(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path((username, id)): Path<(String, i64)>,
) -> Result<(StatusCode, Json<Value>)> {
    principal.require_admin_or_user(&username)?;

    let job_id = user::apply(&state.db, &username, id).await?;
    Ok((StatusCode::CREATED, Json(json!({ "applied": job_id }))))
}
