//! 인증 핸들러
//!
//! - `POST /auth/token`: `{ username, password }` → `{ token }`
//! - `POST /auth/register`: `{ username, password, firstName, lastName, email }` → `{ token }`

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use jobly_core::auth::TokenClaims;
use serde_json::{json, Value};

use super::validated;
use crate::error::Result;
use crate::models::user;
use crate::state::AppState;

pub async fn token(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let data = validated(&state.validator, body, &state.schemas.user_auth)?;
    let username = data.get("username").and_then(Value::as_str).unwrap_or_default();
    let password = data.get("password").and_then(Value::as_str).unwrap_or_default();

    let found = user::authenticate(&state.db, username, password).await?;
    let token = sign_for(&state, &found)?;
    Ok(Json(json!({ "token": token })))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>)> {
    let data = validated(&state.validator, body, &state.schemas.user_register)?;

    let created = user::register(&state.db, &data, state.config.bcrypt_cost).await?;
    let token = sign_for(&state, &created)?;
    Ok((StatusCode::CREATED, Json(json!({ "token": token }))))
}

/// 사용자 JSON(`username`, `isAdmin`)으로 토큰 발급
pub(crate) fn sign_for(state: &AppState, user: &Value) -> Result<String> {
    let claims = TokenClaims::new(
        user["username"].as_str().unwrap_or_default(),
        user["isAdmin"].as_bool().unwrap_or(false),
    );
    Ok(state.tokens.sign(&claims)?)
}
