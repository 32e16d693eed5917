//! API 미들웨어
//!
//! 요청 ID 부여와 토큰 인증을 처리합니다.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use jobly_core::auth::bearer_token;
use uuid::Uuid;

use crate::auth::Principal;
use crate::state::AppState;

tokio::task_local! {
    static REQUEST_ID: String;
}

pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

pub async fn request_id(req: Request, next: Next) -> Response {
    let id = Uuid::new_v4().to_string();
    let mut resp = REQUEST_ID.scope(id.clone(), async move { next.run(req).await }).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        resp.headers_mut().insert("x-request-id", value);
    }
    resp
}

/// Bearer 토큰을 검증해 `Principal`을 요청 extension에 넣습니다.
///
/// 토큰이 없거나 유효하지 않으면 익명으로 취급하고, 거절은 각 핸들러의 권한 검사에 맡깁니다.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let principal = match bearer_token(auth_header) {
        Some(token) => match state.tokens.verify(token) {
            Ok(claims) => Principal::User(claims),
            Err(e) => {
                tracing::debug!("ignoring invalid token: {}", e);
                Principal::Anonymous
            }
        },
        None => Principal::Anonymous,
    };

    req.extensions_mut().insert(principal);
    next.run(req).await
}
