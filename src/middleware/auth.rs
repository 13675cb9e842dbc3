use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::utils::jwt::{self, ROLE_CANDIDATE};

async fn require_roles(mut req: Request, next: Next, allowed: &[&str]) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"missing_authorization"})),
        )
            .into_response();
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"bad_authorization"})),
        )
            .into_response();
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"unsupported_scheme"})),
        )
            .into_response();
    };

    match jwt::decode_token(token) {
        Ok(claims) => {
            if !allowed.is_empty()
                && !allowed.iter().any(|r| r.eq_ignore_ascii_case(&claims.role))
            {
                return (StatusCode::FORBIDDEN, Json(json!({"error":"forbidden"}))).into_response();
            }
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"invalid_token"})),
        )
            .into_response(),
    }
}

pub async fn require_candidate(req: Request, next: Next) -> Response {
    require_roles(req, next, &[ROLE_CANDIDATE]).await
}

/// Either admin rank may review applications; rank-specific rules live
/// in the handlers.
pub async fn require_admin(req: Request, next: Next) -> Response {
    require_roles(req, next, &["rh", "drh"]).await
}

pub async fn require_auth(req: Request, next: Next) -> Response {
    require_roles(req, next, &[]).await
}
