use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthUser, LoginPayload, LoginResponse, MessageResponse, SignupPayload},
    error::Result,
    utils::jwt::{self, ROLE_CANDIDATE},
    AppState,
};

pub async fn candidate_signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.identity_service.signup_candidate(payload).await?;
    tracing::info!(candidate_id = %candidate.id, "candidate registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Account created successfully".to_string(),
        }),
    ))
}

pub async fn candidate_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.identity_service.login_candidate(payload).await?;
    let token = jwt::issue_token(candidate.id, ROLE_CANDIDATE)?;
    Ok(Json(LoginResponse {
        token,
        user: AuthUser::from_candidate(&candidate),
    }))
}

pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let admin = state.identity_service.login_admin(payload).await?;
    let token = jwt::issue_token(admin.id, &admin.role.to_lowercase())?;
    Ok(Json(LoginResponse {
        token,
        user: AuthUser::from_admin(&admin),
    }))
}
