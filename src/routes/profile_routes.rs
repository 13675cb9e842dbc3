use axum::{extract::State, response::IntoResponse, Extension, Json};
use validator::Validate;

use crate::{
    dto::auth_dto::MessageResponse,
    dto::profile_dto::{ChangePasswordPayload, ProfileResponse, UpdateProfilePayload},
    error::Result,
    utils::jwt::Claims,
    AppState,
};

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let candidate = state
        .identity_service
        .get_candidate(claims.principal_id()?)
        .await?;
    Ok(Json(ProfileResponse::from(candidate)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    let candidate = state
        .identity_service
        .update_profile(claims.principal_id()?, payload)
        .await?;
    Ok(Json(ProfileResponse::from(candidate)))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state
        .identity_service
        .change_password(claims.principal_id()?, payload)
        .await?;
    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}
