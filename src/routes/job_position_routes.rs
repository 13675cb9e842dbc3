use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_position_dto::{CreateJobPositionPayload, JobPositionResponse},
    error::Result,
    AppState,
};

pub async fn list_job_positions(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let positions = state.job_position_service.list().await?;
    let positions: Vec<JobPositionResponse> = positions.into_iter().map(Into::into).collect();
    Ok(Json(positions))
}

pub async fn create_job_position(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPositionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let position = state.job_position_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(JobPositionResponse::from(position))))
}

pub async fn delete_job_position(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.job_position_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
