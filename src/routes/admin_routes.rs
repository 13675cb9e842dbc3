use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::admin_dto::{AdminResponse, CreateAdminPayload},
    dto::application_dto::{
        AdminApplicationListResponse, AdminApplicationQuery, ApplicationResponse,
        StatusUpdatePayload,
    },
    error::{Error, Result},
    models::application::ApplicationStatus,
    AppState,
};

pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<AdminApplicationQuery>,
) -> Result<impl IntoResponse> {
    let page = state.application_service.admin_list(query).await?;
    Ok(Json(AdminApplicationListResponse::from(page)))
}

pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusUpdatePayload>,
) -> Result<impl IntoResponse> {
    let status = payload
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::BadRequest("Application status is required".to_string()))?;
    let status: ApplicationStatus = status.parse().map_err(Error::BadRequest)?;

    let application = state.application_service.update_status(id, status).await?;
    tracing::info!(application_id = %id, status = %status, "application status changed");

    let detail = state.application_service.get_detail(application.id).await?;
    Ok(Json(ApplicationResponse::from(detail)))
}

pub async fn application_counts(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let counts = state.application_service.status_counts().await?;
    Ok(Json(counts))
}

pub async fn dashboard_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.dashboard_service.stats().await?;
    Ok(Json(stats))
}

pub async fn list_admins(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let admins = state.identity_service.list_admins().await?;
    let admins: Vec<AdminResponse> = admins.into_iter().map(Into::into).collect();
    Ok(Json(admins))
}

pub async fn create_admin(
    State(state): State<AppState>,
    Json(payload): Json<CreateAdminPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let admin = state.identity_service.create_admin(payload).await?;
    Ok((StatusCode::CREATED, Json(AdminResponse::from(admin))))
}
