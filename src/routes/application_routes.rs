use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use crate::{
    dto::application_dto::{ApplicationPayload, ApplicationResponse, CandidateApplicationsResponse},
    error::{Error, Result},
    services::application_service::ApplicationDetail,
    services::pdf_service::PdfService,
    utils::jwt::{Claims, ROLE_CANDIDATE},
    AppState,
};

fn check_ownership(detail: &ApplicationDetail, claims: &Claims) -> Result<()> {
    if claims.role == ROLE_CANDIDATE
        && detail.application.candidate_id != claims.principal_id()?
    {
        return Err(Error::Forbidden(
            "You do not own this application".to_string(),
        ));
    }
    Ok(())
}

pub async fn create_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ApplicationPayload>,
) -> Result<impl IntoResponse> {
    let candidate_id = claims.principal_id()?;
    let detail = state
        .application_service
        .create(candidate_id, payload)
        .await?;
    tracing::info!(application_id = %detail.application.id, "application submitted");
    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from(detail)),
    ))
}

pub async fn list_my_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let candidate_id = claims.principal_id()?;
    let details = state
        .application_service
        .list_for_candidate(candidate_id)
        .await?;
    Ok(Json(CandidateApplicationsResponse {
        applications: details.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let detail = state.application_service.get_detail(id).await?;
    check_ownership(&detail, &claims)?;
    Ok(Json(ApplicationResponse::from(detail)))
}

pub async fn update_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApplicationPayload>,
) -> Result<impl IntoResponse> {
    let existing = state.application_service.get_detail(id).await?;
    check_ownership(&existing, &claims)?;

    let detail = state.application_service.update(id, payload).await?;
    Ok(Json(ApplicationResponse::from(detail)))
}

/// Single-application document export, available to the owning
/// candidate and to admins.
pub async fn export_application_pdf(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let detail = state.application_service.get_detail(id).await?;
    check_ownership(&detail, &claims)?;

    let buffer =
        PdfService::generate_application_pdf(&detail, chrono::Utc::now().date_naive())?;
    let filename = format!(
        "application-{}-{}.pdf",
        detail.application.first_name, detail.application.last_name
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
