use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::{
    dto::application_dto::AdminApplicationQuery, error::Result,
    services::export_service::ExportService, AppState,
};

/// Export the filtered application set as CSV.
pub async fn export_applications_csv(
    State(state): State<AppState>,
    Query(query): Query<AdminApplicationQuery>,
) -> Result<impl IntoResponse> {
    let records = state.application_service.list_filtered(query).await?;
    let buffer =
        ExportService::generate_applications_csv(&records, chrono::Utc::now().date_naive())?;

    let filename = format!(
        "applications_export_{}.csv",
        chrono::Utc::now().format("%Y%m%d_%H%M")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}

/// Export the filtered application set as a styled XLSX workbook.
pub async fn export_applications_xlsx(
    State(state): State<AppState>,
    Query(query): Query<AdminApplicationQuery>,
) -> Result<impl IntoResponse> {
    let records = state.application_service.list_filtered(query).await?;
    let buffer =
        ExportService::generate_applications_xlsx(&records, chrono::Utc::now().date_naive())?;

    let filename = format!(
        "applications_export_{}.xlsx",
        chrono::Utc::now().format("%Y%m%d_%H%M")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
