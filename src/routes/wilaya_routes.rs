use axum::{response::IntoResponse, Json};

use crate::models::wilaya::WILAYAS;

pub async fn list_wilayas() -> impl IntoResponse {
    Json(WILAYAS)
}
