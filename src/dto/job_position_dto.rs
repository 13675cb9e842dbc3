use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::job_position::JobPosition;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPositionPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub ar_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobPositionResponse {
    pub id: Uuid,
    pub name: String,
    pub ar_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<JobPosition> for JobPositionResponse {
    fn from(value: JobPosition) -> Self {
        Self {
            id: value.id,
            name: value.name,
            ar_name: value.ar_name,
            created_at: value.created_at,
        }
    }
}
