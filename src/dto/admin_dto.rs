use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::admin::Admin;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAdminPayload {
    #[validate(length(min = 2))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Admin> for AdminResponse {
    fn from(value: Admin) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentApplication {
    pub id: Uuid,
    pub candidate_name: String,
    pub mobile: String,
    pub email: String,
    pub domain: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStatsResponse {
    pub total_applications: i64,
    pub pending_applications: i64,
    pub reviewing_applications: i64,
    pub accepted_applications: i64,
    pub rejected_applications: i64,
    pub total_admins: i64,
    pub recent_applications: Vec<RecentApplication>,
}
