use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::admin_dto::{DashboardStatsResponse, RecentApplication};
use crate::error::Result;
use crate::models::application::ApplicationStatus;

const RECENT_LIMIT: i64 = 5;

#[derive(Clone)]
pub struct DashboardService {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct RecentRow {
    id: Uuid,
    candidate_name: String,
    first_name: String,
    last_name: String,
    mobile: String,
    candidate_email: String,
    position_name: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every dashboard view re-issues the full count set; there is no
    /// caching layer at these volumes.
    pub async fn stats(&self) -> Result<DashboardStatsResponse> {
        let total_applications = self.count_all().await?;
        let pending_applications = self.count_status(ApplicationStatus::Pending).await?;
        let reviewing_applications = self.count_status(ApplicationStatus::Reviewing).await?;
        let accepted_applications = self.count_status(ApplicationStatus::Accepted).await?;
        let rejected_applications = self.count_status(ApplicationStatus::Rejected).await?;
        let total_admins = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;
        let recent_applications = self.recent_applications().await?;

        Ok(DashboardStatsResponse {
            total_applications,
            pending_applications,
            reviewing_applications,
            accepted_applications,
            rejected_applications,
            total_admins,
            recent_applications,
        })
    }

    async fn count_all(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_status(&self, status: ApplicationStatus) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn recent_applications(&self) -> Result<Vec<RecentApplication>> {
        let rows = sqlx::query_as::<_, RecentRow>(
            "SELECT a.id, c.name AS candidate_name, a.first_name, a.last_name, a.mobile, \
             c.email AS candidate_email, p.name AS position_name, a.status, a.created_at \
             FROM applications a \
             JOIN candidates c ON c.id = a.candidate_id \
             JOIN job_positions p ON p.id = a.job_position_id \
             ORDER BY a.created_at DESC LIMIT $1",
        )
        .bind(RECENT_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let candidate_name = if row.candidate_name.trim().is_empty() {
                    format!("{} {}", row.first_name, row.last_name)
                } else {
                    row.candidate_name
                };
                RecentApplication {
                    id: row.id,
                    candidate_name,
                    mobile: row.mobile,
                    email: row.candidate_email,
                    domain: row.position_name,
                    status: row.status,
                    created_at: row.created_at,
                }
            })
            .collect())
    }
}
