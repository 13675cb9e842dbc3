use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::job_position_dto::CreateJobPositionPayload;
use crate::error::{Error, Result};
use crate::models::job_position::JobPosition;

const COLUMNS: &str = "id, name, ar_name, created_at";

#[derive(Clone)]
pub struct JobPositionService {
    pool: PgPool,
}

impl JobPositionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<JobPosition>> {
        let sql = format!("SELECT {} FROM job_positions ORDER BY name ASC", COLUMNS);
        let positions = sqlx::query_as::<_, JobPosition>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(positions)
    }

    pub async fn create(&self, payload: CreateJobPositionPayload) -> Result<JobPosition> {
        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM job_positions WHERE name = $1 OR ar_name = $2")
                .bind(&payload.name)
                .bind(&payload.ar_name)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(Error::Conflict(
                "A job position with this name already exists".to_string(),
            ));
        }

        let sql = format!(
            "INSERT INTO job_positions (name, ar_name) VALUES ($1, $2) RETURNING {}",
            COLUMNS
        );
        let position = sqlx::query_as::<_, JobPosition>(&sql)
            .bind(&payload.name)
            .bind(&payload.ar_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(position)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM job_positions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_none() {
            return Err(Error::NotFound("Job position not found".to_string()));
        }

        sqlx::query("DELETE FROM job_positions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
