use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPosition {
    pub id: Uuid,
    pub name: String,
    pub ar_name: String,
    pub created_at: DateTime<Utc>,
}
