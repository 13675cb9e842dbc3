use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Relational child of an application. The collection is replaced
/// wholesale (delete-all + recreate) on every update.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Education {
    pub id: Uuid,
    pub application_id: Uuid,
    pub education_type: String,
    pub level: Option<String>,
    pub institution: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
