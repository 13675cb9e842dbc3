use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::candidate::Candidate;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub completion_percentage: u8,
}

impl From<Candidate> for ProfileResponse {
    fn from(value: Candidate) -> Self {
        let completion_percentage = completion_percentage(&value);
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            address: value.address,
            completion_percentage,
        }
    }
}

/// Share of the four profile fields (name, email, phone, address) that
/// carry a non-empty value.
fn completion_percentage(candidate: &Candidate) -> u8 {
    let filled = [
        Some(candidate.name.as_str()),
        Some(candidate.email.as_str()),
        candidate.phone.as_deref(),
        candidate.address.as_deref(),
    ]
    .into_iter()
    .filter(|f| f.map(|v| !v.trim().is_empty()).unwrap_or(false))
    .count();

    ((filled as f64 / 4.0) * 100.0).round() as u8
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UpdateProfilePayload {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordPayload {
    pub current_password: String,
    #[validate(length(min = 6, message = "New password must be at least 6 characters long"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn candidate(phone: Option<&str>, address: Option<&str>) -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            name: "Amine".into(),
            email: "amine@example.com".into(),
            password_hash: "x".into(),
            phone: phone.map(Into::into),
            address: address.map(Into::into),
            status: "ACTIVE".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn completion_counts_non_empty_fields() {
        assert_eq!(
            ProfileResponse::from(candidate(None, None)).completion_percentage,
            50
        );
        assert_eq!(
            ProfileResponse::from(candidate(Some("0550 12 34 56"), None)).completion_percentage,
            75
        );
        assert_eq!(
            ProfileResponse::from(candidate(Some("0550 12 34 56"), Some("Alger centre")))
                .completion_percentage,
            100
        );
        assert_eq!(
            ProfileResponse::from(candidate(Some("  "), None)).completion_percentage,
            50
        );
    }
}
