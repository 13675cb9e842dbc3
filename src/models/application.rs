use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Review lifecycle of an application. Stored as TEXT; any state may be
/// set from any state by an admin (administrative override).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewing,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Reviewing => "REVIEWING",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ApplicationStatus::Pending),
            "REVIEWING" => Ok(ApplicationStatus::Reviewing),
            "ACCEPTED" => Ok(ApplicationStatus::Accepted),
            "REJECTED" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("Unknown application status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
    pub level: String,
}

/// Aggregate root row. The five structured collections live in JSONB
/// columns and decode into typed vectors; a decode failure on any of
/// them fails the whole fetch.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_position_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub birth_certificate_number: String,
    pub birth_date: NaiveDate,
    pub wilaya_id: String,
    pub commune_id: String,
    pub photo: Option<String>,
    pub profile_image: Option<String>,
    pub cv: Option<String>,
    pub experience: Json<Vec<ExperienceEntry>>,
    pub certifications: Json<Vec<CertificationEntry>>,
    pub soft_skills: Json<Vec<SkillEntry>>,
    pub languages: Json<Vec<LanguageEntry>>,
    pub certificates: Json<Vec<String>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application row joined with the owning candidate and the targeted
/// job position, as listed on the admin side and flattened by exports.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationOverview {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_position_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub birth_certificate_number: String,
    pub birth_date: NaiveDate,
    pub wilaya_id: String,
    pub commune_id: String,
    pub photo: Option<String>,
    pub profile_image: Option<String>,
    pub cv: Option<String>,
    pub experience: Json<Vec<ExperienceEntry>>,
    pub certifications: Json<Vec<CertificationEntry>>,
    pub soft_skills: Json<Vec<SkillEntry>>,
    pub languages: Json<Vec<LanguageEntry>>,
    pub certificates: Json<Vec<String>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub candidate_name: String,
    pub candidate_email: String,
    pub position_name: String,
    pub position_ar_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in ApplicationStatus::ALL {
            let parsed: ApplicationStatus = status.as_str().parse().expect("parse back");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn status_rejects_unknown_value() {
        assert!("ARCHIVED".parse::<ApplicationStatus>().is_err());
        assert!("pending".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn experience_round_trips() {
        let entries = vec![
            ExperienceEntry {
                title: "Network Engineer".into(),
                company: "Sonatrach".into(),
                location: Some("Hassi Messaoud".into()),
                start_date: Some("2019-02-01".into()),
                end_date: None,
                description: Some("Core network maintenance".into()),
            },
            ExperienceEntry {
                title: "Intern".into(),
                company: "Djezzy".into(),
                location: None,
                start_date: None,
                end_date: None,
                description: None,
            },
        ];
        let encoded = serde_json::to_string(&entries).expect("encode");
        let decoded: Vec<ExperienceEntry> = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded, entries);
    }

    #[test]
    fn empty_collections_round_trip() {
        let encoded = serde_json::to_string(&Vec::<LanguageEntry>::new()).expect("encode");
        assert_eq!(encoded, "[]");
        let decoded: Vec<LanguageEntry> = serde_json::from_str(&encoded).expect("decode");
        assert!(decoded.is_empty());

        let encoded = serde_json::to_string(&Vec::<String>::new()).expect("encode");
        let decoded: Vec<String> = serde_json::from_str(&encoded).expect("decode");
        assert!(decoded.is_empty());
    }

    #[test]
    fn languages_round_trip() {
        let entries = vec![
            LanguageEntry {
                name: "Arabic".into(),
                level: "Native".into(),
            },
            LanguageEntry {
                name: "French".into(),
                level: "Fluent".into(),
            },
        ];
        let encoded = serde_json::to_value(&entries).expect("encode");
        let decoded: Vec<LanguageEntry> = serde_json::from_value(encoded).expect("decode");
        assert_eq!(decoded, entries);
    }
}
