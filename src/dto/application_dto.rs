use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::application::{
    Application, ApplicationOverview, CertificationEntry, ExperienceEntry, LanguageEntry,
    SkillEntry,
};
use crate::models::education::Education;
use crate::models::job_position::JobPosition;
use crate::services::application_service::{ApplicationDetail, ApplicationPage};

/// Full-replacement submission shape, shared by create and update.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationPayload {
    pub job_position_id: Option<Uuid>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile: Option<String>,
    pub birth_certificate_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub wilaya_id: Option<String>,
    pub commune_id: Option<String>,
    pub photo: Option<String>,
    pub profile_image: Option<String>,
    pub cv: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub soft_skills: Vec<SkillEntry>,
    pub languages: Vec<LanguageEntry>,
    pub certificates: Vec<String>,
    pub educations: Vec<EducationInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationInput {
    pub education_type: String,
    pub level: Option<String>,
    pub institution: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_active: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResponse {
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
    pub experience: Vec<ExperienceEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub soft_skills: Vec<SkillEntry>,
    pub languages: Vec<LanguageEntry>,
    pub certificates: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub job_position: JobPositionBrief,
    pub educations: Vec<Education>,
    pub candidate: Option<CandidateSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobPositionBrief {
    pub id: Uuid,
    pub name: String,
    pub ar_name: String,
}

impl From<JobPosition> for JobPositionBrief {
    fn from(value: JobPosition) -> Self {
        Self {
            id: value.id,
            name: value.name,
            ar_name: value.ar_name,
        }
    }
}

impl From<ApplicationDetail> for ApplicationResponse {
    fn from(value: ApplicationDetail) -> Self {
        let Application {
            id,
            candidate_id,
            job_position_id,
            first_name,
            last_name,
            mobile,
            birth_certificate_number,
            birth_date,
            wilaya_id,
            commune_id,
            photo,
            profile_image,
            cv,
            experience,
            certifications,
            soft_skills,
            languages,
            certificates,
            status,
            created_at,
            updated_at,
        } = value.application;

        Self {
            id,
            candidate_id,
            job_position_id,
            first_name,
            last_name,
            mobile,
            birth_certificate_number,
            birth_date,
            wilaya_id,
            commune_id,
            photo,
            profile_image,
            cv,
            experience: experience.0,
            certifications: certifications.0,
            soft_skills: soft_skills.0,
            languages: languages.0,
            certificates: certificates.0,
            status,
            created_at,
            updated_at,
            job_position: value.job_position.into(),
            educations: value.educations,
            candidate: value.candidate,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateApplicationsResponse {
    pub applications: Vec<ApplicationResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminApplicationItem {
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
    pub experience: Vec<ExperienceEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub soft_skills: Vec<SkillEntry>,
    pub languages: Vec<LanguageEntry>,
    pub certificates: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub candidate: CandidateSummary,
    pub job_position: JobPositionName,
    pub educations: Vec<Education>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobPositionName {
    pub name: String,
    pub ar_name: String,
}

impl From<(ApplicationOverview, Vec<Education>)> for AdminApplicationItem {
    fn from((row, educations): (ApplicationOverview, Vec<Education>)) -> Self {
        Self {
            id: row.id,
            candidate_id: row.candidate_id,
            job_position_id: row.job_position_id,
            first_name: row.first_name,
            last_name: row.last_name,
            mobile: row.mobile,
            birth_certificate_number: row.birth_certificate_number,
            birth_date: row.birth_date,
            wilaya_id: row.wilaya_id,
            commune_id: row.commune_id,
            photo: row.photo,
            profile_image: row.profile_image,
            cv: row.cv,
            experience: row.experience.0,
            certifications: row.certifications.0,
            soft_skills: row.soft_skills.0,
            languages: row.languages.0,
            certificates: row.certificates.0,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            candidate: CandidateSummary {
                name: row.candidate_name,
                email: row.candidate_email,
            },
            job_position: JobPositionName {
                name: row.position_name,
                ar_name: row.position_ar_name,
            },
            educations,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminApplicationListResponse {
    pub items: Vec<AdminApplicationItem>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl From<ApplicationPage> for AdminApplicationListResponse {
    fn from(value: ApplicationPage) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdminApplicationQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub job_position_id: Option<Uuid>,
    pub wilaya_id: Option<String>,
    pub status: Option<String>,
    pub age_range: Option<String>,
    pub date_range: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StatusUpdatePayload {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCountsResponse {
    pub pending: i64,
    pub reviewing: i64,
    pub accepted: i64,
    pub rejected: i64,
}
