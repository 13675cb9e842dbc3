use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::dto::application_dto::{
    AdminApplicationQuery, ApplicationPayload, CandidateSummary, EducationInput,
    StatusCountsResponse,
};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationOverview, ApplicationStatus};
use crate::models::education::Education;
use crate::models::job_position::JobPosition;

const APP_COLUMNS: &str = "id, candidate_id, job_position_id, first_name, last_name, mobile, \
     birth_certificate_number, birth_date, wilaya_id, commune_id, photo, profile_image, cv, \
     experience, certifications, soft_skills, languages, certificates, status, created_at, \
     updated_at";

const OVERVIEW_COLUMNS: &str = "a.id, a.candidate_id, a.job_position_id, a.first_name, \
     a.last_name, a.mobile, a.birth_certificate_number, a.birth_date, a.wilaya_id, a.commune_id, \
     a.photo, a.profile_image, a.cv, a.experience, a.certifications, a.soft_skills, a.languages, \
     a.certificates, a.status, a.created_at, a.updated_at, \
     c.name AS candidate_name, c.email AS candidate_email, \
     p.name AS position_name, p.ar_name AS position_ar_name";

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

pub struct ApplicationDetail {
    pub application: Application,
    pub job_position: JobPosition,
    pub educations: Vec<Education>,
    pub candidate: Option<CandidateSummary>,
}

pub struct ApplicationPage {
    pub items: Vec<(ApplicationOverview, Vec<Education>)>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Bind {
    Id(Uuid),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

/// Translates the optional admin filters into AND-combined WHERE
/// fragments with positional binds. Malformed age brackets and unknown
/// date buckets contribute no predicate; an unknown status is a caller
/// error.
pub(crate) fn build_filters(
    query: &AdminApplicationQuery,
    now: DateTime<Utc>,
) -> Result<(Vec<String>, Vec<Bind>)> {
    let mut fragments = Vec::new();
    let mut binds = Vec::new();

    if let Some(position_id) = query.job_position_id {
        fragments.push(format!("a.job_position_id = ${}", binds.len() + 1));
        binds.push(Bind::Id(position_id));
    }

    if let Some(wilaya_id) = query.wilaya_id.as_deref().filter(|w| !w.is_empty()) {
        fragments.push(format!("a.wilaya_id = ${}", binds.len() + 1));
        binds.push(Bind::Text(wilaya_id.to_string()));
    }

    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        let status: ApplicationStatus = status.parse().map_err(Error::BadRequest)?;
        fragments.push(format!("a.status = ${}", binds.len() + 1));
        binds.push(Bind::Text(status.as_str().to_string()));
    }

    if let Some(bracket) = query.age_range.as_deref() {
        if let Some(range) = crate::utils::time::age_bracket_range(bracket, now.date_naive()) {
            if let Some(after) = range.after {
                fragments.push(format!("a.birth_date > ${}", binds.len() + 1));
                binds.push(Bind::Date(after));
            }
            fragments.push(format!("a.birth_date <= ${}", binds.len() + 1));
            binds.push(Bind::Date(range.until));
        }
    }

    if let Some(bucket) = query.date_range.as_deref() {
        if let Some((start, end)) = crate::utils::time::date_bucket_range(bucket, now) {
            fragments.push(format!("a.created_at >= ${}", binds.len() + 1));
            binds.push(Bind::Timestamp(start));
            fragments.push(format!("a.created_at < ${}", binds.len() + 1));
            binds.push(Bind::Timestamp(end));
        }
    }

    Ok((fragments, binds))
}

fn where_clause(fragments: &[String]) -> String {
    if fragments.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", fragments.join(" AND "))
    }
}

/// Fields that must carry a non-empty value on every submission.
fn validate_required(payload: &ApplicationPayload) -> Result<()> {
    fn present(value: &Option<String>) -> bool {
        value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
    }

    let missing = [
        ("job_position_id", payload.job_position_id.is_some()),
        ("first_name", present(&payload.first_name)),
        ("last_name", present(&payload.last_name)),
        ("mobile", present(&payload.mobile)),
        (
            "birth_certificate_number",
            present(&payload.birth_certificate_number),
        ),
        ("birth_date", payload.birth_date.is_some()),
        ("wilaya_id", present(&payload.wilaya_id)),
        ("commune_id", present(&payload.commune_id)),
    ]
    .into_iter()
    .find(|(_, ok)| !*ok);

    if let Some((field, _)) = missing {
        return Err(Error::BadRequest(format!(
            "Missing required field: {}",
            field
        )));
    }
    Ok(())
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        candidate_id: Uuid,
        payload: ApplicationPayload,
    ) -> Result<ApplicationDetail> {
        validate_required(&payload)?;

        let pending: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM applications WHERE candidate_id = $1 AND status = 'PENDING' LIMIT 1",
        )
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?;
        if pending.is_some() {
            return Err(Error::Conflict(
                "You already have a pending application. Please wait for the current application \
                 to be processed."
                    .to_string(),
            ));
        }

        let job_position_id = payload.job_position_id.ok_or_else(|| {
            Error::BadRequest("Missing required field: job_position_id".to_string())
        })?;
        self.get_job_position(job_position_id).await?;

        let sql = format!(
            "INSERT INTO applications (candidate_id, job_position_id, first_name, last_name, \
             mobile, birth_certificate_number, birth_date, wilaya_id, commune_id, photo, \
             profile_image, cv, experience, certifications, soft_skills, languages, certificates, \
             status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
             'PENDING') \
             RETURNING {}",
            APP_COLUMNS
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(candidate_id)
            .bind(job_position_id)
            .bind(payload.first_name)
            .bind(payload.last_name)
            .bind(payload.mobile)
            .bind(payload.birth_certificate_number)
            .bind(payload.birth_date)
            .bind(payload.wilaya_id)
            .bind(payload.commune_id)
            .bind(payload.photo)
            .bind(payload.profile_image)
            .bind(payload.cv)
            .bind(Json(payload.experience))
            .bind(Json(payload.certifications))
            .bind(Json(payload.soft_skills))
            .bind(Json(payload.languages))
            .bind(Json(payload.certificates))
            .fetch_one(&self.pool)
            .await?;

        self.insert_educations(application.id, &payload.educations)
            .await?;

        self.get_detail(application.id).await
    }

    pub async fn get_detail(&self, id: Uuid) -> Result<ApplicationDetail> {
        let sql = format!("SELECT {} FROM applications WHERE id = $1", APP_COLUMNS);
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        let job_position = self.get_job_position(application.job_position_id).await?;
        let educations = self.get_educations(application.id).await?;
        let candidate: Option<(String, String)> =
            sqlx::query_as("SELECT name, email FROM candidates WHERE id = $1")
                .bind(application.candidate_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(ApplicationDetail {
            application,
            job_position,
            educations,
            candidate: candidate.map(|(name, email)| CandidateSummary { name, email }),
        })
    }

    /// Candidate-facing list of own applications, newest first.
    pub async fn list_for_candidate(&self, candidate_id: Uuid) -> Result<Vec<ApplicationDetail>> {
        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM candidates WHERE id = $1")
            .bind(candidate_id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(Error::NotFound("Candidate not found".to_string()));
        }

        let sql = format!(
            "SELECT {} FROM applications WHERE candidate_id = $1 ORDER BY created_at DESC",
            APP_COLUMNS
        );
        let applications = sqlx::query_as::<_, Application>(&sql)
            .bind(candidate_id)
            .fetch_all(&self.pool)
            .await?;

        let candidate: Option<(String, String)> =
            sqlx::query_as("SELECT name, email FROM candidates WHERE id = $1")
                .bind(candidate_id)
                .fetch_optional(&self.pool)
                .await?;
        let candidate = candidate.map(|(name, email)| CandidateSummary { name, email });

        let mut details = Vec::with_capacity(applications.len());
        for application in applications {
            let job_position = self.get_job_position(application.job_position_id).await?;
            let educations = self.get_educations(application.id).await?;
            details.push(ApplicationDetail {
                application,
                job_position,
                educations,
                candidate: candidate.clone(),
            });
        }
        Ok(details)
    }

    /// Admin listing: conjunctive filters, page/per_page pagination,
    /// most recently updated first.
    pub async fn admin_list(&self, query: AdminApplicationQuery) -> Result<ApplicationPage> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let (fragments, binds) = build_filters(&query, Utc::now())?;
        let where_sql = where_clause(&fragments);

        let items_sql = format!(
            "SELECT {} FROM applications a \
             JOIN candidates c ON c.id = a.candidate_id \
             JOIN job_positions p ON p.id = a.job_position_id \
             {} ORDER BY a.updated_at DESC LIMIT ${} OFFSET ${}",
            OVERVIEW_COLUMNS,
            where_sql,
            binds.len() + 1,
            binds.len() + 2
        );
        let mut items_statement = sqlx::query_as::<_, ApplicationOverview>(&items_sql);
        for bind in &binds {
            items_statement = match bind {
                Bind::Id(v) => items_statement.bind(*v),
                Bind::Text(v) => items_statement.bind(v.clone()),
                Bind::Date(v) => items_statement.bind(*v),
                Bind::Timestamp(v) => items_statement.bind(*v),
            };
        }
        items_statement = items_statement.bind(per_page).bind(offset);
        let rows = items_statement.fetch_all(&self.pool).await?;

        let total_sql = format!("SELECT COUNT(*) FROM applications a {}", where_sql);
        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_sql);
        for bind in &binds {
            total_statement = match bind {
                Bind::Id(v) => total_statement.bind(*v),
                Bind::Text(v) => total_statement.bind(v.clone()),
                Bind::Date(v) => total_statement.bind(*v),
                Bind::Timestamp(v) => total_statement.bind(*v),
            };
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let items = self.attach_educations(rows).await?;
        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(ApplicationPage {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    /// Unpaginated variant feeding the export layer.
    pub async fn list_filtered(
        &self,
        query: AdminApplicationQuery,
    ) -> Result<Vec<(ApplicationOverview, Vec<Education>)>> {
        let (fragments, binds) = build_filters(&query, Utc::now())?;
        let where_sql = where_clause(&fragments);

        let sql = format!(
            "SELECT {} FROM applications a \
             JOIN candidates c ON c.id = a.candidate_id \
             JOIN job_positions p ON p.id = a.job_position_id \
             {} ORDER BY a.updated_at DESC",
            OVERVIEW_COLUMNS, where_sql
        );
        let mut statement = sqlx::query_as::<_, ApplicationOverview>(&sql);
        for bind in &binds {
            statement = match bind {
                Bind::Id(v) => statement.bind(*v),
                Bind::Text(v) => statement.bind(v.clone()),
                Bind::Date(v) => statement.bind(*v),
                Bind::Timestamp(v) => statement.bind(*v),
            };
        }
        let rows = statement.fetch_all(&self.pool).await?;
        self.attach_educations(rows).await
    }

    /// Full-replacement update. The education collection is deleted and
    /// recreated rather than merged; each statement is atomic on its
    /// own and the last writer wins.
    pub async fn update(&self, id: Uuid, payload: ApplicationPayload) -> Result<ApplicationDetail> {
        validate_required(&payload)?;

        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(Error::NotFound("Application not found".to_string()));
        }

        let job_position_id = payload.job_position_id.ok_or_else(|| {
            Error::BadRequest("Missing required field: job_position_id".to_string())
        })?;
        self.get_job_position(job_position_id).await?;

        sqlx::query(
            "UPDATE applications SET job_position_id = $2, first_name = $3, last_name = $4, \
             mobile = $5, birth_certificate_number = $6, birth_date = $7, wilaya_id = $8, \
             commune_id = $9, photo = $10, profile_image = $11, cv = $12, experience = $13, \
             certifications = $14, soft_skills = $15, languages = $16, certificates = $17, \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(job_position_id)
        .bind(payload.first_name)
        .bind(payload.last_name)
        .bind(payload.mobile)
        .bind(payload.birth_certificate_number)
        .bind(payload.birth_date)
        .bind(payload.wilaya_id)
        .bind(payload.commune_id)
        .bind(payload.photo)
        .bind(payload.profile_image)
        .bind(payload.cv)
        .bind(Json(payload.experience))
        .bind(Json(payload.certifications))
        .bind(Json(payload.soft_skills))
        .bind(Json(payload.languages))
        .bind(Json(payload.certificates))
        .execute(&self.pool)
        .await?;

        sqlx::query("DELETE FROM educations WHERE application_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.insert_educations(id, &payload.educations).await?;

        self.get_detail(id).await
    }

    /// Sets the review status. Any of the four states is reachable from
    /// any other; only the value itself is validated (at the route).
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Application> {
        let sql = format!(
            "UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            APP_COLUMNS
        );
        sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))
    }

    /// Independent count query per status.
    pub async fn status_counts(&self) -> Result<StatusCountsResponse> {
        Ok(StatusCountsResponse {
            pending: self.count_by_status(ApplicationStatus::Pending).await?,
            reviewing: self.count_by_status(ApplicationStatus::Reviewing).await?,
            accepted: self.count_by_status(ApplicationStatus::Accepted).await?,
            rejected: self.count_by_status(ApplicationStatus::Rejected).await?,
        })
    }

    pub async fn count_by_status(&self, status: ApplicationStatus) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM applications WHERE status = $1",
        )
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn get_job_position(&self, id: Uuid) -> Result<JobPosition> {
        sqlx::query_as::<_, JobPosition>(
            "SELECT id, name, ar_name, created_at FROM job_positions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Job position not found".to_string()))
    }

    async fn get_educations(&self, application_id: Uuid) -> Result<Vec<Education>> {
        let educations = sqlx::query_as::<_, Education>(
            "SELECT id, application_id, education_type, level, institution, field_of_study, \
             start_date, end_date, is_active, description, created_at \
             FROM educations WHERE application_id = $1 ORDER BY created_at ASC",
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(educations)
    }

    async fn insert_educations(
        &self,
        application_id: Uuid,
        educations: &[EducationInput],
    ) -> Result<()> {
        for education in educations {
            sqlx::query(
                "INSERT INTO educations (application_id, education_type, level, institution, \
                 field_of_study, start_date, end_date, is_active, description) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(application_id)
            .bind(&education.education_type)
            .bind(&education.level)
            .bind(&education.institution)
            .bind(&education.field_of_study)
            .bind(education.start_date)
            .bind(education.end_date)
            .bind(education.is_active)
            .bind(&education.description)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    async fn attach_educations(
        &self,
        rows: Vec<ApplicationOverview>,
    ) -> Result<Vec<(ApplicationOverview, Vec<Education>)>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let educations = sqlx::query_as::<_, Education>(
            "SELECT id, application_id, education_type, level, institution, field_of_study, \
             start_date, end_date, is_active, description, created_at \
             FROM educations WHERE application_id = ANY($1) ORDER BY created_at ASC",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Education>> = HashMap::new();
        for education in educations {
            grouped
                .entry(education.application_id)
                .or_default()
                .push(education);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let educations = grouped.remove(&row.id).unwrap_or_default();
                (row, educations)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn query() -> AdminApplicationQuery {
        AdminApplicationQuery::default()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).single().expect("timestamp")
    }

    #[test]
    fn no_filters_yield_no_fragments() {
        let (fragments, binds) = build_filters(&query(), now()).expect("filters");
        assert!(fragments.is_empty());
        assert!(binds.is_empty());
    }

    #[test]
    fn filters_are_and_combined_with_sequential_placeholders() {
        let position = Uuid::new_v4();
        let q = AdminApplicationQuery {
            job_position_id: Some(position),
            wilaya_id: Some("16".into()),
            status: Some("PENDING".into()),
            ..query()
        };
        let (fragments, binds) = build_filters(&q, now()).expect("filters");
        assert_eq!(
            fragments,
            vec![
                "a.job_position_id = $1".to_string(),
                "a.wilaya_id = $2".to_string(),
                "a.status = $3".to_string(),
            ]
        );
        assert_eq!(binds.len(), 3);
        assert_eq!(binds[0], Bind::Id(position));
        assert_eq!(binds[2], Bind::Text("PENDING".into()));
    }

    #[test]
    fn unknown_status_is_a_caller_error() {
        let q = AdminApplicationQuery {
            status: Some("ARCHIVED".into()),
            ..query()
        };
        assert!(build_filters(&q, now()).is_err());
    }

    #[test]
    fn closed_age_bracket_produces_two_date_bounds() {
        let q = AdminApplicationQuery {
            age_range: Some("18-25".into()),
            ..query()
        };
        let (fragments, binds) = build_filters(&q, now()).expect("filters");
        assert_eq!(
            fragments,
            vec![
                "a.birth_date > $1".to_string(),
                "a.birth_date <= $2".to_string(),
            ]
        );
        assert_eq!(
            binds,
            vec![
                Bind::Date(NaiveDate::from_ymd_opt(1998, 6, 15).expect("date")),
                Bind::Date(NaiveDate::from_ymd_opt(2006, 6, 15).expect("date")),
            ]
        );
    }

    #[test]
    fn open_age_bracket_produces_single_bound() {
        let q = AdminApplicationQuery {
            age_range: Some("41+".into()),
            ..query()
        };
        let (fragments, binds) = build_filters(&q, now()).expect("filters");
        assert_eq!(fragments, vec!["a.birth_date <= $1".to_string()]);
        assert_eq!(
            binds,
            vec![Bind::Date(NaiveDate::from_ymd_opt(1983, 6, 15).expect("date"))]
        );
    }

    #[test]
    fn malformed_age_bracket_is_ignored() {
        let q = AdminApplicationQuery {
            age_range: Some("whenever".into()),
            ..query()
        };
        let (fragments, _) = build_filters(&q, now()).expect("filters");
        assert!(fragments.is_empty());
    }

    #[test]
    fn date_bucket_produces_half_open_window() {
        let q = AdminApplicationQuery {
            date_range: Some("today".into()),
            ..query()
        };
        let (fragments, binds) = build_filters(&q, now()).expect("filters");
        assert_eq!(
            fragments,
            vec![
                "a.created_at >= $1".to_string(),
                "a.created_at < $2".to_string(),
            ]
        );
        let start = NaiveDate::from_ymd_opt(2024, 6, 15)
            .expect("date")
            .and_time(NaiveTime::MIN)
            .and_utc();
        let end = NaiveDate::from_ymd_opt(2024, 6, 16)
            .expect("date")
            .and_time(NaiveTime::MIN)
            .and_utc();
        assert_eq!(binds, vec![Bind::Timestamp(start), Bind::Timestamp(end)]);
    }

    #[test]
    fn required_fields_reported_by_name() {
        let payload = ApplicationPayload {
            job_position_id: Some(Uuid::new_v4()),
            first_name: Some("Yasmine".into()),
            last_name: Some("Brahimi".into()),
            mobile: Some("0550123456".into()),
            birth_certificate_number: Some("1998-1234".into()),
            birth_date: NaiveDate::from_ymd_opt(1998, 4, 2),
            wilaya_id: Some("16".into()),
            commune_id: Some("1601".into()),
            ..ApplicationPayload::default()
        };
        assert!(validate_required(&payload).is_ok());

        let missing_mobile = ApplicationPayload {
            mobile: Some("   ".into()),
            ..payload.clone()
        };
        let err = validate_required(&missing_mobile).expect_err("missing mobile");
        assert!(err.to_string().contains("mobile"));

        let missing_birth_date = ApplicationPayload {
            birth_date: None,
            ..payload
        };
        let err = validate_required(&missing_birth_date).expect_err("missing birth date");
        assert!(err.to_string().contains("birth_date"));
    }
}
