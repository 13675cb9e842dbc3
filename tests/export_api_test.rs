use chrono::{NaiveDate, TimeZone, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use recruitment_portal::dto::application_dto::CandidateSummary;
use recruitment_portal::models::application::{
    Application, ApplicationOverview, ExperienceEntry, LanguageEntry, SkillEntry,
};
use recruitment_portal::models::education::Education;
use recruitment_portal::models::job_position::JobPosition;
use recruitment_portal::services::application_service::ApplicationDetail;
use recruitment_portal::services::export_service::ExportService;
use recruitment_portal::services::pdf_service::PdfService;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn overview(first_name: &str, status: &str, experience: Vec<ExperienceEntry>) -> ApplicationOverview {
    let created = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).single().expect("timestamp");
    ApplicationOverview {
        id: Uuid::new_v4(),
        candidate_id: Uuid::new_v4(),
        job_position_id: Uuid::new_v4(),
        first_name: first_name.to_string(),
        last_name: "Brahimi".to_string(),
        mobile: "0550123456".to_string(),
        birth_certificate_number: "1998-1234".to_string(),
        birth_date: date(1998, 4, 2),
        wilaya_id: "16".to_string(),
        commune_id: "1601".to_string(),
        photo: None,
        profile_image: None,
        cv: None,
        experience: Json(experience),
        certifications: Json(vec![]),
        soft_skills: Json(vec![SkillEntry {
            name: "Teamwork".into(),
            level: "Expert".into(),
        }]),
        languages: Json(vec![
            LanguageEntry {
                name: "Arabic".into(),
                level: "Native".into(),
            },
            LanguageEntry {
                name: "French".into(),
                level: "Fluent".into(),
            },
        ]),
        certificates: Json(vec!["/uploads/applications/documents/cert.pdf".into()]),
        status: status.to_string(),
        created_at: created,
        updated_at: created,
        candidate_name: format!("{} Brahimi", first_name),
        candidate_email: "yasmine@example.com".to_string(),
        position_name: "Backend Developer".to_string(),
        position_ar_name: "مطور خلفية".to_string(),
    }
}

fn education(application_id: Uuid, institution: &str) -> Education {
    Education {
        id: Uuid::new_v4(),
        application_id,
        education_type: "universitaire".to_string(),
        level: Some("Master".to_string()),
        institution: institution.to_string(),
        field_of_study: "Computer Science".to_string(),
        start_date: date(2016, 9, 1),
        end_date: Some(date(2021, 6, 30)),
        is_active: false,
        description: None,
        created_at: Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).single().expect("timestamp"),
    }
}

fn experience(title: &str) -> ExperienceEntry {
    ExperienceEntry {
        title: title.to_string(),
        company: "Sonatrach".to_string(),
        location: Some("Alger".to_string()),
        start_date: Some("2021-09-01".to_string()),
        end_date: None,
        description: Some("Internal tooling".to_string()),
    }
}

#[test]
fn csv_export_flattens_personal_fields() {
    let row = overview("Yasmine", "PENDING", vec![experience("Backend Engineer")]);
    let educations = vec![education(row.id, "USTHB")];
    let records = vec![(row, educations)];

    let buffer = ExportService::generate_applications_csv(&records, date(2024, 6, 15))
        .expect("csv export");
    let text = String::from_utf8(buffer).expect("utf8 csv");

    let mut lines = text.lines();
    let header = lines.next().expect("header line");
    assert!(header.starts_with("First Name,Last Name,Email"));

    let data = lines.next().expect("data line");
    assert!(data.contains("Yasmine"));
    assert!(data.contains("yasmine@example.com"));
    assert!(data.contains("Backend Developer"));
    // Calendar-aware age on 2024-06-15 for a 1998-04-02 birth date.
    assert!(data.contains(",26,"));
    assert!(data.contains("Alger"));
    assert!(data.contains("USTHB"));
    assert!(data.contains("Backend Engineer"));
    assert!(data.contains("Arabic (Native); French (Fluent)"));
}

#[test]
fn csv_export_is_ragged_across_differently_shaped_records() {
    let slim = overview("Amine", "REVIEWING", vec![]);
    let wide = overview(
        "Yasmine",
        "ACCEPTED",
        vec![experience("Backend Engineer"), experience("SRE")],
    );
    let wide_educations = vec![education(wide.id, "USTHB"), education(wide.id, "ESI")];
    let records = vec![(slim, vec![]), (wide, wide_educations)];

    let buffer = ExportService::generate_applications_csv(&records, date(2024, 6, 15))
        .expect("csv export");
    let text = String::from_utf8(buffer).expect("utf8 csv");

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(text.as_bytes());
    let widths: Vec<usize> = reader
        .records()
        .map(|r| r.expect("record").len())
        .collect();

    assert_eq!(widths.len(), 3);
    // Slim record matches the fixed header width; the wide one extends
    // past it by two education groups and two experience groups.
    assert_eq!(widths[0], widths[1]);
    assert_eq!(widths[2], widths[1] + 2 * 6 + 2 * 3);
}

#[test]
fn csv_export_handles_empty_collections() {
    let row = overview("Amine", "PENDING", vec![]);
    let records = vec![(row, vec![])];

    let buffer = ExportService::generate_applications_csv(&records, date(2024, 6, 15))
        .expect("csv export");
    let text = String::from_utf8(buffer).expect("utf8 csv");
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn xlsx_export_produces_a_workbook() {
    let row = overview("Yasmine", "ACCEPTED", vec![experience("Backend Engineer")]);
    let educations = vec![education(row.id, "USTHB")];
    let records = vec![(row, educations)];

    let buffer = ExportService::generate_applications_xlsx(&records, date(2024, 6, 15))
        .expect("xlsx export");
    // XLSX is a zip container.
    assert!(buffer.starts_with(b"PK"));
}

#[test]
fn xlsx_export_accepts_an_empty_set() {
    let buffer = ExportService::generate_applications_xlsx(&[], date(2024, 6, 15))
        .expect("xlsx export");
    assert!(buffer.starts_with(b"PK"));
}

#[test]
fn pdf_export_renders_a_document() {
    let row = overview("Yasmine", "PENDING", vec![experience("Backend Engineer")]);
    let application = Application {
        id: row.id,
        candidate_id: row.candidate_id,
        job_position_id: row.job_position_id,
        first_name: row.first_name.clone(),
        last_name: row.last_name.clone(),
        mobile: row.mobile.clone(),
        birth_certificate_number: row.birth_certificate_number.clone(),
        birth_date: row.birth_date,
        wilaya_id: row.wilaya_id.clone(),
        commune_id: row.commune_id.clone(),
        photo: None,
        profile_image: None,
        cv: None,
        experience: row.experience.clone(),
        certifications: row.certifications.clone(),
        soft_skills: row.soft_skills.clone(),
        languages: row.languages.clone(),
        certificates: row.certificates.clone(),
        status: row.status.clone(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    let detail = ApplicationDetail {
        educations: vec![education(application.id, "USTHB")],
        job_position: JobPosition {
            id: application.job_position_id,
            name: "Backend Developer".to_string(),
            ar_name: "مطور خلفية".to_string(),
            created_at: application.created_at,
        },
        candidate: Some(CandidateSummary {
            name: "Yasmine Brahimi".to_string(),
            email: "yasmine@example.com".to_string(),
        }),
        application,
    };

    let buffer = PdfService::generate_application_pdf(&detail, date(2024, 6, 15))
        .expect("pdf export");
    assert!(buffer.starts_with(b"%PDF"));
}
