use chrono::NaiveDate;
use rust_xlsxwriter::*;

use crate::error::{Error, Result};
use crate::models::application::ApplicationOverview;
use crate::models::education::Education;
use crate::models::wilaya;
use crate::utils::time::calculate_age;

pub struct ExportService;

type ExportRecord = (ApplicationOverview, Vec<Education>);

fn wilaya_name(id: &str) -> &str {
    wilaya::find(id).map(|w| w.name).unwrap_or(id)
}

fn join_skills(row: &ApplicationOverview) -> String {
    row.soft_skills
        .0
        .iter()
        .map(|s| format!("{} ({})", s.name, s.level))
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_languages(row: &ApplicationOverview) -> String {
    row.languages
        .0
        .iter()
        .map(|l| format!("{} ({})", l.name, l.level))
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_certifications(row: &ApplicationOverview) -> String {
    row.certifications
        .0
        .iter()
        .map(|c| match c.issuer.as_deref() {
            Some(issuer) => format!("{} ({})", c.name, issuer),
            None => c.name.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl ExportService {
    /// One CSV row per application: the fixed personal columns, then one
    /// column group per education and experience entry. Rows are ragged
    /// by design (record-shape-dependent width), hence the flexible
    /// writer.
    pub fn generate_applications_csv(
        records: &[ExportRecord],
        on: NaiveDate,
    ) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record([
            "First Name",
            "Last Name",
            "Email",
            "Mobile",
            "Birth Certificate No",
            "Birth Date",
            "Age",
            "Wilaya",
            "Commune",
            "Job Position",
            "Status",
            "Created At",
            "Updated At",
            "Soft Skills",
            "Languages",
            "Certifications",
            "Certificates",
        ])?;

        for (row, educations) in records {
            let mut record = vec![
                row.first_name.clone(),
                row.last_name.clone(),
                row.candidate_email.clone(),
                row.mobile.clone(),
                row.birth_certificate_number.clone(),
                row.birth_date.format("%Y-%m-%d").to_string(),
                calculate_age(row.birth_date, on).to_string(),
                wilaya_name(&row.wilaya_id).to_string(),
                row.commune_id.clone(),
                row.position_name.clone(),
                row.status.clone(),
                row.created_at.format("%Y-%m-%d %H:%M").to_string(),
                row.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                join_skills(row),
                join_languages(row),
                join_certifications(row),
                row.certificates.0.join("; "),
            ];

            for education in educations {
                record.push(education.education_type.clone());
                record.push(education.level.clone().unwrap_or_default());
                record.push(education.institution.clone());
                record.push(education.field_of_study.clone());
                record.push(education.start_date.format("%Y-%m-%d").to_string());
                record.push(
                    education
                        .end_date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| {
                            if education.is_active {
                                "ongoing".to_string()
                            } else {
                                String::new()
                            }
                        }),
                );
            }

            for experience in &row.experience.0 {
                record.push(experience.title.clone());
                record.push(experience.company.clone());
                record.push(format!(
                    "{} / {}",
                    experience.start_date.as_deref().unwrap_or(""),
                    experience.end_date.as_deref().unwrap_or("")
                ));
            }

            writer.write_record(&record)?;
        }

        writer
            .into_inner()
            .map_err(|e| Error::Internal(format!("CSV buffer error: {}", e)))
    }

    /// Generate a styled XLSX workbook from the filtered application set.
    pub fn generate_applications_xlsx(
        records: &[ExportRecord],
        on: NaiveDate,
    ) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Applications")?;

        let primary_color = Color::RGB(0x1E293B);
        let header_bg = Color::RGB(0x0F172A);
        let header_text = Color::White;
        let alt_row_1 = Color::RGB(0xF8FAFC);
        let alt_row_2 = Color::White;
        let border_color = Color::RGB(0xE2E8F0);

        let status_pending = Color::RGB(0xF59E0B);
        let status_reviewing = Color::RGB(0x3B82F6);
        let status_accepted = Color::RGB(0x10B981);
        let status_rejected = Color::RGB(0xEF4444);

        let columns = [
            ("№", 8.0),
            ("Candidate", 28.0),
            ("Email", 30.0),
            ("Mobile", 16.0),
            ("Birth Date", 14.0),
            ("Age", 8.0),
            ("Wilaya", 18.0),
            ("Job Position", 28.0),
            ("Status", 14.0),
            ("Education", 50.0),
            ("Experience", 50.0),
            ("Languages", 30.0),
            ("Created", 18.0),
            ("Updated", 18.0),
        ];

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(header_text)
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);

        worksheet.set_row_height(0, 40)?;
        worksheet.merge_range(
            0,
            0,
            0,
            (columns.len() - 1) as u16,
            "Applications Report",
            &title_format,
        )?;

        let subtitle_format = Format::new()
            .set_font_size(10)
            .set_italic()
            .set_font_color(Color::RGB(0x94A3B8))
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);

        worksheet.set_row_height(1, 22)?;
        let now = chrono::Utc::now().format("%d.%m.%Y %H:%M UTC").to_string();
        let subtitle_text = format!("Exported: {}  |  Total applications: {}", now, records.len());
        worksheet.merge_range(
            1,
            0,
            1,
            (columns.len() - 1) as u16,
            &subtitle_text,
            &subtitle_format,
        )?;

        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let header_row = 2;
        worksheet.set_row_height(header_row, 30)?;
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        let data_start_row = 3;
        for (idx, (row, educations)) in records.iter().enumerate() {
            let xlsx_row = data_start_row + idx as u32;
            let bg = if idx % 2 == 0 { alt_row_1 } else { alt_row_2 };

            let base_fmt = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);

            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);
            let wrap_fmt = base_fmt.clone().set_text_wrap();

            worksheet.set_row_height(xlsx_row, 22)?;

            worksheet.write_number_with_format(xlsx_row, 0, (idx + 1) as f64, &center_fmt)?;

            let name_fmt = base_fmt.clone().set_bold();
            let full_name = format!("{} {}", row.first_name, row.last_name);
            worksheet.write_string_with_format(xlsx_row, 1, &full_name, &name_fmt)?;

            worksheet.write_string_with_format(xlsx_row, 2, &row.candidate_email, &base_fmt)?;
            worksheet.write_string_with_format(xlsx_row, 3, &row.mobile, &base_fmt)?;
            worksheet.write_string_with_format(
                xlsx_row,
                4,
                &row.birth_date.format("%d.%m.%Y").to_string(),
                &center_fmt,
            )?;
            worksheet.write_number_with_format(
                xlsx_row,
                5,
                calculate_age(row.birth_date, on) as f64,
                &center_fmt,
            )?;
            worksheet.write_string_with_format(
                xlsx_row,
                6,
                wilaya_name(&row.wilaya_id),
                &base_fmt,
            )?;
            worksheet.write_string_with_format(xlsx_row, 7, &row.position_name, &wrap_fmt)?;

            let status_color = match row.status.as_str() {
                "PENDING" => status_pending,
                "REVIEWING" => status_reviewing,
                "ACCEPTED" => status_accepted,
                "REJECTED" => status_rejected,
                _ => Color::RGB(0x64748B),
            };
            let status_fmt = Format::new()
                .set_font_size(10)
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(status_color)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            worksheet.write_string_with_format(xlsx_row, 8, &row.status, &status_fmt)?;

            let education_text = educations
                .iter()
                .map(|e| {
                    format!(
                        "{} {} at {} ({})",
                        e.education_type,
                        e.level.as_deref().unwrap_or(""),
                        e.institution,
                        e.field_of_study
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            worksheet.write_string_with_format(xlsx_row, 9, &education_text, &wrap_fmt)?;

            let experience_text = row
                .experience
                .0
                .iter()
                .map(|e| format!("{} at {}", e.title, e.company))
                .collect::<Vec<_>>()
                .join("\n");
            worksheet.write_string_with_format(xlsx_row, 10, &experience_text, &wrap_fmt)?;

            worksheet.write_string_with_format(xlsx_row, 11, &join_languages(row), &wrap_fmt)?;
            worksheet.write_string_with_format(
                xlsx_row,
                12,
                &row.created_at.format("%d.%m.%Y %H:%M").to_string(),
                &center_fmt,
            )?;
            worksheet.write_string_with_format(
                xlsx_row,
                13,
                &row.updated_at.format("%d.%m.%Y %H:%M").to_string(),
                &center_fmt,
            )?;
        }

        let total_row = data_start_row + records.len() as u32 + 1;
        let summary_fmt = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(primary_color)
            .set_background_color(Color::RGB(0xE0E7FF))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        worksheet.set_row_height(total_row, 26)?;
        worksheet.merge_range(
            total_row,
            0,
            total_row,
            1,
            &format!("Total: {} applications", records.len()),
            &summary_fmt,
        )?;

        let count_of = |status: &str| {
            records
                .iter()
                .filter(|(r, _)| r.status == status)
                .count()
        };
        let status_summary = format!(
            "Pending: {} | Reviewing: {} | Accepted: {} | Rejected: {}",
            count_of("PENDING"),
            count_of("REVIEWING"),
            count_of("ACCEPTED"),
            count_of("REJECTED")
        );
        worksheet.merge_range(total_row, 2, total_row, 8, &status_summary, &summary_fmt)?;
        for col in 9..columns.len() as u16 {
            worksheet.write_string_with_format(total_row, col, "", &summary_fmt)?;
        }

        worksheet.set_freeze_panes(3, 0)?;
        worksheet.autofilter(
            2,
            0,
            (data_start_row + records.len() as u32 - 1).max(2),
            (columns.len() - 1) as u16,
        )?;

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}
