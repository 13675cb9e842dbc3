use chrono::NaiveDate;
use printpdf::*;

use crate::error::{Error, Result};
use crate::services::application_service::ApplicationDetail;
use crate::utils::time::calculate_age;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT_MARGIN: f32 = 20.0;
const TOP_Y: f32 = 277.0;
const BOTTOM_Y: f32 = 20.0;

pub struct PdfService;

struct Cursor {
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor {
    fn ensure_space(&mut self, doc: &PdfDocumentReference, needed: f32) {
        if self.y - needed < BOTTOM_Y {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = doc.get_page(page).get_layer(layer);
            self.y = TOP_Y;
        }
    }

    fn line(
        &mut self,
        doc: &PdfDocumentReference,
        text: &str,
        size: f32,
        font: &IndirectFontRef,
        advance: f32,
    ) {
        self.ensure_space(doc, advance);
        self.layer
            .use_text(text, size, Mm(LEFT_MARGIN), Mm(self.y), font);
        self.y -= advance;
    }
}

impl PdfService {
    /// Renders one application as a paginated document: title, personal
    /// block, position block, derived age, languages, education,
    /// experience, status block.
    pub fn generate_application_pdf(detail: &ApplicationDetail, on: NaiveDate) -> Result<Vec<u8>> {
        let application = &detail.application;

        let (doc, page, layer) =
            PdfDocument::new("Application Details", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| Error::Internal(format!("PDF font error: {}", e)))?;
        let font_regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::Internal(format!("PDF font error: {}", e)))?;

        let mut cursor = Cursor {
            layer: doc.get_page(page).get_layer(layer),
            y: TOP_Y,
        };

        cursor.line(&doc, "Application Details", 20.0, &font_bold, 14.0);

        cursor.line(&doc, "Personal Information", 14.0, &font_bold, 9.0);
        cursor.line(
            &doc,
            &format!(
                "Name: {} {}",
                application.first_name, application.last_name
            ),
            11.0,
            &font_regular,
            6.0,
        );
        if let Some(candidate) = &detail.candidate {
            cursor.line(
                &doc,
                &format!("Email: {}", candidate.email),
                11.0,
                &font_regular,
                6.0,
            );
        }
        cursor.line(
            &doc,
            &format!("Phone: {}", application.mobile),
            11.0,
            &font_regular,
            6.0,
        );
        cursor.line(
            &doc,
            &format!(
                "Age: {} years",
                calculate_age(application.birth_date, on)
            ),
            11.0,
            &font_regular,
            10.0,
        );

        cursor.line(&doc, "Position Details", 14.0, &font_bold, 9.0);
        cursor.line(
            &doc,
            &format!("Position: {}", detail.job_position.name),
            11.0,
            &font_regular,
            6.0,
        );
        cursor.line(
            &doc,
            &format!("Arabic Name: {}", detail.job_position.ar_name),
            11.0,
            &font_regular,
            10.0,
        );

        cursor.line(&doc, "Languages", 14.0, &font_bold, 9.0);
        for language in &application.languages.0 {
            cursor.line(
                &doc,
                &format!("{} - {}", language.name, language.level),
                11.0,
                &font_regular,
                6.0,
            );
        }
        cursor.y -= 4.0;

        cursor.line(&doc, "Education", 14.0, &font_bold, 9.0);
        for education in &detail.educations {
            let heading = match education.level.as_deref() {
                Some(level) => format!("{} - {}", education.education_type, level),
                None => education.education_type.clone(),
            };
            cursor.line(&doc, &heading, 11.0, &font_regular, 6.0);
            cursor.line(
                &doc,
                &format!(
                    "{} at {}",
                    education.field_of_study, education.institution
                ),
                11.0,
                &font_regular,
                8.0,
            );
        }

        cursor.line(&doc, "Experience", 14.0, &font_bold, 9.0);
        for experience in &application.experience.0 {
            cursor.line(&doc, &experience.title, 11.0, &font_regular, 6.0);
            cursor.line(&doc, &experience.company, 11.0, &font_regular, 6.0);
            if let Some(description) = experience.description.as_deref() {
                cursor.line(&doc, description, 11.0, &font_regular, 6.0);
            }
            cursor.y -= 2.0;
        }
        cursor.y -= 4.0;

        cursor.line(&doc, "Application Status", 14.0, &font_bold, 9.0);
        cursor.line(
            &doc,
            &format!("Status: {}", application.status),
            11.0,
            &font_regular,
            6.0,
        );
        cursor.line(
            &doc,
            &format!(
                "Last Updated: {}",
                application.updated_at.format("%Y-%m-%d")
            ),
            11.0,
            &font_regular,
            6.0,
        );

        doc.save_to_bytes()
            .map_err(|e| Error::Internal(format!("PDF generation failed: {}", e)))
    }
}
