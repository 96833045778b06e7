// Resume document layout: fixed bands, conditional sections, wrapped body text,
// keep-with-next page breaks, and PDF serialization.
// Layout + PDF writing is CPU-bound; async callers run it inside tokio::task::spawn_blocking.

pub mod document;
pub mod encoding;
pub mod engine;
pub mod font_metrics;
pub mod page;
pub mod pdf;
pub mod wrap;

use thiserror::Error;

use crate::models::resume::{resume_filename, ResumeRecord};

// Re-export the public API consumed by the tools and handlers.
pub use encoding::EncodingWarning;
pub use engine::LayoutEngine;
pub use font_metrics::FontFamily;
pub use page::{default_page_config, PageConfig, PageSize};

#[derive(Debug, Error)]
pub enum LayoutError {
    /// The page-writing setup is unusable (bad geometry, unknown typeface).
    #[error("Layout resource unavailable: {0}")]
    ResourceInit(String),
}

/// A rendered resume ready for download.
#[derive(Debug, Clone)]
pub struct GeneratedResume {
    pub filename: String,
    pub pdf: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<EncodingWarning>,
}

/// Lays out `record` and writes it as a PDF.
///
/// Fails only when the engine cannot be initialized from `config`; nothing is
/// produced in that case.
pub fn generate_resume(
    record: &ResumeRecord,
    config: &PageConfig,
) -> Result<GeneratedResume, LayoutError> {
    let engine = LayoutEngine::new(config.clone())?;
    let doc = engine.layout(record);
    let pdf = pdf::write_pdf(&doc);

    Ok(GeneratedResume {
        filename: resume_filename(&record.name),
        pdf,
        page_count: doc.page_count(),
        warnings: doc.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_resume_names_file_after_person() {
        let record = ResumeRecord {
            name: "Jane Doe".to_string(),
            skills: "Go, Python".to_string(),
            ..Default::default()
        };
        let config = default_page_config(PageSize::A4, FontFamily::Helvetica);
        let resume = generate_resume(&record, &config).unwrap();
        assert_eq!(resume.filename, "Jane Doe_Resume.pdf");
        assert_eq!(resume.page_count, 1);
        assert!(resume.pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_generate_resume_fails_without_partial_output() {
        let mut config = default_page_config(PageSize::A4, FontFamily::Helvetica);
        config.margin_right_mm = 500.0;
        let result = generate_resume(&ResumeRecord::default(), &config);
        assert!(matches!(result, Err(LayoutError::ResourceInit(_))));
    }
}
