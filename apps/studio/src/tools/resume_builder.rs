//! Resume Builder: a `ResumeRecord` in, a downloadable PDF out.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::errors::{join_blocking, AppError};
use crate::layout::{generate_resume, GeneratedResume, PageConfig};
use crate::models::resume::ResumeRecord;
use crate::sessions::Session;
use crate::tools::{Availability, ToolHandler, ToolInput, ToolKind, ToolOutput};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

pub struct ResumeBuilderTool {
    page_config: PageConfig,
}

impl ResumeBuilderTool {
    pub fn new(page_config: PageConfig) -> Self {
        Self { page_config }
    }
}

/// Runs layout + PDF writing off the async executor.
pub async fn render_resume(
    record: ResumeRecord,
    page_config: PageConfig,
) -> Result<GeneratedResume, AppError> {
    let resume = join_blocking(
        tokio::task::spawn_blocking(move || generate_resume(&record, &page_config)),
        "resume generation",
    )
    .await??;

    for w in &resume.warnings {
        debug!(input_field = w.field, character = %w.character, "Replaced character");
    }
    info!(
        filename = %resume.filename,
        pages = resume.page_count,
        bytes = resume.pdf.len(),
        "Resume generated"
    );
    Ok(resume)
}

#[async_trait]
impl ToolHandler for ResumeBuilderTool {
    fn kind(&self) -> ToolKind {
        ToolKind::ResumeBuilder
    }

    fn availability(&self) -> Availability {
        match self.page_config.validate() {
            Ok(()) => Availability::Ready,
            Err(e) => Availability::Unavailable(e.to_string()),
        }
    }

    async fn invoke(&self, _session: &mut Session, input: ToolInput) -> Result<ToolOutput, AppError> {
        let record: ResumeRecord = input.params()?;
        let resume = render_resume(record, self.page_config.clone()).await?;
        Ok(ToolOutput::File {
            filename: resume.filename,
            content_type: PDF_CONTENT_TYPE,
            bytes: resume.pdf,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{default_page_config, FontFamily, PageSize};
    use serde_json::json;

    fn tool() -> ResumeBuilderTool {
        ResumeBuilderTool::new(default_page_config(PageSize::A4, FontFamily::Helvetica))
    }

    #[tokio::test]
    async fn test_builds_pdf_named_after_person() {
        let output = tool()
            .invoke(
                &mut Session::new(),
                ToolInput::from_params(json!({
                    "name": "Jane Doe",
                    "job_title": "Engineer",
                    "skills": "Go, Python"
                })),
            )
            .await
            .unwrap();

        let ToolOutput::File {
            filename,
            content_type,
            bytes,
        } = output
        else {
            panic!("expected a file");
        };
        assert_eq!(filename, "Jane Doe_Resume.pdf");
        assert_eq!(content_type, "application/pdf");
        let text = pdf_extract::extract_text_from_mem(&bytes).unwrap();
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Go, Python"));
    }

    #[tokio::test]
    async fn test_linkedin_alias_is_accepted() {
        let output = tool()
            .invoke(
                &mut Session::new(),
                ToolInput::from_params(json!({ "name": "Al", "linkedin": "linkedin.com/in/al" })),
            )
            .await
            .unwrap();
        let ToolOutput::File { bytes, .. } = output else {
            panic!("expected a file");
        };
        let text = pdf_extract::extract_text_from_mem(&bytes).unwrap();
        assert!(text.contains("linkedin.com/in/al"));
    }

    #[test]
    fn test_unusable_geometry_is_reported_unavailable() {
        let mut config = default_page_config(PageSize::A4, FontFamily::Helvetica);
        config.margin_left_mm = -5.0;
        let tool = ResumeBuilderTool::new(config);
        assert!(matches!(tool.availability(), Availability::Unavailable(_)));
        assert_eq!(
            ResumeBuilderTool::new(default_page_config(PageSize::Letter, FontFamily::Courier))
                .availability(),
            Availability::Ready
        );
    }
}
