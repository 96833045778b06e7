//! PDF Tools: extracts the text layer of an uploaded PDF.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::sessions::Session;
use crate::tools::{ToolHandler, ToolInput, ToolKind, ToolOutput};

#[derive(Debug, Serialize)]
struct ExtractedText {
    text: String,
}

/// Extracts text off the async executor. Malformed input can make the parser panic;
/// that is reported as a validation error, like any other unreadable upload.
pub async fn extract_pdf_text(bytes: bytes::Bytes) -> Result<String, AppError> {
    let unreadable = |reason: String| AppError::Validation(format!("Could not read PDF: {reason}"));
    match tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(unreadable(e.to_string())),
        Err(e) if e.is_panic() => Err(unreadable("malformed document".to_string())),
        Err(e) => Err(AppError::Internal(anyhow::anyhow!(
            "spawn_blocking failed in PDF extraction: {e}"
        ))),
    }
}

pub struct PdfToolsTool;

#[async_trait]
impl ToolHandler for PdfToolsTool {
    fn kind(&self) -> ToolKind {
        ToolKind::PdfTools
    }

    async fn invoke(&self, _session: &mut Session, input: ToolInput) -> Result<ToolOutput, AppError> {
        let upload = input.require_file()?.bytes.clone();
        let text = extract_pdf_text(upload).await?;
        debug!(chars = text.len(), "PDF text extracted");
        ToolOutput::json(&ExtractedText { text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{default_page_config, generate_resume, FontFamily, PageSize};
    use crate::models::resume::ResumeRecord;
    use crate::tools::Upload;
    use bytes::Bytes;
    use serde_json::Value;

    fn upload(bytes: Vec<u8>) -> ToolInput {
        ToolInput {
            params: Value::Null,
            file: Some(Upload {
                filename: Some("doc.pdf".to_string()),
                content_type: Some("application/pdf".to_string()),
                bytes: Bytes::from(bytes),
            }),
        }
    }

    #[tokio::test]
    async fn test_extracts_text_from_generated_resume() {
        let record = ResumeRecord {
            name: "Ada Lovelace".to_string(),
            skills: "Analysis".to_string(),
            ..Default::default()
        };
        let pdf = generate_resume(&record, &default_page_config(PageSize::A4, FontFamily::Helvetica))
            .unwrap()
            .pdf;

        let output = PdfToolsTool.invoke(&mut Session::new(), upload(pdf)).await.unwrap();
        let ToolOutput::Json(body) = output else {
            panic!("expected JSON");
        };
        let text = body["text"].as_str().unwrap();
        assert!(text.contains("Ada Lovelace"));
        assert!(text.contains("Analysis"));
    }

    #[tokio::test]
    async fn test_garbage_is_a_validation_error() {
        let result = PdfToolsTool
            .invoke(&mut Session::new(), upload(b"definitely not a pdf".to_vec()))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_upload_is_rejected() {
        let result = PdfToolsTool.invoke(&mut Session::new(), ToolInput::default()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
