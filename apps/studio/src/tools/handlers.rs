use axum::{
    extract::{multipart::Field, Multipart, Path, State},
    Json,
};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;
use crate::tools::registry::SuiteListing;
use crate::tools::resume_builder::{render_resume, PDF_CONTENT_TYPE};
use crate::tools::{ToolInput, ToolKind, ToolOutput, Upload};

/// GET /api/v1/tools
pub async fn handle_list_tools(State(state): State<AppState>) -> Json<Vec<SuiteListing>> {
    Json(state.tools.catalogue())
}

/// POST /api/v1/sessions/:id/tools/:tool
///
/// Multipart body: an optional `input` part holding JSON parameters and an optional
/// `file` part. Both may be omitted for tools whose inputs all have defaults.
pub async fn handle_invoke_tool(
    State(state): State<AppState>,
    Path((session_id, slug)): Path<(Uuid, String)>,
    multipart: Multipart,
) -> Result<ToolOutput, AppError> {
    let kind = ToolKind::from_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Unknown tool '{slug}'")))?;
    let session = state.sessions.get(session_id).await?;
    let handler = state.tools.get(kind)?;
    let input = read_tool_input(multipart).await?;

    info!(session_id = %session_id, tool = kind.slug(), has_file = input.file.is_some(), "Invoking tool");
    let mut session = session.lock().await;
    handler.invoke(&mut session, input).await
}

/// POST /api/v1/resume/pdf
pub async fn handle_resume_pdf(
    State(state): State<AppState>,
    Json(record): Json<ResumeRecord>,
) -> Result<ToolOutput, AppError> {
    let resume = render_resume(record, state.page_config.clone()).await?;
    Ok(ToolOutput::File {
        filename: resume.filename,
        content_type: PDF_CONTENT_TYPE,
        bytes: resume.pdf,
    })
}

async fn read_tool_input(mut multipart: Multipart) -> Result<ToolInput, AppError> {
    let mut input = ToolInput::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        match field.name() {
            Some("input") => {
                let text = field.text().await.map_err(bad_multipart)?;
                if !text.trim().is_empty() {
                    input.params = serde_json::from_str::<Value>(&text)
                        .map_err(|e| AppError::Validation(format!("'input' is not valid JSON: {e}")))?;
                }
            }
            Some("file") => input.file = Some(read_upload(field).await?),
            _ => {}
        }
    }
    Ok(input)
}

async fn read_upload(field: Field<'_>) -> Result<Upload, AppError> {
    let filename = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(bad_multipart)?;
    debug!(?filename, ?content_type, bytes = bytes.len(), "Upload received");
    Ok(Upload {
        filename,
        content_type,
        bytes,
    })
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Malformed multipart body: {e}"))
}
