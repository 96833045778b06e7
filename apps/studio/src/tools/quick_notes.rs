//! Quick Notes: timestamped scratch notes kept in the session, listed newest first.

use async_trait::async_trait;
use chrono::{Local, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::sessions::Session;
use crate::tools::{ToolHandler, ToolInput, ToolKind, ToolOutput};

#[derive(Debug, Default)]
pub struct NoteBook {
    /// Stored oldest first as `"HH:MM - text"`.
    notes: Vec<String>,
}

impl NoteBook {
    pub fn add(&mut self, text: &str, at: NaiveTime) -> &str {
        self.notes.push(format!("{} - {}", at.format("%H:%M"), text));
        self.notes.last().map(String::as_str).unwrap_or_default()
    }

    pub fn newest_first(&self) -> Vec<String> {
        self.notes.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum NotesAction {
    Add,
    #[default]
    List,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NotesRequest {
    action: NotesAction,
    text: String,
}

#[derive(Debug, Serialize)]
struct NotesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    saved: Option<String>,
    notes: Vec<String>,
}

pub struct QuickNotesTool;

#[async_trait]
impl ToolHandler for QuickNotesTool {
    fn kind(&self) -> ToolKind {
        ToolKind::QuickNotes
    }

    async fn invoke(&self, session: &mut Session, input: ToolInput) -> Result<ToolOutput, AppError> {
        let req: NotesRequest = input.params()?;
        let saved = match req.action {
            NotesAction::Add => {
                let note = session.notes.add(&req.text, Local::now().time()).to_string();
                debug!(session_id = %session.id, count = session.notes.len(), "Note saved");
                Some(note)
            }
            NotesAction::List => None,
        };
        ToolOutput::json(&NotesResponse {
            saved,
            notes: session.notes.newest_first(),
        })
    }
}
