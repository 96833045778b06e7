// Dashboard tools: the catalogue (suites → tools), the handler trait every tool
// implements, and the uniform input/output envelope the invoke endpoint speaks.
// Tools that wrap an external collaborator report availability up front so the
// host never offers a tool it cannot run.

pub mod bmi;
pub mod collaborators;
pub mod expenses;
pub mod handlers;
pub mod health_journal;
pub mod pdf_tools;
pub mod photo_enhancer;
pub mod quick_notes;
pub mod registry;
pub mod resume_builder;
pub mod weather;

use async_trait::async_trait;
use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::sessions::Session;

pub use registry::ToolRegistry;

// ────────────────────────────────────────────────────────────────────────────
// Catalogue
// ────────────────────────────────────────────────────────────────────────────

/// Sidebar category grouping four tools each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Suite {
    MediaStudio,
    LifeTracker,
    UtilityToolkit,
}

impl Suite {
    pub const ALL: [Suite; 3] = [Suite::MediaStudio, Suite::LifeTracker, Suite::UtilityToolkit];

    pub fn label(self) -> &'static str {
        match self {
            Suite::MediaStudio => "Media Studio",
            Suite::LifeTracker => "Life Tracker",
            Suite::UtilityToolkit => "Utility Toolkit",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            Suite::MediaStudio => "CREATIVE TOOLS",
            Suite::LifeTracker => "HEALTH & WEALTH",
            Suite::UtilityToolkit => "PRODUCTIVITY",
        }
    }

    /// Tools in sidebar order.
    pub fn tools(self) -> [ToolKind; 4] {
        match self {
            Suite::MediaStudio => [
                ToolKind::PhotoEnhancer,
                ToolKind::BackgroundEraser,
                ToolKind::MemeCreator,
                ToolKind::VideoDownloader,
            ],
            Suite::LifeTracker => [
                ToolKind::Weather,
                ToolKind::Expenses,
                ToolKind::BmiCalculator,
                ToolKind::HealthJournal,
            ],
            Suite::UtilityToolkit => [
                ToolKind::QrGenerator,
                ToolKind::PdfTools,
                ToolKind::ResumeBuilder,
                ToolKind::QuickNotes,
            ],
        }
    }
}

/// Every tool the dashboard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    PhotoEnhancer,
    BackgroundEraser,
    MemeCreator,
    VideoDownloader,
    Weather,
    Expenses,
    BmiCalculator,
    HealthJournal,
    QrGenerator,
    PdfTools,
    ResumeBuilder,
    QuickNotes,
}

impl ToolKind {
    pub const ALL: [ToolKind; 12] = [
        ToolKind::PhotoEnhancer,
        ToolKind::BackgroundEraser,
        ToolKind::MemeCreator,
        ToolKind::VideoDownloader,
        ToolKind::Weather,
        ToolKind::Expenses,
        ToolKind::BmiCalculator,
        ToolKind::HealthJournal,
        ToolKind::QrGenerator,
        ToolKind::PdfTools,
        ToolKind::ResumeBuilder,
        ToolKind::QuickNotes,
    ];

    /// URL slug, e.g. `resume-builder`.
    pub fn slug(self) -> &'static str {
        match self {
            ToolKind::PhotoEnhancer => "photo-enhancer",
            ToolKind::BackgroundEraser => "background-eraser",
            ToolKind::MemeCreator => "meme-creator",
            ToolKind::VideoDownloader => "video-downloader",
            ToolKind::Weather => "weather",
            ToolKind::Expenses => "expenses",
            ToolKind::BmiCalculator => "bmi-calculator",
            ToolKind::HealthJournal => "health-journal",
            ToolKind::QrGenerator => "qr-generator",
            ToolKind::PdfTools => "pdf-tools",
            ToolKind::ResumeBuilder => "resume-builder",
            ToolKind::QuickNotes => "quick-notes",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::PhotoEnhancer => "Photo Enhancer",
            ToolKind::BackgroundEraser => "Background Eraser",
            ToolKind::MemeCreator => "Meme Creator",
            ToolKind::VideoDownloader => "Video Downloader",
            ToolKind::Weather => "Weather",
            ToolKind::Expenses => "Expenses",
            ToolKind::BmiCalculator => "BMI Calculator",
            ToolKind::HealthJournal => "Health Journal",
            ToolKind::QrGenerator => "QR Generator",
            ToolKind::PdfTools => "PDF Tools",
            ToolKind::ResumeBuilder => "Resume Builder",
            ToolKind::QuickNotes => "Quick Notes",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handler trait
// ────────────────────────────────────────────────────────────────────────────

/// Whether a tool can run right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Ready,
    /// The collaborator behind the tool is missing; the string says what to fix.
    Unavailable(String),
}

/// One dashboard tool. Implement this and register it in `ToolRegistry`.
///
/// `invoke` receives the caller's session exclusively for the duration of the call.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn kind(&self) -> ToolKind;

    fn availability(&self) -> Availability {
        Availability::Ready
    }

    async fn invoke(&self, session: &mut Session, input: ToolInput) -> Result<ToolOutput, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Input / output envelope
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Parameters (JSON object) plus an optional uploaded file.
#[derive(Debug, Clone, Default)]
pub struct ToolInput {
    pub params: Value,
    pub file: Option<Upload>,
}

impl ToolInput {
    #[cfg(test)]
    pub fn from_params(params: Value) -> Self {
        Self { params, file: None }
    }

    /// Deserializes the parameters; absent parameters give `T::default()`.
    pub fn params<T: DeserializeOwned + Default>(&self) -> Result<T, AppError> {
        if self.params.is_null() {
            return Ok(T::default());
        }
        serde_json::from_value(self.params.clone())
            .map_err(|e| AppError::Validation(format!("Invalid tool input: {e}")))
    }

    pub fn require_file(&self) -> Result<&Upload, AppError> {
        self.file
            .as_ref()
            .filter(|f| !f.bytes.is_empty())
            .ok_or_else(|| AppError::Validation("This tool needs an uploaded file".to_string()))
    }
}

/// What a tool hands back: JSON for the panel, or a file to download.
#[derive(Debug)]
pub enum ToolOutput {
    Json(Value),
    File {
        filename: String,
        content_type: &'static str,
        bytes: Vec<u8>,
    },
}

impl ToolOutput {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, AppError> {
        serde_json::to_value(value)
            .map(ToolOutput::Json)
            .map_err(|e| AppError::Internal(e.into()))
    }
}

impl IntoResponse for ToolOutput {
    fn into_response(self) -> Response {
        match self {
            ToolOutput::Json(value) => Json(value).into_response(),
            ToolOutput::File {
                filename,
                content_type,
                bytes,
            } => {
                (
                    [
                        (header::CONTENT_TYPE, content_type.to_string()),
                        (header::CONTENT_DISPOSITION, content_disposition(&filename)),
                    ],
                    bytes,
                )
                    .into_response()
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

/// `Content-Disposition` for a download: a quoted ASCII `filename` for old clients
/// plus an RFC 5987 `filename*` carrying the exact UTF-8 name.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    let mut encoded = String::with_capacity(filename.len());
    for byte in filename.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => encoded.push(char::from(byte)),
            b'!' | b'#' | b'$' | b'&' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~' => {
                encoded.push(char::from(byte))
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Parses `#RRGGBB` (the leading `#` is optional).
pub fn parse_hex_color(s: &str) -> Result<Rgb, AppError> {
    let hex = s.trim().trim_start_matches('#');
    let invalid = || AppError::Validation(format!("'{s}' is not a #RRGGBB colour"));
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
}
