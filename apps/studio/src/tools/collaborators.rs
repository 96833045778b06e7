//! Tools that are thin wrappers over an external capability: background removal,
//! QR encoding, meme rendering and media download. Only the contracts live here.
//! A tool whose collaborator is `None` reports itself unavailable and refuses calls.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::errors::AppError;
use crate::sessions::Session;
use crate::tools::{
    parse_hex_color, Availability, Rgb, ToolHandler, ToolInput, ToolKind, ToolOutput,
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service failed: {0}")]
    Failed(String),
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidInput(msg) => AppError::Validation(msg),
            ServiceError::Failed(msg) => AppError::Upstream(msg),
        }
    }
}

/// Removes the background of an image; returns a PNG with transparency.
#[async_trait]
pub trait BackgroundRemover: Send + Sync {
    async fn remove_background(&self, image: &[u8]) -> Result<Vec<u8>, ServiceError>;
}

/// Encodes text as a QR code PNG on a white background.
#[async_trait]
pub trait QrEncoder: Send + Sync {
    async fn encode(&self, text: &str, foreground: Rgb) -> Result<Vec<u8>, ServiceError>;
}

/// Draws top and bottom captions centred on an image; returns a PNG.
#[async_trait]
pub trait MemeRenderer: Send + Sync {
    async fn render(
        &self,
        image: &[u8],
        top: &str,
        bottom: &str,
        color: Rgb,
    ) -> Result<Vec<u8>, ServiceError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaFormat {
    /// Best video with audio, MP4.
    #[default]
    Video,
    /// Best audio only, M4A.
    Audio,
}

#[derive(Debug, Clone)]
pub struct FetchedMedia {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Downloads the media behind a page URL.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(&self, url: &str, format: MediaFormat) -> Result<FetchedMedia, ServiceError>;
}

fn require<'a, T: ?Sized>(service: &'a Option<Arc<T>>, what: &str) -> Result<&'a T, AppError> {
    service
        .as_deref()
        .ok_or_else(|| AppError::ToolUnavailable(unavailable_reason(what)))
}

fn unavailable_reason(what: &str) -> String {
    format!("No {what} is configured on this server")
}

fn availability_of<T: ?Sized>(service: &Option<Arc<T>>, what: &str) -> Availability {
    match service {
        Some(_) => Availability::Ready,
        None => Availability::Unavailable(unavailable_reason(what)),
    }
}

fn png(filename: &str, bytes: Vec<u8>) -> ToolOutput {
    ToolOutput::File {
        filename: filename.to_string(),
        content_type: "image/png",
        bytes,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Background eraser
// ────────────────────────────────────────────────────────────────────────────

const BACKGROUND_REMOVER: &str = "background remover";

pub struct BackgroundEraserTool {
    remover: Option<Arc<dyn BackgroundRemover>>,
}

impl BackgroundEraserTool {
    pub fn new(remover: Option<Arc<dyn BackgroundRemover>>) -> Self {
        Self { remover }
    }
}

#[async_trait]
impl ToolHandler for BackgroundEraserTool {
    fn kind(&self) -> ToolKind {
        ToolKind::BackgroundEraser
    }

    fn availability(&self) -> Availability {
        availability_of(&self.remover, BACKGROUND_REMOVER)
    }

    async fn invoke(&self, _session: &mut Session, input: ToolInput) -> Result<ToolOutput, AppError> {
        let remover = require(&self.remover, BACKGROUND_REMOVER)?;
        let upload = input.require_file()?;
        let out = remover.remove_background(&upload.bytes).await?;
        Ok(png("nobg.png", out))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// QR generator
// ────────────────────────────────────────────────────────────────────────────

const QR_ENCODER: &str = "QR encoder";

#[derive(Debug, Deserialize)]
#[serde(default)]
struct QrRequest {
    content: String,
    color: String,
}

impl Default for QrRequest {
    fn default() -> Self {
        Self {
            content: "https://example.com".to_string(),
            color: "#000000".to_string(),
        }
    }
}

pub struct QrGeneratorTool {
    encoder: Option<Arc<dyn QrEncoder>>,
}

impl QrGeneratorTool {
    pub fn new(encoder: Option<Arc<dyn QrEncoder>>) -> Self {
        Self { encoder }
    }
}

#[async_trait]
impl ToolHandler for QrGeneratorTool {
    fn kind(&self) -> ToolKind {
        ToolKind::QrGenerator
    }

    fn availability(&self) -> Availability {
        availability_of(&self.encoder, QR_ENCODER)
    }

    async fn invoke(&self, _session: &mut Session, input: ToolInput) -> Result<ToolOutput, AppError> {
        let encoder = require(&self.encoder, QR_ENCODER)?;
        let req: QrRequest = input.params()?;
        if req.content.is_empty() {
            return Err(AppError::Validation("QR content must not be empty".to_string()));
        }
        let color = parse_hex_color(&req.color)?;
        let out = encoder.encode(&req.content, color).await?;
        Ok(png("qr.png", out))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Meme creator
// ────────────────────────────────────────────────────────────────────────────

const MEME_RENDERER: &str = "meme renderer";

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MemeRequest {
    top_text: String,
    bottom_text: String,
    color: String,
}

impl Default for MemeRequest {
    fn default() -> Self {
        Self {
            top_text: "WHEN THE CODE".to_string(),
            bottom_text: "WORKS FIRST TRY".to_string(),
            color: "#FFFFFF".to_string(),
        }
    }
}

pub struct MemeCreatorTool {
    renderer: Option<Arc<dyn MemeRenderer>>,
}

impl MemeCreatorTool {
    pub fn new(renderer: Option<Arc<dyn MemeRenderer>>) -> Self {
        Self { renderer }
    }
}

#[async_trait]
impl ToolHandler for MemeCreatorTool {
    fn kind(&self) -> ToolKind {
        ToolKind::MemeCreator
    }

    fn availability(&self) -> Availability {
        availability_of(&self.renderer, MEME_RENDERER)
    }

    async fn invoke(&self, _session: &mut Session, input: ToolInput) -> Result<ToolOutput, AppError> {
        let renderer = require(&self.renderer, MEME_RENDERER)?;
        let req: MemeRequest = input.params()?;
        let color = parse_hex_color(&req.color)?;
        let upload = input.require_file()?;
        let out = renderer
            .render(&upload.bytes, &req.top_text, &req.bottom_text, color)
            .await?;
        Ok(png("meme.png", out))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Video downloader
// ────────────────────────────────────────────────────────────────────────────

const MEDIA_FETCHER: &str = "media fetcher";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DownloadRequest {
    url: String,
    format: MediaFormat,
}

pub struct VideoDownloaderTool {
    fetcher: Option<Arc<dyn MediaFetcher>>,
}

impl VideoDownloaderTool {
    pub fn new(fetcher: Option<Arc<dyn MediaFetcher>>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl ToolHandler for VideoDownloaderTool {
    fn kind(&self) -> ToolKind {
        ToolKind::VideoDownloader
    }

    fn availability(&self) -> Availability {
        availability_of(&self.fetcher, MEDIA_FETCHER)
    }

    async fn invoke(&self, _session: &mut Session, input: ToolInput) -> Result<ToolOutput, AppError> {
        let fetcher = require(&self.fetcher, MEDIA_FETCHER)?;
        let req: DownloadRequest = input.params()?;
        let url = req.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Validation("A http(s) URL is required".to_string()));
        }
        let media = fetcher.fetch(url, req.format).await?;
        debug!(filename = %media.filename, bytes = media.bytes.len(), "Media fetched");
        Ok(ToolOutput::File {
            filename: media.filename,
            content_type: media.content_type,
            bytes: media.bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Upload;
    use bytes::Bytes;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records what it was asked to encode.
    #[derive(Default)]
    struct RecordingQr {
        calls: Mutex<Vec<(String, Rgb)>>,
    }

    #[async_trait]
    impl QrEncoder for RecordingQr {
        async fn encode(&self, text: &str, foreground: Rgb) -> Result<Vec<u8>, ServiceError> {
            self.calls.lock().unwrap().push((text.to_string(), foreground));
            Ok(b"png".to_vec())
        }
    }

    struct FailingRemover;

    #[async_trait]
    impl BackgroundRemover for FailingRemover {
        async fn remove_background(&self, _image: &[u8]) -> Result<Vec<u8>, ServiceError> {
            Err(ServiceError::Failed("model not loaded".to_string()))
        }
    }

    struct EchoFetcher;

    #[async_trait]
    impl MediaFetcher for EchoFetcher {
        async fn fetch(&self, url: &str, format: MediaFormat) -> Result<FetchedMedia, ServiceError> {
            let (ext, content_type) = match format {
                MediaFormat::Video => ("mp4", "video/mp4"),
                MediaFormat::Audio => ("m4a", "audio/mp4"),
            };
            Ok(FetchedMedia {
                filename: format!("clip.{ext}"),
                content_type,
                bytes: url.as_bytes().to_vec(),
            })
        }
    }

    fn image_upload() -> ToolInput {
        ToolInput {
            params: json!({}),
            file: Some(Upload {
                filename: Some("cat.png".to_string()),
                content_type: Some("image/png".to_string()),
                bytes: Bytes::from_static(b"\x89PNG"),
            }),
        }
    }

    #[tokio::test]
    async fn test_missing_collaborators_are_unavailable() {
        let tools: Vec<Box<dyn ToolHandler>> = vec![
            Box::new(BackgroundEraserTool::new(None)),
            Box::new(QrGeneratorTool::new(None)),
            Box::new(MemeCreatorTool::new(None)),
            Box::new(VideoDownloaderTool::new(None)),
        ];
        for tool in tools {
            assert!(matches!(tool.availability(), Availability::Unavailable(_)));
            let result = tool.invoke(&mut Session::new(), image_upload()).await;
            assert!(
                matches!(result, Err(AppError::ToolUnavailable(_))),
                "{:?}",
                tool.kind()
            );
        }
    }

    #[tokio::test]
    async fn test_qr_passes_defaults_and_colour() {
        let encoder = Arc::new(RecordingQr::default());
        let tool = QrGeneratorTool::new(Some(encoder.clone()));
        assert_eq!(tool.availability(), Availability::Ready);

        let output = tool
            .invoke(&mut Session::new(), ToolInput::from_params(json!({ "color": "#ff0000" })))
            .await
            .unwrap();
        let ToolOutput::File { filename, .. } = output else {
            panic!("expected a file");
        };
        assert_eq!(filename, "qr.png");
        assert_eq!(
            encoder.calls.lock().unwrap().as_slice(),
            &[("https://example.com".to_string(), Rgb(255, 0, 0))]
        );
    }

    #[tokio::test]
    async fn test_service_failure_maps_to_upstream() {
        let tool = BackgroundEraserTool::new(Some(Arc::new(FailingRemover)));
        let result = tool.invoke(&mut Session::new(), image_upload()).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_downloader_validates_url_and_forwards_format() {
        let tool = VideoDownloaderTool::new(Some(Arc::new(EchoFetcher)));

        let bad = tool
            .invoke(&mut Session::new(), ToolInput::from_params(json!({ "url": "ftp://x" })))
            .await;
        assert!(matches!(bad, Err(AppError::Validation(_))));

        let output = tool
            .invoke(
                &mut Session::new(),
                ToolInput::from_params(json!({ "url": "https://video.example/v/1", "format": "audio" })),
            )
            .await
            .unwrap();
        let ToolOutput::File {
            filename,
            content_type,
            ..
        } = output
        else {
            panic!("expected a file");
        };
        assert_eq!(filename, "clip.m4a");
        assert_eq!(content_type, "audio/mp4");
    }
}
