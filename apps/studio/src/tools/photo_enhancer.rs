//! Photo Enhancer: applies one filter to an uploaded image and returns a PNG.

use std::io::Cursor;
use std::ops::RangeInclusive;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Luma, Rgb, RgbImage};
use serde::Deserialize;
use tracing::debug;

use crate::errors::{join_blocking, AppError};
use crate::sessions::Session;
use crate::tools::{ToolHandler, ToolInput, ToolKind, ToolOutput};

pub const BLUR_RADIUS: RangeInclusive<u32> = 1..=10;
const BLACK_AND_WHITE_THRESHOLD: u8 = 128;

/// 3x3 sharpen kernel, normalized: 32 in the centre, -2 around, divided by 16.
const SHARPEN_KERNEL: [f32; 9] = [
    -0.125, -0.125, -0.125, //
    -0.125, 2.0, -0.125, //
    -0.125, -0.125, -0.125,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhotoFilter {
    #[default]
    Original,
    Grayscale,
    BlackAndWhite,
    Sepia,
    Blur,
    Sharpen,
    Invert,
}

pub fn apply_filter(img: DynamicImage, filter: PhotoFilter, blur_radius: u32) -> DynamicImage {
    match filter {
        PhotoFilter::Original => img,
        PhotoFilter::Grayscale => img.grayscale(),
        PhotoFilter::BlackAndWhite => {
            let mut luma = img.to_luma8();
            for Luma([v]) in luma.pixels_mut() {
                *v = if *v < BLACK_AND_WHITE_THRESHOLD { 0 } else { 255 };
            }
            DynamicImage::ImageLuma8(luma)
        }
        PhotoFilter::Sepia => DynamicImage::ImageRgb8(sepia(&img.to_rgb8())),
        PhotoFilter::Blur => img.blur(blur_radius as f32),
        PhotoFilter::Sharpen => img.filter3x3(&SHARPEN_KERNEL),
        PhotoFilter::Invert => {
            let mut rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            rgb.invert();
            rgb
        }
    }
}

fn sepia(src: &RgbImage) -> RgbImage {
    let mut out = src.clone();
    for Rgb([r, g, b]) in out.pixels_mut() {
        let (fr, fg, fb) = (*r as f32, *g as f32, *b as f32);
        let tone = |wr: f32, wg: f32, wb: f32| (wr * fr + wg * fg + wb * fb).min(255.0) as u8;
        *r = tone(0.272, 0.534, 0.131);
        *g = tone(0.349, 0.686, 0.168);
        *b = tone(0.393, 0.769, 0.189);
    }
    out
}

pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, AppError> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PNG encoding failed: {e}")))?;
    Ok(buffer)
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct EnhanceRequest {
    filter: PhotoFilter,
    blur_radius: u32,
}

impl Default for EnhanceRequest {
    fn default() -> Self {
        Self {
            filter: PhotoFilter::Original,
            blur_radius: 2,
        }
    }
}

pub struct PhotoEnhancerTool;

#[async_trait]
impl ToolHandler for PhotoEnhancerTool {
    fn kind(&self) -> ToolKind {
        ToolKind::PhotoEnhancer
    }

    async fn invoke(&self, _session: &mut Session, input: ToolInput) -> Result<ToolOutput, AppError> {
        let req: EnhanceRequest = input.params()?;
        if !BLUR_RADIUS.contains(&req.blur_radius) {
            return Err(AppError::Validation(format!(
                "Blur radius must be between {} and {}",
                BLUR_RADIUS.start(),
                BLUR_RADIUS.end()
            )));
        }
        let upload = input.require_file()?.bytes.clone();

        let png = join_blocking(
            tokio::task::spawn_blocking(move || {
                let img = image::load_from_memory(&upload)
                    .map_err(|e| AppError::Validation(format!("Could not read image: {e}")))?;
                encode_png(&apply_filter(img, req.filter, req.blur_radius))
            }),
            "photo enhancer",
        )
        .await??;

        debug!(filter = ?req.filter, bytes = png.len(), "Photo filtered");
        Ok(ToolOutput::File {
            filename: "edited.png".to_string(),
            content_type: "image/png",
            bytes: png,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Upload;
    use bytes::Bytes;
    use serde_json::json;

    fn swatch() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(4, 2, |x, _| {
            if x < 2 {
                Rgb([10, 20, 30])
            } else {
                Rgb([200, 180, 160])
            }
        }))
    }

    #[test]
    fn test_invert() {
        let out = apply_filter(swatch(), PhotoFilter::Invert, 2).to_rgb8();
        assert_eq!(out.get_pixel(0, 0), &Rgb([245, 235, 225]));
    }

    #[test]
    fn test_black_and_white_threshold() {
        let out = apply_filter(swatch(), PhotoFilter::BlackAndWhite, 2).to_luma8();
        assert_eq!(out.get_pixel(0, 0), &Luma([0]));
        assert_eq!(out.get_pixel(3, 1), &Luma([255]));
    }

    #[test]
    fn test_sepia_clamps() {
        let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([255, 255, 255])));
        let out = apply_filter(white, PhotoFilter::Sepia, 2).to_rgb8();
        // 0.272 + 0.534 + 0.131 = 0.937 of 255
        assert_eq!(out.get_pixel(0, 0), &Rgb([238, 255, 255]));
    }

    #[test]
    fn test_filters_keep_dimensions() {
        for filter in [
            PhotoFilter::Original,
            PhotoFilter::Grayscale,
            PhotoFilter::Blur,
            PhotoFilter::Sharpen,
        ] {
            let out = apply_filter(swatch(), filter, 3);
            assert_eq!((out.width(), out.height()), (4, 2), "{filter:?}");
        }
    }

    #[tokio::test]
    async fn test_tool_returns_png() {
        let upload = encode_png(&swatch()).unwrap();
        let input = ToolInput {
            params: json!({ "filter": "grayscale" }),
            file: Some(Upload {
                filename: Some("photo.png".to_string()),
                content_type: Some("image/png".to_string()),
                bytes: Bytes::from(upload),
            }),
        };
        let output = PhotoEnhancerTool.invoke(&mut Session::new(), input).await.unwrap();
        let ToolOutput::File { filename, bytes, .. } = output else {
            panic!("expected a file");
        };
        assert_eq!(filename, "edited.png");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 2));
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_blur() {
        let input = ToolInput::from_params(json!({ "filter": "blur", "blur_radius": 11 }));
        let result = PhotoEnhancerTool.invoke(&mut Session::new(), input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_rejects_non_image_upload() {
        let input = ToolInput {
            params: json!({}),
            file: Some(Upload {
                filename: None,
                content_type: None,
                bytes: Bytes::from_static(b"not an image"),
            }),
        };
        let result = PhotoEnhancerTool.invoke(&mut Session::new(), input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
