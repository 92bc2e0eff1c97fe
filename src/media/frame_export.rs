// SPDX-License-Identifier: MPL-2.0
//! Encoding of rendered buffers into image containers.
//!
//! The engine produces raw RGBA buffers; turning them into files is behind
//! the [`Encoder`] trait. [`ImageEncoder`] implements it with the `image`
//! crate for PNG, JPEG and WebP.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use chrono::NaiveDate;
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};

use crate::domain::editing::ExportQuality;
use crate::error::Result;
use crate::media::image::PixelBuffer;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PNG format (lossless, keeps alpha).
    #[default]
    Png,
    /// JPEG format (lossy, alpha dropped).
    Jpeg,
    /// WebP format (lossless encoder).
    WebP,
}

impl ExportFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::WebP => "webp",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::WebP => "image/webp",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
            ExportFormat::WebP => ImageFormat::WebP,
        }
    }

    /// Returns true if the encoder honors [`ExportQuality`].
    #[must_use]
    pub fn is_lossy(self) -> bool {
        matches!(self, ExportFormat::Jpeg)
    }

    /// Returns all supported formats.
    #[must_use]
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::WebP]
    }

    /// Detects format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<ExportFormat> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "webp" => Some(ExportFormat::WebP),
            _ => None,
        }
    }

    /// Detects format from file path extension.
    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

// =============================================================================
// Encoder
// =============================================================================

/// Turns a rendered buffer into container bytes.
pub trait Encoder {
    /// Encodes `image` as `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be written.
    fn encode(&self, image: &PixelBuffer, format: ExportFormat, quality: ExportQuality)
        -> Result<Vec<u8>>;
}

/// [`Encoder`] backed by the `image` crate codecs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageEncoder;

impl Encoder for ImageEncoder {
    fn encode(
        &self,
        image: &PixelBuffer,
        format: ExportFormat,
        quality: ExportQuality,
    ) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let rgba = image.to_rgba_image();

        // JPEG has no alpha channel
        if format == ExportFormat::Jpeg {
            let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, quality.value()))?;
        } else {
            rgba.write_to(&mut Cursor::new(&mut bytes), format.image_format())?;
        }
        Ok(bytes)
    }
}

/// Encodes `image` and writes it to `path`.
///
/// The format is determined by the file extension if not specified.
///
/// # Errors
///
/// Returns an error if the image cannot be encoded or written to disk.
pub fn save_to_file<P: AsRef<Path>>(
    encoder: &impl Encoder,
    image: &PixelBuffer,
    path: P,
    format: Option<ExportFormat>,
    quality: ExportQuality,
) -> Result<()> {
    let path = path.as_ref();
    let format = format
        .or_else(|| ExportFormat::from_path(path))
        .unwrap_or_default();
    let bytes = encoder.encode(image, format, quality)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    Ok(())
}

/// Generates the default download name for an export.
///
/// Format: `image-{YYYY-MM-DD}-{width}x{height}.{ext}`
#[must_use]
pub fn export_file_name(date: NaiveDate, width: u32, height: u32, format: ExportFormat) -> String {
    format!(
        "image-{}-{}x{}.{}",
        date.format("%Y-%m-%d"),
        width,
        height,
        format.extension()
    )
}
