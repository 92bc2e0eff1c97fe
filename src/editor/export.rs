// SPDX-License-Identifier: MPL-2.0
//! Export requests: dimension resolution, full-resolution rendering and
//! encoding.
//!
//! An [`ExportJob`] owns everything it needs, so it can run on the calling
//! thread or be handed to [`spawn_export`] for the tokio blocking pool.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tokio::task::JoinHandle;

use super::render::RenderOrchestrator;
use crate::domain::editing::{Adjustments, ExportQuality};
use crate::domain::geometry::{CropBox, TransformState};
use crate::error::{Error, ExportError, Result};
use crate::media::frame_export::{export_file_name, Encoder, ExportFormat};
use crate::media::image_transform::PixelRegion;
use crate::media::PixelBuffer;

/// What the caller wants exported.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    /// Crop rectangle in canvas pixels.
    pub crop_box: CropBox,
    /// Canvas pixels per source pixel.
    pub display_scale: f64,
    pub format: ExportFormat,
    pub quality: ExportQuality,
    /// Explicit output size, overriding everything else.
    pub resize: Option<(u32, u32)>,
    /// Fixed size from a crop preset.
    pub export_size: Option<(u32, u32)>,
}

/// Rendered export: the full-resolution RGBA pixels, their encoding, and
/// the metadata a host needs to save it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    /// Rendered RGBA buffer, `width`×`height`.
    pub pixels: PixelBuffer,
    /// `pixels` encoded as `format`.
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: ExportFormat,
    /// Suggested download name, `image-YYYY-MM-DD-WxH.ext`.
    pub file_name: String,
}

impl ExportedImage {
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

fn validate_scale(display_scale: f64) -> Result<f64> {
    if display_scale.is_finite() && display_scale > 0.0 {
        Ok(display_scale)
    } else {
        Err(ExportError::InvalidScale(display_scale).into())
    }
}

fn non_zero((width, height): (u32, u32)) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        Err(ExportError::InvalidDimensions { width, height }.into())
    } else {
        Ok((width, height))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_edge(value: f64, scale: f64) -> u32 {
    let edge = (value / scale).round();
    if edge.is_finite() {
        edge.clamp(0.0, f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Final output size: explicit resize, then the preset size, then the crop
/// box mapped back to source pixels.
///
/// # Errors
///
/// Returns [`ExportError::InvalidScale`] for a non-positive or non-finite
/// scale and [`ExportError::InvalidDimensions`] when the chosen size has a
/// zero edge.
pub fn resolve_dimensions(request: &ExportRequest) -> Result<(u32, u32)> {
    let scale = validate_scale(request.display_scale)?;
    if let Some(size) = request.resize {
        return non_zero(size);
    }
    if let Some(size) = request.export_size {
        return non_zero(size);
    }
    non_zero((
        scaled_edge(request.crop_box.width, scale),
        scaled_edge(request.crop_box.height, scale),
    ))
}

/// Source rectangle of the crop box in oriented source pixels.
///
/// # Errors
///
/// Returns [`ExportError::InvalidScale`] for a bad scale and
/// [`ExportError::EmptySourceRegion`] if nothing is left after clamping.
pub fn source_region(
    request: &ExportRequest,
    oriented_size: (u32, u32),
) -> Result<PixelRegion> {
    let scale = validate_scale(request.display_scale)?;
    let crop = request.crop_box;
    let region = PixelRegion::from_scaled(crop.x, crop.y, crop.width, crop.height, scale, oriented_size);
    if region.is_empty() {
        return Err(ExportError::EmptySourceRegion.into());
    }
    Ok(region)
}

// =============================================================================
// Export Job
// =============================================================================

/// Self-contained export work item.
#[derive(Debug, Clone)]
pub struct ExportJob {
    source: Arc<PixelBuffer>,
    transform: TransformState,
    adjustments: Adjustments,
    request: ExportRequest,
    renderer: RenderOrchestrator,
    date: NaiveDate,
}

impl ExportJob {
    /// Captures the current edit for export. The file name uses today's
    /// local date.
    #[must_use]
    pub fn new(
        source: Arc<PixelBuffer>,
        transform: TransformState,
        adjustments: Adjustments,
        request: ExportRequest,
        renderer: RenderOrchestrator,
    ) -> Self {
        Self {
            source,
            transform,
            adjustments,
            request,
            renderer,
            date: Local::now().date_naive(),
        }
    }

    /// Overrides the date used in the suggested file name.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    #[must_use]
    pub fn request(&self) -> &ExportRequest {
        &self.request
    }

    /// Renders the full-resolution buffer without encoding it.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] when the request is invalid.
    pub fn render(&self) -> Result<PixelBuffer> {
        let size = resolve_dimensions(&self.request)?;
        let (width, height) = self.source.dimensions();
        let oriented_size = self.transform.oriented_size(width, height);
        let region = source_region(&self.request, oriented_size)?;
        self.renderer
            .render_export(&self.source, &self.transform, &self.adjustments, region, size)
    }

    /// Renders and encodes the export.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] for invalid requests or encoder failures.
    pub fn run(&self, encoder: &impl Encoder) -> Result<ExportedImage> {
        let image = self.render()?;
        let format = self.request.format;
        let bytes = encoder.encode(&image, format, self.request.quality)?;
        let (width, height) = image.dimensions();
        Ok(ExportedImage {
            pixels: image,
            bytes,
            width,
            height,
            format,
            file_name: export_file_name(self.date, width, height, format),
        })
    }
}

/// Runs `job` on the tokio blocking pool.
///
/// Must be called from within a tokio runtime.
pub fn spawn_export<E>(job: ExportJob, encoder: E) -> JoinHandle<Result<ExportedImage>>
where
    E: Encoder + Send + 'static,
{
    tokio::task::spawn_blocking(move || job.run(&encoder))
}

/// Awaits a spawned export, mapping a panicked or cancelled task to an
/// encoder error.
///
/// # Errors
///
/// Returns the job's own error, or [`ExportError::Encoder`] if the task
/// did not complete.
pub async fn join_export(handle: JoinHandle<Result<ExportedImage>>) -> Result<ExportedImage> {
    match handle.await {
        Ok(result) => result,
        Err(err) => Err(Error::Export(ExportError::Encoder(err.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ImageEncoder;
    use crate::test_utils::gradient_buffer;

    fn request(crop_box: CropBox, display_scale: f64) -> ExportRequest {
        ExportRequest {
            crop_box,
            display_scale,
            format: ExportFormat::Png,
            quality: ExportQuality::default(),
            resize: None,
            export_size: None,
        }
    }

    fn job(source: PixelBuffer, request: ExportRequest) -> ExportJob {
        ExportJob::new(
            Arc::new(source),
            TransformState::default(),
            Adjustments::default(),
            request,
            RenderOrchestrator::default(),
        )
        .with_date(NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date"))
    }

    #[test]
    fn dimensions_follow_precedence() {
        let mut req = request(CropBox::new(0.0, 0.0, 500.0, 250.0), 0.5);
        assert_eq!(resolve_dimensions(&req), Ok((1000, 500)));

        req.export_size = Some((1080, 1080));
        assert_eq!(resolve_dimensions(&req), Ok((1080, 1080)));

        req.resize = Some((64, 32));
        assert_eq!(resolve_dimensions(&req), Ok((64, 32)));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let mut req = request(CropBox::new(0.0, 0.0, 100.0, 100.0), 1.0);
        req.resize = Some((0, 10));
        assert_eq!(
            resolve_dimensions(&req),
            Err(Error::Export(ExportError::InvalidDimensions {
                width: 0,
                height: 10
            }))
        );

        let tiny = request(CropBox::new(0.0, 0.0, 0.2, 50.0), 1.0);
        assert!(matches!(
            resolve_dimensions(&tiny),
            Err(Error::Export(ExportError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn bad_scale_is_rejected() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let req = request(CropBox::new(0.0, 0.0, 10.0, 10.0), scale);
            assert!(matches!(
                resolve_dimensions(&req),
                Err(Error::Export(ExportError::InvalidScale(_)))
            ));
        }
    }

    #[test]
    fn region_outside_source_is_empty() {
        let req = request(CropBox::new(500.0, 0.0, 50.0, 50.0), 1.0);
        assert_eq!(
            source_region(&req, (100, 100)),
            Err(Error::Export(ExportError::EmptySourceRegion))
        );
    }

    #[test]
    fn run_encodes_at_resolved_size() {
        let req = request(CropBox::new(10.0, 5.0, 20.0, 10.0), 0.5);
        let exported = job(gradient_buffer(100, 60), req)
            .run(&ImageEncoder)
            .expect("export");
        assert_eq!((exported.width, exported.height), (40, 20));
        assert_eq!(exported.file_name, "image-2025-01-31-40x20.png");
        assert_eq!(exported.pixels.dimensions(), (40, 20));
        assert_eq!(exported.mime_type(), "image/png");

        let decoded = image_rs::load_from_memory(&exported.bytes).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (40, 20));
    }

    #[test]
    fn neutral_full_export_equals_source() {
        let source = gradient_buffer(30, 20);
        let req = request(CropBox::new(0.0, 0.0, 30.0, 20.0), 1.0);
        let rendered = job(source.clone(), req).render().expect("render");
        assert_eq!(rendered, source);
    }

    #[tokio::test]
    async fn spawned_export_completes() {
        let req = request(CropBox::new(0.0, 0.0, 16.0, 16.0), 1.0);
        let handle = spawn_export(job(gradient_buffer(16, 16), req), ImageEncoder);
        let exported = join_export(handle).await.expect("export");
        assert_eq!(exported.format, ExportFormat::Png);
        assert_eq!(exported.width, 16);
    }
}
