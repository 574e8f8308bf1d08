use crate::core::{DisplayMode, HsvBounds, RgbaImageView};
use crate::detector::{DetectionContext, DetectionOutput, DetectorParams, TargetDetector};
use crate::TargetsInfo;
use log::warn;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid RGBA image buffer length (expected {expected} bytes, got {got})")]
    InvalidRgbaBuffer { expected: usize, got: usize },

    #[error("invalid RGBA image dimensions (width={width}, height={height})")]
    InvalidRgbaDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Detect(#[from] crate::detector::DetectError),
}

/// Convert an `image::RgbaImage` into the lightweight `retrotarget-core` view type.
pub fn rgba_view(img: &::image::RgbaImage) -> RgbaImageView<'_> {
    RgbaImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Run the pipeline end-to-end on one frame with a throwaway context.
///
/// Frame loops should keep a [`DetectionContext`] and call
/// [`TargetDetector::detect`] directly.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, bounds, params),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn detect_targets(
    img: &::image::RgbaImage,
    bounds: &HsvBounds,
    mode: DisplayMode,
    params: DetectorParams,
) -> Result<DetectionOutput, DetectError> {
    let detector = TargetDetector::new(params);
    let mut ctx = DetectionContext::new();
    Ok(detector.detect(&mut ctx, &rgba_view(img), bounds, mode)?)
}

/// Convenience overload using `DetectorParams::default()` and `DisplayMode::Targets`.
pub fn detect_targets_default(
    img: &::image::RgbaImage,
    bounds: &HsvBounds,
) -> Result<DetectionOutput, DetectError> {
    detect_targets(img, bounds, DisplayMode::Targets, DetectorParams::default())
}

/// Build an `image::RgbaImage` from a raw RGBA buffer.
pub fn rgba_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<::image::RgbaImage, DetectError> {
    let expected = checked_rgba_len(width, height)?;
    if pixels.len() != expected {
        return Err(DetectError::InvalidRgbaBuffer {
            expected,
            got: pixels.len(),
        });
    }
    ::image::RgbaImage::from_raw(width, height, pixels.to_vec())
        .ok_or(DetectError::InvalidRgbaDimensions { width, height })
}

/// Run the pipeline on a borrowed RGBA buffer without copying it.
pub fn detect_targets_from_rgba_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    bounds: &HsvBounds,
    mode: DisplayMode,
    params: DetectorParams,
) -> Result<DetectionOutput, DetectError> {
    let expected = checked_rgba_len(width, height)?;
    if pixels.len() != expected {
        return Err(DetectError::InvalidRgbaBuffer {
            expected,
            got: pixels.len(),
        });
    }
    let view = RgbaImageView {
        width: width as usize,
        height: height as usize,
        data: pixels,
    };
    let detector = TargetDetector::new(params);
    let mut ctx = DetectionContext::new();
    Ok(detector.detect(&mut ctx, &view, bounds, mode)?)
}

/// Per-frame call for a host application that speaks plain integers.
///
/// `bounds` is `[h_min, h_max, s_min, s_max, v_min, v_max]`, each clamped
/// into `0..=255`. An unknown `mode_code` falls back to [`DisplayMode::Raw`].
/// Failures are logged and reported as zero targets so the host frame loop
/// keeps running.
pub fn process_frame(
    detector: &TargetDetector,
    ctx: &mut DetectionContext,
    width: i32,
    height: i32,
    pixels: &[u8],
    mode_code: i32,
    bounds: [i32; 6],
) -> (TargetsInfo, Option<::image::RgbaImage>) {
    let mode = DisplayMode::try_from(mode_code).unwrap_or_else(|err| {
        warn!("{err}, falling back to raw");
        DisplayMode::Raw
    });
    let [h_min, h_max, s_min, s_max, v_min, v_max] = bounds;
    let bounds = HsvBounds::from_i32_clamped((h_min, h_max), (s_min, s_max), (v_min, v_max));

    let (Ok(w), Ok(h)) = (usize::try_from(width), usize::try_from(height)) else {
        warn!("rejecting frame with negative size {width}x{height}");
        return (TargetsInfo::default(), None);
    };
    let view = RgbaImageView {
        width: w,
        height: h,
        data: pixels,
    };

    match detector.detect(ctx, &view, &bounds, mode) {
        Ok(out) => (
            TargetsInfo::from_targets(&out.detection.targets),
            out.annotated,
        ),
        Err(err) => {
            warn!("frame skipped: {err}");
            (TargetsInfo::default(), None)
        }
    }
}

fn checked_rgba_len(width: u32, height: u32) -> Result<usize, DetectError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    w.zip(h)
        .and_then(|(w, h)| crate::core::rgba_len(w, h))
        .ok_or(DetectError::InvalidRgbaDimensions { width, height })
}
