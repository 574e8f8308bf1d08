use image::{GrayImage, RgbaImage};
use log::debug;
use retrotarget_core::{rgba_len, DisplayMode, HsvBounds, RgbaImageView};
use serde::{Deserialize, Serialize};

use crate::candidate::filter_candidates;
use crate::contours::find_external_contours_with;
use crate::pairing::{assemble_targets, reunite_split_halves};
use crate::segment::threshold_hsv;
use crate::visualize::{render, Overlay};
use crate::{DetectError, DetectorParams, Part, RejectedCandidate, Target};

/// Reusable per-detector scratch state.
///
/// Holds the binary mask and the padded contour scratch between calls so
/// steady-state frames do not allocate them again. Both are resized when the
/// frame size changes and the mask is fully overwritten on every call, so
/// nothing leaks between frames.
#[derive(Debug)]
pub struct DetectionContext {
    mask: GrayImage,
    padded: GrayImage,
}

impl Default for DetectionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectionContext {
    pub fn new() -> Self {
        Self {
            mask: GrayImage::new(0, 0),
            padded: GrayImage::new(0, 0),
        }
    }

    /// Mask produced by the most recent call.
    pub fn mask(&self) -> &GrayImage {
        &self.mask
    }

    fn prepare(&mut self, width: u32, height: u32) -> &mut GrayImage {
        if self.mask.dimensions() != (width, height) {
            debug!("allocating {width}x{height} mask");
            self.mask = GrayImage::new(width, height);
        }
        &mut self.mask
    }
}

/// Everything the pipeline found in one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Targets in discovery order.
    pub targets: Vec<Target>,
    /// Contour parts followed by synthesized split-pair parts.
    pub parts: Vec<Part>,
    pub rejected: Vec<RejectedCandidate>,
    /// Number of synthesized parts at the end of `parts`.
    pub split_pairs: usize,
}

impl Detection {
    #[inline]
    fn contour_count(&self) -> usize {
        self.parts.len().saturating_sub(self.split_pairs)
    }

    pub fn contour_parts(&self) -> &[Part] {
        &self.parts[..self.contour_count()]
    }

    pub fn synthesized_parts(&self) -> &[Part] {
        &self.parts[self.contour_count()..]
    }
}

/// Result of [`TargetDetector::detect`].
#[derive(Clone, Debug)]
pub struct DetectionOutput {
    pub detection: Detection,
    /// Annotated frame, `None` when rendering is disabled.
    pub annotated: Option<RgbaImage>,
}

/// Frame-to-targets detector.
#[derive(Clone, Debug, Default)]
pub struct TargetDetector {
    params: DetectorParams,
}

impl TargetDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Run the full pipeline on one RGBA frame.
    ///
    /// Bounds that cannot match (any channel with `min > max`) are not an
    /// error; they produce an empty mask and no targets.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "info",
            skip_all,
            fields(width = frame.width, height = frame.height, mode = ?mode)
        )
    )]
    pub fn detect(
        &self,
        ctx: &mut DetectionContext,
        frame: &RgbaImageView<'_>,
        bounds: &HsvBounds,
        mode: DisplayMode,
    ) -> Result<DetectionOutput, DetectError> {
        let (width, height) = validate_frame(frame)?;

        let mask = ctx.prepare(width, height);
        threshold_hsv(frame, bounds, mask);

        let detection = self.run_on_mask(&ctx.mask, &mut ctx.padded);

        let annotated = self.params.render.then(|| {
            let overlay = Overlay {
                parts: &detection.parts,
                rejected: &detection.rejected,
                targets: &detection.targets,
            };
            render(frame, &ctx.mask, mode, &overlay)
        });

        Ok(DetectionOutput {
            detection,
            annotated,
        })
    }

    /// Contours, filtering and both pairing passes on an existing mask.
    pub fn detect_in_mask(&self, mask: &GrayImage) -> Detection {
        let mut padded = GrayImage::new(0, 0);
        self.run_on_mask(mask, &mut padded)
    }

    fn run_on_mask(&self, mask: &GrayImage, padded: &mut GrayImage) -> Detection {
        let contours = find_external_contours_with(mask, padded);
        debug!("{} external contours", contours.len());

        let candidates = filter_candidates(&contours, mask, &self.params);
        let mut parts = candidates.parts;

        let synthesized = reunite_split_halves(&parts, &self.params.split);
        let split_pairs = synthesized.len();
        parts.extend(synthesized);

        let targets = assemble_targets(&parts, &self.params.pair);
        debug!(
            "{} parts ({} split pairs), {} rejected, {} targets",
            parts.len(),
            split_pairs,
            candidates.rejected.len(),
            targets.len()
        );

        Detection {
            targets,
            parts,
            rejected: candidates.rejected,
            split_pairs,
        }
    }
}

fn validate_frame(frame: &RgbaImageView<'_>) -> Result<(u32, u32), DetectError> {
    let bad_dims = DetectError::InvalidDimensions {
        width: frame.width,
        height: frame.height,
    };
    if frame.width == 0 || frame.height == 0 {
        return Err(bad_dims);
    }
    let (Ok(w), Ok(h)) = (i32::try_from(frame.width), i32::try_from(frame.height)) else {
        return Err(bad_dims);
    };
    let expected = rgba_len(frame.width, frame.height).ok_or(bad_dims)?;
    if frame.data.len() != expected {
        return Err(DetectError::InvalidBuffer {
            expected,
            got: frame.data.len(),
        });
    }
    Ok((w as u32, h as u32))
}
