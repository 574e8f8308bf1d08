//! Per-contour geometric filtering.
//!
//! Each candidate goes through three tests in order and is rejected at the
//! first one it fails:
//! 1. bounding-box size,
//! 2. `height / width` aspect ratio (open interval),
//! 3. fullness: foreground pixels in the box over box area.
//!
//! Fullness is measured against the box area rather than the polygon area.

use image::GrayImage;
use log::{debug, warn};
use retrotarget_core::PixelRect;

use crate::contours::Contour;
use crate::params::DetectorParams;
use crate::segment::FOREGROUND;
use crate::types::{Part, PartOrigin, RejectReason, RejectedCandidate};

/// Filter output: accepted parts and rejected candidates, both in contour order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidateSet {
    pub parts: Vec<Part>,
    pub rejected: Vec<RejectedCandidate>,
}

/// Fraction of `rect` pixels that are foreground in `mask`.
///
/// The part of `rect` outside the image counts as background.
pub fn box_fullness(mask: &GrayImage, rect: &PixelRect) -> f64 {
    let area = rect.area();
    if area == 0 {
        return 0.0;
    }
    let (w, h) = (mask.width() as i32, mask.height() as i32);
    let x0 = rect.x.clamp(0, w) as usize;
    let x1 = rect.right().clamp(0, w) as usize;
    let y0 = rect.y.clamp(0, h) as usize;
    let y1 = rect.bottom().clamp(0, h) as usize;

    let stride = w as usize;
    let raw = mask.as_raw();
    let mut count = 0usize;
    for y in y0..y1 {
        let row = &raw[y * stride + x0..y * stride + x1];
        count += row.iter().filter(|&&p| p == FOREGROUND).count();
    }
    count as f64 / area as f64
}

/// Run the size, aspect and fullness tests on one bounding box.
pub fn classify_candidate(
    rect: PixelRect,
    mask: &GrayImage,
    params: &DetectorParams,
) -> Result<Part, RejectedCandidate> {
    let reject = |reason, value| RejectedCandidate {
        rect,
        reason,
        value,
    };

    if !params.size.contains(rect.width, rect.height) {
        return Err(reject(RejectReason::Size, rect.area() as f64));
    }

    let ratio = rect.height as f64 / rect.width as f64;
    if !params.aspect.contains(ratio) {
        debug!("rejecting {rect:?} due to shape: proportions = {ratio:.2}");
        return Err(reject(RejectReason::Aspect, ratio));
    }

    let fullness = box_fullness(mask, &rect);
    if !params.fill.contains(fullness) {
        debug!("rejecting {rect:?} due to fullness: {fullness:.2}");
        return Err(reject(RejectReason::Fill, fullness));
    }

    Ok(Part::new(rect, PartOrigin::Contour))
}

/// Classify every contour into parts and rejects.
///
/// At most `params.max_parts` parts are accepted (0 = unbounded); the rest of
/// the survivors are rejected with [`RejectReason::Overflow`].
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(contours = contours.len()))
)]
pub fn filter_candidates(
    contours: &[Contour],
    mask: &GrayImage,
    params: &DetectorParams,
) -> CandidateSet {
    let mut out = CandidateSet::default();
    let mut overflowed = 0usize;

    for rect in contours.iter().filter_map(Contour::bounding_rect) {
        match classify_candidate(rect, mask, params) {
            Ok(part) if params.max_parts > 0 && out.parts.len() >= params.max_parts => {
                overflowed += 1;
                out.rejected.push(RejectedCandidate {
                    rect: part.rect,
                    reason: RejectReason::Overflow,
                    value: out.parts.len() as f64,
                });
            }
            Ok(part) => out.parts.push(part),
            Err(rejected) => out.rejected.push(rejected),
        }
    }

    if overflowed > 0 {
        warn!(
            "part cap {} reached, {} extra candidates dropped",
            params.max_parts, overflowed
        );
    }
    debug!(
        "candidates: {} parts, {} rejected",
        out.parts.len(),
        out.rejected.len()
    );
    out
}
