use retrotarget_core::PixelRect;
use serde::{Deserialize, Serialize};

/// Where a part came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartOrigin {
    /// Bounding box of one traced contour.
    Contour,
    /// Synthesized from two stacked contour parts (indices into the part list).
    SplitPair { first: usize, second: usize },
}

/// A candidate that passed every filter and may be paired.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub rect: PixelRect,
    /// Box center, not the blob's center of mass.
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub origin: PartOrigin,
}

impl Part {
    pub fn new(rect: PixelRect, origin: PartOrigin) -> Self {
        let (centroid_x, centroid_y) = rect.center();
        Self {
            rect,
            centroid_x,
            centroid_y,
            origin,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.rect.width as f64
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.rect.height as f64
    }

    pub fn is_synthesized(&self) -> bool {
        matches!(self.origin, PartOrigin::SplitPair { .. })
    }
}

/// Two parts merged into one detection.
///
/// Targets are not unique per part: a part that pairs validly with two
/// neighbours shows up in two targets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Union of both part boxes.
    pub rect: PixelRect,
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub width: f64,
    pub height: f64,
    /// `area(left box) / area(right box)`.
    pub left_to_right_ratio: f64,
    /// Indices of the two source parts.
    pub parts: [usize; 2],
}

/// Which filter stage dropped a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    Size,
    Aspect,
    Fill,
    /// Passed every filter but the per-frame part cap was already reached.
    Overflow,
}

/// Candidate dropped by the filter, kept for overlays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RejectedCandidate {
    pub rect: PixelRect,
    pub reason: RejectReason,
    /// Measured quantity that failed: `h/w` for aspect, fullness for fill,
    /// box area for size, part count for overflow.
    pub value: f64,
}
