use serde::{Deserialize, Serialize};

/// Accepted bounding-box size range, inclusive, in pixels.
///
/// These are resolution dependent; the defaults suit a 640x480 stream.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeLimits {
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min_width: 4,
            max_width: 250,
            min_height: 5,
            max_height: 250,
        }
    }
}

impl SizeLimits {
    pub fn contains(&self, width: i32, height: i32) -> bool {
        (self.min_width..=self.max_width).contains(&width)
            && (self.min_height..=self.max_height).contains(&height)
    }
}

/// Accepted `height / width` range, exclusive at both ends.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectLimits {
    /// 2.0 would suit a whole marker; 0.3 keeps halves cut by an occluder.
    pub min_ratio: f64,
    pub max_ratio: f64,
}

impl Default for AspectLimits {
    fn default() -> Self {
        Self {
            min_ratio: 0.3,
            max_ratio: 6.0,
        }
    }
}

impl AspectLimits {
    pub fn contains(&self, ratio: f64) -> bool {
        ratio > self.min_ratio && ratio < self.max_ratio
    }
}

/// Accepted fraction of foreground pixels inside the bounding box, inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillLimits {
    pub min_fill: f64,
    pub max_fill: f64,
}

impl Default for FillLimits {
    fn default() -> Self {
        Self {
            min_fill: 0.70,
            max_fill: 1.0,
        }
    }
}

impl FillLimits {
    pub fn contains(&self, fullness: f64) -> bool {
        fullness >= self.min_fill && fullness <= self.max_fill
    }
}

/// First pairing pass: two stacked parts of nearly equal width are the two
/// halves of one marker with something thin crossing it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitPairParams {
    /// Max `|w1 - w2| / max(w1, w2)`.
    pub width_max_error: f64,
    /// Max `|cx1 - cx2| / max(cx1, cx2)`.
    ///
    /// The denominator is the raw image-space centroid, so the tolerance in
    /// pixels grows toward the right edge of the frame.
    pub horizontal_max_error: f64,
    /// Exclusive bounds on `union_height / max(w1, w2)`.
    pub min_proportions: f64,
    pub max_proportions: f64,
}

impl Default for SplitPairParams {
    fn default() -> Self {
        Self {
            width_max_error: 0.075,
            horizontal_max_error: 0.04,
            min_proportions: 2.0,
            max_proportions: 6.0,
        }
    }
}

/// Second pairing pass: two side-by-side parts form one target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetPairParams {
    /// Max `|top1 - top2| / max(h1, h2)`, same for bottoms.
    pub alignment_max_error: f64,
    /// Exclusive bounds on `|cx1 - cx2|` as a multiple of the union height.
    pub min_spread: f64,
    pub max_spread: f64,
}

impl Default for TargetPairParams {
    fn default() -> Self {
        Self {
            alignment_max_error: 0.25,
            min_spread: 0.5,
            max_spread: 2.25,
        }
    }
}

/// Configuration for [`crate::TargetDetector`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    pub size: SizeLimits,
    pub aspect: AspectLimits,
    pub fill: FillLimits,
    pub split: SplitPairParams,
    pub pair: TargetPairParams,
    /// Upper bound on accepted parts per frame; pairing is quadratic in this.
    ///
    /// Extra candidates are rejected with [`crate::RejectReason::Overflow`].
    /// `0` disables the cap.
    pub max_parts: usize,
    /// Produce the annotated frame. Headless deployments can turn this off.
    pub render: bool,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            size: SizeLimits::default(),
            aspect: AspectLimits::default(),
            fill: FillLimits::default(),
            split: SplitPairParams::default(),
            pair: TargetPairParams::default(),
            max_parts: 64,
            render: true,
        }
    }
}
