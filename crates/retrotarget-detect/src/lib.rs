//! Retroreflective target detector.
//!
//! Pipeline, one frame at a time:
//! 1. Threshold the RGBA frame in HSV space into a binary mask ([`segment`]).
//! 2. Trace the outer border of every foreground blob ([`contours`]).
//! 3. Reject blobs by size, aspect ratio and box fullness; survivors are
//!    *parts* ([`candidate`]).
//! 4. Reunite vertically split halves of one marker into synthesized parts,
//!    then pair non-overlapping parts with aligned top/bottom edges into
//!    *targets* ([`pairing`]).
//! 5. Optionally draw a diagnostic overlay ([`visualize`]).
//!
//! Scratch buffers live in a caller-owned [`DetectionContext`] that is reused
//! across frames; nothing is kept in globals.

pub mod candidate;
pub mod contours;
mod detector;
mod error;
pub mod pairing;
mod params;
pub mod segment;
mod types;
pub mod visualize;

pub use detector::{Detection, DetectionContext, DetectionOutput, TargetDetector};
pub use error::DetectError;
pub use params::{
    AspectLimits, DetectorParams, FillLimits, SizeLimits, SplitPairParams, TargetPairParams,
};
pub use types::{Part, PartOrigin, RejectReason, RejectedCandidate, Target};

pub use retrotarget_core::{DisplayMode, HsvBounds, PixelRect, RgbaImageView};
