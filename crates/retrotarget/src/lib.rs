//! High-level facade crate for the `retrotarget-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core types and the detector crate,
//! - the host-boundary result block ([`TargetsInfo`], at most three targets),
//! - conversion of image-space targets into camera-frame bearings
//!   ([`camera`]),
//! - (feature `image`) end-to-end helpers over `image::RgbaImage` and raw
//!   RGBA buffers, including the per-frame [`detect::process_frame`] call a
//!   host application drives.
//!
//! ## Quickstart
//!
//! ```no_run
//! use retrotarget::detect;
//! use retrotarget::{DisplayMode, HsvBounds};
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("frame.png")?.decode()?.to_rgba8();
//! let bounds = HsvBounds::new((55, 95), (80, 255), (60, 255));
//! let out = detect::detect_targets_default(&img, &bounds)?;
//! println!("targets: {}", out.detection.targets.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `retrotarget::core`: frame views, rectangles, HSV bounds, display modes, logger.
//! - `retrotarget::detector`: segmentation, contours, filtering, pairing, overlay.
//! - `retrotarget::camera`: image-space to camera-frame conversion.
//! - `retrotarget::detect` (feature `image`): end-to-end helpers.

pub use retrotarget_core as core;
pub use retrotarget_detect as detector;

pub use retrotarget_core::{DisplayMode, HsvBounds, PixelRect, RgbaImageView};
pub use retrotarget_detect::{
    Detection, DetectionContext, DetectorParams, Part, Target, TargetDetector,
};

pub mod camera;
mod host;

pub use host::{TargetReport, TargetsInfo, MAX_REPORTED_TARGETS};

#[cfg(feature = "image")]
pub mod detect;
