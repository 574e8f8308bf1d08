//! Core types and utilities for retroreflective target detection.
//!
//! This crate is intentionally small. It holds the plain data types shared by
//! the detector and the facade crate and does *not* depend on any concrete
//! image library.

mod display;
mod hsv;
mod image;
mod logger;
mod rect;

pub use display::{DisplayMode, UnknownDisplayMode};
pub use hsv::HsvBounds;
pub use image::{rgba_len, RgbaImageView};
pub use rect::PixelRect;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_from_env, init_with_level, level_from_str, LOG_ENV};
