//! Diagnostic overlay for operators. Has no effect on detection results.

use image::{GrayImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use retrotarget_core::{DisplayMode, PixelRect, RgbaImageView};

use crate::types::{Part, RejectedCandidate, Target};

pub const PART_COLOR: Rgba<u8> = Rgba([200, 20, 200, 255]);
pub const REJECT_COLOR: Rgba<u8> = Rgba([255, 10, 0, 255]);
pub const CENTROID_COLOR: Rgba<u8> = Rgba([0, 190, 255, 255]);
pub const TARGET_COLOR: Rgba<u8> = Rgba([10, 255, 10, 255]);

const CENTROID_RADIUS: i32 = 5;
const CENTROID_THICKNESS: i32 = 3;
const TARGET_THICKNESS: i32 = 2;

/// What to draw on top of the base image.
#[derive(Clone, Copy, Debug)]
pub struct Overlay<'a> {
    pub parts: &'a [Part],
    pub rejected: &'a [RejectedCandidate],
    pub targets: &'a [Target],
}

/// Build the annotated frame for `mode`.
///
/// `Thresh` renders the mask in gray; every other mode starts from a copy of
/// the frame. In `Thresh` targets are drawn over the candidate boxes, in
/// `TargetsPlus` the candidate boxes are drawn last. `frame` and `mask` must
/// have the same dimensions.
pub fn render(
    frame: &RgbaImageView<'_>,
    mask: &GrayImage,
    mode: DisplayMode,
    overlay: &Overlay<'_>,
) -> RgbaImage {
    let (w, h) = (frame.width as u32, frame.height as u32);
    let mut vis = match mode {
        DisplayMode::Thresh => RgbaImage::from_fn(w, h, |x, y| {
            let v = mask.get_pixel(x, y).0[0];
            Rgba([v, v, v, 255])
        }),
        _ => RgbaImage::from_fn(w, h, |x, y| Rgba(frame.pixel(x as usize, y as usize))),
    };

    match mode {
        DisplayMode::Raw => {}
        DisplayMode::Thresh => {
            draw_candidates(&mut vis, overlay);
            draw_targets(&mut vis, overlay);
        }
        DisplayMode::Targets => draw_targets(&mut vis, overlay),
        // candidate boxes go on top of the target markings
        DisplayMode::TargetsPlus => {
            draw_targets(&mut vis, overlay);
            draw_candidates(&mut vis, overlay);
        }
    }
    vis
}

fn draw_candidates(canvas: &mut RgbaImage, overlay: &Overlay<'_>) {
    for part in overlay.parts {
        draw_box(canvas, &part.rect, PART_COLOR, 1);
    }
    for rej in overlay.rejected {
        draw_box(canvas, &rej.rect, REJECT_COLOR, 1);
    }
}

fn draw_targets(canvas: &mut RgbaImage, overlay: &Overlay<'_>) {
    for target in overlay.targets {
        draw_centroid(canvas, target.centroid_x, target.centroid_y);
        draw_box(canvas, &target.rect, TARGET_COLOR, TARGET_THICKNESS);
    }
}

/// Rectangle outline growing inward from the box edge.
fn draw_box(canvas: &mut RgbaImage, rect: &PixelRect, color: Rgba<u8>, thickness: i32) {
    for t in 0..thickness {
        let (w, h) = (rect.width - 2 * t, rect.height - 2 * t);
        if w <= 0 || h <= 0 {
            break;
        }
        let r = Rect::at(rect.x + t, rect.y + t).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(canvas, r, color);
    }
}

fn draw_centroid(canvas: &mut RgbaImage, cx: f64, cy: f64) {
    let center = (cx as i32, cy as i32);
    let half = CENTROID_THICKNESS / 2;
    for radius in CENTROID_RADIUS - half..=CENTROID_RADIUS + half {
        draw_hollow_circle_mut(canvas, center, radius, CENTROID_COLOR);
    }
}
