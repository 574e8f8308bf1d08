//! RGBA to HSV conversion and range thresholding.

use image::GrayImage;
use log::debug;
use retrotarget_core::{HsvBounds, RgbaImageView};

/// Mask value for pixels inside the HSV range.
pub const FOREGROUND: u8 = 255;

/// Convert one RGB pixel to 8-bit HSV.
///
/// `H` is in `0..180` (degrees halved), `S = 255 * (max - min) / max`,
/// `V = max`. Gray pixels get `H = 0`.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = (v - min) as i32;
    if v == 0 {
        return [0, 0, 0];
    }

    let vi = v as i32;
    let s = ((diff * 255 + vi / 2) / vi) as u8;
    if diff == 0 {
        return [0, s, v];
    }

    let (r, g, b) = (r as i32, g as i32, b as i32);
    let sector = if vi == r {
        g - b
    } else if vi == g {
        b - r + 2 * diff
    } else {
        r - g + 4 * diff
    };
    let mut h = ((sector * 30) as f32 / diff as f32).round() as i32;
    if h < 0 {
        h += 180;
    }
    if h >= 180 {
        h -= 180;
    }
    [h as u8, s, v]
}

/// Write `FOREGROUND` into `mask` for every frame pixel whose HSV triple lies
/// inside `bounds`, `0` elsewhere. Alpha is ignored.
///
/// `mask` must already have the frame's dimensions.
pub fn threshold_hsv(frame: &RgbaImageView<'_>, bounds: &HsvBounds, mask: &mut GrayImage) {
    debug_assert_eq!(
        (mask.width() as usize, mask.height() as usize),
        (frame.width, frame.height)
    );
    let out: &mut [u8] = &mut *mask;

    if bounds.is_empty() {
        debug!("HSV bounds {bounds:?} are empty, mask cleared");
        out.fill(0);
        return;
    }

    for (dst, [r, g, b, _]) in out.iter_mut().zip(frame.pixels()) {
        *dst = if bounds.contains(rgb_to_hsv(r, g, b)) {
            FOREGROUND
        } else {
            0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_follow_half_degree_hue() {
        assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(255, 255, 0), [30, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 0), [60, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 255), [90, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 0, 255), [120, 255, 255]);
        assert_eq!(rgb_to_hsv(255, 0, 255), [150, 255, 255]);
    }

    #[test]
    fn grays_have_no_hue_or_saturation() {
        assert_eq!(rgb_to_hsv(0, 0, 0), [0, 0, 0]);
        assert_eq!(rgb_to_hsv(128, 128, 128), [0, 0, 128]);
        assert_eq!(rgb_to_hsv(255, 255, 255), [0, 0, 255]);
    }

    #[test]
    fn saturation_is_rounded() {
        // diff = 100, v = 200 -> 127.5 rounds up
        assert_eq!(rgb_to_hsv(100, 200, 100), [60, 128, 200]);
    }

    fn two_pixel_frame() -> Vec<u8> {
        vec![0, 255, 0, 255, 255, 0, 0, 255]
    }

    #[test]
    fn threshold_marks_only_matching_pixels() {
        let data = two_pixel_frame();
        let frame = RgbaImageView {
            width: 2,
            height: 1,
            data: &data,
        };
        let mut mask = GrayImage::new(2, 1);
        let green = HsvBounds::new((50, 70), (100, 255), (100, 255));
        threshold_hsv(&frame, &green, &mut mask);
        assert_eq!(mask.as_raw(), &vec![FOREGROUND, 0]);
    }

    #[test]
    fn empty_bounds_clear_stale_mask() {
        let data = two_pixel_frame();
        let frame = RgbaImageView {
            width: 2,
            height: 1,
            data: &data,
        };
        let mut mask = GrayImage::from_raw(2, 1, vec![FOREGROUND, FOREGROUND]).expect("mask");
        let inverted = HsvBounds::new((0, 180), (200, 100), (0, 255));
        threshold_hsv(&frame, &inverted, &mut mask);
        assert!(mask.as_raw().iter().all(|&p| p == 0));
    }
}
