//! External contour extraction from the binary mask.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use retrotarget_core::PixelRect;

/// Outer border of one foreground blob, in border-following order.
///
/// Every border pixel is kept, so the bounding box of the points is the
/// bounding box of the blob.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<(i32, i32)>,
}

impl Contour {
    pub fn bounding_rect(&self) -> Option<PixelRect> {
        PixelRect::bounding(self.points.iter().copied())
    }
}

/// Trace the outermost border of every 8-connected foreground region.
///
/// Hole borders, and blobs sitting inside a hole of another blob, are not
/// reported. Contours come out in raster order of each blob's first pixel.
/// Blobs touching the frame edge are reported like any other.
pub fn find_external_contours(mask: &GrayImage) -> Vec<Contour> {
    let mut padded = GrayImage::new(0, 0);
    find_external_contours_with(mask, &mut padded)
}

/// [`find_external_contours`] with a caller-owned scratch image.
///
/// The tracer only sees outer borders of blobs surrounded by background, so
/// the mask is copied into `padded` with a one-pixel zero frame and the
/// points are shifted back. `padded` is resized to `(w + 2, h + 2)` when
/// needed; its frame is never written and stays zero between calls.
pub fn find_external_contours_with(mask: &GrayImage, padded: &mut GrayImage) -> Vec<Contour> {
    let (w, h) = mask.dimensions();
    let dims = (w + 2, h + 2);
    if padded.dimensions() != dims {
        *padded = GrayImage::new(dims.0, dims.1);
    }

    let (w, stride) = (w as usize, dims.0 as usize);
    if w > 0 {
        for (y, src) in mask.as_raw().chunks_exact(w).enumerate() {
            let start = (y + 1) * stride + 1;
            (**padded)[start..start + w].copy_from_slice(src);
        }
    }

    find_contours::<i32>(padded)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| Contour {
            points: c.points.into_iter().map(|p| (p.x - 1, p.y - 1)).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::FOREGROUND;

    fn fill(mask: &mut GrayImage, rect: PixelRect) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                mask.put_pixel(x as u32, y as u32, image::Luma([FOREGROUND]));
            }
        }
    }

    #[test]
    fn one_contour_per_blob_in_raster_order() {
        let mut mask = GrayImage::new(60, 40);
        fill(&mut mask, PixelRect::new(30, 5, 10, 12));
        fill(&mut mask, PixelRect::new(5, 20, 8, 6));
        let contours = find_external_contours(&mask);
        let rects: Vec<_> = contours.iter().filter_map(|c| c.bounding_rect()).collect();
        assert_eq!(
            rects,
            vec![PixelRect::new(30, 5, 10, 12), PixelRect::new(5, 20, 8, 6)]
        );
    }

    #[test]
    fn nested_blob_inside_hole_is_not_reported() {
        let mut mask = GrayImage::new(40, 40);
        fill(&mut mask, PixelRect::new(5, 5, 30, 30));
        // carve a hole and put an island in it
        for y in 10..30 {
            for x in 10..30 {
                mask.put_pixel(x, y, image::Luma([0]));
            }
        }
        fill(&mut mask, PixelRect::new(17, 17, 6, 6));
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(
            contours[0].bounding_rect(),
            Some(PixelRect::new(5, 5, 30, 30))
        );
    }

    #[test]
    fn blobs_on_every_edge_are_reported() {
        let mut mask = GrayImage::new(50, 40);
        let blobs = [
            PixelRect::new(0, 0, 6, 8),
            PixelRect::new(20, 0, 6, 8),
            PixelRect::new(0, 15, 6, 8),
            PixelRect::new(44, 15, 6, 8),
            PixelRect::new(20, 32, 6, 8),
            PixelRect::new(44, 32, 6, 8),
        ];
        for rect in blobs {
            fill(&mut mask, rect);
        }
        let rects: Vec<_> = find_external_contours(&mask)
            .iter()
            .filter_map(Contour::bounding_rect)
            .collect();
        assert_eq!(rects, blobs.to_vec());
    }

    #[test]
    fn scratch_is_reused_across_sizes() {
        let mut padded = GrayImage::new(0, 0);
        let mut full = GrayImage::new(8, 6);
        fill(&mut full, PixelRect::new(0, 0, 8, 6));
        let rects: Vec<_> = find_external_contours_with(&full, &mut padded)
            .iter()
            .filter_map(Contour::bounding_rect)
            .collect();
        assert_eq!(rects, vec![PixelRect::new(0, 0, 8, 6)]);
        assert_eq!(padded.dimensions(), (10, 8));

        // same size, empty mask: nothing left over from the previous call
        let empty = GrayImage::new(8, 6);
        assert!(find_external_contours_with(&empty, &mut padded).is_empty());
    }

    #[test]
    fn empty_mask_has_no_contours() {
        let mask = GrayImage::new(16, 16);
        assert!(find_external_contours(&mask).is_empty());
    }
}
