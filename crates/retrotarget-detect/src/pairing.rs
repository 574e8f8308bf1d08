//! Two-pass pairing of parts.
//!
//! Pass 1 ([`reunite_split_halves`]) looks for two stacked parts of the same
//! width and synthesizes the part they would form together; this recovers a
//! marker cut in half by a thin horizontal occluder.
//!
//! Pass 2 ([`assemble_targets`]) runs over the contour parts followed by the
//! synthesized ones and merges side-by-side parts whose top and bottom edges
//! line up into targets.
//!
//! Both passes look at every unordered pair `(i, j)` with `i < j` of a fixed
//! input slice and return a fresh list; nothing is removed, and synthesized
//! parts are never paired with each other inside pass 1.

use log::{debug, info};
use retrotarget_core::PixelRect;

use crate::params::{SplitPairParams, TargetPairParams};
use crate::types::{Part, PartOrigin, Target};

/// Box two stacked halves would form, if `a` and `b` qualify.
///
/// The box starts at the leftmost `x`, spans both parts vertically and takes
/// the larger of the two widths.
pub fn split_pair_rect(a: &Part, b: &Part, params: &SplitPairParams) -> Option<PixelRect> {
    let max_width = a.width().max(b.width());
    if (a.width() - b.width()).abs() / max_width >= params.width_max_error {
        return None;
    }

    let horizontal_err = (a.centroid_x - b.centroid_x).abs() / a.centroid_x.max(b.centroid_x);
    let aligned = horizontal_err < params.horizontal_max_error;
    if !aligned {
        return None;
    }

    let top = a.rect.y.min(b.rect.y);
    let bottom = a.rect.bottom().max(b.rect.bottom());
    let height = bottom - top;
    let proportions = height as f64 / max_width;
    let upright = proportions > params.min_proportions && proportions < params.max_proportions;
    if !upright {
        return None;
    }

    Some(PixelRect::new(
        a.rect.x.min(b.rect.x),
        top,
        a.rect.width.max(b.rect.width),
        height,
    ))
}

/// Pass 1: synthesize one part per stacked pair of contour parts.
///
/// Returns only the new parts; callers append them to `parts`. Indices in
/// [`PartOrigin::SplitPair`] refer to positions in `parts`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(parts = parts.len()))
)]
pub fn reunite_split_halves(parts: &[Part], params: &SplitPairParams) -> Vec<Part> {
    let mut synthesized = Vec::new();
    for (i, a) in parts.iter().enumerate() {
        for (j, b) in parts.iter().enumerate().skip(i + 1) {
            if let Some(rect) = split_pair_rect(a, b, params) {
                debug!("split halves {i} and {j} reunited as {rect:?}");
                synthesized.push(Part::new(
                    rect,
                    PartOrigin::SplitPair {
                        first: i,
                        second: j,
                    },
                ));
            }
        }
    }
    synthesized
}

/// Target formed by `a` and `b`, if they qualify. `ia`/`ib` are their indices.
pub fn pair_target(
    (ia, a): (usize, &Part),
    (ib, b): (usize, &Part),
    params: &TargetPairParams,
) -> Option<Target> {
    if a.rect.intersection_area(&b.rect) != 0 {
        return None;
    }

    let max_height = a.height().max(b.height());
    let top_err = (a.rect.y - b.rect.y).abs() as f64 / max_height;
    let bottom_err = (a.rect.bottom() - b.rect.bottom()).abs() as f64 / max_height;
    debug!("altitude err: {top_err:.2}, {bottom_err:.2}");
    let level = top_err < params.alignment_max_error && bottom_err < params.alignment_max_error;
    if !level {
        return None;
    }

    let union_height = (a.rect.bottom().max(b.rect.bottom()) - a.rect.y.min(b.rect.y)) as f64;
    let spread = (a.centroid_x - b.centroid_x).abs();
    let spaced =
        params.min_spread * union_height < spread && spread < params.max_spread * union_height;
    if !spaced {
        return None;
    }

    let (left, right) = if a.rect.x < b.rect.x { (a, b) } else { (b, a) };
    let rect = a.rect.union(&b.rect);
    let (centroid_x, centroid_y) = rect.center();
    Some(Target {
        rect,
        centroid_x,
        centroid_y,
        width: rect.width as f64,
        height: rect.height as f64,
        left_to_right_ratio: left.rect.area() as f64 / right.rect.area() as f64,
        parts: [ia, ib],
    })
}

/// Pass 2: every qualifying pair of `parts` becomes a target, in pair order.
///
/// No deduplication: a part can end up in more than one target.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(parts = parts.len()))
)]
pub fn assemble_targets(parts: &[Part], params: &TargetPairParams) -> Vec<Target> {
    let mut targets = Vec::new();
    for (i, a) in parts.iter().enumerate() {
        for (j, b) in parts.iter().enumerate().skip(i + 1) {
            if let Some(t) = pair_target((i, a), (j, b), params) {
                info!(
                    "found target at {:.2}, {:.2} size {:.2}, {:.2} ratio {:.2}",
                    t.centroid_x, t.centroid_y, t.width, t.height, t.left_to_right_ratio
                );
                targets.push(t);
            }
        }
    }
    targets
}
