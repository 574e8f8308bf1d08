use retrotarget_detect::Target;
use serde::{Deserialize, Serialize};

/// Number of targets handed to the host per frame.
pub const MAX_REPORTED_TARGETS: usize = 3;

/// Scalar fields of one target as the host sees them.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetReport {
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub width: f64,
    pub height: f64,
    pub left_to_right_ratio: f64,
}

impl From<&Target> for TargetReport {
    fn from(t: &Target) -> Self {
        Self {
            centroid_x: t.centroid_x,
            centroid_y: t.centroid_y,
            width: t.width,
            height: t.height,
            left_to_right_ratio: t.left_to_right_ratio,
        }
    }
}

/// Fixed-size result block for a host binding to copy out of.
///
/// Holds the first [`MAX_REPORTED_TARGETS`] targets in discovery order;
/// slots past `num_targets` are zeroed.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetsInfo {
    pub num_targets: i32,
    pub targets: [TargetReport; MAX_REPORTED_TARGETS],
}

impl TargetsInfo {
    pub fn from_targets(targets: &[Target]) -> Self {
        let mut info = Self::default();
        for (slot, t) in info.targets.iter_mut().zip(targets) {
            *slot = TargetReport::from(t);
            info.num_targets += 1;
        }
        info
    }

    /// The populated slots.
    pub fn reported(&self) -> &[TargetReport] {
        let n = (self.num_targets.max(0) as usize).min(MAX_REPORTED_TARGETS);
        &self.targets[..n]
    }
}
