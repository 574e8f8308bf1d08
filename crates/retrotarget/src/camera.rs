//! Image-space targets to camera-frame bearings.
//!
//! The camera frame is x forward, y left, z down. `y` and `z` are tangents of
//! the bearing angles from the optical axis; `x` is a range estimate from
//! the apparent target width.

use serde::{Deserialize, Serialize};

use crate::{TargetReport, TargetsInfo};

/// Pinhole parameters of the robot camera.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraModel {
    pub image_width: u32,
    pub image_height: u32,
    pub focal_length_px: f64,
    /// Range times apparent width in pixels, for a target of known size.
    pub distance_constant: f64,
}

impl Default for CameraModel {
    fn default() -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            focal_length_px: 697.0,
            distance_constant: 6329.113924,
        }
    }
}

/// One target in the camera frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraTargetInfo {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Left/right area ratio of the target; not yet an angle.
    pub theta: f64,
}

impl CameraModel {
    #[inline]
    fn center(&self) -> (f64, f64) {
        (
            self.image_width as f64 / 2.0 - 0.5,
            self.image_height as f64 / 2.0 - 0.5,
        )
    }

    pub fn target_info(&self, target: &TargetReport) -> CameraTargetInfo {
        let (center_col, center_row) = self.center();
        CameraTargetInfo {
            x: self.distance_constant / target.width,
            y: -(target.centroid_x - center_col) / self.focal_length_px,
            z: (target.centroid_y - center_row) / self.focal_length_px,
            theta: target.left_to_right_ratio,
        }
    }

    pub fn target_infos(&self, info: &TargetsInfo) -> Vec<CameraTargetInfo> {
        info.reported()
            .iter()
            .map(|t| self.target_info(t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn report(cx: f64, cy: f64, width: f64) -> TargetReport {
        TargetReport {
            centroid_x: cx,
            centroid_y: cy,
            width,
            height: 40.0,
            left_to_right_ratio: 0.8,
        }
    }

    #[test]
    fn centered_target_has_no_bearing() {
        let cam = CameraModel::default();
        let info = cam.target_info(&report(319.5, 239.5, 100.0));
        assert_relative_eq!(info.y, 0.0);
        assert_relative_eq!(info.z, 0.0);
        assert_relative_eq!(info.x, 63.29113924);
        assert_relative_eq!(info.theta, 0.8);
    }

    #[test]
    fn right_and_below_is_negative_y_positive_z() {
        let cam = CameraModel::default();
        let info = cam.target_info(&report(319.5 + 69.7, 239.5 + 139.4, 50.0));
        assert_relative_eq!(info.y, -0.1, epsilon = 1e-12);
        assert_relative_eq!(info.z, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn serializes_flat_fields() {
        let info = CameraTargetInfo {
            x: 1.5,
            y: -0.25,
            z: 0.5,
            theta: 1.0,
        };
        let json = serde_json::to_value(info).expect("json");
        assert_eq!(
            json,
            serde_json::json!({ "x": 1.5, "y": -0.25, "z": 0.5, "theta": 1.0 })
        );
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let cam: CameraModel =
            serde_json::from_str(r#"{ "image_width": 320, "image_height": 240 }"#).expect("cfg");
        assert_eq!(cam.image_width, 320);
        assert_relative_eq!(cam.focal_length_px, 697.0);
    }
}
