use serde::{Deserialize, Serialize};

/// Inclusive per-channel HSV threshold bounds.
///
/// Hue uses the 8-bit OpenCV convention: `0..180` (degrees halved).
/// Saturation and value span `0..=255`. There is no hue wraparound: a range
/// with `h_min > h_max` matches nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HsvBounds {
    pub h_min: u8,
    pub h_max: u8,
    pub s_min: u8,
    pub s_max: u8,
    pub v_min: u8,
    pub v_max: u8,
}

impl Default for HsvBounds {
    /// Accept every pixel.
    fn default() -> Self {
        Self {
            h_min: 0,
            h_max: 255,
            s_min: 0,
            s_max: 255,
            v_min: 0,
            v_max: 255,
        }
    }
}

impl HsvBounds {
    pub const fn new(h: (u8, u8), s: (u8, u8), v: (u8, u8)) -> Self {
        Self {
            h_min: h.0,
            h_max: h.1,
            s_min: s.0,
            s_max: s.1,
            v_min: v.0,
            v_max: v.1,
        }
    }

    /// Build from host-side integers, clamping each into `0..=255`.
    pub fn from_i32_clamped(h: (i32, i32), s: (i32, i32), v: (i32, i32)) -> Self {
        let c = |x: i32| x.clamp(0, 255) as u8;
        Self::new((c(h.0), c(h.1)), (c(s.0), c(s.1)), (c(v.0), c(v.1)))
    }

    /// `true` when at least one channel has `min > max` and nothing can match.
    pub fn is_empty(&self) -> bool {
        self.h_min > self.h_max || self.s_min > self.s_max || self.v_min > self.v_max
    }

    #[inline]
    pub fn contains(&self, [h, s, v]: [u8; 3]) -> bool {
        (self.h_min..=self.h_max).contains(&h)
            && (self.s_min..=self.s_max).contains(&s)
            && (self.v_min..=self.v_max).contains(&v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let b = HsvBounds::new((50, 70), (100, 255), (100, 255));
        assert!(b.contains([50, 100, 100]));
        assert!(b.contains([70, 255, 255]));
        assert!(!b.contains([71, 200, 200]));
        assert!(!b.contains([60, 99, 200]));
    }

    #[test]
    fn inverted_hue_range_matches_nothing() {
        let b = HsvBounds::new((170, 10), (0, 255), (0, 255));
        assert!(b.is_empty());
        assert!(!b.contains([175, 128, 128]));
        assert!(!b.contains([5, 128, 128]));
    }

    #[test]
    fn host_integers_are_clamped() {
        let b = HsvBounds::from_i32_clamped((-5, 300), (0, 255), (20, 40));
        assert_eq!(b, HsvBounds::new((0, 255), (0, 255), (20, 40)));
    }

    #[test]
    fn deserializes_from_json() {
        let b: HsvBounds = serde_json::from_str(
            r#"{"h_min":55,"h_max":95,"s_min":80,"s_max":255,"v_min":60,"v_max":255}"#,
        )
        .expect("bounds");
        assert_eq!(b, HsvBounds::new((55, 95), (80, 255), (60, 255)));
    }
}
