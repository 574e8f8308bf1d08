use serde::{Deserialize, Serialize};

/// Axis-aligned integer rectangle in pixel coordinates.
///
/// `x`/`y` is the top-left pixel; `right()`/`bottom()` are exclusive, so a
/// rectangle covers `width * height` pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle covering all `points`, `None` for an empty set.
    pub fn bounding<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        for (x, y) in it {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        self.width as i64 * self.height as i64
    }

    /// Box center (mean of the corners), not a center of mass.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.x as f64 + self.right() as f64) / 2.0,
            (self.y as f64 + self.bottom() as f64) / 2.0,
        )
    }

    /// Overlapping region, `None` when the rectangles share no pixel.
    pub fn intersection(&self, other: &PixelRect) -> Option<PixelRect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        let r = PixelRect::new(x0, y0, x1 - x0, y1 - y0);
        (!r.is_empty()).then_some(r)
    }

    pub fn intersection_area(&self, other: &PixelRect) -> i64 {
        self.intersection(other).map_or(0, |r| r.area())
    }

    /// Smallest rectangle enclosing both.
    pub fn union(&self, other: &PixelRect) -> PixelRect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        PixelRect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_is_inclusive_of_extreme_points() {
        let r = PixelRect::bounding([(3, 4), (7, 4), (7, 9), (3, 9)]).expect("rect");
        assert_eq!(r, PixelRect::new(3, 4, 5, 6));
        assert!(PixelRect::bounding(std::iter::empty()).is_none());
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = PixelRect::new(0, 0, 10, 10);
        let b = PixelRect::new(10, 0, 10, 10);
        assert_eq!(a.intersection_area(&b), 0);
        let c = PixelRect::new(9, 9, 10, 10);
        assert_eq!(a.intersection_area(&c), 1);
    }

    #[test]
    fn union_and_center() {
        let a = PixelRect::new(100, 100, 20, 50);
        let b = PixelRect::new(150, 110, 24, 50);
        let u = a.union(&b);
        assert_eq!(u, PixelRect::new(100, 100, 74, 60));
        assert_eq!(u.center(), (137.0, 130.0));
        assert_eq!(a.area(), 1000);
    }
}
