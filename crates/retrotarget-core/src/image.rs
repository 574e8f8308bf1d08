/// Borrowed RGBA frame, row-major, 4 bytes per pixel.
#[derive(Clone, Copy, Debug)]
pub struct RgbaImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // len = 4*w*h
}

impl<'a> RgbaImageView<'a> {
    /// `true` when the buffer length matches the declared dimensions.
    pub fn is_consistent(&self) -> bool {
        rgba_len(self.width, self.height) == Some(self.data.len())
    }

    /// RGBA quadruple at `(x, y)`. Caller guarantees the coordinates are in range.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = 4 * (y * self.width + x);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + 'a {
        let data: &'a [u8] = self.data;
        data.chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }
}

/// Expected RGBA buffer length for `width x height`, `None` on overflow.
pub fn rgba_len(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height)?.checked_mul(4)
}
