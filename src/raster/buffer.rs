use crate::geometry::{Color, ImageBounds, ToolBounds, ToolPoint};

use super::{RasterError, RasterResult};

/// Owned `width * height` grid of ARGB pixels, row-major.
///
/// Coordinates handed to [`PixelBuffer::pixel`] and [`PixelBuffer::set_pixel`]
/// must be in bounds; callers clamp through the view transform first. The
/// `*_clipped` drawing helpers and [`PixelBuffer::get`] accept any point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Creates a buffer filled with `fill`. Zero dimensions are raised to 1.
    pub fn filled(width: u32, height: u32, fill: Color) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![fill.argb(); pixel_count(width, height)],
        }
    }

    pub fn from_argb(width: u32, height: u32, pixels: Vec<u32>) -> RasterResult<Self> {
        validate_dimensions(width, height)?;
        let expected = pixel_count(width, height);
        if pixels.len() != expected {
            return Err(RasterError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a buffer from tightly packed `RGBA8` bytes.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> RasterResult<Self> {
        validate_dimensions(width, height)?;
        let expected = pixel_count(width, height).saturating_mul(4);
        if bytes.len() != expected {
            return Err(RasterError::LengthMismatch {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| Color::from_rgba(px[0], px[1], px[2], px[3]).argb())
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for &argb in &self.pixels {
            let color = Color::from_argb(argb);
            bytes.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }
        bytes
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> ImageBounds {
        ImageBounds::new(
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    fn checked_index(&self, point: ToolPoint) -> Option<usize> {
        if !self.bounds().contains(point) {
            return None;
        }
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        Some(self.index(x, y))
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.argb());
    }

    pub fn get(&self, point: ToolPoint) -> Option<Color> {
        self.checked_index(point)
            .map(|index| Color::from_argb(self.pixels[index]))
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        Color::from_argb(self.pixels[self.index(x, y)])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color.argb();
    }

    /// Makes `self` an exact copy of `other`, reusing the allocation when possible.
    pub fn copy_from(&mut self, other: &PixelBuffer) {
        self.width = other.width;
        self.height = other.height;
        self.pixels.clone_from(&other.pixels);
    }

    pub(super) fn replace_contents(&mut self, width: u32, height: u32, pixels: &[u32]) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.extend_from_slice(pixels);
    }

    /// Copies `region` of `source` so its top-left lands on `dest`.
    /// Both sides are clipped; pixels falling outside either buffer are skipped.
    pub fn copy_region(&mut self, source: &PixelBuffer, region: ToolBounds, dest: ToolPoint) {
        let clipped = region.clamp_to(source.bounds());
        if clipped.width == 0 || clipped.height == 0 {
            return;
        }
        let dest_x = i64::from(dest.x) + i64::from(clipped.x) - i64::from(region.x);
        let dest_y = i64::from(dest.y) + i64::from(clipped.y) - i64::from(region.y);

        let first_col = (-dest_x).max(0);
        let end_col = i64::from(clipped.width).min(i64::from(self.width) - dest_x);
        if first_col >= end_col {
            return;
        }
        let span = (end_col - first_col) as usize;

        for row in 0..i64::from(clipped.height) {
            let target_y = dest_y + row;
            if target_y < 0 || target_y >= i64::from(self.height) {
                continue;
            }
            let source_y = i64::from(clipped.y) + row;
            let source_start =
                (source_y * i64::from(source.width) + i64::from(clipped.x) + first_col) as usize;
            let target_start =
                (target_y * i64::from(self.width) + dest_x + first_col) as usize;
            self.pixels[target_start..target_start + span]
                .copy_from_slice(&source.pixels[source_start..source_start + span]);
        }
    }

    /// Returns an independent buffer holding `region` clipped to this buffer,
    /// or `None` when nothing of the region lies inside.
    pub fn cropped(&self, region: ToolBounds) -> Option<PixelBuffer> {
        let clipped = region.clamp_to(self.bounds());
        if clipped.width == 0 || clipped.height == 0 {
            return None;
        }
        let mut target = PixelBuffer::filled(clipped.width, clipped.height, Color::default());
        target.copy_region(self, clipped, ToolPoint::new(0, 0));
        Some(target)
    }

    pub fn rotate_clockwise(&mut self) {
        let (width, height) = (self.width as usize, self.height as usize);
        let mut rotated = vec![0; self.pixels.len()];
        for y in 0..height {
            for x in 0..width {
                let target_x = height - 1 - y;
                rotated[x * height + target_x] = self.pixels[y * width + x];
            }
        }
        self.pixels = rotated;
        std::mem::swap(&mut self.width, &mut self.height);
    }

    pub fn rotate_counter_clockwise(&mut self) {
        let (width, height) = (self.width as usize, self.height as usize);
        let mut rotated = vec![0; self.pixels.len()];
        for y in 0..height {
            for x in 0..width {
                let target_y = width - 1 - x;
                rotated[target_y * height + y] = self.pixels[y * width + x];
            }
        }
        self.pixels = rotated;
        std::mem::swap(&mut self.width, &mut self.height);
    }

    pub fn flip_horizontal(&mut self) {
        let width = self.width as usize;
        for row in self.pixels.chunks_exact_mut(width) {
            row.reverse();
        }
    }

    pub fn flip_vertical(&mut self) {
        let width = self.width as usize;
        let height = self.height as usize;
        for top in 0..height / 2 {
            let bottom = height - 1 - top;
            let (upper, lower) = self.pixels.split_at_mut(bottom * width);
            upper[top * width..(top + 1) * width].swap_with_slice(&mut lower[..width]);
        }
    }

    pub fn map_pixels(&mut self, mut transform: impl FnMut(Color) -> Color) {
        for pixel in &mut self.pixels {
            *pixel = transform(Color::from_argb(*pixel)).argb();
        }
    }

    /// Paints a filled disc, skipping pixels outside the buffer.
    pub fn fill_circle_clipped(&mut self, center: ToolPoint, radius: u32, color: Color) {
        let radius = i64::from(radius);
        let radius_sq = radius * radius;
        let argb = color.argb();
        for dy in -radius..=radius {
            let y = i64::from(center.y) + dy;
            if y < 0 || y >= i64::from(self.height) {
                continue;
            }
            for dx in -radius..=radius {
                if dx * dx + dy * dy > radius_sq {
                    continue;
                }
                let x = i64::from(center.x) + dx;
                if x < 0 || x >= i64::from(self.width) {
                    continue;
                }
                let index = y as usize * self.width as usize + x as usize;
                self.pixels[index] = argb;
            }
        }
    }

    /// Stamps discs along the segment so fast pointer moves leave no gaps.
    pub fn stroke_segment_clipped(
        &mut self,
        from: ToolPoint,
        to: ToolPoint,
        radius: u32,
        color: Color,
    ) {
        let dx = i64::from(to.x) - i64::from(from.x);
        let dy = i64::from(to.y) - i64::from(from.y);
        let steps = dx.abs().max(dy.abs()).max(1);
        for step in 0..=steps {
            let x = i64::from(from.x) + dx * step / steps;
            let y = i64::from(from.y) + dy * step / steps;
            let point = ToolPoint::new(
                i32::try_from(x).unwrap_or(from.x),
                i32::try_from(y).unwrap_or(from.y),
            );
            self.fill_circle_clipped(point, radius, color);
        }
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

fn validate_dimensions(width: u32, height: u32) -> RasterResult<()> {
    if width == 0 || height == 0 {
        return Err(RasterError::EmptyDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: Color = Color::from_argb(0xFF1E_1E1E);

    fn numbered(width: u32, height: u32) -> PixelBuffer {
        let pixels = (0..width * height).collect::<Vec<_>>();
        PixelBuffer::from_argb(width, height, pixels).expect("numbered buffer should build")
    }

    #[test]
    fn filled_buffer_has_width_times_height_pixels() {
        let buffer = PixelBuffer::filled(7, 3, FILL);
        assert_eq!(buffer.pixels().len(), 21);
        assert!(buffer.pixels().iter().all(|&px| px == FILL.argb()));

        let raised = PixelBuffer::filled(0, 0, FILL);
        assert_eq!((raised.width(), raised.height()), (1, 1));
    }

    #[test]
    fn from_argb_rejects_wrong_length_and_empty_dimensions() {
        let err = PixelBuffer::from_argb(2, 2, vec![0; 3]).expect_err("short data should fail");
        assert!(matches!(
            err,
            RasterError::LengthMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
        let err = PixelBuffer::from_argb(0, 2, Vec::new()).expect_err("zero width should fail");
        assert!(matches!(err, RasterError::EmptyDimensions { .. }));
    }

    #[test]
    fn rgba_bytes_convert_channel_order() {
        let buffer = PixelBuffer::from_rgba_bytes(1, 1, &[0x11, 0x22, 0x33, 0x44])
            .expect("one pixel should build");
        assert_eq!(buffer.pixel(0, 0), Color::from_argb(0x4411_2233));
        assert_eq!(buffer.to_rgba_bytes(), vec![0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn get_returns_none_outside_bounds() {
        let buffer = PixelBuffer::filled(4, 4, FILL);
        assert_eq!(buffer.get(ToolPoint::new(3, 3)), Some(FILL));
        assert_eq!(buffer.get(ToolPoint::new(4, 0)), None);
        assert_eq!(buffer.get(ToolPoint::new(-1, 0)), None);
    }

    #[test]
    fn clone_does_not_share_storage() {
        let original = PixelBuffer::filled(2, 2, FILL);
        let mut copy = original.clone();
        copy.set_pixel(0, 0, Color::WHITE);
        assert_eq!(original.pixel(0, 0), FILL);
        assert_eq!(copy.pixel(0, 0), Color::WHITE);
    }

    #[test]
    fn copy_from_adopts_other_dimensions() {
        let mut target = PixelBuffer::filled(2, 2, FILL);
        let source = numbered(3, 1);
        target.copy_from(&source);
        assert_eq!(target, source);
    }

    #[test]
    fn copy_region_clips_against_both_buffers() {
        let source = numbered(4, 4);
        let mut target = PixelBuffer::filled(3, 3, Color::default());
        target.copy_region(&source, ToolBounds::new(-1, 2, 3, 5), ToolPoint::new(1, 0));

        // Only source column 0 of rows 2..4 fits; it lands at x = 2.
        assert_eq!(target.pixel(2, 0).argb(), 8);
        assert_eq!(target.pixel(2, 1).argb(), 12);
        assert_eq!(target.pixel(1, 0).argb(), 0);
        assert_eq!(target.pixel(2, 2).argb(), 0);
    }

    #[test]
    fn cropped_returns_independent_region() {
        let source = numbered(4, 3);
        let cropped = source
            .cropped(ToolBounds::new(1, 1, 2, 2))
            .expect("region should be inside");
        assert_eq!((cropped.width(), cropped.height()), (2, 2));
        assert_eq!(cropped.pixels(), &[5, 6, 9, 10]);

        assert!(source.cropped(ToolBounds::new(10, 10, 2, 2)).is_none());
    }

    #[test]
    fn rotations_swap_dimensions_and_are_inverse() {
        let original = numbered(3, 2);
        let mut buffer = original.clone();
        buffer.rotate_clockwise();
        assert_eq!((buffer.width(), buffer.height()), (2, 3));
        // Bottom-left of the source becomes top-left.
        assert_eq!(buffer.pixel(0, 0).argb(), 3);
        assert_eq!(buffer.pixel(1, 0).argb(), 0);

        buffer.rotate_counter_clockwise();
        assert_eq!(buffer, original);
    }

    #[test]
    fn flips_mirror_rows_and_columns() {
        let mut buffer = numbered(3, 3);
        buffer.flip_horizontal();
        assert_eq!(&buffer.pixels()[..3], &[2, 1, 0]);

        let mut buffer = numbered(2, 3);
        buffer.flip_vertical();
        assert_eq!(buffer.pixels(), &[4, 5, 2, 3, 0, 1]);
    }

    #[test]
    fn fill_circle_clipped_ignores_out_of_bounds_parts() {
        let mut buffer = PixelBuffer::filled(5, 5, Color::BLACK);
        buffer.fill_circle_clipped(ToolPoint::new(0, 0), 1, Color::WHITE);
        assert_eq!(buffer.pixel(0, 0), Color::WHITE);
        assert_eq!(buffer.pixel(1, 0), Color::WHITE);
        assert_eq!(buffer.pixel(0, 1), Color::WHITE);
        assert_eq!(buffer.pixel(1, 1), Color::BLACK);
    }

    #[test]
    fn stroke_segment_leaves_no_gaps() {
        let mut buffer = PixelBuffer::filled(10, 1, Color::BLACK);
        buffer.stroke_segment_clipped(ToolPoint::new(0, 0), ToolPoint::new(9, 0), 0, Color::WHITE);
        assert!(buffer.pixels().iter().all(|&px| px == Color::WHITE.argb()));
    }
}
