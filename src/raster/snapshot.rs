use std::sync::Arc;

use super::PixelBuffer;

/// Frozen copy of a buffer's pixels.
///
/// Pixel data sits behind an `Arc`, so moving a snapshot between the undo and
/// redo stacks or cloning it never copies pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Arc<[u32]>,
}

impl Snapshot {
    pub fn capture(buffer: &PixelBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            pixels: Arc::from(buffer.pixels()),
        }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Overwrites `target` (dimensions included) with the captured pixels.
    pub fn restore_into(&self, target: &mut PixelBuffer) {
        target.replace_contents(self.width, self.height, &self.pixels);
    }

    pub fn matches(&self, buffer: &PixelBuffer) -> bool {
        self.width == buffer.width()
            && self.height == buffer.height()
            && *self.pixels == *buffer.pixels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Color;

    #[test]
    fn snapshot_is_unaffected_by_later_buffer_edits() {
        let mut buffer = PixelBuffer::filled(3, 2, Color::BLACK);
        let snapshot = Snapshot::capture(&buffer);
        buffer.set_pixel(1, 1, Color::WHITE);

        assert!(!snapshot.matches(&buffer));
        snapshot.restore_into(&mut buffer);
        assert_eq!(buffer, PixelBuffer::filled(3, 2, Color::BLACK));
    }

    #[test]
    fn restore_into_replaces_dimensions() {
        let source = PixelBuffer::filled(4, 1, Color::WHITE);
        let snapshot = Snapshot::capture(&source);
        let mut target = PixelBuffer::filled(2, 2, Color::BLACK);
        snapshot.restore_into(&mut target);
        assert_eq!(target, source);
    }

    #[test]
    fn cloned_snapshots_share_pixel_storage() {
        let snapshot = Snapshot::capture(&PixelBuffer::filled(8, 8, Color::BLACK));
        let clone = snapshot.clone();
        assert!(std::ptr::eq(snapshot.pixels(), clone.pixels()));
    }
}
