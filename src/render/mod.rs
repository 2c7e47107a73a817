//! Overlay drawing seam and frame composition for the hosting window.

use crate::editor::ViewTransform;
use crate::geometry::{Color, ScreenPoint};
use crate::raster::PixelBuffer;

/// Screen-space rectangle used by overlay drawing calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_corners(start: ScreenPoint, end: ScreenPoint) -> Self {
        let left = start.x.min(end.x);
        let top = start.y.min(end.y);
        Self::new(
            left,
            top,
            start.x.max(end.x).saturating_sub(left),
            start.y.max(end.y).saturating_sub(top),
        )
    }
}

/// Drawing primitives a tool may use on top of the composed frame.
pub trait OverlaySurface {
    fn stroke_rect(&mut self, rect: ScreenRect, color: Color, thickness: u32);
    fn fill_rect(&mut self, rect: ScreenRect, color: Color);
    fn draw_text(&mut self, origin: ScreenPoint, text: &str, color: Color);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayCommand {
    StrokeRect {
        rect: ScreenRect,
        color: Color,
        thickness: u32,
    },
    FillRect {
        rect: ScreenRect,
        color: Color,
    },
    Text {
        origin: ScreenPoint,
        text: String,
        color: Color,
    },
}

/// Records overlay calls so the host can replay them with its own painter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayCommands {
    commands: Vec<OverlayCommand>,
}

impl OverlayCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[OverlayCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            OverlayCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl OverlaySurface for OverlayCommands {
    fn stroke_rect(&mut self, rect: ScreenRect, color: Color, thickness: u32) {
        self.commands.push(OverlayCommand::StrokeRect {
            rect,
            color,
            thickness,
        });
    }

    fn fill_rect(&mut self, rect: ScreenRect, color: Color) {
        self.commands.push(OverlayCommand::FillRect { rect, color });
    }

    fn draw_text(&mut self, origin: ScreenPoint, text: &str, color: Color) {
        self.commands.push(OverlayCommand::Text {
            origin,
            text: text.to_string(),
            color,
        });
    }
}

/// Samples `matrix` through `view` into a viewport-sized buffer.
///
/// Nearest-neighbour: each screen pixel takes the image pixel containing its
/// center. Screen pixels that land outside the image get `background`.
pub fn compose_frame(matrix: &PixelBuffer, view: &ViewTransform, background: Color) -> PixelBuffer {
    let (width, height) = view.viewport_size();
    let mut frame = PixelBuffer::filled(width, height, background);
    if width == 0 || height == 0 {
        return frame;
    }

    let zoom = view.zoom();
    let pan_x = f64::from(view.pan_x());
    let pan_y = f64::from(view.pan_y());
    let image_width = i64::from(matrix.width());
    let image_height = i64::from(matrix.height());
    let source = matrix.pixels();

    let columns: Vec<Option<usize>> = (0..width)
        .map(|x| {
            let image_x = ((f64::from(x) + 0.5 - pan_x) / zoom).floor() as i64;
            (0..image_width)
                .contains(&image_x)
                .then_some(image_x as usize)
        })
        .collect();

    let row_len = width as usize;
    for (y, row) in frame.pixels_mut().chunks_exact_mut(row_len).enumerate() {
        let image_y = ((y as f64 + 0.5 - pan_y) / zoom).floor() as i64;
        if !(0..image_height).contains(&image_y) {
            continue;
        }
        let source_row = image_y as usize * matrix.width() as usize;
        for (target, column) in row.iter_mut().zip(&columns) {
            if let Some(image_x) = column {
                *target = source[source_row + image_x];
            }
        }
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_rect_from_corners_normalizes() {
        let rect = ScreenRect::from_corners(ScreenPoint::new(30, 5), ScreenPoint::new(10, 25));
        assert_eq!(rect, ScreenRect::new(10, 5, 20, 20));
    }

    #[test]
    fn overlay_commands_record_calls_in_order() {
        let mut overlay = OverlayCommands::new();
        overlay.fill_rect(ScreenRect::new(0, 0, 4, 4), Color::BLACK);
        overlay.draw_text(ScreenPoint::new(1, 2), "40 x 40", Color::WHITE);
        assert_eq!(overlay.commands().len(), 2);
        assert_eq!(overlay.texts().collect::<Vec<_>>(), vec!["40 x 40"]);
        overlay.clear();
        assert!(overlay.is_empty());
    }

    #[test]
    fn compose_frame_identity_copies_image_and_pads_background() {
        let mut image = PixelBuffer::filled(2, 2, Color::WHITE);
        image.set_pixel(1, 1, Color::from_argb(0xFF11_2233));
        let mut view = ViewTransform::default();
        view.set_viewport_size(3, 3);

        let frame = compose_frame(&image, &view, Color::BLACK);
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.pixel(0, 0), Color::WHITE);
        assert_eq!(frame.pixel(1, 1), Color::from_argb(0xFF11_2233));
        assert_eq!(frame.pixel(2, 0), Color::BLACK);
        assert_eq!(frame.pixel(0, 2), Color::BLACK);
    }

    #[test]
    fn compose_frame_magnifies_with_nearest_neighbour() {
        let mut image = PixelBuffer::filled(2, 1, Color::WHITE);
        image.set_pixel(1, 0, Color::BLACK);
        let mut view = ViewTransform::default();
        view.set_viewport_size(4, 2);
        view.zoom_at(ScreenPoint::new(0, 0), 2.0);

        let frame = compose_frame(&image, &view, Color::from_argb(0));
        let row: Vec<Color> = (0..4).map(|x| frame.pixel(x, 0)).collect();
        assert_eq!(row, vec![Color::WHITE, Color::WHITE, Color::BLACK, Color::BLACK]);
        assert_eq!(frame.pixel(0, 1), Color::WHITE);
    }

    #[test]
    fn compose_frame_respects_pan() {
        let image = PixelBuffer::filled(2, 2, Color::WHITE);
        let mut view = ViewTransform::default();
        view.set_viewport_size(4, 4);
        view.pan_by(2, 2);

        let frame = compose_frame(&image, &view, Color::BLACK);
        assert_eq!(frame.pixel(1, 1), Color::BLACK);
        assert_eq!(frame.pixel(2, 2), Color::WHITE);
        assert_eq!(frame.pixel(3, 3), Color::WHITE);
    }
}
