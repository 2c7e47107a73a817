use crate::geometry::Color;

use super::PixelBuffer;

/// Whole-buffer pixel transforms, each applied as a single undoable edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterOp {
    RotateClockwise,
    RotateCounterClockwise,
    FlipHorizontal,
    FlipVertical,
    Invert,
    Grayscale,
}

impl RasterOp {
    pub const ALL: [RasterOp; 6] = [
        Self::RotateClockwise,
        Self::RotateCounterClockwise,
        Self::FlipHorizontal,
        Self::FlipVertical,
        Self::Invert,
        Self::Grayscale,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::RotateClockwise => "rotate clockwise",
            Self::RotateCounterClockwise => "rotate counter-clockwise",
            Self::FlipHorizontal => "flip horizontal",
            Self::FlipVertical => "flip vertical",
            Self::Invert => "invert",
            Self::Grayscale => "grayscale",
        }
    }

    pub fn apply(self, buffer: &mut PixelBuffer) {
        match self {
            Self::RotateClockwise => buffer.rotate_clockwise(),
            Self::RotateCounterClockwise => buffer.rotate_counter_clockwise(),
            Self::FlipHorizontal => buffer.flip_horizontal(),
            Self::FlipVertical => buffer.flip_vertical(),
            Self::Invert => buffer.map_pixels(invert),
            Self::Grayscale => buffer.map_pixels(grayscale),
        }
    }
}

pub(crate) fn invert(color: Color) -> Color {
    Color::from_argb(color.argb() ^ 0x00FF_FFFF)
}

/// Rec.601 integer luma; alpha is preserved.
pub(crate) fn grayscale(color: Color) -> Color {
    let luma = (299 * u32::from(color.red())
        + 587 * u32::from(color.green())
        + 114 * u32::from(color.blue()))
        / 1000;
    let luma = luma.min(255) as u8;
    Color::from_rgba(luma, luma, luma, color.alpha())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_keeps_alpha_and_is_an_involution() {
        let color = Color::from_argb(0x8012_3456);
        assert_eq!(invert(color), Color::from_argb(0x80ED_CBA9));
        assert_eq!(invert(invert(color)), color);
    }

    #[test]
    fn grayscale_fixes_neutral_grays_and_keeps_alpha() {
        assert_eq!(
            grayscale(Color::from_argb(0xFF1E_1E1E)),
            Color::from_argb(0xFF1E_1E1E)
        );
        assert_eq!(grayscale(Color::WHITE), Color::WHITE);
        let red = grayscale(Color::from_argb(0x40FF_0000));
        assert_eq!(red.alpha(), 0x40);
        assert_eq!(red.red(), 76);
        assert_eq!(red.red(), red.green());
        assert_eq!(red.green(), red.blue());
    }

    #[test]
    fn only_rotations_change_dimensions() {
        for op in RasterOp::ALL {
            let mut buffer = PixelBuffer::filled(4, 2, Color::BLACK);
            op.apply(&mut buffer);
            let swapped = (buffer.width(), buffer.height()) == (2, 4);
            let rotation = matches!(
                op,
                RasterOp::RotateClockwise | RasterOp::RotateCounterClockwise
            );
            assert_eq!(swapped, rotation, "{op:?}");
        }
    }
}
