//! Shared geometric and color primitives used across raster, editor and render modules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in image space (pixel coordinates of the edited raster).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolPoint {
    pub x: i32,
    pub y: i32,
}

impl ToolPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A point in screen space (window client coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ToolBounds {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the box spanned by two corners given in any order.
    pub fn from_corners(start: ToolPoint, end: ToolPoint) -> Self {
        let left = start.x.min(end.x);
        let top = start.y.min(end.y);
        let width = start.x.abs_diff(end.x);
        let height = start.y.abs_diff(end.y);
        Self::new(left, top, width, height)
    }

    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Intersects the box with `[0, width) x [0, height)`.
    pub fn clamp_to(&self, image: ImageBounds) -> Self {
        let max_x = i64::from(image.width.max(0));
        let max_y = i64::from(image.height.max(0));
        let left = i64::from(self.x).clamp(0, max_x);
        let top = i64::from(self.y).clamp(0, max_y);
        let right = self.right().clamp(0, max_x);
        let bottom = self.bottom().clamp(0, max_y);
        Self::new(
            i32::try_from(left).unwrap_or(0),
            i32::try_from(top).unwrap_or(0),
            u32::try_from(right - left).unwrap_or(0),
            u32::try_from(bottom - top).unwrap_or(0),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageBounds {
    pub width: i32,
    pub height: i32,
}

impl ImageBounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn contains(&self, point: ToolPoint) -> bool {
        point.x >= 0 && point.y >= 0 && point.x < self.width && point.y < self.height
    }
}

/// 32-bit `0xAARRGGBB` color, the pixel format of every buffer in the editor.
///
/// Serializes as a `#AARRGGBB` string and accepts `#RRGGBB` on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {input:?}: expected #RRGGBB or #AARRGGBB")]
pub struct ParseColorError {
    input: String,
}

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);

    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// `#RRGGBB` for opaque colors, `#AARRGGBB` otherwise.
    pub fn hex_label(self) -> String {
        if self.alpha() == 0xFF {
            format!("#{:06X}", self.0 & 0x00FF_FFFF)
        } else {
            format!("#{:08X}", self.0)
        }
    }

    pub fn parse_hex(input: &str) -> Result<Self, ParseColorError> {
        let error = || ParseColorError {
            input: input.to_string(),
        };
        let digits = input.trim().strip_prefix('#').ok_or_else(error)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(error());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| error())?;
        match digits.len() {
            6 => Ok(Self(0xFF00_0000 | value)),
            8 => Ok(Self(value)),
            _ => Err(error()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex_label())
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        format!("#{:08X}", color.argb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_bounds_from_corners_normalizes_any_drag_direction() {
        let bounds = ToolBounds::from_corners(ToolPoint::new(50, 10), ToolPoint::new(10, 40));
        assert_eq!(bounds, ToolBounds::new(10, 10, 40, 30));
    }

    #[test]
    fn tool_bounds_clamp_to_intersects_with_image() {
        let bounds = ToolBounds::new(-5, 90, 30, 40).clamp_to(ImageBounds::new(100, 100));
        assert_eq!(bounds, ToolBounds::new(0, 90, 25, 10));

        let outside = ToolBounds::new(120, 120, 10, 10).clamp_to(ImageBounds::new(100, 100));
        assert_eq!(outside.width, 0);
        assert_eq!(outside.height, 0);
    }

    #[test]
    fn image_bounds_contains_only_pixels_inside() {
        let image = ImageBounds::new(100, 50);
        assert!(image.contains(ToolPoint::new(0, 0)));
        assert!(image.contains(ToolPoint::new(99, 49)));
        assert!(!image.contains(ToolPoint::new(100, 10)));
        assert!(!image.contains(ToolPoint::new(-1, 10)));
    }

    #[test]
    fn color_channels_and_hex_labels() {
        let color = Color::from_argb(0xFF1E_2D3C);
        assert_eq!(color.alpha(), 0xFF);
        assert_eq!(color.red(), 0x1E);
        assert_eq!(color.green(), 0x2D);
        assert_eq!(color.blue(), 0x3C);
        assert_eq!(color.hex_label(), "#1E2D3C");
        assert_eq!(Color::from_argb(0x801E_2D3C).hex_label(), "#801E2D3C");
        assert_eq!(Color::from_rgba(0x1E, 0x2D, 0x3C, 0xFF), color);
    }

    #[test]
    fn color_parse_hex_accepts_rgb_and_argb_forms() {
        assert_eq!(
            Color::parse_hex("#1E1E1E").expect("rgb form should parse"),
            Color::from_argb(0xFF1E_1E1E)
        );
        assert_eq!(
            Color::parse_hex("#801E1E1E").expect("argb form should parse"),
            Color::from_argb(0x801E_1E1E)
        );
        assert!(Color::parse_hex("1E1E1E").is_err());
        assert!(Color::parse_hex("#12345").is_err());
        assert!(Color::parse_hex("#GG0000").is_err());
    }
}
