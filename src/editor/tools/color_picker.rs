use super::{RenderContext, Tool, ToolContext, ToolInput, ToolKind};
use crate::geometry::{Color, ScreenPoint};
use crate::render::{OverlaySurface, ScreenRect};

const SWATCH_SIZE_PX: i32 = 16;
const SWATCH_MARGIN_PX: i32 = 8;
const SWATCH_BORDER: Color = Color::WHITE;
const LABEL_COLOR: Color = Color::WHITE;

/// Samples the working buffer and hands the color to the brush.
#[derive(Debug, Clone, Default)]
pub struct ColorPickerTool {
    picked: Option<Color>,
}

impl ColorPickerTool {
    pub const fn picked(&self) -> Option<Color> {
        self.picked
    }
}

impl Tool for ColorPickerTool {
    fn kind(&self) -> ToolKind {
        ToolKind::ColorPicker
    }

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) {
        let Some(color) = ctx.state.matrix().get(input.image) else {
            return;
        };
        self.picked = Some(color);
        ctx.brush.color = color;
        tracing::debug!(color = %color, x = input.image.x, y = input.image.y, "color picked");
    }

    fn on_pointer_move(&mut self, _ctx: &mut ToolContext<'_>, _input: &ToolInput) {}

    fn on_pointer_up(&mut self, _ctx: &mut ToolContext<'_>, _input: &ToolInput) {}

    fn on_cancel(&mut self, _ctx: &mut ToolContext<'_>) {}

    fn on_render(&self, _ctx: &RenderContext<'_>, surface: &mut dyn OverlaySurface) {
        let Some(color) = self.picked else {
            return;
        };
        let swatch = ScreenRect::new(
            SWATCH_MARGIN_PX,
            SWATCH_MARGIN_PX,
            SWATCH_SIZE_PX,
            SWATCH_SIZE_PX,
        );
        surface.fill_rect(swatch, color);
        surface.stroke_rect(swatch, SWATCH_BORDER, 1);
        surface.draw_text(
            ScreenPoint::new(SWATCH_MARGIN_PX * 2 + SWATCH_SIZE_PX, SWATCH_MARGIN_PX),
            &color.hex_label(),
            LABEL_COLOR,
        );
    }
}
