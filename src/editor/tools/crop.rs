use super::{RenderContext, Tool, ToolContext, ToolInput, ToolKind};
use crate::geometry::{Color, ScreenPoint, ToolBounds, ToolPoint};
use crate::input::{InputModifiers, ShortcutKey};
use crate::render::{OverlaySurface, ScreenRect};

const CROP_FRAME_COLOR: Color = Color::WHITE;
const CROP_LABEL_COLOR: Color = Color::WHITE;
const CROP_LABEL_OFFSET_PX: i32 = 4;

/// Two corners of a pending crop in image space, in drag order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropSelection {
    pub anchor: ToolPoint,
    pub end: ToolPoint,
}

impl CropSelection {
    pub fn bounds(&self) -> ToolBounds {
        ToolBounds::from_corners(self.anchor, self.end)
    }
}

/// Rubber-band crop: drag to select, Enter applies, Escape discards.
#[derive(Debug, Clone, Default)]
pub struct CropTool {
    selection: Option<CropSelection>,
    dragging: bool,
}

impl CropTool {
    pub const fn selection(&self) -> Option<CropSelection> {
        self.selection
    }

    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn clear(&mut self) {
        self.selection = None;
        self.dragging = false;
    }
}

impl Tool for CropTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Crop
    }

    fn on_pointer_down(&mut self, _ctx: &mut ToolContext<'_>, input: &ToolInput) {
        self.selection = Some(CropSelection {
            anchor: input.image,
            end: input.image,
        });
        self.dragging = true;
    }

    fn on_pointer_move(&mut self, _ctx: &mut ToolContext<'_>, input: &ToolInput) {
        if !self.dragging {
            return;
        }
        if let Some(selection) = self.selection.as_mut() {
            selection.end = input.image;
        }
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) {
        self.on_pointer_move(ctx, input);
        self.dragging = false;
    }

    fn on_key_down(
        &mut self,
        ctx: &mut ToolContext<'_>,
        key: ShortcutKey,
        modifiers: InputModifiers,
    ) -> bool {
        if modifiers != InputModifiers::NONE {
            return false;
        }
        match key {
            ShortcutKey::Escape => {
                let had_selection = self.selection.is_some();
                self.clear();
                had_selection
            }
            ShortcutKey::Enter => {
                let Some(selection) = self.selection else {
                    return false;
                };
                self.clear();
                ctx.state.apply_crop(selection.anchor, selection.end);
                true
            }
            _ => false,
        }
    }

    fn on_cancel(&mut self, _ctx: &mut ToolContext<'_>) {
        self.clear();
    }

    fn on_render(&self, ctx: &RenderContext<'_>, surface: &mut dyn OverlaySurface) {
        let Some(selection) = self.selection else {
            return;
        };
        let bounds = selection.bounds();
        let right = i32::try_from(bounds.right()).unwrap_or(i32::MAX);
        let bottom = i32::try_from(bounds.bottom()).unwrap_or(i32::MAX);
        let top_left = ctx.view.image_to_screen(ToolPoint::new(bounds.x, bounds.y));
        let bottom_right = ctx.view.image_to_screen(ToolPoint::new(right, bottom));
        surface.stroke_rect(
            ScreenRect::from_corners(top_left, bottom_right),
            CROP_FRAME_COLOR,
            1,
        );
        surface.draw_text(
            ScreenPoint::new(
                top_left.x,
                bottom_right.y.saturating_add(CROP_LABEL_OFFSET_PX),
            ),
            &format!("{} x {}", bounds.width, bounds.height),
            CROP_LABEL_COLOR,
        );
    }
}
