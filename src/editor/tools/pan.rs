use super::{Tool, ToolContext, ToolInput, ToolKind};
use crate::geometry::ScreenPoint;

/// Drag-to-pan. Tracks the previous screen point and applies per-move deltas.
#[derive(Debug, Clone, Default)]
pub struct PanTool {
    last_screen: Option<ScreenPoint>,
}

impl PanTool {
    pub const fn is_panning(&self) -> bool {
        self.last_screen.is_some()
    }
}

impl Tool for PanTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pan
    }

    fn on_pointer_down(&mut self, _ctx: &mut ToolContext<'_>, input: &ToolInput) {
        self.last_screen = Some(input.screen);
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) {
        let Some(last) = self.last_screen else {
            return;
        };
        ctx.view.pan_by(
            input.screen.x.saturating_sub(last.x),
            input.screen.y.saturating_sub(last.y),
        );
        self.last_screen = Some(input.screen);
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) {
        self.on_pointer_move(ctx, input);
        self.last_screen = None;
    }

    fn on_cancel(&mut self, _ctx: &mut ToolContext<'_>) {
        self.last_screen = None;
    }
}
