use super::{RenderContext, Tool, ToolContext, ToolInput, ToolKind};
use crate::geometry::{Color, ToolPoint};
use crate::render::{OverlaySurface, ScreenRect};

const BRUSH_OUTLINE: Color = Color::from_argb(0xC0FF_FFFF);

/// Freehand brush painting into the matrix buffer.
///
/// One undo entry is recorded per gesture, at pointer-down.
#[derive(Debug, Clone, Default)]
pub struct DrawTool {
    last_point: Option<ToolPoint>,
    hover: Option<ToolPoint>,
}

impl DrawTool {
    pub const fn is_drawing(&self) -> bool {
        self.last_point.is_some()
    }
}

impl Tool for DrawTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Draw
    }

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) {
        ctx.state.push_undo_snapshot();
        let brush = *ctx.brush;
        ctx.state
            .matrix_mut()
            .fill_circle_clipped(input.image, brush.radius(), brush.color);
        ctx.state.mark_matrix_dirty();
        self.last_point = Some(input.image);
        self.hover = Some(input.image);
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) {
        self.hover = Some(input.image);
        let Some(last) = self.last_point else {
            return;
        };
        if last == input.image {
            return;
        }
        let brush = *ctx.brush;
        ctx.state
            .matrix_mut()
            .stroke_segment_clipped(last, input.image, brush.radius(), brush.color);
        ctx.state.mark_matrix_dirty();
        self.last_point = Some(input.image);
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) {
        if self.last_point.is_some() {
            self.on_pointer_move(ctx, input);
        }
        self.last_point = None;
    }

    fn on_cancel(&mut self, _ctx: &mut ToolContext<'_>) {
        self.last_point = None;
        self.hover = None;
    }

    fn on_render(&self, ctx: &RenderContext<'_>, surface: &mut dyn OverlaySurface) {
        let Some(hover) = self.hover else {
            return;
        };
        let radius = i32::try_from(ctx.brush.radius()).unwrap_or(i32::MAX);
        let top_left = ctx.view.image_to_screen(ToolPoint::new(
            hover.x.saturating_sub(radius),
            hover.y.saturating_sub(radius),
        ));
        let bottom_right = ctx.view.image_to_screen(ToolPoint::new(
            hover.x.saturating_add(radius).saturating_add(1),
            hover.y.saturating_add(radius).saturating_add(1),
        ));
        surface.stroke_rect(
            ScreenRect::from_corners(top_left, bottom_right),
            BRUSH_OUTLINE,
            1,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use super::*;
    use crate::editor::SyncFlag;
    use crate::render::{OverlayCommand, OverlayCommands};

    #[test]
    fn stroke_paints_matrix_and_records_single_undo_entry() {
        let mut harness = Harness::new(20, 20);
        let mut tool = DrawTool::default();

        harness.down(&mut tool, 2, 2);
        harness.drag(&mut tool, 8, 2);
        harness.drag(&mut tool, 8, 9);
        harness.up(&mut tool, 8, 9);

        assert_eq!(harness.state.undo_len(), 1);
        assert_eq!(harness.state.sync_flag(), SyncFlag::MatrixNewer);
        assert!(!tool.is_drawing());

        let matrix = harness.state.matrix();
        assert_eq!(matrix.pixel(5, 2), Color::BLACK);
        assert_eq!(matrix.pixel(8, 6), Color::BLACK);
        assert_eq!(matrix.pixel(15, 15), Color::WHITE);
    }

    #[test]
    fn stroke_is_undone_as_one_gesture() {
        let mut harness = Harness::new(20, 20);
        let mut tool = DrawTool::default();

        harness.down(&mut tool, 1, 1);
        harness.drag(&mut tool, 18, 18);
        harness.up(&mut tool, 18, 18);

        assert!(harness.state.try_undo());
        assert!(harness
            .state
            .raster()
            .pixels()
            .iter()
            .all(|&pixel| pixel == Color::WHITE.argb()));
    }

    #[test]
    fn hover_without_press_does_not_paint() {
        let mut harness = Harness::new(10, 10);
        let mut tool = DrawTool::default();
        harness.drag(&mut tool, 4, 4);

        assert_eq!(harness.state.undo_len(), 0);
        assert_eq!(harness.state.sync_flag(), SyncFlag::InSync);
        assert_eq!(harness.state.matrix().pixel(4, 4), Color::WHITE);
    }

    #[test]
    fn dab_near_edge_is_clipped() {
        let mut harness = Harness::new(10, 10);
        harness.brush.set_radius(4);
        let mut tool = DrawTool::default();
        harness.down(&mut tool, -2, 9);
        harness.up(&mut tool, -2, 9);
        assert_eq!(harness.state.matrix().pixel(0, 9), Color::BLACK);
    }

    #[test]
    fn render_outlines_brush_at_hover_point() {
        let mut harness = Harness::new(40, 40);
        harness.brush.set_radius(2);
        let mut tool = DrawTool::default();
        harness.drag(&mut tool, 10, 10);

        let mut overlay = OverlayCommands::new();
        tool.on_render(&harness.render_ctx(), &mut overlay);
        assert_eq!(
            overlay.commands(),
            &[OverlayCommand::StrokeRect {
                rect: ScreenRect::new(8, 8, 5, 5),
                color: BRUSH_OUTLINE,
                thickness: 1,
            }]
        );

        tool.on_cancel(&mut harness.ctx());
        overlay.clear();
        tool.on_render(&harness.render_ctx(), &mut overlay);
        assert!(overlay.is_empty());
    }
}
