use crate::geometry::{Color, ImageBounds, ToolBounds, ToolPoint};
use crate::raster::{PixelBuffer, RasterOp, Snapshot};

use super::history::{SnapshotHistory, DEFAULT_HISTORY_LIMIT};

/// Which buffer holds the most recent edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncFlag {
    InSync,
    RasterNewer,
    MatrixNewer,
}

/// Committed `raster` plus interactive `matrix`, reconciled lazily.
///
/// Reads go through [`EditorState::raster`] / [`EditorState::matrix`], which
/// copy from the other buffer only when it is newer. Every snapshot taken for
/// history reconciles the raster first, so a stroke that only reached the
/// matrix is never dropped from undo.
#[derive(Debug, Clone)]
pub struct EditorState {
    raster: PixelBuffer,
    matrix: PixelBuffer,
    sync: SyncFlag,
    original: Snapshot,
    history: SnapshotHistory,
    has_loaded_image: bool,
}

impl EditorState {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self::from_buffer(
            PixelBuffer::filled(width, height, background),
            DEFAULT_HISTORY_LIMIT,
        )
    }

    /// Blank-canvas state whose revert baseline is `canvas`.
    pub fn from_buffer(canvas: PixelBuffer, history_limit: usize) -> Self {
        Self {
            original: Snapshot::capture(&canvas),
            matrix: canvas.clone(),
            raster: canvas,
            sync: SyncFlag::InSync,
            history: SnapshotHistory::new(history_limit),
            has_loaded_image: false,
        }
    }

    pub const fn sync_flag(&self) -> SyncFlag {
        self.sync
    }

    pub const fn has_loaded_image(&self) -> bool {
        self.has_loaded_image
    }

    pub fn undo_len(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    pub fn can_undo(&self) -> bool {
        self.history.undo_len() > 0
    }

    pub fn can_redo(&self) -> bool {
        self.history.redo_len() > 0
    }

    pub fn original(&self) -> &Snapshot {
        &self.original
    }

    /// Size of whichever buffer currently holds the latest edit.
    pub fn bounds(&self) -> ImageBounds {
        match self.sync {
            SyncFlag::MatrixNewer => self.matrix.bounds(),
            SyncFlag::InSync | SyncFlag::RasterNewer => self.raster.bounds(),
        }
    }

    fn sync_to_raster(&mut self) {
        if self.sync == SyncFlag::MatrixNewer {
            self.raster.copy_from(&self.matrix);
            self.sync = SyncFlag::InSync;
        }
    }

    fn sync_to_matrix(&mut self) {
        if self.sync == SyncFlag::RasterNewer {
            self.matrix.copy_from(&self.raster);
            self.sync = SyncFlag::InSync;
        }
    }

    pub fn raster(&mut self) -> &PixelBuffer {
        self.sync_to_raster();
        &self.raster
    }

    pub fn matrix(&mut self) -> &PixelBuffer {
        self.sync_to_matrix();
        &self.matrix
    }

    /// Reconciled raster for direct writes. Call [`EditorState::mark_raster_dirty`] afterwards.
    pub fn raster_mut(&mut self) -> &mut PixelBuffer {
        self.sync_to_raster();
        &mut self.raster
    }

    /// Reconciled matrix for direct writes. Call [`EditorState::mark_matrix_dirty`] afterwards.
    pub fn matrix_mut(&mut self) -> &mut PixelBuffer {
        self.sync_to_matrix();
        &mut self.matrix
    }

    pub fn mark_matrix_dirty(&mut self) {
        self.sync = SyncFlag::MatrixNewer;
    }

    pub fn mark_raster_dirty(&mut self) {
        self.sync = SyncFlag::RasterNewer;
    }

    /// Records the current raster as an undo step and invalidates redo.
    pub fn push_undo_snapshot(&mut self) {
        self.sync_to_raster();
        self.history.record(Snapshot::capture(&self.raster));
    }

    /// Undoable whole-raster edit; the matrix is refreshed before returning.
    pub fn apply_raster_edit(&mut self, edit: impl FnOnce(&mut PixelBuffer)) {
        self.push_undo_snapshot();
        edit(&mut self.raster);
        self.sync = SyncFlag::RasterNewer;
        self.sync_to_matrix();
    }

    pub fn apply_raster_op(&mut self, op: RasterOp) {
        self.apply_raster_edit(|raster| op.apply(raster));
        tracing::debug!(op = op.label(), "raster op applied");
    }

    /// Installs a freshly decoded image as both buffers and as the revert baseline.
    pub fn replace_raster(&mut self, buffer: PixelBuffer) {
        self.push_undo_snapshot();
        self.original = Snapshot::capture(&buffer);
        self.matrix.copy_from(&buffer);
        self.raster = buffer;
        self.sync = SyncFlag::InSync;
        self.has_loaded_image = true;
        tracing::debug!(
            width = self.raster.width(),
            height = self.raster.height(),
            "raster replaced"
        );
    }

    /// Crops both buffers to the box spanned by two corners.
    ///
    /// The box is clamped to the image; if either side ends up at one pixel or
    /// less nothing changes, no undo entry is recorded and `false` is returned.
    pub fn apply_crop(&mut self, first: ToolPoint, second: ToolPoint) -> bool {
        self.sync_to_raster();
        let region = ToolBounds::from_corners(first, second).clamp_to(self.raster.bounds());
        if region.width <= 1 || region.height <= 1 {
            tracing::debug!(?region, "crop rejected: degenerate region");
            return false;
        }
        let Some(cropped) = self.raster.cropped(region) else {
            return false;
        };

        self.history.record(Snapshot::capture(&self.raster));
        self.matrix.copy_from(&cropped);
        self.raster = cropped;
        self.sync = SyncFlag::InSync;
        tracing::debug!(?region, "crop applied");
        true
    }

    pub fn apply_crop_bounds(&mut self, bounds: ToolBounds) -> bool {
        let right = i32::try_from(bounds.right()).unwrap_or(i32::MAX);
        let bottom = i32::try_from(bounds.bottom()).unwrap_or(i32::MAX);
        self.apply_crop(
            ToolPoint::new(bounds.x, bounds.y),
            ToolPoint::new(right, bottom),
        )
    }

    pub fn try_undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.sync_to_raster();
        let current = Snapshot::capture(&self.raster);
        match self.history.step_back(current) {
            Some(restored) => {
                self.restore(&restored);
                tracing::debug!(
                    undo = self.undo_len(),
                    redo = self.redo_len(),
                    "undo applied"
                );
                true
            }
            None => false,
        }
    }

    pub fn try_redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.sync_to_raster();
        let current = Snapshot::capture(&self.raster);
        match self.history.step_forward(current) {
            Some(restored) => {
                self.restore(&restored);
                tracing::debug!(
                    undo = self.undo_len(),
                    redo = self.redo_len(),
                    "redo applied"
                );
                true
            }
            None => false,
        }
    }

    /// Undoable return to the revert baseline.
    pub fn reset_to_original(&mut self) {
        self.push_undo_snapshot();
        let original = self.original.clone();
        self.restore(&original);
    }

    fn restore(&mut self, snapshot: &Snapshot) {
        snapshot.restore_into(&mut self.raster);
        snapshot.restore_into(&mut self.matrix);
        self.sync = SyncFlag::InSync;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: Color = Color::from_argb(0xFF1E_1E1E);

    fn state() -> EditorState {
        EditorState::new(100, 100, FILL)
    }

    fn paint_matrix(state: &mut EditorState, x: u32, y: u32, color: Color) {
        state.matrix_mut().set_pixel(x, y, color);
        state.mark_matrix_dirty();
    }

    #[test]
    fn new_state_starts_in_sync_without_history() {
        let state = state();
        assert_eq!(state.sync_flag(), SyncFlag::InSync);
        assert_eq!(state.undo_len(), 0);
        assert_eq!(state.redo_len(), 0);
        assert!(!state.has_loaded_image());
        assert_eq!(state.bounds(), ImageBounds::new(100, 100));
    }

    #[test]
    fn matrix_edits_reach_raster_through_accessor() {
        let mut state = state();
        paint_matrix(&mut state, 3, 4, Color::WHITE);
        assert_eq!(state.sync_flag(), SyncFlag::MatrixNewer);

        assert_eq!(state.raster().pixel(3, 4), Color::WHITE);
        assert_eq!(state.sync_flag(), SyncFlag::InSync);
        let raster = state.raster().clone();
        assert_eq!(state.matrix(), &raster);
    }

    #[test]
    fn raster_edits_reach_matrix_through_accessor() {
        let mut state = state();
        state.raster_mut().set_pixel(0, 0, Color::WHITE);
        state.mark_raster_dirty();

        assert_eq!(state.matrix().pixel(0, 0), Color::WHITE);
        assert_eq!(state.sync_flag(), SyncFlag::InSync);
    }

    #[test]
    fn accessors_agree_after_mixed_edit_sequences() {
        let mut state = state();
        state.apply_raster_op(RasterOp::Invert);
        paint_matrix(&mut state, 1, 1, Color::BLACK);
        state.apply_raster_op(RasterOp::FlipHorizontal);
        paint_matrix(&mut state, 2, 2, Color::WHITE);
        state.raster_mut().set_pixel(5, 5, Color::WHITE);
        state.mark_raster_dirty();

        let matrix = state.matrix().clone();
        let raster = state.raster().clone();
        assert_eq!(matrix, raster);
        assert_eq!(state.sync_flag(), SyncFlag::InSync);
        assert_eq!(raster.pixel(98, 1), Color::BLACK);
        assert_eq!(raster.pixel(2, 2), Color::WHITE);
        assert_eq!(raster.pixel(5, 5), Color::WHITE);
    }

    #[test]
    fn undo_restores_state_captured_before_mutation() {
        let mut state = state();
        paint_matrix(&mut state, 10, 10, Color::WHITE);
        let before = state.raster().clone();

        state.push_undo_snapshot();
        paint_matrix(&mut state, 20, 20, Color::BLACK);
        assert!(state.try_undo());

        assert_eq!(state.raster(), &before);
        assert_eq!(state.matrix(), &before);
    }

    #[test]
    fn redo_reapplies_undone_edit() {
        let mut state = state();
        state.apply_raster_op(RasterOp::Invert);
        let inverted = state.raster().clone();

        assert!(state.try_undo());
        assert_eq!(state.raster().pixel(0, 0), FILL);
        assert!(state.try_redo());
        assert_eq!(state.raster(), &inverted);
        assert_eq!(state.undo_len(), 1);
        assert_eq!(state.redo_len(), 0);
    }

    #[test]
    fn new_edit_after_undo_discards_redo() {
        let mut state = state();
        state.apply_raster_op(RasterOp::Invert);
        assert!(state.try_undo());
        assert_eq!(state.redo_len(), 1);

        state.apply_raster_op(RasterOp::FlipVertical);
        assert!(!state.try_redo());
    }

    #[test]
    fn empty_history_reports_failure_without_changes() {
        let mut state = state();
        assert!(!state.try_undo());
        assert!(!state.try_redo());
        assert_eq!(state.raster().pixel(0, 0), FILL);
    }

    #[test]
    fn history_keeps_only_the_most_recent_twenty_edits() {
        let mut state = state();
        for step in 1..=25u32 {
            state.apply_raster_edit(|raster| raster.set_pixel(0, 0, Color::from_argb(step)));
        }
        assert_eq!(state.undo_len(), 20);

        let mut undone = 0;
        while state.try_undo() {
            undone += 1;
        }
        assert_eq!(undone, 20);
        // The state before edit 6 is the oldest one left; the fill and values 1..=4 are gone.
        assert_eq!(state.raster().pixel(0, 0), Color::from_argb(5));
    }

    #[test]
    fn degenerate_crop_is_a_silent_no_op() {
        let mut state = state();
        let before = state.raster().clone();

        assert!(!state.apply_crop(ToolPoint::new(10, 10), ToolPoint::new(10, 50)));
        assert!(!state.apply_crop(ToolPoint::new(10, 10), ToolPoint::new(11, 50)));
        assert!(!state.apply_crop(ToolPoint::new(150, 150), ToolPoint::new(200, 200)));
        assert!(!state.apply_crop(ToolPoint::new(-20, 10), ToolPoint::new(1, 40)));

        assert_eq!(state.undo_len(), 0);
        assert_eq!(state.raster(), &before);
        assert_eq!(state.matrix(), &before);
    }

    #[test]
    fn crop_clamps_to_bounds_and_is_undoable() {
        let mut state = state();
        paint_matrix(&mut state, 0, 0, Color::WHITE);

        assert!(state.apply_crop(ToolPoint::new(50, 40), ToolPoint::new(-10, -10)));
        assert_eq!(state.bounds(), ImageBounds::new(50, 40));
        assert_eq!(state.raster().pixel(0, 0), Color::WHITE);
        assert_eq!(state.matrix().width(), 50);
        assert_eq!(state.undo_len(), 1);

        assert!(state.try_undo());
        assert_eq!(state.bounds(), ImageBounds::new(100, 100));
        assert_eq!(state.raster().pixel(0, 0), Color::WHITE);
    }

    #[test]
    fn crop_bounds_uses_exclusive_right_and_bottom_edges() {
        let mut state = state();
        assert!(state.apply_crop_bounds(ToolBounds::new(10, 20, 30, 5)));
        assert_eq!(state.bounds(), ImageBounds::new(30, 5));
    }

    #[test]
    fn replace_raster_marks_loaded_and_resets_baseline() {
        let mut state = state();
        let loaded = PixelBuffer::filled(40, 30, Color::WHITE);
        state.replace_raster(loaded.clone());

        assert!(state.has_loaded_image());
        assert_eq!(state.undo_len(), 1);
        assert_eq!(state.matrix(), &loaded);
        assert!(state.original().matches(&loaded));

        state.apply_raster_op(RasterOp::Invert);
        state.reset_to_original();
        assert_eq!(state.raster(), &loaded);

        assert!(state.try_undo());
        assert_eq!(state.raster().pixel(0, 0), Color::BLACK);
    }

    #[test]
    fn raster_edit_folds_pending_matrix_stroke_into_history() {
        let mut state = state();
        paint_matrix(&mut state, 1, 0, Color::WHITE);

        state.apply_raster_op(RasterOp::FlipHorizontal);
        assert_eq!(state.matrix().pixel(98, 0), Color::WHITE);

        assert!(state.try_undo());
        assert_eq!(state.raster().pixel(1, 0), Color::WHITE);
    }

    #[test]
    fn rotate_updates_dimensions_of_both_buffers() {
        let mut state = EditorState::new(30, 10, FILL);
        state.apply_raster_op(RasterOp::RotateClockwise);
        assert_eq!(state.bounds(), ImageBounds::new(10, 30));
        assert_eq!(state.matrix().height(), 30);
    }

    #[test]
    fn grayscale_then_undo_restores_original_fill() {
        let mut state = state();
        state.apply_raster_op(RasterOp::Grayscale);
        assert!(state.try_undo());
        assert_eq!(state.raster().pixel(0, 0), Color::from_argb(0xFF1E_1E1E));
    }
}
