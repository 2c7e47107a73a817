//! Image editor controller: owns editing state, view and tools, and routes host input.

pub mod history;
pub mod state;
pub mod tools;
pub mod viewport;

use std::path::Path;

use crate::clipboard::ClipboardBackend;
use crate::config::EditorConfig;
use crate::error::AppResult;
use crate::geometry::{Color, ScreenPoint, ToolBounds};
use crate::input::{
    resolve_shortcut, InputContext, InputModifiers, ShortcutAction, ShortcutKey, SHORTCUT_HELP,
};
use crate::raster::{PixelBuffer, RasterOp};
use crate::render::{self, OverlaySurface, ScreenRect};
use crate::storage;

pub use history::{SnapshotHistory, DEFAULT_HISTORY_LIMIT};
pub use state::{EditorState, SyncFlag};
pub use tools::{BrushSettings, RenderContext, Tool, ToolContext, ToolInput, ToolKind, ToolSet};
pub use viewport::{ViewTransform, ZoomLimits, DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MIN};

const HELP_PANEL_MARGIN_PX: i32 = 24;
const HELP_LINE_HEIGHT_PX: i32 = 20;
const HELP_PANEL_WIDTH_PX: i32 = 420;
const HELP_BACKDROP: Color = Color::from_argb(0xC000_0000);
const HELP_TEXT: Color = Color::WHITE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Undo,
    Redo,
    ResetToOriginal,
    Raster(RasterOp),
    Crop(ToolBounds),
    SelectTool(ToolKind),
    ZoomIn,
    ZoomOut,
    FitToWindow,
    ActualSize,
    Pan(PanDirection),
    ToggleHelp,
    CloseHelp,
}

impl EditorCommand {
    /// Commands that replace or reshape the raster; the active gesture is
    /// cancelled before they run.
    const fn touches_raster(self) -> bool {
        matches!(
            self,
            Self::Undo | Self::Redo | Self::ResetToOriginal | Self::Raster(_) | Self::Crop(_)
        )
    }
}

/// Shortcuts the editor cannot serve without an external collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    CopyImage,
    PasteImage,
    SaveImage,
    OpenImage,
}

/// Outcome of [`ImageEditor::key_down`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDispatch {
    Applied(EditorCommand),
    Host(HostRequest),
    Tool { handled: bool },
    Swallowed,
}

enum ShortcutRoute {
    Command(EditorCommand),
    Host(HostRequest),
}

fn route_shortcut(action: ShortcutAction) -> ShortcutRoute {
    use EditorCommand as C;
    let command = match action {
        ShortcutAction::ToggleHelp => C::ToggleHelp,
        ShortcutAction::CloseHelp => C::CloseHelp,
        ShortcutAction::Undo => C::Undo,
        ShortcutAction::Redo => C::Redo,
        ShortcutAction::ResetToOriginal => C::ResetToOriginal,
        ShortcutAction::EnterDraw => C::SelectTool(ToolKind::Draw),
        ShortcutAction::EnterCrop => C::SelectTool(ToolKind::Crop),
        ShortcutAction::EnterPan => C::SelectTool(ToolKind::Pan),
        ShortcutAction::EnterColorPicker => C::SelectTool(ToolKind::ColorPicker),
        ShortcutAction::RotateClockwise => C::Raster(RasterOp::RotateClockwise),
        ShortcutAction::RotateCounterClockwise => C::Raster(RasterOp::RotateCounterClockwise),
        ShortcutAction::FlipHorizontal => C::Raster(RasterOp::FlipHorizontal),
        ShortcutAction::FlipVertical => C::Raster(RasterOp::FlipVertical),
        ShortcutAction::Grayscale => C::Raster(RasterOp::Grayscale),
        ShortcutAction::Invert => C::Raster(RasterOp::Invert),
        ShortcutAction::FitToWindow => C::FitToWindow,
        ShortcutAction::ActualSize => C::ActualSize,
        ShortcutAction::ZoomIn => C::ZoomIn,
        ShortcutAction::ZoomOut => C::ZoomOut,
        ShortcutAction::PanLeft => C::Pan(PanDirection::Left),
        ShortcutAction::PanRight => C::Pan(PanDirection::Right),
        ShortcutAction::PanUp => C::Pan(PanDirection::Up),
        ShortcutAction::PanDown => C::Pan(PanDirection::Down),
        ShortcutAction::CopyImage => return ShortcutRoute::Host(HostRequest::CopyImage),
        ShortcutAction::PasteImage => return ShortcutRoute::Host(HostRequest::PasteImage),
        ShortcutAction::SaveImage => return ShortcutRoute::Host(HostRequest::SaveImage),
        ShortcutAction::OpenImage => return ShortcutRoute::Host(HostRequest::OpenImage),
    };
    ShortcutRoute::Command(command)
}

/// The editor a hosting window drives: one state, one view, one active tool.
#[derive(Debug)]
pub struct ImageEditor {
    state: EditorState,
    view: ViewTransform,
    tools: ToolSet,
    brush: BrushSettings,
    background: Color,
    status: String,
    help_visible: bool,
}

impl Default for ImageEditor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl ImageEditor {
    pub fn new(config: &EditorConfig) -> Self {
        let config = config.clone().sanitized();
        let canvas = PixelBuffer::filled(
            config.canvas_width,
            config.canvas_height,
            config.background,
        );
        Self {
            state: EditorState::from_buffer(canvas, config.history_limit),
            view: ViewTransform::new(config.zoom_limits()),
            tools: ToolSet::new(),
            brush: BrushSettings::new(config.brush_color, config.brush_radius),
            background: config.background,
            status: String::new(),
            help_visible: false,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub const fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub const fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn brush_mut(&mut self) -> &mut BrushSettings {
        &mut self.brush
    }

    pub const fn tools(&self) -> &ToolSet {
        &self.tools
    }

    pub const fn active_tool(&self) -> ToolKind {
        self.tools.active_kind()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub const fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Committed pixels, with any pending stroke folded in.
    pub fn raster(&mut self) -> &PixelBuffer {
        self.state.raster()
    }

    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        self.view.set_viewport_size(width, height);
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        tracing::debug!(status = %self.status, "editor status");
    }

    fn with_active_tool<R>(
        &mut self,
        f: impl FnOnce(&mut dyn Tool, &mut ToolContext<'_>) -> R,
    ) -> R {
        let mut ctx = ToolContext {
            state: &mut self.state,
            view: &mut self.view,
            brush: &mut self.brush,
        };
        f(self.tools.active_mut(), &mut ctx)
    }

    fn cancel_gesture(&mut self) {
        let mut ctx = ToolContext {
            state: &mut self.state,
            view: &mut self.view,
            brush: &mut self.brush,
        };
        self.tools.cancel_active(&mut ctx);
    }

    fn tool_input(&self, screen: ScreenPoint, modifiers: InputModifiers) -> ToolInput {
        ToolInput::from_screen(&self.view, screen, modifiers)
    }

    pub fn pointer_down(&mut self, screen: ScreenPoint, modifiers: InputModifiers) {
        let input = self.tool_input(screen, modifiers);
        self.with_active_tool(|tool, ctx| tool.on_pointer_down(ctx, &input));
    }

    pub fn pointer_move(&mut self, screen: ScreenPoint, modifiers: InputModifiers) {
        let input = self.tool_input(screen, modifiers);
        self.with_active_tool(|tool, ctx| tool.on_pointer_move(ctx, &input));
    }

    pub fn pointer_up(&mut self, screen: ScreenPoint, modifiers: InputModifiers) {
        let input = self.tool_input(screen, modifiers);
        self.with_active_tool(|tool, ctx| tool.on_pointer_up(ctx, &input));
    }

    pub fn wheel(&mut self, screen: ScreenPoint, wheel_delta: i32, modifiers: InputModifiers) {
        let mut input = self.tool_input(screen, modifiers);
        input.wheel_delta = wheel_delta;
        self.with_active_tool(|tool, ctx| tool.on_wheel(ctx, &input));
    }

    /// Global shortcuts first, then the active tool.
    pub fn key_down(&mut self, key: ShortcutKey, modifiers: InputModifiers) -> KeyDispatch {
        let context = InputContext {
            help_visible: self.help_visible,
        };
        match resolve_shortcut(key, modifiers, context).map(route_shortcut) {
            Some(ShortcutRoute::Command(command)) => {
                self.execute(command);
                KeyDispatch::Applied(command)
            }
            Some(ShortcutRoute::Host(request)) => KeyDispatch::Host(request),
            None if self.help_visible => KeyDispatch::Swallowed,
            None => {
                let handled =
                    self.with_active_tool(|tool, ctx| tool.on_key_down(ctx, key, modifiers));
                KeyDispatch::Tool { handled }
            }
        }
    }

    pub fn select_tool(&mut self, kind: ToolKind) -> bool {
        let mut ctx = ToolContext {
            state: &mut self.state,
            view: &mut self.view,
            brush: &mut self.brush,
        };
        let changed = self.tools.select(&mut ctx, kind);
        if changed {
            self.set_status(format!("tool: {}", kind.label()));
        }
        changed
    }

    /// Runs one high-level command. Returns whether anything changed.
    ///
    /// Commands that touch the raster cancel the active gesture first.
    pub fn execute(&mut self, command: EditorCommand) -> bool {
        if command.touches_raster() {
            self.cancel_gesture();
        }
        match command {
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
            EditorCommand::ResetToOriginal => {
                self.state.reset_to_original();
                self.set_status("reset to original");
                true
            }
            EditorCommand::Raster(op) => {
                self.state.apply_raster_op(op);
                self.set_status(format!("{} applied", op.label()));
                true
            }
            EditorCommand::Crop(bounds) => self.crop(bounds),
            EditorCommand::SelectTool(kind) => self.select_tool(kind),
            EditorCommand::ZoomIn => self.zoom_by_step(1),
            EditorCommand::ZoomOut => self.zoom_by_step(-1),
            EditorCommand::FitToWindow => {
                self.view.fit_to_viewport(self.state.bounds());
                self.set_zoom_status();
                true
            }
            EditorCommand::ActualSize => {
                self.view.actual_size(self.state.bounds());
                self.set_zoom_status();
                true
            }
            EditorCommand::Pan(direction) => {
                match direction {
                    PanDirection::Left => self.view.pan_left(),
                    PanDirection::Right => self.view.pan_right(),
                    PanDirection::Up => self.view.pan_up(),
                    PanDirection::Down => self.view.pan_down(),
                }
                true
            }
            EditorCommand::ToggleHelp => {
                self.help_visible = !self.help_visible;
                true
            }
            EditorCommand::CloseHelp => std::mem::replace(&mut self.help_visible, false),
        }
    }

    fn undo(&mut self) -> bool {
        let applied = self.state.try_undo();
        self.set_status(if applied {
            "undo applied"
        } else {
            "undo stack empty"
        });
        applied
    }

    fn redo(&mut self) -> bool {
        let applied = self.state.try_redo();
        self.set_status(if applied {
            "redo applied"
        } else {
            "redo stack empty"
        });
        applied
    }

    fn crop(&mut self, bounds: ToolBounds) -> bool {
        let applied = self.state.apply_crop_bounds(bounds);
        if applied {
            let size = self.state.bounds();
            self.set_status(format!("crop applied {}x{}", size.width, size.height));
        } else {
            self.set_status("crop ignored: selection too small");
        }
        applied
    }

    fn zoom_by_step(&mut self, direction: i32) -> bool {
        let changed = self.view.zoom_at_viewport_center(direction);
        self.set_zoom_status();
        changed
    }

    fn set_zoom_status(&mut self) {
        let percent = (self.view.zoom() * 100.0).round();
        self.set_status(format!("zoom {percent}%"));
    }

    /// Installs a decoded image: both buffers, revert baseline and a fitted view.
    pub fn install_image(&mut self, image: PixelBuffer) {
        self.cancel_gesture();
        self.state.replace_raster(image);
        self.view.fit_to_viewport(self.state.bounds());
        let size = self.state.bounds();
        self.set_status(format!("image loaded {}x{}", size.width, size.height));
    }

    /// Decodes `path` and installs it. On failure the editor is left untouched.
    pub fn load_file(&mut self, path: &Path) -> AppResult<()> {
        match storage::load_image(path) {
            Ok(image) => {
                self.install_image(image);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "image load failed");
                self.set_status(format!("load failed: {err}"));
                Err(err.into())
            }
        }
    }

    pub fn save_file(&mut self, path: &Path) -> AppResult<()> {
        let result = storage::save_image(self.state.raster(), path);
        match &result {
            Ok(()) => self.set_status(format!("saved {}", path.display())),
            Err(err) => {
                tracing::warn!(%err, "image save failed");
                self.set_status(format!("save failed: {err}"));
            }
        }
        Ok(result?)
    }

    pub fn paste_from_clipboard(&mut self, clipboard: &impl ClipboardBackend) -> AppResult<()> {
        match clipboard.read_image() {
            Ok(image) => {
                self.install_image(image);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "clipboard paste failed");
                self.set_status(format!("paste failed: {err}"));
                Err(err.into())
            }
        }
    }

    pub fn copy_to_clipboard(&mut self, clipboard: &impl ClipboardBackend) -> AppResult<()> {
        let result = clipboard.write_image(self.state.raster());
        match &result {
            Ok(()) => self.set_status("copied image to clipboard"),
            Err(err) => {
                tracing::warn!(%err, "clipboard copy failed");
                self.set_status(format!("copy failed: {err}"));
            }
        }
        Ok(result?)
    }

    /// Viewport-sized frame of the working buffer for the host to present.
    pub fn compose_frame(&mut self) -> PixelBuffer {
        let background = self.background;
        render::compose_frame(self.state.matrix(), &self.view, background)
    }

    /// Emits the active tool's overlay and, when shown, the help panel.
    pub fn render(&self, surface: &mut dyn OverlaySurface, width: u32, height: u32) {
        let ctx = RenderContext {
            view: &self.view,
            brush: &self.brush,
            width,
            height,
        };
        self.tools.active().on_render(&ctx, surface);
        if self.help_visible {
            render_help(surface);
        }
    }
}

fn render_help(surface: &mut dyn OverlaySurface) {
    let line_count = i32::try_from(SHORTCUT_HELP.len()).unwrap_or(i32::MAX);
    let panel_height = line_count
        .saturating_add(1)
        .saturating_mul(HELP_LINE_HEIGHT_PX);
    surface.fill_rect(
        ScreenRect::new(
            HELP_PANEL_MARGIN_PX,
            HELP_PANEL_MARGIN_PX,
            HELP_PANEL_WIDTH_PX,
            panel_height,
        ),
        HELP_BACKDROP,
    );
    let mut y = HELP_PANEL_MARGIN_PX + HELP_LINE_HEIGHT_PX / 2;
    for (keys, action) in SHORTCUT_HELP {
        surface.draw_text(
            ScreenPoint::new(HELP_PANEL_MARGIN_PX + HELP_LINE_HEIGHT_PX / 2, y),
            &format!("{keys}  {action}"),
            HELP_TEXT,
        );
        y += HELP_LINE_HEIGHT_PX;
    }
}
