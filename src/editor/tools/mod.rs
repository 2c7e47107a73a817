mod color_picker;
mod crop;
mod draw;
mod pan;

pub use color_picker::ColorPickerTool;
pub use crop::{CropSelection, CropTool};
pub use draw::DrawTool;
pub use pan::PanTool;

use super::state::EditorState;
use super::viewport::ViewTransform;
use crate::geometry::{Color, ScreenPoint, ToolPoint};
use crate::input::{InputModifiers, ShortcutKey};
use crate::render::OverlaySurface;

pub const DEFAULT_BRUSH_RADIUS: u32 = 3;
pub const MAX_BRUSH_RADIUS: u32 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Draw,
    Crop,
    Pan,
    ColorPicker,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [Self::Draw, Self::Crop, Self::Pan, Self::ColorPicker];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Crop => "crop",
            Self::Pan => "pan",
            Self::ColorPicker => "color picker",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushSettings {
    pub color: Color,
    radius: u32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self::new(Color::from_argb(0xFFFF_0000), DEFAULT_BRUSH_RADIUS)
    }
}

impl BrushSettings {
    pub fn new(color: Color, radius: u32) -> Self {
        let mut brush = Self { color, radius: 0 };
        brush.set_radius(radius);
        brush
    }

    pub const fn radius(&self) -> u32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: u32) {
        self.radius = radius.clamp(1, MAX_BRUSH_RADIUS);
    }
}

/// One pointer or wheel event, already mapped into image space by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolInput {
    pub screen: ScreenPoint,
    pub image: ToolPoint,
    pub wheel_delta: i32,
    pub modifiers: InputModifiers,
}

impl ToolInput {
    pub fn from_screen(view: &ViewTransform, screen: ScreenPoint, modifiers: InputModifiers) -> Self {
        Self {
            screen,
            image: view.screen_to_image(screen),
            wheel_delta: 0,
            modifiers,
        }
    }
}

/// Mutable editor pieces lent to a tool for the duration of one callback.
pub struct ToolContext<'a> {
    pub state: &'a mut EditorState,
    pub view: &'a mut ViewTransform,
    pub brush: &'a mut BrushSettings,
}

/// Read-only view of the editor handed to `on_render`.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub view: &'a ViewTransform,
    pub brush: &'a BrushSettings,
    pub width: u32,
    pub height: u32,
}

pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput);

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput);

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput);

    /// Ctrl anchors the zoom at the viewport center, otherwise at the cursor.
    fn on_wheel(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) {
        if input.modifiers.ctrl {
            ctx.view.zoom_at_viewport_center(input.wheel_delta);
        } else {
            ctx.view.zoom_at_wheel(input.screen, input.wheel_delta);
        }
    }

    /// Returns whether the key was consumed.
    fn on_key_down(
        &mut self,
        _ctx: &mut ToolContext<'_>,
        _key: ShortcutKey,
        _modifiers: InputModifiers,
    ) -> bool {
        false
    }

    /// Drops any in-progress gesture.
    fn on_cancel(&mut self, ctx: &mut ToolContext<'_>);

    fn on_render(&self, _ctx: &RenderContext<'_>, _surface: &mut dyn OverlaySurface) {}
}

/// Every tool instance plus the active selection.
///
/// Tools keep their own settings across switches; only gesture state is
/// dropped, through `on_cancel` on the outgoing tool.
#[derive(Debug)]
pub struct ToolSet {
    active: ToolKind,
    draw: DrawTool,
    crop: CropTool,
    pan: PanTool,
    color_picker: ColorPickerTool,
}

impl Default for ToolSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolSet {
    pub fn new() -> Self {
        Self {
            active: ToolKind::Draw,
            draw: DrawTool::default(),
            crop: CropTool::default(),
            pan: PanTool::default(),
            color_picker: ColorPickerTool::default(),
        }
    }

    pub const fn active_kind(&self) -> ToolKind {
        self.active
    }

    pub fn active(&self) -> &dyn Tool {
        self.get(self.active)
    }

    pub fn active_mut(&mut self) -> &mut dyn Tool {
        self.get_mut(self.active)
    }

    pub fn get(&self, kind: ToolKind) -> &dyn Tool {
        match kind {
            ToolKind::Draw => &self.draw,
            ToolKind::Crop => &self.crop,
            ToolKind::Pan => &self.pan,
            ToolKind::ColorPicker => &self.color_picker,
        }
    }

    pub fn get_mut(&mut self, kind: ToolKind) -> &mut dyn Tool {
        match kind {
            ToolKind::Draw => &mut self.draw,
            ToolKind::Crop => &mut self.crop,
            ToolKind::Pan => &mut self.pan,
            ToolKind::ColorPicker => &mut self.color_picker,
        }
    }

    pub fn crop(&self) -> &CropTool {
        &self.crop
    }

    pub fn color_picker(&self) -> &ColorPickerTool {
        &self.color_picker
    }

    /// Cancels the outgoing tool, then activates `kind`. Returns whether the
    /// active tool changed.
    pub fn select(&mut self, ctx: &mut ToolContext<'_>, kind: ToolKind) -> bool {
        if self.active == kind {
            return false;
        }
        self.active_mut().on_cancel(ctx);
        tracing::debug!(from = self.active.label(), to = kind.label(), "tool switched");
        self.active = kind;
        true
    }

    pub fn cancel_active(&mut self, ctx: &mut ToolContext<'_>) {
        self.active_mut().on_cancel(ctx);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub struct Harness {
        pub state: EditorState,
        pub view: ViewTransform,
        pub brush: BrushSettings,
    }

    impl Harness {
        pub fn new(width: u32, height: u32) -> Self {
            let mut view = ViewTransform::default();
            view.set_viewport_size(width, height);
            Self {
                state: EditorState::new(width, height, Color::WHITE),
                view,
                brush: BrushSettings::new(Color::BLACK, 1),
            }
        }

        pub fn ctx(&mut self) -> ToolContext<'_> {
            ToolContext {
                state: &mut self.state,
                view: &mut self.view,
                brush: &mut self.brush,
            }
        }

        pub fn render_ctx(&self) -> RenderContext<'_> {
            let (width, height) = self.view.viewport_size();
            RenderContext {
                view: &self.view,
                brush: &self.brush,
                width,
                height,
            }
        }

        pub fn input(&self, x: i32, y: i32) -> ToolInput {
            ToolInput::from_screen(
                &self.view,
                ScreenPoint::new(x, y),
                InputModifiers::NONE,
            )
        }

        pub fn down(&mut self, tool: &mut dyn Tool, x: i32, y: i32) {
            let input = self.input(x, y);
            tool.on_pointer_down(&mut self.ctx(), &input);
        }

        pub fn drag(&mut self, tool: &mut dyn Tool, x: i32, y: i32) {
            let input = self.input(x, y);
            tool.on_pointer_move(&mut self.ctx(), &input);
        }

        pub fn up(&mut self, tool: &mut dyn Tool, x: i32, y: i32) {
            let input = self.input(x, y);
            tool.on_pointer_up(&mut self.ctx(), &input);
        }

        pub fn key(&mut self, tool: &mut dyn Tool, key: ShortcutKey) -> bool {
            tool.on_key_down(&mut self.ctx(), key, InputModifiers::NONE)
        }
    }
}
