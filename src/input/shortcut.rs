#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
    Enter,
    Escape,
    Delete,
    Backspace,
    F1,
    Left,
    Right,
    Up,
    Down,
}

impl ShortcutKey {
    /// Letters compare case-insensitively; Shift is read from the modifiers.
    pub fn normalized(self) -> Self {
        match self {
            Self::Character(ch) => Self::Character(ch.to_ascii_lowercase()),
            other => other,
        }
    }
}

/// Modifier flags delivered with every pointer and key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputModifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub win: bool,
    pub backtick: bool,
}

impl InputModifiers {
    pub const NONE: Self = Self::new(false, false);
    pub const CTRL: Self = Self::new(true, false);
    pub const SHIFT: Self = Self::new(false, true);
    pub const CTRL_SHIFT: Self = Self::new(true, true);

    pub const fn new(ctrl: bool, shift: bool) -> Self {
        Self {
            ctrl,
            shift,
            alt: false,
            win: false,
            backtick: false,
        }
    }

    /// Alt, Win and the backtick chord block every global shortcut.
    const fn has_blocking_modifier(&self) -> bool {
        self.alt || self.win || self.backtick
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputContext {
    pub help_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ToggleHelp,
    CloseHelp,
    Undo,
    Redo,
    ResetToOriginal,
    EnterDraw,
    EnterCrop,
    EnterPan,
    EnterColorPicker,
    RotateClockwise,
    RotateCounterClockwise,
    FlipHorizontal,
    FlipVertical,
    Grayscale,
    Invert,
    FitToWindow,
    ActualSize,
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    CopyImage,
    PasteImage,
    SaveImage,
    OpenImage,
}

/// Shortcut reference shown by the help overlay.
pub const SHORTCUT_HELP: &[(&str, &str)] = &[
    ("Ctrl+Z", "Undo"),
    ("Ctrl+Y / Ctrl+Shift+Z", "Redo"),
    ("Ctrl+Shift+R", "Reset to original"),
    ("B / C / H / I", "Draw / Crop / Pan / Color picker"),
    ("R / Shift+R", "Rotate clockwise / counter-clockwise"),
    ("F / Shift+F", "Flip horizontal / vertical"),
    ("G", "Grayscale"),
    ("Ctrl+I", "Invert colors"),
    ("Ctrl+0 / Ctrl+1", "Fit to window / Actual size"),
    ("Ctrl+= / Ctrl+-", "Zoom in / out"),
    ("Arrow keys", "Pan view"),
    ("Enter / Esc", "Apply / cancel crop"),
    ("Ctrl+C / Ctrl+V", "Copy / paste image"),
    ("Ctrl+S / Ctrl+O", "Save / open image"),
    ("F1 / ?", "Toggle this help"),
];

fn resolve_help_shortcut(key: ShortcutKey) -> Option<ShortcutAction> {
    match key {
        ShortcutKey::F1 | ShortcutKey::Escape | ShortcutKey::Character('?') => {
            Some(ShortcutAction::CloseHelp)
        }
        _ => None,
    }
}

fn resolve_tool_shortcut(key: ShortcutKey) -> Option<ShortcutAction> {
    match key {
        ShortcutKey::Character('b') => Some(ShortcutAction::EnterDraw),
        ShortcutKey::Character('c') => Some(ShortcutAction::EnterCrop),
        ShortcutKey::Character('h') => Some(ShortcutAction::EnterPan),
        ShortcutKey::Character('i') => Some(ShortcutAction::EnterColorPicker),
        _ => None,
    }
}

fn resolve_ctrl_shortcut(key: ShortcutKey, shift: bool) -> Option<ShortcutAction> {
    match (key, shift) {
        (ShortcutKey::Character('z'), false) => Some(ShortcutAction::Undo),
        (ShortcutKey::Character('z'), true) | (ShortcutKey::Character('y'), false) => {
            Some(ShortcutAction::Redo)
        }
        (ShortcutKey::Character('r'), true) => Some(ShortcutAction::ResetToOriginal),
        (ShortcutKey::Character('i'), false) => Some(ShortcutAction::Invert),
        (ShortcutKey::Character('0'), false) => Some(ShortcutAction::FitToWindow),
        (ShortcutKey::Character('1'), false) => Some(ShortcutAction::ActualSize),
        (ShortcutKey::Character('=' | '+'), _) => Some(ShortcutAction::ZoomIn),
        (ShortcutKey::Character('-'), false) => Some(ShortcutAction::ZoomOut),
        (ShortcutKey::Character('c'), false) => Some(ShortcutAction::CopyImage),
        (ShortcutKey::Character('v'), false) => Some(ShortcutAction::PasteImage),
        (ShortcutKey::Character('s'), false) => Some(ShortcutAction::SaveImage),
        (ShortcutKey::Character('o'), false) => Some(ShortcutAction::OpenImage),
        _ => None,
    }
}

fn resolve_plain_shortcut(key: ShortcutKey, shift: bool) -> Option<ShortcutAction> {
    match (key, shift) {
        (ShortcutKey::F1, _) | (ShortcutKey::Character('?'), _) => {
            Some(ShortcutAction::ToggleHelp)
        }
        (ShortcutKey::Character('r'), false) => Some(ShortcutAction::RotateClockwise),
        (ShortcutKey::Character('r'), true) => Some(ShortcutAction::RotateCounterClockwise),
        (ShortcutKey::Character('f'), false) => Some(ShortcutAction::FlipHorizontal),
        (ShortcutKey::Character('f'), true) => Some(ShortcutAction::FlipVertical),
        (ShortcutKey::Character('g'), false) => Some(ShortcutAction::Grayscale),
        (ShortcutKey::Left, false) => Some(ShortcutAction::PanLeft),
        (ShortcutKey::Right, false) => Some(ShortcutAction::PanRight),
        (ShortcutKey::Up, false) => Some(ShortcutAction::PanUp),
        (ShortcutKey::Down, false) => Some(ShortcutAction::PanDown),
        (_, false) => resolve_tool_shortcut(key),
        _ => None,
    }
}

/// Maps a key press to a global editor action.
///
/// `None` means the key belongs to the active tool, except while the help
/// overlay is visible, where the caller swallows it.
pub fn resolve_shortcut(
    key: ShortcutKey,
    modifiers: InputModifiers,
    context: InputContext,
) -> Option<ShortcutAction> {
    let key = key.normalized();
    if context.help_visible {
        return resolve_help_shortcut(key);
    }
    if modifiers.has_blocking_modifier() {
        return None;
    }
    if modifiers.ctrl {
        resolve_ctrl_shortcut(key, modifiers.shift)
    } else {
        resolve_plain_shortcut(key, modifiers.shift)
    }
}
