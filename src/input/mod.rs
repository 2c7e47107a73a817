mod shortcut;

pub use shortcut::{
    resolve_shortcut, InputContext, InputModifiers, ShortcutAction, ShortcutKey, SHORTCUT_HELP,
};
