//! Keyboard shortcut registry and documentation.

use crate::geometry::NudgeDirection;
use crate::input::{Key, KeyEvent};

/// What a shortcut asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
    Duplicate,
    Copy,
    Paste,
    Delete,
    Nudge { direction: NudgeDirection, large: bool },
    /// Close the context menu, or clear the selection if none is open.
    Dismiss,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: Key,
    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub command: bool,
    pub shift: bool,
    pub action: ShortcutAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: Key, command: bool, shift: bool, action: ShortcutAction, description: &'static str) -> Self {
        Self {
            key,
            command,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.command {
            parts.push("Ctrl".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(match self.key {
            Key::Char(c) => c.to_ascii_uppercase().to_string(),
            Key::ArrowUp => "Up".to_string(),
            Key::ArrowDown => "Down".to_string(),
            Key::ArrowLeft => "Left".to_string(),
            Key::ArrowRight => "Right".to_string(),
            other => format!("{other:?}"),
        });
        parts.join("+")
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        let key = match event.key {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        };
        key == self.key && event.modifiers.command() == self.command && event.modifiers.shift == self.shift
    }
}

const fn nudge(key: Key, direction: NudgeDirection, large: bool, description: &'static str) -> Shortcut {
    Shortcut::new(key, false, large, ShortcutAction::Nudge { direction, large }, description)
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        use NudgeDirection as D;
        use ShortcutAction as A;
        vec![
            Shortcut::new(Key::Char('z'), true, false, A::Undo, "Undo"),
            Shortcut::new(Key::Char('z'), true, true, A::Redo, "Redo"),
            Shortcut::new(Key::Char('y'), true, false, A::Redo, "Redo"),
            Shortcut::new(Key::Char('d'), true, false, A::Duplicate, "Duplicate selected element"),
            Shortcut::new(Key::Char('c'), true, false, A::Copy, "Copy selected element"),
            Shortcut::new(Key::Char('v'), true, false, A::Paste, "Paste onto the active page"),
            Shortcut::new(Key::Delete, false, false, A::Delete, "Delete selected element"),
            Shortcut::new(Key::Backspace, false, false, A::Delete, "Delete selected element"),
            Shortcut::new(Key::Escape, false, false, A::Dismiss, "Close menu or clear selection"),
            nudge(Key::ArrowUp, D::Up, false, "Nudge up"),
            nudge(Key::ArrowDown, D::Down, false, "Nudge down"),
            nudge(Key::ArrowLeft, D::Left, false, "Nudge left"),
            nudge(Key::ArrowRight, D::Right, false, "Nudge right"),
            nudge(Key::ArrowUp, D::Up, true, "Nudge up (large step)"),
            nudge(Key::ArrowDown, D::Down, true, "Nudge down (large step)"),
            nudge(Key::ArrowLeft, D::Left, true, "Nudge left (large step)"),
            nudge(Key::ArrowRight, D::Right, true, "Nudge right (large step)"),
        ]
    }

    /// The action bound to a key press, if any.
    pub fn lookup(event: &KeyEvent) -> Option<ShortcutAction> {
        Self::all().into_iter().find(|s| s.matches(event)).map(|s| s.action)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    #[test]
    fn test_lookup() {
        assert_eq!(ShortcutRegistry::lookup(&KeyEvent::command('z')), Some(ShortcutAction::Undo));
        let redo = KeyEvent::new(
            Key::Char('Z'),
            Modifiers {
                shift: true,
                meta: true,
                ..Modifiers::NONE
            },
        );
        assert_eq!(ShortcutRegistry::lookup(&redo), Some(ShortcutAction::Redo));
        assert_eq!(
            ShortcutRegistry::lookup(&KeyEvent::new(Key::ArrowLeft, Modifiers::SHIFT)),
            Some(ShortcutAction::Nudge {
                direction: NudgeDirection::Left,
                large: true
            })
        );
        assert_eq!(ShortcutRegistry::lookup(&KeyEvent::new(Key::Char('z'), Modifiers::NONE)), None);
    }

    #[test]
    fn test_format() {
        let all = ShortcutRegistry::all();
        assert_eq!(all[1].format(), "Ctrl+Shift+Z");
        assert_eq!(all[6].format(), "Delete");
    }
}
