//! Pointer and keyboard events delivered by the host shell.
//!
//! Positions are in viewport coordinates; the controller maps them into
//! canvas space through its [`Viewport`](crate::viewport::Viewport).

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Any modifier that turns a click into a multi-select toggle.
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Pointer identifier assigned by the host (one per finger or mouse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointerId(pub u64);

/// Pointer event for unified mouse/touch handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        button: MouseButton,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default)]
        pointer: PointerId,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
    },
    /// The host lost the pointer (e.g. the window lost focus).
    Cancel,
    /// The pointer left the canvas.
    Leave,
}

impl PointerEvent {
    /// Left-button press without modifiers.
    pub fn down(position: Point) -> Self {
        PointerEvent::Down {
            position,
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
            pointer: PointerId::default(),
        }
    }

    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => Some(*position),
            PointerEvent::Cancel | PointerEvent::Leave => None,
        }
    }
}

/// Keys the builder reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// A printable key, lowercased.
    Char(char),
}

/// Keyboard press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
        }
    }

    /// Key with the platform command modifier.
    pub fn command(c: char) -> Self {
        Self::new(Key::Char(c), Modifiers::CTRL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_modifier() {
        assert!(Modifiers::CTRL.command());
        assert!(
            Modifiers {
                meta: true,
                ..Modifiers::NONE
            }
            .command()
        );
        assert!(!Modifiers::SHIFT.command());
        assert!(Modifiers::SHIFT.any());
        assert!(!Modifiers::NONE.any());
    }

    #[test]
    fn test_pointer_event_json() {
        let event: PointerEvent =
            serde_json::from_str(r#"{"type":"down","position":{"x":10.0,"y":20.0},"modifiers":{"shift":true}}"#)
                .unwrap();
        assert_eq!(
            event,
            PointerEvent::Down {
                position: Point::new(10.0, 20.0),
                button: MouseButton::Left,
                modifiers: Modifiers::SHIFT,
                pointer: PointerId(0),
            }
        );
        let cancel: PointerEvent = serde_json::from_str(r#"{"type":"cancel"}"#).unwrap();
        assert_eq!(cancel.position(), None);
    }

    #[test]
    fn test_key_event_json() {
        let event: KeyEvent = serde_json::from_str(r#"{"key":{"char":"z"},"modifiers":{"ctrl":true}}"#).unwrap();
        assert_eq!(event, KeyEvent::command('z'));
        let arrow: KeyEvent = serde_json::from_str(r#"{"key":"arrowLeft"}"#).unwrap();
        assert_eq!(arrow.key, Key::ArrowLeft);
        assert_eq!(arrow.modifiers, Modifiers::NONE);
    }
}
