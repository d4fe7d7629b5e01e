//! Input events delivered to popover widgets by the host event loop.

/// Events that popover controllers respond to.
///
/// Pointer positions are in the same coordinate space as the trigger and
/// content [`Bounds`](crate::layout::Bounds) handed to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer pressed somewhere in the document.
    PointerDown {
        button: MouseButton,
        position: (f32, f32),
    },
    /// Pointer pressed on a rendered item, addressed by item key.
    ItemClick { key: String },
    /// Pointer entered a submenu trigger or its flyout content.
    SubmenuEnter { key: String },
    /// Pointer left a submenu trigger or its flyout content.
    SubmenuLeave { key: String },
    /// Keyboard key pressed.
    KeyPress {
        key: KeyCode,
        modifiers: KeyModifiers,
    },
    /// The window lost keyboard focus.
    FocusLost,
}

impl Event {
    /// Shorthand for an unmodified key press.
    pub fn key(key: KeyCode) -> Self {
        Self::KeyPress {
            key,
            modifiers: KeyModifiers::default(),
        }
    }

    /// Shorthand for a left-button pointer press.
    pub fn click(x: f32, y: f32) -> Self {
        Self::PointerDown {
            button: MouseButton::Left,
            position: (x, y),
        }
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keys the popover controllers care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum KeyCode {
    Enter,
    Space,
    Escape,
    Tab,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}
