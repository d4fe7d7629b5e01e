//! popkit_ui - Interaction controllers for dropdown menus and selects
//!
//! This crate provides the behavior behind popover widgets: open state,
//! keyboard navigation, outside-click dismissal, hover-delayed submenus and
//! selection. It does not draw; widgets produce a [`ViewNode`] tree for
//! whatever rendering layer the host uses.

mod macros;

pub mod callback;
pub mod constants;
pub mod event;
pub mod item;
pub mod layout;
pub mod popover;
pub mod style;
pub mod theme;
pub mod widgets;

pub use callback::Callback;
pub use event::{Event, KeyCode, KeyModifiers, MouseButton};
pub use item::{Item, ItemError, ItemKind};
pub use layout::Bounds;
pub use popover::{
    DocumentListeners, FocusRequest, PopoverConfig, PopoverController, PopoverPhase, Response,
    TimerToken,
};
pub use style::{ClassNameResolver, Part, Size, StateFlags, StyleRequest, StyleResolver, Variant};
pub use theme::{current_theme, set_theme, Theme, ThemeMode, ThemeProvider};
pub use widgets::{DropdownMenu, Role, Select, ViewNode, Widget};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::callback::Callback;
    pub use crate::event::{Event, KeyCode, KeyModifiers, MouseButton};
    pub use crate::item::{Item, ItemKind};
    pub use crate::layout::Bounds;
    pub use crate::popover::{PopoverConfig, PopoverController, Response};
    pub use crate::style::{ClassNameResolver, Size, StyleResolver, Variant};
    pub use crate::theme::Theme;
    pub use crate::widgets::{DropdownMenu, Select, ViewNode, Widget};
}
