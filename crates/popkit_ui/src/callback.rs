//! Owner callbacks for popover widgets
//!
//! Widgets never reach into their owner's state. Every owner-facing
//! notification (open change, item selection, checkbox toggles) is a
//! `Callback<T, M>` that maps the notification payload into the owner's
//! message type. The controller collects the produced messages in a
//! [`Response`](crate::popover::Response) and the owner applies them.
//!
//! # Examples
//!
//! ```ignore
//! use popkit_ui::Callback;
//!
//! enum Message {
//!     MenuOpenChanged(bool),
//! }
//!
//! let on_open_change = Callback::new(Message::MenuOpenChanged);
//! assert!(matches!(on_open_change.call(true), Some(Message::MenuOpenChanged(true))));
//! ```

use std::fmt;

/// An optional owner callback producing a message of type `M` from a `T`.
///
/// # Type Parameters
///
/// - `T`: the payload handed to the owner (new open flag, selected item key, ...)
/// - `M`: the owner's message type
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns `None` when no handler is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    /// Check if the callback is not set.
    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

/// Collects callback output into a message list, skipping unset callbacks.
pub(crate) fn emit_into<T, M>(messages: &mut Vec<M>, callback: &Callback<T, M>, value: T) {
    if let Some(message) = callback.call(value) {
        messages.push(message);
    }
}
