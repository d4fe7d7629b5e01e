//! Deciding what activating an item does, and tracking selected values.

use crate::item::{Item, ItemKind};

/// How an item was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Pointer,
    Keyboard,
}

/// What the controller must do after an item is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Disabled item: no callback, no state change.
    Ignored,
    /// Notify, then close the popover and restore focus to the trigger.
    SelectAndClose,
    /// Notify and toggle the checkbox; the popover stays open.
    ToggleCheckbox,
    /// Notify and check the radio within its group; the popover stays open.
    CheckRadio,
    /// Notify and toggle the value in a multiple selection; stays open.
    ToggleValue,
    /// Notify and expand or collapse the submenu; stays open.
    ToggleSubmenu,
}

impl Resolution {
    pub fn closes(self) -> bool {
        matches!(self, Resolution::SelectAndClose)
    }

    pub fn notifies(self) -> bool {
        !matches!(self, Resolution::Ignored)
    }
}

/// Maps an activated item to a [`Resolution`] by item kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionResolver {
    multiple: bool,
}

impl SelectionResolver {
    pub fn new(multiple: bool) -> Self {
        Self { multiple }
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Keyboard and pointer activation resolve the same way; submenu parents
    /// toggle under both.
    pub fn resolve(&self, item: &Item, _activation: Activation) -> Resolution {
        if item.disabled {
            return Resolution::Ignored;
        }
        match item.kind {
            ItemKind::Submenu { .. } => Resolution::ToggleSubmenu,
            ItemKind::Checkbox { .. } => Resolution::ToggleCheckbox,
            ItemKind::Radio { .. } => Resolution::CheckRadio,
            ItemKind::Action if self.multiple => Resolution::ToggleValue,
            ItemKind::Action => Resolution::SelectAndClose,
        }
    }
}

/// Selected item keys, owned here or mirrored from the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueState {
    Owned(Vec<String>),
    External(Vec<String>),
}

impl Default for ValueState {
    fn default() -> Self {
        ValueState::Owned(Vec::new())
    }
}

impl ValueState {
    pub fn new(controlled: Option<Vec<String>>, default_value: Vec<String>) -> Self {
        match controlled {
            Some(value) => ValueState::External(value),
            None => ValueState::Owned(default_value),
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            ValueState::Owned(v) | ValueState::External(v) => v,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values().iter().any(|v| v == key)
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, ValueState::External(_))
    }

    /// The value that selecting `key` asks for.
    pub fn requested(&self, key: &str, multiple: bool) -> Vec<String> {
        if !multiple {
            return vec![key.to_string()];
        }
        let mut next: Vec<String> = self.values().to_vec();
        if let Some(pos) = next.iter().position(|v| v == key) {
            next.remove(pos);
        } else {
            next.push(key.to_string());
        }
        next
    }

    /// Apply a requested value. External state is left to the owner.
    pub fn request(&mut self, value: Vec<String>) {
        if let ValueState::Owned(current) = self {
            *current = value;
        }
    }

    /// Apply the owner's authoritative value. Ignored for owned state.
    pub fn sync(&mut self, value: Vec<String>) {
        if let ValueState::External(current) = self {
            *current = value;
        }
    }
}
