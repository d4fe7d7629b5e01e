//! Menu and listbox items
//!
//! Items are plain data. What happens when one is activated is decided by
//! the selection resolver from the item's [`ItemKind`], so no closures are
//! stored on the items themselves.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What kind of entry an item is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    /// Leaf action; activating it closes the popover.
    #[default]
    Action,
    /// Stateful leaf that toggles without closing the popover.
    Checkbox { checked: bool },
    /// Stateful leaf, exclusive within its group, that keeps the popover open.
    Radio { group: String, checked: bool },
    /// Opens a nested list instead of producing a result.
    Submenu { children: Vec<Item> },
}

/// A single entry in a dropdown menu or select listbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique across the whole item tree
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub kind: ItemKind,
    /// Owner-defined action identifier fired after selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Item {
    /// Create a plain leaf action item.
    pub fn action(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            disabled: false,
            kind: ItemKind::Action,
            action: None,
        }
    }

    /// Create a checkbox item.
    pub fn checkbox(key: impl Into<String>, label: impl Into<String>, checked: bool) -> Self {
        Self {
            kind: ItemKind::Checkbox { checked },
            ..Self::action(key, label)
        }
    }

    /// Create a radio item belonging to `group`.
    pub fn radio(
        key: impl Into<String>,
        label: impl Into<String>,
        group: impl Into<String>,
        checked: bool,
    ) -> Self {
        Self {
            kind: ItemKind::Radio {
                group: group.into(),
                checked,
            },
            ..Self::action(key, label)
        }
    }

    /// Create a submenu parent.
    pub fn submenu(key: impl Into<String>, label: impl Into<String>, children: Vec<Item>) -> Self {
        Self {
            kind: ItemKind::Submenu { children },
            ..Self::action(key, label)
        }
    }

    /// Mark this item as disabled
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Attach an owner action identifier
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Nested items, if this is a submenu parent.
    pub fn children(&self) -> Option<&[Item]> {
        match &self.kind {
            ItemKind::Submenu { children } => Some(children),
            _ => None,
        }
    }

    pub fn is_submenu(&self) -> bool {
        matches!(self.kind, ItemKind::Submenu { .. })
    }

    /// Checked state for checkbox and radio items.
    pub fn checked(&self) -> Option<bool> {
        match self.kind {
            ItemKind::Checkbox { checked } | ItemKind::Radio { checked, .. } => Some(checked),
            _ => None,
        }
    }
}

/// Errors found while validating an item tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("duplicate item key '{key}'")]
    DuplicateKey { key: String },

    #[error("item '{label}' has an empty key")]
    EmptyKey { label: String },
}

/// Check that every key in the tree is non-empty and unique.
pub fn validate(items: &[Item]) -> Result<(), ItemError> {
    fn walk<'a>(items: &'a [Item], seen: &mut HashSet<&'a str>) -> Result<(), ItemError> {
        for item in items {
            if item.key.is_empty() {
                return Err(ItemError::EmptyKey {
                    label: item.label.clone(),
                });
            }
            if !seen.insert(item.key.as_str()) {
                return Err(ItemError::DuplicateKey {
                    key: item.key.clone(),
                });
            }
            if let Some(children) = item.children() {
                walk(children, seen)?;
            }
        }
        Ok(())
    }

    walk(items, &mut HashSet::new())
}

/// Find an item anywhere in the tree.
pub fn find<'a>(items: &'a [Item], key: &str) -> Option<&'a Item> {
    items.iter().find_map(|item| {
        if item.key == key {
            Some(item)
        } else {
            item.children().and_then(|children| find(children, key))
        }
    })
}

/// Find an item anywhere in the tree, mutably.
pub fn find_mut<'a>(items: &'a mut [Item], key: &str) -> Option<&'a mut Item> {
    for item in items.iter_mut() {
        if item.key == key {
            return Some(item);
        }
        if let ItemKind::Submenu { children } = &mut item.kind {
            if let Some(found) = find_mut(children, key) {
                return Some(found);
            }
        }
    }
    None
}

/// Keys of the submenu parents enclosing `key`, outermost first.
///
/// Returns `None` when `key` is not in the tree.
pub fn ancestors(items: &[Item], key: &str) -> Option<Vec<String>> {
    for item in items {
        if item.key == key {
            return Some(Vec::new());
        }
        if let Some(children) = item.children() {
            if let Some(mut chain) = ancestors(children, key) {
                chain.insert(0, item.key.clone());
                return Some(chain);
            }
        }
    }
    None
}

/// Uncheck every radio item in `group` except `key`, and check `key`.
pub(crate) fn check_radio(items: &mut [Item], group: &str, key: &str) {
    for item in items.iter_mut() {
        match &mut item.kind {
            ItemKind::Radio { group: g, checked } if g.as_str() == group => {
                *checked = item.key == key;
            }
            ItemKind::Submenu { children } => check_radio(children, group, key),
            _ => {}
        }
    }
}
