//! Popover widgets built on the shared controller
//!
//! Widgets do not draw. They hand the rendering layer a [`ViewNode`] tree
//! whose classes come from a [`StyleResolver`], and route host events into
//! their [`PopoverController`](crate::popover::PopoverController).

mod dropdown_menu;
mod select;

pub use dropdown_menu::DropdownMenu;
pub use select::{options, Select};

use std::fmt::Write as _;

use crate::event::Event;
use crate::popover::Response;
use crate::style::StyleResolver;

/// The role a view node plays for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Trigger,
    Content,
    Item,
    Submenu,
    Option,
    Search,
}

/// One node of a widget's view tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewNode {
    pub role: Role,
    /// Item key for item, submenu and option nodes
    pub key: Option<String>,
    pub label: String,
    pub class: String,
    /// Stacking order for content layers
    pub z_index: Option<i32>,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(role: Role, label: impl Into<String>, class: String) -> Self {
        Self {
            role,
            key: None,
            label: label.into(),
            class,
            z_index: None,
            children: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn push(&mut self, child: ViewNode) {
        self.children.push(child);
    }

    /// Depth-first search by key.
    pub fn find(&self, key: &str) -> Option<&ViewNode> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(key))
    }

    /// Indented text outline, one node per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        let _ = write!(
            out,
            "{:indent$}{:?} \"{}\" [{}]",
            "",
            self.role,
            self.label,
            self.class,
            indent = depth * 2
        );
        if let Some(z) = self.z_index {
            let _ = write!(out, " z={z}");
        }
        out.push('\n');
        for child in &self.children {
            child.write_outline(out, depth + 1);
        }
    }
}

/// A popover widget as seen by the host.
pub trait Widget<M> {
    /// Build the view tree for the current state.
    fn view(&self, resolver: &dyn StyleResolver) -> ViewNode;

    /// Handle a host event.
    fn on_event(&mut self, event: &Event) -> Response<M>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_indents_children() {
        let mut root = ViewNode::new(Role::Trigger, "Menu", "t".into());
        let mut content = ViewNode::new(Role::Content, "", "c".into()).with_z_index(50);
        content.push(ViewNode::new(Role::Item, "Copy", "i".into()).with_key("copy"));
        root.push(content);

        assert_eq!(
            root.outline(),
            "Trigger \"Menu\" [t]\n  Content \"\" [c] z=50\n    Item \"Copy\" [i]\n"
        );
        assert_eq!(root.find("copy").map(|n| n.label.as_str()), Some("Copy"));
        assert!(root.find("paste").is_none());
    }
}
