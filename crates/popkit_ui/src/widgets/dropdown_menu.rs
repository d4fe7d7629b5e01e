//! Dropdown menu widget
//!
//! A trigger button that opens a list of actions. Items may be plain
//! actions, checkboxes, radio groups or submenus. Submenus open on hover
//! with a delayed close, or on click/Enter.

use crate::builder_field;
use crate::event::Event;
use crate::item::{Item, ItemError};
use crate::popover::{PopoverConfig, PopoverController, Response};
use crate::style::{Part, Size, StateFlags, StyleRequest, StyleResolver, Variant};

use super::{Role, ViewNode, Widget};

/// A dropdown menu of actions.
pub struct DropdownMenu<M> {
    label: String,
    controller: PopoverController<M>,
    variant: Variant,
    size: Size,
}

impl<M> DropdownMenu<M> {
    /// Create a menu whose trigger shows `label`.
    pub fn new(label: impl Into<String>, config: PopoverConfig<M>) -> Result<Self, ItemError> {
        Ok(Self {
            label: label.into(),
            controller: PopoverController::new(config.name("dropdown-menu"))?,
            variant: Variant::default(),
            size: Size::default(),
        })
    }

    builder_field!(variant, Variant);
    builder_field!(size, Size);

    pub fn controller(&self) -> &PopoverController<M> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PopoverController<M> {
        &mut self.controller
    }

    fn request(&self, part: Part, state: StateFlags) -> StyleRequest {
        StyleRequest::new(part)
            .variant(self.variant)
            .size(self.size)
            .state(state)
    }

    fn item_node(
        &self,
        item: &Item,
        focused: bool,
        depth: usize,
        resolver: &dyn StyleResolver,
    ) -> ViewNode {
        let submenu_open = self.controller.is_submenu_open(&item.key);
        let state = StateFlags {
            open: submenu_open,
            focused,
            disabled: item.disabled,
            checked: item.checked().unwrap_or(false),
            selected: false,
        };
        let part = if item.is_submenu() {
            Part::MenuSubmenu
        } else {
            Part::MenuItem
        };
        let role = if item.is_submenu() {
            Role::Submenu
        } else {
            Role::Item
        };
        let mut node =
            ViewNode::new(role, item.label.clone(), resolver.resolve(&self.request(part, state)))
                .with_key(item.key.clone());

        if let (true, Some(children)) = (submenu_open, item.children()) {
            let mut flyout = ViewNode::new(
                Role::Content,
                "",
                resolver.resolve(&self.request(Part::MenuContent, StateFlags {
                    open: true,
                    ..StateFlags::default()
                })),
            )
            .with_z_index(self.controller.z_index().at_depth(depth + 1));
            for child in children {
                flyout.push(self.item_node(child, false, depth + 1, resolver));
            }
            node.push(flyout);
        }
        node
    }
}

impl<M> Widget<M> for DropdownMenu<M> {
    fn view(&self, resolver: &dyn StyleResolver) -> ViewNode {
        let open = self.controller.is_open();
        let flags = StateFlags {
            open,
            ..StateFlags::default()
        };
        let mut root = ViewNode::new(
            Role::Trigger,
            self.label.clone(),
            resolver.resolve(&self.request(Part::MenuTrigger, flags)),
        );
        if !open {
            return root;
        }

        let focused = self.controller.focused_index();
        let mut content = ViewNode::new(
            Role::Content,
            "",
            resolver.resolve(&self.request(Part::MenuContent, flags)),
        )
        .with_z_index(self.controller.z_index().at_depth(0));
        for (pos, item) in self.controller.visible_items().enumerate() {
            content.push(self.item_node(item, pos as isize == focused, 0, resolver));
        }
        root.push(content);
        root
    }

    fn on_event(&mut self, event: &Event) -> Response<M> {
        self.controller.handle_event(event)
    }
}
