//! Select widget with optional search and multiple selection.

use crate::builder_field;
use crate::event::Event;
use crate::item::{Item, ItemError};
use crate::popover::{PopoverConfig, PopoverController, Response};
use crate::style::{Part, Size, StateFlags, StyleRequest, StyleResolver, Variant};

use super::{Role, ViewNode, Widget};

/// A listbox of options behind a trigger showing the current value.
pub struct Select<M> {
    placeholder: String,
    controller: PopoverController<M>,
    searchable: bool,
    variant: Variant,
    size: Size,
}

impl<M> Select<M> {
    pub fn new(
        placeholder: impl Into<String>,
        config: PopoverConfig<M>,
    ) -> Result<Self, ItemError> {
        Ok(Self {
            placeholder: placeholder.into(),
            controller: PopoverController::new(config.name("select"))?,
            searchable: false,
            variant: Variant::default(),
            size: Size::default(),
        })
    }

    builder_field!(searchable, bool);
    builder_field!(variant, Variant);
    builder_field!(size, Size);

    pub fn controller(&self) -> &PopoverController<M> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PopoverController<M> {
        &mut self.controller
    }

    /// Update the search query. Ignored unless searchable and open.
    pub fn search(&mut self, query: &str) {
        if self.searchable && self.controller.is_open() {
            self.controller.set_filter(query);
        }
    }

    /// Text shown on the trigger: selected labels, or the placeholder.
    pub fn display_text(&self) -> String {
        let labels: Vec<&str> = self
            .controller
            .value()
            .iter()
            .filter_map(|key| {
                self.controller
                    .items()
                    .iter()
                    .find(|item| &item.key == key)
                    .map(|item| item.label.as_str())
            })
            .collect();
        if labels.is_empty() {
            self.placeholder.clone()
        } else {
            labels.join(", ")
        }
    }

    fn request(&self, part: Part, state: StateFlags) -> StyleRequest {
        StyleRequest::new(part)
            .variant(self.variant)
            .size(self.size)
            .state(state)
    }
}

impl<M> Widget<M> for Select<M> {
    fn view(&self, resolver: &dyn StyleResolver) -> ViewNode {
        let open = self.controller.is_open();
        let flags = StateFlags {
            open,
            selected: !self.controller.value().is_empty(),
            ..StateFlags::default()
        };
        let mut root = ViewNode::new(
            Role::Trigger,
            self.display_text(),
            resolver.resolve(&self.request(Part::SelectTrigger, flags)),
        );
        if !open {
            return root;
        }

        let mut content = ViewNode::new(
            Role::Content,
            "",
            resolver.resolve(&self.request(
                Part::SelectContent,
                StateFlags {
                    open,
                    ..StateFlags::default()
                },
            )),
        )
        .with_z_index(self.controller.z_index().at_depth(0));

        if self.searchable {
            content.push(ViewNode::new(
                Role::Search,
                self.controller.filter(),
                resolver.resolve(&self.request(Part::SelectSearch, StateFlags::default())),
            ));
        }

        let focused = self.controller.focused_index();
        for (pos, item) in self.controller.visible_items().enumerate() {
            let state = StateFlags {
                focused: pos as isize == focused,
                disabled: item.disabled,
                selected: self.controller.is_selected(&item.key),
                ..StateFlags::default()
            };
            content.push(
                ViewNode::new(
                    Role::Option,
                    item.label.clone(),
                    resolver.resolve(&self.request(Part::SelectOption, state)),
                )
                .with_key(item.key.clone()),
            );
        }
        root.push(content);
        root
    }

    fn on_event(&mut self, event: &Event) -> Response<M> {
        self.controller.handle_event(event)
    }
}

/// Build options from `(key, label)` pairs.
pub fn options<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<Item> {
    pairs
        .into_iter()
        .map(|(key, label)| Item::action(key, label))
        .collect()
}
