//! Behavioral tests for the popover controller.
//!
//! `scenario_tests` walks through concrete interaction sequences,
//! `property_tests` checks invariants over many states.


use crate::item::Item;
use crate::popover::{PopoverConfig, PopoverController};
use crate::theme::Theme;

/// Owner messages recorded by the tests.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Msg {
    OpenChanged(bool),
    Selected(String),
    Checked(String, bool),
    Radio(String, String),
    Value(Vec<String>),
    Action(String),
}

pub(super) fn config(items: Vec<Item>) -> PopoverConfig<Msg> {
    PopoverConfig::new(items)
        .name("test-menu")
        .theme(Theme::dark())
        .on_open_change(Msg::OpenChanged)
        .on_item_select(|item: Item| Msg::Selected(item.key))
        .on_checked_change(|(key, checked)| Msg::Checked(key, checked))
        .on_radio_change(|(group, key)| Msg::Radio(group, key))
        .on_value_change(Msg::Value)
        .on_action(Msg::Action)
}

pub(super) fn controller(items: Vec<Item>) -> PopoverController<Msg> {
    PopoverController::new(config(items)).unwrap()
}

pub(super) fn three_items() -> Vec<Item> {
    vec![
        Item::action("cut", "Cut"),
        Item::action("copy", "Copy"),
        Item::action("paste", "Paste"),
    ]
}

/// Menu with two top-level submenus and a nested one.
pub(super) fn submenu_items() -> Vec<Item> {
    vec![
        Item::action("rename", "Rename"),
        Item::submenu(
            "share",
            "Share",
            vec![
                Item::action("email", "Email").with_action("share-email"),
                Item::submenu("social", "Social", vec![Item::action("post", "Post")]),
            ],
        ),
        Item::submenu(
            "export",
            "Export",
            vec![Item::action("pdf", "PDF"), Item::action("png", "PNG")],
        ),
        Item::checkbox("grid", "Show grid", false),
    ]
}
