//! Built-in catalog stories.
//!
//! Each story builds one configured widget and knows a short walkthrough
//! that exercises its interesting behavior.

use std::fmt;

use popkit_ui::item::ItemError;
use popkit_ui::prelude::*;
use popkit_ui::widgets::options;
use popkit_ui::{KeyCode, PopoverController};

use crate::script::Step;

/// Owner messages produced by story widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum DemoMsg {
    OpenChanged(bool),
    Selected(String),
    Checked(String, bool),
    Radio(String, String),
    Value(Vec<String>),
    Action(String),
}

impl fmt::Display for DemoMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoMsg::OpenChanged(open) => write!(f, "open_change({open})"),
            DemoMsg::Selected(key) => write!(f, "select({key})"),
            DemoMsg::Checked(key, checked) => write!(f, "checked({key}={checked})"),
            DemoMsg::Radio(group, key) => write!(f, "radio({group}={key})"),
            DemoMsg::Value(values) => write!(f, "value([{}])", values.join(", ")),
            DemoMsg::Action(action) => write!(f, "action({action})"),
        }
    }
}

/// Trigger rectangle every story widget is laid out at.
pub const TRIGGER_BOUNDS: Bounds = Bounds {
    x: 0.0,
    y: 0.0,
    width: 120.0,
    height: 32.0,
};

/// Content rectangle below the trigger.
pub const CONTENT_BOUNDS: Bounds = Bounds {
    x: 0.0,
    y: 36.0,
    width: 200.0,
    height: 240.0,
};

/// A story's widget instance.
pub enum StoryWidget {
    Menu(DropdownMenu<DemoMsg>),
    Select(Select<DemoMsg>),
}

impl StoryWidget {
    pub fn controller(&self) -> &PopoverController<DemoMsg> {
        match self {
            StoryWidget::Menu(menu) => menu.controller(),
            StoryWidget::Select(select) => select.controller(),
        }
    }

    pub fn controller_mut(&mut self) -> &mut PopoverController<DemoMsg> {
        match self {
            StoryWidget::Menu(menu) => menu.controller_mut(),
            StoryWidget::Select(select) => select.controller_mut(),
        }
    }

    pub fn widget(&self) -> &dyn Widget<DemoMsg> {
        match self {
            StoryWidget::Menu(menu) => menu,
            StoryWidget::Select(select) => select,
        }
    }

    pub fn widget_mut(&mut self) -> &mut dyn Widget<DemoMsg> {
        match self {
            StoryWidget::Menu(menu) => menu,
            StoryWidget::Select(select) => select,
        }
    }

    /// Type into the search box. Menus have none.
    pub fn search(&mut self, query: &str) -> bool {
        match self {
            StoryWidget::Select(select) => {
                select.search(query);
                true
            }
            StoryWidget::Menu(_) => false,
        }
    }
}

/// A catalog entry.
pub struct Story {
    pub name: &'static str,
    pub title: &'static str,
    build: fn(PopoverConfig<DemoMsg>) -> Result<StoryWidget, ItemError>,
    walkthrough: fn() -> Vec<Step>,
}

impl Story {
    /// Build the story's widget with the given theme, laid out at the
    /// standard bounds.
    pub fn build(&self, theme: &Theme) -> Result<StoryWidget, ItemError> {
        let mut widget = (self.build)(wired().theme(theme.clone()))?;
        let controller = widget.controller_mut();
        controller.set_trigger_bounds(TRIGGER_BOUNDS);
        controller.set_content_bounds(CONTENT_BOUNDS);
        Ok(widget)
    }

    pub fn walkthrough(&self) -> Vec<Step> {
        (self.walkthrough)()
    }
}

/// Config with every callback mapped to a [`DemoMsg`].
fn wired() -> PopoverConfig<DemoMsg> {
    PopoverConfig::new(Vec::new())
        .on_open_change(DemoMsg::OpenChanged)
        .on_item_select(|item: Item| DemoMsg::Selected(item.key))
        .on_checked_change(|(key, checked)| DemoMsg::Checked(key, checked))
        .on_radio_change(|(group, key)| DemoMsg::Radio(group, key))
        .on_value_change(DemoMsg::Value)
        .on_action(DemoMsg::Action)
}

fn key(code: KeyCode) -> Step {
    Step::Key { key: code }
}

fn select(key: &str) -> Step {
    Step::Select { key: key.into() }
}

static CATALOG: &[Story] = &[
    Story {
        name: "dropdown-basic",
        title: "Dropdown menu / basic",
        build: |config| {
            let items = vec![
                Item::action("cut", "Cut").with_action("clipboard.cut"),
                Item::action("copy", "Copy").with_action("clipboard.copy"),
                Item::action("paste", "Paste").disabled(),
                Item::action("delete", "Delete"),
            ];
            Ok(StoryWidget::Menu(DropdownMenu::new("Edit", config.items(items))?))
        },
        walkthrough: || {
            vec![
                Step::Click { x: 10.0, y: 10.0 },
                key(KeyCode::ArrowDown),
                key(KeyCode::ArrowDown),
                key(KeyCode::ArrowDown),
                key(KeyCode::Enter),
                key(KeyCode::ArrowDown),
                key(KeyCode::Enter),
                Step::Toggle,
                Step::Click { x: 500.0, y: 500.0 },
            ]
        },
    },
    Story {
        name: "dropdown-submenus",
        title: "Dropdown menu / nested submenus",
        build: |config| {
            let items = vec![
                Item::action("rename", "Rename"),
                Item::submenu(
                    "share",
                    "Share",
                    vec![
                        Item::action("email", "Email").with_action("share.email"),
                        Item::submenu("social", "Social", vec![Item::action("post", "Post")]),
                    ],
                ),
                Item::submenu(
                    "export",
                    "Export",
                    vec![Item::action("pdf", "PDF"), Item::action("png", "PNG")],
                ),
            ];
            Ok(StoryWidget::Menu(DropdownMenu::new("File", config.items(items))?))
        },
        walkthrough: || {
            vec![
                Step::Open,
                Step::HoverEnter { key: "share".into() },
                Step::HoverLeave { key: "share".into() },
                Step::Wait { ms: 100 },
                Step::HoverEnter { key: "share".into() },
                Step::HoverEnter { key: "social".into() },
                Step::HoverLeave { key: "social".into() },
                Step::Wait { ms: 400 },
                Step::HoverLeave { key: "share".into() },
                Step::Wait { ms: 400 },
                select("export"),
                select("png"),
            ]
        },
    },
    Story {
        name: "dropdown-checkable",
        title: "Dropdown menu / checkbox and radio items",
        build: |config| {
            let items = vec![
                Item::checkbox("grid", "Show grid", true),
                Item::checkbox("rulers", "Show rulers", false),
                Item::radio("small", "Small", "density", false),
                Item::radio("medium", "Medium", "density", true),
                Item::radio("large", "Large", "density", false),
            ];
            Ok(StoryWidget::Menu(DropdownMenu::new("View", config.items(items))?))
        },
        walkthrough: || {
            vec![
                Step::Open,
                select("grid"),
                select("rulers"),
                select("large"),
                key(KeyCode::Escape),
            ]
        },
    },
    Story {
        name: "select-single",
        title: "Select / single",
        build: |config| {
            let items = options([("apple", "Apple"), ("banana", "Banana"), ("cherry", "Cherry")]);
            Ok(StoryWidget::Select(Select::new("Pick a fruit", config.items(items))?))
        },
        walkthrough: || {
            vec![
                Step::Open,
                key(KeyCode::End),
                key(KeyCode::Enter),
                Step::Open,
                key(KeyCode::Home),
                key(KeyCode::Enter),
            ]
        },
    },
    Story {
        name: "select-multiple",
        title: "Select / multiple",
        build: |config| {
            let items = options([("rust", "Rust"), ("go", "Go"), ("zig", "Zig"), ("c", "C")]);
            let select = Select::new("Languages", config.items(items).multiple(true))?;
            Ok(StoryWidget::Select(select))
        },
        walkthrough: || {
            vec![
                Step::Open,
                select("rust"),
                select("zig"),
                select("rust"),
                Step::Click { x: 500.0, y: 500.0 },
            ]
        },
    },
    Story {
        name: "select-searchable",
        title: "Select / searchable",
        build: |config| {
            let items = options([
                ("de", "Germany"),
                ("dk", "Denmark"),
                ("fi", "Finland"),
                ("fr", "France"),
                ("no", "Norway"),
            ]);
            let select = Select::new("Country", config.items(items))?.searchable(true);
            Ok(StoryWidget::Select(select))
        },
        walkthrough: || {
            vec![
                Step::Open,
                Step::Search { query: "an".into() },
                key(KeyCode::ArrowDown),
                key(KeyCode::ArrowDown),
                key(KeyCode::Enter),
            ]
        },
    },
];

/// Every built-in story, in catalog order.
pub fn catalog() -> &'static [Story] {
    CATALOG
}

/// Look up a story by name.
pub fn find(name: &str) -> Option<&'static Story> {
    CATALOG.iter().find(|story| story.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_story_builds() {
        let theme = Theme::default();
        for story in catalog() {
            let widget = story.build(&theme).unwrap();
            assert!(!widget.controller().items().is_empty(), "{}", story.name);
            assert!(!story.walkthrough().is_empty(), "{}", story.name);
        }
    }

    #[test]
    fn test_story_names_are_unique() {
        for (i, story) in catalog().iter().enumerate() {
            assert!(
                catalog()[i + 1..].iter().all(|other| other.name != story.name),
                "{} is listed twice",
                story.name
            );
        }
    }

    #[test]
    fn test_find_unknown_story() {
        assert!(find("dropdown-basic").is_some());
        assert!(find("tabs").is_none());
    }

    #[test]
    fn test_theme_delay_reaches_controller() {
        let theme = Theme::default().with_submenu_close_delay(std::time::Duration::from_millis(50));
        let widget = find("dropdown-submenus").unwrap().build(&theme).unwrap();
        assert_eq!(
            widget.controller().submenu_close_delay(),
            std::time::Duration::from_millis(50)
        );
    }

    #[test]
    fn test_message_display() {
        assert_eq!(DemoMsg::Checked("grid".into(), false).to_string(), "checked(grid=false)");
        assert_eq!(
            DemoMsg::Value(vec!["a".into(), "b".into()]).to_string(),
            "value([a, b])"
        );
    }
}
