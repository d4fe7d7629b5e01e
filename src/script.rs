//! Scripted interaction replay.
//!
//! A scenario names a story and lists steps. The player feeds each step to
//! the story's widget against a virtual clock, so submenu timers fire
//! deterministically, and records one transcript line per step.

use std::fmt;
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use popkit_ui::item::ItemError;
use popkit_ui::{ClassNameResolver, Event, KeyCode, Response, Theme, Widget};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Instant;

use crate::stories::{self, DemoMsg, Story, StoryWidget};

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Open,
    Close,
    Toggle,
    Key { key: KeyCode },
    /// Left press at a document position
    Click { x: f32, y: f32 },
    /// Press on a rendered item
    Select { key: String },
    HoverEnter { key: String },
    HoverLeave { key: String },
    /// Advance the virtual clock and fire due timers
    Wait { ms: u64 },
    Search { query: String },
    FocusLost,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Open => write!(f, "open"),
            Step::Close => write!(f, "close"),
            Step::Toggle => write!(f, "toggle"),
            Step::Key { key } => write!(f, "key {key:?}"),
            Step::Click { x, y } => write!(f, "click ({x}, {y})"),
            Step::Select { key } => write!(f, "select {key}"),
            Step::HoverEnter { key } => write!(f, "hover-enter {key}"),
            Step::HoverLeave { key } => write!(f, "hover-leave {key}"),
            Step::Wait { ms } => write!(f, "wait {ms}ms"),
            Step::Search { query } => write!(f, "search {query:?}"),
            Step::FocusLost => write!(f, "focus-lost"),
        }
    }
}

/// A story plus the steps to replay against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub story: String,
    /// Empty means the story's own walkthrough
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Errors that can occur while loading or replaying a scenario.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown story '{0}'")]
    UnknownStory(String),

    #[error("Story items are invalid: {0}")]
    Items(#[from] ItemError),
}

/// Replays steps against one story widget.
pub struct Player {
    story: &'static Story,
    widget: StoryWidget,
    resolver: ClassNameResolver,
    clock: Instant,
    transcript: Vec<String>,
}

impl Player {
    pub fn new(story: &'static Story, theme: &Theme) -> Result<Self, ScriptError> {
        Ok(Self {
            story,
            widget: story.build(theme)?,
            resolver: ClassNameResolver::default().with_mode(theme.mode),
            clock: Instant::now(),
            transcript: Vec::new(),
        })
    }

    pub fn story(&self) -> &'static Story {
        self.story
    }

    pub fn widget(&self) -> &StoryWidget {
        &self.widget
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Current view tree as an indented outline.
    pub fn outline(&self) -> String {
        self.widget.widget().view(&self.resolver).outline()
    }

    pub fn run(&mut self, steps: &[Step]) {
        for step in steps {
            self.play(step);
        }
    }

    /// Apply one step and record its effect.
    pub fn play(&mut self, step: &Step) -> Response<DemoMsg> {
        let response = self.apply(step);
        let mut line = format!(
            "{:>2}. {:<22} {}",
            self.transcript.len() + 1,
            step.to_string(),
            self.state()
        );
        if !response.messages.is_empty() {
            let messages: Vec<String> = response.messages.iter().map(ToString::to_string).collect();
            let _ = write!(line, " => {}", messages.join(", "));
        }
        log::debug!("{}: {}", self.story.name, line);
        self.transcript.push(line);
        response
    }

    fn apply(&mut self, step: &Step) -> Response<DemoMsg> {
        match step {
            Step::Open => self.widget.controller_mut().open(),
            Step::Close => self.widget.controller_mut().close(),
            Step::Toggle => self.widget.controller_mut().toggle(),
            Step::Key { key } => self.widget.widget_mut().on_event(&Event::key(*key)),
            Step::Click { x, y } => self.widget.widget_mut().on_event(&Event::click(*x, *y)),
            Step::Select { key } => self
                .widget
                .widget_mut()
                .on_event(&Event::ItemClick { key: key.clone() }),
            Step::HoverEnter { key } => self
                .widget
                .widget_mut()
                .on_event(&Event::SubmenuEnter { key: key.clone() }),
            Step::HoverLeave { key } => {
                let now = self.clock;
                self.widget.controller_mut().hover_leave_submenu_at(key, now)
            }
            Step::Wait { ms } => {
                self.clock += Duration::from_millis(*ms);
                let now = self.clock;
                self.widget.controller_mut().poll_timers(now)
            }
            Step::Search { query } => {
                if self.widget.search(query) {
                    Response::captured()
                } else {
                    log::warn!("{}: story has no search box", self.story.name);
                    Response::ignored()
                }
            }
            Step::FocusLost => self.widget.widget_mut().on_event(&Event::FocusLost),
        }
    }

    fn state(&self) -> String {
        let controller = self.widget.controller();
        let mut state = if controller.is_open() {
            "open".to_string()
        } else {
            "closed".to_string()
        };
        if let Some(item) = controller.focused_item() {
            let _ = write!(state, " focus={}", item.key);
        }
        let submenus: Vec<&str> = controller.open_submenus().collect();
        if !submenus.is_empty() {
            let _ = write!(state, " submenus=[{}]", submenus.join(", "));
        }
        if !controller.value().is_empty() {
            let _ = write!(state, " value=[{}]", controller.value().join(", "));
        }
        state
    }
}

/// Replay a scenario and return its transcript.
pub fn run_scenario(scenario: &Scenario, theme: &Theme) -> Result<Vec<String>, ScriptError> {
    let story = stories::find(&scenario.story)
        .ok_or_else(|| ScriptError::UnknownStory(scenario.story.clone()))?;
    let mut player = Player::new(story, theme)?;
    if scenario.steps.is_empty() {
        player.run(&story.walkthrough());
    } else {
        player.run(&scenario.steps);
    }
    Ok(player.transcript)
}

/// Replay every built-in story's walkthrough, one section per story.
pub fn run_catalog(theme: &Theme, show_outline: bool) -> Result<Vec<String>, ScriptError> {
    let mut lines = Vec::new();
    for story in stories::catalog() {
        let mut player = Player::new(story, theme)?;
        player.run(&story.walkthrough());
        lines.push(format!("== {} ({}) ==", story.title, story.name));
        lines.append(&mut player.transcript);
        if show_outline {
            lines.extend(player.outline().lines().map(str::to_string));
        }
        lines.push(String::new());
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str) -> Player {
        Player::new(stories::find(name).unwrap(), &Theme::default()).unwrap()
    }

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::from_json(
            r#"{
                "story": "dropdown-submenus",
                "steps": [
                    { "step": "open" },
                    { "step": "key", "key": "ArrowDown" },
                    { "step": "hover_enter", "key": "share" },
                    { "step": "wait", "ms": 250 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(scenario.story, "dropdown-submenus");
        assert_eq!(
            scenario.steps,
            vec![
                Step::Open,
                Step::Key {
                    key: KeyCode::ArrowDown
                },
                Step::HoverEnter {
                    key: "share".into()
                },
                Step::Wait { ms: 250 },
            ]
        );
    }

    #[test]
    fn test_steps_default_to_walkthrough() {
        let scenario = Scenario::from_json(r#"{ "story": "dropdown-basic" }"#).unwrap();
        let transcript = run_scenario(&scenario, &Theme::default()).unwrap();
        assert_eq!(
            transcript.len(),
            stories::find("dropdown-basic").unwrap().walkthrough().len()
        );
    }

    #[test]
    fn test_unknown_story() {
        let scenario = Scenario {
            story: "tabs".into(),
            steps: Vec::new(),
        };
        let err = run_scenario(&scenario, &Theme::default()).unwrap_err();
        assert!(matches!(err, ScriptError::UnknownStory(name) if name == "tabs"));
    }

    #[test]
    fn test_unknown_step_fails_to_parse() {
        let err = Scenario::from_json(r#"{ "story": "x", "steps": [{ "step": "dance" }] }"#)
            .unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn test_wait_fires_submenu_timer_on_virtual_clock() {
        let mut player = player("dropdown-submenus");
        player.run(&[
            Step::Open,
            Step::HoverEnter {
                key: "share".into(),
            },
            Step::HoverLeave {
                key: "share".into(),
            },
            Step::Wait { ms: 299 },
        ]);
        assert!(player.widget().controller().is_submenu_open("share"));

        player.play(&Step::Wait { ms: 1 });
        assert!(!player.widget().controller().is_submenu_open("share"));
        assert_eq!(player.widget().controller().pending_submenu_timers(), 0);
    }

    #[test]
    fn test_transcript_records_messages() {
        let mut player = player("dropdown-basic");
        player.run(&[
            Step::Open,
            Step::Select { key: "cut".into() },
        ]);
        let last = player.transcript().last().unwrap();
        assert!(last.contains("closed"), "{last}");
        assert!(
            last.ends_with("=> select(cut), value([cut]), action(clipboard.cut), open_change(false)"),
            "{last}"
        );
    }

    #[test]
    fn test_click_toggles_via_trigger_bounds() {
        let mut player = player("select-single");
        player.play(&Step::Click { x: 5.0, y: 5.0 });
        assert!(player.widget().controller().is_open());
        player.play(&Step::Click { x: 50.0, y: 100.0 });
        assert!(player.widget().controller().is_open(), "press inside content");
        player.play(&Step::Click { x: 900.0, y: 5.0 });
        assert!(!player.widget().controller().is_open());
    }

    #[test]
    fn test_search_on_menu_is_ignored() {
        let mut player = player("dropdown-basic");
        player.play(&Step::Open);
        let response = player.play(&Step::Search { query: "cu".into() });
        assert!(response.is_ignored());
        assert_eq!(player.widget().controller().visible_count(), 4);
    }

    #[test]
    fn test_searchable_walkthrough_selects_filtered_option() {
        let mut player = player("select-searchable");
        player.run(&stories::find("select-searchable").unwrap().walkthrough());
        // "an" keeps Germany, Finland and France; two steps down lands on Finland.
        assert_eq!(player.widget().controller().value(), ["fi".to_string()]);
        assert!(!player.widget().controller().is_open());
        assert_eq!(player.widget().controller().filter(), "");
    }

    #[test]
    fn test_catalog_has_a_section_per_story() {
        let lines = run_catalog(&Theme::default(), false).unwrap();
        let headers = lines.iter().filter(|line| line.starts_with("== ")).count();
        assert_eq!(headers, stories::catalog().len());
        assert!(lines.iter().any(|line| line.contains("radio(density=large)")));
    }

    #[test]
    fn test_outline_shows_open_content() {
        let mut player = player("dropdown-checkable");
        player.play(&Step::Open);
        let outline = player.outline();
        assert!(outline.starts_with("Trigger \"View\""), "{outline}");
        assert!(outline.contains("z=50"));
        assert!(outline.contains("--checked"));
    }
}
