//! popkit - Demo catalog for the popkit_ui popover widgets
//!
//! Loads a JSON configuration, builds the catalog stories and replays
//! scripted interactions against them, printing a transcript of every
//! state change and owner message.

pub mod config;
pub mod script;
pub mod stories;

pub use config::{AppConfig, ConfigError, LogLevel};
pub use script::{Player, Scenario, ScriptError, Step, run_catalog, run_scenario};
pub use stories::{DemoMsg, Story, StoryWidget};
