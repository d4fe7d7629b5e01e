//! Theme values consumed by the popover controllers
//!
//! The controller never hard-codes timing or stacking numbers. It asks a
//! [`ThemeProvider`] and falls back to the process-wide default theme.

use std::sync::OnceLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Light or dark palette, passed through to the style resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}

/// Animation and interaction timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Grace window before a hovered-out submenu closes, in milliseconds
    pub submenu_close_delay_ms: u64,
}

impl Timing {
    /// The close delay, clamped to [`constants::MAX_SUBMENU_CLOSE_DELAY`].
    pub fn submenu_close_delay(&self) -> Duration {
        Duration::from_millis(self.submenu_close_delay_ms).min(constants::MAX_SUBMENU_CLOSE_DELAY)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            submenu_close_delay_ms: constants::SUBMENU_CLOSE_DELAY.as_millis() as u64,
        }
    }
}

/// Stacking order for overlay layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZIndex {
    /// Popover content layer
    pub popover: i32,
    /// Added per submenu nesting level
    pub submenu_step: i32,
}

impl ZIndex {
    /// Stacking order for content nested `depth` submenus deep (0 = root popover).
    pub fn at_depth(&self, depth: usize) -> i32 {
        let depth = i32::try_from(depth).unwrap_or(i32::MAX);
        self.popover
            .saturating_add(self.submenu_step.saturating_mul(depth))
    }
}

impl Default for ZIndex {
    fn default() -> Self {
        Self {
            popover: constants::Z_INDEX_POPOVER,
            submenu_step: constants::Z_INDEX_SUBMENU_STEP,
        }
    }
}

/// A complete theme for the popover widgets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub mode: ThemeMode,
    pub timing: Timing,
    pub z_index: ZIndex,
}

impl Theme {
    /// Create the default dark theme
    pub fn dark() -> Self {
        Self::default()
    }

    /// Create the light theme (same timing, light palette)
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            ..Self::default()
        }
    }

    /// Override the submenu close delay.
    pub fn with_submenu_close_delay(mut self, delay: Duration) -> Self {
        self.timing.submenu_close_delay_ms = delay.as_millis() as u64;
        self
    }
}

/// Supplies theme values to widgets.
pub trait ThemeProvider {
    fn theme(&self) -> &Theme;

    fn submenu_close_delay(&self) -> Duration {
        self.theme().timing.submenu_close_delay()
    }
}

impl ThemeProvider for Theme {
    fn theme(&self) -> &Theme {
        self
    }
}

/// Global theme singleton for convenience
static CURRENT_THEME: OnceLock<Theme> = OnceLock::new();

/// Set the global theme (can only be called once)
///
/// Returns `Err` with the provided theme if a theme has already been set.
pub fn set_theme(theme: Theme) -> Result<(), Theme> {
    CURRENT_THEME.set(theme)
}

/// Get the current global theme (or dark theme if not set)
pub fn current_theme() -> &'static Theme {
    CURRENT_THEME.get_or_init(Theme::dark)
}

/// Provider backed by the global theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalTheme;

impl ThemeProvider for GlobalTheme {
    fn theme(&self) -> &Theme {
        current_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_close_delay_is_300ms() {
        let theme = Theme::default();
        assert_eq!(theme.submenu_close_delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_close_delay_is_clamped() {
        let theme = Theme::dark().with_submenu_close_delay(Duration::from_secs(60));
        assert_eq!(
            theme.submenu_close_delay(),
            constants::MAX_SUBMENU_CLOSE_DELAY
        );
    }

    #[test]
    fn test_z_index_grows_with_depth() {
        let z = ZIndex::default();
        assert_eq!(z.at_depth(0), constants::Z_INDEX_POPOVER);
        assert!(z.at_depth(2) > z.at_depth(1));
    }

    #[test]
    fn test_partial_theme_json_uses_defaults() {
        let json = r#"{ "mode": "light", "timing": { "submenu_close_delay_ms": 120 } }"#;
        let theme: Theme = serde_json::from_str(json).unwrap();
        assert_eq!(theme.mode, ThemeMode::Light);
        assert_eq!(theme.submenu_close_delay(), Duration::from_millis(120));
        assert_eq!(theme.z_index, ZIndex::default());
    }

    #[test]
    fn test_light_keeps_default_timing() {
        let light = Theme::light();
        assert_eq!(light.mode, ThemeMode::Light);
        assert_eq!(light.timing, Timing::default());
    }

    #[test]
    fn test_global_provider_reads_current_theme() {
        assert_eq!(
            GlobalTheme.submenu_close_delay(),
            current_theme().timing.submenu_close_delay()
        );
    }
}
