//! Centralized constants for popkit_ui
//!
//! Defaults for the theme's timing and stacking values. Widgets read these
//! through [`Theme`](crate::theme::Theme), never directly.

use std::time::Duration;

// =============================================================================
// Timing
// =============================================================================

/// Grace window a submenu stays open after the pointer leaves it
pub const SUBMENU_CLOSE_DELAY: Duration = Duration::from_millis(300);

/// Upper bound accepted for a configured close delay
pub const MAX_SUBMENU_CLOSE_DELAY: Duration = Duration::from_secs(5);

// =============================================================================
// Stacking order
// =============================================================================

/// Stacking order of a popover's content layer
pub const Z_INDEX_POPOVER: i32 = 50;

/// Submenus stack one level above their parent popover
pub const Z_INDEX_SUBMENU_STEP: i32 = 1;

// =============================================================================
// Focus cursor
// =============================================================================

/// Cursor value meaning "no item highlighted"
pub const NO_FOCUS: isize = -1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_delay_within_bounds() {
        assert!(SUBMENU_CLOSE_DELAY <= MAX_SUBMENU_CLOSE_DELAY);
        assert_eq!(SUBMENU_CLOSE_DELAY.as_millis(), 300);
    }

    #[test]
    fn test_submenu_stacks_above_popover() {
        assert!(Z_INDEX_POPOVER + Z_INDEX_SUBMENU_STEP > Z_INDEX_POPOVER);
    }
}
