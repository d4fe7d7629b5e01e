//! Highlighted-item cursor for keyboard navigation.

use crate::constants::NO_FOCUS;

/// Index of the highlighted item, `-1` when nothing is highlighted.
///
/// Movement wraps circularly. Every operation takes the current item count
/// so an out-of-range index left behind by a shrinking list is treated as
/// "no focus" instead of being dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusCursor {
    index: isize,
}

impl Default for FocusCursor {
    fn default() -> Self {
        Self { index: NO_FOCUS }
    }
}

impl FocusCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw index, `-1` when unfocused.
    pub fn index(&self) -> isize {
        self.index
    }

    /// Focused position if it is valid for `count` items.
    pub fn get(&self, count: usize) -> Option<usize> {
        usize::try_from(self.index).ok().filter(|&i| i < count)
    }

    pub fn reset(&mut self) {
        self.index = NO_FOCUS;
    }

    fn normalize(&mut self, count: usize) {
        if self.get(count).is_none() {
            self.index = NO_FOCUS;
        }
    }

    /// Move to the next item, wrapping to the first. No-op on an empty list.
    pub fn advance(&mut self, count: usize) {
        self.normalize(count);
        if count == 0 {
            return;
        }
        let count = count as isize;
        self.index = (self.index + 1).rem_euclid(count);
        log::trace!("focus advanced to {}", self.index);
    }

    /// Move to the previous item, wrapping to the last. No-op on an empty list.
    pub fn retreat(&mut self, count: usize) {
        self.normalize(count);
        if count == 0 {
            return;
        }
        self.index = if self.index <= 0 {
            count as isize - 1
        } else {
            self.index - 1
        };
        log::trace!("focus retreated to {}", self.index);
    }

    pub fn first(&mut self, count: usize) {
        self.index = if count == 0 { NO_FOCUS } else { 0 };
    }

    pub fn last(&mut self, count: usize) {
        self.index = count as isize - 1;
    }

    /// Highlight a specific position; out-of-range positions clear focus.
    pub fn set(&mut self, position: usize, count: usize) {
        self.index = if position < count {
            position as isize
        } else {
            NO_FOCUS
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_advance_lands_on_zero() {
        let mut cursor = FocusCursor::new();
        cursor.advance(3);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_first_retreat_lands_on_last() {
        let mut cursor = FocusCursor::new();
        cursor.retreat(3);
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_advance_cycle_returns_to_start() {
        for count in 1..6 {
            for start in 0..count {
                let mut cursor = FocusCursor::new();
                cursor.set(start, count);
                for _ in 0..count {
                    cursor.advance(count);
                }
                assert_eq!(cursor.get(count), Some(start), "count={count} start={start}");
            }
        }
    }

    #[test]
    fn test_retreat_wraps_from_zero() {
        let mut cursor = FocusCursor::new();
        cursor.set(0, 4);
        cursor.retreat(4);
        assert_eq!(cursor.index(), 3);
    }

    #[test]
    fn test_empty_list_stays_unfocused() {
        let mut cursor = FocusCursor::new();
        cursor.advance(0);
        assert_eq!(cursor.index(), NO_FOCUS);
        cursor.retreat(0);
        assert_eq!(cursor.index(), NO_FOCUS);
        cursor.last(0);
        assert_eq!(cursor.index(), NO_FOCUS);
        cursor.first(0);
        assert_eq!(cursor.index(), NO_FOCUS);
    }

    #[test]
    fn test_stale_index_after_shrink_is_dropped() {
        let mut cursor = FocusCursor::new();
        cursor.set(4, 5);
        assert_eq!(cursor.get(2), None);
        cursor.advance(2);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_set_out_of_range_clears() {
        let mut cursor = FocusCursor::new();
        cursor.set(7, 3);
        assert_eq!(cursor.index(), NO_FOCUS);
    }
}
