//! Delayed-close timers for hover-driven submenus.
//!
//! Leaving a submenu does not close it immediately. A pending close is
//! registered with a deadline; re-entering before the deadline cancels it.
//! Timers are plain data: the host either polls with the current instant or
//! fires a specific [`TimerToken`] from its own timer queue. Both paths check
//! that the token is still registered, so a cancelled timer firing late does
//! nothing.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use web_time::Instant;

/// Handle of one scheduled close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, Copy)]
struct PendingClose {
    token: TimerToken,
    deadline: Instant,
}

/// Open submenus and their pending-close timers.
///
/// At most one timer exists per key.
#[derive(Debug)]
pub struct SubmenuScheduler {
    delay: Duration,
    pending: HashMap<String, PendingClose>,
    open: BTreeSet<String>,
    next_token: u64,
}

impl SubmenuScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
            open: BTreeSet::new(),
            next_token: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn is_open(&self, key: &str) -> bool {
        self.open.contains(key)
    }

    /// Open submenu keys in sorted order.
    pub fn open_keys(&self) -> impl Iterator<Item = &str> {
        self.open.iter().map(String::as_str)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self, key: &str) -> bool {
        self.pending.contains_key(key)
    }

    /// Token of the pending close for `key`, if any.
    pub fn pending_token(&self, key: &str) -> Option<TimerToken> {
        self.pending.get(key).map(|p| p.token)
    }

    /// Earliest pending deadline, for the host to schedule its wake-up.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    /// Start (or restart) the close timer for `key`.
    pub fn schedule_close(&mut self, key: &str, now: Instant) -> TimerToken {
        self.cancel_close(key);
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        let deadline = now + self.delay;
        self.pending
            .insert(key.to_string(), PendingClose { token, deadline });
        log::debug!("submenu '{}' close scheduled in {:?} ({:?})", key, self.delay, token);
        token
    }

    /// Cancel the pending close for `key`. Returns whether one existed.
    pub fn cancel_close(&mut self, key: &str) -> bool {
        let cancelled = self.pending.remove(key).is_some();
        if cancelled {
            log::trace!("submenu '{}' close cancelled", key);
        }
        cancelled
    }

    /// Open `key` immediately, cancelling any pending close first.
    pub fn open_now(&mut self, key: &str) {
        self.cancel_close(key);
        if self.open.insert(key.to_string()) {
            log::debug!("submenu '{}' opened", key);
        }
    }

    /// Close `key` immediately, cancelling any pending close.
    pub fn close_now(&mut self, key: &str) -> bool {
        self.cancel_close(key);
        let closed = self.open.remove(key);
        if closed {
            log::debug!("submenu '{}' closed", key);
        }
        closed
    }

    /// Flip membership of `key`. Returns the new open state.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.is_open(key) {
            self.close_now(key);
            false
        } else {
            self.open_now(key);
            true
        }
    }

    /// Fire a specific timer. Returns the closed key, or `None` when the
    /// token is no longer registered.
    pub fn fire(&mut self, token: TimerToken) -> Option<String> {
        let key = self
            .pending
            .iter()
            .find(|(_, p)| p.token == token)
            .map(|(key, _)| key.clone())?;
        self.pending.remove(&key);
        self.open.remove(&key);
        log::debug!("submenu '{}' closed by timer {:?}", key, token);
        Some(key)
    }

    /// Fire every timer whose deadline has passed. Returns closed keys, sorted.
    pub fn poll(&mut self, now: Instant) -> Vec<String> {
        let mut due: Vec<TimerToken> = self
            .pending
            .values()
            .filter(|p| p.deadline <= now)
            .map(|p| p.token)
            .collect();
        due.sort();
        let mut closed: Vec<String> = due.into_iter().filter_map(|t| self.fire(t)).collect();
        closed.sort();
        closed
    }

    /// Cancel every pending timer, then forget every open submenu.
    pub fn clear(&mut self) {
        let cancelled = self.pending.len();
        self.pending.clear();
        self.open.clear();
        if cancelled > 0 {
            log::debug!("cancelled {} pending submenu timer(s)", cancelled);
        }
    }
}

impl Drop for SubmenuScheduler {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_reschedule_keeps_single_timer() {
        let mut scheduler = SubmenuScheduler::new(DELAY);
        let now = Instant::now();
        scheduler.open_now("share");
        let first = scheduler.schedule_close("share", now);
        let second = scheduler.schedule_close("share", now);
        assert_ne!(first, second);
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(scheduler.pending_token("share"), Some(second));
        assert_eq!(scheduler.fire(first), None, "replaced timer must be inert");
        assert!(scheduler.is_open("share"));
    }

    #[test]
    fn test_poll_fires_only_due_timers() {
        let mut scheduler = SubmenuScheduler::new(DELAY);
        let now = Instant::now();
        scheduler.open_now("share");
        scheduler.schedule_close("share", now);

        assert!(scheduler.poll(now + Duration::from_millis(299)).is_empty());
        assert!(scheduler.is_open("share"));

        assert_eq!(scheduler.poll(now + DELAY), vec!["share".to_string()]);
        assert!(!scheduler.is_open("share"));
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_cancel_before_deadline_keeps_open() {
        let mut scheduler = SubmenuScheduler::new(DELAY);
        let now = Instant::now();
        scheduler.open_now("share");
        let token = scheduler.schedule_close("share", now);
        assert!(scheduler.cancel_close("share"));
        assert!(scheduler.poll(now + DELAY * 2).is_empty());
        assert_eq!(scheduler.fire(token), None);
        assert!(scheduler.is_open("share"));
    }

    #[test]
    fn test_open_now_cancels_pending() {
        let mut scheduler = SubmenuScheduler::new(DELAY);
        scheduler.open_now("share");
        scheduler.schedule_close("share", Instant::now());
        scheduler.open_now("share");
        assert!(!scheduler.has_pending("share"));
        assert!(scheduler.is_open("share"));
    }

    #[test]
    fn test_clear_makes_tokens_stale() {
        let mut scheduler = SubmenuScheduler::new(DELAY);
        let now = Instant::now();
        scheduler.open_now("share");
        scheduler.open_now("export");
        let a = scheduler.schedule_close("share", now);
        let b = scheduler.schedule_close("export", now);

        scheduler.clear();
        assert_eq!(scheduler.open_count(), 0);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.fire(a), None);
        assert_eq!(scheduler.fire(b), None);
        assert!(scheduler.next_deadline().is_none());
    }

    #[test]
    fn test_toggle() {
        let mut scheduler = SubmenuScheduler::new(DELAY);
        assert!(scheduler.toggle("share"));
        assert!(scheduler.is_open("share"));
        assert!(!scheduler.toggle("share"));
        assert!(!scheduler.is_open("share"));
    }

    #[test]
    fn test_next_deadline_is_earliest() {
        let mut scheduler = SubmenuScheduler::new(DELAY);
        let now = Instant::now();
        scheduler.schedule_close("b", now + Duration::from_millis(50));
        scheduler.schedule_close("a", now);
        assert_eq!(scheduler.next_deadline(), Some(now + DELAY));
    }
}
