//! Document-level listeners and outside-interaction checks.
//!
//! While a popover is open it holds a [`ListenerGuard`] registered in the
//! host's [`DocumentListeners`]. Dropping the guard detaches it, so a closed
//! or dropped popover can never keep a document listener alive.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::event::{Event, KeyCode};
use crate::layout::Bounds;

/// Identifier of an attached document listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
struct ListenerTable {
    next_id: u64,
    active: BTreeMap<ListenerId, String>,
}

/// Host-side registry of document-level listeners.
///
/// Cloning shares the same registry.
#[derive(Debug, Clone, Default)]
pub struct DocumentListeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl DocumentListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener on behalf of `owner`; it stays attached until the
    /// returned guard is dropped.
    pub fn attach(&self, owner: impl Into<String>) -> ListenerGuard {
        let mut table = self.table.borrow_mut();
        table.next_id += 1;
        let id = ListenerId(table.next_id);
        let owner = owner.into();
        log::debug!("document listener {:?} attached for '{}'", id, owner);
        table.active.insert(id, owner);
        ListenerGuard {
            id,
            table: Rc::downgrade(&self.table),
        }
    }

    /// Number of listeners currently attached.
    pub fn active_count(&self) -> usize {
        self.table.borrow().active.len()
    }

    pub fn is_attached(&self, id: ListenerId) -> bool {
        self.table.borrow().active.contains_key(&id)
    }

    /// Owners of the attached listeners, in attach order.
    pub fn owners(&self) -> Vec<String> {
        self.table.borrow().active.values().cloned().collect()
    }
}

/// Keeps one document listener attached for as long as it lives.
pub struct ListenerGuard {
    id: ListenerId,
    table: Weak<RefCell<ListenerTable>>,
}

impl ListenerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            if table.borrow_mut().active.remove(&self.id).is_some() {
                log::debug!("document listener {:?} detached", self.id);
            }
        }
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

/// Where a pointer press landed relative to the popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Trigger,
    Content,
    Outside,
}

/// What the outside watcher wants the controller to do with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchAction {
    /// Close the popover; `restore_focus` moves focus back to the trigger.
    Close { restore_focus: bool },
    Advance,
    Retreat,
    First,
    Last,
    Activate,
    /// Not for the watcher.
    Pass,
}

/// Regions handed over by the rendering layer plus the live listener guard.
#[derive(Debug, Default)]
pub struct OutsideWatcher {
    guard: Option<ListenerGuard>,
    trigger: Option<Bounds>,
    content: Option<Bounds>,
    flyouts: HashMap<String, Bounds>,
}

impl OutsideWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to the document if not already attached.
    pub fn activate(&mut self, listeners: &DocumentListeners, owner: &str) {
        if self.guard.is_none() {
            self.guard = Some(listeners.attach(owner));
        }
    }

    /// Detach from the document.
    pub fn deactivate(&mut self) {
        self.guard = None;
        self.flyouts.clear();
    }

    pub fn is_active(&self) -> bool {
        self.guard.is_some()
    }

    pub fn listener_id(&self) -> Option<ListenerId> {
        self.guard.as_ref().map(ListenerGuard::id)
    }

    pub fn set_trigger_bounds(&mut self, bounds: Bounds) {
        self.trigger = Some(bounds);
    }

    pub fn set_content_bounds(&mut self, bounds: Bounds) {
        self.content = Some(bounds);
    }

    /// Register the flyout region of an open submenu.
    pub fn set_flyout_bounds(&mut self, key: &str, bounds: Bounds) {
        self.flyouts.insert(key.to_string(), bounds);
    }

    pub fn remove_flyout(&mut self, key: &str) {
        self.flyouts.remove(key);
    }

    /// Classify a pointer position. Regions never reported count as empty.
    pub fn classify(&self, x: f32, y: f32) -> PointerTarget {
        if self.trigger.is_some_and(|b| b.contains(x, y)) {
            PointerTarget::Trigger
        } else if self.content.is_some_and(|b| b.contains(x, y))
            || self.flyouts.values().any(|b| b.contains(x, y))
        {
            PointerTarget::Content
        } else {
            PointerTarget::Outside
        }
    }

    /// Map a document event to a watcher action. Only meaningful while active.
    pub fn watch(&self, event: &Event, has_focus: bool) -> WatchAction {
        if !self.is_active() {
            return WatchAction::Pass;
        }
        match event {
            Event::PointerDown { position, .. } => match self.classify(position.0, position.1) {
                PointerTarget::Outside => WatchAction::Close {
                    restore_focus: false,
                },
                _ => WatchAction::Pass,
            },
            Event::FocusLost => WatchAction::Close {
                restore_focus: false,
            },
            Event::KeyPress { key, .. } => match key {
                KeyCode::Escape => WatchAction::Close {
                    restore_focus: true,
                },
                KeyCode::ArrowDown => WatchAction::Advance,
                KeyCode::ArrowUp => WatchAction::Retreat,
                KeyCode::Home => WatchAction::First,
                KeyCode::End => WatchAction::Last,
                KeyCode::Enter | KeyCode::Space if has_focus => WatchAction::Activate,
                _ => WatchAction::Pass,
            },
            _ => WatchAction::Pass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watcher(listeners: &DocumentListeners) -> OutsideWatcher {
        let mut watcher = OutsideWatcher::new();
        watcher.set_trigger_bounds(Bounds::new(0.0, 0.0, 100.0, 30.0));
        watcher.set_content_bounds(Bounds::new(0.0, 30.0, 200.0, 120.0));
        watcher.activate(listeners, "menu");
        watcher
    }

    #[test]
    fn test_guard_drop_detaches() {
        let listeners = DocumentListeners::new();
        let guard = listeners.attach("menu");
        assert_eq!(listeners.active_count(), 1);
        assert!(listeners.is_attached(guard.id()));
        drop(guard);
        assert_eq!(listeners.active_count(), 0);
    }

    #[test]
    fn test_guard_outliving_registry_is_harmless() {
        let listeners = DocumentListeners::new();
        let guard = listeners.attach("menu");
        drop(listeners);
        drop(guard);
    }

    #[test]
    fn test_activate_is_idempotent() {
        let listeners = DocumentListeners::new();
        let mut watcher = watcher(&listeners);
        watcher.activate(&listeners, "menu");
        assert_eq!(listeners.active_count(), 1);
        watcher.deactivate();
        assert_eq!(listeners.active_count(), 0);
        assert!(!watcher.is_active());
    }

    #[test]
    fn test_classify_regions() {
        let listeners = DocumentListeners::new();
        let mut watcher = watcher(&listeners);
        assert_eq!(watcher.classify(10.0, 10.0), PointerTarget::Trigger);
        assert_eq!(watcher.classify(150.0, 100.0), PointerTarget::Content);
        assert_eq!(watcher.classify(500.0, 500.0), PointerTarget::Outside);

        watcher.set_flyout_bounds("share", Bounds::new(200.0, 40.0, 120.0, 60.0));
        assert_eq!(watcher.classify(250.0, 50.0), PointerTarget::Content);
        watcher.remove_flyout("share");
        assert_eq!(watcher.classify(250.0, 50.0), PointerTarget::Outside);
    }

    #[test]
    fn test_outside_press_closes_without_focus_restore() {
        let listeners = DocumentListeners::new();
        let watcher = watcher(&listeners);
        assert_eq!(
            watcher.watch(&Event::click(500.0, 500.0), false),
            WatchAction::Close {
                restore_focus: false
            }
        );
        assert_eq!(watcher.watch(&Event::click(50.0, 50.0), false), WatchAction::Pass);
    }

    #[test]
    fn test_escape_restores_focus() {
        let listeners = DocumentListeners::new();
        let watcher = watcher(&listeners);
        assert_eq!(
            watcher.watch(&Event::key(KeyCode::Escape), false),
            WatchAction::Close {
                restore_focus: true
            }
        );
    }

    #[test]
    fn test_enter_requires_focus() {
        let listeners = DocumentListeners::new();
        let watcher = watcher(&listeners);
        assert_eq!(watcher.watch(&Event::key(KeyCode::Enter), false), WatchAction::Pass);
        assert_eq!(watcher.watch(&Event::key(KeyCode::Enter), true), WatchAction::Activate);
    }

    #[test]
    fn test_inactive_watcher_passes_everything() {
        let watcher = OutsideWatcher::new();
        assert_eq!(watcher.watch(&Event::key(KeyCode::ArrowDown), true), WatchAction::Pass);
        assert_eq!(watcher.watch(&Event::click(1.0, 1.0), true), WatchAction::Pass);
    }
}
