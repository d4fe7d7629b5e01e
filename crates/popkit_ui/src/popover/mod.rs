//! Popover interaction controller
//!
//! Shared behavior of the dropdown menu and select widgets: open/close
//! lifecycle, keyboard navigation, outside-click dismissal, hover-driven
//! submenu timers and controlled/uncontrolled value synchronization.
//!
//! The controller is single-threaded and synchronous. Every operation
//! returns a [`Response`] carrying the owner messages produced by the
//! operation's callbacks, in the order they fired, plus instructions for the
//! host (capture the event, prevent the default action, move focus).

pub mod focus;
pub mod open_state;
pub mod selection;
pub mod submenu;
pub mod watcher;

#[cfg(test)]
mod tests;

use std::time::Duration;

use web_time::Instant;

use crate::callback::{emit_into, Callback};
use crate::event::{Event, MouseButton};
use crate::item::{self, Item, ItemError, ItemKind};
use crate::layout::Bounds;
use crate::theme::{current_theme, Theme, ThemeProvider, ZIndex};
use crate::{builder_field, builder_option, callback_setter};

pub use focus::FocusCursor;
pub use open_state::{OpenState, Transition};
pub use selection::{Activation, Resolution, SelectionResolver, ValueState};
pub use submenu::{SubmenuScheduler, TimerToken};
pub use watcher::{
    DocumentListeners, ListenerGuard, ListenerId, OutsideWatcher, PointerTarget, WatchAction,
};

/// Where the host should move keyboard focus after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRequest {
    Trigger,
}

/// Coarse interaction state of a popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverPhase {
    Closed,
    OpenNoFocus,
    OpenFocused(usize),
}

/// Result of a controller operation.
#[derive(Debug)]
pub struct Response<M> {
    /// Owner messages in emission order
    pub messages: Vec<M>,
    /// Whether the controller consumed the input
    pub captured: bool,
    /// Whether the host must suppress the input's default action
    pub prevent_default: bool,
    pub focus: Option<FocusRequest>,
}

impl<M> Default for Response<M> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<M> Response<M> {
    /// The input was not for this popover.
    pub fn ignored() -> Self {
        Self {
            messages: Vec::new(),
            captured: false,
            prevent_default: false,
            focus: None,
        }
    }

    /// The input was consumed.
    pub fn captured() -> Self {
        Self {
            captured: true,
            ..Self::ignored()
        }
    }

    fn prevent_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }

    pub fn is_ignored(&self) -> bool {
        !self.captured && self.messages.is_empty() && self.focus.is_none()
    }

    /// Append another response's effects to this one.
    pub fn merge(&mut self, other: Response<M>) {
        self.messages.extend(other.messages);
        self.captured |= other.captured;
        self.prevent_default |= other.prevent_default;
        self.focus = self.focus.or(other.focus);
    }
}

/// Construction parameters for a [`PopoverController`].
pub struct PopoverConfig<M> {
    name: String,
    items: Vec<Item>,
    multiple: bool,
    controlled_open: Option<bool>,
    default_open: bool,
    controlled_value: Option<Vec<String>>,
    default_value: Vec<String>,
    theme: Theme,
    listeners: Option<DocumentListeners>,
    on_open_change: Callback<bool, M>,
    on_item_select: Callback<Item, M>,
    on_checked_change: Callback<(String, bool), M>,
    on_radio_change: Callback<(String, String), M>,
    on_value_change: Callback<Vec<String>, M>,
    on_action: Callback<String, M>,
}

impl<M> PopoverConfig<M> {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            name: "popover".to_string(),
            items,
            multiple: false,
            controlled_open: None,
            default_open: false,
            controlled_value: None,
            default_value: Vec::new(),
            theme: current_theme().clone(),
            listeners: None,
            on_open_change: Callback::none(),
            on_item_select: Callback::none(),
            on_checked_change: Callback::none(),
            on_radio_change: Callback::none(),
            on_value_change: Callback::none(),
            on_action: Callback::none(),
        }
    }

    /// Label used for the document listener and in logs.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    builder_field!(items, Vec<Item>);
    builder_field!(multiple, bool);
    builder_field!(default_open, bool);
    builder_field!(default_value, Vec<String>);
    builder_field!(theme, Theme);
    builder_option!(controlled_open, bool);
    builder_option!(controlled_value, Vec<String>);
    builder_option!(listeners, DocumentListeners);

    callback_setter!(on_open_change, bool);
    callback_setter!(on_item_select, Item);
    callback_setter!(on_checked_change, (String, bool));
    callback_setter!(on_radio_change, (String, String));
    callback_setter!(on_value_change, Vec<String>);
    callback_setter!(on_action, String);
}

struct Callbacks<M> {
    on_open_change: Callback<bool, M>,
    on_item_select: Callback<Item, M>,
    on_checked_change: Callback<(String, bool), M>,
    on_radio_change: Callback<(String, String), M>,
    on_value_change: Callback<Vec<String>, M>,
    on_action: Callback<String, M>,
}

/// Interaction state of one popover widget instance.
pub struct PopoverController<M> {
    name: String,
    items: Vec<Item>,
    /// Positions in `items` that pass the current filter
    visible: Vec<usize>,
    filter: String,
    open: OpenState,
    focus: FocusCursor,
    listeners: DocumentListeners,
    watcher: OutsideWatcher,
    submenus: SubmenuScheduler,
    resolver: SelectionResolver,
    value: ValueState,
    z_index: ZIndex,
    callbacks: Callbacks<M>,
}

impl<M> std::fmt::Debug for PopoverController<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopoverController")
            .field("name", &self.name)
            .field("open", &self.open)
            .field("focus", &self.focus)
            .field("visible", &self.visible.len())
            .field("open_submenus", &self.submenus.open_count())
            .finish_non_exhaustive()
    }
}

impl<M> PopoverController<M> {
    /// Build a controller. Fails when item keys are empty or not unique.
    pub fn new(config: PopoverConfig<M>) -> Result<Self, ItemError> {
        item::validate(&config.items)?;

        let visible = (0..config.items.len()).collect();
        let mut controller = Self {
            name: config.name,
            items: config.items,
            visible,
            filter: String::new(),
            open: OpenState::new(config.controlled_open, config.default_open),
            focus: FocusCursor::new(),
            listeners: config.listeners.unwrap_or_default(),
            watcher: OutsideWatcher::new(),
            submenus: SubmenuScheduler::new(config.theme.submenu_close_delay()),
            resolver: SelectionResolver::new(config.multiple),
            value: ValueState::new(config.controlled_value, config.default_value),
            z_index: config.theme.z_index,
            callbacks: Callbacks {
                on_open_change: config.on_open_change,
                on_item_select: config.on_item_select,
                on_checked_change: config.on_checked_change,
                on_radio_change: config.on_radio_change,
                on_value_change: config.on_value_change,
                on_action: config.on_action,
            },
        };
        if controller.open.is_open() {
            controller.watcher.activate(&controller.listeners, &controller.name);
        }
        Ok(controller)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        self.open.is_open()
    }

    pub fn is_controlled(&self) -> bool {
        self.open.is_controlled()
    }

    /// Highlighted position among the visible items, `-1` when none.
    pub fn focused_index(&self) -> isize {
        self.focus.index()
    }

    pub fn focused_item(&self) -> Option<&Item> {
        self.focus
            .get(self.visible.len())
            .and_then(|pos| self.visible.get(pos))
            .and_then(|&idx| self.items.get(idx))
    }

    pub fn phase(&self) -> PopoverPhase {
        if !self.is_open() {
            PopoverPhase::Closed
        } else {
            match self.focus.get(self.visible.len()) {
                Some(pos) => PopoverPhase::OpenFocused(pos),
                None => PopoverPhase::OpenNoFocus,
            }
        }
    }

    pub fn is_submenu_open(&self, key: &str) -> bool {
        self.submenus.is_open(key)
    }

    pub fn open_submenus(&self) -> impl Iterator<Item = &str> {
        self.submenus.open_keys()
    }

    pub fn pending_submenu_timers(&self) -> usize {
        self.submenus.pending_count()
    }

    /// Token of the pending close timer for `key`, for hosts that run their
    /// own timer queue.
    pub fn submenu_timer(&self, key: &str) -> Option<TimerToken> {
        self.submenus.pending_token(key)
    }

    /// When the host should next call [`poll_timers`](Self::poll_timers).
    pub fn next_deadline(&self) -> Option<Instant> {
        self.submenus.next_deadline()
    }

    pub fn submenu_close_delay(&self) -> Duration {
        self.submenus.delay()
    }

    /// Stacking order from the theme this controller was built with.
    pub fn z_index(&self) -> &ZIndex {
        &self.z_index
    }

    /// The whole item tree.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Top-level items passing the current filter, in order.
    pub fn visible_items(&self) -> impl Iterator<Item = &Item> {
        self.visible.iter().filter_map(|&idx| self.items.get(idx))
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn value(&self) -> &[String] {
        self.value.values()
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.value.contains(key)
    }

    pub fn is_multiple(&self) -> bool {
        self.resolver.is_multiple()
    }

    pub fn listeners(&self) -> &DocumentListeners {
        &self.listeners
    }

    /// Whether this popover currently has a document listener attached.
    pub fn is_listening(&self) -> bool {
        self.watcher.is_active()
    }

    // =========================================================================
    // Rendering layer hand-off
    // =========================================================================

    pub fn set_trigger_bounds(&mut self, bounds: Bounds) {
        self.watcher.set_trigger_bounds(bounds);
    }

    pub fn set_content_bounds(&mut self, bounds: Bounds) {
        self.watcher.set_content_bounds(bounds);
    }

    /// Report the flyout region of an open submenu so presses inside it are
    /// not treated as outside presses.
    pub fn set_submenu_bounds(&mut self, key: &str, bounds: Bounds) {
        if self.submenus.is_open(key) {
            self.watcher.set_flyout_bounds(key, bounds);
        }
    }

    /// Apply a new theme's timing and stacking order. Pending timers keep
    /// their deadlines.
    pub fn apply_theme(&mut self, provider: &impl ThemeProvider) {
        self.submenus.set_delay(provider.submenu_close_delay());
        self.z_index = provider.theme().z_index.clone();
    }

    // =========================================================================
    // Open state
    // =========================================================================

    pub fn toggle(&mut self) -> Response<M> {
        let target = !self.is_open();
        self.request_open(target, false)
    }

    pub fn open(&mut self) -> Response<M> {
        self.request_open(true, false)
    }

    pub fn close(&mut self) -> Response<M> {
        self.request_open(false, false)
    }

    fn request_open(&mut self, open: bool, restore_focus: bool) -> Response<M> {
        let mut response = Response::captured();
        if !open {
            // Controlled popovers tear down when the owner syncs the close.
            if !self.is_controlled() {
                self.teardown();
            }
            if restore_focus {
                response.focus = Some(FocusRequest::Trigger);
            }
        }
        if open == self.is_open() {
            return response;
        }

        log::debug!(
            "{}: {} requested{}",
            self.name,
            if open { "open" } else { "close" },
            if self.is_controlled() { " (controlled)" } else { "" }
        );
        emit_into(&mut response.messages, &self.callbacks.on_open_change, open);
        let transition = self.open.request(open);
        self.apply_transition(transition);
        response
    }

    /// Apply the owner's authoritative open value (controlled mode).
    pub fn sync_open(&mut self, open: bool) {
        let transition = self.open.sync(open);
        self.apply_transition(transition);
    }

    fn apply_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Opened => {
                self.focus.reset();
                self.watcher.activate(&self.listeners, &self.name);
                log::debug!("{}: opened", self.name);
            }
            Transition::Closed => {
                self.teardown();
                self.watcher.deactivate();
                if !self.filter.is_empty() {
                    self.filter.clear();
                    self.refresh_visible();
                }
                log::debug!("{}: closed", self.name);
            }
            Transition::Unchanged => {}
        }
    }

    /// Reset focus and cancel every submenu timer before forgetting open
    /// submenus.
    fn teardown(&mut self) {
        self.focus.reset();
        for key in self.submenus.open_keys().map(str::to_string).collect::<Vec<_>>() {
            self.watcher.remove_flyout(&key);
        }
        self.submenus.clear();
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn advance_focus(&mut self) -> Response<M> {
        self.navigate(FocusCursor::advance)
    }

    pub fn retreat_focus(&mut self) -> Response<M> {
        self.navigate(FocusCursor::retreat)
    }

    pub fn focus_first(&mut self) -> Response<M> {
        self.navigate(FocusCursor::first)
    }

    pub fn focus_last(&mut self) -> Response<M> {
        self.navigate(FocusCursor::last)
    }

    fn navigate(&mut self, step: fn(&mut FocusCursor, usize)) -> Response<M> {
        if !self.is_open() {
            return Response::ignored();
        }
        step(&mut self.focus, self.visible.len());
        Response::captured().prevent_default()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Activate the highlighted item. No-op without a valid highlight.
    pub fn select_focused(&mut self) -> Response<M> {
        if !self.is_open() {
            return Response::ignored();
        }
        match self.focused_item().map(|item| item.key.clone()) {
            Some(key) => self.activate(&key, Activation::Keyboard),
            None => Response::captured(),
        }
    }

    /// Activate the item with `key`. Items hidden by the filter or inside a
    /// closed submenu are ignored.
    pub fn select_key(&mut self, key: &str) -> Response<M> {
        if !self.is_open() {
            return Response::ignored();
        }
        if !self.is_reachable(key) {
            log::debug!("{}: '{}' is not on screen, ignoring", self.name, key);
            return Response::ignored();
        }
        self.activate(key, Activation::Pointer)
    }

    fn activate(&mut self, key: &str, activation: Activation) -> Response<M> {
        let Some(item) = item::find(&self.items, key).cloned() else {
            log::warn!("{}: activation of unknown item '{}'", self.name, key);
            return Response::ignored();
        };

        let mut response = Response::captured();
        if activation == Activation::Keyboard {
            response = response.prevent_default();
        }
        let resolution = self.resolver.resolve(&item, activation);
        if !resolution.notifies() {
            log::debug!("{}: '{}' is disabled, ignoring", self.name, key);
            return response;
        }

        log::debug!("{}: '{}' selected ({:?})", self.name, key, resolution);
        emit_into(&mut response.messages, &self.callbacks.on_item_select, item.clone());

        match resolution {
            Resolution::ToggleCheckbox => {
                let checked = !item.checked().unwrap_or(false);
                if let Some(ItemKind::Checkbox { checked: state }) =
                    item::find_mut(&mut self.items, key).map(|i| &mut i.kind)
                {
                    *state = checked;
                }
                emit_into(
                    &mut response.messages,
                    &self.callbacks.on_checked_change,
                    (item.key.clone(), checked),
                );
            }
            Resolution::CheckRadio => {
                if let ItemKind::Radio { group, .. } = &item.kind {
                    item::check_radio(&mut self.items, group, key);
                    emit_into(
                        &mut response.messages,
                        &self.callbacks.on_radio_change,
                        (group.clone(), item.key.clone()),
                    );
                }
            }
            Resolution::ToggleValue | Resolution::SelectAndClose => {
                let requested = self.value.requested(key, self.resolver.is_multiple());
                self.value.request(requested.clone());
                emit_into(&mut response.messages, &self.callbacks.on_value_change, requested);
            }
            Resolution::ToggleSubmenu | Resolution::Ignored => {}
        }

        if let Some(action) = item.action.clone() {
            emit_into(&mut response.messages, &self.callbacks.on_action, action);
        }

        if resolution.closes() {
            response.merge(self.request_open(false, true));
        } else if resolution == Resolution::ToggleSubmenu {
            self.toggle_submenu_inner(key);
        }
        response
    }

    /// Apply the owner's authoritative selected value (controlled mode).
    pub fn sync_value(&mut self, value: Vec<String>) {
        self.value.sync(value);
    }

    // =========================================================================
    // Submenus
    // =========================================================================

    fn is_submenu_key(&self, key: &str) -> bool {
        item::find(&self.items, key).is_some_and(Item::is_submenu)
    }

    /// Whether `key` is on screen: its top-level item passes the filter and
    /// every enclosing submenu is open.
    fn is_reachable(&self, key: &str) -> bool {
        let Some(chain) = item::ancestors(&self.items, key) else {
            return false;
        };
        let top = chain.first().map_or(key, String::as_str);
        self.visible_items().any(|item| item.key == top)
            && chain.iter().all(|ancestor| self.submenus.is_open(ancestor))
    }

    /// Pointer entered a submenu trigger or flyout: open it now and cancel
    /// pending closes on it and its enclosing submenus.
    pub fn hover_enter_submenu(&mut self, key: &str) -> Response<M> {
        if !self.is_open() {
            return Response::ignored();
        }
        if !self.is_submenu_key(key) {
            log::warn!("{}: hover on unknown submenu '{}'", self.name, key);
            return Response::ignored();
        }
        if !self.is_reachable(key) {
            log::debug!("{}: '{}' is inside a closed submenu, ignoring", self.name, key);
            return Response::ignored();
        }
        for ancestor in item::ancestors(&self.items, key).unwrap_or_default() {
            self.submenus.cancel_close(&ancestor);
        }
        self.submenus.open_now(key);
        Response::captured()
    }

    /// Pointer left a submenu trigger or flyout: schedule its close.
    pub fn hover_leave_submenu(&mut self, key: &str) -> Response<M> {
        self.hover_leave_submenu_at(key, Instant::now())
    }

    pub fn hover_leave_submenu_at(&mut self, key: &str, now: Instant) -> Response<M> {
        if !self.is_open() || !self.submenus.is_open(key) {
            return Response::ignored();
        }
        self.submenus.schedule_close(key, now);
        Response::captured()
    }

    /// Click-toggle a submenu.
    pub fn toggle_submenu(&mut self, key: &str) -> Response<M> {
        if !self.is_open() {
            return Response::ignored();
        }
        if !self.is_submenu_key(key) {
            log::warn!("{}: toggle of unknown submenu '{}'", self.name, key);
            return Response::ignored();
        }
        if !self.is_reachable(key) {
            return Response::ignored();
        }
        self.toggle_submenu_inner(key);
        Response::captured()
    }

    fn toggle_submenu_inner(&mut self, key: &str) {
        if !self.submenus.toggle(key) {
            self.after_submenu_closed(key);
        }
    }

    /// Close whatever was nested inside a submenu that just closed.
    fn after_submenu_closed(&mut self, key: &str) {
        self.watcher.remove_flyout(key);
        let nested: Vec<String> = self
            .submenus
            .open_keys()
            .filter(|open| {
                item::ancestors(&self.items, open)
                    .is_some_and(|chain| chain.iter().any(|a| a == key))
            })
            .map(str::to_string)
            .collect();
        for open in nested {
            self.submenus.close_now(&open);
            self.watcher.remove_flyout(&open);
        }
    }

    /// Fire every due submenu timer.
    pub fn poll_timers(&mut self, now: Instant) -> Response<M> {
        let closed = self.submenus.poll(now);
        for key in &closed {
            self.after_submenu_closed(key);
        }
        Response::ignored()
    }

    /// Fire one timer from the host's own timer queue. Stale tokens are ignored.
    pub fn fire_timer(&mut self, token: TimerToken) -> Response<M> {
        if let Some(key) = self.submenus.fire(token) {
            self.after_submenu_closed(&key);
        }
        Response::ignored()
    }

    // =========================================================================
    // Items and filtering
    // =========================================================================

    /// Replace the item tree. Focus resets and open submenus are closed.
    pub fn set_items(&mut self, items: Vec<Item>) -> Result<(), ItemError> {
        item::validate(&items)?;
        self.items = items;
        self.teardown();
        self.refresh_visible();
        Ok(())
    }

    /// Keep only top-level items whose label contains `query`, ignoring case.
    pub fn set_filter(&mut self, query: &str) {
        if self.filter == query {
            return;
        }
        self.filter = query.to_string();
        self.refresh_visible();
        self.focus.reset();
        self.close_hidden_submenus();
        log::trace!(
            "{}: filter '{}' matches {} item(s)",
            self.name,
            query,
            self.visible.len()
        );
    }

    /// Close open submenus whose top-level item the filter hid.
    fn close_hidden_submenus(&mut self) {
        let hidden: Vec<String> = self
            .submenus
            .open_keys()
            .filter(|key| !self.is_reachable(key))
            .map(str::to_string)
            .collect();
        for key in hidden {
            self.submenus.close_now(&key);
            self.watcher.remove_flyout(&key);
        }
    }

    fn refresh_visible(&mut self) {
        let needle = self.filter.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| needle.is_empty() || item.label.to_lowercase().contains(&needle))
            .map(|(idx, _)| idx)
            .collect();
    }

    // =========================================================================
    // Event routing
    // =========================================================================

    /// Route a host event through the trigger, the outside watcher and the
    /// hover scheduler.
    pub fn handle_event(&mut self, event: &Event) -> Response<M> {
        if let Event::PointerDown {
            button: MouseButton::Left,
            position,
        } = event
        {
            if self.watcher.classify(position.0, position.1) == PointerTarget::Trigger {
                return self.toggle();
            }
        }

        if !self.is_open() {
            return Response::ignored();
        }

        match event {
            Event::ItemClick { key } => return self.select_key(key),
            Event::SubmenuEnter { key } => return self.hover_enter_submenu(key),
            Event::SubmenuLeave { key } => return self.hover_leave_submenu(key),
            _ => {}
        }

        let has_focus = self.focused_item().is_some();
        match self.watcher.watch(event, has_focus) {
            WatchAction::Close { restore_focus } => {
                log::debug!("{}: dismissed by {:?}", self.name, event);
                self.request_open(false, restore_focus)
            }
            WatchAction::Advance => self.advance_focus(),
            WatchAction::Retreat => self.retreat_focus(),
            WatchAction::First => self.focus_first(),
            WatchAction::Last => self.focus_last(),
            WatchAction::Activate => self.select_focused(),
            WatchAction::Pass => Response::ignored(),
        }
    }
}
