//! The public component and its mounted event adapter.
//!
//! [`OtpInput`] holds validated options and consumer callbacks. Mounting it
//! on a host yields a [`MountedOtp`], which owns the value store, the
//! selection mirror, the per-instance metadata and the timer queue, and is
//! the only code that calls `setSelectionRange` on the native input.
//!
//! The host forwards every DOM event to [`MountedOtp::handle`] and wakes the
//! adapter at [`MountedOtp::next_deadline`] through [`MountedOtp::fire_due`].

use crate::badge::input_width;
use crate::event::{EventOutcome, KeyEvent, NativeEvent};
use crate::host::OtpHost;
use crate::keyboard::{KeyAction, plan_keydown};
use crate::metadata::InputMetadata;
use crate::registry::{SharedRegistry, global_registry};
use crate::schedule::{Task, TimerId, TimerQueue};
use crate::style::{container_style, input_attributes, input_style};
use otp_core::{
    CommitOutcome, CompletionNotifier, ConfigError, Instant, MountId, NativeInputExt, OtpConfig,
    OtpOptions, PasswordManagerStrategy, PasteOutcome, PasteRequest, RawSelection, RenderState,
    SelectionDirection, ValueStore, char_len, normalize_with, splice_chars, splice_paste,
    truncate_chars,
};

/// Upper bound on tasks run by one [`MountedOtp::fire_due`] call.
const MAX_TASKS_PER_TICK: usize = 256;

type ValueCallback = Box<dyn FnMut(&str)>;
type RenderCallback = Box<dyn FnMut(&RenderState)>;

#[derive(Default)]
struct Callbacks {
    on_change: Option<ValueCallback>,
    on_complete: Option<ValueCallback>,
    on_render: Option<RenderCallback>,
}

/// An unmounted one-time-password input.
pub struct OtpInput {
    options: OtpOptions,
    callbacks: Callbacks,
}

impl OtpInput {
    /// Validate `config`.
    pub fn create(config: OtpConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            options: config.build()?,
            callbacks: Callbacks::default(),
        })
    }

    /// Called with every accepted value, before it is stored.
    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.callbacks.on_change = Some(Box::new(f));
        self
    }

    /// Called once each time the value fills every slot.
    pub fn on_complete(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.callbacks.on_complete = Some(Box::new(f));
        self
    }

    /// Called with fresh slot state whenever it may have changed.
    pub fn on_render(mut self, f: impl FnMut(&RenderState) + 'static) -> Self {
        self.callbacks.on_render = Some(Box::new(f));
        self
    }

    pub fn options(&self) -> &OtpOptions {
        &self.options
    }

    /// Mount on `host`, registering with this thread's global registry.
    pub fn mount<H: OtpHost>(self, host: H, now: Instant) -> MountedOtp<H> {
        self.mount_in(host, global_registry(), now)
    }

    /// Mount on `host`, registering with `registry`.
    pub fn mount_in<H: OtpHost>(
        self,
        mut host: H,
        registry: SharedRegistry,
        now: Instant,
    ) -> MountedOtp<H> {
        let id = registry.borrow_mut().register(&mut host);
        let is_ios = host.supports_touch_callout();

        let max_length = self.options.max_length;
        let store = match &self.options.controlled_value {
            Some(value) => ValueStore::controlled(value, max_length),
            None => ValueStore::uncontrolled(&self.options.default_value, max_length),
        };
        let completion = CompletionNotifier::new(store.value());

        let mut mounted = MountedOtp {
            id,
            host,
            options: self.options,
            store,
            completion,
            meta: InputMetadata::new(is_ios),
            timers: TimerQueue::new(),
            poll: None,
            registry,
            callbacks: self.callbacks,
            dirty: true,
            unmounted: false,
        };
        mounted.setup(now);
        mounted
    }
}

/// A mounted input: the event adapter bound to one host.
///
/// Dropping it unmounts: timers are cancelled and the mount is released from
/// its registry.
pub struct MountedOtp<H: OtpHost> {
    id: MountId,
    host: H,
    options: OtpOptions,
    store: ValueStore,
    completion: CompletionNotifier,
    meta: InputMetadata,
    timers: TimerQueue,
    poll: Option<TimerId>,
    registry: SharedRegistry,
    callbacks: Callbacks,
    dirty: bool,
    unmounted: bool,
}

impl<H: OtpHost> MountedOtp<H> {
    // =========================================================================
    // Read-only state
    // =========================================================================

    pub fn id(&self) -> MountId {
        self.id
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn options(&self) -> &OtpOptions {
        &self.options
    }

    /// The committed value.
    pub fn value(&self) -> &str {
        self.store.value()
    }

    /// The selection mirror shown to the render layer.
    pub fn mirror(&self) -> RawSelection {
        self.meta.mirror
    }

    pub fn is_focused(&self) -> bool {
        self.meta.focused
    }

    /// Hover is never reported for a disabled input.
    pub fn is_hovering(&self) -> bool {
        self.meta.hovering && !self.options.disabled
    }

    pub fn is_ios(&self) -> bool {
        self.meta.is_ios
    }

    pub fn will_push_badge(&self) -> bool {
        self.meta
            .badge
            .will_push(self.options.password_manager_strategy)
    }

    /// Earliest pending timer, for the host to arm a native timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn render_state(&self) -> RenderState {
        RenderState {
            will_push_badge: self.will_push_badge(),
            ..RenderState::derive(
                self.store.value(),
                self.meta.mirror,
                self.options.max_length,
                self.meta.focused,
                self.is_hovering(),
            )
        }
    }

    /// Derive the render state and hand it to the render callback.
    pub fn render(&mut self) -> RenderState {
        let state = self.render_state();
        if let Some(on_render) = self.callbacks.on_render.as_mut() {
            on_render(&state);
        }
        state
    }

    // =========================================================================
    // Driving
    // =========================================================================

    /// Process one native event.
    pub fn handle(&mut self, event: NativeEvent, now: Instant) -> EventOutcome {
        log::debug!(target: "otp.events", "{} {}", self.id, event.name());
        let outcome = match event {
            NativeEvent::SelectionChange => {
                self.sync_selection();
                EventOutcome::PASS
            }
            NativeEvent::Input | NativeEvent::Change => self.on_input(now),
            NativeEvent::KeyDown(key) => self.on_keydown(&key, now),
            NativeEvent::KeyUp(key) => {
                if key.key.is_modifier() {
                    self.schedule_settle(now);
                }
                EventOutcome::PASS
            }
            NativeEvent::Focus => {
                self.on_focus(now);
                EventOutcome::PASS
            }
            NativeEvent::Blur => {
                self.on_blur();
                EventOutcome::PASS
            }
            NativeEvent::Paste(clipboard) => self.on_paste(clipboard.as_deref(), now),
            NativeEvent::Click => {
                self.meta.last_click = Some(now);
                EventOutcome::PASS
            }
            NativeEvent::DblClick => {
                self.on_dblclick(now);
                EventOutcome::PASS
            }
            NativeEvent::TouchEnd | NativeEvent::TouchMove => {
                if self.host.is_active_element() {
                    let delay = self.options.timings.touch_resync;
                    self.timers.debounce(now, delay, Task::TouchResync);
                }
                EventOutcome::PASS
            }
            NativeEvent::MouseOver => {
                self.set_hovering(true);
                EventOutcome::PASS
            }
            NativeEvent::MouseLeave => {
                self.set_hovering(false);
                EventOutcome::PASS
            }
            NativeEvent::Resize => {
                self.update_root_height();
                EventOutcome::PASS
            }
            NativeEvent::BadgeAreaIntersection(ratio) => {
                if self.meta.badge.record_intersection(ratio) {
                    self.apply_badge_width();
                }
                EventOutcome::PASS
            }
        };
        self.flush();
        outcome
    }

    /// Run every task due at `now`. Returns how many ran.
    pub fn fire_due(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some(task) = self.timers.pop_due(now) {
            self.run_task(task, now);
            fired += 1;
            if fired >= MAX_TASKS_PER_TICK {
                log::warn!(target: "otp.events", "{} timer queue did not drain", self.id);
                break;
            }
        }
        self.flush();
        fired
    }

    // =========================================================================
    // Imperative API
    // =========================================================================

    /// Owner-side value update: the echo of a controlled value, or a reset.
    pub fn set_value(&mut self, value: &str, now: Instant) {
        let changed = self.store.set_controlled(value).is_some();
        if self.host.value() != self.store.value() {
            self.host.set_value(self.store.value());
            if self.host.is_active_element() {
                self.sync_selection();
            }
        }
        if changed {
            self.after_value_change(now, true);
        }
        self.flush();
    }

    /// Select every character. Refused while navigation is disabled.
    pub fn select_all(&mut self) -> bool {
        if !self.options.allow_navigation {
            return false;
        }
        let len = self.host.value_len();
        self.host
            .set_selection_range(0, len, SelectionDirection::None);
        // `select()` fires no focus event, so the mirror is updated here.
        let selection = RawSelection::new(0, len, SelectionDirection::None);
        self.meta.prev = selection;
        self.set_mirror(selection);
        self.flush();
        true
    }

    /// Rebind options without re-registering anything.
    ///
    /// A controlled value in `config` is applied like [`Self::set_value`].
    pub fn update_options(&mut self, config: OtpConfig, now: Instant) -> Result<(), ConfigError> {
        let options = config.build()?;
        let max_length = options.max_length;
        let controlled_value = options.controlled_value.clone();
        self.options = options;

        if self.store.set_max_length(max_length) {
            self.host.set_value(self.store.value());
            self.after_value_change(now, true);
        }
        if self.options.password_manager_strategy == PasswordManagerStrategy::None {
            self.timers.cancel_task(Task::BadgeProbe);
        }
        self.apply_static_style();
        self.dirty = true;

        match controlled_value {
            Some(value) => self.set_value(&value, now),
            None => self.flush(),
        }
        Ok(())
    }

    pub fn set_on_change(&mut self, f: impl FnMut(&str) + 'static) {
        self.callbacks.on_change = Some(Box::new(f));
    }

    pub fn set_on_complete(&mut self, f: impl FnMut(&str) + 'static) {
        self.callbacks.on_complete = Some(Box::new(f));
    }

    pub fn set_on_render(&mut self, f: impl FnMut(&RenderState) + 'static) {
        self.callbacks.on_render = Some(Box::new(f));
    }

    /// Tear down: cancel timers and release the registry slot.
    pub fn unmount(self) {
        drop(self);
    }

    // =========================================================================
    // Mount and teardown
    // =========================================================================

    fn setup(&mut self, now: Instant) {
        self.apply_static_style();
        if self.host.value() != self.store.value() {
            self.host.set_value(self.store.value());
        }
        self.update_root_height();
        self.sync_selection();

        let timings = &self.options.timings;
        self.timers
            .schedule(now, timings.initial_sync, Task::InitialSync);
        self.timers
            .debounce(now, timings.autofill_refresh, Task::AutofillRefresh);

        if self.options.password_manager_strategy == PasswordManagerStrategy::IncreaseWidth
            && let Err(err) = self.host.observe_badge_area()
        {
            log::debug!(target: "otp.badge", "{} badge area not observable: {err}", self.id);
        }
        self.flush();
    }

    fn teardown(&mut self) {
        if std::mem::replace(&mut self.unmounted, true) {
            return;
        }
        self.timers.clear();
        self.poll = None;
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => registry.unregister(self.id, &mut self.host),
            Err(_) => {
                log::error!(target: "otp.registry", "{} registry busy during unmount", self.id);
            }
        }
    }

    fn apply_static_style(&mut self) {
        for (name, value) in input_attributes(&self.options) {
            self.host.set_input_attribute(name, value.as_deref());
        }
        for (name, value) in input_style(&self.options, self.will_push_badge()) {
            self.host.set_input_style_property(name, &value);
        }
        for (name, value) in container_style(&self.options) {
            self.host.set_container_style_property(name, value);
        }
        self.host
            .set_container_attribute("data-input-otp-container", Some(""));
    }

    // =========================================================================
    // Selection sync
    // =========================================================================

    /// Read the native selection, normalize it, write back any correction and
    /// publish the result to the mirror.
    fn sync_selection(&mut self) {
        if !self.host.is_active_element() {
            self.set_mirror(RawSelection::NONE);
            return;
        }
        let raw = self.host.selection();
        let value_len = self.host.value_len();
        let out = normalize_with(
            raw,
            self.meta.prev,
            value_len,
            self.options.max_length,
            self.options.normalize,
        );
        if out.corrected {
            self.host.restore_selection(out.selection);
        }
        self.meta.prev = out.selection;
        self.set_mirror(out.selection);
    }

    fn set_mirror(&mut self, selection: RawSelection) {
        if self.meta.mirror != selection {
            self.meta.mirror = selection;
            self.dirty = true;
        }
    }

    fn set_hovering(&mut self, hovering: bool) {
        if self.meta.hovering != hovering {
            self.meta.hovering = hovering;
            self.dirty = true;
        }
    }

    fn schedule_settle(&mut self, now: Instant) {
        self.timers
            .settle(now, &self.options.timings.settle_delays);
    }

    fn start_poll(&mut self, now: Instant) {
        if self.poll.is_none() {
            let period = self.options.timings.focus_poll_interval;
            self.poll = Some(self.timers.schedule_repeating(now, period, Task::FocusPoll));
        }
    }

    fn stop_poll(&mut self) {
        if let Some(id) = self.poll.take() {
            self.timers.cancel(id);
        }
    }

    // =========================================================================
    // Value
    // =========================================================================

    fn commit(&mut self, candidate: &str) -> CommitOutcome {
        let Self {
            store,
            options,
            callbacks,
            ..
        } = self;
        let on_change = &mut callbacks.on_change;
        store.commit(
            candidate,
            &options.pattern,
            options.allow_spaces,
            &mut |value: &str| {
                if let Some(f) = on_change.as_mut() {
                    f(value);
                }
            },
        )
    }

    /// Bookkeeping after the stored value changed.
    fn after_value_change(&mut self, now: Instant, refresh_autofill: bool) {
        self.dirty = true;
        if let Some(done) = self
            .completion
            .observe(self.store.value(), self.options.max_length)
        {
            log::debug!(target: "otp.value", "{} complete", self.id);
            if let Some(on_complete) = self.callbacks.on_complete.as_mut() {
                on_complete(&done);
            }
        }
        if refresh_autofill {
            let delay = self.options.timings.autofill_refresh;
            self.timers.debounce(now, delay, Task::AutofillRefresh);
        }
    }

    // =========================================================================
    // Event handlers
    // =========================================================================

    fn on_input(&mut self, now: Instant) -> EventOutcome {
        let synthetic = std::mem::take(&mut self.meta.synthetic_input_pending);
        let native = self.host.value();
        let previous_len = self.store.len();

        match self.commit(&native) {
            CommitOutcome::Rejected => {
                self.host.set_value(self.store.value());
                self.host.restore_selection(self.meta.prev);
                return EventOutcome::PREVENT;
            }
            CommitOutcome::Committed { .. } => self.after_value_change(now, !synthetic),
            CommitOutcome::Proposed { .. } | CommitOutcome::Unchanged => {}
        }

        let max_length = self.options.max_length;
        let truncated = truncate_chars(&native, max_length);
        if truncated.len() != native.len() {
            self.host.set_value(truncated);
        }
        // Deletions do not reliably fire `selectionchange`.
        if char_len(truncated) < previous_len {
            self.sync_selection();
        }
        self.schedule_settle(now);
        EventOutcome::PASS
    }

    fn on_keydown(&mut self, event: &KeyEvent, now: Instant) -> EventOutcome {
        let Some((start, end)) = self.host.selection().bounds() else {
            return EventOutcome::PASS;
        };
        debug_assert!(start <= end, "native selection [{start}, {end}) is inverted");
        let value_len = self.host.value_len();
        let Some(action) = plan_keydown(
            event,
            start,
            end,
            value_len,
            self.options.allow_navigation,
        ) else {
            log::error!(
                target: "otp.selection",
                "{} cannot classify native selection [{start}, {end})",
                self.id
            );
            return EventOutcome::PASS;
        };

        match action {
            KeyAction::PassThrough => {}
            KeyAction::Select { start, end } => {
                self.host
                    .set_selection_range(start, end, SelectionDirection::None);
                self.sync_selection();
            }
            KeyAction::Restore => {
                self.host.restore_selection(self.meta.mirror);
            }
            KeyAction::Delete { start, end } => self.delete_range(start, end, now),
        }
        EventOutcome {
            prevent_default: action.prevents_default(),
        }
    }

    fn delete_range(&mut self, start: usize, end: usize, now: Instant) {
        let native = self.host.value();
        let next = splice_chars(&native, start, end, "");
        match self.commit(&next) {
            CommitOutcome::Rejected => return,
            CommitOutcome::Committed { .. } => self.after_value_change(now, true),
            CommitOutcome::Proposed { .. } | CommitOutcome::Unchanged => {}
        }
        if next != native {
            self.host.set_value(&next);
        }
        self.host
            .set_selection_range(start, start, SelectionDirection::None);
        self.sync_selection();
        self.schedule_settle(now);
    }

    fn on_focus(&mut self, now: Instant) {
        let len = self.host.value_len();
        let start = len.min(self.options.max_length.saturating_sub(1));
        self.host
            .set_selection_range(start, len, SelectionDirection::None);
        self.meta.focused = true;
        self.dirty = true;
        self.set_mirror(RawSelection::new(start, len, SelectionDirection::None));

        self.start_poll(now);
        let timings = &self.options.timings;
        self.timers
            .debounce(now, timings.focus_settle, Task::FocusSettle);

        if self.options.password_manager_strategy == PasswordManagerStrategy::IncreaseWidth
            && !self.meta.badge.found()
        {
            self.timers.cancel_task(Task::BadgeProbe);
            for delay in &timings.badge_probe_delays {
                self.timers.schedule(now, *delay, Task::BadgeProbe);
            }
        }
    }

    fn on_blur(&mut self) {
        self.meta.clear_focus();
        self.dirty = true;
        self.stop_poll();
        self.timers.cancel_task(Task::FocusSettle);
        self.timers.cancel_task(Task::TouchResync);
    }

    fn on_dblclick(&mut self, now: Instant) {
        if !self.options.allow_navigation || !self.host.is_active_element() {
            return;
        }
        if !self
            .meta
            .clicked_within(now, self.options.timings.double_click_window)
        {
            return;
        }
        let len = self.host.value_len();
        self.host
            .set_selection_range(0, len, SelectionDirection::None);
        self.sync_selection();
        self.schedule_settle(now);
    }

    fn on_paste(&mut self, clipboard: Option<&str>, now: Instant) -> EventOutcome {
        let Some(clipboard) = clipboard else {
            log::debug!(target: "otp.paste", "{} no clipboard data", self.id);
            return EventOutcome::PASS;
        };
        let Some(range) = self.host.selection().range() else {
            return EventOutcome::PASS;
        };

        let native = self.host.value();
        let outcome = splice_paste(PasteRequest {
            value: &native,
            selection: range,
            clipboard,
            max_length: self.options.max_length,
            pattern: &self.options.pattern,
            allow_spaces: self.options.allow_spaces,
            transformer: self.options.paste_transformer.as_ref(),
        });
        let PasteOutcome::Applied { value, selection } = outcome else {
            return EventOutcome::PREVENT;
        };

        let committed = match self.commit(&value) {
            CommitOutcome::Rejected => return EventOutcome::PREVENT,
            CommitOutcome::Committed { .. } => true,
            CommitOutcome::Proposed { .. } | CommitOutcome::Unchanged => false,
        };
        if value != native {
            self.host.set_value(&value);
        }
        self.host.restore_selection(selection);
        self.meta.prev = selection;
        self.set_mirror(selection);
        if committed {
            self.after_value_change(now, true);
        }
        self.schedule_settle(now);
        log::debug!(target: "otp.paste", "{} pasted into [{}, {})", self.id, range.start, range.end);
        EventOutcome::PREVENT
    }

    // =========================================================================
    // Timers
    // =========================================================================

    fn run_task(&mut self, task: Task, now: Instant) {
        match task {
            Task::Settle | Task::TouchResync => self.sync_selection(),
            Task::FocusPoll => {
                if self.host.is_active_element() {
                    self.sync_selection();
                } else {
                    // Focus left without a blur event reaching us.
                    self.stop_poll();
                    if self.meta.focused {
                        self.on_blur();
                    }
                }
            }
            Task::FocusSettle => {
                let raw = self.host.selection();
                if self.meta.focused && !raw.is_none() {
                    self.meta.prev = raw;
                    self.set_mirror(raw);
                }
            }
            Task::InitialSync => {
                let focused = self.host.is_active_element();
                if focused != self.meta.focused {
                    self.meta.focused = focused;
                    self.dirty = true;
                }
                self.sync_selection();
                if focused {
                    self.start_poll(now);
                }
            }
            Task::AutofillRefresh => {
                self.meta.synthetic_input_pending = true;
                self.host.dispatch_input_event();
            }
            Task::BadgeProbe => self.probe_badge(),
        }
    }

    fn probe_badge(&mut self) {
        if self.options.password_manager_strategy == PasswordManagerStrategy::None
            || self.meta.badge.found()
        {
            return;
        }
        let probe = match self.host.probe_badge() {
            Ok(probe) => probe,
            Err(err) => {
                log::debug!(target: "otp.badge", "{} probe failed: {err}", self.id);
                return;
            }
        };
        if !self.meta.badge.record_probe(probe) {
            return;
        }
        log::debug!(target: "otp.badge", "{} badge detected: {probe:?}", self.id);
        self.timers.cancel_task(Task::BadgeProbe);

        // Some managers only reposition their badge on focus.
        if self.host.is_active_element() && self.meta.badge.take_refocus() {
            let selection = self.host.selection();
            self.host.blur();
            self.host.focus();
            self.host.restore_selection(selection);
        }
        self.apply_badge_width();
    }

    // =========================================================================
    // Output
    // =========================================================================

    fn apply_badge_width(&mut self) {
        let width = input_width(self.will_push_badge());
        self.host.set_input_style_property("width", &width);
        self.dirty = true;
    }

    fn update_root_height(&mut self) {
        let height = self.host.client_height();
        if self.meta.root_height != Some(height) {
            self.meta.root_height = Some(height);
            self.host
                .set_container_style_property("--root-height", &format!("{height}px"));
        }
    }

    fn publish_container_attributes(&mut self) {
        let sel = self.meta.mirror.to_attribute();
        let focused = self.meta.focused;
        let hovering = self.is_hovering();
        self.host.set_container_attribute("data-sel", Some(&sel));
        self.host
            .set_container_attribute("data-is-focused", focused.then_some("true"));
        self.host
            .set_container_attribute("data-is-hovering", hovering.then_some("true"));
    }

    fn flush(&mut self) {
        if !std::mem::take(&mut self.dirty) {
            return;
        }
        self.publish_container_attributes();
        self.render();
    }
}

impl<H: OtpHost> Drop for MountedOtp<H> {
    fn drop(&mut self) {
        self.teardown();
        log::debug!(target: "otp.events", "{} dropped", self.id);
    }
}
