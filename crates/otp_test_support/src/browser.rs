//! A scripted browser around one mounted input.
//!
//! [`Browser`] plays the user and the browser engine: it delivers native
//! events, performs the default action of every event the adapter did not
//! cancel, and drives the adapter's timers from a [`ManualClock`]. Time only
//! moves through [`Browser::advance`].

use crate::chord::parse_chord;
use crate::clock::ManualClock;
use crate::dom::{FakeDom, FakeHost, typed_value};
use otp_core::{
    Clock, ConfigError, OtpConfig, RawSelection, RenderState, SelectionDirection, slice_chars,
    splice_chars,
};
use otp_events::{
    EventOutcome, Key, KeyEvent, MountRegistry, MountedOtp, NativeEvent, OtpInput, SharedRegistry,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const MAX_QUEUED_EVENTS: usize = 1_000;
const MAX_TIMER_STEPS: usize = 10_000;

/// Everything the consumer callbacks observed.
#[derive(Debug, Default)]
pub struct CallbackLog {
    pub changes: Vec<String>,
    pub completions: Vec<String>,
    pub renders: usize,
    pub last_render: Option<RenderState>,
    /// Last proposal not yet echoed back by a controlled owner.
    pending_echo: Option<String>,
}

pub struct Browser {
    otp: MountedOtp<FakeHost>,
    dom: Rc<RefCell<FakeDom>>,
    clock: ManualClock,
    registry: SharedRegistry,
    log: Rc<RefCell<CallbackLog>>,
    /// Act as a controlled owner that echoes every proposal.
    echo: bool,
}

impl Browser {
    /// Mount `config` on a fresh document with its own registry.
    ///
    /// # Panics
    ///
    /// If `config` is invalid.
    pub fn mount(config: OtpConfig) -> Self {
        Self::mount_with(config, MountRegistry::new_shared(), FakeDom::shared())
    }

    /// Like [`Browser::mount`], with an owner that echoes every proposed
    /// value back through `set_value`.
    pub fn mount_controlled(config: OtpConfig) -> Self {
        let mut browser = Self::mount(config);
        browser.echo = true;
        browser
    }

    pub fn mount_with(
        config: OtpConfig,
        registry: SharedRegistry,
        dom: Rc<RefCell<FakeDom>>,
    ) -> Self {
        let log = Rc::new(RefCell::new(CallbackLog::default()));
        let input = OtpInput::create(config)
            .unwrap_or_else(|err| panic!("invalid test config: {err}"))
            .on_change({
                let log = Rc::clone(&log);
                move |value| {
                    let mut log = log.borrow_mut();
                    log.changes.push(value.to_string());
                    log.pending_echo = Some(value.to_string());
                }
            })
            .on_complete({
                let log = Rc::clone(&log);
                move |value| log.borrow_mut().completions.push(value.to_string())
            })
            .on_render({
                let log = Rc::clone(&log);
                move |state| {
                    let mut log = log.borrow_mut();
                    log.renders += 1;
                    log.last_render = Some(state.clone());
                }
            });

        let clock = ManualClock::new();
        let host = FakeHost::new(Rc::clone(&dom));
        let otp = input.mount_in(host, Rc::clone(&registry), clock.now());
        let mut browser = Self {
            otp,
            dom,
            clock,
            registry,
            log,
            echo: false,
        };
        browser.run_until_idle();
        browser
    }

    /// Unmount and hand back the document.
    pub fn unmount(self) -> Rc<RefCell<FakeDom>> {
        let dom = Rc::clone(&self.dom);
        self.otp.unmount();
        dom
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn otp(&self) -> &MountedOtp<FakeHost> {
        &self.otp
    }

    pub fn otp_mut(&mut self) -> &mut MountedOtp<FakeHost> {
        &mut self.otp
    }

    pub fn dom(&self) -> Rc<RefCell<FakeDom>> {
        Rc::clone(&self.dom)
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn registry(&self) -> SharedRegistry {
        Rc::clone(&self.registry)
    }

    /// The committed value.
    pub fn value(&self) -> String {
        self.otp.value().to_string()
    }

    /// What the native element currently holds.
    pub fn native_value(&self) -> String {
        self.dom.borrow().value.clone()
    }

    pub fn selection(&self) -> RawSelection {
        self.dom.borrow().selection()
    }

    /// `value.substring(selectionStart, selectionEnd)` of the native element.
    pub fn selected_text(&self) -> String {
        let dom = self.dom.borrow();
        slice_chars(&dom.value, dom.selection_start, dom.selection_end).to_string()
    }

    pub fn render_state(&self) -> RenderState {
        self.otp.render_state()
    }

    pub fn active_slots(&self) -> Vec<usize> {
        self.otp.render_state().active_slots()
    }

    pub fn changes(&self) -> Vec<String> {
        self.log.borrow().changes.clone()
    }

    pub fn completions(&self) -> Vec<String> {
        self.log.borrow().completions.clone()
    }

    pub fn render_count(&self) -> usize {
        self.log.borrow().renders
    }

    pub fn last_render(&self) -> Option<RenderState> {
        self.log.borrow().last_render.clone()
    }

    pub fn container_attribute(&self, name: &str) -> Option<String> {
        self.dom.borrow().container_attributes.get(name).cloned()
    }

    pub fn container_style(&self, name: &str) -> Option<String> {
        self.dom.borrow().container_style.get(name).cloned()
    }

    pub fn input_attribute(&self, name: &str) -> Option<String> {
        self.dom.borrow().input_attributes.get(name).cloned()
    }

    pub fn input_style(&self, name: &str) -> Option<String> {
        self.dom.borrow().input_style.get(name).cloned()
    }

    // =========================================================================
    // User actions
    // =========================================================================

    pub fn focus(&mut self) {
        if self.dom.borrow().active {
            return;
        }
        self.dom.borrow_mut().active = true;
        self.dispatch(NativeEvent::Focus);
        self.run_until_idle();
    }

    pub fn blur(&mut self) {
        if !self.dom.borrow().active {
            return;
        }
        self.dom.borrow_mut().active = false;
        self.dispatch(NativeEvent::Blur);
        self.run_until_idle();
    }

    /// Focus away without the adapter hearing a `blur` event.
    pub fn steal_focus_silently(&mut self) {
        self.dom.borrow_mut().active = false;
    }

    /// Type `text` one key at a time, focusing first.
    pub fn type_text(&mut self, text: &str) {
        self.focus();
        for ch in text.chars() {
            self.press_key(KeyEvent::plain(Key::Character(ch)));
        }
    }

    /// Press a chord such as `"Shift+ArrowLeft"`, focusing first.
    pub fn press(&mut self, chord: &str) -> EventOutcome {
        self.focus();
        self.press_key(parse_chord(chord))
    }

    pub fn press_key(&mut self, key: KeyEvent) -> EventOutcome {
        let outcome = self.dispatch(NativeEvent::KeyDown(key.clone()));
        self.drain();
        if !outcome.prevent_default {
            self.default_key_action(&key);
            self.drain();
        }

        let mods = key.modifiers;
        self.dispatch(NativeEvent::KeyUp(key));
        let released = [
            (mods.meta, Key::Meta),
            (mods.ctrl, Key::Control),
            (mods.alt, Key::Alt),
            (mods.shift, Key::Shift),
        ];
        for (held, modifier) in released {
            if held {
                self.dispatch(NativeEvent::KeyUp(KeyEvent::plain(modifier)));
            }
        }
        self.run_until_idle();
        outcome
    }

    /// Paste `clipboard`; `None` models a paste event without clipboard data.
    pub fn paste(&mut self, clipboard: Option<&str>) -> EventOutcome {
        self.focus();
        let outcome = self.dispatch(NativeEvent::Paste(clipboard.map(str::to_string)));
        self.drain();
        if !outcome.prevent_default
            && let Some(text) = clipboard
        {
            self.insert_text(text);
        }
        self.run_until_idle();
        outcome
    }

    /// Put the native caret or selection somewhere, as a pointer would.
    pub fn select_native(&mut self, start: usize, end: usize) {
        self.focus();
        self.dom
            .borrow_mut()
            .select(start, end, SelectionDirection::None);
        self.run_until_idle();
    }

    pub fn click(&mut self) {
        self.focus();
        self.dispatch(NativeEvent::Click);
        self.run_until_idle();
    }

    pub fn dblclick(&mut self) {
        self.click();
        self.click();
        self.dispatch(NativeEvent::DblClick);
        self.run_until_idle();
    }

    pub fn touch_end(&mut self) {
        self.dispatch(NativeEvent::TouchEnd);
        self.run_until_idle();
    }

    pub fn hover(&mut self) {
        self.dispatch(NativeEvent::MouseOver);
        self.run_until_idle();
    }

    pub fn leave(&mut self) {
        self.dispatch(NativeEvent::MouseLeave);
        self.run_until_idle();
    }

    pub fn resize(&mut self, client_height: f64) {
        self.dom.borrow_mut().client_height = client_height;
        self.dispatch(NativeEvent::Resize);
        self.run_until_idle();
    }

    pub fn badge_area_visible(&mut self, ratio: f64) {
        self.dispatch(NativeEvent::BadgeAreaIntersection(ratio));
        self.run_until_idle();
    }

    /// Owner-side value update.
    pub fn set_value(&mut self, value: &str) {
        self.otp.set_value(value, self.clock.now());
        self.run_until_idle();
    }

    pub fn select_all(&mut self) -> bool {
        let selected = self.otp.select_all();
        self.run_until_idle();
        selected
    }

    pub fn update_options(&mut self, config: OtpConfig) -> Result<(), ConfigError> {
        let result = self.otp.update_options(config, self.clock.now());
        self.run_until_idle();
        result
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Let `ms` milliseconds pass, firing every timer on its deadline.
    pub fn advance(&mut self, ms: u64) {
        let target = self.clock.now() + Duration::from_millis(ms);
        for _ in 0..MAX_TIMER_STEPS {
            self.run_until_idle();
            match self.otp.next_deadline() {
                Some(deadline) if deadline <= target => self.clock.advance_to(deadline),
                _ => {
                    self.clock.advance_to(target);
                    self.run_until_idle();
                    return;
                }
            }
        }
        panic!("timers kept firing while advancing {ms}ms");
    }

    /// Deliver queued events and run timers due now until nothing is left.
    pub fn run_until_idle(&mut self) {
        for _ in 0..MAX_TIMER_STEPS {
            self.drain();
            let fired = self.otp.fire_due(self.clock.now());
            self.echo();
            if fired == 0 && self.dom.borrow().pending.is_empty() {
                return;
            }
        }
        panic!("adapter never went idle");
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    fn dispatch(&mut self, event: NativeEvent) -> EventOutcome {
        let outcome = self.otp.handle(event, self.clock.now());
        self.echo();
        outcome
    }

    fn echo(&mut self) {
        let pending = self.log.borrow_mut().pending_echo.take();
        if self.echo
            && let Some(value) = pending
        {
            self.otp.set_value(&value, self.clock.now());
        }
    }

    fn drain(&mut self) {
        for _ in 0..MAX_QUEUED_EVENTS {
            let next = self.dom.borrow_mut().pop_event();
            let Some(event) = next else {
                return;
            };
            self.dispatch(event);
        }
        panic!("native event queue did not drain");
    }

    fn insert_text(&mut self, text: &str) {
        let mut dom = self.dom.borrow_mut();
        if !dom.active {
            return;
        }
        let Some((value, caret)) = typed_value(&dom, text) else {
            return;
        };
        dom.value = value;
        dom.pending.push_back(NativeEvent::Input);
        dom.select(caret, caret, SelectionDirection::None);
    }

    fn delete_text(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let mut dom = self.dom.borrow_mut();
        let value = splice_chars(&dom.value, start, end, "");
        dom.value = value;
        dom.pending.push_back(NativeEvent::Input);
        dom.select(start, start, SelectionDirection::None);
    }

    /// What the browser does with an uncancelled keydown.
    fn default_key_action(&mut self, key: &KeyEvent) {
        let mods = key.modifiers;
        let (start, end, direction, len, active) = {
            let dom = self.dom.borrow();
            (
                dom.selection_start,
                dom.selection_end,
                dom.direction,
                dom.value_len(),
                dom.active,
            )
        };
        if !active {
            return;
        }
        let to_edge = mods.command() || mods.alt;

        match &key.key {
            Key::Character('a' | 'A') if mods.command() => {
                self.dom
                    .borrow_mut()
                    .select(0, len, SelectionDirection::None);
            }
            Key::Character(ch) if !mods.command() => self.insert_text(&ch.to_string()),
            Key::Backspace => {
                if start != end {
                    self.delete_text(start, end);
                } else if to_edge {
                    self.delete_text(0, start);
                } else {
                    self.delete_text(start.saturating_sub(1), start);
                }
            }
            Key::Delete => {
                if start != end {
                    self.delete_text(start, end);
                } else if to_edge {
                    self.delete_text(start, len);
                } else {
                    self.delete_text(start, (start + 1).min(len));
                }
            }
            nav if nav.is_navigation() => {
                let backward = matches!(nav, Key::ArrowLeft | Key::ArrowUp | Key::Home);
                let jump = to_edge || !matches!(nav, Key::ArrowLeft | Key::ArrowRight);
                if mods.shift {
                    // Extend from the anchor, the end opposite the focus.
                    let (anchor, focus) = if direction == SelectionDirection::Backward {
                        (end, start)
                    } else {
                        (start, end)
                    };
                    let focus = match (backward, jump) {
                        (true, true) => 0,
                        (true, false) => focus.saturating_sub(1),
                        (false, true) => len,
                        (false, false) => (focus + 1).min(len),
                    };
                    let (lo, hi, dir) = if focus < anchor {
                        (focus, anchor, SelectionDirection::Backward)
                    } else if focus > anchor {
                        (anchor, focus, SelectionDirection::Forward)
                    } else {
                        (focus, focus, SelectionDirection::None)
                    };
                    self.dom.borrow_mut().select(lo, hi, dir);
                } else {
                    let caret = match (backward, jump) {
                        (true, true) => 0,
                        (false, true) => len,
                        (true, false) if start != end => start,
                        (true, false) => start.saturating_sub(1),
                        (false, false) if start != end => end,
                        (false, false) => (end + 1).min(len),
                    };
                    self.dom
                        .borrow_mut()
                        .select(caret, caret, SelectionDirection::None);
                }
            }
            _ => {}
        }
    }
}
