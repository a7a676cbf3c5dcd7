//! The DOM host and the exported [`OtpWeb`] handle.
//!
//! Every listener, observer and timer holds a `Weak` reference to the shared
//! state and borrows the mounted adapter with `try_borrow_mut`. Events the
//! browser fires synchronously from inside a host call (a `focus` caused by
//! the adapter's own refocus, say) find the adapter busy and are dropped;
//! the adapter already accounts for the work it triggered itself.

use crate::options::WebOptions;
use crate::translate::{
    INPUT_EVENTS, SELECTION_CHANGE, char_to_utf16, key_event, simple_event, utf16_to_char,
};
use js_sys::{Array, Function, Object, Reflect};
use otp_core::{HostError, Instant, NativeInput, RawSelection, RenderState, SelectionDirection};
use otp_events::{
    BADGE_MARKER_SELECTORS, BADGE_PROBE_INSET_PX, BADGE_SPACE_RATIO, BADGE_SPACE_WIDTH_PX,
    BadgeProbe, DocumentHost, ElementHost, MountedOtp, NativeEvent, OtpInput,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    ClipboardEvent, CssStyleSheet, Document, Element, Event, EventInit, EventTarget, HtmlElement,
    HtmlInputElement, HtmlStyleElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Node, ResizeObserver, Window,
};

const LOG_TARGET: &str = "otp.web";

/// Install the console logger and the panic hook. Safe to call twice.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) {
    console_error_panic_hook::set_once();
    let level = level
        .as_deref()
        .and_then(|raw| raw.parse::<log::Level>().ok())
        .unwrap_or(log::Level::Info);
    if console_log::init_with_level(level).is_err() {
        log::debug!(target: LOG_TARGET, "logger already installed");
    }
}

// =============================================================================
// Options
// =============================================================================

/// Options handed to [`OtpWeb::new`]. Enumerated values use their DOM
/// spellings (`"center"`, `"numeric"`, `"increase-width"`).
#[wasm_bindgen]
pub struct OtpWebOptions {
    inner: WebOptions,
}

#[wasm_bindgen]
impl OtpWebOptions {
    #[wasm_bindgen(constructor)]
    pub fn new(max_length: usize) -> OtpWebOptions {
        OtpWebOptions {
            inner: WebOptions::new(max_length),
        }
    }

    #[wasm_bindgen(setter = value)]
    pub fn set_value(&mut self, value: Option<String>) {
        self.inner.value = value;
    }

    #[wasm_bindgen(setter = defaultValue)]
    pub fn set_default_value(&mut self, value: String) {
        self.inner.default_value = value;
    }

    #[wasm_bindgen(setter = pattern)]
    pub fn set_pattern(&mut self, pattern: Option<String>) {
        self.inner.pattern = pattern;
    }

    #[wasm_bindgen(setter = allowNavigation)]
    pub fn set_allow_navigation(&mut self, allow: bool) {
        self.inner.allow_navigation = allow;
    }

    #[wasm_bindgen(setter = allowSpaces)]
    pub fn set_allow_spaces(&mut self, allow: bool) {
        self.inner.allow_spaces = allow;
    }

    #[wasm_bindgen(setter = disabled)]
    pub fn set_disabled(&mut self, disabled: bool) {
        self.inner.disabled = disabled;
    }

    #[wasm_bindgen(setter = textAlign)]
    pub fn set_text_align(&mut self, align: String) {
        self.inner.text_align = align;
    }

    #[wasm_bindgen(setter = inputMode)]
    pub fn set_input_mode(&mut self, mode: String) {
        self.inner.input_mode = mode;
    }

    #[wasm_bindgen(setter = pushPasswordManagerStrategy)]
    pub fn set_password_manager_strategy(&mut self, strategy: String) {
        self.inner.password_manager_strategy = strategy;
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// =============================================================================
// Shared state
// =============================================================================

struct Shared {
    window: Window,
    input: HtmlInputElement,
    otp: RefCell<Option<MountedOtp<WebHost>>>,
    /// Value set by the page while the adapter was busy.
    pending_value: RefCell<Option<String>>,
    timeout: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

fn dispatch(shared: &Shared, event: NativeEvent, dom_event: Option<&Event>) {
    let name = event.name();
    let outcome = match shared.otp.try_borrow_mut() {
        Ok(mut slot) => match slot.as_mut() {
            Some(otp) => otp.handle(event, Instant::now()),
            None => return,
        },
        Err(_) => {
            log::debug!(target: LOG_TARGET, "{name} arrived while the adapter was busy");
            return;
        }
    };
    if outcome.prevent_default
        && let Some(dom_event) = dom_event
    {
        dom_event.prevent_default();
    }
    settle(shared);
}

fn fire(shared: &Shared) {
    shared.timeout.set(None);
    match shared.otp.try_borrow_mut() {
        Ok(mut slot) => {
            if let Some(otp) = slot.as_mut() {
                otp.fire_due(Instant::now());
            }
        }
        Err(_) => log::debug!(target: LOG_TARGET, "timer fired while the adapter was busy"),
    }
    settle(shared);
}

fn settle(shared: &Shared) {
    apply_pending_value(shared);
    rearm(shared);
}

fn apply_pending_value(shared: &Shared) {
    loop {
        let Some(value) = shared.pending_value.borrow_mut().take() else {
            return;
        };
        let Ok(mut slot) = shared.otp.try_borrow_mut() else {
            *shared.pending_value.borrow_mut() = Some(value);
            return;
        };
        if let Some(otp) = slot.as_mut() {
            otp.set_value(&value, Instant::now());
        }
    }
}

/// Point the single `setTimeout` at the adapter's next deadline.
fn rearm(shared: &Shared) {
    if let Some(handle) = shared.timeout.take() {
        shared.window.clear_timeout_with_handle(handle);
    }
    let deadline = match shared.otp.try_borrow() {
        Ok(slot) => slot.as_ref().and_then(|otp| otp.next_deadline()),
        Err(_) => return,
    };
    let Some(deadline) = deadline else {
        return;
    };
    let delay = deadline.saturating_duration_since(Instant::now()).as_millis();
    let delay = i32::try_from(delay).unwrap_or(i32::MAX);

    let tick = shared.tick.borrow();
    let Some(tick) = tick.as_ref() else {
        return;
    };
    match shared
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), delay)
    {
        Ok(handle) => shared.timeout.set(Some(handle)),
        Err(err) => log::warn!(target: LOG_TARGET, "setTimeout failed: {err:?}"),
    }
}

// =============================================================================
// Listeners and observers
// =============================================================================

struct Listener {
    target: EventTarget,
    name: &'static str,
    capture: bool,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        name: &'static str,
        capture: bool,
        shared: &Rc<Shared>,
    ) -> Result<Self, JsValue> {
        let weak = Rc::downgrade(shared);
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            if let Some(native) = translate_event(name, &event) {
                dispatch(&shared, native, Some(&event));
            }
        });
        target.add_event_listener_with_callback_and_bool(
            name,
            callback.as_ref().unchecked_ref(),
            capture,
        )?;
        Ok(Self {
            target: target.clone(),
            name,
            capture,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self.target.remove_event_listener_with_callback_and_bool(
            self.name,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        ) {
            log::debug!(target: LOG_TARGET, "removing {} listener failed: {err:?}", self.name);
        }
    }
}

fn translate_event(name: &str, event: &Event) -> Option<NativeEvent> {
    match name {
        "keydown" | "keyup" => {
            let keyboard = event.dyn_ref::<KeyboardEvent>()?;
            let key = key_event(
                &keyboard.key(),
                keyboard.shift_key(),
                keyboard.alt_key(),
                keyboard.ctrl_key(),
                keyboard.meta_key(),
            );
            Some(if name == "keydown" {
                NativeEvent::KeyDown(key)
            } else {
                NativeEvent::KeyUp(key)
            })
        }
        "paste" => {
            let text = event
                .dyn_ref::<ClipboardEvent>()
                .and_then(ClipboardEvent::clipboard_data)
                .and_then(|data| data.get_data("text/plain").ok());
            Some(NativeEvent::Paste(text))
        }
        other => simple_event(other),
    }
}

struct Resize {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(Array)>,
}

impl Resize {
    fn observe(input: &HtmlInputElement, shared: &Rc<Shared>) -> Result<Self, JsValue> {
        let weak = Rc::downgrade(shared);
        let callback = Closure::<dyn FnMut(Array)>::new(move |_entries: Array| {
            if let Some(shared) = weak.upgrade() {
                dispatch(&shared, NativeEvent::Resize, None);
            }
        });
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(input);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for Resize {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Invisible element just right of the container, watched to learn whether
/// a widened input would still fit on screen.
struct BadgeArea {
    element: HtmlElement,
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array)>,
}

impl Drop for BadgeArea {
    fn drop(&mut self) {
        self.observer.disconnect();
        self.element.remove();
    }
}

// =============================================================================
// Host
// =============================================================================

/// [`OtpHost`](otp_events::OtpHost) over a real container and `<input>`.
pub struct WebHost {
    window: Window,
    document: Document,
    container: HtmlElement,
    input: HtmlInputElement,
    shared: Weak<Shared>,
    badge_area: Option<BadgeArea>,
}

fn unavailable(api: &'static str) -> HostError {
    HostError::Unavailable { api }
}

fn set_attribute(element: &Element, name: &str, value: Option<&str>) {
    let result = match value {
        Some(value) => element.set_attribute(name, value),
        None => element.remove_attribute(name),
    };
    if let Err(err) = result {
        log::debug!(target: LOG_TARGET, "attribute {name} not applied: {err:?}");
    }
}

fn set_style_property(element: &HtmlElement, name: &str, value: &str) {
    if let Err(err) = element.style().set_property(name, value) {
        log::debug!(target: LOG_TARGET, "style {name} not applied: {err:?}");
    }
}

impl WebHost {
    fn is_input(&self, node: &Node) -> bool {
        let input: &Node = self.input.as_ref();
        node.is_same_node(Some(input))
    }

    fn is_container(&self, node: &Node) -> bool {
        let container: &Node = self.container.as_ref();
        node.is_same_node(Some(container))
    }

    fn create_badge_area(&self) -> Result<HtmlElement, HostError> {
        let element = self
            .document
            .create_element("div")
            .map_err(|_| unavailable("createElement"))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| unavailable("HTMLElement"))?;
        let width = format!("{BADGE_SPACE_WIDTH_PX}px");
        for (name, value) in [
            ("position", "absolute"),
            ("top", "0"),
            ("left", "100%"),
            ("width", width.as_str()),
            ("height", "100%"),
            ("pointer-events", "none"),
            ("visibility", "hidden"),
        ] {
            set_style_property(&element, name, value);
        }
        self.container
            .append_child(&element)
            .map_err(|_| unavailable("appendChild"))?;
        Ok(element)
    }
}

impl NativeInput for WebHost {
    fn value(&self) -> String {
        self.input.value()
    }

    fn set_value(&mut self, value: &str) {
        self.input.set_value(value);
    }

    fn selection(&self) -> RawSelection {
        let start = self.input.selection_start().ok().flatten();
        let end = self.input.selection_end().ok().flatten();
        let (Some(start), Some(end)) = (start, end) else {
            return RawSelection::NONE;
        };
        let direction = self
            .input
            .selection_direction()
            .ok()
            .flatten()
            .map_or(SelectionDirection::None, |raw| SelectionDirection::from_dom(&raw));
        let value = self.input.value();
        RawSelection::new(
            utf16_to_char(&value, start),
            utf16_to_char(&value, end),
            direction,
        )
    }

    fn set_selection_range(&mut self, start: usize, end: usize, direction: SelectionDirection) {
        let value = self.input.value();
        if let Err(err) = self.input.set_selection_range_with_direction(
            char_to_utf16(&value, start),
            char_to_utf16(&value, end),
            direction.as_str(),
        ) {
            log::debug!(target: LOG_TARGET, "setSelectionRange failed: {err:?}");
        }
    }

    fn is_active_element(&self) -> bool {
        self.document
            .active_element()
            .is_some_and(|active| self.is_input(&active))
    }

    fn focus(&mut self) {
        if let Err(err) = self.input.focus() {
            log::debug!(target: LOG_TARGET, "focus failed: {err:?}");
        }
    }

    fn blur(&mut self) {
        if let Err(err) = self.input.blur() {
            log::debug!(target: LOG_TARGET, "blur failed: {err:?}");
        }
    }

    fn client_height(&self) -> f64 {
        f64::from(self.input.client_height())
    }

    fn dispatch_input_event(&mut self) {
        let input = self.input.clone();
        let deferred = Closure::once_into_js(move || {
            let init = EventInit::new();
            init.set_bubbles(true);
            let dispatched = Event::new_with_event_init_dict("input", &init)
                .and_then(|event| input.dispatch_event(&event));
            if let Err(err) = dispatched {
                log::debug!(target: LOG_TARGET, "synthetic input failed: {err:?}");
            }
        });
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(deferred.unchecked_ref(), 0)
        {
            log::warn!(target: LOG_TARGET, "setTimeout failed: {err:?}");
        }
    }
}

impl ElementHost for WebHost {
    fn set_container_attribute(&mut self, name: &str, value: Option<&str>) {
        set_attribute(&self.container, name, value);
    }

    fn set_container_style_property(&mut self, name: &str, value: &str) {
        set_style_property(&self.container, name, value);
    }

    fn set_input_attribute(&mut self, name: &str, value: Option<&str>) {
        set_attribute(&self.input, name, value);
    }

    fn set_input_style_property(&mut self, name: &str, value: &str) {
        set_style_property(&self.input, name, value);
    }

    fn probe_badge(&self) -> Result<BadgeProbe, HostError> {
        let rect = self.input.get_bounding_client_rect();
        let x = rect.right() - BADGE_PROBE_INSET_PX;
        let y = rect.top() + rect.height() / 2.0;
        let foreign_element_at_edge = self
            .document
            .element_from_point(x as f32, y as f32)
            .is_some_and(|hit| !self.is_input(&hit) && !self.is_container(&hit));

        let mut marker_found = false;
        for selector in BADGE_MARKER_SELECTORS {
            let hit = self
                .document
                .query_selector(selector)
                .map_err(|_| unavailable("querySelector"))?;
            if hit.is_some() {
                marker_found = true;
                break;
            }
        }

        Ok(BadgeProbe {
            foreign_element_at_edge,
            marker_found,
        })
    }

    fn observe_badge_area(&mut self) -> Result<(), HostError> {
        if self.badge_area.is_some() {
            return Ok(());
        }
        let element = self.create_badge_area()?;

        let weak = self.shared.clone();
        let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    let ratio = entry.intersection_ratio();
                    dispatch(&shared, NativeEvent::BadgeAreaIntersection(ratio), None);
                }
            }
        });
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(BADGE_SPACE_RATIO));
        let observer =
            match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            {
                Ok(observer) => observer,
                Err(_) => {
                    element.remove();
                    return Err(unavailable("IntersectionObserver"));
                }
            };
        observer.observe(&element);
        self.badge_area = Some(BadgeArea {
            element,
            observer,
            _callback: callback,
        });
        Ok(())
    }
}

impl DocumentHost for WebHost {
    fn ensure_style_element(&mut self, id: &str) -> Result<bool, HostError> {
        if self.document.get_element_by_id(id).is_some() {
            return Ok(false);
        }
        let element = self
            .document
            .create_element("style")
            .map_err(|_| unavailable("createElement"))?;
        element.set_id(id);
        let head = self.document.head().ok_or(unavailable("document.head"))?;
        head.append_child(&element)
            .map_err(|_| unavailable("appendChild"))?;
        Ok(true)
    }

    fn insert_style_rule(&mut self, id: &str, rule: &str) -> Result<(), HostError> {
        let sheet = self
            .document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlStyleElement>().ok())
            .and_then(|element| element.sheet())
            .and_then(|sheet| sheet.dyn_into::<CssStyleSheet>().ok())
            .ok_or(unavailable("CSSStyleSheet"))?;
        let index = sheet.css_rules().map_or(0, |rules| rules.length());
        sheet
            .insert_rule_with_index(rule, index)
            .map(drop)
            .map_err(|_| HostError::StyleRuleRejected {
                rule: rule.to_string(),
            })
    }

    fn remove_style_element(&mut self, id: &str) {
        if let Some(element) = self.document.get_element_by_id(id) {
            element.remove();
        }
    }

    fn supports_touch_callout(&self) -> bool {
        web_sys::css::supports_with_value("-webkit-touch-callout", "none").unwrap_or(false)
    }
}

// =============================================================================
// Exported handle
// =============================================================================

fn call_js(f: &Function, arg: &JsValue) {
    if let Err(err) = f.call1(&JsValue::NULL, arg) {
        log::error!(target: LOG_TARGET, "callback threw: {err:?}");
    }
}

fn set_field(target: &Object, key: &str, value: &JsValue) {
    if let Err(err) = Reflect::set(target, &JsValue::from_str(key), value) {
        log::debug!(target: LOG_TARGET, "setting {key} failed: {err:?}");
    }
}

/// `{ slots: [{ char, isActive, hasFakeCaret }], isFocused, isHovering, willPushPWMBadge }`
fn render_to_js(state: &RenderState) -> JsValue {
    let slots = Array::new();
    for slot in &state.slots {
        let entry = Object::new();
        let char = slot
            .char
            .map_or(JsValue::NULL, |c| JsValue::from_str(c.encode_utf8(&mut [0; 4])));
        set_field(&entry, "char", &char);
        set_field(&entry, "isActive", &JsValue::from_bool(slot.is_active));
        set_field(&entry, "hasFakeCaret", &JsValue::from_bool(slot.has_fake_caret));
        slots.push(&entry);
    }
    let root = Object::new();
    set_field(&root, "slots", &slots);
    set_field(&root, "isFocused", &JsValue::from_bool(state.is_focused));
    set_field(&root, "isHovering", &JsValue::from_bool(state.is_hovering));
    set_field(
        &root,
        "willPushPWMBadge",
        &JsValue::from_bool(state.will_push_badge),
    );
    root.into()
}

/// A mounted input. Call `free()` (or `unmount()`) to tear it down.
#[wasm_bindgen]
pub struct OtpWeb {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
    resize: Option<Resize>,
}

#[wasm_bindgen]
impl OtpWeb {
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        input: HtmlInputElement,
        options: &OtpWebOptions,
        on_change: Option<Function>,
        on_complete: Option<Function>,
        on_render: Option<Function>,
    ) -> Result<OtpWeb, JsValue> {
        let window = web_sys::window().ok_or_else(|| to_js_error("no window"))?;
        let document = window.document().ok_or_else(|| to_js_error("no document"))?;

        let config = options.inner.to_config().map_err(to_js_error)?;
        let mut component = OtpInput::create(config).map_err(to_js_error)?;
        if let Some(f) = on_change {
            component = component.on_change(move |value| call_js(&f, &JsValue::from_str(value)));
        }
        if let Some(f) = on_complete {
            component =
                component.on_complete(move |value| call_js(&f, &JsValue::from_str(value)));
        }
        if let Some(f) = on_render {
            component = component.on_render(move |state| call_js(&f, &render_to_js(state)));
        }

        let shared = Rc::new(Shared {
            window: window.clone(),
            input: input.clone(),
            otp: RefCell::new(None),
            pending_value: RefCell::new(None),
            timeout: Cell::new(None),
            tick: RefCell::new(None),
        });
        let weak = Rc::downgrade(&shared);
        *shared.tick.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            if let Some(shared) = weak.upgrade() {
                fire(&shared);
            }
        }));

        let host = WebHost {
            window,
            document: document.clone(),
            container,
            input: input.clone(),
            shared: Rc::downgrade(&shared),
            badge_area: None,
        };
        let mounted = component.mount(host, Instant::now());
        *shared.otp.borrow_mut() = Some(mounted);

        let mut listeners = Vec::with_capacity(INPUT_EVENTS.len() + 1);
        for name in INPUT_EVENTS {
            listeners.push(Listener::attach(input.as_ref(), name, false, &shared)?);
        }
        listeners.push(Listener::attach(
            document.as_ref(),
            SELECTION_CHANGE,
            true,
            &shared,
        )?);
        let resize = Resize::observe(&input, &shared)?;

        rearm(&shared);
        log::debug!(target: LOG_TARGET, "mounted");
        Ok(OtpWeb {
            shared,
            listeners,
            resize: Some(resize),
        })
    }

    /// The committed value.
    pub fn value(&self) -> String {
        match self.shared.otp.try_borrow() {
            Ok(slot) => slot
                .as_ref()
                .map_or_else(String::new, |otp| otp.value().to_string()),
            // Called from inside a callback: the element already shows it.
            Err(_) => self.shared.input.value(),
        }
    }

    /// Echo a controlled value, or overwrite an uncontrolled one.
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&self, value: String) {
        *self.shared.pending_value.borrow_mut() = Some(value);
        settle(&self.shared);
    }

    #[wasm_bindgen(js_name = selectAll)]
    pub fn select_all(&self) -> bool {
        match self.shared.otp.try_borrow_mut() {
            Ok(mut slot) => slot.as_mut().is_some_and(|otp| otp.select_all()),
            Err(_) => false,
        }
    }

    #[wasm_bindgen(js_name = updateOptions)]
    pub fn update_options(&self, options: &OtpWebOptions) -> Result<(), JsValue> {
        let config = options.inner.to_config().map_err(to_js_error)?;
        let result = {
            let mut slot = self
                .shared
                .otp
                .try_borrow_mut()
                .map_err(|_| to_js_error("adapter busy"))?;
            match slot.as_mut() {
                Some(otp) => otp.update_options(config, Instant::now()),
                None => return Err(to_js_error("unmounted")),
            }
        };
        settle(&self.shared);
        result.map_err(to_js_error)
    }

    pub fn unmount(&mut self) {
        // A listener closure may not be dropped while it runs.
        let Ok(mut slot) = self.shared.otp.try_borrow_mut() else {
            log::warn!(target: LOG_TARGET, "unmount from inside a callback ignored");
            return;
        };
        let Some(otp) = slot.take() else {
            return;
        };
        drop(slot);
        self.listeners.clear();
        self.resize = None;
        if let Some(handle) = self.shared.timeout.take() {
            self.shared.window.clear_timeout_with_handle(handle);
        }
        self.shared.tick.borrow_mut().take();
        otp.unmount();
        log::debug!(target: LOG_TARGET, "unmounted");
    }
}

impl Drop for OtpWeb {
    fn drop(&mut self) {
        self.unmount();
    }
}
