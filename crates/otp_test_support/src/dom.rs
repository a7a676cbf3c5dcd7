//! A simulated DOM for the adapter.
//!
//! [`FakeDom`] is the state of one container, its native input and the
//! document around them. [`FakeHost`] is the handle the adapter mounts on;
//! it shares the state with the test through `Rc<RefCell<_>>`.
//!
//! Host calls never re-enter the adapter. Events a real browser would fire
//! synchronously (`selectionchange`, the synthetic `input`) are queued on
//! [`FakeDom::pending`] and delivered by [`crate::Browser`].

use otp_core::{
    HostError, NativeInput, RawSelection, SelectionDirection, char_len, truncate_chars,
};
use otp_events::{BadgeProbe, DocumentHost, ElementHost, NativeEvent};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

#[derive(Debug)]
pub struct FakeDom {
    pub value: String,
    pub selection_start: usize,
    pub selection_end: usize,
    pub direction: SelectionDirection,
    /// Whether the input is `document.activeElement`.
    pub active: bool,

    pub input_attributes: BTreeMap<String, String>,
    pub input_style: BTreeMap<String, String>,
    pub container_attributes: BTreeMap<String, String>,
    pub container_style: BTreeMap<String, String>,
    /// Style elements by id, with their inserted rules.
    pub style_elements: BTreeMap<String, Vec<String>>,
    /// Rules containing any of these fragments are rejected.
    pub rejected_rule_fragments: Vec<String>,

    pub touch_callout: bool,
    pub client_height: f64,
    /// What a badge probe reports; `None` makes the probe fail.
    pub badge_probe: Option<BadgeProbe>,
    pub observing_badge_area: bool,

    /// Events the browser owes the adapter.
    pub pending: VecDeque<NativeEvent>,
    pub focus_calls: usize,
    pub blur_calls: usize,
    pub selection_writes: usize,
}

impl Default for FakeDom {
    fn default() -> Self {
        Self {
            value: String::new(),
            selection_start: 0,
            selection_end: 0,
            direction: SelectionDirection::None,
            active: false,
            input_attributes: BTreeMap::new(),
            input_style: BTreeMap::new(),
            container_attributes: BTreeMap::new(),
            container_style: BTreeMap::new(),
            style_elements: BTreeMap::new(),
            rejected_rule_fragments: Vec::new(),
            touch_callout: false,
            client_height: 40.0,
            badge_probe: Some(BadgeProbe::default()),
            observing_badge_area: false,
            pending: VecDeque::new(),
            focus_calls: 0,
            blur_calls: 0,
            selection_writes: 0,
        }
    }
}

impl FakeDom {
    pub fn shared() -> Rc<RefCell<FakeDom>> {
        Rc::new(RefCell::new(FakeDom::default()))
    }

    pub fn selection(&self) -> RawSelection {
        RawSelection::new(self.selection_start, self.selection_end, self.direction)
    }

    pub fn value_len(&self) -> usize {
        char_len(&self.value)
    }

    /// The `maxlength` attribute, if set and numeric.
    pub fn max_length_attribute(&self) -> Option<usize> {
        self.input_attributes
            .get("maxlength")
            .and_then(|raw| raw.parse().ok())
    }

    /// Move the selection, clamped to the value, and queue `selectionchange`
    /// if anything moved while focused.
    pub fn select(&mut self, start: usize, end: usize, direction: SelectionDirection) {
        let len = self.value_len();
        let end = end.min(len);
        let start = start.min(end);
        let changed = (start, end, direction)
            != (self.selection_start, self.selection_end, self.direction);
        self.selection_start = start;
        self.selection_end = end;
        self.direction = direction;
        if changed && self.active {
            self.pending.push_back(NativeEvent::SelectionChange);
        }
    }

    /// Replace the value the way a script does: the caret jumps to the end.
    pub fn replace_value(&mut self, value: &str) {
        if self.value == value {
            return;
        }
        self.value = value.to_string();
        let len = self.value_len();
        self.select(len, len, SelectionDirection::None);
    }

    pub fn style_rules(&self, id: &str) -> Option<&[String]> {
        self.style_elements.get(id).map(Vec::as_slice)
    }

    pub fn pop_event(&mut self) -> Option<NativeEvent> {
        self.pending.pop_front()
    }
}

/// The adapter's view of a [`FakeDom`].
#[derive(Clone, Debug)]
pub struct FakeHost {
    dom: Rc<RefCell<FakeDom>>,
}

impl FakeHost {
    pub fn new(dom: Rc<RefCell<FakeDom>>) -> Self {
        Self { dom }
    }

    pub fn dom(&self) -> Rc<RefCell<FakeDom>> {
        Rc::clone(&self.dom)
    }
}

impl NativeInput for FakeHost {
    fn value(&self) -> String {
        self.dom.borrow().value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.dom.borrow_mut().replace_value(value);
    }

    fn selection(&self) -> RawSelection {
        self.dom.borrow().selection()
    }

    fn set_selection_range(&mut self, start: usize, end: usize, direction: SelectionDirection) {
        let mut dom = self.dom.borrow_mut();
        dom.selection_writes += 1;
        dom.select(start, end, direction);
    }

    fn is_active_element(&self) -> bool {
        self.dom.borrow().active
    }

    fn focus(&mut self) {
        let mut dom = self.dom.borrow_mut();
        dom.active = true;
        dom.focus_calls += 1;
    }

    fn blur(&mut self) {
        let mut dom = self.dom.borrow_mut();
        dom.active = false;
        dom.blur_calls += 1;
    }

    fn client_height(&self) -> f64 {
        self.dom.borrow().client_height
    }

    fn dispatch_input_event(&mut self) {
        self.dom.borrow_mut().pending.push_back(NativeEvent::Input);
    }
}

fn set_or_remove(map: &mut BTreeMap<String, String>, name: &str, value: Option<&str>) {
    match value {
        Some(value) => {
            map.insert(name.to_string(), value.to_string());
        }
        None => {
            map.remove(name);
        }
    }
}

impl ElementHost for FakeHost {
    fn set_container_attribute(&mut self, name: &str, value: Option<&str>) {
        set_or_remove(&mut self.dom.borrow_mut().container_attributes, name, value);
    }

    fn set_container_style_property(&mut self, name: &str, value: &str) {
        self.dom
            .borrow_mut()
            .container_style
            .insert(name.to_string(), value.to_string());
    }

    fn set_input_attribute(&mut self, name: &str, value: Option<&str>) {
        set_or_remove(&mut self.dom.borrow_mut().input_attributes, name, value);
    }

    fn set_input_style_property(&mut self, name: &str, value: &str) {
        self.dom
            .borrow_mut()
            .input_style
            .insert(name.to_string(), value.to_string());
    }

    fn probe_badge(&self) -> Result<BadgeProbe, HostError> {
        self.dom
            .borrow()
            .badge_probe
            .ok_or(HostError::Unavailable {
                api: "elementFromPoint",
            })
    }

    fn observe_badge_area(&mut self) -> Result<(), HostError> {
        self.dom.borrow_mut().observing_badge_area = true;
        Ok(())
    }
}

impl DocumentHost for FakeHost {
    fn ensure_style_element(&mut self, id: &str) -> Result<bool, HostError> {
        let mut dom = self.dom.borrow_mut();
        if dom.style_elements.contains_key(id) {
            return Ok(false);
        }
        dom.style_elements.insert(id.to_string(), Vec::new());
        Ok(true)
    }

    fn insert_style_rule(&mut self, id: &str, rule: &str) -> Result<(), HostError> {
        let mut dom = self.dom.borrow_mut();
        let rejected = dom
            .rejected_rule_fragments
            .iter()
            .any(|fragment| rule.contains(fragment.as_str()));
        if rejected {
            return Err(HostError::StyleRuleRejected {
                rule: rule.to_string(),
            });
        }
        match dom.style_elements.get_mut(id) {
            Some(rules) => {
                rules.push(rule.to_string());
                Ok(())
            }
            None => Err(HostError::Unavailable { api: "CSSStyleSheet" }),
        }
    }

    fn remove_style_element(&mut self, id: &str) {
        self.dom.borrow_mut().style_elements.remove(id);
    }

    fn supports_touch_callout(&self) -> bool {
        self.dom.borrow().touch_callout
    }
}

/// Text a user typing `text` at the current selection would leave behind,
/// honouring `maxlength` the way browsers do: the insertion is cut to fit.
///
/// Returns `None` when nothing would be inserted.
pub(crate) fn typed_value(dom: &FakeDom, text: &str) -> Option<(String, usize)> {
    let (start, end) = (dom.selection_start, dom.selection_end);
    let kept = dom.value_len() - (end - start);
    let room = dom
        .max_length_attribute()
        .map_or(usize::MAX, |max| max.saturating_sub(kept));
    let insert = truncate_chars(text, room);
    if insert.is_empty() {
        return None;
    }
    let value = otp_core::splice_chars(&dom.value, start, end, insert);
    Some((value, start + char_len(insert)))
}
