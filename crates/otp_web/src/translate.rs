//! DOM event names and offsets, translated for the adapter.
//!
//! The browser reports selection offsets in UTF-16 code units while the
//! adapter works in characters; the helpers here convert between the two.

use otp_events::{Key, KeyEvent, Modifiers, NativeEvent};

/// Events the binding listens to on the native input.
pub const INPUT_EVENTS: [&str; 13] = [
    "input",
    "change",
    "keydown",
    "keyup",
    "focus",
    "blur",
    "paste",
    "click",
    "dblclick",
    "touchend",
    "touchmove",
    "mouseover",
    "mouseleave",
];

/// Listened to on the document, in the capture phase.
pub const SELECTION_CHANGE: &str = "selectionchange";

/// Events that carry no payload the adapter needs.
///
/// Keyboard and clipboard events return `None`; the binding reads their
/// payload from the DOM event itself.
pub fn simple_event(name: &str) -> Option<NativeEvent> {
    let event = match name {
        "selectionchange" => NativeEvent::SelectionChange,
        "input" => NativeEvent::Input,
        "change" => NativeEvent::Change,
        "focus" => NativeEvent::Focus,
        "blur" => NativeEvent::Blur,
        "click" => NativeEvent::Click,
        "dblclick" => NativeEvent::DblClick,
        "touchend" => NativeEvent::TouchEnd,
        "touchmove" => NativeEvent::TouchMove,
        "mouseover" => NativeEvent::MouseOver,
        "mouseleave" => NativeEvent::MouseLeave,
        _ => return None,
    };
    Some(event)
}

pub fn key_event(key: &str, shift: bool, alt: bool, ctrl: bool, meta: bool) -> KeyEvent {
    KeyEvent::new(
        Key::from_dom(key),
        Modifiers {
            shift,
            alt,
            ctrl,
            meta,
        },
    )
}

/// Character index of UTF-16 offset `offset` in `value`, clamped to the end.
///
/// An offset inside a surrogate pair rounds up past the pair.
pub fn utf16_to_char(value: &str, offset: u32) -> usize {
    let offset = offset as usize;
    let mut units = 0;
    for (idx, ch) in value.chars().enumerate() {
        if units >= offset {
            return idx;
        }
        units += ch.len_utf16();
    }
    value.chars().count()
}

/// UTF-16 offset of character index `idx` in `value`, clamped to the end.
pub fn char_to_utf16(value: &str, idx: usize) -> u32 {
    let units: usize = value.chars().take(idx).map(char::len_utf16).sum();
    u32::try_from(units).unwrap_or(u32::MAX)
}
