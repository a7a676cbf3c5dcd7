//! Native event model.
//!
//! The host translates DOM events into [`NativeEvent`] values and forwards
//! them to the adapter. The adapter answers with an [`EventOutcome`] telling
//! the host whether to cancel the browser's default action.

/// A `KeyboardEvent.key` value the adapter cares about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Meta,
    Alt,
    Control,
    Shift,
    /// A printable character.
    Character(char),
    /// Anything else, with its DOM spelling.
    Other(String),
}

impl Key {
    /// Parse a `KeyboardEvent.key` string.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Home" => Key::Home,
            "End" => Key::End,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            "Escape" => Key::Escape,
            "Meta" | "OS" => Key::Meta,
            "Alt" => Key::Alt,
            "Control" => Key::Control,
            "Shift" => Key::Shift,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Other(other.to_string()),
                }
            }
        }
    }

    /// Keys that move the caret.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowLeft | Key::ArrowRight | Key::ArrowUp | Key::ArrowDown | Key::Home | Key::End
        )
    }

    /// Modifier keys whose release may hide a selection change.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Meta | Key::Alt | Key::Control)
    }
}

/// Modifier state of a keyboard event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
        ctrl: false,
        meta: false,
    };

    #[inline]
    pub fn any(self) -> bool {
        self.shift || self.alt || self.ctrl || self.meta
    }

    /// Ctrl or Meta: the platform "command" modifier.
    #[inline]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// Events delivered to the adapter.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeEvent {
    /// Document-level `selectionchange`.
    SelectionChange,
    /// `input` on the native element, real or synthetic.
    Input,
    Change,
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    Focus,
    Blur,
    /// `paste` with the `text/plain` clipboard payload, `None` when the
    /// clipboard could not be read.
    Paste(Option<String>),
    Click,
    DblClick,
    TouchEnd,
    TouchMove,
    MouseOver,
    MouseLeave,
    /// The resize observer saw the native input change size.
    Resize,
    /// Intersection ratio of the area reserved for a password-manager badge.
    BadgeAreaIntersection(f64),
}

impl NativeEvent {
    /// DOM event name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            NativeEvent::SelectionChange => "selectionchange",
            NativeEvent::Input => "input",
            NativeEvent::Change => "change",
            NativeEvent::KeyDown(_) => "keydown",
            NativeEvent::KeyUp(_) => "keyup",
            NativeEvent::Focus => "focus",
            NativeEvent::Blur => "blur",
            NativeEvent::Paste(_) => "paste",
            NativeEvent::Click => "click",
            NativeEvent::DblClick => "dblclick",
            NativeEvent::TouchEnd => "touchend",
            NativeEvent::TouchMove => "touchmove",
            NativeEvent::MouseOver => "mouseover",
            NativeEvent::MouseLeave => "mouseleave",
            NativeEvent::Resize => "resize",
            NativeEvent::BadgeAreaIntersection(_) => "intersection",
        }
    }
}

/// What the host must do with the originating DOM event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const PASS: EventOutcome = EventOutcome {
        prevent_default: false,
    };
    pub const PREVENT: EventOutcome = EventOutcome {
        prevent_default: true,
    };
}
