//! Keydown planning.
//!
//! Decides, from the native selection before the key takes effect, whether
//! the adapter overrides the browser's default action. Most keys pass
//! through: the browser's own editing is what makes replace-on-type work,
//! because the normalized selection always covers the cell being typed over.

use crate::event::{Key, KeyEvent};
use otp_core::SelectionKind;

/// What to do with one keydown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Let the browser handle it.
    PassThrough,
    /// Cancel the default action and select `[start, end)`.
    Select { start: usize, end: usize },
    /// Cancel the default action and put the mirror's selection back.
    Restore,
    /// Cancel the default action, delete `[start, end)` and leave a caret at
    /// `start`.
    Delete { start: usize, end: usize },
}

impl KeyAction {
    #[inline]
    pub fn prevents_default(self) -> bool {
        !matches!(self, KeyAction::PassThrough)
    }
}

/// Plan the response to `event` given the native selection `(start, end)`.
///
/// Returns `None` when the selection has an impossible shape (`end < start`).
pub fn plan_keydown(
    event: &KeyEvent,
    start: usize,
    end: usize,
    value_len: usize,
    allow_navigation: bool,
) -> Option<KeyAction> {
    let kind = SelectionKind::classify(start, end)?;
    let mods = event.modifiers;

    if event.key.is_navigation() {
        if !allow_navigation {
            return Some(KeyAction::Restore);
        }
        if event.key == Key::ArrowLeft && kind == SelectionKind::Char && !mods.any() {
            return Some(KeyAction::Select {
                start: start.saturating_sub(1),
                end: end.saturating_sub(1).max(1),
            });
        }
        if mods.alt && !mods.shift {
            match event.key {
                Key::ArrowLeft => {
                    return Some(KeyAction::Select {
                        start: 0,
                        end: value_len.min(1),
                    });
                }
                Key::ArrowRight => {
                    return Some(KeyAction::Select {
                        start: value_len.saturating_sub(1),
                        end: value_len,
                    });
                }
                _ => {}
            }
        }
        return Some(KeyAction::PassThrough);
    }

    match &event.key {
        Key::Character('a' | 'A') if mods.command() && !allow_navigation => {
            Some(KeyAction::Restore)
        }
        Key::Backspace if mods.command() => Some(match kind {
            // A highlighted cell is what the user means to delete.
            SelectionKind::Char => KeyAction::Delete { start, end },
            SelectionKind::Caret | SelectionKind::Multi => KeyAction::Delete { start: 0, end },
        }),
        _ => Some(KeyAction::PassThrough),
    }
}
