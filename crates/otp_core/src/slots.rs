//! Derived per-slot render state.
//!
//! Nothing here is stored: [`RenderState::derive`] recomputes the slots from
//! the value and the selection mirror on every render.

use crate::selection::RawSelection;

/// One logical character position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SlotProps {
    pub char: Option<char>,
    pub is_active: bool,
    pub has_fake_caret: bool,
}

/// Everything the consumer render callback receives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderState {
    pub slots: Vec<SlotProps>,
    pub is_focused: bool,
    pub is_hovering: bool,
    /// The input was widened to make room for a password-manager badge.
    pub will_push_badge: bool,
}

impl RenderState {
    pub fn derive(
        value: &str,
        mirror: RawSelection,
        max_length: usize,
        is_focused: bool,
        is_hovering: bool,
    ) -> Self {
        let mut chars = value.chars();
        let slots = (0..max_length)
            .map(|idx| {
                let char = chars.next();
                let is_active = is_focused && slot_is_active(mirror, idx);
                SlotProps {
                    char,
                    is_active,
                    has_fake_caret: is_active && char.is_none(),
                }
            })
            .collect();

        Self {
            slots,
            is_focused,
            is_hovering,
            will_push_badge: false,
        }
    }

    /// Indices of the active slots.
    pub fn active_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.is_active.then_some(idx))
            .collect()
    }

    /// Index of the slot drawing the fake caret, if any.
    pub fn fake_caret(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.has_fake_caret)
    }
}

fn slot_is_active(mirror: RawSelection, idx: usize) -> bool {
    match mirror.bounds() {
        Some((start, end)) if start == end => idx == start,
        Some((start, end)) => idx >= start && idx < end,
        None => false,
    }
}
