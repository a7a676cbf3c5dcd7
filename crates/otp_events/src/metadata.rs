//! Per-instance metadata.
//!
//! Created on mount, owned by the mounted component and dropped with it.
//! Nothing is stored on the DOM element itself.

use crate::badge::BadgeState;
use otp_core::{Instant, RawSelection};
use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct InputMetadata {
    /// Result of the previous normalization pass.
    pub prev: RawSelection,
    /// Selection shown to the render layer.
    pub mirror: RawSelection,
    pub focused: bool,
    pub hovering: bool,
    pub last_click: Option<Instant>,
    pub is_ios: bool,
    /// A synthetic `input` event is on its way; it must not schedule another.
    pub synthetic_input_pending: bool,
    /// Last published `--root-height`, in CSS pixels.
    pub root_height: Option<f64>,
    pub badge: BadgeState,
}

impl InputMetadata {
    pub fn new(is_ios: bool) -> Self {
        Self {
            is_ios,
            ..Self::default()
        }
    }

    /// Whether the last click happened within `window` before `now`.
    pub fn clicked_within(&self, now: Instant, window: Duration) -> bool {
        self.last_click
            .is_some_and(|at| now.saturating_duration_since(at) <= window)
    }

    /// Forget everything tied to focus.
    pub fn clear_focus(&mut self) {
        self.focused = false;
        self.mirror = RawSelection::NONE;
    }
}
