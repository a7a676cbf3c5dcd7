//! Password-manager badge avoidance.
//!
//! Extensions such as LastPass or 1Password overlay a badge on the right
//! edge of inputs they recognize, right on top of the last slot. When one is
//! detected and there is room to the right of the container, the native input
//! is widened so the badge lands outside the slots. None of this affects the
//! value or the selection.

use otp_core::PasswordManagerStrategy;

/// Markers some password managers leave in the document.
pub const BADGE_MARKER_SELECTORS: [&str; 3] = [
    "[data-lastpass-icon-root]",
    "com-1password-button",
    "[data-dashlanecreated]",
];

/// Distance from the input's right edge at which badges are probed.
pub const BADGE_PROBE_INSET_PX: f64 = 18.0;

/// Extra width given to the input when pushing a badge out.
pub const BADGE_SPACE_WIDTH_PX: f64 = 40.0;

/// The reserved area counts as free when more than this share is visible.
pub const BADGE_SPACE_RATIO: f64 = 0.99;

/// Result of one layout probe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BadgeProbe {
    /// `elementFromPoint` near the right edge returned something other than
    /// the input.
    pub foreign_element_at_edge: bool,
    /// One of [`BADGE_MARKER_SELECTORS`] matched.
    pub marker_found: bool,
}

impl BadgeProbe {
    #[inline]
    pub fn found(self) -> bool {
        self.foreign_element_at_edge || self.marker_found
    }
}

/// Per-instance detection state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BadgeState {
    found: bool,
    has_space: bool,
    refocused: bool,
}

impl BadgeState {
    #[inline]
    pub fn found(&self) -> bool {
        self.found
    }

    #[inline]
    pub fn has_space(&self) -> bool {
        self.has_space
    }

    /// Record a probe. Returns `true` only on the first detection; later
    /// probes are ignored.
    pub fn record_probe(&mut self, probe: BadgeProbe) -> bool {
        if self.found || !probe.found() {
            return false;
        }
        self.found = true;
        true
    }

    /// Record the visible share of the reserved area. Returns `true` if the
    /// space verdict changed.
    pub fn record_intersection(&mut self, ratio: f64) -> bool {
        let has_space = ratio > BADGE_SPACE_RATIO;
        let changed = has_space != self.has_space;
        self.has_space = has_space;
        changed
    }

    /// Claim the one-time refocus that makes some managers reposition their
    /// badge. Returns `false` once it has been used.
    pub fn take_refocus(&mut self) -> bool {
        !std::mem::replace(&mut self.refocused, true)
    }

    pub fn will_push(&self, strategy: PasswordManagerStrategy) -> bool {
        strategy == PasswordManagerStrategy::IncreaseWidth && self.found && self.has_space
    }
}

/// `width` of the native input.
pub fn input_width(will_push: bool) -> String {
    if will_push {
        format!("calc(100% + {BADGE_SPACE_WIDTH_PX}px)")
    } else {
        "100%".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEEN: BadgeProbe = BadgeProbe {
        foreign_element_at_edge: true,
        marker_found: false,
    };

    #[test]
    fn detection_is_sticky() {
        let mut state = BadgeState::default();
        assert!(!state.record_probe(BadgeProbe::default()));
        assert!(state.record_probe(SEEN));
        assert!(!state.record_probe(SEEN));
        assert!(state.found());
    }

    #[test]
    fn push_needs_badge_space_and_strategy() {
        let mut state = BadgeState::default();
        state.record_probe(SEEN);
        assert!(!state.will_push(PasswordManagerStrategy::IncreaseWidth));

        assert!(state.record_intersection(1.0));
        assert!(state.will_push(PasswordManagerStrategy::IncreaseWidth));
        assert!(!state.will_push(PasswordManagerStrategy::None));

        assert!(state.record_intersection(0.5));
        assert!(!state.has_space());
    }

    #[test]
    fn refocus_happens_once() {
        let mut state = BadgeState::default();
        assert!(state.take_refocus());
        assert!(!state.take_refocus());
    }

    #[test]
    fn width_values() {
        assert_eq!(input_width(false), "100%");
        assert_eq!(input_width(true), "calc(100% + 40px)");
    }
}
