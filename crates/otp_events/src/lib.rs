//! # otp_events
//!
//! Event adapter and component wrapper of the one-time-password input.
//!
//! This crate provides:
//! - [`OtpInput`] / [`MountedOtp`]: the component and its mounted adapter
//! - [`NativeEvent`]: the DOM events the adapter consumes
//! - [`ElementHost`] / [`DocumentHost`]: what a host must implement
//! - [`MountRegistry`]: shared style-element bookkeeping across mounts
//! - [`TimerQueue`]: the adapter's deferred work, driven by the host
//!
//! ## Integration
//!
//! A host forwards every DOM event to [`MountedOtp::handle`], honours the
//! returned [`EventOutcome`], and calls [`MountedOtp::fire_due`] when
//! [`MountedOtp::next_deadline`] passes. The adapter never sleeps and never
//! reads a clock of its own.

mod badge;
mod component;
mod event;
mod host;
mod keyboard;
mod metadata;
mod registry;
mod schedule;
mod style;

pub use badge::{
    BADGE_MARKER_SELECTORS, BADGE_PROBE_INSET_PX, BADGE_SPACE_RATIO, BADGE_SPACE_WIDTH_PX,
    BadgeProbe, BadgeState, input_width,
};
pub use component::{MountedOtp, OtpInput};
pub use event::{EventOutcome, Key, KeyEvent, Modifiers, NativeEvent};
pub use host::{DocumentHost, ElementHost, OtpHost};
pub use keyboard::{KeyAction, plan_keydown};
pub use metadata::InputMetadata;
pub use registry::{MountRegistry, SharedRegistry, global_registry};
pub use schedule::{Task, TimerId, TimerQueue};
pub use style::{
    NOSCRIPT_CSS_FALLBACK, STYLE_ELEMENT_ID, container_style, document_style_rules,
    input_attributes, input_style,
};
