//! # otp_input
//!
//! One-time-password input built on a single native text input.
//!
//! The native input stays invisible on top of a row of consumer-drawn slots.
//! The adapter keeps its caret normalized to one slot, validates every value
//! against a pattern, and hands each render a [`RenderState`] describing the
//! slots.
//!
//! ```no_run
//! use otp_input::{Instant, OtpConfig, OtpHost, OtpInput, REGEXP_ONLY_DIGITS};
//!
//! fn mount<H: OtpHost>(host: H) -> Result<(), otp_input::ConfigError> {
//!     let otp = OtpInput::create(OtpConfig::new(6).pattern(REGEXP_ONLY_DIGITS))?
//!         .on_complete(|code| println!("code: {code}"))
//!         .on_render(|state| println!("active: {:?}", state.active_slots()));
//!     let mounted = otp.mount(host, Instant::now());
//!     mounted.unmount();
//!     Ok(())
//! }
//! ```
//!
//! The state layer lives in `otp_core`, the event adapter in `otp_events`,
//! and the browser binding in `otp_web`.

pub use otp_core::{
    Clock, CommitOutcome, CompletionNotifier, ConfigError, HostError, InputMode, Instant, MountId,
    NativeInput, NormalizeOptions, Normalized, OtpConfig, OtpOptions, PasswordManagerStrategy,
    PasteOutcome, PasteRequest, Pattern, PatternSpec, REGEXP_ONLY_CHARS, REGEXP_ONLY_DIGITS,
    REGEXP_ONLY_DIGITS_AND_CHARS, RawSelection, RenderState, SelectionDirection, SelectionKind,
    SelectionRange, SlotProps, SystemClock, TextAlign, Timings, normalize, normalize_with,
    splice_paste,
};
pub use otp_events::{
    BadgeProbe, DocumentHost, ElementHost, EventOutcome, Key, KeyEvent, Modifiers, MountedOtp,
    NOSCRIPT_CSS_FALLBACK, NativeEvent, OtpHost, OtpInput, STYLE_ELEMENT_ID, global_registry,
};
