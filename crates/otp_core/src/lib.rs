//! # otp_core
//!
//! UI-agnostic state layer of the one-time-password input.
//!
//! A single native text input backs a row of `max_length` slots. This crate
//! holds everything about that model that does not touch the DOM:
//! - [`normalize`]: turns the native caret into a one-cell selection
//! - [`ValueStore`]: the only place a value is committed, after truncation
//!   and [`Pattern`] validation
//! - [`CompletionNotifier`]: fires once per fill
//! - [`splice_paste`]: clipboard splicing and validation
//! - [`RenderState`]: the per-slot flags handed to the render callback
//! - [`NativeInput`]: the host trait the event adapter drives
//!
//! ## Design Principles
//!
//! This crate does not depend on `web-sys` or any event loop. Everything in
//! it is deterministic given its inputs and is tested without a browser.
//!
//! All offsets are character indices.

mod clock;
mod completion;
mod config;
mod error;
mod id;
mod normalize;
mod paste;
mod pattern;
mod selection;
mod slots;
mod text;
mod traits;
mod value;

pub use clock::{Clock, Instant, SystemClock};
pub use completion::CompletionNotifier;
pub use config::{
    InputMode, OtpConfig, OtpOptions, PasswordManagerStrategy, TextAlign, Timings,
};
pub use error::{ConfigError, HostError};
pub use id::MountId;
pub use normalize::{NormalizeOptions, Normalized, is_insert_position, normalize, normalize_with};
pub use paste::{PasteOutcome, PasteRequest, PasteTransformer, splice_paste};
pub use pattern::{
    Pattern, PatternSpec, REGEXP_ONLY_CHARS, REGEXP_ONLY_DIGITS, REGEXP_ONLY_DIGITS_AND_CHARS,
};
pub use selection::{RawSelection, SelectionDirection, SelectionKind, SelectionRange};
pub use slots::{RenderState, SlotProps};
pub use traits::{NativeInput, NativeInputExt};
pub use value::{CommitOutcome, ValueStore};

// Character-index helpers, shared with the event adapter and the test host.
pub use text::{
    byte_offset, char_at, char_len, filter_single_line, slice_chars, splice_chars, strip_spaces,
    truncate_chars,
};
