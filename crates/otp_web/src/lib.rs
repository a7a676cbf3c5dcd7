//! # otp_web
//!
//! Browser binding of the one-time-password input.
//!
//! On `wasm32` this crate exports `OtpWeb`, which mounts the adapter on an
//! existing container and `<input>`, forwards DOM events to it, drives its
//! timers with a single `setTimeout`, and hands render states to a
//! JavaScript callback:
//!
//! ```js
//! const options = new OtpWebOptions(6);
//! options.textAlign = "center";
//! const otp = new OtpWeb(container, input, options, onChange, onComplete, render);
//! // ...
//! otp.free();
//! ```
//!
//! Option parsing and DOM event translation are target independent and
//! tested natively.

#![forbid(unsafe_code)]

mod options;
mod translate;
#[cfg(target_arch = "wasm32")]
mod web;

pub use options::{OptionError, WebOptions};
pub use translate::{
    INPUT_EVENTS, SELECTION_CHANGE, char_to_utf16, key_event, simple_event, utf16_to_char,
};
#[cfg(target_arch = "wasm32")]
pub use web::{OtpWeb, OtpWebOptions, WebHost, init_logging};
