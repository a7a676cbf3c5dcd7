//! Error types.
//!
//! Rejected keystrokes and pastes are not errors: they are reported through
//! [`CommitOutcome`](crate::CommitOutcome) and
//! [`PasteOutcome`](crate::PasteOutcome). Only configuration and host
//! primitives fail with a `Result`.

use thiserror::Error;

/// Invalid component configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_length must be greater than zero")]
    ZeroMaxLength,
    #[error("invalid pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure of a best-effort host primitive (style injection, layout probes).
///
/// The event adapter logs these and carries on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("style rule rejected: {rule}")]
    StyleRuleRejected { rule: String },
    #[error("host API unavailable: {api}")]
    Unavailable { api: &'static str },
}
