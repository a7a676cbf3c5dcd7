//! Acceptance predicate for committed values.

use crate::error::ConfigError;
use crate::text::strip_spaces;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Digits only. This is the default pattern.
pub const REGEXP_ONLY_DIGITS: &str = r"^\d+$";
/// ASCII letters only.
pub const REGEXP_ONLY_CHARS: &str = r"^[a-zA-Z]+$";
/// ASCII letters and digits.
pub const REGEXP_ONLY_DIGITS_AND_CHARS: &str = r"^[a-zA-Z0-9]+$";

/// How a pattern is specified in configuration, before compilation.
#[derive(Clone)]
pub enum PatternSpec {
    /// Accept everything.
    None,
    /// Regex source, compiled when the configuration is built.
    Source(String),
    /// An already compiled regex.
    Regex(Regex),
    /// Arbitrary predicate over the whole candidate value.
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl Default for PatternSpec {
    fn default() -> Self {
        PatternSpec::Source(REGEXP_ONLY_DIGITS.to_string())
    }
}

impl fmt::Debug for PatternSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternSpec::None => f.write_str("None"),
            PatternSpec::Source(src) => f.debug_tuple("Source").field(src).finish(),
            PatternSpec::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            PatternSpec::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<&str> for PatternSpec {
    fn from(src: &str) -> Self {
        PatternSpec::Source(src.to_string())
    }
}

impl From<Regex> for PatternSpec {
    fn from(re: Regex) -> Self {
        PatternSpec::Regex(re)
    }
}

#[derive(Clone)]
enum Matcher {
    Any,
    Regex(Regex),
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

/// Compiled acceptance predicate, immutable for the lifetime of the options.
#[derive(Clone)]
pub struct Pattern {
    matcher: Matcher,
}

impl Pattern {
    /// A pattern that accepts every value.
    pub fn none() -> Self {
        Self {
            matcher: Matcher::Any,
        }
    }

    /// Compile a regex source.
    pub fn regex(source: &str) -> Result<Self, ConfigError> {
        let re = Regex::new(source).map_err(|source_err| ConfigError::InvalidPattern {
            pattern: source.to_string(),
            source: source_err,
        })?;
        Ok(Self::from_regex(re))
    }

    pub fn from_regex(re: Regex) -> Self {
        Self {
            matcher: Matcher::Regex(re),
        }
    }

    pub fn predicate(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            matcher: Matcher::Predicate(Arc::new(f)),
        }
    }

    /// Compile a configuration-time [`PatternSpec`].
    pub fn compile(spec: &PatternSpec) -> Result<Self, ConfigError> {
        match spec {
            PatternSpec::None => Ok(Self::none()),
            PatternSpec::Source(src) => Self::regex(src),
            PatternSpec::Regex(re) => Ok(Self::from_regex(re.clone())),
            PatternSpec::Predicate(f) => Ok(Self {
                matcher: Matcher::Predicate(Arc::clone(f)),
            }),
        }
    }

    /// Regex source for the native `pattern` attribute, when there is one.
    pub fn source(&self) -> Option<&str> {
        match &self.matcher {
            Matcher::Regex(re) => Some(re.as_str()),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self.matcher, Matcher::Any)
    }

    /// Whether `value` may be committed.
    ///
    /// The empty value is always accepted. With `allow_spaces`, spaces are
    /// removed before testing and a value made only of spaces is accepted.
    pub fn accepts(&self, value: &str, allow_spaces: bool) -> bool {
        let candidate = if allow_spaces {
            strip_spaces(value)
        } else {
            Cow::Borrowed(value)
        };
        if candidate.is_empty() {
            return true;
        }
        match &self.matcher {
            Matcher::Any => true,
            Matcher::Regex(re) => re.is_match(&candidate),
            Matcher::Predicate(f) => f(&candidate),
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.matcher {
            Matcher::Any => f.write_str("Pattern(any)"),
            Matcher::Regex(re) => write!(f, "Pattern({})", re.as_str()),
            Matcher::Predicate(_) => f.write_str("Pattern(predicate)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_preset() {
        let p = Pattern::regex(REGEXP_ONLY_DIGITS).unwrap();
        assert!(p.accepts("123456", false));
        assert!(!p.accepts("12a456", false));
        assert!(p.accepts("", false));
        assert_eq!(p.source(), Some(REGEXP_ONLY_DIGITS));
    }

    #[test]
    fn chars_presets() {
        let chars = Pattern::regex(REGEXP_ONLY_CHARS).unwrap();
        assert!(chars.accepts("abcXYZ", false));
        assert!(!chars.accepts("abc1", false));

        let both = Pattern::regex(REGEXP_ONLY_DIGITS_AND_CHARS).unwrap();
        assert!(both.accepts("a1B2", false));
        assert!(!both.accepts("a1 B2", false));
    }

    #[test]
    fn spaces_are_ignored_when_allowed() {
        let p = Pattern::regex(REGEXP_ONLY_DIGITS).unwrap();
        assert!(!p.accepts("1  34", false));
        assert!(p.accepts("1  34", true));
        assert!(p.accepts("   ", true));
        assert!(!p.accepts("1 a", true));
    }

    #[test]
    fn invalid_source_is_a_config_error() {
        let err = Pattern::regex("^[0-9").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn none_and_predicate() {
        assert!(Pattern::none().accepts("anything goes", false));
        let even = Pattern::predicate(|v| v.len() % 2 == 0);
        assert!(even.accepts("12", false));
        assert!(!even.accepts("123", false));
        assert_eq!(even.source(), None);
    }

    #[test]
    fn compile_spec_default_is_digits() {
        let p = Pattern::compile(&PatternSpec::default()).unwrap();
        assert!(p.accepts("42", false));
        assert!(!p.accepts("4x", false));
    }
}
