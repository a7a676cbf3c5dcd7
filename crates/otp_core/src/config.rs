//! Component configuration.
//!
//! [`OtpConfig`] is a consuming builder. [`OtpConfig::build`] validates it and
//! compiles the pattern into an immutable [`OtpOptions`].

use crate::error::ConfigError;
use crate::normalize::NormalizeOptions;
use crate::paste::PasteTransformer;
use crate::pattern::{Pattern, PatternSpec};
use std::fmt;
use std::time::Duration;

/// What to do when a password-manager badge overlays the last slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum PasswordManagerStrategy {
    /// Widen the native input so the badge lands outside the slots.
    #[default]
    IncreaseWidth,
    /// Leave the layout alone.
    None,
}

impl PasswordManagerStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            PasswordManagerStrategy::IncreaseWidth => "increase-width",
            PasswordManagerStrategy::None => "none",
        }
    }
}

/// `text-align` of the transparent native input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// The `inputmode` attribute, which picks the virtual keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum InputMode {
    #[default]
    Numeric,
    Text,
    Decimal,
    Tel,
    Search,
    Email,
    Url,
    None,
}

impl InputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InputMode::Numeric => "numeric",
            InputMode::Text => "text",
            InputMode::Decimal => "decimal",
            InputMode::Tel => "tel",
            InputMode::Search => "search",
            InputMode::Email => "email",
            InputMode::Url => "url",
            InputMode::None => "none",
        }
    }
}

/// Delays of the scheduled re-checks.
///
/// Browsers update the native selection at slightly different moments after
/// an edit, so a sync is repeated at each of `settle_delays`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timings {
    pub settle_delays: Vec<Duration>,
    pub focus_poll_interval: Duration,
    pub focus_settle: Duration,
    pub double_click_window: Duration,
    pub touch_resync: Duration,
    pub autofill_refresh: Duration,
    pub initial_sync: Duration,
    pub badge_probe_delays: Vec<Duration>,
}

impl Default for Timings {
    fn default() -> Self {
        let ms = Duration::from_millis;
        Self {
            settle_delays: vec![ms(0), ms(10), ms(50)],
            focus_poll_interval: ms(50),
            focus_settle: ms(50),
            double_click_window: ms(300),
            touch_resync: ms(50),
            autofill_refresh: ms(100),
            initial_sync: ms(20),
            badge_probe_delays: vec![ms(200), ms(1000), ms(2000), ms(5000)],
        }
    }
}

/// Builder for [`OtpOptions`].
#[derive(Clone)]
pub struct OtpConfig {
    max_length: usize,
    controlled_value: Option<String>,
    default_value: String,
    pattern: PatternSpec,
    allow_navigation: bool,
    allow_spaces: bool,
    disabled: bool,
    text_align: TextAlign,
    input_mode: InputMode,
    password_manager_strategy: PasswordManagerStrategy,
    paste_transformer: Option<PasteTransformer>,
    timings: Timings,
    normalize: NormalizeOptions,
}

impl OtpConfig {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            controlled_value: None,
            default_value: String::new(),
            pattern: PatternSpec::default(),
            allow_navigation: true,
            allow_spaces: false,
            disabled: false,
            text_align: TextAlign::default(),
            input_mode: InputMode::default(),
            password_manager_strategy: PasswordManagerStrategy::default(),
            paste_transformer: None,
            timings: Timings::default(),
            normalize: NormalizeOptions::default(),
        }
    }

    /// Make the value externally owned, starting at `value`.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.controlled_value = Some(value.into());
        self
    }

    /// Initial value of an internally owned store.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn pattern(mut self, pattern: impl Into<PatternSpec>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Accept any value.
    pub fn no_pattern(mut self) -> Self {
        self.pattern = PatternSpec::None;
        self
    }

    pub fn pattern_fn(mut self, f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.pattern = PatternSpec::Predicate(std::sync::Arc::new(f));
        self
    }

    pub fn allow_navigation(mut self, allow: bool) -> Self {
        self.allow_navigation = allow;
        self
    }

    pub fn allow_spaces(mut self, allow: bool) -> Self {
        self.allow_spaces = allow;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn text_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    pub fn input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }

    pub fn password_manager_strategy(mut self, strategy: PasswordManagerStrategy) -> Self {
        self.password_manager_strategy = strategy;
        self
    }

    pub fn paste_transformer(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.paste_transformer = Some(std::sync::Arc::new(f));
        self
    }

    pub fn timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn normalize_options(mut self, opts: NormalizeOptions) -> Self {
        self.normalize = opts;
        self
    }

    /// Validate and compile.
    pub fn build(self) -> Result<OtpOptions, ConfigError> {
        if self.max_length == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }
        let pattern = Pattern::compile(&self.pattern)?;
        Ok(OtpOptions {
            max_length: self.max_length,
            controlled_value: self.controlled_value,
            default_value: self.default_value,
            pattern,
            allow_navigation: self.allow_navigation,
            allow_spaces: self.allow_spaces,
            disabled: self.disabled,
            text_align: self.text_align,
            input_mode: self.input_mode,
            password_manager_strategy: self.password_manager_strategy,
            paste_transformer: self.paste_transformer,
            timings: self.timings,
            normalize: self.normalize,
        })
    }
}

impl fmt::Debug for OtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpConfig")
            .field("max_length", &self.max_length)
            .field("controlled_value", &self.controlled_value)
            .field("pattern", &self.pattern)
            .field("allow_navigation", &self.allow_navigation)
            .finish_non_exhaustive()
    }
}

/// Validated, immutable options.
#[derive(Clone)]
pub struct OtpOptions {
    pub max_length: usize,
    /// `Some` when the value is owned by the consumer.
    pub controlled_value: Option<String>,
    pub default_value: String,
    pub pattern: Pattern,
    pub allow_navigation: bool,
    pub allow_spaces: bool,
    pub disabled: bool,
    pub text_align: TextAlign,
    pub input_mode: InputMode,
    pub password_manager_strategy: PasswordManagerStrategy,
    pub paste_transformer: Option<PasteTransformer>,
    pub timings: Timings,
    pub normalize: NormalizeOptions,
}

impl OtpOptions {
    #[inline]
    pub fn is_controlled(&self) -> bool {
        self.controlled_value.is_some()
    }

    /// The value the store starts with.
    pub fn initial_value(&self) -> &str {
        self.controlled_value
            .as_deref()
            .unwrap_or(&self.default_value)
    }
}

impl fmt::Debug for OtpOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpOptions")
            .field("max_length", &self.max_length)
            .field("controlled_value", &self.controlled_value)
            .field("default_value", &self.default_value)
            .field("pattern", &self.pattern)
            .field("allow_navigation", &self.allow_navigation)
            .field("allow_spaces", &self.allow_spaces)
            .field("disabled", &self.disabled)
            .field("password_manager_strategy", &self.password_manager_strategy)
            .field("paste_transformer", &self.paste_transformer.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = OtpConfig::new(6).build().unwrap();
        assert_eq!(opts.max_length, 6);
        assert!(opts.allow_navigation);
        assert!(!opts.is_controlled());
        assert_eq!(opts.initial_value(), "");
        assert_eq!(opts.input_mode.as_str(), "numeric");
        assert_eq!(opts.pattern.source(), Some(crate::REGEXP_ONLY_DIGITS));
        assert_eq!(opts.timings.settle_delays.len(), 3);
    }

    #[test]
    fn zero_max_length_is_rejected() {
        assert!(matches!(
            OtpConfig::new(0).build(),
            Err(ConfigError::ZeroMaxLength)
        ));
    }

    #[test]
    fn bad_pattern_is_rejected() {
        let err = OtpConfig::new(4).pattern("(").build().unwrap_err();
        assert!(err.to_string().contains("invalid pattern"));
    }

    #[test]
    fn controlled_value_wins_over_default() {
        let opts = OtpConfig::new(4)
            .default_value("11")
            .value("22")
            .build()
            .unwrap();
        assert!(opts.is_controlled());
        assert_eq!(opts.initial_value(), "22");
    }

    #[test]
    fn strategy_spelling() {
        assert_eq!(PasswordManagerStrategy::IncreaseWidth.as_str(), "increase-width");
        assert_eq!(TextAlign::Center.as_str(), "center");
    }
}
