//! Component options as they arrive from JavaScript.
//!
//! Enumerated options come in as their DOM spellings and are parsed here, so
//! a typo in page code surfaces as an error at mount time instead of a
//! silently ignored attribute.

use otp_core::{InputMode, OtpConfig, PasswordManagerStrategy, TextAlign};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("unknown {option} `{value}`")]
    UnknownValue {
        option: &'static str,
        value: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebOptions {
    pub max_length: usize,
    /// Controlled value. The page must echo accepted changes back.
    pub value: Option<String>,
    pub default_value: String,
    /// Regex source. `None` keeps the digits-only default, an empty string
    /// accepts everything.
    pub pattern: Option<String>,
    pub allow_navigation: bool,
    pub allow_spaces: bool,
    pub disabled: bool,
    pub text_align: String,
    pub input_mode: String,
    pub password_manager_strategy: String,
}

impl WebOptions {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            value: None,
            default_value: String::new(),
            pattern: None,
            allow_navigation: true,
            allow_spaces: false,
            disabled: false,
            text_align: TextAlign::default().as_str().to_string(),
            input_mode: InputMode::default().as_str().to_string(),
            password_manager_strategy: PasswordManagerStrategy::default().as_str().to_string(),
        }
    }

    /// Build the core configuration. Pattern compilation and length checks
    /// happen later, in [`OtpConfig::build`].
    pub fn to_config(&self) -> Result<OtpConfig, OptionError> {
        let mut config = OtpConfig::new(self.max_length)
            .default_value(self.default_value.as_str())
            .allow_navigation(self.allow_navigation)
            .allow_spaces(self.allow_spaces)
            .disabled(self.disabled)
            .text_align(parse_text_align(&self.text_align)?)
            .input_mode(parse_input_mode(&self.input_mode)?)
            .password_manager_strategy(parse_strategy(&self.password_manager_strategy)?);
        if let Some(value) = &self.value {
            config = config.value(value.as_str());
        }
        match self.pattern.as_deref() {
            None => {}
            Some("") => config = config.no_pattern(),
            Some(source) => config = config.pattern(source),
        }
        Ok(config)
    }
}

fn parse_text_align(raw: &str) -> Result<TextAlign, OptionError> {
    [TextAlign::Left, TextAlign::Center, TextAlign::Right]
        .into_iter()
        .find(|align| align.as_str() == raw)
        .ok_or_else(|| unknown("textAlign", raw))
}

fn parse_input_mode(raw: &str) -> Result<InputMode, OptionError> {
    [
        InputMode::Numeric,
        InputMode::Text,
        InputMode::Decimal,
        InputMode::Tel,
        InputMode::Search,
        InputMode::Email,
        InputMode::Url,
        InputMode::None,
    ]
    .into_iter()
    .find(|mode| mode.as_str() == raw)
    .ok_or_else(|| unknown("inputMode", raw))
}

fn parse_strategy(raw: &str) -> Result<PasswordManagerStrategy, OptionError> {
    [
        PasswordManagerStrategy::IncreaseWidth,
        PasswordManagerStrategy::None,
    ]
    .into_iter()
    .find(|strategy| strategy.as_str() == raw)
    .ok_or_else(|| unknown("pushPasswordManagerStrategy", raw))
}

fn unknown(option: &'static str, value: &str) -> OptionError {
    OptionError::UnknownValue {
        option,
        value: value.to_string(),
    }
}
