//! Declarative interaction scenarios.
//!
//! A scenario file is TOML: a list of `[[scenario]]` tables, each with a
//! `config` table and an ordered list of `steps`. A step performs its actions
//! (`focus`, `type`, `press`, `paste`, `advance_ms`, `blur`) in that order
//! and then checks whichever `expect_*` fields it sets.
//!
//! ```toml
//! [[scenario]]
//! name = "replace selected char"
//! config = { max_length = 6 }
//! steps = [
//!   { type = "123", press = "ArrowLeft" },
//!   { type = "1", expect_value = "121" },
//! ]
//! ```

use crate::browser::Browser;
use otp_core::{
    InputMode, OtpConfig, PasswordManagerStrategy, REGEXP_ONLY_CHARS, REGEXP_ONLY_DIGITS,
    REGEXP_ONLY_DIGITS_AND_CHARS, TextAlign,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    #[serde(rename = "scenario")]
    scenarios: Vec<Scenario>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub config: ScenarioConfig,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// `digits`, `chars`, `digits-and-chars`, `none`, or a regex source.
    pub pattern: Option<String>,
    #[serde(default)]
    pub default_value: String,
    #[serde(default = "default_true")]
    pub allow_navigation: bool,
    #[serde(default)]
    pub allow_spaces: bool,
    #[serde(default)]
    pub disabled: bool,
    pub text_align: Option<TextAlign>,
    pub input_mode: Option<InputMode>,
    pub password_manager_strategy: Option<PasswordManagerStrategy>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            pattern: None,
            default_value: String::new(),
            allow_navigation: true,
            allow_spaces: false,
            disabled: false,
            text_align: None,
            input_mode: None,
            password_manager_strategy: None,
        }
    }
}

fn default_max_length() -> usize {
    6
}

fn default_true() -> bool {
    true
}

impl ScenarioConfig {
    pub fn to_config(&self) -> OtpConfig {
        let mut config = OtpConfig::new(self.max_length)
            .default_value(self.default_value.as_str())
            .allow_navigation(self.allow_navigation)
            .allow_spaces(self.allow_spaces)
            .disabled(self.disabled);
        config = match self.pattern.as_deref() {
            None | Some("digits") => config.pattern(REGEXP_ONLY_DIGITS),
            Some("chars") => config.pattern(REGEXP_ONLY_CHARS),
            Some("digits-and-chars") => config.pattern(REGEXP_ONLY_DIGITS_AND_CHARS),
            Some("none") => config.no_pattern(),
            Some(source) => config.pattern(source),
        };
        if let Some(align) = self.text_align {
            config = config.text_align(align);
        }
        if let Some(mode) = self.input_mode {
            config = config.input_mode(mode);
        }
        if let Some(strategy) = self.password_manager_strategy {
            config = config.password_manager_strategy(strategy);
        }
        config
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    #[serde(default)]
    pub focus: bool,
    #[serde(rename = "type")]
    pub type_text: Option<String>,
    pub press: Option<PressSpec>,
    pub paste: Option<String>,
    pub advance_ms: Option<u64>,
    #[serde(default)]
    pub blur: bool,

    pub expect_value: Option<String>,
    pub expect_native_value: Option<String>,
    pub expect_selected: Option<String>,
    pub expect_active_slots: Option<Vec<usize>>,
    pub expect_completions: Option<Vec<String>>,
    pub expect_focused: Option<bool>,
}

/// One chord or a sequence of chords.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum PressSpec {
    One(String),
    Many(Vec<String>),
}

impl PressSpec {
    pub fn chords(&self) -> Vec<&str> {
        match self {
            PressSpec::One(chord) => vec![chord.as_str()],
            PressSpec::Many(chords) => chords.iter().map(String::as_str).collect(),
        }
    }
}

/// Directory holding the bundled scenario fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

pub fn load_scenarios(path: &Path) -> Vec<Scenario> {
    let raw = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read scenarios {path:?}: {err}"));
    parse_scenarios(&raw)
        .unwrap_or_else(|err| panic!("failed to parse scenarios {path:?}: {err}"))
}

pub fn parse_scenarios(raw: &str) -> Result<Vec<Scenario>, toml::de::Error> {
    toml::from_str::<ScenarioFile>(raw).map(|file| file.scenarios)
}

/// Run `scenario` on a fresh mount.
///
/// # Panics
///
/// On the first unmet expectation, naming the scenario and step.
pub fn run_scenario(scenario: &Scenario) -> Browser {
    let mut browser = Browser::mount(scenario.config.to_config());
    for (idx, step) in scenario.steps.iter().enumerate() {
        let at = format!("scenario '{}' step {}", scenario.name, idx + 1);
        run_step(&mut browser, step);
        check_step(&browser, step, &at);
    }
    browser
}

fn run_step(browser: &mut Browser, step: &Step) {
    if step.focus {
        browser.focus();
    }
    if let Some(text) = &step.type_text {
        browser.type_text(text);
    }
    if let Some(press) = &step.press {
        for chord in press.chords() {
            browser.press(chord);
        }
    }
    if let Some(clipboard) = &step.paste {
        browser.paste(Some(clipboard.as_str()));
    }
    if let Some(ms) = step.advance_ms {
        browser.advance(ms);
    }
    if step.blur {
        browser.blur();
    }
}

fn check_step(browser: &Browser, step: &Step, at: &str) {
    if let Some(expected) = &step.expect_value {
        assert_eq!(&browser.value(), expected, "{at}: value");
    }
    if let Some(expected) = &step.expect_native_value {
        assert_eq!(&browser.native_value(), expected, "{at}: native value");
    }
    if let Some(expected) = &step.expect_selected {
        assert_eq!(&browser.selected_text(), expected, "{at}: selected text");
    }
    if let Some(expected) = &step.expect_active_slots {
        assert_eq!(&browser.active_slots(), expected, "{at}: active slots");
    }
    if let Some(expected) = &step.expect_completions {
        assert_eq!(&browser.completions(), expected, "{at}: completions");
    }
    if let Some(expected) = step.expect_focused {
        assert_eq!(browser.otp().is_focused(), expected, "{at}: focused");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inline_steps() {
        let scenarios = parse_scenarios(
            r#"
            [[scenario]]
            name = "x"
            config = { max_length = 4, pattern = "none", password_manager_strategy = "none" }
            steps = [
              { type = "ab", press = ["ArrowLeft", "Shift+ArrowLeft"] },
              { expect_value = "ab" },
            ]
            "#,
        )
        .unwrap();
        assert_eq!(scenarios.len(), 1);
        let scenario = &scenarios[0];
        assert_eq!(scenario.config.max_length, 4);
        assert_eq!(
            scenario.config.password_manager_strategy,
            Some(PasswordManagerStrategy::None)
        );
        assert_eq!(
            scenario.steps[0].press.as_ref().map(PressSpec::chords),
            Some(vec!["ArrowLeft", "Shift+ArrowLeft"])
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = parse_scenarios(
            r#"
            [[scenario]]
            name = "x"
            steps = [{ typo = "1" }]
            "#,
        );
        assert!(err.is_err());
    }
}
