//! Styling applied to the document, the container and the native input.
//!
//! The native input stays in the layout but is drawn fully transparent on top
//! of the consumer's slots. A handful of document rules hide what inline
//! styles cannot reach: the selection highlight and autofill backgrounds.

use crate::badge::input_width;
use otp_core::OtpOptions;

/// `id` of the injected `<style>` element.
pub const STYLE_ELEMENT_ID: &str = "input-otp-style";

const AUTOFILL_RESET: &str = "background: transparent !important; \
     color: transparent !important; \
     border-color: transparent !important; \
     opacity: 0 !important; \
     box-shadow: none !important; \
     -webkit-box-shadow: none !important; \
     -webkit-text-fill-color: transparent !important;";

/// Rules inserted into the shared style element, in order.
pub fn document_style_rules() -> Vec<String> {
    vec![
        "[data-input-otp]::selection { background: transparent !important; color: transparent !important; }"
            .to_string(),
        format!("[data-input-otp]:autofill {{ {AUTOFILL_RESET} }}"),
        format!("[data-input-otp]:-webkit-autofill {{ {AUTOFILL_RESET} }}"),
        "@supports (-webkit-touch-callout: none) { [data-input-otp] { letter-spacing: -.6em !important; \
         font-weight: 100 !important; font-stretch: ultra-condensed; font-optical-sizing: none !important; \
         left: -1px !important; right: 1px !important; } }"
            .to_string(),
        "[data-input-otp] + * { pointer-events: all !important; }".to_string(),
    ]
}

/// Fallback for pages rendered without scripting, meant for a `<noscript>`
/// style block: the native input becomes a plain visible text field.
pub const NOSCRIPT_CSS_FALLBACK: &str = r#"
[data-input-otp] {
  --nojs-bg: white !important;
  --nojs-fg: black !important;

  background-color: var(--nojs-bg) !important;
  color: var(--nojs-fg) !important;
  caret-color: var(--nojs-fg) !important;
  letter-spacing: .25em !important;
  text-align: center !important;
  border: 1px solid var(--nojs-fg) !important;
  border-radius: 4px !important;
  width: 100% !important;
}
@media (prefers-color-scheme: dark) {
  [data-input-otp] {
    --nojs-bg: black !important;
    --nojs-fg: white !important;
  }
}"#;

/// Attributes of the native input. `None` removes the attribute.
pub fn input_attributes(opts: &OtpOptions) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("data-input-otp", Some(String::new())),
        ("autocomplete", Some("one-time-code".to_string())),
        ("inputmode", Some(opts.input_mode.as_str().to_string())),
        ("maxlength", Some(opts.max_length.to_string())),
        ("pattern", opts.pattern.source().map(str::to_string)),
        ("disabled", opts.disabled.then(String::new)),
        ("spellcheck", Some("false".to_string())),
    ]
}

/// Inline style of the native input.
pub fn input_style(opts: &OtpOptions, will_push_badge: bool) -> Vec<(&'static str, String)> {
    let fixed = [
        ("position", "absolute"),
        ("inset", "0"),
        ("height", "100%"),
        ("display", "flex"),
        // iOS needs an opaque input for hold-to-paste.
        ("opacity", "1"),
        ("color", "transparent"),
        ("pointer-events", "all"),
        ("background", "transparent"),
        ("caret-color", "transparent"),
        ("border", "0 solid transparent"),
        ("outline", "0 solid transparent"),
        ("box-shadow", "none"),
        ("line-height", "1"),
        ("letter-spacing", "-.5em"),
        ("font-size", "var(--root-height)"),
        ("font-family", "monospace"),
        ("font-variant-numeric", "tabular-nums"),
    ];
    let mut style: Vec<(&'static str, String)> = fixed
        .iter()
        .map(|(name, value)| (*name, (*value).to_string()))
        .collect();
    style.push(("width", input_width(will_push_badge)));
    style.push(("text-align", opts.text_align.as_str().to_string()));
    style
}

/// Inline style of the container.
pub fn container_style(opts: &OtpOptions) -> Vec<(&'static str, &'static str)> {
    vec![
        ("position", "relative"),
        ("cursor", if opts.disabled { "default" } else { "text" }),
        ("user-select", "none"),
        ("-webkit-user-select", "none"),
        ("pointer-events", "none"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use otp_core::{OtpConfig, TextAlign};

    fn opts(config: OtpConfig) -> OtpOptions {
        config.build().unwrap()
    }

    #[test]
    fn rules_cover_selection_autofill_and_badges() {
        let rules = document_style_rules();
        assert_eq!(rules.len(), 5);
        assert!(rules[0].contains("::selection"));
        assert!(rules[1].contains(":autofill"));
        assert!(rules[2].contains(":-webkit-autofill"));
        assert!(rules[3].starts_with("@supports (-webkit-touch-callout: none)"));
        assert!(rules[4].contains("pointer-events: all"));
    }

    #[test]
    fn attributes_follow_options() {
        let attrs = input_attributes(&opts(OtpConfig::new(4).no_pattern().disabled(true)));
        let get = |name: &str| attrs.iter().find(|(n, _)| *n == name).unwrap().1.clone();
        assert_eq!(get("maxlength").as_deref(), Some("4"));
        assert_eq!(get("pattern"), None);
        assert_eq!(get("disabled").as_deref(), Some(""));
        assert_eq!(get("autocomplete").as_deref(), Some("one-time-code"));
        assert_eq!(get("inputmode").as_deref(), Some("numeric"));
    }

    #[test]
    fn style_tracks_badge_and_alignment() {
        let o = opts(OtpConfig::new(6).text_align(TextAlign::Center));
        let style = input_style(&o, true);
        let get = |name: &str| style.iter().find(|(n, _)| *n == name).unwrap().1.clone();
        assert_eq!(get("width"), "calc(100% + 40px)");
        assert_eq!(get("text-align"), "center");
        assert_eq!(get("font-size"), "var(--root-height)");
    }

    #[test]
    fn noscript_fallback_targets_the_input() {
        assert!(NOSCRIPT_CSS_FALLBACK.contains("[data-input-otp]"));
        assert!(NOSCRIPT_CSS_FALLBACK.contains("prefers-color-scheme: dark"));
    }
}
