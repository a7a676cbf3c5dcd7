use otp_input::{OtpConfig, REGEXP_ONLY_DIGITS_AND_CHARS, TextAlign};
use otp_test_support::Browser;

#[test]
fn fill_a_four_slot_code() {
    let mut browser = Browser::mount(OtpConfig::new(4).text_align(TextAlign::Center));
    browser.focus();
    browser.type_text("12a34");

    assert_eq!(browser.value(), "1234");
    assert_eq!(browser.completions(), vec!["1234".to_string()]);
    assert_eq!(browser.active_slots(), vec![3]);
    assert_eq!(browser.input_style("text-align").as_deref(), Some("center"));

    let state = browser.render_state();
    let chars: String = state.slots.iter().filter_map(|slot| slot.char).collect();
    assert_eq!(chars, "1234");
    assert_eq!(state.fake_caret(), None);
}

#[test]
fn alphanumeric_preset() {
    let mut browser = Browser::mount(OtpConfig::new(6).pattern(REGEXP_ONLY_DIGITS_AND_CHARS));
    browser.focus();
    browser.type_text("ab-12");

    assert_eq!(browser.value(), "ab12");
    assert!(browser.completions().is_empty());
    assert_eq!(browser.render_state().fake_caret(), Some(4));
}
