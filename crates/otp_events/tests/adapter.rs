use otp_core::{
    ConfigError, OtpConfig, PasswordManagerStrategy, RawSelection, SelectionDirection, char_len,
};
use otp_events::{BadgeProbe, MountRegistry, STYLE_ELEMENT_ID};
use otp_test_support::{Browser, FakeDom, render_snapshot};

fn six() -> OtpConfig {
    OtpConfig::new(6)
}

// =============================================================================
// Mounting and styles
// =============================================================================

#[test]
fn mount_publishes_input_and_container_state() {
    let browser = Browser::mount(six());

    assert_eq!(browser.input_attribute("maxlength").as_deref(), Some("6"));
    assert_eq!(browser.input_attribute("inputmode").as_deref(), Some("numeric"));
    assert_eq!(
        browser.input_attribute("autocomplete").as_deref(),
        Some("one-time-code")
    );
    assert_eq!(browser.input_attribute("data-input-otp").as_deref(), Some(""));
    assert_eq!(browser.input_attribute("disabled"), None);
    assert_eq!(browser.input_style("width").as_deref(), Some("100%"));
    assert_eq!(browser.input_style("text-align").as_deref(), Some("left"));

    assert_eq!(
        browser.container_attribute("data-input-otp-container").as_deref(),
        Some("")
    );
    assert_eq!(browser.container_attribute("data-sel").as_deref(), Some("-1,-1"));
    assert_eq!(browser.container_attribute("data-is-focused"), None);
    assert_eq!(browser.container_style("--root-height").as_deref(), Some("40px"));
    assert_eq!(browser.container_style("cursor").as_deref(), Some("text"));
}

#[test]
fn default_value_is_written_to_the_native_input() {
    let browser = Browser::mount(six().default_value("12"));
    assert_eq!(browser.value(), "12");
    assert_eq!(browser.native_value(), "12");
    assert!(browser.completions().is_empty());
}

#[test]
fn full_default_value_does_not_complete() {
    let mut browser = Browser::mount(six().default_value("123456"));
    browser.focus();
    browser.advance(500);
    assert!(browser.completions().is_empty());
}

#[test]
fn disabled_input() {
    let mut browser = Browser::mount(six().disabled(true));
    assert_eq!(browser.input_attribute("disabled").as_deref(), Some(""));
    assert_eq!(browser.container_style("cursor").as_deref(), Some("default"));

    browser.hover();
    assert!(!browser.otp().is_hovering());
    assert_eq!(browser.container_attribute("data-is-hovering"), None);
}

#[test]
fn style_element_is_shared_and_removed_with_the_last_mount() {
    let registry = MountRegistry::new_shared();
    let dom = FakeDom::shared();

    let first = Browser::mount_with(six(), registry.clone(), dom.clone());
    let second = Browser::mount_with(OtpConfig::new(4), registry.clone(), dom.clone());
    assert_ne!(first.otp().id(), second.otp().id());
    assert_eq!(registry.borrow().live_mounts(), 2);
    assert_eq!(
        dom.borrow().style_rules(STYLE_ELEMENT_ID).map(<[String]>::len),
        Some(5)
    );

    first.unmount();
    assert_eq!(registry.borrow().live_mounts(), 1);
    assert!(dom.borrow().style_rules(STYLE_ELEMENT_ID).is_some());

    second.unmount();
    assert_eq!(registry.borrow().live_mounts(), 0);
    assert!(dom.borrow().style_rules(STYLE_ELEMENT_ID).is_none());
}

#[test]
fn rejected_style_rule_keeps_the_others() {
    let registry = MountRegistry::new_shared();
    let dom = FakeDom::shared();
    dom.borrow_mut()
        .rejected_rule_fragments
        .push(":autofill {".to_string());

    let _browser = Browser::mount_with(six(), registry.clone(), dom.clone());
    assert!(registry.borrow().style_installed());
    let dom = dom.borrow();
    let rules = dom
        .style_rules(STYLE_ELEMENT_ID)
        .expect("style element installed");
    assert_eq!(rules.len(), 4);
    assert!(rules.iter().all(|rule| !rule.contains(":autofill {")));
}

#[test]
fn touch_callout_marks_ios() {
    let dom = FakeDom::shared();
    dom.borrow_mut().touch_callout = true;
    let browser = Browser::mount_with(six(), MountRegistry::new_shared(), dom);
    assert!(browser.otp().is_ios());

    assert!(!Browser::mount(six()).otp().is_ios());
}

// =============================================================================
// Focus, hover and layout
// =============================================================================

#[test]
fn focus_and_blur_publish_container_attributes() {
    let mut browser = Browser::mount(six());

    browser.focus();
    assert!(browser.otp().is_focused());
    assert_eq!(browser.container_attribute("data-is-focused").as_deref(), Some("true"));
    assert_eq!(browser.container_attribute("data-sel").as_deref(), Some("0,0"));
    assert_eq!(browser.active_slots(), vec![0]);
    assert_eq!(browser.render_state().fake_caret(), Some(0));

    browser.blur();
    assert!(!browser.otp().is_focused());
    assert_eq!(browser.container_attribute("data-is-focused"), None);
    assert_eq!(browser.container_attribute("data-sel").as_deref(), Some("-1,-1"));
    assert!(browser.active_slots().is_empty());
}

#[test]
fn focus_on_a_full_value_highlights_the_last_cell() {
    let mut browser = Browser::mount(six().default_value("123456"));
    browser.focus();
    assert_eq!(browser.selection(), RawSelection::new(5, 6, SelectionDirection::None));
    assert_eq!(browser.active_slots(), vec![5]);
}

#[test]
fn hover_and_leave() {
    let mut browser = Browser::mount(six());
    browser.hover();
    assert!(browser.render_state().is_hovering);
    assert_eq!(browser.container_attribute("data-is-hovering").as_deref(), Some("true"));
    browser.leave();
    assert!(!browser.render_state().is_hovering);
    assert_eq!(browser.container_attribute("data-is-hovering"), None);
}

#[test]
fn resize_updates_root_height() {
    let mut browser = Browser::mount(six());
    browser.resize(52.0);
    assert_eq!(browser.container_style("--root-height").as_deref(), Some("52px"));
}

#[test]
fn poll_picks_up_silent_selection_moves() {
    let mut browser = Browser::mount(six());
    browser.type_text("1234");
    let dom = browser.dom();
    {
        let mut dom = dom.borrow_mut();
        dom.selection_start = 1;
        dom.selection_end = 1;
    }
    browser.advance(60);
    assert_eq!(browser.active_slots(), vec![1]);
    assert_eq!(browser.selected_text(), "2");
}

#[test]
fn poll_notices_focus_lost_without_blur() {
    let mut browser = Browser::mount(six());
    browser.type_text("12");
    browser.steal_focus_silently();
    browser.advance(60);
    assert!(!browser.otp().is_focused());
    assert!(browser.otp().mirror().is_none());
}

#[test]
fn touch_end_resyncs_after_a_delay() {
    let mut browser = Browser::mount(six());
    browser.type_text("123");
    browser.advance(100);
    let dom = browser.dom();
    {
        let mut dom = dom.borrow_mut();
        dom.selection_start = 0;
        dom.selection_end = 0;
    }
    browser.touch_end();
    browser.advance(50);
    assert_eq!(browser.selected_text(), "1");
    assert_eq!(browser.active_slots(), vec![0]);
}

// =============================================================================
// Values
// =============================================================================

#[test]
fn on_change_sees_accepted_values_only() {
    let mut browser = Browser::mount(six());
    browser.type_text("1a2");
    assert_eq!(browser.changes(), vec!["1", "12"]);
    assert_eq!(browser.native_value(), "12");
}

#[test]
fn rejected_input_restores_the_previous_selection() {
    let mut browser = Browser::mount(six());
    browser.type_text("12");
    browser.select_native(0, 1);
    browser.type_text("x");
    assert_eq!(browser.value(), "12");
    assert_eq!(browser.native_value(), "12");
    assert_eq!(browser.selected_text(), "1");
}

#[test]
fn completion_fires_once_per_fill() {
    let mut browser = Browser::mount(six());
    browser.type_text("123456");
    browser.type_text("7");
    assert_eq!(browser.value(), "123457");
    assert_eq!(browser.completions(), vec!["123456"]);

    browser.press("Backspace");
    assert_eq!(browser.value(), "12345");
    browser.type_text("9");
    assert_eq!(browser.completions(), vec!["123456", "123459"]);
}

#[test]
fn deleting_in_place_resyncs_the_highlight() {
    let mut browser = Browser::mount(six());
    browser.type_text("1234");
    let dom = browser.dom();
    {
        let mut dom = dom.borrow_mut();
        dom.selection_start = 1;
        dom.selection_end = 1;
    }
    browser.press("Delete");
    assert_eq!(browser.value(), "134");
    assert_eq!(browser.active_slots(), vec![1]);
}

#[test]
fn autofill_refresh_does_not_feed_itself() {
    let mut browser = Browser::mount(six());
    browser.type_text("12");
    browser.advance(1_000);
    assert_eq!(browser.changes(), vec!["1", "12"]);
    assert_eq!(browser.value(), "12");
    assert!(browser.otp().next_deadline().is_some(), "focus poll keeps running");
}

#[test]
fn render_callback_tracks_the_value() {
    let mut browser = Browser::mount(six());
    let after_mount = browser.render_count();
    assert!(after_mount >= 1);

    browser.type_text("7");
    assert!(browser.render_count() > after_mount);
    let last = browser.last_render().expect("rendered");
    assert_eq!(last.slots[0].char, Some('7'));
    assert_eq!(last, browser.render_state(), "{}", render_snapshot(&last));
}

// =============================================================================
// Controlled mode
// =============================================================================

#[test]
fn controlled_value_waits_for_the_owner() {
    let mut browser = Browser::mount(six().value(""));
    browser.type_text("1");
    assert_eq!(browser.changes(), vec!["1"]);
    assert_eq!(browser.value(), "");
    assert_eq!(browser.native_value(), "1");
    assert_eq!(browser.render_state().slots[0].char, None);

    browser.set_value("1");
    assert_eq!(browser.value(), "1");
    assert_eq!(browser.render_state().slots[0].char, Some('1'));
}

#[test]
fn controlled_owner_can_refuse_a_proposal() {
    let mut browser = Browser::mount(six().value("1"));
    browser.type_text("2");
    assert_eq!(browser.native_value(), "12");

    browser.set_value("1");
    assert_eq!(browser.value(), "1");
    assert_eq!(browser.native_value(), "1");
}

#[test]
fn echoing_owner_behaves_like_uncontrolled() {
    let mut browser = Browser::mount_controlled(six().value(""));
    browser.type_text("123456");
    assert_eq!(browser.value(), "123456");
    assert_eq!(browser.completions(), vec!["123456"]);
}

#[test]
fn owner_value_is_truncated() {
    let mut browser = Browser::mount(six().value(""));
    browser.set_value("123456789");
    assert_eq!(browser.value(), "123456");
    assert_eq!(browser.native_value(), "123456");
    assert_eq!(browser.completions(), vec!["123456"]);
}

// =============================================================================
// Paste
// =============================================================================

#[test]
fn paste_without_clipboard_data_is_left_alone() {
    let mut browser = Browser::mount(six());
    let outcome = browser.paste(None);
    assert!(!outcome.prevent_default);
    assert_eq!(browser.value(), "");
}

#[test]
fn paste_failing_the_pattern_is_discarded() {
    let mut browser = Browser::mount(six());
    browser.type_text("12");
    let outcome = browser.paste(Some("abc"));
    assert!(outcome.prevent_default);
    assert_eq!(browser.value(), "12");
    assert_eq!(browser.native_value(), "12");
}

#[test]
fn paste_replaces_the_selection() {
    let mut browser = Browser::mount(six());
    browser.type_text("1234");
    browser.select_native(1, 3);
    browser.paste(Some("9"));
    assert_eq!(browser.value(), "194");
    assert_eq!(browser.selection(), RawSelection::new(3, 3, SelectionDirection::None));
    assert_eq!(browser.active_slots(), vec![3]);
}

#[test]
fn paste_transformer_runs_first() {
    let mut browser = Browser::mount(six().paste_transformer(|raw| raw.replace('-', "")));
    browser.paste(Some("12-34-56"));
    assert_eq!(browser.value(), "123456");
    assert_eq!(browser.selected_text(), "6");

    let mut plain = Browser::mount(six());
    plain.paste(Some("12-34-56"));
    assert_eq!(plain.value(), "");
}

#[test]
fn paste_keeps_a_single_line() {
    let mut browser = Browser::mount(six());
    browser.paste(Some("12\n34"));
    assert_eq!(browser.value(), "1234");
}

// =============================================================================
// Selection commands
// =============================================================================

#[test]
fn double_click_selects_everything() {
    let mut browser = Browser::mount(six());
    browser.type_text("1234");
    browser.dblclick();
    assert_eq!(browser.selected_text(), "1234");
    assert_eq!(browser.active_slots(), vec![0, 1, 2, 3]);
}

#[test]
fn double_click_is_ignored_without_navigation() {
    let mut browser = Browser::mount(six().allow_navigation(false));
    browser.type_text("1234");
    browser.dblclick();
    assert_eq!(browser.selected_text(), "");
    assert_eq!(browser.active_slots(), vec![4]);
}

#[test]
fn select_all_command() {
    let mut browser = Browser::mount(six());
    browser.type_text("123");
    assert!(browser.select_all());
    assert_eq!(
        browser.otp().mirror(),
        RawSelection::new(0, 3, SelectionDirection::None)
    );
    assert_eq!(browser.active_slots(), vec![0, 1, 2]);

    let mut locked = Browser::mount(six().allow_navigation(false));
    locked.type_text("123");
    assert!(!locked.select_all());
}

#[test]
fn alt_arrows_jump_to_the_first_and_last_cell() {
    let mut browser = Browser::mount(six());
    browser.type_text("1234");
    browser.press("Alt+ArrowLeft");
    assert_eq!(browser.selected_text(), "1");
    browser.press("Alt+ArrowRight");
    assert_eq!(browser.selected_text(), "4");
}

#[test]
fn navigation_keys_are_cancelled_when_disabled() {
    let mut browser = Browser::mount(six().allow_navigation(false));
    browser.type_text("12");
    assert!(browser.press("ArrowLeft").prevent_default);
    assert!(browser.press("Mod+a").prevent_default);
    assert_eq!(browser.selection(), RawSelection::caret(2));
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn update_options_rebinds_without_remounting() {
    let mut browser = Browser::mount(six());
    let id = browser.otp().id();
    browser.type_text("123456");

    browser
        .update_options(OtpConfig::new(4).text_align(otp_core::TextAlign::Center))
        .expect("valid options");
    assert_eq!(browser.otp().id(), id);
    assert_eq!(browser.value(), "1234");
    assert_eq!(browser.native_value(), "1234");
    assert_eq!(browser.input_attribute("maxlength").as_deref(), Some("4"));
    assert_eq!(browser.input_style("text-align").as_deref(), Some("center"));
    assert_eq!(browser.render_state().slots.len(), 4);

    let err = browser.update_options(OtpConfig::new(0));
    assert!(matches!(err, Err(ConfigError::ZeroMaxLength)));
    assert_eq!(browser.input_attribute("maxlength").as_deref(), Some("4"));
}

#[test]
fn invalid_pattern_is_a_config_error() {
    let err = otp_events::OtpInput::create(OtpConfig::new(6).pattern("(")).err();
    assert!(matches!(err, Some(ConfigError::InvalidPattern { .. })));
}

// =============================================================================
// Password-manager badge
// =============================================================================

fn badge_dom(probe: Option<BadgeProbe>) -> std::rc::Rc<std::cell::RefCell<FakeDom>> {
    let dom = FakeDom::shared();
    dom.borrow_mut().badge_probe = probe;
    dom
}

#[test]
fn detected_badge_widens_the_input_once() {
    let probe = BadgeProbe {
        foreign_element_at_edge: false,
        marker_found: true,
    };
    let dom = badge_dom(Some(probe));
    let mut browser = Browser::mount_with(six(), MountRegistry::new_shared(), dom.clone());
    assert!(dom.borrow().observing_badge_area);

    browser.badge_area_visible(1.0);
    assert_eq!(browser.input_style("width").as_deref(), Some("100%"));

    browser.type_text("12");
    browser.advance(200);
    assert!(browser.render_state().will_push_badge);
    assert_eq!(
        browser.input_style("width").as_deref(),
        Some("calc(100% + 40px)")
    );
    assert_eq!(dom.borrow().blur_calls, 1);
    assert_eq!(dom.borrow().focus_calls, 1);
    assert!(browser.otp().is_focused());
    assert_eq!(browser.value(), "12");

    browser.advance(6_000);
    browser.blur();
    browser.focus();
    browser.advance(6_000);
    assert_eq!(dom.borrow().focus_calls, 1, "refocus happens once");
}

#[test]
fn badge_without_room_does_not_push() {
    let probe = BadgeProbe {
        foreign_element_at_edge: true,
        marker_found: false,
    };
    let mut browser =
        Browser::mount_with(six(), MountRegistry::new_shared(), badge_dom(Some(probe)));
    browser.badge_area_visible(0.5);
    browser.focus();
    browser.advance(1_000);
    assert!(!browser.render_state().will_push_badge);
    assert_eq!(browser.input_style("width").as_deref(), Some("100%"));
}

#[test]
fn failing_probe_is_tolerated() {
    let mut browser = Browser::mount_with(six(), MountRegistry::new_shared(), badge_dom(None));
    browser.badge_area_visible(1.0);
    browser.focus();
    browser.advance(6_000);
    assert!(!browser.render_state().will_push_badge);
}

#[test]
fn no_strategy_skips_badge_handling() {
    let dom = badge_dom(Some(BadgeProbe {
        foreign_element_at_edge: true,
        marker_found: true,
    }));
    let config = six().password_manager_strategy(PasswordManagerStrategy::None);
    let mut browser = Browser::mount_with(config, MountRegistry::new_shared(), dom.clone());
    assert!(!dom.borrow().observing_badge_area);

    browser.focus();
    browser.advance(6_000);
    assert_eq!(dom.borrow().blur_calls, 0);
    assert_eq!(browser.input_style("width").as_deref(), Some("100%"));
}

// =============================================================================
// Invariants over a long key sequence
// =============================================================================

#[test]
fn mirror_and_value_stay_consistent() {
    const CHORDS: &[&str] = &[
        "1",
        "2",
        "ArrowLeft",
        "Shift+ArrowLeft",
        "3",
        "Backspace",
        "Delete",
        "ArrowRight",
        "Mod+Backspace",
        "4",
        "5",
        "6",
        "7",
        "Home",
        "8",
        "End",
        "Alt+ArrowLeft",
        "9",
        "Alt+ArrowRight",
        "Shift+ArrowRight",
        "0",
        "x",
    ];

    let mut browser = Browser::mount(six());
    for round in 0..6 {
        for (idx, chord) in CHORDS.iter().cycle().skip(round * 5).take(CHORDS.len()).enumerate() {
            browser.press(chord);
            let at = format!("round {round} key {idx} ({chord})");

            let value = browser.value();
            let len = char_len(&value);
            assert!(len <= 6, "{at}: value {value:?} too long");
            assert!(value.chars().all(|c| c.is_ascii_digit()), "{at}: {value:?}");
            assert_eq!(browser.native_value(), value, "{at}");

            let (start, end) = browser
                .otp()
                .mirror()
                .bounds()
                .unwrap_or_else(|| panic!("{at}: focused mirror has no bounds"));
            assert!(start <= end && end <= 6, "{at}: mirror [{start}, {end})");
            if start == end {
                assert!(
                    len == 0 || (start == len && len < 6),
                    "{at}: stray caret at {start} in {value:?}"
                );
            }
        }
    }
}
