//! Key chords in the `Modifier+Key` notation of browser automation tools.

use otp_events::{Key, KeyEvent, Modifiers};

/// Parse `"Shift+ArrowLeft"`, `"Mod+Backspace"`, `"a"`, `"Space"`, `"Shift++"`.
///
/// `Mod` is the platform command modifier and maps to Meta.
///
/// # Panics
///
/// On an unknown modifier name.
pub fn parse_chord(chord: &str) -> KeyEvent {
    let (mods, key) = match chord.strip_suffix('+') {
        Some(rest) if rest.is_empty() || rest.ends_with('+') => {
            (rest.strip_suffix('+').unwrap_or(rest), "+")
        }
        _ => chord.rsplit_once('+').unwrap_or(("", chord)),
    };

    let mut modifiers = Modifiers::NONE;
    for name in mods.split('+').filter(|name| !name.is_empty()) {
        match name {
            "Shift" => modifiers.shift = true,
            "Alt" | "Option" => modifiers.alt = true,
            "Control" | "Ctrl" => modifiers.ctrl = true,
            "Meta" | "Cmd" | "Mod" => modifiers.meta = true,
            other => panic!("unknown modifier '{other}' in chord '{chord}'"),
        }
    }

    let key = match key {
        "Space" => Key::Character(' '),
        other => Key::from_dom(other),
    };
    KeyEvent::new(key, modifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_modified() {
        assert_eq!(parse_chord("a"), KeyEvent::plain(Key::Character('a')));
        let chord = parse_chord("Shift+ArrowLeft");
        assert_eq!(chord.key, Key::ArrowLeft);
        assert!(chord.modifiers.shift && !chord.modifiers.meta);
        let chord = parse_chord("Mod+Alt+Backspace");
        assert!(chord.modifiers.meta && chord.modifiers.alt);
        assert_eq!(chord.key, Key::Backspace);
    }

    #[test]
    fn plus_key() {
        assert_eq!(parse_chord("+").key, Key::Character('+'));
        let chord = parse_chord("Shift++");
        assert_eq!(chord.key, Key::Character('+'));
        assert!(chord.modifiers.shift);
        assert_eq!(parse_chord("Space").key, Key::Character(' '));
    }

    #[test]
    #[should_panic(expected = "unknown modifier")]
    fn unknown_modifier() {
        parse_chord("Hyper+a");
    }
}
