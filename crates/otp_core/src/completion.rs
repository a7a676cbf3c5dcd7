//! Completion notifier.
//!
//! Fires once per transition from "shorter than `max_length`" to "exactly
//! `max_length`". Dropping below the cap re-arms it silently.

/// Tracks the immediately-previous value to detect fill transitions.
#[derive(Clone, Debug, Default)]
pub struct CompletionNotifier {
    previous: Option<String>,
}

impl CompletionNotifier {
    /// Start observing from `initial`. An already full initial value does not fire.
    pub fn new(initial: &str) -> Self {
        Self {
            previous: Some(initial.to_string()),
        }
    }

    /// Record `current` and return it if this change completed the value.
    pub fn observe(&mut self, current: &str, max_length: usize) -> Option<String> {
        let previous = self.previous.replace(current.to_string())?;
        if current == previous {
            return None;
        }
        let was_short = previous.chars().count() < max_length;
        let is_full = current.chars().count() == max_length;
        (was_short && is_full).then(|| current.to_string())
    }

    /// Whether the last observed value filled every slot.
    pub fn is_complete(&self, max_length: usize) -> bool {
        self.previous
            .as_deref()
            .is_some_and(|v| v.chars().count() == max_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_when_filled() {
        let mut n = CompletionNotifier::new("");
        let mut fired = Vec::new();
        let mut value = String::new();
        for c in "123456".chars() {
            value.push(c);
            fired.extend(n.observe(&value, 6));
        }
        assert_eq!(fired, vec!["123456".to_string()]);
        assert!(n.is_complete(6));
    }

    #[test]
    fn refill_fires_again() {
        let mut n = CompletionNotifier::new("123456");
        assert_eq!(n.observe("12345", 6), None);
        assert!(!n.is_complete(6));
        assert_eq!(n.observe("123456", 6), Some("123456".to_string()));
    }

    #[test]
    fn replacing_a_char_in_full_value_does_not_fire() {
        let mut n = CompletionNotifier::new("123456");
        assert_eq!(n.observe("123457", 6), None);
    }

    #[test]
    fn repeated_observation_is_silent() {
        let mut n = CompletionNotifier::new("12345");
        assert!(n.observe("123456", 6).is_some());
        assert!(n.observe("123456", 6).is_none());
    }

    #[test]
    fn default_notifier_needs_a_baseline() {
        let mut n = CompletionNotifier::default();
        assert_eq!(n.observe("123456", 6), None);
        assert_eq!(n.observe("12345", 6), None);
        assert!(n.observe("123456", 6).is_some());
    }
}
