//! Value store: the single mutation point for the committed value.
//!
//! Every candidate goes through [`ValueStore::commit`], which truncates it to
//! `max_length` and checks it against the [`Pattern`] before anything is
//! published. A controlled store only proposes values to its owner; the owner
//! answers with [`ValueStore::set_controlled`].

use crate::pattern::Pattern;
use crate::text::{char_len, truncate_chars};

/// Result of offering a candidate value to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The value changed. Holds the value it replaced.
    Committed { previous: String },
    /// Controlled store: the candidate was handed to the owner, the stored
    /// value is unchanged until the owner echoes it back.
    Proposed { value: String },
    /// Candidate equals the current value after truncation.
    Unchanged,
    /// Candidate failed the pattern; nothing was committed.
    Rejected,
}

/// Holds the current value, either owned internally or mirrored from an
/// external owner.
#[derive(Clone, Debug)]
pub struct ValueStore {
    value: String,
    controlled: bool,
    max_length: usize,
    /// Monotonic revision counter, incremented on any value change.
    revision: u64,
}

impl ValueStore {
    /// Internally owned value seeded with `default_value`.
    pub fn uncontrolled(default_value: &str, max_length: usize) -> Self {
        Self {
            value: truncate_chars(default_value, max_length).to_string(),
            controlled: false,
            max_length,
            revision: 0,
        }
    }

    /// Externally owned value.
    pub fn controlled(value: &str, max_length: usize) -> Self {
        Self {
            controlled: true,
            ..Self::uncontrolled(value, max_length)
        }
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Length in characters.
    #[inline]
    pub fn len(&self) -> usize {
        char_len(&self.value)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    #[inline]
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    #[inline]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Change the cap; an over-long value is truncated in place.
    pub fn set_max_length(&mut self, max_length: usize) -> bool {
        self.max_length = max_length;
        let truncated = truncate_chars(&self.value, max_length);
        if truncated.len() == self.value.len() {
            return false;
        }
        let truncated = truncated.to_string();
        self.replace(truncated);
        true
    }

    /// Truncate and validate `candidate` without committing it.
    ///
    /// Returns `None` when the pattern rejects the truncated value.
    pub fn prepare<'a>(
        &self,
        candidate: &'a str,
        pattern: &Pattern,
        allow_spaces: bool,
    ) -> Option<&'a str> {
        let truncated = truncate_chars(candidate, self.max_length);
        if !pattern.accepts(truncated, allow_spaces) {
            return None;
        }
        Some(truncated)
    }

    /// Offer `candidate` to the store.
    ///
    /// `on_change` is called with the accepted value before it is stored, for
    /// both controlled and uncontrolled stores.
    pub fn commit(
        &mut self,
        candidate: &str,
        pattern: &Pattern,
        allow_spaces: bool,
        on_change: &mut dyn FnMut(&str),
    ) -> CommitOutcome {
        let Some(next) = self.prepare(candidate, pattern, allow_spaces) else {
            log::debug!(target: "otp.value", "rejected {candidate:?}");
            return CommitOutcome::Rejected;
        };
        if next == self.value {
            return CommitOutcome::Unchanged;
        }

        on_change(next);
        if self.controlled {
            log::debug!(target: "otp.value", "proposed {next:?}");
            return CommitOutcome::Proposed {
                value: next.to_string(),
            };
        }

        log::debug!(target: "otp.value", "committed {next:?}");
        let previous = self.replace(next.to_string());
        CommitOutcome::Committed { previous }
    }

    /// Owner-side update of a controlled value (also accepted for an
    /// uncontrolled store, as an imperative reset).
    ///
    /// Returns the previous value if it changed.
    pub fn set_controlled(&mut self, value: &str) -> Option<String> {
        let next = truncate_chars(value, self.max_length);
        if next == self.value {
            return None;
        }
        Some(self.replace(next.to_string()))
    }

    fn replace(&mut self, next: String) -> String {
        self.revision = self.revision.wrapping_add(1);
        std::mem::replace(&mut self.value, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::REGEXP_ONLY_DIGITS;

    fn digits() -> Pattern {
        Pattern::regex(REGEXP_ONLY_DIGITS).unwrap()
    }

    #[test]
    fn uncontrolled_commit_truncates() {
        let mut store = ValueStore::uncontrolled("", 6);
        let mut seen = Vec::new();
        let out = store.commit("1234567", &digits(), false, &mut |v| seen.push(v.to_string()));
        assert_eq!(
            out,
            CommitOutcome::Committed {
                previous: String::new()
            }
        );
        assert_eq!(store.value(), "123456");
        assert_eq!(seen, vec!["123456".to_string()]);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn rejected_value_is_not_committed() {
        let mut store = ValueStore::uncontrolled("12", 6);
        let mut calls = 0;
        let out = store.commit("12a", &digits(), false, &mut |_| calls += 1);
        assert_eq!(out, CommitOutcome::Rejected);
        assert_eq!(store.value(), "12");
        assert_eq!(calls, 0);
    }

    #[test]
    fn empty_value_always_commits() {
        let mut store = ValueStore::uncontrolled("12", 6);
        let out = store.commit("", &digits(), false, &mut |_| {});
        assert!(matches!(out, CommitOutcome::Committed { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn unchanged_candidate_skips_on_change() {
        let mut store = ValueStore::uncontrolled("123", 6);
        let mut calls = 0;
        assert_eq!(
            store.commit("123", &digits(), false, &mut |_| calls += 1),
            CommitOutcome::Unchanged
        );
        assert_eq!(calls, 0);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn controlled_store_waits_for_echo() {
        let mut store = ValueStore::controlled("1", 6);
        let out = store.commit("12", &digits(), false, &mut |_| {});
        assert_eq!(
            out,
            CommitOutcome::Proposed {
                value: "12".to_string()
            }
        );
        assert_eq!(store.value(), "1");

        assert_eq!(store.set_controlled("12"), Some("1".to_string()));
        assert_eq!(store.value(), "12");
        assert_eq!(store.set_controlled("12"), None);
    }

    #[test]
    fn shrinking_max_length_truncates() {
        let mut store = ValueStore::uncontrolled("123456", 6);
        assert!(store.set_max_length(4));
        assert_eq!(store.value(), "1234");
        assert!(!store.set_max_length(8));
    }

    #[test]
    fn default_value_is_capped() {
        let store = ValueStore::uncontrolled("12345678", 4);
        assert_eq!(store.value(), "1234");
        assert_eq!(store.len(), 4);
    }
}
