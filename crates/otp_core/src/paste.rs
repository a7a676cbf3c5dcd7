//! Paste splicing and validation.
//!
//! The browser's own paste handling is always replaced: clipboard text is
//! spliced into the value at the current selection, capped at `max_length`
//! and validated as a whole. A paste that fails the pattern is discarded in
//! full; there is no partial commit.

use crate::pattern::Pattern;
use crate::selection::{RawSelection, SelectionDirection, SelectionRange};
use crate::text::{char_len, filter_single_line, splice_chars, truncate_chars};
use std::sync::Arc;

/// Consumer hook applied to the raw clipboard text before splicing.
pub type PasteTransformer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Inputs of one paste.
pub struct PasteRequest<'a> {
    pub value: &'a str,
    pub selection: SelectionRange,
    pub clipboard: &'a str,
    pub max_length: usize,
    pub pattern: &'a Pattern,
    pub allow_spaces: bool,
    pub transformer: Option<&'a PasteTransformer>,
}

/// What the paste pipeline decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PasteOutcome {
    /// Commit `value` and place the selection at `selection`.
    Applied {
        value: String,
        selection: RawSelection,
    },
    /// The spliced value failed the pattern.
    Rejected,
}

/// Compute the post-paste value and caret.
///
/// The caret lands on `[min(len, max_length - 1), len]`: the last cell when
/// the value is full, the insert position otherwise.
pub fn splice_paste(req: PasteRequest<'_>) -> PasteOutcome {
    let transformed;
    let content = match req.transformer {
        Some(transform) => {
            transformed = transform(req.clipboard);
            transformed.as_str()
        }
        None => req.clipboard,
    };
    let content = filter_single_line(content);

    let spliced = splice_chars(
        req.value,
        req.selection.start,
        req.selection.end,
        &content,
    );
    let next = truncate_chars(&spliced, req.max_length);

    if !req.pattern.accepts(next, req.allow_spaces) {
        log::debug!(target: "otp.paste", "discarded paste {next:?}");
        return PasteOutcome::Rejected;
    }

    let len = char_len(next);
    let start = len.min(req.max_length.saturating_sub(1));
    PasteOutcome::Applied {
        value: next.to_string(),
        selection: RawSelection::new(start, len, SelectionDirection::None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::REGEXP_ONLY_DIGITS;

    fn digits() -> Pattern {
        Pattern::regex(REGEXP_ONLY_DIGITS).unwrap()
    }

    fn paste(value: &str, sel: (usize, usize), clip: &str, pattern: &Pattern) -> PasteOutcome {
        splice_paste(PasteRequest {
            value,
            selection: SelectionRange::new(sel.0, sel.1),
            clipboard: clip,
            max_length: 6,
            pattern,
            allow_spaces: false,
            transformer: None,
        })
    }

    #[test]
    fn paste_into_empty_truncates_to_max_length() {
        let out = paste("", (0, 0), "1234567", &digits());
        assert_eq!(
            out,
            PasteOutcome::Applied {
                value: "123456".to_string(),
                selection: RawSelection::new(5, 6, SelectionDirection::None),
            }
        );
    }

    #[test]
    fn paste_replaces_selected_range() {
        let out = paste("123456", (2, 4), "9", &digits());
        let PasteOutcome::Applied { value, selection } = out else {
            panic!("paste rejected");
        };
        assert_eq!(value, "12956");
        assert_eq!(selection.bounds(), Some((5, 5)));
    }

    #[test]
    fn paste_inserts_at_caret() {
        let out = paste("12", (1, 1), "34", &digits());
        let PasteOutcome::Applied { value, .. } = out else {
            panic!("paste rejected");
        };
        assert_eq!(value, "1342");
    }

    #[test]
    fn paste_rejected_on_pattern_mismatch() {
        assert_eq!(paste("", (0, 0), "12a456", &digits()), PasteOutcome::Rejected);
    }

    #[test]
    fn paste_strips_newlines() {
        let out = paste("", (0, 0), "123\n456\n", &digits());
        assert!(matches!(out, PasteOutcome::Applied { ref value, .. } if value == "123456"));
    }

    #[test]
    fn transformer_runs_before_splice() {
        let transform: PasteTransformer = Arc::new(|s: &str| s.replace('-', ""));
        let pattern = digits();
        let out = splice_paste(PasteRequest {
            value: "",
            selection: SelectionRange::new(0, 0),
            clipboard: "123-456",
            max_length: 6,
            pattern: &pattern,
            allow_spaces: false,
            transformer: Some(&transform),
        });
        assert!(matches!(out, PasteOutcome::Applied { ref value, .. } if value == "123456"));
    }
}
