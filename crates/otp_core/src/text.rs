//! Character-index text utilities.
//!
//! The slot model addresses the value by character, while Rust strings are
//! indexed by byte. These helpers do the conversion and never panic on
//! out-of-range offsets: indices past the end are clamped.

use std::borrow::Cow;

/// Number of characters (slots) occupied by `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Convert a character index into a byte offset, clamping to `s.len()`.
///
/// # Examples
///
/// ```
/// use otp_core::byte_offset;
///
/// let s = "1€2";
/// assert_eq!(byte_offset(s, 0), 0);
/// assert_eq!(byte_offset(s, 1), 1);
/// assert_eq!(byte_offset(s, 2), 4);
/// assert_eq!(byte_offset(s, 3), 5);
/// assert_eq!(byte_offset(s, 100), 5);
/// ```
pub fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Slice `s` by character range `[start, end)`.
///
/// Bounds are clamped; an inverted range yields `""`.
pub fn slice_chars(s: &str, start: usize, end: usize) -> &str {
    if end <= start {
        return "";
    }
    let from = byte_offset(s, start);
    let to = byte_offset(s, end);
    &s[from..to]
}

/// Keep at most `max` characters of `s`.
///
/// # Examples
///
/// ```
/// use otp_core::truncate_chars;
///
/// assert_eq!(truncate_chars("1234567", 6), "123456");
/// assert_eq!(truncate_chars("12", 6), "12");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> &str {
    &s[..byte_offset(s, max)]
}

/// Character at slot `idx`, if the value is long enough.
#[inline]
pub fn char_at(s: &str, idx: usize) -> Option<char> {
    s.chars().nth(idx)
}

/// Replace the character range `[start, end)` of `s` with `insert`.
///
/// A collapsed range inserts at `start`.
///
/// # Examples
///
/// ```
/// use otp_core::splice_chars;
///
/// assert_eq!(splice_chars("123456", 3, 6, "1"), "1231");
/// assert_eq!(splice_chars("12", 1, 1, "9"), "192");
/// ```
pub fn splice_chars(s: &str, start: usize, end: usize, insert: &str) -> String {
    let (start, end) = (start.min(end), start.max(end));
    let from = byte_offset(s, start);
    let to = byte_offset(s, end);
    let mut out = String::with_capacity(s.len() - (to - from) + insert.len());
    out.push_str(&s[..from]);
    out.push_str(insert);
    out.push_str(&s[to..]);
    out
}

/// Drop line breaks from pasted text. An OTP is always a single line.
///
/// ```
/// use otp_core::filter_single_line;
///
/// assert_eq!(filter_single_line("123\n456"), "123456");
/// assert_eq!(filter_single_line("12\r\n34"), "1234");
/// ```
pub fn filter_single_line(s: &str) -> Cow<'_, str> {
    let is_break = |c: char| matches!(c, '\n' | '\r');
    if s.contains(is_break) {
        Cow::Owned(s.chars().filter(|&c| !is_break(c)).collect())
    } else {
        Cow::Borrowed(s)
    }
}

/// Remove every ASCII space, used when spaces are allowed but must not take
/// part in pattern validation.
pub fn strip_spaces(s: &str) -> Cow<'_, str> {
    if !s.contains(' ') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| *c != ' ').collect())
}
