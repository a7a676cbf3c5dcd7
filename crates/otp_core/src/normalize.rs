//! Selection normalization.
//!
//! A native text input reports a zero-width caret between characters, while
//! the slot UI highlights whole cells. [`normalize`] turns a raw caret into a
//! one-cell span and infers the navigation direction from the previous span,
//! so simple caret movement always lights exactly one slot. Genuine ranges
//! (shift-selection, select-all) pass through untouched.
//!
//! The function is pure: the event adapter reads the native selection, calls
//! it, writes a corrected span back with `setSelectionRange` and stores the
//! result as `prev` for the next call.

use crate::selection::{RawSelection, SelectionDirection};

/// Tunable boundary constants of the algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// How many cells the highlight steps back when the caret moves backward
    /// from a position that was not itself an insert caret.
    pub backward_offset: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self { backward_offset: 1 }
    }
}

/// Result of one normalization pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Normalized {
    /// The selection the mirror should hold.
    pub selection: RawSelection,
    /// `true` if `selection` differs from the raw observation and must be
    /// written back into the native element.
    pub corrected: bool,
}

impl Normalized {
    fn passthrough(raw: RawSelection) -> Self {
        Self {
            selection: raw,
            corrected: false,
        }
    }
}

/// A caret sitting right after the last character while there is still room
/// is the "insert position": it stays zero-width so the next slot shows a
/// fake caret instead of a highlighted cell.
#[inline]
pub fn is_insert_position(caret: usize, value_len: usize, max_length: usize) -> bool {
    caret == value_len && value_len < max_length
}

/// Normalize with the default [`NormalizeOptions`].
pub fn normalize(
    raw: RawSelection,
    prev: RawSelection,
    value_len: usize,
    max_length: usize,
) -> Normalized {
    normalize_with(raw, prev, value_len, max_length, NormalizeOptions::default())
}

/// Convert a raw native selection into a one-cell span where appropriate.
///
/// - empty value or unknown bounds: passthrough
/// - a range (`start != end`): passthrough
/// - a caret at the insert position: passthrough
/// - caret at 0: `[0, 1]`, forward
/// - caret at `max_length`: `[max_length - 1, max_length]`, backward
/// - interior caret: direction from the previous span's end, stepping back by
///   `backward_offset` when moving backward from a non-insert caret
pub fn normalize_with(
    raw: RawSelection,
    prev: RawSelection,
    value_len: usize,
    max_length: usize,
    opts: NormalizeOptions,
) -> Normalized {
    let Some((start, end)) = raw.bounds() else {
        return Normalized::passthrough(raw);
    };
    if value_len == 0 || max_length == 0 {
        return Normalized::passthrough(raw);
    }
    if start != end {
        return Normalized::passthrough(raw);
    }

    let caret = start;
    if is_insert_position(caret, value_len, max_length) {
        return Normalized::passthrough(raw);
    }

    let (cell, direction) = if caret == 0 {
        (0, SelectionDirection::Forward)
    } else if caret >= max_length {
        (max_length - 1, SelectionDirection::Backward)
    } else {
        let mut offset = 0;
        let direction = match prev.bounds() {
            Some((prev_start, prev_end)) => {
                let direction = if caret < prev_end {
                    SelectionDirection::Backward
                } else {
                    SelectionDirection::Forward
                };
                let was_inserting = prev_start == prev_end && prev_start < max_length;
                if direction == SelectionDirection::Backward && !was_inserting {
                    offset = opts.backward_offset;
                }
                direction
            }
            None => raw.direction,
        };
        (caret.saturating_sub(offset), direction)
    };

    let selection = RawSelection::new(cell, cell + 1, direction);
    let corrected = !selection.same_bounds(&raw);
    log::trace!(
        target: "otp.selection",
        "normalize caret={caret} prev={:?} -> [{cell}, {}] {direction:?}",
        prev.bounds(),
        cell + 1
    );
    Normalized {
        selection,
        corrected,
    }
}
