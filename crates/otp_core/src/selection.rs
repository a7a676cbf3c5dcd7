//! Selection representation shared by the normalization algorithm, the
//! event adapter and the render layer.
//!
//! All offsets are character indices into the value. For the characters an
//! OTP field accepts these coincide with the UTF-16 indices a browser reports.

/// Direction of a native selection, as reported by `selectionDirection`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SelectionDirection {
    Forward,
    Backward,
    #[default]
    None,
}

impl SelectionDirection {
    /// The DOM spelling of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionDirection::Forward => "forward",
            SelectionDirection::Backward => "backward",
            SelectionDirection::None => "none",
        }
    }

    /// Parse the DOM spelling. Unknown values map to [`SelectionDirection::None`].
    pub fn from_dom(s: &str) -> Self {
        match s {
            "forward" => SelectionDirection::Forward,
            "backward" => SelectionDirection::Backward,
            _ => SelectionDirection::None,
        }
    }
}

/// A selection observation with nullable bounds.
///
/// `start`/`end` are `None` when the native element reports no meaningful
/// selection (not focused, or a mobile keyboard left it indeterminate).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawSelection {
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub direction: SelectionDirection,
}

impl RawSelection {
    /// No selection at all.
    pub const NONE: RawSelection = RawSelection {
        start: None,
        end: None,
        direction: SelectionDirection::None,
    };

    #[inline]
    pub fn new(start: usize, end: usize, direction: SelectionDirection) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            direction,
        }
    }

    /// A zero-width caret at `pos`.
    #[inline]
    pub fn caret(pos: usize) -> Self {
        Self::new(pos, pos, SelectionDirection::None)
    }

    /// Both bounds, when both are known.
    #[inline]
    pub fn bounds(&self) -> Option<(usize, usize)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }

    /// The selection as an ordered range, when both bounds are known.
    #[inline]
    pub fn range(&self) -> Option<SelectionRange> {
        self.bounds().map(|(s, e)| SelectionRange::new(s, e))
    }

    /// Returns `true` if either bound is unknown.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.bounds().is_none()
    }

    /// Returns `true` if both bounds equal `other`'s. Direction is ignored.
    #[inline]
    pub fn same_bounds(&self, other: &RawSelection) -> bool {
        self.start == other.start && self.end == other.end
    }

    /// Encode as the `data-sel` container attribute (`"start,end"`, `-1` for unknown).
    pub fn to_attribute(&self) -> String {
        let fmt = |v: Option<usize>| v.map_or_else(|| "-1".to_string(), |v| v.to_string());
        format!("{},{}", fmt(self.start), fmt(self.end))
    }
}

/// Ordered slot span `[start, end)`, built from two bounds in either order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self { start, end }
    }

    /// A bare caret.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Number of slots covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The covered characters of `value`, clamped to its end.
    #[inline]
    pub fn slice<'a>(&self, value: &'a str) -> &'a str {
        crate::text::slice_chars(value, self.start, self.end)
    }

    /// Returns `true` if slot `idx` lies inside `[start, end)`.
    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        idx >= self.start && idx < self.end
    }
}

/// Shape of a selection, used to decide how navigation keys behave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionKind {
    /// Zero-width caret.
    Caret,
    /// Exactly one cell selected.
    Char,
    /// More than one cell selected.
    Multi,
}

impl SelectionKind {
    /// Classify a `(start, end)` pair.
    ///
    /// Returns `None` when `end < start`, which a browser never reports. Callers
    /// treat that as an internal inconsistency.
    pub fn classify(start: usize, end: usize) -> Option<Self> {
        match end.checked_sub(start)? {
            0 => Some(SelectionKind::Caret),
            1 => Some(SelectionKind::Char),
            _ => Some(SelectionKind::Multi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_orders_bounds() {
        assert_eq!(SelectionRange::new(4, 1), SelectionRange { start: 1, end: 4 });
        assert!(SelectionRange::new(3, 3).is_empty());
        assert_eq!(SelectionRange::new(5, 6).slice("123456"), "6");
    }

    #[test]
    fn selection_range_len_and_contains() {
        let range = SelectionRange::new(2, 4);
        assert_eq!(range.len(), 2);
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(3));
        assert!(!range.contains(4));
    }

    #[test]
    fn selection_range_slice_clamps() {
        let range = SelectionRange::new(1, 10);
        assert_eq!(range.slice("1234"), "234");
    }

    #[test]
    fn classify_shapes() {
        assert_eq!(SelectionKind::classify(3, 3), Some(SelectionKind::Caret));
        assert_eq!(SelectionKind::classify(3, 4), Some(SelectionKind::Char));
        assert_eq!(SelectionKind::classify(0, 6), Some(SelectionKind::Multi));
        assert_eq!(SelectionKind::classify(4, 3), None);
    }

    #[test]
    fn raw_selection_attribute_encoding() {
        assert_eq!(RawSelection::NONE.to_attribute(), "-1,-1");
        let sel = RawSelection::new(5, 6, SelectionDirection::Backward);
        assert_eq!(sel.to_attribute(), "5,6");
        assert_eq!(sel.bounds(), Some((5, 6)));
    }

    #[test]
    fn direction_dom_round_trip() {
        for dir in [
            SelectionDirection::Forward,
            SelectionDirection::Backward,
            SelectionDirection::None,
        ] {
            assert_eq!(SelectionDirection::from_dom(dir.as_str()), dir);
        }
        assert_eq!(SelectionDirection::from_dom("sideways"), SelectionDirection::None);
    }
}
