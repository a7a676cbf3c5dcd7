//! The native text input as seen by the state layer.
//!
//! The event adapter only ever reaches the real `<input>` through
//! [`NativeInput`]. The wasm binding implements it over `HtmlInputElement`;
//! tests implement it over a simulated element that reproduces the browser's
//! default editing behavior.
//!
//! Offsets are character indices. Implementations clamp out-of-range
//! positions the way the DOM does rather than failing.

use crate::selection::{RawSelection, SelectionDirection};

pub trait NativeInput {
    // =========================================================================
    // Value
    // =========================================================================

    /// Current text of the element.
    fn value(&self) -> String;

    /// Overwrite the text. Does not fire an `input` event.
    fn set_value(&mut self, value: &str);

    // =========================================================================
    // Selection
    // =========================================================================

    /// `selectionStart` / `selectionEnd` / `selectionDirection`.
    fn selection(&self) -> RawSelection;

    /// `setSelectionRange`. Only the event adapter may call this.
    fn set_selection_range(&mut self, start: usize, end: usize, direction: SelectionDirection);

    // =========================================================================
    // Focus
    // =========================================================================

    /// Whether this element is `document.activeElement`.
    fn is_active_element(&self) -> bool;

    fn focus(&mut self);

    fn blur(&mut self);

    // =========================================================================
    // Layout and synthetic events
    // =========================================================================

    /// Rendered height in CSS pixels.
    fn client_height(&self) -> f64;

    /// Dispatch a synthetic, bubbling `input` event on the element.
    ///
    /// Used to flush stale `:autofill` rendering; the adapter marks the event
    /// it expects so the refresh does not retrigger itself.
    fn dispatch_input_event(&mut self);
}

/// Convenience reads built on [`NativeInput`].
pub trait NativeInputExt: NativeInput {
    /// Apply `selection` when both bounds are known.
    fn restore_selection(&mut self, selection: RawSelection) {
        if let Some((start, end)) = selection.bounds() {
            self.set_selection_range(start, end, selection.direction);
        }
    }

    /// Value length in characters.
    fn value_len(&self) -> usize {
        self.value().chars().count()
    }
}

impl<T: NativeInput + ?Sized> NativeInputExt for T {}
