//! Host traits beyond the native input itself.
//!
//! [`ElementHost`] covers the elements one mounted component owns (the
//! container and the native input). [`DocumentHost`] covers document-wide
//! resources shared by every mount, such as the injected style element.
//! Everything here is best effort: failures come back as [`HostError`] and
//! the adapter logs them and carries on.

use crate::badge::BadgeProbe;
use otp_core::{HostError, NativeInput};

pub trait ElementHost: NativeInput {
    /// Set (`Some`) or remove (`None`) an attribute on the container.
    fn set_container_attribute(&mut self, name: &str, value: Option<&str>);

    /// Set a style property (including custom properties) on the container.
    fn set_container_style_property(&mut self, name: &str, value: &str);

    /// Set (`Some`) or remove (`None`) an attribute on the native input.
    fn set_input_attribute(&mut self, name: &str, value: Option<&str>);

    /// Set an inline style property on the native input.
    fn set_input_style_property(&mut self, name: &str, value: &str);

    /// Look for a password-manager badge over the input's right edge.
    fn probe_badge(&self) -> Result<BadgeProbe, HostError>;

    /// Start reporting how much of the area reserved for a badge is visible,
    /// as [`NativeEvent::BadgeAreaIntersection`](crate::NativeEvent) events.
    fn observe_badge_area(&mut self) -> Result<(), HostError>;
}

pub trait DocumentHost {
    /// Create the style element `id` unless it exists. Returns `true` if it
    /// was created by this call.
    fn ensure_style_element(&mut self, id: &str) -> Result<bool, HostError>;

    /// Append `rule` to the style sheet of element `id`.
    fn insert_style_rule(&mut self, id: &str, rule: &str) -> Result<(), HostError>;

    fn remove_style_element(&mut self, id: &str);

    /// `CSS.supports('-webkit-touch-callout', 'none')`, which only iOS
    /// WebKit answers with `true`.
    fn supports_touch_callout(&self) -> bool;
}

/// Everything a mounted component needs from its environment.
pub trait OtpHost: ElementHost + DocumentHost {}

impl<T: ElementHost + DocumentHost> OtpHost for T {}
