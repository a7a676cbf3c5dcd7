//! Mount identifiers.
//!
//! Every mounted component gets a [`MountId`] from the registry. It keys the
//! per-instance bookkeeping (style reference counts, listener teardown) and
//! carries no meaning beyond identity.

use std::fmt;

/// Opaque identifier of one mounted input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MountId(u64);

impl MountId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }

    /// The identifier after this one.
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl From<u64> for MountId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "otp#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_id_round_trip() {
        let id = MountId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
        assert_eq!(MountId::from(42u64), id);
    }

    #[test]
    fn next_is_distinct() {
        let id = MountId::from_raw(1);
        assert_ne!(id.next(), id);
        assert_eq!(id.next().as_raw(), 2);
    }

    #[test]
    fn mount_id_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(MountId::from_raw(1));
        set.insert(MountId::from_raw(2));
        set.insert(MountId::from_raw(1));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_form() {
        assert_eq!(MountId::from_raw(7).to_string(), "otp#7");
    }
}
