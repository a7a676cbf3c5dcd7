//! Time source.
//!
//! Scheduling code never calls `Instant::now()` directly; it asks a
//! [`Clock`], so tests can advance time by hand. `web_time::Instant` is
//! `std::time::Instant` on native targets and `performance.now()` on wasm.

pub use web_time::Instant;

pub trait Clock {
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
}
