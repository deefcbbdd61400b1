//! Time sources for step pacing and blocking deadlines.

/// Monotonic microsecond clock with an idle hook.
///
/// Blocking operations read `now_us` once per poll and call `idle` between
/// polls. A simulated clock advances time in `idle`, so tests fast-forward
/// instead of sleeping.
pub trait Clock {
    /// Microseconds since an arbitrary fixed epoch.
    fn now_us(&mut self) -> u64;

    /// Called between polls of a busy-wait loop.
    fn idle(&mut self) {}
}

/// Clock that only moves when told to.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimClock {
    now_us: u64,
    tick_us: u64,
}

impl SimClock {
    /// Start at zero, advancing `tick_us` per idle call.
    pub fn new(tick_us: u64) -> Self {
        Self { now_us: 0, tick_us }
    }

    /// Move time forward.
    pub fn advance(&mut self, us: u64) {
        self.now_us += us;
    }

    /// Current simulated time.
    pub fn now(&self) -> u64 {
        self.now_us
    }
}

impl Clock for SimClock {
    fn now_us(&mut self) -> u64 {
        self.now_us
    }

    fn idle(&mut self) {
        self.now_us += self.tick_us;
    }
}

/// Wall-clock time from `std::time::Instant`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Clock whose epoch is now.
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_us(&mut self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    fn idle(&mut self) {
        core::hint::spin_loop();
    }
}

/// Milliseconds elapsed between two microsecond timestamps.
#[inline]
pub(crate) fn elapsed_ms(start_us: u64, now_us: u64) -> u32 {
    let ms = now_us.saturating_sub(start_us) / 1000;
    ms.min(u32::MAX as u64) as u32
}
