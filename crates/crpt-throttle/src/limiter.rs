//! The shared request throttle.
//!
//! A [`SlidingWindowLimiter`] admits at most `capacity` callers per
//! `window`. It compares "now" against the admission `capacity` steps back
//! (see [`TimestampWindow`]) instead of counting admissions in the trailing
//! interval, which keeps every decision O(1).
//!
//! The read-decide-insert sequence always runs under a single mutex. Callers
//! that have to wait release the mutex for the duration of the wait and
//! re-evaluate the window from scratch when they wake up, so a wake-up never
//! counts as an admission by itself.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::debug;

use crate::error::{Result, ThrottleError};
use crate::time_unit::TimeUnit;
use crate::window::TimestampWindow;

/// Fixed-capacity, fixed-window request throttle.
///
/// Construct one per protected resource and share it (typically as an
/// `Arc<SlidingWindowLimiter>`) with every component that performs the
/// rate-limited action.
///
/// # Example
///
/// ```
/// use crpt_throttle::{SlidingWindowLimiter, TimeUnit};
///
/// let limiter = SlidingWindowLimiter::per(TimeUnit::Second, 5)?;
/// limiter.acquire();
/// // ... perform the rate-limited call ...
/// # Ok::<(), crpt_throttle::ThrottleError>(())
/// ```
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    window_ms: u64,
    history: Mutex<TimestampWindow>,
    wakeup: Condvar,
}

impl SlidingWindowLimiter {
    /// Create a limiter admitting `capacity` callers per `window`.
    ///
    /// The window is truncated to whole milliseconds.
    ///
    /// # Errors
    /// Returns [`ThrottleError::InvalidWindow`] if the window is shorter
    /// than 1 ms, and [`ThrottleError::InvalidCapacity`] if `capacity` is
    /// zero.
    pub fn new(window: Duration, capacity: usize) -> Result<Self> {
        let window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        if window_ms < 1 {
            return Err(ThrottleError::InvalidWindow(window));
        }

        Ok(Self {
            window_ms,
            history: Mutex::new(TimestampWindow::new(capacity)?),
            wakeup: Condvar::new(),
        })
    }

    /// Create a limiter with a window of `window_ms` milliseconds.
    pub fn from_millis(window_ms: u64, capacity: usize) -> Result<Self> {
        Self::new(Duration::from_millis(window_ms), capacity)
    }

    /// Create a limiter admitting `capacity` callers per one `unit`.
    pub fn per(unit: TimeUnit, capacity: usize) -> Result<Self> {
        Self::new(unit.as_duration(), capacity)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    /// Block the calling thread until it may proceed, then record the
    /// admission.
    ///
    /// There is no timeout: the call returns once the window has room.
    pub fn acquire(&self) {
        let mut history = self.lock();
        loop {
            let now = now_millis();
            let Some(wait) = wait_time(history.oldest(), now, self.window_ms) else {
                history.insert(now);
                return;
            };

            debug!("throttle window full, waiting {} ms", wait.as_millis());
            // Nothing ever notifies the condvar: the wait ends on timeout or
            // spuriously, and either way the window is evaluated again.
            let (guard, _) = self
                .wakeup
                .wait_timeout(history, wait)
                .unwrap_or_else(PoisonError::into_inner);
            history = guard;
            debug!("throttle waiter resumed");
        }
    }

    /// Async counterpart of [`acquire`](Self::acquire).
    ///
    /// The mutex is only held while deciding, never across the sleep.
    /// Dropping the returned future before it completes leaves the window
    /// untouched.
    pub async fn acquire_async(&self) {
        loop {
            let wait = match self.try_acquire() {
                Ok(()) => return,
                Err(wait) => wait,
            };

            debug!("throttle window full, sleeping {} ms", wait.as_millis());
            tokio::time::sleep(wait).await;
        }
    }

    /// Admit the caller if the window has room right now.
    ///
    /// # Errors
    /// Returns the time to wait before the window could have room, without
    /// recording anything.
    pub fn try_acquire(&self) -> std::result::Result<(), Duration> {
        let mut history = self.lock();
        let now = now_millis();
        match wait_time(history.oldest(), now, self.window_ms) {
            Some(wait) => Err(wait),
            None => {
                history.insert(now);
                Ok(())
            }
        }
    }

    // `TimestampWindow::insert` cannot panic halfway, so a poisoned window is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, TimestampWindow> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// How long to wait before the admission `capacity` steps back leaves the
/// window, or `None` if it already has.
///
/// A clock that went backwards (`now` before `oldest`) counts the window as
/// elapsed: the throttle window gets shorter instead of stalling callers
/// until the clock catches up.
fn wait_time(oldest: u64, now: u64, window_ms: u64) -> Option<Duration> {
    let elapsed = now.checked_sub(oldest)?;
    (elapsed < window_ms).then(|| Duration::from_millis(window_ms - elapsed))
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|since| u64::try_from(since.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_construction_rejects_zero_capacity() {
        let result = SlidingWindowLimiter::from_millis(100, 0);
        assert_eq!(result.unwrap_err(), ThrottleError::InvalidCapacity(0));
    }

    #[test]
    fn test_construction_rejects_zero_window() {
        let result = SlidingWindowLimiter::from_millis(0, 5);
        assert_eq!(
            result.unwrap_err(),
            ThrottleError::InvalidWindow(Duration::ZERO)
        );
    }

    #[test]
    fn test_construction_rejects_sub_millisecond_window() {
        let result = SlidingWindowLimiter::new(Duration::from_micros(999), 1);
        assert!(matches!(result, Err(ThrottleError::InvalidWindow(_))));

        let result = SlidingWindowLimiter::per(TimeUnit::Microsecond, 1);
        assert!(matches!(result, Err(ThrottleError::InvalidWindow(_))));
    }

    #[test]
    fn test_accessors() {
        let limiter = SlidingWindowLimiter::per(TimeUnit::Minute, 7).unwrap();
        assert_eq!(limiter.capacity(), 7);
        assert_eq!(limiter.window(), Duration::from_secs(60));

        let limiter = SlidingWindowLimiter::new(Duration::from_micros(2_500), 1).unwrap();
        assert_eq!(limiter.window(), Duration::from_millis(2));
    }

    #[test]
    fn test_wait_time() {
        assert_eq!(wait_time(0, 1_000, 100), None);
        assert_eq!(wait_time(900, 1_000, 100), None);
        assert_eq!(wait_time(950, 1_000, 100), Some(Duration::from_millis(50)));
        assert_eq!(wait_time(1_000, 1_000, 100), Some(Duration::from_millis(100)));
    }

    #[test]
    fn test_wait_time_clock_rewind_admits() {
        // "now" before the oldest admission: the window counts as elapsed
        assert_eq!(wait_time(5_000, 1_000, 100), None);
        assert_eq!(wait_time(1_001, 1_000, 100), None);
    }

    #[test]
    fn test_acquire_after_clock_rewind_does_not_stall() {
        let limiter = SlidingWindowLimiter::from_millis(100, 1).unwrap();
        // An admission stamped 2 s ahead looks like the clock moved back
        limiter.lock().insert(now_millis() + 2_000);

        let start = Instant::now();
        limiter.acquire();
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn test_recorded_admissions_respect_capacity() {
        let capacity = 3;
        let limiter = Arc::new(SlidingWindowLimiter::from_millis(100, capacity).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                thread::spawn(move || limiter.acquire())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut recorded = limiter.lock().recorded.clone();
        recorded.sort_unstable();
        assert_eq!(recorded.len(), 8);
        // Any `capacity + 1` consecutive admissions span at least one window
        for span in recorded.windows(capacity + 1) {
            assert!(span[capacity] - span[0] >= 100, "admissions {span:?}");
        }
    }

    #[test]
    fn test_bootstrap_does_not_block() {
        let limiter = SlidingWindowLimiter::per(TimeUnit::Hour, 5).unwrap();
        let start = Instant::now();
        for _ in 0..5 {
            limiter.acquire();
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_try_acquire_reports_wait_when_full() {
        let limiter = SlidingWindowLimiter::per(TimeUnit::Hour, 2).unwrap();
        assert!(limiter.try_acquire().is_ok());
        assert!(limiter.try_acquire().is_ok());

        let wait = limiter.try_acquire().unwrap_err();
        assert!(wait > Duration::from_secs(3_500));
        assert!(wait <= Duration::from_secs(3_600));

        // A refused attempt records nothing
        assert!(limiter.try_acquire().is_err());
    }

    #[test]
    fn test_third_call_blocks_for_window() {
        let limiter = SlidingWindowLimiter::from_millis(100, 2).unwrap();
        let start = Instant::now();
        limiter.acquire();
        limiter.acquire();
        assert!(start.elapsed() < Duration::from_millis(50));

        limiter.acquire();
        // 1 ms of slack for millisecond truncation of the timestamps
        assert!(start.elapsed() >= Duration::from_millis(99));
    }

    #[tokio::test]
    async fn test_acquire_async_waits_for_window() {
        let limiter = SlidingWindowLimiter::from_millis(100, 1).unwrap();
        let start = Instant::now();
        limiter.acquire_async().await;
        limiter.acquire_async().await;
        assert!(start.elapsed() >= Duration::from_millis(99));
    }

    #[tokio::test]
    async fn test_cancelled_acquire_async_records_nothing() {
        let limiter = SlidingWindowLimiter::from_millis(10_000, 1).unwrap();
        limiter.acquire_async().await;

        let cancelled =
            tokio::time::timeout(Duration::from_millis(20), limiter.acquire_async()).await;
        assert!(cancelled.is_err());

        // The window still holds only the first admission
        let wait = limiter.try_acquire().unwrap_err();
        assert!(wait > Duration::from_secs(9));
    }
}
