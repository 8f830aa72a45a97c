//! Ring buffer of recent admission timestamps.
//!
//! ```text
//!   slots:  [t3, t1, t2]      capacity = 3
//!   cursor:      ^            next write overwrites t1
//!   oldest: t1                admission `capacity` steps back
//! ```
//!
//! Slots start at 0 (the epoch), so the first `capacity` admissions always
//! compare against a timestamp far in the past and are never throttled.

use crate::error::{Result, ThrottleError};

/// The `capacity` most recent admission timestamps, in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampWindow {
    slots: Box<[u64]>,
    cursor: usize,
    oldest: u64,
    // Every timestamp ever inserted, for checks on exact admission times.
    #[cfg(test)]
    pub(crate) recorded: Vec<u64>,
}

impl TimestampWindow {
    /// Create a window with `capacity` zeroed slots.
    ///
    /// # Errors
    /// Returns [`ThrottleError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity < 1 {
            return Err(ThrottleError::InvalidCapacity(capacity));
        }

        Ok(Self {
            slots: vec![0; capacity].into_boxed_slice(),
            cursor: 0,
            oldest: 0,
            #[cfg(test)]
            recorded: Vec::new(),
        })
    }

    /// Record an admission at `timestamp`.
    ///
    /// Overwrites the slot under the cursor, advances the cursor and caches
    /// the timestamp the following insert will evict.
    pub fn insert(&mut self, timestamp: u64) {
        self.slots[self.cursor] = timestamp;
        self.cursor = (self.cursor + 1) % self.slots.len();
        self.oldest = self.slots[self.cursor];
        #[cfg(test)]
        self.recorded.push(timestamp);
    }

    /// Timestamp of the admission `capacity` steps before the next one.
    #[must_use]
    pub const fn oldest(&self) -> u64 {
        self.oldest
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
