//! Correlation ids for request logging.
//!
//! The ids only tie together the log lines of one request; nothing depends
//! on them for correctness.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static LAST_REQUEST_ID: AtomicU32 = AtomicU32::new(0);

/// Process-wide request number, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u32);

impl RequestId {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Take the next request id, wrapping from `u32::MAX` back to 1.
pub fn next_request_id() -> RequestId {
    let previous = LAST_REQUEST_ID
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
            Some(successor(current))
        })
        .unwrap_or_else(|current| current);
    RequestId(successor(previous))
}

const fn successor(current: u32) -> u32 {
    if current == u32::MAX {
        1
    } else {
        current + 1
    }
}
