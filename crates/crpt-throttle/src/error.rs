use std::time::Duration;

use thiserror::Error;

/// Errors raised while constructing a throttle.
///
/// Both variants are construction-time failures: no partially built
/// limiter is ever returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ThrottleError {
    /// The capacity was below one admission per window.
    #[error("invalid capacity {0}: at least one request per window is required")]
    InvalidCapacity(usize),

    /// The window was shorter than one millisecond.
    #[error("invalid window {0:?}: the window must be at least 1 ms")]
    InvalidWindow(Duration),
}

pub type Result<T> = std::result::Result<T, ThrottleError>;
