//! Admission control for rate-limited outbound calls.
//!
//! This crate provides [`SlidingWindowLimiter`], a fixed-capacity throttle
//! shared by any number of threads or async tasks. Every caller invokes
//! [`SlidingWindowLimiter::acquire`] (or its async twin) right before the
//! guarded action; the call returns once admitting the caller keeps the
//! admission count at or below `capacity` within the trailing window.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod limiter;
pub mod time_unit;
pub mod window;

pub use error::{Result, ThrottleError};
pub use limiter::SlidingWindowLimiter;
pub use time_unit::TimeUnit;
pub use window::TimestampWindow;
