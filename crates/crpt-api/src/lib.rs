//! Client for the CRPT ("Chestny ZNAK") document API.
//!
//! Every outbound request passes through a shared
//! [`SlidingWindowLimiter`](crpt_throttle::SlidingWindowLimiter), so any
//! number of concurrent callers stay within the configured request rate.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod counter;
pub mod error;
pub mod request;

pub use client::{ApiResponse, CrptClient};
pub use config::Config;
pub use counter::{next_request_id, RequestId};
pub use error::{ApiError, ApiResult};
pub use request::CreateDocumentRequest;
