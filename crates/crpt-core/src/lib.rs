//! Core document model for crpt.
//!
//! This crate defines the documents submitted to the CRPT ("Chestny ZNAK")
//! document API, the reference enums they use, and the validation rules a
//! document must satisfy before it is sent.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod validate;

pub use error::{Error, Result};
