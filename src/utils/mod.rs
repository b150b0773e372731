//! Utility modules
//!
//! Shared error types and logging setup.

pub mod errors;
pub mod logging;

pub use errors::{OcrError, Result, SnapTextError};
