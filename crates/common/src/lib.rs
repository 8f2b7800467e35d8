//! Common utilities for usbip-picker
//!
//! This crate provides functionality shared by the client and the tests,
//! including error handling, logging setup, and listing fixtures.

pub mod error;
pub mod logging;
pub mod test_utils;

pub use error::{Error, Result};
pub use logging::setup_logging;
