//! usbip-picker client library
//!
//! Shared by the `usbip-picker` binary and the integration tests in `tests/`.

pub mod config;
pub mod output;
pub mod picker;
pub mod session;
pub mod tui;
pub mod usbip;

pub use config::ClientConfig;
pub use picker::{PickItem, Picker};
pub use session::{Outcome, Session};
pub use usbip::{ProcessRunner, UsbipCommand, UsbipRunner};
