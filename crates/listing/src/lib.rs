//! Listing library for usbip-picker
//!
//! Turns the text printed by the `usbip` tool into typed records:
//!
//! - [`parse_export_listing`]: `usbip list -r <host>` into [`UsbDevice`]s
//! - [`parse_port_listing`]: `usbip port` into [`ImportedUsbDevice`]s
//! - [`collect_catalog`]: every configured host's export listing, flattened
//!
//! Parsing never fails. Lines that match no known shape are skipped, and
//! records are emitted with whatever fields their continuation lines
//! provided.
//!
//! # Example
//!
//! ```
//! use listing::{parse_export_listing, parse_port_listing};
//!
//! let devices = parse_export_listing(
//!     "    1-1: SanDisk Corp. : Cruzer Blade (0781:5567)\n         : /sys/devices/usb1/1-1\n",
//!     "192.168.1.100",
//! );
//! assert_eq!(devices[0].bus_id, "1-1");
//! assert_eq!(devices[0].path, "/sys/devices/usb1/1-1");
//!
//! let ports = parse_port_listing("Port 1: device in use at High Speed(480Mbps)\n");
//! assert_eq!(ports[0].port, "01");
//! assert!(ports[0].vendor.is_none());
//! ```

pub mod catalog;
pub mod export;
mod grammar;
pub mod port;
pub mod types;

pub use catalog::{
    Catalog, CatalogOutcome, EmptyReason, HostFailure, ListingSource, collect_catalog,
};
pub use export::parse_export_listing;
pub use port::parse_port_listing;
pub use types::{ImportedUsbDevice, UsbDevice, UsbInterface};
