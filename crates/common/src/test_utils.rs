//! Test utilities for usbip-picker
//!
//! Provides canned `usbip` output and record builders for testing across
//! crates.
//!
//! # Example
//!
//! ```
//! use common::test_utils::{create_mock_usb_device, export_listing_fixture};
//! use listing::parse_export_listing;
//!
//! let devices = parse_export_listing(&export_listing_fixture(3), "10.0.0.1");
//! assert_eq!(devices.len(), 3);
//!
//! let device = create_mock_usb_device("10.0.0.1", "1-1");
//! assert_eq!(device.location(), "1-1@10.0.0.1");
//! ```

use listing::{ImportedUsbDevice, UsbDevice, UsbInterface};
use std::future::Future;
use std::time::Duration;

/// Default test timeout (5 seconds)
pub const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// `usbip list -r 192.168.1.100` on a host exporting a mouse and a flash drive
pub const SAMPLE_EXPORT_LISTING: &str = "Exportable USB devices
======================
 - 192.168.1.100
        1-1: Logitech, Inc. : M105 Optical Mouse (046d:c077)
           : /sys/devices/pci0000:00/0000:00:14.0/usb1/1-1
           : (Defined at Interface level) (00/00/00)
           :  0 - Human Interface Device / Boot Interface Subclass / Mouse (03/01/02)

        1-2: SanDisk Corp. : Cruzer Blade (0781:5567)
           : /sys/devices/pci0000:00/0000:00:14.0/usb1/1-2
           : (Defined at Interface level) (00/00/00)
           :  0 - Mass Storage / SCSI / Bulk-Only (08/06/50)
";

/// `usbip port` with one imported device
pub const SAMPLE_PORT_LISTING: &str = "Imported USB devices
====================
Port 00: <Port in Use> at High Speed(480Mbps)
       SanDisk Corp. : Cruzer Blade (0781:5567)
       1-2 -> usbip://192.168.1.100:3240/1-2
           -> remote bus/dev 001/003
";

/// `usbip port` when nothing is attached
pub const EMPTY_PORT_LISTING: &str = "Imported USB devices
====================
";

/// Create a mock UsbDevice for testing
///
/// # Arguments
/// * `client` - Host the device is listed on
/// * `bus_id` - Bus id on that host
pub fn create_mock_usb_device(client: &str, bus_id: &str) -> UsbDevice {
    UsbDevice {
        client: client.to_string(),
        bus_id: bus_id.to_string(),
        vendor: "Test Manufacturer".to_string(),
        product: format!("Test Device {}", bus_id),
        vendor_id: "1234".to_string(),
        product_id: "5678".to_string(),
        path: format!("/sys/devices/platform/usb1/{}", bus_id),
        device_class: "Defined at Interface level (00/00/00)".to_string(),
        interfaces: vec![UsbInterface {
            index: 0,
            description: "Mass Storage / SCSI / Bulk-Only".to_string(),
            class_code: "08/06/50".to_string(),
        }],
    }
}

/// Create a fully populated ImportedUsbDevice for testing
pub fn create_mock_imported_device(port: u8, host: &str, bus_id: &str) -> ImportedUsbDevice {
    ImportedUsbDevice {
        port: format!("{:02}", port),
        speed: "High Speed(480Mbps)".to_string(),
        vendor: Some("Test Manufacturer".to_string()),
        product: Some(format!("Test Device {}", bus_id)),
        vendor_id: Some("1234".to_string()),
        product_id: Some("5678".to_string()),
        remote_url: Some(format!("usbip://{}:3240/{}", host, bus_id)),
        remote_bus: Some("001".to_string()),
        remote_dev: Some(format!("{:03}", port + 2)),
    }
}

/// Export listing text with `count` devices on bus 1
pub fn export_listing_fixture(count: usize) -> String {
    let mut text = String::from("Exportable USB devices\n======================\n - fixture\n");
    for i in 1..=count {
        text.push_str(&format!(
            "        1-{i}: Test Manufacturer : Test Device 1-{i} (1234:{i:04x})\n"
        ));
        text.push_str(&format!("           : /sys/devices/platform/usb1/1-{i}\n"));
        text.push_str("           : (Defined at Interface level) (00/00/00)\n");
        text.push_str("           :  0 - Mass Storage / SCSI / Bulk-Only (08/06/50)\n");
    }
    text
}

/// Port listing text with `count` attached ports, numbered from 0
pub fn port_listing_fixture(count: usize) -> String {
    let mut text = String::from("Imported USB devices\n====================\n");
    for i in 0..count {
        text.push_str(&format!("Port {i:02}: <Port in Use> at High Speed(480Mbps)\n"));
        text.push_str(&format!(
            "       Test Manufacturer : Test Device 1-{i} (1234:{i:04x})\n"
        ));
        text.push_str(&format!("       1-{i} -> usbip://fixture:3240/1-{i}\n"));
        text.push_str(&format!("           -> remote bus/dev 001/{i:03}\n"));
    }
    text
}

/// Run async test with a timeout
///
/// # Example
/// ```no_run
/// use common::test_utils::{with_timeout, DEFAULT_TEST_TIMEOUT};
///
/// #[tokio::test]
/// async fn test_with_timeout() {
///     let result = with_timeout(DEFAULT_TEST_TIMEOUT, async { 42 }).await.unwrap();
///     assert_eq!(result, 42);
/// }
/// ```
pub async fn with_timeout<T, F>(duration: Duration, future: F) -> Result<T, TimeoutError>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(duration, future)
        .await
        .map_err(|_| TimeoutError { duration })
}

/// Error returned when a test times out
#[derive(Debug)]
pub struct TimeoutError {
    /// The timeout duration that was exceeded
    pub duration: Duration,
}

impl std::fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Test timed out after {:?}", self.duration)
    }
}

impl std::error::Error for TimeoutError {}
