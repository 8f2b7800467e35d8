//! USB record types produced by the listing parsers
//!
//! Two record families come out of `usbip` output: devices a remote host
//! exports (`usbip list -r <host>`) and devices already imported onto local
//! virtual ports (`usbip port`). Both are plain owned values built fresh on
//! every parse call.

use serde::Serialize;

/// One interface of an exported device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsbInterface {
    /// Interface number within the parent device
    pub index: u32,
    /// Human-readable interface name (may be empty)
    pub description: String,
    /// `class/subclass/protocol`, two hex digits each (e.g. `03/01/02`)
    pub class_code: String,
}

/// A device exported by a remote host
///
/// The header fields (`bus_id`, `vendor`, `product` and the ids) are always
/// present. `path`, `device_class` and `interfaces` stay empty unless the
/// listing carried the matching continuation lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsbDevice {
    /// Host the device was listed on
    pub client: String,
    /// Bus/device path segment on the remote host (e.g. `1-1`)
    pub bus_id: String,
    /// Vendor string from the header line
    pub vendor: String,
    /// Product string from the header line (may be empty)
    pub product: String,
    /// USB Vendor ID, four hex digits
    pub vendor_id: String,
    /// USB Product ID, four hex digits
    pub product_id: String,
    /// Device path on the remote host (e.g. `/sys/devices/.../1-1`)
    pub path: String,
    /// `"<class name> (<class code>)"`
    pub device_class: String,
    /// Interfaces in listing order
    pub interfaces: Vec<UsbInterface>,
}

impl UsbDevice {
    pub(crate) fn from_header(client: &str, header: DeviceHeader<'_>) -> Self {
        Self {
            client: client.to_string(),
            bus_id: header.bus_id.to_string(),
            vendor: header.vendor.to_string(),
            product: header.product.to_string(),
            vendor_id: header.vendor_id.to_string(),
            product_id: header.product_id.to_string(),
            path: String::new(),
            device_class: String::new(),
            interfaces: Vec::new(),
        }
    }

    /// `"<vendor> <product>"`, used as the picker label
    pub fn label(&self) -> String {
        format!("{} {}", self.vendor, self.product).trim().to_string()
    }

    /// `"<bus_id>@<client>"`
    pub fn location(&self) -> String {
        format!("{}@{}", self.bus_id, self.client)
    }

    /// `"vvvv:pppp"`
    pub fn vid_pid(&self) -> String {
        format!("{}:{}", self.vendor_id, self.product_id)
    }
}

/// A remote device attached to a local virtual port
///
/// Only `port` and `speed` are guaranteed; every other field is `None`
/// until the corresponding continuation line has been seen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ImportedUsbDevice {
    /// Local port number, zero-padded to at least two digits
    pub port: String,
    /// Speed/location text from the port header line
    pub speed: String,
    pub vendor: Option<String>,
    pub product: Option<String>,
    pub vendor_id: Option<String>,
    pub product_id: Option<String>,
    /// `usbip://<host>:<port>/<bus_id>`
    pub remote_url: Option<String>,
    /// Remote bus number, three decimal digits
    pub remote_bus: Option<String>,
    /// Remote device number, three decimal digits
    pub remote_dev: Option<String>,
}

impl ImportedUsbDevice {
    pub(crate) fn new(port: String, speed: String) -> Self {
        Self {
            port,
            speed,
            ..Default::default()
        }
    }

    /// `"Port <port>: <vendor> <product>"`, falling back to the speed text
    pub fn label(&self) -> String {
        let name = match (&self.vendor, &self.product) {
            (Some(vendor), Some(product)) => format!("{} {}", vendor, product).trim().to_string(),
            (Some(vendor), None) => vendor.clone(),
            (None, Some(product)) => product.clone(),
            (None, None) => self.speed.clone(),
        };
        format!("Port {}: {}", self.port, name)
    }
}

/// Borrowed captures of a device header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DeviceHeader<'a> {
    pub bus_id: &'a str,
    pub vendor: &'a str,
    pub product: &'a str,
    pub vendor_id: &'a str,
    pub product_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(vendor: &str, product: &str) -> UsbDevice {
        UsbDevice::from_header(
            "10.0.0.5",
            DeviceHeader {
                bus_id: "1-1.2",
                vendor,
                product,
                vendor_id: "0781",
                product_id: "5567",
            },
        )
    }

    #[test]
    fn test_device_from_header_defaults() {
        let dev = device("SanDisk Corp.", "Cruzer Blade");
        assert_eq!(dev.client, "10.0.0.5");
        assert_eq!(dev.bus_id, "1-1.2");
        assert!(dev.path.is_empty());
        assert!(dev.device_class.is_empty());
        assert!(dev.interfaces.is_empty());
    }

    #[test]
    fn test_device_display_helpers() {
        let dev = device("SanDisk Corp.", "Cruzer Blade");
        assert_eq!(dev.label(), "SanDisk Corp. Cruzer Blade");
        assert_eq!(dev.location(), "1-1.2@10.0.0.5");
        assert_eq!(dev.vid_pid(), "0781:5567");

        // Empty product doesn't leave a trailing space
        assert_eq!(device("Logitech", "").label(), "Logitech");
    }

    #[test]
    fn test_imported_label_fallbacks() {
        let mut imported = ImportedUsbDevice::new("03".to_string(), "High Speed(480Mbps)".to_string());
        assert_eq!(imported.label(), "Port 03: High Speed(480Mbps)");

        imported.vendor = Some("SanDisk".to_string());
        assert_eq!(imported.label(), "Port 03: SanDisk");

        imported.product = Some("Cruzer Blade".to_string());
        assert_eq!(imported.label(), "Port 03: SanDisk Cruzer Blade");
    }
}
