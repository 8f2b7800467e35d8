//! Parser for `usbip list -r <host>` output
//!
//! A listing is a sequence of device blocks. Each block opens with an
//! indented header line and is followed by zero or more `:` continuation
//! lines:
//!
//! ```text
//! Exportable USB devices
//! ======================
//!  - 192.168.1.100
//!         1-1: Logitech, Inc. : Optical Mouse (046d:c077)
//!            : /sys/devices/pci0000:00/0000:00:14.0/usb1/1-1
//!            : (Defined at Interface level) (00/00/00)
//!            :  0 - Human Interface Device / Boot Interface Subclass / Mouse (03/01/02)
//! ```
//!
//! Lines that match nothing (banners, blank lines, error text) are skipped.

use crate::grammar;
use crate::types::{UsbDevice, UsbInterface};

/// Parse one host's export listing into devices, in header order
///
/// `client` is copied onto every device. Continuation lines that appear
/// before the first header have nowhere to go and are dropped.
pub fn parse_export_listing(text: &str, client: &str) -> Vec<UsbDevice> {
    let mut devices = Vec::new();
    let mut current: Option<UsbDevice> = None;

    for line in text.lines() {
        if let Some(header) = grammar::device_header(line) {
            if let Some(device) = current.take() {
                devices.push(device);
            }
            current = Some(UsbDevice::from_header(client, header));
            continue;
        }

        let Some(device) = current.as_mut() else {
            continue;
        };

        if let Some(path) = grammar::path_line(line) {
            device.path = path.to_string();
        } else if let Some((name, code)) = grammar::class_line(line) {
            device.device_class = format!("{} ({})", name, code);
        } else if let Some((index, description, code)) = grammar::interface_line(line) {
            device.interfaces.push(UsbInterface {
                index,
                description: description.to_string(),
                class_code: code.to_string(),
            });
        }
    }

    if let Some(device) = current {
        devices.push(device);
    }

    devices
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_DEVICES: &str = "Exportable USB devices
======================
 - 10.0.0.5
        1-1: Logitech, Inc. : Unifying Receiver (046d:c52b)
           : /sys/devices/pci0000:00/0000:00:14.0/usb1/1-1
           : (Defined at Interface level) (00/00/00)
           :  0 - Human Interface Device / Boot Interface Subclass / Keyboard (03/01/01)
           :  1 - Human Interface Device / Boot Interface Subclass / Mouse (03/01/02)
           :  2 - Human Interface Device / No Subclass / None (03/00/00)

        1-2: SanDisk Corp. : Cruzer Blade (0781:5567)
           : /sys/devices/pci0000:00/0000:00:14.0/usb1/1-2
           : (Defined at Interface level) (00/00/00)
           :  0 - Mass Storage / SCSI / Bulk-Only (08/06/50)
";

    #[test]
    fn test_parse_two_devices() {
        let devices = parse_export_listing(TWO_DEVICES, "10.0.0.5");

        assert_eq!(devices.len(), 2);

        let receiver = &devices[0];
        assert_eq!(receiver.client, "10.0.0.5");
        assert_eq!(receiver.bus_id, "1-1");
        assert_eq!(receiver.vendor, "Logitech, Inc.");
        assert_eq!(receiver.product, "Unifying Receiver");
        assert_eq!(receiver.path, "/sys/devices/pci0000:00/0000:00:14.0/usb1/1-1");
        assert_eq!(receiver.device_class, "Defined at Interface level (00/00/00)");
        assert_eq!(receiver.interfaces.len(), 3);
        assert_eq!(receiver.interfaces[1].index, 1);
        assert_eq!(
            receiver.interfaces[1].description,
            "Human Interface Device / Boot Interface Subclass / Mouse"
        );
        assert_eq!(receiver.interfaces[1].class_code, "03/01/02");

        let stick = &devices[1];
        assert_eq!(stick.bus_id, "1-2");
        assert_eq!(stick.vid_pid(), "0781:5567");
        assert_eq!(stick.interfaces.len(), 1);
        assert_eq!(stick.interfaces[0].class_code, "08/06/50");
    }

    #[test]
    fn test_header_only_device_keeps_defaults() {
        let devices = parse_export_listing("    3-4: Yubico : YubiKey OTP+FIDO+CCID (1050:0407)\n", "pi");
        assert_eq!(devices.len(), 1);
        assert!(devices[0].path.is_empty());
        assert!(devices[0].device_class.is_empty());
        assert!(devices[0].interfaces.is_empty());
    }

    #[test]
    fn test_orphan_continuations_are_dropped() {
        let text = "           : /sys/devices/orphan
           : (Hub) (09/00/00)
           :  0 - Hub (09/00/00)
        1-1: Logitech, Inc. : Optical Mouse (046d:c077)
";
        let devices = parse_export_listing(text, "host");
        assert_eq!(devices.len(), 1);
        assert!(devices[0].path.is_empty());
        assert!(devices[0].device_class.is_empty());
        assert!(devices[0].interfaces.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = TWO_DEVICES.replace('\n', "\r\n");
        assert_eq!(
            parse_export_listing(&text, "10.0.0.5"),
            parse_export_listing(TWO_DEVICES, "10.0.0.5")
        );
    }

    #[test]
    fn test_later_continuation_overwrites_path() {
        let text = "  1-1: A : B (0001:0002)
     : /first
     : /second
";
        let devices = parse_export_listing(text, "h");
        assert_eq!(devices[0].path, "/second");
    }

    #[test]
    fn test_error_output_yields_nothing() {
        let text = "usbip: error: could not connect to 10.0.0.9:3240\n";
        assert!(parse_export_listing(text, "10.0.0.9").is_empty());
    }
}
