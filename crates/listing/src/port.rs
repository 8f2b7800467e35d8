//! Parser for `usbip port` output
//!
//! ```text
//! Imported USB devices
//! ====================
//! Port 00: <Port in Use> at High Speed(480Mbps)
//!        SanDisk Corp. : Cruzer Blade (0781:5567)
//!        1-1 -> usbip://192.168.1.101:3240/1-2
//!            -> remote bus/dev 002/003
//! ```

use crate::grammar;
use crate::types::ImportedUsbDevice;

/// Parse the attached-port listing into records, in port-header order
///
/// A record is emitted for every port header, even when none of its
/// continuation lines matched.
pub fn parse_port_listing(text: &str) -> Vec<ImportedUsbDevice> {
    let mut imported = Vec::new();
    let mut current: Option<ImportedUsbDevice> = None;

    for line in text.lines() {
        if let Some((digits, speed)) = grammar::port_header(line) {
            if let Some(record) = current.take() {
                imported.push(record);
            }
            current = Some(ImportedUsbDevice::new(pad_port(digits), speed.to_string()));
            continue;
        }

        let Some(record) = current.as_mut() else {
            continue;
        };

        if let Some((vendor, product, vendor_id, product_id)) = grammar::imported_vendor_line(line) {
            record.vendor = Some(vendor.to_string());
            record.product = Some(product.to_string());
            record.vendor_id = Some(vendor_id.to_string());
            record.product_id = Some(product_id.to_string());
        } else if let Some(remainder) = grammar::remote_url_line(line) {
            record.remote_url = Some(format!("usbip://{}", remainder));
        } else if let Some((bus, dev)) = grammar::remote_bus_dev_line(line) {
            record.remote_bus = Some(bus.to_string());
            record.remote_dev = Some(dev.to_string());
        }
    }

    if let Some(record) = current {
        imported.push(record);
    }

    imported
}

/// Left-pad to two digits; longer port numbers pass through unchanged
fn pad_port(digits: &str) -> String {
    format!("{:0>2}", digits)
}
