//! Plain-text rendering for non-interactive commands

use listing::{HostFailure, ImportedUsbDevice, UsbDevice};
use std::fmt::Write;

use crate::config::ClientConfig;

/// One block per host, one line per device
pub fn format_devices(devices: &[UsbDevice], config: &ClientConfig) -> String {
    let mut out = String::new();
    let mut current_host: Option<&str> = None;

    for device in devices {
        if current_host != Some(device.client.as_str()) {
            if current_host.is_some() {
                out.push('\n');
            }
            let name = config.host_display_name(&device.client);
            if name == device.client {
                let _ = writeln!(out, "{}", device.client);
            } else {
                let _ = writeln!(out, "{} ({})", name, device.client);
            }
            current_host = Some(device.client.as_str());
        }

        let _ = writeln!(
            out,
            "  {:<8} {}  {}",
            device.bus_id,
            device.vid_pid(),
            device.label()
        );
    }
    out
}

pub fn format_ports(ports: &[ImportedUsbDevice]) -> String {
    let mut out = String::new();
    for port in ports {
        let _ = writeln!(out, "{}", port.label());
        if let Some(url) = &port.remote_url {
            let _ = writeln!(out, "    {}", url);
        }
    }
    out
}

pub fn format_hosts(config: &ClientConfig) -> String {
    let mut out = String::new();
    for host in &config.hosts.configured {
        match &host.name {
            Some(name) => {
                let _ = writeln!(out, "{:<16} {}", name, host.address);
            }
            None => {
                let _ = writeln!(out, "{:<16} {}", "-", host.address);
            }
        }
    }
    out
}

/// `"<name>: <message>"` per failed host
pub fn format_failures(failures: &[HostFailure], config: &ClientConfig) -> String {
    let mut out = String::new();
    for failure in failures {
        let _ = writeln!(
            out,
            "warning: {}: {}",
            config.host_display_name(&failure.host),
            failure.message
        );
    }
    out
}
