//! List, attach and detach workflows
//!
//! A [`Session`] ties the configured hosts to a [`UsbipRunner`]. The
//! interactive variants gather candidates, hand them to a [`Picker`], and
//! issue exactly one `usbip` command for the chosen entry. Cancelling or
//! having nothing to choose from issues none.

use common::{Error, Result};
use listing::{Catalog, CatalogOutcome, ImportedUsbDevice, UsbDevice, collect_catalog, parse_port_listing};
use std::fmt;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::picker::{PickItem, Picker};
use crate::usbip::{HostLister, UsbipCommand, UsbipRunner};

/// How a workflow ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Attached { host: String, bus_id: String },
    Detached { port: String },
    /// Nothing to choose from; carries the message to show
    NothingToShow(String),
    Cancelled,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Attached { host, bus_id } => write!(f, "Attached {} from {}", bus_id, host),
            Outcome::Detached { port } => write!(f, "Detached port {}", port),
            Outcome::NothingToShow(message) => write!(f, "{}", message),
            Outcome::Cancelled => write!(f, "Cancelled"),
        }
    }
}

pub const NO_ATTACHED_DEVICES: &str = "No attached USB devices";

pub struct Session<'a, R> {
    runner: &'a R,
    config: &'a ClientConfig,
}

impl<'a, R: UsbipRunner> Session<'a, R> {
    pub fn new(runner: &'a R, config: &'a ClientConfig) -> Self {
        Self { runner, config }
    }

    /// Export listings of `hosts`, or of every configured host when empty
    ///
    /// Configured names in `hosts` resolve to their address.
    pub async fn catalog(&self, hosts: &[String]) -> Catalog {
        let hosts: Vec<String> = if hosts.is_empty() {
            self.config.host_addresses()
        } else {
            hosts.iter().map(|h| self.config.resolve_host(h)).collect()
        };

        collect_catalog(&HostLister::new(self.runner), &hosts).await
    }

    /// Devices currently attached to local virtual ports
    pub async fn ports(&self) -> Result<Vec<ImportedUsbDevice>> {
        let text = self.runner.run(&UsbipCommand::Port).await?;
        Ok(parse_port_listing(&text))
    }

    /// Attach `bus_id` from `host` without asking
    pub async fn attach(&self, host: &str, bus_id: &str) -> Result<Outcome> {
        let host = self.config.resolve_host(host);
        let command = UsbipCommand::Attach {
            host: host.clone(),
            bus_id: bus_id.to_string(),
        };
        self.runner.run(&command).await?;

        info!("Attached {} from {}", bus_id, host);
        Ok(Outcome::Attached {
            host,
            bus_id: bus_id.to_string(),
        })
    }

    /// Detach local `port` without asking
    pub async fn detach(&self, port: &str) -> Result<Outcome> {
        self.runner
            .run(&UsbipCommand::Detach {
                port: port.to_string(),
            })
            .await?;

        info!("Detached port {}", port);
        Ok(Outcome::Detached {
            port: port.to_string(),
        })
    }

    /// Let the user pick an exported device from all configured hosts and attach it
    pub async fn attach_interactive<P: Picker>(&self, picker: &mut P) -> Result<Outcome> {
        let catalog = self.catalog(&[]).await;
        for failure in &catalog.failures {
            warn!(
                "Skipping {}: {}",
                self.config.host_display_name(&failure.host),
                failure.message
            );
        }

        let devices = match catalog.outcome() {
            CatalogOutcome::Devices(devices) => devices,
            CatalogOutcome::NothingToShow(reason) => {
                return Ok(Outcome::NothingToShow(reason.to_string()));
            }
        };

        let items: Vec<PickItem> = devices.iter().map(|d| self.device_item(d)).collect();
        let Some(index) = picker.pick("Attach USB device", &items)? else {
            info!("Attach cancelled");
            return Ok(Outcome::Cancelled);
        };

        let device = devices
            .get(index)
            .ok_or_else(|| Error::Other(format!("Picker returned invalid index {}", index)))?;
        self.attach(&device.client, &device.bus_id).await
    }

    /// Let the user pick an attached port and detach it
    pub async fn detach_interactive<P: Picker>(&self, picker: &mut P) -> Result<Outcome> {
        let ports = self.ports().await?;
        if ports.is_empty() {
            return Ok(Outcome::NothingToShow(NO_ATTACHED_DEVICES.to_string()));
        }

        let items: Vec<PickItem> = ports.iter().map(port_item).collect();
        let Some(index) = picker.pick("Detach USB device", &items)? else {
            info!("Detach cancelled");
            return Ok(Outcome::Cancelled);
        };

        let port = ports
            .get(index)
            .ok_or_else(|| Error::Other(format!("Picker returned invalid index {}", index)))?;
        self.detach(&port.port).await
    }

    pub fn device_item(&self, device: &UsbDevice) -> PickItem {
        let host = self.config.host_display_name(&device.client);
        let mut item = PickItem::new(device.label(), format!("{} @ {}", device.bus_id, host))
            .with_detail(format!("ID {}", device.vid_pid()));

        if !device.device_class.is_empty() {
            item = item.with_detail(format!("Class: {}", device.device_class));
        }
        if !device.path.is_empty() {
            item = item.with_detail(format!("Path: {}", device.path));
        }
        for interface in &device.interfaces {
            item = item.with_detail(format!(
                "  {}: {} ({})",
                interface.index, interface.description, interface.class_code
            ));
        }
        item
    }
}

pub fn port_item(port: &ImportedUsbDevice) -> PickItem {
    let mut item = PickItem::new(port.label(), port.remote_url.clone().unwrap_or_default())
        .with_detail(format!("Speed: {}", port.speed));

    if let (Some(vid), Some(pid)) = (&port.vendor_id, &port.product_id) {
        item = item.with_detail(format!("ID {}:{}", vid, pid));
    }
    if let (Some(bus), Some(dev)) = (&port.remote_bus, &port.remote_dev) {
        item = item.with_detail(format!("Remote bus/dev {}/{}", bus, dev));
    }
    item
}
