//! Client Integration Tests
//!
//! Exercises the client library end to end with a scripted `usbip`:
//! - Configuration files on disk driving which hosts are queried
//! - Interactive attach/detach through a scripted picker
//! - JSON output shape of listings
//!
//! Run with: `cargo test -p client --test integration_tests`

use client::config::ClientConfig;
use client::session::NO_ATTACHED_DEVICES;
use client::{Outcome, PickItem, Picker, Session, UsbipCommand, UsbipRunner};
use common::test_utils::{
    DEFAULT_TEST_TIMEOUT, SAMPLE_EXPORT_LISTING, export_listing_fixture, port_listing_fixture,
    with_timeout,
};
use common::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use tempfile::tempdir;

const CONFIG: &str = r#"
[client]
log_level = "debug"

[usbip]
binary = "/usr/sbin/usbip"
sudo = true
timeout_secs = 10

[[hosts.configured]]
address = "192.168.1.100"
name = "lab-pi"

[[hosts.configured]]
address = "10.0.0.9"

[[hosts.configured]]
address = "10.0.0.7"
name = "bench"
"#;

/// Answers `usbip` commands from canned text and records what was run
#[derive(Default)]
struct ScriptedUsbip {
    listings: HashMap<String, String>,
    ports: String,
    issued: RefCell<Vec<UsbipCommand>>,
}

impl ScriptedUsbip {
    fn with_listing(mut self, host: &str, text: impl Into<String>) -> Self {
        self.listings.insert(host.to_string(), text.into());
        self
    }

    fn issued(&self) -> Vec<UsbipCommand> {
        self.issued.borrow().clone()
    }
}

impl UsbipRunner for ScriptedUsbip {
    async fn run(&self, command: &UsbipCommand) -> Result<String> {
        self.issued.borrow_mut().push(command.clone());
        match command {
            UsbipCommand::List { host } => match self.listings.get(host) {
                Some(text) => Ok(text.clone()),
                None => Err(Error::Timeout {
                    command: command.to_string(),
                    secs: 10,
                }),
            },
            UsbipCommand::Port => Ok(self.ports.clone()),
            _ => Ok(String::new()),
        }
    }
}

/// Picks the first item whose label contains `needle`
struct ByLabel {
    needle: &'static str,
    titles: Vec<String>,
}

impl Picker for ByLabel {
    fn pick(&mut self, title: &str, items: &[PickItem]) -> Result<Option<usize>> {
        self.titles.push(title.to_string());
        Ok(items.iter().position(|i| i.label.contains(self.needle)))
    }
}

fn load_config() -> ClientConfig {
    let dir = tempdir().unwrap();
    let path = dir.path().join("client.toml");
    std::fs::write(&path, CONFIG).unwrap();
    ClientConfig::load(Some(path)).unwrap()
}

#[test]
fn test_config_file_fields() {
    let config = load_config();
    assert_eq!(config.client.log_level, "debug");
    assert_eq!(config.usbip.binary_path(), "/usr/sbin/usbip");
    assert!(config.usbip.sudo);
    assert_eq!(
        config.host_addresses(),
        ["192.168.1.100", "10.0.0.9", "10.0.0.7"]
    );
    assert_eq!(config.host_display_name("10.0.0.7"), "bench");
}

#[tokio::test]
async fn test_catalog_queries_hosts_in_config_order() {
    let config = load_config();
    let usbip = ScriptedUsbip::default()
        .with_listing("192.168.1.100", SAMPLE_EXPORT_LISTING)
        .with_listing("10.0.0.7", export_listing_fixture(3));

    let catalog = with_timeout(DEFAULT_TEST_TIMEOUT, Session::new(&usbip, &config).catalog(&[]))
        .await
        .unwrap();

    let hosts: Vec<UsbipCommand> = usbip.issued();
    assert_eq!(
        hosts,
        ["192.168.1.100", "10.0.0.9", "10.0.0.7"]
            .map(|h| UsbipCommand::List { host: h.to_string() })
    );

    assert_eq!(catalog.failures.len(), 1);
    assert_eq!(catalog.failures[0].host, "10.0.0.9");
    assert!(catalog.failures[0].message.contains("timed out"));

    let clients: Vec<&str> = catalog.devices.iter().map(|d| d.client.as_str()).collect();
    assert_eq!(
        clients,
        ["192.168.1.100", "192.168.1.100", "10.0.0.7", "10.0.0.7", "10.0.0.7"]
    );
}

#[tokio::test]
async fn test_interactive_attach_from_second_host() {
    let config = load_config();
    let usbip = ScriptedUsbip::default()
        .with_listing("192.168.1.100", SAMPLE_EXPORT_LISTING)
        .with_listing("10.0.0.7", export_listing_fixture(3));
    let mut picker = ByLabel {
        needle: "Test Device 1-2",
        titles: Vec::new(),
    };

    let outcome = Session::new(&usbip, &config)
        .attach_interactive(&mut picker)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Attached {
            host: "10.0.0.7".to_string(),
            bus_id: "1-2".to_string(),
        }
    );
    assert_eq!(
        usbip.issued().last(),
        Some(&UsbipCommand::Attach {
            host: "10.0.0.7".to_string(),
            bus_id: "1-2".to_string(),
        })
    );
}

#[tokio::test]
async fn test_picker_finding_nothing_cancels() {
    let config = load_config();
    let usbip = ScriptedUsbip::default().with_listing("192.168.1.100", SAMPLE_EXPORT_LISTING);
    let mut picker = ByLabel {
        needle: "Not Plugged In",
        titles: Vec::new(),
    };

    let outcome = Session::new(&usbip, &config)
        .attach_interactive(&mut picker)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(picker.titles, ["Attach USB device"]);
    assert!(
        usbip
            .issued()
            .iter()
            .all(|c| matches!(c, UsbipCommand::List { .. }))
    );
}

#[tokio::test]
async fn test_interactive_detach() {
    let config = ClientConfig::default();
    let usbip = ScriptedUsbip {
        ports: port_listing_fixture(4),
        ..Default::default()
    };
    let mut picker = ByLabel {
        needle: "Test Device 1-3",
        titles: Vec::new(),
    };

    let outcome = Session::new(&usbip, &config)
        .detach_interactive(&mut picker)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Detached { port: "03".to_string() });
    assert_eq!(
        usbip.issued(),
        [
            UsbipCommand::Port,
            UsbipCommand::Detach {
                port: "03".to_string()
            }
        ]
    );
}

#[tokio::test]
async fn test_detach_with_nothing_attached() {
    let config = ClientConfig::default();
    let usbip = ScriptedUsbip {
        ports: port_listing_fixture(0),
        ..Default::default()
    };
    let mut picker = ByLabel {
        needle: "",
        titles: Vec::new(),
    };

    let outcome = Session::new(&usbip, &config)
        .detach_interactive(&mut picker)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::NothingToShow(NO_ATTACHED_DEVICES.to_string()));
    assert!(picker.titles.is_empty());
}

#[tokio::test]
async fn test_listing_json_shape() {
    let config = load_config();
    let usbip = ScriptedUsbip::default().with_listing("192.168.1.100", SAMPLE_EXPORT_LISTING);

    let catalog = Session::new(&usbip, &config)
        .catalog(&["lab-pi".to_string()])
        .await;
    let json = serde_json::to_value(&catalog.devices).unwrap();

    assert_eq!(json[0]["client"], "192.168.1.100");
    assert_eq!(json[0]["vendor_id"], "046d");
    assert_eq!(json[1]["bus_id"], "1-2");
    assert_eq!(json[1]["interfaces"][0]["description"], "Mass Storage / SCSI / Bulk-Only");
}
