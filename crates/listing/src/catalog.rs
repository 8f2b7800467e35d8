//! Device catalog across all configured hosts
//!
//! Queries every host for its export listing, parses each one with the host
//! as the device `client`, and concatenates the results in host order. A
//! host that fails to answer contributes nothing; the rest still count.

use std::fmt;
use std::future::Future;

use tracing::{debug, warn};

use crate::export::parse_export_listing;
use crate::types::UsbDevice;

/// Something that can fetch the raw export listing of a host
///
/// In the client this runs `usbip list -r <host>`; tests use canned text.
pub trait ListingSource {
    type Error: fmt::Display;

    fn fetch_export_listing(&self, host: &str) -> impl Future<Output = Result<String, Self::Error>>;
}

/// A host whose listing could not be retrieved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFailure {
    pub host: String,
    pub message: String,
}

/// Why a catalog has nothing to offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NoHostsConfigured,
    NoDevicesFound,
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::NoHostsConfigured => write!(f, "No hosts configured"),
            EmptyReason::NoDevicesFound => write!(f, "No exportable USB devices found"),
        }
    }
}

/// What the caller should present
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOutcome {
    Devices(Vec<UsbDevice>),
    NothingToShow(EmptyReason),
}

/// Result of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Devices grouped by host in query order
    pub devices: Vec<UsbDevice>,
    /// Hosts that failed, in query order
    pub failures: Vec<HostFailure>,
    /// Number of hosts queried
    pub hosts_queried: usize,
}

impl Catalog {
    pub fn outcome(self) -> CatalogOutcome {
        if self.hosts_queried == 0 {
            CatalogOutcome::NothingToShow(EmptyReason::NoHostsConfigured)
        } else if self.devices.is_empty() {
            CatalogOutcome::NothingToShow(EmptyReason::NoDevicesFound)
        } else {
            CatalogOutcome::Devices(self.devices)
        }
    }
}

/// Query each host in order and build the flat device catalog
///
/// Never fails: per-host errors are logged and recorded in
/// [`Catalog::failures`]. Failed hosts are not retried.
pub async fn collect_catalog<S, H>(source: &S, hosts: &[H]) -> Catalog
where
    S: ListingSource,
    H: AsRef<str>,
{
    let mut catalog = Catalog {
        hosts_queried: hosts.len(),
        ..Default::default()
    };

    for host in hosts {
        let host = host.as_ref();
        match source.fetch_export_listing(host).await {
            Ok(text) => {
                let devices = parse_export_listing(&text, host);
                debug!("Host {} exports {} devices", host, devices.len());
                catalog.devices.extend(devices);
            }
            Err(e) => {
                warn!("Failed to list devices on {}: {}", host, e);
                catalog.failures.push(HostFailure {
                    host: host.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct CannedSource(HashMap<&'static str, Result<&'static str, &'static str>>);

    impl ListingSource for CannedSource {
        type Error = String;

        async fn fetch_export_listing(&self, host: &str) -> Result<String, String> {
            match self.0.get(host) {
                Some(Ok(text)) => Ok(text.to_string()),
                Some(Err(e)) => Err(e.to_string()),
                None => Err(format!("unknown host {}", host)),
            }
        }
    }

    #[tokio::test]
    async fn test_empty_host_list() {
        let source = CannedSource(HashMap::new());
        let hosts: [&str; 0] = [];
        let catalog = collect_catalog(&source, &hosts).await;
        assert_eq!(
            catalog.outcome(),
            CatalogOutcome::NothingToShow(EmptyReason::NoHostsConfigured)
        );
    }

    #[tokio::test]
    async fn test_hosts_without_devices() {
        let source = CannedSource(HashMap::from([("a", Ok("Exportable USB devices\n")), ("b", Err("refused"))]));
        let catalog = collect_catalog(&source, &["a", "b"]).await;
        assert_eq!(catalog.failures.len(), 1);
        assert_eq!(
            catalog.outcome(),
            CatalogOutcome::NothingToShow(EmptyReason::NoDevicesFound)
        );
    }

    #[tokio::test]
    async fn test_devices_tagged_with_host() {
        let source = CannedSource(HashMap::from([
            ("a", Ok("  1-1: A : One (0001:0001)\n  1-2: A : Two (0001:0002)\n")),
            ("b", Ok("  2-1: B : Three (0002:0001)\n")),
        ]));
        let catalog = collect_catalog(&source, &["b", "a"]).await;
        let clients: Vec<_> = catalog.devices.iter().map(|d| d.location()).collect();
        assert_eq!(clients, ["2-1@b", "1-1@a", "1-2@a"]);
        assert!(catalog.failures.is_empty());
    }

    #[test]
    fn test_empty_reason_display() {
        assert_eq!(EmptyReason::NoHostsConfigured.to_string(), "No hosts configured");
        assert!(EmptyReason::NoDevicesFound.to_string().contains("No exportable"));
    }
}
