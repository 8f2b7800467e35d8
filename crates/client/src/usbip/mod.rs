//! `usbip` command construction and execution
//!
//! Every interaction with the kernel's USB/IP stack goes through the external
//! `usbip` tool. [`UsbipCommand`] describes one invocation, [`UsbipRunner`]
//! executes it and returns stdout, and [`HostLister`] plugs a runner into the
//! device catalog.

mod process;

pub use process::ProcessRunner;

use common::{Error, Result};
use listing::ListingSource;
use std::fmt;
use std::future::Future;

/// One `usbip` subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsbipCommand {
    /// `usbip list -r <host>`
    List { host: String },
    /// `usbip attach -r <host> -b <bus_id>`
    Attach { host: String, bus_id: String },
    /// `usbip detach -p <port>`
    Detach { port: String },
    /// `usbip port`
    Port,
}

impl UsbipCommand {
    /// Arguments after the program name
    pub fn args(&self) -> Vec<String> {
        match self {
            UsbipCommand::List { host } => vec!["list".into(), "-r".into(), host.clone()],
            UsbipCommand::Attach { host, bus_id } => vec![
                "attach".into(),
                "-r".into(),
                host.clone(),
                "-b".into(),
                bus_id.clone(),
            ],
            UsbipCommand::Detach { port } => vec!["detach".into(), "-p".into(), port.clone()],
            UsbipCommand::Port => vec!["port".into()],
        }
    }

    /// Full argv for `binary`, optionally behind `sudo`
    pub fn argv(&self, binary: &str, sudo: bool) -> Vec<String> {
        let mut argv = Vec::with_capacity(7);
        if sudo {
            argv.push("sudo".to_string());
        }
        argv.push(binary.to_string());
        argv.extend(self.args());
        argv
    }
}

impl fmt::Display for UsbipCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "usbip {}", self.args().join(" "))
    }
}

/// Executes `usbip` commands
///
/// Success yields the command's stdout. Spawn failures, non-zero exits and
/// timeouts are errors.
pub trait UsbipRunner {
    fn run(&self, command: &UsbipCommand) -> impl Future<Output = Result<String>>;
}

/// Fetches export listings through a runner
pub struct HostLister<'a, R> {
    runner: &'a R,
}

impl<'a, R: UsbipRunner> HostLister<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }
}

impl<R: UsbipRunner> ListingSource for HostLister<'_, R> {
    type Error = Error;

    async fn fetch_export_listing(&self, host: &str) -> Result<String> {
        self.runner
            .run(&UsbipCommand::List {
                host: host.to_string(),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_command_args() {
        let attach = UsbipCommand::Attach {
            host: "192.168.1.100".to_string(),
            bus_id: "1-1".to_string(),
        };
        assert_eq!(attach.args(), ["attach", "-r", "192.168.1.100", "-b", "1-1"]);
        assert_eq!(
            UsbipCommand::Detach { port: "01".to_string() }.args(),
            ["detach", "-p", "01"]
        );
        assert_eq!(UsbipCommand::Port.args(), ["port"]);
    }

    #[test]
    fn test_argv_with_sudo() {
        let list = UsbipCommand::List {
            host: "pi.local".to_string(),
        };
        assert_eq!(list.argv("usbip", false), ["usbip", "list", "-r", "pi.local"]);
        assert_eq!(
            list.argv("/usr/sbin/usbip", true),
            ["sudo", "/usr/sbin/usbip", "list", "-r", "pi.local"]
        );
    }

    #[test]
    fn test_display() {
        let list = UsbipCommand::List {
            host: "pi.local".to_string(),
        };
        assert_eq!(list.to_string(), "usbip list -r pi.local");
    }

    struct Recorder(RefCell<Vec<UsbipCommand>>);

    impl UsbipRunner for Recorder {
        async fn run(&self, command: &UsbipCommand) -> Result<String> {
            self.0.borrow_mut().push(command.clone());
            Ok("    1-1: Vendor : Product (1234:5678)\n".to_string())
        }
    }

    #[tokio::test]
    async fn test_host_lister_runs_list() {
        let recorder = Recorder(RefCell::new(Vec::new()));
        let text = HostLister::new(&recorder)
            .fetch_export_listing("10.0.0.3")
            .await
            .unwrap();

        assert!(text.contains("1-1"));
        assert_eq!(
            recorder.0.borrow().as_slice(),
            [UsbipCommand::List {
                host: "10.0.0.3".to_string()
            }]
        );
    }
}
