//! `usbip` execution via `tokio::process`

use common::{Error, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, trace};

use super::{UsbipCommand, UsbipRunner};
use crate::config::UsbipSettings;

/// Runs the real `usbip` binary
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    binary: String,
    sudo: bool,
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(binary: impl Into<String>, sudo: bool, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            sudo,
            timeout,
        }
    }

    pub fn from_settings(settings: &UsbipSettings) -> Self {
        Self::new(settings.binary_path(), settings.sudo, settings.timeout())
    }
}

impl UsbipRunner for ProcessRunner {
    async fn run(&self, command: &UsbipCommand) -> Result<String> {
        let argv = command.argv(&self.binary, self.sudo);
        let cmdline = argv.join(" ");
        debug!("Running: {}", cmdline);

        let child = Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, child).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(Error::Spawn {
                    command: cmdline,
                    source,
                });
            }
            Err(_) => {
                return Err(Error::Timeout {
                    command: cmdline,
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: cmdline,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        trace!("`{}` printed {} bytes", cmdline, stdout.len());
        Ok(stdout)
    }
}
