//! Client configuration management

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A remote host exporting USB devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Address passed to `usbip list -r` / `usbip attach -r`
    pub address: String,
    /// Display name (e.g., "lab-pi")
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub client: ClientSettings,
    #[serde(default)]
    pub usbip: UsbipSettings,
    #[serde(default)]
    pub hosts: HostsSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    pub log_level: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// How the `usbip` binary is invoked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsbipSettings {
    /// Program name or path; `~` is expanded
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Prefix every invocation with `sudo`
    #[serde(default)]
    pub sudo: bool,
    /// Per-command timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_binary() -> String {
    "usbip".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for UsbipSettings {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            sudo: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UsbipSettings {
    /// The binary with a leading `~` expanded
    pub fn binary_path(&self) -> String {
        shellexpand::tilde(&self.binary).into_owned()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostsSettings {
    /// Hosts in query order
    #[serde(default)]
    pub configured: Vec<HostConfig>,
}

impl ClientConfig {
    /// Host addresses in configured order
    pub fn host_addresses(&self) -> Vec<String> {
        self.hosts
            .configured
            .iter()
            .map(|h| h.address.clone())
            .collect()
    }

    /// Find a host by address, or by name (case-insensitive)
    pub fn find_host(&self, name_or_address: &str) -> Option<&HostConfig> {
        self.hosts
            .configured
            .iter()
            .find(|h| h.address == name_or_address)
            .or_else(|| {
                self.hosts.configured.iter().find(|h| {
                    h.name
                        .as_deref()
                        .is_some_and(|n| n.eq_ignore_ascii_case(name_or_address))
                })
            })
    }

    /// Address to hand to `usbip` for a host given on the command line
    ///
    /// Configured names resolve to their address; anything else is used as-is.
    pub fn resolve_host(&self, name_or_address: &str) -> String {
        self.find_host(name_or_address)
            .map(|h| h.address.clone())
            .unwrap_or_else(|| name_or_address.to_string())
    }

    /// Get display name for a host (falls back to the address)
    pub fn host_display_name(&self, address: &str) -> String {
        self.hosts
            .configured
            .iter()
            .find(|h| h.address == address)
            .and_then(|h| h.name.clone())
            .unwrap_or_else(|| address.to_string())
    }
}

impl ClientConfig {
    /// Load configuration from the specified path
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p
        } else {
            // Try standard locations in order
            let candidates = vec![
                Self::default_path(),
                PathBuf::from("/etc/usbip-picker/client.toml"),
            ];

            candidates
                .into_iter()
                .find(|p| p.exists())
                .ok_or_else(|| anyhow!("No configuration file found, using defaults"))?
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: ClientConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        config.validate()?;

        tracing::info!("Loaded configuration from: {}", config_path.display());
        tracing::debug!("Config: {} configured hosts", config.hosts.configured.len());
        for host in &config.hosts.configured {
            tracing::debug!("  Host: name={:?}, address={}", host.name, host.address);
        }
        Ok(config)
    }

    /// Load configuration or return defaults if not found
    pub fn load_or_default() -> Self {
        match Self::load(None) {
            Ok(config) => config,
            Err(e) => {
                // Print to stderr since logging might not be initialized yet
                eprintln!("Config: {:#}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to the specified path
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!("Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("usbip-picker").join("client.toml")
        } else {
            PathBuf::from(".config/usbip-picker/client.toml")
        }
    }

    /// Where `--save-config` writes: the explicit path if one was given
    pub fn save_path(explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(Self::default_path, Path::to_path_buf)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.client.log_level.as_str()) {
            return Err(anyhow!(
                "Invalid log level '{}', must be one of: {}",
                self.client.log_level,
                valid_levels.join(", ")
            ));
        }

        if self.usbip.binary.trim().is_empty() {
            return Err(anyhow!("usbip.binary must not be empty"));
        }

        if self.usbip.timeout_secs == 0 {
            return Err(anyhow!("usbip.timeout_secs must be greater than zero"));
        }

        let mut seen = HashSet::new();
        for host in &self.hosts.configured {
            if host.address.trim().is_empty() {
                return Err(anyhow!("Empty host address in [[hosts.configured]]"));
            }
            if !seen.insert(host.address.as_str()) {
                return Err(anyhow!("Duplicate host address '{}'", host.address));
            }
        }

        Ok(())
    }
}
