//! usbip-picker
//!
//! Interactive front end for the `usbip` tool: list what configured hosts
//! export, attach a device, and detach it again.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::config::ClientConfig;
use client::output;
use client::session::{Outcome, Session};
use client::tui::TuiPicker;
use client::usbip::ProcessRunner;
use common::setup_logging;
use listing::CatalogOutcome;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "usbip-picker")]
#[command(author, version, about = "Pick remote USB devices to attach with usbip")]
#[command(long_about = "
Lists the USB devices exported by the configured usbip hosts and attaches
or detaches them through the usbip command-line tool.

EXAMPLES:
    # Pick a device from all configured hosts and attach it
    usbip-picker

    # Show everything the configured hosts export, as JSON
    usbip-picker list --json

    # Attach directly, using a configured host name
    usbip-picker attach --host lab-pi --bus-id 1-1

    # Pick an attached device and detach it
    usbip-picker detach

CONFIGURATION:
    The client looks for configuration files in the following order:
    1. Path specified with --config
    2. ~/.config/usbip-picker/client.toml
    3. /etc/usbip-picker/client.toml
    4. Built-in defaults
")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Save default configuration (to --config PATH if given) and exit
    #[arg(long)]
    save_config: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List devices exported by the configured hosts
    List {
        /// Query this host instead of the configured ones (repeatable)
        #[arg(long = "host", value_name = "HOST")]
        hosts: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List devices attached to local ports
    Ports {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Attach a remote device (interactive unless --host and --bus-id are given)
    Attach {
        /// Host address or configured name
        #[arg(long, value_name = "HOST", requires = "bus_id")]
        host: Option<String>,

        /// Bus id on the host (e.g. 1-1)
        #[arg(long, value_name = "BUS_ID", requires = "host")]
        bus_id: Option<String>,
    },
    /// Detach an attached device (interactive unless --port is given)
    Detach {
        /// Local port number
        #[arg(long, value_name = "PORT")]
        port: Option<String>,
    },
    /// Show the configured hosts
    Hosts,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Handle --save-config flag early (before loading config)
    if args.save_config {
        let config = ClientConfig::default();
        let path = ClientConfig::save_path(args.config.as_deref());
        config.save(&path).context("Failed to save configuration")?;
        println!("Configuration saved to: {}", path.display());
        return Ok(());
    }

    // Load configuration first (to get log level from config if not specified)
    let config = if let Some(ref path) = args.config {
        ClientConfig::load(Some(path.clone())).context("Failed to load configuration")?
    } else {
        ClientConfig::load_or_default()
    };

    // Use CLI log level if specified, otherwise use config value
    let log_level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.client.log_level);

    setup_logging(log_level).context("Failed to setup logging")?;

    debug!("usbip-picker v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "usbip binary: {} (sudo: {}, timeout: {}s)",
        config.usbip.binary_path(),
        config.usbip.sudo,
        config.usbip.timeout_secs
    );

    let runner = ProcessRunner::from_settings(&config.usbip);
    let session = Session::new(&runner, &config);

    match args.command {
        Some(Commands::List { hosts, json }) => list(&session, &config, &hosts, json).await,
        Some(Commands::Ports { json }) => ports(&session, json).await,
        Some(Commands::Attach {
            host: Some(host),
            bus_id: Some(bus_id),
        }) => {
            let outcome = session
                .attach(&host, &bus_id)
                .await
                .with_context(|| format!("Failed to attach {} from {}", bus_id, host))?;
            report(&outcome);
            Ok(())
        }
        Some(Commands::Detach { port: Some(port) }) => {
            let outcome = session
                .detach(&port)
                .await
                .with_context(|| format!("Failed to detach port {}", port))?;
            report(&outcome);
            Ok(())
        }
        Some(Commands::Detach { port: None }) => {
            let outcome = session
                .detach_interactive(&mut TuiPicker::new())
                .await
                .context("Detach failed")?;
            report(&outcome);
            Ok(())
        }
        Some(Commands::Hosts) => {
            if config.hosts.configured.is_empty() {
                println!("No hosts configured");
            } else {
                print!("{}", output::format_hosts(&config));
            }
            Ok(())
        }
        Some(Commands::Attach { .. }) | None => {
            info!("Starting interactive attach");
            let outcome = session
                .attach_interactive(&mut TuiPicker::new())
                .await
                .context("Attach failed")?;
            report(&outcome);
            Ok(())
        }
    }
}

async fn list(
    session: &Session<'_, ProcessRunner>,
    config: &ClientConfig,
    hosts: &[String],
    json: bool,
) -> Result<()> {
    let catalog = session.catalog(hosts).await;
    eprint!("{}", output::format_failures(&catalog.failures, config));

    match catalog.outcome() {
        CatalogOutcome::Devices(devices) if json => print_json(&devices),
        CatalogOutcome::Devices(devices) => {
            print!("{}", output::format_devices(&devices, config));
            Ok(())
        }
        CatalogOutcome::NothingToShow(_) if json => print_json(&Vec::<()>::new()),
        CatalogOutcome::NothingToShow(reason) => {
            println!("{}", reason);
            Ok(())
        }
    }
}

async fn ports(session: &Session<'_, ProcessRunner>, json: bool) -> Result<()> {
    let ports = session
        .ports()
        .await
        .context("Failed to list attached ports")?;

    if json {
        print_json(&ports)
    } else if ports.is_empty() {
        println!("{}", client::session::NO_ATTACHED_DEVICES);
        Ok(())
    } else {
        print!("{}", output::format_ports(&ports));
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Attached { .. } | Outcome::Detached { .. } => println!("{}", outcome),
        Outcome::NothingToShow(_) | Outcome::Cancelled => eprintln!("{}", outcome),
    }
}
