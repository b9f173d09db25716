//! Command-line front end: one subcommand per report.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::error;

use netscribe::session::{DeviceSession, Session, SessionBuilder};
use netscribe::settings::Settings;
use netscribe::transport::HostKeyVerification;
use netscribe::{output, report};

#[derive(Parser)]
#[command(name = "netscribe")]
#[command(about = "Scrape Cisco device diagnostics into CSV reports.")]
#[command(version)]
struct CommandLine {
    /// Device hostname or IP address
    #[arg(long, short = 'H')]
    host: String,

    /// SSH port
    #[arg(long, short = 'p', default_value_t = 22)]
    port: u16,

    /// SSH username
    #[arg(long, short = 'u')]
    user: String,

    /// SSH password (omit when using --key)
    #[arg(long, short = 'P', env = "NETSCRIBE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Path to an SSH private key
    #[arg(long, short = 'k')]
    key: Option<PathBuf>,

    /// Pin the platform instead of auto-detecting
    /// (cisco_ios, cisco_nxos, cisco_asa)
    #[arg(long)]
    platform: Option<String>,

    /// Per-command timeout in seconds
    #[arg(long, short = 't', default_value_t = 30)]
    timeout: u64,

    /// Settings file path
    #[arg(long, default_value = "netscribe-settings.json")]
    settings: PathBuf,

    /// Skip host key verification (lab use only)
    #[arg(long)]
    insecure: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// CDP neighbor details to CSV
    Cdp,
    /// MAC address table to CSV
    Mac,
    /// ARP table to CSV (input for port-map)
    Arp,
    /// Interface statistics to CSV
    Interfaces,
    /// Map switchports to MAC/IP/VLAN using a saved ARP CSV
    PortMap {
        /// ARP CSV written by the `arp` report
        #[arg(long)]
        arp_csv: PathBuf,
    },
    /// Next-hop route summary to CSV
    NexthopSummary {
        /// Restrict to a VRF
        #[arg(long)]
        vrf: Option<String>,
    },
    /// VLAN port counts to CSV
    Vlans,
    /// Save raw output of the configured command list
    Document,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(CommandLine::parse()).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: CommandLine) -> anyhow::Result<()> {
    let settings = Settings::load_or_create(&args.settings)
        .with_context(|| format!("loading settings from {}", args.settings.display()))?;

    let mut session = open_session(&args, &settings)
        .await
        .with_context(|| format!("connecting to {}", args.host))?;

    let outcome = dispatch(&args.command, &mut session, &settings).await;

    // Restore the terminal even when the report failed.
    if let Err(e) = session.close().await {
        error!("session close failed: {:#}", anyhow::Error::new(e));
    }

    outcome
}

async fn open_session(args: &CommandLine, settings: &Settings) -> anyhow::Result<DeviceSession> {
    let mut builder = SessionBuilder::new(&args.host)
        .port(args.port)
        .username(&args.user)
        .timeout(Duration::from_secs(args.timeout))
        .modify_term(settings.modify_term);

    if let Some(password) = &args.password {
        builder = builder.password(password);
    } else if let Some(key) = &args.key {
        builder = builder.private_key(key);
    } else {
        anyhow::bail!("either --password (or NETSCRIBE_PASSWORD) or --key is required");
    }

    if let Some(platform) = &args.platform {
        builder = builder.platform(platform);
    }
    if args.insecure {
        builder = builder.host_key_verification(HostKeyVerification::Disabled);
    }

    Ok(builder.connect().await?)
}

async fn dispatch(
    command: &Command,
    session: &mut DeviceSession,
    settings: &Settings,
) -> anyhow::Result<()> {
    match command {
        Command::Cdp => finish(report::cdp::run(session, settings).await?),
        Command::Mac => finish(report::mac_table::run(session, settings).await?),
        Command::Arp => finish(report::arp::run(session, settings).await?),
        Command::Interfaces => finish(report::interfaces::run(session, settings).await?),
        Command::PortMap { arp_csv } => {
            let arp_csv = output::expand_path(arp_csv);
            finish(report::port_map::run(session, settings, &arp_csv).await?)
        }
        Command::NexthopSummary { vrf } => {
            finish(report::nexthop::run(session, settings, vrf.as_deref()).await?)
        }
        Command::Vlans => finish(report::vlans::run(session, settings).await?),
        Command::Document => {
            for path in report::document::run(session, settings).await? {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

fn finish(path: PathBuf) -> anyhow::Result<()> {
    println!("{}", path.display());
    Ok(())
}
