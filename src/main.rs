//! sysmon_api - Host Metrics API Binary
//!
//! Serves host metrics as JSON for a polling dashboard, or prints one snapshot.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use std::time::Duration;
use sysmon_api::{
    start_web_server, MonitorService, MonotonicClock, SysinfoProvider, WebConfig,
    DEFAULT_HOST, DEFAULT_USB_MOUNT_POINT, DEFAULT_WEB_PORT,
};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Window between the priming sample and the printed one in `snapshot`.
const SNAPSHOT_WINDOW: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(name = "sysmon_api")]
#[command(about = "Host metrics JSON API for polling dashboards")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Web server bind address
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Web server port
    #[arg(short, long, default_value_t = DEFAULT_WEB_PORT)]
    port: u16,

    /// Mount point reported as the secondary (USB) disk
    #[arg(long, default_value = DEFAULT_USB_MOUNT_POINT)]
    usb_mount: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server (default)
    Serve,

    /// Print a single snapshot as JSON and exit
    Snapshot(SnapshotArgs),
}

#[derive(Args)]
struct SnapshotArgs {
    /// Which endpoint payload to print
    #[arg(short, long, value_enum, default_value_t = SnapshotTarget::Stats)]
    target: SnapshotTarget,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum SnapshotTarget {
    Stats,
    Processes,
    Interfaces,
    All,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    let config = WebConfig::new(&cli.host, cli.port).with_usb_mount_point(&cli.usb_mount);

    match &cli.command {
        Some(Commands::Snapshot(args)) => snapshot_command(config, args.target).await,
        Some(Commands::Serve) | None => serve_command(config).await,
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

async fn serve_command(config: WebConfig) -> anyhow::Result<()> {
    info!("Bind address: {}", config.bind_address());
    info!("Excluded interfaces: {}", config.excluded_interfaces.join(", "));

    start_web_server(config)
        .await
        .context("System monitor API stopped")?;

    Ok(())
}

async fn snapshot_command(config: WebConfig, target: SnapshotTarget) -> anyhow::Result<()> {
    let service = Arc::new(MonitorService::new(
        Arc::new(SysinfoProvider::new()),
        Arc::new(MonotonicClock::new()),
        &config,
    ));

    let primer = Arc::clone(&service);
    tokio::task::spawn_blocking(move || {
        primer.engine().compute_network_rates();
        primer.engine().compute_process_cpu();
    })
    .await?;
    tokio::time::sleep(SNAPSHOT_WINDOW).await;

    let json = tokio::task::spawn_blocking(move || -> serde_json::Result<String> {
        let value = match target {
            SnapshotTarget::Stats => serde_json::to_value(service.system_stats())?,
            SnapshotTarget::Processes => serde_json::to_value(service.processes())?,
            SnapshotTarget::Interfaces => serde_json::to_value(service.interfaces())?,
            SnapshotTarget::All => serde_json::json!({
                "stats": service.system_stats(),
                "processes": service.processes(),
                "interfaces": service.interfaces(),
            }),
        };
        serde_json::to_string_pretty(&value)
    })
    .await??;

    println!("{}", json);
    Ok(())
}
