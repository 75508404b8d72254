use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use hostsnap::config::{Config, load_config, load_config_from_path};
use hostsnap::report;
use hostsnap::system::collector::Collector;
use hostsnap::system::platform;
use hostsnap::system::provider::SysinfoProvider;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "hostsnap",
    about = "One-shot host resource snapshot: CPU, memory, disks, top processes, network"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// CPU sampling window in seconds
    #[arg(long)]
    sample_secs: Option<u64>,

    /// Number of processes in the top-memory section
    #[arg(long)]
    top: Option<usize>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    let provider = SysinfoProvider::new();
    let mut collector = Collector::new(
        provider,
        platform::current(),
        Duration::from_secs(config.general.sample_secs),
    );
    let snapshot = collector.collect();

    print!("{}", report::render(&snapshot, config.general.top_processes));
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(secs) = cli.sample_secs {
        config.general.sample_secs = secs;
    }
    if let Some(top) = cli.top {
        config.general.top_processes = top;
    }

    config
}
