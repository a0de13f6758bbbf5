use anyhow::{Context, Result};
use clap::Parser;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;
use voxport_bridge::{AppPorts, BridgeHost};
use voxport_core::PortMessage;

#[derive(Parser)]
#[command(name = "voxport", about = "Speech recognition bridged to an application over ports")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "voxport.toml")]
    config: PathBuf,

    /// Record immediately and print transcripts to stdout instead of running the TUI
    #[arg(long)]
    headless: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = voxport_core::AppConfig::load_from_file(&cli.config)
        .with_context(|| format!("failed to load config from {:?}", cli.config))?;

    let log_buffer = Arc::new(Mutex::new(VecDeque::<String>::new()));
    let tui_log_layer = voxport_tui::TuiLogLayer::new(Arc::clone(&log_buffer), 1000);

    let env_filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // The TUI owns the terminal, so stderr output is only wanted headless.
    let fmt_layer = cli.headless.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
    });

    let subscriber = tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(tui_log_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    tracing::info!("voxport starting");

    let registry = voxport_engine::RecognizerRegistry::new();
    let recognizer = voxport_bridge::probe(&registry, &config.recognizer).await;

    let mut host = BridgeHost::spawn(recognizer);
    let ports = host
        .take_ports()
        .context("bridge ports already taken")?;

    if cli.headless {
        run_headless(ports).await?;
    } else {
        tracing::info!("TUI active, press 'r' to record and 'q' to quit");
        voxport_tui::run(ports, log_buffer)
            .await
            .context("TUI error")?;
    }

    tracing::info!("shutting down");
    host.shutdown().await;

    Ok(())
}

async fn run_headless(mut ports: AppPorts) -> Result<()> {
    ports
        .commands
        .start_recording()
        .context("failed to send startRecording")?;

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for ctrl-c")?;
                break;
            }
            message = ports.messages.recv() => match message {
                Some(PortMessage::TranscriptionReceived(text)) => println!("{text}"),
                Some(PortMessage::RecordingError(error)) => tracing::error!("{error}"),
                None => break,
            },
        }
    }

    let _ = ports.commands.stop_recording();
    Ok(())
}
