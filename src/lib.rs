use clap::Parser;
use std::path::PathBuf;
use tokio::{
    select,
    signal::unix::{SignalKind, signal},
};

pub mod config;
pub mod http;
pub mod metrics;
pub mod notification;
pub mod render;
pub mod report;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file (YAML). Every key is optional.
    #[arg(short, long, env = "ALERT_LOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind the HTTP listener to (overrides the config file)
    #[arg(long, env = "ALERT_LOG_HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "ALERT_LOG_PORT")]
    pub port: Option<u16>,

    /// Prefix rendered strings with the legacy `u` marker, true or false (overrides the config file)
    #[arg(long, env = "ALERT_LOG_LEGACY_STRING_MARKER", action = clap::ArgAction::Set)]
    pub legacy_string_marker: Option<bool>,
}

/// Handle signals
pub fn signal_handler() -> anyhow::Result<()> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        select! {
            _ = sigterm.recv() => {
                tracing::info!("SIGTERM received, exiting");
                std::process::exit(0);
            }
            _ = sigint.recv() => {
                tracing::info!("SIGINT received, exiting");
                std::process::exit(0);
            }
        }
    });

    Ok(())
}
