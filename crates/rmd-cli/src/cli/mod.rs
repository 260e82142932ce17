//! CLI for the rmd remote MP3 duration probe.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rmd_core::config;

use commands::{run_duration, run_frame, run_probe};

/// Top-level CLI for rmd.
#[derive(Debug, Parser)]
#[command(name = "rmd")]
#[command(about = "rmd: estimate remote MP3 duration via byte-range requests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Estimate the playback duration of a remote MP3.
    Duration {
        /// Direct HTTP/HTTPS URL of the MP3 stream.
        url: String,

        /// Print H:MM:SS instead of raw seconds.
        #[arg(long)]
        human: bool,
    },

    /// Show remote metadata (content length, range support) for a URL.
    Probe {
        /// Direct HTTP/HTTPS URL.
        url: String,
    },

    /// Locate and decode the first MPEG frame header of a remote MP3.
    Frame {
        /// Direct HTTP/HTTPS URL of the MP3 stream.
        url: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Duration { url, human } => run_duration(&cfg, &url, human).await?,
            CliCommand::Probe { url } => run_probe(&cfg, &url).await?,
            CliCommand::Frame { url } => run_frame(&cfg, &url).await?,
        }

        Ok(())
    }
}
