//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod video;

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a video from a document or from text
    Generate {
        /// Lesson text or math expressions
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Document to upload (PDF, TXT, or TEX)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print the job id and return without waiting for the video
        #[arg(long)]
        no_wait: bool,
    },
    /// Show the current status of a job
    Status {
        /// Job ID
        job_id: String,
    },
    /// List your videos
    History,
    /// Keep the video list on screen, refreshing it periodically
    Watch {
        /// Stop after this many refreshes
        #[arg(long)]
        refreshes: Option<u64>,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Generate {
            text,
            file,
            no_wait,
        } => video::generate(config, text, file, no_wait).await,
        Commands::Status { job_id } => video::show_status(config, &job_id).await,
        Commands::History => video::list_history(config).await,
        Commands::Watch { refreshes } => video::watch_history(config, refreshes).await,
    }
}
