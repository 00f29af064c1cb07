//! LessonReel CLI
//!
//! Command-line front end for generating lesson videos and browsing the
//! videos generated so far.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lessonreel")]
#[command(about = "Turn documents or notes into educational videos", long_about = None)]
struct Cli {
    /// Learning-content service URL [default: http://localhost:8000]
    #[arg(long, env = "LESSONREEL_API_URL")]
    api_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, env = "LESSONREEL_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Seconds between job status probes [env: POLL_INTERVAL, default: 3]
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Seconds between history refreshes [env: HISTORY_INTERVAL, default: 5]
    #[arg(long)]
    history_interval: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lessonreel_cli=info,lessonreel_studio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(
        cli.api_url,
        cli.token,
        cli.poll_interval,
        cli.history_interval,
    )?;

    handle_command(cli.command, &config).await
}
