//! Video command handlers
//!
//! Handles generating videos, probing job status and showing the history.

use anyhow::{Context, Result};
use colored::*;
use lessonreel_client::ClientError;
use lessonreel_core::domain::history::HistoryEntry;
use lessonreel_core::domain::job::{JobId, JobStatus};
use lessonreel_core::domain::submission::{FileUpload, SubmissionForm};
use lessonreel_studio::{VideoBackend, VideoView, ViewSnapshot};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;

/// Submit a job and follow it until the video is ready
pub async fn generate(
    config: &Config,
    text: Option<String>,
    file: Option<PathBuf>,
    no_wait: bool,
) -> Result<()> {
    let form = match (text, file) {
        (_, Some(path)) => SubmissionForm::with_file(FileUpload::from_path(&path).await?),
        (Some(text), None) => SubmissionForm::with_text(text),
        (None, None) => anyhow::bail!("Either --text or --file is required"),
    };

    let backend: Arc<dyn VideoBackend> = Arc::new(config.client()?);
    let view = VideoView::mount(&config.studio, backend);

    let job_id = view
        .submit(form)
        .await
        .context("Failed to start generation")?;

    println!("{} {}", "Submitted job".bold(), job_id.to_string().cyan());

    if no_wait {
        println!(
            "{}",
            format!("  Check on it with: lessonreel status {}", job_id).dimmed()
        );
        return Ok(());
    }

    let snapshot = tokio::select! {
        snapshot = follow_job(&view) => snapshot,
        _ = tokio::signal::ctrl_c() => {
            view.teardown();
            info!(job_id = %job_id, "Stopped following job");
            anyhow::bail!("Interrupted; job {} keeps running on the server", job_id);
        }
    };

    print_outcome(&job_id, &snapshot)
}

/// Prints every status change until the job finishes
async fn follow_job(view: &VideoView) -> ViewSnapshot {
    let mut updates = view.job_updates();
    let mut shown = None;

    loop {
        let snapshot = view.snapshot();

        if snapshot.status() != shown {
            if let Some(status) = snapshot.status() {
                println!("  Status: {}", colorize_status(status));
            }
            shown = snapshot.status();
        }

        if snapshot.is_terminal() || updates.changed().await.is_err() {
            return snapshot;
        }
    }
}

fn print_outcome(job_id: &JobId, snapshot: &ViewSnapshot) -> Result<()> {
    match snapshot.status() {
        Some(JobStatus::Completed) => {
            println!();
            println!("{}", "Video ready!".green().bold());
            match snapshot.result_url() {
                Some(url) => println!("  {}", url.cyan()),
                None => println!("{}", "  The service did not report a video URL.".yellow()),
            }
            Ok(())
        }
        Some(JobStatus::Failed) => {
            let message = snapshot.error_message().unwrap_or_default();
            println!();
            println!("{}", "Generation failed:".red().bold());
            println!("  {}", message.red());
            anyhow::bail!("Job {} failed", job_id)
        }
        _ => anyhow::bail!("Stopped following job {} before it finished", job_id),
    }
}

/// Probe a job once and print what the service reports
pub async fn show_status(config: &Config, job_id: &str) -> Result<()> {
    let client = config.client()?;
    let job_id = JobId::new(job_id);

    let report = client
        .video_status(&job_id)
        .await
        .map_err(with_login_hint)
        .with_context(|| format!("Failed to fetch status of job {}", job_id))?;

    println!("{}", "Job Status:".bold());
    println!("  ID:      {}", job_id.to_string().cyan());
    println!("  Status:  {}", colorize_status(report.status));
    if let Some(url) = &report.video_url {
        println!("  Video:   {}", url);
    }
    if let Some(message) = &report.message {
        println!("  Message: {}", message.red());
    }

    Ok(())
}

/// Fetch the history once and print it
pub async fn list_history(config: &Config) -> Result<()> {
    let client = config.client()?;

    let videos = client
        .list_my_videos()
        .await
        .map_err(with_login_hint)
        .context("Failed to fetch video history")?;

    print_history(&videos);

    Ok(())
}

/// Mount a view and reprint the history after every refresh
pub async fn watch_history(config: &Config, refreshes: Option<u64>) -> Result<()> {
    let backend: Arc<dyn VideoBackend> = Arc::new(config.client()?);
    let view = VideoView::mount(&config.studio, backend);
    let mut updates = view.history_updates();
    let mut seen = 0;

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                seen += 1;
                println!("{}", "─".repeat(60).dimmed());
                print_history(&view.snapshot().history);

                if refreshes.is_some_and(|limit| seen >= limit) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    view.teardown();
    Ok(())
}

fn print_history(videos: &[HistoryEntry]) {
    if videos.is_empty() {
        println!("{}", "No videos yet.".yellow());
        return;
    }

    println!("{}", format!("Your Video Library ({}):", videos.len()).bold());
    println!();
    for video in videos {
        print_history_entry(video);
    }
}

fn print_history_entry(video: &HistoryEntry) {
    println!("  {} {}", "▸".cyan(), video.topic.bold());
    println!("    ID:     {}", video.id.dimmed());
    println!("    Status: {}", colorize_status(video.status));
    if video.status == JobStatus::Completed {
        if let Some(url) = &video.video_url {
            println!("    Video:  {}", url);
        }
    }
    println!();
}

/// Tells the user how to sign in when the service rejects the credentials
fn with_login_hint(err: ClientError) -> anyhow::Error {
    if err.is_unauthorized() {
        anyhow::Error::new(err).context("Not signed in; pass --token or set LESSONREEL_TOKEN")
    } else {
        err.into()
    }
}

/// Colorize job status for display
fn colorize_status(status: JobStatus) -> ColoredString {
    let status_str = status.as_str().to_uppercase();
    match status {
        JobStatus::Queued => status_str.yellow(),
        JobStatus::Started => status_str.cyan(),
        JobStatus::Completed => status_str.green(),
        JobStatus::Failed => status_str.red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_errors_carry_login_hint() {
        let err = with_login_hint(ClientError::api_error(401, r#"{"detail": "Not authenticated"}"#));
        let rendered = format!("{:#}", err);
        assert!(rendered.contains("LESSONREEL_TOKEN"));
        assert!(rendered.contains("Not authenticated"));

        let err = with_login_hint(ClientError::api_error(404, r#"{"detail": "Job not found"}"#));
        assert!(!format!("{:#}", err).contains("LESSONREEL_TOKEN"));
    }
}
