//! Configuration module
//!
//! Turns command-line settings into the studio configuration and an API client.
//! Flags override the environment, which overrides the built-in defaults.

use anyhow::{Context, Result};
use lessonreel_client::{EnvToken, StaticToken, VideoClient};
use lessonreel_studio::StudioConfig;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Engine settings (URL and timer cadences)
    pub studio: StudioConfig,
    /// Token given on the command line, if any
    pub token: Option<String>,
}

impl Config {
    pub fn new(
        api_url: Option<String>,
        token: Option<String>,
        poll_interval_secs: Option<u64>,
        history_interval_secs: Option<u64>,
    ) -> Result<Self> {
        let mut studio = StudioConfig::from_env().context("Invalid environment configuration")?;

        if let Some(api_url) = api_url {
            studio.api_url = api_url;
        }
        if let Some(secs) = poll_interval_secs {
            studio = studio.with_poll_interval(Duration::from_secs(secs));
        }
        if let Some(secs) = history_interval_secs {
            studio = studio.with_history_interval(Duration::from_secs(secs));
        }
        studio.validate().context("Invalid configuration")?;

        Ok(Self { studio, token })
    }

    /// Builds the HTTP client for the configured service
    pub fn client(&self) -> Result<VideoClient> {
        let client = match &self.token {
            Some(token) => VideoClient::with_timeout(
                &self.studio.api_url,
                self.studio.request_timeout,
                StaticToken::new(token.clone()),
            ),
            None => VideoClient::with_timeout(
                &self.studio.api_url,
                self.studio.request_timeout,
                EnvToken::default(),
            ),
        };

        client.context("Failed to build HTTP client")
    }
}
