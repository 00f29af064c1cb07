//! Studio configuration
//!
//! Defines where the video generation API lives and how often the two
//! background timers fire.

use std::time::Duration;

/// Default base URL of the learning-content service
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Studio configuration
///
/// Intervals are configurable so tests and slow deployments can tune them.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Service base URL (e.g., "http://localhost:8000")
    pub api_url: String,

    /// How often the status poller probes a job that has not finished
    pub poll_interval: Duration,

    /// How often the history list is refreshed
    pub history_interval: Duration,

    /// Upper bound on a single HTTP request
    pub request_timeout: Duration,
}

impl StudioConfig {
    /// Creates a new configuration with default intervals
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            poll_interval: Duration::from_secs(3),
            history_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognized environment variables:
    /// - LESSONREEL_API_URL (optional, default: http://localhost:8000)
    /// - POLL_INTERVAL (optional, seconds, default: 3)
    /// - HISTORY_INTERVAL (optional, seconds, default: 5)
    /// - REQUEST_TIMEOUT (optional, seconds, default: 30)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup("LESSONREEL_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let defaults = Self::new(api_url);

        let secs = |var: &str, default: Duration| -> anyhow::Result<Duration> {
            match lookup(var) {
                Some(value) => value
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| anyhow::anyhow!("{} must be a number of seconds, got {:?}", var, value)),
                None => Ok(default),
            }
        };

        Ok(Self {
            poll_interval: secs("POLL_INTERVAL", defaults.poll_interval)?,
            history_interval: secs("HISTORY_INTERVAL", defaults.history_interval)?,
            request_timeout: secs("REQUEST_TIMEOUT", defaults.request_timeout)?,
            ..defaults
        })
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_history_interval(mut self, interval: Duration) -> Self {
        self.history_interval = interval;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.history_interval.is_zero() {
            anyhow::bail!("history_interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL.to_string())
    }
}
