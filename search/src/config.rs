use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("port cannot be 0")]
    InvalidPort,

    #[error("no listener port configured and no PORT override set")]
    MissingPort,

    #[error("PORT override is not a valid port: {0}")]
    InvalidPortOverride(String),

    #[error("no flight sources configured")]
    NoSources,

    #[error("empty source name")]
    EmptySourceName,

    #[error("duplicate source name: {0}")]
    DuplicateSource(String),

    #[error("credentials must have a non-empty username and password")]
    EmptyCredentials,
}

/// Search service configuration
///
/// Sources and credentials are resolved once at process start and never
/// mutated afterwards; nothing here is re-read per request.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Main listener for incoming requests
    pub listener: Listener,
    /// Wall-clock budget for one aggregation, in milliseconds
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,
    /// Basic-auth credential pair shared by all sources
    pub credentials: Option<Credentials>,
    /// Upstream flight sources, queried concurrently on every request
    pub sources: Vec<SourceConfig>,
}

fn default_deadline_ms() -> u64 {
    950
}

/// Network listener configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Listener {
    /// Host address to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on; a `PORT` environment override wins over
    /// this value
    pub port: Option<u16>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Shared basic-auth credential pair
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Renders the pair in the `user:pass` form the fetcher expects.
    pub fn as_credential(&self) -> String {
        format!("{}:{}", self.username, self.password)
    }
}

/// One upstream flight source
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SourceConfig {
    /// Unique identifier for this source, used in logs and metrics
    pub name: String,
    /// Full endpoint URL
    ///
    /// Note: Uses the `url::Url` type for compile-time URL validation.
    /// Invalid URLs will be rejected during config deserialization.
    pub url: Url,
}

impl Config {
    /// Validates the search configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.listener.port == Some(0) {
            return Err(ValidationError::InvalidPort);
        }

        if self.sources.is_empty() {
            return Err(ValidationError::NoSources);
        }

        let mut source_names = HashSet::new();
        for source in &self.sources {
            if source.name.is_empty() {
                return Err(ValidationError::EmptySourceName);
            }

            if !source_names.insert(&source.name) {
                return Err(ValidationError::DuplicateSource(source.name.clone()));
            }
        }

        if let Some(credentials) = &self.credentials
            && (credentials.username.is_empty() || credentials.password.is_empty())
        {
            return Err(ValidationError::EmptyCredentials);
        }

        Ok(())
    }

    /// Resolves the listen port: the `PORT` environment override wins, then
    /// the config file value. A set-but-invalid override is fatal rather
    /// than silently ignored; no resolvable port at all is fatal too.
    pub fn resolve_port(&self) -> Result<u16, ValidationError> {
        if let Ok(value) = std::env::var("PORT") {
            return value
                .parse::<u16>()
                .ok()
                .filter(|port| *port != 0)
                .ok_or(ValidationError::InvalidPortOverride(value));
        }

        self.listener.port.ok_or(ValidationError::MissingPort)
    }

    /// Aggregation deadline as a `Duration`.
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}
