//! Sitewalk: a concurrent same-site crawler
//!
//! This crate crawls a website from a seed address with a fixed pool of
//! workers sharing one frontier, and produces a map from every visited
//! address to its title and outgoing links.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use crate::crawler::ResultStore;
use crate::url::Address;
use thiserror::Error;

/// Main error type for Sitewalk operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Crawl failed: {0}")]
    Orchestration(#[from] OrchestrationError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to turn a single address into a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {address}: {source}")]
    Transport {
        address: Address,
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {address}")]
    Status { address: Address, status: u16 },

    #[error("Unreadable body for {address}: {message}")]
    Body { address: Address, message: String },
}

impl FetchError {
    /// The address whose fetch failed
    pub fn address(&self) -> &Address {
        match self {
            Self::Transport { address, .. }
            | Self::Status { address, .. }
            | Self::Body { address, .. } => address,
        }
    }
}

/// The first fetch failure seen by any worker, surfaced to the crawl's caller
///
/// Pages completed before the failure stay reachable through [`partial`].
///
/// [`partial`]: OrchestrationError::partial
#[derive(Debug, Error)]
#[error("worker {worker} stopped the crawl: {source}")]
pub struct OrchestrationError {
    worker: usize,
    #[source]
    source: FetchError,
    partial: ResultStore,
}

impl OrchestrationError {
    pub(crate) fn new(worker: usize, source: FetchError, partial: ResultStore) -> Self {
        Self {
            worker,
            source,
            partial,
        }
    }

    /// Index of the worker that observed the failure
    pub fn worker(&self) -> usize {
        self.worker
    }

    /// The fetch failure that stopped the crawl
    pub fn fetch_error(&self) -> &FetchError {
        &self.source
    }

    /// Pages recorded before the crawl wound down
    pub fn partial(&self) -> &ResultStore {
        &self.partial
    }

    /// Consumes the error, keeping the best-effort results
    pub fn into_partial(self) -> ResultStore {
        self.partial
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Sitewalk operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlOutcome, Crawler, DedupPolicy, Frontier, Page};
pub use url::{normalize_address, OriginPrefix};
