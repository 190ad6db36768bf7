//! Page fetching
//!
//! The orchestrator only knows the [`PageFetcher`] trait: give it an address,
//! get back a [`Page`] whose links are already absolute and normalized, or a
//! [`FetchError`]. [`HttpFetcher`] is the production implementation:
//! - Building an HTTP client with the configured user agent and timeouts
//! - GET requests, following a bounded number of redirects
//! - Non-success statuses reported as errors
//! - Title and link extraction through [`parse_html`]

use crate::config::{HttpConfig, UserAgentConfig};
use crate::crawler::parser::parse_html;
use crate::crawler::Page;
use crate::url::Address;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Turns an address into a page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches and parses one page
    ///
    /// The returned page is recorded under `address`, whatever redirects the
    /// transport followed.
    async fn fetch(&self, address: &Address) -> Result<Page, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sitewalk::config::{HttpConfig, UserAgentConfig};
/// use sitewalk::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .redirect(Policy::limited(http.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP(S) with reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from configuration
    pub fn from_config(
        user_agent: &UserAgentConfig,
        http: &HttpConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(user_agent, http)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, address: &Address) -> Result<Page, FetchError> {
        let response = self
            .client
            .get(address.url().clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                address: address.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                address: address.clone(),
                status: status.as_u16(),
            });
        }

        // Relative links resolve against where the content actually came from
        let base = response.url().clone();

        let body = response.text().await.map_err(|e| FetchError::Body {
            address: address.clone(),
            message: e.to_string(),
        })?;

        let parsed = parse_html(&body, &base);
        tracing::debug!(
            "Fetched {} ({} links, title {:?})",
            address,
            parsed.links.len(),
            parsed.title
        );

        Ok(Page::new(address.clone(), parsed.title, parsed.links))
    }
}
