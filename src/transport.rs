//! HTTP transport used to fetch pages from the archive.
//!
//! The scraper only depends on the [`Fetch`] trait, so tests (or other
//! callers) can swap in a substitute transport. [`HttpFetcher`] is the
//! reqwest-backed implementation:
//!
//! - relative URIs are resolved against a fixed base URL
//! - redirects are **not** followed, a 3xx is reported like any other non-2xx
//! - the timeout is unbounded unless [`TransportConfig::timeout`] is set
//! - the underlying client is built on first use and reused afterwards

use crate::error::{Result, ScrapeError};
use once_cell::sync::OnceCell;
use reqwest::{Client, redirect::Policy};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Capability to fetch the body of a page by relative or absolute URI.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// Fetch `uri` and return the response body.
    ///
    /// Fails with a transport-class [`ScrapeError`] on network failure or a
    /// non-2xx status.
    async fn fetch(&self, uri: &str) -> Result<String>;
}

/// Knobs for the HTTP client.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// [`Fetch`] implementation over a lazily-built `reqwest::Client`.
#[derive(Debug)]
pub struct HttpFetcher {
    base_url: Url,
    config: TransportConfig,
    client: OnceCell<Client>,
}

impl HttpFetcher {
    pub fn new(base_url: Url, config: TransportConfig) -> Self {
        Self {
            base_url,
            config,
            client: OnceCell::new(),
        }
    }

    /// Resolve `uri` against the base URL.
    ///
    /// A link that cannot be resolved fails like a fetch would, with a
    /// transport-class [`ScrapeError::InvalidUri`].
    pub fn resolve(&self, uri: &str) -> Result<Url> {
        self.base_url.join(uri).map_err(|e| ScrapeError::InvalidUri {
            uri: uri.to_string(),
            reason: e.to_string(),
        })
    }

    fn client(&self) -> Result<&Client> {
        self.client.get_or_try_init(|| {
            let mut builder = Client::builder()
                .redirect(Policy::none())
                .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
            if let Some(timeout) = self.config.timeout {
                builder = builder.timeout(timeout);
            }
            debug!(timeout = ?self.config.timeout, "Building HTTP client");
            builder
                .build()
                .map_err(|e| ScrapeError::Configuration(format!("Failed to build HTTP client: {e}")))
        })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, uri: &str) -> Result<String> {
        let url = self.resolve(uri)?;
        let response = self
            .client()?
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Transport {
                uri: uri.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%uri, status = status.as_u16(), "Non-success response");
            return Err(ScrapeError::Status {
                uri: uri.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ScrapeError::Transport {
                uri: uri.to_string(),
                source,
            })?;
        debug!(%uri, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}

/// In-memory transport for tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages; any other URI fails with a 404.
    #[derive(Debug, Default)]
    pub(crate) struct StaticFetcher {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl StaticFetcher {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_page(mut self, uri: &str, html: &str) -> Self {
            self.pages.insert(uri.to_string(), html.to_string());
            self
        }

        /// URIs requested so far, in order.
        pub(crate) fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Fetch for StaticFetcher {
        async fn fetch(&self, uri: &str) -> Result<String> {
            self.requests.lock().unwrap().push(uri.to_string());
            self.pages.get(uri).cloned().ok_or_else(|| ScrapeError::Status {
                uri: uri.to_string(),
                status: 404,
            })
        }
    }
}
