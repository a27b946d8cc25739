//! HTTP transport for catalog API requests.
//!
//! The fetcher is a thin GET primitive: it returns the status code and
//! response body and does not interpret either. Classifying a non-200
//! status is the catalog client's job, which keeps "the server said no"
//! distinct from "the network broke".

use crate::{Error, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Raw result of a GET request: status plus body, uninterpreted.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// HTTP status code returned by the server.
    pub status: u16,
    /// Response body as text (error pages included).
    pub body: String,
}

impl FetchOutcome {
    /// Whether the request completed with HTTP 200.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// HTTP client for fetching catalog API resources.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a new fetcher with the default request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(90))
    }

    /// Creates a new fetcher with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("shopsnap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }

    /// Perform a GET request and return the status and body.
    ///
    /// Only transport-level failures (connect errors, timeouts, body read
    /// failures) produce an `Err`; HTTP error statuses come back as data.
    pub async fn fetch(&self, url: &str) -> Result<FetchOutcome> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(%status, bytes = body.len(), %url, "fetched catalog resource");
        Ok(FetchOutcome { status, body })
    }
}
