//! Builder for [`CellsparseClient`](crate::io::CellsparseClient)
//!
//! Configures the endpoint URL and the optional request timeout. The
//! underlying HTTP client is pinned to HTTP/1.1 to match the service.

use std::time::Duration;

use crate::error::{CellsparseError, Result};
use crate::io::client::CellsparseClient;

/// Builder for a blocking Cellsparse client
///
/// # Examples
///
/// ```no_run
/// use cellsparse_rust::io::ClientBuilder;
/// use std::time::Duration;
///
/// // Block indefinitely, like the original client
/// let client = ClientBuilder::new("http://127.0.0.1:8000").build()?;
///
/// // Or bound the wait and get a distinct Timeout error on expiry
/// let client = ClientBuilder::new("http://127.0.0.1:8000")
///     .timeout(Duration::from_secs(600))
///     .build()?;
/// # Ok::<(), cellsparse_rust::CellsparseError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    endpoint: String,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Start building a client for the given endpoint URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        ClientBuilder {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    /// Bound the total time of one request/response exchange
    ///
    /// Default: no timeout, the call blocks until the service responds.
    /// When set, expiry surfaces as
    /// [`CellsparseError::Timeout`](crate::CellsparseError::Timeout) rather
    /// than a generic transport failure.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<CellsparseClient> {
        let http = reqwest::blocking::Client::builder()
            .http1_only()
            .timeout(self.timeout)
            .build()
            .map_err(CellsparseError::Transport)?;
        Ok(CellsparseClient::from_parts(
            self.endpoint,
            self.timeout,
            http,
        ))
    }
}
