//! Blocking HTTP client for the Cellsparse service
//!
//! One POST per operation over HTTP/1.1, blocking the calling thread until
//! the service responds or the transport fails. Deliberately fire-once: a
//! training request is expensive and not idempotent-safe, so there is no
//! retry and no backoff; every failure surfaces immediately.

use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, info, trace};

use crate::error::{CellsparseError, Result};
use crate::io::builder::ClientBuilder;
use crate::protocol::{parse_predictions, PredictedObject, ResetRequest, TrainingRequest};

/// Blocking Cellsparse service client
///
/// Owns no connection state between calls; each request is its own exchange.
///
/// **Recommended**: construct via [`ClientBuilder`] to configure a timeout:
/// ```no_run
/// use cellsparse_rust::io::ClientBuilder;
/// use std::time::Duration;
///
/// let client = ClientBuilder::new("http://127.0.0.1:8000")
///     .timeout(Duration::from_secs(600))
///     .build()?;
/// # Ok::<(), cellsparse_rust::CellsparseError>(())
/// ```
pub struct CellsparseClient {
    endpoint: String,
    timeout: Option<Duration>,
    http: HttpClient,
}

impl CellsparseClient {
    /// Client for the given endpoint URL with default options
    ///
    /// No timeout is set: the call blocks until the service responds, which
    /// matches how long-running training calls behave.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(endpoint).build()
    }

    pub(crate) fn from_parts(
        endpoint: String,
        timeout: Option<Duration>,
        http: HttpClient,
    ) -> Self {
        CellsparseClient {
            endpoint,
            timeout,
            http,
        }
    }

    /// Endpoint URL this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a training/inference request and parse the predicted objects
    ///
    /// On HTTP 200 the body is parsed as a JSON array of
    /// [`PredictedObject`]s. Any non-200 status is a
    /// [`CellsparseError::Protocol`] carrying the status code and the raw
    /// body verbatim.
    pub fn train(&self, request: &TrainingRequest) -> Result<Vec<PredictedObject>> {
        let body = self.post(request.to_json()?)?;
        let objects = parse_predictions(&body)?;
        debug!(count = objects.len(), "parsed predicted objects");
        Ok(objects)
    }

    /// Send a model reset request
    ///
    /// Success is an HTTP 200; the response body is ignored.
    pub fn reset(&self, request: &ResetRequest) -> Result<()> {
        self.post(request.to_json()?)?;
        Ok(())
    }

    /// One blocking POST; returns the body of a 200 response
    fn post(&self, body: String) -> Result<String> {
        info!("POST {}", self.endpoint);
        trace!("request body: {} bytes", body.len());

        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(body)
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().map_err(|e| self.classify(e))?;
        debug!("response: status {}, {} bytes", status, body.len());

        if status == StatusCode::OK {
            Ok(body)
        } else {
            Err(CellsparseError::Protocol {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Distinguish a configured-timeout expiry from other transport failures
    fn classify(&self, error: reqwest::Error) -> CellsparseError {
        match (error.is_timeout(), self.timeout) {
            (true, Some(limit)) => CellsparseError::Timeout { limit },
            _ => CellsparseError::Transport(error),
        }
    }
}
