//! Error types for Cellsparse client operations
//!
//! This module defines all error types that can occur while preparing a
//! training/inference payload, exchanging it with the Cellsparse service,
//! and merging the response into the annotation hierarchy.

use std::time::Duration;

use thiserror::Error;

/// Cellsparse client error types
///
/// All operations in this library return `Result<T, CellsparseError>` to
/// provide explicit error handling. None of these errors trigger an automatic
/// retry: a training request is expensive and not safe to re-issue blindly,
/// so every failure is surfaced to the caller on the first attempt.
#[derive(Error, Debug)]
pub enum CellsparseError {
    /// A raster could not be encoded into (or decoded from) the lossless
    /// transport format
    ///
    /// This error occurs when:
    /// - The frame uses a pixel layout the PNG codec cannot represent
    /// - The decoded byte stream is not a valid PNG image
    #[error("Raster encoding failed: {0}")]
    Encoding(#[from] image::ImageError),

    /// An encoded frame was not valid base64
    ///
    /// Only produced on the decoding path (service side or tests); frames
    /// encoded by this client always use the standard base64 alphabet.
    #[error("Base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A region read from an image or label source failed
    ///
    /// Reported by the host-provided [`RegionSource`](crate::source::RegionSource)
    /// implementation. Volume construction aborts at the first failed read so
    /// that a partial, desynchronized payload is never sent.
    #[error("Region read failed at frame {frame}: {reason}")]
    Read {
        /// Time index of the frame whose read failed
        frame: usize,
        /// Human-readable cause reported by the source
        reason: String,
    },

    /// Two label sources could not be merged
    ///
    /// This error occurs when:
    /// - Background and foreground sources disagree on width, height, or
    ///   frame count
    /// - A nonzero foreground label is smaller than the background label at
    ///   the same pixel, which would make the pixelwise-maximum merge pick
    ///   the wrong label
    #[error("Label composition failed: {0}")]
    Composition(String),

    /// A volume has no frames to serialize
    ///
    /// Volumes must contain at least one time frame; an empty volume cannot
    /// produce a well-formed delimited payload.
    #[error("Volume contains no frames")]
    EmptyVolume,

    /// The request body could not be serialized to JSON
    #[error("Request serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The service response was not a valid JSON array of predicted objects
    ///
    /// Only raised for HTTP 200 responses; non-200 bodies are treated as
    /// human-readable text and reported via [`CellsparseError::Protocol`].
    #[error("Response decoding failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// Network-level failure during the HTTP exchange
    ///
    /// This error occurs when:
    /// - The connection was refused or could not be established
    /// - The connection dropped mid-request or mid-response
    #[error("Network transport failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The configured request timeout expired before a response arrived
    ///
    /// Only produced when the client was built with an explicit timeout;
    /// by default the client blocks until the service responds, matching
    /// the behavior expected for long-running training calls.
    #[error("Request timed out after {limit:?}")]
    Timeout {
        /// The configured timeout that expired
        limit: Duration,
    },

    /// The service answered with a non-200 HTTP status
    ///
    /// The body is carried verbatim as human-readable text; it is never
    /// parsed as JSON.
    #[error("Http error {status}: {body}")]
    Protocol {
        /// HTTP status code returned by the service
        status: u16,
        /// Raw response body
        body: String,
    },
}

/// Result type alias for Cellsparse client operations
pub type Result<T> = std::result::Result<T, CellsparseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_carries_status_and_body() {
        let err = CellsparseError::Protocol {
            status: 500,
            body: "server error".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("500"));
        assert!(rendered.contains("server error"));
    }

    #[test]
    fn test_read_error_names_frame() {
        let err = CellsparseError::Read {
            frame: 3,
            reason: "tile cache miss".to_string(),
        };
        assert!(err.to_string().contains("frame 3"));
    }

    #[test]
    fn test_timeout_is_distinct_from_transport() {
        let err = CellsparseError::Timeout {
            limit: Duration::from_secs(30),
        };
        assert!(matches!(err, CellsparseError::Timeout { .. }));
    }
}
