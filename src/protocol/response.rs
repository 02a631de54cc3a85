//! Predicted objects returned by the service
//!
//! A successful training/inference call answers with a JSON array of
//! annotation objects (geometry plus classification, in the host's own
//! schema). The client never constructs these objects and does not depend on
//! their internal shape: each one is carried as an opaque pass-through value
//! and handed to the annotation store unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CellsparseError, Result};
use crate::hierarchy::Classification;

/// One predicted annotation object, carried verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictedObject(Value);

impl PredictedObject {
    /// Wrap a raw object value
    pub fn new(value: Value) -> Self {
        PredictedObject(value)
    }

    /// View the raw payload
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume into the raw payload
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Classification assigned by the service, if any
    ///
    /// Reads the `properties/classification/name` path of the usual GeoJSON
    /// feature layout; anything else is treated as unclassified.
    pub fn classification(&self) -> Classification {
        self.0
            .pointer("/properties/classification/name")
            .and_then(Value::as_str)
            .map(|name| Classification::Classified(name.to_string()))
            .unwrap_or(Classification::Unclassified)
    }
}

/// Parse a 200 response body into predicted objects
///
/// The body must be a JSON array; anything else is a
/// [`CellsparseError::Decode`].
pub fn parse_predictions(body: &str) -> Result<Vec<PredictedObject>> {
    serde_json::from_str(body).map_err(CellsparseError::Decode)
}
