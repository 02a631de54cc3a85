//! Training and reset request bodies
//!
//! These structs serialize to the exact JSON the Cellsparse service expects;
//! field names (`b64img`, `b64lbl`, `batchsize`, ...) are part of the wire
//! format and must not be renamed. No client-side range validation is
//! performed beyond the types themselves: out-of-range hyperparameters are
//! the server's concern.

use serde::{Deserialize, Serialize};

use crate::codec::EncodedVolume;
use crate::error::{CellsparseError, Result};

/// Model name used when the caller does not pick one
pub const DEFAULT_MODEL_NAME: &str = "default";

/// Caller-facing configuration for a training/inference call
///
/// Documented defaults rather than implicit constants, so a host can manage
/// several named models with different hyperparameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Server-side model identifier
    pub model_name: String,
    /// Number of training epochs
    pub epochs: u32,
    /// Training batch size
    pub batchsize: u32,
    /// Training steps per epoch
    pub steps: u32,
}

impl Default for TrainingConfig {
    /// Model `"default"` with hyperparameters (1, 8, 200)
    fn default() -> Self {
        TrainingConfig {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            epochs: 1,
            batchsize: 8,
            steps: 200,
        }
    }
}

/// Body of a training/inference request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRequest {
    /// Server-side model identifier
    pub model_name: String,
    /// Encoded image volume
    pub b64img: String,
    /// Encoded label volume
    pub b64lbl: String,
    /// Whether the service should (re)train before predicting
    pub train: bool,
    /// Whether the service should run prediction and return objects
    pub eval: bool,
    /// Number of training epochs
    pub epochs: u32,
    /// Training batch size
    pub batchsize: u32,
    /// Training steps per epoch
    pub steps: u32,
}

impl TrainingRequest {
    /// Start building a request for the given model
    ///
    /// Hyperparameters start from the [`TrainingConfig`] defaults.
    pub fn builder(model_name: impl Into<String>) -> TrainingRequestBuilder {
        let defaults = TrainingConfig::default();
        TrainingRequestBuilder {
            request: TrainingRequest {
                model_name: model_name.into(),
                b64img: String::new(),
                b64lbl: String::new(),
                train: false,
                eval: true,
                epochs: defaults.epochs,
                batchsize: defaults.batchsize,
                steps: defaults.steps,
            },
        }
    }

    /// Serialize to the JSON body sent over the wire
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(CellsparseError::Serialize)
    }
}

/// Builder for [`TrainingRequest`]
///
/// Starts from the documented defaults: `eval` true, `train` false, empty
/// volumes, hyperparameters (1, 8, 200).
#[derive(Debug, Clone)]
pub struct TrainingRequestBuilder {
    request: TrainingRequest,
}

impl TrainingRequestBuilder {
    /// Set the encoded image volume
    pub fn b64img(mut self, volume: EncodedVolume) -> Self {
        self.request.b64img = volume.into_string();
        self
    }

    /// Set the encoded label volume
    pub fn b64lbl(mut self, volume: EncodedVolume) -> Self {
        self.request.b64lbl = volume.into_string();
        self
    }

    /// Request (re)training before prediction
    pub fn train(mut self, train: bool) -> Self {
        self.request.train = train;
        self
    }

    /// Request prediction in the response
    pub fn eval(mut self, eval: bool) -> Self {
        self.request.eval = eval;
        self
    }

    /// Override the number of epochs
    pub fn epochs(mut self, epochs: u32) -> Self {
        self.request.epochs = epochs;
        self
    }

    /// Override the batch size
    pub fn batchsize(mut self, batchsize: u32) -> Self {
        self.request.batchsize = batchsize;
        self
    }

    /// Override the steps per epoch
    pub fn steps(mut self, steps: u32) -> Self {
        self.request.steps = steps;
        self
    }

    /// Finish building
    pub fn build(self) -> TrainingRequest {
        self.request
    }
}

/// Body of a model reset request
///
/// Instructs the service to discard the named model's learned state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetRequest {
    /// Server-side model identifier
    pub model_name: String,
}

impl ResetRequest {
    /// Reset request for the given model
    pub fn new(model_name: impl Into<String>) -> Self {
        ResetRequest {
            model_name: model_name.into(),
        }
    }

    /// Serialize to the JSON body sent over the wire
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(CellsparseError::Serialize)
    }
}
