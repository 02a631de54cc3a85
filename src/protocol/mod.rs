//! Cellsparse service protocol
//!
//! Request and response bodies exchanged with the service, matching its JSON
//! wire format exactly.

pub mod request;
pub mod response;

// Re-export commonly used types
pub use request::{
    ResetRequest, TrainingConfig, TrainingRequest, TrainingRequestBuilder, DEFAULT_MODEL_NAME,
};
pub use response::{parse_predictions, PredictedObject};
