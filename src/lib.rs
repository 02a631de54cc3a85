//! Cellsparse Client in Rust
//!
//! This library is a client for the Cellsparse sparse-annotation deep-learning
//! service: it prepares microscopy image volumes and sparse human-made label
//! annotations, ships them to a remote training/inference endpoint, and merges
//! the predicted objects back into the host's annotation hierarchy.
//!
//! # Features
//!
//! - **Lossless payload codec** - PNG + base64 per frame, pixel-exact round trip
//! - **All-or-nothing volumes** - a partial, desynchronized payload is never sent
//! - **Checked label composition** - the pixelwise-maximum merge precondition is
//!   verified instead of silently assumed
//! - **Fire-once protocol client** - blocking HTTP/1.1 exchange, no automatic retry
//! - **Type-level reconciliation rule** - unclassified annotations are disposable,
//!   classified ones are never touched
//! - **Explicit error handling** - every failure surfaces as a typed error value
//!
//! # Quick Start
//!
//! ```no_run
//! use cellsparse_rust::commands::{run_training, run_reset};
//! use cellsparse_rust::io::ClientBuilder;
//! use cellsparse_rust::protocol::TrainingConfig;
//! use std::time::Duration;
//!
//! # fn example(
//! #     images: impl cellsparse_rust::source::RegionSource<Frame = image::DynamicImage>,
//! #     background: impl cellsparse_rust::source::RegionSource<Frame = cellsparse_rust::source::LabelFrame>,
//! #     foreground: impl cellsparse_rust::source::RegionSource<Frame = cellsparse_rust::source::LabelFrame>,
//! #     store: &mut dyn cellsparse_rust::hierarchy::AnnotationStore,
//! # ) -> cellsparse_rust::Result<()> {
//! let client = ClientBuilder::new("http://127.0.0.1:8000")
//!     .timeout(Duration::from_secs(600))
//!     .build()?;
//! let config = TrainingConfig::default();
//!
//! // Train on the current annotations, then merge the predictions back
//! let summary = run_training(
//!     &client, &images, &background, &foreground, store, &config, true,
//! )?;
//! println!("removed {}, added {}", summary.removed, summary.added);
//!
//! // Or discard the model's learned state
//! run_reset(&client, &config)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The library is organized around the data path from host rasters to the
//! service and back:
//!
//! - **`source`** - Host-provided raster interfaces
//!   - `RegionSource` - region-read contract for image and label channels
//!   - `MemorySource` - in-memory reference implementation
//!
//! - **`codec`** - Payload construction
//!   - `frame` - lossless per-frame codec (PNG + base64)
//!   - `compositor` - background/foreground label merge (pixelwise maximum)
//!   - `volume` - delimiter-joined volume serialization
//!
//! - **`protocol`** - Wire format
//!   - `request` - `TrainingRequest` / `ResetRequest` bodies and builder
//!   - `response` - opaque `PredictedObject` pass-through
//!
//! - **`io`** - Network exchange
//!   - `ClientBuilder` / `CellsparseClient` - blocking HTTP/1.1 client
//!
//! - **`hierarchy`** - Annotation store interface and reconciliation
//!
//! - **`commands`** - The top-level training/inference and reset operations
//!
//! - **`report`** - Renders errors and confirmations for a host UI
//!
//! # Error Handling
//!
//! All operations return `Result<T, CellsparseError>`. Common error types:
//!
//! - **Encoding** - a raster could not be encoded losslessly
//! - **Read** - a region read failed; the whole volume is aborted
//! - **Composition** - label geometry mismatch or merge precondition violation
//! - **Transport** / **Timeout** - network failure vs configured-timeout expiry
//! - **Protocol** - non-200 HTTP status, body carried verbatim
//! - **Decode** - a 200 response that was not a valid prediction array
//!
//! ```no_run
//! use cellsparse_rust::io::CellsparseClient;
//! use cellsparse_rust::CellsparseError;
//!
//! match CellsparseClient::new("http://127.0.0.1:8000") {
//!     Ok(client) => println!("client ready for {}", client.endpoint()),
//!     Err(CellsparseError::Transport(e)) => eprintln!("cannot build client: {e}"),
//!     Err(e) => eprintln!("unexpected error: {e}"),
//! }
//! ```

pub mod codec;
pub mod commands;
pub mod error;
pub mod hierarchy;
pub mod io;
pub mod protocol;
pub mod report;
pub mod source;

// Re-export commonly used types
pub use error::{CellsparseError, Result};
