//! Network I/O module for the Cellsparse service exchange
//!
//! Provides the blocking HTTP client and its builder.

pub mod builder;
pub mod client;

pub use builder::ClientBuilder;
pub use client::CellsparseClient;
