//! User-facing rendering of operation outcomes
//!
//! The core returns error values and never talks to a display. Hosts that
//! show blocking dialogs render them through this module, which keeps the
//! wording in one place and the core testable without a display environment.

use crate::error::CellsparseError;

/// Render a failure as the message a host dialog shows
///
/// Names the failing operation and carries the full error detail; for
/// protocol failures that includes the HTTP status code and the raw
/// response body verbatim.
pub fn render_failure(operation: &str, error: &CellsparseError) -> String {
    format!("{operation} failed: {error}")
}

/// Render the confirmation shown after a successful model reset
pub fn render_reset_confirmation(model_name: &str) -> String {
    format!("Model \"{model_name}\" is reset")
}
