//! Error types for the refresh engine.

use thiserror::Error;

use crate::network::EnumerationError;

/// Error type for engine startup.
///
/// External lookup failures never show up here; they are recorded in the
/// snapshot instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The initial interface enumeration failed.
    #[error("Initial refresh failed: {0}")]
    Enumeration(#[from] EnumerationError),
}
