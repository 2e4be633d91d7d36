//! Error types for starpet-engine

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the engine
///
/// Mutations never fail with these; they only come from configuration and
/// from explicitly awaiting storage work.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// Storage backend error
    #[error("storage error: {0}")]
    Storage(#[from] starpet_db::Error),

    /// The background persistence writer has stopped
    #[error("persistence writer is no longer running")]
    WriterClosed,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Compile-time check that Error is Send + Sync for thread-safe error propagation.
fn _assert_error_send_sync<T: Send + Sync>() {}
fn _error_is_send_sync() {
    _assert_error_send_sync::<Error>();
}
