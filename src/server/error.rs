//! Server error types.

use thiserror::Error;

/// Errors that can occur while starting or running the relay server.
///
/// Protocol-level failures (undecodable frames, dead peer channels) are
/// deliberately not represented here; they are logged and dropped per the
/// best-effort relay semantics.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
