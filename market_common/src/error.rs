//! Error types shared between the feed and its consumers.
//!
//! The `FeedError` enum unifies common failure cases for I/O, serialization,
//! configuration and symbol parsing, allowing crates to propagate a single
//! error type. The feed's own subscribe/tick operations never fail; errors only
//! surface at construction time and in the outer tooling.
use std::io;

use thiserror::Error;

/// Unified error type shared by the feed and the CLI.
#[derive(Error, Debug)]
pub enum FeedError {
    /// I/O error originating from the standard library (files, stdout).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Error while parsing a symbol list into catalog keys.
    #[error("Parse symbols error: {0}")]
    ParseSymbols(String),

    /// Rejected feed configuration (e.g. empty tick period range).
    #[error("Invalid feed configuration: {0}")]
    InvalidConfig(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = FeedError::InvalidConfig("tick_min_ms must be below tick_max_ms".into());
        assert_eq!(
            err.to_string(),
            "Invalid feed configuration: tick_min_ms must be below tick_max_ms"
        );
    }
}
