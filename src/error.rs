//! # Error Types
//!
//! Custom error types for YSF Bridge using `thiserror`.
//!
//! These cover configuration and file I/O only. The frame-processing entry
//! points never fail: decode failures relay erasures, overflow drops the
//! frame, and timer expiry is an ordinary session event.

use thiserror::Error;

/// Main error type for YSF Bridge
#[derive(Debug, Error)]
pub enum YsfBridgeError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for YSF Bridge
pub type Result<T> = std::result::Result<T, YsfBridgeError>;
