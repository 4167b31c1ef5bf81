//! # PlugInfo Core Kernel Errors
//!
//! Defines the top-level error type shared by every subsystem.
//!
//! [`Error`] wraps the typed errors of the plugin system and the storage
//! layer so that callers (most notably the `pluginfo` binary) can propagate
//! any failure with `?` and still match on the originating subsystem.
use std::path::PathBuf;
use std::result::Result as StdResult;

use crate::plugin_system::dependency::DependencyError;
use crate::plugin_system::error::PluginSystemError;
use crate::storage::error::StorageSystemError;
use thiserror::Error as ThisError;

/// Custom error type for the PlugInfo application
#[derive(Debug, ThisError)]
pub enum Error {
    /// Specific, typed plugin system error
    #[error("Plugin system error: {0}")]
    PluginSystem(#[from] PluginSystemError),

    /// Specific, typed storage system error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<DependencyError> for Error {
    fn from(err: DependencyError) -> Self {
        Error::PluginSystem(PluginSystemError::DependencyResolution(err))
    }
}

impl Error {
    /// Wraps an I/O failure with the operation and path it happened on.
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        Error::StorageSystem(StorageSystemError::io(source, operation, path))
    }

    /// Returns the dependency error at the root of this error, if any.
    pub fn as_dependency_error(&self) -> Option<&DependencyError> {
        match self {
            Error::PluginSystem(PluginSystemError::DependencyResolution(err)) => Some(err),
            _ => None,
        }
    }
}
