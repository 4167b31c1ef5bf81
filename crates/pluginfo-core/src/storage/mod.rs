//! # PlugInfo Storage
//!
//! File access behind the [`StorageProvider`] trait, the
//! [`LocalStorageProvider`] implementation, and the [`config`] module that
//! maps file extensions to serde formats and loads [`PluginfoConfig`].
pub mod config;
pub mod error;
pub mod local;
pub mod provider;

/// Re-export key types
pub use config::{ConfigFormat, PluginfoConfig};
pub use error::StorageSystemError;
pub use local::LocalStorageProvider;
pub use provider::StorageProvider;

// Test module declaration
#[cfg(test)]
mod tests;
