//! # PlugInfo Plugin System Errors
//!
//! Defines error types specific to the plugin system.
//!
//! [`PluginSystemError`] covers registry construction (duplicate names,
//! malformed snapshots), dependency resolution failures (wrapping
//! [`DependencyError`]) and failures reported by a
//! [`PluginHost`](crate::plugin_system::host::PluginHost) while executing a
//! reload step.
// crates/pluginfo-core/src/plugin_system/error.rs
use std::path::PathBuf;
use crate::plugin_system::dependency::DependencyError;

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    #[error("Plugin registration error for '{plugin_id}': {message}")]
    RegistrationError {
        plugin_id: String,
        message: String,
    },

    #[error("Dependency resolution failed: {0}")]
    DependencyResolution(#[from] DependencyError),

    #[error("Registry snapshot error for '{}': {message}", path.display())]
    SnapshotError {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Host action '{operation}' failed for plugin '{plugin}': {message}", plugin = .plugin_id.as_deref().unwrap_or("<none>"))]
    HostActionFailed {
        plugin_id: Option<String>,
        operation: String,
        message: String,
    },
}

impl PluginSystemError {
    pub(crate) fn host_failure(plugin_id: Option<&str>, operation: &str, message: impl Into<String>) -> Self {
        PluginSystemError::HostActionFailed {
            plugin_id: plugin_id.map(str::to_string),
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}
