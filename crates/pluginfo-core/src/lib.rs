pub mod kernel;
pub mod plugin_system;
pub mod storage;

// Re-export key public types for easier use by the binary
pub use kernel::error::Error as KernelError;
pub use plugin_system::{
    DependedGraph, DependencyError, PluginDescriptor, PluginHost, PluginRegistry, ReloadDriver,
    ReloadPlan,
};
pub use storage::{LocalStorageProvider, PluginfoConfig, StorageProvider};
