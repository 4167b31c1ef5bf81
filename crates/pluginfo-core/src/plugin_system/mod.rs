//! # PlugInfo Plugin System
//!
//! Everything the `pluginfo` command knows about the host's plugins.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`descriptor`]**: Plugin metadata ([`PluginDescriptor`]) including the
//!   mandatory (`depend`) and optional (`softdepend`) dependency lists.
//! - **[`registration`]**: Listener, permission and command registrations.
//! - **[`registry`]**: The read-only snapshot ([`PluginRegistry`]) that every
//!   command works from.
//! - **[`snapshot`]**: Loading a registry from a host-exported JSON, YAML or
//!   TOML file.
//! - **[`dependency`]**: The reverse-dependency graph ([`DependedGraph`]) and
//!   the reload ordering ([`ReloadPlan`]).
//! - **[`host`]**: The [`PluginHost`] seam through which unload/load steps
//!   reach the live server.
//! - **[`reload`]**: Executing a reload plan step by step ([`ReloadDriver`]).
//! - **[`report`]**: Text rendering for each inspection command.
//! - **[`error`]**: [`PluginSystemError`](error::PluginSystemError).
pub mod dependency;
pub mod descriptor;
pub mod error;
pub mod host;
pub mod registration;
pub mod registry;
pub mod reload;
pub mod report;
pub mod snapshot;

pub use dependency::{build_depended_graph, DependedGraph, DependencyError, ReloadPlan};
pub use descriptor::{DescriptorBuilder, LoadPhase, PluginDependency, PluginDescriptor};
pub use host::{CommandDispatchHost, DryRunHost, PluginHost};
pub use registry::PluginRegistry;
pub use reload::{ReloadDriver, ReloadReport};
// Test module declaration
#[cfg(test)]
mod tests;
