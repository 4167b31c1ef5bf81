use std::collections::HashMap;

use log::warn;

use crate::plugin_system::dependency::{build_depended_graph, DependedGraph, DependencyError, ReloadPlan};
use crate::plugin_system::descriptor::PluginDescriptor;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::registration::{Permission, PluginCommand, RegisteredListener};

/// Read-only snapshot of everything the host has loaded.
///
/// Plugins keep the order they were registered in, which is the order every
/// listing reports them in.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    /// Registered plugins, in snapshot order
    plugins: Vec<PluginDescriptor>,
    /// Plugin name to position in `plugins`
    index: HashMap<String, usize>,
    /// Event name to listeners, in host dispatch order
    listeners: HashMap<String, Vec<RegisteredListener>>,
    /// Permission name to permission
    permissions: HashMap<String, Permission>,
    /// Command name to command
    commands: HashMap<String, PluginCommand>,
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    pub fn register_plugin(&mut self, descriptor: PluginDescriptor) -> Result<(), PluginSystemError> {
        if descriptor.name.is_empty() {
            return Err(PluginSystemError::RegistrationError {
                plugin_id: descriptor.name,
                message: "plugin name must not be empty".to_string(),
            });
        }
        if self.index.contains_key(&descriptor.name) {
            return Err(PluginSystemError::RegistrationError {
                plugin_id: descriptor.name,
                message: "plugin already registered".to_string(),
            });
        }
        self.index.insert(descriptor.name.clone(), self.plugins.len());
        self.plugins.push(descriptor);
        Ok(())
    }

    /// Register an event listener
    pub fn register_listener(&mut self, event: &str, listener: RegisteredListener) {
        self.listeners.entry(event.to_string()).or_default().push(listener);
    }

    /// Register a permission, replacing any previous one with the same name
    pub fn register_permission(&mut self, permission: Permission) {
        if let Some(previous) = self.permissions.insert(permission.name.clone(), permission) {
            warn!("Permission '{}' registered twice, keeping the last one", previous.name);
        }
    }

    /// Register a command, replacing any previous one with the same name
    pub fn register_command(&mut self, command: PluginCommand) {
        if let Some(previous) = self.commands.insert(command.name.clone(), command) {
            warn!("Command '{}' registered twice, keeping the last one", previous.name);
        }
    }

    /// Check if a plugin is registered by name
    pub fn has_plugin(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get a plugin descriptor by name
    pub fn get_plugin(&self, name: &str) -> Option<&PluginDescriptor> {
        self.index.get(name).map(|&i| &self.plugins[i])
    }

    /// Iterate over registered plugins in snapshot order
    pub fn iter_plugins(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.plugins.iter()
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Plugin names containing `fragment`, in snapshot order
    pub fn complete_plugins(&self, fragment: &str) -> Vec<String> {
        self.plugins
            .iter()
            .filter(|p| p.name.contains(fragment))
            .map(|p| p.name.clone())
            .collect()
    }

    /// Listeners registered for `event`, if the host knows the event
    pub fn listeners_for(&self, event: &str) -> Option<&[RegisteredListener]> {
        self.listeners.get(event).map(Vec::as_slice)
    }

    pub fn get_permission(&self, name: &str) -> Option<&Permission> {
        self.permissions.get(name)
    }

    pub fn get_command(&self, name: &str) -> Option<&PluginCommand> {
        self.commands.get(name)
    }

    /// Build a fresh reverse-dependency graph from this snapshot
    pub fn depended_graph(&self) -> DependedGraph {
        build_depended_graph(self)
    }

    /// Resolve the reload plan for an installed plugin
    pub fn plan_reload(&self, target: &str) -> Result<ReloadPlan, DependencyError> {
        if !self.has_plugin(target) {
            return Err(DependencyError::TargetNotFound(target.to_string()));
        }
        self.depended_graph().resolve(target)
    }
}
