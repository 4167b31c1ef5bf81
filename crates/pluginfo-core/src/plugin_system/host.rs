use std::sync::Mutex;

use async_trait::async_trait;
use log::{debug, info};
use tokio::process::Command;

use crate::kernel::constants::NAME_PLACEHOLDER;
use crate::plugin_system::error::PluginSystemError;

/// The live plugin host that reload steps act upon.
///
/// Each call acts on exactly one plugin and completes before the next one is
/// issued, since an unload can change what the following step observes.
#[async_trait]
pub trait PluginHost: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Disable and unload a single plugin
    async fn unload(&self, plugin: &str) -> Result<(), PluginSystemError>;

    /// Load and enable a single plugin
    async fn load(&self, plugin: &str) -> Result<(), PluginSystemError>;

    /// Rebuild the host's command tree after plugins came and went
    async fn sync_commands(&self) -> Result<(), PluginSystemError> {
        Ok(())
    }
}

/// Drives the host by running console commands, one child process per step.
///
/// Templates are split on whitespace before `{name}` is substituted, so a
/// plugin name always ends up as part of a single argument.
#[derive(Debug, Clone)]
pub struct CommandDispatchHost {
    unload_template: Vec<String>,
    load_template: Vec<String>,
    sync_command: Option<Vec<String>>,
}

impl CommandDispatchHost {
    /// Create a host from unload and load command templates
    pub fn new(unload_template: &str, load_template: &str) -> Self {
        Self {
            unload_template: split_template(unload_template),
            load_template: split_template(load_template),
            sync_command: None,
        }
    }

    /// Also run `command` when the command tree needs to be resynchronized
    pub fn with_sync_command(mut self, command: &str) -> Self {
        self.sync_command = Some(split_template(command));
        self
    }

    /// The argument vector a template expands to for `plugin`
    pub fn render(template: &[String], plugin: &str) -> Vec<String> {
        template
            .iter()
            .map(|arg| arg.replace(NAME_PLACEHOLDER, plugin))
            .collect()
    }

    pub fn unload_command(&self, plugin: &str) -> Vec<String> {
        Self::render(&self.unload_template, plugin)
    }

    pub fn load_command(&self, plugin: &str) -> Vec<String> {
        Self::render(&self.load_template, plugin)
    }

    async fn dispatch(&self, operation: &str, plugin: Option<&str>, argv: &[String]) -> Result<(), PluginSystemError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| PluginSystemError::host_failure(plugin, operation, "command template is empty"))?;

        debug!("Dispatching {}: {}", operation, argv.join(" "));
        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| PluginSystemError::host_failure(plugin, operation, format!("failed to run '{}': {}", program, e)))?;

        if !output.stdout.is_empty() {
            debug!("{} output: {}", operation, String::from_utf8_lossy(&output.stdout).trim_end());
        }
        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(PluginSystemError::host_failure(
                plugin,
                operation,
                format!("'{}' exited with {}: {}", argv.join(" "), output.status, stderr.trim()),
            ))
        }
    }
}

fn split_template(template: &str) -> Vec<String> {
    template.split_whitespace().map(str::to_string).collect()
}

#[async_trait]
impl PluginHost for CommandDispatchHost {
    fn name(&self) -> &str {
        "command-dispatch"
    }

    async fn unload(&self, plugin: &str) -> Result<(), PluginSystemError> {
        let argv = self.unload_command(plugin);
        self.dispatch("unload", Some(plugin), &argv).await
    }

    async fn load(&self, plugin: &str) -> Result<(), PluginSystemError> {
        let argv = self.load_command(plugin);
        self.dispatch("load", Some(plugin), &argv).await
    }

    async fn sync_commands(&self) -> Result<(), PluginSystemError> {
        match &self.sync_command {
            Some(argv) => self.dispatch("sync_commands", None, argv).await,
            None => Ok(()),
        }
    }
}

/// Host that only reports what it would do
#[derive(Debug, Default)]
pub struct DryRunHost {
    actions: Mutex<Vec<String>>,
}

impl DryRunHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptions of every action requested so far, in order
    pub fn actions(&self) -> Vec<String> {
        match self.actions.lock() {
            Ok(actions) => actions.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, description: String) {
        info!("{}", description);
        match self.actions.lock() {
            Ok(mut actions) => actions.push(description),
            Err(poisoned) => poisoned.into_inner().push(description),
        }
    }
}

#[async_trait]
impl PluginHost for DryRunHost {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn unload(&self, plugin: &str) -> Result<(), PluginSystemError> {
        self.record(format!("Would unload {}", plugin));
        Ok(())
    }

    async fn load(&self, plugin: &str) -> Result<(), PluginSystemError> {
        self.record(format!("Would load {}", plugin));
        Ok(())
    }

    async fn sync_commands(&self) -> Result<(), PluginSystemError> {
        self.record("Would synchronize commands".to_string());
        Ok(())
    }
}
