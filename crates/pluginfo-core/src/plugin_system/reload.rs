use std::fmt;

use log::{error, info, warn};

use crate::plugin_system::dependency::{DependencyError, ReloadPlan};
use crate::plugin_system::host::PluginHost;
use crate::plugin_system::registry::PluginRegistry;

/// A single side effect issued against the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadAction {
    Unload,
    Load,
    SyncCommands,
}

impl fmt::Display for ReloadAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReloadAction::Unload => write!(f, "unload"),
            ReloadAction::Load => write!(f, "load"),
            ReloadAction::SyncCommands => write!(f, "sync commands"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    Failed(String),
}

/// One executed step and how it went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadStep {
    pub action: ReloadAction,
    /// `None` for host-wide actions
    pub plugin: Option<String>,
    pub outcome: StepOutcome,
}

impl ReloadStep {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, StepOutcome::Failed(_))
    }
}

impl fmt::Display for ReloadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.plugin {
            Some(plugin) => write!(f, "{} {}", self.action, plugin)?,
            None => write!(f, "{}", self.action)?,
        }
        match &self.outcome {
            StepOutcome::Succeeded => write!(f, ": ok"),
            StepOutcome::Failed(message) => write!(f, ": failed ({})", message),
        }
    }
}

/// Everything a reload did, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadReport {
    plan: ReloadPlan,
    steps: Vec<ReloadStep>,
}

impl ReloadReport {
    pub fn plan(&self) -> &ReloadPlan {
        &self.plan
    }

    pub fn steps(&self) -> &[ReloadStep] {
        &self.steps
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReloadStep> {
        self.steps.iter().filter(|step| step.is_failure())
    }

    /// Whether every step succeeded
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Executes reload plans against a [`PluginHost`].
///
/// Plugins are unloaded in plan order, then loaded in reverse order, then the
/// host's commands are resynchronized. A failed step is logged and recorded;
/// the remaining steps still run.
pub struct ReloadDriver<'h> {
    host: &'h dyn PluginHost,
}

impl<'h> ReloadDriver<'h> {
    pub fn new(host: &'h dyn PluginHost) -> Self {
        Self { host }
    }

    /// Resolve the plan for `target` and execute it
    pub async fn reload(&self, registry: &PluginRegistry, target: &str) -> Result<ReloadReport, DependencyError> {
        let plan = registry.plan_reload(target)?;
        info!("Plugin disable order: [{}]", plan.order().join(", "));
        Ok(self.execute(plan).await)
    }

    /// Execute an already resolved plan
    pub async fn execute(&self, plan: ReloadPlan) -> ReloadReport {
        let mut steps = Vec::with_capacity(plan.len() * 2 + 1);

        for plugin in plan.order() {
            let outcome = self.host.unload(plugin).await;
            steps.push(self.record(ReloadAction::Unload, Some(plugin.as_str()), outcome));
        }
        for plugin in plan.order().iter().rev() {
            let outcome = self.host.load(plugin).await;
            steps.push(self.record(ReloadAction::Load, Some(plugin.as_str()), outcome));
        }
        let outcome = self.host.sync_commands().await;
        steps.push(self.record(ReloadAction::SyncCommands, None, outcome));

        let report = ReloadReport { plan, steps };
        let failed = report.failures().count();
        if failed > 0 {
            warn!(
                "Reload of '{}' via {} finished with {} failed step(s)",
                report.plan.target(),
                self.host.name(),
                failed
            );
        } else {
            info!("Reload of '{}' via {} finished", report.plan.target(), self.host.name());
        }
        report
    }

    fn record<E: fmt::Display>(&self, action: ReloadAction, plugin: Option<&str>, outcome: Result<(), E>) -> ReloadStep {
        let outcome = match outcome {
            Ok(()) => StepOutcome::Succeeded,
            Err(e) => {
                error!("Failed to {} {}: {}", action, plugin.unwrap_or("<host>"), e);
                StepOutcome::Failed(e.to_string())
            }
        };
        ReloadStep {
            action,
            plugin: plugin.map(str::to_string),
            outcome,
        }
    }
}
