//! Operator-facing text for each inspection command.
//!
//! Every function returns the lines to print, in order. Lookups that miss
//! produce a single "not found" line rather than an error, so the caller can
//! print the result unconditionally.
use std::fmt::Display;

use crate::plugin_system::dependency::{DependedGraph, DependencyError, ReloadPlan};
use crate::plugin_system::registry::PluginRegistry;
use crate::plugin_system::reload::ReloadReport;

/// Renders items as `[a, b, c]`
pub fn format_list<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    let parts: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

fn or_null(value: Option<&str>) -> &str {
    value.unwrap_or("null")
}

fn total(count: usize) -> String {
    format!("Total {}", count)
}

pub fn list(registry: &PluginRegistry) -> Vec<String> {
    let mut lines = vec!["Plugins loaded:".to_string()];
    lines.extend(registry.iter_plugins().map(|p| format!("- {}", p.name)));
    lines.push(total(registry.plugin_count()));
    lines
}

/// Every descriptor field of one plugin
pub fn dump(registry: &PluginRegistry, name: &str) -> Vec<String> {
    let Some(desc) = registry.get_plugin(name) else {
        return vec![format!("Plugin not found: {}", name)];
    };
    vec![
        format!("Name: {}", desc.name),
        format!("Version: {}", desc.version),
        format!("Main: {}", desc.main),
        format!("Authors: {}", format_list(&desc.authors)),
        format!("Description: {}", or_null(desc.description.as_deref())),
        format!("Website: {}", or_null(desc.website.as_deref())),
        format!("Prefix: {}", or_null(desc.prefix.as_deref())),
        format!("Load: {}", desc.load),
        format!("Depend: {}", format_list(&desc.depend)),
        format!("SoftDepend: {}", format_list(&desc.soft_depend)),
        format!("LoadBefore: {}", format_list(&desc.load_before)),
        format!("Commands: {}", format_list(&desc.commands)),
        format!("Permissions: {}", format_list(&desc.permissions)),
        format!("PermissionDefault: {}", or_null(desc.permission_default.as_deref())),
        format!("Awareness: {}", format_list(&desc.awareness)),
    ]
}

/// Direct and transitive dependents of a plugin
pub fn depend(registry: &PluginRegistry, name: &str) -> Result<Vec<String>, DependencyError> {
    match registry.plan_reload(name) {
        Ok(plan) => Ok(depend_lines(&plan)),
        Err(DependencyError::TargetNotFound(missing)) => Ok(vec![format!("Plugin not found: {}", missing)]),
        Err(e) => Err(e),
    }
}

pub fn depend_lines(plan: &ReloadPlan) -> Vec<String> {
    let direct = plan.direct_dependents();
    let depending = plan.depending();
    vec![
        format!("{} directly depending: {}", direct.len(), format_list(direct)),
        format!("{} depending: {}", depending.len(), format_list(&depending)),
    ]
}

/// Plugins that list `author` among their authors, or with `negate`, those that don't
pub fn author(registry: &PluginRegistry, author: &str, negate: bool) -> Vec<String> {
    let header = if negate {
        format!("Plugins not being (co)authored by {}:", author)
    } else {
        format!("Plugins being (co)authored by {}:", author)
    };
    let matching: Vec<String> = registry
        .iter_plugins()
        .filter(|p| p.is_authored_by(author) != negate)
        .map(|p| format!("- {}", p.name))
        .collect();

    let mut lines = vec![header];
    let count = matching.len();
    lines.extend(matching);
    lines.push(total(count));
    lines
}

pub fn listen(registry: &PluginRegistry, event: &str) -> Vec<String> {
    let Some(listeners) = registry.listeners_for(event) else {
        return vec![format!("Event not found: {}", event)];
    };
    let mut lines = vec![format!("Plugins listening to {}:", event)];
    lines.extend(
        listeners
            .iter()
            .map(|l| format!("- {} ({})", l.plugin, l.priority)),
    );
    lines.push(total(listeners.len()));
    lines
}

pub fn permission(registry: &PluginRegistry, name: &str) -> Vec<String> {
    let Some(perm) = registry.get_permission(name) else {
        return vec![format!("Permission not found: {}", name)];
    };
    let mut lines = vec![
        format!("Name: {}", perm.name),
        format!("Default: {}", perm.default),
        format!("Description: {}", perm.description),
        "Children:".to_string(),
    ];
    lines.extend(
        perm.children
            .iter()
            .map(|(child, value)| format!("- {}: {}", child, value)),
    );
    lines.push(format!("Permissibles: {}", perm.permissibles));
    lines
}

pub fn command(registry: &PluginRegistry, name: &str) -> Vec<String> {
    let Some(cmd) = registry.get_command(name) else {
        return vec![format!("Plugin command not found: {}", name)];
    };
    vec![
        format!("Name: {}", cmd.name),
        format!("Plugin: {}", cmd.plugin),
        format!("Aliases: {}", format_list(&cmd.aliases)),
        format!("Description: {}", cmd.description),
        format!("Label: {}", cmd.label),
        format!("Permission: {}", or_null(cmd.permission.as_deref())),
        format!("Usage: {}", cmd.usage),
        format!("Registered: {}", cmd.registered),
    ]
}

/// Plugins whose declared API version differs from `expected`
pub fn api(registry: &PluginRegistry, expected: &str) -> Vec<String> {
    let mut lines: Vec<String> = registry
        .iter_plugins()
        .filter(|p| p.api_version.as_deref() != Some(expected))
        .map(|p| format!("- {}: {}", p.name, or_null(p.api_version.as_deref())))
        .collect();
    let count = lines.len();
    lines.push(total(count));
    lines
}

/// Dot-style dump of the whole depended graph.
///
/// Dependency targets with the most dependents come first, ties broken by
/// name. Each edge reads `dependent -> dependency`.
pub fn graph(graph: &DependedGraph) -> String {
    let mut targets: Vec<_> = graph.iter().collect();
    targets.sort_by(|(a_name, a_deps), (b_name, b_deps)| {
        b_deps.len().cmp(&a_deps.len()).then_with(|| a_name.cmp(b_name))
    });

    let mut lines = vec!["digraph {".to_string()];
    for (name, dependents) in targets {
        for dependent in dependents {
            lines.push(format!("{} -> {}", dependent, name));
        }
    }
    lines.push("}".to_string());
    lines.join("\n")
}

/// Summary of an executed reload
pub fn reload(report: &ReloadReport) -> Vec<String> {
    let mut lines = vec![format!("Plugin disable order: {}", format_list(report.plan().order()))];
    lines.extend(report.failures().map(|step| format!("- {}", step)));
    let failed = report.failures().count();
    if failed == 0 {
        lines.push(format!("Reloaded {} plugin(s)", report.plan().len()));
    } else {
        lines.push(format!("Reloaded {} plugin(s), {} step(s) failed", report.plan().len(), failed));
    }
    lines
}
