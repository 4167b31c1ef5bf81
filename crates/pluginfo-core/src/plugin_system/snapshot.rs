//! Loading a [`PluginRegistry`] from a host-exported snapshot file.
//!
//! The file format (JSON, YAML or TOML) is picked from the file extension.
//! Field names follow the host's descriptor keys, so `softdepend`,
//! `loadbefore` and `api-version` are accepted next to their snake_case
//! spellings.
use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::kernel::error::Result;
use crate::plugin_system::descriptor::{LoadPhase, PluginDescriptor};
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::registration::{
    EventPriority, Permission, PermissionDefault, PluginCommand, RegisteredListener,
};
use crate::plugin_system::registry::PluginRegistry;
use crate::storage::config::ConfigFormat;
use crate::storage::StorageProvider;

// --- Intermediate structs for deserialization ---

#[derive(Deserialize, Debug, Default)]
struct RawSnapshot {
    #[serde(default)]
    plugins: Vec<RawPluginDescriptor>,
    #[serde(default)]
    listeners: BTreeMap<String, Vec<RawListener>>,
    #[serde(default)]
    permissions: Vec<RawPermission>,
    #[serde(default)]
    commands: Vec<RawCommand>,
}

#[derive(Deserialize, Debug)]
struct RawPluginDescriptor {
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    main: String,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    load: Option<String>,
    #[serde(default)]
    depend: Vec<String>,
    #[serde(default, alias = "softdepend")]
    soft_depend: Vec<String>,
    #[serde(default, alias = "loadbefore")]
    load_before: Vec<String>,
    #[serde(default)]
    commands: Vec<String>,
    #[serde(default)]
    permissions: Vec<String>,
    #[serde(default, alias = "default-permission")]
    permission_default: Option<String>,
    #[serde(default)]
    awareness: Vec<String>,
    #[serde(default, alias = "api-version")]
    api_version: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawListener {
    plugin: String,
    #[serde(default)]
    priority: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawPermission {
    name: String,
    #[serde(default)]
    default: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    children: BTreeMap<String, bool>,
    #[serde(default)]
    permissibles: usize,
}

#[derive(Deserialize, Debug)]
struct RawCommand {
    name: String,
    plugin: String,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    permission: Option<String>,
    #[serde(default)]
    usage: Option<String>,
    #[serde(default = "default_registered")]
    registered: bool,
}

fn default_registered() -> bool {
    true
}

// --- End Intermediate structs ---

/// Read and parse the snapshot at `path`
pub fn load_snapshot(provider: &dyn StorageProvider, path: &Path) -> Result<PluginRegistry> {
    let format = ConfigFormat::require_from_path(path)?;
    let content = provider.read_to_string(path)?;
    let registry = parse_snapshot(&content, format, path)?;
    info!(
        "Loaded registry snapshot {} with {} plugins",
        path.display(),
        registry.plugin_count()
    );
    Ok(registry)
}

/// Parse snapshot text; `origin` is only used in error messages
pub fn parse_snapshot(content: &str, format: ConfigFormat, origin: &Path) -> Result<PluginRegistry> {
    let raw: RawSnapshot = format.deserialize(content)?;
    Ok(build_registry(raw, origin)?)
}

fn snapshot_error(origin: &Path, message: String) -> PluginSystemError {
    PluginSystemError::SnapshotError {
        path: origin.to_path_buf(),
        message,
        source: None,
    }
}

fn build_registry(raw: RawSnapshot, origin: &Path) -> std::result::Result<PluginRegistry, PluginSystemError> {
    let mut registry = PluginRegistry::new();

    for raw_plugin in raw.plugins {
        let load = match raw_plugin.load.as_deref() {
            None => LoadPhase::default(),
            Some(s) => LoadPhase::from_str(s).ok_or_else(|| {
                snapshot_error(origin, format!("plugin '{}' has unknown load phase '{}'", raw_plugin.name, s))
            })?,
        };
        let descriptor = PluginDescriptor {
            name: raw_plugin.name,
            version: raw_plugin.version,
            main: raw_plugin.main,
            authors: raw_plugin.authors,
            description: raw_plugin.description,
            website: raw_plugin.website,
            prefix: raw_plugin.prefix,
            load,
            depend: raw_plugin.depend,
            soft_depend: raw_plugin.soft_depend,
            load_before: raw_plugin.load_before,
            commands: raw_plugin.commands,
            permissions: raw_plugin.permissions,
            permission_default: raw_plugin.permission_default,
            awareness: raw_plugin.awareness,
            api_version: raw_plugin.api_version,
        };
        registry.register_plugin(descriptor).map_err(|e| PluginSystemError::SnapshotError {
            path: origin.to_path_buf(),
            message: "invalid plugin entry".to_string(),
            source: Some(Box::new(e)),
        })?;
    }

    for (event, raw_listeners) in raw.listeners {
        for raw_listener in raw_listeners {
            let priority = match raw_listener.priority.as_deref() {
                None => EventPriority::default(),
                Some(s) => EventPriority::from_str(s).ok_or_else(|| {
                    snapshot_error(origin, format!("listener of '{}' on '{}' has unknown priority '{}'", raw_listener.plugin, event, s))
                })?,
            };
            registry.register_listener(&event, RegisteredListener::new(&raw_listener.plugin, priority));
        }
    }

    for raw_permission in raw.permissions {
        let default = match raw_permission.default.as_deref() {
            None => PermissionDefault::default(),
            Some(s) => PermissionDefault::from_str(s).ok_or_else(|| {
                snapshot_error(origin, format!("permission '{}' has unknown default '{}'", raw_permission.name, s))
            })?,
        };
        registry.register_permission(Permission {
            name: raw_permission.name,
            default,
            description: raw_permission.description,
            children: raw_permission.children,
            permissibles: raw_permission.permissibles,
        });
    }

    for raw_command in raw.commands {
        let label = raw_command.label.unwrap_or_else(|| raw_command.name.clone());
        let usage = raw_command.usage.unwrap_or_else(|| format!("/{}", raw_command.name));
        registry.register_command(PluginCommand {
            name: raw_command.name,
            plugin: raw_command.plugin,
            aliases: raw_command.aliases,
            description: raw_command.description,
            label,
            permission: raw_command.permission,
            usage,
            registered: raw_command.registered,
        });
    }
    debug!(
        "Snapshot from {} parsed: {} plugins",
        origin.display(),
        registry.plugin_count()
    );

    Ok(registry)
}
