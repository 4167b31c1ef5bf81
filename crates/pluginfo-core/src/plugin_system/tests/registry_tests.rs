use super::super::registry::PluginRegistry;
use crate::plugin_system::descriptor::DescriptorBuilder;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::registration::{
    EventPriority, Permission, PermissionDefault, PluginCommand, RegisteredListener,
};

fn sample_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    for name in ["WorldEdit", "Essentials", "EssentialsChat", "Vault"] {
        registry
            .register_plugin(DescriptorBuilder::new(name).build())
            .expect("Failed to register plugin");
    }
    registry
}

#[test]
fn test_registry_initialization() {
    let registry = PluginRegistry::new();
    assert_eq!(registry.plugin_count(), 0);
    assert!(registry.iter_plugins().next().is_none());
    assert!(registry.depended_graph().is_empty());
}

#[test]
fn test_register_and_lookup_plugin() {
    let mut registry = PluginRegistry::new();
    let descriptor = DescriptorBuilder::new("Vault").version("1.7.3").author("Sleaker").build();

    registry.register_plugin(descriptor.clone()).expect("Failed to register plugin");

    assert!(registry.has_plugin("Vault"));
    assert!(!registry.has_plugin("vault"), "Plugin names are case-sensitive");
    assert_eq!(registry.get_plugin("Vault"), Some(&descriptor));
    assert_eq!(registry.plugin_count(), 1);
}

#[test]
fn test_register_duplicate_plugin() {
    let mut registry = sample_registry();
    let result = registry.register_plugin(DescriptorBuilder::new("Vault").build());

    match result {
        Err(PluginSystemError::RegistrationError { plugin_id, message }) => {
            assert_eq!(plugin_id, "Vault");
            assert!(message.contains("already registered"));
        }
        other => panic!("Expected RegistrationError, got {:?}", other),
    }
    assert_eq!(registry.plugin_count(), 4);
}

#[test]
fn test_register_plugin_without_name() {
    let mut registry = PluginRegistry::new();
    let result = registry.register_plugin(DescriptorBuilder::new("").build());
    assert!(matches!(result, Err(PluginSystemError::RegistrationError { .. })));
    assert_eq!(registry.plugin_count(), 0);
}

#[test]
fn test_plugins_keep_registration_order() {
    let registry = sample_registry();
    let names: Vec<&str> = registry.iter_plugins().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["WorldEdit", "Essentials", "EssentialsChat", "Vault"]);
}

#[test]
fn test_complete_plugins_matches_substring() {
    let registry = sample_registry();

    assert_eq!(registry.complete_plugins("Essentials"), vec!["Essentials", "EssentialsChat"]);
    assert_eq!(registry.complete_plugins("Chat"), vec!["EssentialsChat"]);
    assert_eq!(registry.complete_plugins("").len(), 4);
    assert!(registry.complete_plugins("essentials").is_empty());
}

#[test]
fn test_listeners_by_event() {
    let mut registry = sample_registry();
    registry.register_listener("PlayerJoinEvent", RegisteredListener::new("Essentials", EventPriority::Normal));
    registry.register_listener("PlayerJoinEvent", RegisteredListener::new("EssentialsChat", EventPriority::High));

    let listeners = registry.listeners_for("PlayerJoinEvent").expect("event should be known");
    assert_eq!(listeners.len(), 2);
    assert_eq!(listeners[0].plugin, "Essentials");
    assert_eq!(listeners[1].priority, EventPriority::High);
    assert!(registry.listeners_for("PlayerQuitEvent").is_none());
}

#[test]
fn test_register_permission_replaces_previous() {
    let mut registry = PluginRegistry::new();
    registry.register_permission(Permission::new("essentials.fly"));

    let mut replacement = Permission::new("essentials.fly");
    replacement.default = PermissionDefault::True;
    registry.register_permission(replacement);

    let stored = registry.get_permission("essentials.fly").expect("permission should exist");
    assert_eq!(stored.default, PermissionDefault::True);
    assert!(registry.get_permission("essentials.god").is_none());
}

#[test]
fn test_register_command() {
    let mut registry = sample_registry();
    registry.register_command(PluginCommand::new("fly", "Essentials"));

    let command = registry.get_command("fly").expect("command should exist");
    assert_eq!(command.plugin, "Essentials");
    assert_eq!(command.label, "fly");
    assert_eq!(command.usage, "/fly");
    assert!(command.registered);
    assert!(registry.get_command("/fly").is_none());
}

#[test]
fn test_depended_graph_reflects_registered_plugins() {
    let mut registry = PluginRegistry::new();
    registry.register_plugin(DescriptorBuilder::new("Vault").build()).unwrap();
    registry
        .register_plugin(DescriptorBuilder::new("Essentials").soft_depend("Vault").build())
        .unwrap();

    let graph = registry.depended_graph();
    assert_eq!(graph.direct_dependents("Vault").len(), 1);
    assert!(graph.direct_dependents("Vault").contains("Essentials"));
    assert!(!graph.contains("Essentials"));
}
