use crate::plugin_system::descriptor::{DescriptorBuilder, LoadPhase, PluginDependency, PluginDescriptor};
use crate::plugin_system::registration::{EventPriority, PermissionDefault};

#[test]
fn test_new_descriptor_is_bare() {
    let descriptor = PluginDescriptor::new("Vault");
    assert_eq!(descriptor.name, "Vault");
    assert_eq!(descriptor.load, LoadPhase::PostWorld);
    assert!(descriptor.dependencies().next().is_none());
    assert!(descriptor.api_version.is_none());
}

#[test]
fn test_dependencies_list_mandatory_first() {
    let descriptor = DescriptorBuilder::new("Shop")
        .soft_depend("Economy")
        .depend("Core")
        .depend("Vault")
        .build();

    let deps: Vec<PluginDependency> = descriptor.dependencies().collect();
    assert_eq!(
        deps,
        vec![
            PluginDependency::required("Core"),
            PluginDependency::required("Vault"),
            PluginDependency::optional("Economy"),
        ]
    );
    assert_eq!(deps[0].to_string(), "Requires plugin: Core");
    assert_eq!(deps[2].to_string(), "Optional plugin: Economy");
}

#[test]
fn test_is_authored_by_exact_match() {
    let descriptor = DescriptorBuilder::new("Essentials").author("zenexer").author("md_5").build();
    assert!(descriptor.is_authored_by("md_5"));
    assert!(!descriptor.is_authored_by("MD_5"));
    assert!(!descriptor.is_authored_by("md"));
}

#[test]
fn test_load_phase_parsing() {
    assert_eq!(LoadPhase::from_str("startup"), Some(LoadPhase::Startup));
    assert_eq!(LoadPhase::from_str("POSTWORLD"), Some(LoadPhase::PostWorld));
    assert_eq!(LoadPhase::from_str("later"), None);
    assert_eq!(LoadPhase::Startup.to_string(), "STARTUP");
}

#[test]
fn test_event_priority_parsing_and_order() {
    assert_eq!(EventPriority::from_str("monitor"), Some(EventPriority::Monitor));
    assert_eq!(EventPriority::from_str("urgent"), None);
    assert!(EventPriority::Lowest < EventPriority::Monitor);
    assert_eq!(EventPriority::default().to_string(), "NORMAL");
}

#[test]
fn test_permission_default_aliases() {
    assert_eq!(PermissionDefault::from_str("isop"), Some(PermissionDefault::Op));
    assert_eq!(PermissionDefault::from_str("!op"), Some(PermissionDefault::NotOp));
    assert_eq!(PermissionDefault::from_str("TRUE"), Some(PermissionDefault::True));
    assert_eq!(PermissionDefault::from_str("maybe"), None);
    assert_eq!(PermissionDefault::NotOp.to_string(), "NOT_OP");
}
