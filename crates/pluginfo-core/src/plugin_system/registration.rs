//! Registrations the host keeps on behalf of plugins: event listeners,
//! permissions and commands.
use std::collections::BTreeMap;
use std::fmt;

/// Priority of a registered event listener, lowest runs first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum EventPriority {
    Lowest,
    Low,
    #[default]
    Normal,
    High,
    Highest,
    Monitor,
}

impl EventPriority {
    /// Parses a priority name, ignoring case
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "LOWEST" => Some(EventPriority::Lowest),
            "LOW" => Some(EventPriority::Low),
            "NORMAL" => Some(EventPriority::Normal),
            "HIGH" => Some(EventPriority::High),
            "HIGHEST" => Some(EventPriority::Highest),
            "MONITOR" => Some(EventPriority::Monitor),
            _ => None,
        }
    }
}

impl fmt::Display for EventPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventPriority::Lowest => "LOWEST",
            EventPriority::Low => "LOW",
            EventPriority::Normal => "NORMAL",
            EventPriority::High => "HIGH",
            EventPriority::Highest => "HIGHEST",
            EventPriority::Monitor => "MONITOR",
        };
        write!(f, "{}", name)
    }
}

/// A plugin's listener for one event type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredListener {
    /// Name of the owning plugin
    pub plugin: String,
    pub priority: EventPriority,
}

impl RegisteredListener {
    pub fn new(plugin: &str, priority: EventPriority) -> Self {
        Self {
            plugin: plugin.to_string(),
            priority,
        }
    }
}

/// Who is granted a permission when nobody set it explicitly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionDefault {
    True,
    False,
    #[default]
    Op,
    NotOp,
}

impl PermissionDefault {
    /// Parses a permission default, accepting the host's aliases
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "true" => Some(PermissionDefault::True),
            "false" => Some(PermissionDefault::False),
            "op" | "isop" | "operator" | "isoperator" | "admin" | "isadmin" => Some(PermissionDefault::Op),
            "not_op" | "!op" | "notop" | "!operator" | "notoperator" | "!admin" | "notadmin" => {
                Some(PermissionDefault::NotOp)
            }
            _ => None,
        }
    }
}

impl fmt::Display for PermissionDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PermissionDefault::True => "TRUE",
            PermissionDefault::False => "FALSE",
            PermissionDefault::Op => "OP",
            PermissionDefault::NotOp => "NOT_OP",
        };
        write!(f, "{}", name)
    }
}

/// A registered permission node and its children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    pub name: String,
    pub default: PermissionDefault,
    pub description: String,
    /// Child permission name to granted value
    pub children: BTreeMap<String, bool>,
    /// Number of permissibles currently subscribed to this node
    pub permissibles: usize,
}

impl Permission {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            default: PermissionDefault::default(),
            description: String::new(),
            children: BTreeMap::new(),
            permissibles: 0,
        }
    }
}

/// A command bound by a plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginCommand {
    pub name: String,
    /// Name of the owning plugin
    pub plugin: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub label: String,
    pub permission: Option<String>,
    pub usage: String,
    /// Whether the command is currently registered with the command map
    pub registered: bool,
}

impl PluginCommand {
    pub fn new(name: &str, plugin: &str) -> Self {
        Self {
            name: name.to_string(),
            plugin: plugin.to_string(),
            aliases: Vec::new(),
            description: String::new(),
            label: name.to_string(),
            permission: None,
            usage: format!("/{}", name),
            registered: true,
        }
    }
}
