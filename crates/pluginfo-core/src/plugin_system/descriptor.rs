use std::fmt;

/// When the host enables a plugin during server startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Enabled before the worlds are loaded
    Startup,
    /// Enabled after the worlds are loaded (the host default)
    #[default]
    PostWorld,
}

impl LoadPhase {
    /// Parses a load phase name, ignoring case
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "STARTUP" => Some(LoadPhase::Startup),
            "POSTWORLD" => Some(LoadPhase::PostWorld),
            _ => None,
        }
    }
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadPhase::Startup => write!(f, "STARTUP"),
            LoadPhase::PostWorld => write!(f, "POSTWORLD"),
        }
    }
}

/// A single declared dependency of a plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDependency {
    /// The name of the depended-on plugin
    pub plugin_name: String,

    /// Whether this is a hard requirement (`depend`) or optional (`softdepend`)
    pub required: bool,
}

impl PluginDependency {
    /// Create a new mandatory dependency
    pub fn required(plugin_name: &str) -> Self {
        Self {
            plugin_name: plugin_name.to_string(),
            required: true,
        }
    }

    /// Create a new optional dependency
    pub fn optional(plugin_name: &str) -> Self {
        Self {
            plugin_name: plugin_name.to_string(),
            required: false,
        }
    }
}

impl fmt::Display for PluginDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let requirement_type = if self.required { "Requires" } else { "Optional" };
        write!(f, "{} plugin: {}", requirement_type, self.plugin_name)
    }
}

/// Metadata a plugin declares to the host, as exposed by the registry snapshot.
///
/// Only `name`, `depend` and `soft_depend` take part in dependency
/// resolution. Everything else is descriptive and only ever printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Unique, case-sensitive plugin name
    pub name: String,

    /// Plugin version string, free-form
    pub version: String,

    /// Fully qualified entry point
    pub main: String,

    /// Authors, in declaration order
    pub authors: Vec<String>,

    /// Human-readable description
    pub description: Option<String>,

    /// Project website
    pub website: Option<String>,

    /// Log prefix override
    pub prefix: Option<String>,

    /// Startup phase
    pub load: LoadPhase,

    /// Mandatory dependencies, in declaration order
    pub depend: Vec<String>,

    /// Optional dependencies, in declaration order
    pub soft_depend: Vec<String>,

    /// Plugins this one must be loaded before
    pub load_before: Vec<String>,

    /// Names of declared commands
    pub commands: Vec<String>,

    /// Names of declared permissions
    pub permissions: Vec<String>,

    /// Default applied to declared permissions
    pub permission_default: Option<String>,

    /// Awareness flags
    pub awareness: Vec<String>,

    /// Targeted host API version
    pub api_version: Option<String>,
}

impl PluginDescriptor {
    /// Create a descriptor with the given name and no metadata or dependencies
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: String::new(),
            main: String::new(),
            authors: Vec::new(),
            description: None,
            website: None,
            prefix: None,
            load: LoadPhase::default(),
            depend: Vec::new(),
            soft_depend: Vec::new(),
            load_before: Vec::new(),
            commands: Vec::new(),
            permissions: Vec::new(),
            permission_default: None,
            awareness: Vec::new(),
            api_version: None,
        }
    }

    /// All declared dependencies, mandatory first, each list in declaration order
    pub fn dependencies(&self) -> impl Iterator<Item = PluginDependency> + '_ {
        let required = self.depend.iter().map(|name| PluginDependency::required(name));
        let optional = self.soft_depend.iter().map(|name| PluginDependency::optional(name));
        required.chain(optional)
    }

    /// Whether `author` is listed among this plugin's authors
    pub fn is_authored_by(&self, author: &str) -> bool {
        self.authors.iter().any(|a| a == author)
    }
}

/// Builder for creating a plugin descriptor
pub struct DescriptorBuilder {
    descriptor: PluginDescriptor,
}

impl DescriptorBuilder {
    /// Create a new descriptor builder
    pub fn new(name: &str) -> Self {
        Self {
            descriptor: PluginDescriptor::new(name),
        }
    }

    pub fn version(mut self, version: &str) -> Self {
        self.descriptor.version = version.to_string();
        self
    }

    pub fn main(mut self, main: &str) -> Self {
        self.descriptor.main = main.to_string();
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.descriptor.authors.push(author.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.descriptor.description = Some(description.to_string());
        self
    }

    pub fn website(mut self, website: &str) -> Self {
        self.descriptor.website = Some(website.to_string());
        self
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.descriptor.prefix = Some(prefix.to_string());
        self
    }

    pub fn load(mut self, load: LoadPhase) -> Self {
        self.descriptor.load = load;
        self
    }

    /// Add a mandatory dependency
    pub fn depend(mut self, name: &str) -> Self {
        self.descriptor.depend.push(name.to_string());
        self
    }

    /// Add an optional dependency
    pub fn soft_depend(mut self, name: &str) -> Self {
        self.descriptor.soft_depend.push(name.to_string());
        self
    }

    pub fn load_before(mut self, name: &str) -> Self {
        self.descriptor.load_before.push(name.to_string());
        self
    }

    pub fn command(mut self, name: &str) -> Self {
        self.descriptor.commands.push(name.to_string());
        self
    }

    pub fn permission(mut self, name: &str) -> Self {
        self.descriptor.permissions.push(name.to_string());
        self
    }

    pub fn permission_default(mut self, default: &str) -> Self {
        self.descriptor.permission_default = Some(default.to_string());
        self
    }

    pub fn awareness(mut self, flag: &str) -> Self {
        self.descriptor.awareness.push(flag.to_string());
        self
    }

    pub fn api_version(mut self, api_version: &str) -> Self {
        self.descriptor.api_version = Some(api_version.to_string());
        self
    }

    /// Build the descriptor
    pub fn build(self) -> PluginDescriptor {
        self.descriptor
    }
}
