/// Application name
pub const APP_NAME: &str = "PlugInfo";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default file the `graph` command writes to
pub const DEFAULT_GRAPH_FILE: &str = "PlugInfoGraph.txt";

/// API version every plugin is expected to declare
pub const DEFAULT_EXPECTED_API_VERSION: &str = "1.17";

/// Console command used to unload a single plugin
pub const DEFAULT_UNLOAD_COMMAND: &str = "plugman unload {name}";

/// Console command used to load a single plugin
pub const DEFAULT_LOAD_COMMAND: &str = "plugman load {name}";

/// Placeholder substituted with the plugin name in host command templates
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "pluginfo.toml";
