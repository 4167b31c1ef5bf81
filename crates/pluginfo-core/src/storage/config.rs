use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::kernel::constants::{
    DEFAULT_EXPECTED_API_VERSION, DEFAULT_GRAPH_FILE, DEFAULT_LOAD_COMMAND, DEFAULT_UNLOAD_COMMAND,
};
use crate::kernel::error::Result;
use crate::storage::error::StorageSystemError;
use crate::storage::StorageProvider;

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Supported file formats for snapshots and configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }

    /// Like [`from_path`](Self::from_path), but unknown extensions are an error
    pub fn require_from_path(path: &Path) -> std::result::Result<Self, StorageSystemError> {
        Self::from_path(path)
            .ok_or_else(|| StorageSystemError::UnsupportedConfigFormat(path.display().to_string()))
    }

    /// Deserialize a value from a string in this format
    pub fn deserialize<T: DeserializeOwned>(&self, data: &str) -> std::result::Result<T, StorageSystemError> {
        let result: std::result::Result<T, BoxedError> = match self {
            ConfigFormat::Json => serde_json::from_str(data)
                .map_err(|e| Box::new(e) as BoxedError),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data)
                .map_err(|e| Box::new(e) as BoxedError),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data)
                .map_err(|e| Box::new(e) as BoxedError),
        };
        result.map_err(|source| StorageSystemError::DeserializationError {
            format: self.extension().to_string(),
            source,
        })
    }

    /// Serialize a value to a string in this format
    pub fn serialize<T: Serialize>(&self, value: &T) -> std::result::Result<String, StorageSystemError> {
        let result: std::result::Result<String, BoxedError> = match self {
            ConfigFormat::Json => serde_json::to_string_pretty(value)
                .map_err(|e| Box::new(e) as BoxedError),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(value)
                .map_err(|e| Box::new(e) as BoxedError),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(value)
                .map_err(|e| Box::new(e) as BoxedError),
        };
        result.map_err(|source| StorageSystemError::SerializationError {
            format: self.extension().to_string(),
            source,
        })
    }
}

fn default_graph_file() -> PathBuf {
    PathBuf::from(DEFAULT_GRAPH_FILE)
}

fn default_expected_api_version() -> String {
    DEFAULT_EXPECTED_API_VERSION.to_string()
}

fn default_unload_command() -> String {
    DEFAULT_UNLOAD_COMMAND.to_string()
}

fn default_load_command() -> String {
    DEFAULT_LOAD_COMMAND.to_string()
}

/// Settings for the `pluginfo` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginfoConfig {
    /// Registry snapshot read when none is given on the command line
    #[serde(default)]
    pub snapshot: Option<PathBuf>,

    /// Where the `graph` command writes the dependency graph
    #[serde(default = "default_graph_file")]
    pub graph_file: PathBuf,

    /// API version plugins are expected to target
    #[serde(default = "default_expected_api_version")]
    pub expected_api_version: String,

    /// Command run to unload one plugin; `{name}` is replaced by the plugin name
    #[serde(default = "default_unload_command")]
    pub unload_command: String,

    /// Command run to load one plugin; `{name}` is replaced by the plugin name
    #[serde(default = "default_load_command")]
    pub load_command: String,

    /// Command run after a reload to resynchronize the host's command tree
    #[serde(default)]
    pub sync_command: Option<String>,
}

impl Default for PluginfoConfig {
    fn default() -> Self {
        Self {
            snapshot: None,
            graph_file: default_graph_file(),
            expected_api_version: default_expected_api_version(),
            unload_command: default_unload_command(),
            load_command: default_load_command(),
            sync_command: None,
        }
    }
}

impl PluginfoConfig {
    /// Load configuration from `path`; a missing file yields the defaults
    pub fn load(provider: &dyn StorageProvider, path: &Path) -> Result<Self> {
        if !provider.exists(path) {
            debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let format = ConfigFormat::require_from_path(path)?;
        let content = provider.read_to_string(path)?;
        let config = format.deserialize(&content)?;
        debug!("Loaded configuration from {} via {}", path.display(), provider.name());
        Ok(config)
    }

    /// Save configuration to `path`, choosing the format from its extension
    pub fn save(&self, provider: &dyn StorageProvider, path: &Path) -> Result<()> {
        let format = ConfigFormat::require_from_path(path)?;
        let content = format.serialize(self)?;
        provider.write_string(path, &content)
    }
}
