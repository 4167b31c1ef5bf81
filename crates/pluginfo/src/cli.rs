use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// PlugInfo: inspect a plugin host's registry and reload plugins with their dependents
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Registry snapshot to inspect (json, yaml or toml)
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every loaded plugin
    List,
    /// Show all descriptor fields of a plugin
    Dump {
        plugin: String,
    },
    /// Show the plugins depending on a plugin
    Depend {
        plugin: String,
    },
    /// List plugins (co)authored by someone
    Author {
        name: String,
    },
    /// List plugins not (co)authored by someone
    Nauthor {
        name: String,
    },
    /// List the plugins listening to an event
    Listen {
        event: String,
    },
    /// Show a registered permission
    Permission {
        name: String,
    },
    /// Show a registered plugin command
    Command {
        name: String,
    },
    /// Reload a plugin together with everything depending on it
    Reload {
        plugin: String,
        /// Only print what would be done
        #[arg(long)]
        dry_run: bool,
    },
    /// Write the dependency graph in dot format
    Graph {
        /// Output file, overriding the configured one
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Resynchronize the host's command tree
    SyncCommands,
    /// List plugins targeting a different API version
    Api {
        /// Expected API version, overriding the configured one
        #[arg(long)]
        expected: Option<String>,
    },
    /// Complete a plugin name fragment
    Complete {
        fragment: String,
    },
}

impl Commands {
    /// Whether the command reads the registry snapshot
    pub fn needs_snapshot(&self) -> bool {
        !matches!(self, Commands::SyncCommands)
    }
}
