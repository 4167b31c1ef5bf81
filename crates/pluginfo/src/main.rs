mod cli;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use cli::{CliArgs, Commands};
use pluginfo_core::kernel::constants::{APP_NAME, APP_VERSION, DEFAULT_CONFIG_FILE};
use pluginfo_core::kernel::error::{Error, Result};
use pluginfo_core::plugin_system::host::{CommandDispatchHost, DryRunHost, PluginHost};
use pluginfo_core::plugin_system::report;
use pluginfo_core::plugin_system::snapshot::load_snapshot;
use pluginfo_core::{LocalStorageProvider, PluginRegistry, PluginfoConfig, ReloadDriver, StorageProvider};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("{}", e);
    }

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

fn command_host(config: &PluginfoConfig) -> CommandDispatchHost {
    let host = CommandDispatchHost::new(&config.unload_command, &config.load_command);
    match &config.sync_command {
        Some(sync) => host.with_sync_command(sync),
        None => host,
    }
}

fn snapshot_path(args: &CliArgs, config: &PluginfoConfig) -> Result<PathBuf> {
    args.snapshot
        .clone()
        .or_else(|| config.snapshot.clone())
        .ok_or_else(|| Error::from("No registry snapshot given; pass --snapshot or set `snapshot` in the configuration"))
}

async fn run(args: CliArgs) -> Result<ExitCode> {
    debug!("{} v{}", APP_NAME, APP_VERSION);
    let cwd = std::env::current_dir().map_err(|e| Error::io(e, "current_dir", PathBuf::from(".")))?;
    let provider = LocalStorageProvider::new(cwd);

    let config_path = args.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = PluginfoConfig::load(&provider, &config_path)?;
    debug!("Using configuration {:?}", config);

    if !args.command.needs_snapshot() {
        command_host(&config).sync_commands().await?;
        println!("Commands synchronized");
        return Ok(ExitCode::SUCCESS);
    }

    let registry = load_snapshot(&provider, &snapshot_path(&args, &config)?)?;
    dispatch(args.command, &registry, &config, &provider).await
}

async fn dispatch(
    command: Commands,
    registry: &PluginRegistry,
    config: &PluginfoConfig,
    provider: &dyn StorageProvider,
) -> Result<ExitCode> {
    match command {
        Commands::List => print_lines(&report::list(registry)),
        Commands::Dump { plugin } => print_lines(&report::dump(registry, &plugin)),
        Commands::Depend { plugin } => print_lines(&report::depend(registry, &plugin)?),
        Commands::Author { name } => print_lines(&report::author(registry, &name, false)),
        Commands::Nauthor { name } => print_lines(&report::author(registry, &name, true)),
        Commands::Listen { event } => print_lines(&report::listen(registry, &event)),
        Commands::Permission { name } => print_lines(&report::permission(registry, &name)),
        Commands::Command { name } => print_lines(&report::command(registry, &name)),
        Commands::Api { expected } => {
            let expected = expected.as_deref().unwrap_or(&config.expected_api_version);
            print_lines(&report::api(registry, expected));
        }
        Commands::Complete { fragment } => print_lines(&registry.complete_plugins(&fragment)),
        Commands::Graph { output } => {
            let path = output.unwrap_or_else(|| config.graph_file.clone());
            provider.write_string(&path, &report::graph(&registry.depended_graph()))?;
            println!("Graph written to {}", path.display());
        }
        Commands::Reload { plugin, dry_run } => return reload(registry, config, &plugin, dry_run).await,
        Commands::SyncCommands => {
            command_host(config).sync_commands().await?;
            println!("Commands synchronized");
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn reload(registry: &PluginRegistry, config: &PluginfoConfig, plugin: &str, dry_run: bool) -> Result<ExitCode> {
    if !registry.has_plugin(plugin) {
        println!("Plugin not found: {}", plugin);
        return Ok(ExitCode::SUCCESS);
    }

    let dry_run_host = DryRunHost::new();
    let dispatch_host = command_host(config);
    let host: &dyn PluginHost = if dry_run { &dry_run_host } else { &dispatch_host };

    let result = ReloadDriver::new(host).reload(registry, plugin).await?;
    for action in dry_run_host.actions() {
        println!("{}", action);
    }
    print_lines(&report::reload(&result));

    Ok(if result.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
