use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

const SNAPSHOT: &str = r#"{
  "plugins": [
    { "name": "Vault", "authors": ["Sleaker"], "api-version": "1.17" },
    { "name": "Essentials", "authors": ["zenexer"], "depend": ["Vault"] },
    { "name": "EssentialsChat", "authors": ["zenexer"], "softdepend": ["Essentials"] }
  ],
  "listeners": {
    "PlayerJoinEvent": [ { "plugin": "Essentials", "priority": "HIGH" } ]
  }
}"#;

fn workspace() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("registry.json"), SNAPSHOT).expect("Failed to write snapshot");
    dir
}

fn pluginfo(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pluginfo").expect("binary should build");
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_list_command() -> Result<(), Box<dyn std::error::Error>> {
    let dir = workspace();

    pluginfo(dir.path())
        .args(["--snapshot", "registry.json", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plugins loaded:"))
        .stdout(predicate::str::contains("- EssentialsChat"))
        .stdout(predicate::str::contains("Total 3"));

    Ok(())
}

#[test]
fn test_depend_command() -> Result<(), Box<dyn std::error::Error>> {
    let dir = workspace();

    pluginfo(dir.path())
        .args(["--snapshot", "registry.json", "depend", "Vault"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 directly depending: [Essentials]"))
        .stdout(predicate::str::contains("2 depending: [Essentials, EssentialsChat]"));

    Ok(())
}

#[test]
fn test_unknown_plugin_is_not_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = workspace();

    pluginfo(dir.path())
        .args(["--snapshot", "registry.json", "depend", "Towny"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plugin not found: Towny"));

    Ok(())
}

#[test]
fn test_listen_command() -> Result<(), Box<dyn std::error::Error>> {
    let dir = workspace();

    pluginfo(dir.path())
        .args(["--snapshot", "registry.json", "listen", "PlayerJoinEvent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Essentials (HIGH)"));

    Ok(())
}

#[test]
fn test_reload_dry_run() -> Result<(), Box<dyn std::error::Error>> {
    let dir = workspace();

    pluginfo(dir.path())
        .args(["--snapshot", "registry.json", "reload", "Vault", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Plugin disable order: [EssentialsChat, Essentials, Vault]",
        ))
        .stdout(predicate::str::contains("Would unload EssentialsChat"))
        .stdout(predicate::str::contains("Would load EssentialsChat"))
        .stdout(predicate::str::contains("Reloaded 3 plugin(s)"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_reload_reports_failed_host_steps() -> Result<(), Box<dyn std::error::Error>> {
    let dir = workspace();
    fs::write(
        dir.path().join("pluginfo.json"),
        r#"{ "unload_command": "false {name}", "load_command": "true {name}" }"#,
    )?;

    pluginfo(dir.path())
        .args(["--config", "pluginfo.json", "--snapshot", "registry.json", "reload", "Essentials"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Reloaded 2 plugin(s), 2 step(s) failed"));

    Ok(())
}

#[test]
fn test_graph_command_writes_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = workspace();

    pluginfo(dir.path())
        .args(["--snapshot", "registry.json", "graph", "--output", "deps.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Graph written to deps.txt"));

    let graph = fs::read_to_string(dir.path().join("deps.txt"))?;
    assert_eq!(graph, "digraph {\nEssentialsChat -> Essentials\nEssentials -> Vault\n}");

    Ok(())
}

#[test]
fn test_snapshot_from_config() -> Result<(), Box<dyn std::error::Error>> {
    let dir = workspace();
    fs::write(
        dir.path().join("pluginfo.toml"),
        "snapshot = \"registry.json\"\nexpected_api_version = \"1.20\"\n",
    )?;

    pluginfo(dir.path())
        .arg("api")
        .assert()
        .success()
        .stdout(predicate::str::contains("- Vault: 1.17"))
        .stdout(predicate::str::contains("- Essentials: null"))
        .stdout(predicate::str::contains("Total 3"));

    Ok(())
}

#[test]
fn test_missing_snapshot_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    pluginfo(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No registry snapshot given"));

    pluginfo(dir.path())
        .args(["--snapshot", "absent.json", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));

    Ok(())
}

#[test]
fn test_cycle_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("cycle.json"),
        r#"{ "plugins": [ { "name": "A", "depend": ["B"] }, { "name": "B", "depend": ["A"] } ] }"#,
    )?;

    pluginfo(dir.path())
        .args(["--snapshot", "cycle.json", "reload", "A", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Circular dependency detected among plugins: A, B"))
        .stdout(predicate::str::contains("Would unload").not());

    Ok(())
}

#[test]
fn test_complete_command() -> Result<(), Box<dyn std::error::Error>> {
    let dir = workspace();

    pluginfo(dir.path())
        .args(["--snapshot", "registry.json", "complete", "Ess"])
        .assert()
        .success()
        .stdout("Essentials\nEssentialsChat\n");

    Ok(())
}

#[test]
fn test_sync_commands_without_snapshot() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    pluginfo(dir.path())
        .arg("sync-commands")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands synchronized"));

    Ok(())
}
