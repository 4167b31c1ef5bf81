use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use crate::kernel::error::{Error, Result};
use crate::storage::error::StorageSystemError;
use crate::storage::local::LocalStorageProvider;
use crate::storage::provider::StorageProvider;

// Helper function to create PathBuf from str for tests
fn p(s: &str) -> PathBuf {
    PathBuf::from(s)
}

#[test]
fn test_write_and_read_string() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    let file_path = p("PlugInfoGraph.txt");
    provider.write_string(&file_path, "digraph {\n}")?;

    assert!(provider.exists(&file_path));
    assert!(provider.is_file(&file_path));
    assert_eq!(provider.read_to_string(&file_path)?, "digraph {\n}");
    Ok(())
}

#[test]
fn test_write_string_overwrites() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    let file_path = p("out.txt");
    provider.write_string(&file_path, "first version, longer")?;
    provider.write_string(&file_path, "second")?;

    assert_eq!(provider.read_to_string(&file_path)?, "second");
    Ok(())
}

#[test]
fn test_write_string_creates_parent_directories() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    let file_path = p("reports/graphs/graph.txt");
    provider.write_string(&file_path, "x")?;

    assert!(temp_dir.path().join("reports/graphs").is_dir());
    assert_eq!(fs::read_to_string(temp_dir.path().join(&file_path)).unwrap(), "x");
    Ok(())
}

#[test]
fn test_read_missing_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    let result = provider.read_to_string(Path::new("missing.json"));
    match result {
        Err(Error::StorageSystem(StorageSystemError::FileNotFound(path))) => {
            assert_eq!(path, temp_dir.path().join("missing.json"));
        }
        other => panic!("Expected FileNotFound, got {:?}", other),
    }
    assert!(!provider.exists(Path::new("missing.json")));
}

#[test]
fn test_absolute_paths_ignore_base() -> Result<()> {
    let base_dir = tempdir().expect("Failed to create temp directory");
    let other_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(base_dir.path().to_path_buf());

    let absolute = other_dir.path().join("snapshot.json");
    fs::write(&absolute, "{}").unwrap();

    assert_eq!(provider.read_to_string(&absolute)?, "{}");
    Ok(())
}

#[test]
fn test_create_dir_all() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    provider.create_dir_all(&p("a/b/c"))?;
    assert!(provider.exists(&p("a/b/c")));
    assert!(!provider.is_file(&p("a/b/c")));
    assert_eq!(provider.base_path(), temp_dir.path());
    Ok(())
}
