//! Temporary configuration files for testing

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII guard owning a temporary directory with one configuration file in it
pub struct ConfigFileGuard {
  temp_dir: TempDir,
  path: PathBuf,
}

impl ConfigFileGuard {
  /// Write `content` to `file_name` inside a fresh temporary directory
  pub fn new(file_name: &str, content: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join(file_name);
    fs::write(&path, content).expect("Failed to write test config file");

    Self { temp_dir, path }
  }

  /// Path of the configuration file
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Directory holding the configuration file
  pub fn dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
