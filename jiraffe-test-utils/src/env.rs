//! Environment variable management for testing
//!
//! Tests that touch process-wide environment variables should also be marked
//! `#[serial]` so they do not observe each other's values.

use std::env;

/// RAII guard for a single environment variable
///
/// Remembers the variable's value at construction time and restores it (or
/// removes it) when dropped.
pub struct EnvVarGuard {
  name: String,
  original: Option<String>,
}

impl EnvVarGuard {
  /// Start guarding `name`, leaving its current value in place
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      original: env::var(name).ok(),
    }
  }

  /// Set the guarded variable
  pub fn set(&self, value: &str) {
    unsafe {
      env::set_var(&self.name, value);
    }
  }

  /// Remove the guarded variable
  pub fn remove(&self) {
    unsafe {
      env::remove_var(&self.name);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      Some(val) => unsafe {
        env::set_var(&self.name, val);
      },
      None => unsafe {
        env::remove_var(&self.name);
      },
    }
  }
}
