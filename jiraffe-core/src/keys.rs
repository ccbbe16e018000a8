//! # Resource Key Validation
//!
//! Checks issue keys such as `EX-1` or `ABC_2-100` before any request is made
//! with them.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Errors produced by key validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
  #[error("The key {0} is invalid")]
  Invalid(String),
  #[error("The key is missing")]
  Missing,
}

// One letter, then letters/digits/underscores, a hyphen and the issue number.
static ISSUE_KEY_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)^[A-Z][A-Z0-9_]*-[0-9]+$").expect("Failed to compile issue key regex"));

/// Validate an issue key, returning it unchanged when well-formed.
pub fn validate_issue_key(key: Option<&str>) -> Result<&str, KeyError> {
  match key {
    None => Err(KeyError::Missing),
    Some(key) if ISSUE_KEY_PATTERN.is_match(key) => Ok(key),
    Some(key) => Err(KeyError::Invalid(key.to_string())),
  }
}

/// Non-failing variant of [`validate_issue_key`].
pub fn is_valid_issue_key(key: Option<&str>) -> bool {
  validate_issue_key(key).is_ok()
}
