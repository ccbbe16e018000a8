//! # Jira Resource Endpoints
//!
//! Concrete resource types built on the resource base: issues and their
//! comments, projects, versions and components.

mod comment;
mod component;
mod issue;
mod project;
mod version;

pub use comment::Comment;
pub use component::Component;
pub use issue::Issue;
pub use project::Project;
pub use version::Version;

use jiraffe_core::KeyError;
use serde_json::Value;

use crate::error::Result;

/// Render a key field as a path segment; Jira returns ids as strings or numbers
pub(crate) fn key_segment(value: Option<&Value>) -> Result<String> {
  match value {
    Some(Value::String(key)) if !key.is_empty() => Ok(key.clone()),
    Some(Value::Number(key)) => Ok(key.to_string()),
    _ => Err(KeyError::Missing.into()),
  }
}


#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::error::Error;

  #[test]
  fn test_key_segment() {
    assert_eq!(key_segment(Some(&json!("10000"))).unwrap(), "10000");
    assert_eq!(key_segment(Some(&json!(10000))).unwrap(), "10000");
    assert!(matches!(key_segment(Some(&json!(""))), Err(Error::InvalidKey(KeyError::Missing))));
    assert!(matches!(key_segment(Some(&Value::Null)), Err(Error::InvalidKey(_))));
    assert!(key_segment(None).is_err());
  }
}
