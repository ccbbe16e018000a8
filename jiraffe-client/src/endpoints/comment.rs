//! # Issue Comments
//!
//! Comments live under their issue: `issue/<key>/comment/<id>`.

use jiraffe_core::validate_issue_key;
use serde_json::Value;

use super::key_segment;
use crate::error::Result;
use crate::resource::{FetchOptions, Resource, ResourceRecord};
use crate::session::Session;
use crate::transport::{HttpMethod, HttpResponse};

/// A single comment, or the comment listing of an issue
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
  record: ResourceRecord,
}

impl Default for Comment {
  fn default() -> Self {
    Self::empty()
  }
}

impl Resource for Comment {
  const ENDPOINT: &'static str = "comment";
  const PARENT: &'static str = "issue";
  const FIELDS: &'static [&'static str] = &["jira_key", "id", "body"];

  fn from_record(record: ResourceRecord) -> Self {
    Self { record }
  }

  fn record(&self) -> &ResourceRecord {
    &self.record
  }

  fn record_mut(&mut self) -> &mut ResourceRecord {
    &mut self.record
  }
}

impl Comment {
  /// All comments of an issue
  pub fn find_by_key(session: &Session, key: &str) -> Result<Self> {
    validate_issue_key(Some(key))?;
    let response = Self::fetch(session, FetchOptions::new().parent(key))?;
    Ok(Self::tagged(response.body, key))
  }

  /// One comment of an issue
  pub fn find_by_key_and_id(session: &Session, key: &str, id: &str) -> Result<Self> {
    validate_issue_key(Some(key))?;
    let response = Self::fetch(session, FetchOptions::new().parent(key).key(id))?;
    Ok(Self::tagged(response.body, key))
  }

  pub fn add(session: &Session, comment: Value, key: &str) -> Result<HttpResponse> {
    Self::fetch(
      session,
      FetchOptions::new().method(HttpMethod::Post).parent(key).body(comment),
    )
  }

  /// Replace a comment's body; plain text is sent as `{"body": text}`
  pub fn edit(session: &Session, comment: Value, key: &str, id: &str) -> Result<HttpResponse> {
    Self::fetch(
      session,
      FetchOptions::new()
        .method(HttpMethod::Put)
        .parent(key)
        .key(id)
        .body(comment),
    )
  }

  pub fn remove(session: &Session, key: &str, id: &str) -> Result<HttpResponse> {
    Self::fetch(
      session,
      FetchOptions::new().method(HttpMethod::Delete).parent(key).key(id),
    )
  }

  /// Delete this comment from its issue
  pub fn delete(&self, session: &Session) -> Result<HttpResponse> {
    let key = validate_issue_key(self.jira_key())?;
    let id = key_segment(self.peek("id"))?;
    Self::remove(session, key, &id)
  }

  /// Key of the issue this comment was fetched from
  pub fn jira_key(&self) -> Option<&str> {
    self.peek("jira_key").and_then(Value::as_str)
  }

  /// Comment entries of an issue listing
  pub fn comments(&self) -> &[Value] {
    self
      .peek("comments")
      .and_then(Value::as_array)
      .map(Vec::as_slice)
      .unwrap_or_default()
  }

  fn tagged(payload: Value, key: &str) -> Self {
    let mut comment = Self::from_payload(payload);
    comment.set("jira_key", Value::String(key.to_string()));
    comment
  }
}
