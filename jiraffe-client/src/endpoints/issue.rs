//! # Jira Issues
//!
//! Issue lookup, creation, update and removal. Entries of an issue's `fields`
//! object are materialized as record fields, so `summary` can be read
//! directly from the issue.

use jiraffe_core::validate_issue_key;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::Result;
use crate::resource::{FetchOptions, Resource, ResourceRecord};
use crate::session::Session;
use crate::transport::{HttpMethod, HttpResponse};

/// Expansion requested by `createmeta`
const CREATEMETA_EXPAND: &str = "projects.issuetypes.fields.";

/// A Jira issue, or a collection of issues from a search
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
  record: ResourceRecord,
}

impl Default for Issue {
  fn default() -> Self {
    Self::empty()
  }
}

impl Resource for Issue {
  const ENDPOINT: &'static str = "issue";
  const FIELDS: &'static [&'static str] = &["jira_key", "expand", "jira_self", "fields", "transitions", "id"];
  const ALIASES: &'static [(&'static str, &'static str)] = &[("key", "jira_key"), ("self", "jira_self")];

  fn from_record(record: ResourceRecord) -> Self {
    Self { record }
  }

  fn record(&self) -> &ResourceRecord {
    &self.record
  }

  fn record_mut(&mut self) -> &mut ResourceRecord {
    &mut self.record
  }

  /// Payloads without a `fields` entry are treated as the fields themselves.
  /// The issue only counts as loaded once it carries a key.
  fn from_payload(payload: Value) -> Self {
    let mut issue = Self::empty();
    match payload {
      Value::Array(elements) => return Self::from_collection(elements),
      Value::Null => {}
      Value::Object(map) if map.contains_key("fields") => issue.load(map),
      other => {
        let mut wrapped = Map::new();
        wrapped.insert("fields".to_string(), other);
        issue.load(wrapped);
      }
    }
    issue
  }

  fn validate_key(key: &str) -> Result<()> {
    validate_issue_key(Some(key))?;
    Ok(())
  }

  fn reload(&mut self, session: &Session) -> Result<()> {
    let key = validate_issue_key(self.jira_key())?.to_string();
    let response = Self::find_raw(session, &key)?;
    if let Value::Object(map) = response.body {
      self.load(map);
    }
    Ok(())
  }
}

impl Issue {
  /// An unloaded issue that fetches itself on first access
  pub fn with_key(key: &str) -> Self {
    let mut issue = Self::empty();
    issue.set("key", Value::String(key.to_string()));
    issue
  }

  pub fn jira_key(&self) -> Option<&str> {
    self.peek("jira_key").and_then(Value::as_str)
  }

  /// Merge a payload and materialize its `fields` entries
  pub fn load(&mut self, payload: Map<String, Value>) {
    self.record.merge(payload);
    if let Some(Value::Object(fields)) = self.record.lookup("fields").cloned() {
      self.record.merge(fields);
    }
    if self.jira_key().is_some() {
      self.record.mark_loaded();
    }
  }

  pub fn create(session: &Session, issue: Value) -> Result<HttpResponse> {
    Self::fetch(session, FetchOptions::new().method(HttpMethod::Post).body(issue))
  }

  pub fn update(session: &Session, key: &str, issue: Value) -> Result<HttpResponse> {
    Self::fetch(session, FetchOptions::new().method(HttpMethod::Put).key(key).body(issue))
  }

  /// Delete an issue; `options` such as `deleteSubtasks` travel as query parameters
  pub fn remove(session: &Session, key: &str, options: Value) -> Result<HttpResponse> {
    debug!(key, "Removing issue");
    Self::fetch(
      session,
      FetchOptions::new()
        .method(HttpMethod::Delete)
        .key(key)
        .body(options)
        .body_to_params(),
    )
  }

  pub fn assignee(session: &Session, name: &str, key: &str) -> Result<HttpResponse> {
    Self::fetch(
      session,
      FetchOptions::new()
        .method(HttpMethod::Put)
        .key(format!("{key}/assignee"))
        .body(json!({ "name": name })),
    )
  }

  /// Create metadata for the given projects, optionally narrowed to issue types
  pub fn createmeta(session: &Session, project_keys: &str, issue_type_ids: Option<&str>) -> Result<Value> {
    let mut params = Map::new();
    params.insert("expand".to_string(), json!(CREATEMETA_EXPAND));
    params.insert("projectKeys".to_string(), json!(project_keys));
    if let Some(ids) = issue_type_ids {
      params.insert("issuetypeIds".to_string(), json!(ids));
    }

    let response = Self::fetch(
      session,
      FetchOptions::new()
        .key("createmeta")
        .body(Value::Object(params))
        .body_to_params(),
    )?;
    Ok(response.body)
  }

  /// Edit metadata for one issue, tagged with the issue key
  pub fn editmeta(session: &Session, key: &str) -> Result<Value> {
    let mut response = Self::fetch(session, FetchOptions::new().key(format!("{key}/editmeta")))?;
    if let Value::Object(map) = &mut response.body {
      map.insert("key".to_string(), json!(key));
    }
    Ok(response.body)
  }

  pub fn set_assignee(&self, session: &Session, name: &str) -> Result<HttpResponse> {
    let key = validate_issue_key(self.jira_key())?;
    Self::assignee(session, name, key)
  }

  pub fn delete(&self, session: &Session, options: Value) -> Result<HttpResponse> {
    let key = validate_issue_key(self.jira_key())?;
    Self::remove(session, key, options)
  }
}
