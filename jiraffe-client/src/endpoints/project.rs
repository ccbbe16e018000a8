//! # Jira Projects

use serde_json::{Value, json};

use super::{Component, Issue, Version, key_segment};
use crate::error::Result;
use crate::resource::{FetchOptions, Resource, ResourceRecord};
use crate::session::Session;
use crate::transport::HttpMethod;

/// A project, or the project listing keyed by project key
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
  record: ResourceRecord,
}

impl Default for Project {
  fn default() -> Self {
    Self::empty()
  }
}

impl Resource for Project {
  const ENDPOINT: &'static str = "project";
  const FIELDS: &'static [&'static str] = &["project_key", "id", "name"];
  const ALIASES: &'static [(&'static str, &'static str)] = &[("key", "project_key")];

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

impl Project {
  pub fn project_key(&self) -> Option<&str> {
    self.peek("project_key").and_then(Value::as_str)
  }

  /// Components of a project, keyed by component id
  pub fn components(session: &Session, key: &str) -> Result<Component> {
    let response = Self::fetch(session, FetchOptions::new().key(format!("{key}/components")))?;
    Ok(Component::from_payload(response.body))
  }

  /// Versions of a project, keyed by version id
  pub fn versions(session: &Session, key: &str) -> Result<Version> {
    let response = Self::fetch(session, FetchOptions::new().key(format!("{key}/versions")))?;
    Ok(Version::from_payload(response.body))
  }

  /// Issues of a project via a JQL search, keyed by issue key
  pub fn issue_list(session: &Session, key: &str) -> Result<Issue> {
    let mut response = Self::fetch(
      session,
      FetchOptions::new()
        .method(HttpMethod::Post)
        .url(format!("{}/search", session.rest_path()))
        .body(json!({ "jql": format!("project = {key}") })),
    )?;

    let issues = match response.body.get_mut("issues").map(Value::take) {
      Some(Value::Array(issues)) => issues,
      _ => Vec::new(),
    };
    Ok(Issue::from_collection(issues))
  }

  /// Issues of this project
  pub fn issues(&self, session: &Session) -> Result<Issue> {
    let key = key_segment(self.peek("project_key"))?;
    Self::issue_list(session, &key)
  }
}
