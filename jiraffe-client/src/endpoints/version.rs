//! # Project Versions

use serde_json::Value;

use super::key_segment;
use crate::error::{Error, Result};
use crate::resource::{FetchOptions, Resource, ResourceRecord};
use crate::session::Session;
use crate::transport::HttpMethod;

/// A project version, or a project's version listing
#[derive(Debug, Clone, PartialEq)]
pub struct Version {
  record: ResourceRecord,
}

impl Default for Version {
  fn default() -> Self {
    Self::empty()
  }
}

impl Resource for Version {
  const ENDPOINT: &'static str = "version";
  const FIELDS: &'static [&'static str] = &["version_key", "name"];
  const ALIASES: &'static [(&'static str, &'static str)] = &[("id", "version_key")];

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

impl Version {
  pub fn create(session: &Session, version: Value) -> Result<Self> {
    let response = Self::fetch(session, FetchOptions::new().method(HttpMethod::Post).body(version))?;
    Ok(Self::from_payload(response.body))
  }

  pub fn update(session: &Session, id: &str, version: Value) -> Result<Self> {
    let response = Self::fetch(
      session,
      FetchOptions::new().method(HttpMethod::Put).key(id).body(version),
    )?;
    Ok(Self::from_payload(response.body))
  }

  /// Delete a version; `options` such as `moveFixIssuesTo` travel as query parameters
  pub fn remove(session: &Session, id: &str, options: Value) -> Result<()> {
    Self::fetch(
      session,
      FetchOptions::new()
        .method(HttpMethod::Delete)
        .key(id)
        .body(options)
        .body_to_params(),
    )?;
    Ok(())
  }

  pub fn version_key(&self) -> Result<String> {
    key_segment(self.peek("version_key"))
  }

  /// Counts of issues fixed in and affected by this version
  pub fn related_issue_counts(&self, session: &Session) -> Result<Value> {
    let key = self.version_key()?;
    let response = Self::fetch(session, FetchOptions::new().key(format!("{key}/relatedIssueCounts")))?;
    Ok(response.body)
  }

  pub fn unresolved_issue_count(&self, session: &Session) -> Result<Value> {
    let key = self.version_key()?;
    let response = Self::fetch(session, FetchOptions::new().key(format!("{key}/unresolvedIssueCount")))?;
    response.body.get("issuesUnresolvedCount").cloned().ok_or_else(|| Error::UnknownField {
      endpoint: Self::ENDPOINT,
      field: "issuesUnresolvedCount".to_string(),
    })
  }
}
