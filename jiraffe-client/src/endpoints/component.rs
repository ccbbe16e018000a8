//! # Project Components

use serde_json::Value;

use super::key_segment;
use crate::error::{Error, Result};
use crate::resource::{FetchOptions, Resource, ResourceRecord};
use crate::session::Session;
use crate::transport::HttpMethod;

/// A project component, or a project's component listing
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
  record: ResourceRecord,
}

impl Default for Component {
  fn default() -> Self {
    Self::empty()
  }
}

impl Resource for Component {
  const ENDPOINT: &'static str = "component";
  const FIELDS: &'static [&'static str] = &["component_key", "name"];
  const ALIASES: &'static [(&'static str, &'static str)] = &[("id", "component_key")];

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

impl Component {
  pub fn create(session: &Session, component: Value) -> Result<Self> {
    let response = Self::fetch(session, FetchOptions::new().method(HttpMethod::Post).body(component))?;
    Ok(Self::from_payload(response.body))
  }

  pub fn update(session: &Session, id: &str, component: Value) -> Result<Self> {
    let response = Self::fetch(
      session,
      FetchOptions::new().method(HttpMethod::Put).key(id).body(component),
    )?;
    Ok(Self::from_payload(response.body))
  }

  /// Delete a component; `moveIssuesTo` may be passed in `options`
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

  pub fn component_key(&self) -> Result<String> {
    key_segment(self.peek("component_key"))
  }

  /// Number of issues filed against this component
  pub fn related_issue_counts(&self, session: &Session) -> Result<Value> {
    let key = self.component_key()?;
    let response = Self::fetch(session, FetchOptions::new().key(format!("{key}/relatedIssueCounts")))?;
    response.body.get("issueCount").cloned().ok_or_else(|| Error::UnknownField {
      endpoint: Self::ENDPOINT,
      field: "issueCount".to_string(),
    })
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::endpoints::test_support::{REST, session};
  use crate::mock::MockTransport;

  fn component_json() -> Value {
    json!({
      "self": "http://localhost/rest/api/latest/component/10000",
      "id": "10000",
      "name": "Component 1",
      "description": "This is a JIRA component",
      "lead": { "name": "fred" },
      "assigneeType": "PROJECT_LEAD",
      "isAssigneeTypeValid": false
    })
  }

  #[test]
  fn test_find_component() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    mock.respond_json(200, component_json());

    let component = Component::find(&session(&mock), "10000")?;
    assert_eq!(component.component_key()?, "10000");
    assert_eq!(component.peek("name"), Some(&json!("Component 1")));
    assert_eq!(component.peek("lead").unwrap()["name"], json!("fred"));
    assert_eq!(component.peek("isAssigneeTypeValid"), Some(&json!(false)));

    Ok(())
  }

  #[test]
  fn test_create_update_remove() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    mock.respond_json(200, component_json());
    let mut updated = component_json();
    updated["name"] = json!("Component 2");
    mock.respond_json(200, updated);
    mock.respond(crate::transport::HttpResponse::new(200, ""));

    let session = session(&mock);
    let component = Component::create(&session, json!({ "name": "Component 1", "project": "DEMO" }))?;
    assert_eq!(mock.last_request().unwrap().method, HttpMethod::Post);
    assert_eq!(component.peek("assigneeType"), Some(&json!("PROJECT_LEAD")));

    let component = Component::update(&session, "10000", json!({ "name": "Component 2" }))?;
    assert_eq!(component.peek("name"), Some(&json!("Component 2")));

    Component::remove(&session, "10000", json!({ "moveIssuesTo": "10001" }))?;
    let request = mock.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.url, format!("{REST}/component/10000?moveIssuesTo=10001"));

    Ok(())
  }

  #[test]
  fn test_related_issue_counts() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    mock.respond_json(
      200,
      json!({ "self": "http://localhost/rest/api/latest/component/10000", "issueCount": 23 }),
    );

    let component = Component::from_payload(component_json());
    let count = component.related_issue_counts(&session(&mock))?;
    assert_eq!(mock.last_request().unwrap().url, format!("{REST}/component/10000/relatedIssueCounts"));
    assert_eq!(count, json!(23));

    Ok(())
  }

  #[test]
  fn test_related_issue_counts_missing_from_response() {
    let mock = MockTransport::new();
    mock.respond_json(200, json!({ "self": "http://localhost/rest/api/latest/component/10000" }));

    let err = Component::from_payload(component_json())
      .related_issue_counts(&session(&mock))
      .unwrap_err();
    assert!(matches!(
      err,
      Error::UnknownField { endpoint: "component", ref field } if field == "issueCount"
    ));
  }
}
