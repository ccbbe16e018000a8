//! # Request Options
//!
//! [`FetchOptions`] describes a single call; [`FetchOptions::prepare`] derives
//! the parent segment, body, query string and final URL from it, in that
//! order.

use jiraffe_core::encode_value;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::transport::HttpMethod;

/// Options accepted by `Resource::fetch`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOptions {
  /// Path segment after the endpoint name
  pub key: Option<String>,
  pub method: HttpMethod,
  /// Nest the URL under `<parent_name>/<parent_key>/`
  pub parent: bool,
  pub parent_key: Option<String>,
  pub body: Option<Value>,
  /// Send `body` verbatim instead of wrapping non-mapping values
  pub body_override: bool,
  /// Move `body` into the query string and send no request body
  pub body_to_params: bool,
  /// Replaces the derived URL entirely
  pub url: Option<String>,
}

/// The derived parts of a request, computed from [`FetchOptions`]
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
  pub method: HttpMethod,
  pub parent_uri: String,
  pub body_uri: Option<Value>,
  pub params_uri: String,
  pub url_uri: String,
}

impl FetchOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn key(mut self, key: impl Into<String>) -> Self {
    self.key = Some(key.into());
    self
  }

  pub const fn method(mut self, method: HttpMethod) -> Self {
    self.method = method;
    self
  }

  /// Nest the request under the parent resource identified by `parent_key`
  pub fn parent(mut self, parent_key: impl Into<String>) -> Self {
    self.parent = true;
    self.parent_key = Some(parent_key.into());
    self
  }

  pub fn body(mut self, body: Value) -> Self {
    self.body = Some(body);
    self
  }

  pub const fn body_override(mut self) -> Self {
    self.body_override = true;
    self
  }

  pub const fn body_to_params(mut self) -> Self {
    self.body_to_params = true;
    self
  }

  pub fn url(mut self, url: impl Into<String>) -> Self {
    self.url = Some(url.into());
    self
  }

  /// Derive the request parts for a resource type.
  ///
  /// The body never travels in both places: when it is moved into the query
  /// string the request body is dropped.
  pub fn prepare(&self, rest_path: &str, endpoint_name: &str, parent_name: &str) -> Result<PreparedRequest> {
    let parent_uri = if self.parent {
      format!("{parent_name}/{}/", self.parent_key.as_deref().unwrap_or_default())
    } else {
      String::new()
    };

    let mut body_uri = match (&self.body, self.body_override) {
      (None, _) => None,
      (Some(body), true) => Some(body.clone()),
      (Some(Value::Object(body)), false) => Some(Value::Object(body.clone())),
      (Some(other), false) => {
        let mut wrapped = Map::new();
        wrapped.insert("body".to_string(), other.clone());
        Some(Value::Object(wrapped))
      }
    };

    let mut params_uri = String::new();
    if self.body_to_params {
      if let Some(body) = self.body.as_ref().filter(|body| !is_blank(body)) {
        params_uri = format!("?{}", encode_value(body)?);
      }
      body_uri = None;
    }

    let url_uri = match &self.url {
      None => format!(
        "{rest_path}/{parent_uri}{endpoint_name}/{}{params_uri}",
        self.key.as_deref().unwrap_or_default()
      ),
      Some(url) => format!("{url}{params_uri}"),
    };

    Ok(PreparedRequest {
      method: self.method,
      parent_uri,
      body_uri,
      params_uri,
      url_uri,
    })
  }
}

impl PreparedRequest {
  /// Serialized request body, if one is sent
  pub fn body_json(&self) -> Result<Option<String>> {
    self
      .body_uri
      .as_ref()
      .map(serde_json::to_string)
      .transpose()
      .map_err(Into::into)
  }
}

fn is_blank(value: &Value) -> bool {
  match value {
    Value::Null => true,
    Value::String(text) => text.is_empty(),
    Value::Array(items) => items.is_empty(),
    Value::Object(map) => map.is_empty(),
    _ => false,
  }
}
