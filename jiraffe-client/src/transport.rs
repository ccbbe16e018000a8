//! # HTTP Transport
//!
//! The seam between resource mapping and the network. Resources only ever see
//! [`HttpRequest`] and [`HttpResponse`]; [`ReqwestTransport`] is the blocking
//! implementation used outside of tests.

use std::fmt;

use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::consts::USER_AGENT;

/// Supported request methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
  #[default]
  Get,
  Post,
  Put,
  Delete,
}

impl HttpMethod {
  /// Parse a method name, falling back to GET for anything unsupported
  pub fn parse_or_get(method: &str) -> Self {
    match method.to_ascii_uppercase().as_str() {
      "POST" => Self::Post,
      "PUT" => Self::Put,
      "DELETE" => Self::Delete,
      _ => Self::Get,
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Get => "GET",
      Self::Post => "POST",
      Self::Put => "PUT",
      Self::Delete => "DELETE",
    }
  }

  fn to_reqwest(self) -> reqwest::Method {
    match self {
      Self::Get => reqwest::Method::GET,
      Self::Post => reqwest::Method::POST,
      Self::Put => reqwest::Method::PUT,
      Self::Delete => reqwest::Method::DELETE,
    }
  }
}

impl fmt::Display for HttpMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A fully assembled request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
  pub method: HttpMethod,
  pub url: String,
  pub headers: Vec<(String, String)>,
  pub body: Option<String>,
}

/// A response with its status code and decoded body
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
  pub status: u16,
  /// Decoded JSON body; `Null` when the body is empty or not JSON
  pub body: Value,
  /// Raw response text
  pub text: String,
}

impl HttpResponse {
  /// Build a response from raw text, decoding it as JSON when possible
  pub fn new(status: u16, text: impl Into<String>) -> Self {
    let text = text.into();
    let body = if text.trim().is_empty() {
      Value::Null
    } else {
      serde_json::from_str(&text).unwrap_or(Value::Null)
    };

    Self { status, body, text }
  }

  /// Build a response from an already decoded body
  pub fn json(status: u16, body: Value) -> Self {
    let text = if body.is_null() { String::new() } else { body.to_string() };
    Self { status, body, text }
  }

  /// An empty-bodied response
  pub fn empty(status: u16) -> Self {
    Self::json(status, Value::Null)
  }
}

/// Errors raised while talking to the remote service
#[derive(Debug, Error)]
pub enum TransportError {
  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),
  #[error("Transport failure: {0}")]
  Failed(String),
}

/// Something that can carry a request to Jira and bring back the response
pub trait HttpTransport: Send + Sync {
  fn request(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking reqwest transport with optional basic auth
pub struct ReqwestTransport {
  client: Client,
  credentials: Option<(String, String)>,
}

impl fmt::Debug for ReqwestTransport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ReqwestTransport")
      .field("username", &self.credentials.as_ref().map(|(username, _)| username))
      .finish_non_exhaustive()
  }
}

impl ReqwestTransport {
  /// Create an unauthenticated transport
  pub fn new() -> Result<Self, TransportError> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    Ok(Self {
      client,
      credentials: None,
    })
  }

  /// Send basic-auth credentials with every request
  pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
    self.credentials = Some((username.to_string(), password.to_string()));
    self
  }
}

impl HttpTransport for ReqwestTransport {
  #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
  fn request(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
    let mut builder = self.client.request(request.method.to_reqwest(), &request.url);

    for (name, value) in &request.headers {
      builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some((username, password)) = &self.credentials {
      builder = builder.basic_auth(username, Some(password));
    }
    if let Some(body) = &request.body {
      builder = builder.body(body.clone());
    }

    let response = builder.send()?;
    let status = response.status().as_u16();
    let text = response.text()?;
    debug!(status, bytes = text.len(), "Received response");

    Ok(HttpResponse::new(status, text))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_parse_or_get() {
    assert_eq!(HttpMethod::parse_or_get("post"), HttpMethod::Post);
    assert_eq!(HttpMethod::parse_or_get("PUT"), HttpMethod::Put);
    assert_eq!(HttpMethod::parse_or_get("Delete"), HttpMethod::Delete);
    assert_eq!(HttpMethod::parse_or_get("get"), HttpMethod::Get);
    assert_eq!(HttpMethod::parse_or_get("patch"), HttpMethod::Get);
    assert_eq!(HttpMethod::parse_or_get(""), HttpMethod::Get);
    assert_eq!(HttpMethod::default(), HttpMethod::Get);
  }

  #[test]
  fn test_method_display() {
    assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    assert_eq!(HttpMethod::Get.as_str(), "GET");
  }

  #[test]
  fn test_response_decodes_json() {
    let response = HttpResponse::new(200, r#"{"id": "10000"}"#);
    assert_eq!(response.body, json!({ "id": "10000" }));
    assert_eq!(response.text, r#"{"id": "10000"}"#);
  }

  #[test]
  fn test_response_tolerates_empty_and_non_json_bodies() {
    assert_eq!(HttpResponse::new(204, "").body, Value::Null);
    assert_eq!(HttpResponse::new(500, "Internal Server Error").body, Value::Null);
    assert_eq!(HttpResponse::new(500, "Internal Server Error").text, "Internal Server Error");
  }

  #[test]
  fn test_response_from_json() {
    let response = HttpResponse::json(201, json!({ "key": "EX-1" }));
    assert_eq!(response.text, r#"{"key":"EX-1"}"#);
    assert_eq!(HttpResponse::empty(204).text, "");
  }

  #[test]
  fn test_reqwest_transport_debug_hides_password() {
    let transport = ReqwestTransport::new().unwrap().with_basic_auth("jstewart", "topsecret");
    let debug = format!("{transport:?}");
    assert!(debug.contains("jstewart"));
    assert!(!debug.contains("topsecret"));
  }
}
