//! # Session Context
//!
//! Holds everything a request needs besides its own options: the configured
//! REST root, session headers and the transport. A session is built once and
//! passed explicitly to every resource call.

use std::fmt;

use jiraffe_core::{AuthType, SessionConfig};
use tracing::{debug, instrument};

use crate::consts::JSON_CONTENT_TYPE;
use crate::error::Result;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// An explicit connection context for resource calls
pub struct Session {
  config: SessionConfig,
  transport: Box<dyn HttpTransport>,
  headers: Vec<(String, String)>,
}

impl fmt::Debug for Session {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let header_names: Vec<&str> = self.headers.iter().map(|(name, _)| name.as_str()).collect();
    f.debug_struct("Session")
      .field("config", &self.config)
      .field("headers", &header_names)
      .finish_non_exhaustive()
  }
}

impl Session {
  /// Create a session over an arbitrary transport
  pub fn new(config: SessionConfig, transport: impl HttpTransport + 'static) -> Self {
    Self {
      config,
      transport: Box::new(transport),
      headers: Vec::new(),
    }
  }

  /// Create a session backed by reqwest, using basic auth when configured
  pub fn connect(config: SessionConfig) -> Result<Self> {
    let mut transport = ReqwestTransport::new()?;
    if config.auth_type == AuthType::Basic
      && let (Some(username), Some(password)) = (&config.username, &config.password)
    {
      transport = transport.with_basic_auth(username, password);
    }

    Ok(Self::new(config, transport))
  }

  pub fn config(&self) -> &SessionConfig {
    &self.config
  }

  /// REST root every resource URL is built from
  pub fn rest_path(&self) -> String {
    self.config.rest_path()
  }

  pub fn api_version(&self) -> &str {
    &self.config.api_version
  }

  /// Headers sent with every request
  pub fn headers(&self) -> &[(String, String)] {
    &self.headers
  }

  /// Set a session header, replacing any previous value
  pub fn set_header(&mut self, name: &str, value: &str) {
    self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
    self.headers.push((name.to_string(), value.to_string()));
  }

  /// Attach a session cookie obtained from a cookie-auth handshake
  pub fn set_session_cookie(&mut self, name: &str, value: &str) {
    self.set_header("Cookie", &format!("{name}={value}"));
  }

  /// Send a request and run `handler` over the response
  #[instrument(skip(self, body, handler), fields(method = %method, url = %url))]
  pub fn request<F>(&self, method: HttpMethod, url: &str, body: Option<String>, handler: F) -> Result<HttpResponse>
  where
    F: FnOnce(HttpResponse) -> Result<HttpResponse>,
  {
    let mut headers = self.headers.clone();
    let has_content_type = headers.iter().any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
    if body.is_some() && !has_content_type {
      headers.push(("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()));
    }

    let request = HttpRequest {
      method,
      url: url.to_string(),
      headers,
      body,
    };

    debug!("Dispatching request");
    let response = self.transport.request(&request)?;
    debug!(status = response.status, "Handling response");

    handler(response)
  }
}
