//! Scripted in-memory transport for tests.
//!
//! Responses are handed out in the order they were queued and every request
//! is recorded for later inspection. Clones share the same script, so a test
//! can keep one handle while the session owns another.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

#[derive(Debug, Default)]
struct MockState {
  responses: VecDeque<Result<HttpResponse, String>>,
  requests: Vec<HttpRequest>,
}

/// A transport that replays queued responses
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
  state: Arc<Mutex<MockState>>,
}

impl MockTransport {
  pub fn new() -> Self {
    Self::default()
  }

  fn state(&self) -> MutexGuard<'_, MockState> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Queue a response
  pub fn respond(&self, response: HttpResponse) {
    self.state().responses.push_back(Ok(response));
  }

  /// Queue a JSON response
  pub fn respond_json(&self, status: u16, body: Value) {
    self.respond(HttpResponse::json(status, body));
  }

  /// Queue a response without a body
  pub fn respond_empty(&self, status: u16) {
    self.respond(HttpResponse::empty(status));
  }

  /// Queue a transport failure
  pub fn fail(&self, message: &str) {
    self.state().responses.push_back(Err(message.to_string()));
  }

  /// All requests seen so far
  pub fn requests(&self) -> Vec<HttpRequest> {
    self.state().requests.clone()
  }

  pub fn last_request(&self) -> Option<HttpRequest> {
    self.state().requests.last().cloned()
  }

  pub fn request_count(&self) -> usize {
    self.state().requests.len()
  }
}

impl HttpTransport for MockTransport {
  fn request(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
    let mut state = self.state();
    state.requests.push(request.clone());

    match state.responses.pop_front() {
      Some(Ok(response)) => Ok(response),
      Some(Err(message)) => Err(TransportError::Failed(message)),
      None => Err(TransportError::Failed(format!(
        "no scripted response for {} {}",
        request.method, request.url
      ))),
    }
  }
}
