//! Error types for resource mapping and the default status classifier.

use jiraffe_core::{KeyError, ParamsError};
use thiserror::Error;

use crate::transport::{HttpResponse, TransportError};

/// Errors surfaced by resource operations
#[derive(Debug, Error)]
pub enum Error {
  /// HTTP 400, typically an issue transition that is not allowed
  #[error("Invalid transition: HTTP {} {}", .0.status, .0.text)]
  InvalidTransition(Box<HttpResponse>),

  /// HTTP 404
  #[error("Resource not found: HTTP {} {}", .0.status, .0.text)]
  NotFound(Box<HttpResponse>),

  /// Any other non-success status
  #[error("Jira error: HTTP {} {}", .0.status, .0.text)]
  Service(Box<HttpResponse>),

  /// A malformed key was rejected before any request was made
  #[error(transparent)]
  InvalidKey(#[from] KeyError),

  /// A field is still missing after the lazy reload
  #[error("Unknown field '{field}' on {endpoint}")]
  UnknownField { endpoint: &'static str, field: String },

  #[error(transparent)]
  Params(#[from] ParamsError),

  #[error(transparent)]
  Transport(#[from] TransportError),

  #[error("Failed to serialize request body: {0}")]
  Json(#[from] serde_json::Error),
}

/// Result type for resource operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
  /// The response that caused a status error, if any
  pub fn response(&self) -> Option<&HttpResponse> {
    match self {
      Self::InvalidTransition(response) | Self::NotFound(response) | Self::Service(response) => Some(response.as_ref()),
      _ => None,
    }
  }
}

/// Default three-tier classification of a response by status code.
///
/// 200 through 204 pass through; 400 and 404 map to their own errors and
/// everything else is a generic service error.
pub fn classify_response(response: HttpResponse) -> Result<HttpResponse> {
  match response.status {
    200..=204 => Ok(response),
    400 => Err(Error::InvalidTransition(Box::new(response))),
    404 => Err(Error::NotFound(Box::new(response))),
    _ => Err(Error::Service(Box::new(response))),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_success_statuses_pass_through() {
    for status in [200, 201, 202, 203, 204] {
      let response = HttpResponse::json(status, json!({ "id": "10000" }));
      assert_eq!(classify_response(response.clone()).unwrap(), response);
    }
  }

  #[test]
  fn test_bad_request_is_invalid_transition() {
    let response = HttpResponse::json(400, json!({ "errorMessages": ["nope"] }));
    let err = classify_response(response.clone()).unwrap_err();
    assert!(matches!(err, Error::InvalidTransition(_)));
    assert_eq!(err.response(), Some(&response));
  }

  #[test]
  fn test_not_found() {
    let err = classify_response(HttpResponse::empty(404)).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(err.response().map(|r| r.status), Some(404));
  }

  #[test]
  fn test_other_statuses_are_service_errors() {
    for status in [205, 301, 401, 403, 409, 500, 503] {
      let err = classify_response(HttpResponse::new(status, "Internal Server Error")).unwrap_err();
      assert!(matches!(err, Error::Service(_)), "status {status}");
      assert_eq!(err.response().map(|r| r.status), Some(status));
    }
  }

  #[test]
  fn test_error_display() {
    let err = classify_response(HttpResponse::new(500, "Internal Server Error")).unwrap_err();
    assert_eq!(err.to_string(), "Jira error: HTTP 500 Internal Server Error");

    let err = Error::UnknownField {
      endpoint: "issue",
      field: "summary".to_string(),
    };
    assert_eq!(err.to_string(), "Unknown field 'summary' on issue");
    assert!(err.response().is_none());
  }
}
