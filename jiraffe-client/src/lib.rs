//! # Jira Resource Client
//!
//! Maps Jira REST resources onto typed records: a [`Session`] carries the
//! connection context, the [`Resource`] trait builds and dispatches requests,
//! and the endpoint types wrap issues, comments, projects, versions and
//! components.

mod consts;
mod endpoints;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod resource;
mod session;
pub mod transport;

pub use consts::USER_AGENT;
pub use endpoints::{Comment, Component, Issue, Project, Version};
pub use error::{Error, Result, classify_response};
pub use resource::{FetchOptions, LoadState, PreparedRequest, Resource, ResourceRecord};
pub use session::Session;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
