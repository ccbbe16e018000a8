//! # Jiraffe
//!
//! A Jira REST client that maps issues, comments, projects, versions and
//! components onto lazily loaded resources.
//!
//! ```no_run
//! use jiraffe::{Resource, SessionConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = SessionConfig::new("jira.example.com")?.with_credentials("jstewart", "topsecret");
//! let session = jiraffe::connect(config)?;
//!
//! let mut issue = jiraffe::Issue::with_key("EX-1");
//! let summary = issue.field(&session, "summary")?;
//! # let _ = summary;
//! # Ok(())
//! # }
//! ```

use anyhow::Context;
use tracing::{debug, info};

pub mod logging;

pub use jiraffe_client::{
  Comment, Component, Error, FetchOptions, HttpMethod, HttpResponse, HttpTransport, Issue, LoadState, Project,
  Resource, ResourceRecord, Session, Version,
};
pub use jiraffe_core::{AuthType, ConfigDirs, SessionConfig, encode, is_valid_issue_key};

/// Open a session backed by the blocking reqwest transport
pub fn connect(config: SessionConfig) -> anyhow::Result<Session> {
  info!(uri = %config.uri, api_version = %config.api_version, "Connecting to Jira");
  Session::connect(config).context("Failed to create Jira session")
}

/// Open a session from the saved session file, falling back to the environment
pub fn connect_default() -> anyhow::Result<Session> {
  let config = match ConfigDirs::new()?.load_session_config()? {
    Some(config) => {
      debug!("Using saved session configuration");
      config
    }
    None => SessionConfig::from_env()?,
  };
  connect(config)
}

/// Fetch a single issue by key
pub fn find_issue(session: &Session, key: &str) -> anyhow::Result<Issue> {
  Issue::find(session, key).with_context(|| format!("Failed to fetch Jira issue {key}"))
}

/// Fetch every project visible to the session, keyed by project key
pub fn all_projects(session: &Session) -> anyhow::Result<Project> {
  Project::all(session).context("Failed to list Jira projects")
}
