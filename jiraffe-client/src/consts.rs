//! Constants for the jiraffe client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("jiraffe/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Content type sent with every JSON request body
pub const JSON_CONTENT_TYPE: &str = "application/json";
