//! URL helpers for turning a configured Jira host into REST paths.

use anyhow::{Result, anyhow};
use url::Url;

/// Environment variable storing the Jira host configuration.
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";

/// Get the `$JIRA_HOST` environment variable value with a proper URL scheme.
pub fn resolve_jira_base_url() -> Result<String> {
  match std::env::var(ENV_JIRA_HOST) {
    Ok(host) => ensure_url_scheme(&host),
    Err(_) => Err(anyhow!("Jira host environment variable '{ENV_JIRA_HOST}' not set")),
  }
}

/// Ensure a host has an `http://` or `https://` scheme and no trailing slash.
///
/// Hosts without a scheme are assumed to be served over https.
pub fn ensure_url_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow!("Host cannot be empty"));
  }

  let lowered = trimmed.to_ascii_lowercase();
  let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
    trimmed.to_string()
  } else {
    format!("https://{trimmed}")
  };

  let url = Url::parse(&candidate).map_err(|e| anyhow!("Failed to parse URL '{input}': {e}"))?;
  if url.host().is_none() {
    return Err(anyhow!("URL '{input}' has no host"));
  }

  Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Build the REST root for an API version, e.g. `<base>/rest/api/latest`.
pub fn rest_root(base: &str, api_version: &str) -> String {
  format!("{}/rest/api/{api_version}", base.trim_end_matches('/'))
}

/// Build the session endpoint used by cookie authentication.
pub fn auth_root(base: &str, api_version: &str) -> String {
  format!("{}/rest/auth/{api_version}/session", base.trim_end_matches('/'))
}
