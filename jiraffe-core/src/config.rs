//! # Session Configuration
//!
//! Describes where the Jira instance lives and how to authenticate against
//! it. Configuration can come from a TOML file in the platform config
//! directory, an explicit path, or environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::url::{auth_root, ensure_url_scheme, resolve_jira_base_url, rest_root};

/// Environment variable holding the Jira username.
pub const ENV_JIRA_USERNAME: &str = "JIRA_USERNAME";
/// Environment variable holding the Jira password or API token.
pub const ENV_JIRA_PASSWORD: &str = "JIRA_PASSWORD";
/// Environment variable overriding the REST API version.
pub const ENV_JIRA_API_VERSION: &str = "JIRA_API_VERSION";

/// How requests are authenticated
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
  /// HTTP basic auth on every request
  #[default]
  Basic,
  /// A session cookie established out of band
  Cookie,
}

/// Connection settings for a Jira instance
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
  /// Base URL of the Jira instance (e.g. https://company.atlassian.net)
  pub uri: String,
  #[serde(default)]
  pub username: Option<String>,
  #[serde(default)]
  pub password: Option<String>,
  #[serde(default = "default_api_version")]
  pub api_version: String,
  #[serde(default)]
  pub auth_type: AuthType,
}

fn default_api_version() -> String {
  "latest".to_string()
}

impl std::fmt::Debug for SessionConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SessionConfig")
      .field("uri", &self.uri)
      .field("username", &self.username)
      .field("password", &self.password.as_ref().map(|_| "<redacted>"))
      .field("api_version", &self.api_version)
      .field("auth_type", &self.auth_type)
      .finish()
  }
}

impl SessionConfig {
  /// Create a configuration for the given host with no credentials
  pub fn new(uri: &str) -> Result<Self> {
    Ok(Self {
      uri: ensure_url_scheme(uri)?,
      username: None,
      password: None,
      api_version: default_api_version(),
      auth_type: AuthType::Basic,
    })
  }

  /// Attach basic-auth credentials
  pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
    self.username = Some(username.to_string());
    self.password = Some(password.to_string());
    self
  }

  /// Override the REST API version (defaults to `latest`)
  pub fn with_api_version(mut self, api_version: &str) -> Self {
    self.api_version = api_version.to_string();
    self
  }

  /// Load configuration from a TOML file
  pub fn load_from(path: &Path) -> Result<Self> {
    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read session config from {}", path.display()))?;

    let mut config: SessionConfig =
      toml::from_str(&content).with_context(|| format!("Failed to parse session config from {}", path.display()))?;
    config.uri = ensure_url_scheme(&config.uri)?;

    Ok(config)
  }

  /// Build configuration from `JIRA_HOST`, `JIRA_USERNAME`, `JIRA_PASSWORD`
  /// and `JIRA_API_VERSION`
  pub fn from_env() -> Result<Self> {
    let mut config = Self::new(&resolve_jira_base_url()?)?;
    config.username = std::env::var(ENV_JIRA_USERNAME).ok();
    config.password = std::env::var(ENV_JIRA_PASSWORD).ok();
    if let Ok(api_version) = std::env::var(ENV_JIRA_API_VERSION) {
      config.api_version = api_version;
    }

    Ok(config)
  }

  /// Save configuration as TOML
  pub fn save_to(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(self).context("Failed to serialize session config")?;
    fs::write(path, content).with_context(|| format!("Failed to write session config to {}", path.display()))?;

    Ok(())
  }

  /// REST root, e.g. `<uri>/rest/api/latest`
  pub fn rest_path(&self) -> String {
    rest_root(&self.uri, &self.api_version)
  }

  /// Session endpoint, e.g. `<uri>/rest/auth/latest/session`
  pub fn auth_path(&self) -> String {
    auth_root(&self.uri, &self.api_version)
  }
}

/// Platform configuration directory for jiraffe
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Resolve the platform configuration directory
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("eddieland", "", "jiraffe").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Path to the session configuration file
  pub fn session_config_path(&self) -> PathBuf {
    self.config_dir.join("session.toml")
  }

  /// Load the session configuration, if one has been written
  pub fn load_session_config(&self) -> Result<Option<SessionConfig>> {
    let path = self.session_config_path();
    if path.exists() {
      SessionConfig::load_from(&path).map(Some)
    } else {
      Ok(None)
    }
  }
}
