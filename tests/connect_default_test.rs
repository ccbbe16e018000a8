//! Session discovery from the saved session file and from the environment.

#![cfg(target_os = "linux")]

use anyhow::Result;
use jiraffe::{ConfigDirs, Project, Resource, SessionConfig};
use jiraffe_test_utils::EnvVarGuard;
use serde_json::json;
use serial_test::serial;
use tempfile::TempDir;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Point the platform config directory at a fresh temporary directory
fn isolated_config_home() -> Result<(TempDir, EnvVarGuard)> {
  let temp_dir = TempDir::new()?;
  let guard = EnvVarGuard::new("XDG_CONFIG_HOME");
  guard.set(&temp_dir.path().to_string_lossy());
  Ok((temp_dir, guard))
}

async fn mount_projects(mock_server: &MockServer, username: &str, password: &str) {
  Mock::given(method("GET"))
    .and(path("/rest/api/2/project/"))
    .and(basic_auth(username, password))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([
      { "id": "10000", "key": "EX", "name": "Example" },
      { "id": "10001", "key": "ABC", "name": "Alphabetical" }
    ])))
    .expect(1)
    .mount(mock_server)
    .await;
}

#[tokio::test(flavor = "multi_thread")]
#[serial]
async fn test_connect_default_prefers_saved_session() -> Result<()> {
  let mock_server = MockServer::start().await;
  mount_projects(&mock_server, "saved", "from-file").await;

  let (_temp_dir, _config_home) = isolated_config_home()?;
  let host = EnvVarGuard::new("JIRA_HOST");
  host.set("http://env-host.invalid");

  let config = SessionConfig::new(&mock_server.uri())?
    .with_credentials("saved", "from-file")
    .with_api_version("2");
  config.save_to(&ConfigDirs::new()?.session_config_path())?;

  let projects: Project = tokio::task::spawn_blocking(|| {
    let session = jiraffe::connect_default()?;
    jiraffe::all_projects(&session)
  })
  .await??;

  assert_eq!(projects.peek("EX").unwrap()["id"], json!("10000"));
  assert_eq!(projects.peek("ABC").unwrap()["name"], json!("Alphabetical"));

  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
#[serial]
async fn test_connect_default_falls_back_to_environment() -> Result<()> {
  let mock_server = MockServer::start().await;
  mount_projects(&mock_server, "envuser", "envpass").await;

  let (_temp_dir, _config_home) = isolated_config_home()?;
  let host = EnvVarGuard::new("JIRA_HOST");
  let username = EnvVarGuard::new("JIRA_USERNAME");
  let password = EnvVarGuard::new("JIRA_PASSWORD");
  let api_version = EnvVarGuard::new("JIRA_API_VERSION");
  host.set(&mock_server.uri());
  username.set("envuser");
  password.set("envpass");
  api_version.set("2");

  let projects: Project = tokio::task::spawn_blocking(|| {
    let session = jiraffe::connect_default()?;
    jiraffe::all_projects(&session)
  })
  .await??;

  assert_eq!(projects.record().len(), 2);

  Ok(())
}
