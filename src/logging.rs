//! Tracing setup for binaries and tests built on jiraffe.

use std::env;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Map a `-v` count to a level
pub const fn level_for(verbosity: u8) -> Level {
  match verbosity {
    0 => Level::WARN,  // Default: warnings and errors
    1 => Level::INFO,  // -v: info, warnings, and errors
    2 => Level::DEBUG, // -vv: debug and above
    _ => Level::TRACE, // -vvv or more: everything
  }
}

/// Install a stderr subscriber.
///
/// `RUST_LOG` takes precedence over `verbosity` when it is set. Installing
/// twice is not an error; the first subscriber stays in place.
pub fn init_tracing(verbosity: u8) -> Result<()> {
  let filter = if env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
    EnvFilter::try_from_default_env()?
  } else {
    EnvFilter::default().add_directive(level_for(verbosity).into())
  };

  let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt_layer)
    .try_init()
    .ok();
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_level_for_verbosity() {
    assert_eq!(level_for(0), Level::WARN);
    assert_eq!(level_for(1), Level::INFO);
    assert_eq!(level_for(2), Level::DEBUG);
    assert_eq!(level_for(3), Level::TRACE);
    assert_eq!(level_for(9), Level::TRACE);
  }

  #[test]
  fn test_init_tracing_is_idempotent() {
    assert!(init_tracing(0).is_ok());
    assert!(init_tracing(2).is_ok());
  }
}
