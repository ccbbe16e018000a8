//! # Jiraffe Core Library
//!
//! Transport-free building blocks shared by the jiraffe client: the nested
//! query-string encoder, issue key validation, field name normalization, URL
//! helpers and session configuration loading.

pub mod config;
pub mod fields;
pub mod keys;
pub mod params;
pub mod url;

pub use config::{AuthType, ConfigDirs, SessionConfig};
pub use fields::{is_numeric, normalize_field_name};
pub use keys::{KeyError, is_valid_issue_key, validate_issue_key};
pub use params::{ParamsError, encode, encode_param, encode_value};
