//! # Resource Base
//!
//! Every Jira resource type implements [`Resource`], declaring its endpoint
//! name, the name of the resource it nests under and its field schema. The
//! trait's provided methods build URLs, dispatch requests through the
//! session, classify responses and materialize payloads into records.
//!
//! Field access through [`Resource::field`] is lazy: the first unresolved
//! access on an unloaded instance runs [`Resource::reload`] once and then
//! retries the lookup.

mod options;
mod record;

pub use options::{FetchOptions, PreparedRequest};
pub use record::{LoadState, ResourceRecord};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result, classify_response};
use crate::session::Session;
use crate::transport::HttpResponse;

/// A REST resource mapped onto an in-process record
pub trait Resource: Sized {
  /// URL path segment of the resource collection, e.g. `issue`
  const ENDPOINT: &'static str;
  /// Endpoint name of the enclosing resource, e.g. `issue` for comments
  const PARENT: &'static str = "";
  /// Declared property names
  const FIELDS: &'static [&'static str] = &[];
  /// Payload keys stored under a different property name
  const ALIASES: &'static [(&'static str, &'static str)] = &[];

  fn from_record(record: ResourceRecord) -> Self;
  fn record(&self) -> &ResourceRecord;
  fn record_mut(&mut self) -> &mut ResourceRecord;

  fn endpoint_name() -> &'static str {
    Self::ENDPOINT
  }

  fn parent_name() -> &'static str {
    Self::PARENT
  }

  /// An unloaded instance awaiting its first field access
  fn empty() -> Self {
    Self::from_record(ResourceRecord::new(Self::FIELDS, Self::ALIASES))
  }

  /// Wrap a decoded payload.
  ///
  /// Mappings populate the record, sequences become a collection and `null`
  /// yields an unloaded instance. Other scalars are kept under `body`.
  fn from_payload(payload: Value) -> Self {
    match payload {
      Value::Object(map) => Self::from_record(ResourceRecord::from_map(Self::FIELDS, Self::ALIASES, map)),
      Value::Array(elements) => Self::from_collection(elements),
      Value::Null => Self::empty(),
      scalar => {
        let mut map = Map::new();
        map.insert("body".to_string(), scalar);
        Self::from_record(ResourceRecord::from_map(Self::FIELDS, Self::ALIASES, map))
      }
    }
  }

  /// Wrap a sequence of partially loaded children
  fn from_collection(elements: Vec<Value>) -> Self {
    Self::from_record(ResourceRecord::collection(Self::FIELDS, Self::ALIASES, elements))
  }

  /// Check a key before any request is made with it
  fn validate_key(_key: &str) -> Result<()> {
    Ok(())
  }

  /// Classify a response; override to add finer-grained errors
  fn handle_response(response: HttpResponse) -> Result<HttpResponse> {
    classify_response(response)
  }

  /// Refresh the instance from the remote service. The default does nothing.
  fn reload(&mut self, _session: &Session) -> Result<()> {
    Ok(())
  }

  /// Build the request described by `options` and dispatch it
  #[instrument(level = "debug", skip_all, fields(endpoint = Self::ENDPOINT, method = %options.method))]
  fn fetch(session: &Session, options: FetchOptions) -> Result<HttpResponse> {
    let prepared = options.prepare(&session.rest_path(), Self::endpoint_name(), Self::parent_name())?;
    let body = prepared.body_json()?;
    debug!(url = %prepared.url_uri, has_body = body.is_some(), "Fetching resource");

    session.request(prepared.method, &prepared.url_uri, body, Self::handle_response)
  }

  /// Fetch one resource by key
  fn find(session: &Session, key: &str) -> Result<Self> {
    let response = Self::find_raw(session, key)?;
    Ok(Self::from_payload(response.body))
  }

  /// Fetch one resource by key, returning the raw response for merging
  fn find_raw(session: &Session, key: &str) -> Result<HttpResponse> {
    Self::validate_key(key)?;
    Self::fetch(session, FetchOptions::new().key(key))
  }

  /// Fetch the whole collection endpoint
  fn find_all(session: &Session) -> Result<Self> {
    let response = Self::fetch(session, FetchOptions::new())?;
    Ok(Self::from_payload(response.body))
  }

  fn all(session: &Session) -> Result<Self> {
    Self::find_all(session)
  }

  /// Read a field, reloading once if an unloaded instance lacks it
  fn field(&mut self, session: &Session, name: &str) -> Result<&Value> {
    if self.record().needs_reload_for(name) {
      debug!(endpoint = Self::ENDPOINT, field = name, "Lazy loading resource");
      self.record_mut().begin_load();
      let reloaded = self.reload(session);
      self.record_mut().finish_load(reloaded.is_ok());
      if let Err(err) = reloaded {
        warn!(endpoint = Self::ENDPOINT, error = %err, "Lazy reload failed");
        return Err(err);
      }
    }

    self.record().lookup(name).ok_or_else(|| Error::UnknownField {
      endpoint: Self::ENDPOINT,
      field: name.to_string(),
    })
  }

  /// Read a field without loading anything
  fn peek(&self, name: &str) -> Option<&Value> {
    self.record().lookup(name)
  }

  /// Assign a field explicitly
  fn set(&mut self, name: &str, value: Value) {
    self.record_mut().set(name, value);
  }

  fn is_loaded(&self) -> bool {
    self.record().is_loaded()
  }
}
