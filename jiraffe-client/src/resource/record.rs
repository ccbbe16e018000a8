//! # Resource Record
//!
//! The field storage behind every resource: values for the type's declared
//! schema plus an ordered map of additional fields discovered in payloads,
//! and the load state used by lazy field access.

use jiraffe_core::{is_numeric, normalize_field_name};
use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// Load state of a record.
///
/// `Empty` records reload on the first unresolved access, `Loading` marks a
/// reload in progress and `Loaded` records never reload on their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
  #[default]
  Empty,
  Loading,
  Loaded,
}

/// Declared and additional fields of one resource instance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceRecord {
  schema: &'static [&'static str],
  aliases: &'static [(&'static str, &'static str)],
  declared: Map<String, Value>,
  additional: Map<String, Value>,
  state: LoadState,
}

impl ResourceRecord {
  /// An empty, unloaded record for the given schema
  pub fn new(schema: &'static [&'static str], aliases: &'static [(&'static str, &'static str)]) -> Self {
    Self {
      schema,
      aliases,
      ..Self::default()
    }
  }

  /// A loaded record populated from a payload mapping
  pub fn from_map(
    schema: &'static [&'static str],
    aliases: &'static [(&'static str, &'static str)],
    payload: Map<String, Value>,
  ) -> Self {
    let mut record = Self::new(schema, aliases);
    record.merge(payload);
    record.state = LoadState::Loaded;
    record
  }

  /// A loaded record holding one field per collection element.
  ///
  /// Elements are named after their `key`, then their `id`, then their index.
  /// A name already taken by an earlier element gets the index appended.
  pub fn collection(
    schema: &'static [&'static str],
    aliases: &'static [(&'static str, &'static str)],
    elements: Vec<Value>,
  ) -> Self {
    let mut record = Self::new(schema, aliases);
    for (index, element) in elements.into_iter().enumerate() {
      let name = element_name(&element).unwrap_or_else(|| index.to_string());
      let mut property = normalize_field_name(&name);
      if record.additional.contains_key(&property) {
        property = format!("{property}_{index}");
      }
      while record.additional.contains_key(&property) {
        property.push('_');
      }
      record.additional.insert(property, element);
    }
    record.state = LoadState::Loaded;
    record
  }

  /// Property name a payload key is stored under
  pub fn property_name(&self, key: &str) -> String {
    self
      .aliases
      .iter()
      .find(|(from, _)| *from == key)
      .map(|(_, to)| (*to).to_string())
      .unwrap_or_else(|| normalize_field_name(key))
  }

  /// Whether `name` is part of the type's declared schema
  pub fn is_declared(&self, name: &str) -> bool {
    self.schema.contains(&name)
  }

  /// Register an additional property. Declaring an existing name is a no-op.
  pub fn declare(&mut self, name: &str) {
    if !self.is_declared(name) && !self.additional.contains_key(name) {
      self.additional.insert(name.to_string(), Value::Null);
    }
  }

  /// Assign a field, normalizing the key first
  pub fn set(&mut self, key: &str, value: Value) {
    let name = self.property_name(key);
    if self.is_declared(&name) {
      self.declared.insert(name, value);
    } else {
      self.declare(&name);
      self.additional.insert(name, value);
    }
  }

  /// Assign every entry of a payload mapping
  pub fn merge(&mut self, payload: Map<String, Value>) {
    for (key, value) in payload {
      self.set(&key, value);
    }
  }

  /// Look a field up without triggering any loading.
  ///
  /// Declared properties without a value resolve to `null`.
  pub fn lookup(&self, name: &str) -> Option<&Value> {
    let name = self.property_name(name);
    self
      .declared
      .get(&name)
      .or_else(|| self.additional.get(&name))
      .or_else(|| self.is_declared(&name).then_some(&NULL))
  }

  /// Whether accessing `name` should trigger a lazy reload
  pub fn needs_reload_for(&self, name: &str) -> bool {
    self.state == LoadState::Empty && self.lookup(name).is_none()
  }

  /// Whether a field holds a numeric-looking value
  pub fn is_numeric(&self, name: &str) -> bool {
    self.lookup(name).is_some_and(is_numeric)
  }

  /// Fields outside the declared schema, in discovery order
  pub fn additional_fields(&self) -> &Map<String, Value> {
    &self.additional
  }

  /// Values of declared properties that have been set
  pub fn declared_fields(&self) -> &Map<String, Value> {
    &self.declared
  }

  /// All populated fields, declared first
  pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
    self.declared.iter().chain(self.additional.iter())
  }

  pub fn len(&self) -> usize {
    self.declared.len() + self.additional.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub const fn state(&self) -> LoadState {
    self.state
  }

  pub fn is_loaded(&self) -> bool {
    self.state == LoadState::Loaded
  }

  pub const fn mark_loaded(&mut self) {
    self.state = LoadState::Loaded;
  }

  /// Enter `Loading`
  pub const fn begin_load(&mut self) {
    self.state = LoadState::Loading;
  }

  /// Leave `Loading`: `Loaded` on success, back to `Empty` on failure
  pub const fn finish_load(&mut self, succeeded: bool) {
    self.state = if succeeded { LoadState::Loaded } else { LoadState::Empty };
  }
}

fn element_name(element: &Value) -> Option<String> {
  ["key", "id"].iter().find_map(|field| match element.get(field)? {
    Value::String(text) if !text.is_empty() => Some(text.clone()),
    Value::Number(number) => Some(number.to_string()),
    _ => None,
  })
}
