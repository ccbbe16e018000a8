//! # Params Encoder
//!
//! Serializes nested mappings into a flat query string using bracket-path
//! notation, e.g. `{"foo": {"bar": [1, 2]}}` becomes `foo[bar][]=1&foo[bar][]=2`.
//!
//! Values are percent-encoded so that only unreserved characters (`A-Z a-z 0-9
//! - _ . ~`) survive verbatim. Keys are emitted as given.

use std::collections::VecDeque;

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised when a value cannot be turned into query parameters
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
  #[error("Query parameters must be a mapping, got {0}")]
  NotAMapping(&'static str),
}

/// Encode a mapping as a query string without a trailing separator.
pub fn encode(params: &Map<String, Value>) -> String {
  let mut encoded: String = params.iter().map(|(key, value)| encode_param(key, value)).collect();
  if encoded.ends_with('&') {
    encoded.pop();
  }
  encoded
}

/// Encode an arbitrary JSON value, which must be a mapping at the top level.
pub fn encode_value(value: &Value) -> Result<String, ParamsError> {
  match value {
    Value::Object(params) => Ok(encode(params)),
    other => Err(ParamsError::NotAMapping(type_name(other))),
  }
}

/// Encode a single key/value pair, recursing into sequences and mappings.
///
/// Every emitted pair carries a trailing `&`. Nested mappings are drained
/// breadth-first: the scalars and sequences of one level are written before the
/// mappings they sit next to are expanded.
pub fn encode_param(key: &str, value: &Value) -> String {
  let mut param = String::new();
  let mut pending: VecDeque<(String, &Map<String, Value>)> = VecDeque::new();

  match value {
    Value::Array(elements) => {
      let element_key = format!("{key}[]");
      for element in elements {
        param.push_str(&encode_param(&element_key, element));
      }
    }
    Value::Object(hash) => pending.push_back((key.to_string(), hash)),
    scalar => push_pair(&mut param, key, scalar),
  }

  while let Some((parent, hash)) = pending.pop_front() {
    for (child, value) in hash {
      let path = format!("{parent}[{child}]");
      match value {
        Value::Object(nested) => pending.push_back((path, nested)),
        _ => param.push_str(&encode_param(&path, value)),
      }
    }
  }

  param
}

fn push_pair(param: &mut String, key: &str, scalar: &Value) {
  let raw = match scalar {
    Value::String(text) => text.clone(),
    Value::Null => String::new(),
    other => other.to_string(),
  };
  param.push_str(key);
  param.push('=');
  param.push_str(&urlencoding::encode(&raw));
  param.push('&');
}

const fn type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "a sequence",
    Value::Object(_) => "a mapping",
  }
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeSet;

  use insta::assert_snapshot;
  use serde_json::json;

  use super::*;

  fn encode_json(value: Value) -> String {
    encode_value(&value).unwrap()
  }

  fn pairs(encoded: &str) -> BTreeSet<String> {
    encoded.split('&').map(str::to_string).collect()
  }

  #[test]
  fn test_encode_flat_mapping() {
    assert_eq!(encode_json(json!({ "foo": "bar", "baz": "bat" })), "foo=bar&baz=bat");
  }

  #[test]
  fn test_encode_sequence_repeats_key() {
    assert_eq!(encode_json(json!({ "foo": ["bar", "baz"] })), "foo[]=bar&foo[]=baz");
    assert_eq!(encode_json(json!({ "a": [1, 2] })), "a[]=1&a[]=2");
  }

  #[test]
  fn test_encode_sequence_of_mappings() {
    let encoded = encode_json(json!({ "foo": [{ "bar": "1" }, { "bar": 2 }] }));
    assert_eq!(encoded, "foo[][bar]=1&foo[][bar]=2");
  }

  #[test]
  fn test_encode_deeply_nested() {
    let encoded = encode_json(json!({ "foo": { "bar": [{ "baz": 1 }, { "baz": "2" }] } }));
    assert_eq!(pairs(&encoded), pairs("foo[bar][][baz]=1&foo[bar][][baz]=2"));
    assert_eq!(encoded, "foo[bar][][baz]=1&foo[bar][][baz]=2");
  }

  #[test]
  fn test_encode_numeric_like_child_keys() {
    assert_eq!(encode_json(json!({ "foo": { "1": "bar", "2": "baz" } })), "foo[1]=bar&foo[2]=baz");
  }

  #[test]
  fn test_encode_drains_nested_mappings_breadth_first() {
    let encoded = encode_json(json!({
      "a": {
        "b": { "c": 1, "d": { "e": 2 } },
        "f": 3,
        "g": [4]
      }
    }));
    assert_eq!(encoded, "a[f]=3&a[g][]=4&a[b][c]=1&a[b][d][e]=2");
  }

  #[test]
  fn test_encode_escapes_reserved_characters() {
    assert_eq!(encode_json(json!({ "q": "?&\" +" })), "q=%3F%26%22%20%2B");
  }

  #[test]
  fn test_encode_never_escapes_keys() {
    assert_eq!(encode_json(json!({ "a b": "c d" })), "a b=c%20d");
  }

  #[test]
  fn test_encode_keeps_unreserved_characters() {
    assert_eq!(encode_json(json!({ "v": "AZaz09-_.~" })), "v=AZaz09-_.~");
  }

  #[test]
  fn test_encode_scalar_kinds() {
    assert_eq!(
      encode_json(json!({ "t": true, "n": null, "f": 1.5, "i": -3 })),
      "t=true&n=&f=1.5&i=-3"
    );
  }

  #[test]
  fn test_encode_no_trailing_separator() {
    let encoded = encode_json(json!({
      "name": "Bob",
      "address": {
        "street": "111 Ruby Ave.",
        "city": "Ruby Central",
        "phones": ["111-111-1111", "222-222-2222"]
      }
    }));
    assert!(!encoded.ends_with('&'));
    assert_snapshot!(encoded, @"name=Bob&address[street]=111%20Ruby%20Ave.&address[city]=Ruby%20Central&address[phones][]=111-111-1111&address[phones][]=222-222-2222");
  }

  #[test]
  fn test_encode_empty_inputs() {
    assert_eq!(encode_json(json!({})), "");
    assert_eq!(encode_json(json!({ "a": [], "b": {} })), "");
  }

  #[test]
  fn test_encode_param_keeps_trailing_separator() {
    assert_eq!(encode_param("name", &json!("Bob Jones")), "name=Bob%20Jones&");
  }

  #[test]
  fn test_encode_value_rejects_non_mappings() {
    assert_eq!(encode_value(&json!([1, 2])), Err(ParamsError::NotAMapping("a sequence")));
    assert_eq!(encode_value(&json!("text")), Err(ParamsError::NotAMapping("a string")));
  }

  #[test]
  fn test_scalar_mapping_survives_decoding() {
    let original = json!({
      "jql": "project = EX AND status = \"In Progress\"",
      "startAt": 0,
      "fields": "summary,status",
      "symbols": "?&=+#/%"
    });
    let encoded = encode_json(original.clone());

    let decoded: BTreeSet<(String, String)> = ::url::form_urlencoded::parse(encoded.as_bytes())
      .map(|(key, value)| (key.into_owned(), value.into_owned()))
      .collect();
    let expected: BTreeSet<(String, String)> = original
      .as_object()
      .unwrap()
      .iter()
      .map(|(key, value)| {
        let text = match value {
          Value::String(text) => text.clone(),
          other => other.to_string(),
        };
        (key.clone(), text)
      })
      .collect();

    assert_eq!(decoded, expected);
  }
}
