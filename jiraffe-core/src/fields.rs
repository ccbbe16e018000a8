//! Field name helpers used when materializing payload keys as properties.

use serde_json::Value;

/// Turn a payload key into a usable property name.
///
/// Hyphens become underscores and names starting with a digit gain a leading
/// underscore, so `due-date` maps to `due_date` and `10100` to `_10100`.
pub fn normalize_field_name(key: &str) -> String {
  let name = key.replace('-', "_");
  if name.starts_with(|c: char| c.is_ascii_digit()) {
    format!("_{name}")
  } else {
    name
  }
}

/// Whether a value reads as a number. Conversion failures count as `false`.
///
/// Strings must be plain decimal or exponent notation; hex literals and `_`
/// digit separators are not numeric.
pub fn is_numeric(value: &Value) -> bool {
  match value {
    Value::Number(_) => true,
    Value::String(text) => {
      let text = text.trim();
      text.bytes().any(|b| b.is_ascii_digit()) && text.parse::<f64>().is_ok()
    }
    _ => false,
  }
}
