//! Frontmatter codec: the leading YAML key/value block.
//!
//! The codec owns everything between the two `---` fences: parsing the raw
//! block into a YAML value tree, nested dot-path `get`/`set`/`delete`, and
//! re-serialization. Splicing the serialized block back into a document's
//! line buffer lives in [`crate::mutate`]; this module never touches lines.
//!
//! Serialization defers quoting to the YAML emitter: scalars containing
//! structurally significant characters (`:`, `#`, quotes, leading
//! indicators) come back quoted, plain scalars stay bare.

use serde_yaml::{Mapping, Value};

use crate::error::CoreError;

/// Parse a raw frontmatter block (fence lines already stripped).
///
/// An empty or whitespace-only block parses to an empty mapping. A block
/// that is valid YAML but not a mapping at the top level is rejected,
/// since frontmatter is by definition a key/value map.
pub fn parse_block(raw: &str) -> Result<Value, CoreError> {
    if raw.trim().is_empty() {
        return Ok(Value::Mapping(Mapping::new()));
    }
    let value: Value =
        serde_yaml::from_str(raw).map_err(|e| CoreError::Parse(format!("frontmatter: {e}")))?;
    match value {
        Value::Mapping(_) => Ok(value),
        other => Err(CoreError::Parse(format!(
            "frontmatter must be a mapping, got {}",
            type_name(&other)
        ))),
    }
}

/// Serialize a value tree back to block text (no fences, no trailing blank).
pub fn serialize_block(value: &Value) -> Result<String, CoreError> {
    if matches!(value, Value::Mapping(m) if m.is_empty()) {
        return Ok(String::new());
    }
    let text =
        serde_yaml::to_string(value).map_err(|e| CoreError::Parse(format!("frontmatter: {e}")))?;
    Ok(text.trim_end_matches('\n').to_string())
}

/// Look up a nested value by dot-separated path. Returns `None` for any
/// missing segment.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in split_path(path)? {
        current = current.as_mapping()?.get(Value::from(segment))?;
    }
    Some(current)
}

/// Set a nested value, creating intermediate mappings as needed.
///
/// Fails if an intermediate segment already holds a non-mapping value; the
/// codec never silently discards data that would be shadowed.
pub fn set_path(root: &mut Value, path: &str, value: Value) -> Result<(), CoreError> {
    let segments =
        split_path(path).ok_or_else(|| CoreError::Parse(format!("empty path segment in '{path}'")))?;

    let mut current = root;
    let last = segments.len() - 1;
    for (i, segment) in segments.iter().enumerate() {
        let map = match current {
            Value::Mapping(m) => m,
            other => {
                return Err(CoreError::Parse(format!(
                    "cannot descend into '{segment}': parent is {}",
                    type_name(other)
                )));
            }
        };
        let key = Value::from(segment.as_str());
        if i == last {
            map.insert(key, value);
            return Ok(());
        }
        current = map
            .entry(key)
            .or_insert_with(|| Value::Mapping(Mapping::new()));
    }
    unreachable!("split_path never yields an empty segment list")
}

/// Delete the leaf at a nested path. Returns `true` if a value was removed.
///
/// A parent mapping left empty by the delete is kept, not pruned; cascading
/// removal surprised callers in practice and is left to them.
pub fn delete_path(root: &mut Value, path: &str) -> Result<bool, CoreError> {
    let segments =
        split_path(path).ok_or_else(|| CoreError::Parse(format!("empty path segment in '{path}'")))?;

    let mut current = root;
    let last = segments.len() - 1;
    for (i, segment) in segments.iter().enumerate() {
        let Value::Mapping(map) = current else {
            return Ok(false);
        };
        let key = Value::from(segment.as_str());
        if i == last {
            return Ok(map.remove(&key).is_some());
        }
        match map.get_mut(&key) {
            Some(next) => current = next,
            None => return Ok(false),
        }
    }
    unreachable!("split_path never yields an empty segment list")
}

/// Interpret a user-supplied scalar string as a YAML value.
///
/// `true`/`false`, integers, floats, and `null`/`~` become typed values;
/// everything else stays a string. Callers that want a literal string
/// `"true"` should quote at their own boundary.
pub fn coerce_scalar(raw: &str) -> Value {
    match raw {
        "null" | "~" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = raw.parse::<f64>() {
        if f.is_finite() {
            return Value::Number(serde_yaml::Number::from(f));
        }
    }
    Value::String(raw.to_string())
}

/// Render a scalar for display; compound values fall back to YAML flow text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end_matches('\n').to_string())
            .unwrap_or_default(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn split_path(path: &str) -> Option<Vec<String>> {
    let segments: Vec<String> = path.split('.').map(str::to_string).collect();
    if segments.is_empty() || segments.iter().any(String::is_empty) {
        return None;
    }
    Some(segments)
}
