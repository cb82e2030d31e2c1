//! YAML input, mapped onto the JSON value model.
//!
//! YAML is richer than JSON: mapping keys may be any node, values may carry
//! tags, and floats may be `.inf`/`.nan`. Conversion rules:
//!
//! - tags are dropped, the tagged value is kept
//! - string keys are kept; bool, number and null keys are stringified
//!   (`1` → `"1"`, `~` → `"null"`)
//! - sequence or mapping keys, and non-finite floats, are rejected with
//!   [`Error::YamlShape`]
//! - merge keys (`<<: *anchor`) are applied before conversion, so merged
//!   entries are reachable by path; keys written in the mapping itself win
//! - when two keys stringify to the same text, the later one wins
//! - an empty document is `null`
//! - in a multi-document stream only the first document is read; later
//!   documents are ignored

use crate::error::{Error, Result};
use crate::pointer::escape_token;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use serde_yaml::Value as Yaml;

/// Parse the first YAML document in `bytes` into a JSON value tree.
pub fn from_slice(bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    let Some(document) = serde_yaml::Deserializer::from_slice(bytes).next() else {
        return Ok(Value::Null);
    };
    let mut yaml = Yaml::deserialize(document)?;
    yaml.apply_merge()?;
    convert(yaml, &mut String::new())
}

/// `location` is the pointer of `node` in the document, for error reporting.
fn convert(node: Yaml, location: &mut String) -> Result<Value> {
    Ok(match node {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => Value::Number(convert_number(&n, location)?),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                let mark = push_segment(location, &i.to_string());
                out.push(convert(item, location)?);
                location.truncate(mark);
            }
            Value::Array(out)
        }
        Yaml::Mapping(mapping) => {
            let mut out = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = convert_key(key, location)?;
                let mark = push_segment(location, &key);
                let value = convert(value, location)?;
                location.truncate(mark);
                out.insert(key, value);
            }
            Value::Object(out)
        }
        Yaml::Tagged(tagged) => convert(tagged.value, location)?,
    })
}

fn convert_number(n: &serde_yaml::Number, location: &str) -> Result<Number> {
    if let Some(i) = n.as_i64() {
        return Ok(Number::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Number::from(u));
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .ok_or_else(|| Error::YamlShape {
            location: display_location(location),
            message: format!("non-finite number {n}"),
        })
}

fn convert_key(key: Yaml, location: &str) -> Result<String> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => convert_key(tagged.value, location),
        Yaml::Sequence(_) | Yaml::Mapping(_) => Err(Error::YamlShape {
            location: display_location(location),
            message: "mapping keys must be scalars".to_string(),
        }),
    }
}

/// Append `/segment` and return the length to truncate back to.
fn push_segment(location: &mut String, segment: &str) -> usize {
    let mark = location.len();
    location.push('/');
    location.push_str(&escape_token(segment));
    mark
}

fn display_location(location: &str) -> String {
    if location.is_empty() {
        "/".to_string()
    } else {
        location.to_string()
    }
}
