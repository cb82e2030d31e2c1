//! Typed, path-addressed access to one dynamic value.
//!
//! A path is a slice of segments. Segments are joined with `/` behind a
//! leading `/` to form the normalized pointer (`["y", "map", "a"]` becomes
//! `/y/map/a`), which is resolved with [`crate::pointer::resolve_pointer`]
//! and reported back in every lookup error. The empty path, whose pointer
//! is `/`, is the receiver itself.
//!
//! Lookups fail in one of three ways:
//!
//! - [`Error::NotFound`]: a key or index on the path does not exist
//! - [`Error::BadType`]: the path exists but holds the wrong shape
//! - [`Error::Resolution`]: anything else the resolver rejects
//!
//! The `*_or` accessors and [`DataPtr::maybe_resolve`] recover from
//! `NotFound` only.

use crate::duration::parse_duration;
use crate::error::{Error, Result};
use crate::pointer::resolve_pointer;
use crate::types::{Expected, Format, ValueKind};
use chrono::TimeDelta;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A read-only view over a decoded JSON or YAML value.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use dataptr::DataPtr;
///
/// let dp = DataPtr::from_json(r#"{"y": {"foo": "bar", "timeout": "5m"}}"#).unwrap();
/// assert_eq!(dp.as_string(&["y", "foo"]).unwrap(), "bar");
/// assert_eq!(dp.as_duration(&["y", "timeout"]).unwrap(), TimeDelta::minutes(5));
/// assert_eq!(dp.as_int_or(123, &["y", "missing"]).unwrap(), 123);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataPtr {
    value: Value,
}

impl DataPtr {
    /// Wrap an already-decoded value.
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// A view over an empty mapping, standing in for "nothing here".
    pub fn empty() -> Self {
        Self::new(Value::Object(Map::new()))
    }

    /// Decode JSON bytes.
    pub fn from_json(bytes: impl AsRef<[u8]>) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes.as_ref()).inspect_err(|e| {
            debug!("JSON decode failed: {e}");
        })?;
        Ok(Self::new(value))
    }

    /// Decode YAML bytes. See [`crate::yaml`] for how YAML maps onto the
    /// value model.
    pub fn from_yaml(bytes: impl AsRef<[u8]>) -> Result<Self> {
        let value = crate::yaml::from_slice(bytes.as_ref()).inspect_err(|e| {
            debug!("YAML decode failed: {e}");
        })?;
        Ok(Self::new(value))
    }

    /// Decode bytes in the given format.
    pub fn parse(bytes: impl AsRef<[u8]>, format: Format) -> Result<Self> {
        match format {
            Format::Json => Self::from_json(bytes),
            Format::Yaml => Self::from_yaml(bytes),
        }
    }

    /// The wrapped value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Unwrap the view, returning the owned value.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// The shape of the wrapped value.
    pub fn kind(&self) -> ValueKind {
        ValueKind::of(&self.value)
    }

    /// Resolve `path` to a new view over the sub-value it addresses.
    ///
    /// Returns the normalized pointer alongside the view. The empty path
    /// yields `/` and a copy of `self` without consulting the resolver.
    pub fn resolve(&self, path: &[&str]) -> Result<(String, DataPtr)> {
        let (pointer, value) = self.lookup(path)?;
        Ok((pointer, DataPtr::new(value.clone())))
    }

    /// Like [`resolve`](Self::resolve), but an absent path yields
    /// [`DataPtr::empty`] instead of [`Error::NotFound`].
    pub fn maybe_resolve(&self, path: &[&str]) -> Result<DataPtr> {
        match self.resolve(path) {
            Ok((_, dp)) => Ok(dp),
            Err(Error::NotFound { pointer }) => {
                debug!("{pointer} not found, using empty value");
                Ok(DataPtr::empty())
            }
            Err(e) => Err(e),
        }
    }

    /// Each entry of the mapping at `path`, wrapped in its own view.
    pub fn as_mapping(&self, path: &[&str]) -> Result<BTreeMap<String, DataPtr>> {
        self.narrow(path, Expected::Mapping, |value| {
            value.as_object().map(|map| {
                map.iter()
                    .map(|(k, v)| (k.clone(), DataPtr::new(v.clone())))
                    .collect()
            })
        })
    }

    /// Each element of the sequence at `path`, in order.
    pub fn as_sequence(&self, path: &[&str]) -> Result<Vec<DataPtr>> {
        self.narrow(path, Expected::Sequence, |value| {
            value
                .as_array()
                .map(|items| items.iter().cloned().map(DataPtr::new).collect())
        })
    }

    /// The boolean at `path`. Strings such as `"true"` are not coerced.
    pub fn as_bool(&self, path: &[&str]) -> Result<bool> {
        self.narrow(path, Expected::Bool, Value::as_bool)
    }

    /// The integer at `path`.
    ///
    /// Floats are accepted only when they have no fractional part and fit
    /// in an `i64`; nothing is truncated or clamped.
    pub fn as_int(&self, path: &[&str]) -> Result<i64> {
        self.narrow(path, Expected::Int, exact_integer)
    }

    /// The string at `path`. Numbers and booleans are not stringified.
    pub fn as_string(&self, path: &[&str]) -> Result<String> {
        self.narrow(path, Expected::String, |value| {
            value.as_str().map(str::to_string)
        })
    }

    /// The duration literal at `path`, e.g. `"5m"` or `"1h30m"`.
    ///
    /// Non-strings and strings that do not parse are both reported as
    /// [`Error::BadType`].
    pub fn as_duration(&self, path: &[&str]) -> Result<TimeDelta> {
        self.narrow(path, Expected::Duration, |value| {
            let s = value.as_str()?;
            parse_duration(s)
                .inspect_err(|e| debug!("rejecting duration: {e}"))
                .ok()
        })
    }

    /// [`as_mapping`](Self::as_mapping), returning `default` only when the
    /// path is absent. Every other error is still reported.
    pub fn as_mapping_or(
        &self,
        default: BTreeMap<String, DataPtr>,
        path: &[&str],
    ) -> Result<BTreeMap<String, DataPtr>> {
        or_default(self.as_mapping(path), default)
    }

    /// [`as_sequence`](Self::as_sequence), returning `default` only on
    /// [`Error::NotFound`].
    pub fn as_sequence_or(&self, default: Vec<DataPtr>, path: &[&str]) -> Result<Vec<DataPtr>> {
        or_default(self.as_sequence(path), default)
    }

    /// [`as_bool`](Self::as_bool), returning `default` only on
    /// [`Error::NotFound`].
    pub fn as_bool_or(&self, default: bool, path: &[&str]) -> Result<bool> {
        or_default(self.as_bool(path), default)
    }

    /// [`as_int`](Self::as_int), returning `default` only on
    /// [`Error::NotFound`].
    pub fn as_int_or(&self, default: i64, path: &[&str]) -> Result<i64> {
        or_default(self.as_int(path), default)
    }

    /// [`as_string`](Self::as_string), returning `default` only on
    /// [`Error::NotFound`].
    pub fn as_string_or(&self, default: &str, path: &[&str]) -> Result<String> {
        or_default(self.as_string(path), default.to_string())
    }

    /// [`as_duration`](Self::as_duration), returning `default` only on
    /// [`Error::NotFound`]. A present but unparsable literal is still BadType.
    pub fn as_duration_or(&self, default: TimeDelta, path: &[&str]) -> Result<TimeDelta> {
        or_default(self.as_duration(path), default)
    }

    /// Borrowing resolution shared by every accessor.
    fn lookup(&self, path: &[&str]) -> Result<(String, &Value)> {
        let pointer = format!("/{}", path.join("/"));
        if pointer == "/" {
            return Ok((pointer, &self.value));
        }

        match resolve_pointer(&self.value, &pointer) {
            Ok(value) => {
                trace!("resolved {pointer} to a {} value", ValueKind::of(value));
                Ok((pointer, value))
            }
            Err(source) if source.is_missing() => {
                trace!("{pointer}: {source}");
                Err(Error::NotFound { pointer })
            }
            Err(source) => Err(Error::Resolution { pointer, source }),
        }
    }

    fn narrow<'a, T>(
        &'a self,
        path: &[&str],
        expected: Expected,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T> {
        let (pointer, value) = self.lookup(path)?;
        extract(value).ok_or_else(|| Error::BadType {
            pointer,
            expected,
            found: ValueKind::of(value),
        })
    }
}

fn or_default<T>(result: Result<T>, default: T) -> Result<T> {
    match result {
        Err(Error::NotFound { pointer }) => {
            debug!("{pointer} not found, using default");
            Ok(default)
        }
        other => other,
    }
}

fn exact_integer(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.is_u64() {
        // Positive integer above i64::MAX.
        return None;
    }
    let f = n.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

impl Default for DataPtr {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for DataPtr {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for DataPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
