//! JSON Pointer (RFC 6901) resolution with a distinct "missing" signal.
//!
//! `serde_json::Value::pointer` collapses every failure into `None`. Lookups
//! here need to tell a key or index that is simply absent apart from a
//! pointer that can never resolve (a scalar in the middle of the path, a
//! malformed index), so resolution reports a [`ResolveError`] instead.
//!
//! # Examples
//!
//! ```
//! use dataptr::pointer::resolve_pointer;
//! use serde_json::json;
//!
//! let doc = json!({"z": ["ok", 2, 5]});
//! assert_eq!(resolve_pointer(&doc, "/z/1").unwrap(), &json!(2));
//!
//! let err = resolve_pointer(&doc, "/z/9").unwrap_err();
//! assert!(err.is_missing());
//! ```

use crate::types::ValueKind;
use serde_json::Value;
use std::borrow::Cow;
use thiserror::Error;

/// Why a pointer failed to resolve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("pointer '{0}' does not start with '/'")]
    Syntax(String),

    #[error("invalid escape sequence in reference token '{0}'")]
    BadEscape(String),

    #[error("property '{0}' not found")]
    MissingProperty(String),

    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The `-` token, which names the element after the last one.
    #[error("index '-' refers past the end of a sequence of length {len}")]
    PastEnd { len: usize },

    #[error("invalid sequence index '{0}'")]
    InvalidIndex(String),

    #[error("cannot look up '{token}' in a {kind} value")]
    NotAContainer { token: String, kind: ValueKind },
}

impl ResolveError {
    /// True when the pointer is well formed and walks real containers, but
    /// a key or index along the way does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            ResolveError::MissingProperty(_)
                | ResolveError::IndexOutOfRange { .. }
                | ResolveError::PastEnd { .. }
        )
    }
}

/// Resolve `pointer` against `root`.
///
/// The empty pointer addresses `root` itself. Every other pointer must start
/// with `/`; each `/`-separated reference token is unescaped (`~1` is `/`,
/// `~0` is `~`) and looked up as a mapping key or a sequence index.
pub fn resolve_pointer<'v>(root: &'v Value, pointer: &str) -> Result<&'v Value, ResolveError> {
    if pointer.is_empty() {
        return Ok(root);
    }
    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(ResolveError::Syntax(pointer.to_string()));
    };

    let mut current = root;
    for raw in rest.split('/') {
        let token = unescape_token(raw)?;
        current = step(current, &token)?;
    }
    Ok(current)
}

fn step<'v>(node: &'v Value, token: &str) -> Result<&'v Value, ResolveError> {
    match node {
        Value::Object(map) => map
            .get(token)
            .ok_or_else(|| ResolveError::MissingProperty(token.to_string())),
        Value::Array(items) => {
            let len = items.len();
            if token == "-" {
                return Err(ResolveError::PastEnd { len });
            }
            let index = parse_index(token)?;
            items
                .get(index)
                .ok_or(ResolveError::IndexOutOfRange { index, len })
        }
        other => Err(ResolveError::NotAContainer {
            token: token.to_string(),
            kind: ValueKind::of(other),
        }),
    }
}

/// Array indices are `0` or a digit string without a leading zero.
fn parse_index(token: &str) -> Result<usize, ResolveError> {
    let well_formed = !token.is_empty()
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token == "0" || !token.starts_with('0'));
    if !well_formed {
        return Err(ResolveError::InvalidIndex(token.to_string()));
    }
    // Digits that overflow usize can never be in range.
    Ok(token.parse().unwrap_or(usize::MAX))
}

fn unescape_token(raw: &str) -> Result<Cow<'_, str>, ResolveError> {
    if !raw.contains('~') {
        return Ok(Cow::Borrowed(raw));
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return Err(ResolveError::BadEscape(raw.to_string())),
        }
    }
    Ok(Cow::Owned(out))
}

/// Escape a raw mapping key so it can be used as a single reference token.
pub fn escape_token(key: &str) -> Cow<'_, str> {
    if key.contains(['~', '/']) {
        Cow::Owned(key.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(key)
    }
}
