//! Error types for parsing, resolving and narrowing dynamic values.

use crate::pointer::ResolveError;
use crate::types::{Expected, ValueKind};
use thiserror::Error;

/// Errors produced by [`DataPtr`](crate::DataPtr) construction and lookups.
///
/// Variants fall into four kinds, see [`ErrorKind`]. Callers that only care
/// about recovery should match on [`Error::kind`] rather than on variants.
#[derive(Error, Debug)]
pub enum Error {
    /// The input bytes were not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input bytes were not valid YAML.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The YAML parsed, but holds something the value model cannot express
    /// (a non-scalar mapping key, a non-finite float).
    #[error("YAML value at {location} cannot be represented: {message}")]
    YamlShape { location: String, message: String },

    /// The path traverses a key or index that does not exist.
    #[error("not found at '{pointer}': the referenced data does not exist")]
    NotFound { pointer: String },

    /// The path exists but the value there has the wrong shape.
    #[error("bad type at '{pointer}': expected {expected}, found {found}")]
    BadType {
        pointer: String,
        expected: Expected,
        found: ValueKind,
    },

    /// Any other resolver failure, passed through unchanged.
    #[error("cannot resolve '{pointer}': {source}")]
    Resolution {
        pointer: String,
        source: ResolveError,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Parse,
    NotFound,
    BadType,
    Resolution,
}

impl Error {
    /// Which of the four error kinds this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Json(_) | Error::Yaml(_) | Error::YamlShape { .. } => ErrorKind::Parse,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::BadType { .. } => ErrorKind::BadType,
            Error::Resolution { .. } => ErrorKind::Resolution,
        }
    }

    /// True for [`Error::NotFound`], the only error a default may replace.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// The normalized pointer the error refers to, if it came from a lookup.
    pub fn pointer(&self) -> Option<&str> {
        match self {
            Error::NotFound { pointer }
            | Error::BadType { pointer, .. }
            | Error::Resolution { pointer, .. } => Some(pointer),
            _ => None,
        }
    }
}

/// Convenience alias used throughout dataptr.
pub type Result<T> = std::result::Result<T, Error>;
