//! # dataptr
//!
//! Typed, path-addressed access to decoded JSON and YAML documents.
//!
//! A [`DataPtr`] wraps one `serde_json::Value` and resolves paths of string
//! segments against it. Accessors narrow the value found to the requested
//! type, and the `*_or` variants substitute a default when, and only when,
//! the path does not exist.
//!
//! ## Quick start
//!
//! ```rust
//! use dataptr::{DataPtr, ErrorKind};
//!
//! let dp = DataPtr::from_yaml("x: 785\nz: [ok, 2, 5, 7, true, 13, 30s]\n").unwrap();
//!
//! assert_eq!(dp.as_int(&["x"]).unwrap(), 785);
//! assert!(dp.as_bool(&["z", "4"]).unwrap());
//!
//! let err = dp.as_string(&["x"]).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::BadType);
//! assert_eq!(err.pointer(), Some("/x"));
//! ```
//!
//! ## Modules
//!
//! - [`ptr`]: the [`DataPtr`] view and its typed accessors
//! - [`pointer`]: pointer resolution that reports missing keys distinctly
//! - [`duration`]: duration literals (`5m`, `1h30m`, `250ms`)
//! - [`yaml`]: YAML decoding onto the JSON value model
//! - [`error`]: error taxonomy
//! - [`types`]: value shapes and input formats

pub mod duration;
pub mod error;
pub mod pointer;
pub mod ptr;
pub mod types;
pub mod yaml;

pub use duration::{parse_duration, DurationError};
pub use error::{Error, ErrorKind, Result};
pub use pointer::ResolveError;
pub use ptr::DataPtr;
pub use types::{Expected, Format, ValueKind};

pub use serde_json::Value;
