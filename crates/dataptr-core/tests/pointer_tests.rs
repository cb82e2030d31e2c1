/// Integration tests for the JSON Pointer resolver.
///
/// Checks successful lookups, escaping, and the split between missing keys
/// or indices and pointers that can never resolve.
use dataptr::pointer::{escape_token, resolve_pointer};
use dataptr::{ResolveError, ValueKind};
use serde_json::{json, Value};

fn doc() -> Value {
    json!({
        "a": {"b": [10, 20, {"c": "deep"}]},
        "with/slash": 1,
        "with~tilde": 2,
        "": "empty key",
        "nil": null
    })
}

// ============================================================================
// Successful lookups
// ============================================================================

#[test]
fn empty_pointer_is_the_root() {
    let d = doc();
    assert_eq!(resolve_pointer(&d, "").unwrap(), &d);
}

#[test]
fn slash_addresses_the_empty_key() {
    assert_eq!(resolve_pointer(&doc(), "/").unwrap(), &json!("empty key"));
}

#[test]
fn walks_mappings_and_sequences() {
    let d = doc();
    assert_eq!(resolve_pointer(&d, "/a/b/0").unwrap(), &json!(10));
    assert_eq!(resolve_pointer(&d, "/a/b/2/c").unwrap(), &json!("deep"));
}

#[test]
fn unescapes_reference_tokens() {
    let d = doc();
    assert_eq!(resolve_pointer(&d, "/with~1slash").unwrap(), &json!(1));
    assert_eq!(resolve_pointer(&d, "/with~0tilde").unwrap(), &json!(2));
}

#[test]
fn escape_token_builds_resolvable_pointers() {
    let d = doc();
    let pointer = format!("/{}", escape_token("with/slash"));
    assert_eq!(resolve_pointer(&d, &pointer).unwrap(), &json!(1));
    assert_eq!(escape_token("plain"), "plain");
}

// ============================================================================
// Missing data
// ============================================================================

#[test]
fn missing_property_is_missing() {
    let err = resolve_pointer(&doc(), "/a/zzz").unwrap_err();
    assert_eq!(err, ResolveError::MissingProperty("zzz".to_string()));
    assert!(err.is_missing());
}

#[test]
fn index_past_length_is_missing() {
    let err = resolve_pointer(&doc(), "/a/b/3").unwrap_err();
    assert_eq!(err, ResolveError::IndexOutOfRange { index: 3, len: 3 });
    assert!(err.is_missing());
}

#[test]
fn dash_token_is_missing() {
    let err = resolve_pointer(&doc(), "/a/b/-").unwrap_err();
    assert_eq!(err, ResolveError::PastEnd { len: 3 });
    assert!(err.is_missing());
}

// ============================================================================
// Other failures
// ============================================================================

#[test]
fn pointer_without_leading_slash_is_syntax_error() {
    let err = resolve_pointer(&doc(), "a/b").unwrap_err();
    assert_eq!(err, ResolveError::Syntax("a/b".to_string()));
    assert!(!err.is_missing());
}

#[test]
fn bad_escape_is_not_missing() {
    let err = resolve_pointer(&doc(), "/a~2").unwrap_err();
    assert!(matches!(err, ResolveError::BadEscape(_)));
    assert!(!err.is_missing());
}

#[test]
fn malformed_index_is_not_missing() {
    for token in ["x", "01", "-1", "1.0"] {
        let err = resolve_pointer(&doc(), &format!("/a/b/{token}")).unwrap_err();
        assert_eq!(err, ResolveError::InvalidIndex(token.to_string()), "token {token}");
        assert!(!err.is_missing());
    }
}

#[test]
fn descending_into_a_scalar_is_not_missing() {
    let err = resolve_pointer(&doc(), "/a/b/0/x").unwrap_err();
    assert_eq!(
        err,
        ResolveError::NotAContainer {
            token: "x".to_string(),
            kind: ValueKind::Number,
        }
    );
    assert!(!err.is_missing());
}

#[test]
fn descending_into_null_is_not_missing() {
    let err = resolve_pointer(&doc(), "/nil/x").unwrap_err();
    assert!(matches!(
        err,
        ResolveError::NotAContainer {
            kind: ValueKind::Null,
            ..
        }
    ));
}
