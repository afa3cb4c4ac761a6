//! Attribute diffing and normalization
//!
//! Declared and observed state are both plain attribute maps. The diff is
//! schema-aware in exactly one way: attributes a kind names in
//! `SET_ATTRIBUTES` compare by membership, so `["a", "b"]` and `["b", "a"]`
//! are the same value and never produce a spurious update.

use crate::error::{ReconcileError, Result};
use crate::resource::Attributes;
use serde_json::Value;

/// Changed attributes: keys present in `declared` whose values differ from
/// `observed` under the comparison rules. Keys absent from `declared` are
/// unmanaged and never diffed.
pub fn diff(declared: &Attributes, observed: &Attributes, set_attrs: &[&str]) -> Attributes {
    let mut changes = Attributes::new();
    for (key, want) in declared {
        let as_set = set_attrs.contains(&key.as_str());
        let unchanged = observed
            .get(key)
            .map(|have| values_equal(want, have, as_set))
            .unwrap_or(false);
        if !unchanged {
            changes.insert(key.clone(), want.clone());
        }
    }
    changes
}

/// Sort set-valued arrays in place so equal sets always serialize
/// identically; the write-back into state stays stable across refreshes.
pub fn normalize(attributes: &mut Attributes, set_attrs: &[&str]) {
    for key in set_attrs {
        if let Some(Value::Array(items)) = attributes.get_mut(*key) {
            items.sort_by_cached_key(canonical);
            items.dedup_by(|a, b| canonical(a) == canonical(b));
        }
    }
}

fn values_equal(a: &Value, b: &Value, as_set: bool) -> bool {
    if as_set {
        if let (Value::Array(xs), Value::Array(ys)) = (a, b) {
            return set_equal(xs, ys);
        }
    }
    a == b
}

/// Membership comparison ignoring order and duplicates.
fn set_equal(xs: &[Value], ys: &[Value]) -> bool {
    let mut a: Vec<String> = xs.iter().map(canonical).collect();
    let mut b: Vec<String> = ys.iter().map(canonical).collect();
    a.sort();
    a.dedup();
    b.sort();
    b.dedup();
    a == b
}

fn canonical(value: &Value) -> String {
    value.to_string()
}

/// Required string attribute, rejecting absent or empty values.
pub fn required_str<'a>(kind: &'static str, attrs: &'a Attributes, key: &str) -> Result<&'a str> {
    attrs
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ReconcileError::Invalid {
            kind,
            message: format!("{} is required", key),
        })
}

/// Optional list-of-strings attribute. `None` when the key is absent,
/// an error when present but not a list of strings.
pub fn string_list(kind: &'static str, attrs: &Attributes, key: &str) -> Result<Option<Vec<String>>> {
    let Some(value) = attrs.get(key) else {
        return Ok(None);
    };
    let Value::Array(items) = value else {
        return Err(ReconcileError::Invalid {
            kind,
            message: format!("{} must be a list of strings", key),
        });
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(s) => out.push(s.to_string()),
            None => {
                return Err(ReconcileError::Invalid {
                    kind,
                    message: format!("{} must be a list of strings", key),
                });
            }
        }
    }
    Ok(Some(out))
}
