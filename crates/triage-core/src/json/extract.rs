//! Total extraction of typed values from JSON nodes.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

/// Sentinel stored in integer fields whose node was missing or mistyped.
///
/// It can collide with a genuine `-1` sent by the service; check the owning
/// record's `is_empty` flag when the distinction matters.
pub const MISSING_NUMBER: i64 = -1;

/// A type that can always be produced from a JSON node.
///
/// Extraction is total: an absent node yields [`FromJson::absent`], a node
/// of the wrong shape yields the same default, and nothing ever fails.
pub trait FromJson: Sized {
    /// The value used when the node is absent or null.
    fn absent() -> Self;

    /// Convert a present, non-null node.
    fn from_json(value: &Value) -> Self;

    /// Convert an optional node, routing absence and `null` through
    /// [`FromJson::absent`].
    fn extract(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::absent(),
            Some(value) => Self::from_json(value),
        }
    }
}

impl FromJson for String {
    fn absent() -> Self {
        String::new()
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        }
    }
}

impl FromJson for i64 {
    fn absent() -> Self {
        MISSING_NUMBER
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(truncate))
                .unwrap_or(MISSING_NUMBER),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(truncate))
                    .unwrap_or(MISSING_NUMBER)
            }
            _ => MISSING_NUMBER,
        }
    }
}

// Integral part of a float, if it fits.
fn truncate(f: f64) -> Option<i64> {
    let t = f.trunc();
    if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

impl FromJson for bool {
    fn absent() -> Self {
        false
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Bool(b) => *b,
            Value::String(s) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn absent() -> Self {
        Vec::new()
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => items.iter().map(|item| T::extract(Some(item))).collect(),
            _ => Vec::new(),
        }
    }
}

impl<T: FromJson + Ord> FromJson for BTreeSet<T> {
    fn absent() -> Self {
        BTreeSet::new()
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => items.iter().map(|item| T::extract(Some(item))).collect(),
            _ => BTreeSet::new(),
        }
    }
}

/// Objects keyed by an identifier, e.g. the overview's task map.
impl<T: FromJson> FromJson for BTreeMap<String, T> {
    fn absent() -> Self {
        BTreeMap::new()
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => map
                .iter()
                .map(|(key, item)| (key.clone(), T::extract(Some(item))))
                .collect(),
            _ => BTreeMap::new(),
        }
    }
}
