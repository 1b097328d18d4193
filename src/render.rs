//! Value rendering for failure messages and structural diffs.
//!
//! Values are rendered as JSON-style text: type labels, nil-vs-empty
//! distinctions and signedness disappear on purpose, because the diff is a
//! visual aid rather than an authoritative comparison. Two values the engine
//! distinguishes only by type label render identically and therefore diff to
//! the empty string.

use crate::value::{Repr, Value};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use similar::{ChangeTag, TextDiff};
use std::fmt;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.repr {
            Repr::Nil => serializer.serialize_unit(),
            Repr::Bool(b) => serializer.serialize_bool(*b),
            Repr::Int(i) => match i64::try_from(*i) {
                Ok(n) => serializer.serialize_i64(n),
                Err(_) => serializer.serialize_str(&i.to_string()),
            },
            Repr::Uint(u) => match u64::try_from(*u) {
                Ok(n) => serializer.serialize_u64(n),
                Err(_) => serializer.serialize_str(&u.to_string()),
            },
            Repr::Float(x) => serializer.serialize_f64(*x),
            Repr::Text(t) => serializer.serialize_str(t),
            Repr::Seq(None) | Repr::Map(None) | Repr::Pointer(None) | Repr::Chan(None) => {
                serializer.serialize_unit()
            }
            Repr::Seq(Some(elems)) => {
                let mut seq = serializer.serialize_seq(Some(elems.len()))?;
                for elem in elems {
                    seq.serialize_element(elem)?;
                }
                seq.end()
            }
            Repr::Map(Some(entries)) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(&key_string(k), v)?;
                }
                map.end()
            }
            Repr::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, v) in fields {
                    map.serialize_entry(name.as_ref(), v)?;
                }
                map.end()
            }
            // Follow the pointer; identity is not part of the rendering.
            Repr::Pointer(Some(target)) => target.serialize(serializer),
            Repr::Chan(Some(len)) => serializer.serialize_str(&format!("chan(len={len})")),
        }
    }
}

fn key_string(key: &Value) -> String {
    match &key.repr {
        Repr::Text(t) => t.clone(),
        _ => compact(key),
    }
}

/// Single-line rendering, used for the value portion of failure messages.
pub fn compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unprintable>".to_string())
}

/// Multi-line rendering, used as diff input.
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "<unprintable>".to_string())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compact(self))
    }
}

/// Line-based unified diff between two renderings.
///
/// Empty when the inputs are identical. Values are small, so every line is
/// kept as context rather than eliding unchanged runs.
pub fn unified_diff(old: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    if diff.iter_all_changes().all(|c| c.tag() == ChangeTag::Equal) {
        return String::new();
    }

    let mut out = String::new();
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "- ",
            ChangeTag::Insert => "+ ",
            ChangeTag::Equal => "  ",
        };
        out.push_str(sign);
        out.push_str(change.value().trim_end_matches('\n'));
        out.push('\n');
    }
    out
}
