//! Equality engine: pure judgments over dynamic values.
//!
//! All functions here are side-effect free. Values form owned trees, so
//! recursion terminates on every input; cyclic structures cannot be
//! represented by the value model in the first place.

use crate::render;
use crate::value::{Repr, Value};

/// Relaxed structural equality.
///
/// Values of identical type compare field-wise/element-wise. Values of
/// *different* numeric type names compare equal when they represent the same
/// magnitude under a lossless conversion; values sharing a type name never
/// take the conversion path. Aggregates compare structurally regardless of
/// their nominal container names.
pub fn equal(x: &Value, y: &Value) -> bool {
    if x.is_numeric() && y.is_numeric() {
        return numeric_equal(x, y);
    }

    match (&x.repr, &y.repr) {
        (Repr::Nil, Repr::Nil) => true,
        (Repr::Bool(a), Repr::Bool(b)) => a == b,
        (Repr::Text(a), Repr::Text(b)) => a == b,
        (Repr::Seq(a), Repr::Seq(b)) => match (a, b) {
            (None, None) => true,
            (Some(xs), Some(ys)) => {
                xs.len() == ys.len() && xs.iter().zip(ys).all(|(e, f)| equal(e, f))
            }
            _ => false,
        },
        (Repr::Map(a), Repr::Map(b)) => match (a, b) {
            (None, None) => true,
            (Some(xs), Some(ys)) => map_equal(xs, ys),
            _ => false,
        },
        (Repr::Record(a), Repr::Record(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|((n1, v1), (n2, v2))| n1 == n2 && equal(v1, v2))
        }
        (Repr::Pointer(a), Repr::Pointer(b)) => match (a, b) {
            (None, None) => true,
            (Some(p), Some(q)) => equal(p, q),
            _ => false,
        },
        // Channel identity is not observable through the value model; only
        // two nil channels compare equal.
        (Repr::Chan(a), Repr::Chan(b)) => a.is_none() && b.is_none(),
        _ => false,
    }
}

fn numeric_equal(x: &Value, y: &Value) -> bool {
    // No self-conversion shortcut: an identical type name means exact
    // representation equality only.
    if x.type_name == y.type_name {
        return x.repr == y.repr;
    }

    match (&x.repr, &y.repr) {
        (Repr::Int(a), Repr::Int(b)) => a == b,
        (Repr::Uint(a), Repr::Uint(b)) => a == b,
        (Repr::Int(a), Repr::Uint(b)) | (Repr::Uint(b), Repr::Int(a)) => {
            u128::try_from(*a).is_ok_and(|ua| ua == *b)
        }
        (Repr::Float(a), Repr::Float(b)) => a == b,
        (Repr::Int(i), Repr::Float(f)) | (Repr::Float(f), Repr::Int(i)) => {
            int_float_equal(*i, *f)
        }
        (Repr::Uint(u), Repr::Float(f)) | (Repr::Float(f), Repr::Uint(u)) => {
            uint_float_equal(*u, *f)
        }
        _ => false,
    }
}

// Equal magnitude only when the conversion round-trips exactly in both
// directions. Floats at or beyond the integer type's upper bound are
// rejected first: `MAX as f64` rounds up to the power of two just past the
// type's range, and a saturating cast back down would otherwise let that
// out-of-range float pass both round-trip checks.
fn int_float_equal(i: i128, f: f64) -> bool {
    f.is_finite() && f < i128::MAX as f64 && f as i128 == i && i as f64 == f
}

fn uint_float_equal(u: u128, f: f64) -> bool {
    f.is_finite() && f < u128::MAX as f64 && f as u128 == u && u as f64 == f
}

// Order-independent, bijective entry matching: every entry pairs off with a
// distinct counterpart, so hand-built payloads with duplicate keys still
// compare correctly.
fn map_equal(xs: &[(Value, Value)], ys: &[(Value, Value)]) -> bool {
    if xs.len() != ys.len() {
        return false;
    }
    let mut matched = vec![false; ys.len()];
    'entries: for (k, v) in xs {
        for (i, (k2, v2)) in ys.iter().enumerate() {
            if !matched[i] && equal(k, k2) && equal(v, v2) {
                matched[i] = true;
                continue 'entries;
            }
        }
        return false;
    }
    true
}

/// True for the untyped absence value and for the nil sentinel of the
/// nilable kind family (pointer, sequence, mapping, channel).
///
/// A zero-length but non-nil sequence is not nil.
pub fn is_nil(value: &Value) -> bool {
    matches!(
        value.repr,
        Repr::Nil | Repr::Pointer(None) | Repr::Seq(None) | Repr::Map(None) | Repr::Chan(None)
    )
}

/// True when a value is the zero of its type under relaxed rules.
///
/// Absence and nil sentinels are zero. A non-nil pointer is zero when its
/// pointee structurally equals a freshly zero-initialized instance. Top-level
/// sequences and mappings are zero when their length is zero. Everything else
/// must structurally equal its type's zero value.
pub fn is_zero(value: &Value) -> bool {
    if is_nil(value) {
        return true;
    }

    match &value.repr {
        Repr::Pointer(Some(target)) => equals_zero_value(target),
        Repr::Seq(Some(elems)) => elems.is_empty(),
        Repr::Map(Some(entries)) => entries.is_empty(),
        _ => equals_zero_value(value),
    }
}

// Strict equality against the zero instance: nested nilable kinds must be
// nil, not merely empty, matching what zero-initialization produces.
fn equals_zero_value(value: &Value) -> bool {
    match &value.repr {
        Repr::Nil => true,
        Repr::Bool(b) => !b,
        Repr::Int(i) => *i == 0,
        Repr::Uint(u) => *u == 0,
        Repr::Float(f) => *f == 0.0,
        Repr::Text(t) => t.is_empty(),
        Repr::Seq(elems) => elems.is_none(),
        Repr::Map(entries) => entries.is_none(),
        Repr::Pointer(target) => target.is_none(),
        Repr::Chan(len) => len.is_none(),
        Repr::Record(fields) => fields.iter().all(|(_, v)| equals_zero_value(v)),
    }
}

/// Element count for sequence, mapping and channel kinds.
///
/// Nil sentinels of those kinds have length zero. Every other kind,
/// including the absence value, has no length.
pub fn get_len(value: &Value) -> Option<usize> {
    match &value.repr {
        Repr::Seq(elems) => Some(elems.as_ref().map_or(0, Vec::len)),
        Repr::Map(entries) => Some(entries.as_ref().map_or(0, Vec::len)),
        Repr::Chan(len) => Some(len.unwrap_or(0)),
        _ => None,
    }
}

/// Minimal human-readable structural diff between two values.
///
/// Both values are pretty-rendered and the renderings are diffed line by
/// line. Empty when the renderings are identical, even when [`equal`]
/// distinguishes the values by type label alone.
pub fn diff(x: &Value, y: &Value) -> String {
    let old = render::pretty(x);
    let new = render::pretty(y);
    if old == new {
        return String::new();
    }
    render::unified_diff(&old, &new)
}
