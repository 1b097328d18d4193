//! Conversion of host-language values into the dynamic value model.

use crate::render;
use crate::value::{Repr, Value};
use regex::Regex;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

static TYPE_PATH_RE: OnceLock<Regex> = OnceLock::new();

fn get_type_path_re() -> &'static Regex {
    TYPE_PATH_RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*::").expect("valid regex")
    })
}

/// Short, path-free rendering of a type name for failure messages.
///
/// `std::any::type_name` yields fully-qualified paths such as
/// `alloc::vec::Vec<alloc::string::String>`; the module segments are noise in
/// test output, so they are stripped to `Vec<String>`.
pub fn type_name_of<T: ?Sized>() -> Cow<'static, str> {
    get_type_path_re().replace_all(std::any::type_name::<T>(), "")
}

/// Capability trait converting a value into its dynamic snapshot.
///
/// Primitives, strings, sequences, maps, `Option` and `Box` are covered out
/// of the box. Test-only product types opt in by implementing this trait,
/// which is also the escape hatch for comparing non-public fields: the impl
/// lives in the defining module and may expose whatever it likes as a
/// [`Value::record`].
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

macro_rules! impl_to_value_signed {
    ($($t:ty),* $(,)?) => {$(
        impl ToValue for $t {
            fn to_value(&self) -> Value {
                Value::new(stringify!($t), Repr::Int(*self as i128))
            }
        }
    )*};
}

macro_rules! impl_to_value_unsigned {
    ($($t:ty),* $(,)?) => {$(
        impl ToValue for $t {
            fn to_value(&self) -> Value {
                Value::new(stringify!($t), Repr::Uint(*self as u128))
            }
        }
    )*};
}

impl_to_value_signed!(i8, i16, i32, i64, i128, isize);
impl_to_value_unsigned!(u8, u16, u32, u64, u128, usize);

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::new("f32", Repr::Float(f64::from(*self)))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::new("f64", Repr::Float(*self))
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::new("bool", Repr::Bool(*self))
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::new("str", Repr::Text(self.to_string()))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::new("String", Repr::Text(self.clone()))
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::seq(
            type_name_of::<Self>(),
            Some(self.iter().map(ToValue::to_value).collect()),
        )
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        Value::seq(
            type_name_of::<Self>(),
            Some(self.iter().map(ToValue::to_value).collect()),
        )
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::seq(
            type_name_of::<Self>(),
            Some(self.iter().map(ToValue::to_value).collect()),
        )
    }
}

impl<K: ToValue, V: ToValue, S> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        let mut entries: Vec<(Value, Value)> = self
            .iter()
            .map(|(k, v)| (k.to_value(), v.to_value()))
            .collect();
        // Hash iteration order is arbitrary; sort so diffs are deterministic.
        entries.sort_by_key(|(k, _)| render::compact(k));
        Value::map(type_name_of::<Self>(), Some(entries))
    }
}

impl<K: ToValue, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::map(
            type_name_of::<Self>(),
            Some(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect()),
        )
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        Value::new(
            type_name_of::<Self>(),
            Repr::Pointer(self.as_ref().map(|v| Box::new(v.to_value()))),
        )
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        Value::new(
            type_name_of::<Self>(),
            Repr::Pointer(Some(Box::new((**self).to_value()))),
        )
    }
}
