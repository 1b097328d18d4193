//! Dynamic value model for structural assertions.

use std::borrow::Cow;

/// A dynamically-typed snapshot of a test value.
///
/// Every value carries the nominal type name it was converted from (used in
/// failure messages and to gate numeric conversion) and a [`Repr`] payload
/// that the equality engine pattern-matches on.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub type_name: Cow<'static, str>,
    pub repr: Repr,
}

/// Tagged-union payload of a [`Value`].
///
/// Nilable kinds (`Seq`, `Map`, `Pointer`, `Chan`) use `None` as the nil
/// sentinel, distinct from an empty-but-present payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Repr {
    /// The untyped absence value.
    Nil,
    Bool(bool),
    /// Signed integers of any width, widened losslessly.
    Int(i128),
    /// Unsigned integers of any width, widened losslessly.
    Uint(u128),
    /// Floating point of any width, widened losslessly.
    Float(f64),
    Text(String),
    /// Sequence kind; `None` is the nil sequence, `Some(vec![])` is empty.
    Seq(Option<Vec<Value>>),
    /// Mapping kind as key/value pairs; entry order is not significant.
    Map(Option<Vec<(Value, Value)>>),
    /// Product kind: named fields in declaration order.
    Record(Vec<(Cow<'static, str>, Value)>),
    /// Pointer kind; `None` is the nil pointer.
    Pointer(Option<Box<Value>>),
    /// Channel kind: buffered element count, or `None` for a nil channel.
    Chan(Option<usize>),
}

/// Coarse runtime category of a value, independent of its nominal type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Nil,
    Bool,
    Int,
    Uint,
    Float,
    Text,
    Seq,
    Map,
    Record,
    Pointer,
    Chan,
}

impl Value {
    /// Construct a value from a type name and payload.
    pub fn new(type_name: impl Into<Cow<'static, str>>, repr: Repr) -> Self {
        Self {
            type_name: type_name.into(),
            repr,
        }
    }

    /// The untyped absence value.
    pub fn nil() -> Self {
        Self::new("<nil>", Repr::Nil)
    }

    /// A product value with named fields.
    ///
    /// Types with non-public fields opt in to structural comparison by
    /// building a record from inside their defining module (typically in a
    /// [`ToValue`](crate::ToValue) impl).
    pub fn record(
        type_name: impl Into<Cow<'static, str>>,
        fields: Vec<(Cow<'static, str>, Value)>,
    ) -> Self {
        Self::new(type_name, Repr::Record(fields))
    }

    /// A sequence value; pass `None` for the nil sequence.
    pub fn seq(type_name: impl Into<Cow<'static, str>>, elems: Option<Vec<Value>>) -> Self {
        Self::new(type_name, Repr::Seq(elems))
    }

    /// A mapping value; pass `None` for the nil mapping.
    pub fn map(
        type_name: impl Into<Cow<'static, str>>,
        entries: Option<Vec<(Value, Value)>>,
    ) -> Self {
        Self::new(type_name, Repr::Map(entries))
    }

    /// A channel value with the given buffered length, or `None` for nil.
    pub fn channel(type_name: impl Into<Cow<'static, str>>, len: Option<usize>) -> Self {
        Self::new(type_name, Repr::Chan(len))
    }

    /// A pointer value; pass `None` for the nil pointer.
    pub fn pointer(type_name: impl Into<Cow<'static, str>>, target: Option<Value>) -> Self {
        Self::new(type_name, Repr::Pointer(target.map(Box::new)))
    }

    /// The coarse kind of this value.
    pub fn kind(&self) -> Kind {
        match self.repr {
            Repr::Nil => Kind::Nil,
            Repr::Bool(_) => Kind::Bool,
            Repr::Int(_) => Kind::Int,
            Repr::Uint(_) => Kind::Uint,
            Repr::Float(_) => Kind::Float,
            Repr::Text(_) => Kind::Text,
            Repr::Seq(_) => Kind::Seq,
            Repr::Map(_) => Kind::Map,
            Repr::Record(_) => Kind::Record,
            Repr::Pointer(_) => Kind::Pointer,
            Repr::Chan(_) => Kind::Chan,
        }
    }

    /// True when this value's payload is numeric (integer or float).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.repr,
            Repr::Int(_) | Repr::Uint(_) | Repr::Float(_)
        )
    }
}
