// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Raw values stored in tuples.
//!
//! The backing store knows nothing about field names or Rust types: a record
//! is a flat [`Row`] of [`Value`]s addressed by position. This module defines
//! that value model and the two conversion traits ([`ToValue`],
//! [`FromValue`]) that connect it to entity field types.
//!
//! # Conversions
//!
//! | Rust type | Encodes to | Decodes from |
//! |-----------|------------|--------------|
//! | `bool` | `Bool` | `Bool` |
//! | `i8`..`i64`, `isize` | `Int` | `Int`, `UInt`, integral `Float` (range checked) |
//! | `u8`..`u64`, `usize` | `UInt` | `Int`, `UInt`, integral `Float` (range checked) |
//! | `f32`, `f64` | `Float` | `Float`, `Int`, `UInt` |
//! | `String` | `Str` | `Str`, UTF-8 `Bin` |
//! | `Option<T>` | `T` or `Nil` | `Nil` → `None`, else `T` |
//! | `Vec<T>` | `Array` | `Array`, `Bin` |
//! | `HashMap<K, V>`, `BTreeMap<K, V>` | `Map` | `Map` |
//! | `Value` | itself | itself |

mod convert;

use std::fmt;

pub use convert::{FromValue, ToValue};

/// A tuple as stored: values addressed by position only.
pub type Row = Vec<Value>;

/// A single positional value of a stored tuple.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Nil,

    /// Boolean.
    Bool(bool),

    /// Signed integer.
    Int(i64),

    /// Unsigned integer.
    UInt(u64),

    /// Floating point number.
    Float(f64),

    /// UTF-8 string.
    Str(String),

    /// Opaque bytes.
    Bin(Vec<u8>),

    /// Nested array.
    Array(Vec<Value>),

    /// Key/value pairs in store order.
    Map(Vec<(Value, Value)>)
}

impl Value {
    /// Human readable name of the value kind, used in diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::UInt(_) => "unsigned",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Bin(_) => "binary",
            Self::Array(_) => "array",
            Self::Map(_) => "map"
        }
    }

    /// Check if this is [`Value::Nil`].
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Integer view covering both signed and unsigned storage.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(i128::from(*v)),
            Self::UInt(v) => Some(i128::from(*v)),
            _ => None
        }
    }

    /// Numeric view of any number kind.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::UInt(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None
        }
    }

    /// String view.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
            Self::Bin(v) => write!(f, "<{} bytes>", v.len()),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

/// Failure to convert a [`Value`] into a Rust type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The value kind cannot represent the target type.
    #[error("expected {expected}, found {found}")]
    Mismatch {
        /// Kind the target type accepts.
        expected: &'static str,
        /// Kind that was stored.
        found:    &'static str
    },

    /// Numeric value outside the target type's range.
    #[error("value {value} does not fit into {target}")]
    OutOfRange {
        /// Stored value, rendered.
        value:  String,
        /// Target Rust type.
        target: &'static str
    },

    /// A nested element failed to convert.
    #[error("element {index}: {source}")]
    Element {
        /// Position of the element in its collection.
        index:  usize,
        /// Underlying failure.
        #[source]
        source: Box<ValueError>
    }
}

impl ValueError {
    /// Kind mismatch against the stored value.
    pub fn mismatch(expected: &'static str, found: &Value) -> Self {
        Self::Mismatch {
            expected,
            found: found.kind()
        }
    }

    /// Wrap the error with the position of the element that caused it.
    #[must_use]
    pub fn at(self, index: usize) -> Self {
        Self::Element {
            index,
            source: Box::new(self)
        }
    }
}
