// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! [`ToValue`] and [`FromValue`] implementations for field types.

use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash}
};

use super::{Value, ValueError};

/// Encode a field into its stored representation.
///
/// Encoding borrows the field and never mutates it.
pub trait ToValue {
    /// Produce the stored value.
    fn to_value(&self) -> Value;
}

/// Decode a stored value into a field type.
///
/// Implementations widen or narrow numbers to the exact field type and
/// convert stored arrays into collections.
pub trait FromValue: Sized {
    /// Convert the stored value, failing on kind mismatch or overflow.
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(ValueError::mismatch("boolean", &other))
        }
    }
}

/// Widen any stored number into `i128` for range-checked narrowing.
fn integer(value: Value) -> Result<i128, ValueError> {
    match value {
        Value::Int(v) => Ok(i128::from(v)),
        Value::UInt(v) => Ok(i128::from(v)),
        Value::Float(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i128),
        other => Err(ValueError::mismatch("integer", &other))
    }
}

macro_rules! integers {
    ($variant:ident, $wide:ty: $($ty:ty),*) => {$(
        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::$variant(*self as $wide)
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, ValueError> {
                let wide = integer(value)?;
                <$ty>::try_from(wide).map_err(|_| ValueError::OutOfRange {
                    value:  wide.to_string(),
                    target: stringify!($ty)
                })
            }
        }
    )*};
}

integers!(Int, i64: i8, i16, i32, i64, isize);
integers!(UInt, u64: u8, u16, u32, u64, usize);

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        value
            .as_f64()
            .ok_or_else(|| ValueError::mismatch("float", &value))
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        f64::from_value(value).map(|v| v as f32)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Str(s) => Ok(s),
            Value::Bin(bytes) => String::from_utf8(bytes)
                .map_err(|_| ValueError::Mismatch {
                    expected: "string",
                    found:    "binary"
                }),
            other => Err(ValueError::mismatch("string", &other))
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Nil
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Nil => Ok(None),
            other => T::from_value(other).map(Some)
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| T::from_value(item).map_err(|e| e.at(i)))
                .collect(),
            Value::Bin(bytes) => bytes
                .into_iter()
                .enumerate()
                .map(|(i, byte)| T::from_value(Value::UInt(u64::from(byte))).map_err(|e| e.at(i)))
                .collect(),
            other => Err(ValueError::mismatch("array", &other))
        }
    }
}

fn map_entries<K, V>(value: Value) -> Result<Vec<(K, V)>, ValueError>
where
    K: FromValue,
    V: FromValue
{
    match value {
        Value::Map(entries) => entries
            .into_iter()
            .enumerate()
            .map(|(i, (key, value))| {
                let key = K::from_value(key).map_err(|e| e.at(i))?;
                let value = V::from_value(value).map_err(|e| e.at(i))?;
                Ok((key, value))
            })
            .collect(),
        other => Err(ValueError::mismatch("map", &other))
    }
}

impl<K: ToValue, V: ToValue, S> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect()
        )
    }
}

impl<K, V, S> FromValue for HashMap<K, V, S>
where
    K: FromValue + Eq + Hash,
    V: FromValue,
    S: BuildHasher + Default
{
    fn from_value(value: Value) -> Result<Self, ValueError> {
        map_entries(value).map(|entries| entries.into_iter().collect())
    }
}

impl<K: ToValue, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect()
        )
    }
}

impl<K: FromValue + Ord, V: FromValue> FromValue for BTreeMap<K, V> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        map_entries(value).map(|entries| entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrows_store_integers() {
        assert_eq!(i8::from_value(Value::UInt(12)), Ok(12));
        assert_eq!(u16::from_value(Value::Int(300)), Ok(300));
        assert_eq!(i64::from_value(Value::Float(4.0)), Ok(4));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            u8::from_value(Value::Int(-1)),
            Err(ValueError::OutOfRange {
                value:  "-1".into(),
                target: "u8"
            })
        );
        assert!(i32::from_value(Value::UInt(u64::MAX)).is_err());
    }

    #[test]
    fn rejects_fractional_float_for_integer() {
        assert_eq!(
            i32::from_value(Value::Float(1.5)),
            Err(ValueError::Mismatch {
                expected: "integer",
                found:    "float"
            })
        );
    }

    #[test]
    fn widens_integers_into_floats() {
        assert_eq!(f64::from_value(Value::Int(-3)), Ok(-3.0));
        assert_eq!(f32::from_value(Value::Float(6.0)), Ok(6.0));
    }

    #[test]
    fn unsigned_encodes_as_uint() {
        assert_eq!(5u8.to_value(), Value::UInt(5));
        assert_eq!((-5i16).to_value(), Value::Int(-5));
    }

    #[test]
    fn option_maps_nil() {
        assert_eq!(Option::<String>::from_value(Value::Nil), Ok(None));
        assert_eq!(Some(3i32).to_value(), Value::Int(3));
        assert_eq!(None::<i32>.to_value(), Value::Nil);
    }

    #[test]
    fn nil_into_required_field_fails() {
        assert_eq!(
            String::from_value(Value::Nil),
            Err(ValueError::Mismatch {
                expected: "string",
                found:    "nil"
            })
        );
    }

    #[test]
    fn vec_from_array_and_binary() {
        let arr = Value::Array(vec![Value::UInt(1), Value::Int(2), Value::Float(3.0)]);
        assert_eq!(Vec::<i64>::from_value(arr), Ok(vec![1, 2, 3]));
        assert_eq!(Vec::<u8>::from_value(Value::Bin(vec![9, 8])), Ok(vec![9, 8]));
    }

    #[test]
    fn vec_reports_failing_element() {
        let arr = Value::Array(vec![Value::Int(1), Value::Str("x".into())]);
        let err = Vec::<i64>::from_value(arr).unwrap_err();
        assert_eq!(err.to_string(), "element 1: expected integer, found string");
    }

    #[test]
    fn maps_convert_both_ways() {
        let mut map = BTreeMap::new();
        map.insert("key".to_string(), 1u32);
        let stored = map.to_value();
        assert_eq!(
            stored,
            Value::Map(vec![(Value::Str("key".into()), Value::UInt(1))])
        );
        assert_eq!(BTreeMap::<String, u32>::from_value(stored.clone()), Ok(map));

        let hashed: HashMap<String, u32> = HashMap::from_value(stored).unwrap();
        assert_eq!(hashed.get("key"), Some(&1));
    }

    #[test]
    fn string_from_utf8_binary() {
        assert_eq!(String::from_value(Value::Bin(b"ok".to_vec())), Ok("ok".into()));
    }

    #[test]
    fn borrowed_str_encodes() {
        let s: &str = "abc";
        assert_eq!(s.to_value(), Value::Str("abc".into()));
    }
}
