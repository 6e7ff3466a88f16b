// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Index key extraction from entity instances.

use crate::{
    codec::Tuple,
    error::{KeyError, SchemaError},
    value::Value
};

/// Values of `entity` that form the key of `index`, in part order.
///
/// # Errors
///
/// - [`KeyError::Schema`] if the entity schema is invalid
/// - [`KeyError::UnknownIndex`] if `index` is not declared
pub fn extract_key<T: Tuple>(entity: &T, index: &str) -> Result<Vec<Value>, KeyError> {
    let schema = T::schema()?;
    Ok(schema.extract_key(&entity.to_tuple(), index)?)
}

/// Primary key of `entity`.
///
/// # Errors
///
/// Returns [`SchemaError`] if the entity schema is invalid.
pub fn primary_key<T: Tuple>(entity: &T) -> Result<Vec<Value>, SchemaError> {
    Ok(T::schema()?.primary_key(&entity.to_tuple()))
}
