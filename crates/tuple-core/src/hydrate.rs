// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Turning store rows back into entities.
//!
//! | Function | Rows | Result |
//! |----------|------|--------|
//! | [`one`] | 0 | `None` |
//! | [`one`] | 1 | `Some(entity)` |
//! | [`one`] | 2+ | `None`, logged at `warn` |
//! | [`many`] | n | `n` entities in store order |

use tracing::warn;

use crate::{codec::Tuple, error::DecodeError, value::Row};

/// Hydrate a point operation result.
///
/// # Errors
///
/// Returns [`DecodeError`] if the single row does not decode.
pub fn one<T: Tuple>(rows: Vec<Row>) -> Result<Option<T>, DecodeError> {
    let count = rows.len();
    let mut rows = rows.into_iter();
    match (rows.next(), count) {
        (Some(row), 1) => T::from_tuple(row).map(Some),
        (None, _) => Ok(None),
        (Some(_), _) => {
            warn!(
                entity = T::definition().name,
                rows = count,
                "point operation returned more than one row"
            );
            Ok(None)
        }
    }
}

/// Hydrate every row.
///
/// # Errors
///
/// Returns the first [`DecodeError`].
pub fn many<T: Tuple>(rows: Vec<Row>) -> Result<Vec<T>, DecodeError> {
    rows.into_iter().map(T::from_tuple).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fixture::Account, value::Value};

    #[test]
    fn no_rows_is_none() {
        assert_eq!(one::<Account>(vec![]), Ok(None));
    }

    #[test]
    fn single_row_decodes() {
        let account = Account::new(1, "a@example.com", 10);
        assert_eq!(one::<Account>(vec![account.to_tuple()]), Ok(Some(account)));
    }

    #[test]
    fn several_rows_are_not_an_entity() {
        let rows = vec![
            Account::new(1, "a@example.com", 10).to_tuple(),
            Account::new(2, "b@example.com", 20).to_tuple(),
        ];
        assert_eq!(one::<Account>(rows), Ok(None));
    }

    #[test]
    fn many_keeps_store_order() {
        let rows = vec![
            Account::new(2, "b@example.com", 20).to_tuple(),
            Account::new(1, "a@example.com", 10).to_tuple(),
        ];
        let ids: Vec<_> = many::<Account>(rows).unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn decode_failure_names_field() {
        let row = vec![Value::UInt(1), Value::Int(5)];
        let err = one::<Account>(vec![row]).unwrap_err();
        assert_eq!(err.field, "email");
        assert_eq!(err.position, 1);
    }
}
