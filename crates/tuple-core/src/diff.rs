// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Update operations and the diff builder.
//!
//! An update is a list of [`UpdateOp`]s, each applying an [`Operator`] to
//! one tuple position. [`build_diff`] produces the list that turns the
//! stored tuple into the entity's current state without touching the
//! primary key.

use std::fmt;

use crate::{codec::Tuple, error::SchemaError, value::Value};

/// Update operator understood by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+` numeric addition.
    Add,
    /// `-` numeric subtraction.
    Sub,
    /// `&` bitwise and.
    And,
    /// `|` bitwise or.
    Or,
    /// `^` bitwise xor.
    Xor,
    /// `:` string splice.
    Splice,
    /// `!` insert a field before the position.
    Insert,
    /// `#` delete fields starting at the position.
    Delete,
    /// `=` assign the value.
    Assign
}

impl Operator {
    /// Operator symbol as sent to the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::And => "&",
            Self::Or => "|",
            Self::Xor => "^",
            Self::Splice => ":",
            Self::Insert => "!",
            Self::Delete => "#",
            Self::Assign => "="
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One update operation on a tuple position.
///
/// Positions are 0-based, matching
/// [`FieldDescriptor::position`](crate::schema::FieldDescriptor::position).
/// For [`Operator::Splice`] the value is `[offset, length, replacement]`;
/// for [`Operator::Delete`] it is the number of fields to remove.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOp {
    /// Operator to apply.
    pub operator: Operator,
    /// Target tuple position.
    pub position: usize,
    /// Operand.
    pub value:    Value
}

impl UpdateOp {
    /// Create an operation.
    pub fn new(operator: Operator, position: usize, value: impl Into<Value>) -> Self {
        Self {
            operator,
            position,
            value: value.into()
        }
    }

    /// `=` at `position`.
    pub fn assign(position: usize, value: impl Into<Value>) -> Self {
        Self::new(Operator::Assign, position, value)
    }
}

/// Build the assignment diff for an entity.
///
/// Every field outside the primary index yields one [`Operator::Assign`],
/// in position order. The result is empty when all fields belong to the
/// primary index.
///
/// # Errors
///
/// Returns [`SchemaError`] if the entity schema is invalid.
pub fn build_diff<T: Tuple>(entity: &T) -> Result<Vec<UpdateOp>, SchemaError> {
    Ok(T::schema()?.build_diff(&entity.to_tuple()))
}
