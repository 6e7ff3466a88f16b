// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity ⇄ tuple codec.
//!
//! [`Tuple`] is the trait `#[derive(Tuple)]` implements. It ties a struct to
//! its static [`TupleDefinition`], caches the validated [`EntitySchema`] and
//! converts instances to and from positional rows.
//!
//! # Manual implementation
//!
//! ```rust
//! use tuple_core::{
//!     codec::{SchemaCell, Tuple, TupleReader},
//!     error::{DecodeError, SchemaError},
//!     schema::{
//!         EntitySchema, FieldDefinition, IndexDefinition, IndexKind, IndexMembership,
//!         TupleDefinition
//!     },
//!     value::{Row, ToValue}
//! };
//!
//! struct Counter {
//!     id:    u64,
//!     count: i64
//! }
//!
//! static COUNTER: TupleDefinition = TupleDefinition {
//!     name:    "Counter",
//!     space:   "counters",
//!     fields:  &[
//!         FieldDefinition {
//!             name:     "id",
//!             ty:       "u64",
//!             position: 1,
//!             indexes:  &[IndexMembership {
//!                 index:    "primary",
//!                 part:     1,
//!                 nullable: false
//!             }]
//!         },
//!         FieldDefinition {
//!             name:     "count",
//!             ty:       "i64",
//!             position: 2,
//!             indexes:  &[]
//!         }
//!     ],
//!     indexes: &[IndexDefinition {
//!         name:    "primary",
//!         primary: true,
//!         unique:  None,
//!         kind:    IndexKind::Tree
//!     }]
//! };
//!
//! impl Tuple for Counter {
//!     fn definition() -> &'static TupleDefinition {
//!         &COUNTER
//!     }
//!
//!     fn schema() -> Result<&'static EntitySchema, SchemaError> {
//!         static SCHEMA: SchemaCell = SchemaCell::new();
//!         SCHEMA.get_or_extract(&COUNTER)
//!     }
//!
//!     fn to_tuple(&self) -> Row {
//!         vec![self.id.to_value(), self.count.to_value()]
//!     }
//!
//!     fn from_tuple(row: Row) -> Result<Self, DecodeError> {
//!         let mut reader = TupleReader::new("Counter", row);
//!         Ok(Self {
//!             id:    reader.field("id")?,
//!             count: reader.field("count")?
//!         })
//!     }
//! }
//!
//! let row = Counter { id: 1, count: -4 }.to_tuple();
//! let back = Counter::from_tuple(row).unwrap();
//! assert_eq!((back.id, back.count), (1, -4));
//! ```

use std::sync::OnceLock;

use crate::{
    error::{DecodeError, SchemaError},
    schema::{EntitySchema, TupleDefinition},
    value::{FromValue, Row, Value}
};

/// A struct mapped onto positional tuples.
///
/// `to_tuple` and `from_tuple` must agree with the field order of
/// [`Tuple::schema`], so that `from_tuple(to_tuple(e))` reproduces every
/// mapped field of `e`.
pub trait Tuple: Sized {
    /// Static metadata as declared.
    fn definition() -> &'static TupleDefinition;

    /// Validated schema, extracted once per type.
    ///
    /// # Errors
    ///
    /// Returns the extraction failure, on every call.
    fn schema() -> Result<&'static EntitySchema, SchemaError>;

    /// Encode mapped fields in position order.
    fn to_tuple(&self) -> Row;

    /// Decode a row, pairing values with fields by position.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] naming the first field that fails to convert.
    fn from_tuple(row: Row) -> Result<Self, DecodeError>;
}

/// Per-type cache of the extraction result.
///
/// Meant to live in a `static`; the first call extracts, later calls read.
#[derive(Debug, Default)]
pub struct SchemaCell(OnceLock<Result<EntitySchema, SchemaError>>);

impl SchemaCell {
    /// Empty cell.
    #[must_use]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Extract on first use and return the cached outcome.
    ///
    /// # Errors
    ///
    /// Returns a copy of the cached [`SchemaError`].
    pub fn get_or_extract(
        &'static self,
        definition: &TupleDefinition
    ) -> Result<&'static EntitySchema, SchemaError> {
        self.0
            .get_or_init(|| EntitySchema::extract(definition))
            .as_ref()
            .map_err(Clone::clone)
    }
}

/// Sequential decoder over a row.
///
/// Each [`field`](Self::field) call consumes the next position. Positions
/// past the end of the row read as [`Value::Nil`]; values left over after
/// the last field are ignored.
#[derive(Debug)]
pub struct TupleReader {
    entity:   &'static str,
    values:   std::vec::IntoIter<Value>,
    position: usize
}

impl TupleReader {
    /// Start reading `row` for `entity`.
    pub fn new(entity: &'static str, row: Row) -> Self {
        Self {
            entity,
            values: row.into_iter(),
            position: 0
        }
    }

    /// Decode the value at the current position into `field`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] carrying the field name and position.
    pub fn field<V: FromValue>(&mut self, field: &'static str) -> Result<V, DecodeError> {
        let position = self.position;
        self.position += 1;
        let value = self.values.next().unwrap_or_default();
        V::from_value(value).map_err(|source| DecodeError {
            entity: self.entity,
            field,
            position,
            source
        })
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}
