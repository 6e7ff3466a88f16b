// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory store.
//!
//! [`MemoryStore`] implements both [`Transport`] and [`AsyncTransport`]
//! with the store semantics the mapping layer relies on, so tests and demos
//! run without a server.
//!
//! # Semantics
//!
//! | Call | Behaviour |
//! |------|-----------|
//! | `insert` | rejects a key already present in any unique index |
//! | `replace` | overwrites by primary key, else inserts |
//! | `delete` | removes by primary key, returns the removed tuple |
//! | `update` | applies operators; primary key fields must not change |
//! | `upsert` | inserts the tuple if the key is absent, else updates; returns nothing |
//! | `select` | `Eq`, `Req`, `All`, `Gt`, `Ge`, `Lt`, `Le` with offset and limit |
//! | `count` | same matching as `select`, without offset and limit |
//!
//! Tuples are ordered by index key, then by primary key. Numbers compare by
//! value across signed, unsigned and float storage. The splice operator and
//! bitset/spatial iterators are not implemented.

use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::{PoisonError, RwLock}
};

use async_trait::async_trait;
use tracing::{trace, warn};

use crate::{
    codec::Tuple,
    diff::{Operator, UpdateOp},
    error::SchemaError,
    iterator::IteratorType,
    schema::EntitySchema,
    transport::{AsyncTransport, Transport},
    value::{Row, Value}
};

/// Failure reported by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MemoryError {
    /// The registered type has invalid metadata.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The space exists with other indexes.
    #[error("space `{0}` is already registered with a different layout")]
    LayoutMismatch(String),

    /// The space was never registered.
    #[error("space `{0}` does not exist")]
    NoSuchSpace(String),

    /// The space has no index with this name.
    #[error("space `{space}` has no index `{index}`")]
    NoSuchIndex {
        /// Space name.
        space: String,
        /// Requested index.
        index: String
    },

    /// A unique index already holds the key.
    #[error("duplicate key {key} in unique index `{index}` of space `{space}`")]
    DuplicateKey {
        /// Space name.
        space: String,
        /// Violated index.
        index: String,
        /// Conflicting key, as an array.
        key:   Value
    },

    /// An update changed a primary key field.
    #[error("attempt to modify primary key field {position} in space `{space}`")]
    PrimaryKeyModified {
        /// Space name.
        space:    String,
        /// Field position.
        position: usize
    },

    /// An operator targets a position outside the tuple.
    #[error("field {position} is out of range for a tuple of {len} fields")]
    FieldOutOfRange {
        /// Target position.
        position: usize,
        /// Tuple width.
        len:      usize
    },

    /// The operand or the stored field has the wrong kind.
    #[error("operator `{operator}` cannot be applied to {found}")]
    InvalidOperand {
        /// Operator applied.
        operator: Operator,
        /// Offending kind.
        found:    &'static str
    },

    /// Arithmetic left the integer range.
    #[error("integer overflow applying `{operator}` at field {position}")]
    Overflow {
        /// Operator applied.
        operator: Operator,
        /// Field position.
        position: usize
    },

    /// The operator is not implemented.
    #[error("operator `{0}` is not supported")]
    UnsupportedOperator(Operator),

    /// The iterator is not implemented.
    #[error("iterator {0:?} is not supported")]
    UnsupportedIterator(IteratorType)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoryIndex {
    name:      String,
    unique:    bool,
    positions: Vec<usize>
}

impl MemoryIndex {
    fn key_of(&self, row: &[Value]) -> Row {
        self.positions
            .iter()
            .map(|&p| row.get(p).cloned().unwrap_or_default())
            .collect()
    }
}

#[derive(Debug)]
struct MemorySpace {
    name:    String,
    indexes: Vec<MemoryIndex>,
    primary: usize,
    rows:    Vec<Row>
}

/// Thread-safe in-memory tuple store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    spaces: RwLock<HashMap<String, MemorySpace>>
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the space `T` declares, if it does not exist yet.
    ///
    /// # Errors
    ///
    /// - [`MemoryError::Schema`] if `T`'s metadata is inconsistent
    /// - [`MemoryError::LayoutMismatch`] if the space exists with other indexes
    pub fn register<T: Tuple>(&self) -> Result<(), MemoryError> {
        let schema = T::schema()?;
        self.register_schema(schema.space(), schema)
    }

    /// Create a space named `space` laid out like `T`.
    ///
    /// # Errors
    ///
    /// Same as [`MemoryStore::register`].
    pub fn register_as<T: Tuple>(&self, space: &str) -> Result<(), MemoryError> {
        self.register_schema(space, T::schema()?)
    }

    /// Create a space from an already validated schema.
    ///
    /// Registering an existing space again is a no-op when the indexes
    /// match and keeps the stored tuples.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::LayoutMismatch`] if `space` exists with
    /// different indexes.
    pub fn register_schema(&self, space: &str, schema: &EntitySchema) -> Result<(), MemoryError> {
        let indexes: Vec<_> = schema
            .indexes()
            .iter()
            .map(|index| MemoryIndex {
                name:      index.name().to_owned(),
                unique:    index.is_unique(),
                positions: index.positions().collect()
            })
            .collect();
        let primary = schema
            .indexes()
            .iter()
            .position(|index| index.is_primary())
            .unwrap_or_default();

        let mut spaces = self.spaces.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = spaces.get(space) {
            if existing.indexes != indexes || existing.primary != primary {
                warn!(space, entity = schema.name(), "space already registered with a different layout");
                return Err(MemoryError::LayoutMismatch(space.to_owned()));
            }
            return Ok(());
        }
        spaces.insert(space.to_owned(), MemorySpace {
            name: space.to_owned(),
            indexes,
            primary,
            rows: Vec::new()
        });
        trace!(space, "memory space registered");
        Ok(())
    }

    /// Number of tuples in `space`; zero if it does not exist.
    #[must_use]
    pub fn len(&self, space: &str) -> usize {
        let spaces = self.spaces.read().unwrap_or_else(PoisonError::into_inner);
        spaces.get(space).map_or(0, |s| s.rows.len())
    }

    /// Check if `space` holds no tuples.
    #[must_use]
    pub fn is_empty(&self, space: &str) -> bool {
        self.len(space) == 0
    }

    /// Copy of every tuple in `space`, in primary key order.
    #[must_use]
    pub fn rows(&self, space: &str) -> Vec<Row> {
        let spaces = self.spaces.read().unwrap_or_else(PoisonError::into_inner);
        spaces.get(space).map_or_else(Vec::new, |s| {
            let mut rows = s.rows.clone();
            let primary = &s.indexes[s.primary];
            rows.sort_by(|a, b| compare_keys(&primary.key_of(a), &primary.key_of(b)));
            rows
        })
    }

    fn read<R>(
        &self,
        space: &str,
        f: impl FnOnce(&MemorySpace) -> Result<R, MemoryError>
    ) -> Result<R, MemoryError> {
        let spaces = self.spaces.read().unwrap_or_else(PoisonError::into_inner);
        let target = spaces
            .get(space)
            .ok_or_else(|| MemoryError::NoSuchSpace(space.to_owned()))?;
        f(target)
    }

    fn write<R>(
        &self,
        space: &str,
        operation: &'static str,
        f: impl FnOnce(&mut MemorySpace) -> Result<R, MemoryError>
    ) -> Result<R, MemoryError> {
        let mut spaces = self.spaces.write().unwrap_or_else(PoisonError::into_inner);
        let target = spaces
            .get_mut(space)
            .ok_or_else(|| MemoryError::NoSuchSpace(space.to_owned()))?;
        let result = f(target);
        trace!(space, operation, ok = result.is_ok(), tuples = target.rows.len(), "memory store mutation");
        result
    }
}

impl MemorySpace {
    fn primary(&self) -> &MemoryIndex {
        &self.indexes[self.primary]
    }

    fn find(&self, key: &[Value]) -> Option<usize> {
        let primary = self.primary();
        self.rows
            .iter()
            .position(|row| compare_keys(&primary.key_of(row), key) == Ordering::Equal)
    }

    fn check_unique(&self, tuple: &[Value], skip: Option<usize>) -> Result<(), MemoryError> {
        for index in self.indexes.iter().filter(|i| i.unique) {
            let key = index.key_of(tuple);
            if key.iter().any(Value::is_nil) {
                continue;
            }
            let taken = self.rows.iter().enumerate().any(|(i, row)| {
                Some(i) != skip && compare_keys(&index.key_of(row), &key) == Ordering::Equal
            });
            if taken {
                return Err(MemoryError::DuplicateKey {
                    space: self.name.clone(),
                    index: index.name.clone(),
                    key:   Value::Array(key)
                });
            }
        }
        Ok(())
    }

    fn insert(&mut self, tuple: Row) -> Result<Row, MemoryError> {
        self.check_unique(&tuple, None)?;
        self.rows.push(tuple.clone());
        Ok(tuple)
    }

    fn replace(&mut self, tuple: Row) -> Result<Row, MemoryError> {
        let existing = self.find(&self.primary().key_of(&tuple));
        self.check_unique(&tuple, existing)?;
        match existing {
            Some(at) => self.rows[at] = tuple.clone(),
            None => self.rows.push(tuple.clone())
        }
        Ok(tuple)
    }

    fn delete(&mut self, key: &[Value]) -> Option<Row> {
        self.find(key).map(|at| self.rows.remove(at))
    }

    fn update(&mut self, key: &[Value], ops: &[UpdateOp]) -> Result<Option<Row>, MemoryError> {
        let Some(at) = self.find(key) else {
            return Ok(None);
        };

        let mut row = self.rows[at].clone();
        for op in ops {
            apply(&mut row, op)?;
        }

        let primary = self.primary();
        let before = primary.key_of(&self.rows[at]);
        let after = primary.key_of(&row);
        if let Some(i) = (0..before.len()).find(|&i| compare(&before[i], &after[i]) != Ordering::Equal)
        {
            return Err(MemoryError::PrimaryKeyModified {
                space:    self.name.clone(),
                position: primary.positions[i]
            });
        }

        self.check_unique(&row, Some(at))?;
        self.rows[at] = row.clone();
        Ok(Some(row))
    }

    fn select(
        &self,
        index: &str,
        key: &[Value],
        offset: u32,
        limit: u32,
        iterator: IteratorType
    ) -> Result<Vec<Row>, MemoryError> {
        let index = self
            .indexes
            .iter()
            .find(|i| i.name == index)
            .ok_or_else(|| MemoryError::NoSuchIndex {
                space: self.name.clone(),
                index: index.to_owned()
            })?;
        if !matches!(
            iterator,
            IteratorType::Eq
                | IteratorType::Req
                | IteratorType::All
                | IteratorType::Gt
                | IteratorType::Ge
                | IteratorType::Lt
                | IteratorType::Le
        ) {
            return Err(MemoryError::UnsupportedIterator(iterator));
        }

        let primary = self.primary();
        let mut matched: Vec<(Row, Row, &Row)> = self
            .rows
            .iter()
            .map(|row| (index.key_of(row), primary.key_of(row), row))
            .filter(|(row_key, _, _)| accepts(iterator, row_key, key))
            .collect();
        matched.sort_by(|a, b| compare_keys(&a.0, &b.0).then_with(|| compare_keys(&a.1, &b.1)));
        if iterator.is_reverse() {
            matched.reverse();
        }

        Ok(matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|(_, _, row)| row.clone())
            .collect())
    }

    fn count(&self, index: &str, key: &[Value], iterator: IteratorType) -> Result<u64, MemoryError> {
        let rows = self.select(index, key, 0, u32::MAX, iterator)?;
        Ok(u64::try_from(rows.len()).unwrap_or(u64::MAX))
    }
}

fn accepts(iterator: IteratorType, row_key: &[Value], key: &[Value]) -> bool {
    if iterator == IteratorType::All || key.is_empty() {
        return true;
    }
    let prefix = &row_key[..key.len().min(row_key.len())];
    let ordering = compare_keys(prefix, key);
    match iterator {
        IteratorType::Gt => ordering == Ordering::Greater,
        IteratorType::Ge => ordering != Ordering::Less,
        IteratorType::Lt => ordering == Ordering::Less,
        IteratorType::Le => ordering != Ordering::Greater,
        _ => ordering == Ordering::Equal
    }
}

fn apply(row: &mut Row, op: &UpdateOp) -> Result<(), MemoryError> {
    let len = row.len();
    let position = op.position;
    let out_of_range = || MemoryError::FieldOutOfRange { position, len };

    match op.operator {
        Operator::Assign if position == len => row.push(op.value.clone()),
        Operator::Insert if position <= len => row.insert(position, op.value.clone()),
        Operator::Insert => return Err(out_of_range()),
        Operator::Delete => {
            if position >= len {
                return Err(out_of_range());
            }
            let count = op
                .value
                .as_i128()
                .filter(|&n| n > 0)
                .ok_or(MemoryError::InvalidOperand {
                    operator: Operator::Delete,
                    found:    op.value.kind()
                })?;
            let end = usize::try_from(count).map_or(len, |n| position.saturating_add(n).min(len));
            row.drain(position..end);
        }
        Operator::Splice => return Err(MemoryError::UnsupportedOperator(Operator::Splice)),
        operator => {
            let field = row.get_mut(position).ok_or_else(out_of_range)?;
            *field = match operator {
                Operator::Add | Operator::Sub => arithmetic(operator, position, field, &op.value)?,
                Operator::And | Operator::Or | Operator::Xor => bitwise(operator, field, &op.value)?,
                _ => op.value.clone()
            };
        }
    }
    Ok(())
}

fn arithmetic(
    operator: Operator,
    position: usize,
    current: &Value,
    operand: &Value
) -> Result<Value, MemoryError> {
    if let (Some(a), Some(b)) = (current.as_i128(), operand.as_i128()) {
        let n = if operator == Operator::Add { a + b } else { a - b };
        let overflow = || MemoryError::Overflow { operator, position };
        return if n < 0 || matches!(current, Value::Int(_)) {
            i64::try_from(n).map(Value::Int).map_err(|_| overflow())
        } else {
            u64::try_from(n).map(Value::UInt).map_err(|_| overflow())
        };
    }
    match (current.as_f64(), operand.as_f64()) {
        (Some(a), Some(b)) => Ok(Value::Float(if operator == Operator::Add { a + b } else { a - b })),
        (None, _) => Err(MemoryError::InvalidOperand {
            operator,
            found: current.kind()
        }),
        (_, None) => Err(MemoryError::InvalidOperand {
            operator,
            found: operand.kind()
        })
    }
}

fn bitwise(operator: Operator, current: &Value, operand: &Value) -> Result<Value, MemoryError> {
    let unsigned = |v: &Value| {
        v.as_i128()
            .and_then(|n| u64::try_from(n).ok())
            .ok_or(MemoryError::InvalidOperand {
                operator,
                found: v.kind()
            })
    };
    let (a, b) = (unsigned(current)?, unsigned(operand)?);
    Ok(Value::UInt(match operator {
        Operator::And => a & b,
        Operator::Or => a | b,
        _ => a ^ b
    }))
}

const fn rank(value: &Value) -> u8 {
    match value {
        Value::Nil => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::UInt(_) | Value::Float(_) => 2,
        Value::Str(_) => 3,
        Value::Bin(_) => 4,
        Value::Array(_) => 5,
        Value::Map(_) => 6
    }
}

/// Total order over stored values.
fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Str(x), Value::Str(y)) => x.cmp(y),
        (Value::Bin(x), Value::Bin(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => compare_keys(x, y),
        (Value::Map(x), Value::Map(y)) => x
            .iter()
            .zip(y)
            .map(|((xk, xv), (yk, yv))| compare(xk, yk).then_with(|| compare(xv, yv)))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        _ => match (a.as_i128(), b.as_i128()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => rank(a).cmp(&rank(b))
            }
        }
    }
}

fn compare_keys(a: &[Value], b: &[Value]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| compare(x, y))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

impl Transport for MemoryStore {
    type Error = MemoryError;

    fn insert(&self, space: &str, tuple: Row) -> Result<Vec<Row>, MemoryError> {
        self.write(space, "insert", |s| s.insert(tuple).map(|row| vec![row]))
    }

    fn replace(&self, space: &str, tuple: Row) -> Result<Vec<Row>, MemoryError> {
        self.write(space, "replace", |s| s.replace(tuple).map(|row| vec![row]))
    }

    fn delete(&self, space: &str, key: Row) -> Result<Vec<Row>, MemoryError> {
        self.write(space, "delete", |s| Ok(s.delete(&key).into_iter().collect()))
    }

    fn update(&self, space: &str, key: Row, ops: Vec<UpdateOp>) -> Result<Vec<Row>, MemoryError> {
        self.write(space, "update", |s| {
            Ok(s.update(&key, &ops)?.into_iter().collect())
        })
    }

    fn upsert(
        &self,
        space: &str,
        key: Row,
        tuple: Row,
        ops: Vec<UpdateOp>
    ) -> Result<Vec<Row>, MemoryError> {
        self.write(space, "upsert", |s| {
            if s.find(&key).is_some() {
                s.update(&key, &ops)?;
            } else {
                s.insert(tuple)?;
            }
            Ok(Vec::new())
        })
    }

    fn select(
        &self,
        space: &str,
        index: &str,
        key: Row,
        offset: u32,
        limit: u32,
        iterator: IteratorType
    ) -> Result<Vec<Row>, MemoryError> {
        let rows = self.read(space, |s| s.select(index, &key, offset, limit, iterator))?;
        trace!(space, index, rows = rows.len(), "memory store select");
        Ok(rows)
    }

    fn count(
        &self,
        space: &str,
        index: &str,
        key: Row,
        iterator: IteratorType
    ) -> Result<u64, MemoryError> {
        let count = self.read(space, |s| s.count(index, &key, iterator))?;
        trace!(space, index, count, "memory store count");
        Ok(count)
    }
}

#[async_trait]
impl AsyncTransport for MemoryStore {
    type Error = MemoryError;

    async fn insert(&self, space: &str, tuple: Row) -> Result<Vec<Row>, MemoryError> {
        Transport::insert(self, space, tuple)
    }

    async fn replace(&self, space: &str, tuple: Row) -> Result<Vec<Row>, MemoryError> {
        Transport::replace(self, space, tuple)
    }

    async fn delete(&self, space: &str, key: Row) -> Result<Vec<Row>, MemoryError> {
        Transport::delete(self, space, key)
    }

    async fn update(
        &self,
        space: &str,
        key: Row,
        ops: Vec<UpdateOp>
    ) -> Result<Vec<Row>, MemoryError> {
        Transport::update(self, space, key, ops)
    }

    async fn upsert(
        &self,
        space: &str,
        key: Row,
        tuple: Row,
        ops: Vec<UpdateOp>
    ) -> Result<Vec<Row>, MemoryError> {
        Transport::upsert(self, space, key, tuple, ops)
    }

    async fn select(
        &self,
        space: &str,
        index: &str,
        key: Row,
        offset: u32,
        limit: u32,
        iterator: IteratorType
    ) -> Result<Vec<Row>, MemoryError> {
        Transport::select(self, space, index, key, offset, limit, iterator)
    }

    async fn count(
        &self,
        space: &str,
        index: &str,
        key: Row,
        iterator: IteratorType
    ) -> Result<u64, MemoryError> {
        Transport::count(self, space, index, key, iterator)
    }
}
