// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core traits and types for tuple-derive.
//!
//! This crate maps typed entities onto the flat, positional tuples of a
//! Tarantool-style store and runs CRUD operations through a pluggable
//! client. It is what `#[derive(Tuple)]` generated code builds on, and it
//! can be used standalone with hand-written [`Tuple`] implementations.
//!
//! # Overview
//!
//! - [`value`]: Stored value model, [`ToValue`] / [`FromValue`]
//! - [`schema`]: Static definitions and the validated [`EntitySchema`]
//! - [`codec`]: The [`Tuple`] trait
//! - [`key`] / [`diff`]: Index keys and update diffs from entities
//! - [`Space`]: Binds an entity to a space and a client, builds operations
//! - [`operation`]: Operation value objects with `run_sync` / `run_async`
//! - [`hydrate`]: Rows back into entities
//! - [`transport`]: Client traits
//! - [`memory`]: In-memory client for tests and demos
//! - [`prelude`]: Convenient re-exports
//!
//! # Flow
//!
//! ```text
//! entity ──to_tuple──► Row ──► Operation ──► Transport ──► Vec<Row>
//!                                                            │
//! Option<entity> / Vec<entity> ◄──────── hydrate ◄───────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use tuple_core::prelude::*;
//!
//! let users = Space::<User, _>::new(client)?;
//! users.insert(&user).run_sync()?;
//! let found = users.get("primary", vec![Value::UInt(1)]).run_sync()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod diff;
pub mod error;
pub mod hydrate;
pub mod iterator;
pub mod key;
pub mod memory;
pub mod operation;
pub mod prelude;
pub mod schema;
pub mod space;
pub mod transport;
pub mod value;

#[cfg(test)]
pub(crate) mod fixture;

/// Re-export async_trait for transport implementations.
pub use async_trait::async_trait;
pub use codec::{SchemaCell, Tuple, TupleReader};
pub use diff::{Operator, UpdateOp};
pub use error::{DecodeError, Error, KeyError, SchemaError, UnknownIndex};
pub use iterator::IteratorType;
pub use memory::{MemoryError, MemoryStore};
pub use schema::{EntitySchema, TupleDefinition};
pub use space::Space;
pub use transport::{AsyncTransport, Transport};
pub use value::{FromValue, Row, ToValue, Value, ValueError};

/// Offset and limit of a select.
///
/// The default reads everything from the start.
///
/// # Example
///
/// ```rust
/// use tuple_core::Page;
///
/// let first = Page::new(10, 0); // First 10 tuples
/// let next = Page::new(10, 10); // Next 10 tuples
/// assert_eq!(Page::page(1, 10), next);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Maximum number of tuples to return.
    pub limit: u32,

    /// Number of tuples to skip.
    pub offset: u32
}

impl Page {
    /// Create a page.
    ///
    /// # Arguments
    ///
    /// * `limit`: Maximum tuples to return
    /// * `offset`: Number of tuples to skip
    pub const fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit,
            offset
        }
    }

    /// Page number `page` (0-indexed) of `per_page` tuples.
    ///
    /// The offset saturates instead of overflowing.
    pub const fn page(page: u32, per_page: u32) -> Self {
        Self {
            limit:  per_page,
            offset: page.saturating_mul(per_page)
        }
    }

    /// Exactly one tuple, no offset.
    pub const fn single() -> Self {
        Self::new(1, 0)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit:  u32::MAX,
            offset: 0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_new() {
        let page = Page::new(50, 100);
        assert_eq!(page.limit, 50);
        assert_eq!(page.offset, 100);
    }

    #[test]
    fn page_numbering() {
        assert_eq!(Page::page(0, 25), Page::new(25, 0));
        assert_eq!(Page::page(3, 25), Page::new(25, 75));
        assert_eq!(Page::page(u32::MAX, 2).offset, u32::MAX);
    }

    #[test]
    fn page_default_is_unbounded() {
        let page = Page::default();
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, u32::MAX);
        assert_eq!(Page::single(), Page::new(1, 0));
    }
}
