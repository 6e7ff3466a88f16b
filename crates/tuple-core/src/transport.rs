// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Client seams between operations and the store.
//!
//! The mapping layer never opens connections. It hands encoded tuples,
//! keys and update lists to a client implementing [`Transport`] (blocking)
//! or [`AsyncTransport`] (non-blocking) and decodes whatever rows come back.
//!
//! # Implementing
//!
//! ```rust,ignore
//! struct Connection { /* socket, buffers */ }
//!
//! impl Transport for Connection {
//!     type Error = io::Error;
//!
//!     fn insert(&self, space: &str, tuple: Row) -> Result<Vec<Row>, io::Error> {
//!         self.call(Request::Insert { space, tuple })
//!     }
//!     // ...
//! }
//! ```
//!
//! Both traits are implemented for `&T` and `Arc<T>`, so one client can back
//! many [`Space`](crate::Space) handles.

use std::{error::Error as StdError, sync::Arc};

use async_trait::async_trait;

use crate::{diff::UpdateOp, iterator::IteratorType, value::Row};

/// Blocking store client.
///
/// Every method returns the rows the store sent back, possibly none.
pub trait Transport {
    /// Error type for transport failures.
    type Error: StdError + Send + Sync + 'static;

    /// Insert a new tuple.
    fn insert(&self, space: &str, tuple: Row) -> Result<Vec<Row>, Self::Error>;

    /// Insert or overwrite by primary key.
    fn replace(&self, space: &str, tuple: Row) -> Result<Vec<Row>, Self::Error>;

    /// Delete by primary key.
    fn delete(&self, space: &str, key: Row) -> Result<Vec<Row>, Self::Error>;

    /// Apply update operations to the tuple with this primary key.
    fn update(&self, space: &str, key: Row, ops: Vec<UpdateOp>) -> Result<Vec<Row>, Self::Error>;

    /// Insert `tuple` if `key` is absent, otherwise apply `ops`.
    fn upsert(
        &self,
        space: &str,
        key: Row,
        tuple: Row,
        ops: Vec<UpdateOp>
    ) -> Result<Vec<Row>, Self::Error>;

    /// Select through a named index.
    fn select(
        &self,
        space: &str,
        index: &str,
        key: Row,
        offset: u32,
        limit: u32,
        iterator: IteratorType
    ) -> Result<Vec<Row>, Self::Error>;

    /// Number of tuples an unbounded `select` would return.
    ///
    /// The default runs that select and counts the rows; clients with a
    /// native count should override it.
    fn count(
        &self,
        space: &str,
        index: &str,
        key: Row,
        iterator: IteratorType
    ) -> Result<u64, Self::Error> {
        let rows = self.select(space, index, key, 0, u32::MAX, iterator)?;
        Ok(u64::try_from(rows.len()).unwrap_or(u64::MAX))
    }
}

/// Non-blocking store client.
///
/// Same contract as [`Transport`]; futures must be `Send`.
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    /// Error type for transport failures.
    type Error: StdError + Send + Sync + 'static;

    /// Insert a new tuple.
    async fn insert(&self, space: &str, tuple: Row) -> Result<Vec<Row>, Self::Error>;

    /// Insert or overwrite by primary key.
    async fn replace(&self, space: &str, tuple: Row) -> Result<Vec<Row>, Self::Error>;

    /// Delete by primary key.
    async fn delete(&self, space: &str, key: Row) -> Result<Vec<Row>, Self::Error>;

    /// Apply update operations to the tuple with this primary key.
    async fn update(
        &self,
        space: &str,
        key: Row,
        ops: Vec<UpdateOp>
    ) -> Result<Vec<Row>, Self::Error>;

    /// Insert `tuple` if `key` is absent, otherwise apply `ops`.
    async fn upsert(
        &self,
        space: &str,
        key: Row,
        tuple: Row,
        ops: Vec<UpdateOp>
    ) -> Result<Vec<Row>, Self::Error>;

    /// Select through a named index.
    async fn select(
        &self,
        space: &str,
        index: &str,
        key: Row,
        offset: u32,
        limit: u32,
        iterator: IteratorType
    ) -> Result<Vec<Row>, Self::Error>;

    /// Number of tuples an unbounded `select` would return.
    ///
    /// Defaults to counting the rows of that select.
    async fn count(
        &self,
        space: &str,
        index: &str,
        key: Row,
        iterator: IteratorType
    ) -> Result<u64, Self::Error> {
        let rows = self.select(space, index, key, 0, u32::MAX, iterator).await?;
        Ok(u64::try_from(rows.len()).unwrap_or(u64::MAX))
    }
}

macro_rules! forward_transport {
    ($([$($generics:tt)*] $ptr:ty),*) => {$(
        impl<$($generics)*> Transport for $ptr
        where
            T: Transport + ?Sized
        {
            type Error = T::Error;

            fn insert(&self, space: &str, tuple: Row) -> Result<Vec<Row>, Self::Error> {
                (**self).insert(space, tuple)
            }

            fn replace(&self, space: &str, tuple: Row) -> Result<Vec<Row>, Self::Error> {
                (**self).replace(space, tuple)
            }

            fn delete(&self, space: &str, key: Row) -> Result<Vec<Row>, Self::Error> {
                (**self).delete(space, key)
            }

            fn update(
                &self,
                space: &str,
                key: Row,
                ops: Vec<UpdateOp>
            ) -> Result<Vec<Row>, Self::Error> {
                (**self).update(space, key, ops)
            }

            fn upsert(
                &self,
                space: &str,
                key: Row,
                tuple: Row,
                ops: Vec<UpdateOp>
            ) -> Result<Vec<Row>, Self::Error> {
                (**self).upsert(space, key, tuple, ops)
            }

            fn select(
                &self,
                space: &str,
                index: &str,
                key: Row,
                offset: u32,
                limit: u32,
                iterator: IteratorType
            ) -> Result<Vec<Row>, Self::Error> {
                (**self).select(space, index, key, offset, limit, iterator)
            }

            fn count(
                &self,
                space: &str,
                index: &str,
                key: Row,
                iterator: IteratorType
            ) -> Result<u64, Self::Error> {
                (**self).count(space, index, key, iterator)
            }
        }

        #[async_trait]
        impl<$($generics)*> AsyncTransport for $ptr
        where
            T: AsyncTransport + ?Sized
        {
            type Error = T::Error;

            async fn insert(&self, space: &str, tuple: Row) -> Result<Vec<Row>, Self::Error> {
                (**self).insert(space, tuple).await
            }

            async fn replace(&self, space: &str, tuple: Row) -> Result<Vec<Row>, Self::Error> {
                (**self).replace(space, tuple).await
            }

            async fn delete(&self, space: &str, key: Row) -> Result<Vec<Row>, Self::Error> {
                (**self).delete(space, key).await
            }

            async fn update(
                &self,
                space: &str,
                key: Row,
                ops: Vec<UpdateOp>
            ) -> Result<Vec<Row>, Self::Error> {
                (**self).update(space, key, ops).await
            }

            async fn upsert(
                &self,
                space: &str,
                key: Row,
                tuple: Row,
                ops: Vec<UpdateOp>
            ) -> Result<Vec<Row>, Self::Error> {
                (**self).upsert(space, key, tuple, ops).await
            }

            async fn select(
                &self,
                space: &str,
                index: &str,
                key: Row,
                offset: u32,
                limit: u32,
                iterator: IteratorType
            ) -> Result<Vec<Row>, Self::Error> {
                (**self).select(space, index, key, offset, limit, iterator).await
            }

            async fn count(
                &self,
                space: &str,
                index: &str,
                key: Row,
                iterator: IteratorType
            ) -> Result<u64, Self::Error> {
                (**self).count(space, index, key, iterator).await
            }
        }
    )*};
}

forward_transport!(['a, T] &'a T, [T] Arc<T>);
