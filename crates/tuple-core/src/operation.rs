// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Operation value objects.
//!
//! Every CRUD call on a [`Space`](crate::Space) returns one of these. It has
//! already encoded its inputs, so the entity it was built from can be
//! dropped or changed freely. Nothing reaches the store until it runs:
//!
//! | Operation | Result | Transport call |
//! |-----------|--------|----------------|
//! | [`Insert`] | `Option<T>` | `insert` |
//! | [`Replace`] | `Option<T>` | `replace` |
//! | [`Delete`] | `Option<T>` | `delete` |
//! | [`Update`] | `Option<T>` | `update` |
//! | [`Upsert`] | `Option<T>` | `upsert` |
//! | [`Get`] | `Option<T>` | `select`, one tuple, `Eq` |
//! | [`Select`] | `Vec<T>` | `select` |
//! | [`Count`] | `u64` | `count` |
//!
//! `run_sync` needs a [`Transport`] client and `run_async` an
//! [`AsyncTransport`] one. Both follow the same steps: submit, then hydrate.

use std::{fmt, marker::PhantomData};

use tracing::{debug, trace};

use crate::{
    Page,
    codec::Tuple,
    diff::UpdateOp,
    error::{Error, UnknownIndex},
    hydrate,
    iterator::IteratorType,
    schema::EntitySchema,
    transport::{AsyncTransport, Transport},
    value::{Row, Value}
};

/// Encoded transport call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Request {
    Insert {
        tuple: Row
    },
    Replace {
        tuple: Row
    },
    Delete {
        key: Row
    },
    Update {
        key: Row,
        ops: Vec<UpdateOp>
    },
    Upsert {
        key:   Row,
        tuple: Row,
        ops:   Vec<UpdateOp>
    },
    Select {
        index:    String,
        key:      Row,
        page:     Page,
        iterator: IteratorType
    }
}

impl Request {
    const fn name(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "insert",
            Self::Replace { .. } => "replace",
            Self::Delete { .. } => "delete",
            Self::Update { .. } => "update",
            Self::Upsert { .. } => "upsert",
            Self::Select { .. } => "select"
        }
    }

    fn send<C: Transport>(self, client: &C, space: &str) -> Result<Vec<Row>, C::Error> {
        match self {
            Self::Insert { tuple } => client.insert(space, tuple),
            Self::Replace { tuple } => client.replace(space, tuple),
            Self::Delete { key } => client.delete(space, key),
            Self::Update { key, ops } => client.update(space, key, ops),
            Self::Upsert { key, tuple, ops } => client.upsert(space, key, tuple, ops),
            Self::Select {
                index,
                key,
                page,
                iterator
            } => client.select(space, &index, key, page.offset, page.limit, iterator)
        }
    }

    async fn send_async<C: AsyncTransport>(
        self,
        client: &C,
        space: &str
    ) -> Result<Vec<Row>, C::Error> {
        match self {
            Self::Insert { tuple } => client.insert(space, tuple).await,
            Self::Replace { tuple } => client.replace(space, tuple).await,
            Self::Delete { key } => client.delete(space, key).await,
            Self::Update { key, ops } => client.update(space, key, ops).await,
            Self::Upsert { key, tuple, ops } => client.upsert(space, key, tuple, ops).await,
            Self::Select {
                index,
                key,
                page,
                iterator
            } => {
                client
                    .select(space, &index, key, page.offset, page.limit, iterator)
                    .await
            }
        }
    }
}

fn submit<C: Transport>(client: &C, space: &str, request: Request) -> Result<Vec<Row>, C::Error> {
    let operation = request.name();
    debug!(space, operation, "submitting operation");
    let rows = request.send(client, space)?;
    trace!(space, operation, rows = rows.len(), "operation returned");
    Ok(rows)
}

async fn submit_async<C: AsyncTransport>(
    client: &C,
    space: &str,
    request: Request
) -> Result<Vec<Row>, C::Error> {
    let operation = request.name();
    debug!(space, operation, "submitting operation");
    let rows = request.send_async(client, space).await?;
    trace!(space, operation, rows = rows.len(), "operation returned");
    Ok(rows)
}

macro_rules! point_operation {
    ($($(#[$meta:meta])* $name:ident;)*) => {$(
        $(#[$meta])*
        #[must_use = "operations do nothing until run"]
        pub struct $name<'a, T, C> {
            client:  &'a C,
            space:   &'a str,
            request: Request,
            entity:  PhantomData<fn() -> T>
        }

        impl<'a, T, C> $name<'a, T, C> {
            pub(crate) const fn new(client: &'a C, space: &'a str, request: Request) -> Self {
                Self {
                    client,
                    space,
                    request,
                    entity: PhantomData
                }
            }

            /// Target space name.
            #[must_use]
            pub const fn space(&self) -> &str {
                self.space
            }
        }

        impl<T: Tuple, C: Transport> $name<'_, T, C> {
            /// Submit on the calling thread and hydrate the answer.
            ///
            /// # Errors
            ///
            /// Returns [`Error::Transport`] or [`Error::Decode`].
            pub fn run_sync(self) -> Result<Option<T>, Error<C::Error>> {
                let rows = submit(self.client, self.space, self.request).map_err(Error::Transport)?;
                Ok(hydrate::one(rows)?)
            }
        }

        impl<T: Tuple, C: AsyncTransport> $name<'_, T, C> {
            /// Submit through the async client and hydrate the answer.
            ///
            /// # Errors
            ///
            /// Returns [`Error::Transport`] or [`Error::Decode`].
            pub async fn run_async(self) -> Result<Option<T>, Error<C::Error>> {
                let rows = submit_async(self.client, self.space, self.request)
                    .await
                    .map_err(Error::Transport)?;
                Ok(hydrate::one(rows)?)
            }
        }

        impl<T, C> fmt::Debug for $name<'_, T, C> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("space", &self.space)
                    .field("request", &self.request)
                    .finish_non_exhaustive()
            }
        }
    )*};
}

point_operation! {
    /// Insert a new tuple; fails in the store on a duplicate unique key.
    Insert;
    /// Insert or overwrite the tuple with the same primary key.
    Replace;
    /// Delete by primary key, returning the removed entity.
    Delete;
    /// Assign every non-primary field of the stored tuple.
    Update;
    /// Insert the default tuple, or apply the diff if the key exists.
    ///
    /// Stores answer an upsert with no tuple, so this usually yields `None`.
    Upsert;
}

/// Select tuples through a named index.
///
/// Defaults to [`IteratorType::Eq`] over the whole result. The index and key
/// length are checked against the schema before anything is sent.
#[must_use = "operations do nothing until run"]
pub struct Select<'a, T, C> {
    client:   &'a C,
    space:    &'a str,
    schema:   &'static EntitySchema,
    index:    String,
    key:      Row,
    page:     Page,
    iterator: IteratorType,
    entity:   PhantomData<fn() -> T>
}

impl<'a, T, C> Select<'a, T, C> {
    pub(crate) fn new(
        client: &'a C,
        space: &'a str,
        schema: &'static EntitySchema,
        index: &str,
        key: Row
    ) -> Self {
        Self {
            client,
            space,
            schema,
            index: index.to_owned(),
            key,
            page: Page::default(),
            iterator: IteratorType::default(),
            entity: PhantomData
        }
    }

    /// Skip the first `offset` tuples.
    pub fn offset(mut self, offset: u32) -> Self {
        self.page.offset = offset;
        self
    }

    /// Return at most `limit` tuples.
    pub fn limit(mut self, limit: u32) -> Self {
        self.page.limit = limit;
        self
    }

    /// Set offset and limit together.
    pub fn page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    /// Walk the index with `iterator` instead of equality.
    pub fn iterator(mut self, iterator: IteratorType) -> Self {
        self.iterator = iterator;
        self
    }

    /// Index being searched.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Key values.
    #[must_use]
    pub fn key(&self) -> &[Value] {
        &self.key
    }

    /// Current offset and limit.
    #[must_use]
    pub const fn current_page(&self) -> Page {
        self.page
    }

    fn check<E>(&self) -> Result<(), Error<E>> {
        let parts = self.schema.require_index(&self.index)?.parts().len();
        if self.key.len() > parts {
            return Err(Error::KeyTooLong {
                index: self.index.clone(),
                len: self.key.len(),
                parts
            });
        }
        Ok(())
    }

    fn into_request<E>(self) -> Result<(&'a C, &'a str, Request), Error<E>> {
        self.check()?;
        let request = Request::Select {
            index:    self.index,
            key:      self.key,
            page:     self.page,
            iterator: self.iterator
        };
        Ok((self.client, self.space, request))
    }
}

impl<T: Tuple, C: Transport> Select<'_, T, C> {
    /// Submit on the calling thread and hydrate every row.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownIndex`] / [`Error::KeyTooLong`] before submitting
    /// - [`Error::Transport`] or [`Error::Decode`] after
    pub fn run_sync(self) -> Result<Vec<T>, Error<C::Error>> {
        let (client, space, request) = self.into_request()?;
        let rows = submit(client, space, request).map_err(Error::Transport)?;
        Ok(hydrate::many(rows)?)
    }
}

impl<T: Tuple, C: AsyncTransport> Select<'_, T, C> {
    /// Submit through the async client and hydrate every row.
    ///
    /// # Errors
    ///
    /// Same as [`Select::run_sync`].
    pub async fn run_async(self) -> Result<Vec<T>, Error<C::Error>> {
        let (client, space, request) = self.into_request()?;
        let rows = submit_async(client, space, request)
            .await
            .map_err(Error::Transport)?;
        Ok(hydrate::many(rows)?)
    }
}

impl<T, C> fmt::Debug for Select<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("space", &self.space)
            .field("index", &self.index)
            .field("key", &self.key)
            .field("page", &self.page)
            .field("iterator", &self.iterator)
            .finish_non_exhaustive()
    }
}

/// Fetch at most one entity by key: a single-tuple equality [`Select`].
#[must_use = "operations do nothing until run"]
pub struct Get<'a, T, C> {
    select: Select<'a, T, C>
}

impl<'a, T, C> Get<'a, T, C> {
    pub(crate) fn new(select: Select<'a, T, C>) -> Self {
        Self::first(select, IteratorType::Eq)
    }

    /// First tuple `iterator` visits.
    pub(crate) fn first(select: Select<'a, T, C>, iterator: IteratorType) -> Self {
        Self {
            select: select.page(Page::single()).iterator(iterator)
        }
    }

    /// Iterator used to find the tuple.
    #[must_use]
    pub const fn iterator_type(&self) -> IteratorType {
        self.select.iterator
    }

    /// Index being searched.
    #[must_use]
    pub fn index(&self) -> &str {
        self.select.index()
    }

    /// Key values.
    #[must_use]
    pub fn key(&self) -> &[Value] {
        self.select.key()
    }
}

impl<T: Tuple, C: Transport> Get<'_, T, C> {
    /// Submit on the calling thread.
    ///
    /// # Errors
    ///
    /// Same as [`Select::run_sync`].
    pub fn run_sync(self) -> Result<Option<T>, Error<C::Error>> {
        let (client, space, request) = self.select.into_request()?;
        let rows = submit(client, space, request).map_err(Error::Transport)?;
        Ok(hydrate::one(rows)?)
    }
}

impl<T: Tuple, C: AsyncTransport> Get<'_, T, C> {
    /// Submit through the async client.
    ///
    /// # Errors
    ///
    /// Same as [`Select::run_sync`].
    pub async fn run_async(self) -> Result<Option<T>, Error<C::Error>> {
        let (client, space, request) = self.select.into_request()?;
        let rows = submit_async(client, space, request)
            .await
            .map_err(Error::Transport)?;
        Ok(hydrate::one(rows)?)
    }
}

impl<T, C> fmt::Debug for Get<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Get").field("select", &self.select).finish()
    }
}

/// Count tuples through a named index without fetching them.
///
/// Checked like a [`Select`]; offset and limit do not apply.
#[must_use = "operations do nothing until run"]
pub struct Count<'a, T, C> {
    select: Select<'a, T, C>
}

impl<'a, T, C> Count<'a, T, C> {
    pub(crate) const fn new(select: Select<'a, T, C>) -> Self {
        Self {
            select
        }
    }

    /// Walk the index with `iterator` instead of equality.
    pub fn iterator(self, iterator: IteratorType) -> Self {
        Self::new(self.select.iterator(iterator))
    }

    /// Index being counted.
    #[must_use]
    pub fn index(&self) -> &str {
        self.select.index()
    }

    /// Key values.
    #[must_use]
    pub fn key(&self) -> &[Value] {
        self.select.key()
    }

    /// Iterator used for counting.
    #[must_use]
    pub const fn iterator_type(&self) -> IteratorType {
        self.select.iterator
    }
}

impl<T, C: Transport> Count<'_, T, C> {
    /// Count on the calling thread.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownIndex`] / [`Error::KeyTooLong`] before submitting
    /// - [`Error::Transport`] after
    pub fn run_sync(self) -> Result<u64, Error<C::Error>> {
        self.select.check()?;
        let Select {
            client,
            space,
            index,
            key,
            iterator,
            ..
        } = self.select;
        debug!(space, operation = "count", index = index.as_str(), "submitting operation");
        let count = client
            .count(space, &index, key, iterator)
            .map_err(Error::Transport)?;
        trace!(space, operation = "count", count, "operation returned");
        Ok(count)
    }
}

impl<T, C: AsyncTransport> Count<'_, T, C> {
    /// Count through the async client.
    ///
    /// # Errors
    ///
    /// Same as [`Count::run_sync`].
    pub async fn run_async(self) -> Result<u64, Error<C::Error>> {
        self.select.check()?;
        let Select {
            client,
            space,
            index,
            key,
            iterator,
            ..
        } = self.select;
        debug!(space, operation = "count", index = index.as_str(), "submitting operation");
        let count = client
            .count(space, &index, key, iterator)
            .await
            .map_err(Error::Transport)?;
        trace!(space, operation = "count", count, "operation returned");
        Ok(count)
    }
}

impl<T, C> fmt::Debug for Count<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Count").field("select", &self.select).finish()
    }
}

/// Build a [`Select`] whose key is read from an entity.
pub(crate) fn select_by<'a, T: Tuple, C>(
    client: &'a C,
    space: &'a str,
    schema: &'static EntitySchema,
    index: &str,
    entity: &T
) -> Result<Select<'a, T, C>, UnknownIndex> {
    let key = schema.extract_key(&entity.to_tuple(), index)?;
    Ok(Select::new(client, space, schema, index, key))
}
