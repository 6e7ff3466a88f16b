// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Typed handle on one space.
//!
//! A [`Space`] ties an entity type to a space name and a client. Creating it
//! validates the entity schema, so every operation it builds starts from a
//! schema known to be consistent.
//!
//! # Example
//!
//! ```rust,ignore
//! let store = MemoryStore::new();
//! store.register::<User>()?;
//!
//! let users = Space::<User, _>::new(&store)?;
//! users.insert(&user).run_sync()?;
//!
//! let mut renamed = user.clone();
//! renamed.name = "Grace".into();
//! users.update(&renamed).run_sync()?;
//!
//! let page = users
//!     .select("by_name", vec![])
//!     .iterator(IteratorType::All)
//!     .page(Page::page(0, 20))
//!     .run_sync()?;
//! ```

use std::{fmt, marker::PhantomData};

use crate::{
    codec::Tuple,
    error::{SchemaError, UnknownIndex},
    iterator::IteratorType,
    operation::{self, Count, Delete, Get, Insert, Replace, Request, Select, Update, Upsert},
    schema::EntitySchema,
    value::{Row, Value}
};

/// Entity type `T` stored in one space, reached through client `C`.
pub struct Space<T, C> {
    client: C,
    name:   String,
    schema: &'static EntitySchema,
    entity: PhantomData<fn() -> T>
}

impl<T: Tuple, C> Space<T, C> {
    /// Bind `T` to its declared space.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if `T`'s metadata is inconsistent.
    pub fn new(client: C) -> Result<Self, SchemaError> {
        let schema = T::schema()?;
        Ok(Self::bind(client, schema.space().to_owned(), schema))
    }

    /// Bind `T` to a space other than the declared one.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if `T`'s metadata is inconsistent.
    pub fn with_name(client: C, name: impl Into<String>) -> Result<Self, SchemaError> {
        Ok(Self::bind(client, name.into(), T::schema()?))
    }

    fn bind(client: C, name: String, schema: &'static EntitySchema) -> Self {
        Self {
            client,
            name,
            schema,
            entity: PhantomData
        }
    }

    /// Space name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated schema of `T`.
    #[must_use]
    pub const fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    /// Underlying client.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Give the client back.
    pub fn into_client(self) -> C {
        self.client
    }

    /// Insert `entity`.
    pub fn insert(&self, entity: &T) -> Insert<'_, T, C> {
        Insert::new(&self.client, &self.name, Request::Insert {
            tuple: entity.to_tuple()
        })
    }

    /// Insert `entity`, overwriting any tuple with the same primary key.
    pub fn replace(&self, entity: &T) -> Replace<'_, T, C> {
        Replace::new(&self.client, &self.name, Request::Replace {
            tuple: entity.to_tuple()
        })
    }

    /// Delete the tuple with `entity`'s primary key.
    pub fn delete(&self, entity: &T) -> Delete<'_, T, C> {
        self.delete_by_key(self.primary_key(entity))
    }

    /// Delete by an explicit primary key.
    pub fn delete_by_key(&self, key: Row) -> Delete<'_, T, C> {
        Delete::new(&self.client, &self.name, Request::Delete { key })
    }

    /// Overwrite the stored non-primary fields with `entity`'s.
    pub fn update(&self, entity: &T) -> Update<'_, T, C> {
        let tuple = entity.to_tuple();
        Update::new(&self.client, &self.name, Request::Update {
            key: self.schema.primary_key(&tuple),
            ops: self.schema.build_diff(&tuple)
        })
    }

    /// Store `default` if its primary key is absent, otherwise assign
    /// `updated`'s non-primary fields to the stored tuple.
    pub fn upsert(&self, default: &T, updated: &T) -> Upsert<'_, T, C> {
        let tuple = default.to_tuple();
        Upsert::new(&self.client, &self.name, Request::Upsert {
            key: self.schema.primary_key(&tuple),
            ops: self.schema.build_diff(&updated.to_tuple()),
            tuple
        })
    }

    /// Select through `index` with an explicit key.
    pub fn select(&self, index: &str, key: Row) -> Select<'_, T, C> {
        Select::new(&self.client, &self.name, self.schema, index, key)
    }

    /// Select through `index` with the key read from `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownIndex`] if `index` is not declared.
    pub fn select_by(&self, index: &str, entity: &T) -> Result<Select<'_, T, C>, UnknownIndex> {
        operation::select_by(&self.client, &self.name, self.schema, index, entity)
    }

    /// Fetch at most one entity through `index`.
    pub fn get(&self, index: &str, key: Row) -> Get<'_, T, C> {
        Get::new(self.select(index, key))
    }

    /// Count tuples matching `key` through `index`, with equality unless
    /// another iterator is set.
    pub fn count(&self, index: &str, key: Row) -> Count<'_, T, C> {
        Count::new(self.select(index, key))
    }

    /// Entity with the smallest key in `index`.
    pub fn min(&self, index: &str) -> Get<'_, T, C> {
        Get::first(self.select(index, Vec::new()), IteratorType::Ge)
    }

    /// Entity with the largest key in `index`.
    pub fn max(&self, index: &str) -> Get<'_, T, C> {
        Get::first(self.select(index, Vec::new()), IteratorType::Le)
    }

    /// Primary key of `entity`.
    #[must_use]
    pub fn primary_key(&self, entity: &T) -> Vec<Value> {
        self.schema.primary_key(&entity.to_tuple())
    }
}

impl<T, C: Clone> Clone for Space<T, C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            name:   self.name.clone(),
            schema: self.schema,
            entity: PhantomData
        }
    }
}

impl<T, C> fmt::Debug for Space<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Space")
            .field("name", &self.name)
            .field("entity", &self.schema.name())
            .finish_non_exhaustive()
    }
}
