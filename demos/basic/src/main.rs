// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Basic Example with tuple-derive
//!
//! Demonstrates:
//! - `#[derive(Tuple)]` with primary and secondary indexes
//! - Blocking and async CRUD on the same store
//! - Upsert followed by a select to observe the outcome
//! - Paged range select
//!
//! Run with `RUST_LOG=debug cargo run` to see every submitted operation.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tuple_derive::prelude::*;

// ============================================================================
// Entity Definition
// ============================================================================

/// A user stored in the `users` space.
#[derive(Debug, Clone, PartialEq, Tuple)]
#[tuple(
    space = "users",
    index(name = "primary", primary),
    index(name = "by_email", unique, kind = "hash"),
    index(name = "by_karma")
)]
pub struct User {
    #[field(position = 1)]
    #[index(name = "primary")]
    pub id: u64,

    #[field(position = 2)]
    #[index(name = "by_email")]
    pub email: String,

    #[field(position = 3)]
    #[index(name = "by_karma")]
    pub karma: i64,

    #[field(position = 4)]
    pub tags: Vec<String>,

    /// Session-only state, never stored.
    #[field(skip)]
    pub online: bool
}

impl User {
    fn new(id: u64, email: &str, karma: i64) -> Self {
        Self {
            id,
            email: email.to_owned(),
            karma,
            tags: Vec::new(),
            online: false
        }
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let store = Arc::new(MemoryStore::new());
    store.register::<User>()?;
    let users = Space::<User, _>::new(Arc::clone(&store))?;

    // Blocking path
    let ada = User::new(1, "ada@example.com", 10);
    users.insert(&ada).run_sync()?;
    users.insert(&User::new(2, "bob@example.com", 3)).run_sync()?;
    users.insert(&User::new(3, "cy@example.com", 42)).run_sync()?;

    let found = users.get_by_email("ada@example.com".into()).run_sync()?;
    tracing::info!(?found, "looked up by email");

    // Async path
    let mut promoted = ada.clone();
    promoted.karma = 100;
    promoted.tags.push("admin".into());
    let stored = users.update(&promoted).run_async().await?;
    tracing::info!(?stored, "updated");

    // Upsert returns no entity; select to see what happened
    let default = User::new(4, "dee@example.com", 0);
    let mut bumped = default.clone();
    bumped.karma = 1;
    for _ in 0..2 {
        users.upsert(&default, &bumped).run_async().await?;
        let current = users.get_by_primary(4).run_async().await?;
        tracing::info!(?current, "after upsert");
    }

    // Range select over the karma index, highest first
    let leaders = users
        .select("by_karma", vec![])
        .iterator(IteratorType::Req)
        .page(Page::page(0, 2))
        .run_async()
        .await?;
    for user in &leaders {
        tracing::info!(id = user.id, karma = user.karma, "leaderboard");
    }

    let removed = users.delete_by_key(vec![Value::UInt(2)]).run_sync()?;
    tracing::info!(?removed, remaining = store.len("users"), "deleted");

    Ok(())
}
