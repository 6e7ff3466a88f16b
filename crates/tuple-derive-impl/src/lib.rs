// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Procedural macro behind `tuple-derive`.
//!
//! This crate is an implementation detail. Depend on `tuple-derive`, which
//! re-exports the derive together with the runtime types the generated code
//! refers to.
//!
//! # Attribute Quick Reference
//!
//! ## Struct-Level `#[tuple(...)]`
//!
//! ```rust,ignore
//! #[derive(Tuple)]
//! #[tuple(
//!     space = "users",                                // Required: space name
//!     crate = "::tuple_derive",                       // Optional: runtime crate path
//!     index(name = "primary", primary),               // One per index
//!     index(name = "by_email", unique, kind = "hash") // kind: tree | hash | bitset | rtree
//! )]
//! pub struct User { /* ... */ }
//! ```
//!
//! ## Field-Level
//!
//! ```rust,ignore
//! #[field(position = 2)]                    // Position hint, stable-sorted, 1 when absent
//! #[field(skip)]                            // Not mapped; decoded as Default::default()
//! #[index(name = "primary")]                // Member of an index, part 1
//! #[index(name = "by_name", part = 2)]      // Part number inside a composite index
//! #[index(name = "by_tag", nullable)]       // Part may hold nil
//! ```
//!
//! # Generated Code
//!
//! | Item | Purpose |
//! |------|---------|
//! | `impl Tuple for User` | Static definition, cached schema, encode and decode |
//! | `UserQueries<C>` | `get_by_*` / `select_by_*` per declared index |
//! | `impl UserQueries<C> for Space<User, C>` | Typed key construction |
//!
//! Schema rules are checked while expanding: an index without members, a
//! duplicate part number, a nullable primary part and similar mistakes are
//! reported at the offending attribute.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod tuple;

use proc_macro::TokenStream;

/// Derive positional tuple mapping for a named-field struct.
///
/// See the crate documentation for the accepted attributes.
#[proc_macro_derive(Tuple, attributes(tuple, field, index))]
pub fn derive_tuple(input: TokenStream) -> TokenStream {
    tuple::derive(input)
}
