// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tuple derive macro implementation.
//!
//! # Architecture
//!
//! ```text
//! tuple.rs (orchestrator)
//! │
//! ├── parse/         → Attribute parsing (TupleDef, FieldDef, IndexAttr)
//! ├── validate.rs    → Schema rules checked at expansion time
//! │
//! ├── definition.rs  → Static TupleDefinition literal
//! ├── codec.rs       → impl Tuple (definition, schema, to_tuple, from_tuple)
//! └── queries.rs     → {Name}Queries trait for Space<Name, C>
//! ```
//!
//! # Generated Code
//!
//! For an entity like:
//!
//! ```rust,ignore
//! #[derive(Tuple)]
//! #[tuple(space = "users", index(name = "primary", primary))]
//! pub struct User {
//!     #[index(name = "primary")]
//!     pub id:   u64,
//!     pub name: String,
//! }
//! ```
//!
//! The macro generates `impl Tuple for User` and the `UserQueries<C>` trait
//! with `get_by_primary(id)` and `select_by_primary(id)`.

mod codec;
mod definition;
pub mod parse;
mod queries;
mod validate;

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::TupleDef;

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match TupleDef::from_derive_input(&input) {
        Ok(tuple) => generate(&tuple),
        Err(err) => err.write_errors().into()
    }
}

fn generate(tuple: &TupleDef) -> TokenStream {
    let codec = codec::generate(tuple);
    let queries = queries::generate(tuple);

    let expanded = quote! {
        #codec
        #queries
    };

    expanded.into()
}
