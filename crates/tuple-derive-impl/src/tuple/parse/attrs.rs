// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Struct-level attribute parsing with darling.
//!
//! This module defines the internal [`TupleAttrs`] structure used for
//! parsing `#[tuple(...)]` attributes. The public API is
//! [`TupleDef`](super::TupleDef).
//!
//! # Supported Attributes
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `space` | Yes | - | Space the entity is stored in |
//! | `crate` | No | `::tuple_derive` | Path of the runtime crate |
//! | `index(...)` | Yes, repeatable | - | Index declaration |
//!
//! # Index Declarations
//!
//! | Key | Required | Default | Description |
//! |-----|----------|---------|-------------|
//! | `name` | Yes | - | Index name, referenced by `#[index(name = ...)]` |
//! | `primary` | No | `false` | Marks the primary index |
//! | `unique` | No | same as `primary` | Uniqueness |
//! | `kind` | No | `"tree"` | `tree`, `hash`, `bitset` or `rtree` |

use darling::{FromDeriveInput, FromMeta, util::SpannedValue};
use syn::{Generics, Ident, Visibility};

pub fn default_crate_path() -> syn::Path {
    syn::parse_quote!(::tuple_derive)
}

/// Storage structure of a declared index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexKind {
    #[default]
    Tree,
    Hash,
    Bitset,
    Rtree
}

impl IndexKind {
    /// Variant name of the runtime `IndexKind`.
    #[must_use]
    pub const fn variant(self) -> &'static str {
        match self {
            Self::Tree => "Tree",
            Self::Hash => "Hash",
            Self::Bitset => "Bitset",
            Self::Rtree => "Rtree"
        }
    }
}

impl FromMeta for IndexKind {
    /// Case-insensitive: `"tree"`, `"hash"`, `"bitset"`, `"rtree"`.
    fn from_string(value: &str) -> darling::Result<Self> {
        match value.to_lowercase().as_str() {
            "tree" => Ok(Self::Tree),
            "hash" => Ok(Self::Hash),
            "bitset" => Ok(Self::Bitset),
            "rtree" => Ok(Self::Rtree),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}

/// One `index(...)` entry of `#[tuple(...)]`.
#[derive(Debug, Clone, FromMeta)]
pub struct IndexAttr {
    pub name: SpannedValue<String>,

    #[darling(default)]
    pub primary: bool,

    /// `None` means "same as `primary`".
    #[darling(default)]
    pub unique: Option<bool>,

    #[darling(default)]
    pub kind: IndexKind
}

impl IndexAttr {
    /// Uniqueness after applying the primary default.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.unique.unwrap_or(self.primary)
    }
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(tuple), supports(struct_named))]
pub struct TupleAttrs {
    pub ident: Ident,

    pub vis: Visibility,

    pub generics: Generics,

    pub space: SpannedValue<String>,

    #[darling(rename = "crate", default = "default_crate_path")]
    pub krate: syn::Path,

    #[darling(multiple, rename = "index")]
    pub indexes: Vec<IndexAttr>
}
