// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Complete parsed tuple entity.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         TupleDef                         │
//! ├──────────────────────────────────────────────────────────┤
//! │  ident, vis            struct name and visibility        │
//! │  space                 #[tuple(space = "...")]           │
//! │  krate                 runtime crate path                │
//! │  indexes               Vec<IndexAttr>                    │
//! │  fields                Vec<FieldDef>, declaration order  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Construction parses and then runs the schema rules in `validate.rs`, so a
//! `TupleDef` that exists is one the runtime extractor accepts.

use darling::FromDeriveInput;
use proc_macro2::Span;
use syn::{DeriveInput, Ident, Visibility};

use super::{
    attrs::{IndexAttr, TupleAttrs},
    field::FieldDef
};
use crate::tuple::validate;

#[derive(Debug)]
pub struct TupleDef {
    pub ident: Ident,

    pub vis: Visibility,

    pub space: String,

    pub space_span: Span,

    pub krate: syn::Path,

    pub indexes: Vec<IndexAttr>,

    pub fields: Vec<FieldDef>
}

impl TupleDef {
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = TupleAttrs::from_derive_input(input)?;

        if !attrs.generics.params.is_empty() {
            return Err(
                darling::Error::custom("Tuple cannot be derived for generic structs")
                    .with_span(&attrs.generics)
            );
        }

        let fields: Vec<FieldDef> = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => named
                    .named
                    .iter()
                    .map(FieldDef::from_field)
                    .collect::<darling::Result<Vec<_>>>()?,
                _ => {
                    return Err(darling::Error::custom("Tuple requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Tuple can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        let def = Self {
            ident: attrs.ident,
            vis: attrs.vis,
            space_span: attrs.space.span(),
            space: attrs.space.as_str().to_owned(),
            krate: attrs.krate,
            indexes: attrs.indexes,
            fields
        };
        validate::check(&def)?;
        Ok(def)
    }

    /// Struct name as a string.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Mapped fields in output-position order.
    ///
    /// Stable sort on the position hint, so equal hints keep declaration
    /// order.
    #[must_use]
    pub fn ordered_fields(&self) -> Vec<&FieldDef> {
        let mut fields: Vec<&FieldDef> = self.fields.iter().filter(|f| f.is_mapped()).collect();
        fields.sort_by_key(|f| f.position_hint());
        fields
    }

    /// Fields excluded from the tuple.
    pub fn skipped_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| !f.is_mapped())
    }

    /// Member fields of `index` in ascending part order.
    #[must_use]
    pub fn parts_of(&self, index: &str) -> Vec<&FieldDef> {
        let mut parts: Vec<(u32, &FieldDef)> = self
            .fields
            .iter()
            .filter_map(|f| f.member_of(index).map(|m| (m.part, f)))
            .collect();
        parts.sort_by_key(|(part, _)| *part);
        parts.into_iter().map(|(_, f)| f).collect()
    }
}
