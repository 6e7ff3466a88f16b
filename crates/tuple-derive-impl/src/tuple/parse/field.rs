// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! | Attribute | Repeatable | Meaning |
//! |-----------|------------|---------|
//! | `#[field(position = N)]` | No | Position hint; absent or `0` means `1` |
//! | `#[field(skip)]` | No | Not mapped, decoded as `Default::default()` |
//! | `#[index(name = "...", part = N, nullable)]` | Yes | Index membership |

use proc_macro2::Span;
use quote::ToTokens;
use syn::{Attribute, Field, Ident, Type, ext::IdentExt};

/// Membership of a field in one index.
#[derive(Debug, Clone)]
pub struct MemberAttr {
    pub index: String,

    /// Part number, normalised so `0` reads as `1`.
    pub part: u32,

    pub nullable: bool,

    /// Span of the `name = "..."` literal.
    pub span: Span
}

#[derive(Debug)]
pub struct FieldDef {
    pub ident: Ident,

    pub ty: Type,

    /// Raw hint; `None` when `#[field(position)]` is absent.
    pub position: Option<u32>,

    pub skip: bool,

    pub members: Vec<MemberAttr>
}

impl FieldDef {
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Tuple fields must be named").with_span(field)
        })?;

        let mut position = None;
        let mut skip = false;
        let mut members = Vec::new();

        for attr in &field.attrs {
            if attr.path().is_ident("field") {
                parse_field_attr(attr, &mut position, &mut skip)?;
            } else if attr.path().is_ident("index") {
                members.push(parse_member_attr(attr)?);
            }
        }

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            position,
            skip,
            members
        })
    }

    #[must_use]
    pub fn name(&self) -> &Ident {
        &self.ident
    }

    /// Field name without a raw identifier prefix.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.unraw().to_string()
    }

    #[must_use]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Field type as written, whitespace removed.
    #[must_use]
    pub fn type_name(&self) -> String {
        self.ty.to_token_stream().to_string().replace(' ', "")
    }

    /// Position hint used for ordering.
    #[must_use]
    pub fn position_hint(&self) -> u32 {
        self.position.unwrap_or(1).max(1)
    }

    #[must_use]
    pub fn is_mapped(&self) -> bool {
        !self.skip
    }

    #[must_use]
    pub fn member_of(&self, index: &str) -> Option<&MemberAttr> {
        self.members.iter().find(|m| m.index == index)
    }
}

fn parse_field_attr(
    attr: &Attribute,
    position: &mut Option<u32>,
    skip: &mut bool
) -> darling::Result<()> {
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("position") {
            let _: syn::Token![=] = meta.input.parse()?;
            let value: syn::LitInt = meta.input.parse()?;
            *position = Some(value.base10_parse()?);
        } else if meta.path.is_ident("skip") {
            *skip = true;
        } else {
            return Err(meta.error("expected `position = N` or `skip`"));
        }
        Ok(())
    })
    .map_err(darling::Error::from)
}

fn parse_member_attr(attr: &Attribute) -> darling::Result<MemberAttr> {
    let mut index: Option<syn::LitStr> = None;
    let mut part = 1;
    let mut nullable = false;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let _: syn::Token![=] = meta.input.parse()?;
            index = Some(meta.input.parse()?);
        } else if meta.path.is_ident("part") {
            let _: syn::Token![=] = meta.input.parse()?;
            let value: syn::LitInt = meta.input.parse()?;
            part = value.base10_parse::<u32>()?.max(1);
        } else if meta.path.is_ident("nullable") {
            nullable = true;
        } else {
            return Err(meta.error("expected `name`, `part` or `nullable`"));
        }
        Ok(())
    })?;

    let index = index.ok_or_else(|| {
        darling::Error::custom("#[index] requires `name = \"...\"`").with_span(attr)
    })?;

    Ok(MemberAttr {
        index: index.value(),
        part,
        nullable,
        span: index.span()
    })
}
