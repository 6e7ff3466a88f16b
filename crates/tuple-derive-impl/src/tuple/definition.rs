// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Static `TupleDefinition` literal.
//!
//! Fields are emitted in declaration order with their raw position hints;
//! ordering is the runtime extractor's job. Skipped fields are left out.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::parse::{FieldDef, IndexAttr, TupleDef};

/// Generate `static DEFINITION: TupleDefinition = ...;`.
pub fn generate(tuple: &TupleDef) -> TokenStream {
    let krate = &tuple.krate;
    let name = tuple.name_str();
    let space = &tuple.space;
    let fields = tuple
        .fields
        .iter()
        .filter(|f| f.is_mapped())
        .map(|f| field_definition(krate, f));
    let indexes = tuple.indexes.iter().map(|i| index_definition(krate, i));

    quote! {
        static DEFINITION: #krate::schema::TupleDefinition = #krate::schema::TupleDefinition {
            name: #name,
            space: #space,
            fields: &[#(#fields),*],
            indexes: &[#(#indexes),*],
        };
    }
}

fn field_definition(krate: &syn::Path, field: &FieldDef) -> TokenStream {
    let name = field.name_str();
    let ty = field.type_name();
    let position = field.position.unwrap_or(1);
    let members = field.members.iter().map(|m| {
        let index = &m.index;
        let part = m.part;
        let nullable = m.nullable;
        quote! {
            #krate::schema::IndexMembership {
                index: #index,
                part: #part,
                nullable: #nullable,
            }
        }
    });

    quote! {
        #krate::schema::FieldDefinition {
            name: #name,
            ty: #ty,
            position: #position,
            indexes: &[#(#members),*],
        }
    }
}

fn index_definition(krate: &syn::Path, index: &IndexAttr) -> TokenStream {
    let name = index.name.as_str();
    let primary = index.primary;
    let unique = match index.unique {
        Some(unique) => quote!(::core::option::Option::Some(#unique)),
        None => quote!(::core::option::Option::None)
    };
    let kind = format_ident!("{}", index.kind.variant());

    quote! {
        #krate::schema::IndexDefinition {
            name: #name,
            primary: #primary,
            unique: #unique,
            kind: #krate::schema::IndexKind::#kind,
        }
    }
}
