// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `impl Tuple` generation.
//!
//! # Generated Code
//!
//! ```rust,ignore
//! impl ::tuple_derive::codec::Tuple for User {
//!     fn definition() -> &'static TupleDefinition {
//!         static DEFINITION: TupleDefinition = TupleDefinition { ... };
//!         &DEFINITION
//!     }
//!
//!     fn schema() -> Result<&'static EntitySchema, SchemaError> {
//!         static SCHEMA: SchemaCell = SchemaCell::new();
//!         SCHEMA.get_or_extract(Self::definition())
//!     }
//!
//!     fn to_tuple(&self) -> Row {
//!         vec![ToValue::to_value(&self.id), ToValue::to_value(&self.name)]
//!     }
//!
//!     fn from_tuple(row: Row) -> Result<Self, DecodeError> {
//!         let mut reader = TupleReader::new("User", row);
//!         Ok(Self {
//!             id: reader.field("id")?,
//!             name: reader.field("name")?,
//!             cache: Default::default(),
//!         })
//!     }
//! }
//! ```
//!
//! Struct literal fields evaluate in source order, so `from_tuple` lists
//! mapped fields in output-position order and the reader advances in step.

use proc_macro2::TokenStream;
use quote::quote;

use super::{definition, parse::TupleDef};

pub fn generate(tuple: &TupleDef) -> TokenStream {
    let krate = &tuple.krate;
    let ident = &tuple.ident;
    let name = tuple.name_str();
    let definition = definition::generate(tuple);

    let ordered = tuple.ordered_fields();
    let encoded = ordered.iter().map(|f| {
        let field = f.name();
        quote!(#krate::value::ToValue::to_value(&self.#field))
    });
    let decoded = ordered.iter().map(|f| {
        let field = f.name();
        let field_name = f.name_str();
        quote!(#field: reader.field(#field_name)?)
    });
    let defaulted = tuple.skipped_fields().map(|f| {
        let field = f.name();
        quote!(#field: ::core::default::Default::default())
    });

    quote! {
        #[automatically_derived]
        impl #krate::codec::Tuple for #ident {
            fn definition() -> &'static #krate::schema::TupleDefinition {
                #definition
                &DEFINITION
            }

            fn schema() -> ::core::result::Result<
                &'static #krate::schema::EntitySchema,
                #krate::error::SchemaError
            > {
                static SCHEMA: #krate::codec::SchemaCell = #krate::codec::SchemaCell::new();
                SCHEMA.get_or_extract(Self::definition())
            }

            fn to_tuple(&self) -> #krate::value::Row {
                ::std::vec![#(#encoded),*]
            }

            fn from_tuple(
                row: #krate::value::Row
            ) -> ::core::result::Result<Self, #krate::error::DecodeError> {
                let mut reader = #krate::codec::TupleReader::new(#name, row);
                ::core::result::Result::Ok(Self {
                    #(#decoded,)*
                    #(#defaulted,)*
                })
            }
        }
    }
}
