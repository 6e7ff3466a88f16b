// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Typed index queries.
//!
//! For every declared index the derive adds two methods to a
//! `{Name}Queries<C>` trait implemented for `Space<Name, C>`. Each method
//! takes the index parts as the fields' own types, in part order.
//!
//! | Index | Methods |
//! |-------|---------|
//! | `primary` | `get_by_primary(id)`, `select_by_primary(id)` |
//! | `by_email` | `get_by_email(email)`, `select_by_email(email)` |
//! | `tenant_name` | `get_by_tenant_name(tenant, name)`, ... |
//!
//! A leading `by_` in the index name is dropped from the method name.

use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::parse::{IndexAttr, TupleDef};

/// Method suffix for an index name.
pub(super) fn method_suffix(index: &str) -> String {
    let snake = index.to_case(Case::Snake);
    match snake.strip_prefix("by_") {
        Some(rest) if !rest.is_empty() => rest.to_owned(),
        _ => snake
    }
}

struct IndexMethods {
    signatures: TokenStream,
    bodies:     TokenStream
}

fn index_methods(tuple: &TupleDef, index: &IndexAttr) -> IndexMethods {
    let krate = &tuple.krate;
    let ident = &tuple.ident;
    let index_name = index.name.as_str();
    let suffix = method_suffix(index_name);
    let get = format_ident!("get_by_{}", suffix);
    let select = format_ident!("select_by_{}", suffix);

    let parts = tuple.parts_of(index_name);
    let args: Vec<_> = parts
        .iter()
        .map(|f| {
            let name = f.name();
            let ty = f.ty();
            quote!(#name: #ty)
        })
        .collect();
    let values: Vec<_> = parts
        .iter()
        .map(|f| {
            let name = f.name();
            quote!(#krate::value::ToValue::to_value(&#name))
        })
        .collect();

    let get_doc = format!("Fetch at most one `{ident}` through index `{index_name}`.");
    let select_doc = format!("Select `{ident}` entities through index `{index_name}`.");

    IndexMethods {
        signatures: quote! {
            #[doc = #get_doc]
            fn #get(&self, #(#args),*) -> #krate::operation::Get<'_, #ident, C>;

            #[doc = #select_doc]
            fn #select(&self, #(#args),*) -> #krate::operation::Select<'_, #ident, C>;
        },
        bodies:     quote! {
            fn #get(&self, #(#args),*) -> #krate::operation::Get<'_, #ident, C> {
                self.get(#index_name, ::std::vec![#(#values),*])
            }

            fn #select(&self, #(#args),*) -> #krate::operation::Select<'_, #ident, C> {
                self.select(#index_name, ::std::vec![#(#values),*])
            }
        }
    }
}

pub fn generate(tuple: &TupleDef) -> TokenStream {
    let krate = &tuple.krate;
    let ident = &tuple.ident;
    let vis = &tuple.vis;
    let trait_name = format_ident!("{}Queries", ident);
    let trait_doc = format!("Typed index lookups on a space of `{ident}`.");

    let (signatures, bodies): (Vec<_>, Vec<_>) = tuple
        .indexes
        .iter()
        .map(|index| {
            let methods = index_methods(tuple, index);
            (methods.signatures, methods.bodies)
        })
        .unzip();

    quote! {
        #[doc = #trait_doc]
        #vis trait #trait_name<C> {
            #(#signatures)*
        }

        #[automatically_derived]
        impl<C> #trait_name<C> for #krate::space::Space<#ident, C> {
            #(#bodies)*
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_drops_by_prefix() {
        assert_eq!(method_suffix("primary"), "primary");
        assert_eq!(method_suffix("by_email"), "email");
        assert_eq!(method_suffix("byEmail"), "email");
        assert_eq!(method_suffix("TenantName"), "tenant_name");
    }

    #[test]
    fn composite_arguments_follow_part_order() {
        let input: syn::DeriveInput = syn::parse_quote! {
            #[tuple(
                space = "members",
                index(name = "primary", primary),
                index(name = "by_tenant_name", unique)
            )]
            pub struct Member {
                #[index(name = "primary")]
                id: u64,
                #[index(name = "by_tenant_name", part = 2)]
                name: String,
                #[index(name = "by_tenant_name", part = 1)]
                tenant: u32,
            }
        };
        let out = generate(&TupleDef::from_derive_input(&input).unwrap()).to_string();
        assert!(out.contains("pub trait MemberQueries < C >"));
        assert!(out.contains("fn get_by_primary (& self , id : u64)"));
        assert!(out.contains("fn select_by_tenant_name (& self , tenant : u32 , name : String)"));
    }
}
