// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tests for tuple parsing and expansion-time validation.
//!
//! # Test Categories
//!
//! | Category | Tests | Coverage |
//! |----------|-------|----------|
//! | Defaults | `default_crate_is_tuple_derive`, `hint_and_part_default_to_one` | Default values |
//! | Ordering | `ordered_fields_are_stable` | Position hints |
//! | Shape | `rejects_*_structs`, `rejects_generics` | Struct forms |
//! | Schema rules | `reports_*` | One test per diagnostic |
//!
//! # Test Methodology
//!
//! Tests use `syn::parse_quote!` to create struct definitions with attributes,
//! then either inspect the parsed [`TupleDef`] or collect the diagnostic
//! messages:
//!
//! ```rust,ignore
//! let input: DeriveInput = syn::parse_quote! {
//!     #[tuple(space = "users", index(name = "primary", primary))]
//!     struct User {
//!         #[index(name = "primary", nullable)]
//!         id: Option<u64>,
//!     }
//! };
//! assert!(errors(&input).iter().any(|m| m.contains("cannot be nullable")));
//! ```

use syn::DeriveInput;

use super::{IndexKind, TupleDef, attrs::default_crate_path};

fn errors(input: &DeriveInput) -> Vec<String> {
    match TupleDef::from_derive_input(input) {
        Ok(_) => Vec::new(),
        Err(err) => err.into_iter().map(|e| e.to_string()).collect()
    }
}

fn assert_reports(input: &DeriveInput, needle: &str) {
    let messages = errors(input);
    assert!(
        messages.iter().any(|m| m.contains(needle)),
        "expected `{needle}` in {messages:?}"
    );
}

#[test]
fn default_crate_is_tuple_derive() {
    let path = default_crate_path();
    assert_eq!(quote::quote!(#path).to_string(), ":: tuple_derive");
}

#[test]
fn parses_full_definition() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(
            space = "users",
            index(name = "primary", primary),
            index(name = "by_email", unique, kind = "hash"),
            index(name = "by_age")
        )]
        pub struct User {
            #[index(name = "primary")]
            pub id: u64,
            #[field(position = 2)]
            #[index(name = "by_email")]
            pub email: String,
            #[field(position = 3)]
            #[index(name = "by_age", nullable)]
            pub age: Option<u8>,
        }
    };
    let tuple = TupleDef::from_derive_input(&input).unwrap();
    assert_eq!(tuple.name_str(), "User");
    assert_eq!(tuple.space, "users");
    assert_eq!(tuple.indexes.len(), 3);
    assert!(tuple.indexes[0].primary);
    assert!(tuple.indexes[0].is_unique());
    assert_eq!(tuple.indexes[1].unique, Some(true));
    assert_eq!(tuple.indexes[1].kind, IndexKind::Hash);
    assert!(!tuple.indexes[2].is_unique());
    assert_eq!(tuple.fields[2].type_name(), "Option<u8>");
    assert!(tuple.fields[2].member_of("by_age").unwrap().nullable);
}

#[test]
fn hint_and_part_default_to_one() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "users", index(name = "primary", primary))]
        struct User {
            #[field(position = 0)]
            #[index(name = "primary", part = 0)]
            id: u64,
            name: String,
        }
    };
    let tuple = TupleDef::from_derive_input(&input).unwrap();
    assert_eq!(tuple.fields[0].position, Some(0));
    assert_eq!(tuple.fields[0].position_hint(), 1);
    assert_eq!(tuple.fields[1].position_hint(), 1);
    assert_eq!(tuple.fields[0].members[0].part, 1);
}

#[test]
fn ordered_fields_are_stable() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "primary", primary))]
        struct Item {
            #[field(position = 2)]
            c: u8,
            a: u8,
            #[field(position = 2)]
            d: u8,
            #[index(name = "primary")]
            b: u8,
            #[field(skip)]
            e: u8,
        }
    };
    let tuple = TupleDef::from_derive_input(&input).unwrap();
    let names: Vec<_> = tuple.ordered_fields().iter().map(|f| f.name_str()).collect();
    assert_eq!(names, ["a", "b", "c", "d"]);
    assert_eq!(tuple.skipped_fields().count(), 1);
}

#[test]
fn parts_follow_part_numbers() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "members", index(name = "primary", primary))]
        struct Member {
            #[index(name = "primary", part = 2)]
            name: String,
            #[index(name = "primary", part = 1)]
            tenant: u32,
        }
    };
    let tuple = TupleDef::from_derive_input(&input).unwrap();
    let parts: Vec<_> = tuple.parts_of("primary").iter().map(|f| f.name_str()).collect();
    assert_eq!(parts, ["tenant", "name"]);
}

#[test]
fn raw_identifiers_lose_prefix() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "primary", primary))]
        struct Item {
            #[index(name = "primary")]
            r#type: u8,
        }
    };
    let tuple = TupleDef::from_derive_input(&input).unwrap();
    assert_eq!(tuple.fields[0].name_str(), "type");
}

#[test]
fn rejects_tuple_structs() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "primary", primary))]
        struct Item(u64);
    };
    assert!(TupleDef::from_derive_input(&input).is_err());
}

#[test]
fn rejects_enums() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "primary", primary))]
        enum Item { A, B }
    };
    assert!(TupleDef::from_derive_input(&input).is_err());
}

#[test]
fn rejects_generics() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "primary", primary))]
        struct Item<T> {
            #[index(name = "primary")]
            id: T,
        }
    };
    assert_reports(&input, "generic");
}

#[test]
fn requires_space() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(index(name = "primary", primary))]
        struct Item {
            #[index(name = "primary")]
            id: u64,
        }
    };
    assert!(TupleDef::from_derive_input(&input).is_err());
}

#[test]
fn rejects_unknown_index_kind() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "primary", primary, kind = "btree"))]
        struct Item {
            #[index(name = "primary")]
            id: u64,
        }
    };
    assert!(TupleDef::from_derive_input(&input).is_err());
}

#[test]
fn rejects_unknown_field_option() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "primary", primary))]
        struct Item {
            #[index(name = "primary")]
            #[field(transient)]
            id: u64,
        }
    };
    assert_reports(&input, "expected `position = N` or `skip`");
}

#[test]
fn index_requires_name() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "primary", primary))]
        struct Item {
            #[index(part = 1)]
            id: u64,
        }
    };
    assert_reports(&input, "requires `name");
}

#[test]
fn reports_no_mapped_fields() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "primary", primary))]
        struct Item {
            #[field(skip)]
            id: u64,
        }
    };
    assert_reports(&input, "has no mapped fields");
}

#[test]
fn reports_skipped_member() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "primary", primary))]
        struct Item {
            #[index(name = "primary")]
            id: u64,
            #[field(skip)]
            #[index(name = "primary", part = 2)]
            cache: u64,
        }
    };
    assert_reports(&input, "skipped field `cache`");
}

#[test]
fn reports_duplicate_part() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "primary", primary))]
        struct Item {
            #[index(name = "primary")]
            a: u64,
            #[index(name = "primary", part = 1)]
            b: u64,
        }
    };
    assert_reports(&input, "part 1 is claimed by both `a` and `b`");
}

#[test]
fn reports_no_indexed_fields() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "primary", primary))]
        struct Item {
            id: u64,
        }
    };
    assert_reports(&input, "has no field marked with #[index(...)]");
}

#[test]
fn reports_empty_space() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "", index(name = "primary", primary))]
        struct Item {
            #[index(name = "primary")]
            id: u64,
        }
    };
    assert_reports(&input, "space name must not be empty");
}

#[test]
fn reports_missing_declarations() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items")]
        struct Item {
            #[index(name = "primary")]
            id: u64,
        }
    };
    assert_reports(&input, "declares no indexes");
}

#[test]
fn reports_duplicate_declaration() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(
            space = "items",
            index(name = "primary", primary),
            index(name = "primary")
        )]
        struct Item {
            #[index(name = "primary")]
            id: u64,
        }
    };
    assert_reports(&input, "index `primary` is declared twice");
}

#[test]
fn reports_declared_index_without_members() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(
            space = "items",
            index(name = "primary", primary),
            index(name = "by_name")
        )]
        struct Item {
            #[index(name = "primary")]
            id: u64,
            name: String,
        }
    };
    assert_reports(&input, "index `by_name` has no member fields");
}

#[test]
fn reports_undeclared_membership() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "primary", primary))]
        struct Item {
            #[index(name = "primary")]
            id: u64,
            #[index(name = "by_name")]
            name: String,
        }
    };
    assert_reports(&input, "index `by_name` is not declared");
}

#[test]
fn reports_missing_primary() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "by_id"))]
        struct Item {
            #[index(name = "by_id")]
            id: u64,
        }
    };
    assert_reports(&input, "has no primary index");
}

#[test]
fn reports_multiple_primary() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(
            space = "items",
            index(name = "primary", primary),
            index(name = "by_name", primary)
        )]
        struct Item {
            #[index(name = "primary")]
            id: u64,
            #[index(name = "by_name")]
            name: String,
        }
    };
    assert_reports(&input, "`primary` and `by_name` are both marked primary");
}

#[test]
fn reports_nullable_primary_part() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "items", index(name = "primary", primary))]
        struct Item {
            #[index(name = "primary", nullable)]
            id: Option<u64>,
        }
    };
    assert_reports(&input, "primary index part `id` cannot be nullable");
}

#[test]
fn reports_colliding_query_names() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(
            space = "users",
            index(name = "primary", primary),
            index(name = "by_name"),
            index(name = "name")
        )]
        struct User {
            #[index(name = "primary")]
            id: u64,
            #[index(name = "by_name")]
            #[index(name = "name")]
            name: String,
        }
    };
    assert_reports(&input, "indexes `by_name` and `name` both generate `get_by_name`");
    assert_eq!(errors(&input).len(), 1);
}

#[test]
fn by_prefix_alone_does_not_collide() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(
            space = "users",
            index(name = "primary", primary),
            index(name = "by_email"),
            index(name = "email_domain")
        )]
        struct User {
            #[index(name = "primary")]
            id: u64,
            #[index(name = "by_email")]
            email: String,
            #[index(name = "email_domain")]
            domain: String,
        }
    };
    assert!(errors(&input).is_empty());
}

#[test]
fn collects_every_violation() {
    let input: DeriveInput = syn::parse_quote! {
        #[tuple(space = "", index(name = "primary", primary))]
        struct Item {
            #[index(name = "primary", nullable)]
            id: Option<u64>,
            #[index(name = "elsewhere")]
            name: String,
        }
    };
    assert_eq!(errors(&input).len(), 3);
}
