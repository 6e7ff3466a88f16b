// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema rules checked while the derive expands.
//!
//! These are the rules the runtime extractor applies, reported here with the
//! span of the offending attribute. All violations are collected, so one
//! compile shows every mistake.
//!
//! | Rule | Reported at |
//! |------|-------------|
//! | At least one mapped field | struct name |
//! | Skipped fields carry no `#[index]` | its `name = ...` |
//! | Part numbers unique within an index | the second `#[index]` name |
//! | At least one field is an index part | struct name |
//! | Space name not empty | `space = ...` |
//! | At least one index declared | struct name |
//! | Index names not empty and unique | `name = ...` |
//! | Every declared index has members | `name = ...` |
//! | Typed query names do not collide | the second `name = ...` |
//! | Every `#[index]` names a declared index | its `name = ...` |
//! | Exactly one primary index | struct name / second primary |
//! | No nullable primary part | its `name = ...` |

use std::collections::{BTreeMap, BTreeSet};

use proc_macro2::Span;

use super::{parse::TupleDef, queries::method_suffix};

fn error_at(span: Span, message: String) -> darling::Error {
    syn::Error::new(span, message).into()
}

pub fn check(def: &TupleDef) -> darling::Result<()> {
    let mut errors = darling::Error::accumulator();
    let entity = def.name_str();
    let entity_span = def.ident.span();
    let mapped = def.ordered_fields();

    if mapped.is_empty() {
        errors.push(error_at(entity_span, format!("`{entity}` has no mapped fields")));
        return errors.finish();
    }

    for field in def.skipped_fields() {
        for member in &field.members {
            errors.push(error_at(
                member.span,
                format!(
                    "skipped field `{}` cannot be part of index `{}`",
                    field.name_str(),
                    member.index
                )
            ));
        }
    }

    let mut parts: BTreeMap<&str, BTreeMap<u32, String>> = BTreeMap::new();
    for field in &mapped {
        for member in &field.members {
            let seen = parts.entry(member.index.as_str()).or_default();
            if let Some(first) = seen.get(&member.part) {
                errors.push(error_at(
                    member.span,
                    format!(
                        "index `{}` part {} is claimed by both `{first}` and `{}`",
                        member.index,
                        member.part,
                        field.name_str()
                    )
                ));
            } else {
                seen.insert(member.part, field.name_str());
            }
        }
    }

    if parts.is_empty() {
        errors.push(error_at(
            entity_span,
            format!("`{entity}` has no field marked with #[index(...)]")
        ));
    }

    if def.space.is_empty() {
        errors.push(error_at(def.space_span, "space name must not be empty".to_owned()));
    }

    if def.indexes.is_empty() {
        errors.push(error_at(
            entity_span,
            format!("`{entity}` declares no indexes; add #[tuple(index(name = \"...\", primary))]")
        ));
    }

    let mut declared = BTreeSet::new();
    for index in &def.indexes {
        let span = index.name.span();
        if index.name.is_empty() {
            errors.push(error_at(span, "index name must not be empty".to_owned()));
        } else if !declared.insert(index.name.as_str()) {
            errors.push(error_at(span, format!("index `{}` is declared twice", *index.name)));
        } else if !parts.contains_key(index.name.as_str()) {
            errors.push(error_at(
                span,
                format!("index `{}` has no member fields", *index.name)
            ));
        }
    }

    let mut suffixes: BTreeMap<String, &str> = BTreeMap::new();
    for index in def.indexes.iter().filter(|i| !i.name.is_empty()) {
        let name = index.name.as_str();
        let suffix = method_suffix(name);
        match suffixes.get(&suffix) {
            Some(&first) if first != name => errors.push(error_at(
                index.name.span(),
                format!(
                    "indexes `{first}` and `{name}` both generate `get_by_{suffix}`; rename one of them"
                )
            )),
            Some(_) => {}
            None => {
                suffixes.insert(suffix, name);
            }
        }
    }

    for field in &mapped {
        for member in &field.members {
            if !declared.contains(member.index.as_str()) {
                errors.push(error_at(
                    member.span,
                    format!("index `{}` is not declared in #[tuple(...)]", member.index)
                ));
            }
        }
    }

    let mut primaries = def.indexes.iter().filter(|i| i.primary);
    match primaries.next() {
        None if !def.indexes.is_empty() => errors.push(error_at(
            entity_span,
            format!("`{entity}` has no primary index")
        )),
        None => {}
        Some(first) => {
            for extra in primaries {
                errors.push(error_at(
                    extra.name.span(),
                    format!(
                        "`{}` and `{}` are both marked primary",
                        *first.name, *extra.name
                    )
                ));
            }
            for field in &mapped {
                if let Some(member) = field.member_of(first.name.as_str())
                    && member.nullable
                {
                    errors.push(error_at(
                        member.span,
                        format!(
                            "primary index part `{}` cannot be nullable",
                            field.name_str()
                        )
                    ));
                }
            }
        }
    }

    errors.finish()
}
