// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema extraction and validation.
//!
//! Rules run in a fixed order and the first violation wins:
//!
//! 1. at least one mapped field
//! 2. positions: stable sort on the hint, then 0-based numbering
//! 3. memberships grouped per index and sorted by part, no repeated part
//! 4. at least one indexed field
//! 5. non-empty space name, at least one index, index names non-empty and
//!    unique
//! 6. declared index names equal membership index names
//! 7. exactly one primary index
//! 8. no nullable part in the primary index

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::{debug, warn};

use super::{
    EntitySchema, FieldDescriptor, IndexDescriptor, IndexMembership, IndexPartDescriptor,
    TupleDefinition
};
use crate::error::SchemaError;

type Parts = BTreeMap<&'static str, Vec<IndexPartDescriptor>>;

impl EntitySchema {
    /// Validate a definition and resolve it into a schema.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found.
    pub fn extract(definition: &TupleDefinition) -> Result<Self, SchemaError> {
        let result = build(definition);
        match &result {
            Ok(schema) => debug!(
                entity = schema.name,
                space = schema.space,
                fields = schema.fields.len(),
                indexes = schema.indexes.len(),
                primary = schema.primary().name,
                "schema extracted"
            ),
            Err(err) => warn!(entity = definition.name, error = %err, "schema rejected")
        }
        result
    }
}

fn build(definition: &TupleDefinition) -> Result<EntitySchema, SchemaError> {
    let entity = definition.name;
    if definition.fields.is_empty() {
        return Err(SchemaError::NoFields { entity });
    }

    let fields = resolve_fields(definition);
    let mut parts = collect_parts(entity, &fields)?;
    if parts.is_empty() {
        return Err(SchemaError::NoIndexedFields { entity });
    }

    check_declarations(definition)?;
    check_names(definition, &parts)?;
    let primary = find_primary(definition)?;

    let indexes: Vec<IndexDescriptor> = definition
        .indexes
        .iter()
        .map(|decl| IndexDescriptor {
            name:    decl.name,
            primary: decl.primary,
            unique:  decl.unique.unwrap_or(decl.primary),
            kind:    decl.kind,
            parts:   parts.remove(decl.name).unwrap_or_default()
        })
        .collect();

    if let Some(part) = indexes[primary].parts.iter().find(|p| p.nullable) {
        return Err(SchemaError::NullablePrimaryPart {
            entity,
            index: part.index,
            field: part.field
        });
    }

    Ok(EntitySchema {
        name: entity,
        space: definition.space,
        fields,
        indexes,
        primary
    })
}

fn resolve_fields(definition: &TupleDefinition) -> Vec<FieldDescriptor> {
    let mut ordered: Vec<_> = definition.fields.iter().collect();
    ordered.sort_by_key(|field| field.position.max(1));

    ordered
        .into_iter()
        .enumerate()
        .map(|(position, field)| FieldDescriptor {
            name: field.name,
            ty: field.ty,
            hint: field.position,
            position,
            memberships: field
                .indexes
                .iter()
                .map(|m| IndexMembership {
                    part: m.part.max(1),
                    ..*m
                })
                .collect()
        })
        .collect()
}

fn collect_parts(entity: &'static str, fields: &[FieldDescriptor]) -> Result<Parts, SchemaError> {
    let mut parts = Parts::new();
    for field in fields {
        for membership in &field.memberships {
            parts
                .entry(membership.index)
                .or_default()
                .push(IndexPartDescriptor {
                    index:    membership.index,
                    part:     membership.part,
                    field:    field.name,
                    position: field.position,
                    nullable: membership.nullable
                });
        }
    }

    for (index, group) in &mut parts {
        group.sort_by_key(|p| p.part);
        if let Some(pair) = group.windows(2).find(|w| w[0].part == w[1].part) {
            return Err(SchemaError::DuplicatePart {
                entity,
                index: *index,
                field: pair[1].field,
                part: pair[1].part
            });
        }
    }
    Ok(parts)
}

fn check_declarations(definition: &TupleDefinition) -> Result<(), SchemaError> {
    let entity = definition.name;
    if definition.space.is_empty() {
        return Err(SchemaError::EmptySpaceName { entity });
    }
    if definition.indexes.is_empty() {
        return Err(SchemaError::NoIndexes { entity });
    }

    let mut seen = HashSet::new();
    for decl in definition.indexes {
        if decl.name.is_empty() {
            return Err(SchemaError::EmptyIndexName { entity });
        }
        if !seen.insert(decl.name) {
            return Err(SchemaError::DuplicateIndex {
                entity,
                index: decl.name
            });
        }
    }
    Ok(())
}

fn check_names(definition: &TupleDefinition, parts: &Parts) -> Result<(), SchemaError> {
    let declared: BTreeSet<_> = definition.indexes.iter().map(|d| d.name).collect();
    let used: BTreeSet<_> = parts.keys().copied().collect();
    let names: Vec<_> = declared.symmetric_difference(&used).copied().collect();

    if names.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::IndexMismatch {
            entity: definition.name,
            names
        })
    }
}

fn find_primary(definition: &TupleDefinition) -> Result<usize, SchemaError> {
    let entity = definition.name;
    let mut primaries = definition
        .indexes
        .iter()
        .enumerate()
        .filter(|(_, decl)| decl.primary);

    match (primaries.next(), primaries.next()) {
        (None, _) => Err(SchemaError::MissingPrimary { entity }),
        (Some((i, _)), None) => Ok(i),
        (Some((_, first)), Some((_, second))) => Err(SchemaError::MultiplePrimary {
            entity,
            first: first.name,
            second: second.name
        })
    }
}
