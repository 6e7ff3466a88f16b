// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity metadata: static definitions and the validated schema.
//!
//! A [`TupleDefinition`] is what the entity author declares, usually emitted
//! by `#[derive(Tuple)]` as a `static`. [`EntitySchema::extract`] checks it
//! and resolves positions and index parts into an immutable [`EntitySchema`].
//!
//! # Structure
//!
//! ```text
//! EntitySchema
//! ├── fields: [FieldDescriptor]        0-based output positions
//! │   └── memberships: [IndexMembership]
//! ├── indexes: [IndexDescriptor]       declaration order
//! │   └── parts: [IndexPartDescriptor] ascending part number
//! └── primary                          exactly one
//! ```
//!
//! # Example
//!
//! ```rust
//! use tuple_core::schema::{
//!     EntitySchema, FieldDefinition, IndexDefinition, IndexKind, IndexMembership,
//!     TupleDefinition
//! };
//!
//! static USER: TupleDefinition = TupleDefinition {
//!     name:    "User",
//!     space:   "users",
//!     fields:  &[
//!         FieldDefinition {
//!             name:     "id",
//!             ty:       "u64",
//!             position: 1,
//!             indexes:  &[IndexMembership {
//!                 index:    "primary",
//!                 part:     1,
//!                 nullable: false
//!             }]
//!         },
//!         FieldDefinition {
//!             name:     "name",
//!             ty:       "String",
//!             position: 2,
//!             indexes:  &[]
//!         }
//!     ],
//!     indexes: &[IndexDefinition {
//!         name:    "primary",
//!         primary: true,
//!         unique:  None,
//!         kind:    IndexKind::Tree
//!     }]
//! };
//!
//! let schema = EntitySchema::extract(&USER).unwrap();
//! assert_eq!(schema.primary().name(), "primary");
//! assert_eq!(schema.field("name").unwrap().position(), 1);
//! ```

mod extract;

use crate::{
    diff::UpdateOp,
    error::UnknownIndex,
    value::{Row, Value}
};

/// Static entity metadata as declared by the author.
#[derive(Debug, Clone, Copy)]
pub struct TupleDefinition {
    /// Entity type name.
    pub name:    &'static str,
    /// Default space name.
    pub space:   &'static str,
    /// Mapped fields in declaration order.
    pub fields:  &'static [FieldDefinition],
    /// Index declarations.
    pub indexes: &'static [IndexDefinition]
}

/// One mapped field of a [`TupleDefinition`].
#[derive(Debug, Clone, Copy)]
pub struct FieldDefinition {
    /// Field name.
    pub name:     &'static str,
    /// Field type as written in the source.
    pub ty:       &'static str,
    /// Position hint; `0` means unset and sorts as `1`.
    pub position: u32,
    /// Index memberships of the field.
    pub indexes:  &'static [IndexMembership]
}

/// Membership of a field in a named index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexMembership {
    /// Index name.
    pub index:    &'static str,
    /// Part number inside the index; `0` is treated as `1`.
    pub part:     u32,
    /// Whether the part accepts `nil`.
    pub nullable: bool
}

/// Index declaration of a [`TupleDefinition`].
#[derive(Debug, Clone, Copy)]
pub struct IndexDefinition {
    /// Index name.
    pub name:    &'static str,
    /// Whether this is the primary index.
    pub primary: bool,
    /// Uniqueness; unset means unique only for the primary index.
    pub unique:  Option<bool>,
    /// Index structure in the store.
    pub kind:    IndexKind
}

/// Index structure in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// B+ tree, supports range iterators.
    #[default]
    Tree,
    /// Hash, equality only.
    Hash,
    /// Bitset.
    Bitset,
    /// R-tree for spatial data.
    Rtree
}

impl IndexKind {
    /// Name of the kind as the store spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Hash => "hash",
            Self::Bitset => "bitset",
            Self::Rtree => "rtree"
        }
    }
}

/// Validated, immutable mapping between an entity and its tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    name:    &'static str,
    space:   &'static str,
    fields:  Vec<FieldDescriptor>,
    indexes: Vec<IndexDescriptor>,
    primary: usize
}

/// Mapped field with its resolved tuple position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name:        &'static str,
    ty:          &'static str,
    hint:        u32,
    position:    usize,
    memberships: Vec<IndexMembership>
}

/// Index with its parts resolved to tuple positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescriptor {
    name:    &'static str,
    primary: bool,
    unique:  bool,
    kind:    IndexKind,
    parts:   Vec<IndexPartDescriptor>
}

/// One part of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexPartDescriptor {
    index:    &'static str,
    part:     u32,
    field:    &'static str,
    position: usize,
    nullable: bool
}

impl EntitySchema {
    /// Entity type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Default space name.
    #[must_use]
    pub const fn space(&self) -> &'static str {
        self.space
    }

    /// Fields in output position order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Indexes in declaration order.
    #[must_use]
    pub fn indexes(&self) -> &[IndexDescriptor] {
        &self.indexes
    }

    /// The primary index.
    #[must_use]
    pub fn primary(&self) -> &IndexDescriptor {
        &self.indexes[self.primary]
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up an index by name.
    #[must_use]
    pub fn index(&self, name: &str) -> Option<&IndexDescriptor> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// Look up an index by name, failing with [`UnknownIndex`].
    pub fn require_index(&self, name: &str) -> Result<&IndexDescriptor, UnknownIndex> {
        self.index(name).ok_or_else(|| UnknownIndex {
            entity: self.name,
            index:  name.to_owned()
        })
    }

    /// Read the key of `index` out of an encoded tuple.
    ///
    /// Parts are read in ascending part order. A part past the end of the
    /// tuple reads as [`Value::Nil`].
    pub fn extract_key(&self, tuple: &[Value], index: &str) -> Result<Vec<Value>, UnknownIndex> {
        Ok(self.require_index(index)?.key_of(tuple))
    }

    /// Read the primary key out of an encoded tuple.
    #[must_use]
    pub fn primary_key(&self, tuple: &[Value]) -> Vec<Value> {
        self.primary().key_of(tuple)
    }

    /// Assign every non-primary field of an encoded tuple.
    ///
    /// Positions of primary index parts are skipped; the rest appear in
    /// position order.
    #[must_use]
    pub fn build_diff(&self, tuple: &[Value]) -> Vec<UpdateOp> {
        let primary = self.primary().name;
        self.fields
            .iter()
            .filter(|field| !field.is_member_of(primary))
            .map(|field| {
                UpdateOp::assign(
                    field.position,
                    tuple.get(field.position).cloned().unwrap_or_default()
                )
            })
            .collect()
    }

    /// Number of mapped fields, i.e. the tuple width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.fields.len()
    }
}

impl FieldDescriptor {
    /// Field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Field type as written in the source.
    #[must_use]
    pub const fn ty(&self) -> &'static str {
        self.ty
    }

    /// Position hint as declared; `0` if unset.
    #[must_use]
    pub const fn hint(&self) -> u32 {
        self.hint
    }

    /// Resolved 0-based tuple position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Index memberships, parts normalised.
    #[must_use]
    pub fn memberships(&self) -> &[IndexMembership] {
        &self.memberships
    }

    /// Check membership in an index.
    #[must_use]
    pub fn is_member_of(&self, index: &str) -> bool {
        self.memberships.iter().any(|m| m.index == index)
    }
}

impl IndexDescriptor {
    /// Index name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this is the primary index.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        self.primary
    }

    /// Whether keys are unique.
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    /// Index structure.
    #[must_use]
    pub const fn kind(&self) -> IndexKind {
        self.kind
    }

    /// Parts in ascending part order.
    #[must_use]
    pub fn parts(&self) -> &[IndexPartDescriptor] {
        &self.parts
    }

    /// Tuple positions of the parts, in part order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.parts.iter().map(|p| p.position)
    }

    fn key_of(&self, tuple: &[Value]) -> Row {
        self.positions()
            .map(|position| tuple.get(position).cloned().unwrap_or_default())
            .collect()
    }
}

impl IndexPartDescriptor {
    /// Index the part belongs to.
    #[must_use]
    pub const fn index(&self) -> &'static str {
        self.index
    }

    /// Part number, starting at 1.
    #[must_use]
    pub const fn part(&self) -> u32 {
        self.part
    }

    /// Source field name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Tuple position of the source field.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Whether the part accepts `nil`.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }
}
