// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for schema extraction, decoding and operations.
//!
//! # Layers
//!
//! ```text
//! EntitySchema::extract ──► SchemaError      (construction time)
//! Tuple::from_tuple     ──► DecodeError      (wraps ValueError)
//! Space::select_by      ──► UnknownIndex     (operation input)
//! run_sync / run_async  ──► Error<E>         (any of the above, or E)
//! ```
//!
//! `E` is the transport's own error type. It passes through
//! [`Error::Transport`] unchanged, so callers can still match on it.

use crate::value::ValueError;

/// Violation found while building an [`EntitySchema`](crate::EntitySchema).
///
/// Extraction stops at the first violation. Every variant names the entity
/// and, where it applies, the offending field or index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// No mapped fields.
    #[error("{entity}: entity must map at least one field")]
    NoFields {
        /// Entity type name.
        entity: &'static str
    },

    /// No field is a member of any index.
    #[error("{entity}: entity must have at least one indexed field")]
    NoIndexedFields {
        /// Entity type name.
        entity: &'static str
    },

    /// Space name is empty.
    #[error("{entity}: space name should not be empty")]
    EmptySpaceName {
        /// Entity type name.
        entity: &'static str
    },

    /// Fields declare memberships but no index is declared.
    #[error("{entity}: at least one index must be declared")]
    NoIndexes {
        /// Entity type name.
        entity: &'static str
    },

    /// An index declaration has an empty name.
    #[error("{entity}: index name should not be empty")]
    EmptyIndexName {
        /// Entity type name.
        entity: &'static str
    },

    /// Two index declarations share a name.
    #[error("{entity}: index names should be unique, `{index}` is declared twice")]
    DuplicateIndex {
        /// Entity type name.
        entity: &'static str,
        /// Repeated index name.
        index:  &'static str
    },

    /// Two fields claim the same part number of one index.
    #[error("{entity}: field `{field}` repeats part {part} of index `{index}`")]
    DuplicatePart {
        /// Entity type name.
        entity: &'static str,
        /// Index name.
        index:  &'static str,
        /// Field declaring the repeated part.
        field:  &'static str,
        /// Repeated part number.
        part:   u32
    },

    /// Declared indexes and field memberships name different indexes.
    #[error(
        "{entity}: index names in field memberships and index declarations must correspond to each other: {}",
        .names.join(", ")
    )]
    IndexMismatch {
        /// Entity type name.
        entity: &'static str,
        /// Names present on exactly one side.
        names:  Vec<&'static str>
    },

    /// No index is flagged primary.
    #[error("{entity}: entity does not have a primary index")]
    MissingPrimary {
        /// Entity type name.
        entity: &'static str
    },

    /// More than one index is flagged primary.
    #[error("{entity}: only one index may be primary, found `{first}` and `{second}`")]
    MultiplePrimary {
        /// Entity type name.
        entity: &'static str,
        /// First primary index.
        first:  &'static str,
        /// Second primary index.
        second: &'static str
    },

    /// A primary index part is nullable.
    #[error("{entity}: primary index `{index}` can't have nullable field `{field}`")]
    NullablePrimaryPart {
        /// Entity type name.
        entity: &'static str,
        /// Primary index name.
        index:  &'static str,
        /// Nullable field.
        field:  &'static str
    }
}

impl SchemaError {
    /// Entity type the violation belongs to.
    #[must_use]
    pub const fn entity(&self) -> &'static str {
        match self {
            Self::NoFields { entity }
            | Self::NoIndexedFields { entity }
            | Self::EmptySpaceName { entity }
            | Self::NoIndexes { entity }
            | Self::EmptyIndexName { entity }
            | Self::DuplicateIndex { entity, .. }
            | Self::DuplicatePart { entity, .. }
            | Self::IndexMismatch { entity, .. }
            | Self::MissingPrimary { entity }
            | Self::MultiplePrimary { entity, .. }
            | Self::NullablePrimaryPart { entity, .. } => entity
        }
    }
}

/// A stored value could not be converted into its entity field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity}.{field} at position {position}: {source}")]
pub struct DecodeError {
    /// Entity type name.
    pub entity:   &'static str,
    /// Field being decoded.
    pub field:    &'static str,
    /// Tuple position of the value.
    pub position: usize,
    /// Conversion failure.
    #[source]
    pub source:   ValueError
}

/// An operation named an index the entity does not declare.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} has no index named `{index}`")]
pub struct UnknownIndex {
    /// Entity type name.
    pub entity: &'static str,
    /// Requested index name.
    pub index:  String
}

/// Failure while extracting a key from an entity instance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// The entity schema is invalid.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The index is not declared.
    #[error(transparent)]
    UnknownIndex(#[from] UnknownIndex)
}

/// Error returned by running an operation.
///
/// # Type Parameters
///
/// - `E`: Transport error type
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// The entity schema is invalid.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The operation named an undeclared index.
    #[error(transparent)]
    UnknownIndex(#[from] UnknownIndex),

    /// A lookup key has more values than the index has parts.
    #[error("key for index `{index}` has {len} values but the index has {parts} parts")]
    KeyTooLong {
        /// Index name.
        index: String,
        /// Values supplied.
        len:   usize,
        /// Parts in the index.
        parts: usize
    },

    /// A returned row could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The transport failed.
    #[error(transparent)]
    Transport(E)
}

impl<E> From<KeyError> for Error<E> {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::Schema(e) => Self::Schema(e),
            KeyError::UnknownIndex(e) => Self::UnknownIndex(e)
        }
    }
}

impl<E> Error<E> {
    /// Check if the transport failed.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if a returned row failed to decode.
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Extract the transport error, if that is what this is.
    pub fn into_transport(self) -> Option<E> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn mismatch_lists_names() {
        let err = SchemaError::IndexMismatch {
            entity: "User",
            names:  vec!["by_email", "by_name"]
        };
        assert_eq!(
            err.to_string(),
            "User: index names in field memberships and index declarations must correspond to each \
             other: by_email, by_name"
        );
    }

    #[test]
    fn entity_is_reported_for_every_variant() {
        let err = SchemaError::NullablePrimaryPart {
            entity: "User",
            index:  "primary",
            field:  "id"
        };
        assert_eq!(err.entity(), "User");
        assert_eq!(SchemaError::NoFields { entity: "Empty" }.entity(), "Empty");
    }

    #[test]
    fn decode_error_keeps_source() {
        let err = DecodeError {
            entity:   "User",
            field:    "age",
            position: 2,
            source:   ValueError::Mismatch {
                expected: "integer",
                found:    "string"
            }
        };
        assert_eq!(
            err.to_string(),
            "User.age at position 2: expected integer, found string"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn transport_error_passes_through() {
        let err: Error<std::io::Error> = Error::Transport(std::io::Error::other("connection reset"));
        assert!(err.is_transport());
        assert!(!err.is_decode());
        assert_eq!(err.to_string(), "connection reset");
        assert_eq!(
            err.into_transport().map(|e| e.to_string()),
            Some("connection reset".to_string())
        );
    }

    #[test]
    fn key_error_converts() {
        let err: Error<std::io::Error> = KeyError::UnknownIndex(UnknownIndex {
            entity: "User",
            index:  "missing".into()
        })
        .into();
        assert_eq!(err.to_string(), "User has no index named `missing`");
    }
}
