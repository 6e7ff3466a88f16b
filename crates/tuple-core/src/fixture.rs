// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Hand-written entity shared by unit tests.

use crate::{
    codec::{SchemaCell, Tuple, TupleReader},
    error::{DecodeError, SchemaError},
    schema::{
        EntitySchema, FieldDefinition, IndexDefinition, IndexKind, IndexMembership,
        TupleDefinition
    },
    value::{Row, ToValue}
};

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id:      u64,
    pub email:   String,
    pub balance: i64,
    pub note:    Option<String>
}

impl Account {
    pub fn new(id: u64, email: &str, balance: i64) -> Self {
        Self {
            id,
            email: email.to_owned(),
            balance,
            note: None
        }
    }
}

static ACCOUNT: TupleDefinition = TupleDefinition {
    name:    "Account",
    space:   "accounts",
    fields:  &[
        FieldDefinition {
            name:     "id",
            ty:       "u64",
            position: 1,
            indexes:  &[IndexMembership {
                index:    "primary",
                part:     1,
                nullable: false
            }]
        },
        FieldDefinition {
            name:     "email",
            ty:       "String",
            position: 2,
            indexes:  &[IndexMembership {
                index:    "by_email",
                part:     1,
                nullable: false
            }]
        },
        FieldDefinition {
            name:     "balance",
            ty:       "i64",
            position: 3,
            indexes:  &[IndexMembership {
                index:    "by_balance",
                part:     1,
                nullable: false
            }]
        },
        FieldDefinition {
            name:     "note",
            ty:       "Option<String>",
            position: 4,
            indexes:  &[]
        }
    ],
    indexes: &[
        IndexDefinition {
            name:    "primary",
            primary: true,
            unique:  None,
            kind:    IndexKind::Tree
        },
        IndexDefinition {
            name:    "by_email",
            primary: false,
            unique:  Some(true),
            kind:    IndexKind::Hash
        },
        IndexDefinition {
            name:    "by_balance",
            primary: false,
            unique:  None,
            kind:    IndexKind::Tree
        }
    ]
};

impl Tuple for Account {
    fn definition() -> &'static TupleDefinition {
        &ACCOUNT
    }

    fn schema() -> Result<&'static EntitySchema, SchemaError> {
        static SCHEMA: SchemaCell = SchemaCell::new();
        SCHEMA.get_or_extract(&ACCOUNT)
    }

    fn to_tuple(&self) -> Row {
        vec![
            self.id.to_value(),
            self.email.to_value(),
            self.balance.to_value(),
            self.note.to_value(),
        ]
    }

    fn from_tuple(row: Row) -> Result<Self, DecodeError> {
        let mut reader = TupleReader::new("Account", row);
        Ok(Self {
            id:      reader.field("id")?,
            email:   reader.field("email")?,
            balance: reader.field("balance")?,
            note:    reader.field("note")?
        })
    }
}
