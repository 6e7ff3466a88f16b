// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Transient fields and raw identifiers.

use std::collections::HashMap;

use tuple_derive::{Tuple, Value};

#[derive(Debug, Default, Tuple)]
#[tuple(space = "documents", index(name = "primary", primary))]
struct Document {
    #[index(name = "primary")]
    id: i64,

    r#type: String,

    meta: HashMap<String, i64>,

    #[field(skip)]
    rendered: Option<String>,
}

fn main() {
    let row = vec![Value::Int(1), Value::from("memo"), Value::Map(Vec::new())];
    let doc = Document::from_tuple(row).unwrap();
    assert_eq!(doc.r#type, "memo");
    assert!(doc.meta.is_empty());
    assert!(doc.rendered.is_none());
}
