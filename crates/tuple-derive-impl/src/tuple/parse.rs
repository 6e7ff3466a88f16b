// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for `#[derive(Tuple)]`.
//!
//! ```text
//! parse.rs
//! ├── attrs.rs  - #[tuple(...)] via darling, index declarations
//! ├── field.rs  - #[field(...)] and #[index(...)] on fields
//! └── def.rs    - TupleDef: parsed and validated entity
//! ```

mod attrs;
mod def;
mod field;
#[cfg(test)]
mod tests;

pub use attrs::{IndexAttr, IndexKind};
pub use def::TupleDef;
pub use field::FieldDef;
