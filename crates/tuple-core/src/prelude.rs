// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tuple_core::prelude::*;
//! ```

pub use crate::{
    AsyncTransport, EntitySchema, Error, FromValue, IteratorType, MemoryStore, Operator, Page, Row,
    SchemaError, Space, ToValue, Transport, Tuple, UpdateOp, Value, async_trait
};
