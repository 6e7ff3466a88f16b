// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

// Re-export derive macro
// Re-export all core types
pub use tuple_core::*;
pub use tuple_derive_impl::Tuple;

/// Convenient re-exports, including the derive.
///
/// ```rust,ignore
/// use tuple_derive::prelude::*;
/// ```
pub mod prelude {
    pub use tuple_core::prelude::*;
    pub use tuple_derive_impl::Tuple;
}
