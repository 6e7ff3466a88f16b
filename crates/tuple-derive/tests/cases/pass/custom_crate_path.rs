// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime crate reached through a re-export.

mod mapping {
    pub use tuple_derive::*;
}

use mapping::Tuple;

#[derive(Tuple)]
#[tuple(
    space = "events",
    crate = "crate::mapping",
    index(name = "primary", primary)
)]
struct Event {
    #[index(name = "primary")]
    id: u64,
}

fn main() {
    let schema = Event::schema().unwrap();
    assert_eq!(schema.space(), "events");
}
