// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use tuple_derive::Tuple;

#[derive(Tuple)]
#[tuple(
    space = "users",
    index(name = "primary", primary),
    index(name = "by_name"),
    index(name = "name")
)]
pub struct User {
    #[index(name = "primary")]
    pub id: u64,

    #[index(name = "by_name")]
    #[index(name = "name")]
    pub name: String,
}

fn main() {}
