// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use tuple_derive::Tuple;

#[derive(Tuple)]
#[tuple(space = "notes", index(name = "primary", primary))]
pub struct Note {
    #[index(name = "primary")]
    pub id: u64,

    #[index(name = "by_title")]
    pub title: String,
}

fn main() {}
