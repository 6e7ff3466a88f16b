// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use tuple_derive::Tuple;

#[derive(Tuple)]
#[tuple(
    space = "pairs",
    index(name = "left", primary),
    index(name = "right", primary)
)]
pub struct Pair {
    #[index(name = "left")]
    pub left: u64,

    #[index(name = "right")]
    pub right: u64,
}

fn main() {}
