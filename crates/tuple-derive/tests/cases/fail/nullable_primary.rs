// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use tuple_derive::Tuple;

#[derive(Tuple)]
#[tuple(space = "codes", index(name = "primary", primary))]
pub struct Code {
    #[index(name = "primary", nullable)]
    pub id: Option<u64>,
}

fn main() {}
