// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use tuple_derive::Tuple;

#[derive(Tuple)]
#[tuple(space = "logs", index(name = "primary", primary))]
pub struct Log {
    pub line: String,
}

fn main() {}
