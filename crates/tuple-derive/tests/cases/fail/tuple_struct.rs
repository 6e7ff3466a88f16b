// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use tuple_derive::Tuple;

#[derive(Tuple)]
#[tuple(space = "pairs", index(name = "primary", primary))]
pub struct Pair(u64, String);

fn main() {}
