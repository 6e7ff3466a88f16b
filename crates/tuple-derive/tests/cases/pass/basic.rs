// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Minimal entity: one primary index, no hints.

use tuple_derive::{Space, Tuple};

#[derive(Debug, Clone, PartialEq, Tuple)]
#[tuple(space = "users", index(name = "primary", primary))]
pub struct User {
    #[index(name = "primary")]
    pub id: u64,

    pub name: String,
}

fn main() {
    fn _check_trait<T: UserQueries<()>>() {}
    _check_trait::<Space<User, ()>>();

    let user = User {
        id:   1,
        name: "Ada".into(),
    };
    let row = <User as tuple_derive::Tuple>::to_tuple(&user);
    assert_eq!(row.len(), 2);
}
