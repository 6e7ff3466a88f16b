// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Composite secondary index with a nullable part and a hash index.

use tuple_derive::prelude::*;

#[derive(Debug, Clone, PartialEq, Tuple)]
#[tuple(
    space = "members",
    index(name = "primary", primary),
    index(name = "by_tenant_nick", unique),
    index(name = "by_email", unique, kind = "hash")
)]
pub struct Member {
    #[field(position = 1)]
    #[index(name = "primary")]
    pub id: u64,

    #[field(position = 2)]
    #[index(name = "by_tenant_nick", part = 1)]
    pub tenant: u32,

    #[field(position = 3)]
    #[index(name = "by_tenant_nick", part = 2, nullable)]
    pub nick: Option<String>,

    #[field(position = 4)]
    #[index(name = "by_email")]
    pub email: String,
}

fn main() {
    let members: Space<Member, ()> = Space::new(()).unwrap();
    let get = members.get_by_tenant_nick(7, Some("ada".into()));
    assert_eq!(get.index(), "by_tenant_nick");
    let select = members.select_by_email("a@example.com".into());
    assert_eq!(select.key().len(), 1);
}
