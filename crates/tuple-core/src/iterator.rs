// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Select iterator modes.

/// How a select walks an index relative to the key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IteratorType {
    /// Keys equal to the key.
    #[default]
    Eq,
    /// Keys equal to the key, in reverse order.
    Req,
    /// Keys greater than the key.
    Gt,
    /// Keys greater than or equal to the key.
    Ge,
    /// Every tuple; the key is ignored.
    All,
    /// Keys less than the key, descending.
    Lt,
    /// Keys less than or equal to the key, descending.
    Le,
    /// Bitset: all bits of the key are set.
    BitsAllSet,
    /// Bitset: any bit of the key is set.
    BitsAnySet,
    /// Bitset: no bit of the key is set.
    BitsAllNotSet,
    /// R-tree: rectangles overlapping the key.
    Overlaps,
    /// R-tree: nearest neighbours of the key.
    Neighbor
}

impl IteratorType {
    /// Numeric code used on the wire.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Eq => 0,
            Self::Req => 1,
            Self::Gt => 2,
            Self::Ge => 3,
            Self::All => 4,
            Self::Lt => 5,
            Self::Le => 6,
            Self::BitsAllSet => 7,
            Self::BitsAnySet => 8,
            Self::BitsAllNotSet => 9,
            Self::Overlaps => 10,
            Self::Neighbor => 11
        }
    }

    /// Mode for a wire code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Eq,
            1 => Self::Req,
            2 => Self::Gt,
            3 => Self::Ge,
            4 => Self::All,
            5 => Self::Lt,
            6 => Self::Le,
            7 => Self::BitsAllSet,
            8 => Self::BitsAnySet,
            9 => Self::BitsAllNotSet,
            10 => Self::Overlaps,
            11 => Self::Neighbor,
            _ => return None
        })
    }

    /// Whether results come out in descending key order.
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::Req | Self::Lt | Self::Le)
    }
}
