/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Orders and directions, chosen at runtime.
//!
//! Differently from a stream with a fixed bit order, a
//! [`Bitstream`](crate::bitstream::Bitstream) takes the bit order as an
//! argument of every call, so these are plain enums instead of marker types.

use core::fmt::{Display, Formatter};

/// The order in which bits are extracted from or inserted into a byte.
///
/// The byte `0b1011_0010` read one bit at a time yields
/// `1, 0, 1, 1, 0, 0, 1, 0` in [`M2L`](BitOrder::M2L) order and
/// `0, 1, 0, 0, 1, 1, 0, 1` in [`L2M`](BitOrder::L2M) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum BitOrder {
    /// From the most significant bit to the least significant one.
    #[default]
    M2L,
    /// From the least significant bit to the most significant one.
    L2M,
}

impl BitOrder {
    /// Return whether this is [`BitOrder::M2L`].
    #[inline(always)]
    #[must_use]
    pub fn is_msb_first(self) -> bool {
        self == Self::M2L
    }
}

/// The order of bytes in multi-byte integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum ByteOrder {
    /// Most significant byte first.
    #[default]
    BigEndian,
    /// Least significant byte first.
    LittleEndian,
}

/// Whether a [`Bitstream`](crate::bitstream::Bitstream) reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Input => "input",
            Self::Output => "output",
        })
    }
}
