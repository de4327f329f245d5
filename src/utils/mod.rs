/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Collection of common functions we use throughout the codebase

use crate::error::{BitstreamError, Result};

/// Return the lowest `n_bits` of `value`.
///
/// ### Example
/// ```
/// use bitflow::utils::get_lowest_bits;
///
/// assert_eq!(get_lowest_bits(0b1011_0110_1010_1101_u32, 0), 0);
/// assert_eq!(get_lowest_bits(0b1011_0110_1010_1101_u32, 1), 0b1);
/// assert_eq!(get_lowest_bits(0b1011_0110_1010_1101_u32, 4), 0b1101);
/// assert_eq!(get_lowest_bits(0b1011_0110_1010_1101_u32, 6), 0b10_1101);
/// assert_eq!(get_lowest_bits(u32::MAX, 32), u32::MAX);
/// ```
#[inline(always)]
#[must_use]
pub fn get_lowest_bits(value: u32, n_bits: u32) -> u32 {
    debug_assert!(n_bits <= u32::BITS);
    value & u32::MAX.checked_shr(u32::BITS - n_bits).unwrap_or(0)
}

/// Return the lowest `bit_count` bits of `value` in binary, zero padded.
///
/// ```
/// use bitflow::utils::to_bin_string;
///
/// assert_eq!(to_bin_string(0b101, 8), "00000101");
/// assert_eq!(to_bin_string(0xFFFF, 4), "1111");
/// assert_eq!(to_bin_string(1, 0), "");
/// ```
#[must_use]
pub fn to_bin_string(value: u32, bit_count: u32) -> String {
    if bit_count == 0 {
        return String::new();
    }
    format!(
        "{:0width$b}",
        get_lowest_bits(value, bit_count),
        width = bit_count as usize
    )
}

/// Return `value` in hexadecimal (one digit each four bits, at least two)
/// and in binary, in the form `[A5, 10100101]`.
///
/// ```
/// use bitflow::utils::to_hex_bin_string;
///
/// assert_eq!(to_hex_bin_string(0xA5, 8), "[A5, 10100101]");
/// assert_eq!(to_hex_bin_string(0x1234, 16), "[1234, 0001001000110100]");
/// ```
#[must_use]
pub fn to_hex_bin_string(value: u32, bit_count: u32) -> String {
    let nibbles = if bit_count == 0 {
        2
    } else {
        bit_count.div_ceil(4) as usize
    };
    format!(
        "[{:0nibbles$X}, {}]",
        value,
        to_bin_string(value, bit_count),
        nibbles = nibbles
    )
}

/// Check that `buffer` can hold `width` bytes starting at `offset`.
///
/// # Errors
/// [`BitstreamError::OutOfBounds`] if it cannot, including when
/// `offset + width` overflows.
#[inline]
pub fn check_bounds(buffer: &[u8], offset: usize, width: usize) -> Result<()> {
    match offset.checked_add(width) {
        Some(end) if end <= buffer.len() => Ok(()),
        _ => Err(BitstreamError::OutOfBounds {
            len: buffer.len(),
            offset,
            width,
        }),
    }
}
