/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{BitCache, Bitstream};
use crate::error::{BitstreamError, Result};
use crate::traits::{BitOrder, ByteBackend};
use crate::utils::get_lowest_bits;

/// Largest number of bits [`Bitstream::read_bits31`] and
/// [`Bitstream::write_bits31`] can move at once.
pub const MAX_BITS: u32 = 31;

impl<B: ByteBackend> Bitstream<B> {
    /// Read one bit, or return `None` at end of stream.
    ///
    /// ### Example
    /// ```
    /// use bitflow::prelude::*;
    ///
    /// let data = [0b1000_0001];
    /// let mut bits = Bitstream::new(SliceBackend::new(&data), Direction::Input)?;
    /// assert_eq!(bits.read_bit(M2L)?, Some(true));
    /// assert_eq!(bits.read_bit(M2L)?, Some(false));
    /// let mut bits = Bitstream::new(SliceBackend::new(&data), Direction::Input)?;
    /// assert_eq!(bits.read_bit(L2M)?, Some(true));
    /// assert_eq!(bits.read_bits31(L2M, 7)?, Some(1));
    /// assert_eq!(bits.read_bit(L2M)?, None);
    /// # Ok::<(), BitstreamError>(())
    /// ```
    #[inline]
    pub fn read_bit(&mut self, order: BitOrder) -> Result<Option<bool>> {
        let (backend, cache) = self.input_parts()?;
        read_bit(backend, cache, order)
    }

    /// Write one bit.
    ///
    /// Return the cached byte the bit went into, or `None` if the bit
    /// completed a byte and the backend had no room for it.
    #[inline]
    pub fn write_bit(&mut self, order: BitOrder, bit: bool) -> Result<Option<u8>> {
        let (backend, cache) = self.output_parts()?;
        write_bit(backend, cache, order, bit)
    }

    /// Read `n` bits and return them as the lowest bits of an integer, the
    /// first bit read being the most significant one.
    ///
    /// If the end of stream is reached before `n` bits are read, `None` is
    /// returned and the bits read so far are lost.
    ///
    /// # Errors
    /// [`BitstreamError::TooManyBits`] if `n` is larger than 31.
    pub fn read_bits31(&mut self, order: BitOrder, n: u32) -> Result<Option<u32>> {
        if n > MAX_BITS {
            return Err(BitstreamError::TooManyBits(n));
        }
        let (backend, cache) = self.input_parts()?;
        match order {
            BitOrder::M2L if n != 0 => read_msb_first(backend, cache, n),
            _ => {
                let mut value = 0;
                for shift in (0..n).rev() {
                    match read_bit(backend, cache, order)? {
                        Some(bit) => value |= (bit as u32) << shift,
                        None => return Ok(None),
                    }
                }
                Ok(Some(value))
            }
        }
    }

    /// Write the lowest `n` bits of `bits`, the most significant one first.
    ///
    /// Return `bits`, or `None` if the backend ran out of room, in which case
    /// only part of the bits might have been written.
    ///
    /// # Errors
    /// [`BitstreamError::TooManyBits`] if `n` is larger than 31.
    pub fn write_bits31(&mut self, order: BitOrder, n: u32, bits: u32) -> Result<Option<u32>> {
        if n > MAX_BITS {
            return Err(BitstreamError::TooManyBits(n));
        }
        let (backend, cache) = self.output_parts()?;
        match order {
            BitOrder::M2L if n != 0 => write_msb_first(backend, cache, n, bits),
            _ => {
                for shift in (0..n).rev() {
                    if write_bit(backend, cache, order, (bits >> shift) & 1 != 0)?.is_none() {
                        return Ok(None);
                    }
                }
                Ok(Some(bits))
            }
        }
    }
}

#[inline(always)]
fn read_bit<B: ByteBackend>(
    backend: &mut B,
    cache: &mut BitCache,
    order: BitOrder,
) -> Result<Option<bool>> {
    if !cache.is_aligned() {
        return Ok(Some(cache.take_bit(order)));
    }
    Ok(backend.read_byte()?.map(|byte| cache.seed_read(byte, order)))
}

#[inline(always)]
fn write_bit<B: ByteBackend>(
    backend: &mut B,
    cache: &mut BitCache,
    order: BitOrder,
    bit: bool,
) -> Result<Option<u8>> {
    if cache.is_aligned() {
        cache.seed_write(order, bit);
        return Ok(Some(cache.buffer));
    }
    cache.put_bit(order, bit);
    if cache.is_aligned() {
        return backend.write_byte(cache.buffer);
    }
    Ok(Some(cache.buffer))
}

/// Read `n > 0` bits in M2L order a byte at a time.
fn read_msb_first<B: ByteBackend>(
    backend: &mut B,
    cache: &mut BitCache,
    n: u32,
) -> Result<Option<u32>> {
    let mut left = n;
    let mut value = 0;

    // what's left of the cached byte
    let cached = left.min(cache.count as u32);
    if cached > 0 {
        cache.count -= cached as u8;
        left -= cached;
        value = get_lowest_bits((cache.buffer >> cache.count) as u32, cached) << left;
        if left == 0 {
            return Ok(Some(value));
        }
    }
    debug_assert!(cache.is_aligned());

    while left > 0 {
        let Some(byte) = backend.read_byte()? else {
            cache.clear();
            return Ok(None);
        };
        let chunk = left.min(8);
        left -= chunk;
        cache.buffer = byte;
        cache.count = (8 - chunk) as u8;
        value |= ((byte >> cache.count) as u32) << left;
    }
    Ok(Some(value))
}

/// Write the lowest `n > 0` bits of `bits` in M2L order a byte at a time.
fn write_msb_first<B: ByteBackend>(
    backend: &mut B,
    cache: &mut BitCache,
    n: u32,
    bits: u32,
) -> Result<Option<u32>> {
    let mut left = n;

    // fill the free part of the cached byte
    let free = left.min(cache.count as u32);
    if free > 0 {
        cache.count -= free as u8;
        left -= free;
        cache.buffer |= (get_lowest_bits(bits >> left, free) << cache.count) as u8;
        if cache.is_aligned() && backend.write_byte(cache.buffer)?.is_none() {
            return Ok(None);
        }
        if left == 0 {
            return Ok(Some(bits));
        }
    }
    debug_assert!(cache.is_aligned());

    while left > 0 {
        let chunk = left.min(8);
        left -= chunk;
        cache.count = (8 - chunk) as u8;
        cache.buffer = (get_lowest_bits(bits >> left, chunk) << cache.count) as u8;
        if cache.is_aligned() && backend.write_byte(cache.buffer)?.is_none() {
            return Ok(None);
        }
    }
    Ok(Some(bits))
}
