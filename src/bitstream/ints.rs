/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Fixed-width unsigned integers on a [`Bitstream`].
//!
//! When the stream is bit-aligned and the bit order is
//! [`M2L`](BitOrder::M2L), bytes go straight to and from the backend.
//! Otherwise the integer is moved as a big-endian sequence of bits through
//! [`Bitstream::read_bits31`] and [`Bitstream::write_bits31`], and bytes are
//! swapped afterwards if little endian is requested.

use super::Bitstream;
use crate::error::Result;
use crate::traits::{BitOrder, ByteBackend, ByteOrder};
use crate::utils::check_bounds;

impl<B: ByteBackend> Bitstream<B> {
    #[inline(always)]
    fn is_byte_path(&self, order: BitOrder) -> bool {
        self.cache.is_aligned() && order.is_msb_first()
    }

    /// Read `N` bytes straight from the backend.
    fn read_bytes<const N: usize>(&mut self) -> Result<Option<[u8; N]>> {
        let (backend, _) = self.input_parts()?;
        let mut bytes = [0; N];
        for byte in bytes.iter_mut() {
            match backend.read_byte()? {
                Some(b) => *byte = b,
                None => return Ok(None),
            }
        }
        Ok(Some(bytes))
    }

    /// Write bytes straight to the backend, returning `None` as soon as one
    /// does not fit.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<Option<()>> {
        let (backend, _) = self.output_parts()?;
        for &byte in bytes {
            if backend.write_byte(byte)?.is_none() {
                return Ok(None);
            }
        }
        Ok(Some(()))
    }

    /// Read an unsigned byte.
    #[inline]
    pub fn read_u8(&mut self, order: BitOrder) -> Result<Option<u8>> {
        if self.is_byte_path(order) {
            let (backend, _) = self.input_parts()?;
            return backend.read_byte();
        }
        Ok(self.read_bits31(order, 8)?.map(|value| value as u8))
    }

    /// Read an unsigned 16-bit integer.
    pub fn read_u16(&mut self, order: BitOrder, byte_order: ByteOrder) -> Result<Option<u16>> {
        if self.is_byte_path(order) {
            return Ok(self.read_bytes::<2>()?.map(|bytes| match byte_order {
                ByteOrder::BigEndian => u16::from_be_bytes(bytes),
                ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            }));
        }
        Ok(self
            .read_bits31(order, 16)?
            .map(|value| swap_u16(value as u16, byte_order)))
    }

    /// Read an unsigned 32-bit integer.
    ///
    /// ### Example
    /// ```
    /// use bitflow::prelude::*;
    ///
    /// let data = [0x12, 0x34, 0x56, 0x78];
    /// let mut bits = Bitstream::new(SliceBackend::new(&data), Direction::Input)?;
    /// assert_eq!(bits.read_u32(M2L, ByteOrder::LittleEndian)?, Some(0x7856_3412));
    /// assert_eq!(bits.read_u32(M2L, ByteOrder::LittleEndian)?, None);
    /// # Ok::<(), BitstreamError>(())
    /// ```
    pub fn read_u32(&mut self, order: BitOrder, byte_order: ByteOrder) -> Result<Option<u32>> {
        if self.is_byte_path(order) {
            return Ok(self.read_bytes::<4>()?.map(|bytes| match byte_order {
                ByteOrder::BigEndian => u32::from_be_bytes(bytes),
                ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            }));
        }
        // 32 bits do not fit a single transfer
        let Some(high) = self.read_bits31(order, 16)? else {
            return Ok(None);
        };
        let Some(low) = self.read_bits31(order, 16)? else {
            return Ok(None);
        };
        Ok(Some(swap_u32((high << 16) | low, byte_order)))
    }

    /// Write an unsigned byte, returning it back, or `None` if the backend
    /// has no room for it.
    #[inline]
    pub fn write_u8(&mut self, order: BitOrder, value: u8) -> Result<Option<u8>> {
        if self.is_byte_path(order) {
            let (backend, _) = self.output_parts()?;
            return backend.write_byte(value);
        }
        Ok(self
            .write_bits31(order, 8, value as u32)?
            .map(|_| value))
    }

    /// Write an unsigned 16-bit integer, returning it back, or `None` if
    /// the backend has no room for it.
    pub fn write_u16(
        &mut self,
        order: BitOrder,
        byte_order: ByteOrder,
        value: u16,
    ) -> Result<Option<u16>> {
        if self.is_byte_path(order) {
            let bytes = match byte_order {
                ByteOrder::BigEndian => value.to_be_bytes(),
                ByteOrder::LittleEndian => value.to_le_bytes(),
            };
            return Ok(self.write_bytes(&bytes)?.map(|()| value));
        }
        Ok(self
            .write_bits31(order, 16, swap_u16(value, byte_order) as u32)?
            .map(|_| value))
    }

    /// Write an unsigned 32-bit integer, returning it back, or `None` if
    /// the backend has no room for it.
    pub fn write_u32(
        &mut self,
        order: BitOrder,
        byte_order: ByteOrder,
        value: u32,
    ) -> Result<Option<u32>> {
        if self.is_byte_path(order) {
            let bytes = match byte_order {
                ByteOrder::BigEndian => value.to_be_bytes(),
                ByteOrder::LittleEndian => value.to_le_bytes(),
            };
            return Ok(self.write_bytes(&bytes)?.map(|()| value));
        }
        let bits = swap_u32(value, byte_order);
        if self.write_bits31(order, 16, bits >> 16)?.is_none() {
            return Ok(None);
        }
        Ok(self
            .write_bits31(order, 16, bits & 0xFFFF)?
            .map(|_| value))
    }
}

/// Convert between a big-endian bit sequence and `byte_order`.
#[inline(always)]
fn swap_u16(value: u16, byte_order: ByteOrder) -> u16 {
    match byte_order {
        ByteOrder::BigEndian => value,
        ByteOrder::LittleEndian => value.swap_bytes(),
    }
}

#[inline(always)]
fn swap_u32(value: u32, byte_order: ByteOrder) -> u32 {
    match byte_order {
        ByteOrder::BigEndian => value,
        ByteOrder::LittleEndian => value.swap_bytes(),
    }
}

/// Decode an unsigned 16-bit integer at `offset` in `buffer`.
///
/// # Errors
/// [`BitstreamError::OutOfBounds`](crate::BitstreamError::OutOfBounds) if
/// `buffer` has less than two bytes from `offset`.
///
/// ### Example
/// ```
/// use bitflow::prelude::*;
///
/// let buffer = [0x00, 0x12, 0x34];
/// assert_eq!(read_u16_at(ByteOrder::BigEndian, &buffer, 1)?, 0x1234);
/// assert_eq!(read_u16_at(ByteOrder::LittleEndian, &buffer, 1)?, 0x3412);
/// assert!(read_u16_at(ByteOrder::BigEndian, &buffer, 2).is_err());
/// # Ok::<(), BitstreamError>(())
/// ```
pub fn read_u16_at(byte_order: ByteOrder, buffer: &[u8], offset: usize) -> Result<u16> {
    check_bounds(buffer, offset, 2)?;
    let bytes = [buffer[offset], buffer[offset + 1]];
    Ok(match byte_order {
        ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
    })
}

/// Decode an unsigned 32-bit integer at `offset` in `buffer`.
///
/// # Errors
/// [`BitstreamError::OutOfBounds`](crate::BitstreamError::OutOfBounds) if
/// `buffer` has less than four bytes from `offset`.
pub fn read_u32_at(byte_order: ByteOrder, buffer: &[u8], offset: usize) -> Result<u32> {
    check_bounds(buffer, offset, 4)?;
    let mut bytes = [0; 4];
    bytes.copy_from_slice(&buffer[offset..offset + 4]);
    Ok(match byte_order {
        ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
    })
}
