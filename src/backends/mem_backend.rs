/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::{BitstreamError, Result};
use crate::traits::ByteBackend;
use crate::utils::to_hex_bin_string;

/// Position, limit and mark of a bounded random-access medium, shared by
/// [`MemBackend`] and [`SliceBackend`].
#[derive(Debug, Clone)]
struct MemCursor {
    /// Bytes at or past this index are not accessible
    limit: usize,
    /// Index of the next byte to read or write
    pos: usize,
    mark: Option<usize>,
    closed: bool,
}

impl MemCursor {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            pos: 0,
            mark: None,
            closed: false,
        }
    }

    #[inline(always)]
    fn check_open(&self) -> Result<()> {
        if self.closed {
            return Err(BitstreamError::Closed);
        }
        Ok(())
    }

    #[inline]
    fn read(&mut self, data: &[u8]) -> Result<Option<u8>> {
        self.check_open()?;
        if self.pos >= self.limit {
            log::trace!("u8[{}] -> EOS", self.pos);
            return Ok(None);
        }
        let byte = data[self.pos];
        log::trace!("u8[{}] -> {}", self.pos, to_hex_bin_string(byte as u32, 8));
        self.pos += 1;
        Ok(Some(byte))
    }

    #[inline]
    fn write(&mut self, data: &mut [u8], byte: u8) -> Result<Option<u8>> {
        self.check_open()?;
        if self.pos >= self.limit {
            log::trace!("u8[{}] <- EOS", self.pos);
            return Ok(None);
        }
        data[self.pos] = byte;
        log::trace!("u8[{}] <- {}", self.pos, to_hex_bin_string(byte as u32, 8));
        self.pos += 1;
        Ok(Some(byte))
    }

    fn skip(&mut self, n: i64) -> Result<i64> {
        self.check_open()?;
        let skipped = if n >= 0 {
            n.min((self.limit - self.pos) as i64)
        } else {
            -(n.unsigned_abs().min(self.pos as u64) as i64)
        };
        self.pos = (self.pos as i64 + skipped) as usize;
        Ok(skipped)
    }

    fn mark(&mut self) -> Result<()> {
        self.check_open()?;
        self.mark = Some(self.pos);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.check_open()?;
        let mark = self.mark.ok_or(BitstreamError::NoMark)?;
        log::debug!("rewind: {} -> {}", self.pos, mark);
        self.pos = mark;
        Ok(())
    }
}

/// A bounded, bidirectional, random-access [`ByteBackend`] on memory.
///
/// The storage can be anything that can be seen as a mutable slice of bytes,
/// e.g., a `Vec<u8>`, a `Box<[u8]>`, an array or a `&mut [u8]`. Reads and
/// writes past the limit (by default, the length of the storage) return
/// `None`. Mark/reset and backward skips are supported.
///
/// # Example
/// ```
/// use bitflow::prelude::*;
///
/// let mut mem = MemBackend::with_limit(vec![0; 4], 2);
/// assert_eq!(mem.write_byte(0xAB).unwrap(), Some(0xAB));
/// assert_eq!(mem.write_byte(0xCD).unwrap(), Some(0xCD));
/// // the limit has been reached
/// assert_eq!(mem.write_byte(0xEF).unwrap(), None);
///
/// assert_eq!(mem.skip(-2).unwrap(), -2);
/// assert_eq!(mem.read_byte().unwrap(), Some(0xAB));
/// assert_eq!(mem.into_inner(), vec![0xAB, 0xCD, 0, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct MemBackend<B> {
    data: B,
    cursor: MemCursor,
}

impl<B: AsRef<[u8]>> MemBackend<B> {
    /// Create a new [`MemBackend`] spanning all the given storage.
    #[must_use]
    pub fn new(data: B) -> Self {
        let limit = data.as_ref().len();
        Self {
            data,
            cursor: MemCursor::new(limit),
        }
    }

    /// Create a new [`MemBackend`] that will not access bytes past `limit`.
    ///
    /// A limit larger than the storage is clamped to its length.
    #[must_use]
    pub fn with_limit(data: B, limit: usize) -> Self {
        let limit = limit.min(data.as_ref().len());
        Self {
            data,
            cursor: MemCursor::new(limit),
        }
    }

    /// Return the limit of the backend.
    pub fn limit(&self) -> usize {
        self.cursor.limit
    }

    /// Return the number of bytes between the position and the limit.
    pub fn remaining(&self) -> usize {
        self.cursor.limit - self.cursor.pos
    }

    pub fn get_ref(&self) -> &B {
        &self.data
    }

    /// Unwrap this backend, returning the storage, even if closed.
    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> ByteBackend for MemBackend<B> {
    #[inline(always)]
    fn can_input(&self) -> bool {
        true
    }

    #[inline(always)]
    fn can_output(&self) -> bool {
        true
    }

    #[inline(always)]
    fn can_mark(&self) -> bool {
        true
    }

    #[inline(always)]
    fn position(&self) -> u64 {
        self.cursor.pos as u64
    }

    #[inline]
    fn read_byte(&mut self) -> Result<Option<u8>> {
        self.cursor.read(self.data.as_ref())
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) -> Result<Option<u8>> {
        self.cursor.write(self.data.as_mut(), byte)
    }

    fn skip(&mut self, n: i64) -> Result<i64> {
        self.cursor.skip(n)
    }

    fn mark(&mut self, _read_limit: usize) -> Result<()> {
        self.cursor.mark()
    }

    fn reset(&mut self) -> Result<()> {
        self.cursor.reset()
    }

    fn close(&mut self) -> Result<()> {
        self.cursor.closed = true;
        Ok(())
    }
}

/// A bounded, read-only, random-access [`ByteBackend`] on a slice of bytes.
///
/// Same as [`MemBackend`], but it cannot output.
///
/// # Example
/// ```
/// use bitflow::prelude::*;
///
/// let data = [0x12, 0x34];
/// let mut slice = SliceBackend::new(&data);
/// assert!(!slice.can_output());
/// assert_eq!(slice.read_byte().unwrap(), Some(0x12));
/// assert_eq!(slice.read_byte().unwrap(), Some(0x34));
/// assert_eq!(slice.read_byte().unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct SliceBackend<'a> {
    data: &'a [u8],
    cursor: MemCursor,
}

impl<'a> SliceBackend<'a> {
    /// Create a new [`SliceBackend`] spanning all the slice.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            cursor: MemCursor::new(data.len()),
        }
    }

    /// Create a new [`SliceBackend`] that will not read bytes past `limit`.
    #[must_use]
    pub fn with_limit(data: &'a [u8], limit: usize) -> Self {
        Self {
            data,
            cursor: MemCursor::new(limit.min(data.len())),
        }
    }

    /// Return the number of bytes between the position and the limit.
    pub fn remaining(&self) -> usize {
        self.cursor.limit - self.cursor.pos
    }

    pub fn get_ref(&self) -> &'a [u8] {
        self.data
    }
}

impl ByteBackend for SliceBackend<'_> {
    #[inline(always)]
    fn can_input(&self) -> bool {
        true
    }

    #[inline(always)]
    fn can_output(&self) -> bool {
        false
    }

    #[inline(always)]
    fn can_mark(&self) -> bool {
        true
    }

    #[inline(always)]
    fn position(&self) -> u64 {
        self.cursor.pos as u64
    }

    #[inline]
    fn read_byte(&mut self) -> Result<Option<u8>> {
        self.cursor.read(self.data)
    }

    fn skip(&mut self, n: i64) -> Result<i64> {
        self.cursor.skip(n)
    }

    fn mark(&mut self, _read_limit: usize) -> Result<()> {
        self.cursor.mark()
    }

    fn reset(&mut self) -> Result<()> {
        self.cursor.reset()
    }

    fn close(&mut self) -> Result<()> {
        self.cursor.closed = true;
        Ok(())
    }
}
