/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The bit engine.
//!
//! A [`Bitstream`] reads or writes single bits, runs of up to 31 bits and
//! fixed-width integers on top of any [`ByteBackend`], caching at most one
//! byte. Bit order ([`BitOrder`](crate::traits::BitOrder)) and byte order
//! ([`ByteOrder`](crate::traits::ByteOrder)) are chosen at each call.

use crate::error::{BitstreamError, Result};
use crate::traits::{ByteBackend, Direction};
use crate::utils::to_hex_bin_string;
use core::fmt;

mod bit_cache;
pub(crate) use bit_cache::BitCache;

mod bits;
pub use bits::MAX_BITS;

mod ints;
pub use ints::{read_u16_at, read_u32_at};

mod skip;

/// A bit-granular reader or writer on a [`ByteBackend`].
///
/// An engine is bound to a backend in a [`Direction`] fixed at
/// construction (or at [`set_stream`](Bitstream::set_stream)), and operations
/// of the other direction fail with [`BitstreamError::WrongMode`]. After
/// [`close`](Bitstream::close) every operation fails with
/// [`BitstreamError::Closed`] until a new backend is bound.
///
/// End of stream is reported as `Ok(None)`.
///
/// Bits written are cached until a byte is complete, so the last partial byte
/// reaches the backend only on [`flush`](Bitstream::flush) or
/// [`close`](Bitstream::close). Dropping an engine does not flush it.
///
/// # Example
/// ```
/// use bitflow::prelude::*;
///
/// let mut writer = Bitstream::new(MemBackend::new(vec![0; 2]), Direction::Output)?;
/// writer.write_bits31(M2L, 4, 0b1101)?;
/// assert_eq!(writer.position(), Some(4));
/// writer.flush()?;
/// let data = writer.into_inner().unwrap().into_inner();
/// assert_eq!(data, vec![0b1101_0000, 0]);
///
/// let mut reader = Bitstream::new(SliceBackend::new(&data), Direction::Input)?;
/// assert_eq!(reader.read_bits31(M2L, 2)?, Some(0b11));
/// assert_eq!(reader.read_bit(M2L)?, Some(false));
/// assert_eq!(reader.position(), Some(3));
/// # Ok::<(), BitstreamError>(())
/// ```
#[derive(Debug)]
pub struct Bitstream<B: ByteBackend> {
    /// The bound backend, `None` once closed
    backend: Option<B>,
    cache: BitCache,
    /// Snapshot of the cache taken at the last mark
    mark: Option<BitCache>,
    direction: Direction,
}

impl<B: ByteBackend> Bitstream<B> {
    /// Create a new engine bound to `backend` in the given direction.
    ///
    /// # Errors
    /// [`BitstreamError::NoCapability`] if the backend can neither read nor
    /// write, [`BitstreamError::UnsupportedDirection`] if it cannot move data
    /// in `direction`. The backend is not touched.
    pub fn new(backend: B, direction: Direction) -> Result<Self> {
        Self::validate(&backend, direction)?;
        Ok(Self {
            backend: Some(backend),
            cache: BitCache::default(),
            mark: None,
            direction,
        })
    }

    fn validate(backend: &B, direction: Direction) -> Result<()> {
        if !backend.can_input() && !backend.can_output() {
            return Err(BitstreamError::NoCapability);
        }
        let supported = match direction {
            Direction::Input => backend.can_input(),
            Direction::Output => backend.can_output(),
        };
        if !supported {
            return Err(BitstreamError::UnsupportedDirection(direction));
        }
        Ok(())
    }

    /// Bind the engine to a new backend, possibly in a different direction.
    ///
    /// If the engine was writing, it is flushed first. The cache and the
    /// mark are discarded, and the previous backend, if any, is returned
    /// without being closed. This works on a closed engine, too.
    ///
    /// # Errors
    /// The same as [`Bitstream::new`], before the current backend is touched,
    /// or any error from the flush.
    pub fn set_stream(&mut self, backend: B, direction: Direction) -> Result<Option<B>> {
        Self::validate(&backend, direction)?;
        if self.backend.is_some() && self.direction == Direction::Output {
            self.flush()?;
        }
        let previous = self.backend.replace(backend);
        self.direction = direction;
        self.cache.clear();
        self.mark = None;
        log::debug!("bound to a new backend for {}", direction);
        Ok(previous)
    }

    /// Flush if writing, then close and release the backend.
    ///
    /// Closing a closed engine does nothing.
    pub fn close(&mut self) -> Result<()> {
        if self.backend.is_none() {
            return Ok(());
        }
        if self.direction == Direction::Output {
            self.flush()?;
        }
        if let Some(backend) = self.backend.as_mut() {
            log::debug!("closing {} stream at byte {}", self.direction, backend.position());
            backend.close()?;
        }
        self.backend = None;
        self.cache.clear();
        self.mark = None;
        Ok(())
    }

    /// Return the backend without closing or flushing it, or `None` if the
    /// engine has been closed.
    ///
    /// Cached bits not yet written are lost.
    pub fn into_inner(self) -> Option<B> {
        self.backend
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }

    #[inline(always)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline(always)]
    pub fn is_closed(&self) -> bool {
        self.backend.is_none()
    }

    /// Return whether the bound backend can read; false if closed.
    pub fn can_input(&self) -> bool {
        self.backend.as_ref().is_some_and(ByteBackend::can_input)
    }

    /// Return whether the bound backend can write; false if closed.
    pub fn can_output(&self) -> bool {
        self.backend.as_ref().is_some_and(ByteBackend::can_output)
    }

    /// Number of bits in the cache: still to read in input mode, still free
    /// in output mode.
    #[inline(always)]
    pub fn bit_count(&self) -> u32 {
        self.cache.count as u32
    }

    #[inline(always)]
    pub fn bit_buffer(&self) -> u8 {
        self.cache.buffer
    }

    /// Index, from the least significant bit, of the last bit read or
    /// written in M2L order.
    #[inline(always)]
    pub fn last_bit_pos(&self) -> u32 {
        7 - self.bit_count()
    }

    /// Offset of the current bit in the current byte: 0 when bit-aligned.
    #[inline(always)]
    pub fn bit_position(&self) -> u32 {
        if self.cache.is_aligned() {
            0
        } else {
            8 - self.bit_count()
        }
    }

    /// Return the absolute position of the engine in bits, or `None` if
    /// closed.
    ///
    /// In input mode a partially consumed byte has already been read from
    /// the backend, so it is subtracted from the backend position; in output
    /// mode a partially filled byte has not been written yet.
    pub fn position(&self) -> Option<u64> {
        let bytes = self.backend.as_ref()?.position();
        if self.cache.is_aligned() {
            return Some(bytes * 8);
        }
        let bytes = match self.direction {
            Direction::Input => bytes.saturating_sub(1),
            Direction::Output => bytes,
        };
        Some(bytes * 8 + self.bit_position() as u64)
    }

    /// Mark the current position, so that [`reset`](Bitstream::reset) can
    /// return to it. `read_limit` is passed to the backend, and bounds how
    /// many bytes can be read before the mark is lost.
    ///
    /// # Errors
    /// [`BitstreamError::Unsupported`] if the backend cannot mark, and
    /// [`BitstreamError::WrongMode`] if not reading.
    pub fn mark(&mut self, read_limit: usize) -> Result<()> {
        let (backend, cache) = self.input_parts()?;
        if !backend.can_mark() {
            return Err(BitstreamError::Unsupported("mark"));
        }
        backend.mark(read_limit)?;
        let snapshot = *cache;
        self.mark = Some(snapshot);
        Ok(())
    }

    /// Return to the last mark. The same mark can be returned to many times.
    ///
    /// # Errors
    /// [`BitstreamError::Unsupported`] if the backend cannot mark,
    /// [`BitstreamError::NoMark`] if [`mark`](Bitstream::mark) was never
    /// called, and any error of the backend reset, e.g.,
    /// [`BitstreamError::MarkInvalidated`].
    pub fn reset(&mut self) -> Result<()> {
        let mark = self.mark;
        let (backend, cache) = self.input_parts()?;
        if !backend.can_mark() {
            return Err(BitstreamError::Unsupported("reset"));
        }
        let mark = mark.ok_or(BitstreamError::NoMark)?;
        backend.reset()?;
        *cache = mark;
        Ok(())
    }

    /// Write the partial byte in the cache, if any, padding it with zeros,
    /// and flush the backend.
    pub fn flush(&mut self) -> Result<()> {
        let (backend, cache) = self.output_parts()?;
        if !cache.is_aligned() {
            if backend.write_byte(cache.buffer)?.is_none() {
                log::warn!(
                    "flush: no room for the last partial byte at {}",
                    backend.position()
                );
            }
            cache.clear();
        }
        backend.flush()
    }

    /// Borrow the backend and the cache, checking that the engine is open
    /// and reading.
    #[inline(always)]
    pub(crate) fn input_parts(&mut self) -> Result<(&mut B, &mut BitCache)> {
        match self.backend.as_mut() {
            None => Err(BitstreamError::Closed),
            Some(_) if self.direction != Direction::Input => Err(BitstreamError::WrongMode {
                expected: Direction::Input,
            }),
            Some(backend) => Ok((backend, &mut self.cache)),
        }
    }

    /// Borrow the backend and the cache, checking that the engine is open
    /// and writing.
    #[inline(always)]
    pub(crate) fn output_parts(&mut self) -> Result<(&mut B, &mut BitCache)> {
        match self.backend.as_mut() {
            None => Err(BitstreamError::Closed),
            Some(_) if self.direction != Direction::Output => Err(BitstreamError::WrongMode {
                expected: Direction::Output,
            }),
            Some(backend) => Ok((backend, &mut self.cache)),
        }
    }
}

impl<B: ByteBackend> fmt::Display for Bitstream<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.is_closed() {
            "closed".to_string()
        } else {
            self.direction.to_string()
        };
        let (pos, byte_pos) = match (self.position(), self.backend.as_ref()) {
            (Some(pos), Some(backend)) => (pos as i128, backend.position() as i128),
            _ => (-1, -1),
        };
        write!(
            f,
            "Bitstream[{}, pos {} [byteP {}, bitCnt {}], bitbuf {}]",
            mode,
            pos,
            byte_pos,
            self.cache.count,
            to_hex_bin_string(self.cache.buffer as u32, 8)
        )
    }
}
