/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::{BitstreamError, Result};
use crate::traits::ByteBackend;
use crate::utils::to_hex_bin_string;
use std::io::{BufWriter, Read, Write};

/// A write-only [`ByteBackend`] on anything implementing [`std::io::Write`],
/// e.g., a [`std::fs::File`], a socket or a `Vec<u8>`.
///
/// The sink is wrapped in a [`BufWriter`]. A forward skip writes zero
/// bytes; backward skips, reading and mark/reset are not supported.
///
/// # Example
/// ```
/// use bitflow::prelude::*;
///
/// let mut buffer = Vec::<u8>::new();
/// {
///     let mut writer = WriterBackend::new(&mut buffer);
///     writer.write_byte(0xFF).unwrap();
///     assert_eq!(writer.skip(2).unwrap(), 2);
///     writer.close().unwrap();
/// }
/// assert_eq!(buffer, vec![0xFF, 0, 0]);
/// ```
#[derive(Debug)]
pub struct WriterBackend<W: Write> {
    /// The sink, `None` once closed
    inner: Option<BufWriter<W>>,
    pos: u64,
}

impl<W: Write> WriterBackend<W> {
    /// Create a new [`WriterBackend`] with a default-sized buffer.
    pub fn new(writer: W) -> Self {
        Self {
            inner: Some(BufWriter::new(writer)),
            pos: 0,
        }
    }

    /// Create a new [`WriterBackend`] whose [`BufWriter`] has the given
    /// capacity.
    pub fn with_capacity(capacity: usize, writer: W) -> Self {
        Self {
            inner: Some(BufWriter::with_capacity(capacity, writer)),
            pos: 0,
        }
    }

    pub fn get_ref(&self) -> Option<&W> {
        self.inner.as_ref().map(BufWriter::get_ref)
    }

    /// Flush and unwrap this backend, returning the underlying writer, or
    /// `None` if it has been closed.
    pub fn into_inner(self) -> Result<Option<W>> {
        match self.inner {
            None => Ok(None),
            Some(inner) => inner
                .into_inner()
                .map(Some)
                .map_err(|err| err.into_error().into()),
        }
    }

    #[inline(always)]
    fn inner_mut(&mut self) -> Result<&mut BufWriter<W>> {
        self.inner.as_mut().ok_or(BitstreamError::Closed)
    }
}

impl<W: Write> ByteBackend for WriterBackend<W> {
    #[inline(always)]
    fn can_input(&self) -> bool {
        false
    }

    #[inline(always)]
    fn can_output(&self) -> bool {
        true
    }

    #[inline(always)]
    fn position(&self) -> u64 {
        self.pos
    }

    fn write_byte(&mut self, byte: u8) -> Result<Option<u8>> {
        self.inner_mut()?.write_all(&[byte])?;
        log::trace!("u8[{}] <- {}", self.pos, to_hex_bin_string(byte as u32, 8));
        self.pos += 1;
        Ok(Some(byte))
    }

    fn skip(&mut self, n: i64) -> Result<i64> {
        let inner = self.inner_mut()?;
        if n <= 0 {
            return Ok(0);
        }
        let written = std::io::copy(&mut std::io::repeat(0).take(n as u64), inner)?;
        log::trace!("u8[{}] <- {} filler bytes", self.pos, written);
        self.pos += written;
        Ok(written as i64)
    }

    fn flush(&mut self) -> Result<()> {
        self.inner_mut()?.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(inner) = self.inner.as_mut() {
            inner.flush()?;
            log::debug!("closing writer at byte {}", self.pos);
        }
        self.inner = None;
        Ok(())
    }
}
