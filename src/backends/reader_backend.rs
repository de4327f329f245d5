/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::{BitstreamError, Result};
use crate::traits::ByteBackend;
use crate::utils::to_hex_bin_string;
use std::io::{BufReader, Read};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadMark {
    Unset,
    Set { pos: u64, read_limit: usize },
    /// More than `read_limit` bytes were read after the mark
    Invalidated { read_limit: usize },
}

/// A forward-only, input-only [`ByteBackend`] on anything implementing
/// [`std::io::Read`], e.g., a [`std::fs::File`] or a socket.
///
/// The source is wrapped in a [`BufReader`]. Mark/reset is supported by
/// recording the bytes read after the mark, up to the `read_limit` passed to
/// [`mark`](ByteBackend::mark): reading further invalidates the mark, and a
/// subsequent [`reset`](ByteBackend::reset) fails with
/// [`BitstreamError::MarkInvalidated`].
///
/// Backward skips are not supported and skip nothing.
///
/// # Example
/// ```
/// use bitflow::prelude::*;
///
/// let mut reader = ReaderBackend::new(&b"\x01\x02\x03"[..]);
/// reader.mark(2).unwrap();
/// assert_eq!(reader.read_byte().unwrap(), Some(1));
/// assert_eq!(reader.read_byte().unwrap(), Some(2));
/// reader.reset().unwrap();
/// assert_eq!(reader.read_byte().unwrap(), Some(1));
/// assert_eq!(reader.skip(5).unwrap(), 2);
/// ```
#[derive(Debug)]
pub struct ReaderBackend<R: Read> {
    /// The source, `None` once closed
    inner: Option<BufReader<R>>,
    pos: u64,
    mark: ReadMark,
    /// Bytes read since the mark
    replay: Vec<u8>,
    /// Index in `replay` of the next byte to return
    cursor: usize,
}

impl<R: Read> ReaderBackend<R> {
    /// Create a new [`ReaderBackend`] with a default-sized buffer.
    pub fn new(reader: R) -> Self {
        Self::from_buf_reader(BufReader::new(reader))
    }

    /// Create a new [`ReaderBackend`] whose [`BufReader`] has the given
    /// capacity.
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self::from_buf_reader(BufReader::with_capacity(capacity, reader))
    }

    fn from_buf_reader(inner: BufReader<R>) -> Self {
        Self {
            inner: Some(inner),
            pos: 0,
            mark: ReadMark::Unset,
            replay: Vec::new(),
            cursor: 0,
        }
    }

    pub fn get_ref(&self) -> Option<&R> {
        self.inner.as_ref().map(BufReader::get_ref)
    }

    /// Unwrap this backend, returning the underlying reader, or `None` if it
    /// has been closed.
    ///
    /// Note that any buffered or recorded data is lost.
    pub fn into_inner(self) -> Option<R> {
        self.inner.map(BufReader::into_inner)
    }

    /// Record a freshly read byte if a mark is active, invalidating the mark
    /// if its read-ahead limit is exceeded.
    fn record(&mut self, byte: u8) {
        if let ReadMark::Set { read_limit, .. } = self.mark {
            if self.replay.len() < read_limit {
                self.replay.push(byte);
                self.cursor = self.replay.len();
            } else {
                log::warn!(
                    "Mark invalidated at byte {}: more than {} bytes read",
                    self.pos,
                    read_limit
                );
                self.mark = ReadMark::Invalidated { read_limit };
                self.replay.clear();
                self.cursor = 0;
            }
        }
    }
}

impl<R: Read> ByteBackend for ReaderBackend<R> {
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
        self.pos
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let inner = self.inner.as_mut().ok_or(BitstreamError::Closed)?;

        if self.cursor < self.replay.len() {
            let byte = self.replay[self.cursor];
            self.cursor += 1;
            // past the replayed data and nobody will rewind here again
            if self.cursor == self.replay.len() && !matches!(self.mark, ReadMark::Set { .. }) {
                self.replay.clear();
                self.cursor = 0;
            }
            log::trace!("u8[{}] -> {} (replay)", self.pos, to_hex_bin_string(byte as u32, 8));
            self.pos += 1;
            return Ok(Some(byte));
        }

        let next = inner.by_ref().bytes().next().transpose()?;
        match next {
            None => {
                log::trace!("u8[{}] -> EOS", self.pos);
                Ok(None)
            }
            Some(byte) => {
                log::trace!("u8[{}] -> {}", self.pos, to_hex_bin_string(byte as u32, 8));
                self.record(byte);
                self.pos += 1;
                Ok(Some(byte))
            }
        }
    }

    fn skip(&mut self, n: i64) -> Result<i64> {
        if self.inner.is_none() {
            return Err(BitstreamError::Closed);
        }
        let mut skipped = 0;
        while skipped < n {
            if self.cursor < self.replay.len() || matches!(self.mark, ReadMark::Set { .. }) {
                // the skipped bytes must be recorded for a later reset
                match self.read_byte()? {
                    Some(_) => skipped += 1,
                    None => break,
                }
            } else {
                let inner = self.inner.as_mut().ok_or(BitstreamError::Closed)?;
                let copied = std::io::copy(
                    &mut inner.by_ref().take((n - skipped) as u64),
                    &mut std::io::sink(),
                )?;
                self.pos += copied;
                skipped += copied as i64;
                break;
            }
        }
        log::trace!("skip {} bytes: {} skipped", n, skipped);
        Ok(skipped)
    }

    fn mark(&mut self, read_limit: usize) -> Result<()> {
        if self.inner.is_none() {
            return Err(BitstreamError::Closed);
        }
        // keep only the recorded bytes that have not been returned yet
        self.replay.drain(..self.cursor);
        self.cursor = 0;
        self.mark = ReadMark::Set {
            pos: self.pos,
            read_limit,
        };
        log::debug!("mark at {} with read limit {}", self.pos, read_limit);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        if self.inner.is_none() {
            return Err(BitstreamError::Closed);
        }
        match self.mark {
            ReadMark::Unset => Err(BitstreamError::NoMark),
            ReadMark::Invalidated { read_limit } => {
                Err(BitstreamError::MarkInvalidated { read_limit })
            }
            ReadMark::Set { pos, .. } => {
                log::debug!("rewind: {} -> {}", self.pos, pos);
                self.cursor = 0;
                self.pos = pos;
                Ok(())
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.inner.take().is_some() {
            log::debug!("closing reader at byte {}", self.pos);
        }
        self.replay = Vec::new();
        self.cursor = 0;
        self.mark = ReadMark::Unset;
        Ok(())
    }
}
