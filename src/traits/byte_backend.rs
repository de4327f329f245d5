/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::{BitstreamError, Result};

/// A byte-granular medium a [`Bitstream`](crate::bitstream::Bitstream) reads
/// from or writes to.
///
/// This trait is used to abstract the logic and allow homogeneous use of
/// memory, files, sockets, and other sources and sinks. Implementations
/// declare what they can do through [`can_input`](ByteBackend::can_input),
/// [`can_output`](ByteBackend::can_output) and
/// [`can_mark`](ByteBackend::can_mark); the flags must not change during the
/// lifetime of the backend, and at least one of the first two must be true.
///
/// The operations a backend cannot support have a default implementation
/// returning [`BitstreamError::Unsupported`], so an input-only backend just
/// does not implement [`write_byte`](ByteBackend::write_byte).
///
/// After [`close`](ByteBackend::close) all I/O operations must fail with
/// [`BitstreamError::Closed`].
pub trait ByteBackend {
    /// Return true if the backend can handle [`read_byte`](ByteBackend::read_byte).
    fn can_input(&self) -> bool;

    /// Return true if the backend can handle [`write_byte`](ByteBackend::write_byte).
    fn can_output(&self) -> bool;

    /// Return true if the backend supports [`mark`](ByteBackend::mark) and
    /// [`reset`](ByteBackend::reset).
    fn can_mark(&self) -> bool {
        false
    }

    /// Return the byte position in the stream.
    #[must_use]
    fn position(&self) -> u64;

    /// Read one byte, returning `None` if the end of the stream is reached.
    ///
    /// # Errors
    /// Fails if the backend cannot input, is closed, or on I/O errors.
    fn read_byte(&mut self) -> Result<Option<u8>> {
        Err(BitstreamError::Unsupported("read"))
    }

    /// Write one byte, returning it back, or `None` if the backend has no
    /// more capacity.
    ///
    /// # Errors
    /// Fails if the backend cannot output, is closed, or on I/O errors.
    fn write_byte(&mut self, _byte: u8) -> Result<Option<u8>> {
        Err(BitstreamError::Unsupported("write"))
    }

    /// Skip `n` bytes, returning the number of bytes actually skipped, which
    /// is bounded by the available data or capacity.
    ///
    /// It is implementation dependent whether a backward skip (negative `n`)
    /// is supported; backends that do not support it return 0.
    fn skip(&mut self, n: i64) -> Result<i64>;

    /// Set the mark position to the current position, allowing the stream to
    /// be [`reset`](ByteBackend::reset). Backends with a bounded read-ahead
    /// may forget the mark after `read_limit` bytes.
    ///
    /// # Errors
    /// [`BitstreamError::Unsupported`] if the backend cannot mark.
    fn mark(&mut self, _read_limit: usize) -> Result<()> {
        Err(BitstreamError::Unsupported("mark"))
    }

    /// Reset the position to the mark set with [`mark`](ByteBackend::mark).
    ///
    /// The mark is kept, hence this can be called multiple times.
    ///
    /// # Errors
    /// [`BitstreamError::Unsupported`] if the backend cannot mark,
    /// [`BitstreamError::NoMark`] if no mark was set.
    fn reset(&mut self) -> Result<()> {
        Err(BitstreamError::Unsupported("reset"))
    }

    /// Synchronize all output operations, or do nothing.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Close the backend, implying [`flush`](ByteBackend::flush).
    ///
    /// Closing twice is a no-op.
    fn close(&mut self) -> Result<()>;
}

/// Forward everything, so a backend can be lent to a
/// [`Bitstream`](crate::bitstream::Bitstream) and inspected afterwards.
impl<B: ByteBackend + ?Sized> ByteBackend for &mut B {
    #[inline(always)]
    fn can_input(&self) -> bool {
        (**self).can_input()
    }

    #[inline(always)]
    fn can_output(&self) -> bool {
        (**self).can_output()
    }

    #[inline(always)]
    fn can_mark(&self) -> bool {
        (**self).can_mark()
    }

    #[inline(always)]
    fn position(&self) -> u64 {
        (**self).position()
    }

    #[inline(always)]
    fn read_byte(&mut self) -> Result<Option<u8>> {
        (**self).read_byte()
    }

    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> Result<Option<u8>> {
        (**self).write_byte(byte)
    }

    #[inline(always)]
    fn skip(&mut self, n: i64) -> Result<i64> {
        (**self).skip(n)
    }

    #[inline(always)]
    fn mark(&mut self, read_limit: usize) -> Result<()> {
        (**self).mark(read_limit)
    }

    #[inline(always)]
    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }

    #[inline(always)]
    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    #[inline(always)]
    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
