/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::Bitstream;
use crate::error::{BitstreamError, Result};
use crate::traits::{ByteBackend, Direction};

impl<B: ByteBackend> Bitstream<B> {
    /// Skip `n` bits, returning how many bits were actually skipped.
    ///
    /// In input mode the skipped bits are discarded; in output mode they are
    /// left as zeros (or whatever the backend does on a skip). Whole bytes are
    /// skipped by the backend, so the result is smaller than `n` only if the
    /// backend ran out of data or room, and it never counts bits that were
    /// not skipped.
    ///
    /// Backward skips are not supported: a non-positive `n` skips nothing.
    ///
    /// ### Example
    /// ```
    /// use bitflow::prelude::*;
    ///
    /// let data = [0xFF, 0b0000_0100, 0xFF];
    /// let mut bits = Bitstream::new(SliceBackend::new(&data), Direction::Input)?;
    /// assert_eq!(bits.skip(13)?, 13);
    /// assert_eq!(bits.read_bit(M2L)?, Some(true));
    /// assert_eq!(bits.skip(100)?, 10);
    /// assert_eq!(bits.position(), Some(24));
    /// # Ok::<(), BitstreamError>(())
    /// ```
    pub fn skip(&mut self, n: i64) -> Result<u64> {
        let direction = self.direction;
        let Some(backend) = self.backend.as_mut() else {
            return Err(BitstreamError::Closed);
        };
        let cache = &mut self.cache;
        if n <= 0 {
            return Ok(0);
        }
        let n = n as u64;
        let cached = cache.count as u64;

        // happy case: the cache is enough; in output mode a byte filled up
        // by the skip must reach the backend
        if n < cached || (n == cached && direction == Direction::Input) {
            cache.count -= n as u8;
            log::trace!("skip {} bits in the cache", n);
            return Ok(n);
        }

        if direction == Direction::Output
            && !cache.is_aligned()
            && backend.write_byte(cache.buffer)?.is_none()
        {
            cache.clear();
            return Ok(0);
        }
        let bits = n - cached;
        let bytes = bits >> 3;
        let remainder = (bits & 7) as u8;

        let skipped_bytes = backend.skip(bytes as i64)?.max(0) as u64;
        let skipped = cached + skipped_bytes * 8;
        if skipped_bytes < bytes {
            cache.clear();
            log::trace!("skip {} bits: backend exhausted after {} bits", n, skipped);
            return Ok(skipped);
        }

        cache.buffer = 0;
        cache.count = (8 - remainder) & 7;
        if direction == Direction::Input && !cache.is_aligned() {
            match backend.read_byte()? {
                Some(byte) => cache.buffer = byte,
                None => {
                    cache.clear();
                    log::trace!("skip {} bits: end of stream after {} bits", n, skipped);
                    return Ok(skipped);
                }
            }
        }
        log::trace!("skip {} bits: {} bytes and {} bits", n, skipped_bytes, remainder);
        Ok(n)
    }
}
