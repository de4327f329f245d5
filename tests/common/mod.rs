/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![allow(dead_code)]

use bitflow::prelude::*;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A [`ByteBackend`] wrapper counting the calls that reach the wrapped
/// backend.
#[derive(Debug, Default)]
pub struct CountingBackend<B> {
    pub inner: B,
    pub reads: usize,
    pub writes: usize,
    pub skips: usize,
    pub flushes: usize,
}

impl<B: ByteBackend> CountingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            reads: 0,
            writes: 0,
            skips: 0,
            flushes: 0,
        }
    }

    /// Number of calls moving data.
    pub fn io_calls(&self) -> usize {
        self.reads + self.writes + self.skips
    }
}

impl<B: ByteBackend> ByteBackend for CountingBackend<B> {
    fn can_input(&self) -> bool {
        self.inner.can_input()
    }

    fn can_output(&self) -> bool {
        self.inner.can_output()
    }

    fn can_mark(&self) -> bool {
        self.inner.can_mark()
    }

    fn position(&self) -> u64 {
        self.inner.position()
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        self.reads += 1;
        self.inner.read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> Result<Option<u8>> {
        self.writes += 1;
        self.inner.write_byte(byte)
    }

    fn skip(&mut self, n: i64) -> Result<i64> {
        self.skips += 1;
        self.inner.skip(n)
    }

    fn mark(&mut self, read_limit: usize) -> Result<()> {
        self.inner.mark(read_limit)
    }

    fn reset(&mut self) -> Result<()> {
        self.inner.reset()
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        self.inner.flush()
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }
}
