/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::BitOrder;

/// The one-byte cache of a [`Bitstream`](super::Bitstream).
///
/// In input mode, `count` is the number of bits of `buffer` not yet read; in
/// output mode, it is the number of bits of `buffer` not yet written. In
/// both cases `count` is in `0..8`, and a zero `count` means that the stream
/// is bit-aligned: no bits are cached and `buffer` is meaningless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BitCache {
    pub(crate) buffer: u8,
    pub(crate) count: u8,
}

impl BitCache {
    #[inline(always)]
    pub(crate) fn clear(&mut self) {
        self.buffer = 0;
        self.count = 0;
    }

    #[inline(always)]
    pub(crate) fn is_aligned(&self) -> bool {
        self.count == 0
    }

    /// Index in `buffer` of the next bit to read or write, given that
    /// `count` has already been decremented.
    #[inline(always)]
    fn shift(&self, order: BitOrder) -> u8 {
        match order {
            BitOrder::M2L => self.count,
            BitOrder::L2M => 7 - self.count,
        }
    }

    /// Extract the next cached bit. The cache must not be empty.
    #[inline(always)]
    pub(crate) fn take_bit(&mut self, order: BitOrder) -> bool {
        debug_assert!(self.count > 0);
        self.count -= 1;
        (self.buffer >> self.shift(order)) & 1 != 0
    }

    /// Cache a freshly read byte and extract its first bit.
    #[inline(always)]
    pub(crate) fn seed_read(&mut self, byte: u8, order: BitOrder) -> bool {
        self.buffer = byte;
        self.count = 8;
        self.take_bit(order)
    }

    /// Insert the next bit in the cache. The cache must not be empty.
    #[inline(always)]
    pub(crate) fn put_bit(&mut self, order: BitOrder, bit: bool) {
        debug_assert!(self.count > 0);
        self.count -= 1;
        self.buffer |= (bit as u8) << self.shift(order);
    }

    /// Start a new byte with its first bit.
    #[inline(always)]
    pub(crate) fn seed_write(&mut self, order: BitOrder, bit: bool) {
        self.buffer = 0;
        self.count = 8;
        self.put_bit(order, bit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_bit() {
        let mut m2l = BitCache::default();
        let mut l2m = BitCache::default();
        let mut msb_first = vec![m2l.seed_read(0b1011_0010, BitOrder::M2L)];
        let mut lsb_first = vec![l2m.seed_read(0b1011_0010, BitOrder::L2M)];
        while !m2l.is_aligned() {
            msb_first.push(m2l.take_bit(BitOrder::M2L));
            lsb_first.push(l2m.take_bit(BitOrder::L2M));
        }
        let as_bits = |bits: Vec<bool>| bits.into_iter().map(u8::from).collect::<Vec<_>>();
        assert_eq!(as_bits(msb_first), vec![1, 0, 1, 1, 0, 0, 1, 0]);
        assert_eq!(as_bits(lsb_first), vec![0, 1, 0, 0, 1, 1, 0, 1]);
    }

    #[test]
    fn test_put_bit() {
        let mut cache = BitCache::default();
        cache.seed_write(BitOrder::M2L, true);
        cache.put_bit(BitOrder::M2L, false);
        cache.put_bit(BitOrder::M2L, true);
        assert_eq!(cache, BitCache { buffer: 0b1010_0000, count: 5 });

        cache.seed_write(BitOrder::L2M, true);
        cache.put_bit(BitOrder::L2M, true);
        assert_eq!(cache, BitCache { buffer: 0b0000_0011, count: 6 });
        cache.clear();
        assert!(cache.is_aligned());
    }
}
