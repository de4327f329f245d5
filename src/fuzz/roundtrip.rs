/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::prelude::*;
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug, Clone, Copy)]
pub enum RandomCommand {
    Bit(bool),
    /// Width (modulo 32) and value
    Bits(u8, u32),
    U8(u8),
    U16(ByteOrder, u16),
    U32(ByteOrder, u32),
    Skip(u8),
}

impl RandomCommand {
    /// Return the command with its width and value normalized.
    fn normalize(self) -> Self {
        match self {
            Self::Bits(n, value) => {
                let n = n % (MAX_BITS as u8 + 1);
                Self::Bits(n, get_lowest_bits(value, n as u32))
            }
            command => command,
        }
    }

    /// Number of bits the command moves.
    fn len(&self) -> u64 {
        match self {
            Self::Bit(_) => 1,
            Self::Bits(n, _) => *n as u64,
            Self::U8(_) => 8,
            Self::U16(..) => 16,
            Self::U32(..) => 32,
            Self::Skip(n) => *n as u64,
        }
    }
}

#[derive(Arbitrary, Debug)]
pub struct FuzzCase {
    pub order: BitOrder,
    pub commands: Vec<RandomCommand>,
    /// Index of the command before which the reader is marked
    pub mark_at: u8,
}

fn write<B: ByteBackend>(writer: &mut Bitstream<B>, order: BitOrder, command: RandomCommand) {
    match command {
        RandomCommand::Bit(bit) => {
            assert!(writer.write_bit(order, bit).unwrap().is_some());
        }
        RandomCommand::Bits(n, value) => {
            assert_eq!(writer.write_bits31(order, n as u32, value).unwrap(), Some(value));
        }
        RandomCommand::U8(value) => {
            assert_eq!(writer.write_u8(order, value).unwrap(), Some(value));
        }
        RandomCommand::U16(byte_order, value) => {
            assert_eq!(
                writer.write_u16(order, byte_order, value).unwrap(),
                Some(value)
            );
        }
        RandomCommand::U32(byte_order, value) => {
            assert_eq!(
                writer.write_u32(order, byte_order, value).unwrap(),
                Some(value)
            );
        }
        RandomCommand::Skip(n) => {
            assert_eq!(writer.skip(n as i64).unwrap(), n as u64);
        }
    }
}

fn check<B: ByteBackend>(reader: &mut Bitstream<B>, order: BitOrder, command: RandomCommand) {
    match command {
        RandomCommand::Bit(bit) => {
            assert_eq!(reader.read_bit(order).unwrap(), Some(bit));
        }
        RandomCommand::Bits(n, value) => {
            assert_eq!(reader.read_bits31(order, n as u32).unwrap(), Some(value));
        }
        RandomCommand::U8(value) => {
            assert_eq!(reader.read_u8(order).unwrap(), Some(value));
        }
        RandomCommand::U16(byte_order, value) => {
            assert_eq!(reader.read_u16(order, byte_order).unwrap(), Some(value));
        }
        RandomCommand::U32(byte_order, value) => {
            assert_eq!(reader.read_u32(order, byte_order).unwrap(), Some(value));
        }
        RandomCommand::Skip(n) => {
            assert_eq!(reader.skip(n as i64).unwrap(), n as u64);
        }
    }
}

/// Write the commands on a buffer with exactly the room they need, then read
/// them back, checking values and positions, and read them again from a mark.
pub fn harness(data: FuzzCase) {
    let order = data.order;
    let mark_at = data.mark_at as usize;
    let commands = data
        .commands
        .into_iter()
        .map(RandomCommand::normalize)
        .collect::<Vec<_>>();
    let total_bits = commands.iter().map(RandomCommand::len).sum::<u64>();
    let len = total_bits.div_ceil(8) as usize;

    let mut writer = Bitstream::new(MemBackend::new(vec![0_u8; len]), Direction::Output).unwrap();
    let mut positions = Vec::with_capacity(commands.len() + 1);
    for &command in &commands {
        positions.push(writer.position().unwrap());
        write(&mut writer, order, command);
    }
    positions.push(writer.position().unwrap());
    assert_eq!(positions.last().copied(), Some(total_bits));
    writer.flush().unwrap();
    // flushing twice writes nothing
    writer.flush().unwrap();
    assert_eq!(writer.position(), Some(len as u64 * 8));
    let buffer = writer.into_inner().unwrap().into_inner();

    let mut reader = Bitstream::new(SliceBackend::new(&buffer), Direction::Input).unwrap();
    for (i, &command) in commands.iter().enumerate() {
        if i == mark_at {
            reader.mark(0).unwrap();
        }
        assert_eq!(reader.position(), Some(positions[i]));
        check(&mut reader, order, command);
    }
    assert_eq!(reader.position(), Some(total_bits));

    if mark_at < commands.len() {
        reader.reset().unwrap();
        for (i, &command) in commands.iter().enumerate().skip(mark_at) {
            assert_eq!(reader.position(), Some(positions[i]));
            check(&mut reader, order, command);
        }
    } else {
        assert!(matches!(reader.reset(), Err(BitstreamError::NoMark)));
    }
    reader.close().unwrap();
    assert!(matches!(reader.read_bit(order), Err(BitstreamError::Closed)));
}
