/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

mod common;

use anyhow::Result;
use bitflow::prelude::*;
use common::CountingBackend;

#[test]
fn test_bit_order() -> Result<()> {
    common::init_logger();
    let data = [0b1011_0010_u8];
    for (order, expected) in [
        (M2L, [1_u8, 0, 1, 1, 0, 0, 1, 0]),
        (L2M, [0, 1, 0, 0, 1, 1, 0, 1]),
    ] {
        let mut bits = Bitstream::new(SliceBackend::new(&data), Direction::Input)?;
        let mut read = Vec::new();
        while let Some(bit) = bits.read_bit(order)? {
            read.push(bit as u8);
        }
        assert_eq!(read, expected);

        // the same bits written back give the same byte
        let mut writer = Bitstream::new(MemBackend::new(vec![0_u8; 1]), Direction::Output)?;
        for &bit in &expected {
            writer.write_bit(order, bit != 0)?;
        }
        assert_eq!(writer.into_inner().unwrap().into_inner(), data);
    }
    Ok(())
}

#[test]
fn test_u32_byte_order() -> Result<()> {
    common::init_logger();
    let data = [0x12_u8, 0x34, 0x56, 0x78];
    for (byte_order, expected) in [
        (ByteOrder::BigEndian, 0x1234_5678),
        (ByteOrder::LittleEndian, 0x7856_3412),
    ] {
        let mut bits = Bitstream::new(SliceBackend::new(&data), Direction::Input)?;
        assert_eq!(bits.read_u32(M2L, byte_order)?, Some(expected));
        assert_eq!(bits.read_u8(M2L)?, None);

        assert_eq!(read_u32_at(byte_order, &data, 0)?, expected);

        let mut writer = Bitstream::new(MemBackend::new(vec![0_u8; 4]), Direction::Output)?;
        writer.write_u32(M2L, byte_order, expected)?;
        assert_eq!(writer.into_inner().unwrap().into_inner(), data);
    }
    Ok(())
}

#[test]
fn test_flush() -> Result<()> {
    common::init_logger();
    let mut writer = Bitstream::new(
        CountingBackend::new(MemBackend::new(vec![0_u8; 4])),
        Direction::Output,
    )?;
    writer.write_bits31(M2L, 3, 0b111)?;
    assert_eq!(writer.backend().unwrap().writes, 0);
    writer.flush()?;
    assert_eq!(writer.backend().unwrap().writes, 1);
    assert_eq!(writer.bit_count(), 0);
    writer.flush()?;
    assert_eq!(writer.backend().unwrap().writes, 1);
    assert_eq!(writer.backend().unwrap().flushes, 2);
    assert_eq!(writer.position(), Some(8));

    let backend = writer.into_inner().unwrap();
    assert_eq!(backend.inner.into_inner(), vec![0b1110_0000, 0, 0, 0]);
    Ok(())
}

#[test]
fn test_position_accounting() -> Result<()> {
    common::init_logger();
    // 0 + 1 + ... + 31 bits
    let mut writer = Bitstream::new(MemBackend::new(vec![0_u8; 62]), Direction::Output)?;
    let mut expected = 0;
    for n in 0..=MAX_BITS {
        writer.write_bits31(M2L, n, 0)?;
        expected += n as u64;
        assert_eq!(writer.position(), Some(expected));
        assert_eq!(writer.bit_position() as u64, expected % 8);
    }
    writer.flush()?;
    let data = writer.into_inner().unwrap().into_inner();

    let mut reader = Bitstream::new(SliceBackend::new(&data), Direction::Input)?;
    let mut expected = 0;
    for n in (0..=MAX_BITS).rev() {
        reader.read_bits31(L2M, n)?;
        expected += n as u64;
        assert_eq!(reader.position(), Some(expected));
    }
    Ok(())
}

#[test]
fn test_configuration_errors() -> Result<()> {
    common::init_logger();
    let data = [1_u8, 2, 3];
    let backend = CountingBackend::new(SliceBackend::new(&data));
    let err = Bitstream::new(backend, Direction::Output).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    // validation happens before any I/O on the backend
    let mut bits = Bitstream::new(CountingBackend::new(SliceBackend::new(&data)), Direction::Input)?;
    let err = bits
        .set_stream(CountingBackend::new(SliceBackend::new(&data)), Direction::Output)
        .unwrap_err();
    assert!(matches!(
        err,
        BitstreamError::UnsupportedDirection(Direction::Output)
    ));
    assert_eq!(bits.backend().unwrap().io_calls(), 0);
    assert_eq!(bits.read_u8(M2L)?, Some(1));
    Ok(())
}

#[derive(Debug)]
struct Inert;

impl ByteBackend for Inert {
    fn can_input(&self) -> bool {
        false
    }
    fn can_output(&self) -> bool {
        false
    }
    fn position(&self) -> u64 {
        0
    }
    fn skip(&mut self, _n: i64) -> bitflow::Result<i64> {
        Ok(0)
    }
    fn close(&mut self) -> bitflow::Result<()> {
        Ok(())
    }
}

#[test]
fn test_no_capability() {
    common::init_logger();
    for direction in [Direction::Input, Direction::Output] {
        assert!(matches!(
            Bitstream::new(Inert, direction),
            Err(BitstreamError::NoCapability)
        ));
    }
}

#[test]
fn test_closed() -> Result<()> {
    common::init_logger();
    let mut buffer = vec![0_u8; 4];
    let mut bits = Bitstream::new(MemBackend::new(&mut buffer[..]), Direction::Output)?;
    bits.write_bits31(M2L, 12, 0xABC)?;
    bits.close()?;
    bits.close()?;
    assert!(bits.is_closed());
    assert_eq!(bits.position(), None);

    let closed = |err: BitstreamError| matches!(err, BitstreamError::Closed);
    assert!(closed(bits.write_bit(M2L, true).unwrap_err()));
    assert!(closed(bits.write_bits31(M2L, 3, 1).unwrap_err()));
    assert!(closed(bits.write_u8(M2L, 1).unwrap_err()));
    assert!(closed(bits.write_u16(L2M, ByteOrder::BigEndian, 1).unwrap_err()));
    assert!(closed(bits.write_u32(M2L, ByteOrder::BigEndian, 1).unwrap_err()));
    assert!(closed(bits.read_bit(M2L).unwrap_err()));
    assert!(closed(bits.read_u32(M2L, ByteOrder::LittleEndian).unwrap_err()));
    assert!(closed(bits.skip(1).unwrap_err()));
    assert!(closed(bits.flush().unwrap_err()));
    assert!(closed(bits.mark(1).unwrap_err()));
    assert!(closed(bits.reset().unwrap_err()));
    assert_eq!(bits.skip(-1).unwrap_err().kind(), ErrorKind::InvalidState);
    assert!(bits.into_inner().is_none());
    // close flushed the partial byte
    assert_eq!(buffer, vec![0xAB, 0xC0, 0, 0]);
    Ok(())
}

#[test]
fn test_set_stream() -> Result<()> {
    common::init_logger();
    let mut bits = Bitstream::new(MemBackend::new(vec![0_u8; 2]), Direction::Output)?;
    bits.write_bits31(L2M, 4, 0b1111)?;
    // the pending bits are flushed on rebinding
    let previous = bits
        .set_stream(MemBackend::new(vec![0x80_u8]), Direction::Input)?
        .unwrap();
    assert_eq!(previous.into_inner(), vec![0x0F, 0]);
    assert_eq!(bits.direction(), Direction::Input);
    assert!(bits.can_input());
    assert_eq!(bits.read_bit(M2L)?, Some(true));
    assert!(matches!(
        bits.write_bit(M2L, true),
        Err(BitstreamError::WrongMode {
            expected: Direction::Output
        })
    ));

    bits.close()?;
    assert!(bits
        .set_stream(MemBackend::new(vec![0_u8; 1]), Direction::Output)?
        .is_none());
    assert_eq!(bits.write_u8(M2L, 0x5A)?, Some(0x5A));
    assert_eq!(bits.write_u8(M2L, 0x5A)?, None);
    Ok(())
}
