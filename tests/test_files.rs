/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

mod common;

use anyhow::Result;
use bitflow::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::fs::File;
use tempfile::NamedTempFile;

#[test]
fn test_file_roundtrip() -> Result<()> {
    common::init_logger();
    let tmp_file = NamedTempFile::new()?;
    let mut rng = SmallRng::seed_from_u64(0);
    let values = (0..10_000)
        .map(|_| {
            let n = rng.random_range(1..=MAX_BITS);
            (n, get_lowest_bits(rng.random::<u32>(), n))
        })
        .collect::<Vec<_>>();

    let mut writer = Bitstream::new(
        WriterBackend::new(File::create(tmp_file.path())?),
        Direction::Output,
    )?;
    for &(n, value) in &values {
        writer.write_bits31(M2L, n, value)?;
        writer.write_u32(M2L, ByteOrder::LittleEndian, value)?;
    }
    let bits = writer.position().unwrap();
    writer.close()?;
    assert_eq!(std::fs::metadata(tmp_file.path())?.len(), bits.div_ceil(8));

    let mut reader = Bitstream::new(
        ReaderBackend::new(File::open(tmp_file.path())?),
        Direction::Input,
    )?;
    for &(n, value) in &values {
        assert_eq!(reader.read_bits31(M2L, n)?, Some(value));
        assert_eq!(reader.read_u32(M2L, ByteOrder::LittleEndian)?, Some(value));
    }
    // padding of the last byte
    assert!(reader.skip(8)? < 8);
    assert_eq!(reader.read_bit(M2L)?, None);
    reader.close()?;
    Ok(())
}

#[test]
fn test_file_skip() -> Result<()> {
    common::init_logger();
    let tmp_file = NamedTempFile::new()?;
    let mut writer = Bitstream::new(
        WriterBackend::with_capacity(16, File::create(tmp_file.path())?),
        Direction::Output,
    )?;
    writer.write_u8(M2L, 0xFF)?;
    assert_eq!(writer.skip(1000 * 8)?, 8000);
    writer.write_u16(M2L, ByteOrder::BigEndian, 0xBEEF)?;
    writer.close()?;

    let data = std::fs::read(tmp_file.path())?;
    assert_eq!(data.len(), 1003);
    assert!(data[1..1001].iter().all(|&b| b == 0));
    assert_eq!(read_u16_at(ByteOrder::BigEndian, &data, 1001)?, 0xBEEF);

    let mut reader = Bitstream::new(
        ReaderBackend::with_capacity(16, File::open(tmp_file.path())?),
        Direction::Input,
    )?;
    assert_eq!(reader.skip(1001 * 8 + 4)?, 8012);
    assert_eq!(reader.read_bits31(M2L, 12)?, Some(0xEEF));
    Ok(())
}
