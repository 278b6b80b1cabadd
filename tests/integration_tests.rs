//! Integration tests for fixbin
//!
//! These tests verify end-to-end behaviour of the writer and reader against
//! exact byte layouts.

use fixbin::*;
use std::collections::BTreeMap;
use std::time::Duration;

#[test]
fn test_fixed_string_padding_and_truncation() {
    let mut writer = Writer::new();
    writer.write_fixed_str("AB", 5).unwrap();
    assert_eq!(writer.as_bytes(), &[0x41, 0x42, 0x00, 0x00, 0x00]);

    writer.reset();
    writer.write_fixed_str("TOOLONG", 4).unwrap();
    assert_eq!(writer.as_bytes(), &[0x54, 0x4F, 0x4F, 0x4C]);

    let mut reader = Reader::new(writer.as_bytes());
    assert_eq!(reader.read_fixed_str(4).unwrap(), "TOOL");
}

#[test]
fn test_fixed_string_clean_roundtrip() {
    let mut writer = Writer::new();
    writer.write_fixed_str("EURUSD", 12).unwrap();
    writer.write_fixed_str("", 3).unwrap();
    assert_eq!(writer.len(), 15);

    let mut reader = Reader::new(writer.as_bytes());
    assert_eq!(reader.read_fixed_str_clean(12).unwrap(), "EURUSD");
    assert_eq!(reader.read_fixed_str_clean(3).unwrap(), "");
    assert!(reader.is_at_end());
}

#[test]
fn test_option_encoding() {
    let mut writer = Writer::new();
    writer.write_option(None::<&u32>, |w, v| w.write_u32(*v)).unwrap();
    assert_eq!(writer.as_bytes(), &[0x00]);

    writer.reset();
    writer.write_option(Some(&7u32), |w, v| w.write_u32(*v)).unwrap();
    assert_eq!(writer.as_bytes(), &[0x01, 0x07, 0x00, 0x00, 0x00]);

    let mut reader = Reader::new(writer.as_bytes());
    assert_eq!(reader.read_option(|r| r.read_u32()).unwrap(), Some(7));
}

#[test]
fn test_boolean_strictness() {
    for (byte, expected) in [(0x00u8, Ok(false)), (0x01, Ok(true))] {
        let data = [byte];
        assert_eq!(Reader::new(&data).read_bool(), expected);
    }

    for byte in [0x02u8, 0x80, 0xFF] {
        let data = [byte];
        assert_eq!(
            Reader::new(&data).read_bool(),
            Err(Error::InvalidBooleanValue(byte))
        );
    }
}

#[test]
fn test_collection_framing() {
    let mut writer = Writer::new();
    writer.write_list(&[1u8, 2, 3], |w, v| w.write_u8(*v)).unwrap();
    assert_eq!(
        writer.as_bytes(),
        &[0x03, 0, 0, 0, 0, 0, 0, 0, 0x01, 0x02, 0x03]
    );
}

#[test]
fn test_growth_preserves_written_bytes() {
    let mut writer = Writer::with_capacity(4);

    for i in 0..1_000u32 {
        writer.write_u32(i.wrapping_mul(2_654_435_761)).unwrap();
        writer.write_u8(i as u8).unwrap();
    }
    assert!(writer.capacity() >= 5_000);

    let mut reader = Reader::new(writer.as_bytes());
    for i in 0..1_000u32 {
        assert_eq!(reader.read_u32().unwrap(), i.wrapping_mul(2_654_435_761));
        assert_eq!(reader.read_u8().unwrap(), i as u8);
    }
    reader.finish().unwrap();
}

#[test]
fn test_truncated_buffer_detection() {
    let mut writer = Writer::new();
    writer.write_u64(u64::MAX).unwrap();
    writer.write_str("truncate me").unwrap();
    writer.write_f64(1.25).unwrap();
    let bytes = writer.to_vec();

    // Every proper prefix must fail cleanly rather than produce garbage
    for cut in 0..bytes.len() {
        let mut reader = Reader::new(&bytes[..cut]);
        let result = (|| {
            reader.read_u64()?;
            reader.read_str()?;
            reader.read_f64()
        })();
        assert_eq!(result, Err(Error::UnexpectedEndOfBuffer), "cut at {}", cut);
    }

    let mut reader = Reader::new(&bytes);
    reader.read_u64().unwrap();
    assert_eq!(reader.read_str().unwrap(), "truncate me");
    assert_eq!(reader.read_f64().unwrap(), 1.25);
}

#[test]
fn test_cursor_reposition() {
    let mut writer = Writer::new();
    writer.write_u64(0x1111_1111_1111_1111).unwrap();
    writer.write_u64(0x2222_2222_2222_2222).unwrap();
    assert_eq!(writer.len(), 16);

    writer.seek(4).unwrap();
    writer.write_u16(0xBEEF).unwrap();
    assert_eq!(writer.position(), 6);

    // Extraction covers the high-water mark, not the cursor
    let bytes = writer.as_bytes();
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[4..6], &[0xEF, 0xBE]);
    assert_eq!(&bytes[8..], &[0x22; 8]);

    assert_eq!(writer.seek(17), Err(Error::SeekOutOfBounds));
}

#[test]
fn test_manual_backpatch_protocol() {
    let mut writer = Writer::new();
    let prefix_at = writer.reserve(LENGTH_PREFIX_SIZE).unwrap();
    let payload_start = writer.position();
    writer.write_str("payload").unwrap();
    writer.write_u16(9).unwrap();
    let end = writer.position();

    writer.seek(prefix_at).unwrap();
    writer.write_len(end - payload_start).unwrap();
    writer.seek(end).unwrap();
    writer.write_u8(0xEE).unwrap();

    let mut reader = Reader::new(writer.as_bytes());
    let (s, n) = reader
        .read_length_prefixed(|r| Ok((r.read_str()?, r.read_u16()?)))
        .unwrap();
    assert_eq!((s, n), ("payload", 9));
    assert_eq!(reader.read_u8().unwrap(), 0xEE);
    reader.finish().unwrap();
}

#[test]
fn test_length_prefix_exactness() {
    let mut writer = Writer::new();
    writer
        .write_length_prefixed(|w| {
            w.write_str("nested")?;
            w.write_list(&[10i32, -10], |w, v| w.write_i32(*v))?;
            w.write_option(Some(&true), |w, v| w.write_bool(*v))
        })
        .unwrap();

    let bytes = writer.as_bytes();
    let declared = u64::from_le_bytes(bytes[..8].try_into().unwrap()) as usize;
    assert_eq!(declared, bytes.len() - LENGTH_PREFIX_SIZE);

    // A strict reader proves the nested decode consumed exactly the prefix
    let mut reader = Reader::with_config(bytes, Config::new().strict_nested());
    let (s, list, flag) = reader
        .read_length_prefixed(|r| {
            let s = r.read_string()?;
            let list = r.read_list(|r| r.read_i32())?;
            let flag = r.read_option(|r| r.read_bool())?;
            Ok((s, list, flag))
        })
        .unwrap();
    assert_eq!(s, "nested");
    assert_eq!(list, vec![10, -10]);
    assert_eq!(flag, Some(true));
    reader.finish().unwrap();
}

#[test]
fn test_deeply_nested_length_prefixes() {
    fn write_level(w: &mut Writer, depth: u8) -> Result<()> {
        w.write_u8(depth)?;
        if depth > 0 {
            w.write_length_prefixed(|w| write_level(w, depth - 1))?;
        }
        Ok(())
    }

    fn read_level(r: &mut Reader<'_>) -> Result<u32> {
        let depth = r.read_u8()?;
        if depth == 0 {
            return Ok(0);
        }
        Ok(1 + r.read_length_prefixed(read_level)?)
    }

    let mut writer = Writer::with_capacity(1);
    write_level(&mut writer, 20).unwrap();

    let mut reader = Reader::with_config(writer.as_bytes(), Config::new().strict_nested());
    assert_eq!(read_level(&mut reader).unwrap(), 20);
    reader.finish().unwrap();
}

#[test]
fn test_inline_and_sized_nested() {
    // A point is two i32s: 8 bytes known out-of-band
    let mut writer = Writer::new();
    writer
        .write_inline(|w| {
            w.write_i32(-3)?;
            w.write_i32(4)
        })
        .unwrap();
    writer
        .write_inline(|w| {
            w.write_i32(5)?;
            w.write_i32(-6)
        })
        .unwrap();
    assert_eq!(writer.len(), 16);

    let mut reader = Reader::new(writer.as_bytes());
    let a = reader
        .read_inline(|r| Ok((r.read_i32()?, r.read_i32()?)))
        .unwrap();
    // Sized read: the nested decode only reads the first i32, cursor still moves 8
    let b = reader.read_sized(8, |r| r.read_i32()).unwrap();
    assert_eq!(a, (-3, 4));
    assert_eq!(b, 5);
    assert!(reader.is_at_end());
}

#[test]
fn test_map_and_fixed_array() {
    let mut prices = BTreeMap::new();
    prices.insert("AAPL".to_string(), 189_250_000i64);
    prices.insert("MSFT".to_string(), 402_100_000i64);

    let mut writer = Writer::new();
    writer
        .write_map(&prices, |w, k| w.write_str(k), |w, v| w.write_i64(*v))
        .unwrap();
    writer
        .write_array(&[1.5f32, -2.0, 0.0], |w, v| w.write_f32(*v))
        .unwrap();
    writer
        .write_fixed_array(&[7u16, 8], 2, |w, v| w.write_u16(*v))
        .unwrap();

    let mut reader = Reader::new(writer.as_bytes());
    let decoded: BTreeMap<String, i64> = reader
        .read_map(|r| r.read_string(), |r| r.read_i64())
        .unwrap();
    let floats: [f32; 3] = reader.read_array(|r| r.read_f32()).unwrap();
    let shorts = reader.read_fixed_array(2, |r| r.read_u16()).unwrap();

    assert_eq!(decoded, prices);
    assert_eq!(floats, [1.5, -2.0, 0.0]);
    assert_eq!(shorts, vec![7, 8]);
    reader.finish().unwrap();
}

#[test]
fn test_boundary_values() {
    let mut writer = Writer::new();
    writer.write_u8(u8::MAX).unwrap();
    writer.write_i8(i8::MIN).unwrap();
    writer.write_u16(u16::MAX).unwrap();
    writer.write_i16(i16::MIN).unwrap();
    writer.write_u32(u32::MAX).unwrap();
    writer.write_i32(i32::MIN).unwrap();
    writer.write_u64(u64::MAX).unwrap();
    writer.write_i64(i64::MIN).unwrap();
    writer.write_f32(f32::INFINITY).unwrap();
    writer.write_f64(f64::NEG_INFINITY).unwrap();
    writer.write_f64(f64::NAN).unwrap();
    writer.write_str("").unwrap();
    writer.write_list::<u8, _>(&[], |w, v| w.write_u8(*v)).unwrap();

    let mut reader = Reader::new(writer.as_bytes());
    assert_eq!(reader.read_u8().unwrap(), u8::MAX);
    assert_eq!(reader.read_i8().unwrap(), i8::MIN);
    assert_eq!(reader.read_u16().unwrap(), u16::MAX);
    assert_eq!(reader.read_i16().unwrap(), i16::MIN);
    assert_eq!(reader.read_u32().unwrap(), u32::MAX);
    assert_eq!(reader.read_i32().unwrap(), i32::MIN);
    assert_eq!(reader.read_u64().unwrap(), u64::MAX);
    assert_eq!(reader.read_i64().unwrap(), i64::MIN);
    assert_eq!(reader.read_f32().unwrap(), f32::INFINITY);
    assert_eq!(reader.read_f64().unwrap(), f64::NEG_INFINITY);
    assert!(reader.read_f64().unwrap().is_nan());
    assert_eq!(reader.read_str().unwrap(), "");
    assert!(reader.read_list(|r| r.read_u8()).unwrap().is_empty());
    reader.finish().unwrap();
}

#[test]
fn test_enum_and_duration_layout() {
    let mut writer = Writer::new();
    writer.write_variant(2).unwrap();
    writer
        .write_duration(Duration::new(3, 500_000_000))
        .unwrap();

    assert_eq!(
        writer.as_bytes(),
        &[
            2, 0, 0, 0, // variant index
            3, 0, 0, 0, 0, 0, 0, 0, // seconds
            0x00, 0x65, 0xCD, 0x1D, // 500_000_000 nanos
        ]
    );

    let mut reader = Reader::new(writer.as_bytes());
    assert_eq!(reader.read_variant().unwrap(), 2);
    assert_eq!(
        reader.read_duration().unwrap(),
        Duration::from_millis(3_500)
    );
}

#[test]
fn test_duration_boundaries() {
    let longest = Duration::new(i64::MAX as u64, 999_999_999);
    let bytes = to_vec(&longest).unwrap();
    assert_eq!(from_bytes_exact::<Duration>(&bytes).unwrap(), longest);

    assert_eq!(to_vec(&Duration::MAX), Err(Error::InvalidDuration));
    assert_eq!(
        to_vec(&Duration::new(i64::MAX as u64 + 1, 0)),
        Err(Error::InvalidDuration)
    );

    // Negative seconds and out-of-range nanos never come from a Writer
    let mut writer = Writer::new();
    writer.write_i64(-1).unwrap();
    writer.write_u32(0).unwrap();
    assert_eq!(
        from_bytes::<Duration>(writer.as_bytes()),
        Err(Error::InvalidDuration)
    );

    writer.reset();
    writer.write_i64(1).unwrap();
    writer.write_u32(1_000_000_000).unwrap();
    assert_eq!(
        from_bytes::<Duration>(writer.as_bytes()),
        Err(Error::InvalidDuration)
    );
}

#[test]
fn test_shared_input_multiple_readers() {
    let bytes = to_vec(&(1u8, "shared".to_string(), vec![9u64; 4])).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let bytes = bytes.clone();
            std::thread::spawn(move || {
                from_bytes_exact::<(u8, String, Vec<u64>)>(&bytes).unwrap()
            })
        })
        .collect();

    let mut first = Reader::new(&bytes);
    let mut second = Reader::new(&bytes);
    assert_eq!(first.read_u8().unwrap(), 1);
    assert_eq!(second.read_u8().unwrap(), 1);
    assert_eq!(first.read_str().unwrap(), second.read_str().unwrap());

    for handle in handles {
        let (a, s, v) = handle.join().unwrap();
        assert_eq!((a, s.as_str(), v.len()), (1, "shared", 4));
    }
}

#[test]
fn test_extracted_bytes_survive_reset() {
    let mut pool = WriterPool::new(16, 2);
    let mut writer = pool.acquire();
    writer.write_str("first").unwrap();
    let first = writer.to_vec();
    pool.release(writer);

    let mut writer = pool.acquire();
    writer.write_str("second").unwrap();

    assert_eq!(from_bytes::<String>(&first).unwrap(), "first");
    assert_eq!(from_bytes::<String>(writer.as_bytes()).unwrap(), "second");
}

#[test]
fn test_flags_through_codec() {
    let flags = Flags8::from_bools([true, true, false, false, true, false, false, false]);

    let mut writer = Writer::new();
    writer.write_u8(flags.bits()).unwrap();
    writer.encode(&flags).unwrap();
    assert_eq!(writer.as_bytes(), &[0b0001_0011, 0b0001_0011]);

    let mut reader = Reader::new(writer.as_bytes());
    assert_eq!(Flags8::from_bits(reader.read_u8().unwrap()), flags);
    assert_eq!(reader.decode::<Flags8>().unwrap(), flags);
}

#[test]
fn test_error_conditions() {
    // Option tag out of range
    let data = [0x02, 0xFF];
    assert_eq!(
        Reader::new(&data).read_option(|r| r.read_u8()),
        Err(Error::InvalidOptionTag(2))
    );

    // Count larger than the configured limit
    let mut writer = Writer::new();
    writer.write_len(1_000).unwrap();
    let mut reader = Reader::with_config(writer.as_bytes(), Config::new().with_limit(64));
    assert_eq!(reader.read_byte_buf(), Err(Error::LimitExceeded));

    // Contract violation leaves the high-water mark untouched
    let mut writer = Writer::new();
    writer.write_u32(1).unwrap();
    let before = writer.len();
    assert!(writer
        .write_fixed_array(&[1u8], 4, |w, v| w.write_u8(*v))
        .is_err());
    assert_eq!(writer.len(), before);
}
