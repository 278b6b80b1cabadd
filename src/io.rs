//! Stream helpers over `std::io`
//!
//! These only move finished byte ranges in and out; all format logic stays in
//! [`Writer`] and [`Reader`]. Codec errors surface as `std::io::Error` via the
//! `From` impl in [`crate::error`].

use std::io::{Read, Write};
use std::vec::Vec;

use crate::codec::{Decode, Encode};
use crate::decoder::Reader;
use crate::encoder::Writer;

/// Encode `value` and write the bytes to `out`
pub fn encode_into<W, T>(mut out: W, value: &T) -> std::io::Result<()>
where
    W: Write,
    T: Encode + ?Sized,
{
    let mut writer = Writer::new();
    writer.encode(value)?;
    writer.write_to(&mut out)?;
    out.flush()
}

/// Read `src` to the end and decode one `T` spanning all of it
pub fn decode_from<R, T>(mut src: R) -> std::io::Result<T>
where
    R: Read,
    T: Decode,
{
    let mut bytes = Vec::new();
    src.read_to_end(&mut bytes)?;

    let mut reader = Reader::new(&bytes);
    let value = reader.decode()?;
    reader.finish()?;
    Ok(value)
}
