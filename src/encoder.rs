//! Sequential encoder over a growable buffer
//!
//! The writer appends values in the order the caller issues them; the caller's
//! sequence of calls is the schema. Nothing is validated beyond the few
//! caller-contract checks documented on individual methods.

use alloc::vec::Vec;
use core::time::Duration;

use crate::buffer::ByteBuffer;
use crate::codec::Encode;
use crate::error::{Error, Result};
use crate::{DEFAULT_CAPACITY, LENGTH_PREFIX_SIZE, OPTION_NONE, OPTION_SOME};

/// Encoder that owns and grows its output buffer
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: ByteBuffer,
}

impl Writer {
    /// Create a writer with the default initial capacity
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a writer with a caller-hinted initial capacity
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: ByteBuffer::with_capacity(capacity),
        }
    }

    /// Write a u8 value
    #[inline]
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.buf.put(&[value])
    }

    /// Write a u16 value (little-endian)
    #[inline]
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.buf.put(&value.to_le_bytes())
    }

    /// Write a u32 value (little-endian)
    #[inline]
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.buf.put(&value.to_le_bytes())
    }

    /// Write a u64 value (little-endian)
    #[inline]
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.buf.put(&value.to_le_bytes())
    }

    /// Write an i8 value
    #[inline]
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Write an i16 value (little-endian)
    #[inline]
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_u16(value as u16)
    }

    /// Write an i32 value (little-endian)
    #[inline]
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_u32(value as u32)
    }

    /// Write an i64 value (little-endian)
    #[inline]
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_u64(value as u64)
    }

    /// Write an IEEE-754 single (little-endian)
    #[inline]
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.buf.put(&value.to_le_bytes())
    }

    /// Write an IEEE-754 double (little-endian)
    #[inline]
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.buf.put(&value.to_le_bytes())
    }

    /// Write a boolean as `0x01` or `0x00`
    #[inline]
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Write raw bytes without length prefix
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf.put(bytes)
    }

    /// Write bytes with a u64 length prefix
    #[inline]
    pub fn write_byte_buf(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_len(bytes.len())?;
        self.buf.put(bytes)
    }

    /// Write a UTF-8 string with a u64 byte-length prefix
    #[inline]
    pub fn write_str(&mut self, value: &str) -> Result<()> {
        self.write_byte_buf(value.as_bytes())
    }

    /// Write exactly `n` bytes of `value`, zero-padded or truncated
    ///
    /// Truncation happens at the last character boundary that fits, so the
    /// field always decodes as UTF-8; any bytes freed that way are padding.
    pub fn write_fixed_str(&mut self, value: &str, n: usize) -> Result<()> {
        let mut cut = value.len().min(n);
        while !value.is_char_boundary(cut) {
            cut -= 1;
        }
        self.buf.put(&value.as_bytes()[..cut])?;
        self.buf.put_zeros(n - cut)
    }

    /// Write a u64 length or count prefix
    #[inline]
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        self.write_u64(len as u64)
    }

    /// Write an enum discriminant as a u32 variant index
    #[inline]
    pub fn write_variant(&mut self, index: u32) -> Result<()> {
        self.write_u32(index)
    }

    /// Write a duration as i64 seconds and u32 nanoseconds
    ///
    /// Durations longer than `i64::MAX` seconds fail with
    /// [`Error::InvalidDuration`] before anything is written.
    #[inline]
    pub fn write_duration(&mut self, value: Duration) -> Result<()> {
        let secs = i64::try_from(value.as_secs()).map_err(|_| Error::InvalidDuration)?;
        self.write_i64(secs)?;
        self.write_u32(value.subsec_nanos())
    }

    /// Write an optional value: tag byte, then the payload if present
    #[inline]
    pub fn write_option<T, F>(&mut self, value: Option<&T>, write: F) -> Result<()>
    where
        T: ?Sized,
        F: FnOnce(&mut Self, &T) -> Result<()>,
    {
        match value {
            Some(inner) => {
                self.write_u8(OPTION_SOME)?;
                write(self, inner)
            }
            None => self.write_u8(OPTION_NONE),
        }
    }

    /// Write a list with a u64 element-count prefix
    #[inline]
    pub fn write_list<T, F>(&mut self, items: &[T], write: F) -> Result<()>
    where
        F: FnMut(&mut Self, &T) -> Result<()>,
    {
        self.write_seq(items, write)
    }

    /// Write any exact-size sequence (e.g. a set) with a u64 count prefix
    pub fn write_seq<'i, T, I, F>(&mut self, items: I, mut write: F) -> Result<()>
    where
        T: 'i + ?Sized,
        I: IntoIterator<Item = &'i T>,
        I::IntoIter: ExactSizeIterator,
        F: FnMut(&mut Self, &T) -> Result<()>,
    {
        let items = items.into_iter();
        self.write_len(items.len())?;
        for item in items {
            write(self, item)?;
        }
        Ok(())
    }

    /// Write a map with a u64 pair-count prefix and interleaved keys and values
    ///
    /// Pairs are written in the iterator's order.
    pub fn write_map<'i, K, V, I, FK, FV>(
        &mut self,
        entries: I,
        mut write_key: FK,
        mut write_value: FV,
    ) -> Result<()>
    where
        K: 'i + ?Sized,
        V: 'i + ?Sized,
        I: IntoIterator<Item = (&'i K, &'i V)>,
        I::IntoIter: ExactSizeIterator,
        FK: FnMut(&mut Self, &K) -> Result<()>,
        FV: FnMut(&mut Self, &V) -> Result<()>,
    {
        let entries = entries.into_iter();
        self.write_len(entries.len())?;
        for (key, value) in entries {
            write_key(self, key)?;
            write_value(self, value)?;
        }
        Ok(())
    }

    /// Write a fixed-size array: exactly `N` elements, no prefix
    #[inline]
    pub fn write_array<T, F, const N: usize>(&mut self, items: &[T; N], mut write: F) -> Result<()>
    where
        F: FnMut(&mut Self, &T) -> Result<()>,
    {
        for item in items {
            write(self, item)?;
        }
        Ok(())
    }

    /// Write exactly `n` elements with no prefix
    ///
    /// Fails with [`Error::LengthMismatch`] before writing anything if
    /// `items.len() != n`.
    pub fn write_fixed_array<T, F>(&mut self, items: &[T], n: usize, mut write: F) -> Result<()>
    where
        F: FnMut(&mut Self, &T) -> Result<()>,
    {
        if items.len() != n {
            return Err(Error::LengthMismatch {
                expected: n,
                actual: items.len(),
            });
        }
        for item in items {
            write(self, item)?;
        }
        Ok(())
    }

    /// Inline a nested structure with no framing
    ///
    /// Only decodable when the reader knows the nested size out-of-band.
    #[inline]
    pub fn write_inline<F>(&mut self, write: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        write(self)
    }

    /// Write a nested structure behind a u64 byte-length prefix
    ///
    /// Reserves the prefix, runs `write`, then seeks back to patch in the
    /// byte count and restores the cursor to the end of the payload.
    pub fn write_length_prefixed<F>(&mut self, write: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let prefix_at = self.reserve(LENGTH_PREFIX_SIZE)?;
        let payload_start = self.position();
        write(self)?;
        let end = self.position();
        let len = end.saturating_sub(payload_start);

        self.seek(prefix_at)?;
        self.write_len(len)?;
        self.seek(end)
    }

    /// Encode a value through its [`Encode`] impl
    #[inline]
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(self)
    }

    /// Encode a value behind a u64 byte-length prefix
    #[inline]
    pub fn encode_length_prefixed<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.write_length_prefixed(|w| value.encode(w))
    }

    /// Write `n` zero bytes at the cursor and return their offset
    #[inline]
    pub fn reserve(&mut self, n: usize) -> Result<usize> {
        let at = self.position();
        self.buf.put_zeros(n)?;
        Ok(at)
    }

    /// Overwrite an already-written u32 at `offset` without moving the cursor
    #[inline]
    pub fn patch_u32(&mut self, offset: usize, value: u32) -> Result<()> {
        self.check_written(offset, 4)?;
        self.buf.set_u32(offset, value)
    }

    /// Overwrite an already-written u64 at `offset` without moving the cursor
    #[inline]
    pub fn patch_u64(&mut self, offset: usize, value: u64) -> Result<()> {
        self.check_written(offset, 8)?;
        self.buf.set_u64(offset, value)
    }

    fn check_written(&self, offset: usize, n: usize) -> Result<()> {
        match offset.checked_add(n) {
            Some(end) if end <= self.buf.len() => Ok(()),
            _ => Err(Error::SeekOutOfBounds),
        }
    }

    /// Move the cursor to `pos`, which must not exceed [`Writer::len`]
    #[inline]
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        self.buf.set_position(pos)
    }

    /// Get current position in buffer
    #[inline]
    pub fn position(&self) -> usize {
        self.buf.position()
    }

    /// Highest offset ever written (the extracted length)
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Allocated capacity of the underlying buffer
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The written range `[0, len)`, independent of the cursor
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_slice()
    }

    /// Owned copy of the written range that outlives [`Writer::reset`]
    #[inline]
    pub fn to_vec(&self) -> Vec<u8> {
        self.buf.as_slice().to_vec()
    }

    /// Consume the writer and return the written range
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.buf.into_vec()
    }

    /// Reset encoder for reuse, keeping the allocation
    #[inline]
    pub fn reset(&mut self) {
        self.buf.reset();
    }

    /// Write the encoded bytes to `out`
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        out.write_all(self.as_bytes())
    }
}
