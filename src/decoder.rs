//! Zero-copy decoder over a borrowed byte slice
//!
//! A [`Reader`] never mutates or owns its input; any number of readers may
//! walk the same bytes at once. Strings and byte fields are returned as
//! slices of the input where the caller asks for borrowed forms.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use crate::codec::Decode;
use crate::config::{Config, NestedLength};
use crate::error::{Error, Result};
use crate::{OPTION_NONE, OPTION_SOME};

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Cursor for reading encoded values with position tracking
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    config: Config,
}

impl<'a> Reader<'a> {
    /// Create a reader with the default configuration
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_config(buf, Config::default())
    }

    /// Create a reader with explicit limits
    #[inline]
    pub fn with_config(buf: &'a [u8], config: Config) -> Self {
        Self {
            buf,
            pos: 0,
            config,
        }
    }

    /// Configuration in effect
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get current read position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get remaining bytes in cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Check if cursor is at end
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Move the cursor to `pos`, which must not exceed the input length
    #[inline]
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.buf.len() {
            return Err(Error::SeekOutOfBounds);
        }
        self.pos = pos;
        Ok(())
    }

    /// Skip bytes in the cursor
    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    /// Peek at bytes without advancing cursor
    #[inline]
    pub fn peek_bytes(&self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::UnexpectedEndOfBuffer);
        }
        Ok(&self.buf[self.pos..self.pos + len])
    }

    /// Require that every input byte has been consumed
    #[inline]
    pub fn finish(&self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(Error::TrailingBytes(n)),
        }
    }

    /// Read raw bytes without length prefix
    ///
    /// Returns a zero-copy slice into the original buffer
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(len)?;
        self.pos += len;
        Ok(bytes)
    }

    #[inline]
    fn read_array_bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a u8 value
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        if self.pos >= self.buf.len() {
            return Err(Error::UnexpectedEndOfBuffer);
        }
        let value = self.buf[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Read a u16 value (little-endian)
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array_bytes()?))
    }

    /// Read a u32 value (little-endian)
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array_bytes()?))
    }

    /// Read a u64 value (little-endian)
    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array_bytes()?))
    }

    /// Read an i8 value
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read an i16 value (little-endian)
    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    /// Read an i32 value (little-endian)
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Read an i64 value (little-endian)
    #[inline]
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_u64()? as i64)
    }

    /// Read an IEEE-754 single (little-endian)
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array_bytes()?))
    }

    /// Read an IEEE-754 double (little-endian)
    #[inline]
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array_bytes()?))
    }

    /// Read a boolean; only `0x00` and `0x01` are accepted
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::InvalidBooleanValue(other)),
        }
    }

    /// Read a u64 length or count prefix
    ///
    /// Rejects values that do not fit `usize` or exceed the configured limit.
    #[inline]
    pub fn read_len(&mut self) -> Result<usize> {
        let raw = self.read_u64()?;
        let len = usize::try_from(raw).map_err(|_| Error::LengthOverflow)?;
        if !self.config.check_limit(len) {
            return Err(Error::LimitExceeded);
        }
        Ok(len)
    }

    /// Read bytes behind a u64 length prefix
    #[inline]
    pub fn read_byte_buf(&mut self) -> Result<&'a [u8]> {
        let len = self.read_len()?;
        self.read_bytes(len)
    }

    /// Read a length-prefixed UTF-8 string without copying
    #[inline]
    pub fn read_str(&mut self) -> Result<&'a str> {
        let bytes = self.read_byte_buf()?;
        core::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
    }

    /// Read a length-prefixed UTF-8 string into an owned `String`
    #[inline]
    pub fn read_string(&mut self) -> Result<String> {
        self.read_str().map(String::from)
    }

    /// Read a fixed-width string of exactly `n` bytes, padding included
    #[inline]
    pub fn read_fixed_str(&mut self, n: usize) -> Result<&'a str> {
        let bytes = self.read_bytes(n)?;
        core::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
    }

    /// Read a fixed-width string and strip trailing NUL padding
    #[inline]
    pub fn read_fixed_str_clean(&mut self, n: usize) -> Result<&'a str> {
        Ok(self.read_fixed_str(n)?.trim_end_matches('\0'))
    }

    /// Read an enum discriminant (u32 variant index)
    #[inline]
    pub fn read_variant(&mut self) -> Result<u32> {
        self.read_u32()
    }

    /// Read a duration: i64 seconds then u32 nanoseconds
    #[inline]
    pub fn read_duration(&mut self) -> Result<Duration> {
        let secs = self.read_i64()?;
        let nanos = self.read_u32()?;
        if secs < 0 || nanos >= NANOS_PER_SEC {
            return Err(Error::InvalidDuration);
        }
        Ok(Duration::new(secs as u64, nanos))
    }

    /// Read an optional value: tag byte, then the payload if the tag is `1`
    #[inline]
    pub fn read_option<T, F>(&mut self, read: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        match self.read_u8()? {
            OPTION_NONE => Ok(None),
            OPTION_SOME => Ok(Some(read(self)?)),
            other => Err(Error::InvalidOptionTag(other)),
        }
    }

    /// Read a count-prefixed list
    ///
    /// Storage grows only as elements decode, so a forged count cannot
    /// reserve memory the input does not back. Zero-size elements (e.g.
    /// `Vec<()>`) consume no input, though: a forged count then runs that
    /// many iterations. Set [`Config::with_limit`] when decoding untrusted
    /// input.
    #[inline]
    pub fn read_list<T, F>(&mut self, read: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        self.read_collection(read)
    }

    /// Read a count-prefixed sequence into any collection (e.g. a set)
    ///
    /// Same count caveats as [`Reader::read_list`].
    pub fn read_collection<T, C, F>(&mut self, mut read: F) -> Result<C>
    where
        C: FromIterator<T>,
        F: FnMut(&mut Self) -> Result<T>,
    {
        let count = self.read_len()?;
        (0..count).map(|_| read(self)).collect()
    }

    /// Read a count-prefixed map of interleaved keys and values
    ///
    /// Same count caveats as [`Reader::read_list`].
    pub fn read_map<K, V, C, FK, FV>(&mut self, mut read_key: FK, mut read_value: FV) -> Result<C>
    where
        C: FromIterator<(K, V)>,
        FK: FnMut(&mut Self) -> Result<K>,
        FV: FnMut(&mut Self) -> Result<V>,
    {
        let count = self.read_len()?;
        (0..count)
            .map(|_| {
                let key = read_key(self)?;
                let value = read_value(self)?;
                Ok((key, value))
            })
            .collect()
    }

    /// Read a fixed-size array of `N` elements (no prefix)
    pub fn read_array<T, F, const N: usize>(&mut self, read: F) -> Result<[T; N]>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let items = self.read_fixed_array(N, read)?;
        let actual = items.len();
        items.try_into().map_err(|_| Error::LengthMismatch {
            expected: N,
            actual,
        })
    }

    /// Read exactly `n` elements (no prefix)
    pub fn read_fixed_array<T, F>(&mut self, n: usize, mut read: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        // Never reserve more slots than the input could possibly fill.
        let mut out = Vec::with_capacity(n.min(self.remaining()));
        for _ in 0..n {
            out.push(read(self)?);
        }
        Ok(out)
    }

    /// Decode an inlined nested structure on the shared cursor
    #[inline]
    pub fn read_inline<T, F>(&mut self, read: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        read(self)
    }

    /// Decode a nested structure whose encoded size `n` is known out-of-band
    ///
    /// The nested decode sees only those `n` bytes; the cursor advances by
    /// exactly `n`.
    #[inline]
    pub fn read_sized<T, F>(&mut self, n: usize, read: F) -> Result<T>
    where
        F: FnOnce(&mut Reader<'a>) -> Result<T>,
    {
        self.read_bounded(n, read)
    }

    /// Decode a nested structure behind a u64 byte-length prefix
    ///
    /// The cursor advances by exactly the declared length. Whether the nested
    /// decode must consume all of it depends on [`Config::nested`].
    #[inline]
    pub fn read_length_prefixed<T, F>(&mut self, read: F) -> Result<T>
    where
        F: FnOnce(&mut Reader<'a>) -> Result<T>,
    {
        let len = self.read_len()?;
        self.read_bounded(len, read)
    }

    fn read_bounded<T, F>(&mut self, len: usize, read: F) -> Result<T>
    where
        F: FnOnce(&mut Reader<'a>) -> Result<T>,
    {
        let bytes = self.read_bytes(len)?;
        let mut nested = Reader::with_config(bytes, self.config);
        let value = read(&mut nested)?;

        let consumed = nested.position();
        if consumed != len {
            match self.config.nested {
                NestedLength::Strict => {
                    return Err(Error::NestedLengthMismatch {
                        declared: len,
                        consumed,
                    });
                }
                NestedLength::Permissive => {
                    log::debug!(
                        "nested payload at {} consumed {} of {} bytes",
                        self.pos - len,
                        consumed,
                        len
                    );
                }
            }
        }
        Ok(value)
    }

    /// Decode a value through its [`Decode`] impl
    #[inline]
    pub fn decode<T: Decode>(&mut self) -> Result<T> {
        T::decode(self)
    }

    /// Decode a value behind a u64 byte-length prefix
    #[inline]
    pub fn decode_length_prefixed<T: Decode>(&mut self) -> Result<T> {
        self.read_length_prefixed(|r| T::decode(r))
    }
}

impl<'a> From<&'a [u8]> for Reader<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Reader::new(bytes)
    }
}
