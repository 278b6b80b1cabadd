//! Growable, position-tracked byte storage
//!
//! [`ByteBuffer`] keeps three quantities apart: the allocated capacity, the
//! cursor where the next write lands, and the high-water mark (the number of
//! valid bytes). The cursor may move back below the high-water mark for
//! backpatching; the high-water mark only ever grows until [`ByteBuffer::reset`].

use alloc::vec::Vec;

use crate::error::{Error, Result};

/// Owned byte store with little-endian accessors at explicit offsets
#[derive(Debug, Clone, Default)]
pub struct ByteBuffer {
    // Zero-filled up to capacity; bytes past `len` are never exposed.
    data: Vec<u8>,
    pos: usize,
    len: usize,
}

macro_rules! le_accessors {
    ($($get:ident, $set:ident, $ty:ty);* $(;)?) => {
        $(
            #[doc = concat!("Read a little-endian `", stringify!($ty), "` at `offset`")]
            #[inline]
            pub fn $get(&self, offset: usize) -> Result<$ty> {
                const N: usize = core::mem::size_of::<$ty>();
                let mut bytes = [0u8; N];
                bytes.copy_from_slice(self.slice(offset, N)?);
                Ok(<$ty>::from_le_bytes(bytes))
            }

            #[doc = concat!("Write a little-endian `", stringify!($ty), "` at `offset`")]
            #[inline]
            pub fn $set(&mut self, offset: usize, value: $ty) -> Result<()> {
                self.set_bytes(offset, &value.to_le_bytes())
            }
        )*
    };
}

impl ByteBuffer {
    /// Create an empty buffer without allocating
    #[inline]
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            pos: 0,
            len: 0,
        }
    }

    /// Create a buffer with `capacity` bytes allocated up front
    ///
    /// The capacity is only a hint: if it cannot be allocated the buffer
    /// starts empty and grows on the first write. Use
    /// [`ByteBuffer::try_with_capacity`] to observe the failure.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|err| {
            log::trace!("capacity hint of {} bytes ignored: {}", capacity, err.description());
            Self::new()
        })
    }

    /// Create a buffer with exactly `capacity` bytes allocated up front
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut buf = Self::new();
        buf.grow_to(capacity)?;
        Ok(buf)
    }

    /// Allocated capacity in bytes
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// High-water mark: number of valid bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing has been written since creation or the last reset
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current cursor
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor anywhere inside `[0, len]`
    #[inline]
    pub fn set_position(&mut self, pos: usize) -> Result<()> {
        if pos > self.len {
            return Err(Error::SeekOutOfBounds);
        }
        self.pos = pos;
        Ok(())
    }

    /// Make room for `n` more bytes at the cursor
    ///
    /// Grows to `max(capacity * 2, cursor + n)`, so a session of sequential
    /// writes copies each byte an amortized constant number of times.
    #[inline]
    pub fn ensure_capacity(&mut self, n: usize) -> Result<()> {
        let needed = self.pos.checked_add(n).ok_or(Error::AllocationFailed)?;
        if needed <= self.data.len() {
            return Ok(());
        }
        let doubled = self.data.len().saturating_mul(2);
        self.grow_to(doubled.max(needed))
    }

    fn grow_to(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.data.len() {
            return Ok(());
        }
        log::trace!("growing buffer from {} to {} bytes", self.data.len(), capacity);
        self.data
            .try_reserve_exact(capacity - self.data.len())
            .map_err(|_| Error::AllocationFailed)?;
        self.data.resize(capacity, 0);
        Ok(())
    }

    /// Borrow `len` valid bytes starting at `offset`
    #[inline]
    pub fn slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let end = offset
            .checked_add(len)
            .ok_or(Error::UnexpectedEndOfBuffer)?;
        if end > self.len {
            return Err(Error::UnexpectedEndOfBuffer);
        }
        Ok(&self.data[offset..end])
    }

    /// Copy `bytes` to `offset`, growing storage and the high-water mark as needed
    ///
    /// The cursor is not moved.
    #[inline]
    pub fn set_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        let end = offset
            .checked_add(bytes.len())
            .ok_or(Error::AllocationFailed)?;
        if end > self.data.len() {
            let doubled = self.data.len().saturating_mul(2);
            self.grow_to(doubled.max(end))?;
        }
        self.data[offset..end].copy_from_slice(bytes);
        if end > self.len {
            // Any gap between the old mark and `offset` is already zeroed.
            self.len = end;
        }
        Ok(())
    }

    /// Append `bytes` at the cursor and advance past them
    #[inline]
    pub fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_capacity(bytes.len())?;
        let start = self.pos;
        let end = start + bytes.len();
        self.data[start..end].copy_from_slice(bytes);
        self.pos = end;
        if end > self.len {
            self.len = end;
        }
        Ok(())
    }

    /// Append `n` zero bytes at the cursor and advance past them
    #[inline]
    pub fn put_zeros(&mut self, n: usize) -> Result<()> {
        self.ensure_capacity(n)?;
        let start = self.pos;
        let end = start + n;
        self.data[start..end].fill(0);
        self.pos = end;
        if end > self.len {
            self.len = end;
        }
        Ok(())
    }

    le_accessors! {
        get_u16, set_u16, u16;
        get_u32, set_u32, u32;
        get_u64, set_u64, u64;
        get_f32, set_f32, f32;
        get_f64, set_f64, f64;
    }

    /// Read the byte at `offset`
    #[inline]
    pub fn get_u8(&self, offset: usize) -> Result<u8> {
        Ok(self.slice(offset, 1)?[0])
    }

    /// Write one byte at `offset`
    #[inline]
    pub fn set_u8(&mut self, offset: usize, value: u8) -> Result<()> {
        self.set_bytes(offset, &[value])
    }

    /// The valid range `[0, len)`
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Zero the cursor and high-water mark, keeping the allocation
    #[inline]
    pub fn reset(&mut self) {
        // Stale bytes must read as zero if a later set_bytes leaves a gap.
        self.data[..self.len].fill(0);
        self.pos = 0;
        self.len = 0;
    }

    /// Take the valid bytes, dropping spare capacity
    pub fn into_vec(mut self) -> Vec<u8> {
        self.data.truncate(self.len);
        self.data
    }
}
