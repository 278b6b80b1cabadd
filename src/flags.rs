//! Eight booleans packed into one byte
//!
//! Not part of the wire rules: a [`Flags8`] is written and read as a plain
//! `u8`, so the two sides must agree on what each bit means.

use crate::codec::{Decode, Encode};
use crate::decoder::Reader;
use crate::encoder::Writer;
use crate::error::{Error, Result};

/// Number of flags held by a [`Flags8`]
pub const FLAGS8_MAX: usize = 8;

/// Packed set of eight boolean flags (bit `i` is flag `i`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Flags8 {
    bits: u8,
}

impl Flags8 {
    /// Create new empty flag set
    #[inline]
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Create from raw bits value
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self { bits }
    }

    /// Get raw bits value
    #[inline]
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Pack eight booleans; `flags[0]` lands in the least significant bit
    #[inline]
    pub fn from_bools(flags: [bool; FLAGS8_MAX]) -> Self {
        let bits = flags
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &on)| acc | ((on as u8) << i));
        Self { bits }
    }

    /// Unpack into eight booleans
    #[inline]
    pub fn to_bools(&self) -> [bool; FLAGS8_MAX] {
        let mut out = [false; FLAGS8_MAX];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.is_set(i);
        }
        out
    }

    /// Set flag `idx`
    #[inline]
    pub fn set(&mut self, idx: usize) -> Result<()> {
        if idx >= FLAGS8_MAX {
            return Err(Error::IndexOutOfRange(idx));
        }
        self.bits |= 1 << idx;
        Ok(())
    }

    /// Clear flag `idx`
    #[inline]
    pub fn clear(&mut self, idx: usize) -> Result<()> {
        if idx >= FLAGS8_MAX {
            return Err(Error::IndexOutOfRange(idx));
        }
        self.bits &= !(1 << idx);
        Ok(())
    }

    /// Check if flag `idx` is set; out-of-range indices read as unset
    #[inline]
    pub fn is_set(&self, idx: usize) -> bool {
        if idx >= FLAGS8_MAX {
            return false;
        }
        (self.bits >> idx) & 1 != 0
    }

    /// Count number of set flags
    #[inline]
    pub fn count_set(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Check if no flag is set
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterator over set flag indices
    #[inline]
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        (0..FLAGS8_MAX).filter(move |&i| self.is_set(i))
    }
}

impl From<[bool; FLAGS8_MAX]> for Flags8 {
    fn from(flags: [bool; FLAGS8_MAX]) -> Self {
        Self::from_bools(flags)
    }
}

impl Encode for Flags8 {
    #[inline]
    fn encode(&self, writer: &mut Writer) -> Result<()> {
        writer.write_u8(self.bits)
    }
}

impl Decode for Flags8 {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_u8().map(Self::from_bits)
    }
}
