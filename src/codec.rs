//! Trait-based encoding for common Rust types
//!
//! The closure-taking methods on [`Writer`] and [`Reader`] are the primitive
//! layer: the caller supplies the element codec on every call. [`Encode`] and
//! [`Decode`] bundle those choices per type so that nested containers compose
//! without hand-written closures. Both layers produce identical bytes.
//!
//! ```rust
//! use fixbin::{from_bytes, to_vec};
//!
//! let value: (u32, Option<String>, Vec<bool>) = (7, Some("id".into()), vec![true]);
//! let bytes = to_vec(&value)?;
//! assert_eq!(from_bytes::<(u32, Option<String>, Vec<bool>)>(&bytes)?, value);
//! # Ok::<(), fixbin::Error>(())
//! ```

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use crate::decoder::Reader;
use crate::encoder::Writer;
use crate::error::Result;

/// A type that knows its own wire encoding
pub trait Encode {
    /// Append this value's encoding to `writer`
    fn encode(&self, writer: &mut Writer) -> Result<()>;
}

/// A type that can be rebuilt from its wire encoding
pub trait Decode: Sized {
    /// Read one value from `reader`
    fn decode(reader: &mut Reader<'_>) -> Result<Self>;
}

/// Encode `value` into a fresh byte vector
pub fn to_vec<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    value.encode(&mut writer)?;
    Ok(writer.into_vec())
}

/// Decode a `T` from the front of `bytes`, ignoring anything after it
pub fn from_bytes<T: Decode>(bytes: &[u8]) -> Result<T> {
    Reader::new(bytes).decode()
}

/// Decode a `T` that must span all of `bytes`
pub fn from_bytes_exact<T: Decode>(bytes: &[u8]) -> Result<T> {
    let mut reader = Reader::new(bytes);
    let value = reader.decode()?;
    reader.finish()?;
    Ok(value)
}

macro_rules! impl_primitive {
    ($($ty:ty => $write:ident, $read:ident);* $(;)?) => {
        $(
            impl Encode for $ty {
                #[inline]
                fn encode(&self, writer: &mut Writer) -> Result<()> {
                    writer.$write(*self)
                }
            }

            impl Decode for $ty {
                #[inline]
                fn decode(reader: &mut Reader<'_>) -> Result<Self> {
                    reader.$read()
                }
            }
        )*
    };
}

impl_primitive! {
    u8 => write_u8, read_u8;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
    i8 => write_i8, read_i8;
    i16 => write_i16, read_i16;
    i32 => write_i32, read_i32;
    i64 => write_i64, read_i64;
    f32 => write_f32, read_f32;
    f64 => write_f64, read_f64;
    bool => write_bool, read_bool;
    Duration => write_duration, read_duration;
}

impl Encode for () {
    #[inline]
    fn encode(&self, _writer: &mut Writer) -> Result<()> {
        Ok(())
    }
}

impl Decode for () {
    #[inline]
    fn decode(_reader: &mut Reader<'_>) -> Result<Self> {
        Ok(())
    }
}

impl Encode for str {
    #[inline]
    fn encode(&self, writer: &mut Writer) -> Result<()> {
        writer.write_str(self)
    }
}

impl Encode for String {
    #[inline]
    fn encode(&self, writer: &mut Writer) -> Result<()> {
        writer.write_str(self)
    }
}

impl Decode for String {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_string()
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    #[inline]
    fn encode(&self, writer: &mut Writer) -> Result<()> {
        (**self).encode(writer)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    #[inline]
    fn encode(&self, writer: &mut Writer) -> Result<()> {
        (**self).encode(writer)
    }
}

impl<T: Decode> Decode for Box<T> {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        T::decode(reader).map(Box::new)
    }
}

impl<T: Encode> Encode for Option<T> {
    #[inline]
    fn encode(&self, writer: &mut Writer) -> Result<()> {
        writer.write_option(self.as_ref(), |w, v| v.encode(w))
    }
}

impl<T: Decode> Decode for Option<T> {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_option(T::decode)
    }
}

impl<T: Encode> Encode for [T] {
    #[inline]
    fn encode(&self, writer: &mut Writer) -> Result<()> {
        writer.write_list(self, |w, v| v.encode(w))
    }
}

impl<T: Encode> Encode for Vec<T> {
    #[inline]
    fn encode(&self, writer: &mut Writer) -> Result<()> {
        self.as_slice().encode(writer)
    }
}

impl<T: Decode> Decode for Vec<T> {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_list(T::decode)
    }
}

// Arrays carry no length prefix; both sides know N.
impl<T: Encode, const N: usize> Encode for [T; N] {
    #[inline]
    fn encode(&self, writer: &mut Writer) -> Result<()> {
        writer.write_array(self, |w, v| v.encode(w))
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_array(T::decode)
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode(&self, writer: &mut Writer) -> Result<()> {
        writer.write_map(self, |w, k| k.encode(w), |w, v| v.encode(w))
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_map(K::decode, V::decode)
    }
}

impl<T: Encode> Encode for BTreeSet<T> {
    fn encode(&self, writer: &mut Writer) -> Result<()> {
        writer.write_seq(self, |w, v| v.encode(w))
    }
}

impl<T: Decode + Ord> Decode for BTreeSet<T> {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_collection(T::decode)
    }
}

#[cfg(feature = "std")]
mod hashed {
    use std::collections::{HashMap, HashSet};
    use std::hash::{BuildHasher, Hash};

    use super::*;

    impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
        fn encode(&self, writer: &mut Writer) -> Result<()> {
            writer.write_map(self, |w, k| k.encode(w), |w, v| v.encode(w))
        }
    }

    impl<K, V, S> Decode for HashMap<K, V, S>
    where
        K: Decode + Eq + Hash,
        V: Decode,
        S: BuildHasher + Default,
    {
        fn decode(reader: &mut Reader<'_>) -> Result<Self> {
            reader.read_map(K::decode, V::decode)
        }
    }

    impl<T: Encode, S> Encode for HashSet<T, S> {
        fn encode(&self, writer: &mut Writer) -> Result<()> {
            writer.write_seq(self, |w, v| v.encode(w))
        }
    }

    impl<T, S> Decode for HashSet<T, S>
    where
        T: Decode + Eq + Hash,
        S: BuildHasher + Default,
    {
        fn decode(reader: &mut Reader<'_>) -> Result<Self> {
            reader.read_collection(T::decode)
        }
    }
}

macro_rules! impl_tuple {
    ($($name:ident),+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            #[inline]
            #[allow(non_snake_case)]
            fn encode(&self, writer: &mut Writer) -> Result<()> {
                let ($($name,)+) = self;
                $($name.encode(writer)?;)+
                Ok(())
            }
        }

        impl<$($name: Decode),+> Decode for ($($name,)+) {
            #[inline]
            fn decode(reader: &mut Reader<'_>) -> Result<Self> {
                Ok(($($name::decode(reader)?,)+))
            }
        }
    };
}

impl_tuple!(A);
impl_tuple!(A, B);
impl_tuple!(A, B, C);
impl_tuple!(A, B, C, D);
impl_tuple!(A, B, C, D, E);
impl_tuple!(A, B, C, D, E, F);
