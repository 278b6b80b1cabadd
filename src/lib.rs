//! fixbin: fixed-width, length-prefixed binary codec
//!
//! This crate provides a growable [`Writer`] and a zero-copy [`Reader`] for a
//! binary layout that is byte-for-byte compatible with bincode's fixed-int
//! encoding, so payloads can cross between implementations. There is no schema
//! at runtime: the sequence of write calls *is* the schema, and the reader must
//! issue the matching sequence of reads.
//!
//! # Wire Format
//!
//! ```text
//! +------------------+-----------------------------------------------+
//! | u8 / i8          | 1 byte                                        |
//! | u16 / i16        | 2 bytes LE                                    |
//! | u32 / i32 / f32  | 4 bytes LE                                    |
//! | u64 / i64 / f64  | 8 bytes LE                                    |
//! | bool             | 0x00 | 0x01                                   |
//! | String           | u64 byte length + UTF-8 bytes                 |
//! | fixed string(N)  | N bytes, zero-padded or truncated             |
//! | Option<T>        | 0x00 | 0x01 + T                               |
//! | Vec<T> / Set<T>  | u64 count + count x T                         |
//! | Map<K, V>        | u64 count + count x (K, V)                    |
//! | [T; N]           | N x T                                         |
//! | nested (fixed)   | T inlined, no framing                         |
//! | nested (sized)   | u64 byte length + T                           |
//! | enum variant     | u32 index                                     |
//! | Duration         | i64 seconds + u32 nanoseconds                 |
//! +------------------+-----------------------------------------------+
//! ```
//!
//! # Features
//!
//! - Amortized O(1) buffer growth with seek-and-patch for length prefixes
//! - Zero-copy `&str` / `&[u8]` reads borrowed from the input
//! - Strict tag checks (`bool`, `Option`) and truncation detection
//! - Caller-supplied element codecs, or the [`Encode`] / [`Decode`] traits
//! - `no_std` support with `alloc`
//!
//! # Example
//!
//! ```rust
//! use fixbin::*;
//!
//! let mut writer = Writer::new();
//! writer.write_u32(12345)?;
//! writer.write_option(Some("AAPL"), |w, s| w.write_str(s))?;
//! writer.write_list(&[1u8, 2, 3], |w, v| w.write_u8(*v))?;
//!
//! let mut reader = Reader::new(writer.as_bytes());
//! assert_eq!(reader.read_u32()?, 12345);
//! assert_eq!(reader.read_option(|r| r.read_str())?, Some("AAPL"));
//! assert_eq!(reader.read_list(|r| r.read_u8())?, vec![1, 2, 3]);
//! reader.finish()?;
//! # Ok::<(), fixbin::Error>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod buffer;
pub mod codec;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod flags;
#[cfg(feature = "std")]
pub mod io;
pub mod pool;

// Re-export main types
pub use buffer::ByteBuffer;
pub use codec::{from_bytes, from_bytes_exact, to_vec, Decode, Encode};
pub use config::{Config, NestedLength};
pub use decoder::Reader;
pub use encoder::Writer;
pub use error::{Error, Result};
pub use flags::Flags8;
pub use pool::WriterPool;

/// Size of every length and count prefix (u64)
pub const LENGTH_PREFIX_SIZE: usize = 8;

/// Option tag for an absent value
pub const OPTION_NONE: u8 = 0;

/// Option tag for a present value
pub const OPTION_SOME: u8 = 1;

/// Initial capacity of a [`Writer`] created with [`Writer::new`]
pub const DEFAULT_CAPACITY: usize = 256;
