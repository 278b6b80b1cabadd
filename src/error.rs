//! Error types for the fixbin codec

/// Errors that can occur while encoding or decoding
///
/// Every decode error is fatal to the decode session that raised it: the
/// reader's cursor is left wherever the failing read stopped and must not be
/// relied on for resumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A read would run past the end of the input
    UnexpectedEndOfBuffer,
    /// A boolean byte was neither `0x00` nor `0x01`
    InvalidBooleanValue(u8),
    /// An option tag byte was neither `0x00` nor `0x01`
    InvalidOptionTag(u8),
    /// An enum discriminant names no known variant
    InvalidVariant(u32),
    /// String bytes are not valid UTF-8
    InvalidUtf8,
    /// Duration with negative seconds or out-of-range nanoseconds
    InvalidDuration,
    /// A u64 length prefix does not fit in `usize`
    LengthOverflow,
    /// A length or count prefix exceeds the configured limit
    LimitExceeded,
    /// A caller-supplied index lies outside a fixed-size container
    IndexOutOfRange(usize),
    /// Caller supplied a different element count than declared
    LengthMismatch {
        /// Declared element count
        expected: usize,
        /// Element count actually supplied
        actual: usize,
    },
    /// A length-prefixed payload was not fully consumed (strict mode)
    NestedLengthMismatch {
        /// Length written in the prefix
        declared: usize,
        /// Bytes consumed by the nested decode
        consumed: usize,
    },
    /// Input bytes remained after a decode that required exact consumption
    TrailingBytes(usize),
    /// Seek or patch target lies beyond the written range
    SeekOutOfBounds,
    /// The allocator refused to grow the write buffer
    AllocationFailed,
}

impl Error {
    /// Returns a human-readable description of the error
    pub const fn description(&self) -> &'static str {
        match self {
            Error::UnexpectedEndOfBuffer => "unexpected end of buffer",
            Error::InvalidBooleanValue(_) => "invalid boolean value",
            Error::InvalidOptionTag(_) => "invalid option tag",
            Error::InvalidVariant(_) => "unknown enum variant",
            Error::InvalidUtf8 => "string is not valid UTF-8",
            Error::InvalidDuration => "invalid duration",
            Error::LengthOverflow => "length prefix does not fit in usize",
            Error::LimitExceeded => "length exceeds configured limit",
            Error::IndexOutOfRange(_) => "index out of range",
            Error::LengthMismatch { .. } => "element count does not match declared length",
            Error::NestedLengthMismatch { .. } => "nested payload not fully consumed",
            Error::TrailingBytes(_) => "trailing bytes after decode",
            Error::SeekOutOfBounds => "seek beyond written range",
            Error::AllocationFailed => "buffer allocation failed",
        }
    }

    /// Returns true if more input could make the failing read succeed
    ///
    /// Streaming callers use this to tell "not enough bytes yet" apart from
    /// corrupt data.
    pub const fn is_truncation(&self) -> bool {
        matches!(self, Error::UnexpectedEndOfBuffer)
    }
}

#[cfg(feature = "std")]
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidBooleanValue(b) | Error::InvalidOptionTag(b) => {
                write!(f, "{}: 0x{:02x}", self.description(), b)
            }
            Error::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "{} (expected {}, got {})",
                    self.description(),
                    expected,
                    actual
                )
            }
            Error::NestedLengthMismatch { declared, consumed } => {
                write!(
                    f,
                    "{} (declared {}, consumed {})",
                    self.description(),
                    declared,
                    consumed
                )
            }
            Error::InvalidVariant(index) => write!(f, "{}: {}", self.description(), index),
            Error::IndexOutOfRange(index) => write!(f, "{}: {}", self.description(), index),
            Error::TrailingBytes(n) => write!(f, "{} ({} bytes)", self.description(), n),
            _ => write!(f, "{}", self.description()),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        let kind = match err {
            Error::UnexpectedEndOfBuffer => std::io::ErrorKind::UnexpectedEof,
            Error::AllocationFailed => std::io::ErrorKind::OutOfMemory,
            _ => std::io::ErrorKind::InvalidData,
        };
        std::io::Error::new(kind, err)
    }
}

/// Result type alias for fixbin operations
pub type Result<T> = core::result::Result<T, Error>;
