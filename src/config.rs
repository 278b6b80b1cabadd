//! Decoder configuration
//!
//! The wire format itself carries no options; these settings only change how
//! strictly a [`Reader`](crate::Reader) treats untrusted input.

/// How a length-prefixed nested payload must be consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NestedLength {
    /// Accept a nested decode that leaves bytes of its payload unread
    ///
    /// The cursor still advances by the full declared length, which lets an
    /// older reader skip fields appended by a newer writer.
    #[default]
    Permissive,
    /// Reject a nested decode unless it consumes exactly the declared length
    Strict,
}

/// Runtime limits applied while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Largest accepted value for any length or count prefix
    ///
    /// Without a limit, byte lengths are still checked against the remaining
    /// input, but element counts are not: a count of zero-size elements costs
    /// no input bytes, so a forged `u64::MAX` count loops that many times.
    /// Untrusted input should always be decoded with a limit.
    pub limit: Option<usize>,
    /// Policy for length-prefixed nested payloads
    pub nested: NestedLength,
}

impl Config {
    /// No limit, permissive nesting
    pub const fn new() -> Self {
        Self {
            limit: None,
            nested: NestedLength::Permissive,
        }
    }

    /// Reject length prefixes above `limit`
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Require nested payloads to be consumed exactly
    pub const fn strict_nested(mut self) -> Self {
        self.nested = NestedLength::Strict;
        self
    }

    #[inline]
    pub(crate) fn check_limit(&self, len: usize) -> bool {
        match self.limit {
            Some(limit) => len <= limit,
            None => true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
