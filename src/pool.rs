//! Reuse of writers across encode bursts
//!
//! The pool only amortizes allocation. It hands out whole [`Writer`]s by
//! value, so exclusivity comes from ownership; it is not a synchronization
//! primitive and sharing it across threads is the caller's business.

use alloc::vec::Vec;

use crate::encoder::Writer;

/// Free list of reset writers
#[derive(Debug)]
pub struct WriterPool {
    free: Vec<Writer>,
    initial_capacity: usize,
    max_pooled: usize,
}

impl WriterPool {
    /// Create an empty pool
    ///
    /// Fresh writers start with `initial_capacity` bytes; at most
    /// `max_pooled` released writers are retained.
    pub fn new(initial_capacity: usize, max_pooled: usize) -> Self {
        Self {
            free: Vec::new(),
            initial_capacity,
            max_pooled,
        }
    }

    /// Take a writer from the pool, or build a new one if it is empty
    pub fn acquire(&mut self) -> Writer {
        match self.free.pop() {
            Some(writer) => {
                log::trace!("reusing pooled writer ({} bytes)", writer.capacity());
                writer
            }
            None => Writer::with_capacity(self.initial_capacity),
        }
    }

    /// Reset `writer` and return it to the pool
    ///
    /// The writer is dropped instead when the pool is already full.
    pub fn release(&mut self, mut writer: Writer) {
        if self.free.len() >= self.max_pooled {
            log::trace!("pool full, dropping writer");
            return;
        }
        writer.reset();
        self.free.push(writer);
    }

    /// Number of idle writers held
    #[inline]
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// True if no idle writer is held
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}

impl Default for WriterPool {
    fn default() -> Self {
        Self::new(crate::DEFAULT_CAPACITY, 16)
    }
}
