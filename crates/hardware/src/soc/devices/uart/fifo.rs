//! Bounded byte FIFO.
//!
//! Decouples the bus-side byte stream from the serial engine's bit timing. Each FIFO has
//! exactly one producer and one consumer inside the peripheral; the fixed per-edge update
//! order guarantees the two ends are never touched by the same stage.
//!
//! # Overflow
//!
//! Pushing into a full FIFO drops the new byte (drop-newest), leaves the stored bytes and
//! `len()` unchanged, and raises a sticky overflow flag. Popping an empty FIFO returns
//! `None` and changes nothing.

use std::collections::VecDeque;

/// Fixed-capacity byte queue with a sticky overflow flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteFifo {
    /// Stored bytes, oldest at the front.
    queue: VecDeque<u8>,
    /// Maximum number of bytes held.
    capacity: usize,
    /// Set when a push found the FIFO full; cleared only by `clear_overflow` or `clear`.
    overflowed: bool,
}

impl ByteFifo {
    /// Creates an empty FIFO holding up to `capacity` bytes.
    ///
    /// A capacity of zero is raised to one; configuration validation rejects it earlier.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
            overflowed: false,
        }
    }

    /// Appends `byte`; returns `false` and sets the overflow flag when full.
    #[must_use]
    pub fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            self.overflowed = true;
            return false;
        }
        self.queue.push_back(byte);
        true
    }

    /// Removes and returns the oldest byte.
    pub fn pop(&mut self) -> Option<u8> {
        self.queue.pop_front()
    }

    /// Returns the oldest byte without removing it.
    pub fn peek(&self) -> Option<u8> {
        self.queue.front().copied()
    }

    /// Number of bytes stored.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Maximum number of bytes stored.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` when no byte is stored.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns `true` when a push would be dropped.
    pub fn is_full(&self) -> bool {
        self.queue.len() >= self.capacity
    }

    /// Sticky overflow flag.
    pub const fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Clears the overflow flag without touching the contents.
    pub fn clear_overflow(&mut self) {
        self.overflowed = false;
    }

    /// Empties the FIFO and clears the overflow flag.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.overflowed = false;
    }

    /// Iterates over the stored bytes, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.queue.iter().copied()
    }
}
