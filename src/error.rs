//! Error types returned by the fallible parts of the public API.
//!
//! The original C library reports failures by invoking a non-returning callback instead of
//! returning an error code; [`crate::QueueLibrary`] keeps that calling convention (see
//! `fn() -> !` callbacks in `context.rs`) but the internal plumbing is expressed with
//! ordinary `Result`s so the callback dispatch stays in one place.

use thiserror::Error;

/// Failure modes of the queue pool.
#[derive(Error, Copy, Clone, Eq, PartialEq, Debug)]
pub enum QueueError {
    /// No free slot was available to satisfy an allocation.
    #[error("slot pool exhausted")]
    OutOfMemory,

    /// The requested operation is not valid for the queue's current state, e.g. dequeuing
    /// from an empty queue or using a handle that does not refer to a live queue.
    #[error("illegal operation on queue")]
    IllegalOperation,

    /// [`crate::init_queues`] was called with a buffer too small to hold even a single slot.
    #[error("buffer too small: need at least {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },

    /// A queue operation was attempted before the pool was initialized.
    #[error("queue library has not been initialized")]
    NotInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_stable() {
        assert_eq!(QueueError::OutOfMemory.to_string(), "slot pool exhausted");
        assert_eq!(
            QueueError::BufferTooSmall { needed: 8, got: 4 }.to_string(),
            "buffer too small: need at least 8 bytes, got 4"
        );
    }
}
