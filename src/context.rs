//! [`QueueLibrary`]: an owned instance of the queue pool.
//!
//! Bundles the backing buffer and the two registered error callbacks. The allocator's own
//! state (the bump/free-list head) lives inside the buffer itself, not here — see
//! [`crate::alloc`]. `crate::lib` wraps one process-wide instance behind a mutex for the
//! free-function facade, but tests and embedders can construct their own to run several
//! independent pools side by side.

use crate::capacity::QueueMetrics;
use crate::error::QueueError;
use crate::node::{QueueHandle, SlotIndex, SLOT_SIZE};
use crate::queue;

/// Smallest buffer [`QueueLibrary::init_queues`] accepts: one reserved allocator slot plus
/// one usable slot.
pub const MIN_BUFFER_LEN: usize = 2 * SLOT_SIZE;

fn default_out_of_memory() -> ! {
    panic!("slot-queue-pool: out of memory and no callback installed");
}

fn default_illegal_operation() -> ! {
    panic!("slot-queue-pool: illegal operation and no callback installed");
}

/// An instance of the queue pool: one backing buffer, its allocator state, and the two
/// error callbacks installed against it.
pub struct QueueLibrary {
    buffer: Option<&'static mut [u8]>,
    capacity: usize,
    on_out_of_memory: fn() -> !,
    on_illegal_operation: fn() -> !,
}

impl QueueLibrary {
    /// Builds an uninitialized library. Every operation other than [`Self::init_queues`] and
    /// the callback setters fails with [`QueueError::NotInitialized`] until a buffer is
    /// installed.
    pub fn new() -> QueueLibrary {
        QueueLibrary {
            buffer: None,
            capacity: 0,
            on_out_of_memory: default_out_of_memory,
            on_illegal_operation: default_illegal_operation,
        }
    }

    /// Installs `buffer` as the backing storage, zeroing it and resetting the allocator.
    /// May be called again (on the same or a different buffer) to reset the library; any
    /// handles issued against a previous buffer become invalid.
    pub fn init_queues(&mut self, buffer: &'static mut [u8]) -> Result<QueueMetrics, QueueError> {
        if buffer.len() < MIN_BUFFER_LEN {
            let err = QueueError::BufferTooSmall {
                needed: MIN_BUFFER_LEN,
                got: buffer.len(),
            };
            log::error!("{}", err);
            return Err(err);
        }
        for b in buffer.iter_mut() {
            *b = 0;
        }
        self.capacity = buffer.len() / SLOT_SIZE;
        buffer[0] = 1; // allocator head: slot 1 is the first slot ever handed out
        self.buffer = Some(buffer);
        log::info!(
            "queue library initialized with {} slots ({} bytes)",
            self.capacity,
            self.capacity * SLOT_SIZE
        );
        Ok(QueueMetrics::for_capacity(self.capacity))
    }

    pub fn set_out_of_memory_callback(&mut self, cb: fn() -> !) {
        self.on_out_of_memory = cb;
    }

    pub fn set_illegal_operation_callback(&mut self, cb: fn() -> !) {
        self.on_illegal_operation = cb;
    }

    fn buffer_mut(&mut self) -> Result<&mut [u8], QueueError> {
        self.buffer.as_deref_mut().ok_or(QueueError::NotInitialized)
    }

    fn validate(&self, handle: QueueHandle) -> Result<SlotIndex, QueueError> {
        let idx = handle.index();
        if idx.is_zero() || idx.as_usize() >= self.capacity {
            return Err(QueueError::IllegalOperation);
        }
        Ok(idx)
    }

    /// Dispatches `err` to the appropriate registered callback. Never returns: both
    /// callbacks are typed `fn() -> !`, so the compiler treats call sites after this as
    /// unreachable.
    fn diverge(&self, err: QueueError) -> ! {
        match err {
            QueueError::OutOfMemory => {
                log::error!("out of memory");
                (self.on_out_of_memory)()
            }
            QueueError::IllegalOperation | QueueError::NotInitialized | QueueError::BufferTooSmall { .. } => {
                log::error!("illegal operation: {}", err);
                (self.on_illegal_operation)()
            }
        }
    }

    /// Creates a new, Empty queue. Diverges via the out-of-memory callback if the pool is
    /// exhausted.
    pub fn create_queue(&mut self) -> QueueHandle {
        let capacity = self.capacity;
        let result = self.buffer_mut().and_then(|buf| queue::create_queue(buf, capacity));
        match result {
            Ok(root) => QueueHandle::new(root),
            Err(e) => self.diverge(e),
        }
    }

    /// Releases `handle`'s storage back to the pool. Diverges via the illegal-operation
    /// callback if `handle` is not a live handle into this instance.
    pub fn destroy_queue(&mut self, handle: QueueHandle) {
        let idx = match self.validate(handle) {
            Ok(idx) => idx,
            Err(e) => self.diverge(e),
        };
        match self.buffer_mut() {
            Ok(buf) => queue::destroy_queue(buf, idx),
            Err(e) => self.diverge(e),
        }
    }

    /// Appends `byte` to `handle`'s queue. Diverges via the out-of-memory callback if the
    /// pool cannot grow the queue's chain, or the illegal-operation callback if `handle` is
    /// invalid.
    pub fn enqueue_byte(&mut self, handle: QueueHandle, byte: u8) {
        let idx = match self.validate(handle) {
            Ok(idx) => idx,
            Err(e) => self.diverge(e),
        };
        let capacity = self.capacity;
        let result = self
            .buffer_mut()
            .and_then(|buf| queue::enqueue_byte(buf, capacity, idx, byte));
        if let Err(e) = result {
            self.diverge(e);
        }
    }

    /// Removes and returns the oldest byte in `handle`'s queue. Diverges via the
    /// illegal-operation callback if the queue is Empty or `handle` is invalid.
    pub fn dequeue_byte(&mut self, handle: QueueHandle) -> u8 {
        let idx = match self.validate(handle) {
            Ok(idx) => idx,
            Err(e) => self.diverge(e),
        };
        match self.buffer_mut().and_then(|buf| queue::dequeue_byte(buf, idx)) {
            Ok(byte) => byte,
            Err(e) => self.diverge(e),
        }
    }
}

impl Default for QueueLibrary {
    fn default() -> Self {
        QueueLibrary::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaked_buffer(slots: usize) -> &'static mut [u8] {
        Box::leak(vec![0u8; slots * SLOT_SIZE].into_boxed_slice())
    }

    #[test]
    fn uninitialized_library_reports_not_initialized() {
        let mut lib = QueueLibrary::new();
        lib.set_illegal_operation_callback(|| panic!("illegal"));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| lib.create_queue()));
        assert!(result.is_err());
    }

    #[test]
    fn init_queues_rejects_tiny_buffer() {
        let mut lib = QueueLibrary::new();
        let buf: &'static mut [u8] = Box::leak(vec![0u8; 4].into_boxed_slice());
        assert_eq!(
            lib.init_queues(buf),
            Err(QueueError::BufferTooSmall { needed: MIN_BUFFER_LEN, got: 4 })
        );
    }

    #[test]
    fn basic_roundtrip() {
        let mut lib = QueueLibrary::new();
        lib.init_queues(leaked_buffer(8)).unwrap();
        let h = lib.create_queue();
        lib.enqueue_byte(h, 42);
        lib.enqueue_byte(h, 43);
        assert_eq!(lib.dequeue_byte(h), 42);
        assert_eq!(lib.dequeue_byte(h), 43);
        lib.destroy_queue(h);
    }

    #[test]
    fn reinit_resets_library() {
        let mut lib = QueueLibrary::new();
        lib.init_queues(leaked_buffer(8)).unwrap();
        let h1 = lib.create_queue();
        lib.enqueue_byte(h1, 1);
        lib.init_queues(leaked_buffer(8)).unwrap();
        let h2 = lib.create_queue();
        assert_eq!(h1, h2); // same slot index in a freshly reset pool
        lib.enqueue_byte(h2, 2);
        assert_eq!(lib.dequeue_byte(h2), 2);
    }
}
