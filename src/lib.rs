//! A library of first-in-first-out byte queues backed by a single fixed-size buffer.
//!
//! Every queue, every link between its chained nodes, and every byte of payload lives inside
//! one externally supplied slice; the library never allocates from the host heap. Internally,
//! the buffer is partitioned into 8-byte slots managed by an in-buffer free-list allocator
//! (see [`alloc`]), and each queue is one of three shapes — Empty, Single, or Chained —
//! threaded through those slots (see [`node`] and [`queue`]).
//!
//! Out-of-memory and illegal-operation conditions are reported through client-installed
//! callbacks rather than `Result`, matching the calling convention of the C library this
//! crate's design is adapted from: both callbacks are typed `fn() -> !`, so a caller that
//! installs one is contractually committing to never return from it.

mod alloc;
pub mod capacity;
mod context;
pub mod error;
mod node;
mod queue;

pub use capacity::QueueMetrics;
pub use context::{QueueLibrary, MIN_BUFFER_LEN};
pub use error::QueueError;
pub use node::QueueHandle;

use lazy_static::lazy_static;
use std::sync::Mutex;

lazy_static! {
    static ref DEFAULT: Mutex<QueueLibrary> = Mutex::new(QueueLibrary::new());
}

/// Installs `buffer` as the process-wide pool's storage, (re)initializing the allocator.
///
/// Mirrors `initQueues`: zeroes the buffer, reserves slot 0 for the free-list head, and
/// returns a [`QueueMetrics`] snapshot describing the pool's capacity under a few
/// representative load shapes.
pub fn init_queues(buffer: &'static mut [u8]) -> Result<QueueMetrics, QueueError> {
    DEFAULT.lock().unwrap().init_queues(buffer)
}

/// Creates a new, empty queue in the process-wide pool.
pub fn create_queue() -> QueueHandle {
    DEFAULT.lock().unwrap().create_queue()
}

/// Releases `handle`'s storage back to the process-wide pool.
pub fn destroy_queue(handle: QueueHandle) {
    DEFAULT.lock().unwrap().destroy_queue(handle)
}

/// Appends `byte` to the back of `handle`'s queue.
pub fn enqueue_byte(handle: QueueHandle, byte: u8) {
    DEFAULT.lock().unwrap().enqueue_byte(handle, byte)
}

/// Removes and returns the byte at the front of `handle`'s queue.
pub fn dequeue_byte(handle: QueueHandle) -> u8 {
    DEFAULT.lock().unwrap().dequeue_byte(handle)
}

/// Installs the callback invoked when the process-wide pool's allocator is exhausted.
pub fn set_out_of_memory_callback(cb: fn() -> !) {
    DEFAULT.lock().unwrap().set_out_of_memory_callback(cb)
}

/// Installs the callback invoked when a client misuses the process-wide pool's API.
pub fn set_illegal_operation_callback(cb: fn() -> !) {
    DEFAULT.lock().unwrap().set_illegal_operation_callback(cb)
}
