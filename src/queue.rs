//! Per-queue state machine: dispatches enqueue/dequeue/destroy to the right node-layer
//! operation depending on whether the queue is currently Empty, Single, or Chained.

use crate::alloc::{alloc_slot, free_slot};
use crate::error::QueueError;
use crate::node::{self, SlotIndex, NODE_PAYLOAD, ROOT_PAYLOAD, TAIL_PAYLOAD};

/// Claims a fresh root slot and leaves it in the Empty state.
pub(crate) fn create_queue(buffer: &mut [u8], capacity: usize) -> Result<SlotIndex, QueueError> {
    let root = alloc_slot(buffer, capacity)?;
    node::init_empty_root(buffer, root);
    Ok(root)
}

/// Releases every slot owned by `root`'s chain back to the allocator.
pub(crate) fn destroy_queue(buffer: &mut [u8], root: SlotIndex) {
    if !node::is_single_root(buffer, root) {
        let mut cursor = node::root_head_index(buffer, root);
        let tail = node::root_tail_index(buffer, root);
        while cursor != tail {
            let next = node::interior_next(buffer, cursor);
            free_slot(buffer, cursor);
            cursor = next;
        }
        free_slot(buffer, tail);
    }
    free_slot(buffer, root);
}

/// Appends one byte to the queue rooted at `root`.
///
/// Mirrors the five cases of the original state machine: pushing into a still-open root
/// window, promoting Single to Chained on overflow, pushing into an open tail, promoting the
/// tail to an interior node and allocating a fresh tail on overflow, and the degenerate
/// head-equals-tail case where both are the same slot.
pub(crate) fn enqueue_byte(
    buffer: &mut [u8],
    capacity: usize,
    root: SlotIndex,
    byte: u8,
) -> Result<(), QueueError> {
    if node::is_single_root(buffer, root) {
        let count = node::root_tail_count(buffer, root);
        if (count as usize) < ROOT_PAYLOAD {
            node::push_single_root(buffer, root, byte);
        } else {
            let new_tail = alloc_slot(buffer, capacity)?;
            node::promote_to_chained(buffer, root, new_tail);
            node::push_tail(buffer, root, byte);
        }
        return Ok(());
    }

    let tail_count = node::root_tail_count(buffer, root);
    if (tail_count as usize) < TAIL_PAYLOAD {
        node::push_tail(buffer, root, byte);
    } else {
        let new_tail = alloc_slot(buffer, capacity)?;
        let evicted = node::swap_tail_for_new(buffer, root, new_tail);
        node::push_tail(buffer, root, evicted);
        node::push_tail(buffer, root, byte);
    }
    Ok(())
}

/// Removes and returns the oldest byte from the queue rooted at `root`.
///
/// The root's own 5-byte window always holds the oldest bytes of a Chained queue, so the
/// byte returned to the caller is always root `data[0]`; popping the head or tail slot only
/// recycles one byte forward into the window's newly vacated rear position, via
/// [`node::shift_root_forward`]. Mirrors the four cases of the original state machine: the
/// Empty and Single cases, and the Chained case split on whether head and tail coincide.
pub(crate) fn dequeue_byte(buffer: &mut [u8], root: SlotIndex) -> Result<u8, QueueError> {
    if node::is_empty_root(buffer, root) {
        return Err(QueueError::IllegalOperation);
    }

    if node::is_single_root(buffer, root) {
        return Ok(node::pop_single_root(buffer, root));
    }

    if node::is_headtail_root(buffer, root) {
        let refill = node::pop_tail_when_headtail(buffer, root);
        let oldest = node::shift_root_forward(buffer, root, refill);
        if node::root_tail_count(buffer, root) == 0 {
            let tail = node::root_tail_index(buffer, root);
            free_slot(buffer, tail);
            node::collapse_to_single(buffer, root);
        }
        return Ok(oldest);
    }

    let head = node::root_head_index(buffer, root);
    let refill = node::pop_head(buffer, root);
    let oldest = node::shift_root_forward(buffer, root, refill);
    if node::root_head_count(buffer, root) == 0 {
        let next = node::interior_next(buffer, head);
        node::set_root_head(buffer, root, next, NODE_PAYLOAD as u8);
        free_slot(buffer, head);
    }
    Ok(oldest)
}
