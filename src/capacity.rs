//! Capacity accounting: how many queues and how many payload bytes a given buffer size
//! supports under a few representative load shapes.
//!
//! These figures mirror the worked examples from the original design notes, generalized from
//! a fixed slot count (256, one of which is reserved by the allocator) to an arbitrary slot
//! count so callers can reason about buffers of any size, not just the one the original
//! numbers were computed for.

use crate::node::{NODE_PAYLOAD, ROOT_PAYLOAD, SLOT_SIZE, TAIL_PAYLOAD};

/// Snapshot of what a freshly initialized pool of a given size can hold, returned by
/// [`crate::init_queues`].
///
/// Every field answers "what is the most X achievable" for a particular loading pattern; none
/// of them describe the pool's actual live state, which changes as queues are created and
/// drained.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct QueueMetrics {
    /// Most queues that can exist at once if all of them are empty.
    pub max_empty_queues: usize,
    /// Most queues that can exist at once if all of them hold at least one byte.
    pub max_nonempty_queues: usize,
    /// Most bytes a single queue can hold when it is the only queue in the pool.
    pub max_bytes_single_queue: usize,
    /// Most bytes obtainable in total with 16 queues open and evenly loaded.
    pub max_bytes_16_even: usize,
    /// Most bytes obtainable in total with 64 queues open and evenly loaded.
    pub max_bytes_64_even: usize,
    /// Most bytes obtainable in total with `max_nonempty_queues` queues open and evenly
    /// loaded — the degenerate case where every usable slot is already a root, so none is
    /// left over for a chain and each queue is capped at its own root window.
    pub max_bytes_max_even_queues: usize,
    /// Most bytes obtainable in total with 64 queues open, 63 of them empty and one
    /// carrying everything else. This is the published worst-case floor.
    pub max_bytes_single_with_63_empty: usize,
}

impl QueueMetrics {
    /// Computes the metrics for a pool with `slot_count` total 8-byte slots, one of which
    /// (slot 0) is reserved by the allocator and never available as a queue node.
    pub(crate) fn for_capacity(slot_count: usize) -> QueueMetrics {
        let usable = slot_count.saturating_sub(1);
        QueueMetrics {
            max_empty_queues: usable,
            max_nonempty_queues: usable,
            max_bytes_single_queue: ROOT_PAYLOAD + chain_capacity(usable.saturating_sub(1)),
            max_bytes_16_even: even_capacity(usable, 16),
            max_bytes_64_even: even_capacity(usable, 64),
            max_bytes_max_even_queues: usable * ROOT_PAYLOAD,
            max_bytes_single_with_63_empty: single_with_empties_capacity(usable, 63),
        }
    }
}

/// Bytes held by a chain of `chain_slots` slots beyond the root, i.e. one tail node plus
/// `chain_slots - 1` interior nodes. Zero slots means the queue is still in the Single state,
/// where the root's own window is the only payload.
fn chain_capacity(chain_slots: usize) -> usize {
    if chain_slots == 0 {
        return 0;
    }
    let interior_count = chain_slots - 1;
    interior_count * NODE_PAYLOAD + TAIL_PAYLOAD
}

/// Total bytes obtainable across `queue_count` queues sharing `usable` slots evenly: each
/// queue takes one root and one tail slot, and whatever remains is split into interior nodes.
/// Matches the original worked example `(255 - 64 - 64)*7 + 64*8 + 64*5 = 1721` for
/// `usable = 255, queue_count = 64`.
fn even_capacity(usable: usize, queue_count: usize) -> usize {
    if queue_count == 0 || usable < 2 * queue_count {
        return 0;
    }
    let interior_total = usable - 2 * queue_count;
    interior_total * NODE_PAYLOAD + queue_count * (TAIL_PAYLOAD + ROOT_PAYLOAD)
}

/// Total bytes obtainable when one queue absorbs everything except the root slots reserved
/// for `empty_queue_count` other, permanently empty queues. Matches the original worked
/// example `(255 - 64 - 1)*7 + 8 + 5 = 1343` for `usable = 255, empty_queue_count = 63`.
fn single_with_empties_capacity(usable: usize, empty_queue_count: usize) -> usize {
    if usable <= empty_queue_count {
        return 0;
    }
    let remaining = usable - empty_queue_count - 1; // -1 for this queue's own root
    ROOT_PAYLOAD + chain_capacity(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 256 slots (1 reserved + 255 usable) is the pool size the original worked examples were
    /// computed against.
    const REFERENCE_SLOTS: usize = 256;

    #[test]
    fn single_queue_alone_matches_reference() {
        let metrics = QueueMetrics::for_capacity(REFERENCE_SLOTS);
        assert_eq!(metrics.max_bytes_single_queue, 1784);
    }

    #[test]
    fn sixty_four_even_matches_reference() {
        let metrics = QueueMetrics::for_capacity(REFERENCE_SLOTS);
        assert_eq!(metrics.max_bytes_64_even, 1721);
    }

    #[test]
    fn single_with_63_empty_matches_reference() {
        let metrics = QueueMetrics::for_capacity(REFERENCE_SLOTS);
        assert_eq!(metrics.max_bytes_single_with_63_empty, 1343);
    }

    #[test]
    fn empty_and_nonempty_queue_counts_equal_usable_slots() {
        let metrics = QueueMetrics::for_capacity(REFERENCE_SLOTS);
        assert_eq!(metrics.max_empty_queues, REFERENCE_SLOTS - 1);
        assert_eq!(metrics.max_nonempty_queues, REFERENCE_SLOTS - 1);
    }

    #[test]
    fn max_even_queues_is_bounded_by_root_window_alone() {
        let metrics = QueueMetrics::for_capacity(REFERENCE_SLOTS);
        assert_eq!(metrics.max_bytes_max_even_queues, metrics.max_nonempty_queues * ROOT_PAYLOAD);
    }

    #[test]
    fn tiny_pool_has_zero_chain_capacity() {
        let metrics = QueueMetrics::for_capacity(2);
        assert_eq!(metrics.max_bytes_single_queue, ROOT_PAYLOAD);
        assert_eq!(metrics.max_empty_queues, 1);
    }

    #[test]
    fn slot_size_accounts_for_payload_plus_links() {
        assert_eq!(SLOT_SIZE, 8);
    }
}
