/// Wait-free single-producer/single-consumer ring buffer
///
/// Fixed-capacity FIFO moving ownership of one element per slot between
/// exactly one producer thread and one consumer thread. `N` must be a power
/// of two and at least 2; usable capacity is `N - 1` (one slot is sacrificed
/// to tell full from empty with only two indices). Index advancement wraps
/// with a bitmask, which is why `N` must be a power of two.
///
/// Coordination is two atomic indices, each written by exactly one side.
/// The producer publishes a filled slot with a release store of `write_idx`;
/// the consumer observes it with an acquire load, and releases the slot back
/// with a release store of `read_idx` that the producer acquires. Relaxed
/// ordering on the index a side owns itself. Either side failing to make
/// progress leaves the partner spinning; backoff is the caller's job.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_utils::CachePadded;

/// Shared ring storage. Construct with [`SpscQueue::new`], which hands back
/// the two endpoint handles; there is no other way to touch the slots.
pub struct SpscQueue<T, const N: usize> {
    slots: Box<[UnsafeCell<MaybeUninit<T>>]>,
    read_idx: CachePadded<AtomicUsize>,
    write_idx: CachePadded<AtomicUsize>,
}

// The slot array is only ever touched by the producer (unread slots) and the
// consumer (unconsumed slots), never both at once; the index protocol keeps
// the ranges disjoint.
unsafe impl<T: Send, const N: usize> Sync for SpscQueue<T, N> {}

impl<T, const N: usize> SpscQueue<T, N> {
    const CAPACITY_VALID: () = assert!(
        N >= 2 && N.is_power_of_two(),
        "SpscQueue size must be a power of two and >= 2"
    );

    /// Allocate the ring and split it into its two endpoints.
    pub fn new() -> (Producer<T, N>, Consumer<T, N>) {
        let () = Self::CAPACITY_VALID;

        let slots = (0..N)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        let queue = Arc::new(SpscQueue {
            slots,
            read_idx: CachePadded::new(AtomicUsize::new(0)),
            write_idx: CachePadded::new(AtomicUsize::new(0)),
        });

        (
            Producer {
                queue: Arc::clone(&queue),
            },
            Consumer { queue },
        )
    }

    /// Number of elements currently stored. Relaxed snapshot; may be stale
    /// the instant it returns under concurrent access.
    pub fn len(&self) -> usize {
        let read_idx = self.read_idx.load(Ordering::Relaxed);
        let write_idx = self.write_idx.load(Ordering::Relaxed);

        (write_idx.wrapping_sub(read_idx)) & (N - 1) // handles wrap around
    }

    /// Relaxed snapshot, exact only in quiescent states.
    pub fn is_empty(&self) -> bool {
        let read_idx = self.read_idx.load(Ordering::Relaxed);
        let write_idx = self.write_idx.load(Ordering::Relaxed);

        read_idx == write_idx
    }

    /// Relaxed snapshot, exact only in quiescent states.
    pub fn is_full(&self) -> bool {
        let read_idx = self.read_idx.load(Ordering::Relaxed);
        let write_idx = self.write_idx.load(Ordering::Relaxed);

        ((write_idx + 1) & (N - 1)) == read_idx
    }
}

impl<T, const N: usize> Drop for SpscQueue<T, N> {
    fn drop(&mut self) {
        // Sole owner at this point; drop whatever is still in flight.
        let mut read_idx = *self.read_idx.get_mut();
        let write_idx = *self.write_idx.get_mut();

        while read_idx != write_idx {
            unsafe { (*self.slots[read_idx].get()).assume_init_drop() };
            read_idx = (read_idx + 1) & (N - 1);
        }
    }
}

/// The write endpoint. Exactly one exists per queue.
pub struct Producer<T, const N: usize> {
    queue: Arc<SpscQueue<T, N>>,
}

impl<T, const N: usize> Producer<T, N> {
    /// Try to move `item` into the next write slot. Returns the item back
    /// without modifying the buffer if the queue is full. Never blocks.
    pub fn push(&mut self, item: T) -> Result<(), T> {
        let queue = &*self.queue;
        let read_idx = queue.read_idx.load(Ordering::Acquire);
        let write_idx = queue.write_idx.load(Ordering::Relaxed);

        let next_write_idx = (write_idx + 1) & (N - 1);
        if next_write_idx == read_idx {
            return Err(item);
        }

        // The slot at write_idx is outside the consumer's visible range
        // until the release store below.
        unsafe { (*queue.slots[write_idx].get()).write(item) };
        queue.write_idx.store(next_write_idx, Ordering::Release);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }
}

/// The read endpoint. Exactly one exists per queue.
pub struct Consumer<T, const N: usize> {
    queue: Arc<SpscQueue<T, N>>,
}

impl<T, const N: usize> Consumer<T, N> {
    /// Try to move the oldest element out. Returns `None` if the queue is
    /// empty. Never blocks.
    pub fn pop(&mut self) -> Option<T> {
        let queue = &*self.queue;
        let read_idx = queue.read_idx.load(Ordering::Relaxed);
        let write_idx = queue.write_idx.load(Ordering::Acquire);

        if read_idx == write_idx {
            return None;
        }

        // The acquire load above pairs with the producer's release store,
        // so the slot contents are fully visible here.
        let item = unsafe { (*queue.slots[read_idx].get()).assume_init_read() };
        queue.read_idx.store((read_idx + 1) & (N - 1), Ordering::Release);
        Some(item)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }
}
