use std::collections::BinaryHeap;
use std::sync::{Mutex, PoisonError};

/// Priority interrupt controller.
///
/// Devices assert interrupts as `(vector, priority)` pairs from any thread
/// holding a [`Host`](crate::core::Host); the simulator loop peeks the most
/// urgent pending pair and decides whether the CPU accepts it. Pending pairs
/// are ordered by `(priority, vector)` — on equal priority the numerically
/// larger vector wins, which keeps the choice deterministic.
///
/// A vector can be pending at most once: re-asserting it before the CPU
/// takes it is a no-op. All operations lock an internal mutex and are
/// linearizable; callers must not hold any other lock across them.
pub struct InterruptController {
    inner: Mutex<PendingSet>,
}

struct PendingSet {
    /// vector -> pending priority, `None` when the vector is not queued.
    table: [Option<u8>; 256],
    /// Max-heap of `(priority, vector)` pairs; lexicographic tuple order
    /// gives exactly the required tie-break.
    queue: BinaryHeap<(u8, u8)>,
}

impl InterruptController {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(PendingSet {
                table: [None; 256],
                queue: BinaryHeap::with_capacity(16),
            }),
        }
    }

    /// Assert an interrupt. Duplicate alerts while the vector is still
    /// pending are ignored.
    pub fn alert(&self, vector: u8, priority: u8) {
        let mut pending = self.lock();
        if pending.table[vector as usize].is_none() {
            log::trace!("intc: pending vector {vector:#04x} at priority {priority}");
            pending.table[vector as usize] = Some(priority);
            pending.queue.push((priority, vector));
        }
    }

    /// The most urgent pending `(vector, priority)` pair, without removing it.
    pub fn peek(&self) -> Option<(u8, u8)> {
        let pending = self.lock();
        pending.queue.peek().map(|&(priority, vector)| (vector, priority))
    }

    /// Remove the most urgent pending pair, freeing its vector for re-assertion.
    pub fn take(&self) -> Option<(u8, u8)> {
        let mut pending = self.lock();
        pending.pop()
    }

    /// Atomic guarded peek-then-take: the most urgent pending pair is removed
    /// and returned only when `cmp(cmp_priority, pending_priority)` holds.
    pub fn check(
        &self,
        cmp_priority: u8,
        cmp: impl FnOnce(u8, u8) -> bool,
    ) -> Option<(u8, u8)> {
        let mut pending = self.lock();
        let &(priority, _) = pending.queue.peek()?;
        if cmp(cmp_priority, priority) {
            pending.pop()
        } else {
            None
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PendingSet> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PendingSet {
    fn pop(&mut self) -> Option<(u8, u8)> {
        let (priority, vector) = self.queue.pop()?;
        self.table[vector as usize] = None;
        Some((vector, priority))
    }
}

impl Default for InterruptController {
    fn default() -> Self {
        Self::new()
    }
}
