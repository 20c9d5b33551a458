use alloc::collections::{BTreeSet, BinaryHeap};
use core::cmp::{Ordering, Reverse};

/// Handle of a timer scheduled on a [`TimerQueue`].
///
/// Handles are never reused by a queue, so a stale handle can be compared against the one
/// currently recorded for a key to detect superseded timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Scheduled<K> {
    deadline_ms: u64,
    id: TimerId,
    key: K,
}

impl<K> Scheduled<K> {
    fn order_key(&self) -> (u64, TimerId) {
        (self.deadline_ms, self.id)
    }
}

impl<K> PartialEq for Scheduled<K> {
    fn eq(&self, other: &Self) -> bool {
        self.order_key() == other.order_key()
    }
}

impl<K> Eq for Scheduled<K> {}

impl<K> PartialOrd for Scheduled<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Scheduled<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

/// A deadline-ordered queue of one-shot timers, driven by the host's clock.
///
/// The queue never reads time itself: callers pass `now_ms` to [`TimerQueue::pop_due`] from
/// their frame loop or event-loop timer. Timers with equal deadlines fire in scheduling order.
///
/// Cancellation is O(log n): canceled entries stay in the heap until they surface and are
/// skipped, and [`TimerQueue::len`] only counts live timers.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    heap: BinaryHeap<Reverse<Scheduled<K>>>,
    live: BTreeSet<TimerId>,
    next_id: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TimerQueue<K> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: BTreeSet::new(),
            next_id: 0,
        }
    }

    /// Schedules a timer for `key` firing once `now_ms >= deadline_ms`.
    pub fn schedule(&mut self, key: K, deadline_ms: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.heap.push(Reverse(Scheduled {
            deadline_ms,
            id,
            key,
        }));
        self.live.insert(id);
        id
    }

    /// Cancels a timer. Returns `false` if it already fired or was canceled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.live.remove(&id);
        if removed {
            self.prune();
        }
        removed
    }

    pub fn is_live(&self, id: TimerId) -> bool {
        self.live.contains(&id)
    }

    /// Number of live (not fired, not canceled) timers.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Deadline of the next live timer, if any.
    ///
    /// Hosts with a real event loop can sleep until this instant instead of ticking every frame.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(s)| s.deadline_ms)
    }

    /// Pops the next live timer whose deadline is `<= now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerId, K)> {
        let due = self
            .heap
            .peek()
            .is_some_and(|Reverse(s)| s.deadline_ms <= now_ms);
        if !due {
            return None;
        }
        let Reverse(fired) = self.heap.pop()?;
        self.live.remove(&fired.id);
        self.prune();
        Some((fired.id, fired.key))
    }

    /// Cancels every timer.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }

    /// Drops canceled timers from the top of the heap so that `peek` always sees a live one,
    /// and compacts the heap when canceled entries dominate it.
    fn prune(&mut self) {
        while let Some(Reverse(top)) = self.heap.peek() {
            if self.live.contains(&top.id) {
                break;
            }
            self.heap.pop();
        }
        if self.heap.len() > self.live.len().saturating_mul(2).saturating_add(32) {
            let live = &self.live;
            self.heap.retain(|Reverse(s)| live.contains(&s.id));
        }
    }
}
