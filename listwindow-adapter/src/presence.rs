use alloc::vec::Vec;
use core::mem;

use crate::key::{KeyMap, KeySet};
use crate::tween::linear_progress;
use crate::{Easing, ItemKey, Keyed, PresenceError, TimerId, TimerQueue};

/// Animation phase of a list member, independent of its data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifecycleState {
    /// Just joined the collection; promoted to `Present` after a committed frame.
    Entering,
    Present,
    /// Left the collection; kept on screen until its removal timer fires.
    Exiting,
}

/// One row of the display list produced by [`ListMembershipTracker::update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayEntry<K, T> {
    pub key: K,
    /// The item as of the last update that contained it.
    pub data: T,
    pub state: LifecycleState,
}

/// Configuration for [`ListMembershipTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresenceOptions {
    /// Committed frames an entry stays `Entering` before it is promoted. At least 1.
    pub promotion_frames: u32,
    /// Easing applied by [`ListMembershipTracker::exit_progress`].
    pub exit_easing: Easing,
}

impl Default for PresenceOptions {
    fn default() -> Self {
        Self {
            promotion_frames: 1,
            exit_easing: Easing::Linear,
        }
    }
}

impl PresenceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_promotion_frames(mut self, frames: u32) -> Self {
        self.promotion_frames = frames.max(1);
        self
    }

    pub fn with_exit_easing(mut self, easing: Easing) -> Self {
        self.exit_easing = easing;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingRemoval {
    timer: TimerId,
    started_ms: u64,
    duration_ms: u64,
}

/// Tracks members of a keyed collection across updates so a renderer can animate them in and
/// out.
///
/// Each [`update`](Self::update) diffs the new target collection against the previous one:
/// - new keys are `Entering` and are promoted to `Present` by
///   [`frame_committed`](Self::frame_committed) once the host has painted them;
/// - dropped keys become `Exiting` and stay in the display list until their removal timer
///   fires in [`tick`](Self::tick);
/// - a key that comes back before its timer fires cancels that timer.
///
/// The tracker owns all of its timers. There is at most one live removal timer per key,
/// and [`dispose`](Self::dispose) cancels everything that is still scheduled.
///
/// ```
/// use listwindow_adapter::{LifecycleState, ListMembershipTracker};
///
/// let mut tracker = ListMembershipTracker::new();
/// tracker.update([1u32, 2], |id| *id, 300, 0).unwrap();
/// tracker.frame_committed();
///
/// let entries = tracker.update([2u32], |id| *id, 300, 10).unwrap();
/// assert_eq!(entries[1].key, 1);
/// assert_eq!(entries[1].state, LifecycleState::Exiting);
///
/// tracker.tick(310);
/// assert_eq!(tracker.len(), 1);
/// ```
#[derive(Debug)]
pub struct ListMembershipTracker<K, T> {
    options: PresenceOptions,
    previous_keys: KeySet<K>,
    pending_removals: KeyMap<K, PendingRemoval>,
    promotions: KeyMap<K, u32>,
    timers: TimerQueue<K>,
    entries: Vec<DisplayEntry<K, T>>,
    disposed: bool,
}

impl<K: ItemKey, T> Default for ListMembershipTracker<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ItemKey, T> ListMembershipTracker<K, T> {
    pub fn new() -> Self {
        Self::with_options(PresenceOptions::default())
    }

    pub fn with_options(options: PresenceOptions) -> Self {
        Self {
            options: PresenceOptions {
                promotion_frames: options.promotion_frames.max(1),
                ..options
            },
            previous_keys: KeySet::default(),
            pending_removals: KeyMap::default(),
            promotions: KeyMap::default(),
            timers: TimerQueue::new(),
            entries: Vec::new(),
            disposed: false,
        }
    }

    pub fn options(&self) -> &PresenceOptions {
        &self.options
    }

    /// Diffs `items` against the previous update and returns the new display list.
    ///
    /// The display list holds every target item in order, then the exiting entries (older
    /// exits first). Removal timers for newly exiting keys are scheduled at
    /// `now_ms + exit_duration_ms` before this returns.
    ///
    /// Rejects snapshots with duplicate keys, a zero `exit_duration_ms`, or a disposed tracker;
    /// a rejected update changes nothing.
    pub fn update<I, F>(
        &mut self,
        items: I,
        key_of: F,
        exit_duration_ms: u64,
        now_ms: u64,
    ) -> Result<&[DisplayEntry<K, T>], PresenceError>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> K,
    {
        if self.disposed {
            vwarn!("ListMembershipTracker::update called after dispose");
            return Err(PresenceError::Disposed);
        }
        if exit_duration_ms == 0 {
            return Err(PresenceError::ZeroExitDuration);
        }

        let items = items.into_iter();
        let mut target = Vec::with_capacity(items.size_hint().0);
        let mut target_keys = KeySet::default();
        for (index, item) in items.enumerate() {
            let key = key_of(&item);
            if !target_keys.insert(key.clone()) {
                vwarn!(index, "ListMembershipTracker::update: duplicate key in snapshot");
                return Err(PresenceError::DuplicateKey { index });
            }
            target.push((key, item));
        }

        let previous = mem::take(&mut self.entries);
        let mut next = Vec::with_capacity(target.len() + self.pending_removals.len());

        for (key, data) in target {
            let state = if !self.previous_keys.contains(&key) {
                if let Some(pending) = self.pending_removals.remove(&key) {
                    self.timers.cancel(pending.timer);
                    vtrace!("re-entry canceled a pending removal");
                }
                self.promotions
                    .insert(key.clone(), self.options.promotion_frames);
                LifecycleState::Entering
            } else if self.promotions.contains_key(&key) {
                // Not painted yet: the pending promotion still applies.
                LifecycleState::Entering
            } else {
                LifecycleState::Present
            };
            next.push(DisplayEntry { key, data, state });
        }

        let mut newly_exiting = Vec::new();
        for entry in previous {
            if target_keys.contains(&entry.key) {
                continue;
            }
            if entry.state == LifecycleState::Exiting {
                if self.pending_removals.contains_key(&entry.key) {
                    next.push(entry);
                }
            } else {
                newly_exiting.push(entry);
            }
        }

        for mut entry in newly_exiting {
            if !self.pending_removals.contains_key(&entry.key) {
                let deadline_ms = now_ms.saturating_add(exit_duration_ms);
                let timer = self.timers.schedule(entry.key.clone(), deadline_ms);
                self.pending_removals.insert(
                    entry.key.clone(),
                    PendingRemoval {
                        timer,
                        started_ms: now_ms,
                        duration_ms: exit_duration_ms,
                    },
                );
            }
            self.promotions.remove(&entry.key);
            entry.state = LifecycleState::Exiting;
            next.push(entry);
        }

        vdebug!(
            promotions = self.promotions.len(),
            pending = self.pending_removals.len(),
            len = next.len(),
            "ListMembershipTracker::update"
        );

        self.entries = next;
        self.previous_keys = target_keys;
        Ok(&self.entries)
    }

    /// [`update`](Self::update) for items that carry their own key.
    pub fn update_keyed<I>(
        &mut self,
        items: I,
        exit_duration_ms: u64,
        now_ms: u64,
    ) -> Result<&[DisplayEntry<K, T>], PresenceError>
    where
        I: IntoIterator<Item = T>,
        T: Keyed<Key = K>,
    {
        self.update(items, T::key, exit_duration_ms, now_ms)
    }

    /// Fires every removal timer due at `now_ms`.
    ///
    /// Returns the number of exiting entries removed from the display list. A timer that no
    /// longer matches the key's pending removal is ignored. After [`dispose`](Self::dispose)
    /// this is a no-op.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        if self.disposed {
            return 0;
        }
        let mut removed = 0usize;
        while let Some((timer, key)) = self.timers.pop_due(now_ms) {
            let current = self.pending_removals.get(&key).map(|p| p.timer);
            if current != Some(timer) {
                vtrace!("ListMembershipTracker::tick: stale timer ignored");
                continue;
            }
            self.pending_removals.remove(&key);
            let before = self.entries.len();
            self.entries
                .retain(|e| !(e.state == LifecycleState::Exiting && e.key == key));
            removed += before - self.entries.len();
        }
        if removed > 0 {
            vtrace!(removed, "ListMembershipTracker::tick");
        }
        removed
    }

    /// Tells the tracker the host has committed (painted) a frame.
    ///
    /// Entering entries that have now been on screen for `promotion_frames` committed frames
    /// become `Present`. Returns the number of promoted entries.
    pub fn frame_committed(&mut self) -> usize {
        if self.disposed || self.promotions.is_empty() {
            return 0;
        }
        let mut promoted = 0usize;
        for entry in &mut self.entries {
            if entry.state != LifecycleState::Entering {
                continue;
            }
            let Some(remaining) = self.promotions.get_mut(&entry.key) else {
                continue;
            };
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.promotions.remove(&entry.key);
                entry.state = LifecycleState::Present;
                promoted += 1;
            }
        }
        promoted
    }

    /// Cancels every pending removal and promotion.
    ///
    /// The display list is left as it was; later `tick`/`frame_committed` calls do nothing and
    /// `update` returns [`PresenceError::Disposed`].
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        vdebug!(
            timers = self.timers.len(),
            promotions = self.promotions.len(),
            "ListMembershipTracker::dispose"
        );
        self.timers.clear();
        self.pending_removals.clear();
        self.promotions.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// The current display list.
    pub fn entries(&self) -> &[DisplayEntry<K, T>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&DisplayEntry<K, T>> {
        self.entries.iter().find(|e| &e.key == key)
    }

    pub fn state_of(&self, key: &K) -> Option<LifecycleState> {
        self.get(key).map(|e| e.state)
    }

    pub fn pending_removal_count(&self) -> usize {
        self.pending_removals.len()
    }

    pub fn pending_promotion_count(&self) -> usize {
        self.promotions.len()
    }

    /// Number of live removal timers.
    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// When the next removal timer fires, if any.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.timers.next_deadline_ms()
    }

    /// Eased `0.0..=1.0` progress of an exit transition, or `None` if `key` is not exiting.
    ///
    /// Useful for renderers that interpolate styles themselves (e.g. fading a terminal row).
    pub fn exit_progress(&self, key: &K, now_ms: u64) -> Option<f32> {
        let pending = self.pending_removals.get(key)?;
        let t = linear_progress(pending.started_ms, pending.duration_ms, now_ms);
        Some(self.options.exit_easing.sample(t))
    }
}
