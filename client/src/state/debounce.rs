//! Per-slot quiet windows for user edits.
//!
//! Time is passed in as milliseconds so the gate never reads a clock.

use std::collections::BTreeMap;

use crate::config::DebounceDelays;

/// How long an edit waits for a quieter moment before it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPolicy {
    /// Typing, selects, toggles, typed range bounds.
    Discrete,
    /// Dragging a range slider.
    Continuous,
}

#[derive(Debug, Clone)]
struct Pending<V> {
    value: V,
    deadline: u64,
    sequence: u64,
}

/// Holds the latest value per key until its window elapses.
///
/// A newer value for a key replaces the pending one and restarts the
/// window; intermediate values are never returned.
#[derive(Debug, Clone)]
pub struct DebounceGate<K: Ord, V> {
    delays: DebounceDelays,
    pending: BTreeMap<K, Pending<V>>,
    sequence: u64,
}

impl<K: Ord + Clone, V> DebounceGate<K, V> {
    pub fn new(delays: DebounceDelays) -> Self {
        Self { delays, pending: BTreeMap::new(), sequence: 0 }
    }

    pub fn delay(&self, policy: EditPolicy) -> u64 {
        match policy {
            EditPolicy::Discrete => self.delays.discrete_ms,
            EditPolicy::Continuous => self.delays.continuous_ms,
        }
    }

    /// Queues `value` for `key` and returns the time it becomes due.
    pub fn push(&mut self, key: K, value: V, policy: EditPolicy, now: u64) -> u64 {
        let deadline = now.saturating_add(self.delay(policy));
        self.sequence += 1;
        self.pending.insert(key, Pending { value, deadline, sequence: self.sequence });
        deadline
    }

    /// Removes and returns every value whose window has elapsed at `now`,
    /// earliest deadline first.
    pub fn due(&mut self, now: u64) -> Vec<V> {
        let ready: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, pending)| pending.deadline <= now)
            .map(|(key, _)| key.clone())
            .collect();
        let mut out: Vec<Pending<V>> = ready.iter().filter_map(|key| self.pending.remove(key)).collect();
        out.sort_by_key(|pending| (pending.deadline, pending.sequence));
        out.into_iter().map(|pending| pending.value).collect()
    }

    /// Everything still pending, in the order it was last pushed.
    pub fn flush(&mut self) -> Vec<V> {
        let mut out: Vec<Pending<V>> = std::mem::take(&mut self.pending).into_values().collect();
        out.sort_by_key(|pending| pending.sequence);
        out.into_iter().map(|pending| pending.value).collect()
    }

    /// Drops the pending value for `key` without committing it.
    pub fn cancel(&mut self, key: &K) -> Option<V> {
        self.pending.remove(key).map(|pending| pending.value)
    }

    pub fn pending(&self, key: &K) -> Option<&V> {
        self.pending.get(key).map(|pending| &pending.value)
    }

    pub fn pending_values(&self) -> impl Iterator<Item = &V> {
        self.pending.values().map(|pending| &pending.value)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.values().map(|pending| pending.deadline).min()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<K: Ord + Clone, V> Default for DebounceGate<K, V> {
    fn default() -> Self {
        Self::new(DebounceDelays::default())
    }
}
