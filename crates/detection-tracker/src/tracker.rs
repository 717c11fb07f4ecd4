//! Recency-ordered bounded tracker

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Default tracker capacity (signs shown at once)
pub const DEFAULT_CAPACITY: usize = 5;

/// Identity plus the update sequence it was last seen in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedDetection<T> {
    pub item: T,
    pub last_seen: u64,
}

/// Bounded set of detections, most recently seen first
pub struct DetectionTracker<T> {
    /// Front = most recently seen
    entries: VecDeque<TrackedDetection<T>>,
    /// Maximum distinct identities
    capacity: usize,
    /// Incremented on every non-empty update
    sequence: u64,
}

impl<T: Clone + PartialEq> DetectionTracker<T> {
    /// Create a tracker holding at most `capacity` identities
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            sequence: 0,
        }
    }

    /// Create a tracker with the default capacity
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Record one batch of observations.
    ///
    /// Every distinct item of the batch moves to the front, keeping batch
    /// order. Items seen before but absent from the batch stay until evicted.
    /// If the batch alone exceeds capacity, its leading items win.
    pub fn update(&mut self, batch: &[T]) {
        if batch.is_empty() || self.capacity == 0 {
            return;
        }
        self.sequence += 1;

        let mut distinct: Vec<&T> = Vec::with_capacity(batch.len());
        for item in batch {
            if !distinct.contains(&item) {
                distinct.push(item);
            }
        }

        for item in distinct.into_iter().rev() {
            if let Some(pos) = self.entries.iter().position(|e| &e.item == item) {
                self.entries.remove(pos);
            }
            self.entries.push_front(TrackedDetection {
                item: item.clone(),
                last_seen: self.sequence,
            });
            if self.entries.len() > self.capacity {
                self.entries.pop_back();
            }
        }
    }

    /// Live items, most recently seen first
    pub fn current(&self) -> Vec<T> {
        self.entries.iter().map(|e| e.item.clone()).collect()
    }

    /// Live entries with their last-seen sequence
    pub fn entries(&self) -> impl Iterator<Item = &TrackedDetection<T>> {
        self.entries.iter()
    }

    /// Drop all tracked items
    pub fn reset(&mut self) {
        if !self.entries.is_empty() {
            debug!("Resetting detection tracker ({} entries)", self.entries.len());
        }
        self.entries.clear();
        self.sequence = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
