//! Guest thoughts and the bounded thought log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::{RideId, ShopId};

/// What a guest is thinking about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThoughtKind {
    Hungry,
    Thirsty,
    NeedBathroom,
    Nauseous,
    Tired,
    Happy,
    Lost,
    Expensive,
    GoodValue,
    LongQueue,
    TooIntense,
    RideWasGreat,
    RideWasBoring,
}

impl ThoughtKind {
    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            ThoughtKind::Happy | ThoughtKind::GoodValue | ThoughtKind::RideWasGreat
        )
    }
}

/// The facility a thought is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThoughtSubject {
    Ride(RideId),
    Shop(ShopId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    pub kind: ThoughtKind,
    pub subject: Option<ThoughtSubject>,
    /// Simulation clock when the thought was logged
    pub timestamp: f64,
}

impl Thought {
    pub fn new(kind: ThoughtKind, timestamp: f64) -> Self {
        Self { kind, subject: None, timestamp }
    }

    pub fn about(mut self, subject: ThoughtSubject) -> Self {
        self.subject = Some(subject);
        self
    }
}

/// Newest-first log holding at most `capacity` thoughts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThoughtLog {
    thoughts: VecDeque<Thought>,
    capacity: usize,
}

impl Default for ThoughtLog {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ThoughtLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            thoughts: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Prepend a thought, dropping the oldest past capacity
    pub fn add(&mut self, thought: Thought) {
        self.thoughts.push_front(thought);
        self.thoughts.truncate(self.capacity);
    }

    /// Whether `kind` was logged within `window` before `now`
    pub fn has_recent(&self, kind: ThoughtKind, now: f64, window: f64) -> bool {
        self.thoughts
            .iter()
            .any(|t| t.kind == kind && now - t.timestamp < window)
    }

    /// Add unless an identical kind is still inside the dedup window
    ///
    /// Returns true if the thought was logged.
    pub fn add_deduped(&mut self, thought: Thought, window: f64) -> bool {
        if self.has_recent(thought.kind, thought.timestamp, window) {
            return false;
        }
        self.add(thought);
        true
    }

    pub fn latest(&self) -> Option<&Thought> {
        self.thoughts.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Thought> {
        self.thoughts.iter()
    }

    pub fn count_of(&self, kind: ThoughtKind) -> usize {
        self.thoughts.iter().filter(|t| t.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.thoughts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thoughts.is_empty()
    }
}
