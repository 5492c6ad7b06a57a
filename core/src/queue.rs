//! Shuffled candidate queue.
//!
//! Candidates are drawn from the END of the shuffled list. The draw
//! order decides who wins ties between equally eligible workers, so
//! it must stay exactly this way for a seed to reproduce a roster.

use crate::{rng::DrawRng, types::WorkerName};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateQueue {
    items: Vec<WorkerName>,
}

impl CandidateQueue {
    /// Queue candidates in the given order, no shuffle.
    /// The last candidate is drawn first.
    pub fn in_order(items: Vec<WorkerName>) -> Self {
        Self { items }
    }

    /// Shuffle `items` uniformly with `rng` and queue them.
    pub fn shuffled(mut items: Vec<WorkerName>, rng: &mut DrawRng) -> Self {
        rng.shuffle(&mut items);
        Self { items }
    }

    pub fn pop(&mut self) -> Option<WorkerName> {
        self.items.pop()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Iterator for CandidateQueue {
    type Item = WorkerName;

    fn next(&mut self) -> Option<Self::Item> {
        self.pop()
    }
}
