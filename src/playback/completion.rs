use super::state::GenerationKey;
use std::collections::BTreeSet;
use tracing::trace;

/// The result of recording a unit completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recorded {
    /// The completion belongs to another pass and was ignored.
    Stale,

    /// The unit had already completed, or is not one the pass waits for.
    Ignored,

    /// The unit completed; others are still pending.
    Counted,

    /// The unit completed and was the last one pending.
    Completed,
}

/// Counts unit completions for one pass and fires the overall completion exactly once.
#[derive(Clone, Debug, Default)]
pub struct CompletionTracker {
    key: GenerationKey,
    pending: BTreeSet<usize>,
    fired: bool,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a new pass that waits for `units`.
    pub fn begin(&mut self, key: GenerationKey, units: impl IntoIterator<Item = usize>) {
        self.key = key;
        self.pending = units.into_iter().collect();
        self.fired = false;
    }

    pub fn record(&mut self, key: GenerationKey, index: usize) -> Recorded {
        if key != self.key {
            trace!(%key, current = %self.key, index, "ignoring stale completion");
            return Recorded::Stale;
        }
        if !self.pending.remove(&index) {
            return Recorded::Ignored;
        }
        if self.settle() { Recorded::Completed } else { Recorded::Counted }
    }

    /// Fire the overall completion if nothing is pending and it has not fired yet.
    ///
    /// A pass with no animated units completes as soon as it is settled.
    pub fn settle(&mut self) -> bool {
        if self.fired || !self.pending.is_empty() {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
