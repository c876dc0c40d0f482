use super::state::GenerationKey;
use tracing::trace;

/// What a timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerAction {
    /// Perform the next step of the current plan.
    Step,

    /// Start a new pass after the replay gap.
    ReplayStart,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timer {
    pub id: u64,

    /// The key the timer was armed under.
    pub key: GenerationKey,

    /// Clock time at which the timer fires, in milliseconds.
    pub due_ms: f64,

    pub action: TimerAction,
}

/// Pending timers, fired in due order.
///
/// Timers fire in the order they are due; timers due at the same time fire in the order they
/// were armed.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer, returning its id.
    pub fn schedule(&mut self, key: GenerationKey, due_ms: f64, action: TimerAction) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        trace!(id, %key, due_ms, ?action, "armed timer");
        self.timers.push(Timer { id, key, due_ms, action });
        id
    }

    /// Cancel one timer. Returns whether it was still pending.
    pub fn cancel(&mut self, id: u64) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        self.timers.len() != before
    }

    /// Cancel every pending timer, returning how many there were.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.timers.len();
        if cancelled > 0 {
            trace!(cancelled, "cancelled timers");
        }
        self.timers.clear();
        cancelled
    }

    /// Cancel the timers armed under any key other than `key`.
    pub fn cancel_stale(&mut self, key: GenerationKey) -> usize {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.key == key);
        let cancelled = before - self.timers.len();
        if cancelled > 0 {
            trace!(cancelled, %key, "cancelled stale timers");
        }
        cancelled
    }

    pub fn next_due(&self) -> Option<f64> {
        self.earliest().map(|position| self.timers[position].due_ms)
    }

    /// Remove and return the earliest timer due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<Timer> {
        let position = self.earliest()?;
        if self.timers[position].due_ms > now_ms {
            return None;
        }
        Some(self.timers.remove(position))
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    fn earliest(&self) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)))
            .map(|(position, _)| position)
    }
}
