use super::completion::{CompletionTracker, Recorded};
use super::state::{GenerationKey, PlaybackState, StateMachine};
use super::stepper::Stepper;
use super::timers::{Timer, TimerAction, TimerQueue};
use crate::animations::{self, Plan};
use crate::settings::{GlobalSettings, PresetSettings};
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

/// Idle interval between a replay request and the new pass starting.
pub const REPLAY_GAP_MS: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EventKind {
    Started,
    Paused,
    Resumed,
    UnitComplete { index: usize },
    Complete,
    Looped,
    Stopped,
}

/// Something observable that happened during playback.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlaybackEvent {
    /// Clock time of the event, in milliseconds.
    pub at_ms: f64,
    pub key: GenerationKey,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl fmt::Display for PlaybackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>9.1}ms {:>4} ", self.at_ms, self.key.to_string())?;
        match self.kind {
            EventKind::Started => write!(f, "started"),
            EventKind::Paused => write!(f, "paused"),
            EventKind::Resumed => write!(f, "resumed"),
            EventKind::UnitComplete { index } => write!(f, "unit {index} complete"),
            EventKind::Complete => write!(f, "complete"),
            EventKind::Looped => write!(f, "looping"),
            EventKind::Stopped => write!(f, "stopped"),
        }
    }
}

/// Plays title animations against a clock driven by the caller.
///
/// Every pass regenerates its plan from the current text and settings. Steps are armed as
/// timers tagged with the pass's key, so nothing armed by an earlier pass can reach a later one.
#[derive(Debug)]
pub struct Player {
    text: String,
    global: GlobalSettings,
    settings: PresetSettings,
    machine: StateMachine,
    timers: TimerQueue,
    tracker: CompletionTracker,
    plan: Option<Plan>,
    stepper: Option<Box<dyn Stepper>>,
    now_ms: f64,

    /// Clock time at which the current pass's local time was zero.
    origin_ms: f64,

    /// Local time at which the current pass was paused.
    paused_at_ms: f64,
}

impl Player {
    pub fn new(text: impl Into<String>, global: GlobalSettings, settings: PresetSettings) -> Self {
        Self {
            text: text.into(),
            global,
            settings,
            machine: StateMachine::new(),
            timers: TimerQueue::new(),
            tracker: CompletionTracker::new(),
            plan: None,
            stepper: None,
            now_ms: 0.0,
            origin_ms: 0.0,
            paused_at_ms: 0.0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.machine.state()
    }

    pub fn key(&self) -> GenerationKey {
        self.machine.key()
    }

    /// The plan of the current or last pass.
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Time elapsed within the current pass, excluding time spent paused.
    pub fn local_ms(&self) -> f64 {
        match self.state() {
            PlaybackState::Playing => self.now_ms - self.origin_ms,
            PlaybackState::Paused => self.paused_at_ms,
            PlaybackState::Idle | PlaybackState::Complete => 0.0,
        }
    }

    /// Units of the current pass that have not completed yet.
    pub fn remaining_units(&self) -> usize {
        self.tracker.remaining()
    }

    /// Replace the text and settings. An active pass is restarted so the change takes effect.
    pub fn configure(
        &mut self,
        text: impl Into<String>,
        global: GlobalSettings,
        settings: PresetSettings,
    ) -> Vec<PlaybackEvent> {
        self.text = text.into();
        self.global = global;
        self.settings = settings;
        match self.state() {
            PlaybackState::Idle | PlaybackState::Complete => Vec::new(),
            PlaybackState::Playing | PlaybackState::Paused => self.replay(),
        }
    }

    pub fn play(&mut self) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        if let Some(key) = self.machine.play() {
            self.start_pass(key, &mut events);
        }
        events
    }

    pub fn pause(&mut self) -> Vec<PlaybackEvent> {
        if !self.machine.pause() {
            return Vec::new();
        }
        self.paused_at_ms = self.now_ms - self.origin_ms;
        self.timers.cancel_all();
        debug!(key = %self.key(), local_ms = self.paused_at_ms, "paused");
        vec![self.event(EventKind::Paused)]
    }

    pub fn resume(&mut self) -> Vec<PlaybackEvent> {
        if !self.machine.resume() {
            return Vec::new();
        }
        self.origin_ms = self.now_ms - self.paused_at_ms;
        self.arm_step();
        debug!(key = %self.key(), local_ms = self.paused_at_ms, "resumed");
        vec![self.event(EventKind::Resumed)]
    }

    /// Go back to idle and start a fresh pass after [REPLAY_GAP_MS].
    pub fn replay(&mut self) -> Vec<PlaybackEvent> {
        let key = self.machine.reset();
        self.timers.cancel_stale(key);
        self.timers.schedule(key, self.now_ms + REPLAY_GAP_MS, TimerAction::ReplayStart);
        Vec::new()
    }

    pub fn stop(&mut self) -> Vec<PlaybackEvent> {
        self.machine.reset();
        self.timers.cancel_all();
        self.stepper = None;
        vec![self.event(EventKind::Stopped)]
    }

    /// Move the clock forward by `dt_ms`, firing every timer that falls due.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<PlaybackEvent> {
        let target = self.now_ms + dt_ms.max(0.0);
        let mut events = Vec::new();
        while let Some(timer) = self.timers.pop_due(target) {
            self.now_ms = self.now_ms.max(timer.due_ms);
            self.fire(timer, &mut events);
        }
        self.now_ms = target;
        events
    }

    /// Run until nothing is left to fire, or until `limit_ms` of clock time has passed.
    pub fn run_until_idle(&mut self, limit_ms: f64) -> Vec<PlaybackEvent> {
        let deadline = self.now_ms + limit_ms;
        let mut events = Vec::new();
        while let Some(due) = self.timers.next_due() {
            if due > deadline {
                break;
            }
            events.extend(self.advance(due - self.now_ms));
        }
        events
    }

    fn fire(&mut self, timer: Timer, events: &mut Vec<PlaybackEvent>) {
        let key = self.key();
        if timer.key != key {
            trace!(id = timer.id, timer_key = %timer.key, %key, "dropping stale timer");
            return;
        }
        match timer.action {
            TimerAction::ReplayStart => {
                if let Some(key) = self.machine.play() {
                    self.start_pass(key, events);
                }
            }
            TimerAction::Step => self.step(key, events),
        }
    }

    fn start_pass(&mut self, key: GenerationKey, events: &mut Vec<PlaybackEvent>) {
        let plan = animations::generate(&self.text, &self.global, &self.settings);
        self.timers.cancel_stale(key);
        self.tracker.begin(key, plan.animated_units());
        self.stepper = Some(plan.stepper());
        self.plan = Some(plan);
        self.origin_ms = self.now_ms;
        debug!(%key, preset = %self.settings.kind(), "started pass");
        events.push(self.event(EventKind::Started));

        if self.tracker.settle() {
            self.finish(key, events);
        } else {
            self.arm_step();
        }
    }

    fn step(&mut self, key: GenerationKey, events: &mut Vec<PlaybackEvent>) {
        if self.state() != PlaybackState::Playing {
            return;
        }
        let Some(stepper) = self.stepper.as_mut() else {
            return;
        };
        let report = stepper.advance();
        let mut finished = false;
        for index in report.completed {
            match self.tracker.record(key, index) {
                Recorded::Counted => events.push(self.event(EventKind::UnitComplete { index })),
                Recorded::Completed => {
                    events.push(self.event(EventKind::UnitComplete { index }));
                    finished = true;
                }
                Recorded::Stale | Recorded::Ignored => {}
            }
        }
        if finished {
            self.finish(key, events);
        } else {
            self.arm_step();
        }
    }

    fn finish(&mut self, key: GenerationKey, events: &mut Vec<PlaybackEvent>) {
        debug!(%key, local_ms = self.now_ms - self.origin_ms, looping = self.global.looping, "pass complete");
        events.push(self.event(EventKind::Complete));
        if self.global.looping {
            events.push(self.event(EventKind::Looped));
            self.replay();
        } else {
            self.machine.complete(key);
        }
    }

    fn arm_step(&mut self) {
        let Some(due) = self.stepper.as_ref().and_then(|stepper| stepper.next_due()) else {
            return;
        };
        self.timers.schedule(self.key(), self.origin_ms + due, TimerAction::Step);
    }

    fn event(&self, kind: EventKind) -> PlaybackEvent {
        PlaybackEvent { at_ms: self.now_ms, key: self.key(), kind }
    }
}
