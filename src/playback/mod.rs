//! Headless playback: the lifecycle state machine, generation keyed timers, completion
//! tracking and a player that drives plans against a caller supplied clock.

mod completion;
mod player;
mod state;
mod stepper;
mod timers;

pub use completion::{CompletionTracker, Recorded};
pub use player::{EventKind, PlaybackEvent, Player, REPLAY_GAP_MS};
pub use state::{GenerationKey, PlaybackState, StateMachine};
pub use stepper::{ScheduleStepper, StepReport, Stepper};
pub use timers::{Timer, TimerAction, TimerQueue};
