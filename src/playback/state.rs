use serde::Serialize;
use std::fmt;
use strum::{Display, IntoStaticStr};

/// Where a title animation is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
    Complete,
}

/// Identifies one play or replay pass.
///
/// Anything captured under an older key is stale and must not touch the current pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GenerationKey(pub u64);

impl GenerationKey {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for GenerationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The lifecycle transitions. Every method returns whether the transition happened.
#[derive(Clone, Debug, Default)]
pub struct StateMachine {
    state: PlaybackState,
    key: GenerationKey,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn key(&self) -> GenerationKey {
        self.key
    }

    /// Start a new pass from idle, returning its key.
    pub fn play(&mut self) -> Option<GenerationKey> {
        if self.state != PlaybackState::Idle {
            return None;
        }
        self.key = self.key.next();
        self.state = PlaybackState::Playing;
        Some(self.key)
    }

    pub fn pause(&mut self) -> bool {
        self.transition(PlaybackState::Playing, PlaybackState::Paused)
    }

    pub fn resume(&mut self) -> bool {
        self.transition(PlaybackState::Paused, PlaybackState::Playing)
    }

    /// Mark the pass identified by `key` as complete. Ignored for any other key.
    pub fn complete(&mut self, key: GenerationKey) -> bool {
        key == self.key && self.transition(PlaybackState::Playing, PlaybackState::Complete)
    }

    /// Go back to idle from any state, invalidating the current key.
    pub fn reset(&mut self) -> GenerationKey {
        self.key = self.key.next();
        self.state = PlaybackState::Idle;
        self.key
    }

    fn transition(&mut self, from: PlaybackState, to: PlaybackState) -> bool {
        if self.state != from {
            return false;
        }
        self.state = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let mut machine = StateMachine::new();
        assert_eq!(machine.state(), PlaybackState::Idle);
        assert!(!machine.pause());

        let key = machine.play().expect("play from idle");
        assert_eq!(key, GenerationKey(1));
        assert_eq!(machine.play(), None);

        assert!(machine.pause());
        assert!(!machine.pause());
        assert_eq!(machine.state(), PlaybackState::Paused);
        assert!(!machine.complete(key));
        assert!(machine.resume());

        assert!(!machine.complete(GenerationKey(7)));
        assert!(machine.complete(key));
        assert_eq!(machine.state(), PlaybackState::Complete);
        assert!(!machine.resume());
        assert_eq!(machine.play(), None);
    }

    #[test]
    fn reset_invalidates_the_key() {
        let mut machine = StateMachine::new();
        let first = machine.play().expect("play from idle");
        let reset = machine.reset();
        assert!(reset > first);
        assert_eq!(machine.state(), PlaybackState::Idle);
        assert!(!machine.complete(first));
        let second = machine.play().expect("play after reset");
        assert!(second > reset);
    }

    #[test]
    fn state_names() {
        assert_eq!(PlaybackState::Complete.to_string(), "complete");
        assert_eq!(GenerationKey(3).to_string(), "#3");
    }
}
