use crate::settings::{AnimationUnit, Easing, GlobalSettings};
use crate::text::{is_space, TextSplit};
use serde::Serialize;

/// Number of time constants after which a spring is considered settled.
const SPRING_SETTLE_TIME_CONSTANTS: f64 = 4.0;

/// Inputs shared by every preset generator.
#[derive(Debug, Clone)]
pub struct GenerationContext<'a> {
    /// The raw text.
    pub text: &'a str,

    /// The text split into characters and words.
    pub split: TextSplit<'a>,

    pub global: &'a GlobalSettings,
}

impl<'a> GenerationContext<'a> {
    pub fn new(text: &'a str, global: &'a GlobalSettings) -> Self {
        Self { text, split: TextSplit::new(text), global }
    }

    /// Global duration in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.global.duration as f64
    }

    /// The whole text as a single unit, or nothing when the text is empty.
    pub fn line(&self) -> Vec<&'a str> {
        if self.text.is_empty() { Vec::new() } else { vec![self.text] }
    }

    /// The units a preset animates at the given granularity.
    pub fn units(&self, unit: AnimationUnit) -> Vec<&'a str> {
        match unit {
            AnimationUnit::Char => self.split.chars.clone(),
            AnimationUnit::Word => self.split.words.clone(),
            AnimationUnit::Line => self.line(),
        }
    }
}

/// How a unit moves from its start values to its end values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Transition {
    /// A fixed duration curve.
    Tween { duration_ms: f64, easing: Easing },

    /// A damped spring with unit mass. Its duration is a consequence of its parameters.
    Spring { stiffness: f64, damping: f64 },
}

impl Transition {
    pub fn tween(duration_ms: f64, easing: Easing) -> Self {
        Self::Tween { duration_ms, easing }
    }

    pub fn spring(stiffness: f64, damping: f64) -> Self {
        Self::Spring { stiffness, damping }
    }

    /// How long it takes for this transition to reach its end values, in milliseconds.
    ///
    /// Springs are estimated as settled after a few time constants of their slowest decaying
    /// mode.
    pub fn settle_ms(&self) -> f64 {
        match *self {
            Self::Tween { duration_ms, .. } => duration_ms,
            Self::Spring { stiffness, damping } => {
                if stiffness <= 0.0 || damping <= 0.0 {
                    return 0.0;
                }
                let natural_frequency = stiffness.sqrt();
                let damping_ratio = damping / (2.0 * natural_frequency);
                let decay_rate = if damping_ratio < 1.0 {
                    damping / 2.0
                } else {
                    natural_frequency * (damping_ratio - (damping_ratio * damping_ratio - 1.0).sqrt())
                };
                SPRING_SETTLE_TIME_CONSTANTS / decay_rate * 1000.0
            }
        }
    }
}

/// When a unit starts and how it moves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Timing {
    pub delay_ms: f64,
    pub transition: Transition,
}

impl Timing {
    pub fn new(delay_ms: f64, transition: Transition) -> Self {
        Self { delay_ms, transition }
    }

    /// Time since the start of the generation at which the unit reaches its end values.
    pub fn finish_ms(&self) -> f64 {
        self.delay_ms + self.transition.settle_ms()
    }
}

/// One unit animating between two states.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MotionUnit<S> {
    pub index: usize,
    pub text: String,

    /// Static units keep their slot but never move or count toward completion.
    pub animated: bool,

    pub from: S,
    pub to: S,
    pub timing: Timing,
}

impl<S: Clone> MotionUnit<S> {
    /// Build a unit; spaces become static units sitting at their end state.
    pub fn new(index: usize, text: &str, from: S, to: S, timing: Timing) -> Self {
        let animated = !is_space(text);
        let from = if animated { from } else { to.clone() };
        Self { index, text: text.to_string(), animated, from, to, timing }
    }
}

/// The moment an animated unit finishes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct UnitFinish {
    pub index: usize,
    pub at_ms: f64,
}

/// Finish times of the animated units in a list of motion units.
pub(crate) fn motion_finish_times<S>(units: &[MotionUnit<S>]) -> Vec<UnitFinish> {
    units
        .iter()
        .filter(|unit| unit.animated)
        .map(|unit| UnitFinish { index: unit.index, at_ms: unit.timing.finish_ms() })
        .collect()
}

/// A point in pixels relative to the unit's resting position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point at `distance` along `angle` radians.
    pub fn polar(angle: f64, distance: f64) -> Self {
        Self { x: angle.cos() * distance, y: angle.sin() * distance }
    }
}

/// Rounds halves towards positive infinity, so `-2.5` becomes `-2`.
pub(crate) fn js_round(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// A count jittered around `base` by up to `randomness * base` in either direction.
///
/// Consumes exactly one value from `next`.
pub(crate) fn jittered_count(base: u32, randomness: f64, next: f64, minimum: u32) -> u32 {
    let base = base as f64;
    let spread = randomness * base;
    let offset = (next * spread * 2.0).floor() - spread;
    let count = js_round(base + offset).max(minimum as f64);
    count as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2.5, 3.0)]
    #[case(-2.5, -2.0)]
    #[case(2.4999, 2.0)]
    #[case(-0.5, 0.0)]
    fn rounding(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(js_round(input), expected);
    }

    #[rstest]
    #[case::underdamped(100.0, 10.0, 800.0)]
    #[case::slide(200.0, 20.0, 400.0)]
    #[case::critical(100.0, 20.0, 400.0)]
    fn spring_settle(#[case] stiffness: f64, #[case] damping: f64, #[case] expected: f64) {
        let settle = Transition::spring(stiffness, damping).settle_ms();
        assert!((settle - expected).abs() < 1e-6, "{settle}");
    }

    #[test]
    fn overdamped_spring_is_slower() {
        let critical = Transition::spring(100.0, 20.0).settle_ms();
        let overdamped = Transition::spring(100.0, 40.0).settle_ms();
        assert!(overdamped > critical);
        assert!(overdamped.is_finite());
    }

    #[test]
    fn degenerate_spring() {
        assert_eq!(Transition::spring(0.0, 10.0).settle_ms(), 0.0);
    }

    #[test]
    fn timing_finish() {
        let timing = Timing::new(150.0, Transition::tween(900.0, Easing::EaseOut));
        assert_eq!(timing.finish_ms(), 1050.0);
    }

    #[test]
    fn space_units_are_static() {
        let timing = Timing::new(0.0, Transition::tween(100.0, Easing::Linear));
        let unit = MotionUnit::new(1, " ", 0.0, 1.0, timing);
        assert!(!unit.animated);
        assert_eq!(unit.from, 1.0);
        let unit = MotionUnit::new(0, "a", 0.0, 1.0, timing);
        assert!(unit.animated);
        assert_eq!(unit.from, 0.0);
    }

    #[rstest]
    #[case(5, 0.0, 0.99, 1, 5)]
    #[case(5, 0.25, 0.0, 1, 4)]
    #[case(1, 0.0, 0.5, 1, 1)]
    #[case(3, 1.0, 0.0, 2, 2)]
    fn jitter(#[case] base: u32, #[case] randomness: f64, #[case] next: f64, #[case] min: u32, #[case] expected: u32) {
        assert_eq!(jittered_count(base, randomness, next, min), expected);
    }
}
