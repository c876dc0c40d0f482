use super::charsets;
use super::common::{GenerationContext, UnitFinish};
use crate::playback::{StepReport, Stepper};
use crate::random::{derive_seed, rank_of, RandomUtils, Seed};
use crate::settings::{CharsetMode, ScrambleSettings};
use crate::text::{is_space, should_preserve};
use serde::Serialize;

/// Seed offset between consecutive ticks.
pub const TICK_SEED_STRIDE: u32 = 1000;

/// One character of a scramble.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CharacterState {
    pub target: String,

    /// The glyph shown before the first tick.
    pub initial: String,

    /// Whether the character starts out locked, which is the case for spaces and preserved
    /// characters.
    pub is_revealed: bool,

    /// Rank of this character in the reveal order.
    pub reveal_order: usize,

    /// The 1-based tick on which the character locks to its target.
    pub lock_tick: Option<u32>,
}

/// Scramble: characters cycle through random glyphs and lock into place one by one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScramblePlan {
    pub seed: Seed,
    pub charset_mode: CharsetMode,
    pub steps: u32,
    pub intensity: f64,
    pub delay_ms: f64,
    pub tick_interval_ms: f64,
    pub chars: Vec<CharacterState>,
}

impl ScramblePlan {
    pub fn animated_units(&self) -> Vec<usize> {
        self.chars.iter().enumerate().filter(|(_, c)| !c.is_revealed).map(|(index, _)| index).collect()
    }

    pub fn finish_times(&self) -> Vec<UnitFinish> {
        self.chars
            .iter()
            .enumerate()
            .filter_map(|(index, c)| {
                c.lock_tick.map(|tick| UnitFinish { index, at_ms: self.tick_at(tick) })
            })
            .collect()
    }

    /// Generation local time of tick `tick`.
    pub fn tick_at(&self, tick: u32) -> f64 {
        self.delay_ms + tick as f64 * self.tick_interval_ms
    }

    pub fn stepper(&self) -> ScrambleStepper {
        ScrambleStepper::new(self)
    }

    /// Every frame of the scramble: the initial glyphs followed by the glyphs after each tick.
    pub fn frames(&self) -> Vec<Vec<String>> {
        let mut stepper = self.stepper();
        let mut frames = vec![stepper.current().to_vec()];
        while stepper.next_due().is_some() {
            stepper.advance();
            frames.push(stepper.current().to_vec());
        }
        frames
    }
}

pub(crate) fn generate(ctx: &GenerationContext, settings: &ScrambleSettings) -> ScramblePlan {
    let seed = ctx.global.seed;
    let chars = &ctx.split.chars;
    let steps = settings.steps.max(1);
    let charset = charsets::charset(settings.charset_mode);

    let mut random = RandomUtils::new(seed);
    let ranks = rank_of(&random.reveal_order(chars.len(), settings.reveal_mode));
    let states = chars
        .iter()
        .zip(ranks)
        .map(|(&target, rank)| {
            let locked = is_space(target)
                || should_preserve(target, settings.preserve_spaces, settings.preserve_punctuation);
            if locked {
                return CharacterState {
                    target: target.to_string(),
                    initial: target.to_string(),
                    is_revealed: true,
                    reveal_order: rank,
                    lock_tick: None,
                };
            }
            let initial = random.pick(charset).copied().unwrap_or(target);
            CharacterState {
                target: target.to_string(),
                initial: initial.to_string(),
                is_revealed: false,
                reveal_order: rank,
                lock_tick: Some(lock_tick(rank, chars.len(), steps, settings.intensity)),
            }
        })
        .collect();

    ScramblePlan {
        seed,
        charset_mode: settings.charset_mode,
        steps,
        intensity: settings.intensity,
        delay_ms: ctx.global.delay as f64,
        tick_interval_ms: ctx.duration_ms() / steps as f64,
        chars: states,
    }
}

/// The first tick at which a character of the given rank locks.
///
/// Lower intensities push every reveal towards the end of the run; at zero intensity every
/// character locks on the last tick.
pub fn lock_tick(rank: usize, length: usize, steps: u32, intensity: f64) -> u32 {
    let steps = steps as f64;
    let spread = if length == 0 { 0.0 } else { rank as f64 / length as f64 * steps * intensity };
    let threshold = spread + steps * (1.0 - intensity);
    threshold.ceil().max(1.0) as u32
}

/// Ticks a scramble plan, redrawing every unlocked glyph from a stream reseeded on every tick.
#[derive(Debug, Clone)]
pub struct ScrambleStepper {
    seed: Seed,
    charset: &'static [&'static str],
    delay_ms: f64,
    tick_interval_ms: f64,
    targets: Vec<String>,
    lock_ticks: Vec<Option<u32>>,
    current: Vec<String>,
    revealed: Vec<bool>,
    tick: u32,
}

impl ScrambleStepper {
    fn new(plan: &ScramblePlan) -> Self {
        Self {
            seed: plan.seed,
            charset: charsets::charset(plan.charset_mode),
            delay_ms: plan.delay_ms,
            tick_interval_ms: plan.tick_interval_ms,
            targets: plan.chars.iter().map(|c| c.target.clone()).collect(),
            lock_ticks: plan.chars.iter().map(|c| c.lock_tick).collect(),
            current: plan.chars.iter().map(|c| c.initial.clone()).collect(),
            revealed: plan.chars.iter().map(|c| c.is_revealed).collect(),
            tick: 0,
        }
    }

    /// The glyphs currently on display.
    pub fn current(&self) -> &[String] {
        &self.current
    }

    /// The number of ticks performed so far.
    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }
}

impl Stepper for ScrambleStepper {
    fn next_due(&self) -> Option<f64> {
        if self.revealed.iter().all(|revealed| *revealed) {
            return None;
        }
        Some(self.delay_ms + (self.tick + 1) as f64 * self.tick_interval_ms)
    }

    fn advance(&mut self) -> StepReport {
        let Some(at_ms) = self.next_due() else {
            return StepReport::default();
        };
        self.tick += 1;
        let mut random = RandomUtils::new(derive_seed(self.seed, self.tick.wrapping_mul(TICK_SEED_STRIDE)));
        let mut completed = Vec::new();
        for index in 0..self.current.len() {
            if self.revealed[index] {
                continue;
            }
            let locks = self.lock_ticks[index].map_or(true, |lock| self.tick >= lock);
            if locks {
                self.current[index] = self.targets[index].clone();
                self.revealed[index] = true;
                completed.push(index);
            } else if let Some(glyph) = random.pick(self.charset) {
                self.current[index] = glyph.to_string();
            }
        }
        StepReport { at_ms, completed }
    }
}
