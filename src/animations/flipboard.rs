use super::charsets;
use super::common::{jittered_count, GenerationContext, UnitFinish};
use crate::playback::{StepReport, Stepper};
use crate::random::RandomUtils;
use crate::settings::FlipboardSettings;
use crate::text::{is_space, SPACE};
use serde::Serialize;
use std::collections::BTreeSet;

/// Fraction of a flip step spent with the card half turned.
pub const FLIP_PHASE: f64 = 0.4;

/// One split-flap card.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Card {
    pub index: usize,
    pub target: String,

    /// Glyphs shown one flip after another; the last one is the target.
    pub sequence: Vec<String>,

    pub flips: u32,
    pub animated: bool,

    /// When the first flip starts.
    pub start_ms: f64,
}

impl Card {
    /// When step `step` starts turning.
    pub fn step_start(&self, step: usize, flip_ms: f64) -> f64 {
        self.start_ms + step as f64 * flip_ms
    }

    /// When the last step lands.
    pub fn finish_ms(&self, flip_ms: f64) -> f64 {
        let last = self.sequence.len().saturating_sub(1);
        self.step_start(last, flip_ms) + flip_ms * FLIP_PHASE
    }
}

/// Flipboard: split-flap cards flip through random glyphs before settling on their target.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlipboardPlan {
    /// Duration of one flip step.
    pub flip_ms: f64,

    /// Time between a step starting and its glyph landing.
    pub flip_phase_ms: f64,

    pub card_color: String,
    pub text_color: String,
    pub show_divider: bool,
    pub perspective: u32,
    pub cards: Vec<Card>,
}

impl FlipboardPlan {
    pub fn animated_units(&self) -> Vec<usize> {
        self.cards.iter().filter(|c| c.animated).map(|c| c.index).collect()
    }

    pub fn finish_times(&self) -> Vec<UnitFinish> {
        self.cards
            .iter()
            .filter(|c| c.animated)
            .map(|c| UnitFinish { index: c.index, at_ms: c.finish_ms(self.flip_ms) })
            .collect()
    }

    pub fn stepper(&self) -> FlipboardStepper {
        FlipboardStepper::new(self)
    }
}

pub(crate) fn generate(ctx: &GenerationContext, settings: &FlipboardSettings) -> FlipboardPlan {
    let alphabet = charsets::alphabet(settings.alphabet);
    let mut random = RandomUtils::new(ctx.global.seed);

    let cards: Vec<Card> = ctx
        .split
        .chars
        .iter()
        .enumerate()
        .map(|(index, &target)| {
            let start_ms = ctx.global.unit_start(index);
            if is_space(target) {
                let sequence = vec![SPACE.to_string()];
                return Card { index, target: target.to_string(), sequence, flips: 0, animated: false, start_ms };
            }
            let flips = jittered_count(settings.flips_per_char, settings.flip_randomness, random.next(), 2);
            let mut sequence: Vec<String> = (1..flips)
                .map(|_| random.pick(alphabet).copied().unwrap_or(target).to_string())
                .collect();
            sequence.push(target.to_string());
            Card { index, target: target.to_string(), sequence, flips, animated: true, start_ms }
        })
        .collect();

    let max_flips = cards.iter().map(|c| c.flips).max().unwrap_or(0).max(1);
    let flip_ms = ctx.duration_ms() / max_flips as f64;
    FlipboardPlan {
        flip_ms,
        flip_phase_ms: flip_ms * FLIP_PHASE,
        card_color: settings.card_color.clone(),
        text_color: settings.text_color.clone(),
        show_divider: settings.show_divider,
        perspective: settings.perspective,
        cards,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum FlipAction {
    Turn,
    Land,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FlipEvent {
    at_ms: f64,
    card: usize,
    step: usize,
    action: FlipAction,
}

/// Plays the flip steps of every card, tracking which cards are mid-flip.
#[derive(Debug, Clone)]
pub struct FlipboardStepper {
    events: Vec<FlipEvent>,
    position: usize,
    sequences: Vec<Vec<String>>,
    current: Vec<String>,
    flipping: BTreeSet<usize>,
}

impl FlipboardStepper {
    fn new(plan: &FlipboardPlan) -> Self {
        let mut events = Vec::new();
        for card in plan.cards.iter().filter(|c| c.animated) {
            for step in 0..card.sequence.len() {
                let at_ms = card.step_start(step, plan.flip_ms);
                events.push(FlipEvent { at_ms, card: card.index, step, action: FlipAction::Turn });
                events.push(FlipEvent {
                    at_ms: at_ms + plan.flip_phase_ms,
                    card: card.index,
                    step,
                    action: FlipAction::Land,
                });
            }
        }
        events.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms).then(a.card.cmp(&b.card)).then(a.step.cmp(&b.step)));

        let sequences: Vec<Vec<String>> = plan.cards.iter().map(|c| c.sequence.clone()).collect();
        let current = sequences.iter().map(|s| s.first().cloned().unwrap_or_else(|| SPACE.to_string())).collect();
        Self { events, position: 0, sequences, current, flipping: BTreeSet::new() }
    }

    /// The glyph each card currently shows.
    pub fn current(&self) -> &[String] {
        &self.current
    }

    /// Cards that are half turned right now.
    pub fn flipping(&self) -> &BTreeSet<usize> {
        &self.flipping
    }
}

impl Stepper for FlipboardStepper {
    fn next_due(&self) -> Option<f64> {
        self.events.get(self.position).map(|event| event.at_ms)
    }

    fn advance(&mut self) -> StepReport {
        let Some(at_ms) = self.next_due() else {
            return StepReport::default();
        };
        let mut completed = Vec::new();
        while let Some(event) = self.events.get(self.position).copied() {
            if event.at_ms != at_ms {
                break;
            }
            self.position += 1;
            match event.action {
                FlipAction::Turn => {
                    self.flipping.insert(event.card);
                }
                FlipAction::Land => {
                    let sequence = &self.sequences[event.card];
                    if let (Some(glyph), Some(slot)) = (sequence.get(event.step), self.current.get_mut(event.card)) {
                        *slot = glyph.clone();
                    }
                    self.flipping.remove(&event.card);
                    if event.step + 1 == sequence.len() {
                        completed.push(event.card);
                    }
                }
            }
        }
        completed.sort_unstable();
        StepReport { at_ms, completed }
    }
}
