use super::charsets;
use super::common::{jittered_count, GenerationContext, Timing, Transition, UnitFinish};
use crate::playback::{ScheduleStepper, StepReport, Stepper};
use crate::random::RandomUtils;
use crate::settings::{RollDirection, RollerSettings};
use crate::text::{is_space, SPACE};
use serde::Serialize;

/// Height of one row of a column, in em.
pub const ROW_HEIGHT_EM: f64 = 1.2;

/// One column of a roller board.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Column {
    pub index: usize,
    pub target: String,

    /// Glyphs from top to bottom, as laid out in the column. The row the column lands on always
    /// holds the target.
    pub stack: Vec<String>,

    /// Number of full alphabet passes in the stack.
    pub spins: u32,

    pub animated: bool,
    pub timing: Timing,

    /// Vertical offset of the stack at the start and at the end, in em.
    pub from_y_em: f64,
    pub to_y_em: f64,
}

impl Column {
    /// The glyph visible before the column starts moving.
    pub fn initial(&self) -> &str {
        let row = (-self.from_y_em / ROW_HEIGHT_EM).round() as usize;
        self.stack.get(row).map(String::as_str).unwrap_or(SPACE)
    }
}

/// Roller board: every character scrolls through shuffled alphabets before landing on its
/// target, all columns scaled so the longest stack takes the full duration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RollerPlan {
    pub direction: RollDirection,
    pub row_height_em: f64,
    pub max_stack_len: usize,
    pub columns: Vec<Column>,
}

impl RollerPlan {
    pub fn animated_units(&self) -> Vec<usize> {
        self.columns.iter().filter(|c| c.animated).map(|c| c.index).collect()
    }

    pub fn finish_times(&self) -> Vec<UnitFinish> {
        self.columns
            .iter()
            .filter(|c| c.animated)
            .map(|c| UnitFinish { index: c.index, at_ms: c.timing.finish_ms() })
            .collect()
    }

    pub fn stepper(&self) -> RollerStepper {
        RollerStepper {
            schedule: ScheduleStepper::new(self.finish_times()),
            initial: self.columns.iter().map(|c| c.initial().to_string()).collect(),
            targets: self.columns.iter().map(|c| c.target.clone()).collect(),
            landed: self.columns.iter().map(|c| !c.animated).collect(),
        }
    }
}

pub(crate) fn generate(ctx: &GenerationContext, settings: &RollerSettings) -> RollerPlan {
    let alphabet = charsets::alphabet(settings.alphabet);
    let mut random = RandomUtils::new(ctx.global.seed);

    let stacks: Vec<(u32, Vec<String>)> = ctx
        .split
        .chars
        .iter()
        .map(|&target| {
            if is_space(target) {
                return (0, vec![SPACE.to_string()]);
            }
            let spins = jittered_count(settings.spins, settings.spin_randomness, random.next(), 1);
            let mut stack = Vec::with_capacity(spins as usize * alphabet.len() + 1);
            for _ in 0..spins {
                let mut shuffled = alphabet.to_vec();
                random.shuffle(&mut shuffled);
                stack.extend(shuffled.into_iter().map(str::to_string));
            }
            stack.push(target.to_string());
            (spins, stack)
        })
        .collect();

    let max_stack_len = stacks.iter().map(|(_, stack)| stack.len()).max().unwrap_or(1).max(1);
    let columns = ctx
        .split
        .chars
        .iter()
        .zip(stacks)
        .enumerate()
        .map(|(index, (&target, (spins, mut stack)))| {
            let duration_ms = stack.len() as f64 / max_stack_len as f64 * ctx.duration_ms();
            let travel = -((stack.len() - 1) as f64) * ROW_HEIGHT_EM;
            let (from_y_em, to_y_em) = match settings.direction {
                RollDirection::Up => (0.0, travel),
                RollDirection::Down => {
                    stack.reverse();
                    (travel, 0.0)
                }
            };
            Column {
                index,
                target: target.to_string(),
                stack,
                spins,
                animated: !is_space(target),
                timing: Timing::new(ctx.global.unit_start(index), Transition::tween(duration_ms, ctx.global.easing)),
                from_y_em,
                to_y_em,
            }
        })
        .collect();

    RollerPlan { direction: settings.direction, row_height_em: ROW_HEIGHT_EM, max_stack_len, columns }
}

/// Lands roller columns as they reach the end of their travel.
#[derive(Debug, Clone)]
pub struct RollerStepper {
    schedule: ScheduleStepper,
    initial: Vec<String>,
    targets: Vec<String>,
    landed: Vec<bool>,
}

impl RollerStepper {
    pub fn has_landed(&self, index: usize) -> bool {
        self.landed.get(index).copied().unwrap_or(false)
    }

    /// The glyph a column shows when it is at rest.
    pub fn resting_glyph(&self, index: usize) -> Option<&str> {
        let glyphs = if self.has_landed(index) { &self.targets } else { &self.initial };
        glyphs.get(index).map(String::as_str)
    }
}

impl Stepper for RollerStepper {
    fn next_due(&self) -> Option<f64> {
        self.schedule.next_due()
    }

    fn advance(&mut self) -> StepReport {
        let report = self.schedule.advance();
        for index in &report.completed {
            if let Some(landed) = self.landed.get_mut(*index) {
                *landed = true;
            }
        }
        report
    }
}
