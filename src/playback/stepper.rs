use crate::animations::UnitFinish;
use std::fmt;

/// What happened during one step of a plan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Generation local time of the step, in milliseconds.
    pub at_ms: f64,

    /// Units that finished during this step, in index order.
    pub completed: Vec<usize>,
}

/// Drives a plan forward one discrete step at a time.
///
/// Steppers know nothing about wall clock time: they only say when their next step is due,
/// relative to the start of the generation, and perform it when asked.
pub trait Stepper: fmt::Debug {
    /// The generation local time of the next step, or `None` once the plan has run to the end.
    fn next_due(&self) -> Option<f64>;

    /// Perform the next step.
    fn advance(&mut self) -> StepReport;
}

/// A stepper over a fixed list of finish times.
///
/// Used by presets whose units move continuously, where the only discrete events are units
/// reaching their end state.
#[derive(Debug, Clone)]
pub struct ScheduleStepper {
    finishes: Vec<UnitFinish>,
    position: usize,
}

impl ScheduleStepper {
    pub fn new(mut finishes: Vec<UnitFinish>) -> Self {
        finishes.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms).then(a.index.cmp(&b.index)));
        Self { finishes, position: 0 }
    }
}

impl Stepper for ScheduleStepper {
    fn next_due(&self) -> Option<f64> {
        self.finishes.get(self.position).map(|finish| finish.at_ms)
    }

    fn advance(&mut self) -> StepReport {
        let Some(at_ms) = self.next_due() else {
            return StepReport::default();
        };
        let mut completed = Vec::new();
        while let Some(finish) = self.finishes.get(self.position) {
            if finish.at_ms != at_ms {
                break;
            }
            completed.push(finish.index);
            self.position += 1;
        }
        StepReport { at_ms, completed }
    }
}
