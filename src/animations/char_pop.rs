use super::common::{motion_finish_times, GenerationContext, MotionUnit, Timing, Transition, UnitFinish};
use crate::settings::CharPopSettings;
use serde::Serialize;

/// Damping of the pop spring; only its stiffness is configurable.
pub const POP_DAMPING: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PopState {
    pub scale: f64,
    pub opacity: f64,
}

/// Char pop: characters spring up from a smaller scale.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CharPopPlan {
    pub chars: Vec<MotionUnit<PopState>>,
}

impl CharPopPlan {
    pub fn animated_units(&self) -> Vec<usize> {
        self.chars.iter().filter(|u| u.animated).map(|u| u.index).collect()
    }

    pub fn finish_times(&self) -> Vec<UnitFinish> {
        motion_finish_times(&self.chars)
    }
}

pub(crate) fn generate(ctx: &GenerationContext, settings: &CharPopSettings) -> CharPopPlan {
    let transition = Transition::spring(settings.spring_stiffness, POP_DAMPING);
    let from = PopState { scale: settings.start_scale, opacity: 0.0 };
    let to = PopState { scale: 1.0, opacity: 1.0 };
    let chars = ctx
        .split
        .chars
        .iter()
        .enumerate()
        .map(|(index, glyph)| MotionUnit::new(index, glyph, from, to, Timing::new(ctx.global.unit_start(index), transition)))
        .collect();
    CharPopPlan { chars }
}
