use super::common::{motion_finish_times, GenerationContext, MotionUnit, Timing, Transition, UnitFinish};
use crate::settings::WordSlideUpSettings;
use serde::Serialize;

/// Spring used when words overshoot.
pub const OVERSHOOT_SPRING: (f64, f64) = (200.0, 20.0);

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SlideState {
    pub y: f64,
    pub opacity: f64,
}

/// Word slide up: words rise from below while fading in.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WordSlideUpPlan {
    pub words: Vec<MotionUnit<SlideState>>,
}

impl WordSlideUpPlan {
    pub fn animated_units(&self) -> Vec<usize> {
        self.words.iter().filter(|u| u.animated).map(|u| u.index).collect()
    }

    pub fn finish_times(&self) -> Vec<UnitFinish> {
        motion_finish_times(&self.words)
    }
}

pub(crate) fn generate(ctx: &GenerationContext, settings: &WordSlideUpSettings) -> WordSlideUpPlan {
    let transition = if settings.overshoot {
        Transition::spring(OVERSHOOT_SPRING.0, OVERSHOOT_SPRING.1)
    } else {
        Transition::tween(ctx.duration_ms(), ctx.global.easing)
    };
    let from = SlideState { y: settings.y_distance, opacity: 0.0 };
    let to = SlideState { y: 0.0, opacity: 1.0 };
    let words = ctx
        .split
        .words
        .iter()
        .enumerate()
        .map(|(index, word)| MotionUnit::new(index, word, from, to, Timing::new(ctx.global.unit_start(index), transition)))
        .collect();
    WordSlideUpPlan { words }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GlobalSettings;

    fn plan(text: &str, settings: &WordSlideUpSettings) -> WordSlideUpPlan {
        let global = GlobalSettings::default();
        generate(&GenerationContext::new(text, &global), settings)
    }

    #[test]
    fn words_and_spaces() {
        let plan = plan("Second Order Thinking", &WordSlideUpSettings::default());
        assert_eq!(plan.words.len(), 5);
        assert_eq!(plan.animated_units(), vec![0, 2, 4]);
        assert_eq!(plan.words[2].timing.delay_ms, 50.0);
        assert_eq!(plan.words[0].from, SlideState { y: 30.0, opacity: 0.0 });
        assert_eq!(plan.words[1].from, plan.words[1].to);
    }

    #[test]
    fn overshoot_spring() {
        let plan = plan("Hi there", &WordSlideUpSettings::default());
        assert_eq!(plan.words[0].timing.transition, Transition::spring(200.0, 20.0));
        let finish = plan.finish_times();
        assert!((finish[1].at_ms - 450.0).abs() < 1e-9);
    }

    #[test]
    fn eased_without_overshoot() {
        let plan = plan("Hi", &WordSlideUpSettings { overshoot: false, ..Default::default() });
        assert_eq!(plan.finish_times()[0].at_ms, 900.0);
    }
}
