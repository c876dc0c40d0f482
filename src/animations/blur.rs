use super::common::{motion_finish_times, GenerationContext, MotionUnit, Timing, Transition, UnitFinish};
use crate::settings::{AnimationUnit, BlurSettings};
use serde::Serialize;

/// Spring used when blur reveals overshoot.
pub const OVERSHOOT_SPRING: (f64, f64) = (100.0, 10.0);

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BlurState {
    /// Blur radius in pixels.
    pub blur: f64,
    pub opacity: f64,
    pub y: f64,
}

/// Blur reveal: units sharpen, fade in and settle from a small offset.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlurPlan {
    pub unit: AnimationUnit,
    pub units: Vec<MotionUnit<BlurState>>,
}

impl BlurPlan {
    pub fn animated_units(&self) -> Vec<usize> {
        self.units.iter().filter(|u| u.animated).map(|u| u.index).collect()
    }

    pub fn finish_times(&self) -> Vec<UnitFinish> {
        motion_finish_times(&self.units)
    }
}

pub(crate) fn generate(ctx: &GenerationContext, settings: &BlurSettings) -> BlurPlan {
    let transition = if settings.overshoot {
        Transition::spring(OVERSHOOT_SPRING.0, OVERSHOOT_SPRING.1)
    } else {
        Transition::tween(ctx.duration_ms(), ctx.global.easing)
    };
    let from = BlurState { blur: settings.start_blur, opacity: settings.start_opacity, y: settings.y_offset };
    let to = BlurState { blur: 0.0, opacity: 1.0, y: 0.0 };
    let units = ctx
        .units(settings.unit)
        .into_iter()
        .enumerate()
        .map(|(index, text)| MotionUnit::new(index, text, from, to, Timing::new(ctx.global.unit_start(index), transition)))
        .collect();
    BlurPlan { unit: settings.unit, units }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GlobalSettings;
    use rstest::rstest;

    fn plan(text: &str, settings: &BlurSettings) -> BlurPlan {
        let global = GlobalSettings { stagger: 40, delay: 100, ..Default::default() };
        generate(&GenerationContext::new(text, &global), settings)
    }

    #[rstest]
    #[case(AnimationUnit::Char, 11)]
    #[case(AnimationUnit::Word, 3)]
    #[case(AnimationUnit::Line, 1)]
    fn unit_counts(#[case] unit: AnimationUnit, #[case] expected: usize) {
        let plan = plan("Hello World", &BlurSettings { unit, ..Default::default() });
        assert_eq!(plan.units.len(), expected);
    }

    #[test]
    fn staggered_chars() {
        let plan = plan("ab c", &BlurSettings::default());
        let delays: Vec<_> = plan.units.iter().map(|u| u.timing.delay_ms).collect();
        assert_eq!(delays, vec![100.0, 140.0, 180.0, 220.0]);
        assert_eq!(plan.units[0].from, BlurState { blur: 12.0, opacity: 0.0, y: 6.0 });
        assert_eq!(plan.units[0].to, BlurState { blur: 0.0, opacity: 1.0, y: 0.0 });
        assert!(!plan.units[2].animated);
        assert_eq!(plan.animated_units(), vec![0, 1, 3]);
        assert_eq!(plan.finish_times().last().map(|f| f.at_ms), Some(1120.0));
    }

    #[test]
    fn overshoot_uses_a_spring() {
        let plan = plan("a", &BlurSettings { overshoot: true, ..Default::default() });
        assert_eq!(plan.units[0].timing.transition, Transition::spring(100.0, 10.0));
        assert!((plan.finish_times()[0].at_ms - 900.0).abs() < 1e-9);
    }

    #[test]
    fn empty_text() {
        for unit in [AnimationUnit::Char, AnimationUnit::Word, AnimationUnit::Line] {
            assert!(plan("", &BlurSettings { unit, ..Default::default() }).units.is_empty());
        }
    }
}
