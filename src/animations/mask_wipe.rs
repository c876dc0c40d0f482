use super::common::{motion_finish_times, GenerationContext, MotionUnit, Timing, Transition, UnitFinish};
use crate::settings::{MaskWipeSettings, WipeDirection, WipeUnit};
use serde::Serialize;

/// A clip inset in percent of the unit's box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ClipInset {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ClipInset {
    /// The fully clipped inset a wipe in `direction` starts from.
    pub fn hidden(direction: WipeDirection) -> Self {
        let (top, right, bottom, left) = match direction {
            WipeDirection::Left => (0.0, 100.0, 0.0, 0.0),
            WipeDirection::Right => (0.0, 0.0, 0.0, 100.0),
            WipeDirection::Up => (100.0, 0.0, 0.0, 0.0),
            WipeDirection::Down => (0.0, 0.0, 100.0, 0.0),
        };
        Self { top, right, bottom, left }
    }

    /// CSS `inset()` value.
    pub fn to_css(&self) -> String {
        let value = |v: f64| if v == 0.0 { "0".to_string() } else { format!("{v}%") };
        format!("inset({} {} {} {})", value(self.top), value(self.right), value(self.bottom), value(self.left))
    }
}

/// Mask wipe: units are revealed by a clip inset collapsing towards one edge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaskWipePlan {
    pub direction: WipeDirection,
    pub unit: WipeUnit,
    pub units: Vec<MotionUnit<ClipInset>>,
}

impl MaskWipePlan {
    pub fn animated_units(&self) -> Vec<usize> {
        self.units.iter().filter(|u| u.animated).map(|u| u.index).collect()
    }

    pub fn finish_times(&self) -> Vec<UnitFinish> {
        motion_finish_times(&self.units)
    }
}

pub(crate) fn generate(ctx: &GenerationContext, settings: &MaskWipeSettings) -> MaskWipePlan {
    let transition = Transition::tween(ctx.duration_ms(), ctx.global.easing);
    let from = ClipInset::hidden(settings.direction);
    let units = match settings.unit {
        WipeUnit::Word => ctx.split.words.clone(),
        WipeUnit::Line => ctx.line(),
    };
    let units = units
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            MotionUnit::new(index, text, from, ClipInset::default(), Timing::new(ctx.global.unit_start(index), transition))
        })
        .collect();
    MaskWipePlan { direction: settings.direction, unit: settings.unit, units }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GlobalSettings;
    use rstest::rstest;

    #[rstest]
    #[case(WipeDirection::Left, "inset(0 100% 0 0)")]
    #[case(WipeDirection::Right, "inset(0 0 0 100%)")]
    #[case(WipeDirection::Up, "inset(100% 0 0 0)")]
    #[case(WipeDirection::Down, "inset(0 0 100% 0)")]
    fn hidden_insets(#[case] direction: WipeDirection, #[case] expected: &str) {
        assert_eq!(ClipInset::hidden(direction).to_css(), expected);
    }

    #[test]
    fn line_is_a_single_unit() {
        let global = GlobalSettings::default();
        let plan = generate(&GenerationContext::new("Mask me", &global), &MaskWipeSettings::default());
        assert_eq!(plan.units.len(), 1);
        assert_eq!(plan.units[0].to.to_css(), "inset(0 0 0 0)");
        assert_eq!(plan.finish_times()[0].at_ms, 900.0);
    }

    #[test]
    fn words_skip_spaces() {
        let global = GlobalSettings::default();
        let settings = MaskWipeSettings { unit: WipeUnit::Word, direction: WipeDirection::Up };
        let plan = generate(&GenerationContext::new("Mask me", &global), &settings);
        assert_eq!(plan.units.len(), 3);
        assert_eq!(plan.animated_units(), vec![0, 2]);
        assert_eq!(plan.units[2].timing.delay_ms, 50.0);
        assert_eq!(plan.units[2].from, ClipInset { top: 100.0, ..Default::default() });
    }
}
