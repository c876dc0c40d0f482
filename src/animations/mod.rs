//! Preset generators.
//!
//! Every preset is an independent pure function from text and settings to a plan. Generators
//! never fail: empty text yields empty plans, and spaces are carried as static units that draw
//! no randomness.

use crate::playback::{ScheduleStepper, Stepper};
use crate::settings::{GlobalSettings, PresetKind, PresetSettings};
use serde::Serialize;
use tracing::debug;

pub(crate) mod charsets;
pub(crate) mod common;

pub mod blur;
pub mod char_pop;
pub mod flipboard;
pub mod glitch_slice;
pub mod mask_wipe;
pub mod particle_burst;
pub mod roller;
pub mod scramble;
pub mod sparkle_trail;
pub mod underline_wipe;
pub mod word_slide_up;

pub use blur::BlurPlan;
pub use char_pop::CharPopPlan;
pub use common::{GenerationContext, MotionUnit, Point, Timing, Transition, UnitFinish};
pub use flipboard::FlipboardPlan;
pub use glitch_slice::GlitchSlicePlan;
pub use mask_wipe::MaskWipePlan;
pub use particle_burst::ParticleBurstPlan;
pub use roller::RollerPlan;
pub use scramble::ScramblePlan;
pub use sparkle_trail::SparkleTrailPlan;
pub use underline_wipe::UnderlineWipePlan;
pub use word_slide_up::WordSlideUpPlan;

/// The computed animation of one generation pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "preset", rename_all = "camelCase")]
pub enum Plan {
    Scramble(ScramblePlan),
    Blur(BlurPlan),
    Roller(RollerPlan),
    Flipboard(FlipboardPlan),
    WordSlideUp(WordSlideUpPlan),
    CharPop(CharPopPlan),
    MaskWipe(MaskWipePlan),
    UnderlineWipe(UnderlineWipePlan),
    GlitchSlice(GlitchSlicePlan),
    ParticleBurst(ParticleBurstPlan),
    SparkleTrail(SparkleTrailPlan),
}

/// Compute the plan for `text` under the given settings.
///
/// The result depends only on its inputs: the same text, settings and seed always produce the
/// same plan.
pub fn generate(text: &str, global: &GlobalSettings, settings: &PresetSettings) -> Plan {
    let ctx = GenerationContext::new(text, global);
    let plan = match settings {
        PresetSettings::Scramble(s) => Plan::Scramble(scramble::generate(&ctx, s)),
        PresetSettings::Blur(s) => Plan::Blur(blur::generate(&ctx, s)),
        PresetSettings::Roller(s) => Plan::Roller(roller::generate(&ctx, s)),
        PresetSettings::Flipboard(s) => Plan::Flipboard(flipboard::generate(&ctx, s)),
        PresetSettings::WordSlideUp(s) => Plan::WordSlideUp(word_slide_up::generate(&ctx, s)),
        PresetSettings::CharPop(s) => Plan::CharPop(char_pop::generate(&ctx, s)),
        PresetSettings::MaskWipe(s) => Plan::MaskWipe(mask_wipe::generate(&ctx, s)),
        PresetSettings::UnderlineWipe(s) => Plan::UnderlineWipe(underline_wipe::generate(&ctx, s)),
        PresetSettings::GlitchSlice(s) => Plan::GlitchSlice(glitch_slice::generate(&ctx, s)),
        PresetSettings::ParticleBurst(s) => Plan::ParticleBurst(particle_burst::generate(&ctx, s)),
        PresetSettings::SparkleTrail(s) => Plan::SparkleTrail(sparkle_trail::generate(&ctx, s)),
    };
    debug!(
        preset = %settings.kind(),
        seed = global.seed,
        units = plan.unit_count(),
        animated = plan.animated_units().len(),
        "generated plan"
    );
    plan
}

impl Plan {
    pub fn preset(&self) -> PresetKind {
        match self {
            Self::Scramble(_) => PresetKind::Scramble,
            Self::Blur(_) => PresetKind::Blur,
            Self::Roller(_) => PresetKind::Roller,
            Self::Flipboard(_) => PresetKind::Flipboard,
            Self::WordSlideUp(_) => PresetKind::WordSlideUp,
            Self::CharPop(_) => PresetKind::CharPop,
            Self::MaskWipe(_) => PresetKind::MaskWipe,
            Self::UnderlineWipe(_) => PresetKind::UnderlineWipe,
            Self::GlitchSlice(_) => PresetKind::GlitchSlice,
            Self::ParticleBurst(_) => PresetKind::ParticleBurst,
            Self::SparkleTrail(_) => PresetKind::SparkleTrail,
        }
    }

    /// Number of units in the plan, static ones included.
    pub fn unit_count(&self) -> usize {
        match self {
            Self::Scramble(p) => p.chars.len(),
            Self::Blur(p) => p.units.len(),
            Self::Roller(p) => p.columns.len(),
            Self::Flipboard(p) => p.cards.len(),
            Self::WordSlideUp(p) => p.words.len(),
            Self::CharPop(p) => p.chars.len(),
            Self::MaskWipe(p) => p.units.len(),
            Self::UnderlineWipe(p) => p.words.len(),
            Self::GlitchSlice(p) => usize::from(!p.text.is_empty()),
            Self::ParticleBurst(p) => p.chars.len(),
            Self::SparkleTrail(p) => p.chars.len(),
        }
    }

    /// Indices of the units that must complete before the generation completes.
    pub fn animated_units(&self) -> Vec<usize> {
        match self {
            Self::Scramble(p) => p.animated_units(),
            Self::Blur(p) => p.animated_units(),
            Self::Roller(p) => p.animated_units(),
            Self::Flipboard(p) => p.animated_units(),
            Self::WordSlideUp(p) => p.animated_units(),
            Self::CharPop(p) => p.animated_units(),
            Self::MaskWipe(p) => p.animated_units(),
            Self::UnderlineWipe(p) => p.animated_units(),
            Self::GlitchSlice(p) => p.animated_units(),
            Self::ParticleBurst(p) => p.animated_units(),
            Self::SparkleTrail(p) => p.animated_units(),
        }
    }

    /// When each animated unit finishes, relative to the start of the generation.
    pub fn finish_times(&self) -> Vec<UnitFinish> {
        match self {
            Self::Scramble(p) => p.finish_times(),
            Self::Blur(p) => p.finish_times(),
            Self::Roller(p) => p.finish_times(),
            Self::Flipboard(p) => p.finish_times(),
            Self::WordSlideUp(p) => p.finish_times(),
            Self::CharPop(p) => p.finish_times(),
            Self::MaskWipe(p) => p.finish_times(),
            Self::UnderlineWipe(p) => p.finish_times(),
            Self::GlitchSlice(p) => p.finish_times(),
            Self::ParticleBurst(p) => p.finish_times(),
            Self::SparkleTrail(p) => p.finish_times(),
        }
    }

    /// When the last animated unit finishes.
    pub fn total_ms(&self) -> f64 {
        self.finish_times().iter().map(|f| f.at_ms).fold(0.0, f64::max)
    }

    /// A fresh stepper that plays this plan from the start.
    pub fn stepper(&self) -> Box<dyn Stepper> {
        match self {
            Self::Scramble(p) => Box::new(p.stepper()),
            Self::Roller(p) => Box::new(p.stepper()),
            Self::Flipboard(p) => Box::new(p.stepper()),
            other => Box::new(ScheduleStepper::new(other.finish_times())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    fn default_settings(kind: PresetKind) -> PresetSettings {
        match kind {
            PresetKind::Scramble => PresetSettings::Scramble(Default::default()),
            PresetKind::Blur => PresetSettings::Blur(Default::default()),
            PresetKind::Roller => PresetSettings::Roller(Default::default()),
            PresetKind::Flipboard => PresetSettings::Flipboard(Default::default()),
            PresetKind::WordSlideUp => PresetSettings::WordSlideUp(Default::default()),
            PresetKind::CharPop => PresetSettings::CharPop(Default::default()),
            PresetKind::MaskWipe => PresetSettings::MaskWipe(Default::default()),
            PresetKind::UnderlineWipe => PresetSettings::UnderlineWipe(Default::default()),
            PresetKind::GlitchSlice => PresetSettings::GlitchSlice(Default::default()),
            PresetKind::ParticleBurst => PresetSettings::ParticleBurst(Default::default()),
            PresetKind::SparkleTrail => PresetSettings::SparkleTrail(Default::default()),
        }
    }

    #[test]
    fn deterministic_for_every_preset() {
        let global = GlobalSettings { seed: 1234, ..Default::default() };
        for kind in PresetKind::iter() {
            let settings = default_settings(kind);
            let first = generate("Deterministic Motion", &global, &settings);
            let second = generate("Deterministic Motion", &global, &settings);
            assert_eq!(first, second, "{kind}");
            assert_eq!(first.preset(), kind);
        }
    }

    #[test]
    fn empty_text_never_fails() {
        let global = GlobalSettings::default();
        for kind in PresetKind::iter() {
            let plan = generate("", &global, &default_settings(kind));
            assert_eq!(plan.unit_count(), 0, "{kind}");
            assert!(plan.animated_units().is_empty(), "{kind}");
            assert_eq!(plan.total_ms(), 0.0);
            assert_eq!(plan.stepper().next_due(), None, "{kind}");
        }
    }

    #[test]
    fn steppers_complete_every_animated_unit_once() {
        let global = GlobalSettings::default();
        for kind in PresetKind::iter() {
            let plan = generate("To be or not", &global, &default_settings(kind));
            let mut stepper = plan.stepper();
            let mut completed = Vec::new();
            let mut last = f64::NEG_INFINITY;
            while let Some(due) = stepper.next_due() {
                assert!(due >= last, "{kind}");
                last = due;
                completed.extend(stepper.advance().completed);
            }
            completed.sort_unstable();
            assert_eq!(completed, plan.animated_units(), "{kind}");
            assert!((last - plan.total_ms()).abs() < 1e-9, "{kind}");
        }
    }

    #[rstest]
    #[case(PresetKind::Scramble, 11)]
    #[case(PresetKind::Blur, 11)]
    #[case(PresetKind::WordSlideUp, 3)]
    #[case(PresetKind::MaskWipe, 1)]
    #[case(PresetKind::GlitchSlice, 1)]
    fn unit_counts(#[case] kind: PresetKind, #[case] expected: usize) {
        let plan = generate("Hello World", &GlobalSettings::default(), &default_settings(kind));
        assert_eq!(plan.unit_count(), expected);
    }

    #[test]
    fn seed_changes_the_plan() {
        let settings = default_settings(PresetKind::Scramble);
        let a = generate("Seeded", &GlobalSettings { seed: 1, ..Default::default() }, &settings);
        let b = generate("Seeded", &GlobalSettings { seed: 2, ..Default::default() }, &settings);
        assert_ne!(a, b);
    }

    #[test]
    fn serialized_plan_is_tagged() {
        let plan = generate("Hi", &GlobalSettings::default(), &default_settings(PresetKind::CharPop));
        let json = serde_json::to_value(&plan).expect("serialize failed");
        assert_eq!(json["preset"], "charPop");
        assert_eq!(json["chars"].as_array().map(Vec::len), Some(2));
    }
}
