use super::common::{motion_finish_times, GenerationContext, MotionUnit, Timing, Transition, UnitFinish};
use super::word_slide_up::SlideState;
use crate::settings::UnderlineWipeSettings;
use serde::Serialize;

/// How far words rise while fading in, in pixels.
pub const WORD_RISE: f64 = 5.0;

/// The underline drawn beneath the text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Underline {
    pub color: String,

    /// Pixels.
    pub thickness: u32,

    pub from_scale_x: f64,
    pub to_scale_x: f64,
    pub timing: Timing,
}

/// Underline wipe: an underline draws across first, and the words follow, overlapping the
/// end of the underline by the configured share.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnderlineWipePlan {
    pub underline: Underline,

    /// When the word phase starts, relative to the global delay.
    pub text_start_ms: f64,

    /// Duration of the whole word phase.
    pub text_phase_ms: f64,

    pub words: Vec<MotionUnit<SlideState>>,
}

impl UnderlineWipePlan {
    pub fn animated_units(&self) -> Vec<usize> {
        self.words.iter().filter(|u| u.animated).map(|u| u.index).collect()
    }

    pub fn finish_times(&self) -> Vec<UnitFinish> {
        motion_finish_times(&self.words)
    }
}

pub(crate) fn generate(ctx: &GenerationContext, settings: &UnderlineWipeSettings) -> UnderlineWipePlan {
    let duration = ctx.duration_ms();
    let delay = ctx.global.delay as f64;
    let easing = ctx.global.easing;

    let underline_ms = duration * 0.5;
    let text_start_ms = underline_ms * (1.0 - settings.phase_overlap / 100.0);
    let text_phase_ms = duration - text_start_ms;
    let word_count = ctx.split.non_space_words().max(1);
    let word_transition = Transition::tween(text_phase_ms / word_count as f64, easing);

    let from = SlideState { y: WORD_RISE, opacity: 0.0 };
    let to = SlideState { y: 0.0, opacity: 1.0 };
    let words = ctx
        .split
        .words
        .iter()
        .enumerate()
        .map(|(index, word)| {
            let timing = Timing::new(ctx.global.unit_start(index) + text_start_ms, word_transition);
            MotionUnit::new(index, word, from, to, timing)
        })
        .collect();

    UnderlineWipePlan {
        underline: Underline {
            color: settings.underline_color.clone(),
            thickness: settings.thickness,
            from_scale_x: 0.0,
            to_scale_x: 1.0,
            timing: Timing::new(delay, Transition::tween(underline_ms, easing)),
        },
        text_start_ms,
        text_phase_ms,
        words,
    }
}
