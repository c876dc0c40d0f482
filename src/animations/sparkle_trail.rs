use super::charsets::SPARKLE_COLORS;
use super::common::{GenerationContext, Timing, Transition, UnitFinish};
use crate::random::RandomUtils;
use crate::settings::SparkleTrailSettings;
use crate::text::is_space;
use serde::Serialize;

const SPREAD_X: f64 = 40.0;
const SPREAD_Y: f64 = 30.0;
const MAX_SPARKLE_DELAY_MS: f64 = 300.0;
const MAX_TWINKLE_DELAY_MS: f64 = 500.0;

const TWINKLE_OPACITY: [f64; 7] = [0.0, 1.0, 0.5, 1.0, 0.3, 1.0, 0.0];
const STEADY_OPACITY: [f64; 4] = [0.0, 1.0, 1.0, 0.0];
const SCALE: [f64; 7] = [0.0, 1.2, 1.0, 1.1, 1.0, 0.8, 0.0];
const ROTATION: [f64; 3] = [0.0, 180.0, 360.0];
const BRIGHTNESS: [f64; 3] = [1.0, 1.3, 1.0];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sparkle {
    /// Offset from the character center, in pixels.
    pub x: f64,
    pub y: f64,

    pub size: f64,
    pub color: String,

    /// Staggered delay within the character.
    pub delay_ms: f64,

    /// Extra random delay.
    pub twinkle_delay_ms: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SparkleChar {
    pub index: usize,
    pub glyph: String,
    pub animated: bool,
    pub from_y: f64,
    pub to_y: f64,
    pub timing: Timing,
    pub sparkles: Vec<Sparkle>,
}

/// Sparkle trail: characters rise into place surrounded by twinkling stars.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SparkleTrailPlan {
    pub sparkle_duration_ms: f64,
    pub opacity_keyframes: Vec<f64>,
    pub scale_keyframes: Vec<f64>,
    pub rotation_keyframes: Vec<f64>,
    pub brightness_keyframes: Vec<f64>,
    pub chars: Vec<SparkleChar>,
}

impl SparkleTrailPlan {
    pub fn animated_units(&self) -> Vec<usize> {
        self.chars.iter().filter(|c| c.animated).map(|c| c.index).collect()
    }

    pub fn finish_times(&self) -> Vec<UnitFinish> {
        self.chars
            .iter()
            .filter(|c| c.animated)
            .map(|c| UnitFinish { index: c.index, at_ms: c.timing.finish_ms() })
            .collect()
    }
}

pub(crate) fn generate(ctx: &GenerationContext, settings: &SparkleTrailSettings) -> SparkleTrailPlan {
    let mut random = RandomUtils::new(ctx.global.seed);
    let duration = ctx.duration_ms();
    let count = settings.sparkle_count;

    let chars = ctx
        .split
        .chars
        .iter()
        .enumerate()
        .map(|(index, &glyph)| {
            let animated = !is_space(glyph);
            let sparkles = if animated {
                (0..count).map(|i| sparkle(&mut random, settings, i, count)).collect()
            } else {
                Vec::new()
            };
            SparkleChar {
                index,
                glyph: glyph.to_string(),
                animated,
                from_y: 10.0,
                to_y: 0.0,
                timing: Timing::new(ctx.global.unit_start(index), Transition::tween(duration * 0.4, ctx.global.easing)),
                sparkles,
            }
        })
        .collect();

    let opacity: &[f64] = if settings.twinkle { &TWINKLE_OPACITY } else { &STEADY_OPACITY };
    SparkleTrailPlan {
        sparkle_duration_ms: duration * settings.trail_length * 0.5,
        opacity_keyframes: opacity.to_vec(),
        scale_keyframes: SCALE.to_vec(),
        rotation_keyframes: ROTATION.to_vec(),
        brightness_keyframes: BRIGHTNESS.to_vec(),
        chars,
    }
}

fn sparkle(random: &mut RandomUtils, settings: &SparkleTrailSettings, index: u32, count: u32) -> Sparkle {
    let x = (random.next() - 0.5) * SPREAD_X;
    let y = (random.next() - 0.5) * SPREAD_Y;
    let color = if settings.random_colors {
        random.pick(SPARKLE_COLORS).copied().unwrap_or(settings.sparkle_color.as_str()).to_string()
    } else {
        settings.sparkle_color.clone()
    };
    let size = settings.sparkle_size * (0.5 + random.next() * 0.5);
    let delay_ms = index as f64 / count as f64 * MAX_SPARKLE_DELAY_MS;
    let twinkle_delay_ms = random.next() * MAX_TWINKLE_DELAY_MS;
    Sparkle { x, y, size, color, delay_ms, twinkle_delay_ms }
}
