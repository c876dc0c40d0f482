use super::common::{GenerationContext, Point, Timing, Transition, UnitFinish};
use crate::random::RandomUtils;
use crate::settings::{Easing, GlitchSliceSettings};
use serde::Serialize;

/// Share of the duration spent jittering; the rest settles.
pub const GLITCH_PHASE: f64 = 0.7;

const RED: &str = "rgba(255, 0, 0, 0.8)";
const GREEN: &str = "rgba(0, 255, 0, 0.8)";
const CURRENT_COLOR: &str = "currentColor";

/// The text layer that fades in and slides home.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MainLayer {
    pub from_opacity: f64,
    pub to_opacity: f64,
    pub from_x: f64,
    pub to_x: f64,
    pub timing: Timing,
}

/// A copy of the text behind the main layer that jumps through the displacement frames.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GlitchLayer {
    pub color: String,
    pub base_x: f64,
    pub hidden_x: f64,
    pub hidden_opacity: f64,
    pub x_keyframes: Vec<f64>,
    pub opacity_keyframes: Vec<f64>,

    /// Keyframe offsets in `[0, 1]`, one per keyframe.
    pub times: Vec<f64>,

    pub timing: Timing,
}

/// Glitch slice: the whole text jitters through random displacements with optional
/// chromatic aberration, then settles.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GlitchSlicePlan {
    pub text: String,
    pub animated: bool,

    /// Random displacement frames, always ending at the origin.
    pub frames: Vec<Point>,

    pub glitch_ms: f64,
    pub settle_ms: f64,
    pub color_separation: bool,
    pub main: MainLayer,
    pub layers: Vec<GlitchLayer>,
}

impl GlitchSlicePlan {
    pub fn animated_units(&self) -> Vec<usize> {
        if self.animated { vec![0] } else { Vec::new() }
    }

    pub fn finish_times(&self) -> Vec<UnitFinish> {
        self.animated_units().into_iter().map(|index| UnitFinish { index, at_ms: self.main.timing.finish_ms() }).collect()
    }
}

/// Number of random displacement frames for an intensity.
pub fn frame_count(intensity: f64) -> usize {
    (intensity * 8.0).floor().max(0.0) as usize + 2
}

pub(crate) fn generate(ctx: &GenerationContext, settings: &GlitchSliceSettings) -> GlitchSlicePlan {
    let mut random = RandomUtils::new(ctx.global.seed);
    let offset = settings.offset_amount;
    let mut frames: Vec<Point> = (0..frame_count(settings.intensity))
        .map(|_| {
            let x = (random.next() - 0.5) * offset * 2.0;
            let y = (random.next() - 0.5) * offset;
            Point::new(x, y)
        })
        .collect();
    frames.push(Point::default());

    let duration = ctx.duration_ms();
    let delay = ctx.global.delay as f64;
    let glitch_ms = duration * GLITCH_PHASE;
    let first_x = frames.first().map(|f| f.x).unwrap_or_default();
    let main = MainLayer {
        from_opacity: 0.0,
        to_opacity: 1.0,
        from_x: first_x,
        to_x: 0.0,
        timing: Timing::new(delay, Transition::tween(duration, ctx.global.easing)),
    };

    let layer = |color: &str, base_x: f64| {
        let (frame_opacity, fading_opacity, hidden_opacity) =
            if settings.color_separation { (0.6, 0.3, 0.8) } else { (0.3, 0.1, 0.0) };
        let mut x_keyframes: Vec<f64> = frames.iter().map(|f| base_x + f.x).collect();
        x_keyframes.extend([base_x, 0.0]);
        let mut opacity_keyframes = vec![frame_opacity; frames.len()];
        opacity_keyframes.extend([fading_opacity, 0.0]);
        let slots = (frames.len() + 1) as f64;
        let mut times: Vec<f64> = (0..frames.len()).map(|i| i as f64 / slots).collect();
        times.extend([frames.len() as f64 / slots, 1.0]);
        GlitchLayer {
            color: color.to_string(),
            base_x,
            hidden_x: base_x + first_x,
            hidden_opacity,
            x_keyframes,
            opacity_keyframes,
            times,
            timing: Timing::new(delay, Transition::tween(glitch_ms, Easing::Linear)),
        }
    };
    let layers = if settings.color_separation {
        vec![layer(RED, -offset), layer(GREEN, offset)]
    } else {
        vec![layer(CURRENT_COLOR, 0.0), layer(CURRENT_COLOR, 0.0)]
    };

    GlitchSlicePlan {
        text: ctx.text.to_string(),
        animated: ctx.split.non_space_chars() > 0,
        frames,
        glitch_ms,
        settle_ms: duration - glitch_ms,
        color_separation: settings.color_separation,
        main,
        layers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GlobalSettings;
    use rstest::rstest;

    fn plan(text: &str, settings: &GlitchSliceSettings) -> GlitchSlicePlan {
        let global = GlobalSettings::default();
        generate(&GenerationContext::new(text, &global), settings)
    }

    #[rstest]
    #[case(0.0, 2)]
    #[case(0.7, 7)]
    #[case(1.0, 10)]
    fn frame_counts(#[case] intensity: f64, #[case] expected: usize) {
        assert_eq!(frame_count(intensity), expected);
    }

    #[test]
    fn frames_from_seed() {
        let plan = plan("GLITCH", &GlitchSliceSettings::default());
        assert_eq!(plan.frames.len(), 8);
        assert!((plan.frames[0].x - 0.808830015361309).abs() < 1e-12);
        assert!((plan.frames[0].y + 0.20683776400983334).abs() < 1e-12);
        assert_eq!(plan.frames.last(), Some(&Point::default()));
        assert_eq!(plan.main.from_x, plan.frames[0].x);
        assert!((plan.glitch_ms - 630.0).abs() < 1e-9);
        assert!((plan.settle_ms - 270.0).abs() < 1e-9);
    }

    #[test]
    fn separated_layers() {
        let plan = plan("GLITCH", &GlitchSliceSettings::default());
        let [red, green] = plan.layers.as_slice() else {
            panic!("expected two layers");
        };
        assert_eq!(red.base_x, -4.0);
        assert_eq!(green.base_x, 4.0);
        for layer in [red, green] {
            assert_eq!(layer.x_keyframes.len(), plan.frames.len() + 2);
            assert_eq!(layer.opacity_keyframes.len(), layer.x_keyframes.len());
            assert_eq!(layer.times.len(), layer.x_keyframes.len());
            assert_eq!(layer.times.last(), Some(&1.0));
            assert_eq!(layer.x_keyframes.last(), Some(&0.0));
            assert_eq!(layer.x_keyframes[layer.x_keyframes.len() - 2], layer.base_x);
            assert_eq!(&layer.opacity_keyframes[layer.opacity_keyframes.len() - 3..], &[0.6, 0.3, 0.0]);
            assert_eq!(layer.hidden_opacity, 0.8);
        }
        assert_eq!(red.times[1], 1.0 / 9.0);
    }

    #[test]
    fn without_separation() {
        let settings = GlitchSliceSettings { color_separation: false, ..Default::default() };
        let plan = plan("GLITCH", &settings);
        for layer in &plan.layers {
            assert_eq!(layer.base_x, 0.0);
            assert_eq!(&layer.opacity_keyframes[layer.opacity_keyframes.len() - 3..], &[0.3, 0.1, 0.0]);
        }
    }

    #[test]
    fn completion() {
        let plan = plan("GLITCH", &GlitchSliceSettings::default());
        assert_eq!(plan.finish_times(), vec![UnitFinish { index: 0, at_ms: 900.0 }]);
        let empty = self::plan("", &GlitchSliceSettings::default());
        assert!(empty.finish_times().is_empty());
    }

    #[rstest]
    #[case(" ")]
    #[case("   ")]
    fn blank_text_is_static(#[case] text: &str) {
        let plan = plan(text, &GlitchSliceSettings::default());
        assert!(plan.animated_units().is_empty());
        assert!(plan.finish_times().is_empty());
    }
}
