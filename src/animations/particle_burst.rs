use super::common::{GenerationContext, Point, Timing, Transition, UnitFinish};
use crate::random::RandomUtils;
use crate::settings::{BurstDirection, ParticleBurstSettings};
use crate::text::is_space;
use serde::Serialize;
use std::f64::consts::PI;

/// Maximum random delay of a particle after its character appears.
pub const MAX_PARTICLE_DELAY_MS: f64 = 200.0;

/// One particle flying between its character and a point on a circle around it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Particle {
    /// Radians.
    pub angle: f64,
    pub distance: f64,
    pub size: f64,

    /// Delay after the character is revealed.
    pub delay_ms: f64,

    pub from: Point,
    pub to: Point,
    pub opacity_keyframes: Vec<f64>,
    pub from_scale: f64,
    pub to_scale: f64,
}

/// A character and its particles.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BurstChar {
    pub index: usize,
    pub glyph: String,
    pub animated: bool,

    /// When the character and its particles become visible.
    pub reveal_ms: f64,

    pub from_scale: f64,
    pub to_scale: f64,
    pub from_opacity: f64,
    pub to_opacity: f64,

    /// Timing of the character itself.
    pub timing: Timing,

    pub particles: Vec<Particle>,
}

/// Particle burst: every character appears with a ring of particles exploding from it or
/// collapsing into it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParticleBurstPlan {
    pub direction: BurstDirection,
    pub particle_color: String,
    pub fade_particles: bool,
    pub particle_duration_ms: f64,
    pub chars: Vec<BurstChar>,
}

impl ParticleBurstPlan {
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

    /// Total number of particles across all characters.
    pub fn particle_count(&self) -> usize {
        self.chars.iter().map(|c| c.particles.len()).sum()
    }
}

pub(crate) fn generate(ctx: &GenerationContext, settings: &ParticleBurstSettings) -> ParticleBurstPlan {
    let mut random = RandomUtils::new(ctx.global.seed);
    let duration = ctx.duration_ms();
    let inward = settings.burst_direction == BurstDirection::Inward;

    let chars = ctx
        .split
        .chars
        .iter()
        .enumerate()
        .map(|(index, &glyph)| {
            let animated = !is_space(glyph);
            let particles = if animated {
                (0..settings.particle_count).map(|_| particle(&mut random, settings, inward)).collect()
            } else {
                Vec::new()
            };
            let reveal_ms = ctx.global.unit_start(index);
            let char_delay = if inward { duration * 0.3 } else { 0.0 };
            BurstChar {
                index,
                glyph: glyph.to_string(),
                animated,
                reveal_ms,
                from_scale: if inward { 0.8 } else { 1.2 },
                to_scale: 1.0,
                from_opacity: 0.0,
                to_opacity: 1.0,
                timing: Timing::new(reveal_ms + char_delay, Transition::tween(duration * 0.5, ctx.global.easing)),
                particles,
            }
        })
        .collect();

    ParticleBurstPlan {
        direction: settings.burst_direction,
        particle_color: settings.particle_color.clone(),
        fade_particles: settings.fade_particles,
        particle_duration_ms: duration * 0.6,
        chars,
    }
}

fn particle(random: &mut RandomUtils, settings: &ParticleBurstSettings, inward: bool) -> Particle {
    let angle = random.next() * PI * 2.0;
    let distance = settings.burst_radius * (0.3 + random.next() * 0.7);
    let size = settings.particle_size * (0.5 + random.next() * 0.5);
    let delay_ms = random.next() * MAX_PARTICLE_DELAY_MS;

    let edge = Point::polar(angle, distance);
    let (from, to) = if inward { (edge, Point::default()) } else { (Point::default(), edge) };
    let opacity_keyframes = match (inward, settings.fade_particles) {
        (false, true) => vec![0.0, 1.0, 1.0, 0.0],
        (false, false) => vec![0.0, 1.0],
        (true, true) => vec![1.0, 0.0],
        (true, false) => vec![1.0, 1.0],
    };
    let (from_scale, to_scale) = if inward { (1.0, 0.5) } else { (0.5, 1.0) };
    Particle { angle, distance, size, delay_ms, from, to, opacity_keyframes, from_scale, to_scale }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GlobalSettings;

    fn plan(text: &str, settings: &ParticleBurstSettings) -> ParticleBurstPlan {
        let global = GlobalSettings::default();
        generate(&GenerationContext::new(text, &global), settings)
    }

    #[test]
    fn first_particle_from_seed() {
        let plan = plan("Hi", &ParticleBurstSettings::default());
        let particle = &plan.chars[0].particles[0];
        assert!((particle.angle - 3.776846262155295).abs() < 1e-12);
        assert!((particle.distance - 30.690169564913962).abs() < 1e-12);
        assert!((particle.size - 3.7049315869808197).abs() < 1e-12);
        assert!((particle.delay_ms - 133.94680828787386).abs() < 1e-9);
        assert_eq!(particle.from, Point::default());
        assert_eq!(particle.opacity_keyframes, vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn character_outer_particle_inner() {
        let settings = ParticleBurstSettings { particle_count: 10, ..Default::default() };
        let plan = plan("ab", &settings);
        let mut random = RandomUtils::new(42);
        for _ in 0..10 * 4 {
            random.next();
        }
        let angle = random.next() * PI * 2.0;
        assert_eq!(plan.chars[1].particles[0].angle, angle);
    }

    #[test]
    fn spaces_draw_nothing() {
        let settings = ParticleBurstSettings::default();
        let with_space = plan("a b", &settings);
        let without = plan("ab", &settings);
        assert!(with_space.chars[1].particles.is_empty());
        assert_eq!(with_space.chars[2].particles, without.chars[1].particles);
        assert_eq!(with_space.particle_count(), 40);
        assert_eq!(with_space.animated_units(), vec![0, 2]);
    }

    #[test]
    fn inward_bursts() {
        let settings = ParticleBurstSettings { burst_direction: BurstDirection::Inward, ..Default::default() };
        let plan = plan("a", &settings);
        let particle = &plan.chars[0].particles[0];
        assert_eq!(particle.to, Point::default());
        assert_eq!(particle.opacity_keyframes, vec![1.0, 0.0]);
        assert_eq!(plan.chars[0].from_scale, 0.8);
        assert!((plan.chars[0].timing.delay_ms - 270.0).abs() < 1e-9);
        assert!((plan.finish_times()[0].at_ms - 720.0).abs() < 1e-9);
    }

    #[test]
    fn outward_timing() {
        let plan = plan("ab", &ParticleBurstSettings::default());
        assert!((plan.particle_duration_ms - 540.0).abs() < 1e-9);
        assert_eq!(plan.chars[1].reveal_ms, 25.0);
        assert_eq!(plan.finish_times()[1].at_ms, 475.0);
    }
}
