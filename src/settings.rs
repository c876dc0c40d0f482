//! Settings records: global timing, typography, background and one record per preset.
//!
//! Every numeric field documents its valid range. Generators trust these ranges; the
//! [config](crate::config) layer is responsible for clamping user input into them.

use crate::random::Seed;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The order in which units lock into their final value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum RevealMode {
    #[default]
    Ltr,
    Rtl,
    Center,
    Random,
}

/// Which glyphs a scrambling character cycles through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum CharsetMode {
    #[default]
    Special,
    Alphanumeric,
}

/// The easing curve handed to the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
    Anticipate,
}

/// The granularity a preset animates at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum AnimationUnit {
    #[default]
    Char,
    Word,
    Line,
}

/// Granularity for mask wipes, which never animate single characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum WipeUnit {
    Word,
    #[default]
    Line,
}

/// Glyph alphabet for roller and flipboard columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Alphabet {
    Uppercase,
    Lowercase,
    Numbers,
    #[default]
    Full,
}

/// Vertical travel direction for roller columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum RollDirection {
    #[default]
    Up,
    Down,
}

/// The edge a mask wipe reveals from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum WipeDirection {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

/// Whether particles fly away from or converge into their character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum BurstDirection {
    #[default]
    Outward,
    Inward,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FontFamily {
    #[default]
    Inter,
    Playfair,
    SpaceMono,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
}

/// Stage background choices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum BackgroundKind {
    Transparent,
    Light,
    #[default]
    Dark,
    Custom,
}

impl Easing {
    /// Cubic bezier control points `[x1, y1, x2, y2]` for this curve.
    pub fn cubic_bezier(&self) -> [f64; 4] {
        match self {
            Self::Linear => [0.0, 0.0, 1.0, 1.0],
            Self::EaseIn => [0.4, 0.0, 1.0, 1.0],
            Self::EaseOut => [0.0, 0.0, 0.2, 1.0],
            Self::EaseInOut => [0.4, 0.0, 0.2, 1.0],
            Self::Anticipate => [0.36, 0.0, 0.66, -0.56],
        }
    }
}

/// Timing shared by every preset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Duration of one unit's animation in milliseconds, `100..=3000`.
    pub duration: u32,

    /// Delay between consecutive units in milliseconds, `0..=200`.
    pub stagger: u32,

    /// Delay before the first unit starts in milliseconds, `0..=2000`.
    pub delay: u32,

    pub easing: Easing,

    pub seed: Seed,

    /// Replay automatically once complete.
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self { duration: 900, stagger: 25, delay: 0, easing: Easing::EaseOut, seed: 42, looping: false }
    }
}

impl GlobalSettings {
    /// The start time in milliseconds of the unit at `index` under the stagger model.
    pub fn unit_start(&self, index: usize) -> f64 {
        self.delay as f64 + index as f64 * self.stagger as f64
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub font_family: FontFamily,

    /// Pixels, `16..=120`.
    pub font_size: u32,

    /// `100..=900`.
    pub font_weight: u32,

    /// In em, `-0.1..=0.3`.
    pub letter_spacing: f64,

    /// `0.8..=2`.
    pub line_height: f64,

    pub text_transform: TextTransform,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: FontFamily::Inter,
            font_size: 56,
            font_weight: 700,
            letter_spacing: -0.02,
            line_height: 1.1,
            text_transform: TextTransform::None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,

    /// Only used when `kind` is custom.
    pub custom_color: String,
}

impl Default for Background {
    fn default() -> Self {
        Self { kind: BackgroundKind::Dark, custom_color: "#ffffff".into() }
    }
}

impl Background {
    /// The stage color, as a CSS value.
    pub fn stage_color(&self) -> &str {
        match self.kind {
            BackgroundKind::Transparent => "transparent",
            BackgroundKind::Light => "#ffffff",
            BackgroundKind::Dark => "#0a0a0a",
            BackgroundKind::Custom => &self.custom_color,
        }
    }

    /// The text color that contrasts with the stage.
    pub fn text_color(&self) -> &'static str {
        match self.kind {
            BackgroundKind::Dark => "#ffffff",
            _ => "#0a0a0a",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrambleSettings {
    pub charset_mode: CharsetMode,

    /// `0..=1`; higher values spread reveals over more of the run.
    pub intensity: f64,

    /// Number of ticks, `1..=50`.
    pub steps: u32,

    pub reveal_mode: RevealMode,
    pub preserve_spaces: bool,
    pub preserve_punctuation: bool,
}

impl Default for ScrambleSettings {
    fn default() -> Self {
        Self {
            charset_mode: CharsetMode::Special,
            intensity: 0.6,
            steps: 24,
            reveal_mode: RevealMode::Ltr,
            preserve_spaces: true,
            preserve_punctuation: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurSettings {
    /// Pixels, `0..=30`.
    pub start_blur: f64,

    /// `0..=1`.
    pub start_opacity: f64,

    /// Pixels, `0..=30`.
    pub y_offset: f64,

    pub overshoot: bool,
    pub unit: AnimationUnit,
}

impl Default for BlurSettings {
    fn default() -> Self {
        Self { start_blur: 12.0, start_opacity: 0.0, y_offset: 6.0, overshoot: false, unit: AnimationUnit::Char }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollerSettings {
    pub alphabet: Alphabet,

    /// Full passes through the alphabet, `1..=10`.
    pub spins: u32,

    /// `0..=1`.
    pub spin_randomness: f64,

    pub direction: RollDirection,
}

impl Default for RollerSettings {
    fn default() -> Self {
        Self { alphabet: Alphabet::Full, spins: 5, spin_randomness: 0.25, direction: RollDirection::Up }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipboardSettings {
    pub alphabet: Alphabet,

    /// `3..=15`.
    pub flips_per_char: u32,

    /// `0..=1`.
    pub flip_randomness: f64,

    pub card_color: String,
    pub text_color: String,
    pub show_divider: bool,

    /// Pixels of CSS perspective, `200..=1000`.
    pub perspective: u32,
}

impl Default for FlipboardSettings {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::Uppercase,
            flips_per_char: 8,
            flip_randomness: 0.3,
            card_color: "#1a1a1a".into(),
            text_color: "#ffffff".into(),
            show_divider: true,
            perspective: 400,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordSlideUpSettings {
    /// Pixels, `10..=80`.
    pub y_distance: f64,
    pub overshoot: bool,
}

impl Default for WordSlideUpSettings {
    fn default() -> Self {
        Self { y_distance: 30.0, overshoot: true }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharPopSettings {
    /// `0.5..=0.95`.
    pub start_scale: f64,

    /// `100..=500`.
    pub spring_stiffness: f64,
}

impl Default for CharPopSettings {
    fn default() -> Self {
        Self { start_scale: 0.8, spring_stiffness: 300.0 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskWipeSettings {
    pub direction: WipeDirection,
    pub unit: WipeUnit,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderlineWipeSettings {
    pub underline_color: String,

    /// Pixels, `1..=8`.
    pub thickness: u32,

    /// How much of the underline phase the text phase overlaps, in percent, `0..=100`.
    pub phase_overlap: f64,
}

impl Default for UnderlineWipeSettings {
    fn default() -> Self {
        Self { underline_color: "#000000".into(), thickness: 2, phase_overlap: 20.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitchSliceSettings {
    /// `0..=1`.
    pub intensity: f64,

    /// Pixels, `1..=15`.
    pub offset_amount: f64,

    pub color_separation: bool,
}

impl Default for GlitchSliceSettings {
    fn default() -> Self {
        Self { intensity: 0.7, offset_amount: 4.0, color_separation: true }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleBurstSettings {
    /// Particles per character, `10..=50`.
    pub particle_count: u32,

    /// Pixels, `2..=8`.
    pub particle_size: f64,

    /// Pixels, `20..=100`.
    pub burst_radius: f64,

    pub particle_color: String,
    pub fade_particles: bool,
    pub burst_direction: BurstDirection,
}

impl Default for ParticleBurstSettings {
    fn default() -> Self {
        Self {
            particle_count: 20,
            particle_size: 4.0,
            burst_radius: 50.0,
            particle_color: "#fbbf24".into(),
            fade_particles: true,
            burst_direction: BurstDirection::Outward,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkleTrailSettings {
    /// Sparkles per character, `5..=30`.
    pub sparkle_count: u32,

    /// Pixels, `2..=8`.
    pub sparkle_size: f64,

    /// `1..=5`, scales how long sparkles linger.
    pub trail_length: f64,

    pub sparkle_color: String,
    pub random_colors: bool,
    pub twinkle: bool,
}

impl Default for SparkleTrailSettings {
    fn default() -> Self {
        Self {
            sparkle_count: 15,
            sparkle_size: 4.0,
            trail_length: 3.0,
            sparkle_color: "#fbbf24".into(),
            random_colors: true,
            twinkle: true,
        }
    }
}

/// Identifies one of the presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum PresetKind {
    #[default]
    Scramble,
    Blur,
    Roller,
    Flipboard,
    WordSlideUp,
    CharPop,
    MaskWipe,
    UnderlineWipe,
    GlitchSlice,
    ParticleBurst,
    SparkleTrail,
}

impl PresetKind {
    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scramble => "Scramble",
            Self::Blur => "Blur Reveal",
            Self::Roller => "Roller Board",
            Self::Flipboard => "Flipboard",
            Self::WordSlideUp => "Word Slide Up",
            Self::CharPop => "Char Pop",
            Self::MaskWipe => "Mask Wipe",
            Self::UnderlineWipe => "Underline Wipe",
            Self::GlitchSlice => "Glitch Slice",
            Self::ParticleBurst => "Particle Burst",
            Self::SparkleTrail => "Sparkle Trail",
        }
    }

    /// One line description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Scramble => "Text shuffles into place",
            Self::Blur => "Appears from blur",
            Self::Roller => "Airport board style",
            Self::Flipboard => "Split-flap display",
            Self::WordSlideUp => "Words slide from below",
            Self::CharPop => "Characters pop in",
            Self::MaskWipe => "Clip-path reveal",
            Self::UnderlineWipe => "Underline then text",
            Self::GlitchSlice => "RGB glitch effect",
            Self::ParticleBurst => "Exploding particles",
            Self::SparkleTrail => "Twinkling sparkles",
        }
    }

    /// Whether the preset is driven by discrete ticks rather than a continuous transition.
    pub fn is_tick_based(&self) -> bool {
        matches!(self, Self::Scramble | Self::Roller | Self::Flipboard)
    }
}

/// The settings of exactly one preset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "preset", rename_all = "camelCase")]
pub enum PresetSettings {
    Scramble(ScrambleSettings),
    Blur(BlurSettings),
    Roller(RollerSettings),
    Flipboard(FlipboardSettings),
    WordSlideUp(WordSlideUpSettings),
    CharPop(CharPopSettings),
    MaskWipe(MaskWipeSettings),
    UnderlineWipe(UnderlineWipeSettings),
    GlitchSlice(GlitchSliceSettings),
    ParticleBurst(ParticleBurstSettings),
    SparkleTrail(SparkleTrailSettings),
}

impl PresetSettings {
    pub fn kind(&self) -> PresetKind {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case("wordSlideUp", PresetKind::WordSlideUp)]
    #[case("particleBurst", PresetKind::ParticleBurst)]
    #[case("scramble", PresetKind::Scramble)]
    fn preset_names_parse(#[case] input: &str, #[case] expected: PresetKind) {
        assert_eq!(PresetKind::from_str(input).expect("parse failed"), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn eleven_presets() {
        assert_eq!(PresetKind::iter().count(), 11);
        assert_eq!(PresetKind::iter().filter(PresetKind::is_tick_based).count(), 3);
    }

    #[test]
    fn easing_serializes_camel_case() {
        let json = serde_json::to_string(&Easing::EaseInOut).expect("serialize failed");
        assert_eq!(json, "\"easeInOut\"");
        assert_eq!(Easing::Anticipate.cubic_bezier(), [0.36, 0.0, 0.66, -0.56]);
    }

    #[test]
    fn unit_start_follows_stagger() {
        let global = GlobalSettings { delay: 100, stagger: 30, ..Default::default() };
        assert_eq!(global.unit_start(0), 100.0);
        assert_eq!(global.unit_start(3), 190.0);
    }

    #[rstest]
    #[case(BackgroundKind::Dark, "#0a0a0a", "#ffffff")]
    #[case(BackgroundKind::Light, "#ffffff", "#0a0a0a")]
    #[case(BackgroundKind::Transparent, "transparent", "#0a0a0a")]
    #[case(BackgroundKind::Custom, "#123456", "#0a0a0a")]
    fn background_colors(#[case] kind: BackgroundKind, #[case] stage: &str, #[case] text: &str) {
        let background = Background { kind, custom_color: "#123456".into() };
        assert_eq!(background.stage_color(), stage);
        assert_eq!(background.text_color(), text);
    }

    #[test]
    fn preset_settings_tagged() {
        let settings = PresetSettings::MaskWipe(MaskWipeSettings::default());
        let json = serde_json::to_value(&settings).expect("serialize failed");
        assert_eq!(json["preset"], "maskWipe");
        assert_eq!(json["direction"], "left");
        assert_eq!(settings.kind(), PresetKind::MaskWipe);
    }
}
