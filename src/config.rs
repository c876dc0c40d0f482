//! The application state file.
//!
//! A YAML document holding the text, the selected preset, the shared settings and the settings
//! of every preset, so switching presets keeps each preset's tweaks. Missing keys take their
//! defaults and out of range numbers are clamped into range.

use crate::error::MotionError;
use crate::random::Seed;
use crate::settings::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};
use unicode_segmentation::UnicodeSegmentation;

/// The text shown when nothing else was configured.
pub const DEFAULT_TEXT: &str = "Second Order Thinking";

/// Maximum text length, in grapheme clusters.
pub const MAX_TEXT_LENGTH: usize = 120;

/// Exclusive upper bound of randomized seeds.
pub const RANDOM_SEED_LIMIT: u32 = 100_000;

const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub text: String,
    pub preset: PresetKind,
    pub global: GlobalSettings,
    pub typography: Typography,
    pub background: Background,
    pub scramble: ScrambleSettings,
    pub blur: BlurSettings,
    pub roller: RollerSettings,
    pub flipboard: FlipboardSettings,
    pub word_slide_up: WordSlideUpSettings,
    pub char_pop: CharPopSettings,
    pub mask_wipe: MaskWipeSettings,
    pub underline_wipe: UnderlineWipeSettings,
    pub glitch_slice: GlitchSliceSettings,
    pub particle_burst: ParticleBurstSettings,
    pub sparkle_trail: SparkleTrailSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.into(),
            preset: PresetKind::default(),
            global: Default::default(),
            typography: Default::default(),
            background: Default::default(),
            scramble: Default::default(),
            blur: Default::default(),
            roller: Default::default(),
            flipboard: Default::default(),
            word_slide_up: Default::default(),
            char_pop: Default::default(),
            mask_wipe: Default::default(),
            underline_wipe: Default::default(),
            glitch_slice: Default::default(),
            particle_burst: Default::default(),
            sparkle_trail: Default::default(),
        }
    }
}

impl AppConfig {
    /// The default location of the config file, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "title-motion").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Parse, sanitize and validate a config document.
    pub fn from_yaml(contents: &str) -> Result<Self, MotionError> {
        let mut config: Self = serde_yaml::from_str(contents)?;
        config.sanitize();
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, MotionError> {
        let contents = fs::read_to_string(path).map_err(|e| MotionError::io(path, e))?;
        debug!(path = %path.display(), "loading config");
        Self::from_yaml(&contents)
    }

    /// Load the config at `path`, or at the default location when no path is given.
    ///
    /// A missing file at the default location yields the defaults; an explicitly requested
    /// file must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, MotionError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn to_yaml(&self) -> Result<String, MotionError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the config to `path`, creating its parent directories.
    pub fn save(&self, path: &Path) -> Result<(), MotionError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| MotionError::io(parent, e))?;
        }
        fs::write(path, self.to_yaml()?).map_err(|e| MotionError::io(path, e))?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// The settings of the selected preset.
    pub fn preset_settings(&self) -> PresetSettings {
        match self.preset {
            PresetKind::Scramble => PresetSettings::Scramble(self.scramble.clone()),
            PresetKind::Blur => PresetSettings::Blur(self.blur.clone()),
            PresetKind::Roller => PresetSettings::Roller(self.roller.clone()),
            PresetKind::Flipboard => PresetSettings::Flipboard(self.flipboard.clone()),
            PresetKind::WordSlideUp => PresetSettings::WordSlideUp(self.word_slide_up.clone()),
            PresetKind::CharPop => PresetSettings::CharPop(self.char_pop.clone()),
            PresetKind::MaskWipe => PresetSettings::MaskWipe(self.mask_wipe.clone()),
            PresetKind::UnderlineWipe => PresetSettings::UnderlineWipe(self.underline_wipe.clone()),
            PresetKind::GlitchSlice => PresetSettings::GlitchSlice(self.glitch_slice.clone()),
            PresetKind::ParticleBurst => PresetSettings::ParticleBurst(self.particle_burst.clone()),
            PresetKind::SparkleTrail => PresetSettings::SparkleTrail(self.sparkle_trail.clone()),
        }
    }

    /// Pick a fresh, non-deterministic seed.
    pub fn randomize_seed(&mut self) -> Seed {
        self.global.seed = fastrand::u32(0..RANDOM_SEED_LIMIT);
        debug!(seed = self.global.seed, "randomized seed");
        self.global.seed
    }

    /// Clamp every numeric setting into its documented range.
    pub fn sanitize(&mut self) {
        let global = &mut self.global;
        clamp("global.duration", &mut global.duration, 100, 3000);
        clamp("global.stagger", &mut global.stagger, 0, 200);
        clamp("global.delay", &mut global.delay, 0, 2000);

        let typography = &mut self.typography;
        clamp("typography.font_size", &mut typography.font_size, 16, 120);
        clamp("typography.font_weight", &mut typography.font_weight, 100, 900);
        clamp("typography.letter_spacing", &mut typography.letter_spacing, -0.1, 0.3);
        clamp("typography.line_height", &mut typography.line_height, 0.8, 2.0);

        clamp("scramble.intensity", &mut self.scramble.intensity, 0.0, 1.0);
        clamp("scramble.steps", &mut self.scramble.steps, 1, 50);

        let blur = &mut self.blur;
        clamp("blur.start_blur", &mut blur.start_blur, 0.0, 30.0);
        clamp("blur.start_opacity", &mut blur.start_opacity, 0.0, 1.0);
        clamp("blur.y_offset", &mut blur.y_offset, 0.0, 30.0);

        clamp("roller.spins", &mut self.roller.spins, 1, 10);
        clamp("roller.spin_randomness", &mut self.roller.spin_randomness, 0.0, 1.0);

        let flipboard = &mut self.flipboard;
        clamp("flipboard.flips_per_char", &mut flipboard.flips_per_char, 3, 15);
        clamp("flipboard.flip_randomness", &mut flipboard.flip_randomness, 0.0, 1.0);
        clamp("flipboard.perspective", &mut flipboard.perspective, 200, 1000);

        clamp("word_slide_up.y_distance", &mut self.word_slide_up.y_distance, 10.0, 80.0);

        clamp("char_pop.start_scale", &mut self.char_pop.start_scale, 0.5, 0.95);
        clamp("char_pop.spring_stiffness", &mut self.char_pop.spring_stiffness, 100.0, 500.0);

        clamp("underline_wipe.thickness", &mut self.underline_wipe.thickness, 1, 8);
        clamp("underline_wipe.phase_overlap", &mut self.underline_wipe.phase_overlap, 0.0, 100.0);

        let glitch = &mut self.glitch_slice;
        clamp("glitch_slice.intensity", &mut glitch.intensity, 0.0, 1.0);
        clamp("glitch_slice.offset_amount", &mut glitch.offset_amount, 1.0, 15.0);

        let burst = &mut self.particle_burst;
        clamp("particle_burst.particle_count", &mut burst.particle_count, 10, 50);
        clamp("particle_burst.particle_size", &mut burst.particle_size, 2.0, 8.0);
        clamp("particle_burst.burst_radius", &mut burst.burst_radius, 20.0, 100.0);

        let sparkle = &mut self.sparkle_trail;
        clamp("sparkle_trail.sparkle_count", &mut sparkle.sparkle_count, 5, 30);
        clamp("sparkle_trail.sparkle_size", &mut sparkle.sparkle_size, 2.0, 8.0);
        clamp("sparkle_trail.trail_length", &mut sparkle.trail_length, 1.0, 5.0);
    }

    /// Check the text length and every color.
    pub fn validate(&self) -> Result<(), MotionError> {
        let length = self.text.graphemes(true).count();
        if length > MAX_TEXT_LENGTH {
            return Err(MotionError::TextTooLong { length, max: MAX_TEXT_LENGTH });
        }
        let colors = [
            ("background.custom_color", &self.background.custom_color),
            ("flipboard.card_color", &self.flipboard.card_color),
            ("flipboard.text_color", &self.flipboard.text_color),
            ("underline_wipe.underline_color", &self.underline_wipe.underline_color),
            ("particle_burst.particle_color", &self.particle_burst.particle_color),
            ("sparkle_trail.sparkle_color", &self.sparkle_trail.sparkle_color),
        ];
        for (field, value) in colors {
            if value.parse::<Rgb>().is_err() {
                return Err(MotionError::InvalidColor { field, value: value.clone() });
            }
        }
        Ok(())
    }
}

fn clamp<T>(field: &str, value: &mut T, min: T, max: T)
where
    T: PartialOrd + Copy + fmt::Display,
{
    let clamped = match (*value).partial_cmp(&min) {
        None | Some(Ordering::Less) => min,
        _ if *value > max => max,
        _ => return,
    };
    warn!(field, value = %value, clamped = %clamped, "setting out of range");
    *value = clamped;
}

/// A `#rrggbb` color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FromStr for Rgb {
    type Err = hex::FromHexError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let digits = input.strip_prefix('#').ok_or(hex::FromHexError::InvalidStringLength)?;
        let mut bytes = [0_u8; 3];
        hex::decode_to_slice(digits, &mut bytes)?;
        let [r, g, b] = bytes;
        Ok(Self { r, g, b })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode([self.r, self.g, self.b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_round_trip() {
        let config = AppConfig::default();
        let yaml = config.to_yaml().expect("serialize failed");
        assert_eq!(AppConfig::from_yaml(&yaml).expect("parse failed"), config);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let config = AppConfig::from_yaml("text: Hello\npreset: charPop\nglobal:\n  seed: 7\n").expect("parse failed");
        assert_eq!(config.text, "Hello");
        assert_eq!(config.preset, PresetKind::CharPop);
        assert_eq!(config.global.seed, 7);
        assert_eq!(config.global.duration, 900);
        assert_eq!(config.preset_settings(), PresetSettings::CharPop(CharPopSettings::default()));
    }

    #[test]
    fn key_names() {
        let yaml = "global:\n  loop: true\nbackground:\n  type: custom\n  custom_color: '#123456'\nword_slide_up:\n  y_distance: 40\n";
        let config = AppConfig::from_yaml(yaml).expect("parse failed");
        assert!(config.global.looping);
        assert_eq!(config.background.stage_color(), "#123456");
        assert_eq!(config.word_slide_up.y_distance, 40.0);
    }

    #[test]
    fn clamps_out_of_range_settings() {
        let yaml = "global:\n  duration: 10\n  stagger: 900\nscramble:\n  steps: 0\n  intensity: 3\nroller:\n  spins: 40\n";
        let config = AppConfig::from_yaml(yaml).expect("parse failed");
        assert_eq!(config.global.duration, 100);
        assert_eq!(config.global.stagger, 200);
        assert_eq!(config.scramble.steps, 1);
        assert_eq!(config.scramble.intensity, 1.0);
        assert_eq!(config.roller.spins, 10);
    }

    #[test]
    fn nan_is_clamped_to_minimum() {
        let mut config = AppConfig::default();
        config.blur.start_blur = f64::NAN;
        config.sanitize();
        assert_eq!(config.blur.start_blur, 0.0);
    }

    #[rstest]
    #[case(0.5, 0.5)]
    #[case(0.0, 0.0)]
    #[case(1.0, 1.0)]
    #[case(-0.2, 0.0)]
    #[case(1.7, 1.0)]
    #[case(f64::INFINITY, 1.0)]
    fn clamp_into_range(#[case] input: f64, #[case] expected: f64) {
        let mut value = input;
        clamp("test.value", &mut value, 0.0, 1.0);
        assert_eq!(value, expected);
    }

    #[test]
    fn text_too_long() {
        let config = AppConfig { text: "x".repeat(121), ..Default::default() };
        let err = config.validate().expect_err("text should be rejected");
        assert!(matches!(err, MotionError::TextTooLong { length: 121, max: 120 }));

        let config = AppConfig { text: "é".repeat(120), ..Default::default() };
        config.validate().expect("120 graphemes are fine");
    }

    #[rstest]
    #[case("#fbbf24", Some(Rgb { r: 0xfb, g: 0xbf, b: 0x24 }))]
    #[case("#FFFFFF", Some(Rgb { r: 255, g: 255, b: 255 }))]
    #[case("fbbf24", None)]
    #[case("#fff", None)]
    #[case("#gggggg", None)]
    fn colors(#[case] input: &str, #[case] expected: Option<Rgb>) {
        assert_eq!(input.parse::<Rgb>().ok(), expected);
    }

    #[test]
    fn invalid_color() {
        let err = AppConfig::from_yaml("flipboard:\n  card_color: red\n").expect_err("color should be rejected");
        match err {
            MotionError::InvalidColor { field, value } => {
                assert_eq!(field, "flipboard.card_color");
                assert_eq!(value, "red");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(Rgb { r: 1, g: 2, b: 255 }.to_string(), "#0102ff");
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let mut config = AppConfig { preset: PresetKind::Roller, ..Default::default() };
        config.roller.spins = 3;
        config.save(&path).expect("save failed");
        assert_eq!(AppConfig::load(&path).expect("load failed"), config);
        assert_eq!(AppConfig::load_or_default(Some(&path)).expect("load failed"), config);
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(file, "text: From file\npreset: glitchSlice").expect("write failed");
        let config = AppConfig::load(file.path()).expect("load failed");
        assert_eq!(config.text, "From file");
        assert!(matches!(config.preset_settings(), PresetSettings::GlitchSlice(_)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = AppConfig::load_or_default(Some(&dir.path().join("absent.yaml"))).expect_err("should fail");
        assert!(matches!(err, MotionError::Io { .. }));
    }

    #[test]
    fn randomized_seed_in_range() {
        let mut config = AppConfig::default();
        for _ in 0..100 {
            assert!(config.randomize_seed() < RANDOM_SEED_LIMIT);
        }
    }
}
