use crate::animations::{self, Plan};
use crate::config::AppConfig;
use crate::error::MotionError;
use crate::random::{Seed, PRNG_JS_SOURCE};
use crate::settings::{Background, GlobalSettings, PresetKind, PresetSettings, Typography};
use serde::Serialize;
use tracing::debug;

/// Stage colors resolved from the background settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StageColors {
    pub stage: String,
    pub text: String,
}

/// Everything an external code generator needs to reproduce a preview exactly.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportBundle {
    pub preset: PresetKind,
    pub preset_name: &'static str,
    pub text: String,
    pub seed: Seed,
    pub global: GlobalSettings,
    pub typography: Typography,
    pub background: Background,
    pub colors: StageColors,
    pub settings: PresetSettings,

    /// Cubic bezier control points of the global easing.
    pub easing_curve: [f64; 4],

    pub plan: Plan,

    /// The generator the exported code must embed so it draws the same values.
    pub prng_source: &'static str,
}

impl ExportBundle {
    pub fn new(config: &AppConfig) -> Self {
        let settings = config.preset_settings();
        let plan = animations::generate(&config.text, &config.global, &settings);
        debug!(preset = %config.preset, "built export bundle");
        Self {
            preset: config.preset,
            preset_name: config.preset.name(),
            text: config.text.clone(),
            seed: config.global.seed,
            global: config.global.clone(),
            typography: config.typography.clone(),
            background: config.background.clone(),
            colors: StageColors {
                stage: config.background.stage_color().to_string(),
                text: config.background.text_color().to_string(),
            },
            settings,
            easing_curve: config.global.easing.cubic_bezier(),
            plan,
            prng_source: PRNG_JS_SOURCE,
        }
    }

    pub fn to_json(&self) -> Result<String, MotionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
