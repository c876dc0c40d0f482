use std::path::PathBuf;

/// Errors from the outer layers: loading and saving configuration, and exporting plans.
///
/// Generators themselves never fail.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("text is {length} characters long, at most {max} are allowed")]
    TextTooLong { length: usize, max: usize },

    #[error("invalid color for {field}: '{value}' is not #rrggbb")]
    InvalidColor { field: &'static str, value: String },
}

impl MotionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
