//! Deterministic parameter engine for animated text titles.
//!
//! A title is a text, a preset and its settings. [animations::generate] turns them into a
//! [Plan](animations::Plan) that depends only on its inputs, seed included, and
//! [playback::Player] plays plans through their lifecycle.

pub mod animations;
pub mod config;
pub mod error;
pub mod export;
pub mod playback;
pub mod random;
pub mod settings;
pub mod text;

pub use animations::{generate, Plan};
pub use config::AppConfig;
pub use error::MotionError;
pub use export::ExportBundle;
pub use playback::{PlaybackEvent, PlaybackState, Player};
