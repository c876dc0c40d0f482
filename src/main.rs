use anyhow::Context as _;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use std::path::PathBuf;
use strum::IntoEnumIterator;
use title_motion::settings::PresetKind;
use title_motion::{generate, AppConfig, ExportBundle, Plan, PlaybackState, Player};
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TITLE_MOTION_LOG";

/// Design animated text titles from seeded presets.
#[derive(Parser, Debug)]
#[command(name = "title-motion")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file; defaults to the platform config directory.
    #[arg(short, long, global = true, env = "TITLE_MOTION_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured text.
    #[arg(short, long, global = true)]
    text: Option<String>,

    /// Override the configured preset, e.g. `scramble` or `wordSlideUp`.
    #[arg(short, long, global = true)]
    preset: Option<PresetKind>,

    /// Override the configured seed.
    #[arg(short, long, global = true)]
    seed: Option<u32>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available presets.
    Presets,

    /// Print the plan of the configured title as JSON.
    Plan {
        /// Single line output.
        #[arg(long)]
        compact: bool,

        /// Print every scramble frame instead of the plan.
        #[arg(long)]
        frames: bool,
    },

    /// Play the configured title against a simulated clock and print its events.
    Simulate {
        /// Clock resolution in milliseconds.
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f64,

        /// Stop after this much simulated time.
        #[arg(long, default_value_t = 10_000.0)]
        limit_ms: f64,

        /// Pause once this much simulated time has passed.
        #[arg(long)]
        pause_at: Option<f64>,

        /// How long to stay paused.
        #[arg(long, default_value_t = 500.0)]
        pause_for: f64,
    },

    /// Pick a random seed.
    Seed {
        /// Write the new seed back to the config file.
        #[arg(long)]
        save: bool,
    },

    /// Print the export bundle of the configured title as JSON.
    Export {
        /// Write the bundle to this file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(text) = &cli.text {
        config.text = text.clone();
    }
    if let Some(preset) = cli.preset {
        config.preset = preset;
    }
    if let Some(seed) = cli.seed {
        config.global.seed = seed;
    }
    config.validate()?;

    match cli.command {
        Command::Presets => list_presets(),
        Command::Plan { compact, frames } => print_plan(&config, compact, frames),
        Command::Simulate { frame_ms, limit_ms, pause_at, pause_for } => {
            simulate(&config, frame_ms, limit_ms, pause_at, pause_for)
        }
        Command::Seed { save } => randomize_seed(config, cli.config, save),
        Command::Export { out } => export(&config, out),
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}

fn list_presets() -> anyhow::Result<()> {
    for kind in PresetKind::iter() {
        let style = if kind.is_tick_based() { "ticks" } else { "tween" };
        println!("{:15} {:16} {:6} {}", kind.to_string(), kind.name(), style, kind.description());
    }
    Ok(())
}

fn print_plan(config: &AppConfig, compact: bool, frames: bool) -> anyhow::Result<()> {
    let plan = generate(&config.text, &config.global, &config.preset_settings());
    if frames {
        let Plan::Scramble(scramble) = &plan else {
            anyhow::bail!("frames are only available for the scramble preset");
        };
        for (tick, frame) in scramble.frames().iter().enumerate() {
            println!("{tick:>3} {}", frame.iter().join(""));
        }
        return Ok(());
    }
    let json = if compact { serde_json::to_string(&plan)? } else { serde_json::to_string_pretty(&plan)? };
    println!("{json}");
    Ok(())
}

fn simulate(
    config: &AppConfig,
    frame_ms: f64,
    limit_ms: f64,
    pause_at: Option<f64>,
    pause_for: f64,
) -> anyhow::Result<()> {
    anyhow::ensure!(frame_ms > 0.0, "frame duration must be positive");
    let mut player = Player::new(config.text.clone(), config.global.clone(), config.preset_settings());
    let mut events = player.play();
    let mut resume_at = None;
    loop {
        for event in events.drain(..) {
            println!("{event}");
        }
        let now = player.now_ms();
        if player.state() == PlaybackState::Complete || now >= limit_ms {
            break;
        }
        if let Some(at) = pause_at {
            if resume_at.is_none() && now >= at {
                events.extend(player.pause());
                resume_at = Some(now + pause_for);
            }
        }
        if resume_at.is_some_and(|resume| now >= resume) && player.state() == PlaybackState::Paused {
            events.extend(player.resume());
        }
        events.extend(player.advance(frame_ms));
    }

    let completions = player.plan().map(|plan| plan.animated_units().len()).unwrap_or_default();
    info!(completions, now_ms = player.now_ms(), "simulation finished");
    println!("state: {} after {:.1}ms, {} unit(s) per pass", player.state(), player.now_ms(), completions);
    Ok(())
}

fn randomize_seed(mut config: AppConfig, path: Option<PathBuf>, save: bool) -> anyhow::Result<()> {
    let seed = config.randomize_seed();
    println!("{seed}");
    if save {
        let path = path.or_else(AppConfig::default_path).context("no config directory available")?;
        config.save(&path)?;
        info!(path = %path.display(), seed, "saved seed");
    }
    Ok(())
}

fn export(config: &AppConfig, out: Option<PathBuf>) -> anyhow::Result<()> {
    let json = ExportBundle::new(config).to_json()?;
    match out {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote export bundle");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use title_motion::playback::EventKind;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from(["title-motion", "plan", "--preset", "wordSlideUp", "--seed", "9"])
            .expect("parse failed");
        assert_eq!(cli.preset, Some(PresetKind::WordSlideUp));
        assert_eq!(cli.seed, Some(9));
        assert!(matches!(cli.command, Command::Plan { compact: false, frames: false }));
    }

    #[test]
    fn unknown_preset_is_rejected() {
        assert!(Cli::try_parse_from(["title-motion", "--preset", "sparkles", "plan"]).is_err());
    }

    #[test]
    fn simulation_events_end_in_completion() {
        let config = AppConfig { text: "AB".into(), ..Default::default() };
        let mut player = Player::new(config.text.clone(), config.global.clone(), config.preset_settings());
        let mut events = player.play();
        events.extend(player.run_until_idle(10_000.0));
        assert_eq!(events.last().map(|e| e.kind), Some(EventKind::Complete));
    }
}
