//! holobooth: interactive entry point.

use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

use hand_track::{Scale, ZeroHandPolicy};
use holobooth::app::run;
use holobooth::config::{BoothConfig, SourceKind};
use holobooth::schedule::Cadence;
use holobooth::BoothError;

/// Move a 3D box with your hand.
#[derive(Parser, Debug)]
#[command(name = "holobooth", version, about, long_about = None)]
struct Args {
    /// Configuration file path (default: ./holobooth.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ignore config files and start with defaults
    #[arg(long)]
    quick: bool,

    /// Hand source (overrides config)
    #[arg(short, long, value_enum)]
    source: Option<SourceKind>,

    /// Detect every N milliseconds instead of every frame
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Use a flat pixels-per-unit scale instead of one-tenth of the frame
    #[arg(long, value_name = "PX")]
    fixed_scale: Option<f32>,

    /// Snap the box back to the centre when the hand is lost
    #[arg(long)]
    reset_on_lost: bool,

    /// Landmark index (0-20) that drives the box
    #[arg(long, value_name = "INDEX")]
    landmark: Option<usize>,

    /// Hide the webcam preview inset
    #[arg(long)]
    no_preview: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, cfg: &mut BoothConfig) {
        if let Some(source) = self.source {
            cfg.source = source;
        }
        if let Some(ms) = self.interval_ms {
            cfg.cadence = Cadence::Interval(ms);
        }
        if let Some(px) = self.fixed_scale {
            cfg.tracker.scale = Scale::Fixed { x: px, y: px };
        }
        if self.reset_on_lost {
            cfg.tracker.zero_hands = ZeroHandPolicy::Reset;
        }
        if let Some(index) = self.landmark {
            cfg.tracker.landmark_index = index;
        }
        if self.no_preview {
            cfg.preview = false;
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════╗");
    println!("║     holobooth: move the box with your hand   ║");
    println!("╚══════════════════════════════════════════════╝");
    println!();

    if let Err(e) = configure_and_run(&args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_and_run(args: &Args) -> Result<(), BoothError> {
    let mut cfg = if args.quick {
        BoothConfig::default()
    } else {
        BoothConfig::load(args.config.as_deref())?
    };
    args.apply(&mut cfg);
    cfg.validate()?;

    match cfg.source {
        SourceKind::Sim  => println!("  Mode: pointer simulation  (use --features leap for hardware)"),
        SourceKind::Leap => println!("  Mode: LeapMotion hardware"),
    }
    println!("  Q / Esc to quit");
    println!();

    run(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "holobooth", "--interval-ms", "100", "--fixed-scale", "100",
            "--reset-on-lost", "--landmark", "8", "--no-preview",
        ]);
        let mut cfg = BoothConfig::default();
        args.apply(&mut cfg);
        assert_eq!(cfg.cadence, Cadence::Interval(100));
        assert_eq!(cfg.tracker.scale, Scale::FLAT_100);
        assert_eq!(cfg.tracker.zero_hands, ZeroHandPolicy::Reset);
        assert_eq!(cfg.tracker.landmark_index, 8);
        assert!(!cfg.preview);
    }

    #[test]
    fn no_flags_keep_config() {
        let args = Args::parse_from(["holobooth"]);
        let mut cfg = BoothConfig::default();
        args.apply(&mut cfg);
        assert_eq!(cfg, BoothConfig::default());
    }

    #[test]
    fn source_flag_parses() {
        let args = Args::parse_from(["holobooth", "--source", "leap"]);
        assert_eq!(args.source, Some(SourceKind::Leap));
    }
}
