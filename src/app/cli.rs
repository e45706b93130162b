//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gesture Fuzzy - Classify motion-sensor frames with fuzzy inference
#[derive(Parser, Debug)]
#[command(name = "gesture-fuzzy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recording through the classifier
    Classify {
        /// Recording file, or the name of a recording in the recordings directory
        #[arg(short, long)]
        input: PathBuf,

        /// Skip channel smoothing
        #[arg(long)]
        raw: bool,
    },

    /// Classify a single frame and show the fuzzified inputs
    Eval {
        /// Acceleration along X (g)
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        acc_x: f64,

        /// Acceleration along Y (g)
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        acc_y: f64,

        /// Acceleration along Z (g)
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        acc_z: f64,

        /// Rotation around X (degrees)
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        angle_x: f64,

        /// Rotation around Y (degrees)
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        angle_y: f64,

        /// Rotation around Z (degrees)
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        angle_z: f64,

        /// Acceleration magnitude
        #[arg(short, long, default_value_t = 0.0)]
        magnitude: f64,
    },

    /// Classify newline-delimited JSON frames from stdin
    Stream {
        /// Skip channel smoothing
        #[arg(long)]
        raw: bool,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "engine.defuzzify_samples", "filter.enabled")
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the recording directory
    pub fn recordings_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".gesture_fuzzy").join("recordings"))
            .unwrap_or_else(|| PathBuf::from("recordings"))
    }

    /// Resolve a recording argument: an existing path is used as-is,
    /// otherwise `<name>.json` in the recordings directory.
    pub fn resolve_recording(input: &std::path::Path) -> PathBuf {
        if input.exists() {
            return input.to_path_buf();
        }
        let named = Self::recordings_dir().join(input).with_extension("json");
        if named.exists() {
            named
        } else {
            input.to_path_buf()
        }
    }
}
