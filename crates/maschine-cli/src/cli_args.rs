//! CLI argument definitions for the maschine-tag command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// maschine-tag - Embed Maschine sampler metadata into WAV files
#[derive(Parser)]
#[command(name = "maschine-tag")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Log debug events to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Tag WAV files with sampler metadata
    Tag {
        /// Path to the metadata JSON file
        #[arg(short, long)]
        metadata: String,

        /// WAV file to tag
        #[arg(short, long, required_unless_present = "input_dir", conflicts_with = "input_dir")]
        input: Option<String>,

        /// Directory to recursively scan for .wav files
        #[arg(long)]
        input_dir: Option<String>,

        /// Directory to write tagged files to
        #[arg(short, long)]
        out_dir: String,

        /// Merge <stem>.json next to each WAV over the metadata file
        #[arg(long)]
        sidecar: bool,

        /// Keep every chunk of the source file instead of only fmt/data
        #[arg(long)]
        keep_chunks: bool,

        /// Keep the source file name instead of renaming to the sample name
        #[arg(long)]
        keep_filename: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the soundinfo embedded in a WAV file
    Inspect {
        /// WAV file to inspect
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a metadata JSON file without tagging anything
    Validate {
        /// Path to the metadata JSON file
        #[arg(short, long)]
        metadata: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the flattened category paths for modes and types
    Flatten {
        /// Mode names (comma-separated)
        #[arg(long, value_delimiter = ',')]
        modes: Vec<String>,

        /// Type paths with segments separated by '/', e.g. "Bass/Synth Bass"
        #[arg(long, num_args = 1..)]
        types: Vec<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
