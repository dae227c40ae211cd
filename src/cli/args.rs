//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::languages::{Language, SummaryFormat};

/// tubenotes - YouTube transcript to multilingual notes converter
#[derive(Parser, Debug)]
#[command(name = "tubenotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate detailed notes for a video
    Summarize {
        /// YouTube video link (must contain `v=<id>`)
        url: String,

        /// Summary format
        #[arg(short, long, value_enum, default_value_t = SummaryFormat::BulletPoints)]
        format: SummaryFormat,

        /// Summary language, also used to pick the caption track
        #[arg(short, long, value_enum, default_value_t = Language::English)]
        language: Language,

        /// Also save the summary to a text file (defaults to summary.txt)
        #[arg(short, long, num_args = 0..=1, value_name = "FILE")]
        output: Option<Option<PathBuf>>,
    },

    /// Print the flattened transcript of a video
    Transcript {
        /// YouTube video link (must contain `v=<id>`)
        url: String,

        /// Preferred caption language
        #[arg(short, long, value_enum, default_value_t = Language::English)]
        language: Language,
    },

    /// Show the watch and thumbnail links for a video
    Preview {
        /// YouTube video link (must contain `v=<id>`)
        url: String,
    },

    /// List the supported summary languages
    Languages,

    /// List the supported summary formats
    Formats,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
