//! tubenotes - YouTube transcript to multilingual notes converter
//!
//! Entry point for the tubenotes CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tubenotes::cli::{Cli, Commands};
use tubenotes::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            tubenotes::cli::completions::print(shell);
        }
        Commands::Languages => tubenotes::cli::commands::list_languages(),
        Commands::Formats => tubenotes::cli::commands::list_formats(),
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;
            init_logging(&settings, cli.verbose);

            match command {
                Commands::Summarize {
                    url,
                    format,
                    language,
                    output,
                } => {
                    tubenotes::cli::commands::summarize_video(
                        &settings, &url, format, language, output,
                    )
                    .await?;
                }
                Commands::Transcript { url, language } => {
                    tubenotes::cli::commands::print_transcript(&settings, &url, language).await?;
                }
                Commands::Preview { url } => {
                    tubenotes::cli::commands::show_preview(&url)?;
                }
                Commands::Config(config_cmd) => {
                    tubenotes::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } | Commands::Languages | Commands::Formats => {
                    unreachable!()
                }
            }
        }
    }

    Ok(())
}

fn init_logging(settings: &Settings, verbose: bool) {
    let fallback = if verbose {
        "debug"
    } else {
        settings.general.log_level.as_str()
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
