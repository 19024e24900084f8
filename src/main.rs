//! minutes-extract - Structured meeting minutes from transcripts
//!
//! Entry point for the minutes-extract CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use minutes_extract::cli::commands::ExtractOptions;
use minutes_extract::cli::{Cli, Commands};
use minutes_extract::config::Settings;

fn init_logging(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            minutes_extract::cli::completions::print(shell);
        }
        Commands::Schema => {
            minutes_extract::cli::commands::show_schema()?;
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;

            let level = if cli.verbose {
                "debug"
            } else {
                settings.general.log_level.as_str()
            };
            init_logging(level);

            // Execute command
            match command {
                Commands::Extract {
                    input,
                    sample,
                    model,
                    output,
                    raw,
                    json,
                    link,
                } => {
                    let options = ExtractOptions {
                        input,
                        sample,
                        model,
                        output,
                        raw,
                        json,
                        link,
                    };
                    minutes_extract::cli::commands::extract_minutes(&settings, options).await?;
                }
                Commands::Render {
                    file,
                    strict,
                    output,
                } => {
                    minutes_extract::cli::commands::render_file(&file, strict, output)?;
                }
                Commands::Models => {
                    minutes_extract::cli::commands::list_models(&settings)?;
                }
                Commands::Config(config_cmd) => {
                    minutes_extract::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } | Commands::Schema => unreachable!(),
            }
        }
    }

    Ok(())
}
