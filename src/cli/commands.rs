//! CLI command implementations

use anyhow::{Context, Result};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::export::{download_link, write_document, DEFAULT_FILENAME};
use crate::pipeline::Pipeline;
use crate::render::{render_minutes, render_value};
use crate::sample::SAMPLE_TRANSCRIPT;
use crate::schema::{decode, function_definition};
use crate::MinutesError;

/// Options for `extract`
#[derive(Debug, Default)]
pub struct ExtractOptions {
    pub input: Option<PathBuf>,
    pub sample: bool,
    pub model: Option<String>,
    pub output: Option<Option<PathBuf>>,
    pub raw: bool,
    pub json: bool,
    pub link: bool,
}

/// Extract meeting minutes from a transcript and print them
pub async fn extract_minutes(settings: &Settings, options: ExtractOptions) -> Result<()> {
    let transcript = read_transcript(options.input.as_deref(), options.sample)?;
    let model = options
        .model
        .unwrap_or_else(|| settings.llm.model.clone());

    let pipeline = Pipeline::from_settings(settings)?;

    tracing::info!("Generating meeting minutes...");
    let document = tokio::select! {
        result = pipeline.run(&transcript, &model) => result?,
        _ = tokio::signal::ctrl_c() => {
            return Err(MinutesError::extraction_permanent("cancelled").into());
        }
    };

    if options.raw {
        let raw = serde_json::to_string_pretty(&document.completion.raw_view())?;
        println!("{}", raw);
        println!();
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&document.minutes)?);
    } else {
        print!("{}", document.markdown);
    }

    if let Some(target) = options.output {
        let target = target.unwrap_or_else(|| settings.general.output_dir.clone());
        let path = write_document(&target, &document.markdown)?;
        eprintln!("Saved to: {}", path.display());
    }

    if options.link {
        println!();
        println!(
            "{}",
            download_link(
                &document.markdown,
                DEFAULT_FILENAME,
                "Download Meeting Minutes as TXT"
            )
        );
    }

    Ok(())
}

/// Render a saved JSON result without calling the API
pub fn render_file(file: &Path, strict: bool, output: Option<PathBuf>) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {}", file.display()))?;

    let markdown = if strict {
        render_minutes(&decode(&value)?)?
    } else {
        render_value(&value)?
    };

    if let Some(path) = output {
        let path = write_document(&path, &markdown)?;
        eprintln!("Saved to: {}", path.display());
    } else {
        print!("{}", markdown);
    }

    Ok(())
}

/// Print the function schema sent to the model
pub fn show_schema() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&function_definition())?);
    Ok(())
}

/// List the allowed models, marking the default
pub fn list_models(settings: &Settings) -> Result<()> {
    for model in &settings.llm.models {
        let marker = if *model == settings.llm.model { "*" } else { " " };
        println!("{} {}", marker, model);
    }

    if !settings.is_model_allowed(&settings.llm.model) {
        tracing::warn!(
            model = %settings.llm.model,
            "Default model is not in llm.models; pass --model explicitly"
        );
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut shown = settings.clone();
            if !shown.llm.api_key.is_empty() {
                shown.llm.api_key = "********".to_string();
            }
            let toml = toml::to_string_pretty(&shown)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

// Helper functions

fn read_transcript(input: Option<&Path>, sample: bool) -> Result<String> {
    if sample {
        return Ok(SAMPLE_TRANSCRIPT.to_string());
    }

    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript: {}", path.display())),
        _ => {
            let mut stdin = std::io::stdin();
            if input.is_none() && stdin.is_terminal() {
                anyhow::bail!(
                    "No transcript given. Pass a file, '-' to read stdin, or --sample."
                );
            }
            let mut transcript = String::new();
            stdin
                .read_to_string(&mut transcript)
                .context("Failed to read transcript from stdin")?;
            Ok(transcript)
        }
    }
}
