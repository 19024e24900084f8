//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// minutes-extract - Structured meeting minutes from transcripts
#[derive(Parser, Debug)]
#[command(name = "minutes-extract")]
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
    /// Extract meeting minutes from a transcript
    Extract {
        /// Transcript file ("-" or omitted reads stdin)
        input: Option<PathBuf>,

        /// Use the bundled sample transcript
        #[arg(long, conflicts_with = "input")]
        sample: bool,

        /// Model to use (must be in llm.models)
        #[arg(short, long)]
        model: Option<String>,

        /// Save the document; a directory or no value uses meeting_minutes.txt
        #[arg(short, long, num_args = 0..=1, value_name = "PATH")]
        output: Option<Option<PathBuf>>,

        /// Also print the raw completion response as JSON
        #[arg(long)]
        raw: bool,

        /// Print the decoded minutes as JSON instead of Markdown
        #[arg(long)]
        json: bool,

        /// Print an HTML download link with the document embedded
        #[arg(long)]
        link: bool,
    },

    /// Render a saved JSON result as Markdown without calling the API
    Render {
        /// JSON file holding extracted minutes
        file: PathBuf,

        /// Validate against the meeting-minutes schema first
        #[arg(long)]
        strict: bool,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the function schema sent to the model
    Schema,

    /// List the models the extract command accepts
    Models,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_flag_value_is_optional() {
        let cli = Cli::parse_from(["minutes-extract", "extract", "--sample", "-o"]);
        match cli.command {
            Commands::Extract { output, sample, .. } => {
                assert!(sample);
                assert_eq!(output, Some(None));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn sample_conflicts_with_input_file() {
        let result = Cli::try_parse_from(["minutes-extract", "extract", "t.txt", "--sample"]);
        assert!(result.is_err());
    }
}
