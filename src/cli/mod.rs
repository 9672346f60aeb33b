//! CLI argument parsing for scoop.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Scoop: prompt compiler for workshop AI-journalist agents.
///
/// Converts between structured agent records (YAML or JSON) and the prompt
/// text handed to a language model:
/// - `render` and `parse` go each way
/// - `check` verifies that a record survives the text round-trip
/// - `save`, `show` and `history` work against the local prompt store
#[derive(Parser, Debug)]
#[command(name = "scoop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: scoop.yaml in the current directory, if present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for scoop.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a record file to prompt text.
    ///
    /// Reads a YAML or JSON record. A record with `rawPrompt` set prints
    /// that text unchanged.
    Render(RenderArgs),

    /// Parse prompt text back into a record.
    ///
    /// Fidelity warnings (missing sections, unrecoverable values) go to stderr.
    Parse(ParseArgs),

    /// Check that a record survives render, parse, render unchanged.
    ///
    /// Exits with code 2 on drift unless `strict_round_trip` is disabled.
    Check(CheckArgs),

    /// Validate prompt text structurally.
    ///
    /// Exits with code 2 when the prompt is invalid.
    Validate(ValidateArgs),

    /// List the built-in variants with their headings and placeholders.
    Variants,

    /// Print a variant's default record as YAML.
    Defaults(DefaultsArgs),

    /// Render a record and save it to the prompt store.
    Save(SaveArgs),

    /// Print a stored prompt.
    Show(ShowArgs),

    /// Print recent prompt store events.
    History(HistoryArgs),
}

/// Serialization format for printed records.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFormat {
    #[default]
    Yaml,
    Json,
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Record file (YAML or JSON).
    pub record: PathBuf,

    /// Variant to render with (nuggets, lightbulbs, nexus).
    #[arg(long)]
    pub variant: Option<String>,

    /// Write the prompt to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `parse` command.
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Prompt text file.
    pub prompt: PathBuf,

    /// Variant to parse with. Detected from the headings when omitted.
    #[arg(long)]
    pub variant: Option<String>,

    /// Output format for the record.
    #[arg(long, value_enum, default_value_t = RecordFormat::Yaml)]
    pub format: RecordFormat,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Record file (YAML or JSON).
    pub record: PathBuf,

    /// Variant to check with.
    #[arg(long)]
    pub variant: Option<String>,
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Prompt text file.
    pub prompt: PathBuf,

    /// Variant to validate against. Detected from the headings when omitted.
    #[arg(long)]
    pub variant: Option<String>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `defaults` command.
#[derive(Parser, Debug)]
pub struct DefaultsArgs {
    /// Variant name.
    pub variant: String,
}

/// Arguments for the `save` command.
#[derive(Parser, Debug)]
pub struct SaveArgs {
    /// Record file (YAML or JSON).
    pub record: PathBuf,

    /// Workshop id the prompt belongs to.
    #[arg(short, long)]
    pub workshop: String,

    /// Agent type to save under.
    #[arg(long)]
    pub variant: Option<String>,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Workshop id.
    #[arg(short, long)]
    pub workshop: String,

    /// Agent type. Lists every stored agent of the workshop when omitted.
    #[arg(long)]
    pub variant: Option<String>,

    /// Print the stored record instead of the prompt text.
    #[arg(long)]
    pub record: bool,
}

/// Arguments for the `history` command.
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Maximum number of events to print.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_render() {
        let cli = Cli::try_parse_from(["scoop", "render", "agent.yaml", "--variant", "nexus"])
            .unwrap();
        if let Command::Render(args) = cli.command {
            assert_eq!(args.record, PathBuf::from("agent.yaml"));
            assert_eq!(args.variant.as_deref(), Some("nexus"));
            assert!(args.output.is_none());
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn parse_render_output() {
        let cli = Cli::try_parse_from(["scoop", "render", "a.yaml", "-o", "prompt.txt"]).unwrap();
        if let Command::Render(args) = cli.command {
            assert_eq!(args.output, Some(PathBuf::from("prompt.txt")));
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn parse_parse_defaults() {
        let cli = Cli::try_parse_from(["scoop", "parse", "prompt.txt"]).unwrap();
        if let Command::Parse(args) = cli.command {
            assert!(args.variant.is_none());
            assert_eq!(args.format, RecordFormat::Yaml);
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn parse_parse_json() {
        let cli = Cli::try_parse_from(["scoop", "parse", "p.txt", "--format", "json"]).unwrap();
        if let Command::Parse(args) = cli.command {
            assert_eq!(args.format, RecordFormat::Json);
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn parse_check() {
        let cli = Cli::try_parse_from(["scoop", "check", "a.yaml"]).unwrap();
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn parse_validate() {
        let cli = Cli::try_parse_from(["scoop", "validate", "p.txt", "--json"]).unwrap();
        if let Command::Validate(args) = cli.command {
            assert!(args.json);
        } else {
            panic!("Expected Validate command");
        }
    }

    #[test]
    fn parse_variants() {
        let cli = Cli::try_parse_from(["scoop", "variants"]).unwrap();
        assert!(matches!(cli.command, Command::Variants));
    }

    #[test]
    fn parse_defaults() {
        let cli = Cli::try_parse_from(["scoop", "defaults", "lightbulbs"]).unwrap();
        if let Command::Defaults(args) = cli.command {
            assert_eq!(args.variant, "lightbulbs");
        } else {
            panic!("Expected Defaults command");
        }
    }

    #[test]
    fn parse_save_requires_workshop() {
        assert!(Cli::try_parse_from(["scoop", "save", "a.yaml"]).is_err());

        let cli = Cli::try_parse_from(["scoop", "save", "a.yaml", "-w", "ws-1"]).unwrap();
        if let Command::Save(args) = cli.command {
            assert_eq!(args.workshop, "ws-1");
        } else {
            panic!("Expected Save command");
        }
    }

    #[test]
    fn parse_show() {
        let cli = Cli::try_parse_from([
            "scoop",
            "show",
            "--workshop",
            "ws-1",
            "--variant",
            "nuggets",
            "--record",
        ])
        .unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.workshop, "ws-1");
            assert_eq!(args.variant.as_deref(), Some("nuggets"));
            assert!(args.record);
        } else {
            panic!("Expected Show command");
        }
    }

    #[test]
    fn parse_history_limit() {
        let cli = Cli::try_parse_from(["scoop", "history"]).unwrap();
        if let Command::History(args) = cli.command {
            assert_eq!(args.limit, 20);
        } else {
            panic!("Expected History command");
        }

        let cli = Cli::try_parse_from(["scoop", "history", "-n", "5"]).unwrap();
        if let Command::History(args) = cli.command {
            assert_eq!(args.limit, 5);
        } else {
            panic!("Expected History command");
        }
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["scoop", "variants", "-v", "--config", "alt.yaml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("alt.yaml")));
    }
}
