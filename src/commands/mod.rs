//! Command implementations for scoop.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Prompt text and records go to stdout; diagnostics go
//! through `tracing` to stderr.

mod check;
mod parse;
mod render;
mod store;
mod validate_cmd;


use crate::cli::{Command, RecordFormat};
use crate::context::CommandContext;
use crate::error::{Result, ScoopError};
use crate::prompt::AgentPromptRecord;

/// Dispatch a command to its implementation.
pub fn dispatch(ctx: &CommandContext, command: Command) -> Result<()> {
    match command {
        Command::Render(args) => render::cmd_render(ctx, args),
        Command::Parse(args) => parse::cmd_parse(ctx, args),
        Command::Check(args) => check::cmd_check(ctx, args),
        Command::Validate(args) => validate_cmd::cmd_validate(ctx, args),
        Command::Variants => render::cmd_variants(),
        Command::Defaults(args) => render::cmd_defaults(args),
        Command::Save(args) => store::cmd_save(ctx, args),
        Command::Show(args) => store::cmd_show(ctx, args),
        Command::History(args) => store::cmd_history(ctx, args),
    }
}

/// Serialize a record for printing.
fn format_record(record: &AgentPromptRecord, format: RecordFormat) -> Result<String> {
    match format {
        RecordFormat::Yaml => serde_yaml::to_string(record)
            .map_err(|e| ScoopError::UserError(format!("failed to serialize record: {}", e))),
        RecordFormat::Json => serde_json::to_string_pretty(record)
            .map_err(|e| ScoopError::UserError(format!("failed to serialize record: {}", e))),
    }
}
