//! Implementation of the `check` command.

use crate::cli::CheckArgs;
use crate::context::{CommandContext, read_record};
use crate::error::{Result, ScoopError};
use crate::prompt::check_round_trip;

/// Execute `scoop check`.
///
/// Renders the record, parses the text, renders again and compares. Drift
/// is an error unless `strict_round_trip` is off.
pub fn cmd_check(ctx: &CommandContext, args: CheckArgs) -> Result<()> {
    let variant = ctx.variant(args.variant.as_deref())?;
    let record = read_record(&ctx.path(&args.record))?;

    let result = check_round_trip(&record, variant);
    let Some(diff) = &result.first_difference else {
        println!("ok: {} record round-trips ({} bytes)", variant, result.original.len());
        return Ok(());
    };

    println!("drift at line {}:", diff.line);
    println!("  expected: {}", diff.expected.as_deref().unwrap_or("<end of text>"));
    println!("  actual:   {}", diff.actual.as_deref().unwrap_or("<end of text>"));

    if ctx.config.strict_round_trip {
        Err(ScoopError::ValidationError(format!(
            "{} record does not round-trip (first difference at line {})",
            variant, diff.line
        )))
    } else {
        tracing::warn!(line = diff.line, "round-trip drift ignored (strict_round_trip is off)");
        Ok(())
    }
}
