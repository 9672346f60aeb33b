//! Implementation of the `validate` command.

use crate::cli::ValidateArgs;
use crate::context::{CommandContext, parse_variant, read_text};
use crate::error::{Result, ScoopError};
use crate::validate::{PromptValidator, StructuralValidator};

/// Execute `scoop validate`.
pub fn cmd_validate(ctx: &CommandContext, args: ValidateArgs) -> Result<()> {
    let variant = args.variant.as_deref().map(parse_variant).transpose()?;
    let text = read_text(&ctx.path(&args.prompt))?;

    let report = StructuralValidator::new(variant).validate(&text);

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| ScoopError::UserError(format!("failed to serialize report: {}", e)))?;
        println!("{}", json);
    } else {
        println!("{}", if report.valid { "PASS" } else { "FAIL" });
        println!("{}", report.feedback);
        for suggestion in &report.suggestions {
            println!("  - {}", suggestion);
        }
    }

    if report.valid {
        Ok(())
    } else {
        Err(ScoopError::ValidationError(report.feedback))
    }
}
