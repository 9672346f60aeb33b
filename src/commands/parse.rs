//! Implementation of the `parse` command.

use super::format_record;
use crate::cli::ParseArgs;
use crate::context::{CommandContext, parse_variant, read_text};
use crate::error::Result;
use crate::prompt::parse_detailed;

/// Execute `scoop parse`.
///
/// Without `--variant` the variant is detected from the headings, not taken
/// from the config, since the text says which template it came from.
pub fn cmd_parse(ctx: &CommandContext, args: ParseArgs) -> Result<()> {
    let hint = args.variant.as_deref().map(parse_variant).transpose()?;
    let text = read_text(&ctx.path(&args.prompt))?;

    let extraction = parse_detailed(&text, hint);
    for warning in extraction.warnings() {
        eprintln!("warning: {}", warning);
    }
    tracing::debug!(variant = %extraction.variant, "parsed prompt");

    let output = format_record(&extraction.record, args.format)?;
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
    Ok(())
}
