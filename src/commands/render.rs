//! Implementation of the `render`, `variants` and `defaults` commands.

use super::format_record;
use crate::cli::{DefaultsArgs, RecordFormat, RenderArgs};
use crate::context::{CommandContext, parse_variant, read_record};
use crate::error::Result;
use crate::prompt::{TemplateRegistry, render};

/// Execute `scoop render`.
pub fn cmd_render(ctx: &CommandContext, args: RenderArgs) -> Result<()> {
    let variant = ctx.variant(args.variant.as_deref())?;
    let record = read_record(&ctx.path(&args.record))?;
    let prompt = render(&record, variant);

    match args.output {
        Some(output) => {
            let path = ctx.path(&output);
            crate::fs::atomic_write_file(&path, &prompt)?;
            tracing::info!(path = %path.display(), %variant, "wrote prompt");
        }
        None => println!("{}", prompt),
    }
    Ok(())
}

/// Execute `scoop variants`.
pub fn cmd_variants() -> Result<()> {
    for template in TemplateRegistry::all() {
        println!("{}  {}", template.variant, template.description);
        println!("  headings:");
        for section in &template.sections {
            println!("    {}", section.heading);
        }
        println!("  placeholders: {}", template.placeholders.join(", "));
        println!();
    }
    Ok(())
}

/// Execute `scoop defaults`.
pub fn cmd_defaults(args: DefaultsArgs) -> Result<()> {
    let variant = parse_variant(&args.variant)?;
    let record = TemplateRegistry::default_record(variant);
    print!("{}", format_record(&record, RecordFormat::Yaml)?);
    Ok(())
}
