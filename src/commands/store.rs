//! Implementation of the store commands: `save`, `show` and `history`.

use super::format_record;
use crate::cli::{HistoryArgs, RecordFormat, SaveArgs, ShowArgs};
use crate::context::{CommandContext, parse_variant, read_record};
use crate::error::{Result, ScoopError};
use crate::history::read_recent;
use crate::store::{PromptStore, StoredPrompt};

/// Execute `scoop save`.
pub fn cmd_save(ctx: &CommandContext, args: SaveArgs) -> Result<()> {
    let variant = ctx.variant(args.variant.as_deref())?;
    let record = read_record(&ctx.path(&args.record))?;

    let prompt = StoredPrompt::from_record(&args.workshop, variant, record);
    ctx.store().save(&prompt)?;

    println!(
        "saved {} prompt for workshop '{}' ({} bytes)",
        variant,
        args.workshop,
        prompt.generated_prompt.len()
    );
    Ok(())
}

/// Execute `scoop show`.
pub fn cmd_show(ctx: &CommandContext, args: ShowArgs) -> Result<()> {
    let store = ctx.store();

    let prompts = match args.variant.as_deref() {
        Some(name) => {
            let variant = parse_variant(name)?;
            let prompt = store.load(&args.workshop, variant)?.ok_or_else(|| {
                ScoopError::UserError(format!(
                    "no {} prompt stored for workshop '{}'.\n\n\
                     Use `scoop save <record> --workshop {} --variant {}` to create one.",
                    variant, args.workshop, args.workshop, variant
                ))
            })?;
            vec![prompt]
        }
        None => store.list(&args.workshop)?,
    };

    if prompts.is_empty() {
        return Err(ScoopError::UserError(format!(
            "no prompts stored for workshop '{}'",
            args.workshop
        )));
    }

    for prompt in &prompts {
        println!("================================================================================");
        println!("{} [{}]", prompt.workshop_id, prompt.agent_type);
        println!(
            "Updated:    {} by {}",
            prompt.updated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            prompt.updated_by
        );
        if prompt.record.is_raw() {
            println!("Mode:       raw");
        }
        if !prompt.is_current() {
            tracing::warn!(
                workshop = %prompt.workshop_id,
                agent_type = %prompt.agent_type,
                "stored prompt no longer matches its record"
            );
        }
        println!("================================================================================");
        println!();
        if args.record {
            print!("{}", format_record(&prompt.record, RecordFormat::Yaml)?);
        } else {
            println!("{}", prompt.generated_prompt);
        }
        println!();
    }
    Ok(())
}

/// Execute `scoop history`.
pub fn cmd_history(ctx: &CommandContext, args: HistoryArgs) -> Result<()> {
    let events = read_recent(ctx.store().root(), args.limit)?;
    if events.is_empty() {
        println!("no history");
        return Ok(());
    }

    for event in events {
        println!(
            "{}  {:<8}  {}/{}  {}",
            event.ts.format("%Y-%m-%d %H:%M:%S"),
            event.action.to_string(),
            event.workshop,
            event.agent_type,
            event.actor
        );
    }
    Ok(())
}
