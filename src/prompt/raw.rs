//! RawOverride mode transitions.
//!
//! While a record is in raw mode its `raw_prompt` is the prompt and the
//! structured fields are left alone. The two modes are never reconciled
//! silently:
//!
//! - entering raw mode snapshots the current render,
//! - editing raw text only previews what the extractor would recover,
//! - leaving raw mode replaces the structured fields with the extraction of
//!   the raw text. This is lossy: question ids are regenerated and anything
//!   the extractor cannot locate comes back empty. Editors should say so
//!   before the switch.

use super::parse::{Extraction, parse_detailed};
use super::record::AgentPromptRecord;
use super::registry::{PromptVariant, TemplateRegistry};
use super::render::render_structured;

/// Switch the record into raw mode and return the raw text.
///
/// The raw text starts as the current structured render. A record already in
/// raw mode keeps its text.
pub fn enter_raw_mode(record: &mut AgentPromptRecord, variant: PromptVariant) -> &str {
    if record.raw_prompt.is_none() {
        let snapshot = render_structured(record, TemplateRegistry::get_template(variant));
        tracing::debug!(variant = %variant, bytes = snapshot.len(), "entering raw mode");
        record.raw_prompt = Some(snapshot);
    }
    record.raw_prompt.as_deref().unwrap_or_default()
}

/// Replace the raw text and preview what the structured editor would show.
///
/// Puts the record into raw mode if it was not already. The structured
/// fields are not changed.
pub fn edit_raw(
    record: &mut AgentPromptRecord,
    text: impl Into<String>,
    variant: PromptVariant,
) -> Extraction {
    let text = text.into();
    let preview = parse_detailed(&text, Some(variant));
    record.raw_prompt = Some(text);
    preview
}

/// Leave raw mode, replacing the record with what the raw text parses to.
///
/// Returns `None` (and changes nothing) when the record is not in raw mode.
pub fn leave_raw_mode(
    record: &mut AgentPromptRecord,
    variant: PromptVariant,
) -> Option<Extraction> {
    let raw = record.raw_prompt.take()?;
    let extraction = parse_detailed(&raw, Some(variant));
    tracing::debug!(
        variant = %variant,
        complete = extraction.is_complete(),
        "leaving raw mode"
    );
    *record = extraction.record.clone();
    Some(extraction)
}
