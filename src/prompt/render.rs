//! Renderer: structured record to prompt text.

use super::list::{format_questions, format_rules};
use super::record::AgentPromptRecord;
use super::registry::{
    ADDITIONAL_CONTEXT_HEADING, PromptVariant, QUESTIONS, RULES, SectionDescriptor,
    TemplateDescriptor, TemplateRegistry,
};
use super::template::{placeholders, render_template};
use std::collections::HashMap;

/// Render a record with a variant's template.
///
/// A record in RawOverride mode returns its raw text unchanged. Otherwise
/// every placeholder receives a value (empty when unset); this never fails.
///
/// # Examples
///
/// ```
/// use scoop::prompt::{AgentPromptRecord, PromptVariant, render};
///
/// let record = AgentPromptRecord {
///     agent_name: "Elias".to_string(),
///     rules: vec!["Be kind".to_string()],
///     ..Default::default()
/// };
/// let prompt = render(&record, PromptVariant::Nuggets);
///
/// assert!(prompt.contains("named \"Elias\""));
/// assert!(prompt.contains("\n1. Be kind\n"));
/// ```
pub fn render(record: &AgentPromptRecord, variant: PromptVariant) -> String {
    if let Some(raw) = &record.raw_prompt {
        return raw.clone();
    }
    render_structured(record, TemplateRegistry::get_template(variant))
}

/// Render with a variant given by name, falling back to the default variant.
pub fn render_named(record: &AgentPromptRecord, variant: &str) -> String {
    if let Some(raw) = &record.raw_prompt {
        return raw.clone();
    }
    render_structured(record, TemplateRegistry::resolve(variant))
}

/// Render the structured fields, ignoring any raw override.
pub fn render_structured(record: &AgentPromptRecord, template: &TemplateDescriptor) -> String {
    let mut sections: Vec<String> = template
        .sections
        .iter()
        .map(|section| format!("{}\n{}", section.heading, render_body(section, record)))
        .collect();

    if let Some(custom) = record.custom_context.as_deref().map(str::trim)
        && !custom.is_empty()
    {
        sections.push(format!("{}\n{}", ADDITIONAL_CONTEXT_HEADING, custom));
    }

    sections.join("\n\n")
}

fn render_body(section: &SectionDescriptor, record: &AgentPromptRecord) -> String {
    let whole_body = section.whole_body_placeholder();

    let mut vars = HashMap::new();
    for name in placeholders(section.body) {
        let value = match name.as_str() {
            RULES => format_rules(&record.rules),
            QUESTIONS => format_questions(&record.questions),
            other if whole_body.as_deref() == Some(other) => record.value_of(other).trim().to_string(),
            other => record.value_of(other).to_string(),
        };
        vars.insert(name, value);
    }

    render_template(section.body, &vars).unwrap_or_else(|err| {
        tracing::warn!(section = %section.key, error = %err, "template body did not render");
        section.body.to_string()
    })
}
