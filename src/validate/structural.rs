//! Structural checks that need no language model.

use super::{PromptValidator, ValidationReport};
use crate::prompt::{PromptVariant, parse_detailed};

/// Checks that a prompt still has the shape of its template.
///
/// A prompt is invalid when it is empty, has lost template sections, has no
/// agent name, or asks no questions. Unresolved placeholders only produce
/// suggestions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator {
    /// Variant to check against; detected from the text when `None`.
    pub variant: Option<PromptVariant>,
}

impl StructuralValidator {
    pub fn new(variant: Option<PromptVariant>) -> Self {
        Self { variant }
    }
}

impl PromptValidator for StructuralValidator {
    fn validate(&self, prompt: &str) -> ValidationReport {
        if prompt.trim().is_empty() {
            return ValidationReport {
                valid: false,
                feedback: "The prompt is empty.".to_string(),
                suggestions: vec!["Start from the default template for this agent.".to_string()],
            };
        }

        let extraction = parse_detailed(prompt, self.variant);
        let record = &extraction.record;
        let mut problems = Vec::new();
        let mut suggestions = Vec::new();

        if !extraction.missing_sections.is_empty() {
            let keys: Vec<_> = extraction
                .missing_sections
                .iter()
                .map(|k| k.as_str())
                .collect();
            problems.push(format!("missing sections: {}", keys.join(", ")));
            suggestions.push(
                "Restore the missing section headings so the editor can read them.".to_string(),
            );
        }

        if record.agent_name.trim().is_empty() {
            problems.push("no agent name".to_string());
            suggestions.push("Give the agent a name so participants know who they talk to.".to_string());
        }

        if record.questions.is_empty() {
            problems.push("no interview questions".to_string());
            suggestions.push("Add at least one interview question.".to_string());
        }

        for name in &extraction.unresolved_placeholders {
            suggestions.push(format!("Check the text around '{}'; it could not be read back.", name));
        }

        if problems.is_empty() {
            let mut report = ValidationReport::pass(format!(
                "Prompt matches the {} template with {} rules and {} questions.",
                extraction.variant,
                record.rules.len(),
                record.questions.len()
            ));
            report.suggestions = suggestions;
            return report;
        }

        ValidationReport {
            valid: false,
            feedback: format!("The prompt has problems: {}.", problems.join("; ")),
            suggestions,
        }
    }
}
