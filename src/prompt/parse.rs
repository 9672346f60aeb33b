//! Extractor: prompt text back to a structured record.
//!
//! Parsing is best-effort. Sections are located by their heading lines, list
//! sections are split on numbered markers, and scalar values are recovered
//! only at the placeholder positions the body template defines. Anything that
//! cannot be located defaults to its zero value and is reported on the
//! [`Extraction`] so the editor can warn about degraded fidelity.
//!
//! # Heading lines
//!
//! A heading matches when the line, with trailing whitespace removed, equals
//! a known heading ignoring ASCII case. Headings must start at column 0;
//! indented lines are always content.

use super::list::{parse_questions, parse_rules};
use super::record::AgentPromptRecord;
use super::registry::{
    ADDITIONAL_CONTEXT_HEADING, PromptVariant, QUESTIONS, RULES, SectionDescriptor, SectionKey,
    SectionKind, TemplateDescriptor, TemplateRegistry,
};
use super::template::{Segment, tokenize};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Result of parsing prompt text, with fidelity diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub record: AgentPromptRecord,
    /// The variant whose template was used.
    pub variant: PromptVariant,
    /// Template sections whose heading was not found.
    pub missing_sections: Vec<SectionKey>,
    /// Scalar placeholders that could not be recovered from any occurrence.
    pub unresolved_placeholders: Vec<String>,
}

impl Extraction {
    /// Whether every section and placeholder was recovered.
    pub fn is_complete(&self) -> bool {
        self.missing_sections.is_empty() && self.unresolved_placeholders.is_empty()
    }

    /// Human-readable fidelity warnings, one per problem.
    pub fn warnings(&self) -> Vec<String> {
        let template = TemplateRegistry::get_template(self.variant);
        let mut warnings: Vec<String> = self
            .missing_sections
            .iter()
            .map(|key| {
                let heading = template.section(*key).map(|s| s.heading).unwrap_or("?");
                format!("section '{}' not found; {} left empty", heading, key)
            })
            .collect();
        warnings.extend(
            self.unresolved_placeholders
                .iter()
                .map(|name| format!("placeholder '{}' could not be recovered", name)),
        );
        warnings
    }
}

/// Parse prompt text into a record.
///
/// With no hint, the variant whose headings best match the text is used.
/// Never fails: unrecognised text yields an empty record.
pub fn parse(text: &str, variant_hint: Option<PromptVariant>) -> AgentPromptRecord {
    parse_detailed(text, variant_hint).record
}

/// Parse prompt text and report what could not be recovered.
pub fn parse_detailed(text: &str, variant_hint: Option<PromptVariant>) -> Extraction {
    let variant = variant_hint.unwrap_or_else(|| detect_variant(text));
    let template = TemplateRegistry::get_template(variant);
    let sections = split_sections(text, template);

    let mut record = AgentPromptRecord::default();
    let mut resolved: HashMap<String, String> = HashMap::new();
    let mut missing_sections = Vec::new();

    for section in &template.sections {
        let Some(body) = sections.get(&section.key) else {
            missing_sections.push(section.key);
            continue;
        };

        match section.kind {
            SectionKind::List => match section.whole_body_placeholder().as_deref() {
                Some(RULES) => record.rules = parse_rules(body),
                Some(QUESTIONS) => record.questions = parse_questions(body),
                other => tracing::warn!(
                    section = %section.key,
                    placeholder = ?other,
                    "list section has no list placeholder"
                ),
            },
            SectionKind::Scalar => {
                for (name, value) in match_body(section, body.trim()) {
                    resolved.entry(name).or_insert(value);
                }
            }
        }
    }

    let mut unresolved_placeholders = Vec::new();
    for name in &template.placeholders {
        if name == RULES || name == QUESTIONS {
            continue;
        }
        match resolved.remove(name) {
            Some(value) if template.extra_placeholders().contains(&name.as_str()) => {
                if !value.is_empty() {
                    record.extras.insert(name.clone(), value);
                }
            }
            Some(value) => record.set_value(name, value),
            None => unresolved_placeholders.push(name.clone()),
        }
    }

    if let Some(custom) = sections.get(&SectionKey::AdditionalContext) {
        let custom = custom.trim();
        if !custom.is_empty() {
            record.custom_context = Some(custom.to_string());
        }
    }

    let extraction = Extraction {
        record,
        variant,
        missing_sections,
        unresolved_placeholders,
    };

    if !extraction.is_complete() {
        for warning in extraction.warnings() {
            tracing::warn!(variant = %variant, "{}", warning);
        }
    }

    extraction
}

/// Pick the variant whose template best matches the text.
///
/// Variants are scored by headings found, then by literal body fragments
/// found, then by fewest missing headings. Ties go to the earlier variant in
/// registry order.
pub fn detect_variant(text: &str) -> PromptVariant {
    let headings = heading_lines(text);

    let mut best: Option<(PromptVariant, (usize, usize, Reverse<usize>))> = None;
    for template in TemplateRegistry::all() {
        let found = template
            .sections
            .iter()
            .filter(|s| headings.contains(&s.heading.to_ascii_lowercase()))
            .count();
        let fragments = template
            .sections
            .iter()
            .flat_map(SectionDescriptor::literal_fragments)
            .filter(|fragment| text.contains(fragment.as_str()))
            .count();
        let score = (found, fragments, Reverse(template.sections.len() - found));

        tracing::debug!(variant = %template.variant, found, fragments, "scored variant");
        if best.as_ref().is_none_or(|(_, best_score)| score > *best_score) {
            best = Some((template.variant, score));
        }
    }

    best.map(|(variant, _)| variant).unwrap_or_default()
}

fn heading_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| line.starts_with('#'))
        .map(|line| line.trim_end().to_ascii_lowercase())
        .collect()
}

/// Split text into section bodies keyed by section.
///
/// Text before the first heading is discarded. A repeated heading starts a
/// section whose body is discarded; the first occurrence wins.
fn split_sections(text: &str, template: &TemplateDescriptor) -> HashMap<SectionKey, String> {
    let mut known: Vec<(String, SectionKey)> = template
        .sections
        .iter()
        .map(|s| (s.heading.to_ascii_lowercase(), s.key))
        .collect();
    known.push((
        ADDITIONAL_CONTEXT_HEADING.to_ascii_lowercase(),
        SectionKey::AdditionalContext,
    ));

    let mut sections: HashMap<SectionKey, String> = HashMap::new();
    let mut current: Option<SectionKey> = None;
    let mut content: Vec<&str> = Vec::new();

    for line in text.lines() {
        let heading = line.trim_end().to_ascii_lowercase();
        if let Some((_, key)) = known.iter().find(|(h, _)| *h == heading) {
            flush_section(&mut sections, current.take(), &mut content);
            current = Some(*key);
        } else if current.is_some() {
            content.push(line);
        }
    }
    flush_section(&mut sections, current, &mut content);

    sections
}

fn flush_section(
    sections: &mut HashMap<SectionKey, String>,
    key: Option<SectionKey>,
    content: &mut Vec<&str>,
) {
    if let Some(key) = key {
        if sections.contains_key(&key) {
            tracing::debug!(section = %key, "ignoring repeated section");
        } else {
            sections.insert(key, content.join("\n"));
        }
    }
    content.clear();
}

/// Recover placeholder values from a trimmed scalar section body.
///
/// A one-placeholder body takes the whole text. Otherwise literals anchor the
/// values between them; the first occurrence of a placeholder wins and later
/// occurrences are skipped. Matching stops at the first literal that cannot
/// be found, leaving the remaining placeholders unresolved.
fn match_body(section: &SectionDescriptor, text: &str) -> Vec<(String, String)> {
    if let Some(name) = section.whole_body_placeholder() {
        return vec![(name, text.to_string())];
    }

    let segments = match tokenize(section.body) {
        Ok(segments) => segments,
        Err(err) => {
            tracing::warn!(section = %section.key, error = %err, "template body did not parse");
            return Vec::new();
        }
    };

    let mut values: Vec<(String, String)> = Vec::new();
    let mut pos = 0;

    for (i, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Literal(literal) => match text[pos..].find(literal.as_str()) {
                Some(offset) => pos += offset + literal.len(),
                None => {
                    tracing::debug!(section = %section.key, literal, "template anchor not found");
                    break;
                }
            },
            Segment::Placeholder { name, .. } => {
                let end = match segments.get(i + 1) {
                    // The closing literal anchors to the end of the body.
                    Some(Segment::Literal(last))
                        if i + 2 == segments.len() && text[pos..].ends_with(last.as_str()) =>
                    {
                        text.len() - last.len()
                    }
                    Some(Segment::Literal(next)) => match text[pos..].find(next.as_str()) {
                        Some(offset) => pos + offset,
                        None => {
                            tracing::debug!(section = %section.key, placeholder = %name, "value end not found");
                            break;
                        }
                    },
                    Some(Segment::Placeholder { .. }) => pos,
                    None => text.len(),
                };

                if !values.iter().any(|(n, _)| n == name) {
                    values.push((name.clone(), text[pos..end].to_string()));
                }
                pos = end;
            }
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Question, render};

    fn elias() -> AgentPromptRecord {
        AgentPromptRecord {
            agent_name: "Elias".to_string(),
            program_name: "Demo".to_string(),
            rules: vec!["Be kind".to_string()],
            questions: vec![Question {
                id: "1".to_string(),
                title: Some("Q1".to_string()),
                text: "What worked?".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_elias_scenario_parses_back() {
        let prompt = render(&elias(), PromptVariant::Nuggets);
        let record = parse(&prompt, None);

        assert_eq!(record.agent_name, "Elias");
        assert_eq!(record.program_name, "Demo");
        assert_eq!(record.rules, vec!["Be kind"]);
        assert_eq!(record.questions.len(), 1);
        assert_eq!(record.questions[0].title.as_deref(), Some("Q1"));
        assert_eq!(record.questions[0].text, "What worked?");
        assert_ne!(record.questions[0].id, "1");
    }

    #[test]
    fn test_parse_empty_text() {
        let extraction = parse_detailed("", None);

        assert_eq!(extraction.variant, PromptVariant::Nuggets);
        assert!(extraction.record.same_content(&AgentPromptRecord::default()));
        assert_eq!(extraction.missing_sections.len(), 6);
        assert!(!extraction.is_complete());
    }

    #[test]
    fn test_parse_unrelated_text() {
        let record = parse("Dear diary,\n1. today was fine\n# Not a heading", None);
        assert!(record.same_content(&AgentPromptRecord::default()));
    }

    #[test]
    fn test_parse_is_total_on_odd_input() {
        let inputs = [
            "# Objective",
            "# Objective\n",
            "# Rules\n1.",
            "# Questions\n1. **\n**:",
            "# Objective\nYou are an AI journalist named \"",
            "# objective\n\u{0}\u{feff}",
            "\n\n\n",
            "# Questions\n**Q**:\n\"orphan\"",
        ];
        for input in inputs {
            let _ = parse_detailed(input, None);
            for variant in PromptVariant::ALL {
                let _ = parse_detailed(input, Some(variant));
            }
        }
    }

    #[test]
    fn test_detect_variant() {
        let record = elias();
        for variant in PromptVariant::ALL {
            let prompt = render(&record, variant);
            assert_eq!(detect_variant(&prompt), variant);
        }
    }

    #[test]
    fn test_hint_overrides_detection() {
        let prompt = render(&elias(), PromptVariant::Nuggets);
        let extraction = parse_detailed(&prompt, Some(PromptVariant::Lightbulbs));

        assert_eq!(extraction.variant, PromptVariant::Lightbulbs);
        assert!(extraction.record.rules.is_empty());
        assert!(
            extraction
                .missing_sections
                .contains(&SectionKey::Rules)
        );
    }

    #[test]
    fn test_headings_are_case_insensitive_at_column_zero() {
        let text = "# RULES\n1. A\n\n # Questions\n2. B";
        let record = parse(text, Some(PromptVariant::Nuggets));
        assert_eq!(record.rules, vec!["A\n\n# Questions", "B"]);
        assert!(record.questions.is_empty());
    }

    #[test]
    fn test_repeated_heading_first_wins() {
        let text = "# Style\nCalm.\n\n# Style\nLoud.";
        let record = parse(text, Some(PromptVariant::Nuggets));
        assert_eq!(record.style, "Calm.");
    }

    #[test]
    fn test_leading_material_discarded() {
        let text = "Some preamble\nthat nobody asked for\n# Context\nA workshop.";
        let record = parse(text, Some(PromptVariant::Nuggets));
        assert_eq!(record.program_context, "A workshop.");
    }

    #[test]
    fn test_deleted_placeholder_defaults_to_empty() {
        let prompt = render(&elias(), PromptVariant::Nuggets).replace(
            "You are an AI journalist named \"Elias\".",
            "You are a reporter.",
        );
        let extraction = parse_detailed(&prompt, Some(PromptVariant::Nuggets));

        // The greeting is not used as a second source for the name.
        assert_eq!(extraction.record.agent_name, "");
        assert!(
            extraction
                .unresolved_placeholders
                .contains(&"agent_name".to_string())
        );
    }

    #[test]
    fn test_closing_supplies_value_when_objective_missing() {
        let prompt = render(
            &AgentPromptRecord {
                teacher_name: "Ada".to_string(),
                ..elias()
            },
            PromptVariant::Nuggets,
        );
        let closing = &prompt[prompt.find("# Closing").unwrap()..];
        let record = parse(closing, Some(PromptVariant::Nuggets));

        assert_eq!(record.teacher_name, "Ada");
        assert_eq!(record.program_name, "Demo");
        assert_eq!(record.agent_name, "");
    }

    #[test]
    fn test_trailing_value_anchors_to_closing_literal() {
        let record = AgentPromptRecord {
            teacher_name: "Dr. Ada Byron".to_string(),
            ..elias()
        };
        let prompt = render(&record, PromptVariant::Lightbulbs);
        let wrap_up = &prompt[prompt.find("# Wrap-up").unwrap()..];

        let parsed = parse(wrap_up, Some(PromptVariant::Lightbulbs));
        assert_eq!(parsed.teacher_name, "Dr. Ada Byron");
    }

    #[test]
    fn test_hand_edited_rules_and_questions() {
        let text = "# Rules\nPlease follow:\n1. Listen\n2. Ask\n   politely\n\n# Questions\n1. **Start**:\n   \"How are you?\"\n2. What next?\n3. **Note**: plain text";
        let record = parse(text, Some(PromptVariant::Nuggets));

        assert_eq!(record.rules, vec!["Listen", "Ask\npolitely"]);
        assert_eq!(record.questions.len(), 3);
        assert_eq!(record.questions[0].title.as_deref(), Some("Start"));
        assert_eq!(record.questions[0].text, "How are you?");
        assert_eq!(record.questions[1].text, "What next?");
        assert_eq!(record.questions[2].title, None);
        assert_eq!(record.questions[2].text, "**Note**: plain text");
    }

    #[test]
    fn test_additional_context_parsed() {
        let record = AgentPromptRecord {
            custom_context: Some("Room 4B.\nBring a laptop.".to_string()),
            ..elias()
        };
        let parsed = parse(&render(&record, PromptVariant::Nuggets), None);
        assert_eq!(parsed.custom_context.as_deref(), Some("Room 4B.\nBring a laptop."));
    }

    #[test]
    fn test_nexus_extras_recovered() {
        let mut record = elias();
        record
            .extras
            .insert("company_name".to_string(), "Acme".to_string());
        record
            .extras
            .insert("context_location".to_string(), "on the factory floor".to_string());

        let parsed = parse(&render(&record, PromptVariant::Nexus), None);
        assert_eq!(parsed.extras, record.extras);
    }

    #[test]
    fn test_parsed_record_is_never_raw() {
        let record = parse("# Objective\nanything", None);
        assert!(record.raw_prompt.is_none());
    }

    #[test]
    fn test_warnings_name_missing_headings() {
        let extraction = parse_detailed("# Style\nCalm.", Some(PromptVariant::Nuggets));
        let warnings = extraction.warnings();
        assert!(warnings.iter().any(|w| w.contains("'# Rules'")));
        assert!(!warnings.iter().any(|w| w.contains("'# Style'")));
    }
}
