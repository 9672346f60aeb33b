//! Template registry: one canonical template per agent variant.
//!
//! A template is an ordered list of sections. Each section has a stable
//! [`SectionKey`], a heading line that appears verbatim in rendered prompts,
//! a [`SectionKind`], and a body template written in the `{placeholder}`
//! syntax of [`super::template`]. The renderer and the extractor both read
//! the same descriptors, which is what keeps the two directions in step.
//!
//! Body templates follow one shape rule so that trimming a section body never
//! eats into a value: a body is either exactly one placeholder, or it starts
//! and ends with literal text.

use super::record::{AgentPromptRecord, Question};
use super::template::{Segment, placeholders, tokenize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Placeholder for the agent's display name.
pub const AGENT_NAME: &str = "agent_name";
/// Placeholder for the program (workshop) name.
pub const PROGRAM_NAME: &str = "program_name";
/// Placeholder for the teacher's name.
pub const TEACHER_NAME: &str = "teacher_name";
/// Placeholder for the free-text program description.
pub const PROGRAM_CONTEXT: &str = "program_context";
/// Placeholder for the communication style paragraph.
pub const STYLE: &str = "style";
/// Placeholder for the numbered rules list.
pub const RULES: &str = "rules";
/// Placeholder for the numbered questions list.
pub const QUESTIONS: &str = "questions";
/// Placeholder for the partner company (nexus variant).
pub const COMPANY_NAME: &str = "company_name";
/// Placeholder for where the conversations take place (nexus variant).
pub const CONTEXT_LOCATION: &str = "context_location";

/// Heading of the trailing free-form section appended for `custom_context`.
pub const ADDITIONAL_CONTEXT_HEADING: &str = "# Additional Context";

/// Agent variant, each owning exactly one template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PromptVariant {
    /// Collects concrete stories and lessons ("nuggets").
    #[default]
    Nuggets,
    /// Collects ideas and realisations ("lightbulb moments").
    Lightbulbs,
    /// Partner-specific nuggets agent with company and location placeholders.
    Nexus,
}

impl PromptVariant {
    /// All variants in registry order.
    pub const ALL: [PromptVariant; 3] = [Self::Nuggets, Self::Lightbulbs, Self::Nexus];

    /// Parse a variant from a string.
    ///
    /// Matching ignores case and surrounding whitespace. Unknown names return
    /// `None` so callers can fall back to the default variant.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nuggets" => Some(Self::Nuggets),
            "lightbulbs" => Some(Self::Lightbulbs),
            "nexus" => Some(Self::Nexus),
            _ => None,
        }
    }

    /// The variant's canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nuggets => "nuggets",
            Self::Lightbulbs => "lightbulbs",
            Self::Nexus => "nexus",
        }
    }
}

impl fmt::Display for PromptVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identity of a template section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Objective,
    Partner,
    Context,
    Style,
    Rules,
    Questions,
    Closing,
    /// Synthetic trailing section for `custom_context`.
    AdditionalContext,
}

impl SectionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Objective => "objective",
            Self::Partner => "partner",
            Self::Context => "context",
            Self::Style => "style",
            Self::Rules => "rules",
            Self::Questions => "questions",
            Self::Closing => "closing",
            Self::AdditionalContext => "additional_context",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a section holds a single value or a numbered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Scalar,
    List,
}

/// One section of a variant's template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDescriptor {
    pub key: SectionKey,
    /// Heading line as it appears in the rendered prompt, e.g. `# Rules`.
    pub heading: &'static str,
    pub kind: SectionKind,
    /// Body template in `{placeholder}` syntax.
    pub body: &'static str,
}

impl SectionDescriptor {
    /// The placeholder name when the body is exactly one placeholder.
    pub fn whole_body_placeholder(&self) -> Option<String> {
        match tokenize(self.body) {
            Ok(segments) => match segments.as_slice() {
                [Segment::Placeholder { name, .. }] => Some(name.clone()),
                _ => None,
            },
            Err(_) => None,
        }
    }

    /// Literal fragments of the body, trimmed and non-empty.
    pub fn literal_fragments(&self) -> Vec<String> {
        tokenize(self.body)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Literal(text) => {
                    let text = text.trim();
                    (!text.is_empty()).then(|| text.to_string())
                }
                Segment::Placeholder { .. } => None,
            })
            .collect()
    }
}

/// The complete template of one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub variant: PromptVariant,
    /// Short human-readable description of the agent.
    pub description: &'static str,
    /// Sections in render order.
    pub sections: Vec<SectionDescriptor>,
    /// Distinct placeholders referenced anywhere in the template, in order.
    pub placeholders: Vec<String>,
}

impl TemplateDescriptor {
    fn new(
        variant: PromptVariant,
        description: &'static str,
        sections: Vec<SectionDescriptor>,
    ) -> Self {
        let mut names: Vec<String> = Vec::new();
        for section in &sections {
            for name in placeholders(section.body) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }

        Self {
            variant,
            description,
            sections,
            placeholders: names,
        }
    }

    /// Look up a section by key.
    pub fn section(&self, key: SectionKey) -> Option<&SectionDescriptor> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Placeholders that are not part of the shared record fields.
    pub fn extra_placeholders(&self) -> Vec<&str> {
        self.placeholders
            .iter()
            .map(String::as_str)
            .filter(|name| !is_core_placeholder(name))
            .collect()
    }

    /// The template as a single string: every heading followed by its body.
    pub fn template_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| format!("{}\n{}", s.heading, s.body))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Whether a placeholder maps onto a named [`AgentPromptRecord`] field.
pub fn is_core_placeholder(name: &str) -> bool {
    matches!(
        name,
        AGENT_NAME | PROGRAM_NAME | TEACHER_NAME | PROGRAM_CONTEXT | STYLE | RULES | QUESTIONS
    )
}

/// A selectable communication style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StylePreset {
    pub key: &'static str,
    pub label: &'static str,
    pub text: &'static str,
}

const STYLE_PRESETS: [StylePreset; 4] = [
    StylePreset {
        key: "friendly",
        label: "Friendly",
        text: "Warm, relaxed and encouraging. Use simple language, first names and the occasional light remark, but never make fun of an answer.",
    },
    StylePreset {
        key: "professional",
        label: "Professional",
        text: "Polite, clear and to the point. Use complete sentences and neutral wording, and avoid slang or emojis.",
    },
    StylePreset {
        key: "curious",
        label: "Curious",
        text: "Genuinely interested and inquisitive. Show that you are listening by referring back to earlier answers and asking for the story behind them.",
    },
    StylePreset {
        key: "concise",
        label: "Concise",
        text: "Brief and efficient. Keep every message to one or two sentences and move on as soon as an answer is complete.",
    },
];

const NUGGETS_OBJECTIVE: &str = "You are an AI journalist named \"{agent_name}\". You interview participants of the {program_name} program, led by {teacher_name}, to collect \"nuggets\": short, concrete stories and lessons from their own experience that other participants can learn from.\n\nOpen every conversation with a warm greeting such as: \"Hi, I'm {agent_name}! Thanks for taking a few minutes to share your experience.\"";

const NUGGETS_CLOSING: &str = "When every question has been answered, summarise the nuggets you collected in two or three sentences and thank the participant. For example: \"Thank you! I'll pass these nuggets on to {teacher_name} and the {program_name} team.\"";

const LIGHTBULBS_MISSION: &str = "You are \"{agent_name}\", an AI journalist who helps participants of {program_name} capture their lightbulb moments: the ideas, insights and sudden realisations they had during the workshop with {teacher_name}.\n\nIntroduce yourself briefly, for example: \"Hello, I'm {agent_name}. I'd love to hear what clicked for you today.\"";

const LIGHTBULBS_WRAP_UP: &str = "Close by reading back the lightbulb moments you heard, ask whether anything is missing, and thank the participant on behalf of {teacher_name}.";

const NEXUS_OBJECTIVE: &str = "You are an AI journalist named \"{agent_name}\", interviewing participants of the {program_name} program run by {teacher_name} for {company_name}. Your goal is to collect \"nuggets\": practical insights that {company_name} can reuse across its teams.\n\nOpen every conversation with a greeting such as: \"Hi, I'm {agent_name} from the {program_name} team.\"";

const NEXUS_PARTNER: &str = "The conversations take place {context_location}. Keep this setting in mind when you ask for examples, and never share details about {company_name} outside this interview.";

fn section(
    key: SectionKey,
    heading: &'static str,
    kind: SectionKind,
    body: &'static str,
) -> SectionDescriptor {
    SectionDescriptor {
        key,
        heading,
        kind,
        body,
    }
}

fn build_registry() -> Vec<TemplateDescriptor> {
    use SectionKey::*;
    use SectionKind::{List, Scalar};

    vec![
        TemplateDescriptor::new(
            PromptVariant::Nuggets,
            "Interviews participants and collects concrete stories and lessons.",
            vec![
                section(Objective, "# Objective", Scalar, NUGGETS_OBJECTIVE),
                section(Context, "# Context", Scalar, "{program_context}"),
                section(Style, "# Style", Scalar, "{style}"),
                section(Rules, "# Rules", List, "{rules}"),
                section(Questions, "# Questions", List, "{questions}"),
                section(Closing, "# Closing", Scalar, NUGGETS_CLOSING),
            ],
        ),
        TemplateDescriptor::new(
            PromptVariant::Lightbulbs,
            "Helps participants capture the ideas and realisations they had.",
            vec![
                section(Objective, "# Mission", Scalar, LIGHTBULBS_MISSION),
                section(Context, "# Workshop Context", Scalar, "{program_context}"),
                section(Style, "# Tone", Scalar, "{style}"),
                section(Rules, "# Ground Rules", List, "{rules}"),
                section(Questions, "# Interview Questions", List, "{questions}"),
                section(Closing, "# Wrap-up", Scalar, LIGHTBULBS_WRAP_UP),
            ],
        ),
        TemplateDescriptor::new(
            PromptVariant::Nexus,
            "Nuggets interviewer run on behalf of a partner company.",
            vec![
                section(Objective, "# Objective", Scalar, NEXUS_OBJECTIVE),
                section(Partner, "# Partner", Scalar, NEXUS_PARTNER),
                section(Context, "# Context", Scalar, "{program_context}"),
                section(Style, "# Style", Scalar, "{style}"),
                section(Rules, "# Rules", List, "{rules}"),
                section(Questions, "# Questions", List, "{questions}"),
                section(Closing, "# Closing", Scalar, NUGGETS_CLOSING),
            ],
        ),
    ]
}

static REGISTRY: LazyLock<Vec<TemplateDescriptor>> = LazyLock::new(build_registry);

/// Read-only access to the built-in templates.
pub struct TemplateRegistry;

impl TemplateRegistry {
    /// Every template in registry order.
    pub fn all() -> &'static [TemplateDescriptor] {
        &REGISTRY
    }

    /// The template of a known variant.
    pub fn get_template(variant: PromptVariant) -> &'static TemplateDescriptor {
        REGISTRY
            .iter()
            .find(|t| t.variant == variant)
            .unwrap_or(&REGISTRY[0])
    }

    /// Look up a template by variant name; `None` when the name is unknown.
    pub fn lookup(name: &str) -> Option<&'static TemplateDescriptor> {
        PromptVariant::from_str(name).map(Self::get_template)
    }

    /// Look up a template by name, falling back to the default variant.
    pub fn resolve(name: &str) -> &'static TemplateDescriptor {
        Self::lookup(name).unwrap_or_else(|| {
            tracing::warn!(
                variant = name,
                fallback = %PromptVariant::default(),
                "unknown prompt variant, using default"
            );
            Self::get_template(PromptVariant::default())
        })
    }

    /// The fixed list of style presets offered by the editors.
    pub fn style_presets() -> &'static [StylePreset] {
        &STYLE_PRESETS
    }

    /// Find a style preset by key.
    pub fn style_preset(key: &str) -> Option<&'static StylePreset> {
        STYLE_PRESETS.iter().find(|p| p.key == key)
    }

    /// A fresh record with the variant's default configuration.
    ///
    /// Question ids are newly generated on every call.
    pub fn default_record(variant: PromptVariant) -> AgentPromptRecord {
        match variant {
            PromptVariant::Nuggets => AgentPromptRecord {
                agent_name: "Nuggets".to_string(),
                style: STYLE_PRESETS[0].text.to_string(),
                rules: strings(&NUGGETS_RULES),
                questions: questions(&NUGGETS_QUESTIONS),
                ..Default::default()
            },
            PromptVariant::Lightbulbs => AgentPromptRecord {
                agent_name: "Lightbulbs".to_string(),
                style: STYLE_PRESETS[2].text.to_string(),
                rules: strings(&LIGHTBULBS_RULES),
                questions: questions(&LIGHTBULBS_QUESTIONS),
                ..Default::default()
            },
            PromptVariant::Nexus => {
                let mut record = AgentPromptRecord {
                    agent_name: "Nexus".to_string(),
                    style: STYLE_PRESETS[1].text.to_string(),
                    rules: strings(&NUGGETS_RULES),
                    questions: questions(&NUGGETS_QUESTIONS),
                    ..Default::default()
                };
                record
                    .extras
                    .insert(CONTEXT_LOCATION.to_string(), "during the workshop".to_string());
                record
            }
        }
    }
}

const NUGGETS_RULES: [&str; 5] = [
    "Ask one question at a time and wait for the answer before moving on.",
    "Keep your messages short: no more than three sentences.",
    "If an answer is vague, ask one follow-up question for a concrete example.",
    "Never judge or grade the participant's answers.",
    "Stay on topic and politely steer back to the interview if the conversation drifts.",
];

const NUGGETS_QUESTIONS: [(&str, &str); 3] = [
    (
        "Highlight",
        "What was the most valuable thing you learned in this program?",
    ),
    (
        "Application",
        "Can you describe a situation where you already applied it?",
    ),
    (
        "Advice",
        "What advice would you give to someone starting the program?",
    ),
];

const LIGHTBULBS_RULES: [&str; 4] = [
    "Be curious and encouraging.",
    "Ask one question at a time.",
    "Paraphrase each idea back to the participant to confirm you understood it.",
    "Do not suggest ideas yourself; the insights must come from the participant.",
];

const LIGHTBULBS_QUESTIONS: [(&str, &str); 3] = [
    (
        "Moment",
        "When did something suddenly click for you during the workshop?",
    ),
    ("Idea", "Which idea would you like to try out first, and why?"),
    (
        "Obstacle",
        "What might stop you from putting it into practice?",
    ),
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn questions(items: &[(&str, &str)]) -> Vec<Question> {
    items
        .iter()
        .map(|(title, text)| Question::new(Some(title.to_string()), text.to_string()))
        .collect()
}
