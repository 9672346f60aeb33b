//! The structured side of the compiler: agent prompt records.

use super::registry::{AGENT_NAME, PROGRAM_CONTEXT, PROGRAM_NAME, STYLE, TEACHER_NAME};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured configuration of one agent.
///
/// Field names are camelCase on the wire so records exchanged with the
/// editors keep their existing shape. Every field is optional when
/// deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentPromptRecord {
    /// Display name injected at every `{agent_name}` occurrence.
    pub agent_name: String,
    pub program_name: String,
    pub teacher_name: String,
    /// Free-text description of the program.
    pub program_context: String,
    /// One paragraph describing tone, preset or freely edited.
    pub style: String,
    /// Ordered rules; numbering comes from position.
    pub rules: Vec<String>,
    /// Ordered interview questions.
    pub questions: Vec<Question>,
    /// Appended as a trailing `# Additional Context` section when non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_context: Option<String>,
    /// When set, RawOverride mode is active and this text is the prompt.
    pub raw_prompt: Option<String>,
    /// Values for variant-specific placeholders such as `company_name`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
}

/// One interview question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier for list operations in the editors. Never rendered.
    #[serde(default = "new_question_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub text: String,
}

/// Generate a fresh question identifier.
pub fn new_question_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Question {
    /// Create a question with a freshly generated id.
    pub fn new(title: Option<String>, text: impl Into<String>) -> Self {
        Self {
            id: new_question_id(),
            title,
            text: text.into(),
        }
    }

    /// The title, if present and not blank.
    pub fn display_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Blank questions are never rendered.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Compare title and text, ignoring the id.
    pub fn same_content(&self, other: &Question) -> bool {
        self.display_title() == other.display_title() && self.text == other.text
    }
}

impl AgentPromptRecord {
    /// Whether RawOverride mode is active.
    pub fn is_raw(&self) -> bool {
        self.raw_prompt.is_some()
    }

    /// The value for a scalar placeholder. Unknown names read from `extras`.
    pub fn value_of(&self, placeholder: &str) -> &str {
        match placeholder {
            AGENT_NAME => &self.agent_name,
            PROGRAM_NAME => &self.program_name,
            TEACHER_NAME => &self.teacher_name,
            PROGRAM_CONTEXT => &self.program_context,
            STYLE => &self.style,
            other => self.extras.get(other).map(String::as_str).unwrap_or(""),
        }
    }

    /// Set a scalar placeholder value. Unknown names write to `extras`.
    pub fn set_value(&mut self, placeholder: &str, value: impl Into<String>) {
        let value = value.into();
        match placeholder {
            AGENT_NAME => self.agent_name = value,
            PROGRAM_NAME => self.program_name = value,
            TEACHER_NAME => self.teacher_name = value,
            PROGRAM_CONTEXT => self.program_context = value,
            STYLE => self.style = value,
            other => {
                self.extras.insert(other.to_string(), value);
            }
        }
    }

    /// Append a rule.
    pub fn add_rule(&mut self, rule: impl Into<String>) {
        self.rules.push(rule.into());
    }

    /// Remove the rule at `index`, returning it.
    pub fn remove_rule(&mut self, index: usize) -> Option<String> {
        (index < self.rules.len()).then(|| self.rules.remove(index))
    }

    /// Move a rule to a new position. Returns false when either index is out of range.
    pub fn move_rule(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.rules, from, to)
    }

    /// Append a question and return its id.
    pub fn add_question(&mut self, title: Option<String>, text: impl Into<String>) -> String {
        let question = Question::new(title, text);
        let id = question.id.clone();
        self.questions.push(question);
        id
    }

    /// Remove the question with the given id.
    pub fn remove_question(&mut self, id: &str) -> Option<Question> {
        let index = self.questions.iter().position(|q| q.id == id)?;
        Some(self.questions.remove(index))
    }

    /// Move the question with the given id to position `to`.
    pub fn move_question(&mut self, id: &str, to: usize) -> bool {
        match self.questions.iter().position(|q| q.id == id) {
            Some(from) => move_item(&mut self.questions, from, to),
            None => false,
        }
    }

    /// Compare two records ignoring question ids.
    ///
    /// Parsing always assigns fresh ids, so this is the equality that matters
    /// after a text round-trip.
    pub fn same_content(&self, other: &AgentPromptRecord) -> bool {
        self.agent_name == other.agent_name
            && self.program_name == other.program_name
            && self.teacher_name == other.teacher_name
            && self.program_context == other.program_context
            && self.style == other.style
            && self.rules == other.rules
            && self.custom_context == other.custom_context
            && self.raw_prompt == other.raw_prompt
            && self.extras == other.extras
            && self.questions.len() == other.questions.len()
            && self
                .questions
                .iter()
                .zip(&other.questions)
                .all(|(a, b)| a.same_content(b))
    }
}

fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_rules(rules: &[&str]) -> AgentPromptRecord {
        AgentPromptRecord {
            rules: rules.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_deserialize_partial_record() {
        let yaml = r#"
agentName: Elias
rules:
  - Be kind
questions:
  - title: Q1
    text: What worked?
"#;
        let record: AgentPromptRecord = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(record.agent_name, "Elias");
        assert_eq!(record.program_name, "");
        assert_eq!(record.rules, vec!["Be kind"]);
        assert_eq!(record.questions[0].title.as_deref(), Some("Q1"));
        assert!(!record.questions[0].id.is_empty());
        assert!(record.raw_prompt.is_none());
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let record = AgentPromptRecord {
            agent_name: "Elias".to_string(),
            raw_prompt: Some("X".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["agentName"], "Elias");
        assert_eq!(json["rawPrompt"], "X");
        assert!(json.get("customContext").is_none());
        assert!(json.get("extras").is_none());
    }

    #[test]
    fn test_value_of_and_set_value() {
        let mut record = AgentPromptRecord::default();
        record.set_value(AGENT_NAME, "Elias");
        record.set_value("company_name", "Acme");

        assert_eq!(record.agent_name, "Elias");
        assert_eq!(record.value_of(AGENT_NAME), "Elias");
        assert_eq!(record.value_of("company_name"), "Acme");
        assert_eq!(record.value_of("context_location"), "");
    }

    #[test]
    fn test_rule_operations_preserve_order() {
        let mut record = record_with_rules(&["A", "B", "C"]);

        assert!(record.move_rule(0, 2));
        assert_eq!(record.rules, vec!["B", "C", "A"]);

        assert_eq!(record.remove_rule(1), Some("C".to_string()));
        assert_eq!(record.rules, vec!["B", "A"]);

        assert!(!record.move_rule(0, 5));
        assert_eq!(record.remove_rule(9), None);
    }

    #[test]
    fn test_question_operations_by_id() {
        let mut record = AgentPromptRecord::default();
        let first = record.add_question(Some("Q1".to_string()), "One?");
        let second = record.add_question(None, "Two?");

        assert!(record.move_question(&second, 0));
        assert_eq!(record.questions[0].text, "Two?");

        let removed = record.remove_question(&first).unwrap();
        assert_eq!(removed.text, "One?");
        assert_eq!(record.questions.len(), 1);

        assert!(!record.move_question("missing", 0));
        assert!(record.remove_question("missing").is_none());
    }

    #[test]
    fn test_display_title_ignores_blank() {
        let q = Question::new(Some("  ".to_string()), "Text");
        assert_eq!(q.display_title(), None);

        let q = Question::new(Some(" Q1 ".to_string()), "Text");
        assert_eq!(q.display_title(), Some("Q1"));
    }

    #[test]
    fn test_same_content_ignores_ids() {
        let mut a = AgentPromptRecord::default();
        a.add_question(Some("Q".to_string()), "Text");
        let mut b = AgentPromptRecord::default();
        b.add_question(Some("Q".to_string()), "Text");

        assert_ne!(a, b);
        assert!(a.same_content(&b));
    }
}
