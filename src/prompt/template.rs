//! Template engine for placeholder substitution.
//!
//! Templates use one placeholder syntax across every variant:
//!
//! - `{name}` - Substitutes the value of placeholder `name`
//! - `{{` - Renders as literal `{`
//! - `}}` - Renders as literal `}`
//!
//! Substitution is literal: a value is pushed into the output as-is and is
//! never scanned again, so a value containing `{x}` cannot trigger a second
//! replacement.
//!
//! The same tokeniser feeds the extractor, which walks a body template's
//! [`Segment`]s to recover placeholder values from rendered text.

use std::collections::HashMap;
use std::fmt;

/// Error type for template rendering failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder was referenced but not provided.
    UndefinedVariable {
        /// The name of the undefined placeholder.
        name: String,
        /// The position in the template where the placeholder was found.
        position: usize,
    },
    /// A `{` was found without a matching `}`.
    UnmatchedBrace {
        /// The position of the unmatched `{`.
        position: usize,
    },
    /// An empty placeholder name was found (e.g., `{}`).
    EmptyVariableName {
        /// The position of the empty placeholder.
        position: usize,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedVariable { name, position } => {
                write!(
                    f,
                    "undefined placeholder '{}' at position {} in template",
                    name, position
                )
            }
            TemplateError::UnmatchedBrace { position } => {
                write!(f, "unmatched '{{' at position {} in template", position)
            }
            TemplateError::EmptyVariableName { position } => {
                write!(
                    f,
                    "empty placeholder name '{{}}' at position {} in template",
                    position
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// One piece of a tokenised template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, with `{{`/`}}` escapes already resolved.
    Literal(String),
    /// A placeholder name, with surrounding whitespace trimmed.
    Placeholder {
        /// Placeholder name.
        name: String,
        /// Byte offset of the opening `{` in the template.
        position: usize,
    },
}

/// Split a template into literal and placeholder segments.
///
/// Adjacent literal text is merged, so two literals never follow each other.
pub fn tokenize(template: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                if let Some((_, '{')) = chars.peek() {
                    chars.next();
                    literal.push('{');
                    continue;
                }

                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => name.push(c),
                        None => return Err(TemplateError::UnmatchedBrace { position: pos }),
                    }
                }

                let name = name.trim();
                if name.is_empty() {
                    return Err(TemplateError::EmptyVariableName { position: pos });
                }

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder {
                    name: name.to_string(),
                    position: pos,
                });
            }
            '}' => {
                // `}}` collapses to one brace; a lone `}` is ordinary text.
                if let Some((_, '}')) = chars.peek() {
                    chars.next();
                }
                literal.push('}');
            }
            _ => literal.push(ch),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}

/// List the distinct placeholder names of a template in first-seen order.
///
/// A malformed template has no usable placeholders and yields an empty list.
pub fn placeholders(template: &str) -> Vec<String> {
    let segments = match tokenize(template) {
        Ok(segments) => segments,
        Err(_) => return Vec::new(),
    };

    let mut names: Vec<String> = Vec::new();
    for segment in segments {
        if let Segment::Placeholder { name, .. } = segment
            && !names.contains(&name)
        {
            names.push(name);
        }
    }
    names
}

/// Render a template string by substituting placeholders.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use scoop::prompt::render_template;
///
/// let mut vars = HashMap::new();
/// vars.insert("agent_name".to_string(), "Elias".to_string());
///
/// let result = render_template("You are {agent_name}.", &vars).unwrap();
/// assert_eq!(result, "You are Elias.");
/// ```
///
/// Use `{{` to render a literal `{`:
///
/// ```
/// use std::collections::HashMap;
/// use scoop::prompt::render_template;
///
/// let vars = HashMap::new();
/// let result = render_template("Use {{name}} for placeholders", &vars).unwrap();
/// assert_eq!(result, "Use {name} for placeholders");
/// ```
pub fn render_template(
    template: &str,
    variables: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());

    for segment in tokenize(template)? {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Placeholder { name, position } => match variables.get(&name) {
                Some(value) => result.push_str(value),
                None => return Err(TemplateError::UndefinedVariable { name, position }),
            },
        }
    }

    Ok(result)
}
