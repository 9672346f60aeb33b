//! The prompt compiler.
//!
//! Converts between a structured [`AgentPromptRecord`] and the instruction
//! text handed to a language model:
//!
//! - **Registry**: one template per [`PromptVariant`], with section headings,
//!   default records and style presets
//! - **Render**: `render(record, variant) -> text`
//! - **Parse**: `parse(text, hint) -> record`, the best-effort inverse
//! - **Raw**: RawOverride mode, where hand-written text replaces the render
//!
//! Every function here is pure and total. Degraded parses are reported on
//! [`Extraction`] instead of failing.
//!
//! # Template Syntax
//!
//! Section bodies use `{placeholder}` tokens:
//!
//! ```text
//! # Objective
//! You are an AI journalist named "{agent_name}". ...
//!
//! # Rules
//! {rules}
//! ```
//!
//! Use `{{` to escape and render a literal `{`.
//!
//! # Round-trip
//!
//! `render(&parse(&render(r, v), Some(v)), v) == render(r, v)` holds unless a
//! whole-section value (style, program context) contains a line that is a
//! section heading, or an inline value contains the template text that
//! follows it. Rules and questions indent their continuation lines, so their
//! content never reaches column 0. Two question shapes are also ambiguous:
//! a title containing a line break, and an untitled question whose first
//! line is exactly `**Label**:` followed by a quoted line.

mod list;
mod parse;
mod raw;
mod record;
mod registry;
mod render;
mod roundtrip;
mod template;

pub use list::{format_questions, format_rules, parse_questions, parse_rules};
pub use parse::{Extraction, detect_variant, parse, parse_detailed};
pub use raw::{edit_raw, enter_raw_mode, leave_raw_mode};
pub use record::{AgentPromptRecord, Question, new_question_id};
pub use registry::{
    ADDITIONAL_CONTEXT_HEADING, AGENT_NAME, COMPANY_NAME, CONTEXT_LOCATION, PROGRAM_CONTEXT,
    PROGRAM_NAME, PromptVariant, QUESTIONS, RULES, STYLE, SectionDescriptor, SectionKey,
    SectionKind, StylePreset, TEACHER_NAME, TemplateDescriptor, TemplateRegistry,
};
pub use render::{render, render_named, render_structured};
pub use roundtrip::{LineDifference, RoundTrip, check_round_trip};
pub use template::{Segment, TemplateError, placeholders, render_template, tokenize};
