//! Validation collaborator for rendered prompts.
//!
//! The compiler has no opinion on prompt quality. Validators sit behind the
//! [`PromptValidator`] trait so a language-model backed implementation can
//! replace the structural one without touching callers.

mod structural;

pub use structural::StructuralValidator;

use serde::{Deserialize, Serialize};

/// Verdict on one prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub feedback: String,
    pub suggestions: Vec<String>,
}

impl ValidationReport {
    /// A passing report with no suggestions.
    pub fn pass(feedback: impl Into<String>) -> Self {
        Self {
            valid: true,
            feedback: feedback.into(),
            suggestions: Vec::new(),
        }
    }
}

/// Judges a rendered prompt.
pub trait PromptValidator {
    fn validate(&self, prompt: &str) -> ValidationReport;
}
