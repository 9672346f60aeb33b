//! Round-trip checks: render, parse, render again, compare.

use super::parse::parse;
use super::record::AgentPromptRecord;
use super::registry::PromptVariant;
use super::render::render;
use serde::Serialize;

/// The first line where two renders disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDifference {
    /// 1-based line number.
    pub line: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

/// Outcome of a round-trip check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundTrip {
    /// The text as first rendered.
    pub original: String,
    /// The text rendered from the parsed record.
    pub reparsed: String,
    pub first_difference: Option<LineDifference>,
}

impl RoundTrip {
    pub fn is_identical(&self) -> bool {
        self.first_difference.is_none()
    }
}

/// Check that parsing the rendered text and rendering again changes nothing.
///
/// A raw-mode record checks its raw text, which shows what leaving raw mode
/// would do to it.
pub fn check_round_trip(record: &AgentPromptRecord, variant: PromptVariant) -> RoundTrip {
    let original = render(record, variant);
    let reparsed = render(&parse(&original, Some(variant)), variant);
    let first_difference = first_difference(&original, &reparsed);

    RoundTrip {
        original,
        reparsed,
        first_difference,
    }
}

fn first_difference(expected: &str, actual: &str) -> Option<LineDifference> {
    if expected == actual {
        return None;
    }

    let mut expected_lines = expected.split('\n');
    let mut actual_lines = actual.split('\n');
    let mut line = 1;
    loop {
        match (expected_lines.next(), actual_lines.next()) {
            (Some(a), Some(b)) if a == b => line += 1,
            (None, None) => return None,
            (a, b) => {
                return Some(LineDifference {
                    line,
                    expected: a.map(str::to_string),
                    actual: b.map(str::to_string),
                });
            }
        }
    }
}
