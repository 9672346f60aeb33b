//! Numbered-list formatting shared by the renderer and the extractor.
//!
//! Items are written as `N. text`. Lines after the first line of an item are
//! indented by [`CONTINUATION_INDENT`], and markers are only recognised at
//! column 0, so a continuation line that happens to start with `2. ` can never
//! be mistaken for a new item. Blank lines inside an item are written without
//! indentation.

use super::record::Question;
use regex::Regex;
use std::sync::LazyLock;

/// Indentation of continuation lines, aligned with text after a one-digit marker.
pub const CONTINUATION_INDENT: &str = "   ";

static ITEM_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.(?: |$)").expect("Invalid list marker regex"));

static QUESTION_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\*(?P<title>.+)\*\*:[ \t]*$").expect("Invalid title regex")
});

/// Format one numbered item, indenting its continuation lines.
pub fn numbered_item(number: usize, text: &str) -> String {
    let mut out = format!("{}. ", number);
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(CONTINUATION_INDENT);
            }
        }
        out.push_str(line);
    }
    out
}

/// Render rules as a 1-based numbered list, one per line.
///
/// Rules are trimmed and blank rules are skipped, so numbering counts only
/// the rules that appear.
pub fn format_rules(rules: &[String]) -> String {
    rules
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .enumerate()
        .map(|(i, r)| numbered_item(i + 1, r))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render questions as a numbered list separated by blank lines.
///
/// A titled question renders as `N. **Title**:` followed by the quoted text on
/// the next line; an untitled one as `N. text`. Blank questions are skipped.
pub fn format_questions(questions: &[Question]) -> String {
    questions
        .iter()
        .filter(|q| !q.is_blank())
        .enumerate()
        .map(|(i, q)| {
            let text = q.text.trim();
            let item = match q.display_title() {
                Some(title) => format!("**{}**:\n\"{}\"", title, text),
                None => text.to_string(),
            };
            numbered_item(i + 1, &item)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Split a list body into item texts.
///
/// Material before the first marker is discarded. Continuation lines lose up
/// to [`CONTINUATION_INDENT`] worth of leading spaces, interior lines are kept
/// verbatim, and trailing blank lines of each item are dropped.
pub fn split_items(body: &str) -> Vec<String> {
    let mut items: Vec<Vec<&str>> = Vec::new();

    for line in body.lines() {
        if let Some(marker) = ITEM_MARKER.find(line) {
            items.push(vec![&line[marker.end()..]]);
        } else if let Some(current) = items.last_mut() {
            current.push(strip_continuation(line));
        } else if !line.trim().is_empty() {
            tracing::debug!(line, "discarding text before first list item");
        }
    }

    items
        .into_iter()
        .map(|mut lines| {
            while lines.len() > 1 && lines.last().is_some_and(|l| l.trim().is_empty()) {
                lines.pop();
            }
            lines.join("\n")
        })
        .collect()
}

/// Parse the rules list of a section body.
pub fn parse_rules(body: &str) -> Vec<String> {
    split_items(body)
        .into_iter()
        .filter(|r| !r.trim().is_empty())
        .collect()
}

/// Parse the questions list of a section body.
///
/// Every question gets a fresh id.
pub fn parse_questions(body: &str) -> Vec<Question> {
    split_items(body)
        .iter()
        .map(|item| parse_question(item))
        .filter(|q| !q.is_blank())
        .collect()
}

/// Parse one question item.
///
/// A first line of exactly `**Title**:` followed by a quoted body yields a
/// titled question with the quotes removed. Anything else, including bold
/// text that opens an untitled question, is untitled text.
pub fn parse_question(item: &str) -> Question {
    if let Some((first, rest)) = item.split_once('\n')
        && let Some(caps) = QUESTION_TITLE.captures(first)
        && let Some(text) = quoted(rest.trim())
    {
        return Question::new(Some(caps["title"].trim().to_string()), text);
    }
    Question::new(None, item.trim())
}

fn quoted(text: &str) -> Option<&str> {
    (text.len() >= 2 && text.starts_with('"') && text.ends_with('"'))
        .then(|| &text[1..text.len() - 1])
}

fn strip_continuation(line: &str) -> &str {
    let spaces = line
        .bytes()
        .take(CONTINUATION_INDENT.len())
        .take_while(|b| *b == b' ')
        .count();
    &line[spaces..]
}
