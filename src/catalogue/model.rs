//! Validated content model.
//!
//! Values here are only built by the validator, so every invariant of the
//! catalogue already holds: ids are unique, sections and tags are present,
//! quiz answers point at a real option, highlighted lines exist in their code
//! block and diagrams are resolved. Consumers never re-check them.

use crate::catalogue::identity::{CategoryId, Difficulty, EntryId};
use crate::diagram::RenderDescriptor;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
    pub icon: String,
    pub entries: Vec<Entry>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub difficulty: Difficulty,
    /// Non-empty; each tag non-empty. Order is as authored.
    pub tags: Vec<String>,
    pub cheat_sheet_summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Never empty.
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quiz: Vec<QuizItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<Challenge>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub heading: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analogy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagram: Option<RenderDescriptor>,
}

/// A code sample together with the lines to emphasise in it.
///
/// Highlights only exist alongside code, and each is a 1-based line number
/// within `[1, line_count()]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    pub source: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlight_lines: Vec<usize>,
}

impl CodeBlock {
    pub fn line_count(&self) -> usize {
        line_count(&self.source)
    }

    /// Lines of the block paired with whether they are highlighted.
    pub fn annotated_lines(&self) -> impl Iterator<Item = (usize, &str, bool)> + '_ {
        self.source.lines().enumerate().map(|(idx, line)| {
            let number = idx + 1;
            (number, line, self.highlight_lines.contains(&number))
        })
    }
}

/// Number of lines a renderer shows for `code`; a trailing newline does not
/// open a new line and empty code has none.
pub fn line_count(code: &str) -> usize {
    code.lines().count()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    pub question: String,
    /// At least two options; text is not required to be unique.
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

impl QuizItem {
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    /// Grade a chosen option index.
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub prompt: String,
    pub starter_code: String,
    pub solution_code: String,
    /// Ordered from least to most revealing.
    pub hints: Vec<String>,
}

impl Challenge {
    /// The hints unlocked after `count` requests, saturating at the full list.
    pub fn revealed_hints(&self, count: usize) -> &[String] {
        &self.hints[..count.min(self.hints.len())]
    }
}
