//! Batch validation of an authored catalogue.
//!
//! The validator walks every category, entry, section, quiz item and diagram
//! in declaration order and records each violation it meets instead of
//! stopping at the first, so authors can fix a whole part file in one pass.
//! Only a catalogue with zero violations becomes a `ValidCatalogue`.

use crate::catalogue::identity::{CategoryId, Difficulty, EntryId};
use crate::catalogue::model::{
    Category, Challenge, CodeBlock, Entry, QuizItem, Section, line_count,
};
use crate::catalogue::source::{RawCategory, RawChallenge, RawEntry, RawQuizItem, RawSection};
use crate::diagram::{Diagram, DiagramError, RenderDescriptor, resolve_diagram};
use serde::Serialize;
use serde_json::Number;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Class of content-authoring defect.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum ErrorKind {
    DuplicateId,
    EmptyCollection,
    IndexOutOfRange,
    HighlightOutOfRange,
    UnknownDiagramType,
    InvalidDifficulty,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::DuplicateId => "DuplicateId",
            ErrorKind::EmptyCollection => "EmptyCollection",
            ErrorKind::IndexOutOfRange => "IndexOutOfRange",
            ErrorKind::HighlightOutOfRange => "HighlightOutOfRange",
            ErrorKind::UnknownDiagramType => "UnknownDiagramType",
            ErrorKind::InvalidDifficulty => "InvalidDifficulty",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One defect, located by a path such as
/// `categories[3].entries[1].quiz[0].correctIndex`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Violation {
    pub kind: ErrorKind,
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.path, self.message)
    }
}

/// The catalogue failed validation; carries every violation found.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("catalogue rejected with {} violation(s)", .violations.len())]
pub struct CatalogueRejected {
    violations: Vec<Violation>,
}

impl CatalogueRejected {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.violations.iter().map(|violation| violation.kind).collect()
    }
}

/// A catalogue that passed validation.
///
/// There is no public constructor: `validate` is the only way to obtain one,
/// so holding a `ValidCatalogue` proves every content invariant holds.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidCatalogue {
    categories: Vec<Category>,
}

impl ValidCatalogue {
    /// Categories in curriculum order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Every entry, category by category, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + Clone + '_ {
        self.categories
            .iter()
            .flat_map(|category| category.entries.iter())
    }

    pub fn entry_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.entries.len())
            .sum()
    }
}

/// Validate an ordered list of authored categories.
///
/// Pure: the same input always yields the same outcome and the same
/// violations in the same order.
pub fn validate(categories: Vec<RawCategory>) -> Result<ValidCatalogue, CatalogueRejected> {
    debug!(categories = categories.len(), "validating catalogue");
    let mut validator = Validator::default();
    let validated: Vec<Option<Category>> = categories
        .into_iter()
        .enumerate()
        .map(|(idx, category)| validator.category(idx, category))
        .collect();

    if !validator.violations.is_empty() {
        warn!(
            violations = validator.violations.len(),
            "catalogue rejected"
        );
        return Err(CatalogueRejected {
            violations: validator.violations,
        });
    }

    // With no violations recorded every category converted.
    let categories: Vec<Category> = validated.into_iter().flatten().collect();
    let catalogue = ValidCatalogue { categories };
    info!(
        categories = catalogue.categories.len(),
        entries = catalogue.entry_count(),
        "catalogue accepted"
    );
    Ok(catalogue)
}

#[derive(Default)]
struct Validator {
    violations: Vec<Violation>,
    // id -> path of its first declaration
    category_ids: HashMap<String, String>,
    entry_ids: HashMap<String, String>,
}

impl Validator {
    fn report(&mut self, kind: ErrorKind, path: String, message: String) {
        self.violations.push(Violation {
            kind,
            path,
            message,
        });
    }

    fn category(&mut self, idx: usize, raw: RawCategory) -> Option<Category> {
        let path = format!("categories[{idx}]");
        if let Some(first) = self.category_ids.get(&raw.id) {
            let message = format!("category id '{}' already declared at {first}", raw.id);
            self.report(ErrorKind::DuplicateId, format!("{path}.id"), message);
        } else {
            self.category_ids.insert(raw.id.clone(), path.clone());
        }

        let entries: Vec<Option<Entry>> = raw
            .entries
            .into_iter()
            .enumerate()
            .map(|(entry_idx, entry)| self.entry(&path, entry_idx, entry))
            .collect();

        Some(Category {
            id: CategoryId(raw.id),
            label: raw.label,
            icon: raw.icon,
            entries: entries.into_iter().collect::<Option<Vec<_>>>()?,
        })
    }

    fn entry(&mut self, parent: &str, idx: usize, raw: RawEntry) -> Option<Entry> {
        let path = format!("{parent}.entries[{idx}]");
        if let Some(first) = self.entry_ids.get(&raw.id) {
            let message = format!("entry id '{}' already declared at {first}", raw.id);
            self.report(ErrorKind::DuplicateId, format!("{path}.id"), message);
        } else {
            self.entry_ids.insert(raw.id.clone(), path.clone());
        }

        let difficulty = Difficulty::parse(&raw.difficulty);
        if difficulty.is_none() {
            self.report(
                ErrorKind::InvalidDifficulty,
                format!("{path}.difficulty"),
                format!(
                    "'{}' is not one of beginner, intermediate, advanced",
                    raw.difficulty
                ),
            );
        }

        if raw.tags.is_empty() {
            self.report(
                ErrorKind::EmptyCollection,
                format!("{path}.tags"),
                format!("entry '{}' has no tags", raw.id),
            );
        }
        for (tag_idx, tag) in raw.tags.iter().enumerate() {
            if tag.trim().is_empty() {
                self.report(
                    ErrorKind::EmptyCollection,
                    format!("{path}.tags[{tag_idx}]"),
                    "tag must not be empty".to_string(),
                );
            }
        }

        if raw.sections.is_empty() {
            self.report(
                ErrorKind::EmptyCollection,
                format!("{path}.sections"),
                format!("entry '{}' has no sections", raw.id),
            );
        }
        let sections: Vec<Option<Section>> = raw
            .sections
            .into_iter()
            .enumerate()
            .map(|(section_idx, section)| self.section(&path, section_idx, section))
            .collect();

        let quiz: Vec<Option<QuizItem>> = raw
            .quiz
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(item_idx, item)| self.quiz_item(&path, item_idx, item))
            .collect();

        Some(Entry {
            id: EntryId(raw.id),
            title: raw.title,
            difficulty: difficulty?,
            tags: raw.tags,
            cheat_sheet_summary: raw.cheat_sheet_summary,
            signature: raw.signature,
            sections: sections.into_iter().collect::<Option<Vec<_>>>()?,
            quiz: quiz.into_iter().collect::<Option<Vec<_>>>()?,
            challenge: raw.challenge.map(challenge),
        })
    }

    fn section(&mut self, parent: &str, idx: usize, raw: RawSection) -> Option<Section> {
        let path = format!("{parent}.sections[{idx}]");
        let code = match (raw.code, raw.code_highlight_lines) {
            (Some(source), highlights) => {
                let highlight_lines =
                    self.highlight_lines(&path, &source, highlights.unwrap_or_default());
                Some(CodeBlock {
                    source,
                    highlight_lines,
                })
            }
            (None, Some(_)) => {
                self.report(
                    ErrorKind::HighlightOutOfRange,
                    format!("{path}.codeHighlightLines"),
                    "codeHighlightLines present without code".to_string(),
                );
                None
            }
            (None, None) => None,
        };

        let diagram = match raw.diagram {
            Some(diagram) => Some(self.diagram(&path, &diagram)?),
            None => None,
        };

        Some(Section {
            heading: raw.heading,
            content: raw.content,
            code,
            output: raw.output,
            analogy: raw.analogy,
            tip: raw.tip,
            warning: raw.warning,
            note: raw.note,
            diagram,
        })
    }

    fn highlight_lines(&mut self, path: &str, source: &str, highlights: Vec<Number>) -> Vec<usize> {
        let count = line_count(source);
        let mut accepted = Vec::with_capacity(highlights.len());
        for (idx, line) in highlights.into_iter().enumerate() {
            match position(&line) {
                Some(number) if (1..=count).contains(&number) => accepted.push(number),
                _ => self.report(
                    ErrorKind::HighlightOutOfRange,
                    format!("{path}.codeHighlightLines[{idx}]"),
                    format!("line {line} is outside the code block's lines 1..={count}"),
                ),
            }
        }
        accepted
    }

    fn diagram(&mut self, parent: &str, diagram: &Diagram) -> Option<RenderDescriptor> {
        match resolve_diagram(diagram) {
            Ok(descriptor) => Some(descriptor),
            Err(err) => {
                let field = match err {
                    DiagramError::UnregisteredType(_) => "type",
                    DiagramError::ShapeMismatch { .. } => "data",
                };
                self.report(
                    ErrorKind::UnknownDiagramType,
                    format!("{parent}.diagram.{field}"),
                    err.to_string(),
                );
                None
            }
        }
    }

    fn quiz_item(&mut self, parent: &str, idx: usize, raw: RawQuizItem) -> Option<QuizItem> {
        let path = format!("{parent}.quiz[{idx}]");
        let option_count = raw.options.len();
        if option_count < 2 {
            self.report(
                ErrorKind::EmptyCollection,
                format!("{path}.options"),
                format!("quiz needs at least 2 options, found {option_count}"),
            );
        }

        let correct_index = position(&raw.correct_index).filter(|index| *index < option_count);
        if correct_index.is_none() {
            self.report(
                ErrorKind::IndexOutOfRange,
                format!("{path}.correctIndex"),
                format!(
                    "correctIndex {} is outside the {option_count} option(s)",
                    raw.correct_index
                ),
            );
        }

        Some(QuizItem {
            question: raw.question,
            options: raw.options,
            correct_index: correct_index?,
            explanation: raw.explanation,
        })
    }
}

/// Non-negative integral value of an authored number. Fractions (even `1.0`),
/// negatives and values past `usize` yield `None`.
fn position(number: &Number) -> Option<usize> {
    number.as_u64().and_then(|value| usize::try_from(value).ok())
}

fn challenge(raw: RawChallenge) -> Challenge {
    Challenge {
        prompt: raw.prompt,
        starter_code: raw.starter_code,
        solution_code: raw.solution_code,
        hints: raw.hints,
    }
}
