//! Deserializable representation of a catalogue part file.
//!
//! These records mirror the authored JSON one-to-one (camelCase field names,
//! independently optional fields, raw strings and untyped JSON numbers) so
//! that content defects survive decoding and reach the validator, which reports
//! every one of them with a path. Use `catalogue::validate` to turn them into
//! the validated model.

use crate::diagram::Diagram;
use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawCategory {
    pub id: String,
    pub label: String,
    pub icon: String,
    #[serde(default)]
    pub entries: Vec<RawEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    pub id: String,
    pub title: String,
    /// Kept as authored; the validator maps it onto `Difficulty`.
    pub difficulty: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub cheat_sheet_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default)]
    pub sections: Vec<RawSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<Vec<RawQuizItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<RawChallenge>,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSection {
    pub heading: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analogy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// 1-based line numbers into `code`. Any JSON number decodes (negative,
    /// fractional, oversized) so the validator can report it with a path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_highlight_lines: Option<Vec<Number>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<Diagram>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuizItem {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_index: Number,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChallenge {
    pub prompt: String,
    pub starter_code: String,
    pub solution_code: String,
    #[serde(default)]
    pub hints: Vec<String>,
}
