//! Reading parts files from disk.
//!
//! Each part is checked against the embedded structural schema before it is
//! decoded, so a part with the wrong JSON shape fails with a readable list of
//! schema errors and the file that produced them. Content rules are left to
//! the validator.

use crate::catalogue::source::RawCategory;
use crate::config::ContentRoot;
use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

const PART_SCHEMA: &str = include_str!("../schema/catalogue_part.schema.json");

/// Compiled structural schema for a parts file.
pub struct PartSchema {
    compiled: JSONSchema,
}

impl PartSchema {
    /// Compile the schema shipped with the crate.
    pub fn embedded() -> Result<Self> {
        let schema: Value =
            serde_json::from_str(PART_SCHEMA).context("parsing embedded part schema")?;
        let compiled = JSONSchema::compile(&schema)
            .map_err(|err| anyhow!("compiling embedded part schema: {err}"))?;
        Ok(Self { compiled })
    }

    /// Check `value` and collect every schema error into one failure.
    pub fn check(&self, value: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(value) {
            let details = errors
                .map(|err| format!("  {}: {err}", display_pointer(&err.instance_path.to_string())))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("part failed schema validation:\n{details}");
        }
        Ok(())
    }

    /// Parse, check and decode the text of one part.
    pub fn parse(&self, data: &str) -> Result<Vec<RawCategory>> {
        let value: Value = serde_json::from_str(data).context("invalid JSON")?;
        self.check(&value)?;
        serde_json::from_value(value).context("decoding categories")
    }
}

fn display_pointer(pointer: &str) -> &str {
    if pointer.is_empty() { "/" } else { pointer }
}

/// Load a single part file.
pub fn load_part_from_path(path: &Path) -> Result<Vec<RawCategory>> {
    let schema = PartSchema::embedded()?;
    load_part_with(&schema, path)
}

fn load_part_with(schema: &PartSchema, path: &Path) -> Result<Vec<RawCategory>> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading part {}", path.display()))?;
    let categories = schema
        .parse(&data)
        .with_context(|| format!("loading part {}", path.display()))?;
    debug!(part = %path.display(), categories = categories.len(), "loaded part");
    Ok(categories)
}

/// Load every part named by the root's manifest, in manifest order.
pub fn load_parts(root: &ContentRoot) -> Result<Vec<Vec<RawCategory>>> {
    let schema = PartSchema::embedded()?;
    root.part_paths()?
        .iter()
        .map(|path| load_part_with(&schema, path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn part() -> Value {
        json!([{
            "id": "basics",
            "label": "Basics",
            "icon": "seedling",
            "entries": [{
                "id": "variables",
                "title": "Variables",
                "difficulty": "beginner",
                "tags": ["syntax"],
                "cheatSheetSummary": "let x = 1;",
                "sections": [{
                    "heading": "Declaring",
                    "content": "Bind a value.",
                    "diagram": {"kind": "mermaid", "code": "graph LR; x-->1"}
                }]
            }]
        }])
    }

    #[test]
    fn well_formed_part_decodes() {
        let schema = PartSchema::embedded().unwrap();
        let categories = schema.parse(&part().to_string()).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].entries[0].id, "variables");
    }

    #[test]
    fn schema_errors_name_the_offending_location() {
        let schema = PartSchema::embedded().unwrap();
        let mut value = part();
        value[0]["entries"][0]["tags"] = json!("syntax");
        let err = schema.parse(&value.to_string()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("schema validation"), "{message}");
        assert!(message.contains("/0/entries/0/tags"), "{message}");
    }

    #[test]
    fn content_defects_pass_the_structural_check() {
        let schema = PartSchema::embedded().unwrap();
        let mut value = part();
        value[0]["entries"][0]["difficulty"] = json!("expert");
        value[0]["entries"][0]["sections"] = json!([]);
        value[0]["entries"][0]["quiz"] =
            json!([{"question": "q", "options": ["a"], "correctIndex": -1, "explanation": ""}]);
        assert!(schema.parse(&value.to_string()).is_ok());
    }

    #[test]
    fn challenge_hints_default_to_empty() {
        let schema = PartSchema::embedded().unwrap();
        let mut value = part();
        value[0]["entries"][0]["challenge"] = json!({
            "prompt": "Shadow a binding",
            "starterCode": "let x = 1;",
            "solutionCode": "let x = 1;\nlet x = x + 1;"
        });
        let categories = schema.parse(&value.to_string()).unwrap();
        let challenge = categories[0].entries[0].challenge.as_ref().unwrap();
        assert!(challenge.hints.is_empty());
    }

    #[test]
    fn non_integral_numbers_reach_the_validator() {
        let schema = PartSchema::embedded().unwrap();
        let mut value = part();
        value[0]["entries"][0]["sections"][0]["code"] = json!("let x = 1;");
        value[0]["entries"][0]["sections"][0]["codeHighlightLines"] = json!([2.5]);
        value[0]["entries"][0]["quiz"] = json!([{
            "question": "q",
            "options": ["a", "b"],
            "correctIndex": 1.0,
            "explanation": ""
        }]);
        let categories = schema.parse(&value.to_string()).unwrap();

        let rejected = crate::catalogue::validate(categories).unwrap_err();
        let paths: Vec<&str> = rejected
            .violations()
            .iter()
            .map(|violation| violation.path.as_str())
            .collect();
        assert_eq!(
            paths,
            vec![
                "categories[0].entries[0].sections[0].codeHighlightLines[0]",
                "categories[0].entries[0].quiz[0].correctIndex",
            ]
        );
    }

    #[test]
    fn unknown_diagram_kind_fails_structurally() {
        let schema = PartSchema::embedded().unwrap();
        let mut value = part();
        value[0]["entries"][0]["sections"][0]["diagram"] = json!({"kind": "plantuml", "code": ""});
        assert!(schema.parse(&value.to_string()).is_err());
    }

    #[test]
    fn load_part_reports_the_file() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("broken.json");
        fs::write(&path, "[{").unwrap();
        let err = load_part_from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
