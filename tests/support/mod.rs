#![allow(dead_code)]

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use syllabus::{ContentRoot, RawCategory};
use tempfile::TempDir;

/// The sample catalogue shipped under `content/`.
pub fn bundled_root() -> ContentRoot {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("content");
    ContentRoot::from_path(&path).expect("bundled content root")
}

pub fn section(heading: &str) -> Value {
    json!({
        "heading": heading,
        "content": format!("{heading} explained."),
    })
}

pub fn entry(id: &str, difficulty: &str, tags: &[&str]) -> Value {
    json!({
        "id": id,
        "title": id,
        "difficulty": difficulty,
        "tags": tags,
        "cheatSheetSummary": format!("{id} in one line"),
        "sections": [section("Overview")],
    })
}

pub fn category(id: &str, entries: Vec<Value>) -> Value {
    json!({
        "id": id,
        "label": id,
        "icon": "book",
        "entries": entries,
    })
}

pub fn part(categories: Vec<Value>) -> Vec<RawCategory> {
    serde_json::from_value(Value::Array(categories)).expect("fixture decodes")
}

/// A throwaway content root on disk.
pub struct ContentFixture {
    dir: TempDir,
}

impl ContentFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("allocating content dir")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_part(&self, name: &str, categories: &[Value]) -> Result<()> {
        let parts_dir = self.dir.path().join("parts");
        fs::create_dir_all(&parts_dir)?;
        fs::write(
            parts_dir.join(name),
            serde_json::to_string_pretty(categories)?,
        )?;
        Ok(())
    }

    pub fn write_raw_part(&self, name: &str, body: &str) -> Result<()> {
        let parts_dir = self.dir.path().join("parts");
        fs::create_dir_all(&parts_dir)?;
        fs::write(parts_dir.join(name), body)?;
        Ok(())
    }

    pub fn write_manifest(&self, parts: &[&str]) -> Result<()> {
        let listed: Vec<String> = parts.iter().map(|name| format!("parts/{name}")).collect();
        fs::write(
            self.dir.path().join("catalogue.json"),
            serde_json::to_string(&json!({ "parts": listed }))?,
        )?;
        Ok(())
    }

    pub fn root(&self) -> Result<ContentRoot> {
        ContentRoot::from_path(self.dir.path())
    }
}
