//! Content root discovery and the parts manifest.
//!
//! A content root is a directory holding `catalogue.json`, which names the
//! parts files in curriculum order:
//!
//! ```json
//! { "parts": ["parts/01-foundations.json", "parts/02-types.json"] }
//! ```
//!
//! The listed order is the canonical order of the catalogue; loaders append
//! parts exactly as listed.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const MANIFEST_FILE: &str = "catalogue.json";
pub const ROOT_ENV: &str = "SYLLABUS_ROOT";

/// Directory containing a parts manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentRoot {
    path: PathBuf,
}

/// Parsed `catalogue.json`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub parts: Vec<PathBuf>,
}

impl ContentRoot {
    /// Locate the content root.
    ///
    /// Search order: the explicit path (an error when it is not a content
    /// root), `SYLLABUS_ROOT`, the nearest ancestor of the working directory
    /// holding `catalogue.json`, then the build-time `SYLLABUS_ROOT_HINT`.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        if let Ok(env_root) = env::var(ROOT_ENV) {
            if !env_root.is_empty() {
                match Self::from_path(Path::new(&env_root)) {
                    Ok(root) => return Ok(root),
                    Err(err) => warn!("ignoring {ROOT_ENV}={env_root}: {err:#}"),
                }
            }
        }

        if let Ok(cwd) = env::current_dir() {
            if let Some(found) = search_upwards(&cwd) {
                return Self::from_path(&found);
            }
        }

        if let Some(hint) = option_env!("SYLLABUS_ROOT_HINT") {
            if let Ok(root) = Self::from_path(Path::new(hint)) {
                return Ok(root);
            }
        }

        bail!(
            "Unable to locate a content root containing {MANIFEST_FILE}. Pass --root or set {ROOT_ENV}."
        )
    }

    /// Use `path` as the content root; it must contain `catalogue.json`.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !is_content_root(path) {
            bail!("{} does not contain {MANIFEST_FILE}", path.display());
        }
        let path = fs::canonicalize(path)
            .with_context(|| format!("canonicalizing content root {}", path.display()))?;
        debug!(root = %path.display(), "resolved content root");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(MANIFEST_FILE)
    }

    /// Read the manifest; it must list at least one part.
    pub fn manifest(&self) -> Result<Manifest> {
        let manifest_path = self.manifest_path();
        let data = fs::read_to_string(&manifest_path)
            .with_context(|| format!("reading {}", manifest_path.display()))?;
        let manifest: Manifest = serde_json::from_str(&data)
            .with_context(|| format!("parsing {}", manifest_path.display()))?;
        if manifest.parts.is_empty() {
            bail!("{} lists no parts", manifest_path.display());
        }
        Ok(manifest)
    }

    /// Part file paths in manifest order, resolved against the root.
    pub fn part_paths(&self) -> Result<Vec<PathBuf>> {
        Ok(self
            .manifest()?
            .parts
            .into_iter()
            .map(|part| {
                if part.is_absolute() {
                    part
                } else {
                    self.path.join(part)
                }
            })
            .collect())
    }
}

fn is_content_root(candidate: &Path) -> bool {
    candidate.join(MANIFEST_FILE).is_file()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_content_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, body: &str) {
        fs::write(dir.join(MANIFEST_FILE), body).unwrap();
    }

    #[test]
    fn explicit_root_requires_manifest() {
        let temp = TempDir::new().expect("temp dir");
        let err = ContentRoot::resolve(Some(temp.path())).unwrap_err();
        assert!(err.to_string().contains(MANIFEST_FILE));

        write_manifest(temp.path(), r#"{"parts": ["a.json"]}"#);
        let root = ContentRoot::resolve(Some(temp.path())).expect("root resolves");
        assert_eq!(root.path(), fs::canonicalize(temp.path()).unwrap());
    }

    #[test]
    fn part_paths_keep_manifest_order() {
        let temp = TempDir::new().expect("temp dir");
        write_manifest(
            temp.path(),
            r#"{"parts": ["parts/02-later.json", "parts/01-earlier.json"]}"#,
        );
        let root = ContentRoot::from_path(temp.path()).unwrap();
        let parts = root.part_paths().unwrap();
        assert_eq!(
            parts,
            vec![
                root.path().join("parts/02-later.json"),
                root.path().join("parts/01-earlier.json"),
            ]
        );
    }

    #[test]
    fn empty_or_malformed_manifest_is_rejected() {
        let temp = TempDir::new().expect("temp dir");
        write_manifest(temp.path(), r#"{"parts": []}"#);
        let root = ContentRoot::from_path(temp.path()).unwrap();
        assert!(root.manifest().is_err());

        write_manifest(temp.path(), r#"{"parts": ["a.json"], "order": "alpha"}"#);
        assert!(root.manifest().is_err());
    }

    #[test]
    fn upward_search_finds_nearest_root() {
        let temp = TempDir::new().expect("temp dir");
        write_manifest(temp.path(), r#"{"parts": ["a.json"]}"#);
        let nested = temp.path().join("parts").join("drafts");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(
            search_upwards(&nested),
            Some(fs::canonicalize(temp.path()).unwrap())
        );
    }
}
