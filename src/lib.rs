//! Shared library for the syllabus content catalogue.
//!
//! The crate exposes the content model (categories, entries, sections,
//! quizzes, challenges, diagrams) together with the three operations every
//! consumer goes through: `load_catalogue` validates the concatenated parts
//! and fails closed with every violation it found, `index` builds lookups over
//! the accepted catalogue, and `resolve_diagram` maps a diagram onto a
//! renderer-neutral descriptor. The helper binaries and the UI/grading
//! consumers depend on these functions only.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub mod catalogue;
pub mod config;
pub mod diagram;
pub mod loader;

pub use catalogue::{
    CatalogueRejected, Category, CategoryId, Challenge, CodeBlock, ContentIndex, Difficulty,
    Entry, EntryId, EntryIter, ErrorKind, QuizItem, RawCategory, Section, ValidCatalogue,
    Violation, validate,
};
pub use config::{ContentRoot, Manifest};
pub use diagram::{
    CustomData, CustomDiagramType, Diagram, DiagramError, RenderDescriptor, resolve_diagram,
};
pub use loader::{load_part_from_path, load_parts};

/// Concatenate parts in the order given and validate the result.
///
/// Parts are appended verbatim; categories are never reordered, so the
/// order of `parts` is the curriculum order of the catalogue.
pub fn load_catalogue(parts: Vec<Vec<RawCategory>>) -> Result<ValidCatalogue, CatalogueRejected> {
    let categories: Vec<RawCategory> = parts.into_iter().flatten().collect();
    validate(categories)
}

/// Load every part listed by the root's manifest and validate the catalogue.
///
/// A rejected catalogue surfaces as a `CatalogueRejected` inside the error;
/// callers that want the individual violations can downcast to it.
pub fn load_catalogue_from_root(root: &ContentRoot) -> Result<ValidCatalogue> {
    let parts = load_parts(root)?;
    Ok(load_catalogue(parts)?)
}

/// Build the lookup index over an accepted catalogue.
pub fn index(catalogue: ValidCatalogue) -> ContentIndex {
    ContentIndex::build(catalogue)
}

/// Install the stderr `tracing` subscriber used by the helper binaries.
///
/// Verbosity follows `RUST_LOG` (warnings and above by default), and stdout
/// stays free for machine-readable output.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
