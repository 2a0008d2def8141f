//! Catalogue model, validation and lookup.
//!
//! Parts files decode into the authored records in `source`; `validate`
//! checks every content rule and produces a `ValidCatalogue` holding the
//! types in `model`; `ContentIndex` serves lookups over that catalogue.

pub mod identity;
pub mod index;
pub mod model;
pub mod source;
pub mod validate;

pub use identity::{CategoryId, Difficulty, EntryId};
pub use index::{ContentIndex, EntryIter};
pub use model::{Category, Challenge, CodeBlock, Entry, QuizItem, Section};
pub use source::{RawCategory, RawChallenge, RawEntry, RawQuizItem, RawSection};
pub use validate::{CatalogueRejected, ErrorKind, ValidCatalogue, Violation, validate};
