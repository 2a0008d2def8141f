//! Indexed view of a validated catalogue.
//!
//! The index owns the `ValidCatalogue` and keeps positional lookup tables by
//! entry id, tag and difficulty. Every list is filled in one pass over the
//! catalogue in declaration order, so iteration order matches the curriculum
//! and never depends on hashing. The index is immutable; rebuild it when the
//! content changes.

use crate::catalogue::identity::Difficulty;
use crate::catalogue::model::{Category, Entry};
use crate::catalogue::validate::ValidCatalogue;
use std::collections::HashMap;
use std::slice;
use tracing::debug;

#[derive(Clone, Copy, Debug)]
struct EntrySlot {
    category: usize,
    entry: usize,
}

#[derive(Debug)]
/// Lookup structures over a validated catalogue.
pub struct ContentIndex {
    catalogue: ValidCatalogue,
    slots: Vec<EntrySlot>,
    by_id: HashMap<String, usize>,
    by_tag: HashMap<String, Vec<usize>>,
    tag_order: Vec<String>,
    by_difficulty: HashMap<Difficulty, Vec<usize>>,
}

impl ContentIndex {
    /// Build the index in a single pass over the catalogue.
    pub fn build(catalogue: ValidCatalogue) -> Self {
        let mut slots = Vec::with_capacity(catalogue.entry_count());
        let mut by_id = HashMap::new();
        let mut by_tag: HashMap<String, Vec<usize>> = HashMap::new();
        let mut tag_order = Vec::new();
        let mut by_difficulty: HashMap<Difficulty, Vec<usize>> = HashMap::new();

        for (category_idx, category) in catalogue.categories().iter().enumerate() {
            for (entry_idx, entry) in category.entries.iter().enumerate() {
                let slot = slots.len();
                slots.push(EntrySlot {
                    category: category_idx,
                    entry: entry_idx,
                });
                by_id.insert(entry.id.0.clone(), slot);
                by_difficulty.entry(entry.difficulty).or_default().push(slot);

                for tag in &entry.tags {
                    let listed = by_tag.entry(tag.clone()).or_insert_with(|| {
                        tag_order.push(tag.clone());
                        Vec::new()
                    });
                    // An entry that repeats a tag is listed once.
                    if listed.last() != Some(&slot) {
                        listed.push(slot);
                    }
                }
            }
        }

        debug!(
            entries = slots.len(),
            tags = tag_order.len(),
            "built content index"
        );
        Self {
            catalogue,
            slots,
            by_id,
            by_tag,
            tag_order,
            by_difficulty,
        }
    }

    /// Exact-match lookup by entry id.
    pub fn by_id(&self, id: &str) -> Option<&Entry> {
        self.by_id.get(id).map(|slot| self.entry_at(*slot))
    }

    /// Entries carrying `tag`, in declaration order.
    ///
    /// The iterator is lazy and `Clone`, so callers can restart it.
    pub fn by_tag(&self, tag: &str) -> EntryIter<'_> {
        self.iter_slots(self.by_tag.get(tag))
    }

    /// Entries at `level`, in declaration order.
    pub fn by_difficulty(&self, level: Difficulty) -> EntryIter<'_> {
        self.iter_slots(self.by_difficulty.get(&level))
    }

    /// Categories exactly as they were declared across the parts.
    pub fn categories_in_order(&self) -> slice::Iter<'_, Category> {
        self.catalogue.categories().iter()
    }

    /// The category holding the entry with `id`.
    pub fn category_of(&self, id: &str) -> Option<&Category> {
        let slot = self.slots[*self.by_id.get(id)?];
        self.catalogue.categories().get(slot.category)
    }

    /// Every distinct tag in order of first appearance.
    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.tag_order.iter().map(String::as_str)
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> EntryIter<'_> {
        EntryIter {
            index: self,
            slots: SlotSource::All(0..self.slots.len()),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The catalogue this index was built from.
    pub fn catalogue(&self) -> &ValidCatalogue {
        &self.catalogue
    }

    fn iter_slots<'a>(&'a self, slots: Option<&'a Vec<usize>>) -> EntryIter<'a> {
        let listed = slots.map(Vec::as_slice).unwrap_or(&[]);
        EntryIter {
            index: self,
            slots: SlotSource::Listed(listed.iter()),
        }
    }

    fn entry_at(&self, slot: usize) -> &Entry {
        let EntrySlot { category, entry } = self.slots[slot];
        &self.catalogue.categories()[category].entries[entry]
    }
}

#[derive(Clone, Debug)]
enum SlotSource<'a> {
    All(std::ops::Range<usize>),
    Listed(slice::Iter<'a, usize>),
}

/// Lazy, restartable sequence of entries from a `ContentIndex`.
#[derive(Clone, Debug)]
pub struct EntryIter<'a> {
    index: &'a ContentIndex,
    slots: SlotSource<'a>,
}

impl<'a> Iterator for EntryIter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = match &mut self.slots {
            SlotSource::All(range) => range.next()?,
            SlotSource::Listed(iter) => *iter.next()?,
        };
        Some(self.index.entry_at(slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.slots {
            SlotSource::All(range) => range.size_hint(),
            SlotSource::Listed(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for EntryIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::source::{RawCategory, RawEntry, RawSection};
    use crate::catalogue::validate::validate;

    fn entry(id: &str, difficulty: &str, tags: &[&str]) -> RawEntry {
        RawEntry {
            id: id.to_string(),
            title: id.to_string(),
            difficulty: difficulty.to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            cheat_sheet_summary: String::new(),
            signature: None,
            sections: vec![RawSection {
                heading: "Overview".into(),
                content: "text".into(),
                ..RawSection::default()
            }],
            quiz: None,
            challenge: None,
        }
    }

    fn sample_index() -> ContentIndex {
        let catalogue = validate(vec![
            RawCategory {
                id: "basics".into(),
                label: "Basics".into(),
                icon: "seedling".into(),
                entries: vec![
                    entry("variables", "beginner", &["syntax"]),
                    entry("functions", "beginner", &["syntax", "generics", "syntax"]),
                ],
            },
            RawCategory {
                id: "types".into(),
                label: "Types".into(),
                icon: "shapes".into(),
                entries: vec![
                    entry("traits", "intermediate", &["generics", "traits"]),
                    entry("lifetimes", "advanced", &["borrowing"]),
                    entry("collections", "intermediate", &["generics"]),
                ],
            },
        ])
        .expect("sample catalogue is valid");
        ContentIndex::build(catalogue)
    }

    fn ids<'a>(entries: impl Iterator<Item = &'a Entry>) -> Vec<&'a str> {
        entries.map(|entry| entry.id.as_str()).collect()
    }

    #[test]
    fn by_id_finds_every_entry() {
        let index = sample_index();
        for entry in index.catalogue().entries() {
            assert_eq!(index.by_id(entry.id.as_str()), Some(entry));
        }
        assert!(index.by_id("missing").is_none());
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn by_tag_preserves_declaration_order() {
        let index = sample_index();
        let generics = index.by_tag("generics");
        assert_eq!(generics.len(), 3);
        assert_eq!(
            ids(generics.clone()),
            vec!["functions", "traits", "collections"]
        );
        // Restarting yields the same sequence.
        assert_eq!(ids(generics), ids(index.by_tag("generics")));
        assert_eq!(ids(index.by_tag("syntax")), vec!["variables", "functions"]);
        assert_eq!(index.by_tag("nope").count(), 0);
    }

    #[test]
    fn by_difficulty_groups_levels() {
        let index = sample_index();
        assert_eq!(
            ids(index.by_difficulty(Difficulty::Intermediate)),
            vec!["traits", "collections"]
        );
        assert_eq!(ids(index.by_difficulty(Difficulty::Advanced)), vec!["lifetimes"]);
    }

    #[test]
    fn categories_and_tags_keep_source_order() {
        let index = sample_index();
        let categories: Vec<&str> = index
            .categories_in_order()
            .map(|category| category.id.as_str())
            .collect();
        assert_eq!(categories, vec!["basics", "types"]);
        assert_eq!(
            index.tags().collect::<Vec<_>>(),
            vec!["syntax", "generics", "traits", "borrowing"]
        );
        assert_eq!(
            index.category_of("lifetimes").map(|category| category.id.as_str()),
            Some("types")
        );
        assert!(index.category_of("missing").is_none());
        assert_eq!(
            ids(index.entries()),
            vec!["variables", "functions", "traits", "lifetimes", "collections"]
        );
    }

    #[test]
    fn index_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ContentIndex>();
    }
}
