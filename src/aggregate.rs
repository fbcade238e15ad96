//! Collecting leaf items for blog indexes, tag pages and article navigation.
//!
//! Items come from the [`Lister`], so the locale rule is the same as
//! everywhere else: one variant per slug, requested locale before default.
//! Aggregated lists additionally drop items that exist only in another
//! locale, since a listing page links to `slug?lang=..` and that link would
//! resolve to nothing.
//!
//! ## Date ordering
//!
//! Dated items are ordered newest first. Items without a usable date keep
//! the position they had in the input, and the dated items fill the
//! remaining positions in order:
//!
//! ```text
//! input:   [2023-01-01] [undated] [2024-03-01]
//! output:  [2024-03-01] [undated] [2023-01-01]
//! ```

use crate::listing::Lister;
use crate::locale::Locale;
use crate::naming;
use crate::site::ContentError;
use crate::types::{ContentItem, DirectoryEntry, TagCount};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Deepest section nesting followed by [`Aggregator::list_all_recursive`].
/// Guards against symlink cycles in the content tree.
pub const MAX_DEPTH: usize = 32;

#[derive(Clone, Copy)]
pub struct Aggregator<'a> {
    lister: Lister<'a>,
}

impl<'a> Aggregator<'a> {
    pub fn new(lister: Lister<'a>) -> Self {
        Self { lister }
    }

    /// Leaf items directly under `section`, newest first.
    pub fn list_all(&self, section: &str, locale: Locale) -> Result<Vec<ContentItem>, ContentError> {
        let items = self
            .lister
            .list(section, locale)?
            .items
            .into_iter()
            .filter(|item| is_listed(item, locale))
            .collect();
        Ok(sort_by_date(items))
    }

    /// Every leaf item under `root` at any depth, newest first. Slugs are
    /// paths relative to `root` (`sem-1/maths`), so they are unique across
    /// the tree and can be appended to the root's URL.
    pub fn list_all_recursive(&self, root: &str, locale: Locale) -> Result<Vec<ContentItem>, ContentError> {
        let mut items = Vec::new();
        self.collect(root, "", locale, 0, &mut items)?;
        Ok(sort_by_date(items))
    }

    fn collect(
        &self,
        dir: &str,
        prefix: &str,
        locale: Locale,
        depth: usize,
        out: &mut Vec<ContentItem>,
    ) -> Result<(), ContentError> {
        if depth > MAX_DEPTH {
            warn!(dir, "content tree nested too deeply, not descending further");
            return Ok(());
        }
        for entry in self.lister.entries(dir, locale)? {
            match entry {
                DirectoryEntry::Section(section) => {
                    self.collect(
                        &join(dir, &section.slug),
                        &join(prefix, &section.slug),
                        locale,
                        depth + 1,
                        out,
                    )?;
                }
                DirectoryEntry::LeafBundle(mut item) | DirectoryEntry::FlatContentFile(mut item) => {
                    if is_listed(&item, locale) {
                        item.slug = join(prefix, &item.slug);
                        out.push(item);
                    }
                }
                DirectoryEntry::OpaqueFile(_) => {}
            }
        }
        Ok(())
    }
}

fn is_listed(item: &ContentItem, locale: Locale) -> bool {
    if naming::is_index_slug(&item.slug) {
        return false;
    }
    if !locale.fallback_chain().contains(&item.locale) {
        debug!(slug = %item.slug, locale = %item.locale, "leaving out item with no variant for this locale");
        return false;
    }
    true
}

fn join(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Parse a front-matter date. Accepts `YYYY-MM-DD`, RFC 3339, and
/// `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS` without a zone.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn item_date(item: &ContentItem) -> Option<NaiveDateTime> {
    let raw = item.metadata.date.as_deref()?;
    let parsed = parse_date(raw);
    if parsed.is_none() {
        debug!(slug = %item.slug, date = raw, "unrecognised date, treating as undated");
    }
    parsed
}

/// Order dated items newest first; undated items stay where they were.
pub fn sort_by_date(items: Vec<ContentItem>) -> Vec<ContentItem> {
    let mut dated = Vec::new();
    let mut slots = Vec::with_capacity(items.len());
    for item in items {
        match item_date(&item) {
            Some(date) => {
                dated.push((date, item));
                slots.push(None);
            }
            None => slots.push(Some(item)),
        }
    }
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let mut dated = dated.into_iter().map(|(_, item)| item);
    slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| dated.next()))
        .collect()
}

/// Distinct tags with their item counts, most used first, ties by name.
pub fn tag_counts(items: &[ContentItem]) -> Vec<TagCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for item in items {
        for tag in &item.metadata.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }
    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    // BTreeMap order already sorts by name; the stable sort keeps it for ties.
    tags.sort_by(|a, b| b.count.cmp(&a.count));
    tags
}

/// Items carrying `tag`, in their existing order.
pub fn with_tag<'i>(items: &'i [ContentItem], tag: &str) -> Vec<&'i ContentItem> {
    items
        .iter()
        .filter(|item| item.metadata.tags.iter().any(|t| t == tag))
        .collect()
}

/// Neighbours of an item within an ordered list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjacent<'i> {
    /// The item just before it (newer, in a date-sorted list).
    pub previous: Option<&'i ContentItem>,
    /// The item just after it (older, in a date-sorted list).
    pub next: Option<&'i ContentItem>,
}

/// Neighbours of the item with `slug`, `None` if it isn't in the list.
pub fn adjacent<'i>(items: &'i [ContentItem], slug: &str) -> Option<Adjacent<'i>> {
    let pos = items.iter().position(|item| item.slug == slug)?;
    Some(Adjacent {
        previous: pos.checked_sub(1).and_then(|i| items.get(i)),
        next: items.get(pos + 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Resolver;
    use crate::store::MemoryStore;
    use crate::test_helpers::*;
    use crate::types::{Layout, Metadata};
    use std::path::PathBuf;

    fn item(slug: &str, date: Option<&str>, tags: &[&str]) -> ContentItem {
        let mut metadata = Metadata::new(slug);
        metadata.date = date.map(str::to_string);
        metadata.tags = tags.iter().map(|t| t.to_string()).collect();
        ContentItem {
            slug: slug.to_string(),
            metadata,
            body: String::new(),
            source: PathBuf::from(format!("{slug}.mdx")),
            layout: Layout::Flat,
            locale: Locale::En,
        }
    }

    #[test]
    fn dated_items_newest_first() {
        let items = vec![
            item("old", Some("2023-01-01"), &[]),
            item("none", None, &[]),
            item("new", Some("2024-03-01"), &[]),
        ];
        let sorted = sort_by_date(items);
        assert_eq!(item_slugs(&sorted), vec!["new", "none", "old"]);
    }

    #[test]
    fn undated_items_keep_position() {
        let items = vec![
            item("u1", None, &[]),
            item("a", Some("2020-05-05"), &[]),
            item("u2", Some("not a date"), &[]),
            item("b", Some("2022-01-01T10:00:00Z"), &[]),
            item("c", Some("2021-06-01 08:30:00"), &[]),
        ];
        let sorted = sort_by_date(items);
        assert_eq!(item_slugs(&sorted), vec!["u1", "b", "u2", "c", "a"]);
    }

    #[test]
    fn equal_dates_keep_input_order() {
        let items = vec![
            item("first", Some("2024-01-01"), &[]),
            item("second", Some("2024-01-01"), &[]),
        ];
        assert_eq!(item_slugs(&sort_by_date(items)), vec!["first", "second"]);
    }

    #[test]
    fn parse_date_forms() {
        assert!(parse_date("2024-01-01").is_some());
        assert!(parse_date(" 2024-01-01 ").is_some());
        assert!(parse_date("2024-01-01T12:00:00+05:30").is_some());
        assert!(parse_date("2024-01-01T12:00:00").is_some());
        assert!(parse_date("2024-01-01 12:00:00").is_some());
        assert!(parse_date("January 1st").is_none());
        assert!(parse_date("2024-13-01").is_none());
    }

    #[test]
    fn rfc3339_compares_in_utc() {
        let ist = parse_date("2024-01-01T05:00:00+05:30").unwrap();
        let utc = parse_date("2024-01-01T00:00:00Z").unwrap();
        assert!(ist < utc);
    }

    #[test]
    fn tag_counts_by_count_then_name() {
        let items = vec![
            item("a", None, &["rust", "web"]),
            item("b", None, &["web"]),
            item("c", None, &["astro", "rust", "web"]),
        ];
        let counts = tag_counts(&items);
        let pairs: Vec<(&str, usize)> = counts.iter().map(|t| (t.tag.as_str(), t.count)).collect();
        assert_eq!(pairs, vec![("web", 3), ("rust", 2), ("astro", 1)]);
    }

    #[test]
    fn with_tag_preserves_order() {
        let items = vec![
            item("a", None, &["rust"]),
            item("b", None, &["web"]),
            item("c", None, &["rust"]),
        ];
        let tagged: Vec<&str> = with_tag(&items, "rust").iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(tagged, vec!["a", "c"]);
        assert!(with_tag(&items, "Rust").is_empty());
    }

    #[test]
    fn adjacent_neighbours() {
        let items = vec![item("a", None, &[]), item("b", None, &[]), item("c", None, &[])];

        let mid = adjacent(&items, "b").unwrap();
        assert_eq!(mid.previous.map(|i| i.slug.as_str()), Some("a"));
        assert_eq!(mid.next.map(|i| i.slug.as_str()), Some("c"));

        let first = adjacent(&items, "a").unwrap();
        assert!(first.previous.is_none());
        let last = adjacent(&items, "c").unwrap();
        assert!(last.next.is_none());

        assert!(adjacent(&items, "zzz").is_none());
    }

    fn blog_store() -> MemoryStore {
        MemoryStore::new()
            .with_file("blog/_index.mdx", doc("Blog Home"))
            .with_file("blog/old.mdx", dated("Old", "2023-01-01"))
            .with_file("blog/new/index.mdx", dated("New", "2024-03-01"))
            .with_file("blog/new/index.gu.mdx", dated("New-gu", "2024-03-01"))
            .with_file("blog/draft.mdx", doc("Draft"))
            .with_file("blog/only-gu.gu.mdx", dated("Only Gu", "2024-06-01"))
            .with_file("blog/index.mdx", doc("Stray index"))
            .with_file("blog/cover.png", "png")
    }

    #[test]
    fn list_all_sorts_and_filters() {
        let store = blog_store();
        let aggregator = Aggregator::new(Lister::new(Resolver::new(&store, "mdx")));

        let en = aggregator.list_all("blog", Locale::En).unwrap();
        // "Draft" is undated and keeps its slug-order slot.
        assert_eq!(item_titles(&en), vec!["Draft", "New", "Old"]);

        let gu = aggregator.list_all("blog", Locale::Gu).unwrap();
        assert_eq!(item_titles(&gu), vec!["Draft", "Only Gu", "New-gu", "Old"]);
    }

    #[test]
    fn list_all_of_missing_section_is_empty() {
        let store = blog_store();
        let aggregator = Aggregator::new(Lister::new(Resolver::new(&store, "mdx")));
        assert!(aggregator.list_all("nope", Locale::En).unwrap().is_empty());
    }

    #[test]
    fn recursive_slugs_are_relative_paths() {
        let store = MemoryStore::new()
            .with_file("resources/intro.mdx", dated("Intro", "2024-01-01"))
            .with_file("resources/sem-1/_index.mdx", doc("Semester 1"))
            .with_file("resources/sem-1/maths.mdx", dated("Maths", "2024-02-01"))
            .with_file("resources/sem-1/physics/index.mdx", dated("Physics", "2023-09-01"))
            .with_file("resources/sem-1/physics/figure.mdx", doc("Figure inside bundle"))
            .with_file("resources/sem-2/maths.mdx", doc("Maths II"))
            .with_file("resources/sem-2/notes.pdf", "%PDF");
        let aggregator = Aggregator::new(Lister::new(Resolver::new(&store, "mdx")));

        let items = aggregator.list_all_recursive("resources", Locale::En).unwrap();
        assert_eq!(
            item_slugs(&items),
            vec!["sem-1/maths", "intro", "sem-1/physics", "sem-2/maths"]
        );

        let from_root = aggregator.list_all_recursive("", Locale::En).unwrap();
        let slugs = item_slugs(&from_root);
        assert!(slugs.contains(&"resources/sem-1/maths"));
        let mut unique = slugs.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), slugs.len());
    }
}
