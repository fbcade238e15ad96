//! Directory listing: classify the children of a content directory.
//!
//! ## Classification
//!
//! ```text
//! blog/
//! ├── _index.mdx          # section metadata (reserved, never listed)
//! ├── post-a.mdx          # FlatContentFile
//! ├── post-a.gu.mdx       #   same logical item, Gujarati variant
//! ├── post-b/             # LeafBundle (has index.mdx)
//! │   ├── index.mdx
//! │   └── diagram.png
//! ├── 2023/               # Section (no index.mdx)
//! │   └── _index.mdx      #   its title/description
//! └── cover.png           # OpaqueFile
//! ```
//!
//! Whether a directory is a bundle or a section is decided only by whether
//! it contains an `index` file. Dropping an `index.mdx` into a category
//! folder silently turns the whole folder into a single item; `folio check`
//! reports directories where that looks accidental.
//!
//! ## One entry per logical slug
//!
//! Locale variants and layouts of the same slug collapse into one item,
//! chosen exactly as [`Resolver::resolve`] would choose it: requested locale
//! before default, flat before bundle. When only an alternate-locale file
//! exists, it is still listed (the default listing shows a Gujarati-only
//! post rather than hiding it). A section sharing its name with an item is
//! dropped in favour of the item.
//!
//! A directory that doesn't exist lists as empty.

use crate::locale::Locale;
use crate::naming;
use crate::resolve::{Resolver, content_dir};
use crate::site::ContentError;
use crate::store::{NodeKind, StoreEntry, StoreError};
use crate::types::{ContentItem, DirectoryEntry, DirectoryListing, Layout, OpaqueFile, Section};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

#[derive(Clone, Copy)]
pub struct Lister<'a> {
    resolver: Resolver<'a>,
}

impl<'a> Lister<'a> {
    pub fn new(resolver: Resolver<'a>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> Resolver<'a> {
        self.resolver
    }

    /// List `directory` for `locale`, grouped by kind.
    pub fn list(&self, directory: &str, locale: Locale) -> Result<DirectoryListing, ContentError> {
        let mut listing = DirectoryListing::default();
        for entry in self.entries(directory, locale)? {
            match entry {
                DirectoryEntry::Section(section) => listing.sections.push(section),
                DirectoryEntry::LeafBundle(item) | DirectoryEntry::FlatContentFile(item) => {
                    listing.items.push(item)
                }
                DirectoryEntry::OpaqueFile(file) => listing.files.push(file),
            }
        }
        listing.sections.sort_by(|a, b| a.slug.cmp(&b.slug));
        listing.items.sort_by(|a, b| a.slug.cmp(&b.slug));
        listing.files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listing)
    }

    /// Classified children of `directory` in name order.
    pub fn entries(&self, directory: &str, locale: Locale) -> Result<Vec<DirectoryEntry>, ContentError> {
        let dir = content_dir(directory);
        let children = match self.resolver.store().read_dir(&dir) {
            Ok(Some(children)) => children,
            Ok(None) => {
                debug!(directory, "not a directory, listing as empty");
                return Ok(Vec::new());
            }
            Err(StoreError::OutsideRoot(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let children: Vec<StoreEntry> = children
            .into_iter()
            .filter(|c| !naming::is_reserved(&c.name))
            .collect();

        let extension = self.resolver.extension();
        let mut slugs: BTreeSet<String> = BTreeSet::new();
        let mut bundle_dirs: BTreeSet<&str> = BTreeSet::new();
        for child in &children {
            match child.kind {
                NodeKind::File => {
                    if let Some(name) = naming::parse_content_name(&child.name, extension) {
                        slugs.insert(name.slug);
                    }
                }
                NodeKind::Dir => {
                    if self.resolver.has_bundle_index(&dir.join(&child.name))? {
                        bundle_dirs.insert(child.name.as_str());
                        slugs.insert(child.name.clone());
                    }
                }
            }
        }

        let mut items: BTreeMap<String, ContentItem> = BTreeMap::new();
        for slug in slugs {
            if let Some(item) = self.resolve_item(&dir, &slug, locale)? {
                items.insert(slug, item);
            }
        }

        let mut entries = Vec::with_capacity(children.len());
        for child in &children {
            match child.kind {
                NodeKind::Dir if bundle_dirs.contains(child.name.as_str()) => {
                    if let Some(item) = items.remove(&child.name) {
                        entries.push(item_entry(item));
                    }
                }
                NodeKind::Dir => {
                    if items.contains_key(&child.name) {
                        debug!(directory, name = %child.name, "section shadowed by item of the same slug");
                        continue;
                    }
                    let path = format!("{}/{}", directory.trim_end_matches('/'), child.name);
                    entries.push(DirectoryEntry::Section(self.section(&path, &child.name, locale)?));
                }
                NodeKind::File => match naming::parse_content_name(&child.name, extension) {
                    Some(name) => {
                        if let Some(item) = items.remove(&name.slug) {
                            entries.push(item_entry(item));
                        }
                    }
                    None => entries.push(DirectoryEntry::OpaqueFile(OpaqueFile {
                        name: child.name.clone(),
                        extension: naming::extension_of(&child.name),
                    })),
                },
            }
        }
        Ok(entries)
    }

    /// Section metadata for the directory at `path`: title and description
    /// from its `_index`, title defaulting to the directory name.
    pub fn section(&self, path: &str, name: &str, locale: Locale) -> Result<Section, ContentError> {
        let index = self.resolver.resolve_section_index(path, locale)?;
        Ok(match index {
            Some(index) => Section {
                slug: name.to_string(),
                title: index.metadata.title,
                description: index.metadata.description,
            },
            None => Section {
                slug: name.to_string(),
                title: name.to_string(),
                description: None,
            },
        })
    }

    /// The one item backing `slug` in `dir`: the resolver's choice, or, if
    /// only other-locale files exist, the first of those.
    fn resolve_item(&self, dir: &Path, slug: &str, locale: Locale) -> Result<Option<ContentItem>, ContentError> {
        if let Some(found) = self.resolver.locate(dir, slug, locale)? {
            return self.resolver.load(&found, slug);
        }
        let chain = locale.fallback_chain();
        for other in Locale::ALL.into_iter().filter(|l| !chain.contains(l)) {
            if let Some(found) = self.resolver.locate(dir, slug, other)? {
                return self.resolver.load(&found, slug);
            }
        }
        Ok(None)
    }
}

fn item_entry(item: ContentItem) -> DirectoryEntry {
    match item.layout {
        Layout::Bundle => DirectoryEntry::LeafBundle(item),
        Layout::Flat => DirectoryEntry::FlatContentFile(item),
    }
}
