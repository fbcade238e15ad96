//! Shared test utilities for the folio test suite.
//!
//! Provides document builders, on-disk fixture setup, and lookup helpers
//! that panic with the available alternatives when something is missing.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let site = Site::open(tmp.path()).unwrap();
//! let listing = site.lister().list("blog", Locale::En).unwrap();
//!
//! let post = find_item(&listing.items, "post-a");
//! assert_eq!(post.metadata.title, "Hello World");
//! assert_eq!(item_slugs(&listing.items), vec!["notes", "post-a", "post-b"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::types::{Breadcrumb, ContentItem, Section};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// =========================================================================
// Document builders
// =========================================================================

/// A content file with only a title.
pub fn doc(title: &str) -> String {
    format!("---\ntitle: {title}\n---\nbody of {title}")
}

/// A content file with a title plus extra front-matter lines.
pub fn doc_with(title: &str, front_matter: &str) -> String {
    format!("---\ntitle: {title}\n{front_matter}\n---\nbody of {title}")
}

/// A dated content file.
pub fn dated(title: &str, date: &str) -> String {
    doc_with(title, &format!("date: {date}"))
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find an item by slug. Panics if not found.
pub fn find_item<'a>(items: &'a [ContentItem], slug: &str) -> &'a ContentItem {
    items.iter().find(|i| i.slug == slug).unwrap_or_else(|| {
        panic!("item '{slug}' not found. Available: {:?}", item_slugs(items))
    })
}

/// Find a section by slug. Panics if not found.
pub fn find_section<'a>(sections: &'a [Section], slug: &str) -> &'a Section {
    sections.iter().find(|s| s.slug == slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = sections.iter().map(|s| s.slug.as_str()).collect();
        panic!("section '{slug}' not found. Available: {slugs:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All item slugs in order.
pub fn item_slugs(items: &[ContentItem]) -> Vec<&str> {
    items.iter().map(|i| i.slug.as_str()).collect()
}

/// All item titles in order.
pub fn item_titles(items: &[ContentItem]) -> Vec<&str> {
    items.iter().map(|i| i.metadata.title.as_str()).collect()
}

/// Breadcrumb labels in order.
pub fn crumb_labels(crumbs: &[Breadcrumb]) -> Vec<&str> {
    crumbs.iter().map(|c| c.label.as_str()).collect()
}

/// Breadcrumb hrefs in order.
pub fn crumb_hrefs(crumbs: &[Breadcrumb]) -> Vec<&str> {
    crumbs.iter().map(|c| c.href.as_str()).collect()
}
