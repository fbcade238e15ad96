//! CLI output formatting for every `folio` command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (item, section, file) is its title with a positional
//! index. Slugs, backing files and locales are shown as indented context
//! lines so the output reads as a content inventory while still letting
//! authors trace an entry back to a file.
//!
//! # Output Format
//!
//! ## Listing
//!
//! ```text
//! Sections
//! 001 Archive
//!     Slug: 2023
//!
//! Items
//! 001 Hello World
//!     Slug: post-a
//!     Source: blog/post-a.mdx (flat, en)
//! 002 A Bundled Post
//!     Slug: post-b
//!     Source: blog/post-b/index.mdx (bundle, en)
//!
//! Files
//!     cover.png
//! ```
//!
//! ## Breadcrumbs
//!
//! ```text
//! Content → #
//! Blog Home → /blog
//! Hello World → /blog/post-a
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::aggregate::Adjacent;
use crate::check::CheckReport;
use crate::metadata;
use crate::page::Page;
use crate::types::{Breadcrumb, ContentItem, DirectoryListing, Layout, TagCount};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn layout_name(layout: Layout) -> &'static str {
    match layout {
        Layout::Flat => "flat",
        Layout::Bundle => "bundle",
    }
}

/// Context lines shared by every item display.
///
/// ```text
///     Slug: post-a
///     Source: blog/post-a.mdx (flat, en)
///     Date: 2024-03-01
///     Tags: rust, web
///     A short description...
/// ```
fn item_context(item: &ContentItem, depth: usize) -> Vec<String> {
    let pad = indent(depth);
    let mut lines = vec![
        format!("{}Slug: {}", pad, item.slug),
        format!(
            "{}Source: {} ({}, {})",
            pad,
            item.source.display(),
            layout_name(item.layout),
            item.locale
        ),
    ];
    if let Some(date) = &item.metadata.date {
        lines.push(format!("{}Date: {}", pad, date));
    }
    if !item.metadata.tags.is_empty() {
        lines.push(format!("{}Tags: {}", pad, item.metadata.tags.join(", ")));
    }
    if let Some(desc) = metadata::display_description(item) {
        let truncated = truncate_desc(desc.trim(), 60);
        if !truncated.is_empty() {
            lines.push(format!("{}{}", pad, truncated));
        }
    }
    lines
}

/// Indexed item headers, each followed by its context lines.
fn item_lines(items: &[ContentItem], depth: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, item) in items.iter().enumerate() {
        lines.push(format!(
            "{}{} {}",
            indent(depth),
            format_index(i + 1),
            item.metadata.title
        ));
        lines.extend(item_context(item, depth + 1));
    }
    lines
}

// ============================================================================
// resolve
// ============================================================================

/// Format a single resolved item, with reading time and excerpt.
pub fn format_item(item: &ContentItem) -> Vec<String> {
    let mut lines = vec![item.metadata.title.clone()];
    lines.extend(item_context(item, 1));
    lines.push(format!(
        "    Reading time: {} min",
        metadata::reading_time_minutes(&item.body)
    ));
    if !item.metadata.extra.is_empty() {
        let keys: Vec<&str> = item.metadata.extra.keys().map(String::as_str).collect();
        lines.push(format!("    Other keys: {}", keys.join(", ")));
    }
    lines
}

pub fn print_item(item: &ContentItem) {
    for line in format_item(item) {
        println!("{}", line);
    }
}

// ============================================================================
// list
// ============================================================================

/// Format a directory listing as Sections / Items / Files blocks. Empty
/// blocks are omitted; an empty listing is a single `(empty)` line.
pub fn format_listing(listing: &DirectoryListing) -> Vec<String> {
    if listing.is_empty() {
        return vec!["(empty)".to_string()];
    }
    let mut blocks: Vec<Vec<String>> = Vec::new();

    if !listing.sections.is_empty() {
        let mut lines = vec!["Sections".to_string()];
        for (i, section) in listing.sections.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), section.title));
            lines.push(format!("    Slug: {}", section.slug));
            if let Some(desc) = &section.description {
                lines.push(format!("    {}", truncate_desc(desc.trim(), 60)));
            }
        }
        blocks.push(lines);
    }

    if !listing.items.is_empty() {
        let mut lines = vec!["Items".to_string()];
        lines.extend(item_lines(&listing.items, 0));
        blocks.push(lines);
    }

    if !listing.files.is_empty() {
        let mut lines = vec!["Files".to_string()];
        for file in &listing.files {
            lines.push(format!("    {}", file.name));
        }
        blocks.push(lines);
    }

    blocks.join(&String::new())
}

pub fn print_listing(listing: &DirectoryListing) {
    for line in format_listing(listing) {
        println!("{}", line);
    }
}

// ============================================================================
// breadcrumbs
// ============================================================================

/// One `label → href` line per crumb.
pub fn format_breadcrumbs(crumbs: &[Breadcrumb]) -> Vec<String> {
    crumbs
        .iter()
        .map(|c| format!("{} → {}", c.label, c.href))
        .collect()
}

pub fn print_breadcrumbs(crumbs: &[Breadcrumb]) {
    for line in format_breadcrumbs(crumbs) {
        println!("{}", line);
    }
}

// ============================================================================
// all / all-recursive / tags
// ============================================================================

/// Format an aggregated item list with a trailing count.
pub fn format_items(items: &[ContentItem]) -> Vec<String> {
    let mut lines = item_lines(items, 0);
    if !lines.is_empty() {
        lines.push(String::new());
    }
    let noun = if items.len() == 1 { "item" } else { "items" };
    lines.push(format!("{} {}", items.len(), noun));
    lines
}

pub fn print_items(items: &[ContentItem]) {
    for line in format_items(items) {
        println!("{}", line);
    }
}

/// Format tag counts, most used first.
///
/// ```text
/// web (3)
/// rust (2)
/// ```
pub fn format_tag_counts(tags: &[TagCount]) -> Vec<String> {
    if tags.is_empty() {
        return vec!["(no tags)".to_string()];
    }
    tags.iter()
        .map(|t| format!("{} ({})", t.tag, t.count))
        .collect()
}

pub fn print_tag_counts(tags: &[TagCount]) {
    for line in format_tag_counts(tags) {
        println!("{}", line);
    }
}

// ============================================================================
// page
// ============================================================================

/// Format a resolved page: breadcrumbs first, then the article or listing.
pub fn format_page(page: &Page, neighbours: Option<Adjacent<'_>>) -> Vec<String> {
    let crumbs: Vec<&str> = page.breadcrumbs().iter().map(|c| c.label.as_str()).collect();
    let mut lines = vec![crumbs.join(" › "), String::new()];

    match page {
        Page::Article {
            item,
            asset_base,
            locales,
            ..
        } => {
            lines.push(format!("Article: {}", item.metadata.title));
            lines.extend(item_context(item, 1));
            lines.push(format!("    Assets: {}/", asset_base.trim_end_matches('/')));
            let codes: Vec<&str> = locales.iter().map(|l| l.code()).collect();
            lines.push(format!("    Locales: {}", codes.join(", ")));
            if let Some(adjacent) = neighbours {
                if let Some(prev) = adjacent.previous {
                    lines.push(format!("    Previous: {}", prev.metadata.title));
                }
                if let Some(next) = adjacent.next {
                    lines.push(format!("    Next: {}", next.metadata.title));
                }
            }
        }
        Page::Listing {
            title,
            index,
            listing,
            ..
        } => {
            lines.push(format!("Listing: {}", title));
            if let Some(desc) = index.as_ref().and_then(metadata::display_description) {
                lines.push(format!("    {}", truncate_desc(desc.trim(), 60)));
            }
            lines.push(String::new());
            lines.extend(format_listing(listing));
        }
    }
    lines
}

pub fn print_page(page: &Page, neighbours: Option<Adjacent<'_>>) {
    for line in format_page(page, neighbours) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Format a check report: one line per issue, then a summary.
pub fn format_check_report(report: &CheckReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .issues
        .iter()
        .map(|issue| format!("    {}", issue))
        .collect();
    if !lines.is_empty() {
        lines.insert(0, "Issues".to_string());
        lines.push(String::new());
    }
    lines.push(format!(
        "Checked {} content files, {} bundles, {} sections: {}",
        report.files_checked,
        report.bundles,
        report.sections,
        match report.issues.len() {
            0 => "no issues".to_string(),
            1 => "1 issue".to_string(),
            n => format!("{} issues", n),
        }
    ));
    lines
}

pub fn print_check_report(report: &CheckReport) {
    for line in format_check_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Issue;
    use crate::locale::Locale;
    use crate::types::{Metadata, OpaqueFile, Section};
    use std::path::PathBuf;

    fn make_item(slug: &str, title: &str, layout: Layout) -> ContentItem {
        ContentItem {
            slug: slug.to_string(),
            metadata: Metadata::new(title),
            body: "Some words in a paragraph.".to_string(),
            source: PathBuf::from(format!("blog/{slug}.mdx")),
            layout,
            locale: Locale::En,
        }
    }

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn truncate_desc_respects_char_boundaries() {
        assert_eq!(truncate_desc("short", 60), "short");
        assert_eq!(truncate_desc("abcdef", 3), "abc...");
        assert_eq!(truncate_desc("ગુજરાતી", 2), "ગુ...");
    }

    #[test]
    fn item_shows_source_layout_and_locale() {
        let mut item = make_item("post-a", "Hello", Layout::Flat);
        item.metadata.date = Some("2024-03-01".into());
        item.metadata.tags = vec!["rust".into(), "web".into()];

        let lines = format_item(&item);
        assert_eq!(lines[0], "Hello");
        assert_eq!(lines[1], "    Slug: post-a");
        assert_eq!(lines[2], "    Source: blog/post-a.mdx (flat, en)");
        assert_eq!(lines[3], "    Date: 2024-03-01");
        assert_eq!(lines[4], "    Tags: rust, web");
        assert!(lines.contains(&"    Reading time: 1 min".to_string()));
    }

    #[test]
    fn listing_blocks() {
        let listing = DirectoryListing {
            sections: vec![Section {
                slug: "2023".into(),
                title: "Archive".into(),
                description: None,
            }],
            items: vec![
                make_item("post-a", "A", Layout::Flat),
                make_item("post-b", "B", Layout::Bundle),
            ],
            files: vec![OpaqueFile {
                name: "cover.png".into(),
                extension: "png".into(),
            }],
        };
        let lines = format_listing(&listing);
        assert_eq!(lines[0], "Sections");
        assert_eq!(lines[1], "001 Archive");
        assert_eq!(lines[2], "    Slug: 2023");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Items");
        assert_eq!(lines[5], "001 A");
        assert!(lines.contains(&"002 B".to_string()));
        assert!(lines.contains(&"    Source: blog/post-b.mdx (bundle, en)".to_string()));
        assert_eq!(lines[lines.len() - 2], "Files");
        assert_eq!(lines[lines.len() - 1], "    cover.png");
    }

    #[test]
    fn empty_listing() {
        assert_eq!(format_listing(&DirectoryListing::default()), vec!["(empty)"]);
    }

    #[test]
    fn breadcrumb_lines() {
        let crumbs = vec![
            Breadcrumb {
                label: "Content".into(),
                href: "#".into(),
            },
            Breadcrumb {
                label: "Blog".into(),
                href: "/blog".into(),
            },
        ];
        assert_eq!(format_breadcrumbs(&crumbs), vec!["Content → #", "Blog → /blog"]);
    }

    #[test]
    fn items_count_line() {
        assert_eq!(format_items(&[]), vec!["0 items"]);
        let lines = format_items(&[make_item("a", "A", Layout::Flat)]);
        assert_eq!(lines.last().unwrap(), "1 item");
    }

    #[test]
    fn tag_lines() {
        let tags = vec![TagCount {
            tag: "rust".into(),
            count: 2,
        }];
        assert_eq!(format_tag_counts(&tags), vec!["rust (2)"]);
        assert_eq!(format_tag_counts(&[]), vec!["(no tags)"]);
    }

    #[test]
    fn article_page_with_neighbours() {
        let items = vec![
            make_item("a", "A", Layout::Flat),
            make_item("b", "B", Layout::Bundle),
        ];
        let page = Page::Article {
            item: items[1].clone(),
            breadcrumbs: vec![Breadcrumb {
                label: "Blog".into(),
                href: "/blog".into(),
            }],
            asset_base: "/blog/b".into(),
            locales: vec![Locale::En, Locale::Gu],
        };
        let adjacent = crate::aggregate::adjacent(&items, "b");

        let lines = format_page(&page, adjacent);
        assert_eq!(lines[0], "Blog");
        assert_eq!(lines[2], "Article: B");
        assert!(lines.contains(&"    Assets: /blog/b/".to_string()));
        assert!(lines.contains(&"    Locales: en, gu".to_string()));
        assert!(lines.contains(&"    Previous: A".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("    Next:")));
    }

    #[test]
    fn check_summary() {
        let clean = CheckReport {
            files_checked: 3,
            bundles: 1,
            sections: 2,
            issues: vec![],
        };
        assert_eq!(
            format_check_report(&clean),
            vec!["Checked 3 content files, 1 bundles, 2 sections: no issues"]
        );

        let dirty = CheckReport {
            issues: vec![Issue::BundleWithSectionIndex {
                bundle: PathBuf::from("resources/sem-1"),
            }],
            ..clean
        };
        let lines = format_check_report(&dirty);
        assert_eq!(lines[0], "Issues");
        assert!(lines[1].contains("resources/sem-1/"));
        assert!(lines.last().unwrap().ends_with("1 issue"));
    }
}
