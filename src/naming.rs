//! Centralized file-name handling for the content tree.
//!
//! Every content file follows the same pattern: a logical slug, an optional
//! locale suffix, and the content extension:
//!
//! - `post-a.mdx` → slug="post-a", default locale
//! - `post-a.gu.mdx` → slug="post-a", locale=gu
//! - `v1.2.mdx` → slug="v1.2" (`2` is not a locale, so it stays in the slug)
//! - `index.gu.mdx` → slug="index", locale=gu (bundle index)
//! - `_index.mdx` → slug="_index" (section index)
//!
//! ## Reserved names
//!
//! Hidden entries (`.git`, `.DS_Store`), underscore-prefixed entries
//! (`_index.mdx`, `_drafts/`) and the site `config.toml` are structural. They
//! are never listed as content.
//!
//! ## Display Titles
//!
//! When no front-matter title is available, a slug is humanized: dashes
//! become spaces and each word is capitalized (`sem-1` → "Sem 1").

use crate::locale::Locale;

/// Name of the site configuration file at the content root.
pub const CONFIG_FILE: &str = "config.toml";
/// Slug of the file describing a section (`_index.mdx`).
pub const SECTION_INDEX: &str = "_index";
/// Slug of the file that turns a directory into a leaf bundle (`index.mdx`).
pub const BUNDLE_INDEX: &str = "index";

/// Result of parsing a content file name like `post-a.gu.mdx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentName {
    pub slug: String,
    pub locale: Locale,
}

/// Parse a file name as a content file with the given extension.
///
/// Returns `None` when the extension doesn't match exactly or nothing is
/// left for the slug. The resolver only ever opens `slug.<extension>`, so a
/// `Notes.MDX` is not content.
pub fn parse_content_name(file_name: &str, extension: &str) -> Option<ContentName> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if ext != extension || stem.is_empty() {
        return None;
    }
    if let Some((slug, suffix)) = stem.rsplit_once('.')
        && let Some(locale) = Locale::from_suffix(suffix)
        && !slug.is_empty()
    {
        return Some(ContentName {
            slug: slug.to_string(),
            locale,
        });
    }
    Some(ContentName {
        slug: stem.to_string(),
        locale: Locale::default(),
    })
}

/// Physical file name for a slug in a locale: `slug.mdx` or `slug.gu.mdx`.
pub fn content_file_name(slug: &str, locale: Locale, extension: &str) -> String {
    match locale.file_suffix() {
        Some(suffix) => format!("{slug}.{suffix}.{extension}"),
        None => format!("{slug}.{extension}"),
    }
}

/// Whether an entry name is structural rather than content.
pub fn is_reserved(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_') || name == CONFIG_FILE
}

/// Whether a slug names an index file rather than an item.
pub fn is_index_slug(slug: &str) -> bool {
    slug == BUNDLE_INDEX || slug == SECTION_INDEX
}

/// Lowercased extension of a file name, empty if there is none.
pub fn extension_of(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Humanize a path segment for display: `"16-it"` → `"16 It"`,
/// `"study-materials"` → `"Study Materials"`.
pub fn humanize(segment: &str) -> String {
    segment
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
