//! Shared types produced by content resolution.
//!
//! These are the values handed to the page layer and serialized by the CLI's
//! `--json` output, so they derive `Serialize` throughout.

use crate::locale::Locale;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Front-matter metadata of a content file.
///
/// `title` is required. Recognized optional keys are typed; every other key
/// an author adds is kept verbatim in `extra` so nothing is lost, but the
/// resolution layer never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(deserialize_with = "scalar_string")]
    pub title: String,
    #[serde(default, deserialize_with = "optional_scalar_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// ISO-ish date string (`2024-01-01`, RFC 3339, ...). Kept as written;
    /// parsed only when sorting.
    #[serde(default, deserialize_with = "optional_scalar_string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "tag_list", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Metadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            summary: None,
            date: None,
            tags: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}

/// Physical layout backing a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `slug.mdx` / `slug.gu.mdx`
    Flat,
    /// `slug/index.mdx` / `slug/index.gu.mdx`
    Bundle,
}

/// A resolved leaf content item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentItem {
    /// Logical slug. Recursive aggregation replaces it with the full path
    /// relative to the aggregation root.
    pub slug: String,
    pub metadata: Metadata,
    /// Unparsed markdown+components remainder after the front matter.
    pub body: String,
    /// Backing file, relative to the content root.
    pub source: PathBuf,
    pub layout: Layout,
    /// Locale of the file actually read (after fallback).
    pub locale: Locale,
}

/// A navigable sub-directory without an `index` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub slug: String,
    /// `_index` title, or the raw directory name.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A non-content file (image, PDF, ...) carried by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpaqueFile {
    pub name: String,
    /// Lowercased extension, empty if the name has none.
    pub extension: String,
}

/// One classified child of a listed directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DirectoryEntry {
    Section(Section),
    LeafBundle(ContentItem),
    FlatContentFile(ContentItem),
    OpaqueFile(OpaqueFile),
}

/// Result of listing a directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryListing {
    pub sections: Vec<Section>,
    /// Flat files and bundles, one per logical slug.
    pub items: Vec<ContentItem>,
    pub files: Vec<OpaqueFile>,
}

impl DirectoryListing {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.items.is_empty() && self.files.is_empty()
    }
}

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub href: String,
}

/// A tag and the number of items carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

// =============================================================================
// Lenient scalar handling for front matter
// =============================================================================

/// Authors write `title: 2024` or `date: 2024-01-01`; YAML may hand those
/// back as numbers. Any scalar is accepted and rendered as text.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        _ => None,
    }
}

fn scalar_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    scalar_to_string(value).ok_or_else(|| de::Error::custom("expected a text value"))
}

fn optional_scalar_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        value => scalar_to_string(value)
            .map(Some)
            .ok_or_else(|| de::Error::custom("expected a text value")),
    }
}

fn tag_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(seq) => seq
            .into_iter()
            .map(|v| scalar_to_string(v).ok_or_else(|| de::Error::custom("tags must be text")))
            .collect(),
        value => scalar_to_string(value)
            .map(|tag| vec![tag])
            .ok_or_else(|| de::Error::custom("tags must be a list")),
    }
}
