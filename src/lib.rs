//! # Folio
//!
//! Content resolution for a file-based personal website: a portfolio, a
//! blog, and a resource library authored as `.mdx` files in a directory
//! tree. The filesystem is the database. Folio maps a URL (path segments
//! plus a locale) to what lives in that tree and never renders anything
//! itself.
//!
//! # Architecture: Resolve, List, Walk
//!
//! Every component reads the tree through one narrow seam, the
//! [`store::ContentStore`] trait, and builds on the one below it:
//!
//! ```text
//! 1. Resolver     (dir, slug, locale)     →  ContentItem        (which file backs an address)
//! 2. Lister       (dir, locale)           →  DirectoryListing   (sections, items, files)
//! 3. Breadcrumbs  (base, segments)        →  [Breadcrumb]       (re-resolves each ancestor)
//! 4. Aggregator   (section, locale)       →  [ContentItem]      (date-sorted, recursive, tags)
//! ```
//!
//! Nothing is cached. Each call reads the store again, so an edited file is
//! visible on the next request and there is no invalidation to get wrong.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`resolve`] | Slug resolver: fixed fallback order over flat files and bundles |
//! | [`listing`] | Directory lister: classifies children, one entry per logical slug |
//! | [`breadcrumbs`] | Breadcrumb trails labelled from `_index` titles, config labels and item titles |
//! | [`aggregate`] | Date-sorted item lists, recursive collection, tag counts, prev/next |
//! | [`page`] | Request handling: article or listing for a URL |
//! | [`check`] | Whole-tree validation for authors |
//! | [`site`] | [`Site`]: a store plus its config, the usual entry point |
//! | [`store`] | `ContentStore` trait with disk and in-memory implementations |
//! | [`frontmatter`] | YAML front-matter splitting and parsing |
//! | [`metadata`] | Display fallbacks: description, excerpt, reading time |
//! | [`naming`] | `slug.locale.ext` file-name convention and reserved names |
//! | [`locale`] | The two site locales and their file and query suffixes |
//! | [`config`] | `config.toml` loading and validation |
//! | [`types`] | Shared serializable types (`ContentItem`, `DirectoryListing`, ...) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Two Layouts, One Address
//!
//! A short post is a single file, `blog/post.mdx`. A post with images is a
//! bundle, `blog/post/index.mdx`, with its assets next to it so `./figure.png`
//! links work. Both answer to the slug `post`. When both exist the flat file
//! wins, in resolution and in listings alike, and `folio check` reports it.
//!
//! ## Index Files Decide Bundle vs. Section
//!
//! A directory containing `index.mdx` is one item. A directory without it is
//! a section, optionally described by `_index.mdx`. This is the only rule,
//! which makes an accidental `index.mdx` in a category folder turn the
//! whole folder into a single page. `folio check` flags bundles that have
//! sub-directories or an `_index` file.
//!
//! ## Locale Fallback, Never Both
//!
//! Gujarati variants sit next to the default file (`post.gu.mdx`). A request
//! for `gu` prefers the variant and falls back to English. Listings show
//! exactly one variant per slug, chosen by the same rule.
//!
//! ## Broken Content Is Absent, Not Fatal
//!
//! A file with malformed front matter is logged with `tracing::warn!` and
//! behaves as if it didn't exist. One bad post never takes down a listing.

pub mod aggregate;
pub mod breadcrumbs;
pub mod check;
pub mod config;
pub mod frontmatter;
pub mod listing;
pub mod locale;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod page;
pub mod resolve;
pub mod site;
pub mod store;
pub mod types;

pub use locale::Locale;
pub use site::{ContentError, Site};
pub use types::{Breadcrumb, ContentItem, DirectoryEntry, DirectoryListing, Metadata, Section};

#[cfg(test)]
pub(crate) mod test_helpers;
