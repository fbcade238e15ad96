//! Slug resolution: which physical file backs a logical content address.
//!
//! An address is `(directory, slug, locale)`. The same logical item can be
//! stored flat or as a bundle, in the default locale or an alternate one.
//! Candidates are tried in a fixed order and the first existing file wins:
//!
//! ```text
//! 1. directory/slug.gu.mdx          (only when gu was requested)
//! 2. directory/slug.mdx
//! 3. directory/slug/index.gu.mdx    (only when gu was requested)
//! 4. directory/slug/index.mdx
//! ```
//!
//! A missing address is `Ok(None)`. So is a file whose front matter fails
//! to parse: the problem is logged for the author and the item behaves as
//! if it didn't exist. Only unexpected I/O failures come back as `Err`.

use crate::frontmatter;
use crate::locale::Locale;
use crate::naming::{self, BUNDLE_INDEX, SECTION_INDEX};
use crate::site::ContentError;
use crate::store::{ContentStore, NodeKind, StoreError};
use crate::types::{ContentItem, Layout};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A candidate file that exists, before it has been parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub path: PathBuf,
    pub layout: Layout,
    pub locale: Locale,
}

/// Convert a slash-separated directory (`"resources/study-materials"`) to a
/// store path. Empty segments are dropped, so `""` and `"/"` are the root.
pub fn content_dir(directory: &str) -> PathBuf {
    directory
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a dyn ContentStore,
    extension: &'a str,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a dyn ContentStore, extension: &'a str) -> Self {
        Self { store, extension }
    }

    pub fn store(&self) -> &'a dyn ContentStore {
        self.store
    }

    pub fn extension(&self) -> &'a str {
        self.extension
    }

    /// Resolve `slug` in `directory` for `locale`.
    ///
    /// `slug` may contain `/` to address a nested item directly
    /// (`resolve("resources", "sem-1/maths", ..)`).
    pub fn resolve(
        &self,
        directory: &str,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<ContentItem>, ContentError> {
        let dir = content_dir(directory);
        match self.locate(&dir, slug, locale)? {
            Some(found) => self.load(&found, leaf_name(slug)),
            None => Ok(None),
        }
    }

    /// Resolve the `_index` file describing the section at `directory`.
    pub fn resolve_section_index(
        &self,
        directory: &str,
        locale: Locale,
    ) -> Result<Option<ContentItem>, ContentError> {
        let dir = content_dir(directory);
        match self.locate_flat(&dir, SECTION_INDEX, locale)? {
            Some(found) => self.load(&found, SECTION_INDEX),
            None => Ok(None),
        }
    }

    /// Locales that have their own file for `slug` (flat or bundle),
    /// default first. Empty when the item doesn't exist at all.
    pub fn available_locales(&self, directory: &str, slug: &str) -> Result<Vec<Locale>, ContentError> {
        let dir = content_dir(directory);
        let mut locales = Vec::new();
        for locale in Locale::ALL {
            let flat = dir.join(naming::content_file_name(slug, locale, self.extension));
            let bundle = dir
                .join(slug)
                .join(naming::content_file_name(BUNDLE_INDEX, locale, self.extension));
            if self.is_file(&flat)? || self.is_file(&bundle)? {
                locales.push(locale);
            }
        }
        Ok(locales)
    }

    /// First existing candidate for `slug` in `dir`, flat before bundle.
    pub fn locate(&self, dir: &Path, slug: &str, locale: Locale) -> Result<Option<Located>, ContentError> {
        if let Some(found) = self.locate_flat(dir, slug, locale)? {
            return Ok(Some(found));
        }
        self.locate_bundle(dir, slug, locale)
    }

    /// `dir/slug.<locale>.ext`, then `dir/slug.ext`.
    pub fn locate_flat(&self, dir: &Path, slug: &str, locale: Locale) -> Result<Option<Located>, ContentError> {
        if slug.is_empty() {
            return Ok(None);
        }
        for candidate in locale.fallback_chain() {
            let path = dir.join(naming::content_file_name(slug, candidate, self.extension));
            if self.is_file(&path)? {
                return Ok(Some(Located {
                    path,
                    layout: Layout::Flat,
                    locale: candidate,
                }));
            }
        }
        Ok(None)
    }

    /// `dir/slug/index.<locale>.ext`, then `dir/slug/index.ext`.
    pub fn locate_bundle(&self, dir: &Path, slug: &str, locale: Locale) -> Result<Option<Located>, ContentError> {
        if slug.is_empty() {
            return Ok(None);
        }
        let bundle_dir = dir.join(slug);
        for candidate in locale.fallback_chain() {
            let path = bundle_dir.join(naming::content_file_name(BUNDLE_INDEX, candidate, self.extension));
            if self.is_file(&path)? {
                return Ok(Some(Located {
                    path,
                    layout: Layout::Bundle,
                    locale: candidate,
                }));
            }
        }
        Ok(None)
    }

    /// Whether `dir` holds an index file in any locale. This alone decides
    /// whether a directory is one item (bundle) or a category (section).
    pub fn has_bundle_index(&self, dir: &Path) -> Result<bool, ContentError> {
        for locale in Locale::ALL {
            if self.is_file(&dir.join(naming::content_file_name(BUNDLE_INDEX, locale, self.extension)))? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Read and parse a located file. Malformed content is logged and
    /// reported as absent.
    pub fn load(&self, found: &Located, slug: &str) -> Result<Option<ContentItem>, ContentError> {
        let content = match self.store.read_to_string(&found.path) {
            Ok(Some(content)) => content,
            Ok(None) => return Ok(None),
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(path = %found.path.display(), "skipping content that is not valid UTF-8");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match frontmatter::parse(&content) {
            Ok(doc) => {
                debug!(path = %found.path.display(), locale = %found.locale, "resolved content");
                Ok(Some(ContentItem {
                    slug: slug.to_string(),
                    metadata: doc.metadata,
                    body: doc.body,
                    source: found.path.clone(),
                    layout: found.layout,
                    locale: found.locale,
                }))
            }
            Err(e) => {
                warn!(path = %found.path.display(), error = %e, "skipping content with malformed front matter");
                Ok(None)
            }
        }
    }

    fn is_file(&self, path: &Path) -> Result<bool, ContentError> {
        match self.store.kind(path) {
            Ok(kind) => Ok(kind == Some(NodeKind::File)),
            // Addresses come from URLs; one that escapes the root simply
            // doesn't exist.
            Err(StoreError::OutsideRoot(p)) => {
                debug!(path = %p.display(), "ignoring address outside the content root");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Last path segment of a slug (`"sem-1/maths"` → `"maths"`).
fn leaf_name(slug: &str) -> &str {
    slug.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(slug)
}
