//! Entry point tying a content store to its configuration.
//!
//! A [`Site`] is cheap to build and holds no cached state: every call reads
//! the store again. The page layer typically opens one per request (or keeps
//! one around, which is equally correct since nothing is cached).
//!
//! ```no_run
//! use folio::{Locale, Site};
//!
//! let site = Site::open("content")?;
//! let post = site.resolver().resolve("blog", "post-a", Locale::Gu)?;
//! let crumbs = site.breadcrumbs().build("blog", &["post-a"], Locale::Gu);
//! # Ok::<(), folio::ContentError>(())
//! ```

use crate::aggregate::Aggregator;
use crate::breadcrumbs::BreadcrumbBuilder;
use crate::config::{self, ConfigError, SiteConfig};
use crate::listing::Lister;
use crate::resolve::Resolver;
use crate::store::{ContentStore, FsStore, StoreError};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// A content tree plus the configuration it was authored against.
#[derive(Debug, Clone)]
pub struct Site<S = FsStore> {
    store: S,
    config: SiteConfig,
}

impl Site<FsStore> {
    /// Open a content directory on disk, loading its `config.toml` if any.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, ContentError> {
        let root = root.as_ref();
        let config = config::load_config(root)?;
        Ok(Self::new(FsStore::new(root), config))
    }
}

impl<S: ContentStore> Site<S> {
    pub fn new(store: S, config: SiteConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.store, &self.config.extension)
    }

    pub fn lister(&self) -> Lister<'_> {
        Lister::new(self.resolver())
    }

    pub fn breadcrumbs(&self) -> BreadcrumbBuilder<'_> {
        BreadcrumbBuilder::new(self.resolver(), &self.config.breadcrumbs)
    }

    pub fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::new(self.lister())
    }
}
