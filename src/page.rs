//! Request-level resolution: what to render for a content URL.
//!
//! A route like `/resources/study-materials/[...slug]` hands over a base
//! section and the remaining path segments. The segments either name an
//! article (flat file or bundle) or a directory to render as a listing.
//! Articles win when both exist.
//!
//! Relative asset links in an article body (`./diagram.png`) resolve against
//! [`Page::Article::asset_base`]: the bundle's own directory, or the parent
//! directory of a flat file.

use crate::locale::Locale;
use crate::site::{ContentError, Site};
use crate::store::ContentStore;
use crate::types::{Breadcrumb, ContentItem, DirectoryListing, Layout};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Page {
    Article {
        item: ContentItem,
        breadcrumbs: Vec<Breadcrumb>,
        /// URL directory for `./` asset links, always with a leading `/`.
        asset_base: String,
        /// Locales with their own file for this article, for a language switch.
        locales: Vec<Locale>,
    },
    Listing {
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        index: Option<ContentItem>,
        listing: DirectoryListing,
        breadcrumbs: Vec<Breadcrumb>,
    },
}

impl Page {
    pub fn title(&self) -> &str {
        match self {
            Page::Article { item, .. } => &item.metadata.title,
            Page::Listing { title, .. } => title,
        }
    }

    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        match self {
            Page::Article { breadcrumbs, .. } | Page::Listing { breadcrumbs, .. } => breadcrumbs,
        }
    }
}

/// Resolve `base/segments..` to an article or a listing. `None` means the
/// page layer should answer 404.
pub fn resolve_page<S: ContentStore, T: AsRef<str>>(
    site: &Site<S>,
    base: &str,
    segments: &[T],
    locale: Locale,
) -> Result<Option<Page>, ContentError> {
    let segments: Vec<&str> = segments
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.is_empty())
        .collect();
    let breadcrumbs = site.breadcrumbs().build(base, &segments, locale);
    let resolver = site.resolver();

    if !segments.is_empty() {
        let slug = segments.join("/");
        if let Some(item) = resolver.resolve(base, &slug, locale)? {
            let asset_dir = match item.layout {
                Layout::Bundle => url_path(base, &segments),
                Layout::Flat => url_path(base, &segments[..segments.len() - 1]),
            };
            let locales = resolver.available_locales(base, &slug)?;
            return Ok(Some(Page::Article {
                item,
                breadcrumbs,
                asset_base: asset_dir,
                locales,
            }));
        }
    }

    let directory = url_path(base, &segments);
    let index = resolver.resolve_section_index(&directory, locale)?;
    let listing = site.lister().list(&directory, locale)?;
    if index.is_none() && listing.is_empty() {
        return Ok(None);
    }
    let title = match (&index, segments.last()) {
        (Some(index), _) => index.metadata.title.clone(),
        (None, Some(last)) => last.to_string(),
        (None, None) => base.trim_matches('/').to_string(),
    };
    Ok(Some(Page::Listing {
        title,
        index,
        listing,
        breadcrumbs,
    }))
}

/// `/base/seg/...` with empty parts dropped.
fn url_path(base: &str, segments: &[&str]) -> String {
    let parts: Vec<&str> = base
        .split('/')
        .chain(segments.iter().copied())
        .filter(|s| !s.is_empty())
        .collect();
    format!("/{}", parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::store::MemoryStore;
    use crate::test_helpers::*;

    fn site() -> Site<MemoryStore> {
        let store = MemoryStore::new()
            .with_file("blog/_index.mdx", doc_with("Blog Home", "description: Writing"))
            .with_file("blog/post-a.mdx", doc("A"))
            .with_file("blog/post-a.gu.mdx", doc("A-gu"))
            .with_file("blog/post-b/index.mdx", doc("B"))
            .with_file("blog/post-b/diagram.png", "png")
            .with_file("resources/study-materials/16-it/sem-1/maths.mdx", doc("Maths"))
            .with_dir("resources/empty");
        Site::new(store, SiteConfig::default())
    }

    #[test]
    fn flat_article() {
        let site = site();
        let page = resolve_page(&site, "blog", &["post-a"], Locale::Gu).unwrap().unwrap();

        let Page::Article { item, asset_base, locales, breadcrumbs } = page else {
            panic!("expected article, got {page:?}");
        };
        assert_eq!(item.metadata.title, "A-gu");
        assert_eq!(asset_base, "/blog");
        assert_eq!(locales, vec![Locale::En, Locale::Gu]);
        assert_eq!(crumb_labels(&breadcrumbs), vec!["Content", "Blog Home", "A-gu"]);
    }

    #[test]
    fn bundle_article_assets_live_in_bundle() {
        let site = site();
        let page = resolve_page(&site, "blog", &["post-b"], Locale::En).unwrap().unwrap();

        let Page::Article { asset_base, .. } = &page else {
            panic!("expected article, got {page:?}");
        };
        assert_eq!(asset_base, "/blog/post-b");
        assert_eq!(page.title(), "B");
    }

    #[test]
    fn nested_flat_article() {
        let site = site();
        let page = resolve_page(
            &site,
            "resources/study-materials",
            &["16-it", "sem-1", "maths"],
            Locale::En,
        )
        .unwrap()
        .unwrap();

        let Page::Article { asset_base, .. } = &page else {
            panic!("expected article, got {page:?}");
        };
        assert_eq!(asset_base, "/resources/study-materials/16-it/sem-1");
        assert_eq!(page.breadcrumbs().len(), 6);
    }

    #[test]
    fn base_section_listing_uses_index() {
        let site = site();
        let page = resolve_page(&site, "blog", &[] as &[&str], Locale::En).unwrap().unwrap();

        let Page::Listing { title, index, listing, .. } = page else {
            panic!("expected listing, got {page:?}");
        };
        assert_eq!(title, "Blog Home");
        assert_eq!(index.unwrap().metadata.description.as_deref(), Some("Writing"));
        assert_eq!(item_slugs(&listing.items), vec!["post-a", "post-b"]);
    }

    #[test]
    fn listing_without_index_titled_by_segment() {
        let site = site();
        let page = resolve_page(&site, "resources/study-materials", &["16-it"], Locale::En)
            .unwrap()
            .unwrap();

        assert_eq!(page.title(), "16-it");
        let Page::Listing { listing, .. } = page else {
            panic!("expected listing");
        };
        find_section(&listing.sections, "sem-1");
    }

    #[test]
    fn missing_or_empty_is_none() {
        let site = site();
        assert!(resolve_page(&site, "blog", &["nope"], Locale::En).unwrap().is_none());
        assert!(resolve_page(&site, "resources", &["empty"], Locale::En).unwrap().is_none());
        assert!(resolve_page(&site, "blog", &["..", "resources"], Locale::En).unwrap().is_none());
    }
}
