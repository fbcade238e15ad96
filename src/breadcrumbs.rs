//! Breadcrumb trails for content pages.
//!
//! A trail for `/resources/study-materials/16-it/sem-1/maths` built with
//! base section `resources/study-materials` and segments
//! `["16-it", "sem-1", "maths"]`:
//!
//! ```text
//! Content                         #                     (root_label)
//! Resources                       /resources
//! Study Materials                 /resources/study-materials
//! Information Technology (IT)     .../16-it             (config label)
//! Semester 1                      .../16-it/sem-1       (_index title)
//! Engineering Mathematics         .../sem-1/maths       (item title)
//! ```
//!
//! Each label is the first of:
//!
//! 1. the title of the segment's `_index` file,
//! 2. a label from `[breadcrumbs.labels]`,
//! 3. for the last segment only, the title of the item it resolves to,
//! 4. the humanized segment (`sem-1` → "Sem 1").
//!
//! Building never fails. A lookup that errors is logged and the next rule
//! applies, so the trail always has one crumb per segment after the fixed
//! prefix.

use crate::config::BreadcrumbConfig;
use crate::locale::Locale;
use crate::naming;
use crate::resolve::Resolver;
use crate::types::Breadcrumb;
use tracing::warn;

pub struct BreadcrumbBuilder<'a> {
    resolver: Resolver<'a>,
    config: &'a BreadcrumbConfig,
}

impl<'a> BreadcrumbBuilder<'a> {
    pub fn new(resolver: Resolver<'a>, config: &'a BreadcrumbConfig) -> Self {
        Self { resolver, config }
    }

    /// Number of crumbs emitted before the first path segment.
    pub fn prefix_len(&self, base_section: &str) -> usize {
        usize::from(self.config.root_label().is_some()) + split(base_section).count()
    }

    pub fn build<S: AsRef<str>>(&self, base_section: &str, segments: &[S], locale: Locale) -> Vec<Breadcrumb> {
        let mut crumbs = Vec::with_capacity(self.prefix_len(base_section) + segments.len());
        if let Some(label) = self.config.root_label() {
            crumbs.push(Breadcrumb {
                label: label.to_string(),
                href: "#".to_string(),
            });
        }

        let mut parent = String::new();
        for segment in split(base_section) {
            crumbs.push(self.crumb(&mut parent, segment, false, locale));
        }
        for (i, segment) in segments.iter().enumerate() {
            let last = i + 1 == segments.len();
            crumbs.push(self.crumb(&mut parent, segment.as_ref(), last, locale));
        }
        crumbs
    }

    /// Label `segment` under `parent`, then extend `parent` with it.
    fn crumb(&self, parent: &mut String, segment: &str, last: bool, locale: Locale) -> Breadcrumb {
        let label = self.label(parent, segment, last, locale);
        // An empty segment keeps its crumb but adds nothing to later hrefs.
        if !segment.is_empty() {
            if !parent.is_empty() {
                parent.push('/');
            }
            parent.push_str(segment);
        }
        Breadcrumb {
            label,
            href: format!("/{parent}"),
        }
    }

    fn label(&self, parent: &str, segment: &str, last: bool, locale: Locale) -> String {
        if segment.is_empty() {
            return String::new();
        }
        let path = if parent.is_empty() {
            segment.to_string()
        } else {
            format!("{parent}/{segment}")
        };

        match self.resolver.resolve_section_index(&path, locale) {
            Ok(Some(index)) => return index.metadata.title,
            Ok(None) => {}
            Err(e) => warn!(path = %path, error = %e, "breadcrumb section lookup failed"),
        }

        if let Some(label) = self.config.labels.get(segment) {
            return label.clone();
        }

        if last {
            match self.resolver.resolve(parent, segment, locale) {
                Ok(Some(item)) => return item.metadata.title,
                Ok(None) => {}
                Err(e) => warn!(path = %path, error = %e, "breadcrumb item lookup failed"),
            }
        }

        naming::humanize(segment)
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
