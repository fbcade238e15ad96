//! Whole-tree validation for content authors.
//!
//! Resolution is forgiving at request time: a file with broken front matter
//! is simply absent, and a directory with an `index.mdx` silently becomes a
//! single item. That keeps the site up, but hides mistakes. `folio check`
//! walks the tree once and reports them:
//!
//! ```text
//! content/
//! ├── blog/
//! │   ├── broken.mdx            # malformed front matter
//! │   ├── post.mdx              # same slug stored flat ...
//! │   └── post/index.mdx        # ... and as a bundle (flat wins)
//! └── resources/
//!     └── sem-1/
//!         ├── index.mdx         # turns sem-1 into a bundle, so:
//!         ├── _index.mdx        #   section metadata is ignored
//!         └── maths/            #   sub-directories are unreachable
//! ```
//!
//! Hidden entries and underscore-prefixed directories are skipped, like
//! everywhere else. `_index` files are still parsed.

use crate::config::SiteConfig;
use crate::frontmatter;
use crate::locale::Locale;
use crate::naming::{self, BUNDLE_INDEX, SECTION_INDEX};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Something an author should fix. Paths are relative to the content root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// A content file that resolves as absent.
    MalformedFrontMatter { path: PathBuf, reason: String },
    /// A bundle with sub-directories, which can never be listed or resolved.
    BundleWithSubdirectories { bundle: PathBuf, dirs: Vec<String> },
    /// A bundle with an `_index` file, which is never read.
    BundleWithSectionIndex { bundle: PathBuf },
    /// A slug stored both flat and as a bundle, where every locale that
    /// could reach the bundle resolves to the flat file instead.
    FlatAndBundle { flat: PathBuf, bundle: PathBuf },
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Issue::MalformedFrontMatter { path, reason } => {
                write!(f, "{}: {}", path.display(), reason)
            }
            Issue::BundleWithSubdirectories { bundle, dirs } => write!(
                f,
                "{}/: has an index file, so sub-directories are unreachable: {}",
                bundle.display(),
                dirs.join(", ")
            ),
            Issue::BundleWithSectionIndex { bundle } => write!(
                f,
                "{}/: has an index file, so its _index metadata is ignored",
                bundle.display()
            ),
            Issue::FlatAndBundle { flat, bundle } => write!(
                f,
                "{} shadows bundle {}/",
                flat.display(),
                bundle.display()
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub files_checked: usize,
    pub bundles: usize,
    pub sections: usize,
    pub issues: Vec<Issue>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Keep the root, `_index` files, and everything not reserved.
fn is_walked(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return false;
    }
    !(entry.file_type().is_dir() && name.starts_with('_'))
}

/// Walk the content tree at `root` and collect authoring issues.
pub fn check(root: &Path, config: &SiteConfig) -> Result<CheckReport, CheckError> {
    let ext = config.extension.as_str();
    let mut report = CheckReport::default();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(is_walked)
    {
        let entry = entry?;
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path()).to_path_buf();

        if entry.file_type().is_file() {
            let name = entry.file_name().to_string_lossy();
            if naming::parse_content_name(&name, ext).is_none() {
                continue;
            }
            report.files_checked += 1;
            if let Some(reason) = front_matter_problem(entry.path())? {
                report.issues.push(Issue::MalformedFrontMatter { path: rel, reason });
            }
        } else if entry.depth() > 0 {
            check_directory(entry.path(), &rel, ext, &mut report)?;
        }
    }
    debug!(files = report.files_checked, issues = report.issues.len(), "check finished");
    Ok(report)
}

fn front_matter_problem(path: &Path) -> Result<Option<String>, CheckError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            return Ok(Some("not valid UTF-8".to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(frontmatter::parse(&content).err().map(|e| e.to_string()))
}

fn any_locale_file(dir: &Path, slug: &str, ext: &str) -> Option<PathBuf> {
    Locale::ALL
        .into_iter()
        .map(|locale| dir.join(naming::content_file_name(slug, locale, ext)))
        .find(|path| path.is_file())
}

/// The flat file that hides the bundle at `bundle` in every locale whose
/// fallback chain reaches a bundle variant, if there is one.
fn shadowing_flat_file(parent: &Path, slug: &str, bundle: &Path, ext: &str) -> Option<PathBuf> {
    let first_in = |dir: &Path, name: &str, chain: &[Locale]| {
        chain
            .iter()
            .map(|&locale| dir.join(naming::content_file_name(name, locale, ext)))
            .find(|path| path.is_file())
    };

    let mut shadowing = None;
    for locale in Locale::ALL {
        let chain = locale.fallback_chain();
        if first_in(bundle, BUNDLE_INDEX, chain.as_slice()).is_none() {
            continue;
        }
        let flat = first_in(parent, slug, chain.as_slice())?;
        shadowing.get_or_insert(flat);
    }
    shadowing
}

fn check_directory(path: &Path, rel: &Path, ext: &str, report: &mut CheckReport) -> Result<(), CheckError> {
    if any_locale_file(path, BUNDLE_INDEX, ext).is_none() {
        report.sections += 1;
        return Ok(());
    }
    report.bundles += 1;

    let mut dirs = Vec::new();
    for child in fs::read_dir(path)? {
        let child = child?;
        let name = child.file_name().to_string_lossy().to_string();
        if !name.starts_with('.') && child.path().is_dir() {
            dirs.push(name);
        }
    }
    if !dirs.is_empty() {
        dirs.sort();
        report.issues.push(Issue::BundleWithSubdirectories {
            bundle: rel.to_path_buf(),
            dirs,
        });
    }

    if any_locale_file(path, SECTION_INDEX, ext).is_some() {
        report.issues.push(Issue::BundleWithSectionIndex {
            bundle: rel.to_path_buf(),
        });
    }

    if let (Some(parent), Some(slug)) = (path.parent(), path.file_name())
        && let Some(flat) = shadowing_flat_file(parent, &slug.to_string_lossy(), path, ext)
    {
        let flat_rel = rel.with_file_name(flat.file_name().unwrap_or_default());
        report.issues.push(Issue::FlatAndBundle {
            flat: flat_rel,
            bundle: rel.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn run(tmp: &TempDir) -> CheckReport {
        check(tmp.path(), &SiteConfig::default()).unwrap()
    }

    #[test]
    fn clean_tree() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "blog/_index.mdx", &doc("Blog"));
        write_file(tmp.path(), "blog/post-a.mdx", &doc("A"));
        write_file(tmp.path(), "blog/post-b/index.mdx", &doc("B"));
        write_file(tmp.path(), "blog/post-b/diagram.png", "png");

        let report = run(&tmp);
        assert!(report.is_clean(), "{:?}", report.issues);
        assert_eq!(report.files_checked, 3);
        assert_eq!(report.bundles, 1);
        assert_eq!(report.sections, 1);
    }

    #[test]
    fn reports_malformed_front_matter() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "blog/no-title.mdx", "---\ndate: 2024-01-01\n---\n");
        write_file(tmp.path(), "blog/_index.gu.mdx", "no block");
        fs::write(tmp.path().join("blog/binary.mdx"), [0xff, 0xfe, 0x00]).unwrap();

        let report = run(&tmp);
        let paths: Vec<PathBuf> = report
            .issues
            .iter()
            .filter_map(|i| match i {
                Issue::MalformedFrontMatter { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("blog/_index.gu.mdx"),
                PathBuf::from("blog/binary.mdx"),
                PathBuf::from("blog/no-title.mdx"),
            ]
        );
    }

    #[test]
    fn reports_bundle_footguns() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "resources/sem-1/index.mdx", &doc("Sem 1"));
        write_file(tmp.path(), "resources/sem-1/_index.mdx", &doc("Semester 1"));
        write_file(tmp.path(), "resources/sem-1/maths/notes.mdx", &doc("Notes"));

        let report = run(&tmp);
        assert!(report.issues.contains(&Issue::BundleWithSubdirectories {
            bundle: PathBuf::from("resources/sem-1"),
            dirs: vec!["maths".into()],
        }));
        assert!(report.issues.contains(&Issue::BundleWithSectionIndex {
            bundle: PathBuf::from("resources/sem-1"),
        }));
    }

    #[test]
    fn reports_flat_and_bundle_with_same_slug() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "blog/post.mdx", &doc("Flat"));
        write_file(tmp.path(), "blog/post/index.mdx", &doc("Bundle"));
        write_file(tmp.path(), "blog/post/index.gu.mdx", &doc("Bundle-gu"));

        let report = run(&tmp);
        assert_eq!(
            report.issues,
            vec![Issue::FlatAndBundle {
                flat: PathBuf::from("blog/post.mdx"),
                bundle: PathBuf::from("blog/post"),
            }]
        );
    }

    #[test]
    fn gujarati_flat_file_does_not_hide_english_bundle() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "blog/post.gu.mdx", &doc("Flat-gu"));
        write_file(tmp.path(), "blog/post/index.mdx", &doc("Bundle"));

        let report = run(&tmp);
        assert!(report.is_clean(), "{:?}", report.issues);
    }

    #[test]
    fn english_flat_file_hides_gujarati_only_bundle() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "blog/post.mdx", &doc("Flat"));
        write_file(tmp.path(), "blog/post/index.gu.mdx", &doc("Bundle-gu"));

        let report = run(&tmp);
        assert_eq!(
            report.issues,
            vec![Issue::FlatAndBundle {
                flat: PathBuf::from("blog/post.mdx"),
                bundle: PathBuf::from("blog/post"),
            }]
        );
    }

    #[test]
    fn uppercase_extension_is_not_checked_as_content() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "blog/a.mdx", &doc("A"));
        write_file(tmp.path(), "blog/Notes.MDX", "no front matter");

        let report = run(&tmp);
        assert!(report.is_clean(), "{:?}", report.issues);
        assert_eq!(report.files_checked, 1);
    }

    #[test]
    fn skips_reserved_directories() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "_drafts/broken.mdx", "nope");
        write_file(tmp.path(), ".git/broken.mdx", "nope");
        write_file(tmp.path(), "blog/ok.mdx", &doc("Ok"));

        let report = run(&tmp);
        assert!(report.is_clean());
        assert_eq!(report.files_checked, 1);
    }

    #[test]
    fn issue_messages_name_the_path() {
        let issue = Issue::FlatAndBundle {
            flat: PathBuf::from("blog/post.mdx"),
            bundle: PathBuf::from("blog/post"),
        };
        assert_eq!(issue.to_string(), "blog/post.mdx shadows bundle blog/post/");
    }
}
