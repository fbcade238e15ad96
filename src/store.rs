//! Read-only access to the content tree.
//!
//! The [`ContentStore`] trait is the narrow seam between content resolution
//! and the filesystem: three read operations over paths relative to the
//! content root. Everything above it (resolver, lister, breadcrumbs,
//! aggregator) is written against the trait only.
//!
//! The production implementation is [`FsStore`], which reads a directory on
//! disk on every call. [`MemoryStore`] holds a tree in memory so resolution
//! rules can be exercised without touching the disk.
//!
//! Absence is not an error: a missing path is `Ok(None)`. Only unexpected
//! I/O failures (permissions, unreadable files) are reported as `Err`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Path escapes the content root: {0}")]
    OutsideRoot(PathBuf),
}

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
}

/// One child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    pub name: String,
    pub kind: NodeKind,
}

/// Read-only view of a content tree. Paths are relative to the content root;
/// the empty path is the root itself.
pub trait ContentStore: Send + Sync {
    /// Kind of the node at `path`, `None` if nothing is there.
    fn kind(&self, path: &Path) -> Result<Option<NodeKind>, StoreError>;

    /// Contents of the file at `path`, `None` if it isn't a file.
    fn read_to_string(&self, path: &Path) -> Result<Option<String>, StoreError>;

    /// Children of the directory at `path` in name order, `None` if it
    /// isn't a directory.
    fn read_dir(&self, path: &Path) -> Result<Option<Vec<StoreEntry>>, StoreError>;
}

/// Reject absolute paths and parent-directory components.
fn ensure_relative(path: &Path) -> Result<(), StoreError> {
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(StoreError::OutsideRoot(path.to_path_buf()));
    }
    Ok(())
}

fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

// =============================================================================
// Disk
// =============================================================================

/// Content tree backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf, StoreError> {
        ensure_relative(path)?;
        Ok(self.root.join(path))
    }

    /// Resolve a downloadable file inside the content root.
    ///
    /// `relative` comes straight from a request (`?path=resources/x.pdf`), so
    /// absolute paths and `..` components are refused with
    /// [`StoreError::OutsideRoot`]. Missing paths and directories are `None`.
    pub fn static_file(&self, relative: &str) -> Result<Option<PathBuf>, StoreError> {
        let rel = Path::new(relative.trim_start_matches('/'));
        let abs = self.absolute(rel)?;
        match self.kind(rel)? {
            Some(NodeKind::File) => Ok(Some(abs)),
            _ => Ok(None),
        }
    }
}

impl ContentStore for FsStore {
    fn kind(&self, path: &Path) -> Result<Option<NodeKind>, StoreError> {
        match fs::metadata(self.absolute(path)?) {
            Ok(meta) if meta.is_dir() => Ok(Some(NodeKind::Dir)),
            Ok(meta) if meta.is_file() => Ok(Some(NodeKind::File)),
            Ok(_) => Ok(None),
            Err(e) if is_absent(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn read_to_string(&self, path: &Path) -> Result<Option<String>, StoreError> {
        if self.kind(path)? != Some(NodeKind::File) {
            return Ok(None);
        }
        match fs::read_to_string(self.absolute(path)?) {
            Ok(content) => Ok(Some(content)),
            Err(e) if is_absent(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Option<Vec<StoreEntry>>, StoreError> {
        if self.kind(path)? != Some(NodeKind::Dir) {
            return Ok(None);
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(self.absolute(path)?)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                tracing::debug!(path = %entry.path().display(), "skipping non-UTF-8 name");
                continue;
            };
            // Follow symlinks so linked assets and folders list like real ones.
            let kind = match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_dir() => NodeKind::Dir,
                Ok(meta) if meta.is_file() => NodeKind::File,
                Ok(_) => continue,
                Err(e) if is_absent(&e) => continue,
                Err(e) => return Err(e.into()),
            };
            entries.push(StoreEntry { name, kind });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Some(entries))
    }
}

// =============================================================================
// Memory
// =============================================================================

/// Content tree held in memory. Directories are implied by file paths; empty
/// directories can be added with [`MemoryStore::with_dir`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert_file(path, content);
        self
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }

    pub fn insert_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    fn all_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.keys().chain(self.dirs.iter())
    }
}

impl ContentStore for MemoryStore {
    fn kind(&self, path: &Path) -> Result<Option<NodeKind>, StoreError> {
        ensure_relative(path)?;
        if self.files.contains_key(path) {
            return Ok(Some(NodeKind::File));
        }
        let is_dir = path.as_os_str().is_empty()
            || self.dirs.contains(path)
            || self.all_paths().any(|p| p != path && p.starts_with(path));
        Ok(is_dir.then_some(NodeKind::Dir))
    }

    fn read_to_string(&self, path: &Path) -> Result<Option<String>, StoreError> {
        ensure_relative(path)?;
        Ok(self.files.get(path).cloned())
    }

    fn read_dir(&self, path: &Path) -> Result<Option<Vec<StoreEntry>>, StoreError> {
        if self.kind(path)? != Some(NodeKind::Dir) {
            return Ok(None);
        }
        let mut children: BTreeMap<String, NodeKind> = BTreeMap::new();
        for p in self.all_paths() {
            let Ok(rest) = p.strip_prefix(path) else {
                continue;
            };
            let mut components = rest.components();
            let Some(first) = components.next() else {
                continue;
            };
            let name = first.as_os_str().to_string_lossy().to_string();
            let kind = if components.next().is_some() || self.dirs.contains(p) {
                NodeKind::Dir
            } else {
                NodeKind::File
            };
            // A name seen as a directory stays a directory.
            let slot = children.entry(name).or_insert(kind);
            if kind == NodeKind::Dir {
                *slot = NodeKind::Dir;
            }
        }
        Ok(Some(
            children
                .into_iter()
                .map(|(name, kind)| StoreEntry { name, kind })
                .collect(),
        ))
    }
}
