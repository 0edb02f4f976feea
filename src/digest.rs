//! Output digests using BLAKE3.
//!
//! Snapshots of declared output paths, compared across runs to check that the
//! generators are idempotent (same inputs, same output bytes).

use crate::error::GenerateError;
use blake3::Hasher;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Hex-encoded BLAKE3 digest of an output, or `None` when the path does not exist.
pub type OutputDigest = Option<String>;

/// Digests of a set of output paths, keyed by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputSnapshot {
    pub digests: BTreeMap<PathBuf, OutputDigest>,
}

/// Paths whose digests differ between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotDiff {
    pub added: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
    pub changed: Vec<PathBuf>,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Every differing path, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .added
            .iter()
            .chain(&self.removed)
            .chain(&self.changed)
            .cloned()
            .collect();
        paths.sort();
        paths
    }
}

impl OutputSnapshot {
    /// Hash each path. Files hash their contents; directories hash every file under them.
    pub fn capture<I>(paths: I) -> Result<Self, GenerateError>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut digests = BTreeMap::new();
        for path in paths {
            let digest = digest_path(&path)?;
            digests.insert(path, digest);
        }
        Ok(Self { digests })
    }

    pub fn get(&self, path: &Path) -> Option<&OutputDigest> {
        self.digests.get(path)
    }

    /// Paths that exist on disk.
    pub fn present(&self) -> impl Iterator<Item = &PathBuf> {
        self.digests
            .iter()
            .filter(|(_, d)| d.is_some())
            .map(|(p, _)| p)
    }

    /// Compare `self` (earlier) against `later`.
    pub fn diff(&self, later: &OutputSnapshot) -> SnapshotDiff {
        let mut diff = SnapshotDiff::default();
        let empty = None;
        let keys: std::collections::BTreeSet<&PathBuf> =
            self.digests.keys().chain(later.digests.keys()).collect();

        for key in keys {
            let before = self.digests.get(key).unwrap_or(&empty);
            let after = later.digests.get(key).unwrap_or(&empty);
            match (before, after) {
                (None, Some(_)) => diff.added.push(key.clone()),
                (Some(_), None) => diff.removed.push(key.clone()),
                (Some(a), Some(b)) if a != b => diff.changed.push(key.clone()),
                _ => {}
            }
        }
        diff
    }
}

/// Digest a single file or directory. Missing paths yield `None`.
pub fn digest_path(path: &Path) -> Result<OutputDigest, GenerateError> {
    if !path.exists() {
        return Ok(None);
    }
    if path.is_file() {
        let bytes = std::fs::read(path)?;
        return Ok(Some(blake3::hash(&bytes).to_hex().to_string()));
    }

    // Directory: hash ("file" || relative path || content hash) per file, sorted by name
    let mut hasher = Hasher::new();
    hasher.update(b"dir");
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            GenerateError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(path)
            .unwrap_or_else(|_| entry.path())
            .to_string_lossy()
            .into_owned();
        let content = blake3::hash(&std::fs::read(entry.path())?);
        hasher.update(b"file");
        hasher.update(&(relative.len() as u64).to_be_bytes());
        hasher.update(relative.as_bytes());
        hasher.update(content.as_bytes());
    }
    Ok(Some(hex::encode(hasher.finalize().as_bytes())))
}
