//! Template enumeration.
//! Walks the template tree once and records every entry that survives the path
//! filter, together with the solution file of the template.

use crate::config::Profile;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::ignore::PathFilter;
use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Kind of a template entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A single entry of the template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Path relative to the template root, `/` separated
    pub relative_path: String,
    pub kind: EntryKind,
}

impl ManifestEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Listing of a template tree, keyed and ordered by relative path.
///
/// Lexicographic order puts a directory before everything it contains, since the
/// directory path is a prefix of its children's paths.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    entries: BTreeMap<String, ManifestEntry>,
    descriptor: Option<PathBuf>,
}

impl Manifest {
    /// Walks `template_root` and builds the manifest.
    ///
    /// # Arguments
    /// * `template_root` - Template directory
    /// * `filter` - Decides which entries are left out; skipped directories are not descended
    /// * `profile` - Provides the descriptor extension
    ///
    /// # Errors
    /// * `Error::WalkError` if an entry cannot be read
    /// * `Error::MultipleDescriptorFiles` if more than one descriptor is found
    pub fn build<P: AsRef<Path>>(
        template_root: P,
        filter: &PathFilter,
        profile: &Profile,
    ) -> Result<Self> {
        let template_root = template_root.as_ref();
        let mut manifest = Manifest::default();

        let walker = WalkDir::new(template_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| match relative_to(template_root, entry.path()) {
                Ok(rel) => rel.is_empty() || !filter.should_skip(&rel, entry.file_type().is_dir()),
                // Keep it so the error surfaces below.
                Err(_) => true,
            });

        for dir_entry in walker {
            let dir_entry = dir_entry.map_err(|source| Error::WalkError {
                path: source
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| template_root.display().to_string()),
                source,
            })?;
            let relative_path = relative_to(template_root, dir_entry.path())?;
            if relative_path.is_empty() {
                continue;
            }

            let kind = if dir_entry.file_type().is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };

            if kind == EntryKind::File && profile.is_descriptor(dir_entry.path()) {
                manifest.set_descriptor(dir_entry.path())?;
            }

            debug!("Recording template entry: {}", relative_path);
            manifest.entries.insert(
                relative_path.clone(),
                ManifestEntry { relative_path, kind },
            );
        }

        Ok(manifest)
    }

    fn set_descriptor(&mut self, path: &Path) -> Result<()> {
        if let Some(first) = &self.descriptor {
            return Err(Error::MultipleDescriptorFiles {
                first: first.display().to_string(),
                second: path.display().to_string(),
            });
        }
        self.descriptor = Some(path.to_path_buf());
        Ok(())
    }

    /// Full path of the solution file, if the template has one.
    pub fn descriptor(&self) -> Option<&Path> {
        self.descriptor.as_deref()
    }

    /// Entries in lexicographic order of their relative path.
    pub fn entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.values()
    }

    pub fn get(&self, relative_path: &str) -> Option<&ManifestEntry> {
        self.entries.get(relative_path)
    }

    pub fn contains(&self, relative_path: &str) -> bool {
        self.entries.contains_key(relative_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn relative_to(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|e| Error::Other(anyhow::anyhow!("'{}': {}", path.display(), e)))?;
    relative.to_slash_string()
}
