//! Path filtering for template trees.
//! Leaves version control metadata, IDE caches, OS metadata and build output out
//! of the copy, together with any extra patterns listed in the profile.

use crate::constants::{CONFIG_FILES, IGNORED_DIRECTORIES, IGNORED_FILES};
use crate::error::Result;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::debug;

/// Decides which relative template paths are skipped.
///
/// Built-in names are compared against whole path segments, so `bin/` is skipped
/// while `binaries/` or `asset_packages/` are kept.
#[derive(Debug, Clone)]
pub struct PathFilter {
    directories: Vec<String>,
    files: Vec<String>,
    extra: GlobSet,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self {
            directories: IGNORED_DIRECTORIES.iter().map(|s| s.to_string()).collect(),
            files: IGNORED_FILES.iter().map(|s| s.to_string()).collect(),
            extra: GlobSet::empty(),
        }
    }
}

impl PathFilter {
    /// Creates a filter with the built-in names plus extra glob patterns.
    ///
    /// # Arguments
    /// * `patterns` - Glob patterns relative to the template root, e.g. `docs/**`
    ///
    /// # Errors
    /// * `Error::GlobSetParseError` if a pattern is not a valid glob
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }
            debug!("Adding ignore pattern: {} to globset", pattern);
            builder.add(GlobBuilder::new(pattern).literal_separator(true).build()?);
        }

        Ok(Self { extra: builder.build()?, ..Self::default() })
    }

    /// Whether the entry at `relative_path` must be left out.
    ///
    /// # Arguments
    /// * `relative_path` - Slash separated path relative to the template root
    /// * `is_dir` - Whether the entry is a directory
    pub fn should_skip(&self, relative_path: &str, is_dir: bool) -> bool {
        if relative_path.is_empty() {
            return true;
        }

        let segments: Vec<&str> = relative_path.split('/').collect();

        if segments.iter().any(|segment| self.directories.iter().any(|d| d == segment)) {
            return true;
        }

        if !is_dir {
            if let Some(file_name) = segments.last() {
                if self.files.iter().any(|f| f == file_name) {
                    return true;
                }
            }
            if segments.len() == 1 && CONFIG_FILES.contains(&relative_path) {
                return true;
            }
        }

        self.extra.is_match(relative_path)
    }
}
