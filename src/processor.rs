//! Template instantiation.
//! Turns every manifest entry into a file operation against the output tree and
//! performs it: directories are created, project and source files are rewritten
//! with the new name and GUIDs, everything else is copied as is.

use log::{debug, info};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::config::Profile;
use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::guid::IdentifierMap;
use crate::ioutils::{copy_file, create_dir, read_file, write_file};
use crate::manifest::{Manifest, ManifestEntry};

/// What happens to a single manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    CreateDirectory { target: PathBuf },
    /// Rewrite the name token and GUIDs of a text file
    Transform { source: PathBuf, target: PathBuf },
    /// Copy bytes verbatim
    Copy { source: PathBuf, target: PathBuf },
}

impl fmt::Display for FileOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOperation::CreateDirectory { target } => {
                write!(f, "Creating directory '{}'", target.display())
            }
            FileOperation::Transform { source, target } => {
                write!(f, "Writing '{}' -> '{}'", source.display(), target.display())
            }
            FileOperation::Copy { source, target } => {
                write!(f, "Copying '{}' -> '{}'", source.display(), target.display())
            }
        }
    }
}

/// A planned operation together with the manifest entry it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub relative_path: String,
    pub target_relative_path: String,
    pub operation: FileOperation,
}

pub struct Processor<'a> {
    context: &'a RunContext,
    profile: &'a Profile,
    identifiers: Option<&'a IdentifierMap>,
    dry_run: bool,
}

impl<'a> Processor<'a> {
    pub fn new(
        context: &'a RunContext,
        profile: &'a Profile,
        identifiers: Option<&'a IdentifierMap>,
    ) -> Self {
        Self { context, profile, identifiers, dry_run: false }
    }

    /// Plans and logs operations without touching the output tree.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Decides what to do with a manifest entry.
    pub fn plan(&self, entry: &ManifestEntry) -> PlannedEntry {
        let target_relative_path = self.context.rename(&entry.relative_path);
        let source = self.context.source_path(&entry.relative_path);
        let target = self.context.target_path(&target_relative_path);

        let operation = if entry.is_dir() {
            FileOperation::CreateDirectory { target }
        } else if self.profile.classify(&entry.relative_path).is_transformable() {
            FileOperation::Transform { source, target }
        } else {
            FileOperation::Copy { source, target }
        };

        PlannedEntry { relative_path: entry.relative_path.clone(), target_relative_path, operation }
    }

    /// Replaces the name token, then every original GUID with its replacement.
    pub fn transform(&self, content: &str) -> String {
        let mut content = self.context.rename(content);
        if let Some(identifiers) = self.identifiers {
            for (original, replacement) in identifiers {
                content = content.replace(original.as_str(), replacement);
            }
        }
        content
    }

    /// Performs a planned operation.
    pub fn execute(&self, operation: &FileOperation) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }

        match operation {
            FileOperation::CreateDirectory { target } => create_dir(target),
            FileOperation::Transform { source, target } => {
                let content = read_file(source)?;
                write_file(&self.transform(&content), target)
            }
            FileOperation::Copy { source, target } => {
                let copied = copy_file(source, target)?;
                debug!("Copied {} bytes to {}", copied, target.display());
                Ok(())
            }
        }
    }

    /// Plans every manifest entry, failing if two entries rename to the same target.
    pub fn plan_all(&self, manifest: &Manifest) -> Result<Vec<PlannedEntry>> {
        let mut targets: HashMap<String, String> = HashMap::with_capacity(manifest.len());
        let mut planned = Vec::with_capacity(manifest.len());

        for entry in manifest.entries() {
            let entry = self.plan(entry);
            if let Some(first) =
                targets.insert(entry.target_relative_path.clone(), entry.relative_path.clone())
            {
                return Err(Error::DuplicateTargetError {
                    first,
                    second: entry.relative_path,
                    target: entry.target_relative_path,
                });
            }
            planned.push(entry);
        }

        Ok(planned)
    }

    /// Processes every manifest entry in order, stopping at the first failure.
    ///
    /// # Returns
    /// * `Result<Vec<PlannedEntry>>` - The entries that were processed
    ///
    /// # Errors
    /// * `Error::DuplicateTargetError` before anything is written, if two entries
    ///   rename to the same target
    /// * `Error::ProcessError` naming the relative path of the failing entry.
    ///   Entries written before the failure stay on disk.
    pub fn instantiate(&self, manifest: &Manifest) -> Result<Vec<PlannedEntry>> {
        let planned_entries = self.plan_all(manifest)?;
        let mut processed = Vec::with_capacity(planned_entries.len());

        for planned in planned_entries {
            self.execute(&planned.operation)
                .map_err(|e| e.in_entry(planned.relative_path.as_str()))?;

            let prefix = if self.dry_run { "[DRY RUN] " } else { "" };
            info!("{}{}", prefix, planned.operation);
            debug!("  {} -> {}", planned.relative_path, planned.target_relative_path);
            processed.push(planned);
        }

        Ok(processed)
    }
}
