//! Profile handling for ouroboros.
//! A profile tells the engine which file extensions hold the project name and
//! therefore get rewritten, which extension marks the solution file, and which
//! extra paths to leave out of the copy.

use crate::constants::{CONFIG_FILES, DESCRIPTOR_EXTENSION};
use crate::error::{Error, Result};
use indexmap::IndexSet;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Extensions of files that contain code and may reference the project name.
const SOURCE_EXTENSIONS: &[&str] = &[
    ".cs", ".vb", ".fs", ".fsi", ".fsx", ".cshtml", ".vbhtml", ".razor", ".xaml", ".aspx",
    ".ascx", ".asax", ".ashx", ".asmx", ".master", ".svc", ".config", ".resx", ".settings",
    ".json", ".xml", ".tt", ".sql", ".ps1", ".cmd", ".md", ".txt",
];

/// Extensions of solution and project descriptors.
const PROJECT_EXTENSIONS: &[&str] = &[
    ".sln", ".csproj", ".vbproj", ".fsproj", ".sqlproj", ".shproj", ".projitems", ".props",
    ".targets", ".nuspec", ".user", ".pubxml",
];

/// Category of a template file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    /// Code or text that may contain the project name
    Source,
    /// Solution or project descriptor
    Project,
    /// Anything else, copied byte for byte
    Other,
}

impl FileCategory {
    /// Whether files of this category are rewritten rather than copied.
    pub fn is_transformable(self) -> bool {
        matches!(self, FileCategory::Source | FileCategory::Project)
    }
}

/// Raw profile as it appears in `ouroboros.json` / `ouroboros.yaml`.
/// Every key is optional and falls back to the built-in dotnet profile.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProfile {
    descriptor_extension: Option<String>,
    source_extensions: Option<Vec<String>>,
    project_extensions: Option<Vec<String>>,
    #[serde(default)]
    ignore: Vec<String>,
}

/// The extension tables and extra ignore patterns used for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub descriptor_extension: String,
    pub source_extensions: IndexSet<String>,
    pub project_extensions: IndexSet<String>,
    /// Extra glob patterns, relative to the template root
    pub ignore: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Profile::dotnet()
    }
}

/// Lower-cases an extension and makes sure it starts with a dot.
fn normalize_extension<S: AsRef<str>>(ext: S) -> String {
    let ext = ext.as_ref().trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

fn extension_set<I, S>(exts: I) -> IndexSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    exts.into_iter().map(normalize_extension).collect()
}

impl Profile {
    /// Built-in profile for Visual Studio solutions.
    pub fn dotnet() -> Self {
        Self {
            descriptor_extension: DESCRIPTOR_EXTENSION.to_string(),
            source_extensions: extension_set(SOURCE_EXTENSIONS),
            project_extensions: extension_set(PROJECT_EXTENSIONS),
            ignore: Vec::new(),
        }
    }

    /// Classifies a file by its lower-cased extension.
    ///
    /// # Examples
    /// ```
    /// use ouroboros::config::{FileCategory, Profile};
    ///
    /// let profile = Profile::dotnet();
    /// assert_eq!(profile.classify("Foo/Program.CS"), FileCategory::Source);
    /// assert_eq!(profile.classify("Foo/Foo.csproj"), FileCategory::Project);
    /// assert_eq!(profile.classify("Foo/logo.png"), FileCategory::Other);
    /// ```
    pub fn classify<P: AsRef<Path>>(&self, path: P) -> FileCategory {
        let ext = match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) => normalize_extension(ext),
            None => return FileCategory::Other,
        };

        if self.source_extensions.contains(&ext) {
            FileCategory::Source
        } else if self.project_extensions.contains(&ext) {
            FileCategory::Project
        } else {
            FileCategory::Other
        }
    }

    /// Whether the path carries the descriptor extension (case-insensitive).
    pub fn is_descriptor<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| normalize_extension(ext) == self.descriptor_extension)
    }

    /// Parses profile content. JSON is tried first, then YAML.
    pub fn parse<S: AsRef<str>>(content: S, origin: &Path) -> Result<Self> {
        let content = content.as_ref();
        let raw: RawProfile = match serde_json::from_str(content) {
            Ok(raw) => raw,
            Err(_) => serde_yaml::from_str(content).map_err(|e| Error::ConfigParseError {
                path: origin.display().to_string(),
                message: e.to_string(),
            })?,
        };

        let mut profile = Profile::dotnet();
        if let Some(ext) = raw.descriptor_extension {
            profile.descriptor_extension = normalize_extension(ext);
        }
        if let Some(exts) = raw.source_extensions {
            profile.source_extensions = extension_set(exts);
        }
        if let Some(exts) = raw.project_extensions {
            profile.project_extensions = extension_set(exts);
        }
        profile.ignore = raw.ignore;

        if profile.descriptor_extension == "." {
            return Err(Error::ConfigError(format!(
                "'{}' sets an empty descriptor_extension",
                origin.display()
            )));
        }

        Ok(profile)
    }
}

/// Finds the first profile file present at the template root.
pub fn find_profile_file<P: AsRef<Path>>(template_root: P) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|file| template_root.as_ref().join(file))
        .find(|path| path.is_file())
}

/// Loads the profile for a run.
///
/// # Arguments
/// * `template_root` - Template directory, searched for `ouroboros.{json,yaml,yml}`
/// * `explicit` - Profile file given on the command line, takes precedence
///
/// # Returns
/// * `Result<Profile>` - The loaded profile, or the built-in dotnet profile when
///   no profile file exists
pub fn load_profile<P: AsRef<Path>>(template_root: P, explicit: Option<&Path>) -> Result<Profile> {
    let profile_path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match find_profile_file(&template_root) {
            Some(path) => path,
            None => {
                debug!("No profile file found, using the built-in dotnet profile.");
                return Ok(Profile::dotnet());
            }
        },
    };

    debug!("Loading profile from {}", profile_path.display());
    let content = std::fs::read_to_string(&profile_path).map_err(|source| {
        Error::FileReadError { path: profile_path.display().to_string(), source }
    })?;
    Profile::parse(content, &profile_path)
}
