//! Common constants used throughout ouroboros.

/// Supported profile file names, looked up at the template root in this order
pub const CONFIG_FILES: [&str; 3] = ["ouroboros.json", "ouroboros.yaml", "ouroboros.yml"];

/// Directory names that are never part of a template: version control metadata,
/// IDE caches and build output.
pub const IGNORED_DIRECTORIES: &[&str] =
    &[".git", ".hg", ".svn", ".vs", ".idea", "bin", "obj", "packages"];

/// File names that are never part of a template
pub const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Extension of the solution file that lists the projects of a template
pub const DESCRIPTOR_EXTENSION: &str = ".sln";

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}
