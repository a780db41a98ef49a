//! Error handling for ouroboros.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

use crate::constants::exit_codes;

/// Errors that can occur while scaffolding a project from a template.
///
/// Every variant is fatal to the current run. Per-entry failures are wrapped in
/// [`Error::ProcessError`] so the manifest path that failed is always reported.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The template tree could not be walked.
    #[error("Cannot read '{path}' while walking the template. Original error: {source}")]
    WalkError {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Cannot proceed: template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    #[error("Cannot proceed: output directory '{output_dir}' is the template directory.")]
    OutputIsTemplateError { output_dir: String },

    #[error("Template entries '{first}' and '{second}' would both be written to '{target}'.")]
    DuplicateTargetError { first: String, second: String, target: String },

    #[error("No '{extension}' file was found within '{template_dir}'.")]
    MissingDescriptorFile { template_dir: String, extension: String },

    #[error("Found more than one descriptor file: '{first}' and '{second}'.")]
    MultipleDescriptorFiles { first: String, second: String },

    #[error("Failed to read '{path}'. Original error: {source}")]
    FileReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{path}'. Original error: {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create directory '{path}'. Original error: {source}")]
    DirectoryCreateError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Wraps the failure of a single manifest entry.
    #[error("Cannot process the template entry '{relative_path}'. {source}")]
    ProcessError {
        relative_path: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Cannot derive a project name from '{path}'.")]
    InvalidNameError { path: String },

    #[error("Failed to parse profile file '{path}'. Original error: {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("Failed to parse ignore patterns. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Attaches the manifest path of the entry being processed.
    pub fn in_entry<S: Into<String>>(self, relative_path: S) -> Self {
        Error::ProcessError { relative_path: relative_path.into(), source: Box::new(self) }
    }
}

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(exit_codes::FAILURE);
}
