//! ouroboros creates a new project from an existing one.
//! It copies a template tree, renames the project throughout file names and
//! contents, and can give the copy its own project GUIDs.

/// Command-line interface and run orchestration
pub mod cli;

/// Extension tables and profile files
pub mod config;

pub mod constants;

/// Values shared by every stage of a run
pub mod context;

/// Error types and handling
pub mod error;

/// Extension traits for std types
pub mod ext;

/// Project GUID extraction and regeneration
pub mod guid;

/// Paths left out of the copy
pub mod ignore;

/// A set of helpers for working with the file system.
pub mod ioutils;

pub mod logger;

/// Enumeration of the template tree
pub mod manifest;

/// Creation of the output tree
pub mod processor;
