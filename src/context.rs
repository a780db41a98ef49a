//! Per-run values shared by every stage of the pipeline.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::ext::PathExt;

/// Roots and name tokens of one instantiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub template_root: PathBuf,
    pub output_root: PathBuf,
    /// Token replaced in paths and contents, usually the template directory name
    pub template_name: String,
    /// Replacement token, the output directory name
    pub output_name: String,
}

impl RunContext {
    pub fn new<S: Into<String>>(
        template_root: PathBuf,
        output_root: PathBuf,
        template_name: S,
        output_name: S,
    ) -> Self {
        Self {
            template_root,
            output_root,
            template_name: template_name.into(),
            output_name: output_name.into(),
        }
    }

    /// Derives both name tokens from the final segments of the roots.
    ///
    /// # Arguments
    /// * `template_root` - Template directory
    /// * `output_root` - Destination directory, may not exist yet
    /// * `template_name` - Overrides the template token when set
    pub fn from_roots<P: AsRef<Path>>(
        template_root: P,
        output_root: P,
        template_name: Option<&str>,
    ) -> Result<Self> {
        let template_root = template_root.as_ref();
        let output_root = output_root.as_ref();

        let template_name = match template_name.filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None => template_root.name_token()?,
        };
        let output_name = output_root.name_token()?;

        Ok(Self::new(
            template_root.to_path_buf(),
            output_root.to_path_buf(),
            template_name,
            output_name,
        ))
    }

    /// Replaces every occurrence of the template token with the output token.
    ///
    /// # Examples
    /// ```
    /// use ouroboros::context::RunContext;
    ///
    /// let ctx = RunContext::new("Foo".into(), "Bar".into(), "Foo", "Bar");
    /// assert_eq!(ctx.rename("Foo/Foo.Tests/Foo.Tests.csproj"), "Bar/Bar.Tests/Bar.Tests.csproj");
    /// ```
    pub fn rename(&self, text: &str) -> String {
        if self.template_name.is_empty() {
            return text.to_string();
        }
        text.replace(&self.template_name, &self.output_name)
    }

    /// Absolute source path of a manifest entry.
    pub fn source_path(&self, relative_path: &str) -> PathBuf {
        join_relative(&self.template_root, relative_path)
    }

    /// Absolute destination path of an already renamed relative path.
    pub fn target_path(&self, renamed_relative_path: &str) -> PathBuf {
        join_relative(&self.output_root, renamed_relative_path)
    }
}

fn join_relative(root: &Path, relative_path: &str) -> PathBuf {
    relative_path.split('/').fold(root.to_path_buf(), |path, segment| path.join(segment))
}
