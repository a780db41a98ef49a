use std::path::{Component, Path};

use crate::error::{Error, Result};

/// Extension trait for Path to provide convenient string conversion methods
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use ouroboros::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("test");
    /// assert_eq!(path.to_str_checked().unwrap(), "test");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Joins the normal components of the path with `/`, whatever the platform separator is.
    ///
    /// # Examples
    /// ```
    /// use ouroboros::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("Foo").join("Properties").join("AssemblyInfo.cs");
    /// assert_eq!(path.to_slash_string().unwrap(), "Foo/Properties/AssemblyInfo.cs");
    /// ```
    fn to_slash_string(&self) -> Result<String>;

    /// Returns the final segment of the path, which is used as the project name token.
    ///
    /// Paths such as `.` or `foo/..` have no final segment of their own, so they are
    /// canonicalized first.
    fn name_token(&self) -> Result<String>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn to_slash_string(&self) -> Result<String> {
        let mut parts = Vec::new();
        for component in self.components() {
            if let Component::Normal(part) = component {
                parts.push(Path::new(part).to_str_checked()?);
            }
        }
        Ok(parts.join("/"))
    }

    fn name_token(&self) -> Result<String> {
        let invalid = || Error::InvalidNameError { path: self.display().to_string() };

        let resolved = match self.file_name() {
            Some(name) => return Ok(Path::new(name).to_str_checked()?.to_string()),
            None => self.canonicalize().map_err(|_| invalid())?,
        };

        let name = resolved.file_name().ok_or_else(invalid)?;
        Ok(Path::new(name).to_str_checked()?.to_string())
    }
}
