use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Makes sure the destination root exists, creating missing parents.
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir).map_err(|source| Error::DirectoryCreateError {
        path: output_dir.display().to_string(),
        source,
    })?;
    Ok(output_dir.to_path_buf())
}

/// Creates a single directory. An existing directory counts as success.
pub fn create_dir<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    match fs::create_dir(dest_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dest_path.is_dir() => Ok(()),
        Err(source) => {
            Err(Error::DirectoryCreateError { path: dest_path.display().to_string(), source })
        }
    }
}

pub fn read_file<P: AsRef<Path>>(source_path: P) -> Result<String> {
    let source_path = source_path.as_ref();
    fs::read_to_string(source_path)
        .map_err(|source| Error::FileReadError { path: source_path.display().to_string(), source })
}

/// Writes `content` to `dest_path`, creating or truncating it.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    fs::write(dest_path, content)
        .map_err(|source| Error::FileWriteError { path: dest_path.display().to_string(), source })
}

/// Streams the bytes of `source_path` into `dest_path` and syncs the result to disk.
///
/// The destination is created or truncated. Both handles are closed when this
/// function returns, on success and on error.
pub fn copy_file<P: AsRef<Path>>(source_path: P, dest_path: P) -> Result<u64> {
    let source_path = source_path.as_ref();
    let dest_path = dest_path.as_ref();
    let read_err =
        |source| Error::FileReadError { path: source_path.display().to_string(), source };
    let write_err =
        |source| Error::FileWriteError { path: dest_path.display().to_string(), source };

    let mut reader = BufReader::new(File::open(source_path).map_err(read_err)?);
    let mut writer = BufWriter::new(File::create(dest_path).map_err(write_err)?);

    let copied = io::copy(&mut reader, &mut writer).map_err(|e| {
        // io::copy does not report which side failed; WriteZero only comes from the writer.
        match e.kind() {
            io::ErrorKind::WriteZero => write_err(e),
            _ => read_err(e),
        }
    })?;
    writer.flush().map_err(write_err)?;

    let file = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
    file.sync_all().map_err(write_err)?;

    Ok(copied)
}
