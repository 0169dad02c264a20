use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::Path,
};

use crate::error::{FileSystemError, FileSystemResult};

pub trait FileSystemProvider {
    /// Creates a directory structure if it doesn't exist.
    ///
    /// If the directory already exists, this function does nothing. If the directory structure
    /// exists but is not a directory, this function returns an error.
    ///
    /// # Errors
    ///
    /// * [`FileSystemError::Directory`] if the directory could not be created.
    /// * [`FileSystemError::NotADirectory`] if the path exists but is not a directory.
    fn ensure_dir_exists<P: AsRef<Path>>(&self, path: P) -> FileSystemResult<()>;

    /// Reads a file to a string, treating a missing file as `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`FileSystemError::File`] for any failure other than the file not existing.
    fn read_optional<P: AsRef<Path>>(&self, path: P) -> FileSystemResult<Option<String>>;

    /// Replaces the contents of `path` with `content` in a single step.
    ///
    /// The content is written to a temporary file next to the target, synced, and renamed over
    /// the target so readers never observe a partially written file. Missing parent directories
    /// are created.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pyrene_utils::error::FileSystemResult;
    /// use pyrene_utils::fs::{FileSystemProvider, StandardFileSystemProvider};
    ///
    /// fn main() -> FileSystemResult<()> {
    ///     let fs = StandardFileSystemProvider;
    ///     fs.write_atomic("/tmp/pyrene-doc/repos.toml", b"[\"repo:local\"]\n")?;
    ///     Ok(())
    /// }
    /// ```
    fn write_atomic<P: AsRef<Path>>(&self, path: P, content: &[u8]) -> FileSystemResult<()>;
}

#[derive(Default, Clone)]
pub struct StandardFileSystemProvider;

impl FileSystemProvider for StandardFileSystemProvider {
    fn ensure_dir_exists<P: AsRef<Path>>(&self, path: P) -> FileSystemResult<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path).map_err(|err| FileSystemError::Directory {
                path: path.to_path_buf(),
                action: "create",
                source: err,
            })?;
        } else if !path.is_dir() {
            return Err(FileSystemError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        Ok(())
    }

    fn read_optional<P: AsRef<Path>>(&self, path: P) -> FileSystemResult<Option<String>> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(FileSystemError::File {
                path: path.to_path_buf(),
                action: "read",
                source: err,
            }),
        }
    }

    fn write_atomic<P: AsRef<Path>>(&self, path: P, content: &[u8]) -> FileSystemResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.ensure_dir_exists(parent)?;
        }

        // Same directory as the target so the rename never crosses filesystems.
        let temp_name = format!(
            ".{}.{}.tmp",
            path.file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_default(),
            std::process::id()
        );
        let temp_path = path.with_file_name(temp_name);

        let file_err = |action: &'static str, source: std::io::Error| FileSystemError::File {
            path: temp_path.clone(),
            action,
            source,
        };

        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|err| file_err("create", err))?;

        let written = temp_file
            .write_all(content)
            .and_then(|_| temp_file.sync_all());
        drop(temp_file);

        if let Err(err) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(file_err("write", err));
        }

        fs::rename(&temp_path, path).map_err(|err| {
            let _ = fs::remove_file(&temp_path);
            FileSystemError::File {
                path: path.to_path_buf(),
                action: "replace",
                source: err,
            }
        })
    }
}

/// Creates a directory structure if it doesn't exist.
///
/// See [`FileSystemProvider::ensure_dir_exists`] for detailed documentation.
pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> FileSystemResult<()> {
    StandardFileSystemProvider.ensure_dir_exists(path)
}

/// Reads a file to a string, returning `None` if it does not exist.
///
/// See [`FileSystemProvider::read_optional`] for detailed documentation.
pub fn read_optional<P: AsRef<Path>>(path: P) -> FileSystemResult<Option<String>> {
    StandardFileSystemProvider.read_optional(path)
}

/// Atomically replaces the contents of a file.
///
/// See [`FileSystemProvider::write_atomic`] for detailed documentation.
pub fn write_atomic<P: AsRef<Path>>(path: P, content: &[u8]) -> FileSystemResult<()> {
    StandardFileSystemProvider.write_atomic(path, content)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_ensure_dir_exists() {
        let dir = tempdir().unwrap();
        let new_dir = dir.path().join("new_dir");
        ensure_dir_exists(&new_dir).unwrap();
        assert!(new_dir.is_dir());
    }

    #[test]
    fn test_ensure_dir_exists_file_collision() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("file.txt");
        fs::write(&file_path, "hello").unwrap();
        assert!(matches!(
            ensure_dir_exists(&file_path),
            Err(FileSystemError::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_read_optional_missing_file() {
        let dir = tempdir().unwrap();
        let content = read_optional(dir.path().join("missing.toml")).unwrap();
        assert!(content.is_none());
    }

    #[test]
    fn test_read_optional_directory_is_error() {
        let dir = tempdir().unwrap();
        assert!(read_optional(dir.path()).is_err());
    }

    #[test]
    fn test_write_atomic_creates_parents_and_replaces() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join("repos.toml");

        write_atomic(&target, b"first").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "first");

        write_atomic(&target, b"second").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "second");

        let leftovers: Vec<_> = fs::read_dir(target.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_write_atomic_into_directory_fails_cleanly() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        assert!(write_atomic(&target, b"data").is_err());
        assert!(target.is_dir());

        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
