//! File system utilities for bundle output and asset extraction.
//!
//! Safe file operations with automatic directory creation and idempotent
//! behavior on already-existing or already-removed paths.

use crate::error::Result;
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path.
///
/// Idempotent: succeeds when the directory already exists.
pub async fn ensure_dir_all(path: &Path) -> Result<()> {
    Ok(fs::create_dir_all(path).await?)
}

/// Creates the parent directory of the given file path, recursively.
///
/// A path without a parent component is left untouched.
pub async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e.into()),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a file", from.display()),
        )
        .into());
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir).await?;
    }
    fs::copy(from, to).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_dir_all_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("a/b/c");

        ensure_dir_all(&nested).await.expect("first create");
        ensure_dir_all(&nested).await.expect("second create");
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn ensure_parent_dir_creates_parents_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("out/sub/bundle.js");

        ensure_parent_dir(&file).await.expect("ensure parent");
        assert!(dir.path().join("out/sub").is_dir());
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn remove_dir_all_ignores_missing_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        remove_dir_all(&dir.path().join("missing"))
            .await
            .expect("missing dir is fine");
    }

    #[tokio::test]
    async fn copy_file_creates_destination_parents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = dir.path().join("src.txt");
        std::fs::write(&src, b"data").expect("write src");

        let dst = dir.path().join("nested/dir/dst.txt");
        copy_file(&src, &dst).await.expect("copy");
        assert_eq!(std::fs::read(&dst).expect("read dst"), b"data");
    }

    #[tokio::test]
    async fn copy_file_rejects_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dst = dir.path().join("dst");
        assert!(copy_file(dir.path(), &dst).await.is_err());
    }
}
