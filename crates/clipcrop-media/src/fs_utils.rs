//! Moving finished clips into the output directory.
//!
//! Clips are rendered inside a per-item scratch directory, which usually
//! lives on a different filesystem than the output directory (e.g. tmpfs).
//! A plain rename then fails with EXDEV, so this falls back to copying.

use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::MediaResult;

/// EXDEV on Linux and macOS.
const EXDEV: i32 = 18;

/// Move `src` to `dst`, replacing `dst` if it exists.
///
/// Tries a rename first. Across filesystems the file is copied to
/// `<dst>.partial` next to the destination and renamed over it, so readers
/// of the output directory never observe a half-written clip.
pub async fn move_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> MediaResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    match fs::rename(src, dst).await {
        Ok(()) => Ok(()),
        Err(e) if e.raw_os_error() == Some(EXDEV) => {
            debug!(
                src = %src.display(),
                dst = %dst.display(),
                "Cross-device rename, falling back to copy"
            );
            copy_then_remove(src, dst).await
        }
        Err(e) => Err(e.into()),
    }
}

async fn copy_then_remove(src: &Path, dst: &Path) -> MediaResult<()> {
    let partial = dst.with_extension("partial");

    if let Err(e) = fs::copy(src, &partial).await {
        let _ = fs::remove_file(&partial).await;
        return Err(e.into());
    }

    if let Err(e) = fs::rename(&partial, dst).await {
        let _ = fs::remove_file(&partial).await;
        return Err(e.into());
    }

    if let Err(e) = fs::remove_file(src).await {
        warn!(src = %src.display(), "Failed to remove source after copy: {}", e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_move_file_same_filesystem() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("render.mp4");
        let dst = dir.path().join("1.mp4");

        fs::write(&src, b"clip bytes").await.unwrap();
        move_file(&src, &dst).await.unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(&dst).await.unwrap(), b"clip bytes");
    }

    #[tokio::test]
    async fn test_move_file_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("render.mp4");
        let dst = dir.path().join("out").join("nested").join("2.mp4");

        fs::write(&src, b"clip").await.unwrap();
        move_file(&src, &dst).await.unwrap();

        assert!(dst.exists());
    }

    #[tokio::test]
    async fn test_move_file_replaces_previous_run() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("render.mp4");
        let dst = dir.path().join("3.mp4");

        fs::write(&dst, b"stale").await.unwrap();
        fs::write(&src, b"fresh").await.unwrap();
        move_file(&src, &dst).await.unwrap();

        assert_eq!(fs::read_to_string(&dst).await.unwrap(), "fresh");
    }

    #[tokio::test]
    async fn test_copy_then_remove_leaves_no_partial() {
        let src_dir = TempDir::new().unwrap();
        let dst_dir = TempDir::new().unwrap();
        let src = src_dir.path().join("render.mp4");
        let dst = dst_dir.path().join("4.mp4");

        fs::write(&src, b"copied").await.unwrap();
        copy_then_remove(&src, &dst).await.unwrap();

        assert!(!src.exists());
        assert!(!dst.with_extension("partial").exists());
        assert_eq!(fs::read(&dst).await.unwrap(), b"copied");
    }

    #[tokio::test]
    async fn test_move_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let res = move_file(dir.path().join("nope.mp4"), dir.path().join("5.mp4")).await;
        assert!(res.is_err());
    }
}
