// src/storage.rs
// =============================================================================
// Filesystem probes and writes.
//
// - file_exists / dir_exists: "is something of this kind at this path?"
// - ensure_dir: create the output directory once, rwxr-xr-x on unix
// - write_atomic: write bytes next to the destination, then rename into place
//
// write_atomic is the only way this crate puts a file on disk. A reader of
// the destination path sees either the old contents or the complete new
// contents, never a half-written or zero-length file.
// =============================================================================

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// True if `path` exists and is a regular file (directories don't count).
pub async fn file_exists(path: &Path) -> bool {
    match fs::metadata(path).await {
        Ok(meta) => meta.is_file(),
        Err(_) => false,
    }
}

/// True if `path` exists and is a directory.
pub async fn dir_exists(path: &Path) -> bool {
    match fs::metadata(path).await {
        Ok(meta) => meta.is_dir(),
        Err(_) => false,
    }
}

/// Creates `path` (and any missing parents) if it is not already a directory.
///
/// Returns true if the directory was created by this call.
pub async fn ensure_dir(path: &Path) -> io::Result<bool> {
    if dir_exists(path).await {
        return Ok(false);
    }

    // recursive(true) also creates missing parents, like `mkdir -p`
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o755);
    builder.create(path).await?;

    Ok(true)
}

/// Writes `bytes` to `dest`, replacing any existing file.
///
/// The data goes to a hidden `.<name>.part` file in the same directory first,
/// is flushed and synced, and is then renamed over `dest`. On any error the
/// temporary file is removed and `dest` is left as it was.
pub async fn write_atomic(dest: &Path, bytes: &[u8]) -> io::Result<()> {
    // Same directory as dest, so the rename never crosses filesystems
    let temp = temp_path_for(dest)?;

    let result = write_then_rename(&temp, dest, bytes).await;
    if result.is_err() {
        // Best effort; the original error is the one worth reporting
        let _ = fs::remove_file(&temp).await;
    }
    result
}

async fn write_then_rename(temp: &Path, dest: &Path, bytes: &[u8]) -> io::Result<()> {
    {
        // The handle is closed at the end of this block, before the rename
        let mut file = fs::File::create(temp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_all().await?;
    }
    fs::rename(temp, dest).await
}

fn temp_path_for(dest: &Path) -> io::Result<PathBuf> {
    let name = dest.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", dest.display()),
        )
    })?;

    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(name);
    temp_name.push(".part");

    Ok(dest.with_file_name(temp_name))
}
