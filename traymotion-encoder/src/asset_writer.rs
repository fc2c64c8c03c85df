//! Atomic replacement of the stored asset

use std::io;
use std::path::{Path, PathBuf};

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes `data` to `path` so readers see either the old or the new file.
///
/// The bytes go to a sibling temp file which is then renamed over the target.
/// On any failure the temp file is removed and the target is left untouched.
pub fn write_atomically(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path_for(path);
    if let Err(e) = std::fs::write(&temp_path, data) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    // rename may fail on Windows if the target is locked; fall back to copy
    if let Err(rename_err) = std::fs::rename(&temp_path, path) {
        let copied = std::fs::copy(&temp_path, path);
        let _ = std::fs::remove_file(&temp_path);
        if let Err(copy_err) = copied {
            tracing::warn!(%rename_err, %copy_err, path = %path.display(), "Asset replace failed");
            return Err(copy_err);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asset.processed");
        std::fs::write(&path, b"old").unwrap();

        write_atomically(&path, b"new contents").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new contents");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("asset");
        write_atomically(&path, b"x").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"x");
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = Path::new("/data/tray-icon.processed");
        assert_eq!(
            temp_path_for(path),
            PathBuf::from("/data/tray-icon.processed.tmp")
        );
    }
}
