//! Crash-safe document writes for the native file store.
//!
//! The document goes to `{path}.tmp` first, is flushed with `sync_all()`,
//! then renamed over the final path, so an interrupted write leaves the
//! previous document in place.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wayfinder_atomic_write_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_atomic_write_replaces_document() {
        let dir = test_dir("replaces");
        let path = dir.join("doc.json");

        atomic_write(&path, b"[]").unwrap();
        atomic_write(&path, b"[1]").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"[1]");
        assert!(!dir.join("doc.json.tmp").exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let dir = test_dir("parents");
        let path = dir.join("a").join("b").join("doc.json");

        atomic_write(&path, b"{}").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"{}");
        let _ = fs::remove_dir_all(&dir);
    }
}
