use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Atomically replaces `path` with `content`
///
/// The content goes to a temporary file in the target's directory, is synced,
/// then renamed over the target, so readers see either the old file or the
/// complete new one.
pub(crate) fn write_atomically(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_replaces_existing() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("file.txt");

        write_atomically(&target, b"hello").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello");

        write_atomically(&target, b"world").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "world");
    }

    #[test]
    fn test_no_stray_files_left_behind() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("file.txt");
        write_atomically(&target, b"data").unwrap();

        let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_directory_fails_without_creating_target() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("missing").join("file.txt");
        assert!(write_atomically(&target, b"data").is_err());
        assert!(!target.exists());
    }
}
