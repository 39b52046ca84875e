//! Filesystem probes shared by the codecs, the CLI, and the metrics facade.

use std::path::Path;

/// True when `path` names an existing filesystem entry.
pub fn file_exists(path: &Path) -> bool {
    path.exists()
}

/// Size of the file at `path` in bytes, or 0 when it cannot be determined.
///
/// The metrics facade folds missing files into a zero size; callers that need
/// to distinguish the two cases should pair this with [`file_exists`].
pub fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let path = Path::new("definitely/not/a/real/path.bin");
        assert!(!file_exists(path));
        assert_eq!(file_size(path), 0);
    }

    #[test]
    fn test_existing_file() {
        let dir = std::env::temp_dir().join("krunch-core-fsio-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("probe.bin");
        std::fs::write(&path, b"12345").unwrap();
        assert!(file_exists(&path));
        assert_eq!(file_size(&path), 5);
        std::fs::remove_file(&path).unwrap();
    }
}
