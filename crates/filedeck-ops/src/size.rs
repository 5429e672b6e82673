//! Recursive size calculation.

use std::path::{Path, PathBuf};

use filedeck_core::SelectionStats;
use jwalk::WalkDir;
use tracing::warn;

/// Total size of the regular files under `path`.
///
/// Entries that cannot be read are skipped. A regular file yields its own
/// length; a missing path yields 0.
pub(crate) fn directory_size(path: &Path) -> u64 {
    match path.symlink_metadata() {
        Ok(m) if m.is_file() => return m.len(),
        Ok(m) if m.is_dir() => {}
        _ => return 0,
    }

    WalkDir::new(path)
        .skip_hidden(false)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// Count folders, files and total bytes of a selection.
pub(crate) fn selection_stats(paths: &[PathBuf]) -> SelectionStats {
    let mut stats = SelectionStats {
        count: paths.len(),
        ..Default::default()
    };

    for path in paths {
        match path.metadata() {
            Ok(m) if m.is_dir() => {
                stats.folders += 1;
                stats.bytes += directory_size(path);
            }
            Ok(m) => {
                stats.files += 1;
                stats.bytes += m.len();
            }
            Err(_) => {}
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_size_includes_hidden_and_nested() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a/b")).unwrap();
        std::fs::write(dir.path().join("one"), vec![0u8; 10]).unwrap();
        std::fs::write(dir.path().join(".hidden"), vec![0u8; 5]).unwrap();
        std::fs::write(dir.path().join("a/b/deep"), vec![0u8; 100]).unwrap();

        assert_eq!(directory_size(dir.path()), 115);
        assert_eq!(directory_size(&dir.path().join("one")), 10);
        assert_eq!(directory_size(&dir.path().join("missing")), 0);
    }

    #[test]
    fn test_selection_stats() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("d")).unwrap();
        std::fs::write(dir.path().join("d/x"), vec![0u8; 7]).unwrap();
        std::fs::write(dir.path().join("f"), vec![0u8; 3]).unwrap();

        let stats = selection_stats(&[dir.path().join("d"), dir.path().join("f")]);
        assert_eq!(
            stats,
            SelectionStats {
                count: 2,
                folders: 1,
                files: 1,
                bytes: 10,
            }
        );
    }
}
