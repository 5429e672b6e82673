//! Available filesystem roots (drives and mount points).

use std::path::PathBuf;

/// Drive letters that exist, e.g. `C:\`.
#[cfg(windows)]
pub(crate) fn roots() -> Vec<PathBuf> {
    (b'A'..=b'Z')
        .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
        .filter(|drive| drive.exists())
        .collect()
}

/// `/` followed by the volumes under the usual mount directories.
#[cfg(not(windows))]
pub(crate) fn roots() -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::from("/")];
    for base in ["/mnt", "/media", "/Volumes"] {
        let Ok(entries) = std::fs::read_dir(base) else {
            continue;
        };
        let mut mounts: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        mounts.sort();
        roots.extend(mounts);
    }
    roots
}
