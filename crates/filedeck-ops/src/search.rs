//! Recursive name search.

use std::path::{Path, PathBuf};

use filedeck_core::DirectoryEntry;
use jwalk::WalkDir;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A search match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The matching entry.
    pub entry: DirectoryEntry,
    /// Path relative to the search root.
    pub relative: PathBuf,
}

/// Find entries under `root` whose name contains `query`, ignoring case.
///
/// The walk stops after `limit` matches. Results are ordered folders
/// first, then by lowercase name. An empty query matches nothing.
pub(crate) fn search(root: &Path, query: &str, show_hidden: bool, limit: usize) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut hits = Vec::new();
    let walker = WalkDir::new(root)
        .skip_hidden(!show_hidden)
        .follow_links(false)
        .min_depth(1);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry
            .file_name()
            .to_string_lossy()
            .to_lowercase()
            .contains(&needle)
        {
            continue;
        }

        let path = entry.path();
        let Ok(found) = DirectoryEntry::from_path(&path) else {
            continue;
        };
        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        hits.push(SearchHit {
            entry: found,
            relative,
        });
        if hits.len() >= limit {
            debug!(limit, "search result limit reached");
            break;
        }
    }

    hits.sort_by_cached_key(|hit| (!hit.entry.is_folder(), hit.entry.name.to_lowercase()));
    hits
}
