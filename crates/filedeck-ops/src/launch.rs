//! Launch a path with the platform's default application.

use std::path::Path;

use filedeck_core::{FsError, FsResult};
use tracing::debug;

/// Open `path` with the system default application.
///
/// The path must exist. The launcher (`open`, `xdg-open`, `start`, ...) is
/// chosen by the `open` crate and runs detached from this process.
pub(crate) fn open_with_default_app(path: &Path) -> FsResult<()> {
    if path.symlink_metadata().is_err() {
        return Err(FsError::NotFound {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), "opening with default application");
    open::that_detached(path).map_err(|e| FsError::Launch {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
