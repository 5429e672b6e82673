//! Navigation state: current directory, history and clipboard.

use std::path::{Path, PathBuf};

use crate::clipboard::ClipboardState;
use crate::error::{FsError, FsResult};

/// Maximum number of directories remembered for "back" navigation.
const HISTORY_LIMIT: usize = 100;

/// Per-user browsing state.
///
/// The TUI owns exactly one; the web front end keeps one per browser
/// session.
#[derive(Debug, Clone)]
pub struct Session {
    current_dir: PathBuf,
    history: Vec<PathBuf>,
    /// Copy/cut buffer for this session.
    pub clipboard: ClipboardState,
}

impl Session {
    /// Create a session positioned at `start`.
    ///
    /// The path is used as given; call [`Session::navigate`] to validate
    /// and canonicalize a user-supplied path.
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: start.into(),
            history: Vec::new(),
            clipboard: ClipboardState::default(),
        }
    }

    /// The current working directory.
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Parent of the current directory, absent at a filesystem root.
    pub fn parent(&self) -> Option<&Path> {
        self.current_dir.parent()
    }

    /// Navigate to `target`, relative paths resolving against the current
    /// directory. The current directory is unchanged on failure.
    pub fn navigate(&mut self, target: impl AsRef<Path>) -> FsResult<&Path> {
        let joined = self.current_dir.join(target.as_ref());
        let resolved = joined
            .canonicalize()
            .map_err(|e| FsError::io(&joined, e))?;
        if !resolved.is_dir() {
            return Err(FsError::NotADirectory { path: resolved });
        }

        if resolved != self.current_dir {
            let previous = std::mem::replace(&mut self.current_dir, resolved);
            self.history.push(previous);
            if self.history.len() > HISTORY_LIMIT {
                self.history.remove(0);
            }
        }
        Ok(&self.current_dir)
    }

    /// Navigate to the parent directory. Returns `false` at a root.
    pub fn go_up(&mut self) -> FsResult<bool> {
        match self.parent().map(Path::to_path_buf) {
            Some(parent) => self.navigate(parent).map(|_| true),
            None => Ok(false),
        }
    }

    /// Return to the previously visited directory, skipping entries that
    /// no longer exist. Returns `false` when history is exhausted.
    pub fn go_back(&mut self) -> bool {
        while let Some(previous) = self.history.pop() {
            if previous.is_dir() {
                self.current_dir = previous;
                return true;
            }
        }
        false
    }

    /// Whether there is anywhere to go back to.
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}
