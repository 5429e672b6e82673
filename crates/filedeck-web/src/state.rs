//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;

use filedeck_ops::FileService;

use crate::error::ApiError;
use crate::session::SessionStore;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: FileService,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Create state whose sessions start in `start_dir`.
    pub fn new(service: FileService, start_dir: impl Into<PathBuf>) -> Self {
        Self {
            service,
            sessions: Arc::new(SessionStore::new(start_dir.into())),
        }
    }

    /// Run blocking filesystem work on the blocking pool with a clone of
    /// the state.
    pub async fn blocking<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&AppState) -> Result<T, ApiError> + Send + 'static,
    {
        let state = self.clone();
        tokio::task::spawn_blocking(move || f(&state))
            .await
            .map_err(|e| ApiError::Internal(format!("Task failed: {e}")))?
    }
}
