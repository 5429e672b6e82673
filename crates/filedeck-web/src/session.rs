//! Cookie-keyed browsing sessions.
//!
//! Each browser gets its own [`Session`] (current directory and clipboard),
//! so navigation in one tab never moves another user's view.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::http::header::SET_COOKIE;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use dashmap::DashMap;
use filedeck_core::{ClipboardState, Session};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::state::AppState;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "filedeck_session";

/// Sessions idle for longer than this are dropped.
const SESSION_IDLE: Duration = Duration::from_secs(24 * 60 * 60);

/// Identifier of the session serving the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

#[derive(Debug)]
struct Slot {
    session: Session,
    last_seen: Instant,
}

/// Concurrent map of live sessions.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<Uuid, Slot>,
    start_dir: PathBuf,
}

impl SessionStore {
    /// Create an empty store; new sessions start in `start_dir`.
    pub fn new(start_dir: PathBuf) -> Self {
        Self {
            sessions: DashMap::new(),
            start_dir,
        }
    }

    /// Directory new sessions start in.
    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Register a fresh session and return its id.
    fn create(&self) -> Uuid {
        self.prune(SESSION_IDLE);
        let id = Uuid::new_v4();
        self.sessions.insert(
            id,
            Slot {
                session: Session::new(self.start_dir.clone()),
                last_seen: Instant::now(),
            },
        );
        debug!(%id, "created session");
        id
    }

    /// Mark a session as used. Returns `false` if it is unknown.
    fn touch(&self, id: &Uuid) -> bool {
        match self.sessions.get_mut(id) {
            Some(mut slot) => {
                slot.last_seen = Instant::now();
                true
            }
            None => false,
        }
    }

    /// Run `f` with exclusive access to a session, recreating it if it was
    /// pruned in the meantime.
    ///
    /// Holds a shard lock for the duration of `f`; do not await inside it.
    pub fn with<R>(&self, id: SessionId, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut slot = self.sessions.entry(id.0).or_insert_with(|| Slot {
            session: Session::new(self.start_dir.clone()),
            last_seen: Instant::now(),
        });
        slot.last_seen = Instant::now();
        f(&mut slot.session)
    }

    /// Store the clipboard left over by a paste, unless the session copied
    /// or cut something else while the paste ran. Returns whether it was
    /// stored.
    pub fn finish_paste(
        &self,
        id: SessionId,
        pasted: &ClipboardState,
        remaining: ClipboardState,
    ) -> bool {
        self.with(id, |s| {
            let unchanged = s.clipboard == *pasted;
            if unchanged {
                s.clipboard = remaining;
            } else {
                debug!(id = %id.0, "clipboard changed during paste, keeping newer contents");
            }
            unchanged
        })
    }

    /// Current directory of a session.
    pub fn current_dir(&self, id: SessionId) -> PathBuf {
        self.with(id, |s| s.current_dir().to_path_buf())
    }

    /// Drop sessions idle for longer than `max_idle`.
    pub fn prune(&self, max_idle: Duration) {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, slot| slot.last_seen.elapsed() <= max_idle);
        let dropped = before.saturating_sub(self.sessions.len());
        if dropped > 0 {
            debug!(dropped, "pruned idle sessions");
        }
    }
}

/// Attach a [`SessionId`] to every request, issuing a cookie for new
/// browsers.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
        .filter(|id| state.sessions.touch(id));

    let (id, is_new) = match existing {
        Some(id) => (id, false),
        None => (state.sessions.create(), true),
    };
    req.extensions_mut().insert(SessionId(id));

    let mut response = next.run(req).await;
    if is_new {
        let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(err) => warn!(error = %err, "cannot encode session cookie"),
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_recreates_missing_session() {
        let store = SessionStore::new(PathBuf::from("/start"));
        let id = SessionId(Uuid::new_v4());
        assert_eq!(store.current_dir(id), PathBuf::from("/start"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_prune_drops_idle_sessions() {
        let store = SessionStore::new(PathBuf::from("/start"));
        let id = store.create();
        assert!(store.touch(&id));

        std::thread::sleep(Duration::from_millis(5));
        store.prune(Duration::from_millis(1));
        assert!(store.is_empty());
        assert!(!store.touch(&id));
    }

    #[test]
    fn test_finish_paste_keeps_newer_clipboard() {
        let store = SessionStore::new(PathBuf::from("/start"));
        let id = SessionId(Uuid::new_v4());

        store.with(id, |s| s.clipboard.cut([PathBuf::from("/start/a")]));
        let pasted = store.with(id, |s| s.clipboard.clone());

        // A copy lands while the paste is still running
        store.with(id, |s| s.clipboard.copy([PathBuf::from("/start/b")]));
        assert!(!store.finish_paste(id, &pasted, ClipboardState::default()));
        let kept = store.with(id, |s| s.clipboard.paths().to_vec());
        assert_eq!(kept, [PathBuf::from("/start/b")]);

        let pasted = store.with(id, |s| s.clipboard.clone());
        assert!(store.finish_paste(id, &pasted, ClipboardState::default()));
        assert!(store.with(id, |s| s.clipboard.is_empty()));
    }
}
