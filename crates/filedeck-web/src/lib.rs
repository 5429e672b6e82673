//! HTTP front end for filedeck.
//!
//! An axum application exposing the same operations as the terminal UI.
//! Every browser gets its own session (current directory and clipboard),
//! identified by a cookie. Filesystem calls run on tokio's blocking pool.

mod error;
mod handlers;
mod html;
mod router;
mod server;
mod session;
mod state;

pub use error::ApiError;
pub use handlers::SERVICE_NAME;
pub use router::router;
pub use server::serve;
pub use session::{SESSION_COOKIE, SessionId, SessionStore};
pub use state::AppState;
