//! Terminal user interface for filedeck.
//!
//! A single-pane file manager built with ratatui. Every action maps to one
//! call on [`filedeck_ops::FileService`] followed by a fresh listing of the
//! current directory.
//!
//! # Usage
//!
//! ```rust,no_run
//! use filedeck_core::Config;
//! use std::path::PathBuf;
//!
//! let config = Config::default();
//! filedeck_tui::run(PathBuf::from("/path/to/browse"), &config).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Move down/up
//! - `Enter`/`l` - Open folder or file
//! - `Backspace`/`h` - Parent directory
//! - `y`/`x`/`p` - Copy, cut, paste
//! - `d` - Delete
//! - `r` - Rename
//! - `/` - Filter
//! - `?` - Help
//! - `q` - Quit

pub mod app;
mod event;
mod theme;
mod ui;

pub use app::{App, AppResult};
pub use theme::Theme;

use std::path::PathBuf;

use filedeck_core::Config;

/// Run the TUI starting in `path`.
pub fn run(path: PathBuf, config: &Config) -> AppResult<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let app = App::new(path, config);
    let terminal = ratatui::init();
    let result = rt.block_on(app.run(terminal));
    ratatui::restore();

    result
}
