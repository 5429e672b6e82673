//! Core types and helpers for filedeck.
//!
//! This crate holds the data model shared by the filesystem service and
//! both front ends: directory entries and listings, item properties,
//! clipboard and session state, sorting, configuration, errors, and the
//! formatting/validation helpers used to present them.

mod clipboard;
mod config;
mod entry;
mod error;
mod format;
mod properties;
mod session;
mod sort;

pub use clipboard::{ClipboardAction, ClipboardState};
pub use config::{Config, ConfigBuilder};
pub use entry::{DirectoryEntry, DirectoryListing, FileKind};
pub use error::{ConfigError, FsError, FsResult};
pub use format::{
    format_datetime, format_optional_size, format_size, format_timestamp, is_hidden_name,
    sanitize_filename, validate_filename,
};
pub use properties::{ItemProperties, SelectionStats};
pub use session::Session;
pub use sort::{SortColumn, SortOrder, SortState, filter_entries};
