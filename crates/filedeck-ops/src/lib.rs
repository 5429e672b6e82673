//! Filesystem service for filedeck.
//!
//! [`FileService`] wraps the operations both front ends need (listing,
//! create, copy, move, delete, rename, properties, size, search, open)
//! behind one synchronous API that reports failures as
//! [`filedeck_core::FsError`]. Copies and moves never overwrite: a taken
//! destination is renamed with a ` (n)` suffix.

mod conflict;
mod copy;
mod create;
mod delete;
mod launch;
mod move_op;
mod outcome;
mod rename;
mod roots;
mod search;
mod service;
mod size;

pub use conflict::unique_destination;
pub use outcome::{OperationError, OperationOutcome, OperationType};
pub use search::SearchHit;
pub use service::FileService;
