//! Client for a remote user directory: a form to create and edit people and
//! a table of everyone the backend knows about, kept in step with
//! `/api/usuarios`.

pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod notify;
pub mod render;
pub mod util;
pub mod web;

pub use directory::{DeleteOutcome, ErrorPolicy, SubmitOutcome, UserDirectoryController};
pub use error::{ApiError, DirectoryError};
