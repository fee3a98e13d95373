//! Errors raised while rebuilding the pool.
//!
//! Every variant is fatal: the run stops and nothing reaches stdout.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read pool file {}", path.display())]
    ReadPool { path: PathBuf, source: io::Error },

    #[error("failed to parse pool file {}", path.display())]
    ParsePool {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to list broken directory {}", path.display())]
    ReadBroken { path: PathBuf, source: io::Error },

    #[error("failed to open log file {}", path.display())]
    OpenLog { path: PathBuf, source: io::Error },

    #[error("failed to read log line {line}")]
    ReadLog { line: usize, source: io::Error },

    /// A PUT line split into fewer than four fields.
    #[error("log line {line}: expected at least 4 fields, found {fields}")]
    ShortLine { line: usize, fields: usize },

    #[error("log line {line}: address field {field:?} has no port")]
    MissingPort { line: usize, field: String },

    #[error("failed to render pool as JSON")]
    Render { source: serde_json::Error },

    #[error("rendered pool is not valid UTF-8")]
    RenderUtf8 { source: std::string::FromUtf8Error },
}

pub type Result<T> = std::result::Result<T, Error>;
