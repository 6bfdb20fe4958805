use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced by a generation run.
///
/// The orchestrator is the only place that reacts to these: any variant aborts the
/// run, removes the output directory and is handed back to the caller unchanged.
#[derive(Debug, Error)]
pub enum GenError {
    /// The design graph is structurally incomplete; detected before any file is touched.
    #[error("invalid design: {0}")]
    InvalidDesign(String),

    /// The generator configuration is unusable; detected before any file is touched.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A directory or file operation failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record could not be rendered by its template.
    #[error("failed to render {what} into {}: {source}", path.display())]
    Render {
        what: String,
        path: PathBuf,
        #[source]
        source: askama::Error,
    },

    /// The accumulated content of an output file is not valid Rust.
    #[error("generated code for {} does not parse: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    /// A named type reference does not match any user type or media type.
    #[error("unknown type {name:?} referenced by {referrer}")]
    UnknownType { name: String, referrer: String },

    /// A media type identifier does not match any declared media type.
    #[error("unknown media type {identifier:?} referenced by {referrer}")]
    UnknownMediaType { identifier: String, referrer: String },

    /// A generator invariant does not hold, e.g. a name was never resolved.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GenError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        GenError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
