use thiserror::Error;

/// Errors produced by the namespace engine.
///
/// The engine never recovers from these locally and never logs or prints:
/// every error carries the offending component or operation in its message
/// and is returned to the caller, which decides how to render it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FsError {
    /// A named path component does not exist (and auto-creation of
    /// intermediate directories was not in effect).
    #[error("{component}: does not exist in {dir}")]
    PathComponentNotFound { component: String, dir: String },

    /// A structural mismatch: a non-final path component is a file, a
    /// directory was given where a file is required (or vice versa), or
    /// the path string itself is unusable.
    #[error("invalid path: {0}")]
    InvalidPathComponent(String),

    /// Structurally valid but forbidden, e.g. removing the root directory
    /// or moving a directory into its own subtree.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A malformed glob was given to a pattern search.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

pub type Result<T> = std::result::Result<T, FsError>;
