//! Error types for the input-file loaders.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// A failed load of one input vector.
///
/// Wraps the failure [`kind`](LoadError::kind) together with the file the
/// loader was reading, when there was one — the `*_from_str` forms carry
/// no path. Any malformed line fails the whole load.
#[derive(Debug)]
pub struct LoadError {
    path: Option<PathBuf>,
    kind: LoadErrorKind,
}

/// What went wrong during a load.
#[derive(Debug)]
pub enum LoadErrorKind {
    /// The file could not be opened or read.
    Io(io::Error),
    /// A line had the wrong number of comma-separated fields.
    FieldCount {
        /// 1-based line number.
        line_no: usize,
        /// The offending line.
        content: String,
        /// Fields the record type requires.
        expected: usize,
        /// Fields found on the line.
        found: usize,
    },
    /// A numeric field did not parse as an integer.
    InvalidInt {
        /// 1-based line number.
        line_no: usize,
        /// The offending line.
        content: String,
        /// The value that failed to parse.
        value: String,
    },
    /// The action type token is not one of the six operations.
    UnknownOp {
        /// 1-based line number.
        line_no: usize,
        /// The offending line.
        content: String,
        /// The unrecognized token.
        token: String,
    },
}

impl LoadError {
    pub(crate) fn new(kind: LoadErrorKind) -> Self {
        Self { path: None, kind }
    }

    pub(crate) fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    /// The file being loaded, if the failing call named one.
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// The underlying failure.
    pub fn kind(&self) -> &LoadErrorKind {
        &self.kind
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{}: ", path.display())?;
        }
        match &self.kind {
            LoadErrorKind::Io(e) => write!(f, "I/O error: {e}"),
            LoadErrorKind::FieldCount {
                line_no,
                content,
                expected,
                found,
            } => write!(
                f,
                "line {line_no}: expected {expected} fields, found {found}: '{content}'"
            ),
            LoadErrorKind::InvalidInt {
                line_no,
                content,
                value,
            } => write!(f, "line {line_no}: '{value}' is not an integer: '{content}'"),
            LoadErrorKind::UnknownOp {
                line_no,
                content,
                token,
            } => write!(f, "line {line_no}: unknown action type '{token}': '{content}'"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            LoadErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        Self::new(LoadErrorKind::Io(e))
    }
}
