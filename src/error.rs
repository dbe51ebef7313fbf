//! Errors raised while reading configuration values.

use std::fmt;

/// The error returned when a configuration value is rejected.
///
/// Classifying lines never fails; malformed text is reported through
/// [`Stage::Error`](crate::Stage::Error) instead.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,

    context: Option<String>,
}

impl Error {
    /// Create a new error from a `ErrorKind`.
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Attach the offending value.
    pub(crate) fn set_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }

    /// The kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)?;
        if let Some(context) = self.context.as_deref() {
            write!(f, ": {context}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

/// All possible error kinds.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The comment leader is not exactly one non-whitespace character.
    InvalidCommentChar,

    /// The footer separator is neither `": "` nor `" #"`.
    InvalidSeparator,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidCommentChar => f.write_str("invalid comment character"),
            ErrorKind::InvalidSeparator => f.write_str("invalid footer separator"),
        }
    }
}
