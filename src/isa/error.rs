use std::fmt;

/// A precise source position (1-indexed line/column) inside a description document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Represents any failure that can occur while loading or rendering an ISA description.
#[derive(Debug)]
pub enum IsaError {
    Io(std::io::Error),
    MalformedDescription {
        message: String,
        position: Option<SourcePosition>,
    },
    NameCollision {
        name: String,
        position: Option<SourcePosition>,
    },
}

impl IsaError {
    pub(crate) fn malformed(message: impl Into<String>, position: Option<SourcePosition>) -> Self {
        IsaError::MalformedDescription {
            message: message.into(),
            position,
        }
    }

    pub(crate) fn malformed_at(message: impl Into<String>, position: SourcePosition) -> Self {
        Self::malformed(message, Some(position))
    }
}

impl From<std::io::Error> for IsaError {
    fn from(err: std::io::Error) -> Self {
        IsaError::Io(err)
    }
}

impl fmt::Display for IsaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsaError::Io(err) => write!(f, "I/O error: {err}"),
            IsaError::MalformedDescription { message, position } => match position {
                Some(position) => write!(f, "malformed description: {message} @ {position}"),
                None => write!(f, "malformed description: {message}"),
            },
            IsaError::NameCollision { name, position } => match position {
                Some(position) => {
                    write!(f, "register '{name}' declared more than once @ {position}")
                }
                None => write!(f, "register '{name}' declared more than once"),
            },
        }
    }
}

impl std::error::Error for IsaError {}
