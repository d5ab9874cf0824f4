use std::fmt;

/// Failures while decoding a binary image or rendering it as text.
#[derive(Debug)]
pub enum MemImageError {
    Io(std::io::Error),
    InvalidWordWidth { bits: u32 },
    InvalidRadix { token: String },
}

impl From<std::io::Error> for MemImageError {
    fn from(err: std::io::Error) -> Self {
        MemImageError::Io(err)
    }
}

impl fmt::Display for MemImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemImageError::Io(err) => write!(f, "I/O error: {err}"),
            MemImageError::InvalidWordWidth { bits } => write!(
                f,
                "word width {bits} is not a positive multiple of 8 bits (max 128)"
            ),
            MemImageError::InvalidRadix { token } => {
                write!(f, "unknown radix '{token}': expected hex or bin")
            }
        }
    }
}

impl std::error::Error for MemImageError {}
