//! Engine error type.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors surfaced by evaluation and comparison.
#[derive(Debug)]
pub enum EngineError {
    /// A primary operand could not be read.
    Io { path: PathBuf, source: io::Error },
    /// A declaration value the value factory cannot represent; indicates a
    /// parser/engine mismatch rather than bad input.
    UnsupportedValue { property: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(formatter, "failed to read {}: {source}", path.display())
            }
            Self::UnsupportedValue { property } => {
                write!(formatter, "unsupported value for property `{property}`")
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::UnsupportedValue { .. } => None,
        }
    }
}
