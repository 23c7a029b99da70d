//! Error types for sky map computation.
//!
//! Every fallible operation in the library returns [`SkyMapResult`]. The HTTP
//! layer maps each variant onto a status code in `http::error`.

use std::path::PathBuf;

/// Result type for sky map operations.
pub type SkyMapResult<T> = Result<T, SkyMapError>;

/// Error type for sky map operations.
#[derive(Debug, thiserror::Error)]
pub enum SkyMapError {
    /// Location name not present in the fixed location table.
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    /// Date string could not be parsed as a calendar date.
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    /// Hour outside 0..=23.
    #[error("Invalid hour {0}: expected 0-23")]
    InvalidHour(i64),

    /// Observer coordinates out of range or not finite.
    #[error("Invalid observer: {0}")]
    InvalidObserver(String),

    /// Body name that does not resolve to a supported solar-system body.
    #[error("Unknown celestial body: {0}")]
    UnknownBody(String),

    /// Star catalog row could not be parsed.
    #[error("Catalog error in {path}:{line}: {message}")]
    Catalog {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Projection produced a position outside the horizontal frame.
    #[error("Ephemeris error: {0}")]
    Ephemeris(String),

    /// Configuration file missing, unreadable or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SkyMapError {
    /// Build a catalog error for a specific source line.
    pub fn catalog(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        SkyMapError::Catalog {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's input rather than by the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SkyMapError::UnknownLocation(_)
                | SkyMapError::InvalidDate { .. }
                | SkyMapError::InvalidHour(_)
                | SkyMapError::InvalidObserver(_)
                | SkyMapError::UnknownBody(_)
        )
    }
}
