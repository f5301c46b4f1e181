//! Error types for rastermeta

use std::fmt;
use std::io;

use crate::geotiff::GeoKeyId;

/// Result type for rastermeta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in rastermeta operations
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// Invalid byte order
    InvalidByteOrder(u16),

    /// Invalid TIFF magic number
    InvalidMagic(u16),

    /// Invalid TIFF structure
    InvalidFormat(String),

    /// The file does not parse as a TIFF at all
    NotATiff(String),

    /// The file parses as a TIFF but carries no GeoTIFF key directory
    NotAGeoTiff,

    /// A query was issued on a reader with no open file
    NotOpen,

    /// The requested geo key has no recorded metadata
    KeyInfoUnavailable(GeoKeyId),

    /// The requested geo key has no stored value
    KeyNotFound(GeoKeyId),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::InvalidByteOrder(value) => write!(f, "Invalid byte order: 0x{:04X}", value),
            Error::InvalidMagic(value) => write!(f, "Invalid TIFF magic number: {}", value),
            Error::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
            Error::NotATiff(msg) => write!(f, "File is not a TIFF: {}", msg),
            Error::NotAGeoTiff => write!(f, "File is not a GeoTIFF"),
            Error::NotOpen => write!(f, "No file is open"),
            Error::KeyInfoUnavailable(key) => write!(f, "No info available for geo key {}", key),
            Error::KeyNotFound(key) => write!(f, "Geo key {} not found", key),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}
