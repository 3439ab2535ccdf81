//! Error types for the zfxy codecs.

use thiserror::Error;

/// Errors surfaced by tile arithmetic, projection, the string codecs and
/// the coverage engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZfxyError {
    /// An argument is outside the domain of the operation (bad parent
    /// steps, zoom beyond [`MAX_ZOOM`](crate::MAX_ZOOM), unencodable `f`).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Altitude is not strictly inside `(-2^25, 2^25)` meters.
    #[error("Altitude {0} m is outside the supported range (-2^25, 2^25)")]
    AltitudeOutOfRange(f64),

    /// Malformed address, tilehash or Hilbert tilehash string.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Geometry kind the coverage engine cannot scan.
    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    /// Non-finite or out-of-range geographic coordinates.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, ZfxyError>;

impl From<serde_json::Error> for ZfxyError {
    fn from(err: serde_json::Error) -> Self {
        ZfxyError::SerializationError(err.to_string())
    }
}
