//! Unified error handling for w1-therm-exporter
//!
//! A single error type used by the sampler core and the exporter binary.
//! Only `SensorDirectory` and `Bind` ever reach the top level; the per-sensor
//! variants are absorbed by the sampler.

use std::io;
use std::net::SocketAddr;
use std::num::ParseIntError;
use std::path::PathBuf;

/// Result type alias using W1Error
pub type Result<T> = std::result::Result<T, W1Error>;

#[derive(thiserror::Error, Debug)]
pub enum W1Error {
    // ============================================================================
    // Bus / File System Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to list sensor directory {path}: {source}")]
    SensorDirectory {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to read sensor file {path}: {source}")]
    SensorRead {
        path: PathBuf,
        source: io::Error,
    },

    // ============================================================================
    // Payload Errors
    // ============================================================================
    #[error("Driver reported a CRC failure")]
    ChecksumFailed,

    #[error("Payload has no temperature marker")]
    MissingValueMarker,

    #[error("Invalid temperature value {raw:?}: {source}")]
    InvalidValue {
        raw: String,
        source: ParseIntError,
    },

    // ============================================================================
    // Exposition Errors
    // ============================================================================
    #[error("Failed to bind HTTP listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: io::Error,
    },

    #[error("Metrics error: {0}")]
    Metrics(String),
}

impl W1Error {
    /// Create a metrics error from anything printable
    pub fn metrics(msg: impl ToString) -> Self {
        Self::Metrics(msg.to_string())
    }
}
