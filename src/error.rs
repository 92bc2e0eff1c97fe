// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Buffer(String),
    Export(ExportError),
}

/// Reasons an export request cannot be fulfilled.
///
/// Export is the only path where a bad request is reported to the caller
/// instead of being corrected at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportError {
    /// Resolved output size has a zero dimension.
    InvalidDimensions { width: u32, height: u32 },

    /// Display scale is zero, negative or not finite.
    InvalidScale(f64),

    /// The crop rectangle maps to no source pixels.
    EmptySourceRegion,

    /// The encoder collaborator rejected the buffer.
    Encoder(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::InvalidDimensions { width, height } => {
                write!(f, "Invalid export size {}x{}", width, height)
            }
            ExportError::InvalidScale(scale) => write!(f, "Invalid display scale: {}", scale),
            ExportError::EmptySourceRegion => write!(f, "Crop region contains no source pixels"),
            ExportError::Encoder(msg) => write!(f, "Encoding failed: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Buffer(e) => write!(f, "Buffer Error: {}", e),
            Error::Export(e) => write!(f, "Export Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ExportError> for Error {
    fn from(err: ExportError) -> Self {
        Error::Export(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Export(ExportError::Encoder(err.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
