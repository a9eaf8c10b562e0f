//! # Geometry Errors
//!
//! Error types for shape building, projection, composition and merging.

use config::constants::ConfigError;
use thiserror::Error;

/// Errors that can occur while producing a geometry buffer.
///
/// `DegenerateGeometry` is never returned from [`crate::create`]; it is
/// recovered during normal computation and recorded on the buffer as a
/// warning instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A shape parameter is outside its domain.
    #[error("Invalid parameter `{name}`: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// Zero-area face or vertex without a usable normal.
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// 4D shape requested with a non-positive projection distance.
    #[error("Unsupported projection: distance must be positive and finite, got {distance}")]
    UnsupportedProjection { distance: f64 },

    /// Face list references missing vertices or has too few corners.
    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    /// Too many vertices
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    /// Too many triangles
    #[error("Too many triangles: {count} (max: {max})")]
    TooManyTriangles { count: usize, max: usize },

    /// Malformed parameter record or engine configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl GeometryError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

impl From<ConfigError> for GeometryError {
    fn from(err: ConfigError) -> Self {
        Self::invalid_config(err.to_string())
    }
}

impl From<serde_json::Error> for GeometryError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_config(err.to_string())
    }
}
