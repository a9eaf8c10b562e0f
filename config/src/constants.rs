//! # Configuration Constants
//!
//! Centralized constants for the polytope mesh engine. Tolerances,
//! tessellation defaults, parameter bounds and compound schedule defaults are
//! defined here so the engine crates never scatter literals.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison and welding tolerances
//! - **Projection**: 4D → 3D projection defaults and clamps
//! - **Tessellation**: Grid resolution for curved primitives
//! - **Limits**: Upper bounds that keep every pipeline call bounded
//! - **Compounds**: Default transform schedule parameters

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for zero-area and zero-length checks during normal computation.
pub const EPSILON: f64 = 1e-10;

/// Default distance under which two vertices are welded into one.
///
/// Expressed at unit scale; the engine multiplies it by `scale`. Large
/// enough to absorb the noise between independently transformed compound
/// instances, small enough to never join distinct vertices of a unit-sized
/// polytope.
///
/// # Example
///
/// ```rust
/// use config::constants::WELD_EPSILON;
///
/// // Seam noise between two rotated instances of a unit tesseract
/// let seam_gap = 3e-13_f64;
/// assert!(seam_gap < WELD_EPSILON);
/// ```
pub const WELD_EPSILON: f64 = 1e-4;

/// Relative tolerance used when grouping 4D vertex pairs into edges.
///
/// Two pairs belong to the same (minimal) edge class when their lengths
/// differ by less than this fraction of the shortest length.
pub const EDGE_LENGTH_TOLERANCE: f64 = 1e-6;

// =============================================================================
// PROJECTION CONSTANTS
// =============================================================================

/// Default perspective distance for 4D → 3D projection.
///
/// All 4D polytopes are built at unit circumradius, so any distance above
/// 1.0 keeps every vertex on the near side of the projection pole.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_PROJECTION_DISTANCE;
///
/// let w = 1.0;
/// let factor = DEFAULT_PROJECTION_DISTANCE / (DEFAULT_PROJECTION_DISTANCE - w);
/// assert_eq!(factor, 2.0);
/// ```
pub const DEFAULT_PROJECTION_DISTANCE: f64 = 2.0;

/// Smallest magnitude allowed for the perspective denominator `d - w`.
///
/// Denominators closer to zero are clamped to `±PROJECTION_EPSILON`,
/// keeping their sign, so projected positions stay finite.
///
/// # Example
///
/// ```rust
/// use config::constants::PROJECTION_EPSILON;
///
/// let denominator: f64 = 1e-9;
/// let clamped = if denominator.abs() < PROJECTION_EPSILON {
///     PROJECTION_EPSILON.copysign(denominator)
/// } else {
///     denominator
/// };
/// assert_eq!(clamped, PROJECTION_EPSILON);
/// ```
pub const PROJECTION_EPSILON: f64 = 1e-3;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Default uniform scale applied to every shape.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Default subdivision level for curved primitives.
pub const DEFAULT_DETAIL: i64 = 0;

/// Azimuthal segment count of the sphere at detail 0.
///
/// The effective count is `SPHERE_BASE_SEGMENTS * (detail + 1)`.
///
/// # Example
///
/// ```rust
/// use config::constants::SPHERE_BASE_SEGMENTS;
///
/// let detail = 2;
/// assert_eq!(SPHERE_BASE_SEGMENTS * (detail + 1), 48);
/// ```
pub const SPHERE_BASE_SEGMENTS: u32 = 16;

/// Segments around the major circle of the quantum manifold at detail 0.
pub const QUANTUM_U_SEGMENTS: u32 = 48;

/// Segments around the tube of the quantum manifold at detail 0.
pub const QUANTUM_V_SEGMENTS: u32 = 16;

/// Segments along the Möbius band at detail 0.
pub const MOBIUS_U_SEGMENTS: u32 = 64;

/// Segments across the Möbius band at detail 0.
pub const MOBIUS_V_SEGMENTS: u32 = 8;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum accepted subdivision level.
///
/// A sphere at this level has `16 * 33 = 528` segments and 264 rings,
/// roughly 140k vertices.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_DETAIL;
///
/// let requested = 12;
/// assert!(requested <= MAX_DETAIL);
/// ```
pub const MAX_DETAIL: i64 = 32;

/// Maximum number of instances a compound may contain.
pub const MAX_INSTANCE_COUNT: i64 = 256;

/// Maximum number of vertices in a single geometry buffer.
///
/// Safety limit to prevent memory exhaustion from extreme parameters.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_VERTICES;
///
/// let vertex_count = 600 * 256;
/// assert!(vertex_count < MAX_VERTICES);
/// ```
pub const MAX_VERTICES: usize = 10_000_000;

/// Maximum number of triangles in a single geometry buffer.
pub const MAX_TRIANGLES: usize = 10_000_000;

// =============================================================================
// COMPOUND CONSTANTS
// =============================================================================

/// Translation step of the axis-shift schedule when none is supplied.
pub const DEFAULT_AXIS_SHIFT: f64 = 0.75;

/// Per-instance shrink ratio of nested tesseract compounds.
pub const NESTED_TESSERACT_RATIO: f64 = 0.6;

/// Per-instance shrink ratio of nested sphere compounds.
pub const NESTED_SPHERE_RATIO: f64 = 0.7;

/// Per-instance shrink ratio of the simple concentric hypercube.
pub const NESTED_CUBE_RATIO: f64 = 0.5;

/// Twist (radians) per instance of the experimental schedule.
pub const EXPERIMENTAL_TWIST: f64 = std::f64::consts::FRAC_PI_6;

/// Per-instance shrink ratio of the experimental schedule.
pub const EXPERIMENTAL_RATIO: f64 = 0.75;

/// Diagonal shift per instance of the experimental schedule.
pub const EXPERIMENTAL_STEP: f64 = 0.1;

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of the tolerances shared by the engine crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.weld_epsilon > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Distance under which vertices are welded.
    pub weld_epsilon: f64,
    /// Smallest magnitude of the perspective denominator.
    pub projection_epsilon: f64,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of both
    /// tolerances.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-5, 1.0e-4).expect("valid config");
    /// assert_eq!(cfg.weld_epsilon, 1.0e-5);
    /// ```
    pub fn new(weld_epsilon: f64, projection_epsilon: f64) -> Result<Self, ConfigError> {
        if !(weld_epsilon > 0.0 && weld_epsilon.is_finite()) {
            return Err(ConfigError::InvalidWeldEpsilon(weld_epsilon));
        }
        if !(projection_epsilon > 0.0 && projection_epsilon.is_finite()) {
            return Err(ConfigError::InvalidProjectionEpsilon(projection_epsilon));
        }
        Ok(Self {
            weld_epsilon,
            projection_epsilon,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            weld_epsilon: WELD_EPSILON,
            projection_epsilon: PROJECTION_EPSILON,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the weld epsilon is zero, negative or not finite.
    InvalidWeldEpsilon(f64),
    /// Raised when the projection epsilon is zero, negative or not finite.
    InvalidProjectionEpsilon(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWeldEpsilon(value) => {
                write!(f, "weld_epsilon must be positive and finite: {value}")
            }
            ConfigError::InvalidProjectionEpsilon(value) => {
                write!(f, "projection_epsilon must be positive and finite: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
