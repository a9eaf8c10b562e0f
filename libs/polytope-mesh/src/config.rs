//! Engine-level configuration building on the shared `config` crate.
//!
//! Tolerances that a caller may tune per engine instance. Everything else
//! comes straight from `config::constants`.

use crate::error::GeometryError;
use config::constants::{GlobalConfig, PROJECTION_EPSILON, WELD_EPSILON};

/// Tolerances used by one [`crate::Engine`].
///
/// # Examples
/// ```
/// use polytope_mesh::EngineConfig;
/// let cfg = EngineConfig::default();
/// assert!(cfg.weld_epsilon > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Distance under which vertices are unified by the weld pass.
    pub weld_epsilon: f64,
    /// Smallest magnitude of the perspective denominator.
    pub projection_epsilon: f64,
}

impl EngineConfig {
    /// Creates a configuration from explicit tolerances.
    ///
    /// # Examples
    /// ```
    /// use polytope_mesh::EngineConfig;
    /// let cfg = EngineConfig::new(1.0e-6, 1.0e-3).unwrap();
    /// assert_eq!(cfg.weld_epsilon, 1.0e-6);
    /// assert!(EngineConfig::new(0.0, 1.0e-3).is_err());
    /// ```
    pub fn new(weld_epsilon: f64, projection_epsilon: f64) -> Result<Self, GeometryError> {
        let global = GlobalConfig::new(weld_epsilon, projection_epsilon)?;
        Ok(Self::from(global))
    }
}

impl From<GlobalConfig> for EngineConfig {
    fn from(global: GlobalConfig) -> Self {
        Self {
            weld_epsilon: global.weld_epsilon,
            projection_epsilon: global.projection_epsilon,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weld_epsilon: WELD_EPSILON,
            projection_epsilon: PROJECTION_EPSILON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.weld_epsilon, WELD_EPSILON);
        assert_eq!(cfg.projection_epsilon, PROJECTION_EPSILON);
        assert_eq!(EngineConfig::from(GlobalConfig::default()), cfg);
    }

    #[test]
    fn new_validates_input() {
        let err = EngineConfig::new(-1.0, 1.0e-3).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidConfig { .. }));
        assert!(err.to_string().contains("weld_epsilon"));
        assert!(EngineConfig::new(1.0e-4, f64::NAN).is_err());
    }
}
