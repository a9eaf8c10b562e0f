//! # Shape Parameters
//!
//! The configuration record supplied with every pipeline call. Callers treat
//! it as an opaque JSON-like object: unknown keys are ignored and missing keys
//! fall back to the defaults in `config::constants`.

use crate::error::GeometryError;
use config::constants::{
    DEFAULT_DETAIL, DEFAULT_PROJECTION_DISTANCE, DEFAULT_SCALE, MAX_DETAIL, MAX_INSTANCE_COUNT,
};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// How 4D vertices are flattened into 3D.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    /// Divide by `d - w`, foreshortening vertices far along `-w`.
    #[default]
    Perspective,
    /// Drop the `w` coordinate.
    Orthographic,
}

/// Parameters recognized by the shape pipelines.
///
/// # Example
///
/// ```rust
/// use polytope_mesh::ShapeParameters;
///
/// let params = ShapeParameters::from_json(r#"{"scale": 2, "instanceCount": 3}"#).unwrap();
/// assert_eq!(params.scale, 2.0);
/// assert_eq!(params.instance_count, Some(3));
/// assert_eq!(params.detail, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeParameters {
    /// Uniform size multiplier, in (0, ∞).
    pub scale: f64,
    /// Tessellation level for curved primitives and geodesic subdivision.
    #[serde(alias = "subdivision")]
    pub detail: i64,
    /// Number of compound instances; `None` keeps the shape default.
    #[serde(alias = "instance_count")]
    pub instance_count: Option<i64>,
    /// Extra translation per compound instance, in unit-scale space.
    #[serde(alias = "nested_offsets")]
    pub nested_offsets: Vec<[f64; 3]>,
    /// Step of the axis-shift schedule, in unit-scale space.
    #[serde(alias = "axis_shift")]
    pub axis_shift: Option<f64>,
    /// Perspective distance for 4D shapes.
    #[serde(alias = "projection_distance")]
    pub projection_distance: f64,
    /// Projection used for 4D shapes.
    pub projection: ProjectionMode,
    /// Overrides the pipeline's weld choice.
    pub weld: Option<bool>,
}

impl Default for ShapeParameters {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            detail: DEFAULT_DETAIL,
            instance_count: None,
            nested_offsets: Vec::new(),
            axis_shift: None,
            projection_distance: DEFAULT_PROJECTION_DISTANCE,
            projection: ProjectionMode::default(),
            weld: None,
        }
    }
}

impl ShapeParameters {
    /// Parses a JSON parameter record.
    pub fn from_json(json: &str) -> Result<Self, GeometryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns a copy with the given scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Returns a copy with the given detail level.
    pub fn with_detail(mut self, detail: i64) -> Self {
        self.detail = detail;
        self
    }

    /// Returns a copy with the given instance count.
    pub fn with_instance_count(mut self, count: i64) -> Self {
        self.instance_count = Some(count);
        self
    }

    /// Returns a copy with the given projection distance.
    pub fn with_projection_distance(mut self, distance: f64) -> Self {
        self.projection_distance = distance;
        self
    }

    /// Validates the domain-independent fields.
    ///
    /// Projection distance is checked separately, and only for 4D shapes.
    pub fn validate(&self) -> Result<(), GeometryError> {
        validate_scale(self.scale)?;
        self.detail_level()?;
        if let Some(count) = self.instance_count {
            validate_instance_count(count)?;
        }
        if let Some(step) = self.axis_shift {
            if !step.is_finite() {
                return Err(GeometryError::invalid_parameter(
                    "axisShift",
                    format!("must be finite, got {step}"),
                ));
            }
        }
        if self
            .nested_offsets
            .iter()
            .any(|offset| offset.iter().any(|c| !c.is_finite()))
        {
            return Err(GeometryError::invalid_parameter(
                "nestedOffsets",
                "offsets must be finite",
            ));
        }
        Ok(())
    }

    /// Returns the detail level as an unsigned count, rejecting out-of-range
    /// values.
    pub fn detail_level(&self) -> Result<u32, GeometryError> {
        if !(0..=MAX_DETAIL).contains(&self.detail) {
            return Err(GeometryError::invalid_parameter(
                "detail",
                format!("must be in 0..={MAX_DETAIL}, got {}", self.detail),
            ));
        }
        Ok(self.detail as u32)
    }

    /// Returns the nested offsets as vectors.
    pub fn offsets(&self) -> Vec<DVec3> {
        self.nested_offsets.iter().map(|o| DVec3::from_array(*o)).collect()
    }
}

/// Rejects zero, negative and non-finite scales.
pub fn validate_scale(scale: f64) -> Result<(), GeometryError> {
    if !(scale > 0.0 && scale.is_finite()) {
        return Err(GeometryError::invalid_parameter(
            "scale",
            format!("must be positive and finite, got {scale}"),
        ));
    }
    Ok(())
}

/// Rejects instance counts outside `1..=MAX_INSTANCE_COUNT`.
pub fn validate_instance_count(count: i64) -> Result<usize, GeometryError> {
    if !(1..=MAX_INSTANCE_COUNT).contains(&count) {
        return Err(GeometryError::invalid_parameter(
            "instanceCount",
            format!("must be in 1..={MAX_INSTANCE_COUNT}, got {count}"),
        ));
    }
    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ShapeParameters::default();
        assert_eq!(params.scale, 1.0);
        assert_eq!(params.detail, 0);
        assert_eq!(params.instance_count, None);
        assert_eq!(params.projection_distance, DEFAULT_PROJECTION_DISTANCE);
        assert_eq!(params.projection, ProjectionMode::Perspective);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_json_ignores_unknown_keys() {
        let params =
            ShapeParameters::from_json(r##"{"metalness": 0.5, "baseColor": "#ff00ff"}"##).unwrap();
        assert_eq!(params, ShapeParameters::default());
    }

    #[test]
    fn test_json_aliases() {
        let params = ShapeParameters::from_json(
            r#"{"subdivision": 2, "instance_count": 4, "axisShift": 0.5,
                "projectionDistance": 3.0, "projection": "orthographic",
                "nestedOffsets": [[0, 1, 0]]}"#,
        )
        .unwrap();
        assert_eq!(params.detail, 2);
        assert_eq!(params.instance_count, Some(4));
        assert_eq!(params.axis_shift, Some(0.5));
        assert_eq!(params.projection_distance, 3.0);
        assert_eq!(params.projection, ProjectionMode::Orthographic);
        assert_eq!(params.offsets(), vec![DVec3::Y]);
    }

    #[test]
    fn test_json_malformed() {
        let err = ShapeParameters::from_json("{scale: }").unwrap_err();
        assert!(matches!(err, GeometryError::InvalidConfig { .. }));
    }

    #[test]
    fn test_invalid_scale() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = ShapeParameters::default().with_scale(scale).validate().unwrap_err();
            assert!(matches!(err, GeometryError::InvalidParameter { name: "scale", .. }));
        }
    }

    #[test]
    fn test_invalid_detail() {
        assert!(ShapeParameters::default().with_detail(-1).validate().is_err());
        assert!(ShapeParameters::default()
            .with_detail(MAX_DETAIL + 1)
            .validate()
            .is_err());
        assert!(ShapeParameters::default()
            .with_detail(MAX_DETAIL)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_invalid_instance_count() {
        assert!(ShapeParameters::default().with_instance_count(0).validate().is_err());
        assert!(ShapeParameters::default()
            .with_instance_count(MAX_INSTANCE_COUNT + 1)
            .validate()
            .is_err());
        assert_eq!(validate_instance_count(3).unwrap(), 3);
    }

    #[test]
    fn test_non_finite_offsets_rejected() {
        let mut params = ShapeParameters::default();
        params.nested_offsets = vec![[0.0, f64::NAN, 0.0]];
        assert!(params.validate().is_err());
    }
}
