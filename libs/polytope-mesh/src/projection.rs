//! # 4D → 3D Projection
//!
//! Flattens a unit-circumradius [`Polytope4`] into a [`Polyhedron`].
//!
//! - Perspective: `(x, y, z) · d / (d - w)`, with the denominator clamped
//!   away from zero so every output stays finite.
//! - Orthographic: drops `w`.
//!
//! An optional 4D view rotation is applied before projecting. Uniform
//! scaling is applied afterwards, so projected shapes scale exactly with
//! `scale`.

use crate::error::GeometryError;
use crate::params::{ProjectionMode, ShapeParameters};
use crate::polytope::{Polyhedron, Polytope4};
use glam::{DMat4, DVec3, DVec4};

/// Tilt used for shapes whose antipodal `w` vertices would otherwise
/// project onto the same point.
pub const VIEW_TILT: f64 = std::f64::consts::FRAC_PI_8;

/// A validated projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective divide on the 4th coordinate.
    Perspective { distance: f64 },
    /// Orthogonal drop of the 4th coordinate.
    Orthographic,
}

impl Projection {
    /// Builds the projection requested by `params`.
    ///
    /// # Errors
    ///
    /// `UnsupportedProjection` if the distance is not positive and finite.
    /// The distance is checked for both modes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use polytope_mesh::{projection::Projection, ShapeParameters};
    ///
    /// let params = ShapeParameters::default().with_projection_distance(-1.0);
    /// assert!(Projection::from_params(&params).is_err());
    /// ```
    pub fn from_params(params: &ShapeParameters) -> Result<Self, GeometryError> {
        let distance = params.projection_distance;
        if !(distance > 0.0 && distance.is_finite()) {
            return Err(GeometryError::UnsupportedProjection { distance });
        }
        Ok(match params.projection {
            ProjectionMode::Perspective => Projection::Perspective { distance },
            ProjectionMode::Orthographic => Projection::Orthographic,
        })
    }

    /// Projects a single point.
    ///
    /// `epsilon` is the smallest magnitude the perspective denominator may
    /// take; a zero denominator is treated as positive.
    #[inline]
    pub fn apply(&self, point: DVec4, epsilon: f64) -> DVec3 {
        match *self {
            Projection::Perspective { distance } => {
                let mut denominator = distance - point.w;
                if denominator.abs() < epsilon {
                    denominator = if denominator < 0.0 { -epsilon } else { epsilon };
                }
                point.truncate() * (distance / denominator)
            }
            Projection::Orthographic => point.truncate(),
        }
    }
}

/// Projects every vertex, preserving order.
pub fn project(vertices: &[DVec4], projection: Projection, epsilon: f64) -> Vec<DVec3> {
    vertices
        .iter()
        .map(|v| projection.apply(*v, epsilon))
        .collect()
}

/// Coordinate plane of a 4D rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane4 {
    XY,
    XZ,
    XW,
    YZ,
    YW,
    ZW,
}

impl Plane4 {
    fn axes(self) -> (usize, usize) {
        match self {
            Plane4::XY => (0, 1),
            Plane4::XZ => (0, 2),
            Plane4::XW => (0, 3),
            Plane4::YZ => (1, 2),
            Plane4::YW => (1, 3),
            Plane4::ZW => (2, 3),
        }
    }
}

/// Linear 4×4 rotation by `angle` in `plane`, taking the first axis of the
/// plane toward the second.
pub fn rotation4(plane: Plane4, angle: f64) -> DMat4 {
    let (a, b) = plane.axes();
    let (sin, cos) = angle.sin_cos();
    let mut cols = DMat4::IDENTITY.to_cols_array_2d();
    cols[a][a] = cos;
    cols[a][b] = sin;
    cols[b][a] = -sin;
    cols[b][b] = cos;
    DMat4::from_cols_array_2d(&cols)
}

/// Rotates, projects and scales a polytope into a 3D solid whose faces wind
/// away from the origin.
///
/// Faces are oriented on the unit-scale projection, so winding does not
/// depend on `scale`.
pub fn project_polytope(
    polytope: &Polytope4,
    projection: Projection,
    view: Option<DMat4>,
    epsilon: f64,
    scale: f64,
) -> Polyhedron {
    let vertices: Vec<DVec3> = polytope
        .vertices()
        .iter()
        .map(|v| {
            let rotated = match view {
                Some(matrix) => matrix * *v,
                None => *v,
            };
            projection.apply(rotated, epsilon)
        })
        .collect();
    Polyhedron::with_outward_faces(vertices, polytope.faces().to_vec()).scaled(scale)
}
