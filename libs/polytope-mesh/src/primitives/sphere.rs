//! # Sphere Primitive
//!
//! Latitude/longitude sphere without pole vertices.

use super::RawShape;
use crate::error::GeometryError;
use crate::params::{validate_scale, ShapeParameters};
use crate::polytope::Polyhedron;
use config::constants::SPHERE_BASE_SEGMENTS;
use glam::DVec3;
use std::f64::consts::{PI, TAU};

/// Creates a sphere of the given radius around the origin, `y` up.
///
/// `segments` points sit on each of `(segments + 1) / 2` latitude rings.
/// Ring `r` lies at polar angle `π (r + ½) / rings`, so no vertex lands on
/// a pole. Neighbouring rings are joined by quads and the two outermost
/// rings are closed by one polygon each.
///
/// # Example
///
/// ```rust
/// use polytope_mesh::primitives::create_sphere;
///
/// let solid = create_sphere(5.0, 16).unwrap();
/// assert_eq!(solid.vertex_count(), 16 * 8);
/// ```
pub fn create_sphere(radius: f64, segments: u32) -> Result<Polyhedron, GeometryError> {
    validate_scale(radius)?;
    if segments < 3 {
        return Err(GeometryError::invalid_parameter(
            "detail",
            format!("sphere needs at least 3 segments, got {segments}"),
        ));
    }

    let rings = (segments + 1) / 2;
    let index = |ring: u32, segment: u32| ring * segments + segment % segments;

    let vertices: Vec<DVec3> = (0..rings)
        .flat_map(|ring| {
            let polar = PI * (f64::from(ring) + 0.5) / f64::from(rings);
            (0..segments).map(move |segment| {
                let azimuth = TAU * f64::from(segment) / f64::from(segments);
                DVec3::new(
                    polar.sin() * azimuth.cos(),
                    polar.cos(),
                    -polar.sin() * azimuth.sin(),
                ) * radius
            })
        })
        .collect();

    let mut faces: Vec<Vec<u32>> = Vec::with_capacity((segments * (rings - 1) + 2) as usize);
    faces.push((0..segments).map(|s| index(0, s)).collect());
    for ring in 0..rings - 1 {
        for s in 0..segments {
            faces.push(vec![
                index(ring, s),
                index(ring + 1, s),
                index(ring + 1, s + 1),
                index(ring, s + 1),
            ]);
        }
    }
    faces.push((0..segments).rev().map(|s| index(rings - 1, s)).collect());

    Ok(Polyhedron::new(vertices, faces))
}

/// Sphere of radius `scale` with `SPHERE_BASE_SEGMENTS * (detail + 1)`
/// segments.
pub(crate) fn build_sphere(params: &ShapeParameters) -> Result<RawShape, GeometryError> {
    let detail = params.detail_level()?;
    create_sphere(params.scale, SPHERE_BASE_SEGMENTS * (detail + 1)).map(RawShape::Solid)
}
