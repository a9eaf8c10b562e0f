//! # Parametric Surfaces
//!
//! A `u × v` grid tessellator and the two manifold shapes built on it.

use super::RawShape;
use crate::error::GeometryError;
use crate::params::{validate_scale, ShapeParameters};
use crate::polytope::Polyhedron;
use config::constants::{
    MOBIUS_U_SEGMENTS, MOBIUS_V_SEGMENTS, QUANTUM_U_SEGMENTS, QUANTUM_V_SEGMENTS,
};
use glam::DVec3;
use std::f64::consts::TAU;

/// Resolution and closure of a parametric grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    /// Number of cells along `u`.
    pub u_segments: u32,
    /// Number of cells along `v`.
    pub v_segments: u32,
    /// Connects the last `u` column back to the first.
    pub wrap_u: bool,
    /// Connects the last `v` row back to the first.
    pub wrap_v: bool,
}

impl Grid {
    fn columns(&self) -> u32 {
        if self.wrap_u {
            self.u_segments
        } else {
            self.u_segments + 1
        }
    }

    fn rows(&self) -> u32 {
        if self.wrap_v {
            self.v_segments
        } else {
            self.v_segments + 1
        }
    }
}

/// Samples `surface` over `[0, 1]²` and triangulates the grid.
///
/// Vertex `(i, j)` is stored at index `i * rows + j` and sampled at
/// `(i / u_segments, j / v_segments)`. Each cell `(i, j)` yields the
/// triangles `(i,j) (i+1,j) (i+1,j+1)` and `(i,j) (i+1,j+1) (i,j+1)`, so the
/// winding follows `∂u × ∂v`.
pub fn tessellate<F>(grid: Grid, surface: F) -> Result<Polyhedron, GeometryError>
where
    F: Fn(f64, f64) -> DVec3,
{
    let min_u = if grid.wrap_u { 3 } else { 1 };
    let min_v = if grid.wrap_v { 3 } else { 1 };
    if grid.u_segments < min_u || grid.v_segments < min_v {
        return Err(GeometryError::invalid_parameter(
            "detail",
            format!(
                "grid of {}x{} segments is too coarse",
                grid.u_segments, grid.v_segments
            ),
        ));
    }

    let columns = grid.columns();
    let rows = grid.rows();
    let mut vertices = Vec::with_capacity((columns * rows) as usize);
    for i in 0..columns {
        let u = i as f64 / grid.u_segments as f64;
        for j in 0..rows {
            let v = j as f64 / grid.v_segments as f64;
            vertices.push(surface(u, v));
        }
    }

    let index = |i: u32, j: u32| (i % columns) * rows + (j % rows);
    let mut faces = Vec::with_capacity((2 * grid.u_segments * grid.v_segments) as usize);
    for i in 0..grid.u_segments {
        for j in 0..grid.v_segments {
            let p00 = index(i, j);
            let p10 = index(i + 1, j);
            let p11 = index(i + 1, j + 1);
            let p01 = index(i, j + 1);
            faces.push(vec![p00, p10, p11]);
            faces.push(vec![p00, p11, p01]);
        }
    }

    Ok(Polyhedron::new(vertices, faces))
}

/// Torus with ring radius 1 and a tube radius rippled by `sin(3u + 2v)`.
///
/// # Example
///
/// ```rust
/// use polytope_mesh::{primitives::create_quantum_manifold, ShapeParameters};
///
/// let solid = create_quantum_manifold(&ShapeParameters::default()).unwrap();
/// assert_eq!(solid.vertex_count(), 48 * 16);
/// ```
pub fn create_quantum_manifold(params: &ShapeParameters) -> Result<Polyhedron, GeometryError> {
    validate_scale(params.scale)?;
    let level = params.detail_level()? + 1;
    let scale = params.scale;

    let grid = Grid {
        u_segments: QUANTUM_U_SEGMENTS * level,
        v_segments: QUANTUM_V_SEGMENTS * level,
        wrap_u: true,
        wrap_v: true,
    };
    tessellate(grid, |s, t| {
        let u = s * TAU;
        let v = t * TAU;
        let tube = 0.35 + 0.1 * (3.0 * u + 2.0 * v).sin();
        let ring = 1.0 + tube * v.cos();
        DVec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin()) * scale
    })
}

/// Möbius band laid onto a sphere shell.
///
/// The band `(1 + s cos(u/2)) (cos u, 0, sin u) + (0, s sin(u/2), 0)` with
/// `s ∈ [-½, ½]` gives each sample a direction; its radius is
/// `1 + ½ s cos(u/2)`. Column `u = 2π` lands on column `u = 0` with `s`
/// reversed, so the seam closes only after welding.
pub fn create_mobius_sphere(params: &ShapeParameters) -> Result<Polyhedron, GeometryError> {
    validate_scale(params.scale)?;
    let level = params.detail_level()? + 1;
    let scale = params.scale;

    let grid = Grid {
        u_segments: MOBIUS_U_SEGMENTS * level,
        v_segments: MOBIUS_V_SEGMENTS * level,
        wrap_u: false,
        wrap_v: false,
    };
    tessellate(grid, |a, b| {
        let u = a * TAU;
        let s = b - 0.5;
        let half = u / 2.0;
        let band = DVec3::new(u.cos(), 0.0, u.sin()) * (1.0 + s * half.cos())
            + DVec3::new(0.0, s * half.sin(), 0.0);
        band.normalize() * (1.0 + 0.5 * s * half.cos()) * scale
    })
}

pub(crate) fn build_quantum_manifold(params: &ShapeParameters) -> Result<RawShape, GeometryError> {
    create_quantum_manifold(params).map(RawShape::Solid)
}

pub(crate) fn build_mobius_sphere(params: &ShapeParameters) -> Result<RawShape, GeometryError> {
    create_mobius_sphere(params).map(RawShape::Solid)
}
