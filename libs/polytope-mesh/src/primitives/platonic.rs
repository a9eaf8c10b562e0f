//! # Platonic Solids
//!
//! Tetrahedron, octahedron, cube and icosahedron from their canonical
//! coordinates, normalized to unit circumradius and scaled by `scale`.
//!
//! The triangular solids accept a `detail` level: each face is split into
//! `(detail + 1)²` triangles whose vertices are pushed onto the
//! circumsphere, giving a geodesic polyhedron.

use super::box_solid::create_box;
use super::{RawShape, PHI};
use crate::error::GeometryError;
use crate::params::{validate_scale, ShapeParameters};
use crate::polytope::{solid_from_vertices, FaceKind, Polyhedron};
use glam::DVec3;
use std::collections::HashMap;
use std::sync::OnceLock;

static TETRAHEDRON: OnceLock<Polyhedron> = OnceLock::new();
static OCTAHEDRON: OnceLock<Polyhedron> = OnceLock::new();
static ICOSAHEDRON: OnceLock<Polyhedron> = OnceLock::new();

/// Unit tetrahedron: alternate corners of the cube (±1, ±1, ±1).
fn unit_tetrahedron() -> &'static Polyhedron {
    TETRAHEDRON.get_or_init(|| {
        let vertices = [
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(1.0, -1.0, -1.0),
            DVec3::new(-1.0, 1.0, -1.0),
            DVec3::new(-1.0, -1.0, 1.0),
        ]
        .iter()
        .map(|v| v.normalize())
        .collect();
        solid_from_vertices(vertices, FaceKind::Triangle)
    })
}

/// Unit octahedron: (±1, 0, 0) and permutations.
fn unit_octahedron() -> &'static Polyhedron {
    OCTAHEDRON.get_or_init(|| {
        let vertices = vec![
            DVec3::X,
            DVec3::NEG_X,
            DVec3::Y,
            DVec3::NEG_Y,
            DVec3::Z,
            DVec3::NEG_Z,
        ];
        solid_from_vertices(vertices, FaceKind::Triangle)
    })
}

/// Unit icosahedron: cyclic permutations of (0, ±1, ±φ).
fn unit_icosahedron() -> &'static Polyhedron {
    ICOSAHEDRON.get_or_init(|| {
        let mut vertices = Vec::with_capacity(12);
        for (a, b) in [(1.0, PHI), (1.0, -PHI), (-1.0, PHI), (-1.0, -PHI)] {
            vertices.push(DVec3::new(0.0, a, b));
            vertices.push(DVec3::new(a, b, 0.0));
            vertices.push(DVec3::new(b, 0.0, a));
        }
        let vertices = vertices.into_iter().map(|v| v.normalize()).collect();
        solid_from_vertices(vertices, FaceKind::Triangle)
    })
}

/// Creates a tetrahedron: 4 vertices, 6 edges, 4 faces at detail 0.
///
/// # Example
///
/// ```rust
/// use polytope_mesh::{primitives::create_tetrahedron, ShapeParameters};
///
/// let solid = create_tetrahedron(&ShapeParameters::default()).unwrap();
/// assert_eq!(solid.vertex_count(), 4);
/// assert_eq!(solid.face_count(), 4);
/// ```
pub fn create_tetrahedron(params: &ShapeParameters) -> Result<Polyhedron, GeometryError> {
    geodesic(unit_tetrahedron(), params)
}

/// Creates an octahedron: 6 vertices, 12 edges, 8 faces at detail 0.
pub fn create_octahedron(params: &ShapeParameters) -> Result<Polyhedron, GeometryError> {
    geodesic(unit_octahedron(), params)
}

/// Creates an icosahedron: 12 vertices, 30 edges, 20 faces at detail 0.
///
/// # Example
///
/// ```rust
/// use polytope_mesh::{primitives::create_icosahedron, ShapeParameters};
///
/// let solid = create_icosahedron(&ShapeParameters::default()).unwrap();
/// assert_eq!(solid.vertex_count(), 12);
/// assert_eq!(solid.edge_count(), 30);
/// assert_eq!(solid.face_count(), 20);
/// ```
pub fn create_icosahedron(params: &ShapeParameters) -> Result<Polyhedron, GeometryError> {
    geodesic(unit_icosahedron(), params)
}

/// Creates a cube with unit circumradius times `scale`: 8 vertices,
/// 12 edges, 6 square faces. `detail` is validated but has no effect.
pub fn create_cube(params: &ShapeParameters) -> Result<Polyhedron, GeometryError> {
    validate_scale(params.scale)?;
    params.detail_level()?;
    create_box(DVec3::splat(2.0 * params.scale / 3f64.sqrt()))
}

pub(crate) fn build_tetrahedron(params: &ShapeParameters) -> Result<RawShape, GeometryError> {
    create_tetrahedron(params).map(RawShape::Solid)
}

pub(crate) fn build_octahedron(params: &ShapeParameters) -> Result<RawShape, GeometryError> {
    create_octahedron(params).map(RawShape::Solid)
}

pub(crate) fn build_icosahedron(params: &ShapeParameters) -> Result<RawShape, GeometryError> {
    create_icosahedron(params).map(RawShape::Solid)
}

pub(crate) fn build_cube(params: &ShapeParameters) -> Result<RawShape, GeometryError> {
    create_cube(params).map(RawShape::Solid)
}

/// Edge length of the legacy concentric-cube hypercube.
const LEGACY_BOX_EDGE: f64 = 1.5;

/// Axis-aligned box of edge 1.5 used by the legacy hypercube.
pub(crate) fn build_legacy_box(params: &ShapeParameters) -> Result<RawShape, GeometryError> {
    validate_scale(params.scale)?;
    params.detail_level()?;
    create_box(DVec3::splat(LEGACY_BOX_EDGE * params.scale)).map(RawShape::Solid)
}

/// Subdivides a unit triangular solid and scales it.
fn geodesic(base: &Polyhedron, params: &ShapeParameters) -> Result<Polyhedron, GeometryError> {
    validate_scale(params.scale)?;
    let detail = params.detail_level()?;
    let solid = if detail == 0 {
        base.clone()
    } else {
        subdivide(base, detail + 1)
    };
    Ok(solid.scaled(params.scale))
}

/// Splits every triangle into `n²` triangles on the unit sphere.
///
/// Lattice points shared by neighbouring faces are keyed by their integer
/// barycentric weights over the original vertex indices, so shared edges
/// produce shared vertices.
fn subdivide(base: &Polyhedron, n: u32) -> Polyhedron {
    let corners = base.vertices();
    let mut vertices = corners.to_vec();
    let mut lookup: HashMap<Vec<(u32, u32)>, u32> = HashMap::new();
    let mut faces = Vec::with_capacity(base.face_count() * (n * n) as usize);

    for face in base.faces() {
        let (a, b, c) = (face[0], face[1], face[2]);
        let mut point = |i: u32, j: u32| -> u32 {
            let weights = [(a, n - i - j), (b, i), (c, j)];
            let mut key: Vec<(u32, u32)> =
                weights.iter().copied().filter(|&(_, w)| w > 0).collect();
            if let [(vertex, _)] = key.as_slice() {
                return *vertex;
            }
            key.sort_unstable();
            *lookup.entry(key).or_insert_with(|| {
                let position = weights
                    .iter()
                    .map(|&(v, w)| corners[v as usize] * w as f64)
                    .sum::<DVec3>()
                    / n as f64;
                vertices.push(position.normalize());
                (vertices.len() - 1) as u32
            })
        };

        for i in 0..n {
            for j in 0..(n - i) {
                let p00 = point(i, j);
                let p10 = point(i + 1, j);
                let p01 = point(i, j + 1);
                faces.push(vec![p00, p10, p01]);
                if j + 1 < n - i {
                    let p11 = point(i + 1, j + 1);
                    faces.push(vec![p10, p11, p01]);
                }
            }
        }
    }

    Polyhedron::new(vertices, faces)
}
