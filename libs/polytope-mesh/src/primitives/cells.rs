//! # Regular 4-Polytopes
//!
//! Vertex orbits of the tesseract, 16-cell, 24-cell, 120-cell and 600-cell,
//! normalized to unit circumradius. Edges and 2-faces are recovered from the
//! edge graph (see [`Polytope4::from_vertices`]).
//!
//! Each polytope is generated once per process and shared read-only.
//!
//! | polytope | vertices | edges | faces |
//! |----------|----------|-------|-------|
//! | tesseract | 16 | 32 | 24 squares |
//! | 16-cell | 8 | 24 | 32 triangles |
//! | 24-cell | 24 | 96 | 96 triangles |
//! | 120-cell | 600 | 1200 | 720 pentagons |
//! | 600-cell | 120 | 720 | 1200 triangles |

use super::{RawShape, PHI};
use crate::error::GeometryError;
use crate::params::ShapeParameters;
use crate::polytope::{FaceKind, Polytope4};
use glam::DVec4;
use std::collections::BTreeSet;
use std::sync::OnceLock;

static TESSERACT: OnceLock<Polytope4> = OnceLock::new();
static CELL_16: OnceLock<Polytope4> = OnceLock::new();
static CELL_24: OnceLock<Polytope4> = OnceLock::new();
static CELL_120: OnceLock<Polytope4> = OnceLock::new();
static CELL_600: OnceLock<Polytope4> = OnceLock::new();

/// Which coordinate permutations an orbit ranges over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Permutations {
    All,
    Even,
}

/// Tesseract: (±1, ±1, ±1, ±1).
pub fn tesseract() -> &'static Polytope4 {
    TESSERACT.get_or_init(|| {
        let vertices = orbit([1.0, 1.0, 1.0, 1.0], Permutations::All);
        Polytope4::from_vertices(normalized(vertices), FaceKind::Square)
    })
}

/// 16-cell: permutations of (±1, 0, 0, 0).
pub fn cell_16() -> &'static Polytope4 {
    CELL_16.get_or_init(|| {
        let vertices = orbit([1.0, 0.0, 0.0, 0.0], Permutations::All);
        Polytope4::from_vertices(normalized(vertices), FaceKind::Triangle)
    })
}

/// 24-cell: permutations of (±1, ±1, 0, 0).
pub fn cell_24() -> &'static Polytope4 {
    CELL_24.get_or_init(|| {
        let vertices = orbit([1.0, 1.0, 0.0, 0.0], Permutations::All);
        Polytope4::from_vertices(normalized(vertices), FaceKind::Triangle)
    })
}

/// 600-cell: the unit icosians.
///
/// 8 permutations of (±1, 0, 0, 0), 16 of (±½, ±½, ±½, ±½) and 96 even
/// permutations of ½(±φ, ±1, ±φ⁻¹, 0).
pub fn cell_600() -> &'static Polytope4 {
    CELL_600.get_or_init(|| {
        let mut vertices = orbit([1.0, 0.0, 0.0, 0.0], Permutations::All);
        vertices.extend(orbit([0.5, 0.5, 0.5, 0.5], Permutations::All));
        vertices.extend(orbit(
            [PHI / 2.0, 0.5, 0.5 / PHI, 0.0],
            Permutations::Even,
        ));
        Polytope4::from_vertices(normalized(vertices), FaceKind::Triangle)
    })
}

/// 120-cell: seven orbits at circumradius √8.
pub fn cell_120() -> &'static Polytope4 {
    CELL_120.get_or_init(|| {
        let sqrt5 = 5f64.sqrt();
        let inv = 1.0 / PHI;
        let inv2 = inv * inv;
        let phi2 = PHI * PHI;

        let mut vertices = orbit([0.0, 0.0, 2.0, 2.0], Permutations::All);
        vertices.extend(orbit([1.0, 1.0, 1.0, sqrt5], Permutations::All));
        vertices.extend(orbit([inv2, PHI, PHI, PHI], Permutations::All));
        vertices.extend(orbit([inv, inv, inv, phi2], Permutations::All));
        vertices.extend(orbit([0.0, inv2, 1.0, phi2], Permutations::Even));
        vertices.extend(orbit([0.0, inv, PHI, sqrt5], Permutations::Even));
        vertices.extend(orbit([inv, 1.0, PHI, 2.0], Permutations::Even));
        Polytope4::from_vertices(normalized(vertices), FaceKind::Pentagon)
    })
}

pub(crate) fn build_tesseract(params: &ShapeParameters) -> Result<RawShape, GeometryError> {
    params.validate()?;
    Ok(RawShape::Polytope(tesseract()))
}

pub(crate) fn build_cell_16(params: &ShapeParameters) -> Result<RawShape, GeometryError> {
    params.validate()?;
    Ok(RawShape::Polytope(cell_16()))
}

pub(crate) fn build_cell_24(params: &ShapeParameters) -> Result<RawShape, GeometryError> {
    params.validate()?;
    Ok(RawShape::Polytope(cell_24()))
}

pub(crate) fn build_cell_120(params: &ShapeParameters) -> Result<RawShape, GeometryError> {
    params.validate()?;
    Ok(RawShape::Polytope(cell_120()))
}

pub(crate) fn build_cell_600(params: &ShapeParameters) -> Result<RawShape, GeometryError> {
    params.validate()?;
    Ok(RawShape::Polytope(cell_600()))
}

/// All sign changes of the non-zero coordinates of every selected
/// permutation of `base`, without duplicates, in generation order.
fn orbit(base: [f64; 4], permutations: Permutations) -> Vec<DVec4> {
    let mut seen = BTreeSet::new();
    let mut points = Vec::new();

    for (perm, even) in permutations_of_four() {
        if permutations == Permutations::Even && !even {
            continue;
        }
        let permuted = perm.map(|i| base[i]);
        for mask in 0..16u32 {
            let mut point = permuted;
            for (axis, value) in point.iter_mut().enumerate() {
                if mask & (1 << axis) != 0 {
                    *value = -*value;
                }
            }
            if seen.insert(quantize(point)) {
                points.push(DVec4::from_array(point));
            }
        }
    }

    points
}

/// The 24 permutations of (0, 1, 2, 3) in lexicographic order, each tagged
/// with its parity (`true` for even).
fn permutations_of_four() -> Vec<([usize; 4], bool)> {
    let mut result = Vec::with_capacity(24);
    for a in 0..4 {
        for b in (0..4).filter(|&b| b != a) {
            for c in (0..4).filter(|&c| c != a && c != b) {
                let d = 6 - a - b - c;
                let perm = [a, b, c, d];
                let inversions = (0..4)
                    .flat_map(|i| ((i + 1)..4).map(move |j| (i, j)))
                    .filter(|&(i, j)| perm[i] > perm[j])
                    .count();
                result.push((perm, inversions % 2 == 0));
            }
        }
    }
    result
}

/// Integer key for deduplicating coordinates; `-0.0` and `0.0` coincide.
fn quantize(point: [f64; 4]) -> [i64; 4] {
    point.map(|c| (c * 1e9).round() as i64)
}

fn normalized(vertices: Vec<DVec4>) -> Vec<DVec4> {
    vertices.into_iter().map(|v| v.normalize()).collect()
}
