//! # Mesh Merge & Normalize
//!
//! Concatenates polygon solids into one [`GeometryBuffer`]:
//!
//! ```text
//! parts ──► validate ──► concatenate + fan-triangulate ──► [weld] ──► normals
//! ```
//!
//! Metadata is supplied by the caller; merge never inspects which pipeline
//! produced the parts.

pub mod normals;
pub mod weld;

#[cfg(test)]
mod tests;

use crate::error::GeometryError;
use crate::mesh::{GeometryBuffer, GeometryMetadata};
use crate::polytope::Polyhedron;
use config::constants::{MAX_TRIANGLES, MAX_VERTICES, WELD_EPSILON};
use glam::DVec3;
use normals::vertex_normals;
use weld::weld;

/// Options for [`merge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeOptions {
    /// Unify vertices closer than `weld_epsilon`.
    pub weld: bool,
    /// Weld distance.
    pub weld_epsilon: f64,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            weld: false,
            weld_epsilon: WELD_EPSILON,
        }
    }
}

impl MergeOptions {
    /// Options with welding enabled at the given distance.
    pub fn welded(weld_epsilon: f64) -> Self {
        Self {
            weld: true,
            weld_epsilon,
        }
    }
}

/// Merges parts into one buffer.
///
/// Part `k`'s indices are offset by the number of vertices in parts
/// `0..k`. Polygon faces `[v0, v1, ..., vn]` become the fan
/// `[v0, vi, vi+1]`, which keeps their winding.
///
/// # Errors
///
/// - `InvalidTopology` for a face with fewer than three corners or an
///   index past its part's vertex list
/// - `TooManyVertices` / `TooManyTriangles` above the configured limits
/// - `InvalidParameter` for a bad weld epsilon when welding
///
/// # Example
///
/// ```rust
/// use polytope_mesh::merge::{merge, MergeOptions};
/// use polytope_mesh::mesh::{BaseType, GeometryMetadata};
/// use polytope_mesh::primitives::create_box;
/// use glam::DVec3;
///
/// let cube = create_box(DVec3::splat(1.0)).unwrap();
/// let buffer = merge(
///     &[cube.clone(), cube],
///     MergeOptions::default(),
///     GeometryMetadata::single(BaseType::Box),
/// )
/// .unwrap();
/// assert_eq!(buffer.vertex_count(), 16);
/// assert_eq!(buffer.triangle_count(), 24);
/// ```
pub fn merge(
    parts: &[Polyhedron],
    options: MergeOptions,
    metadata: GeometryMetadata,
) -> Result<GeometryBuffer, GeometryError> {
    let mut vertex_total = 0usize;
    let mut triangle_total = 0usize;
    for part in parts {
        validate_part(part)?;
        vertex_total += part.vertex_count();
        triangle_total += part.triangle_count();
    }
    check_limits(vertex_total, triangle_total)?;

    let mut positions: Vec<DVec3> = Vec::with_capacity(vertex_total);
    let mut triangles: Vec<[u32; 3]> = Vec::with_capacity(triangle_total);
    for part in parts {
        let offset = positions.len() as u32;
        positions.extend_from_slice(part.vertices());
        for face in part.faces() {
            for i in 1..face.len() - 1 {
                triangles.push([face[0] + offset, face[i] + offset, face[i + 1] + offset]);
            }
        }
    }

    if options.weld {
        let before = positions.len();
        (positions, triangles) = weld(&positions, &triangles, options.weld_epsilon)?;
        log::debug!("weld: {before} -> {} vertices", positions.len());
    }

    let (normals, warnings) = vertex_normals(&positions, &triangles);
    Ok(GeometryBuffer::from_parts(
        positions, normals, triangles, metadata, warnings,
    ))
}

/// Rejects totals above `MAX_VERTICES` / `MAX_TRIANGLES`.
///
/// Pipelines call this with the projected totals before building compound
/// instances, so oversized requests fail without allocating them.
pub fn check_limits(vertex_total: usize, triangle_total: usize) -> Result<(), GeometryError> {
    if vertex_total > MAX_VERTICES {
        return Err(GeometryError::TooManyVertices {
            count: vertex_total,
            max: MAX_VERTICES,
        });
    }
    if triangle_total > MAX_TRIANGLES {
        return Err(GeometryError::TooManyTriangles {
            count: triangle_total,
            max: MAX_TRIANGLES,
        });
    }
    Ok(())
}

fn validate_part(part: &Polyhedron) -> Result<(), GeometryError> {
    let count = part.vertex_count();
    for face in part.faces() {
        if face.len() < 3 {
            return Err(GeometryError::invalid_topology(format!(
                "face {face:?} has fewer than three corners"
            )));
        }
        if let Some(&bad) = face.iter().find(|&&i| i as usize >= count) {
            return Err(GeometryError::invalid_topology(format!(
                "face index {bad} out of range for {count} vertices"
            )));
        }
    }
    Ok(())
}
