//! # Polytope Data
//!
//! Raw builder output: 3D polyhedra with polygon faces, and unit-circumradius
//! 4D polytopes with their edge and 2-face lists.
//!
//! Faces are ordered vertex cycles. For 3D solids the winding is
//! counter-clockwise seen from outside.

mod graph;

#[cfg(test)]
mod tests;

pub use graph::{
    minimal_edges, pentagon_faces, square_faces, triangle_faces, Adjacency, FaceKind, GraphPoint,
};

use config::constants::EPSILON;
use glam::{DMat4, DVec3, DVec4};
use std::collections::BTreeSet;
use std::sync::Arc;

/// A polygon face as an ordered cycle of vertex indices.
pub type Face = Vec<u32>;

/// A 3D vertex/face set emitted by a builder or by the projection layer.
///
/// The face list is shared between a polyhedron and its transformed or
/// scaled copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    vertices: Vec<DVec3>,
    faces: Arc<Vec<Face>>,
}

impl Polyhedron {
    /// Creates a polyhedron, keeping face winding as given.
    pub fn new(vertices: Vec<DVec3>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            faces: Arc::new(faces),
        }
    }

    /// Creates a polyhedron whose faces are re-wound so that each face normal
    /// points away from the origin.
    ///
    /// Only meaningful for shapes that are star-shaped around the origin
    /// (convex solids and projected polytopes). Faces whose plane passes
    /// through the origin, within `EPSILON` relative to the normal and
    /// centroid lengths, keep their given order.
    pub fn with_outward_faces(vertices: Vec<DVec3>, mut faces: Vec<Face>) -> Self {
        for face in &mut faces {
            let normal = newell_normal(&vertices, face);
            let centroid = face_centroid(&vertices, face);
            let alignment = normal.dot(centroid);
            if alignment.abs() <= EPSILON * normal.length() * centroid.length() {
                continue;
            }
            if alignment < 0.0 {
                face.reverse();
            }
        }
        Self::new(vertices, faces)
    }

    /// Returns the vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns the polygon faces.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of polygon faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the number of triangles a fan triangulation of the faces
    /// produces.
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|f| f.len().saturating_sub(2)).sum()
    }

    /// Returns the unique undirected edges implied by the faces, sorted.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut edges = BTreeSet::new();
        for face in self.faces.iter() {
            for (i, &a) in face.iter().enumerate() {
                let b = face[(i + 1) % face.len()];
                edges.insert([a.min(b), a.max(b)]);
            }
        }
        edges.into_iter().collect()
    }

    /// Returns the number of unique edges.
    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Returns a copy with every vertex mapped through an affine matrix.
    pub fn transformed(&self, matrix: &DMat4) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|v| matrix.transform_point3(*v))
                .collect(),
            faces: Arc::clone(&self.faces),
        }
    }

    /// Returns a copy uniformly scaled about the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| *v * factor).collect(),
            faces: Arc::clone(&self.faces),
        }
    }
}

/// A 4D polytope with unit circumradius.
#[derive(Debug, Clone, PartialEq)]
pub struct Polytope4 {
    vertices: Vec<DVec4>,
    edges: Vec<[u32; 2]>,
    faces: Vec<Face>,
}

impl Polytope4 {
    /// Derives edges and 2-faces from a vertex set.
    ///
    /// Edges join vertex pairs at the minimal pairwise distance; faces are
    /// the cycles of the requested kind in the edge graph.
    pub fn from_vertices(vertices: Vec<DVec4>, kind: FaceKind) -> Self {
        let edges = minimal_edges(&vertices, |a, b| a.distance_squared(b));
        let adjacency = Adjacency::new(vertices.len(), &edges);
        let faces = match kind {
            FaceKind::Triangle => triangle_faces(&adjacency),
            FaceKind::Square => square_faces(&adjacency),
            FaceKind::Pentagon => pentagon_faces(&adjacency, &vertices),
        };
        Self {
            vertices,
            edges,
            faces,
        }
    }

    /// Returns the 4D vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[DVec4] {
        &self.vertices
    }

    /// Returns the edges as sorted index pairs.
    #[inline]
    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }

    /// Returns the 2-faces.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of 2-faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Derives a convex 3D solid's faces from its vertex set.
pub(crate) fn solid_from_vertices(vertices: Vec<DVec3>, kind: FaceKind) -> Polyhedron {
    let edges = minimal_edges(&vertices, |a, b| a.distance_squared(b));
    let adjacency = Adjacency::new(vertices.len(), &edges);
    let faces = match kind {
        FaceKind::Triangle => triangle_faces(&adjacency),
        FaceKind::Square => square_faces(&adjacency),
        FaceKind::Pentagon => pentagon_faces(&adjacency, &vertices),
    };
    Polyhedron::with_outward_faces(vertices, faces)
}

/// Newell's method: robust polygon normal, length equal to twice the area
/// for planar polygons.
pub(crate) fn newell_normal(vertices: &[DVec3], face: &[u32]) -> DVec3 {
    let mut normal = DVec3::ZERO;
    for (i, &a) in face.iter().enumerate() {
        let current = vertices[a as usize];
        let next = vertices[face[(i + 1) % face.len()] as usize];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal
}

fn face_centroid(vertices: &[DVec3], face: &[u32]) -> DVec3 {
    let sum: DVec3 = face.iter().map(|&i| vertices[i as usize]).sum();
    sum / face.len().max(1) as f64
}
