//! # Edge Graph Topology
//!
//! Recovers the combinatorial structure of a regular polytope from its
//! vertex coordinates alone: edges are the shortest vertex pairs, 2-faces
//! are the short cycles of the edge graph.

use super::Face;
use config::constants::EDGE_LENGTH_TOLERANCE;
use glam::{DVec3, DVec4};
use rayon::prelude::*;

/// Shape of the 2-faces of a regular polytope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceKind {
    /// Simplicial faces (tetrahedron, octahedron, icosahedron, 16/24/600-cell).
    Triangle,
    /// Square faces (cube, tesseract).
    Square,
    /// Pentagonal faces (120-cell).
    Pentagon,
}

/// Sorted adjacency lists of an undirected graph.
#[derive(Debug, Clone)]
pub struct Adjacency {
    neighbors: Vec<Vec<u32>>,
}

impl Adjacency {
    /// Builds adjacency lists from an edge list.
    pub fn new(vertex_count: usize, edges: &[[u32; 2]]) -> Self {
        let mut neighbors = vec![Vec::new(); vertex_count];
        for &[a, b] in edges {
            neighbors[a as usize].push(b);
            neighbors[b as usize].push(a);
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }
        Self { neighbors }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns true if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Returns the sorted neighbors of a vertex.
    #[inline]
    pub fn neighbors(&self, vertex: u32) -> &[u32] {
        &self.neighbors[vertex as usize]
    }

    /// Returns true if `a` and `b` share an edge.
    #[inline]
    pub fn contains(&self, a: u32, b: u32) -> bool {
        self.neighbors[a as usize].binary_search(&b).is_ok()
    }
}

/// Returns every vertex pair whose distance equals the minimal pairwise
/// distance (within `EDGE_LENGTH_TOLERANCE`), as `[low, high]` pairs in
/// lexicographic order.
pub fn minimal_edges<P, F>(points: &[P], distance_squared: F) -> Vec<[u32; 2]>
where
    P: Copy + Send + Sync,
    F: Fn(P, P) -> f64 + Sync,
{
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    let distance_squared = &distance_squared;

    let shortest = (0..n)
        .into_par_iter()
        .map(|i| {
            ((i + 1)..n)
                .map(|j| distance_squared(points[i], points[j]))
                .fold(f64::INFINITY, f64::min)
        })
        .reduce(|| f64::INFINITY, f64::min);
    let tolerance = shortest * EDGE_LENGTH_TOLERANCE;

    (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            ((i + 1)..n)
                .filter(move |&j| (distance_squared(points[i], points[j]) - shortest).abs() <= tolerance)
                .map(move |j| [i as u32, j as u32])
        })
        .collect()
}

/// All 3-cliques of the graph, each listed once with ascending indices.
pub fn triangle_faces(graph: &Adjacency) -> Vec<Face> {
    let mut faces = Vec::new();
    for a in 0..graph.len() as u32 {
        for &b in graph.neighbors(a).iter().filter(|&&b| b > a) {
            for &c in graph.neighbors(b).iter().filter(|&&c| c > b) {
                if graph.contains(a, c) {
                    faces.push(vec![a, b, c]);
                }
            }
        }
    }
    faces
}

/// All chordless 4-cycles, each listed once starting at its smallest index.
pub fn square_faces(graph: &Adjacency) -> Vec<Face> {
    let mut faces = Vec::new();
    for a in 0..graph.len() as u32 {
        for &b in graph.neighbors(a).iter().filter(|&&b| b > a) {
            for &c in graph.neighbors(b).iter().filter(|&&c| c > a) {
                if graph.contains(a, c) {
                    continue;
                }
                for &d in graph.neighbors(c).iter().filter(|&&d| d > b) {
                    if graph.contains(d, a) && !graph.contains(b, d) {
                        faces.push(vec![a, b, c, d]);
                    }
                }
            }
        }
    }
    faces
}

/// All chordless planar 5-cycles, each listed once starting at its smallest
/// index.
pub fn pentagon_faces<P: GraphPoint>(graph: &Adjacency, points: &[P]) -> Vec<Face> {
    let mut faces = Vec::new();
    for a in 0..graph.len() as u32 {
        for &b in graph.neighbors(a).iter().filter(|&&b| b > a) {
            for &c in graph.neighbors(b).iter().filter(|&&c| c > a) {
                if graph.contains(a, c) {
                    continue;
                }
                for &d in graph.neighbors(c).iter().filter(|&&d| d > a && d != b) {
                    if graph.contains(a, d) || graph.contains(b, d) {
                        continue;
                    }
                    for &e in graph.neighbors(d).iter().filter(|&&e| e > b && e != c) {
                        if !graph.contains(e, a) || graph.contains(e, b) || graph.contains(e, c) {
                            continue;
                        }
                        let cycle = [a, b, c, d, e];
                        if is_planar(points, &cycle) {
                            faces.push(cycle.to_vec());
                        }
                    }
                }
            }
        }
    }
    faces
}

/// Vector operations needed for the planarity test, shared by 3D and 4D.
pub trait GraphPoint: Copy + Send + Sync {
    /// Component-wise difference.
    fn minus(self, other: Self) -> Self;
    /// Inner product.
    fn inner(self, other: Self) -> f64;
    /// Adds `other * factor`.
    fn add_scaled(self, other: Self, factor: f64) -> Self;
    /// Multiplies every component by `factor`.
    fn scaled(self, factor: f64) -> Self;
}

impl GraphPoint for DVec3 {
    fn minus(self, other: Self) -> Self {
        self - other
    }
    fn inner(self, other: Self) -> f64 {
        self.dot(other)
    }
    fn add_scaled(self, other: Self, factor: f64) -> Self {
        self + other * factor
    }
    fn scaled(self, factor: f64) -> Self {
        self * factor
    }
}

impl GraphPoint for DVec4 {
    fn minus(self, other: Self) -> Self {
        self - other
    }
    fn inner(self, other: Self) -> f64 {
        self.dot(other)
    }
    fn add_scaled(self, other: Self, factor: f64) -> Self {
        self + other * factor
    }
    fn scaled(self, factor: f64) -> Self {
        self * factor
    }
}

/// True if every cycle vertex lies in the plane through the first vertex
/// spanned by its two incident edges.
fn is_planar<P: GraphPoint>(points: &[P], cycle: &[u32]) -> bool {
    let origin = points[cycle[0] as usize];
    let u = points[cycle[1] as usize].minus(origin);
    let v = points[cycle[cycle.len() - 1] as usize].minus(origin);

    let uu = u.inner(u);
    if uu <= 0.0 {
        return false;
    }
    let e1 = u.scaled(1.0 / uu.sqrt());
    let v_perp = v.add_scaled(e1, -v.inner(e1));
    let vv = v_perp.inner(v_perp);
    if vv <= EDGE_LENGTH_TOLERANCE * uu {
        return false;
    }
    let e2 = v_perp.scaled(1.0 / vv.sqrt());

    cycle[2..cycle.len() - 1].iter().all(|&i| {
        let r = points[i as usize].minus(origin);
        let residual = r.add_scaled(e1, -r.inner(e1)).add_scaled(e2, -r.inner(e2));
        residual.inner(residual) <= EDGE_LENGTH_TOLERANCE * uu
    })
}
