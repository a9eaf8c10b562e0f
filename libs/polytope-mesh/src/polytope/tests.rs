//! Tests for the edge graph topology and polyhedron helpers.

use super::*;
use glam::{DMat4, DVec3, DVec4};

fn unit_square() -> Vec<DVec3> {
    vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
    ]
}

fn cube_corners() -> Vec<DVec3> {
    let mut corners = Vec::new();
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                corners.push(DVec3::new(x, y, z));
            }
        }
    }
    corners
}

// =============================================================================
// Edge Graph Tests
// =============================================================================

#[test]
fn test_minimal_edges_square() {
    let edges = minimal_edges(&unit_square(), |a, b| a.distance_squared(b));
    assert_eq!(edges, vec![[0, 1], [0, 3], [1, 2], [2, 3]]);
}

#[test]
fn test_minimal_edges_degenerate_inputs() {
    let empty: Vec<DVec3> = Vec::new();
    assert!(minimal_edges(&empty, |a, b| a.distance_squared(b)).is_empty());
    assert!(minimal_edges(&[DVec3::ONE], |a, b| a.distance_squared(b)).is_empty());
}

#[test]
fn test_adjacency_sorted_and_symmetric() {
    let graph = Adjacency::new(4, &[[2, 0], [0, 1], [1, 2]]);
    assert_eq!(graph.len(), 4);
    assert_eq!(graph.neighbors(0), &[1, 2]);
    assert!(graph.contains(2, 1));
    assert!(graph.contains(1, 2));
    assert!(!graph.contains(0, 3));
    assert!(graph.neighbors(3).is_empty());
}

#[test]
fn test_triangle_faces_of_k4() {
    let graph = Adjacency::new(4, &[[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]]);
    let faces = triangle_faces(&graph);
    assert_eq!(
        faces,
        vec![vec![0, 1, 2], vec![0, 1, 3], vec![0, 2, 3], vec![1, 2, 3]]
    );
}

#[test]
fn test_square_faces_skip_chorded_cycles() {
    // A square with one diagonal has no chordless 4-cycle
    let graph = Adjacency::new(4, &[[0, 1], [1, 2], [2, 3], [0, 3], [0, 2]]);
    assert!(square_faces(&graph).is_empty());

    let graph = Adjacency::new(4, &[[0, 1], [1, 2], [2, 3], [0, 3]]);
    assert_eq!(square_faces(&graph), vec![vec![0, 1, 2, 3]]);
}

#[test]
fn test_cube_graph_faces() {
    let corners = cube_corners();
    let edges = minimal_edges(&corners, |a, b| a.distance_squared(b));
    assert_eq!(edges.len(), 12);
    let graph = Adjacency::new(corners.len(), &edges);
    assert_eq!(square_faces(&graph).len(), 6);
    assert!(triangle_faces(&graph).is_empty());
}

#[test]
fn test_pentagon_faces_require_planarity() {
    let planar: Vec<DVec3> = (0..5)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / 5.0;
            DVec3::new(angle.cos(), angle.sin(), 0.0)
        })
        .collect();
    let ring = [[0, 1], [1, 2], [2, 3], [3, 4], [0, 4]];
    let graph = Adjacency::new(5, &ring);
    assert_eq!(pentagon_faces(&graph, &planar), vec![vec![0, 1, 2, 3, 4]]);

    let mut bent = planar.clone();
    bent[2].z = 0.5;
    assert!(pentagon_faces(&graph, &bent).is_empty());
}

#[test]
fn test_pentagon_faces_in_four_dimensions() {
    let planar: Vec<DVec4> = (0..5)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / 5.0;
            DVec4::new(0.0, angle.cos(), 0.0, angle.sin())
        })
        .collect();
    let graph = Adjacency::new(5, &[[0, 1], [1, 2], [2, 3], [3, 4], [0, 4]]);
    assert_eq!(pentagon_faces(&graph, &planar).len(), 1);
}

// =============================================================================
// Polyhedron Tests
// =============================================================================

#[test]
fn test_outward_faces_rewound() {
    let corners = cube_corners();
    let edges = minimal_edges(&corners, |a, b| a.distance_squared(b));
    let faces = square_faces(&Adjacency::new(corners.len(), &edges));
    let solid = Polyhedron::with_outward_faces(corners, faces);

    for face in solid.faces() {
        let normal = newell_normal(solid.vertices(), face);
        let centroid = face_centroid(solid.vertices(), face);
        assert!(normal.dot(centroid) > 0.0);
    }
}

#[test]
fn test_outward_faces_keep_order_through_origin() {
    // Both faces lie in the plane z = 0, which contains the origin
    let vertices = vec![
        DVec3::new(-1.0, -1.0, 0.0),
        DVec3::new(1.0, -1.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(-1.0, 1.0, 0.0),
    ];
    let faces = vec![vec![0, 1, 2, 3], vec![3, 2, 1, 0]];
    let solid = Polyhedron::with_outward_faces(vertices.clone(), faces.clone());
    assert_eq!(solid.faces(), faces.as_slice());

    let tiny = Polyhedron::with_outward_faces(
        vertices.iter().map(|v| *v * 1e-9).collect(),
        faces.clone(),
    );
    assert_eq!(tiny.faces(), faces.as_slice());
}

#[test]
fn test_solid_from_vertices_cube() {
    let solid = solid_from_vertices(cube_corners(), FaceKind::Square);
    assert_eq!(solid.vertex_count(), 8);
    assert_eq!(solid.face_count(), 6);
    assert_eq!(solid.edge_count(), 12);
}

#[test]
fn test_newell_normal_area() {
    let square = unit_square();
    let normal = newell_normal(&square, &[0, 1, 2, 3]);
    assert_eq!(normal, DVec3::new(0.0, 0.0, 2.0));
    let reversed = newell_normal(&square, &[3, 2, 1, 0]);
    assert_eq!(reversed, -normal);
}

#[test]
fn test_transformed_and_scaled() {
    let solid = solid_from_vertices(cube_corners(), FaceKind::Square);
    let moved = solid.transformed(&DMat4::from_translation(DVec3::X));
    assert_eq!(moved.vertices()[0], solid.vertices()[0] + DVec3::X);
    assert_eq!(moved.faces(), solid.faces());
    assert!(Arc::ptr_eq(&moved.faces, &solid.faces));

    let doubled = solid.scaled(2.0);
    assert_eq!(doubled.vertices()[7], solid.vertices()[7] * 2.0);
    assert!(Arc::ptr_eq(&doubled.faces, &solid.faces));
}

#[test]
fn test_polytope4_from_vertices() {
    // 16-cell vertices
    let mut vertices = Vec::new();
    for axis in 0..4 {
        for sign in [1.0, -1.0] {
            let mut v = [0.0; 4];
            v[axis] = sign;
            vertices.push(DVec4::from_array(v));
        }
    }
    let polytope = Polytope4::from_vertices(vertices, FaceKind::Triangle);
    assert_eq!(polytope.vertex_count(), 8);
    assert_eq!(polytope.edge_count(), 24);
    assert_eq!(polytope.face_count(), 32);
}
