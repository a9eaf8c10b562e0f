//! Tests for merge, weld and normal computation.

use super::*;
use crate::mesh::BaseType;
use crate::primitives::create_box;
use approx::assert_relative_eq;

fn metadata() -> GeometryMetadata {
    GeometryMetadata::single(BaseType::Box)
}

fn cube(size: f64) -> Polyhedron {
    create_box(DVec3::splat(size)).unwrap()
}

fn triangle(a: DVec3, b: DVec3, c: DVec3) -> Polyhedron {
    Polyhedron::new(vec![a, b, c], vec![vec![0, 1, 2]])
}

// =============================================================================
// Merge Tests
// =============================================================================

#[test]
fn test_merge_offsets_indices() {
    let a = triangle(DVec3::ZERO, DVec3::X, DVec3::Y);
    let b = triangle(DVec3::Z, DVec3::new(1.0, 0.0, 1.0), DVec3::new(0.0, 1.0, 1.0));
    let buffer = merge(&[a, b], MergeOptions::default(), metadata()).unwrap();
    assert_eq!(buffer.vertex_count(), 6);
    assert_eq!(buffer.triangles(), &[[0, 1, 2], [3, 4, 5]]);
    assert!(buffer.validate().is_ok());
}

#[test]
fn test_merge_fan_triangulates_polygons() {
    let pentagon = Polyhedron::new(
        (0..5)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / 5.0;
                DVec3::new(angle.cos(), angle.sin(), 0.0)
            })
            .collect(),
        vec![vec![0, 1, 2, 3, 4]],
    );
    let buffer = merge(&[pentagon], MergeOptions::default(), metadata()).unwrap();
    assert_eq!(buffer.triangles(), &[[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
    for n in buffer.normals() {
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_merge_empty() {
    let buffer = merge(&[], MergeOptions::default(), metadata()).unwrap();
    assert!(buffer.is_empty());
    assert!(buffer.warnings().is_empty());
}

#[test]
fn test_merge_rejects_bad_faces() {
    let short = Polyhedron::new(vec![DVec3::ZERO, DVec3::X], vec![vec![0, 1]]);
    assert!(matches!(
        merge(&[short], MergeOptions::default(), metadata()),
        Err(GeometryError::InvalidTopology { .. })
    ));

    let dangling = Polyhedron::new(vec![DVec3::ZERO], vec![vec![0, 1, 2]]);
    assert!(matches!(
        merge(&[dangling], MergeOptions::default(), metadata()),
        Err(GeometryError::InvalidTopology { .. })
    ));
}

#[test]
fn test_merge_is_associative_in_content() {
    let a = cube(1.0);
    let b = cube(2.0).transformed(&glam::DMat4::from_translation(DVec3::X));
    let c = triangle(DVec3::ZERO, DVec3::Y, DVec3::Z);
    let options = MergeOptions::default();

    let ab = merge(&[a.clone(), b.clone()], options, metadata()).unwrap();
    let left = merge(&[ab.to_polyhedron(), c.clone()], options, metadata()).unwrap();

    let bc = merge(&[b.clone(), c.clone()], options, metadata()).unwrap();
    let right = merge(&[a.clone(), bc.to_polyhedron()], options, metadata()).unwrap();

    let flat = merge(&[a, b, c], options, metadata()).unwrap();

    assert_eq!(left.positions(), right.positions());
    assert_eq!(left.triangles(), right.triangles());
    assert_eq!(left, flat);
}

#[test]
fn test_merge_carries_metadata() {
    let metadata = GeometryMetadata {
        is_compound: true,
        base_type: BaseType::Tesseract,
        is_hypercube: true,
        instance_count: 2,
    };
    let buffer = merge(&[cube(1.0), cube(0.5)], MergeOptions::default(), metadata).unwrap();
    assert_eq!(*buffer.metadata(), metadata);
}

#[test]
fn test_check_limits() {
    assert!(check_limits(MAX_VERTICES, MAX_TRIANGLES).is_ok());
    assert!(matches!(
        check_limits(MAX_VERTICES + 1, 0),
        Err(GeometryError::TooManyVertices { .. })
    ));
    assert!(matches!(
        check_limits(0, MAX_TRIANGLES + 1),
        Err(GeometryError::TooManyTriangles { .. })
    ));
}

// =============================================================================
// Weld Tests
// =============================================================================

#[test]
fn test_weld_joins_shared_corners() {
    // Two unit cubes sharing the face x = 0.5
    let left = cube(1.0);
    let right = cube(1.0).transformed(&glam::DMat4::from_translation(DVec3::X));
    let buffer = merge(&[left, right], MergeOptions::welded(1e-4), metadata()).unwrap();
    assert_eq!(buffer.vertex_count(), 12);
    assert_eq!(buffer.triangle_count(), 24);
    assert!(buffer.validate().is_ok());
}

#[test]
fn test_weld_keeps_first_seen_position() {
    let positions = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::new(5e-5, 0.0, 0.0)];
    let (welded, triangles) = weld::weld(&positions, &[[3, 1, 2]], 1e-4).unwrap();
    assert_eq!(welded, vec![DVec3::ZERO, DVec3::X, DVec3::Y]);
    assert_eq!(triangles, vec![[0, 1, 2]]);
}

#[test]
fn test_weld_drops_collapsed_triangles() {
    let positions = [DVec3::ZERO, DVec3::new(1e-6, 0.0, 0.0), DVec3::Y, DVec3::X];
    let (welded, triangles) = weld::weld(&positions, &[[0, 1, 2], [0, 3, 2]], 1e-4).unwrap();
    assert_eq!(triangles, vec![[0, 2, 1]]);
    assert_eq!(welded, vec![DVec3::ZERO, DVec3::Y, DVec3::X]);
}

#[test]
fn test_weld_across_cell_boundary() {
    // Straddles a hash cell boundary at x = 0
    let positions = [
        DVec3::new(-1e-5, 0.0, 0.0),
        DVec3::new(1e-5, 0.0, 0.0),
        DVec3::Y,
        DVec3::Z,
    ];
    let (welded, _) = weld::weld(&positions, &[[1, 2, 3]], 1e-4).unwrap();
    assert_eq!(welded, vec![DVec3::new(-1e-5, 0.0, 0.0), DVec3::Y, DVec3::Z]);
}

#[test]
fn test_weld_is_idempotent() {
    let parts: Vec<Polyhedron> = (0..4)
        .map(|i| cube(1.0).transformed(&glam::DMat4::from_translation(DVec3::X * i as f64)))
        .collect();
    let once = merge(&parts, MergeOptions::welded(1e-4), metadata()).unwrap();
    let twice = once.welded(1e-4).unwrap();
    assert_eq!(once, twice);

    let (positions, triangles) = weld::weld(once.positions(), once.triangles(), 1e-4).unwrap();
    assert_eq!(positions, once.positions());
    assert_eq!(triangles, once.triangles());
}

#[test]
fn test_weld_rejects_bad_input() {
    let positions = [DVec3::ZERO, DVec3::X, DVec3::Y];
    for epsilon in [0.0, -1.0, f64::NAN] {
        assert!(matches!(
            weld::weld(&positions, &[[0, 1, 2]], epsilon),
            Err(GeometryError::InvalidParameter { .. })
        ));
    }
    assert!(matches!(
        weld::weld(&positions, &[[0, 1, 3]], 1e-4),
        Err(GeometryError::InvalidTopology { .. })
    ));
}

// =============================================================================
// Normal Tests
// =============================================================================

#[test]
fn test_normals_unit_and_outward_on_cube() {
    let buffer = merge(&[cube(2.0)], MergeOptions::default(), metadata()).unwrap();
    assert_eq!(buffer.normals().len(), buffer.positions().len());
    for (p, n) in buffer.positions().iter().zip(buffer.normals()) {
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
        assert!(n.dot(*p) > 0.0);
    }
    assert!(buffer.warnings().is_empty());
}

#[test]
fn test_normals_area_weighted() {
    // A large triangle in z = 0 and a tiny one in x = 0 share vertex 0
    let positions = [
        DVec3::ZERO,
        DVec3::new(10.0, 0.0, 0.0),
        DVec3::new(0.0, 10.0, 0.0),
        DVec3::new(0.0, 0.1, 0.0),
        DVec3::new(0.0, 0.0, 0.1),
    ];
    let (normals, warnings) = normals::vertex_normals(&positions, &[[0, 1, 2], [0, 3, 4]]);
    assert!(warnings.is_empty());
    assert!(normals[0].z > 0.99);
    assert!(normals[0].x > 0.0);
}

#[test]
fn test_normals_defined_at_tiny_scale() {
    for size in [1e-6, 1e-9] {
        let buffer = merge(&[cube(size)], MergeOptions::default(), metadata()).unwrap();
        assert!(buffer.warnings().is_empty(), "size {size}");
        for (p, n) in buffer.positions().iter().zip(buffer.normals()) {
            assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
            assert!(n.dot(*p) > 0.0);
        }
    }

    // A thin but valid sliver keeps its normal
    let positions = [DVec3::ZERO, DVec3::new(1e-6, 0.0, 0.0), DVec3::new(0.0, 1e-6, 0.0)];
    let (normals, warnings) = normals::vertex_normals(&positions, &[[0, 1, 2]]);
    assert!(warnings.is_empty());
    assert_relative_eq!(normals[0].z, 1.0, epsilon = 1e-12);
}

#[test]
fn test_degenerate_geometry_recovered_as_warning() {
    let _ = env_logger::builder().is_test(true).try_init();

    // Collinear triangle plus an unused vertex
    let solid = Polyhedron::new(
        vec![DVec3::ZERO, DVec3::X, DVec3::X * 2.0, DVec3::Y],
        vec![vec![0, 1, 2]],
    );
    let buffer = merge(&[solid], MergeOptions::default(), metadata()).unwrap();
    assert_eq!(buffer.normals(), &[DVec3::ZERO; 4]);
    assert_eq!(buffer.warnings().len(), 2);
    assert!(buffer
        .warnings()
        .iter()
        .all(|w| matches!(w, GeometryError::DegenerateGeometry { .. })));
}
