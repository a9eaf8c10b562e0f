//! # Box Primitive
//!
//! Generates centered rectangular boxes with quad faces.

use crate::error::GeometryError;
use crate::polytope::Polyhedron;
use glam::DVec3;

/// Creates a box centered at the origin.
///
/// # Arguments
///
/// * `size` - Edge lengths [x, y, z]
///
/// # Returns
///
/// A polyhedron with 8 vertices and 6 quad faces, wound counter-clockwise
/// seen from outside.
///
/// # Example
///
/// ```rust
/// use polytope_mesh::primitives::create_box;
/// use glam::DVec3;
///
/// let solid = create_box(DVec3::splat(1.5)).unwrap();
/// assert_eq!(solid.vertex_count(), 8);
/// assert_eq!(solid.face_count(), 6);
/// ```
pub fn create_box(size: DVec3) -> Result<Polyhedron, GeometryError> {
    if !(size.x > 0.0 && size.y > 0.0 && size.z > 0.0) || !size.is_finite() {
        return Err(GeometryError::invalid_parameter(
            "scale",
            format!("box size must be positive: {:?}", size),
        ));
    }

    let max = size / 2.0;
    let min = -max;

    let vertices = vec![
        // Bottom face (z = min.z)
        DVec3::new(min.x, min.y, min.z), // 0: left-front-bottom
        DVec3::new(max.x, min.y, min.z), // 1: right-front-bottom
        DVec3::new(max.x, max.y, min.z), // 2: right-back-bottom
        DVec3::new(min.x, max.y, min.z), // 3: left-back-bottom
        // Top face (z = max.z)
        DVec3::new(min.x, min.y, max.z), // 4: left-front-top
        DVec3::new(max.x, min.y, max.z), // 5: right-front-top
        DVec3::new(max.x, max.y, max.z), // 6: right-back-top
        DVec3::new(min.x, max.y, max.z), // 7: left-back-top
    ];

    let faces = vec![
        vec![0, 3, 2, 1], // bottom
        vec![4, 5, 6, 7], // top
        vec![0, 1, 5, 4], // front
        vec![2, 3, 7, 6], // back
        vec![3, 0, 4, 7], // left
        vec![1, 2, 6, 5], // right
    ];

    Ok(Polyhedron::new(vertices, faces))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polytope::newell_normal;

    #[test]
    fn test_box_counts() {
        let solid = create_box(DVec3::splat(10.0)).unwrap();
        assert_eq!(solid.vertex_count(), 8);
        assert_eq!(solid.face_count(), 6);
        assert_eq!(solid.edge_count(), 12);
    }

    #[test]
    fn test_box_centered() {
        let solid = create_box(DVec3::new(2.0, 4.0, 6.0)).unwrap();
        let min = solid.vertices().iter().fold(DVec3::MAX, |m, v| m.min(*v));
        let max = solid.vertices().iter().fold(DVec3::MIN, |m, v| m.max(*v));
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_box_faces_point_outward() {
        let solid = create_box(DVec3::splat(2.0)).unwrap();
        for face in solid.faces() {
            let normal = newell_normal(solid.vertices(), face);
            let centroid: DVec3 =
                face.iter().map(|&i| solid.vertices()[i as usize]).sum::<DVec3>() / 4.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_box_invalid_size() {
        assert!(create_box(DVec3::new(0.0, 10.0, 10.0)).is_err());
        assert!(create_box(DVec3::new(-5.0, 10.0, 10.0)).is_err());
        assert!(create_box(DVec3::new(f64::NAN, 1.0, 1.0)).is_err());
    }
}
