//! Area-weighted vertex normals.

use crate::error::GeometryError;
use config::constants::EPSILON;
use glam::DVec3;

/// Computes one unit normal per vertex.
///
/// Each triangle adds its unnormalized cross product (twice its area
/// times its unit normal) to its three corners; the sums are normalized.
///
/// A triangle counts as zero-area when its cross product is below `EPSILON`
/// times its squared longest edge, so the test does not depend on scale.
/// Zero-area triangles add nothing. Vertices whose sum vanishes get a zero
/// normal. Both cases are reported once each as `DegenerateGeometry`
/// warnings and logged; neither is an error.
///
/// Indices must be in range.
pub fn vertex_normals(
    positions: &[DVec3],
    triangles: &[[u32; 3]],
) -> (Vec<DVec3>, Vec<GeometryError>) {
    let mut normals = vec![DVec3::ZERO; positions.len()];
    let mut warnings = Vec::new();

    let mut zero_area = 0usize;
    for tri in triangles {
        let [a, b, c] = tri.map(|i| positions[i as usize]);
        let normal = (b - a).cross(c - a);
        let longest = (b - a)
            .length_squared()
            .max((c - b).length_squared())
            .max((a - c).length_squared());
        if !(normal.length() > EPSILON * longest) || !normal.is_finite() {
            zero_area += 1;
            continue;
        }
        for &i in tri {
            normals[i as usize] += normal;
        }
    }
    if zero_area > 0 {
        warnings.push(GeometryError::degenerate(format!(
            "{zero_area} zero-area triangle(s) skipped in normal computation"
        )));
    }

    let mut orphaned = 0usize;
    for normal in &mut normals {
        match normal.try_normalize() {
            Some(unit) => *normal = unit,
            None => {
                *normal = DVec3::ZERO;
                orphaned += 1;
            }
        }
    }
    if orphaned > 0 {
        warnings.push(GeometryError::degenerate(format!(
            "{orphaned} vertex normal(s) undefined, substituted zero"
        )));
    }

    for warning in &warnings {
        log::warn!("{warning}");
    }

    (normals, warnings)
}
