//! Tests for transform schedules and the composer.

use super::*;
use crate::primitives::create_box;
use approx::assert_relative_eq;
use std::f64::consts::FRAC_PI_2;

fn unit_box() -> Polyhedron {
    create_box(DVec3::splat(2.0)).unwrap()
}

fn centroid(solid: &Polyhedron) -> DVec3 {
    solid.vertices().iter().copied().sum::<DVec3>() / solid.vertex_count() as f64
}

fn extent(solid: &Polyhedron) -> f64 {
    solid
        .vertices()
        .iter()
        .map(|v| v.x)
        .fold(f64::MIN, f64::max)
}

// =============================================================================
// Schedule Tests
// =============================================================================

#[test]
fn test_nested_shrinks_geometrically() {
    let schedule = Nested { ratio: 0.6 };
    let m = schedule.transform(3, 4);
    let p = m.transform_point3(DVec3::X);
    assert_relative_eq!(p.x, 0.216, epsilon = 1e-12);
}

#[test]
fn test_axis_shift_cycles_axes_and_flips() {
    let schedule = AxisShift { step: 1.0 };
    let shifts: Vec<DVec3> = (0..6)
        .map(|i| schedule.transform(i, 6).transform_point3(DVec3::ZERO))
        .collect();
    assert_eq!(shifts[0], DVec3::ZERO);
    assert_eq!(shifts[1], DVec3::new(0.0, 1.0, 0.0));
    assert_eq!(shifts[2], DVec3::new(0.0, 0.0, 2.0));
    assert_eq!(shifts[3], DVec3::new(-3.0, 0.0, 0.0));
    assert_eq!(shifts[4], DVec3::new(0.0, -4.0, 0.0));
    assert_eq!(shifts[5], DVec3::new(0.0, 0.0, -5.0));
}

#[test]
fn test_rotational_sweeps_evenly() {
    let schedule = Rotational {
        axis: DVec3::Y,
        sweep: FRAC_PI_2,
    };
    // Second of two instances turns by half the sweep
    let p = schedule.transform(1, 2).transform_point3(DVec3::X);
    let half = std::f64::consts::FRAC_1_SQRT_2;
    assert_relative_eq!(p.x, half, epsilon = 1e-12);
    assert_relative_eq!(p.z, -half, epsilon = 1e-12);
    assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
}

#[test]
fn test_rotational_zero_axis_is_identity() {
    let schedule = Rotational {
        axis: DVec3::ZERO,
        sweep: 1.0,
    };
    assert_eq!(schedule.transform(1, 2), DMat4::IDENTITY);
}

#[test]
fn test_experimental_combines_scale_twist_shift() {
    let schedule = Experimental {
        ratio: 0.5,
        twist: FRAC_PI_2,
        step: 3f64.sqrt(),
    };
    assert_eq!(schedule.transform(0, 3), DMat4::IDENTITY);

    let m = schedule.transform(1, 3);
    let origin = m.transform_point3(DVec3::ZERO);
    assert_relative_eq!(origin.x, 1.0, epsilon = 1e-12);
    assert_relative_eq!(origin.y, 1.0, epsilon = 1e-12);
    assert_relative_eq!(origin.z, 1.0, epsilon = 1e-12);

    // X is halved then turned onto -Z
    let p = m.transform_vector3(DVec3::X);
    assert_relative_eq!(p.length(), 0.5, epsilon = 1e-12);
    assert_relative_eq!(p.z, -0.5, epsilon = 1e-12);
}

#[test]
fn test_explicit_falls_back_to_identity() {
    let schedule = Explicit(vec![DMat4::from_translation(DVec3::Y)]);
    assert_eq!(schedule.transform(0, 2), DMat4::from_translation(DVec3::Y));
    assert_eq!(schedule.transform(1, 2), DMat4::IDENTITY);
}

// =============================================================================
// Composer Tests
// =============================================================================

#[test]
fn test_compose_count_and_order() {
    let base = unit_box();
    let parts = compose(&base, 3, &Nested { ratio: 0.5 }, &[], 1.0).unwrap();
    assert_eq!(parts.len(), 3);
    assert_relative_eq!(extent(&parts[0]), 1.0, epsilon = 1e-12);
    assert_relative_eq!(extent(&parts[1]), 0.5, epsilon = 1e-12);
    assert_relative_eq!(extent(&parts[2]), 0.25, epsilon = 1e-12);
    for part in &parts {
        assert_eq!(part.faces(), base.faces());
    }
}

#[test]
fn test_compose_applies_offsets() {
    let base = unit_box();
    let offsets = [DVec3::ZERO, DVec3::new(0.0, 2.0, 0.0)];
    let parts = compose(&base, 3, &Nested { ratio: 1.0 }, &offsets, 1.0).unwrap();
    assert_relative_eq!(centroid(&parts[1]).y, 2.0, epsilon = 1e-12);
    // No offset supplied for the third instance
    assert_relative_eq!(centroid(&parts[2]).length(), 0.0, epsilon = 1e-12);
}

#[test]
fn test_compose_scales_translations() {
    let schedule = AxisShift { step: 0.75 };
    let small = compose(&unit_box(), 2, &schedule, &[], 1.0).unwrap();
    let large = compose(&unit_box().scaled(2.0), 2, &schedule, &[], 2.0).unwrap();
    for (a, b) in small[1].vertices().iter().zip(large[1].vertices()) {
        assert_relative_eq!(a.x * 2.0, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y * 2.0, b.y, epsilon = 1e-12);
        assert_relative_eq!(a.z * 2.0, b.z, epsilon = 1e-12);
    }
}

#[test]
fn test_compose_is_deterministic() {
    let base = unit_box();
    let schedule = Experimental {
        ratio: 0.75,
        twist: 0.5,
        step: 0.1,
    };
    let first = compose(&base, 16, &schedule, &[], 1.5).unwrap();
    let second = compose(&base, 16, &schedule, &[], 1.5).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_compose_rejects_bad_count_and_scale() {
    let base = unit_box();
    let schedule = Nested { ratio: 0.5 };
    assert!(matches!(
        compose(&base, 0, &schedule, &[], 1.0),
        Err(GeometryError::InvalidParameter {
            name: "instanceCount",
            ..
        })
    ));
    assert!(compose(&base, 100_000, &schedule, &[], 1.0).is_err());
    assert!(compose(&base, 2, &schedule, &[], 0.0).is_err());
}
