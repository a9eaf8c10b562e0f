//! # Compound Composer
//!
//! Combines several instances of one base solid. Compound variants differ
//! only in the [`TransformSchedule`] that places each instance.
//!
//! Schedules work in unit-scale space: the composer conjugates every
//! instance matrix by the shape's scale, so translations grow with the
//! shape and a compound scales exactly like its parts.

use crate::error::GeometryError;
use crate::params::{validate_instance_count, validate_scale};
use crate::polytope::Polyhedron;
use glam::{DMat4, DQuat, DVec3};
use rayon::prelude::*;
use std::fmt;

#[cfg(test)]
mod tests;

/// Strategy returning the placement of instance `index` out of `count`.
///
/// # Examples
/// ```
/// use polytope_mesh::compound::{Nested, TransformSchedule};
/// use glam::{DMat4, DVec3};
///
/// let schedule = Nested { ratio: 0.5 };
/// assert_eq!(schedule.transform(0, 3), DMat4::IDENTITY);
/// assert_eq!(
///     schedule.transform(2, 3),
///     DMat4::from_scale(DVec3::splat(0.25))
/// );
/// ```
pub trait TransformSchedule: fmt::Debug + Send + Sync {
    /// Short label used in log output.
    fn name(&self) -> &'static str;

    /// Affine matrix for one instance, in unit-scale space.
    fn transform(&self, index: usize, count: usize) -> DMat4;
}

/// Concentric copies, each `ratio` times the size of the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nested {
    pub ratio: f64,
}

impl TransformSchedule for Nested {
    fn name(&self) -> &'static str {
        "nested"
    }

    fn transform(&self, index: usize, _count: usize) -> DMat4 {
        DMat4::from_scale(DVec3::splat(self.ratio.powi(index as i32)))
    }
}

/// Copies stepped along X, Y, Z in turn.
///
/// Instance `i` moves `step * i` along axis `i mod 3`; the direction flips
/// after every full X/Y/Z cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisShift {
    pub step: f64,
}

impl TransformSchedule for AxisShift {
    fn name(&self) -> &'static str {
        "axis-shift"
    }

    fn transform(&self, index: usize, _count: usize) -> DMat4 {
        let sign = if (index / 3) % 2 == 0 { 1.0 } else { -1.0 };
        let mut offset = DVec3::ZERO;
        offset[index % 3] = sign * self.step * index as f64;
        DMat4::from_translation(offset)
    }
}

/// Copies rotated by `sweep * i / n` about `axis`.
///
/// A zero axis yields identity transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotational {
    pub axis: DVec3,
    pub sweep: f64,
}

impl TransformSchedule for Rotational {
    fn name(&self) -> &'static str {
        "rotational"
    }

    fn transform(&self, index: usize, count: usize) -> DMat4 {
        let Some(axis) = self.axis.try_normalize() else {
            return DMat4::IDENTITY;
        };
        let angle = self.sweep * index as f64 / count.max(1) as f64;
        DMat4::from_quat(DQuat::from_axis_angle(axis, angle))
    }
}

/// Nested scaling combined with a twist about Y and a shift along the
/// main diagonal: `T(step · i · d̂) · R_y(twist · i) · S(ratio^i)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Experimental {
    pub ratio: f64,
    pub twist: f64,
    pub step: f64,
}

impl TransformSchedule for Experimental {
    fn name(&self) -> &'static str {
        "experimental"
    }

    fn transform(&self, index: usize, _count: usize) -> DMat4 {
        let i = index as f64;
        let diagonal = DVec3::ONE / 3f64.sqrt();
        DMat4::from_scale_rotation_translation(
            DVec3::splat(self.ratio.powi(index as i32)),
            DQuat::from_rotation_y(self.twist * i),
            diagonal * self.step * i,
        )
    }
}

/// A fixed list of matrices; instances past the end use the identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Explicit(pub Vec<DMat4>);

impl TransformSchedule for Explicit {
    fn name(&self) -> &'static str {
        "explicit"
    }

    fn transform(&self, index: usize, _count: usize) -> DMat4 {
        self.0.get(index).copied().unwrap_or(DMat4::IDENTITY)
    }
}

/// Places `count` copies of `base` according to `schedule`.
///
/// Instance `i` is transformed by `S(scale) · T(offsets[i]) · M_i · S(1/scale)`
/// where `M_i` is the schedule's matrix; missing offsets count as zero.
/// `base` must already be scaled by `scale`.
///
/// Instances are built in parallel and returned in index order, so the
/// result does not depend on thread scheduling.
///
/// # Errors
///
/// `InvalidParameter` if `count` is outside `1..=MAX_INSTANCE_COUNT` or
/// `scale` is not positive and finite.
pub fn compose(
    base: &Polyhedron,
    count: usize,
    schedule: &dyn TransformSchedule,
    offsets: &[DVec3],
    scale: f64,
) -> Result<Vec<Polyhedron>, GeometryError> {
    validate_instance_count(i64::try_from(count).unwrap_or(i64::MAX))?;
    validate_scale(scale)?;

    log::debug!(
        "composing {count} instances with {} schedule",
        schedule.name()
    );

    let from_unit = DMat4::from_scale(DVec3::splat(scale));
    let to_unit = DMat4::from_scale(DVec3::splat(1.0 / scale));

    let instances = (0..count)
        .into_par_iter()
        .map(|i| {
            let offset = offsets.get(i).copied().unwrap_or(DVec3::ZERO);
            let local = DMat4::from_translation(offset) * schedule.transform(i, count);
            base.transformed(&(from_unit * local * to_unit))
        })
        .collect();

    Ok(instances)
}
