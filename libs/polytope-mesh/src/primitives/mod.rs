//! # Primitives
//!
//! Closed-form vertex/face generators for every base shape. 3D builders
//! return a [`Polyhedron`] already scaled by `scale`; 4D builders return a
//! shared unit-circumradius [`Polytope4`] that the projection layer flattens
//! before scaling.

pub mod box_solid;
pub mod cells;
pub mod parametric;
pub mod platonic;
pub mod sphere;

pub use box_solid::create_box;
pub use cells::{cell_120, cell_16, cell_24, cell_600, tesseract};
pub use parametric::{create_mobius_sphere, create_quantum_manifold};
pub use platonic::{create_cube, create_icosahedron, create_octahedron, create_tetrahedron};
pub use sphere::create_sphere;

use crate::error::GeometryError;
use crate::params::ShapeParameters;
use crate::polytope::{Polyhedron, Polytope4};

/// The golden ratio φ.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Output of a primitive builder.
#[derive(Debug, Clone)]
pub enum RawShape {
    /// A 3D solid, already scaled.
    Solid(Polyhedron),
    /// A canonical 4D polytope at unit circumradius.
    Polytope(&'static Polytope4),
}

/// Signature shared by every builder in the dispatch registry.
pub type BuildFn = fn(&ShapeParameters) -> Result<RawShape, GeometryError>;
