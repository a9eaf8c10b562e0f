//! # Polytope Mesh
//!
//! Procedural mesh generation for regular polytopes, their compounds and
//! curved manifold forms, including 4D polytopes projected into 3D.
//!
//! ## Architecture
//!
//! ```text
//! ShapeId + ShapeParameters
//!   → primitives (3D solid | unit 4D polytope)
//!   → projection (4D only)
//!   → compound (transform schedule per instance)
//!   → merge (weld, vertex normals)
//!   → GeometryBuffer
//! ```
//!
//! ## Algorithms
//!
//! - **Topology**: edges are the shortest vertex pairs, faces the short
//!   cycles of the edge graph
//! - **Projection**: perspective divide on `w` with a clamped denominator
//! - **Weld**: uniform spatial hash, first-seen representative
//! - **Normals**: area-weighted face normal averaging
//!
//! ## Usage
//!
//! ```rust
//! use polytope_mesh::{create_from_name, ShapeParameters};
//!
//! let params = ShapeParameters::from_json(r#"{"projectionDistance": 2.0}"#).unwrap();
//! let buffer = create_from_name("600cell", &params).unwrap();
//! assert_eq!(buffer.vertex_count(), 120);
//! assert!(buffer.positions_f32().iter().all(|c| c.is_finite()));
//! ```

pub mod compound;
pub mod config;
pub mod error;
pub mod merge;
pub mod mesh;
pub mod params;
pub mod polytope;
pub mod primitives;
pub mod projection;
pub mod registry;

pub use crate::config::EngineConfig;
pub use error::GeometryError;
pub use mesh::{BaseType, GeometryBuffer, GeometryMetadata};
pub use params::{ProjectionMode, ShapeParameters};
pub use registry::{create, create_from_name, list_shape_identifiers, Engine, ShapeId};
