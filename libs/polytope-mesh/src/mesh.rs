//! # Geometry Buffer
//!
//! The engine's output: triangle positions, per-vertex normals, indices and
//! pipeline metadata.

use crate::error::GeometryError;
use crate::merge::{normals::vertex_normals, weld::weld};
use crate::polytope::Polyhedron;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Base primitive a pipeline was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseType {
    Icosahedron,
    Octahedron,
    Tetrahedron,
    Sphere,
    Box,
    Tesseract,
    SixteenCell,
    TwentyFourCell,
    OneHundredTwentyCell,
    SixHundredCell,
    QuantumManifold,
    MobiusSphere,
}

impl BaseType {
    /// Renderer-facing geometry class name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseType::Icosahedron => "IcosahedronGeometry",
            BaseType::Octahedron => "OctahedronGeometry",
            BaseType::Tetrahedron => "TetrahedronGeometry",
            BaseType::Sphere => "SphereGeometry",
            BaseType::Box => "BoxGeometry",
            BaseType::Tesseract => "TesseractGeometry",
            BaseType::SixteenCell => "SixteenCellGeometry",
            BaseType::TwentyFourCell => "TwentyFourCellGeometry",
            BaseType::OneHundredTwentyCell => "OneHundredTwentyCellGeometry",
            BaseType::SixHundredCell => "SixHundredCellGeometry",
            BaseType::QuantumManifold => "QuantumManifoldGeometry",
            BaseType::MobiusSphere => "MobiusSphereGeometry",
        }
    }
}

impl std::fmt::Display for BaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags describing which pipeline produced a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryMetadata {
    pub is_compound: bool,
    pub base_type: BaseType,
    pub is_hypercube: bool,
    pub instance_count: u32,
}

impl GeometryMetadata {
    /// Metadata for a single, non-compound shape.
    pub fn single(base_type: BaseType) -> Self {
        Self {
            is_compound: false,
            base_type,
            is_hypercube: false,
            instance_count: 1,
        }
    }
}

/// Merged triangle mesh with vertex normals.
///
/// All geometry is kept in f64. Export to f32 only happens for GPU upload.
///
/// # Example
///
/// ```rust
/// use polytope_mesh::{create, ShapeId, ShapeParameters};
///
/// let buffer = create(ShapeId::Octahedron, &ShapeParameters::default()).unwrap();
/// assert_eq!(buffer.triangle_count(), 8);
/// assert_eq!(buffer.positions().len(), buffer.normals().len());
/// assert_eq!(buffer.metadata().base_type.as_str(), "OctahedronGeometry");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuffer {
    positions: Vec<DVec3>,
    normals: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
    metadata: GeometryMetadata,
    warnings: Vec<GeometryError>,
}

impl GeometryBuffer {
    pub(crate) fn from_parts(
        positions: Vec<DVec3>,
        normals: Vec<DVec3>,
        triangles: Vec<[u32; 3]>,
        metadata: GeometryMetadata,
        warnings: Vec<GeometryError>,
    ) -> Self {
        Self {
            positions,
            normals,
            triangles,
            metadata,
            warnings,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the buffer has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the vertex positions.
    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Returns the vertex normals, one per position.
    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// Returns the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the pipeline metadata.
    #[inline]
    pub fn metadata(&self) -> &GeometryMetadata {
        &self.metadata
    }

    /// Returns the recovered degenerate-geometry warnings.
    #[inline]
    pub fn warnings(&self) -> &[GeometryError] {
        &self.warnings
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some((first, rest)) = self.positions.split_first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        rest.iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Checks the buffer invariants.
    ///
    /// - positions and normals have the same length
    /// - every index references a vertex
    /// - every position is finite
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.normals.len() != self.positions.len() {
            return Err(GeometryError::invalid_topology(format!(
                "{} normals for {} positions",
                self.normals.len(),
                self.positions.len()
            )));
        }
        let count = self.positions.len() as u32;
        if let Some(tri) = self
            .triangles
            .iter()
            .find(|tri| tri.iter().any(|&i| i >= count))
        {
            return Err(GeometryError::invalid_topology(format!(
                "triangle {tri:?} references a vertex past {count}"
            )));
        }
        if !self.positions.iter().all(|p| p.is_finite()) {
            return Err(GeometryError::degenerate("non-finite vertex position"));
        }
        Ok(())
    }

    /// Returns a copy with coincident vertices unified and normals
    /// recomputed.
    ///
    /// Welding twice with the same epsilon gives the same buffer.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `epsilon` is not positive and finite.
    pub fn welded(&self, epsilon: f64) -> Result<Self, GeometryError> {
        let (positions, triangles) = weld(&self.positions, &self.triangles, epsilon)?;
        let (normals, warnings) = vertex_normals(&positions, &triangles);
        Ok(Self {
            positions,
            normals,
            triangles,
            metadata: self.metadata,
            warnings,
        })
    }

    /// Converts back into a triangle-faced polyhedron.
    pub fn to_polyhedron(&self) -> Polyhedron {
        Polyhedron::new(
            self.positions.clone(),
            self.triangles.iter().map(|t| t.to_vec()).collect(),
        )
    }

    /// Exports positions as a flat f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn positions_f32(&self) -> Vec<f32> {
        flatten_f32(&self.positions)
    }

    /// Exports normals as a flat f32 array for GPU.
    pub fn normals_f32(&self) -> Vec<f32> {
        flatten_f32(&self.normals)
    }

    /// Exports triangle indices as u32 array for GPU.
    ///
    /// Returns flattened [i0, i1, i2, i0, i1, i2, ...] array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

fn flatten_f32(vectors: &[DVec3]) -> Vec<f32> {
    let mut result = Vec::with_capacity(vectors.len() * 3);
    for v in vectors {
        result.push(v.x as f32);
        result.push(v.y as f32);
        result.push(v.z as f32);
    }
    result
}
