//! # Mesh Handle
//!
//! WASM-friendly wrapper for a generated geometry buffer.

use polytope_mesh::GeometryBuffer;
use wasm_bindgen::prelude::*;

use crate::diagnostics::DiagnosticList;

/// A handle to mesh data that can be accessed from JavaScript.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const mesh = create_geometry("600cell", '{"projectionDistance": 2}');
///
/// const geometry = new THREE.BufferGeometry();
/// geometry.setAttribute('position', new THREE.BufferAttribute(mesh.positions(), 3));
/// geometry.setAttribute('normal', new THREE.BufferAttribute(mesh.normals(), 3));
/// geometry.setIndex(new THREE.BufferAttribute(mesh.indices(), 1));
///
/// if (mesh.is_compound) {
///   console.log(`${mesh.instance_count} x ${mesh.base_type}`);
/// }
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct MeshHandle {
    /// Vertex positions as [x, y, z, x, y, z, ...]
    positions: Vec<f32>,
    /// Unit vertex normals as [nx, ny, nz, ...]
    normals: Vec<f32>,
    /// Triangle indices as [i0, i1, i2, i0, i1, i2, ...]
    indices: Vec<u32>,
    vertex_count: u32,
    triangle_count: u32,
    is_compound: bool,
    is_hypercube: bool,
    instance_count: u32,
    base_type: String,
    metadata_json: String,
    diagnostics: DiagnosticList,
}

#[wasm_bindgen]
impl MeshHandle {
    /// Returns the number of vertices.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Returns the number of triangles.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    /// True when the buffer is a union of several instances.
    #[wasm_bindgen(getter)]
    pub fn is_compound(&self) -> bool {
        self.is_compound
    }

    /// True for the cube and tesseract family, including the legacy
    /// concentric-cube hypercube.
    #[wasm_bindgen(getter)]
    pub fn is_hypercube(&self) -> bool {
        self.is_hypercube
    }

    #[wasm_bindgen(getter)]
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Renderer-facing geometry class name, e.g. `"IcosahedronGeometry"`.
    #[wasm_bindgen(getter)]
    pub fn base_type(&self) -> String {
        self.base_type.clone()
    }

    /// Returns the vertex positions as a Float32Array.
    pub fn positions(&self) -> Vec<f32> {
        self.positions.clone()
    }

    /// Returns the vertex normals as a Float32Array.
    pub fn normals(&self) -> Vec<f32> {
        self.normals.clone()
    }

    /// Returns the triangle indices as a Uint32Array.
    pub fn indices(&self) -> Vec<u32> {
        self.indices.clone()
    }

    /// Metadata record serialized as camelCase JSON.
    pub fn metadata_json(&self) -> String {
        self.metadata_json.clone()
    }

    /// Warnings recovered while building the mesh.
    pub fn diagnostics(&self) -> DiagnosticList {
        self.diagnostics.clone()
    }
}

impl MeshHandle {
    /// Flattens a geometry buffer into renderer arrays.
    pub fn from_buffer(buffer: &GeometryBuffer) -> Self {
        let metadata = buffer.metadata();
        let metadata_json = serde_json::json!({
            "isCompound": metadata.is_compound,
            "baseType": metadata.base_type.as_str(),
            "isHypercube": metadata.is_hypercube,
            "instanceCount": metadata.instance_count,
        })
        .to_string();

        Self {
            positions: buffer.positions_f32(),
            normals: buffer.normals_f32(),
            indices: buffer.indices_u32(),
            vertex_count: u32::try_from(buffer.vertex_count()).unwrap_or(u32::MAX),
            triangle_count: u32::try_from(buffer.triangle_count()).unwrap_or(u32::MAX),
            is_compound: metadata.is_compound,
            is_hypercube: metadata.is_hypercube,
            instance_count: metadata.instance_count,
            base_type: metadata.base_type.as_str().to_string(),
            metadata_json,
            diagnostics: DiagnosticList::from_errors(buffer.warnings()),
        }
    }
}
