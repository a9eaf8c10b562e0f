//! WASM-facing entry points for procedural polytope geometry.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Native tests go through `create_geometry_internal`,
//! which returns Rust error types and needs no JS host.
//!
//! ```
//! let mesh = polytope_wasm::create_geometry_internal("cpdtesseract", "").unwrap();
//! assert_eq!(mesh.vertex_count(), 16);
//! assert!(mesh.is_hypercube());
//! ```

mod diagnostics;
mod mesh_handle;

pub use diagnostics::{Diagnostic, DiagnosticList, Severity};
pub use mesh_handle::MeshHandle;

use polytope_mesh::{create_from_name, list_shape_identifiers, GeometryError, ShapeParameters};
use wasm_bindgen::prelude::*;

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "polytope-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Returns every shape identifier in registry order.
///
/// # Examples
/// ```
/// let shapes = polytope_wasm::list_shapes();
/// assert_eq!(shapes.first().map(String::as_str), Some("icosahedron"));
/// ```
#[wasm_bindgen]
pub fn list_shapes() -> Vec<String> {
    list_shape_identifiers()
        .into_iter()
        .map(|id| id.name().to_string())
        .collect()
}

/// Builds the named shape and returns its renderer arrays.
///
/// `params_json` is a camelCase parameter record; missing keys take their
/// defaults and an empty string means all defaults.
///
/// # Errors
/// Returns a JavaScript error value with a human-readable message when the
/// parameters are malformed or out of range.
///
/// # Examples
/// ```no_run
/// // In JavaScript: create_geometry("compound600cell", '{"instanceCount": 3}');
/// ```
#[wasm_bindgen]
pub fn create_geometry(name: &str, params_json: &str) -> Result<MeshHandle, JsValue> {
    create_geometry_internal(name, params_json).map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Host-only helper behind [`create_geometry`].
///
/// # Examples
/// ```
/// let err = polytope_wasm::create_geometry_internal("box", r#"{"scale": -1}"#);
/// assert!(err.is_err());
/// ```
pub fn create_geometry_internal(name: &str, params_json: &str) -> Result<MeshHandle, GeometryError> {
    let params = parse_params(params_json)?;
    let buffer = create_from_name(name, &params)?;
    log::debug!(
        "{name}: {} vertices, {} triangles",
        buffer.vertex_count(),
        buffer.triangle_count()
    );
    Ok(MeshHandle::from_buffer(&buffer))
}

fn parse_params(json: &str) -> Result<ShapeParameters, GeometryError> {
    if json.trim().is_empty() {
        return Ok(ShapeParameters::default());
    }
    ShapeParameters::from_json(json)
}
