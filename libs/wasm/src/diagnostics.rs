//! WASM-compatible diagnostic types.
//!
//! Wraps [`GeometryError`] values so JavaScript can read both hard failures
//! and the warnings recorded on a generated buffer.

use polytope_mesh::GeometryError;
use wasm_bindgen::prelude::*;

/// Diagnostic severity for JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn of(err: &GeometryError) -> Self {
        match err {
            GeometryError::DegenerateGeometry { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A diagnostic message for JavaScript.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const diagnostics = mesh.diagnostics();
/// // for (let i = 0; i < diagnostics.len(); i++) {
/// //   console.warn(diagnostics.get(i).message());
/// // }
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    message: String,
}

#[wasm_bindgen]
impl Diagnostic {
    /// Returns the severity of the diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the diagnostic message.
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<&GeometryError> for Diagnostic {
    fn from(err: &GeometryError) -> Self {
        Self {
            severity: Severity::of(err),
            message: err.to_string(),
        }
    }
}

/// A collection of diagnostics.
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct DiagnosticList {
    diagnostics: Vec<Diagnostic>,
}

#[wasm_bindgen]
impl DiagnosticList {
    /// Returns the number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns a diagnostic by index.
    pub fn get(&self, index: usize) -> Option<Diagnostic> {
        self.diagnostics.get(index).cloned()
    }
}

impl DiagnosticList {
    pub fn from_errors(errors: &[GeometryError]) -> Self {
        Self {
            diagnostics: errors.iter().map(Diagnostic::from).collect(),
        }
    }
}
