//! # Config Crate
//!
//! Centralized configuration constants for the polytope mesh engine.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_PROJECTION_DISTANCE, WELD_EPSILON};
//!
//! // Welding tolerance for compound instances
//! let gap: f64 = 5e-5;
//! assert!(gap < WELD_EPSILON);
//!
//! // Perspective distance for unit-circumradius 4D polytopes
//! assert!(DEFAULT_PROJECTION_DISTANCE > 1.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Bounded**: Every parameter domain has an explicit upper limit

pub mod constants;
